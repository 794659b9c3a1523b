//! Front matter tokenizing
//!
//! A [`Tokenizer`] splits a raw document into its front matter mapping and the
//! remaining body. The extractor only depends on the trait, so tests can feed
//! it a prepared mapping without any document syntax at all.

use crate::core::{FieldValue, FrontMatter};
use crate::error::{FrontMatterError, Result};
use gray_matter::engine::{TOML, YAML};
use gray_matter::Matter;
use log::trace;
use std::collections::BTreeMap;

/// A document split into front matter and body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tokenized {
    pub front_matter: FrontMatter,
    pub body: String,
}

/// Splits a document into front matter and body
pub trait Tokenizer {
    /// Tokenize a whole document
    ///
    /// Errors must be [`FrontMatterError::Parse`]; the extractor propagates
    /// them unchanged.
    fn tokenize(&self, content: &str) -> Result<Tokenized>;
}

impl<T: Tokenizer + ?Sized> Tokenizer for &T {
    fn tokenize(&self, content: &str) -> Result<Tokenized> {
        (**self).tokenize(content)
    }
}

/// Front matter syntaxes recognised by [`GrayMatterTokenizer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontMatterFormat {
    /// `---` delimited YAML
    Yaml,
    /// `+++` delimited TOML
    Toml,
    /// A leading JSON object
    Json,
}

impl FrontMatterFormat {
    /// Detect the front matter format from the first line of a document
    pub fn detect(content: &str) -> Option<Self> {
        let first_line = content.lines().next()?.trim_end();
        match first_line {
            "---" => Some(Self::Yaml),
            "+++" => Some(Self::Toml),
            // `{{` opens a shortcode, not a JSON object
            _ if first_line.starts_with('{') && !first_line.starts_with("{{") => Some(Self::Json),
            _ => None,
        }
    }

    fn delimiter(self) -> Option<&'static str> {
        match self {
            Self::Yaml => Some("---"),
            Self::Toml => Some("+++"),
            Self::Json => None,
        }
    }
}

/// Tokenizer for Hugo-style documents
///
/// Delimited blocks are split with `gray_matter`; the block text is then
/// parsed with `serde_yaml` or `toml` so syntax errors surface as
/// [`FrontMatterError::Parse`] instead of an empty mapping. JSON front matter
/// is the leading JSON object of the document. Documents without a front
/// matter block tokenize to an empty mapping and the full body.
pub struct GrayMatterTokenizer {
    yaml: Matter<YAML>,
    toml: Matter<TOML>,
}

impl GrayMatterTokenizer {
    pub fn new() -> Self {
        let mut toml = Matter::<TOML>::new();
        toml.delimiter = "+++".to_string();
        Self {
            yaml: Matter::<YAML>::new(),
            toml,
        }
    }

    fn split_delimited(&self, format: FrontMatterFormat, content: &str) -> (String, String) {
        let parsed = match format {
            FrontMatterFormat::Toml => self.toml.parse(content),
            _ => self.yaml.parse(content),
        };
        (parsed.matter, parsed.content)
    }
}

impl Default for GrayMatterTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for GrayMatterTokenizer {
    fn tokenize(&self, content: &str) -> Result<Tokenized> {
        let content = content.trim_start_matches('\u{feff}');

        let Some(format) = FrontMatterFormat::detect(content) else {
            return Ok(Tokenized {
                front_matter: FrontMatter::empty(),
                body: content.to_string(),
            });
        };
        trace!("detected {:?} front matter", format);

        if format == FrontMatterFormat::Json {
            return split_json(content);
        }

        if let Some(delimiter) = format.delimiter() {
            let terminated = content
                .lines()
                .skip(1)
                .any(|line| line.trim_end() == delimiter);
            if !terminated {
                return Err(FrontMatterError::parse(format!(
                    "front matter opened with {delimiter} is never closed"
                )));
            }
        }

        let (matter, body) = self.split_delimited(format, content);
        let front_matter = match format {
            FrontMatterFormat::Toml => parse_toml(&matter)?,
            _ => parse_yaml(&matter)?,
        };

        Ok(Tokenized { front_matter, body })
    }
}

fn parse_yaml(matter: &str) -> Result<FrontMatter> {
    if matter.trim().is_empty() {
        return Ok(FrontMatter::empty());
    }

    let value: serde_yaml::Value = serde_yaml::from_str(matter)
        .map_err(|e| FrontMatterError::parse(format!("invalid YAML: {e}")))?;

    match value {
        serde_yaml::Value::Mapping(map) => {
            let mut fields = BTreeMap::new();
            for (k, v) in map {
                let Some(key) = k.as_str() else {
                    return Err(FrontMatterError::parse(format!(
                        "non-string key found: {k:?}"
                    )));
                };
                fields.insert(key.to_string(), FieldValue::from(v));
            }
            Ok(FrontMatter::new(fields))
        }
        serde_yaml::Value::Null => Ok(FrontMatter::empty()),
        other => Err(FrontMatterError::parse(format!(
            "expected mapping, found {}",
            FieldValue::from(other).kind()
        ))),
    }
}

fn parse_toml(matter: &str) -> Result<FrontMatter> {
    let table: toml::Table = toml::from_str(matter)
        .map_err(|e| FrontMatterError::parse(format!("invalid TOML: {e}")))?;
    Ok(table
        .into_iter()
        .map(|(k, v)| (k, FieldValue::from(v)))
        .collect())
}

fn split_json(content: &str) -> Result<Tokenized> {
    let mut stream = serde_json::Deserializer::from_str(content).into_iter::<serde_json::Value>();
    let value = match stream.next() {
        Some(Ok(value)) => value,
        Some(Err(e)) => {
            return Err(FrontMatterError::parse(format!("invalid JSON: {e}")));
        }
        None => return Err(FrontMatterError::parse("empty JSON front matter")),
    };
    let body = content[stream.byte_offset()..]
        .trim_start_matches(['\r', '\n'])
        .to_string();

    match FieldValue::from(value) {
        FieldValue::Mapping(fields) => Ok(Tokenized {
            front_matter: FrontMatter::new(fields),
            body,
        }),
        other => Err(FrontMatterError::parse(format!(
            "expected mapping, found {}",
            other.kind()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(content: &str) -> Result<Tokenized> {
        GrayMatterTokenizer::new().tokenize(content)
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(FrontMatterFormat::detect("---\na: 1\n---\n"), Some(FrontMatterFormat::Yaml));
        assert_eq!(FrontMatterFormat::detect("+++\na = 1\n+++\n"), Some(FrontMatterFormat::Toml));
        assert_eq!(FrontMatterFormat::detect("{\"a\": 1}\n"), Some(FrontMatterFormat::Json));
        assert_eq!(FrontMatterFormat::detect("# Heading\n"), None);
        assert_eq!(FrontMatterFormat::detect("{{< figure src=\"a.png\" >}}\n"), None);
        assert_eq!(FrontMatterFormat::detect(""), None);
    }

    #[test]
    fn test_yaml_front_matter() {
        let tokenized = tokenize("---\ntitle: Hello\ntags: [a, b]\n---\nBody content").unwrap();
        assert_eq!(
            tokenized.front_matter.get("title"),
            Some(&FieldValue::text("Hello"))
        );
        assert_eq!(
            tokenized.front_matter.get("tags"),
            Some(&FieldValue::texts(["a", "b"]))
        );
        assert_eq!(tokenized.body.trim(), "Body content");
    }

    #[test]
    fn test_toml_front_matter() {
        let tokenized = tokenize(
            "+++\ntitle = \"Hello\"\ndate = 2020-01-01T00:00:00Z\n+++\nBody content",
        )
        .unwrap();
        assert_eq!(
            tokenized.front_matter.get("title"),
            Some(&FieldValue::text("Hello"))
        );
        assert!(matches!(
            tokenized.front_matter.get("date"),
            Some(FieldValue::Timestamp(_))
        ));
        assert_eq!(tokenized.body.trim(), "Body content");
    }

    #[test]
    fn test_json_front_matter() {
        let tokenized =
            tokenize("{\n  \"title\": \"Hello\",\n  \"draft\": false\n}\nBody content").unwrap();
        assert_eq!(
            tokenized.front_matter.get("title"),
            Some(&FieldValue::text("Hello"))
        );
        assert_eq!(tokenized.front_matter.get("draft"), Some(&FieldValue::Bool(false)));
        assert_eq!(tokenized.body, "Body content");
    }

    #[test]
    fn test_no_front_matter() {
        let content = "# Hello\n\nJust markdown.";
        let tokenized = tokenize(content).unwrap();
        assert!(tokenized.front_matter.is_empty());
        assert_eq!(tokenized.body, content);
    }

    #[test]
    fn test_empty_front_matter() {
        let tokenized = tokenize("---\n---\nBody").unwrap();
        assert!(tokenized.front_matter.is_empty());
    }

    #[test]
    fn test_unterminated_front_matter() {
        let result = tokenize("---\ntitle: Hello\nBody without a closing delimiter");
        assert!(matches!(result, Err(FrontMatterError::Parse { .. })));
    }

    #[test]
    fn test_invalid_toml() {
        let result = tokenize("+++\ntitle = \n+++\nBody");
        assert!(matches!(result, Err(FrontMatterError::Parse { .. })));
    }

    #[test]
    fn test_non_mapping_yaml() {
        let result = tokenize("---\n- a\n- b\n---\nBody");
        assert!(matches!(result, Err(FrontMatterError::Parse { .. })));
    }

    #[test]
    fn test_invalid_json() {
        let result = tokenize("{ \"title\": \nBody");
        assert!(matches!(result, Err(FrontMatterError::Parse { .. })));
    }
}
