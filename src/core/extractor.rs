//! Metadata extraction from front matter
//!
//! The [`Extractor`] reads title, author, category, tags and publication date
//! out of a tokenized front matter mapping. Fields fall back to the caller's
//! [`Defaults`] on a per-field policy:
//!
//! | field    | absent   | wrong shape |
//! |----------|----------|-------------|
//! | title    | default  | default     |
//! | author   | default  | default, except a sequence without a usable first item, which is an error |
//! | category | default  | default     |
//! | tags     | default  | error       |
//! | date     | fallback | error       |

use crate::core::front_matter::FrontMatter;
use crate::core::metadata::{Defaults, Metadata};
use crate::error::{FrontMatterError, Result};
use crate::io::tokenizer::{GrayMatterTokenizer, Tokenized, Tokenizer};
use chrono::{DateTime, FixedOffset, Utc};
use log::{debug, warn};
use std::fs;
use std::io::Read;
use std::path::Path;

pub const TITLE: &str = "title";
pub const AUTHOR: &str = "author";
pub const CATEGORIES: &str = "categories";
pub const TAGS: &str = "tags";
pub const DRAFT: &str = "draft";

/// Date keys, highest priority first
pub const DATE_KEYS: [&str; 3] = ["date", "lastmod", "publishDate"];

/// What to use as the date when none of [`DATE_KEYS`] is present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFallback {
    /// The default bundle's date, or the current time when it has none
    #[default]
    Defaults,
    /// Always the current time
    Now,
}

/// How the `draft` marker is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftCheck {
    /// Abort only when reading `draft` failed and the value read is true.
    /// A failed read never yields true, so drafts are extracted like any other
    /// document.
    #[default]
    Compatible,
    /// Abort whenever `draft` is a well-typed `true`
    Strict,
}

/// Where the extracted date came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    /// One of [`DATE_KEYS`]
    Field(&'static str),
    /// The default bundle
    Defaults,
    /// The clock at extraction time
    Now,
}

/// Configuration for the extractor
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub date_fallback: DateFallback,
    pub draft_check: DraftCheck,
    /// Maximum file size to read (in bytes)
    pub max_file_size: Option<u64>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            date_fallback: DateFallback::default(),
            draft_check: DraftCheck::default(),
            max_file_size: Some(10 * 1024 * 1024), // 10MB default limit
        }
    }
}

/// Result of a successful extraction
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub metadata: Metadata,
    /// Document content after the front matter block
    pub body: String,
    pub date_source: DateSource,
}

impl Extraction {
    /// True when none of the date keys was present
    pub fn missing_date(&self) -> bool {
        !matches!(self.date_source, DateSource::Field(_))
    }

    /// The "no date field" condition as an error, for callers that treat it as fatal
    pub fn date_error(&self) -> Option<FrontMatterError> {
        self.missing_date()
            .then(|| FrontMatterError::not_exist(DATE_KEYS.join(", ")))
    }

    pub fn into_metadata(self) -> Metadata {
        self.metadata
    }
}

/// Extracts normalized [`Metadata`] from documents
///
/// The extractor holds no per-document state; one instance can serve any
/// number of extractions, including from several threads when the tokenizer
/// is `Sync`.
pub struct Extractor<T = GrayMatterTokenizer> {
    config: ExtractorConfig,
    tokenizer: T,
}

impl Extractor<GrayMatterTokenizer> {
    /// Create a new extractor with default configuration
    pub fn new() -> Self {
        Self::with_config(ExtractorConfig::default())
    }

    /// Create a new extractor with custom configuration
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self {
            config,
            tokenizer: GrayMatterTokenizer::new(),
        }
    }
}

impl Default for Extractor<GrayMatterTokenizer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tokenizer> Extractor<T> {
    /// Create an extractor around a custom tokenizer
    pub fn with_tokenizer(tokenizer: T, config: ExtractorConfig) -> Self {
        Self { config, tokenizer }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract metadata from a file
    ///
    /// The file is closed before this returns, whatever the outcome.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P, defaults: &Defaults) -> Result<Extraction> {
        let path = path.as_ref();
        debug!("Extracting front matter from {}", path.display());

        if let Some(max_size) = self.config.max_file_size {
            let metadata = fs::metadata(path).map_err(|e| map_open_error(e, path))?;
            if metadata.len() > max_size {
                return Err(FrontMatterError::validation(format!(
                    "File too large: {} bytes (limit: {} bytes)",
                    metadata.len(),
                    max_size
                )));
            }
        }

        let file = fs::File::open(path).map_err(|e| map_open_error(e, path))?;
        self.extract_reader(file, defaults)
            .map_err(|e| e.with_path(path))
    }

    /// Extract metadata from any byte stream
    ///
    /// Content that is not valid UTF-8 is a [`FrontMatterError::Parse`].
    pub fn extract_reader<R: Read>(&self, mut reader: R, defaults: &Defaults) -> Result<Extraction> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let content = String::from_utf8(bytes).map_err(|e| {
            FrontMatterError::parse(format!("document is not valid UTF-8: {}", e.utf8_error()))
        })?;
        self.extract_str(&content, defaults)
    }

    /// Extract metadata from document text
    pub fn extract_str(&self, content: &str, defaults: &Defaults) -> Result<Extraction> {
        let tokenized = self.tokenizer.tokenize(content)?;
        self.extract_tokenized(tokenized, defaults)
    }

    /// Extract metadata from an already tokenized document
    pub fn extract_tokenized(&self, tokenized: Tokenized, defaults: &Defaults) -> Result<Extraction> {
        let Tokenized { front_matter, body } = tokenized;
        let fm = &front_matter;

        let title = fm
            .get_string(TITLE)
            .map(str::to_string)
            .unwrap_or_else(|e| fallback(e, &defaults.title));

        let author = if fm.is_sequence(AUTHOR) {
            fm.get_first_string_item(AUTHOR)?
        } else {
            fm.get_string(AUTHOR)
                .map(str::to_string)
                .unwrap_or_else(|e| fallback(e, &defaults.author))
        };

        let category = fm
            .get_first_string_item(CATEGORIES)
            .unwrap_or_else(|e| fallback(e, &defaults.category));

        let tags = match fm.get_all_string_items(TAGS) {
            Ok(tags) => tags,
            Err(e @ FrontMatterError::NotExist { .. }) => fallback(e, &defaults.tags),
            Err(e) => return Err(e),
        };

        let (date, date_source) = self.extract_date(fm, defaults)?;

        if self.is_draft(fm) {
            warn!("Skipping draft document");
            return Err(FrontMatterError::draft());
        }

        Ok(Extraction {
            metadata: Metadata {
                title,
                author,
                category,
                tags,
                date,
            },
            body,
            date_source,
        })
    }

    /// Pick the first date key that is present
    ///
    /// A present key with an unusable value is an error; later keys are not
    /// consulted.
    fn extract_date(
        &self,
        fm: &FrontMatter,
        defaults: &Defaults,
    ) -> Result<(DateTime<FixedOffset>, DateSource)> {
        for key in DATE_KEYS {
            match fm.get_time(key) {
                Ok(date) => return Ok((date, DateSource::Field(key))),
                Err(FrontMatterError::NotExist { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        debug!("No date field among {:?}, falling back", DATE_KEYS);
        match (self.config.date_fallback, defaults.date) {
            (DateFallback::Defaults, Some(date)) => Ok((date, DateSource::Defaults)),
            _ => Ok((Utc::now().fixed_offset(), DateSource::Now)),
        }
    }

    fn is_draft(&self, fm: &FrontMatter) -> bool {
        let (is_draft, read_error) = match fm.get_bool(DRAFT) {
            Ok(value) => (value, None),
            Err(e) => (false, Some(e)),
        };
        match self.config.draft_check {
            DraftCheck::Compatible => read_error.is_some() && is_draft,
            DraftCheck::Strict => read_error.is_none() && is_draft,
        }
    }
}

fn fallback<V: Clone>(error: FrontMatterError, default: &V) -> V {
    debug!("Using default value: {}", error);
    default.clone()
}

fn map_open_error(error: std::io::Error, path: &Path) -> FrontMatterError {
    match error.kind() {
        std::io::ErrorKind::NotFound => FrontMatterError::file_not_found(path),
        std::io::ErrorKind::PermissionDenied => FrontMatterError::permission_denied(path),
        _ => FrontMatterError::Io(error),
    }
}
