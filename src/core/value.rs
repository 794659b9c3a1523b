//! Loosely-typed front matter values
//!
//! Front matter formats disagree on what a value can be. YAML has no native
//! timestamp, TOML does, and both allow sequences of mixed items. [`FieldValue`]
//! is the common sum type every tokenizer converts into, so the extraction
//! logic never inspects format-specific values.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A single front matter value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Text(String),
    Bool(bool),
    Integer(i64),
    Float(f64),
    Timestamp(DateTime<FixedOffset>),
    Sequence(Vec<FieldValue>),
    Mapping(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Create a text value
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Create a sequence of text values
    pub fn texts<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Sequence(items.into_iter().map(|s| Self::Text(s.into())).collect())
    }

    /// Name of the value's shape, used in type error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Text(_) => "string",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Timestamp(_) => "timestamp",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[FieldValue]> {
        match self {
            Self::Sequence(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    /// Coerce to a timestamp
    ///
    /// Native timestamps pass through; text is accepted when it parses with
    /// [`parse_timestamp`]. Everything else yields `None`.
    pub fn as_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::Timestamp(t) => Some(*t),
            Self::Text(s) => parse_timestamp(s),
            _ => None,
        }
    }
}

/// Parse a textual timestamp
///
/// Accepts RFC 3339, plus the offset-less `YYYY-MM-DDTHH:MM:SS`,
/// `YYYY-MM-DD HH:MM:SS` and bare `YYYY-MM-DD` forms, which are read as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t);
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

impl From<serde_yaml::Value> for FieldValue {
    fn from(value: serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Null => Self::Null,
            serde_yaml::Value::Bool(b) => Self::Bool(b),
            serde_yaml::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_yaml::Value::String(s) => Self::Text(s),
            serde_yaml::Value::Sequence(seq) => {
                Self::Sequence(seq.into_iter().map(Self::from).collect())
            }
            serde_yaml::Value::Mapping(map) => Self::Mapping(
                map.into_iter()
                    .filter_map(|(k, v)| k.as_str().map(|key| (key.to_string(), Self::from(v))))
                    .collect(),
            ),
            // Custom tags (`!foo bar`) carry no meaning for metadata
            serde_yaml::Value::Tagged(tagged) => Self::from(tagged.value),
        }
    }
}

impl From<toml::Value> for FieldValue {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Self::Text(s),
            toml::Value::Integer(i) => Self::Integer(i),
            toml::Value::Float(f) => Self::Float(f),
            toml::Value::Boolean(b) => Self::Bool(b),
            toml::Value::Datetime(dt) => {
                let raw = dt.to_string();
                match parse_timestamp(&raw) {
                    Some(t) => Self::Timestamp(t),
                    // Local times without a date
                    None => Self::Text(raw),
                }
            }
            toml::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            toml::Value::Table(table) => Self::Mapping(
                table
                    .into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<DateTime<FixedOffset>> for FieldValue {
    fn from(t: DateTime<FixedOffset>) -> Self {
        Self::Timestamp(t)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Timestamp(t) => write!(f, "{}", t.to_rfc3339()),
            Self::Sequence(_) | Self::Mapping(_) => {
                let rendered = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                write!(f, "{rendered}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(FieldValue::Null.kind(), "null");
        assert_eq!(FieldValue::text("a").kind(), "string");
        assert_eq!(FieldValue::Integer(5).kind(), "integer");
        assert_eq!(FieldValue::texts(["a"]).kind(), "sequence");
    }

    #[test]
    fn test_parse_timestamp_forms() {
        assert_eq!(
            parse_timestamp("2020-01-01T00:00:00Z"),
            Some(ts("2020-01-01T00:00:00Z"))
        );
        assert_eq!(
            parse_timestamp("2020-01-01T09:30:00+09:00"),
            Some(ts("2020-01-01T09:30:00+09:00"))
        );
        assert_eq!(
            parse_timestamp("2020-01-01T12:00:00"),
            Some(ts("2020-01-01T12:00:00Z"))
        );
        assert_eq!(parse_timestamp("2022-06-15"), Some(ts("2022-06-15T00:00:00Z")));
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_as_timestamp() {
        let native = FieldValue::Timestamp(ts("2021-01-01T00:00:00Z"));
        assert_eq!(native.as_timestamp(), Some(ts("2021-01-01T00:00:00Z")));
        assert_eq!(
            FieldValue::text("2021-01-01T00:00:00Z").as_timestamp(),
            Some(ts("2021-01-01T00:00:00Z"))
        );
        assert_eq!(FieldValue::Integer(20210101).as_timestamp(), None);
        assert_eq!(FieldValue::Bool(true).as_timestamp(), None);
    }

    #[test]
    fn test_from_yaml() {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str("title: Hello\ncount: 3\nratio: 0.5\ntags: [a, 5]\ndraft: false")
                .unwrap();
        let value = FieldValue::from(yaml);
        let FieldValue::Mapping(map) = value else {
            panic!("expected mapping");
        };
        assert_eq!(map["title"], FieldValue::text("Hello"));
        assert_eq!(map["count"], FieldValue::Integer(3));
        assert_eq!(map["ratio"], FieldValue::Float(0.5));
        assert_eq!(map["draft"], FieldValue::Bool(false));
        assert_eq!(
            map["tags"],
            FieldValue::Sequence(vec![FieldValue::text("a"), FieldValue::Integer(5)])
        );
    }

    #[test]
    fn test_from_toml_datetime() {
        let table: toml::Table =
            toml::from_str("date = 2020-01-01T00:00:00Z\nday = 2022-06-15\nat = 07:32:00").unwrap();
        assert_eq!(
            FieldValue::from(table["date"].clone()),
            FieldValue::Timestamp(ts("2020-01-01T00:00:00Z"))
        );
        assert_eq!(
            FieldValue::from(table["day"].clone()),
            FieldValue::Timestamp(ts("2022-06-15T00:00:00Z"))
        );
        assert!(matches!(FieldValue::from(table["at"].clone()), FieldValue::Text(_)));
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::text("x").to_string(), "x");
        assert_eq!(FieldValue::Integer(5).to_string(), "5");
        assert_eq!(FieldValue::texts(["a", "b"]).to_string(), r#"["a","b"]"#);
    }
}
