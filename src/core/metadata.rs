//! The normalized metadata record and its default bundle

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Normalized metadata extracted from a document's front matter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    pub date: DateTime<FixedOffset>,
}

/// Fallback values used when a field is absent or unusable
///
/// A default bundle is only read, never modified by extraction. When `date` is
/// `None` and no date field exists, extraction falls back to the current time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    pub title: String,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    pub date: Option<DateTime<FixedOffset>>,
}

impl Defaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_date(mut self, date: DateTime<FixedOffset>) -> Self {
        self.date = Some(date);
        self
    }
}

impl From<Metadata> for Defaults {
    fn from(metadata: Metadata) -> Self {
        Self {
            title: metadata.title,
            author: metadata.author,
            category: metadata.category,
            tags: metadata.tags,
            date: Some(metadata.date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_builder() {
        let date = DateTime::parse_from_rfc3339("2024-03-01T08:00:00+08:00").unwrap();
        let defaults = Defaults::new()
            .with_title("Untitled")
            .with_author("anonymous")
            .with_category("misc")
            .with_tags(["note"])
            .with_date(date);

        assert_eq!(defaults.title, "Untitled");
        assert_eq!(defaults.author, "anonymous");
        assert_eq!(defaults.category, "misc");
        assert_eq!(defaults.tags, vec!["note".to_string()]);
        assert_eq!(defaults.date, Some(date));
    }

    #[test]
    fn test_defaults_from_metadata() {
        let metadata = Metadata {
            title: "T".into(),
            author: "A".into(),
            category: "C".into(),
            tags: vec!["x".into()],
            date: DateTime::parse_from_rfc3339("2020-01-01T00:00:00Z").unwrap(),
        };
        let defaults = Defaults::from(metadata.clone());
        assert_eq!(defaults.title, metadata.title);
        assert_eq!(defaults.date, Some(metadata.date));
    }

    #[test]
    fn test_metadata_serializes_date_as_text() {
        let metadata = Metadata {
            title: "T".into(),
            author: "A".into(),
            category: "C".into(),
            tags: vec![],
            date: DateTime::parse_from_rfc3339("2020-01-01T00:00:00Z").unwrap(),
        };
        let json = serde_json::to_value(&metadata).unwrap();
        let rendered = json["date"].as_str().unwrap();
        assert_eq!(
            DateTime::parse_from_rfc3339(rendered).unwrap(),
            metadata.date
        );
    }
}
