//! Read-only access to a tokenized front matter mapping
//!
//! Each accessor reads one key with one expected shape and reports absence as
//! [`FrontMatterError::NotExist`] and a shape mismatch as
//! [`FrontMatterError::InvalidType`]. Deciding which of those errors matter is
//! left to the caller.

use crate::core::value::FieldValue;
use crate::error::{FrontMatterError, Result};
use chrono::{DateTime, FixedOffset};
use std::collections::{BTreeMap, HashSet};

/// Field name to value mapping produced by a tokenizer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    fields: BTreeMap<String, FieldValue>,
}

impl FrontMatter {
    pub fn new(fields: BTreeMap<String, FieldValue>) -> Self {
        Self { fields }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    fn require(&self, key: &str) -> Result<&FieldValue> {
        self.fields
            .get(key)
            .ok_or_else(|| FrontMatterError::not_exist(key))
    }

    /// Read a non-empty text value; an empty string counts as absent
    pub fn get_string(&self, key: &str) -> Result<&str> {
        match self.require(key)? {
            FieldValue::Text(s) if s.is_empty() => Err(FrontMatterError::not_exist(key)),
            FieldValue::Text(s) => Ok(s.as_str()),
            other => Err(FrontMatterError::invalid_type(key, "string", other.kind())),
        }
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        let value = self.require(key)?;
        value
            .as_bool()
            .ok_or_else(|| FrontMatterError::invalid_type(key, "bool", value.kind()))
    }

    /// Read a timestamp, accepting native timestamps and parseable text
    pub fn get_time(&self, key: &str) -> Result<DateTime<FixedOffset>> {
        let value = self.require(key)?;
        value
            .as_timestamp()
            .ok_or_else(|| FrontMatterError::invalid_type(key, "timestamp or string", value.kind()))
    }

    /// Collect every distinct non-empty text item of a sequence, in order of
    /// first occurrence
    ///
    /// Any non-text item fails the whole read. A sequence with no usable item
    /// is reported as absent.
    pub fn get_all_string_items(&self, key: &str) -> Result<Vec<String>> {
        let value = self.require(key)?;
        let items = value
            .as_sequence()
            .ok_or_else(|| FrontMatterError::invalid_type(key, "sequence", value.kind()))?;

        let mut seen = HashSet::with_capacity(items.len());
        let mut strings = Vec::with_capacity(items.len());
        for item in items {
            match item {
                FieldValue::Text(s) if s.is_empty() => {}
                FieldValue::Text(s) => {
                    if seen.insert(s.as_str()) {
                        strings.push(s.clone());
                    }
                }
                other => return Err(FrontMatterError::invalid_type(key, "string", other.kind())),
            }
        }

        if strings.is_empty() {
            return Err(FrontMatterError::not_exist(key));
        }
        Ok(strings)
    }

    pub fn get_first_string_item(&self, key: &str) -> Result<String> {
        let mut items = self.get_all_string_items(key)?;
        Ok(items.swap_remove(0))
    }

    pub fn is_sequence(&self, key: &str) -> bool {
        self.fields.get(key).is_some_and(FieldValue::is_sequence)
    }
}

impl From<BTreeMap<String, FieldValue>> for FrontMatter {
    fn from(fields: BTreeMap<String, FieldValue>) -> Self {
        Self::new(fields)
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for FrontMatter {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
