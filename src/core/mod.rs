//! Core library types for metadata extraction
//!
//! - FieldValue: loosely-typed front matter values
//! - FrontMatter: read-only field accessors over a tokenized mapping
//! - Metadata / Defaults: the normalized record and its fallback bundle
//! - Extractor: field extraction and default substitution

pub mod extractor;
pub mod front_matter;
pub mod metadata;
pub mod value;

pub use extractor::{
    DateFallback, DateSource, DraftCheck, Extraction, Extractor, ExtractorConfig, DATE_KEYS,
};
pub use front_matter::FrontMatter;
pub use metadata::{Defaults, Metadata};
pub use value::{parse_timestamp, FieldValue};
