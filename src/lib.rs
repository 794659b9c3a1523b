//! hugo-frontmatter: normalized metadata from Hugo-style front matter
//!
//! This library reads the front matter block of a content document and turns
//! it into a fixed [`Metadata`] record: title, author, category, tags and
//! publication date. Missing or unusable fields are filled from a
//! caller-supplied [`Defaults`] bundle.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hugo_frontmatter::{Defaults, Extractor, Result};
//!
//! fn main() -> Result<()> {
//!     let defaults = Defaults::new()
//!         .with_author("Site Owner")
//!         .with_category("uncategorized");
//!
//!     let extractor = Extractor::new();
//!     let extraction = extractor.extract_file("content/posts/hello.md", &defaults)?;
//!
//!     println!("{} by {}", extraction.metadata.title, extraction.metadata.author);
//!     if extraction.missing_date() {
//!         println!("no date field, using {}", extraction.metadata.date);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Custom tokenizers
//!
//! Front matter syntax is handled by a [`Tokenizer`]. The default
//! [`GrayMatterTokenizer`] understands YAML (`---`), TOML (`+++`) and JSON
//! front matter; any other implementation can be plugged in with
//! [`Extractor::with_tokenizer`].
//!
//! ```rust
//! use hugo_frontmatter::{
//!     Defaults, Extractor, ExtractorConfig, FieldValue, FrontMatter, Result, Tokenized, Tokenizer,
//! };
//!
//! struct Fixed;
//!
//! impl Tokenizer for Fixed {
//!     fn tokenize(&self, content: &str) -> Result<Tokenized> {
//!         Ok(Tokenized {
//!             front_matter: FrontMatter::from_iter([("title", FieldValue::text("Fixed"))]),
//!             body: content.to_string(),
//!         })
//!     }
//! }
//!
//! let extractor = Extractor::with_tokenizer(Fixed, ExtractorConfig::default());
//! let extraction = extractor.extract_str("body", &Defaults::new()).unwrap();
//! assert_eq!(extraction.metadata.title, "Fixed");
//! ```
//!
//! # Architecture
//!
//! - [`core`]: value model, front matter accessors, the record and the extractor
//! - [`io`]: the tokenizer seam and the default tokenizer
//! - [`error`]: error taxonomy shared by both

// Public API exports
pub use error::{FrontMatterError, Result};

// Core types
pub use core::{
    parse_timestamp, DateFallback, DateSource, Defaults, DraftCheck, Extraction, Extractor,
    ExtractorConfig, FieldValue, FrontMatter, Metadata, DATE_KEYS,
};

// IO types
pub use io::{FrontMatterFormat, GrayMatterTokenizer, Tokenized, Tokenizer};

pub mod core;
pub mod error;
pub mod io;

/// Convenience functions for common operations
pub mod convenience {
    //! Convenience functions that use the default extractor configuration
    //!
    //! Useful for scripts and one-off reads where the fallback and draft
    //! policies don't need tuning.

    use crate::{Defaults, Extractor, Metadata, Result};
    use std::path::Path;

    /// Extract metadata from a file
    pub fn extract_file<P: AsRef<Path>>(path: P, defaults: &Defaults) -> Result<Metadata> {
        Extractor::new()
            .extract_file(path, defaults)
            .map(|e| e.metadata)
    }

    /// Extract metadata from document text
    pub fn extract_str(content: &str, defaults: &Defaults) -> Result<Metadata> {
        Extractor::new()
            .extract_str(content, defaults)
            .map(|e| e.metadata)
    }
}
