//! Error types for the hugo-frontmatter library
//!
//! Field-level errors (`NotExist`, `InvalidType`) are produced by the front
//! matter accessors and mostly consumed by the extractor, which turns them into
//! default substitutions. Only the fields documented on
//! [`Extractor`](crate::Extractor) let them escape.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum FrontMatterError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found or invalid path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Permission errors
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// The document or its front matter block is malformed
    #[error("Invalid front matter{}: {reason}", in_path(.path))]
    Parse {
        path: Option<PathBuf>,
        reason: String,
    },

    /// A requested field is absent from the front matter
    #[error("front matter field does not exist: {key}")]
    NotExist { key: String },

    /// A requested field exists with an incompatible shape
    #[error("front matter field {key} has invalid type: expected {expected}, found {found}")]
    InvalidType {
        key: String,
        expected: String,
        found: String,
    },

    /// The document carries a draft marker
    #[error("this article is draft{}", in_path(.path))]
    Draft { path: Option<PathBuf> },

    /// Generic validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },
}

fn in_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, FrontMatterError>;

impl FrontMatterError {
    /// Create a new file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied { path: path.into() }
    }

    /// Create a new parse error; the path is attached once known
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            path: None,
            reason: reason.into(),
        }
    }

    /// Create a new missing field error
    pub fn not_exist(key: impl Into<String>) -> Self {
        Self::NotExist { key: key.into() }
    }

    /// Create a new invalid type error
    pub fn invalid_type(
        key: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::InvalidType {
            key: key.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a new draft error
    pub fn draft() -> Self {
        Self::Draft { path: None }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Attach a path to errors raised before the source location was known
    pub(crate) fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Parse { reason, .. } => Self::Parse {
                path: Some(path.into()),
                reason,
            },
            Self::Draft { .. } => Self::Draft {
                path: Some(path.into()),
            },
            other => other,
        }
    }
}
