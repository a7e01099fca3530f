//! Error types for tagdeck.
//!
//! Errors are grouped by the component that raises them so messages carry the
//! relevant context (tag names, line numbers, column names). Every error is
//! recoverable: a failed operation leaves the session state untouched.

use thiserror::Error;

/// Top-level error type for tagdeck operations.
#[derive(Error, Debug)]
pub enum TagdeckError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tag registry, association store or cursor errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Association file import/export errors
    #[error("Association file error: {0}")]
    Codec(#[from] CodecError),

    /// One-hot encoder errors
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised by the tag registry, association store and cursor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Input was empty or otherwise unusable; nothing was changed
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A referenced tag or image does not exist
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    /// A rename target already exists in the registry
    #[error("Tag already exists: {0}")]
    Conflict(String),
}

impl SessionError {
    pub(crate) fn tag_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "Tag",
            name: name.into(),
        }
    }

    pub(crate) fn image_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "Image",
            name: name.into(),
        }
    }
}

/// Association file (`Image Path,Tags`) errors.
#[derive(Error, Debug)]
pub enum CodecError {
    /// A row did not have exactly two fields
    #[error("Malformed row at line {line}: expected 2 fields, found {found}")]
    MalformedRow { line: u64, found: usize },

    /// Underlying CSV reader/writer failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to open, read or write the association file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One-hot encoder errors.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// The input dataset lacks the tag column
    #[error("Dataset has no '{column}' column")]
    MissingColumn { column: String },

    /// A label would produce a column that already exists in the dataset
    #[error("Label '{label}' collides with an existing column")]
    ColumnConflict { label: String },

    /// Underlying CSV reader/writer failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to open, read or write a dataset file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EncodeError {
    /// True for failures caused by the dataset's shape rather than I/O.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            EncodeError::MissingColumn { .. } | EncodeError::ColumnConflict { .. }
        )
    }
}

/// Convenience type alias for tagdeck results.
pub type Result<T> = std::result::Result<T, TagdeckError>;

/// Convenience type alias for registry/store/cursor results.
pub type SessionResult<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = SessionError::tag_not_found("cat");
        assert_eq!(err.to_string(), "Tag not found: cat");
    }

    #[test]
    fn test_malformed_row_message() {
        let err = CodecError::MalformedRow { line: 3, found: 1 };
        assert!(err.to_string().contains("line 3"));
        assert!(err.to_string().contains("found 1"));
    }

    #[test]
    fn test_schema_error_classification() {
        let missing = EncodeError::MissingColumn {
            column: "Tags".into(),
        };
        assert!(missing.is_schema_error());
        assert!(missing.to_string().contains("'Tags'"));

        let io = EncodeError::Io(std::io::Error::other("disk"));
        assert!(!io.is_schema_error());
    }

    #[test]
    fn test_session_error_converts_to_top_level() {
        let err: TagdeckError = SessionError::Conflict("dog".into()).into();
        assert!(err.to_string().starts_with("Session error"));
    }
}
