//! Error types for schema loading and table acquisition.
//!
//! Only configuration failures are errors. Data problems found while validating
//! rows are recorded as [`Violation`](crate::Violation)s and never abort a run.

use thiserror::Error;

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// Unrecoverable failure raised before any row is validated.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// The schema document is malformed or violates a load-time rule
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// The table could not be read
    #[error("Unreadable table: {0}")]
    UnreadableTable(String),

    /// Document format not supported
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// File has no usable extension to detect its format from
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// File I/O error
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigurationError {
    /// Creates a new invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Self::InvalidSchema(message.into())
    }

    /// Creates a new unreadable table error.
    pub fn unreadable_table(message: impl Into<String>) -> Self {
        Self::UnreadableTable(message.into())
    }
}
