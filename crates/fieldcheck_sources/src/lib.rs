//! Table sources for fieldcheck.
//!
//! Each source implements [`TableSource`](fieldcheck_core::TableSource), so the
//! validation engine never sees how rows were stored:
//!
//! - [`CsvSource`] reads delimited text from a file, a reader, or a string
//! - [`RecordBatchSource`] renders Arrow record batches from a columnar engine
//!
//! # Example
//!
//! ```rust
//! use fieldcheck_core::TableSource;
//! use fieldcheck_sources::{CsvOptions, CsvSource};
//!
//! let mut source = CsvSource::from_text("ID;NAME\n1;Ann\n", CsvOptions::new().with_delimiter(b';'));
//! assert_eq!(source.header().unwrap(), vec!["ID", "NAME"]);
//!
//! let rows: Vec<_> = source.rows().collect::<Result<_, _>>().unwrap();
//! assert_eq!(rows, vec![vec!["1".to_string(), "Ann".to_string()]]);
//! ```

use fieldcheck_core::ConfigurationError;
use thiserror::Error;

mod columnar;
mod delimited;

pub use columnar::RecordBatchSource;
pub use delimited::{CsvOptions, CsvSource};

/// Errors raised while reading a table.
#[derive(Error, Debug)]
pub enum SourceError {
    /// CSV input could not be opened or decoded
    #[error("Failed to read CSV input: {0}")]
    Csv(#[from] csv::Error),

    /// A column could not be read as its declared Arrow type
    #[error("Failed to read Arrow column '{0}'")]
    ColumnDowncast(String),

    /// A record batch does not share the first batch's columns
    #[error("Record batch {index} has columns [{found}], expected [{expected}]")]
    BatchSchemaMismatch {
        index: usize,
        expected: String,
        found: String,
    },
}

impl From<SourceError> for ConfigurationError {
    fn from(err: SourceError) -> Self {
        ConfigurationError::UnreadableTable(err.to_string())
    }
}

/// Result type alias for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
