//! Validation traits and options.
//!
//! This module defines the table source capability the engine reads rows
//! through, and the options that tune a validation run. Backends (CSV files,
//! columnar batches, query results) implement [`TableSource`] without the
//! engine depending on them.

use crate::Result;

/// Ordered cell values of one data row.
pub type Row = Vec<String>;

/// A supplier of a header and data rows.
///
/// # Example
///
/// ```rust
/// use fieldcheck_core::{Result, Row, TableSource};
///
/// struct Fixed {
///     header: Vec<String>,
///     rows: Vec<Row>,
/// }
///
/// impl TableSource for Fixed {
///     fn header(&mut self) -> Result<Vec<String>> {
///         Ok(self.header.clone())
///     }
///
///     fn rows(&mut self) -> Box<dyn Iterator<Item = Result<Row>> + '_> {
///         Box::new(self.rows.iter().cloned().map(Ok))
///     }
/// }
/// ```
pub trait TableSource {
    /// Returns the header, in table order and not deduplicated.
    fn header(&mut self) -> Result<Vec<String>>;

    /// Returns the data rows lazily, header excluded.
    fn rows(&mut self) -> Box<dyn Iterator<Item = Result<Row>> + '_>;
}

/// Options for a validation run.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    /// Stop before field and table checks when column alignment fails
    pub alignment_gate: bool,

    /// Maximum number of data rows to validate
    pub sample_size: Option<usize>,

    /// Run independent checks concurrently
    pub parallel: bool,
}

impl ValidationContext {
    /// Creates a new validation context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether column alignment gates the remaining checks.
    pub fn with_alignment_gate(mut self, gate: bool) -> Self {
        self.alignment_gate = gate;
        self
    }

    /// Sets the sample size.
    pub fn with_sample_size(mut self, size: usize) -> Self {
        self.sample_size = Some(size);
        self
    }

    /// Sets concurrent check execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self {
            alignment_gate: true,
            sample_size: None,
            parallel: false,
        }
    }
}
