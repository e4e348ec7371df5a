//! In-memory table representation for validation.
//!
//! A [`Table`] is a header plus ordered rows of raw string cells, as supplied
//! by a [`TableSource`]. Rows may be shorter than the header; missing trailing
//! cells read as the empty string.

use fieldcheck_core::{Result, Row, TableSource};
use tracing::debug;

/// A header and its data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Creates a new table from a header and rows.
    pub fn new(header: Vec<String>, rows: Vec<Row>) -> Self {
        Self { header, rows }
    }

    /// Creates a new empty table.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reads every row of a source into memory.
    ///
    /// Fails on the first row the source cannot produce.
    pub fn from_source(source: &mut dyn TableSource) -> Result<Self> {
        let header = source.header()?;
        let rows = source.rows().collect::<Result<Vec<_>>>()?;
        debug!(columns = header.len(), rows = rows.len(), "table loaded");
        Ok(Self { header, rows })
    }

    /// Builds a table from string slices.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fieldcheck_validator::Table;
    ///
    /// let table = Table::from_strs(&["A", "B"], &[&["1", "2"], &["3"]]);
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.value(2, 1), Some(""));
    /// ```
    pub fn from_strs(header: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|v| v.to_string()).collect())
                .collect(),
        }
    }

    /// Returns the header.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Returns the number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns an iterator over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Returns rows paired with their 1-based row number.
    pub fn numbered_rows(&self) -> impl Iterator<Item = (usize, &Row)> {
        self.rows.iter().enumerate().map(|(idx, row)| (idx + 1, row))
    }

    /// Returns the index of the first header column with this name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Returns the raw cell at a 1-based row number and column index.
    ///
    /// A cell past the end of a short row reads as `""`; an unknown row
    /// number returns `None`.
    pub fn value(&self, row_number: usize, column: usize) -> Option<&str> {
        let row = self.rows.get(row_number.checked_sub(1)?)?;
        Some(cell(row, column))
    }

    /// Takes the first `size` rows of the table.
    ///
    /// If `size` is greater than the number of rows, returns all rows.
    pub fn sample(&self, size: usize) -> Table {
        Table {
            header: self.header.clone(),
            rows: self.rows.iter().take(size).cloned().collect(),
        }
    }
}

/// Returns the raw cell at `column`, or `""` if the row is too short.
pub fn cell(row: &Row, column: usize) -> &str {
    row.get(column).map(String::as_str).unwrap_or("")
}

impl TableSource for Table {
    fn header(&mut self) -> Result<Vec<String>> {
        Ok(self.header.clone())
    }

    fn rows(&mut self) -> Box<dyn Iterator<Item = Result<Row>> + '_> {
        Box::new(self.rows.iter().cloned().map(Ok))
    }
}
