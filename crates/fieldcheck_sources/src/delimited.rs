//! Delimited text (CSV) table source.

use crate::{Result, SourceError};
use csv::{Reader, ReaderBuilder};
use fieldcheck_core::{Row, TableSource};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Parsing options for delimited text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter byte
    pub delimiter: u8,

    /// Quote byte
    pub quote: u8,
}

impl CsvOptions {
    /// Comma-delimited, double-quoted.
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
        }
    }

    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the quote character.
    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    fn builder(&self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .quote(self.quote)
            .has_headers(true)
            .flexible(true);
        builder
    }
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads a header line and data rows from delimited text.
///
/// The first record is the header. Rows may be shorter or longer than the
/// header; values are passed through untrimmed. Blank lines are skipped and
/// never count as rows. Rows are decoded lazily as the engine pulls them.
pub struct CsvSource<R: Read> {
    reader: Reader<R>,
}

impl CsvSource<File> {
    /// Opens a CSV file.
    pub fn from_path(path: impl AsRef<Path>, options: CsvOptions) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening CSV table");
        let reader = options.builder().from_path(path)?;
        Ok(Self { reader })
    }
}

impl<'a> CsvSource<&'a [u8]> {
    /// Reads CSV held in a string.
    pub fn from_text(text: &'a str, options: CsvOptions) -> Self {
        Self::from_reader(text.as_bytes(), options)
    }
}

impl<R: Read> CsvSource<R> {
    /// Reads CSV from any reader.
    pub fn from_reader(reader: R, options: CsvOptions) -> Self {
        Self {
            reader: options.builder().from_reader(reader),
        }
    }
}

impl<R: Read> TableSource for CsvSource<R> {
    fn header(&mut self) -> fieldcheck_core::Result<Vec<String>> {
        let header = self.reader.headers().map_err(SourceError::from)?;
        Ok(header.iter().map(String::from).collect())
    }

    fn rows(&mut self) -> Box<dyn Iterator<Item = fieldcheck_core::Result<Row>> + '_> {
        Box::new(self.reader.records().map(|record| -> fieldcheck_core::Result<Row> {
            record
                .map(|record| record.iter().map(String::from).collect())
                .map_err(|err| SourceError::from(err).into())
        }))
    }
}
