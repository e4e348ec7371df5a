//! Arrow record batch table source.
//!
//! Columnar engines and query results hand over typed Arrow arrays; the
//! validation engine works on raw strings. Each supported cell is rendered to
//! its plain text form and nulls become empty strings.

use crate::{Result, SourceError};
use arrow_array::array::*;
use arrow_array::RecordBatch;
use arrow_schema::DataType;
use fieldcheck_core::{ConfigurationError, Row, TableSource};
use tracing::warn;

/// Serves the rows of one or more record batches sharing a schema.
///
/// The header is the first batch's column names. A later batch with
/// different column names fails when its rows are read.
pub struct RecordBatchSource {
    batches: Vec<RecordBatch>,
}

impl RecordBatchSource {
    /// Creates a source over batches.
    ///
    /// Columns of a type that cannot be rendered are logged here and read as
    /// empty strings.
    pub fn new(batches: Vec<RecordBatch>) -> Self {
        for batch in &batches {
            for field in batch.schema().fields() {
                if !is_supported(field.data_type()) {
                    warn!(
                        column = %field.name(),
                        data_type = ?field.data_type(),
                        "unsupported Arrow type, values read as empty"
                    );
                }
            }
        }
        Self { batches }
    }

    /// Creates a source over a single batch.
    pub fn from_batch(batch: RecordBatch) -> Self {
        Self::new(vec![batch])
    }

    fn column_names(&self) -> Vec<String> {
        self.batches
            .first()
            .map(batch_column_names)
            .unwrap_or_default()
    }
}

impl TableSource for RecordBatchSource {
    fn header(&mut self) -> fieldcheck_core::Result<Vec<String>> {
        Ok(self.column_names())
    }

    fn rows(&mut self) -> Box<dyn Iterator<Item = fieldcheck_core::Result<Row>> + '_> {
        let expected = self.column_names();

        Box::new(
            self.batches
                .iter()
                .enumerate()
                .flat_map(move |(index, batch)| {
                    let found = batch_column_names(batch);
                    let mismatch = (found != expected).then(|| {
                        SourceError::BatchSchemaMismatch {
                            index,
                            expected: expected.join(", "),
                            found: found.join(", "),
                        }
                        .to_string()
                    });

                    (0..batch.num_rows()).map(move |row| -> fieldcheck_core::Result<Row> {
                        match &mismatch {
                            Some(message) => Err(ConfigurationError::UnreadableTable(message.clone())),
                            None => Ok(render_row(batch, row)?),
                        }
                    })
                }),
        )
    }
}

fn batch_column_names(batch: &RecordBatch) -> Vec<String> {
    batch
        .schema()
        .fields()
        .iter()
        .map(|field| field.name().clone())
        .collect()
}

fn render_row(batch: &RecordBatch, row: usize) -> Result<Row> {
    let schema = batch.schema();
    batch
        .columns()
        .iter()
        .zip(schema.fields().iter())
        .map(|(column, field)| render_value(column, field.name(), row))
        .collect()
}

fn is_supported(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Boolean
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
            | DataType::Decimal128(_, _)
            | DataType::Utf8
            | DataType::LargeUtf8
            | DataType::Date32
    )
}

fn downcast<'a, T: 'static>(array: &'a ArrayRef, column: &str) -> Result<&'a T> {
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| SourceError::ColumnDowncast(column.to_string()))
}

/// Renders one Arrow cell as text.
fn render_value(array: &ArrayRef, column: &str, row: usize) -> Result<String> {
    if array.is_null(row) {
        return Ok(String::new());
    }

    let text = match array.data_type() {
        DataType::Boolean => downcast::<BooleanArray>(array, column)?.value(row).to_string(),
        DataType::Int8 => downcast::<Int8Array>(array, column)?.value(row).to_string(),
        DataType::Int16 => downcast::<Int16Array>(array, column)?.value(row).to_string(),
        DataType::Int32 => downcast::<Int32Array>(array, column)?.value(row).to_string(),
        DataType::Int64 => downcast::<Int64Array>(array, column)?.value(row).to_string(),
        DataType::UInt8 => downcast::<UInt8Array>(array, column)?.value(row).to_string(),
        DataType::UInt16 => downcast::<UInt16Array>(array, column)?.value(row).to_string(),
        DataType::UInt32 => downcast::<UInt32Array>(array, column)?.value(row).to_string(),
        DataType::UInt64 => downcast::<UInt64Array>(array, column)?.value(row).to_string(),
        DataType::Float32 => {
            render_float(f64::from(downcast::<Float32Array>(array, column)?.value(row)))
        }
        DataType::Float64 => render_float(downcast::<Float64Array>(array, column)?.value(row)),
        DataType::Decimal128(_, _) => {
            downcast::<Decimal128Array>(array, column)?.value_as_string(row)
        }
        DataType::Utf8 => downcast::<StringArray>(array, column)?.value(row).to_string(),
        DataType::LargeUtf8 => downcast::<LargeStringArray>(array, column)?
            .value(row)
            .to_string(),
        DataType::Date32 => downcast::<Date32Array>(array, column)?
            .value_as_date(row)
            .map(|date| date.to_string())
            .unwrap_or_default(),
        _ => String::new(),
    };

    Ok(text)
}

/// Renders a float so whole numbers keep a fractional part (`100.0`).
fn render_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}
