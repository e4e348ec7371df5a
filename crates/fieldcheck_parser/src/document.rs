//! Raw schema document shape and its conversion into the schema model.

use crate::{ParserError, Result};
use fieldcheck_core::{FieldKind, FieldSpec, NumericRange, Schema, YearWindow};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use tracing::warn;

/// Schema document as written on disk.
#[derive(Debug, Deserialize)]
pub(crate) struct SchemaDocument {
    #[serde(deserialize_with = "ordered_fields")]
    fields: Vec<(String, ConstraintDocument)>,

    columns: Vec<String>,

    #[serde(default)]
    duplicate_field_check: bool,
}

/// Constraint object for one field.
#[derive(Debug, Default, Deserialize)]
struct ConstraintDocument {
    #[serde(rename = "type")]
    field_type: Option<String>,
    size: Option<usize>,
    size_before_decimal: Option<i64>,
    size_after_decimal: Option<i64>,
    #[serde(default)]
    required: bool,
    range: Option<Vec<f64>>,
    allowed_values: Option<Vec<String>>,
    #[serde(default)]
    unique: bool,
    #[serde(default)]
    zero_check: bool,
    #[serde(default)]
    year_check: bool,
    min_year: Option<i32>,
    max_year: Option<i32>,
}

/// Reads the `fields` mapping in document order.
///
/// A repeated key replaces the earlier entry but keeps its position.
fn ordered_fields<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<(String, ConstraintDocument)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct FieldsVisitor;

    impl<'de> Visitor<'de> for FieldsVisitor {
        type Value = Vec<(String, ConstraintDocument)>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a mapping of field name to constraint object")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut fields: Vec<(String, ConstraintDocument)> =
                Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, constraints)) = map.next_entry::<String, ConstraintDocument>()? {
                match fields.iter_mut().find(|(existing, _)| *existing == name) {
                    Some(entry) => entry.1 = constraints,
                    None => fields.push((name, constraints)),
                }
            }
            Ok(fields)
        }
    }

    deserializer.deserialize_map(FieldsVisitor)
}

impl SchemaDocument {
    /// Converts the document into a [`Schema`], applying load-time rules.
    pub(crate) fn into_schema(self) -> Result<Schema> {
        let fields = self
            .fields
            .into_iter()
            .map(|(name, constraints)| constraints.into_field_spec(name))
            .collect::<Result<Vec<_>>>()?;

        Ok(Schema {
            fields,
            columns: self.columns,
            duplicate_field_check: self.duplicate_field_check,
        })
    }
}

impl ConstraintDocument {
    fn into_field_spec(self, name: String) -> Result<FieldSpec> {
        let range = self
            .range
            .as_deref()
            .map(|bounds| parse_range(&name, bounds))
            .transpose()?;
        let size_before_decimal = digit_width(&name, "size_before_decimal", self.size_before_decimal)?;
        let size_after_decimal = digit_width(&name, "size_after_decimal", self.size_after_decimal)?;
        let window = if self.year_check {
            Some(year_window(&name, self.min_year, self.max_year)?)
        } else {
            None
        };

        let declared = self.field_type.as_deref().map(normalize_type);
        let kind = match declared.as_deref() {
            Some("alpha_numeric") => FieldKind::AlphaNumeric,
            Some("numeric") => FieldKind::Numeric { range },
            Some("decimal") => FieldKind::Decimal {
                size_before_decimal,
                size_after_decimal,
                range,
            },
            Some("year") => FieldKind::Year { window },
            Some("month_year") => FieldKind::MonthYear { window },
            _ => FieldKind::Other {
                declared: self.field_type.clone(),
            },
        };

        warn_ignored_options(&name, &kind, &self);

        Ok(FieldSpec {
            name,
            kind,
            size: self.size,
            required: self.required,
            allowed_values: self.allowed_values,
            unique: self.unique,
            zero_check: self.zero_check,
        })
    }
}

fn parse_range(field: &str, bounds: &[f64]) -> Result<NumericRange> {
    match bounds {
        [min, max] => NumericRange::new(*min, *max)
            .map_err(|e| ParserError::InvalidSchema(format!("field '{}': {}", field, e))),
        _ => Err(ParserError::InvalidSchema(format!(
            "field '{}': range must have exactly two bounds, got {}",
            field,
            bounds.len()
        ))),
    }
}

fn digit_width(field: &str, option: &str, width: Option<i64>) -> Result<Option<u32>> {
    match width {
        None => Ok(None),
        Some(w) if w < 0 => Err(ParserError::InvalidSchema(format!(
            "field '{}': {} must not be negative, got {}",
            field, option, w
        ))),
        Some(w) => u32::try_from(w).map(Some).map_err(|_| {
            ParserError::InvalidSchema(format!("field '{}': {} is too large", field, option))
        }),
    }
}

fn year_window(field: &str, min_year: Option<i32>, max_year: Option<i32>) -> Result<YearWindow> {
    let defaults = YearWindow::default();
    YearWindow::new(
        min_year.unwrap_or(defaults.min_year()),
        max_year.unwrap_or(defaults.max_year()),
    )
    .map_err(|e| ParserError::InvalidSchema(format!("field '{}': {}", field, e)))
}

/// Logs options the declared type does not use. They are dropped, never fatal.
fn warn_ignored_options(field: &str, kind: &FieldKind, doc: &ConstraintDocument) {
    let is_number = matches!(kind, FieldKind::Numeric { .. } | FieldKind::Decimal { .. });
    let is_decimal = matches!(kind, FieldKind::Decimal { .. });
    let is_date = matches!(kind, FieldKind::Year { .. } | FieldKind::MonthYear { .. });

    if doc.range.is_some() && !is_number {
        warn!(field, field_type = kind.type_name(), "ignoring 'range' on non-numeric field");
    }
    if (doc.size_before_decimal.is_some() || doc.size_after_decimal.is_some()) && !is_decimal {
        warn!(field, field_type = kind.type_name(), "ignoring digit widths on non-decimal field");
    }
    if doc.year_check && !is_date {
        warn!(field, field_type = kind.type_name(), "ignoring 'year_check' on non-date field");
    }
    if (doc.min_year.is_some() || doc.max_year.is_some()) && !doc.year_check {
        warn!(field, "ignoring year window because 'year_check' is not enabled");
    }
    if let FieldKind::Other { declared: Some(t) } = kind {
        warn!(field, field_type = %t, "unknown field type, no type checks will apply");
    }
}

/// Normalizes a type string for comparison.
fn normalize_type(type_str: &str) -> String {
    type_str.trim().to_lowercase()
}
