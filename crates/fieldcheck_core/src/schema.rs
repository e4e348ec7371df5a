//! Schema model types.
//!
//! A [`Schema`] lists the columns a table must start with and the constraints
//! that apply to each named field. The model carries no behavior beyond
//! construction and lookup; the validator crate interprets it.

use crate::{ConfigurationError, Result};
use serde::Serialize;

/// Default lower bound for year-shaped values.
pub const DEFAULT_MIN_YEAR: i32 = 1900;

/// Default upper bound for year-shaped values.
pub const DEFAULT_MAX_YEAR: i32 = 2100;

/// Schema describing the expected shape and constraints of a table.
///
/// # Example
///
/// ```rust
/// use fieldcheck_core::{FieldKind, FieldSpecBuilder, SchemaBuilder};
///
/// let schema = SchemaBuilder::new()
///     .columns(["ID", "AMOUNT"])
///     .field(FieldSpecBuilder::new("ID", FieldKind::AlphaNumeric).required(true).build())
///     .build();
///
/// assert!(schema.field("ID").is_some());
/// assert!(schema.field("AMOUNT").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    /// Field constraints in declaration order
    pub fields: Vec<FieldSpec>,

    /// Expected column names, in required left-to-right order
    pub columns: Vec<String>,

    /// Whether exact duplicate rows are reported
    pub duplicate_field_check: bool,
}

impl Schema {
    /// Looks up the spec for a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the fields marked `unique`, in declaration order.
    pub fn unique_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.unique)
    }
}

/// Constraints for one named column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    /// Field name, matching a table column
    pub name: String,

    /// Value type together with the options that only make sense for it
    pub kind: FieldKind,

    /// Maximum character length of the trimmed value
    pub size: Option<usize>,

    /// Whether an empty value is a violation
    pub required: bool,

    /// Permitted literal values
    pub allowed_values: Option<Vec<String>>,

    /// Whether the field participates in the composite uniqueness key
    pub unique: bool,

    /// Whether a zero value is a violation
    pub zero_check: bool,
}

/// Value type of a field.
///
/// Each variant owns only the options relevant to it, so a digit-width limit
/// can never be attached to an alphanumeric field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// ASCII letters and digits only
    AlphaNumeric,

    /// Unsigned integer digits
    Numeric {
        /// Inclusive numeric bounds
        range: Option<NumericRange>,
    },

    /// Digits, a decimal point, and a fractional part
    Decimal {
        /// Maximum digits before the decimal point
        size_before_decimal: Option<u32>,
        /// Maximum digits after the decimal point
        size_after_decimal: Option<u32>,
        /// Inclusive numeric bounds
        range: Option<NumericRange>,
    },

    /// Four-digit year
    Year {
        /// Accepted years; `None` disables the year check
        window: Option<YearWindow>,
    },

    /// Three-digit month code and year (`001.2024`, `012/2024`) or a bare year
    MonthYear {
        /// Accepted years; `None` disables the year check
        window: Option<YearWindow>,
    },

    /// Unknown or absent type; no type-specific checks apply
    Other {
        /// Type string as written in the schema, if any
        declared: Option<String>,
    },
}

impl FieldKind {
    /// Returns the schema spelling of this type.
    pub fn type_name(&self) -> &str {
        match self {
            FieldKind::AlphaNumeric => "alpha_numeric",
            FieldKind::Numeric { .. } => "numeric",
            FieldKind::Decimal { .. } => "decimal",
            FieldKind::Year { .. } => "year",
            FieldKind::MonthYear { .. } => "month_year",
            FieldKind::Other { declared } => declared.as_deref().unwrap_or("unspecified"),
        }
    }

    /// Returns the configured numeric range, if the type supports one.
    pub fn range(&self) -> Option<&NumericRange> {
        match self {
            FieldKind::Numeric { range } | FieldKind::Decimal { range, .. } => range.as_ref(),
            _ => None,
        }
    }
}

/// Inclusive `[min, max]` bounds for numeric values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericRange {
    min: f64,
    max: f64,
}

impl NumericRange {
    /// Creates a range, rejecting non-finite or inverted bounds.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ConfigurationError::invalid_schema(format!(
                "range bounds must be finite numbers, got [{}, {}]",
                min, max
            )));
        }
        if min > max {
            return Err(ConfigurationError::invalid_schema(format!(
                "range minimum {} is greater than maximum {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Returns true if `value` lies within the bounds.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Inclusive window of accepted years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearWindow {
    min_year: i32,
    max_year: i32,
}

impl YearWindow {
    /// Creates a window, rejecting `min_year > max_year`.
    pub fn new(min_year: i32, max_year: i32) -> Result<Self> {
        if min_year > max_year {
            return Err(ConfigurationError::invalid_schema(format!(
                "min_year {} is greater than max_year {}",
                min_year, max_year
            )));
        }
        Ok(Self { min_year, max_year })
    }

    /// Earliest accepted year.
    pub fn min_year(&self) -> i32 {
        self.min_year
    }

    /// Latest accepted year.
    pub fn max_year(&self) -> i32 {
        self.max_year
    }

    /// Returns true if `year` lies within the window.
    pub fn contains(&self, year: i32) -> bool {
        (self.min_year..=self.max_year).contains(&year)
    }
}

impl Default for YearWindow {
    fn default() -> Self {
        Self {
            min_year: DEFAULT_MIN_YEAR,
            max_year: DEFAULT_MAX_YEAR,
        }
    }
}
