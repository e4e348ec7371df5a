//! Report model.
//!
//! A [`ValidationReport`] is built fresh for every run and handed to the
//! caller once complete. It holds every [`Violation`] found, advisory warnings,
//! the column alignment outcome, and summary counters.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Kind of rule a violation breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    SchemaMismatch,
    RequiredMissing,
    SizeExceeded,
    InvalidPattern,
    DecimalWidthExceeded,
    InvalidNumeric,
    InvalidDecimal,
    OutOfRange,
    ZeroValueDisallowed,
    NotAllowedValue,
    InvalidYearFormat,
    YearOutOfRange,
    InvalidMonthYearFormat,
    InvalidMonth,
    DuplicateRow,
    DuplicateUniqueCombination,
}

impl RuleKind {
    /// Returns the snake_case name used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::SchemaMismatch => "schema_mismatch",
            RuleKind::RequiredMissing => "required_missing",
            RuleKind::SizeExceeded => "size_exceeded",
            RuleKind::InvalidPattern => "invalid_pattern",
            RuleKind::DecimalWidthExceeded => "decimal_width_exceeded",
            RuleKind::InvalidNumeric => "invalid_numeric",
            RuleKind::InvalidDecimal => "invalid_decimal",
            RuleKind::OutOfRange => "out_of_range",
            RuleKind::ZeroValueDisallowed => "zero_value_disallowed",
            RuleKind::NotAllowedValue => "not_allowed_value",
            RuleKind::InvalidYearFormat => "invalid_year_format",
            RuleKind::YearOutOfRange => "year_out_of_range",
            RuleKind::InvalidMonthYearFormat => "invalid_month_year_format",
            RuleKind::InvalidMonth => "invalid_month",
            RuleKind::DuplicateRow => "duplicate_row",
            RuleKind::DuplicateUniqueCombination => "duplicate_unique_combination",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detected rule breach.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// 1-based data row number (header excluded); `None` for header-level problems
    pub row: Option<usize>,

    /// Field the violation concerns
    pub field: Option<String>,

    /// Offending value, or the composite key for uniqueness violations
    pub value: Option<String>,

    /// Rule that was broken
    pub rule: RuleKind,

    /// Human-readable description
    pub message: String,
}

impl Violation {
    /// Creates a violation for a field value in a row.
    pub fn field(
        row: usize,
        field: impl Into<String>,
        value: impl Into<String>,
        rule: RuleKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            row: Some(row),
            field: Some(field.into()),
            value: Some(value.into()),
            rule,
            message: message.into(),
        }
    }

    /// Creates a violation for a whole row.
    pub fn row(row: usize, rule: RuleKind, message: impl Into<String>) -> Self {
        Self {
            row: Some(row),
            field: None,
            value: None,
            rule,
            message: message.into(),
        }
    }

    /// Creates a table-level violation not tied to a row.
    pub fn table(rule: RuleKind, message: impl Into<String>) -> Self {
        Self {
            row: None,
            field: None,
            value: None,
            rule,
            message: message.into(),
        }
    }

    /// Attaches the offending value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(row) = self.row {
            write!(f, "Row {}: ", row)?;
        }
        write!(f, "[{}] ", self.rule)?;
        if let Some(field) = &self.field {
            write!(f, "'{}' ", field)?;
        }
        f.write_str(&self.message)
    }
}

/// Outcome of matching a table header against the declared columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnAlignment {
    /// Declared columns absent from the header, in declared order
    pub missing: Vec<String>,

    /// Header columns not declared, in header order
    pub extra: Vec<String>,

    /// Whether the header starts with exactly the declared columns
    pub order_ok: bool,

    /// `missing` is empty and `order_ok` holds
    pub is_valid: bool,
}

/// Report of validation results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Whether validation passed overall
    pub passed: bool,

    /// Every violation found, grouped by check in run order
    pub violations: Vec<Violation>,

    /// Advisory notes that do not affect `passed`
    pub warnings: Vec<String>,

    /// Column alignment outcome
    pub alignment: Option<ColumnAlignment>,

    /// Validation statistics
    pub stats: ValidationStats,
}

/// Statistics about validation execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationStats {
    /// Number of data rows validated
    pub rows_validated: usize,

    /// Number of schema fields matched to a column
    pub fields_checked: usize,

    /// Number of rule evaluations performed
    pub rules_evaluated: usize,
}

impl ValidationReport {
    /// Creates an empty, passing report.
    pub fn success() -> Self {
        Self {
            passed: true,
            violations: Vec::new(),
            warnings: Vec::new(),
            alignment: None,
            stats: ValidationStats::default(),
        }
    }

    /// Adds a violation to the report.
    pub fn add_violation(&mut self, violation: Violation) {
        self.violations.push(violation);
        self.passed = false;
    }

    /// Adds several violations to the report.
    pub fn extend_violations(&mut self, violations: impl IntoIterator<Item = Violation>) {
        self.violations.extend(violations);
        self.passed = self.violations.is_empty();
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Returns the number of violations per rule kind.
    pub fn counts(&self) -> BTreeMap<RuleKind, usize> {
        let mut counts = BTreeMap::new();
        for violation in &self.violations {
            *counts.entry(violation.rule).or_insert(0) += 1;
        }
        counts
    }

    /// Returns the number of violations of one kind.
    pub fn count(&self, rule: RuleKind) -> usize {
        self.violations.iter().filter(|v| v.rule == rule).count()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::success()
    }
}
