//! Main validation engine.
//!
//! This module provides the [`DataValidator`] that aligns columns, runs every
//! field and table check over a row set, and merges the results into one
//! [`ValidationReport`].

use crate::check::{CheckOutcome, TableCheck};
use crate::{ColumnAligner, DuplicateRowCheck, FieldValidator, Table, UniqueCombinationCheck};
use fieldcheck_core::{
    FieldKind, Result, Schema, TableSource, ValidationContext, ValidationReport, ValidationStats,
};
use std::borrow::Cow;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Main validation engine for schemas.
///
/// Holds no state between runs; every call builds a fresh report.
///
/// # Example
///
/// ```rust
/// use fieldcheck_core::{FieldKind, FieldSpecBuilder, SchemaBuilder, ValidationContext};
/// use fieldcheck_validator::{DataValidator, Table};
///
/// let schema = SchemaBuilder::new()
///     .columns(["ID"])
///     .field(FieldSpecBuilder::new("ID", FieldKind::AlphaNumeric).required(true).build())
///     .build();
/// let table = Table::from_strs(&["ID"], &[&["A1"], &[""]]);
///
/// let report = DataValidator::new().validate(&schema, &table, &ValidationContext::new());
///
/// assert!(!report.passed);
/// for violation in &report.violations {
///     println!("{}", violation);
/// }
/// ```
pub struct DataValidator {
    aligner: ColumnAligner,
    checks: Vec<Box<dyn TableCheck>>,
}

impl DataValidator {
    /// Creates a validator with the standard checks.
    ///
    /// Outcomes are merged in this order: full-row duplicates, unique
    /// combinations, then field rules.
    pub fn new() -> Self {
        Self {
            aligner: ColumnAligner::new(),
            checks: vec![
                Box::new(DuplicateRowCheck::new()),
                Box::new(UniqueCombinationCheck::new()),
                Box::new(FieldValidator::new()),
            ],
        }
    }

    /// Creates a validator running only the given checks, in order.
    pub fn with_checks(checks: Vec<Box<dyn TableCheck>>) -> Self {
        Self {
            aligner: ColumnAligner::new(),
            checks,
        }
    }

    /// Validates a table against a schema.
    ///
    /// Column alignment runs first. When it fails and the context gates on it,
    /// the report holds exactly one `schema_mismatch` violation and no other
    /// check runs.
    pub fn validate(
        &self,
        schema: &Schema,
        table: &Table,
        context: &ValidationContext,
    ) -> ValidationReport {
        let start = Instant::now();
        let mut report = ValidationReport::success();

        let table = match context.sample_size {
            Some(size) => Cow::Owned(table.sample(size)),
            None => Cow::Borrowed(table),
        };

        let alignment = self.aligner.align(&schema.columns, table.header());
        if !alignment.extra.is_empty() {
            report.add_warning(format!(
                "extra columns not declared in schema: {}",
                alignment.extra.join(", ")
            ));
        }
        let mismatch = self
            .aligner
            .violation(&alignment, &schema.columns, table.header());
        report.alignment = Some(alignment);

        if let Some(violation) = mismatch {
            warn!(detail = %violation.message, "column alignment failed");
            report.add_violation(violation);
            if context.alignment_gate {
                self.log_summary(&report, start);
                return report;
            }
        }

        let outcomes = if context.parallel {
            self.run_parallel(schema, &table)
        } else {
            self.checks
                .iter()
                .map(|check| check.check(schema, &table))
                .collect()
        };

        let mut rules_evaluated = 0;
        for (check, outcome) in self.checks.iter().zip(outcomes) {
            debug!(
                check = check.name(),
                violations = outcome.violations.len(),
                evaluations = outcome.evaluations,
                "check finished"
            );
            rules_evaluated += outcome.evaluations;
            report.extend_violations(outcome.violations);
        }

        report.stats = ValidationStats {
            rows_validated: table.len(),
            fields_checked: schema
                .fields
                .iter()
                .filter(|spec| table.column_index(&spec.name).is_some())
                .count(),
            rules_evaluated,
        };

        self.log_summary(&report, start);
        report
    }

    /// Reads a whole source, then validates it.
    ///
    /// A source that cannot be read fails before any row is validated.
    pub fn validate_source(
        &self,
        schema: &Schema,
        source: &mut dyn TableSource,
        context: &ValidationContext,
    ) -> Result<ValidationReport> {
        let table = Table::from_source(source)?;
        Ok(self.validate(schema, &table, context))
    }

    /// Reviews a schema without data.
    ///
    /// Returns advisory notes about declarations that will never be checked or
    /// checks that are switched off. An empty list means nothing stood out.
    pub fn review_schema(&self, schema: &Schema) -> Vec<String> {
        let mut notes = Vec::new();
        let declared: HashSet<&str> = schema.columns.iter().map(String::as_str).collect();
        let specified: HashSet<&str> = schema.fields.iter().map(|f| f.name.as_str()).collect();

        for spec in &schema.fields {
            if !declared.contains(spec.name.as_str()) {
                notes.push(format!(
                    "field '{}' is not listed in columns; it is checked only if the table has that column",
                    spec.name
                ));
            }
            match &spec.kind {
                FieldKind::Year { window: None } | FieldKind::MonthYear { window: None } => {
                    notes.push(format!(
                        "field '{}' is of type {} without year_check; its shape is not checked",
                        spec.name,
                        spec.kind.type_name()
                    ));
                }
                FieldKind::Other { declared: Some(name) } => {
                    notes.push(format!(
                        "field '{}' has unknown type '{}'; no type check applies",
                        spec.name, name
                    ));
                }
                _ => {}
            }
        }

        let mut seen = HashSet::new();
        for column in &schema.columns {
            if !seen.insert(column.as_str()) {
                notes.push(format!("column '{}' is declared more than once", column));
            } else if !specified.contains(column.as_str()) {
                notes.push(format!("column '{}' has no field constraints", column));
            }
        }

        notes
    }

    fn run_parallel(&self, schema: &Schema, table: &Table) -> Vec<CheckOutcome> {
        std::thread::scope(|scope| {
            let handles: Vec<_> = self
                .checks
                .iter()
                .map(|check| scope.spawn(move || check.check(schema, table)))
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect()
        })
    }

    fn log_summary(&self, report: &ValidationReport, start: Instant) {
        info!(
            passed = report.passed,
            violations = report.violations.len(),
            warnings = report.warnings.len(),
            rows = report.stats.rows_validated,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "validation finished"
        );
    }
}

impl Default for DataValidator {
    fn default() -> Self {
        Self::new()
    }
}
