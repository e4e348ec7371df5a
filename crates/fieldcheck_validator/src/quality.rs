//! Duplicate detection across rows.
//!
//! Both checks group rows by a structural key held in a `HashSet`, so key
//! identity is value equality. Only repeats are flagged; the first row with a
//! given key never is.

use crate::check::{CheckOutcome, TableCheck};
use crate::{Table, cell};
use fieldcheck_core::{RuleKind, Schema, Violation};
use std::collections::HashSet;
use tracing::debug;

/// Separator used when rendering a composite key into a violation value.
const KEY_SEPARATOR: &str = "|";

/// Flags rows whose every cell equals an earlier row's.
///
/// Runs only when the schema enables `duplicate_field_check`. Cells are
/// compared raw, with short rows padded to the header width.
pub struct DuplicateRowCheck;

impl DuplicateRowCheck {
    /// Creates a new duplicate row check.
    pub fn new() -> Self {
        Self
    }
}

impl Default for DuplicateRowCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl TableCheck for DuplicateRowCheck {
    fn name(&self) -> &'static str {
        "duplicate_rows"
    }

    fn check(&self, schema: &Schema, table: &Table) -> CheckOutcome {
        let mut outcome = CheckOutcome::default();
        if !schema.duplicate_field_check {
            return outcome;
        }

        let width = table
            .rows()
            .map(Vec::len)
            .chain(std::iter::once(table.header().len()))
            .max()
            .unwrap_or(0);
        let mut seen: HashSet<Vec<&str>> = HashSet::with_capacity(table.len());

        for (row_number, row) in table.numbered_rows() {
            outcome.evaluations += 1;
            let key: Vec<&str> = (0..width).map(|column| cell(row, column)).collect();
            if !seen.insert(key) {
                outcome.violations.push(Violation::row(
                    row_number,
                    RuleKind::DuplicateRow,
                    format!("Row {} is a duplicate.", row_number),
                ));
            }
        }

        outcome
    }
}

/// Flags rows repeating an earlier row's combination of unique fields.
///
/// The key is the trimmed values of every `unique` field in schema
/// declaration order. Unique fields without a matching column are left out of
/// the key. With no keyed fields the check reports nothing.
pub struct UniqueCombinationCheck;

impl UniqueCombinationCheck {
    /// Creates a new unique combination check.
    pub fn new() -> Self {
        Self
    }
}

impl Default for UniqueCombinationCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl TableCheck for UniqueCombinationCheck {
    fn name(&self) -> &'static str {
        "unique_combinations"
    }

    fn check(&self, schema: &Schema, table: &Table) -> CheckOutcome {
        let mut outcome = CheckOutcome::default();

        let fields: Vec<(&str, usize)> = schema
            .unique_fields()
            .filter_map(|spec| match table.column_index(&spec.name) {
                Some(column) => Some((spec.name.as_str(), column)),
                None => {
                    debug!(field = %spec.name, "unique field has no column, left out of key");
                    None
                }
            })
            .collect();
        if fields.is_empty() {
            return outcome;
        }

        let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
        let mut seen: HashSet<Vec<&str>> = HashSet::with_capacity(table.len());

        for (row_number, row) in table.numbered_rows() {
            outcome.evaluations += 1;
            let key: Vec<&str> = fields
                .iter()
                .map(|&(_, column)| cell(row, column).trim())
                .collect();

            if seen.contains(&key) {
                let rendered = key.join(KEY_SEPARATOR);
                outcome.violations.push(
                    Violation::row(
                        row_number,
                        RuleKind::DuplicateUniqueCombination,
                        format!(
                            "duplicate combination of unique fields ({})",
                            names.join(", ")
                        ),
                    )
                    .with_value(rendered),
                );
            } else {
                seen.insert(key);
            }
        }

        outcome
    }
}
