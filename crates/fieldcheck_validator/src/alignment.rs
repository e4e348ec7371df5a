//! Column alignment.
//!
//! Matches a table header against the schema's declared columns. Every declared
//! column must be present and the header must start with exactly the declared
//! columns in order; additional trailing columns are tolerated and reported
//! as extras.

use fieldcheck_core::{ColumnAlignment, RuleKind, Violation};
use std::collections::HashSet;

/// Compares actual headers with declared columns.
pub struct ColumnAligner;

impl ColumnAligner {
    /// Creates a new column aligner.
    pub fn new() -> Self {
        Self
    }

    /// Aligns `header` against `declared`.
    pub fn align(&self, declared: &[String], header: &[String]) -> ColumnAlignment {
        let actual: HashSet<&str> = header.iter().map(String::as_str).collect();
        let expected: HashSet<&str> = declared.iter().map(String::as_str).collect();

        let missing: Vec<String> = declared
            .iter()
            .filter(|c| !actual.contains(c.as_str()))
            .cloned()
            .collect();

        let mut seen = HashSet::new();
        let extra: Vec<String> = header
            .iter()
            .filter(|c| !expected.contains(c.as_str()) && seen.insert(c.as_str()))
            .cloned()
            .collect();

        let order_ok = header.len() >= declared.len()
            && header.iter().zip(declared).all(|(actual, declared)| actual == declared);

        ColumnAlignment {
            is_valid: missing.is_empty() && order_ok,
            missing,
            extra,
            order_ok,
        }
    }

    /// Builds the single violation describing a failed alignment.
    ///
    /// Returns `None` when the alignment is valid.
    pub fn violation(
        &self,
        alignment: &ColumnAlignment,
        declared: &[String],
        header: &[String],
    ) -> Option<Violation> {
        if alignment.is_valid {
            return None;
        }

        let mut problems = Vec::new();
        if !alignment.missing.is_empty() {
            problems.push(format!("missing columns: {}", alignment.missing.join(", ")));
        }
        if !alignment.order_ok {
            problems.push(format!(
                "header does not start with the declared columns in order (expected [{}], found [{}])",
                declared.join(", "),
                header.join(", ")
            ));
        }

        Some(Violation::table(RuleKind::SchemaMismatch, problems.join("; ")))
    }
}

impl Default for ColumnAligner {
    fn default() -> Self {
        Self::new()
    }
}
