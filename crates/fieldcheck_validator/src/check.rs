//! The interface every field and table check implements.

use crate::Table;
use fieldcheck_core::{Schema, Violation};

/// Result of running one check over a table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckOutcome {
    /// Violations found, in row order
    pub violations: Vec<Violation>,

    /// Number of rule evaluations performed
    pub evaluations: usize,
}

/// A read-only check over a schema and its full row set.
///
/// Checks never mutate their inputs and share no state, so independent checks
/// may run concurrently; the engine merges their outcomes in a fixed order.
pub trait TableCheck: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Runs the check.
    fn check(&self, schema: &Schema, table: &Table) -> CheckOutcome;
}
