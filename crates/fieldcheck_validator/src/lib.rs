//! # fieldcheck validator
//!
//! Validation engine for fieldcheck schemas. This crate checks tabular rows
//! against a [`Schema`](fieldcheck_core::Schema), including:
//!
//! - Column alignment (presence and left-to-right order of declared columns)
//! - Field rules (required, size, type pattern, decimal width, range, zero, allowed values)
//! - Year and month-year shapes
//! - Full-row and unique-combination duplicates
//!
//! Every violation is collected; nothing short-circuits except a failed
//! column alignment.
//!
//! ## Example
//!
//! ```rust
//! use fieldcheck_core::{FieldKind, FieldSpecBuilder, RuleKind, SchemaBuilder, ValidationContext};
//! use fieldcheck_validator::{DataValidator, Table};
//!
//! let schema = SchemaBuilder::new()
//!     .columns(["CODE", "AMOUNT"])
//!     .duplicate_field_check(true)
//!     .field(FieldSpecBuilder::new("CODE", FieldKind::AlphaNumeric).size(6).build())
//!     .field(FieldSpecBuilder::new("AMOUNT", FieldKind::Numeric { range: None }).build())
//!     .build();
//! let table = Table::from_strs(
//!     &["CODE", "AMOUNT"],
//!     &[&["ABC123", "10"], &["ABC123", "10"], &["TOOLONG1", "x"]],
//! );
//!
//! let report = DataValidator::new().validate(&schema, &table, &ValidationContext::new());
//!
//! assert!(!report.passed);
//! assert_eq!(report.count(RuleKind::DuplicateRow), 1);
//! assert_eq!(report.count(RuleKind::SizeExceeded), 1);
//! assert_eq!(report.count(RuleKind::InvalidPattern), 1);
//! ```

mod alignment;
mod check;
mod constraints;
mod dates;
mod engine;
mod patterns;
mod quality;
mod table;

pub use alignment::*;
pub use check::*;
pub use constraints::*;
pub use engine::*;
pub use quality::*;
pub use table::*;
