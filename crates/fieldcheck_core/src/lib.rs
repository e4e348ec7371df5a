//! # fieldcheck core
//!
//! Core data structures for the fieldcheck tabular validation engine.
//!
//! This crate holds the schema model a table is validated against, the report
//! model a run produces, and the [`TableSource`] capability rows are read
//! through.
//!
//! ## Key Concepts
//!
//! - **Schema**: declared column order plus per-field constraints
//! - **FieldSpec**: constraints for one column; its [`FieldKind`] decides which type checks apply
//! - **Violation**: one rule breach tied to a row and usually a field
//! - **ValidationReport**: every violation of a run with per-rule counts
//!
//! ## Example
//!
//! ```rust
//! use fieldcheck_core::{FieldKind, FieldSpecBuilder, NumericRange, SchemaBuilder};
//!
//! let schema = SchemaBuilder::new()
//!     .columns(["FIELD1", "FIELD_DEC1"])
//!     .duplicate_field_check(true)
//!     .field(
//!         FieldSpecBuilder::new("FIELD1", FieldKind::AlphaNumeric)
//!             .size(500)
//!             .required(true)
//!             .unique(true)
//!             .build(),
//!     )
//!     .field(
//!         FieldSpecBuilder::new(
//!             "FIELD_DEC1",
//!             FieldKind::Decimal {
//!                 size_before_decimal: None,
//!                 size_after_decimal: None,
//!                 range: Some(NumericRange::new(0.0, 1000.0).unwrap()),
//!             },
//!         )
//!         .build(),
//!     )
//!     .build();
//!
//! assert_eq!(schema.unique_fields().count(), 1);
//! ```

pub mod builder;
pub mod error;
pub mod report;
pub mod schema;
pub mod validator;

pub use builder::*;
pub use error::*;
pub use report::*;
pub use schema::*;
pub use validator::*;
