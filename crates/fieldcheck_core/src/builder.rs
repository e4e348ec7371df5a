//! Builder pattern for creating schemas.
//!
//! This module provides ergonomic builders for constructing schemas and
//! field specs with a fluent API.

use crate::{FieldKind, FieldSpec, Schema};

/// Builder for creating a `Schema`.
///
/// # Example
///
/// ```rust
/// use fieldcheck_core::{FieldKind, FieldSpecBuilder, SchemaBuilder};
///
/// let schema = SchemaBuilder::new()
///     .columns(["FIELD1", "FIELD2"])
///     .duplicate_field_check(true)
///     .field(FieldSpecBuilder::new("FIELD1", FieldKind::AlphaNumeric).size(500).build())
///     .build();
///
/// assert_eq!(schema.columns.len(), 2);
/// assert!(schema.duplicate_field_check);
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldSpec>,
    columns: Vec<String>,
    duplicate_field_check: bool,
}

impl SchemaBuilder {
    /// Creates an empty schema builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the expected column order.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a field spec.
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds multiple field specs.
    pub fn fields(mut self, fields: Vec<FieldSpec>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Enables or disables full-row duplicate detection.
    pub fn duplicate_field_check(mut self, enabled: bool) -> Self {
        self.duplicate_field_check = enabled;
        self
    }

    /// Builds the schema.
    pub fn build(self) -> Schema {
        Schema {
            fields: self.fields,
            columns: self.columns,
            duplicate_field_check: self.duplicate_field_check,
        }
    }
}

/// Builder for creating a `FieldSpec`.
///
/// # Example
///
/// ```rust
/// use fieldcheck_core::{FieldKind, FieldSpecBuilder};
///
/// let field = FieldSpecBuilder::new("STATUS", FieldKind::AlphaNumeric)
///     .required(true)
///     .allowed_values(["OPEN", "CLOSED"])
///     .build();
///
/// assert!(field.required);
/// assert_eq!(field.allowed_values.as_ref().map(Vec::len), Some(2));
/// ```
#[derive(Debug)]
pub struct FieldSpecBuilder {
    name: String,
    kind: FieldKind,
    size: Option<usize>,
    required: bool,
    allowed_values: Option<Vec<String>>,
    unique: bool,
    zero_check: bool,
}

impl FieldSpecBuilder {
    /// Creates a new field builder.
    ///
    /// # Arguments
    ///
    /// * `name` - Field name
    /// * `kind` - Field type and its type-specific options
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            size: None,
            required: false,
            allowed_values: None,
            unique: false,
            zero_check: false,
        }
    }

    /// Sets the maximum value length.
    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets whether the field is required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the permitted values.
    pub fn allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Marks the field as part of the composite uniqueness key.
    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Rejects zero values.
    pub fn zero_check(mut self, zero_check: bool) -> Self {
        self.zero_check = zero_check;
        self
    }

    /// Builds the field spec.
    pub fn build(self) -> FieldSpec {
        FieldSpec {
            name: self.name,
            kind: self.kind,
            size: self.size,
            required: self.required,
            allowed_values: self.allowed_values,
            unique: self.unique,
            zero_check: self.zero_check,
        }
    }
}
