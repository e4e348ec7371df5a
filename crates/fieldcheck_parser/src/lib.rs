//! Schema loader for fieldcheck (JSON/YAML/TOML formats).
//!
//! This module parses schema documents into the strongly-typed
//! [`Schema`](fieldcheck_core::Schema). A document maps field names to
//! constraint objects and lists the expected columns:
//!
//! ```rust
//! use fieldcheck_parser::parse_json;
//!
//! let json = r#"{
//!     "fields": {
//!         "FIELD1": { "size": 500, "type": "alpha_numeric", "required": true, "unique": true },
//!         "FIELD_DEC1": { "type": "decimal", "range": [0, 1000] }
//!     },
//!     "duplicate_field_check": true,
//!     "columns": ["FIELD1", "FIELD_DEC1"]
//! }"#;
//!
//! let schema = parse_json(json).expect("Failed to parse schema");
//! assert_eq!(schema.columns, vec!["FIELD1", "FIELD_DEC1"]);
//! assert!(schema.duplicate_field_check);
//! ```

mod document;

use document::SchemaDocument;
use fieldcheck_core::{ConfigurationError, Schema};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during schema parsing.
#[derive(Debug, Error)]
pub enum ParserError {
    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// The document parsed but breaks a load-time rule
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

impl From<ParserError> for ConfigurationError {
    fn from(err: ParserError) -> Self {
        match err {
            ParserError::IoError(e) => ConfigurationError::Io(e),
            ParserError::UnsupportedFormat(ext) => ConfigurationError::UnsupportedFormat(ext),
            ParserError::InvalidExtension => ConfigurationError::InvalidExtension,
            ParserError::InvalidSchema(message) => ConfigurationError::InvalidSchema(message),
            other => ConfigurationError::InvalidSchema(other.to_string()),
        }
    }
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported schema file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Parse a schema from a JSON string.
pub fn parse_json(content: &str) -> Result<Schema> {
    let document: SchemaDocument = serde_json::from_str(content)?;
    document.into_schema()
}

/// Parse a schema from a YAML string.
///
/// # Example
///
/// ```rust
/// use fieldcheck_parser::parse_yaml;
///
/// let yaml = r#"
/// columns: [REPORT_YEAR]
/// fields:
///   REPORT_YEAR:
///     type: year
///     year_check: true
///     required: true
/// "#;
///
/// let schema = parse_yaml(yaml).unwrap();
/// assert_eq!(schema.fields[0].name, "REPORT_YEAR");
/// ```
pub fn parse_yaml(content: &str) -> Result<Schema> {
    let document: SchemaDocument = serde_yaml_ng::from_str(content)?;
    document.into_schema()
}

/// Parse a schema from a TOML string.
///
/// # Example
///
/// ```rust
/// use fieldcheck_parser::parse_toml;
///
/// let toml = r#"
/// columns = ["ID"]
/// duplicate_field_check = true
///
/// [fields.ID]
/// type = "numeric"
/// zero_check = true
/// "#;
///
/// let schema = parse_toml(toml).unwrap();
/// assert!(schema.fields[0].zero_check);
/// ```
pub fn parse_toml(content: &str) -> Result<Schema> {
    let document: SchemaDocument =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    document.into_schema()
}

/// Parse a schema from a string in the given format.
pub fn parse_str(content: &str, format: SchemaFormat) -> Result<Schema> {
    match format {
        SchemaFormat::Json => parse_json(content),
        SchemaFormat::Yaml => parse_yaml(content),
        SchemaFormat::Toml => parse_toml(content),
    }
}

/// Detect the schema format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.json` → `SchemaFormat::Json`
/// * `.yaml`, `.yml` → `SchemaFormat::Yaml`
/// * `.toml` → `SchemaFormat::Toml`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<SchemaFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "json" => Ok(SchemaFormat::Json),
        "yaml" | "yml" => Ok(SchemaFormat::Yaml),
        "toml" => Ok(SchemaFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a schema from a file with automatic format detection.
///
/// # Example
///
/// ```no_run
/// use fieldcheck_parser::parse_file;
/// use std::path::Path;
///
/// let schema = parse_file(Path::new("schemas/accounts.json")).unwrap();
/// println!("Loaded schema with {} fields", schema.fields.len());
/// ```
pub fn parse_file(path: &Path) -> Result<Schema> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), ?format, "parsing schema document");
    parse_str(&content, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldcheck_core::{FieldKind, NumericRange, YearWindow};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const SAMPLE_JSON: &str = r#"
{
    "fields": {
        "FIELD1": {
            "size": 500,
            "type": "alpha_numeric",
            "required": true,
            "unique": true
        },
        "FIELD2": {
            "size": 100,
            "type": "alpha_numeric",
            "required": true,
            "allowed_values": ["ValidText", "XYZ789"],
            "unique": true
        },
        "FIELD_DEC1": {
            "size": 21,
            "size_before_decimal": 10,
            "size_after_decimal": 10,
            "type": "decimal",
            "required": false,
            "range": [0, 1000]
        },
        "FIELD_NUMERIC1": {
            "size": 21,
            "type": "numeric",
            "required": false,
            "zero_check": true
        }
    },
    "duplicate_field_check": true,
    "columns": ["FIELD1", "FIELD2", "FIELD_DEC1", "FIELD_NUMERIC1"]
}
"#;

    #[test]
    fn test_parse_valid_json() {
        let schema = parse_json(SAMPLE_JSON).expect("Failed to parse valid JSON");

        assert_eq!(schema.columns.len(), 4);
        assert!(schema.duplicate_field_check);
        assert_eq!(schema.fields.len(), 4);

        let field1 = schema.field("FIELD1").expect("FIELD1 should be present");
        assert_eq!(field1.kind, FieldKind::AlphaNumeric);
        assert_eq!(field1.size, Some(500));
        assert!(field1.required);
        assert!(field1.unique);

        let field2 = schema.field("FIELD2").unwrap();
        assert_eq!(
            field2.allowed_values,
            Some(vec!["ValidText".to_string(), "XYZ789".to_string()])
        );

        let dec = schema.field("FIELD_DEC1").unwrap();
        assert_eq!(
            dec.kind,
            FieldKind::Decimal {
                size_before_decimal: Some(10),
                size_after_decimal: Some(10),
                range: Some(NumericRange::new(0.0, 1000.0).unwrap()),
            }
        );

        let num = schema.field("FIELD_NUMERIC1").unwrap();
        assert!(num.zero_check);
        assert!(!num.required);
    }

    #[test]
    fn test_fields_keep_document_order() {
        let schema = parse_json(SAMPLE_JSON).unwrap();
        let names: Vec<&str> = schema.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["FIELD1", "FIELD2", "FIELD_DEC1", "FIELD_NUMERIC1"]);

        let unique: Vec<&str> = schema.unique_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(unique, vec!["FIELD1", "FIELD2"]);
    }

    #[test]
    fn test_duplicate_field_check_defaults_off() {
        let schema = parse_json(r#"{"fields": {}, "columns": []}"#).unwrap();
        assert!(!schema.duplicate_field_check);
        assert!(schema.fields.is_empty());
    }

    #[test]
    fn test_missing_fields_is_invalid() {
        let result = parse_json(r#"{"columns": ["A"]}"#);
        assert!(matches!(result, Err(ParserError::JsonError(_))));
        let err = ConfigurationError::from(result.unwrap_err());
        assert!(matches!(err, ConfigurationError::InvalidSchema(_)));
    }

    #[test]
    fn test_fields_not_a_mapping_is_invalid() {
        let result = parse_json(r#"{"fields": ["A"], "columns": ["A"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_columns_is_invalid() {
        let result = parse_json(r#"{"fields": {"A": {"type": "numeric"}}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_range_is_invalid() {
        let inverted = r#"{"fields": {"A": {"type": "decimal", "range": [10, 1]}}, "columns": ["A"]}"#;
        assert!(matches!(parse_json(inverted), Err(ParserError::InvalidSchema(_))));

        let single = r#"{"fields": {"A": {"type": "decimal", "range": [10]}}, "columns": ["A"]}"#;
        assert!(matches!(parse_json(single), Err(ParserError::InvalidSchema(_))));

        let text = r#"{"fields": {"A": {"type": "decimal", "range": ["a", "b"]}}, "columns": ["A"]}"#;
        assert!(parse_json(text).is_err());
    }

    #[test]
    fn test_negative_width_is_invalid() {
        let json = r#"{"fields": {"A": {"type": "decimal", "size_before_decimal": -1}}, "columns": ["A"]}"#;
        assert!(matches!(parse_json(json), Err(ParserError::InvalidSchema(_))));
    }

    #[test]
    fn test_unknown_type_is_permissive() {
        let json = r#"{"fields": {"A": {"type": "timestamp"}, "B": {}}, "columns": ["A", "B"]}"#;
        let schema = parse_json(json).unwrap();
        assert_eq!(
            schema.field("A").unwrap().kind,
            FieldKind::Other {
                declared: Some("timestamp".to_string())
            }
        );
        assert_eq!(schema.field("B").unwrap().kind, FieldKind::Other { declared: None });
    }

    #[test]
    fn test_type_is_case_insensitive() {
        let json = r#"{"fields": {"A": {"type": "Numeric"}}, "columns": ["A"]}"#;
        let schema = parse_json(json).unwrap();
        assert_eq!(schema.field("A").unwrap().kind, FieldKind::Numeric { range: None });
    }

    #[test]
    fn test_parse_yaml_month_year() {
        let yaml = r#"
columns: [PERIOD]
fields:
  PERIOD:
    type: month_year
    year_check: true
    min_year: 1990
    max_year: 2030
"#;
        let schema = parse_yaml(yaml).expect("Failed to parse YAML");
        assert_eq!(
            schema.field("PERIOD").unwrap().kind,
            FieldKind::MonthYear {
                window: Some(YearWindow::new(1990, 2030).unwrap())
            }
        );
    }

    #[test]
    fn test_year_without_check_has_no_window() {
        let yaml = "columns: [Y]\nfields:\n  Y:\n    type: year\n";
        let schema = parse_yaml(yaml).unwrap();
        assert_eq!(schema.field("Y").unwrap().kind, FieldKind::Year { window: None });
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse_yaml("columns: [A\nfields: {");
        assert!(matches!(result, Err(ParserError::YamlError(_))));
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
columns = ["AMOUNT"]

[fields.AMOUNT]
type = "decimal"
size_after_decimal = 2
range = [0.0, 99.5]
"#;
        let schema = parse_toml(toml).expect("Failed to parse TOML");
        assert_eq!(
            schema.field("AMOUNT").unwrap().kind,
            FieldKind::Decimal {
                size_before_decimal: None,
                size_after_decimal: Some(2),
                range: Some(NumericRange::new(0.0, 99.5).unwrap()),
            }
        );
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = parse_toml("columns = [\n[[[invalid");
        assert!(matches!(result, Err(ParserError::TomlError(_))));
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(Path::new("schema.json")).unwrap(), SchemaFormat::Json);
        assert_eq!(detect_format(Path::new("schema.YML")).unwrap(), SchemaFormat::Yaml);
        assert_eq!(detect_format(Path::new("schema.yaml")).unwrap(), SchemaFormat::Yaml);
        assert_eq!(detect_format(Path::new("schema.toml")).unwrap(), SchemaFormat::Toml);
    }

    #[test]
    fn test_detect_format_unsupported() {
        let result = detect_format(Path::new("schema.xml"));
        assert!(matches!(result, Err(ParserError::UnsupportedFormat(_))));

        let result = detect_format(Path::new("schema"));
        assert!(matches!(result, Err(ParserError::InvalidExtension)));
    }

    #[test]
    fn test_parse_file_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(SAMPLE_JSON.as_bytes()).unwrap();

        let schema = parse_file(file.path()).expect("Failed to parse schema file");
        assert_eq!(schema.fields.len(), 4);
    }

    #[test]
    fn test_parse_file_missing() {
        let result = parse_file(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(ParserError::IoError(_))));
    }
}
