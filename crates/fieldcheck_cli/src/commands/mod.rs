pub mod check;
pub mod validate;

use anyhow::{Context, Result};
use fieldcheck_core::Schema;
use fieldcheck_parser::{detect_format, parse_str};
use std::path::Path;

/// Reads and parses a schema file, picking the format from its extension.
pub async fn load_schema(schema_path: &str) -> Result<Schema> {
    let path = Path::new(schema_path);
    let format = detect_format(path)
        .with_context(|| format!("Unsupported schema file: {}", schema_path))?;
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read schema file: {}", schema_path))?;

    parse_str(&content, format)
        .with_context(|| format!("Failed to parse schema file: {}", schema_path))
}
