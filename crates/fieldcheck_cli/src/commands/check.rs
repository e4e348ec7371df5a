use anyhow::Result;
use colored::*;
use fieldcheck_validator::DataValidator;
use serde_json::json;
use tracing::info;

use super::load_schema;
use crate::output;

pub async fn execute(schema_path: &str, format: &str) -> Result<()> {
    info!("Checking schema: {}", schema_path);

    let schema = load_schema(schema_path).await?;
    let notes = DataValidator::new().review_schema(&schema);
    let unique_key: Vec<&str> = schema.unique_fields().map(|f| f.name.as_str()).collect();

    if format == "json" {
        let output = json!({
            "valid": true,
            "schema": schema,
            "unique_key": unique_key,
            "notes": notes,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    // A schema that parses is a valid schema
    output::print_success("Schema is valid");

    println!("\nSchema Summary:");
    println!("  Columns:         {}", schema.columns.join(", "));
    println!("  Fields:          {}", schema.fields.len());
    println!(
        "  Unique key:      {}",
        if unique_key.is_empty() {
            "none".to_string()
        } else {
            unique_key.join(", ")
        }
    );
    println!(
        "  Duplicate rows:  {}",
        if schema.duplicate_field_check {
            "checked"
        } else {
            "not checked"
        }
    );

    println!("\nFields:");
    for field in &schema.fields {
        let mut traits = vec![field.kind.type_name().to_string()];
        if field.required {
            traits.push("required".to_string());
        }
        if let Some(size) = field.size {
            traits.push(format!("size {}", size));
        }
        if let Some(range) = field.kind.range() {
            traits.push(format!("range {}-{}", range.min(), range.max()));
        }
        if let Some(values) = &field.allowed_values {
            traits.push(format!("{} allowed values", values.len()));
        }
        if field.unique {
            traits.push("unique".to_string());
        }
        if field.zero_check {
            traits.push("non-zero".to_string());
        }
        println!("  {:<16} {}", field.name, traits.join(", "));
    }

    if !notes.is_empty() {
        println!("\n{}", "Notes:".yellow().bold());
        for (i, note) in notes.iter().enumerate() {
            println!("  {}. {}", i + 1, note.yellow());
        }
    }

    Ok(())
}
