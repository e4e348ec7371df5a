use anyhow::{Context, Result};
use fieldcheck_core::{ValidationContext, ValidationReport};
use fieldcheck_sources::{CsvOptions, CsvSource};
use fieldcheck_validator::DataValidator;
use tracing::info;

use super::load_schema;
use crate::output;

/// Options of the `validate` command.
pub struct ValidateArgs {
    pub schema_path: String,
    pub table_path: String,
    pub format: String,
    pub delimiter: char,
    pub sample_size: Option<usize>,
    pub alignment_gate: bool,
    pub parallel: bool,
}

pub async fn execute(args: ValidateArgs) -> Result<()> {
    info!(
        schema = %args.schema_path,
        table = %args.table_path,
        gate = args.alignment_gate,
        parallel = args.parallel,
        "validating table"
    );
    if let Some(size) = args.sample_size {
        info!("Sample size: {}", size);
    }

    let delimiter = u8::try_from(args.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("Delimiter must be a single ASCII character: {:?}", args.delimiter))?;

    let schema = load_schema(&args.schema_path).await?;
    let text_output = args.format != "json";
    if text_output {
        output::print_info(&format!(
            "Schema loaded: {} columns, {} fields",
            schema.columns.len(),
            schema.fields.len()
        ));
    }

    let mut context = ValidationContext::new()
        .with_alignment_gate(args.alignment_gate)
        .with_parallel(args.parallel);
    if let Some(size) = args.sample_size {
        context = context.with_sample_size(size);
    }

    // Reading and checking rows is blocking work
    let table_path = args.table_path.clone();
    let report = tokio::task::spawn_blocking(move || -> Result<ValidationReport> {
        let options = CsvOptions::new().with_delimiter(delimiter);
        let mut source = CsvSource::from_path(&table_path, options)
            .with_context(|| format!("Failed to open table: {}", table_path))?;

        DataValidator::new()
            .validate_source(&schema, &mut source, &context)
            .with_context(|| format!("Failed to read table: {}", table_path))
    })
    .await
    .context("Validation task failed")??;

    output::print_validation_report(&report, &args.format)?;

    if !report.passed {
        std::process::exit(1);
    }

    Ok(())
}
