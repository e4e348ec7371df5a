mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fieldcheck")]
#[command(version, about = "Validate tabular data against a field schema", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a CSV table against a schema
    Validate {
        /// Path to the schema file (JSON, YAML or TOML)
        schema: String,

        /// Path to the CSV table; the first line is the header
        table: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Field delimiter of the table
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,

        /// Validate only the first N data rows
        #[arg(long)]
        sample_size: Option<usize>,

        /// Keep checking rows when the header does not match the declared columns
        #[arg(long)]
        no_gate: bool,

        /// Run independent checks on separate threads
        #[arg(long)]
        parallel: bool,
    },

    /// Check a schema file without validating data
    Check {
        /// Path to the schema file (JSON, YAML or TOML)
        schema: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides the verbosity flag
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .with(filter)
        .init();

    match cli.command {
        Commands::Validate {
            schema,
            table,
            format,
            delimiter,
            sample_size,
            no_gate,
            parallel,
        } => {
            commands::validate::execute(commands::validate::ValidateArgs {
                schema_path: schema,
                table_path: table,
                format,
                delimiter,
                sample_size,
                alignment_gate: !no_gate,
                parallel,
            })
            .await
        }

        Commands::Check { schema, format } => commands::check::execute(&schema, &format).await,
    }
}
