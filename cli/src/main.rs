#![deny(missing_docs)]

//! # Apidoc CLI
//!
//! Command Line Interface over the path group aggregator.
//!
//! Supported Commands:
//! - `aggregate`: Group files -> validated Swagger 2.0 document.
//! - `schema`: Group files -> JSON Schema of one definition.

use apidoc_core::{AppError, AppResult};
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod aggregate;
mod files;
mod schema;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Swagger 2.0 path group aggregator")]
struct Cli {
    /// Log filter (e.g. `debug`, `apidoc_core=trace`). Overrides `RUST_LOG`.
    #[clap(long, global = true)]
    log_level: Option<String>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge group files into one validated Swagger document.
    Aggregate(aggregate::AggregateArgs),
    /// Emit the JSON Schema of one definition.
    Schema(schema::SchemaArgs),
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn run(cli: &Cli) -> AppResult<()> {
    match &cli.command {
        Commands::Aggregate(args) => aggregate::execute(args),
        Commands::Schema(args) => schema::execute(args),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Validation(errors)) => {
            eprintln!("Aggregation failed: {} problem(s) found", errors.errors().len());
            for err in errors.errors() {
                eprintln!("  - {}", err);
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_aggregate_args() {
        let cli = Cli::try_parse_from([
            "apidoc",
            "--log-level",
            "debug",
            "aggregate",
            "--title",
            "Zoo",
            "--version",
            "2.1",
            "--format",
            "yaml",
            "pets.yaml",
            "dinos.json",
        ])
        .unwrap();

        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        let Commands::Aggregate(args) = cli.command else {
            panic!("expected aggregate");
        };
        assert_eq!(args.title, "Zoo");
        assert_eq!(args.api_version, "2.1");
        assert_eq!(args.format, aggregate::OutputFormat::Yaml);
        assert_eq!(args.groups.len(), 2);
    }
}
