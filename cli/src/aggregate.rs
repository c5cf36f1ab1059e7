#![deny(missing_docs)]

//! # Aggregate Command
//!
//! Merges group files into one Swagger 2.0 document.

use crate::files::{load_groups, write_output};
use apidoc_core::{aggregate, AppResult, Info};
use clap::ValueEnum;
use std::path::PathBuf;

/// Serialization of the aggregated document.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

/// Arguments for the aggregate command.
#[derive(clap::Args, Debug, Clone)]
pub struct AggregateArgs {
    /// API title written to `info.title`.
    #[clap(long, env = "APIDOC_TITLE")]
    pub title: String,

    /// API version written to `info.version`.
    #[clap(long = "version", env = "APIDOC_VERSION")]
    pub api_version: String,

    /// Optional API description.
    #[clap(long, env = "APIDOC_DESCRIPTION")]
    pub description: Option<String>,

    /// Output format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Output file. Prints to stdout if omitted.
    #[clap(long)]
    pub output: Option<PathBuf>,

    /// Swagger fragments, one per path group. The file stem names the group.
    #[clap(required = true)]
    pub groups: Vec<PathBuf>,
}

/// Executes the aggregation.
///
/// All validation problems come back together as `AppError::Validation`.
pub fn execute(args: &AggregateArgs) -> AppResult<()> {
    let groups = load_groups(&args.groups)?;

    let mut info = Info::new(&args.title, &args.api_version);
    if let Some(desc) = &args.description {
        info = info.with_description(desc);
    }

    let document = aggregate(info, &groups)?;

    let rendered = match args.format {
        OutputFormat::Json => document.to_json_string()?,
        OutputFormat::Yaml => document.to_yaml_string()?,
    };
    write_output(args.output.as_deref(), &rendered)
}
