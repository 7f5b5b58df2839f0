//! `composenv analyze`: Show everything known about a compose file.

use std::path::PathBuf;

use clap::Args;
use composenv_common::constants::DEFAULT_COMPOSE_FILE;
use composenv_sdk::session::Analyzer;

use crate::output::{format_lint, format_suggestions, format_variables};

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to the docker-compose file.
    #[arg(default_value = DEFAULT_COMPOSE_FILE)]
    pub file: PathBuf,

    /// `.env` file whose values are applied to the discovered variables.
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Print the full report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `analyze` command.
///
/// # Errors
///
/// Returns an error if a file cannot be read or the report cannot be serialized.
pub fn execute(analyzer: &Analyzer, args: AnalyzeArgs) -> anyhow::Result<()> {
    let session = super::open_session(analyzer, &args.file, args.env_file.as_deref())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&session.report())?);
        return Ok(());
    }

    println!("Analysis of: {}", args.file.display());
    if let Some(error) = session.document_error() {
        println!("  (document did not parse: {error})");
    }
    println!();
    println!("Variables ({})", session.variables().len());
    print!(
        "{}",
        format_variables(session.variables(), session.validation_errors())
    );
    println!();
    println!("Lint");
    print!("{}", format_lint(session.lint()));
    println!();
    println!("Suggestions");
    print!("{}", format_suggestions(session.suggestions()));
    Ok(())
}
