//! `composenv suggest`: List best-practice suggestions.

use std::path::PathBuf;

use clap::Args;
use composenv_common::constants::DEFAULT_COMPOSE_FILE;
use composenv_sdk::session::Analyzer;

use crate::output::format_suggestions;

/// Arguments for the `suggest` subcommand.
#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Path to the docker-compose file.
    #[arg(default_value = DEFAULT_COMPOSE_FILE)]
    pub file: PathBuf,
}

/// Executes the `suggest` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn execute(analyzer: &Analyzer, args: SuggestArgs) -> anyhow::Result<()> {
    let session = super::open_session(analyzer, &args.file, None)?;
    print!("{}", format_suggestions(session.suggestions()));
    Ok(())
}
