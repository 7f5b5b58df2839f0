//! `composenv render`: Write the compose file with values substituted.

use std::path::PathBuf;

use clap::Args;
use composenv_common::constants::{DEFAULT_COMPOSE_FILE, DEFAULT_EXPORT_FILE};
use composenv_sdk::session::Analyzer;

/// Arguments for the `render` subcommand.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Path to the docker-compose file.
    #[arg(default_value = DEFAULT_COMPOSE_FILE)]
    pub file: PathBuf,

    /// `.env` file whose values are substituted.
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Write output to a file instead of stdout
    /// (`docker-compose.modified.yml` when no path is given).
    #[arg(short, long, num_args = 0..=1, default_missing_value = DEFAULT_EXPORT_FILE)]
    pub output: Option<PathBuf>,
}

/// Executes the `render` command.
///
/// # Errors
///
/// Returns an error if a file cannot be read or written.
pub fn execute(analyzer: &Analyzer, args: RenderArgs) -> anyhow::Result<()> {
    let session = super::open_session(analyzer, &args.file, args.env_file.as_deref())?;
    super::write_output(args.output.as_deref(), &session.export_compose())
}
