//! `composenv export-env`: Write the discovered variables as a `.env` file.

use std::path::PathBuf;

use clap::Args;
use composenv_common::constants::{DEFAULT_COMPOSE_FILE, DEFAULT_ENV_FILE};
use composenv_sdk::session::Analyzer;

/// Arguments for the `export-env` subcommand.
#[derive(Args, Debug)]
pub struct ExportEnvArgs {
    /// Path to the docker-compose file.
    #[arg(default_value = DEFAULT_COMPOSE_FILE)]
    pub file: PathBuf,

    /// `.env` file whose values are applied first.
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Generate passwords for empty security variables.
    #[arg(long)]
    pub fill_secrets: bool,

    /// Write output to a file instead of stdout (`.env` when no path is given).
    #[arg(short, long, num_args = 0..=1, default_missing_value = DEFAULT_ENV_FILE)]
    pub output: Option<PathBuf>,
}

/// Executes the `export-env` command.
///
/// # Errors
///
/// Returns an error if a file cannot be read or written.
pub fn execute(analyzer: &Analyzer, args: ExportEnvArgs) -> anyhow::Result<()> {
    let mut session = super::open_session(analyzer, &args.file, args.env_file.as_deref())?;
    if args.fill_secrets {
        session = session.with_generated_secrets();
    }
    for (name, error) in session.validation_errors() {
        tracing::warn!(name = %name, error = %error, "exporting invalid value");
    }
    super::write_output(args.output.as_deref(), &session.export_env())
}
