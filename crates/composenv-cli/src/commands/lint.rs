//! `composenv lint`: Check a compose file for common mistakes.

use std::path::PathBuf;

use clap::Args;
use composenv_common::constants::DEFAULT_COMPOSE_FILE;
use composenv_sdk::session::Analyzer;

use crate::output::format_lint;

/// Arguments for the `lint` subcommand.
#[derive(Args, Debug)]
pub struct LintArgs {
    /// Path to the docker-compose file.
    #[arg(default_value = DEFAULT_COMPOSE_FILE)]
    pub file: PathBuf,
}

/// Executes the `lint` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the report has errors.
pub fn execute(analyzer: &Analyzer, args: LintArgs) -> anyhow::Result<()> {
    let session = super::open_session(analyzer, &args.file, None)?;
    let report = session.lint();
    print!("{}", format_lint(report));
    if !report.is_valid {
        anyhow::bail!(
            "{} has {} lint error(s)",
            args.file.display(),
            report.errors.len()
        );
    }
    Ok(())
}
