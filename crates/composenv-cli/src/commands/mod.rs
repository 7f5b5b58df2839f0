//! CLI command definitions and dispatch.

pub mod analyze;
pub mod export_env;
pub mod lint;
pub mod order;
pub mod render;
pub mod suggest;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use composenv_common::config::ComposenvConfig;
use composenv_common::constants::APP_NAME;
use composenv_common::error::ComposenvError;
use composenv_sdk::session::{Analyzer, Session};

/// composenv: Variable discovery and linting for docker-compose files.
#[derive(Parser, Debug)]
#[command(name = APP_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Path to a JSON configuration file.
    #[arg(long, global = true, env = "COMPOSENV_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show variables, validation results, lint findings, and suggestions.
    Analyze(analyze::AnalyzeArgs),
    /// Check a compose file; exits non-zero when errors are found.
    Lint(lint::LintArgs),
    /// List best-practice suggestions.
    Suggest(suggest::SuggestArgs),
    /// Write the discovered variables as a `.env` file.
    ExportEnv(export_env::ExportEnvArgs),
    /// Write the compose file with variable values substituted.
    Render(render::RenderArgs),
    /// Print the service startup order implied by `depends_on`.
    Order(order::OrderArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the command fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let analyzer = Analyzer::new(load_config(cli.config.as_deref())?);
    match cli.command {
        Command::Analyze(args) => analyze::execute(&analyzer, args),
        Command::Lint(args) => lint::execute(&analyzer, args),
        Command::Suggest(args) => suggest::execute(&analyzer, args),
        Command::ExportEnv(args) => export_env::execute(&analyzer, args),
        Command::Render(args) => render::execute(&analyzer, args),
        Command::Order(args) => order::execute(&analyzer, args),
    }
}

/// Loads the configuration file, or the defaults when no path is given.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid JSON.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<ComposenvConfig> {
    let Some(path) = path else {
        return Ok(ComposenvConfig::default());
    };
    tracing::info!(path = %path.display(), "loading configuration");
    Ok(ComposenvConfig::from_json(&read_text(path)?)?)
}

/// Reads a UTF-8 file, attaching the path to I/O failures.
///
/// # Errors
///
/// Returns [`ComposenvError::Io`] if the file cannot be read.
pub fn read_text(path: &Path) -> Result<String, ComposenvError> {
    std::fs::read_to_string(path).map_err(|source| ComposenvError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Analyses a compose file and applies an optional `.env` file on top.
///
/// # Errors
///
/// Returns an error if either file cannot be read or the `.env` file is
/// not UTF-8.
pub fn open_session(
    analyzer: &Analyzer,
    file: &Path,
    env_file: Option<&Path>,
) -> anyhow::Result<Session> {
    tracing::info!(path = %file.display(), "analyzing compose file");
    let session = analyzer.analyze(read_text(file)?);
    let Some(env_path) = env_file else {
        return Ok(session);
    };
    let bytes = std::fs::read(env_path).map_err(|source| ComposenvError::Io {
        path: env_path.to_path_buf(),
        source,
    })?;
    Ok(session.with_env_bytes(&bytes)?)
}

/// Writes text to a file, or to stdout when no path is given.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_output(path: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, text).map_err(|source| ComposenvError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::info!(path = %path.display(), bytes = text.len(), "wrote output");
        }
        None => println!("{text}"),
    }
    Ok(())
}
