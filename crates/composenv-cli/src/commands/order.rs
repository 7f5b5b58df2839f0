//! `composenv order`: Print the service startup order.

use std::path::PathBuf;

use clap::Args;
use composenv_common::constants::DEFAULT_COMPOSE_FILE;
use composenv_sdk::session::Analyzer;

/// Arguments for the `order` subcommand.
#[derive(Args, Debug)]
pub struct OrderArgs {
    /// Path to the docker-compose file.
    #[arg(default_value = DEFAULT_COMPOSE_FILE)]
    pub file: PathBuf,
}

/// Executes the `order` command.
///
/// Services are listed dependencies first.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or the
/// dependencies form a cycle.
pub fn execute(analyzer: &Analyzer, args: OrderArgs) -> anyhow::Result<()> {
    let session = super::open_session(analyzer, &args.file, None)?;
    let order = session.startup_order()?;

    println!("Startup order for: {}", args.file.display());
    for (position, name) in order.iter().enumerate() {
        println!("  {}. {name}", position + 1);
    }
    println!();
    println!("  {} service(s).", order.len());
    Ok(())
}
