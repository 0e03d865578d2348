//! Command implementations

mod chat;
mod check;
mod config;
mod geocode;
mod replay;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Check(args) => check::execute(args, &output),
        Commands::Replay(args) => replay::execute(args, &output),
        Commands::Geocode(args) => geocode::execute(args, config_path, &output).await,
        Commands::Chat(args) => chat::execute(args, config_path, &output).await,
        Commands::Config(args) => config::execute(args, config_path, &output),
    }
}
