//! bgpship -- rotate BGP MRT dumps and ship them to a log analytics workspace.
//!
//! One invocation runs one cycle; scheduling is left to cron or a systemd timer.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;
use colored::Colorize;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            e.exit_code()
        }
    };

    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let loaded = commands::load_config(cli.config.as_deref()).await;

    let mut general = loaded
        .as_ref()
        .map(|config| config.general.clone())
        .unwrap_or_default();
    if let Some(ref level) = cli.log_level {
        general.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        general.log_format = format.as_str().to_owned();
    }
    logging::init_tracing(&general).map_err(|e| CliError::Command(e.to_string()))?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "bgpship starting");

    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Ship(args) => commands::ship::execute(args, loaded?, &writer).await,
        Commands::Inspect(args) => commands::inspect::execute(args, loaded?, &writer).await,
        // reports load errors itself
        Commands::Config(args) => {
            commands::config::execute(args, cli.config.as_deref(), &writer).await
        }
    }
}
