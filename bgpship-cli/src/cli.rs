//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Configuration file used when `--config` is not given.
///
/// A missing file at this location falls back to built-in defaults;
/// a missing file passed explicitly is an error.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/bgpship/bgpship.toml";

/// bgpship -- rotate BGP MRT dumps and ship them to a log analytics workspace.
///
/// Use `bgpship <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "bgpship", version, about, long_about = None)]
pub struct Cli {
    /// Path to the bgpship.toml configuration file [default: /etc/bgpship/bgpship.toml].
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override log level.
    #[arg(long, global = true, value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: Option<String>,

    /// Override log format.
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Log line formats (written to stderr).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// JSON lines.
    Json,
    /// Human-readable multi-line output.
    Pretty,
}

impl LogFormat {
    /// Name as accepted by `general.log_format`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rotate the active dump and ship its records in one request.
    Ship(ShipArgs),

    /// Flatten a dump file and print the batch (no rotation, no credentials, no network).
    Inspect(InspectArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- ship ----

/// Run one rotation and delivery cycle.
#[derive(Args, Debug)]
pub struct ShipArgs {
    /// Key Vault holding the workspace credentials.
    #[arg(short = 'v', long)]
    pub vault_name: Option<String>,

    /// Active dump file (overrides rotation.active_path). Staging moves
    /// beside it as `<FILE>.tmp`.
    #[arg(short = 'f', long)]
    pub mrt_file: Option<PathBuf>,

    /// Print the assembled batch to stdout instead of sending it.
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Where to read credentials from (overrides secrets.provider).
    #[arg(long)]
    pub secrets: Option<SecretsSource>,
}

/// Secret provider selection on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SecretsSource {
    /// `BGPSHIP_SECRET_<NAME>` environment variables.
    Env,
    /// Azure Key Vault via managed identity.
    KeyVault,
}

// ---- inspect ----

/// Flatten a dump file without rotating or sending it.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Dump file to read (e.g. a staging file preserved after a read failure).
    pub path: PathBuf,
}

// ---- config ----

/// Manage bgpship configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, rotation, reader, ingestion, secrets).
        #[arg(long)]
        section: Option<String>,
    },
}
