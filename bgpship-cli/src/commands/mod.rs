//! Command handlers -- one module per subcommand

pub mod config;
pub mod inspect;
pub mod ship;

use std::path::{Path, PathBuf};

use bgpship_core::config::BgpshipConfig;

use crate::cli::DEFAULT_CONFIG_PATH;
use crate::error::CliError;

/// Load the effective configuration (file + env overrides + defaults).
///
/// An explicit `--config` path must exist. The default path may be absent,
/// in which case built-in defaults are used.
pub async fn load_config(explicit: Option<&Path>) -> Result<BgpshipConfig, CliError> {
    let config = match explicit {
        Some(path) => BgpshipConfig::load(path).await?,
        None => BgpshipConfig::load_or_default(DEFAULT_CONFIG_PATH).await?,
    };
    Ok(config)
}

/// The path reported as the configuration source.
pub fn config_source(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
