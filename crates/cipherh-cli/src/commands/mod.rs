//! CLI command implementations.

pub mod channels;
pub mod config;
pub mod format;
pub mod serve;

use anyhow::Context;
use cipherh_core::{paths, Config};
use std::path::{Path, PathBuf};

/// The config file in use: the `--config` path, or the default location.
pub fn config_path(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(paths::config_file()?),
    }
}

/// Load configuration (defaults when the file is missing) and overlay the
/// environment.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let path = config_path(explicit)?;
    let mut config = Config::load_or_default(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    config.apply_env_overrides();
    Ok(config)
}
