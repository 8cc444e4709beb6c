//! Path resolution utilities.

use crate::env;
use crate::error::ConfigError;
use std::path::PathBuf;

/// CipherH state directory: `$CIPHERH_HOME`, else `~/.cipherh`.
pub fn base_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = env::get_var("CIPHERH_HOME") {
        return Ok(expand_tilde(&dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".cipherh"))
        .ok_or_else(|| ConfigError::Validation("Could not determine home directory".to_string()))
}

/// Get the main config file path (~/.cipherh/cipherh.json5).
pub fn config_file() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("cipherh.json5"))
}

/// Get the default store file path (~/.cipherh/store.json).
pub fn store_file() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("store.json"))
}

/// Expand tilde (~) in a path.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
