//! Error types for CipherH core.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, saving or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    /// Serializing the config back out failed.
    #[error("Serialize error: {0}")]
    Serialize(String),

    /// One or more problems found by `Config::validate`, joined with `; `.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON5 parse error: {0}")]
    Json5(String),
}

/// A channel name that is not part of the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown channel: {0}")]
pub struct UnknownChannelError(pub String);
