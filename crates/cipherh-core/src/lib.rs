//! # cipherh-core
//!
//! Core types, configuration, and utilities for CipherH.
//!
//! This crate provides shared functionality used across all CipherH crates:
//!
//! - **Configuration**: Loading, validation, and environment overrides of the config file
//! - **Types**: The closed set of messaging channels the backend speaks to
//! - **Utilities**: Path resolution, environment handling, and secret strings

pub mod config;
pub mod types;
pub mod error;
pub mod paths;
pub mod env;
pub mod secret;

// Re-exports for convenience
pub use config::Config;
pub use error::{ConfigError, UnknownChannelError};
pub use types::*;
pub use secret::SecretString;
