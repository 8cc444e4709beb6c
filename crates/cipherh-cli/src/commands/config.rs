//! Configuration management commands.

use cipherh_core::{paths, Config, SecretString};
use clap::Args;
use serde_json::Value;
use std::path::Path;

/// Config keys holding credentials.
const SECRET_KEYS: &[&str] = &["access_token", "app_secret", "bot_token", "password"];

/// Config command arguments.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(clap::Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration, credentials masked
    Show,

    /// Show configuration file path
    Path,

    /// Validate configuration
    Validate,

    /// Write a default configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Replace every credential string in a serialized config with its masked form.
pub fn mask_secrets(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                let secret = SECRET_KEYS.contains(&key.as_str());
                match field {
                    Value::String(s) if secret => *s = SecretString::new(s.as_str()).masked(),
                    other => mask_secrets(other),
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(mask_secrets),
        _ => {}
    }
}

/// Write a fresh configuration to `path` with a file store next to it.
pub fn init(path: &Path, force: bool) -> anyhow::Result<Config> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            path.display()
        );
    }

    let mut config = Config::default();
    config.store.path = Some(match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join("store.json"),
        _ => paths::store_file()?,
    });
    config.save(path)?;
    Ok(config)
}

/// Run the config command.
pub fn run(args: ConfigArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = super::load_config(config_path)?;
            let mut json = serde_json::to_value(&config)?;
            mask_secrets(&mut json);
            println!("{}", serde_json::to_string_pretty(&json)?);
        }

        ConfigCommand::Path => {
            let path = super::config_path(config_path)?;
            println!("{}", path.display());
        }

        ConfigCommand::Validate => {
            let path = super::config_path(config_path)?;
            let mut config = match Config::load(&path) {
                Ok(config) => config,
                Err(e) => anyhow::bail!("Failed to load config: {}", e),
            };
            config.apply_env_overrides();
            match config.validate() {
                Ok(()) => println!("Configuration is valid"),
                Err(e) => anyhow::bail!("Configuration error: {}", e),
            }
        }

        ConfigCommand::Init { force } => {
            let path = super::config_path(config_path)?;
            init(&path, force)?;
            println!("Created config file: {}", path.display());
        }
    }

    Ok(())
}
