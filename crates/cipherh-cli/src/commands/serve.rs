//! Serve command.

use cipherh_channels::ChannelRegistry;
use cipherh_core::config::BindMode;
use cipherh_core::{paths, Config};
use cipherh_gateway::{AppState, Gateway};
use cipherh_store::{FileStore, MemoryStore, Store};
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Serve command arguments.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Bind mode (loopback, lan)
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Port number
    #[arg(short, long)]
    pub port: Option<u16>,

    /// JSON store file
    #[arg(long, conflicts_with = "memory")]
    pub store: Option<PathBuf>,

    /// Keep all data in memory, even if a store path is configured
    #[arg(long)]
    pub memory: bool,

    /// Public base URL used for webhook URLs
    #[arg(long, env = "CIPHERH_PUBLIC_URL")]
    pub public_url: Option<String>,
}

impl ServeArgs {
    /// Overlay command-line flags on the loaded configuration.
    fn apply(&self, config: &mut Config) -> anyhow::Result<()> {
        if let Some(bind) = &self.bind {
            config.gateway.bind = match bind.as_str() {
                "loopback" => BindMode::Loopback,
                "lan" => BindMode::Lan,
                _ => anyhow::bail!("Invalid bind mode: {}", bind),
            };
        }
        if let Some(port) = self.port {
            config.gateway.port = port;
        }
        if let Some(url) = &self.public_url {
            config.gateway.public_url = Some(url.clone());
        }
        if self.memory {
            config.store.path = None;
        } else if let Some(path) = &self.store {
            config.store.path = Some(path.clone());
        }
        Ok(())
    }
}

/// Open the configured store, or an in-memory one when no path is set.
pub fn open_store(config: &Config) -> anyhow::Result<Arc<dyn Store>> {
    match &config.store.path {
        Some(path) => {
            let path = paths::expand_tilde(&path.to_string_lossy());
            let store = FileStore::open(path.clone())?;
            info!(path = %path.display(), "Using file store");
            Ok(Arc::new(store))
        }
        None => {
            warn!("No store path configured; data will not survive a restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Re-activate the channels the store remembers as active.
///
/// Returns the number of channels activated.
pub async fn restore_platforms(
    registry: &ChannelRegistry,
    store: &dyn Store,
) -> anyhow::Result<usize> {
    let mut restored = 0;
    for config in store.list_platform_configs().await? {
        if config.active && registry.activate(config.platform.as_str(), config.credentials.as_ref())
        {
            restored += 1;
        }
    }
    if restored > 0 {
        info!(count = restored, "Restored active channels from store");
    }
    Ok(restored)
}

/// Run the serve command.
pub async fn run(args: ServeArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let mut config = super::load_config(config_path)?;
    args.apply(&mut config)?;

    if let Err(e) = config.validate() {
        anyhow::bail!("Configuration error: {}", e);
    }

    let registry = Arc::new(ChannelRegistry::from_config(&config.channels));
    let store = open_store(&config)?;
    restore_platforms(&registry, store.as_ref()).await?;

    let state = AppState::new(registry, store);
    let gateway = Gateway::new(config.gateway, state);
    gateway.run().await?;

    Ok(())
}
