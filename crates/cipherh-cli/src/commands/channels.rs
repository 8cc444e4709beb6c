//! Channel inspection commands.

use cipherh_channels::{ChannelPolicy, ChannelRegistry};
use cipherh_core::{ChannelId, Config};
use cipherh_store::{PlatformConfig, Store};
use clap::Args;
use std::path::Path;

/// Channels command arguments.
#[derive(Args, Debug)]
pub struct ChannelsArgs {
    #[command(subcommand)]
    pub command: ChannelsCommand,
}

#[derive(clap::Subcommand, Debug)]
pub enum ChannelsCommand {
    /// List channels with their formatting policy and credential state
    List,

    /// Show the persisted state of each channel
    Status {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Human description of a channel policy.
pub fn describe_policy(policy: &ChannelPolicy) -> String {
    match policy.max_length() {
        Some(max) => format!("truncate at {} chars", max),
        None => "greeting + signature template".to_string(),
    }
}

/// One `channels list` line per channel.
pub fn list_rows(config: &Config) -> Vec<String> {
    let registry = ChannelRegistry::from_config(&config.channels);
    ChannelId::ALL
        .iter()
        .filter_map(|id| registry.adapter(*id))
        .map(|adapter| {
            let credentials = if adapter.is_configured() {
                "configured"
            } else {
                "not configured"
            };
            format!(
                "  {:<10} {:<20} {:<32} {}",
                adapter.channel_id().as_str(),
                adapter.channel_id().label(),
                describe_policy(&adapter.policy()),
                credentials
            )
        })
        .collect()
}

/// One `channels status` line per channel, merging in persisted records.
pub fn status_rows(records: &[PlatformConfig]) -> Vec<String> {
    ChannelId::ALL
        .iter()
        .map(|id| match records.iter().find(|r| r.platform == *id) {
            Some(record) => {
                let state = if record.active { "active" } else { "inactive" };
                let synced = record
                    .last_sync
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| "never".to_string());
                format!("  {:<10} {:<10} last sync {}", id.as_str(), state, synced)
            }
            None => format!("  {:<10} {:<10} no record", id.as_str(), "inactive"),
        })
        .collect()
}

/// Run the channels command.
pub async fn run(args: ChannelsArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    match args.command {
        ChannelsCommand::List => {
            println!("Channels:\n");
            println!("  {:<10} {:<20} {:<32} {}", "CHANNEL", "NAME", "POLICY", "CREDENTIALS");
            println!("  {}", "-".repeat(76));
            for row in list_rows(&config) {
                println!("{}", row);
            }
        }

        ChannelsCommand::Status { json } => {
            let store = super::serve::open_store(&config)?;
            let records = store.list_platform_configs().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
                return Ok(());
            }

            println!("Channel status ({} store):\n", store.kind());
            for row in status_rows(&records) {
                println!("{}", row);
            }
        }
    }

    Ok(())
}
