//! CipherH command-line interface.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CipherH - multi-channel messaging gateway
#[derive(Parser)]
#[command(name = "cipherh")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file
    #[arg(short, long, env = "CIPHERH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP gateway
    Serve(commands::serve::ServeArgs),

    /// Inspect channels
    Channels(commands::channels::ChannelsArgs),

    /// Preview how a channel formats a message
    Format(commands::format::FormatArgs),

    /// Configuration management
    Config(commands::config::ConfigArgs),

    /// Show version information
    Version,
}

/// Filter directive used when `RUST_LOG` is unset.
///
/// Each `-v` raises the `cipherh` level one step above the configured one.
pub fn log_directive(configured: &str, verbose: u8) -> String {
    match verbose {
        0 => configured.to_string(),
        1 => "cipherh=debug,tower_http=debug".to_string(),
        _ => "cipherh=trace,tower_http=trace".to_string(),
    }
}

/// Run the CLI with the given arguments.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Serve(args) => commands::serve::run(args, config_path).await,
        Commands::Channels(args) => commands::channels::run(args, config_path).await,
        Commands::Format(args) => commands::format::run(args),
        Commands::Config(args) => commands::config::run(args, config_path),
        Commands::Version => {
            println!("cipherh {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
