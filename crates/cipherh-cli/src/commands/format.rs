//! Format preview command.

use cipherh_channels::{ChannelRegistry, FormattedMessage};
use clap::Args;

/// Format command arguments.
#[derive(Args, Debug)]
pub struct FormatArgs {
    /// Channel name (facebook, tiktok, zalo, telegram, email)
    pub channel: String,

    /// Message text; multiple words are joined with spaces
    #[arg(required = true)]
    pub text: Vec<String>,

    /// Print the formatted message as JSON
    #[arg(long)]
    pub json: bool,
}

/// Apply the channel's policy to the joined text.
///
/// The channel name is folded to lowercase first; the registry itself only
/// accepts exact wire names.
pub fn preview(args: &FormatArgs) -> anyhow::Result<FormattedMessage> {
    let registry = ChannelRegistry::new();
    let channel = args.channel.trim().to_ascii_lowercase();
    let text = args.text.join(" ");
    Ok(registry.format(&channel, &text, None)?)
}

/// Run the format command.
pub fn run(args: FormatArgs) -> anyhow::Result<()> {
    let formatted = preview(&args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&formatted)?);
    } else {
        println!("{}", formatted.text);
        if formatted.truncated {
            eprintln!(
                "(truncated to {} chars for {})",
                formatted.text.chars().count(),
                formatted.channel
            );
        }
    }

    Ok(())
}
