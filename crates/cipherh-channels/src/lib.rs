//! Messaging channel adapters and dispatch for CipherH.
//!
//! Each channel (Facebook, TikTok, Zalo, Telegram, Email) has an adapter
//! that formats text under the channel's [`ChannelPolicy`], validates and
//! prepares outbound messages, and accepts inbound webhook payloads. The
//! [`ChannelRegistry`] owns one adapter per channel and routes by name.

pub mod error;
pub mod message;
pub mod policy;
pub mod traits;
pub mod lifecycle;
pub mod recipient;
pub mod registry;
pub mod delivery;

pub mod facebook;
pub mod tiktok;
pub mod zalo;
pub mod telegram;
pub mod email;

pub use error::ChannelError;
pub use message::{FormattedMessage, MessageContext, OutboundMessage};
pub use policy::ChannelPolicy;
pub use traits::{ChannelAdapter, ChannelStatus, SendResult, SendStatus, WebhookResult};
pub use registry::ChannelRegistry;
pub use delivery::{LoggingProviderClient, ProviderClient};
pub use facebook::FacebookAdapter;
pub use tiktok::TikTokAdapter;
pub use zalo::ZaloAdapter;
pub use telegram::TelegramAdapter;
pub use email::EmailAdapter;

/// Result type for channel operations.
pub type Result<T> = std::result::Result<T, ChannelError>;
