//! Channel identifiers.

use crate::error::UnknownChannelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A messaging channel the backend can speak to.
///
/// The set is closed: adding a channel means adding a variant here and an
/// adapter in `cipherh-channels`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelId {
    Facebook,
    TikTok,
    Zalo,
    Telegram,
    Email,
}

impl ChannelId {
    /// Every supported channel, in registration order.
    pub const ALL: [ChannelId; 5] = [
        ChannelId::Facebook,
        ChannelId::TikTok,
        ChannelId::Zalo,
        ChannelId::Telegram,
        ChannelId::Email,
    ];

    /// The lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelId::Facebook => "facebook",
            ChannelId::TikTok => "tiktok",
            ChannelId::Zalo => "zalo",
            ChannelId::Telegram => "telegram",
            ChannelId::Email => "email",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ChannelId::Facebook => "Facebook",
            ChannelId::TikTok => "TikTok",
            ChannelId::Zalo => "Zalo",
            ChannelId::Telegram => "Telegram",
            ChannelId::Email => "Email",
        }
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelId {
    type Err = UnknownChannelError;

    /// Matches the lowercase wire name exactly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChannelId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownChannelError(s.to_string()))
    }
}
