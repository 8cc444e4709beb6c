//! Per-channel formatting rules.
//!
//! A policy is a pure function from raw text to the text a channel accepts.
//! Chat channels cap the length and mark the cut with [`TRUNCATION_MARKER`];
//! email has no cap and wraps the body in a fixed greeting and signature.

use crate::message::{FormattedMessage, MessageContext};
use cipherh_core::ChannelId;

/// Appended to text that had to be cut.
pub const TRUNCATION_MARKER: &str = "...";

/// Greeting placed before an email body.
pub const EMAIL_GREETING: &str = "Xin chào,\n\n";

/// Signature placed after an email body.
pub const EMAIL_SIGNATURE: &str = "\n\nBest regards,\nTrần Văn Khải (CipherH)\n\n---\nTin nhắn này được gửi tự động từ hệ thống CipherH AGI.";

/// Formatting rule set for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelPolicy {
    /// Cap the text at `max_chars` characters, marker included.
    Truncate {
        /// Maximum length in characters.
        max_chars: usize,
    },

    /// Wrap the text between a fixed prefix and suffix, whatever its length.
    Template {
        /// Text placed before the body.
        prefix: &'static str,
        /// Text placed after the body.
        suffix: &'static str,
    },
}

impl ChannelPolicy {
    /// The policy each channel enforces.
    pub const fn for_channel(channel: ChannelId) -> Self {
        match channel {
            ChannelId::Facebook => Self::Truncate { max_chars: 2000 },
            ChannelId::TikTok => Self::Truncate { max_chars: 500 },
            ChannelId::Zalo => Self::Truncate { max_chars: 1000 },
            ChannelId::Telegram => Self::Truncate { max_chars: 4096 },
            ChannelId::Email => Self::Template {
                prefix: EMAIL_GREETING,
                suffix: EMAIL_SIGNATURE,
            },
        }
    }

    /// Maximum output length in characters, if the policy has one.
    pub fn max_length(&self) -> Option<usize> {
        match self {
            Self::Truncate { max_chars } => Some(*max_chars),
            Self::Template { .. } => None,
        }
    }

    /// Apply the policy.
    ///
    /// Context is accepted for every channel so callers never need to know
    /// which policies read it; none of the built-in policies do today.
    pub fn format(
        &self,
        channel: ChannelId,
        text: &str,
        _context: Option<&MessageContext>,
    ) -> FormattedMessage {
        match self {
            Self::Truncate { max_chars } => match truncate(text, *max_chars) {
                Some(cut) => FormattedMessage {
                    channel,
                    text: cut,
                    truncated: true,
                },
                None => FormattedMessage {
                    channel,
                    text: text.to_string(),
                    truncated: false,
                },
            },
            Self::Template { prefix, suffix } => FormattedMessage {
                channel,
                text: format!("{prefix}{text}{suffix}"),
                truncated: false,
            },
        }
    }
}

/// Cut `text` to `max_chars` characters ending in the marker.
///
/// Returns `None` when the text already fits. Counts characters, not bytes,
/// so multi-byte text is never split inside a code point.
fn truncate(text: &str, max_chars: usize) -> Option<String> {
    text.char_indices().nth(max_chars)?;

    let keep = max_chars.saturating_sub(TRUNCATION_MARKER.chars().count());
    let cut = text
        .char_indices()
        .nth(keep)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());

    let mut out = String::with_capacity(cut + TRUNCATION_MARKER.len());
    out.push_str(&text[..cut]);
    out.push_str(TRUNCATION_MARKER);
    Some(out)
}
