//! Outbound message values.

use cipherh_core::ChannelId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Free-form hints that travel with an outbound message (reply-to, rich
/// content flags, ...). Adapters may ignore keys they do not understand.
pub type MessageContext = HashMap<String, serde_json::Value>;

/// Raw text produced by a caller, before any channel policy is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Text content.
    pub text: String,

    /// Optional context hints.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: MessageContext,
}

impl OutboundMessage {
    /// Create a message with no context.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: HashMap::new(),
        }
    }

    /// Add a context hint.
    pub fn with_context(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.context.insert(key.into(), value);
        self
    }

    /// Context as an option, empty maps collapse to `None`.
    pub fn context(&self) -> Option<&MessageContext> {
        if self.context.is_empty() {
            None
        } else {
            Some(&self.context)
        }
    }
}

/// An outbound message after the channel policy has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedMessage {
    /// Channel whose policy produced this text.
    #[serde(rename = "platform")]
    pub channel: ChannelId,

    /// Text ready to hand to the provider.
    pub text: String,

    /// Whether the policy cut the original text.
    pub truncated: bool,
}
