//! Core channel adapter trait.

use crate::message::{FormattedMessage, MessageContext};
use crate::policy::ChannelPolicy;
use crate::Result;
use chrono::{DateTime, Utc};
use cipherh_core::ChannelId;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// The capability set every channel implements.
///
/// Adapters are synchronous: formatting, preparation and webhook
/// normalization are in-memory work. Remote delivery belongs to a
/// [`ProviderClient`](crate::delivery::ProviderClient).
pub trait ChannelAdapter: Send + Sync + Debug {
    /// Get the channel identifier.
    fn channel_id(&self) -> ChannelId;

    /// Get the formatting policy bound to this channel.
    fn policy(&self) -> ChannelPolicy {
        ChannelPolicy::for_channel(self.channel_id())
    }

    /// Apply the channel policy to raw text.
    fn format_message(&self, text: &str, context: Option<&MessageContext>) -> FormattedMessage {
        self.policy().format(self.channel_id(), text, context)
    }

    /// Validate a recipient and formatted text and prepare them for delivery.
    ///
    /// Never performs network I/O.
    fn send_message(&self, recipient_id: &str, formatted_text: &str) -> Result<SendResult>;

    /// Accept an inbound webhook payload.
    ///
    /// `None` (or JSON `null`) is rejected; any other value, including an
    /// empty object, is accepted as-is.
    fn handle_webhook(&self, payload: Option<serde_json::Value>) -> Result<WebhookResult>;

    /// Snapshot of the lifecycle state.
    fn status(&self) -> ChannelStatus;

    /// Mark the channel active, optionally replacing its credentials.
    fn activate(&self, credentials: Option<&serde_json::Value>) -> Result<ChannelStatus>;

    /// Mark the channel inactive. `last_sync` is left untouched.
    fn deactivate(&self) -> ChannelStatus;

    /// Whether the credentials this channel needs are present.
    fn is_configured(&self) -> bool;
}

/// Outcome of a send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SendStatus {
    /// Validated and formatted; delivery is someone else's job.
    Prepared,

    /// Handed off to a provider client that reported success.
    Delivered,
}

/// Result from sending a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendResult {
    /// Channel the message was prepared for.
    #[serde(rename = "platform")]
    pub channel: ChannelId,

    /// Send status.
    pub status: SendStatus,

    /// Local identifier for this send, useful for correlating logs.
    pub message_id: String,

    /// Recipient ID as given by the caller.
    pub recipient_id: String,

    /// Formatted text that would be delivered.
    pub message: String,

    /// When the message was prepared.
    pub prepared_at: DateTime<Utc>,

    /// When the provider client reported delivery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
}

impl SendResult {
    /// Create a prepared send result.
    pub fn prepared(
        channel: ChannelId,
        recipient_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            channel,
            status: SendStatus::Prepared,
            message_id: uuid::Uuid::new_v4().to_string(),
            recipient_id: recipient_id.into(),
            message: message.into(),
            prepared_at: Utc::now(),
            delivered_at: None,
        }
    }

    /// Mark as delivered now.
    pub fn delivered(mut self) -> Self {
        self.status = SendStatus::Delivered;
        self.delivered_at = Some(Utc::now());
        self
    }

    /// Whether the provider reported delivery.
    pub fn is_delivered(&self) -> bool {
        self.status == SendStatus::Delivered
    }
}

/// Result from handling an inbound webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookResult {
    /// Channel the webhook came from.
    #[serde(rename = "platform")]
    pub channel: ChannelId,

    /// Always true for an accepted payload.
    pub processed: bool,

    /// The payload, untouched.
    pub data: serde_json::Value,
}

impl WebhookResult {
    /// Create a processed webhook result.
    pub fn processed(channel: ChannelId, data: serde_json::Value) -> Self {
        Self {
            channel,
            processed: true,
            data,
        }
    }
}

/// Lifecycle snapshot of one adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelStatus {
    /// Channel identifier.
    #[serde(rename = "platform")]
    pub channel: ChannelId,

    /// Whether the channel is active.
    pub active: bool,

    /// Last activation time. Always set while active.
    pub last_sync: Option<DateTime<Utc>>,

    /// Whether the channel's credentials are present.
    pub has_credentials: bool,
}

/// Shared tail of every `send_message`: reject empty text and build the
/// prepared result. Recipient rules are checked by the caller first.
pub(crate) fn prepare_send(
    channel: ChannelId,
    recipient_id: &str,
    formatted_text: &str,
) -> Result<SendResult> {
    if formatted_text.is_empty() {
        return Err(crate::ChannelError::EmptyMessage { channel });
    }

    let result = SendResult::prepared(channel, recipient_id, formatted_text);
    tracing::info!(
        channel = %channel,
        recipient = recipient_id,
        message_id = %result.message_id,
        chars = formatted_text.chars().count(),
        "Prepared message"
    );
    Ok(result)
}

/// Shared body of every `handle_webhook`.
pub(crate) fn accept_webhook(
    channel: ChannelId,
    payload: Option<serde_json::Value>,
) -> Result<WebhookResult> {
    match payload {
        None | Some(serde_json::Value::Null) => {
            Err(crate::ChannelError::EmptyPayload { channel })
        }
        Some(data) => {
            tracing::info!(channel = %channel, "Received webhook");
            Ok(WebhookResult::processed(channel, data))
        }
    }
}
