//! Channel registry and dispatcher.

use crate::delivery::ProviderClient;
use crate::email::EmailAdapter;
use crate::error::ChannelError;
use crate::facebook::FacebookAdapter;
use crate::message::{FormattedMessage, MessageContext, OutboundMessage};
use crate::telegram::TelegramAdapter;
use crate::tiktok::TikTokAdapter;
use crate::traits::{ChannelAdapter, ChannelStatus, SendResult, WebhookResult};
use crate::zalo::ZaloAdapter;
use crate::Result;
use cipherh_core::config::ChannelsConfig;
use cipherh_core::ChannelId;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Routes sends and webhooks to the adapter for a channel name.
///
/// The adapter set is fixed at construction: one adapter per [`ChannelId`],
/// never added or removed afterwards. The map is read-only, so the registry
/// can be shared as `Arc<ChannelRegistry>` without a lock; each adapter
/// guards its own lifecycle state.
pub struct ChannelRegistry {
    adapters: HashMap<ChannelId, Arc<dyn ChannelAdapter>>,
}

impl std::fmt::Debug for ChannelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelRegistry")
            .field("channels", &self.channels())
            .finish()
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelRegistry {
    /// Create a registry whose adapters have no credentials.
    pub fn new() -> Self {
        Self::from_config(&ChannelsConfig::default())
    }

    /// Create a registry with credentials taken from configuration.
    pub fn from_config(config: &ChannelsConfig) -> Self {
        let adapters: [Arc<dyn ChannelAdapter>; 5] = [
            Arc::new(FacebookAdapter::new(config.facebook.clone())),
            Arc::new(TikTokAdapter::new(config.tiktok.clone())),
            Arc::new(ZaloAdapter::new(config.zalo.clone())),
            Arc::new(TelegramAdapter::new(config.telegram.clone())),
            Arc::new(EmailAdapter::new(config.email.clone())),
        ];

        let adapters: HashMap<_, _> = adapters
            .into_iter()
            .map(|adapter| (adapter.channel_id(), adapter))
            .collect();

        let configured: Vec<_> = adapters
            .values()
            .filter(|a| a.is_configured())
            .map(|a| a.channel_id().as_str())
            .collect();
        info!(
            channels = adapters.len(),
            configured = ?configured,
            "Channel registry initialized"
        );

        Self { adapters }
    }

    /// Resolve a channel name to its adapter.
    pub fn get(&self, channel: &str) -> Result<&Arc<dyn ChannelAdapter>> {
        let id = channel.parse::<ChannelId>().map_err(|e| {
            error!(channel, "No adapter found for channel");
            ChannelError::from(e)
        })?;

        self.adapters
            .get(&id)
            .ok_or_else(|| ChannelError::UnknownChannel(channel.to_string()))
    }

    /// Adapter for a known channel.
    pub fn adapter(&self, channel: ChannelId) -> Option<&dyn ChannelAdapter> {
        self.adapters.get(&channel).map(|a| a.as_ref())
    }

    /// Registered channels in stable order.
    pub fn channels(&self) -> Vec<ChannelId> {
        let mut ids: Vec<_> = self.adapters.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Apply a channel's policy without sending.
    pub fn format(
        &self,
        channel: &str,
        text: &str,
        context: Option<&MessageContext>,
    ) -> Result<FormattedMessage> {
        Ok(self.get(channel)?.format_message(text, context))
    }

    /// Format `text` for `channel` and prepare it for `recipient_id`.
    ///
    /// Lifecycle state is not consulted or changed: an inactive channel still
    /// prepares messages.
    pub fn send(
        &self,
        channel: &str,
        recipient_id: &str,
        text: &str,
        context: Option<&MessageContext>,
    ) -> Result<SendResult> {
        let adapter = self.get(channel)?;
        let formatted = adapter.format_message(text, context);
        if formatted.truncated {
            debug!(
                channel = %formatted.channel,
                original_chars = text.chars().count(),
                "Message truncated by channel policy"
            );
        }

        match adapter.send_message(recipient_id, &formatted.text) {
            Ok(result) => {
                info!(
                    channel = %result.channel,
                    operation = "send",
                    message_id = %result.message_id,
                    "Message prepared"
                );
                Ok(result)
            }
            Err(e) => {
                warn!(
                    channel = %adapter.channel_id(),
                    operation = "send",
                    kind = e.kind(),
                    "Send rejected: {}",
                    e
                );
                Err(e)
            }
        }
    }

    /// [`send`](Self::send) for an [`OutboundMessage`].
    pub fn send_outbound(
        &self,
        channel: &str,
        recipient_id: &str,
        message: &OutboundMessage,
    ) -> Result<SendResult> {
        self.send(channel, recipient_id, &message.text, message.context())
    }

    /// Hand an inbound payload to the channel's adapter.
    pub fn handle_webhook(
        &self,
        channel: &str,
        payload: Option<serde_json::Value>,
    ) -> Result<WebhookResult> {
        let adapter = self.get(channel)?;

        match adapter.handle_webhook(payload) {
            Ok(result) => {
                info!(channel = %result.channel, operation = "webhook", "Webhook processed");
                Ok(result)
            }
            Err(e) => {
                warn!(
                    channel = %adapter.channel_id(),
                    operation = "webhook",
                    kind = e.kind(),
                    "Webhook rejected: {}",
                    e
                );
                Err(e)
            }
        }
    }

    /// Status snapshot of every adapter.
    pub fn get_all_statuses(&self) -> BTreeMap<ChannelId, ChannelStatus> {
        self.adapters
            .iter()
            .map(|(id, adapter)| (*id, adapter.status()))
            .collect()
    }

    /// Activate a channel, optionally replacing its credentials.
    ///
    /// Returns false only for an unknown channel. Credentials that cannot be
    /// read are logged and ignored; the channel is still activated with what
    /// it already had.
    pub fn activate(&self, channel: &str, config: Option<&serde_json::Value>) -> bool {
        let Ok(adapter) = self.get(channel) else {
            return false;
        };

        let status = match adapter.activate(config) {
            Ok(status) => status,
            Err(e) => {
                warn!(
                    channel = %adapter.channel_id(),
                    operation = "activate",
                    "Ignoring credentials: {}",
                    e
                );
                match adapter.activate(None) {
                    Ok(status) => status,
                    Err(_) => return false,
                }
            }
        };

        info!(
            channel = %status.channel,
            operation = "activate",
            configured = status.has_credentials,
            "Activated channel"
        );
        true
    }

    /// Deactivate a channel. Returns false only for an unknown channel.
    pub fn deactivate(&self, channel: &str) -> bool {
        let Ok(adapter) = self.get(channel) else {
            return false;
        };

        let status = adapter.deactivate();
        info!(channel = %status.channel, operation = "deactivate", "Deactivated channel");
        true
    }

    /// Prepare a message and hand it to a provider client for delivery.
    ///
    /// Preparation errors come back unchanged; delivery errors come back as
    /// [`ChannelError::RemoteDeliveryFailure`].
    pub async fn deliver(
        &self,
        channel: &str,
        recipient_id: &str,
        text: &str,
        context: Option<&MessageContext>,
        client: &dyn ProviderClient,
    ) -> Result<SendResult> {
        let prepared = self.send(channel, recipient_id, text, context)?;
        let channel_id = prepared.channel;
        let message_id = prepared.message_id.clone();

        match client.deliver(prepared).await {
            Ok(result) => {
                info!(channel = %channel_id, operation = "deliver", message_id = %message_id, "Message delivered");
                Ok(result)
            }
            Err(e) => {
                error!(
                    channel = %channel_id,
                    operation = "deliver",
                    message_id = %message_id,
                    "Delivery failed: {}",
                    e
                );
                Err(match e {
                    ChannelError::RemoteDeliveryFailure { .. } => e,
                    other => ChannelError::delivery(channel_id, other.to_string()),
                })
            }
        }
    }
}
