//! TikTok channel implementation.

use crate::lifecycle::Lifecycle;
use crate::recipient;
use crate::traits::{self, ChannelAdapter, ChannelStatus, SendResult, WebhookResult};
use crate::Result;
use cipherh_core::config::TikTokConfig;
use cipherh_core::ChannelId;

/// TikTok direct message adapter.
#[derive(Debug)]
pub struct TikTokAdapter {
    lifecycle: Lifecycle<TikTokConfig>,
}

impl TikTokAdapter {
    pub fn new(config: TikTokConfig) -> Self {
        Self {
            lifecycle: Lifecycle::new(ChannelId::TikTok, config),
        }
    }
}

impl Default for TikTokAdapter {
    fn default() -> Self {
        Self::new(TikTokConfig::default())
    }
}

impl ChannelAdapter for TikTokAdapter {
    fn channel_id(&self) -> ChannelId {
        ChannelId::TikTok
    }

    fn send_message(&self, recipient_id: &str, formatted_text: &str) -> Result<SendResult> {
        recipient::validate_common(ChannelId::TikTok, recipient_id)?;
        traits::prepare_send(ChannelId::TikTok, recipient_id, formatted_text)
    }

    fn handle_webhook(&self, payload: Option<serde_json::Value>) -> Result<WebhookResult> {
        traits::accept_webhook(ChannelId::TikTok, payload)
    }

    fn status(&self) -> ChannelStatus {
        self.lifecycle.status()
    }

    fn activate(&self, credentials: Option<&serde_json::Value>) -> Result<ChannelStatus> {
        self.lifecycle.activate(credentials)
    }

    fn deactivate(&self) -> ChannelStatus {
        self.lifecycle.deactivate()
    }

    fn is_configured(&self) -> bool {
        self.lifecycle.is_configured()
    }
}
