//! Zalo Official Account channel implementation.

use crate::lifecycle::Lifecycle;
use crate::recipient;
use crate::traits::{self, ChannelAdapter, ChannelStatus, SendResult, WebhookResult};
use crate::Result;
use cipherh_core::config::ZaloConfig;
use cipherh_core::ChannelId;

/// Zalo OA adapter. Recipients are Zalo user IDs.
#[derive(Debug)]
pub struct ZaloAdapter {
    lifecycle: Lifecycle<ZaloConfig>,
}

impl ZaloAdapter {
    pub fn new(config: ZaloConfig) -> Self {
        Self {
            lifecycle: Lifecycle::new(ChannelId::Zalo, config),
        }
    }

    /// Registered application ID.
    pub fn app_id(&self) -> Option<String> {
        self.lifecycle.with_credentials(|c| c.app_id.clone())
    }
}

impl Default for ZaloAdapter {
    fn default() -> Self {
        Self::new(ZaloConfig::default())
    }
}

impl ChannelAdapter for ZaloAdapter {
    fn channel_id(&self) -> ChannelId {
        ChannelId::Zalo
    }

    fn send_message(&self, recipient_id: &str, formatted_text: &str) -> Result<SendResult> {
        recipient::validate_common(ChannelId::Zalo, recipient_id)?;
        traits::prepare_send(ChannelId::Zalo, recipient_id, formatted_text)
    }

    fn handle_webhook(&self, payload: Option<serde_json::Value>) -> Result<WebhookResult> {
        traits::accept_webhook(ChannelId::Zalo, payload)
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
