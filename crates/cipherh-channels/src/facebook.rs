//! Facebook Messenger channel implementation.

use crate::lifecycle::Lifecycle;
use crate::recipient;
use crate::traits::{self, ChannelAdapter, ChannelStatus, SendResult, WebhookResult};
use crate::Result;
use cipherh_core::config::FacebookConfig;
use cipherh_core::ChannelId;

/// Facebook Messenger adapter.
///
/// Recipients are page-scoped user IDs (PSIDs).
#[derive(Debug)]
pub struct FacebookAdapter {
    lifecycle: Lifecycle<FacebookConfig>,
}

impl FacebookAdapter {
    /// Create an inactive adapter with the given page credentials.
    pub fn new(config: FacebookConfig) -> Self {
        Self {
            lifecycle: Lifecycle::new(ChannelId::Facebook, config),
        }
    }

    /// The page messages are sent from.
    pub fn page_id(&self) -> Option<String> {
        self.lifecycle.with_credentials(|c| c.page_id.clone())
    }
}

impl Default for FacebookAdapter {
    fn default() -> Self {
        Self::new(FacebookConfig::default())
    }
}

impl ChannelAdapter for FacebookAdapter {
    fn channel_id(&self) -> ChannelId {
        ChannelId::Facebook
    }

    fn send_message(&self, recipient_id: &str, formatted_text: &str) -> Result<SendResult> {
        recipient::validate_common(ChannelId::Facebook, recipient_id)?;
        traits::prepare_send(ChannelId::Facebook, recipient_id, formatted_text)
    }

    fn handle_webhook(&self, payload: Option<serde_json::Value>) -> Result<WebhookResult> {
        traits::accept_webhook(ChannelId::Facebook, payload)
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
