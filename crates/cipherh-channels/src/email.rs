//! Email channel implementation.

use crate::lifecycle::Lifecycle;
use crate::recipient;
use crate::traits::{self, ChannelAdapter, ChannelStatus, SendResult, WebhookResult};
use crate::Result;
use cipherh_core::config::EmailConfig;
use cipherh_core::ChannelId;

/// Email adapter. Messages are wrapped in the greeting/signature template
/// instead of being length-limited.
#[derive(Debug)]
pub struct EmailAdapter {
    lifecycle: Lifecycle<EmailConfig>,
}

impl EmailAdapter {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            lifecycle: Lifecycle::new(ChannelId::Email, config),
        }
    }

    /// Sender address, if one is configured.
    pub fn from_address(&self) -> Option<String> {
        self.lifecycle
            .with_credentials(|c| c.smtp.as_ref().and_then(|s| s.from.clone()))
    }
}

impl Default for EmailAdapter {
    fn default() -> Self {
        Self::new(EmailConfig::default())
    }
}

impl ChannelAdapter for EmailAdapter {
    fn channel_id(&self) -> ChannelId {
        ChannelId::Email
    }

    fn send_message(&self, recipient_id: &str, formatted_text: &str) -> Result<SendResult> {
        recipient::validate_email(recipient_id)?;
        traits::prepare_send(ChannelId::Email, recipient_id, formatted_text)
    }

    fn handle_webhook(&self, payload: Option<serde_json::Value>) -> Result<WebhookResult> {
        traits::accept_webhook(ChannelId::Email, payload)
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
