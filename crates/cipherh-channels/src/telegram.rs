//! Telegram channel implementation.

use crate::lifecycle::Lifecycle;
use crate::recipient;
use crate::traits::{self, ChannelAdapter, ChannelStatus, SendResult, WebhookResult};
use crate::Result;
use cipherh_core::config::TelegramConfig;
use cipherh_core::ChannelId;

/// Telegram bot adapter.
///
/// Recipients are numeric chat IDs (negative for groups) or `@username`
/// handles of public chats.
#[derive(Debug)]
pub struct TelegramAdapter {
    lifecycle: Lifecycle<TelegramConfig>,
}

impl TelegramAdapter {
    /// Create an inactive adapter with the given bot credentials.
    pub fn new(config: TelegramConfig) -> Self {
        Self {
            lifecycle: Lifecycle::new(ChannelId::Telegram, config),
        }
    }
}

impl Default for TelegramAdapter {
    fn default() -> Self {
        Self::new(TelegramConfig::default())
    }
}

impl ChannelAdapter for TelegramAdapter {
    fn channel_id(&self) -> ChannelId {
        ChannelId::Telegram
    }

    fn send_message(&self, recipient_id: &str, formatted_text: &str) -> Result<SendResult> {
        recipient::validate_telegram(recipient_id)?;
        traits::prepare_send(ChannelId::Telegram, recipient_id, formatted_text)
    }

    fn handle_webhook(&self, payload: Option<serde_json::Value>) -> Result<WebhookResult> {
        traits::accept_webhook(ChannelId::Telegram, payload)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChannelError;

    #[test]
    fn test_long_message_is_cut_to_4096() {
        let adapter = TelegramAdapter::default();
        let out = adapter.format_message(&"A".repeat(5000), None);
        assert_eq!(out.text.len(), 4096);
        assert!(out.text.ends_with("..."));
    }

    #[test]
    fn test_recipient_forms() {
        let adapter = TelegramAdapter::default();
        assert!(adapter.send_message("987654321", "hi").is_ok());
        assert!(adapter.send_message("@cipherh_news", "hi").is_ok());

        let err = adapter.send_message("not a chat", "hi").unwrap_err();
        assert_eq!(err.kind(), "invalid_recipient");
    }

    #[test]
    fn test_update_payload() {
        let adapter = TelegramAdapter::default();
        let update = serde_json::json!({
            "update_id": 10000,
            "message": {"chat": {"id": 1111}, "text": "/start"}
        });
        let result = adapter.handle_webhook(Some(update)).unwrap();
        assert_eq!(result.data["message"]["text"], "/start");

        let err = adapter.handle_webhook(None).unwrap_err();
        assert!(matches!(err, ChannelError::EmptyPayload { channel: ChannelId::Telegram }));
    }
}
