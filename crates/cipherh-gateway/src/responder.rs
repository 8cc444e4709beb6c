//! Reply generation seam for the conversation route.

use async_trait::async_trait;
use tracing::warn;

/// Produces the bot's reply to an inbound message.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, message: &str, platform: &str, user_id: &str) -> String;
}

/// Echo responder used when no reply engine is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackResponder;

#[async_trait]
impl Responder for FallbackResponder {
    async fn respond(&self, message: &str, platform: &str, user_id: &str) -> String {
        warn!("Fallback responder active");
        format!("[Fallback] Received '{message}' from {user_id} on {platform}.")
    }
}
