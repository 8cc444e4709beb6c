//! Provider client seam for remote delivery.
//!
//! Adapters only prepare messages. Whatever actually talks to a provider's
//! API implements [`ProviderClient`] and is handed to
//! [`ChannelRegistry::deliver`](crate::registry::ChannelRegistry::deliver).

use crate::traits::SendResult;
use crate::Result;
use async_trait::async_trait;
use tracing::info;

/// Performs the remote call for a prepared message.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Deliver a prepared message.
    ///
    /// Returns the result marked delivered, or
    /// [`ChannelError::RemoteDeliveryFailure`](crate::ChannelError::RemoteDeliveryFailure).
    /// Implementations do not retry.
    async fn deliver(&self, prepared: SendResult) -> Result<SendResult>;
}

/// Client that logs the message and reports it delivered without any I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingProviderClient;

#[async_trait]
impl ProviderClient for LoggingProviderClient {
    async fn deliver(&self, prepared: SendResult) -> Result<SendResult> {
        info!(
            channel = %prepared.channel,
            recipient = %prepared.recipient_id,
            message_id = %prepared.message_id,
            "Delivering message (logging client)"
        );
        Ok(prepared.delivered())
    }
}
