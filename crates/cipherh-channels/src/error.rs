//! Channel error types.

use cipherh_core::error::UnknownChannelError;
use cipherh_core::ChannelId;
use thiserror::Error;

/// Errors that can occur during channel operations.
///
/// Every variant except [`ChannelError::UnknownChannel`] names the channel it
/// came from, so callers can report the failure without extra context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// The channel name is not part of the registered set.
    #[error("Platform {0} not supported")]
    UnknownChannel(String),

    /// Recipient ID is empty or malformed for the channel.
    #[error("Invalid recipient for {channel}: {reason}")]
    InvalidRecipient {
        /// Channel the send was addressed to.
        channel: ChannelId,
        /// Why the recipient was rejected.
        reason: String,
    },

    /// Formatted text is empty.
    #[error("Empty message for {channel}")]
    EmptyMessage {
        /// Channel the send was addressed to.
        channel: ChannelId,
    },

    /// Webhook arrived without a payload.
    #[error("Empty webhook payload for {channel}")]
    EmptyPayload {
        /// Channel the webhook was addressed to.
        channel: ChannelId,
    },

    /// Activation credentials could not be read for the channel.
    #[error("Invalid credentials for {channel}: {reason}")]
    InvalidCredentials {
        /// Channel being activated.
        channel: ChannelId,
        /// Parse failure.
        reason: String,
    },

    /// The provider client could not deliver a prepared message.
    #[error("Delivery via {channel} failed: {reason}")]
    RemoteDeliveryFailure {
        /// Channel the delivery was attempted on.
        channel: ChannelId,
        /// Provider-reported reason.
        reason: String,
    },
}

impl ChannelError {
    /// Create an invalid recipient error.
    pub fn invalid_recipient(channel: ChannelId, reason: impl Into<String>) -> Self {
        Self::InvalidRecipient {
            channel,
            reason: reason.into(),
        }
    }

    /// Create a remote delivery error.
    pub fn delivery(channel: ChannelId, reason: impl Into<String>) -> Self {
        Self::RemoteDeliveryFailure {
            channel,
            reason: reason.into(),
        }
    }

    /// The channel this error is attributed to, if it was a registered one.
    pub fn channel(&self) -> Option<ChannelId> {
        match self {
            Self::UnknownChannel(_) => None,
            Self::InvalidRecipient { channel, .. }
            | Self::EmptyMessage { channel }
            | Self::EmptyPayload { channel }
            | Self::InvalidCredentials { channel, .. }
            | Self::RemoteDeliveryFailure { channel, .. } => Some(*channel),
        }
    }

    /// True when the request itself was malformed (a 400-class failure).
    pub fn is_client_error(&self) -> bool {
        !self.is_delivery_failure()
    }

    /// True when the message was prepared but could not be delivered.
    pub fn is_delivery_failure(&self) -> bool {
        matches!(self, Self::RemoteDeliveryFailure { .. })
    }

    /// Short machine-readable kind, used in structured logs and API errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownChannel(_) => "unknown_channel",
            Self::InvalidRecipient { .. } => "invalid_recipient",
            Self::EmptyMessage { .. } => "empty_message",
            Self::EmptyPayload { .. } => "empty_payload",
            Self::InvalidCredentials { .. } => "invalid_credentials",
            Self::RemoteDeliveryFailure { .. } => "remote_delivery_failure",
        }
    }
}

impl From<UnknownChannelError> for ChannelError {
    fn from(err: UnknownChannelError) -> Self {
        Self::UnknownChannel(err.0)
    }
}
