//! Gateway error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cipherh_channels::ChannelError;
use cipherh_store::StoreError;
use thiserror::Error;
use tracing::error;

/// Errors that can occur in the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The request body or parameters were unusable.
    #[error("{0}")]
    BadRequest(String),

    /// Not found error.
    #[error("{0}")]
    NotFound(String),

    /// A channel rejected the request.
    #[error(transparent)]
    Channel(#[from] ChannelError),

    /// The dispatcher could not send a message.
    #[error("Failed to send message via {platform}: {source}")]
    Dispatch {
        platform: String,
        source: ChannelError,
    },

    /// Persistence failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Create a bad request error.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Wrap a send failure for `platform`.
    pub fn dispatch(platform: impl Into<String>, source: ChannelError) -> Self {
        Self::Dispatch {
            platform: platform.into(),
            source,
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Channel(e) if e.is_delivery_failure() => StatusCode::BAD_GATEWAY,
            Self::Channel(_) => StatusCode::BAD_REQUEST,
            Self::Dispatch { .. } | Self::Store(_) | Self::Io(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
