//! Platform status, send and admin toggle routes.

use super::typed_body;
use crate::error::GatewayError;
use crate::state::AppState;
use crate::Result;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use cipherh_channels::{ChannelError, ChannelStatus, MessageContext};
use cipherh_core::ChannelId;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::info;

/// One entry of `GET /api/platforms`.
#[derive(Debug, Serialize)]
pub struct PlatformView {
    #[serde(flatten)]
    pub status: ChannelStatus,

    /// Whether a persisted record exists.
    pub configured: bool,

    /// Persisted active flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_db: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

/// GET /api/platforms
pub async fn list_platforms(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<ChannelId, PlatformView>>> {
    let configs = state.store.list_platform_configs().await?;

    let platforms = state
        .registry
        .get_all_statuses()
        .into_iter()
        .map(|(id, mut status)| {
            let view = match configs.iter().find(|c| c.platform == id) {
                Some(config) => {
                    status.last_sync = config.last_sync;
                    PlatformView {
                        status,
                        configured: true,
                        active_db: Some(config.active),
                        webhook_url: config.webhook_url.clone().or_else(|| state.webhook_url(id)),
                    }
                }
                None => PlatformView {
                    status,
                    configured: false,
                    active_db: None,
                    webhook_url: None,
                },
            };
            (id, view)
        })
        .collect();

    Ok(Json(platforms))
}

/// Body of `POST /api/platforms/:channel/send`.
#[derive(Debug, Deserialize)]
pub struct SendRequest {
    pub recipient_id: String,
    pub message: String,
    #[serde(default)]
    pub context: Option<MessageContext>,
    /// Hand the prepared message to the provider client.
    #[serde(default)]
    pub deliver: bool,
}

/// POST /api/platforms/:channel/send
pub async fn send_message(
    State(state): State<AppState>,
    Path(channel): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>> {
    let request: SendRequest =
        typed_body(&headers, &body, "recipient_id and message are required")?;
    let context = request.context.as_ref();

    let result = if request.deliver {
        state
            .registry
            .deliver(
                &channel,
                &request.recipient_id,
                &request.message,
                context,
                state.provider.as_ref(),
            )
            .await
    } else {
        state
            .registry
            .send(&channel, &request.recipient_id, &request.message, context)
    };

    let result = result.map_err(|e| {
        if e.is_delivery_failure() {
            GatewayError::Channel(e)
        } else {
            GatewayError::dispatch(&channel, e)
        }
    })?;

    Ok(Json(json!({
        "status": "sent",
        "platform": channel,
        "result": result,
    })))
}

/// POST /admin/api/platform/:channel/toggle
///
/// Flips the persisted flag, then applies the new state to the adapter so
/// storage and memory agree.
pub async fn toggle_platform(
    State(state): State<AppState>,
    Path(channel): Path<String>,
) -> Result<Json<Value>> {
    let id: ChannelId = channel.parse().map_err(ChannelError::from)?;

    let config = state.store.toggle_platform(id).await?;
    if config.active {
        state
            .registry
            .activate(id.as_str(), config.credentials.as_ref());
    } else {
        state.registry.deactivate(id.as_str());
    }
    info!(platform = %id, active = config.active, "Platform toggled from admin API");

    Ok(Json(json!({
        "status": "success",
        "platform": id,
        "active": config.active,
    })))
}
