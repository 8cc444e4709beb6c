//! HTTP route handlers.

pub mod conversation;
pub mod health;
pub mod memory;
pub mod platforms;
pub mod webhook;

use crate::error::GatewayError;
use crate::state::AppState;
use crate::Result;
use axum::body::Bytes;
use axum::http::{header::CONTENT_TYPE, HeaderMap};
use axum::routing::{get, post};
use axum::Router;
use serde_json::Value;

/// Every gateway route, not yet bound to state.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/webhook/:channel", post(webhook::handle_webhook))
        .route("/api/platforms", get(platforms::list_platforms))
        .route("/api/platforms/:channel/send", post(platforms::send_message))
        .route(
            "/admin/api/platform/:channel/toggle",
            post(platforms::toggle_platform),
        )
        .route("/admin/api/memory/create", post(memory::create_memory))
        .route("/admin/api/memories", get(memory::list_memories))
        .route("/api/conversation", post(conversation::process_conversation))
        .route(
            "/api/users/:platform/:user_id/history",
            get(conversation::user_history),
        )
        .route("/api/health", get(health::health_check))
}

/// Whether the request declares a JSON body.
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

/// Decode a JSON request body, insisting on a JSON content type.
pub(crate) fn json_body(headers: &HeaderMap, body: &Bytes) -> Result<Value> {
    if !is_json(headers) {
        return Err(GatewayError::bad_request("Expected JSON payload"));
    }

    serde_json::from_slice(body).map_err(|_| GatewayError::bad_request("Invalid JSON payload"))
}

/// Decode a JSON body into `T`, mapping every failure to one 400 message.
pub(crate) fn typed_body<T: serde::de::DeserializeOwned>(
    headers: &HeaderMap,
    body: &Bytes,
    missing: &str,
) -> Result<T> {
    json_body(headers, body)
        .ok()
        .and_then(|value| serde_json::from_value(value).ok())
        .ok_or_else(|| GatewayError::bad_request(missing))
}
