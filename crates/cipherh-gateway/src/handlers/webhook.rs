//! Inbound webhook route.

use super::json_body;
use crate::error::GatewayError;
use crate::state::AppState;
use crate::Result;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde_json::{json, Value};
use tracing::{debug, info};

/// Falsy JSON values count as "no data".
fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// POST /api/webhook/:channel
pub async fn handle_webhook(
    State(state): State<AppState>,
    Path(channel): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>> {
    let payload = json_body(&headers, &body)?;
    if is_empty_payload(&payload) {
        return Err(GatewayError::bad_request("Empty data received"));
    }
    debug!(channel = %channel, bytes = body.len(), "Webhook payload received");

    let result = state.registry.handle_webhook(&channel, Some(payload))?;
    info!(channel = %result.channel, "Processed webhook");

    Ok(Json(json!({
        "status": "processed",
        "result": result,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{call, post_json};
    use axum::http::StatusCode;

    #[test]
    fn test_empty_payloads() {
        for value in [json!(null), json!({}), json!([]), json!(""), json!(false), json!(0)] {
            assert!(is_empty_payload(&value), "{value} should be empty");
        }
        for value in [json!({"a": 1}), json!([0]), json!("x"), json!(true), json!(3)] {
            assert!(!is_empty_payload(&value), "{value} should not be empty");
        }
    }

    #[tokio::test]
    async fn test_webhook_processed() {
        let (status, body) = post_json(
            AppState::in_memory(),
            "/api/webhook/telegram",
            r#"{"update_id": 1, "message": {"text": "hi"}}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "processed");
        assert_eq!(body["result"]["platform"], "telegram");
        assert_eq!(body["result"]["processed"], true);
        assert_eq!(body["result"]["data"]["message"]["text"], "hi");
    }

    #[tokio::test]
    async fn test_webhook_requires_json() {
        let (status, body) = call(
            AppState::in_memory(),
            "POST",
            "/api/webhook/zalo",
            Some(("text/plain", "hello")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Expected JSON payload");
    }

    #[tokio::test]
    async fn test_webhook_rejects_empty_json() {
        for empty in ["{}", "null", "[]", "\"\""] {
            let (status, body) = post_json(AppState::in_memory(), "/api/webhook/zalo", empty).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{empty}");
            assert_eq!(body["error"], "Empty data received");
        }
    }

    #[tokio::test]
    async fn test_webhook_unknown_channel() {
        let (status, body) =
            post_json(AppState::in_memory(), "/api/webhook/myspace", r#"{"a": 1}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Platform myspace not supported");
    }

    #[tokio::test]
    async fn test_webhook_channel_name_is_exact() {
        let (status, body) =
            post_json(AppState::in_memory(), "/api/webhook/Telegram", r#"{"a": 1}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Platform Telegram not supported");
    }
}
