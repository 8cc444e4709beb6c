//! Conversation and history routes.

use super::typed_body;
use crate::error::GatewayError;
use crate::state::AppState;
use crate::Result;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use cipherh_store::NewUser;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::info;

/// History entries returned when `limit` is absent or unreadable.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Platform user IDs arrive as strings or bare numbers.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

/// Body of `POST /api/conversation`.
#[derive(Debug, Deserialize)]
pub struct ConversationRequest {
    pub message: String,
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    pub platform: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// POST /api/conversation
pub async fn process_conversation(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>> {
    let request: ConversationRequest = typed_body(
        &headers,
        &body,
        "message, user_id, and platform are required",
    )?;

    let user = state
        .store
        .find_or_create_user(
            NewUser::new(&request.platform, &request.user_id)
                .with_username(request.username.clone())
                .with_display_name(request.display_name.clone()),
        )
        .await?;
    let user = state.store.touch_user(user.id).await?;

    let response = state
        .responder
        .respond(&request.message, &request.platform, &request.user_id)
        .await;

    let interaction = state
        .store
        .record_interaction(user.id, &request.platform, &request.message, &response)
        .await?;

    info!(
        platform = %request.platform,
        user_id = user.id,
        interaction_id = interaction.id,
        "Conversation processed"
    );

    Ok(Json(json!({
        "response": response,
        "user_id": request.user_id,
        "platform": request.platform,
        "interaction_id": interaction.id,
    })))
}

/// GET /api/users/:platform/:user_id/history
pub async fn user_history(
    State(state): State<AppState>,
    Path((platform, user_id)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>> {
    let user = state
        .store
        .get_user(&platform, &user_id)
        .await?
        .ok_or_else(|| GatewayError::NotFound("User not found".to_string()))?;

    let limit = params
        .get("limit")
        .and_then(|l| l.parse::<usize>().ok())
        .unwrap_or(DEFAULT_HISTORY_LIMIT);
    let history = state.store.query_history(user.id, limit).await?;

    Ok(Json(json!({
        "user": user,
        "history": history,
    })))
}
