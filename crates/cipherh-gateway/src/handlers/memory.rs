//! Admin memory routes.

use super::json_body;
use crate::error::GatewayError;
use crate::state::AppState;
use crate::Result;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use cipherh_store::{Memory, NewMemory};
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::info;

/// Memories returned when `limit` is absent or unreadable.
pub const DEFAULT_MEMORY_LIMIT: usize = 50;

/// POST /admin/api/memory/create
pub async fn create_memory(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>> {
    let value = json_body(&headers, &body)?;
    let new: NewMemory = serde_json::from_value(value)
        .ok()
        .filter(|m: &NewMemory| !m.content.trim().is_empty())
        .ok_or_else(|| GatewayError::bad_request("Content is required"))?;

    if !(0.0..=1.0).contains(&new.confidence) {
        return Err(GatewayError::bad_request("Confidence must be between 0 and 1"));
    }

    let memory = state.store.record_memory(new).await?;
    info!(memory_id = memory.id, memory_type = %memory.memory_type, "Memory created");

    Ok(Json(json!({
        "status": "success",
        "memory_id": memory.id,
    })))
}

/// GET /admin/api/memories
pub async fn list_memories(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Memory>>> {
    let limit = params
        .get("limit")
        .and_then(|l| l.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MEMORY_LIMIT);

    Ok(Json(state.store.list_memories(limit).await?))
}
