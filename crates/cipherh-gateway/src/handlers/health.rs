//! Health route.

use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when a component is failing.
    pub status: &'static str,

    pub timestamp: DateTime<Utc>,

    pub components: ComponentHealth,
}

/// Component health.
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub store: StoreHealth,
    pub channels: ChannelsHealth,
}

#[derive(Debug, Serialize)]
pub struct StoreHealth {
    pub status: &'static str,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChannelsHealth {
    pub total: usize,
    pub active: usize,
    pub configured: usize,
}

/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = match state.store.ping().await {
        Ok(()) => StoreHealth {
            status: "healthy",
            kind: state.store.kind(),
            message: None,
        },
        Err(e) => {
            warn!("Store health check failed: {}", e);
            StoreHealth {
                status: "unhealthy",
                kind: state.store.kind(),
                message: Some(e.to_string()),
            }
        }
    };

    let statuses = state.registry.get_all_statuses();
    let channels = ChannelsHealth {
        total: statuses.len(),
        active: statuses.values().filter(|s| s.active).count(),
        configured: statuses.values().filter(|s| s.has_credentials).count(),
    };

    let status = if store.status == "healthy" {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        timestamp: Utc::now(),
        components: ComponentHealth { store, channels },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::call;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health() {
        let state = AppState::in_memory();
        state.registry.activate("zalo", None);

        let (status, body) = call(state, "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
        assert_eq!(body["components"]["store"]["status"], "healthy");
        assert_eq!(body["components"]["store"]["kind"], "memory");
        assert_eq!(body["components"]["channels"]["total"], 5);
        assert_eq!(body["components"]["channels"]["active"], 1);
        assert_eq!(body["components"]["channels"]["configured"], 0);
    }
}
