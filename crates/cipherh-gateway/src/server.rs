//! HTTP gateway server.

use crate::error::GatewayError;
use crate::handlers;
use crate::state::AppState;
use crate::Result;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use cipherh_core::config::{BindMode, GatewayConfig};
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Origins always allowed by CORS (prefix match, so any port is accepted).
const LOCAL_ORIGINS: &[&str] = &[
    "http://localhost",
    "http://127.0.0.1",
    "https://localhost",
    "https://127.0.0.1",
];

/// The HTTP gateway.
pub struct Gateway {
    config: GatewayConfig,
    state: AppState,
}

impl Gateway {
    /// Create a new gateway.
    pub fn new(config: GatewayConfig, state: AppState) -> Self {
        let state = state.with_public_url(config.public_url.clone());
        Self { config, state }
    }

    /// Shared handler state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Build the router with tracing and CORS layers.
    pub fn router(&self) -> Router {
        let mut router = handlers::routes()
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http());

        if self.config.cors {
            router = router.layer(Self::create_cors_layer(&self.config));
        }

        router
    }

    /// Run until Ctrl-C.
    pub async fn run(&self) -> Result<()> {
        let addr = self.bind_address();

        if self.config.bind != BindMode::Loopback {
            warn!("Gateway binding to {}, reachable from the network", addr);
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(GatewayError::Io)?;
        info!("Starting gateway server on {}", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| GatewayError::Internal(e.to_string()))?;

        info!("Gateway stopped");
        Ok(())
    }

    /// CORS for the dashboard: local origins, plus the public URL when set.
    fn create_cors_layer(config: &GatewayConfig) -> CorsLayer {
        let mut allowed: Vec<String> = LOCAL_ORIGINS.iter().map(|o| o.to_string()).collect();
        if let Some(public) = &config.public_url {
            allowed.push(public.trim_end_matches('/').to_string());
        }

        CorsLayer::new()
            .allow_origin(AllowOrigin::predicate(
                move |origin: &HeaderValue, _parts: &axum::http::request::Parts| {
                    origin
                        .to_str()
                        .map(|o| allowed.iter().any(|a| o.starts_with(a.as_str())))
                        .unwrap_or(false)
                },
            ))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .max_age(std::time::Duration::from_secs(3600))
    }

    /// Get the bind address.
    pub fn bind_address(&self) -> SocketAddr {
        let ip = match self.config.bind {
            BindMode::Loopback => [127, 0, 0, 1],
            BindMode::Lan => [0, 0, 0, 0],
        };

        SocketAddr::from((ip, self.config.port))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
