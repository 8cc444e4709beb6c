//! HTTP gateway for CipherH.
//!
//! This crate provides:
//! - Inbound webhooks routed to the channel dispatcher
//! - Outbound send, platform status and admin toggle routes
//! - Admin memory routes
//! - Conversation, history and health routes backed by the store

pub mod error;
pub mod handlers;
pub mod responder;
pub mod server;
pub mod state;

pub use error::GatewayError;
pub use responder::{FallbackResponder, Responder};
pub use server::Gateway;
pub use state::AppState;

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
