//! Shared request state.

use crate::responder::{FallbackResponder, Responder};
use cipherh_channels::{ChannelRegistry, LoggingProviderClient, ProviderClient};
use cipherh_core::ChannelId;
use cipherh_store::{MemoryStore, Store};
use std::sync::Arc;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Channel dispatcher.
    pub registry: Arc<ChannelRegistry>,

    /// Persistence.
    pub store: Arc<dyn Store>,

    /// Reply generation for the conversation route.
    pub responder: Arc<dyn Responder>,

    /// Remote delivery for sends that ask for it.
    pub provider: Arc<dyn ProviderClient>,

    /// Public base URL, used to derive webhook URLs.
    pub public_url: Option<String>,
}

impl AppState {
    /// Create state with the fallback responder and the logging provider client.
    pub fn new(registry: Arc<ChannelRegistry>, store: Arc<dyn Store>) -> Self {
        Self {
            registry,
            store,
            responder: Arc::new(FallbackResponder),
            provider: Arc::new(LoggingProviderClient),
            public_url: None,
        }
    }

    /// In-memory state with credential-less adapters. Handy for tests.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(ChannelRegistry::new()), Arc::new(MemoryStore::new()))
    }

    pub fn with_responder(mut self, responder: Arc<dyn Responder>) -> Self {
        self.responder = responder;
        self
    }

    pub fn with_provider(mut self, provider: Arc<dyn ProviderClient>) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_public_url(mut self, url: Option<String>) -> Self {
        self.public_url = url.map(|u| u.trim_end_matches('/').to_string());
        self
    }

    /// Webhook URL a provider should call for `channel`.
    pub fn webhook_url(&self, channel: ChannelId) -> Option<String> {
        self.public_url
            .as_ref()
            .map(|base| format!("{}/api/webhook/{}", base, channel))
    }
}
