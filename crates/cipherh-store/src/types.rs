//! Persisted records.

use chrono::{DateTime, Utc};
use cipherh_core::ChannelId;
use serde::{Deserialize, Serialize};

/// A person who talked to the bot on some platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,

    /// ID of the user on their platform.
    pub platform_id: String,

    /// Platform name as reported by the caller.
    pub platform_type: String,

    pub username: String,

    pub display_name: String,

    pub interaction_count: u64,

    pub created_at: DateTime<Utc>,

    pub last_interaction: Option<DateTime<Utc>>,
}

/// Identity fields used to find or create a [`User`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    pub platform_id: String,
    pub platform_type: String,
    /// Defaults to `platform_id`.
    pub username: Option<String>,
    /// Defaults to `platform_id`.
    pub display_name: Option<String>,
}

impl NewUser {
    pub fn new(platform_type: impl Into<String>, platform_id: impl Into<String>) -> Self {
        Self {
            platform_id: platform_id.into(),
            platform_type: platform_type.into(),
            username: None,
            display_name: None,
        }
    }

    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }

    pub fn with_display_name(mut self, display_name: Option<String>) -> Self {
        self.display_name = display_name;
        self
    }
}

/// One message and the reply it got.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: u64,

    /// Owning [`User::id`].
    pub user_id: u64,

    pub platform: String,

    pub message: String,

    #[serde(rename = "cipher_response")]
    pub response: String,

    pub timestamp: DateTime<Utc>,

    #[serde(default)]
    pub sentiment_score: Option<f64>,

    #[serde(default)]
    pub context_tags: Vec<String>,
}

/// Persisted per-channel settings managed from the admin API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformConfig {
    #[serde(rename = "platform_name")]
    pub platform: ChannelId,

    pub active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,

    /// Opaque credential material handed to the adapter on activation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<serde_json::Value>,

    pub last_sync: Option<DateTime<Utc>>,
}

impl PlatformConfig {
    /// A new record for `platform` with no credentials.
    pub fn new(platform: ChannelId, active: bool) -> Self {
        Self {
            platform,
            active,
            webhook_url: None,
            credentials: None,
            last_sync: None,
        }
    }
}

/// Memory type used when the caller gives none.
pub const DEFAULT_MEMORY_TYPE: &str = "manual";

/// Something the bot learned or was told to keep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub id: u64,

    /// Free-form category, `manual` for admin entries.
    pub memory_type: String,

    pub content: String,

    /// Between 0.0 and 1.0.
    pub confidence: f64,

    pub created_at: DateTime<Utc>,
}

/// Fields used to create a [`Memory`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewMemory {
    #[serde(default = "default_memory_type")]
    pub memory_type: String,

    pub content: String,

    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

fn default_memory_type() -> String {
    DEFAULT_MEMORY_TYPE.to_string()
}

fn default_confidence() -> f64 {
    1.0
}

impl NewMemory {
    /// A manual memory with full confidence.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            memory_type: default_memory_type(),
            content: content.into(),
            confidence: default_confidence(),
        }
    }

    pub fn with_type(mut self, memory_type: impl Into<String>) -> Self {
        self.memory_type = memory_type.into();
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }
}
