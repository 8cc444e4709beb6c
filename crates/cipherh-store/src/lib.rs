//! Persistence for CipherH.
//!
//! This crate provides:
//! - Users, keyed by platform and platform-specific ID
//! - Interaction history (message plus reply)
//! - Memories the bot keeps outside any conversation
//! - Per-channel configuration managed from the admin API
//!
//! Two [`Store`] implementations exist: [`MemoryStore`] and the JSON-backed
//! [`FileStore`].

pub mod error;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use store::{FileStore, MemoryStore, Store};
pub use types::{Interaction, Memory, NewMemory, NewUser, PlatformConfig, User, DEFAULT_MEMORY_TYPE};

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
