//! Store implementations.

use crate::error::StoreError;
use crate::types::{Interaction, Memory, NewMemory, NewUser, PlatformConfig, User};
use crate::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cipherh_core::ChannelId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Persistence for users, interactions, memories and platform configuration.
#[async_trait]
pub trait Store: Send + Sync {
    /// Short name for health output.
    fn kind(&self) -> &'static str;

    /// Check that the store is usable.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    /// Look a user up by platform identity, creating it when missing.
    async fn find_or_create_user(&self, new: NewUser) -> Result<User>;

    /// Bump a user's interaction count and last-interaction time.
    async fn touch_user(&self, user_id: u64) -> Result<User>;

    /// Store one message and its reply.
    async fn record_interaction(
        &self,
        user_id: u64,
        platform: &str,
        message: &str,
        response: &str,
    ) -> Result<Interaction>;

    /// A user's interactions, newest first, at most `limit`.
    async fn query_history(&self, user_id: u64, limit: usize) -> Result<Vec<Interaction>>;

    /// Look a user up by platform identity.
    async fn get_user(&self, platform_type: &str, platform_id: &str) -> Result<Option<User>>;

    /// Store a memory.
    async fn record_memory(&self, new: NewMemory) -> Result<Memory>;

    /// Memories, newest first, at most `limit`.
    async fn list_memories(&self, limit: usize) -> Result<Vec<Memory>>;

    /// Persisted settings for one channel.
    async fn platform_config(&self, platform: ChannelId) -> Result<Option<PlatformConfig>>;

    /// All persisted channel settings, in channel order.
    async fn list_platform_configs(&self) -> Result<Vec<PlatformConfig>>;

    /// Insert or replace a channel's settings.
    async fn upsert_platform_config(&self, config: PlatformConfig) -> Result<PlatformConfig>;

    /// Flip a channel's persisted active flag and stamp `last_sync`.
    ///
    /// A channel with no record is created active.
    async fn toggle_platform(&self, platform: ChannelId) -> Result<PlatformConfig>;
}

/// Everything a store holds. Serialized as-is by [`FileStore`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    next_user_id: u64,

    #[serde(default)]
    next_interaction_id: u64,

    #[serde(default)]
    users: Vec<User>,

    #[serde(default)]
    interactions: Vec<Interaction>,

    #[serde(default)]
    platforms: Vec<PlatformConfig>,

    #[serde(default)]
    next_memory_id: u64,

    #[serde(default)]
    memories: Vec<Memory>,
}

impl StoreData {
    fn find_user(&self, platform_type: &str, platform_id: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.platform_type == platform_type && u.platform_id == platform_id)
    }

    fn find_or_create_user(&mut self, new: NewUser) -> User {
        if let Some(user) = self.find_user(&new.platform_type, &new.platform_id) {
            return user.clone();
        }

        self.next_user_id += 1;
        let user = User {
            id: self.next_user_id,
            username: new.username.unwrap_or_else(|| new.platform_id.clone()),
            display_name: new.display_name.unwrap_or_else(|| new.platform_id.clone()),
            platform_id: new.platform_id,
            platform_type: new.platform_type,
            interaction_count: 0,
            created_at: Utc::now(),
            last_interaction: None,
        };
        info!(
            user_id = user.id,
            platform = %user.platform_type,
            "Created user"
        );
        self.users.push(user.clone());
        user
    }

    fn touch_user(&mut self, user_id: u64, now: DateTime<Utc>) -> Result<User> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| StoreError::not_found(format!("user {}", user_id)))?;

        user.interaction_count += 1;
        user.last_interaction = Some(now);
        Ok(user.clone())
    }

    fn record_interaction(
        &mut self,
        user_id: u64,
        platform: &str,
        message: &str,
        response: &str,
    ) -> Result<Interaction> {
        if !self.users.iter().any(|u| u.id == user_id) {
            return Err(StoreError::not_found(format!("user {}", user_id)));
        }

        self.next_interaction_id += 1;
        let interaction = Interaction {
            id: self.next_interaction_id,
            user_id,
            platform: platform.to_string(),
            message: message.to_string(),
            response: response.to_string(),
            timestamp: Utc::now(),
            sentiment_score: None,
            context_tags: Vec::new(),
        };
        self.interactions.push(interaction.clone());
        Ok(interaction)
    }

    fn query_history(&self, user_id: u64, limit: usize) -> Vec<Interaction> {
        let mut history: Vec<_> = self
            .interactions
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect();

        // Newest first; ids break timestamp ties.
        history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        history.truncate(limit);
        history
    }

    fn record_memory(&mut self, new: NewMemory) -> Memory {
        self.next_memory_id += 1;
        let memory = Memory {
            id: self.next_memory_id,
            memory_type: new.memory_type,
            content: new.content,
            confidence: new.confidence,
            created_at: Utc::now(),
        };
        debug!(memory_id = memory.id, memory_type = %memory.memory_type, "Recorded memory");
        self.memories.push(memory.clone());
        memory
    }

    fn list_memories(&self, limit: usize) -> Vec<Memory> {
        let mut memories = self.memories.clone();
        memories.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        memories.truncate(limit);
        memories
    }

    fn platform_config(&self, platform: ChannelId) -> Option<&PlatformConfig> {
        self.platforms.iter().find(|p| p.platform == platform)
    }

    fn list_platform_configs(&self) -> Vec<PlatformConfig> {
        let mut configs = self.platforms.clone();
        configs.sort_by_key(|p| p.platform);
        configs
    }

    fn upsert_platform_config(&mut self, config: PlatformConfig) -> PlatformConfig {
        match self.platforms.iter_mut().find(|p| p.platform == config.platform) {
            Some(existing) => *existing = config.clone(),
            None => self.platforms.push(config.clone()),
        }
        config
    }

    fn toggle_platform(&mut self, platform: ChannelId, now: DateTime<Utc>) -> PlatformConfig {
        let mut config = match self.platform_config(platform) {
            Some(existing) => {
                let mut config = existing.clone();
                config.active = !config.active;
                config
            }
            None => PlatformConfig::new(platform, true),
        };
        config.last_sync = Some(now);

        info!(platform = %platform, active = config.active, "Toggled platform");
        self.upsert_platform_config(config)
    }
}

/// In-memory store. Contents are lost when the process exits.
pub struct MemoryStore {
    data: RwLock<StoreData>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(StoreData::default()),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn find_or_create_user(&self, new: NewUser) -> Result<User> {
        Ok(self.data.write().await.find_or_create_user(new))
    }

    async fn touch_user(&self, user_id: u64) -> Result<User> {
        self.data.write().await.touch_user(user_id, Utc::now())
    }

    async fn record_interaction(
        &self,
        user_id: u64,
        platform: &str,
        message: &str,
        response: &str,
    ) -> Result<Interaction> {
        self.data
            .write()
            .await
            .record_interaction(user_id, platform, message, response)
    }

    async fn query_history(&self, user_id: u64, limit: usize) -> Result<Vec<Interaction>> {
        Ok(self.data.read().await.query_history(user_id, limit))
    }

    async fn get_user(&self, platform_type: &str, platform_id: &str) -> Result<Option<User>> {
        Ok(self
            .data
            .read()
            .await
            .find_user(platform_type, platform_id)
            .cloned())
    }

    async fn record_memory(&self, new: NewMemory) -> Result<Memory> {
        Ok(self.data.write().await.record_memory(new))
    }

    async fn list_memories(&self, limit: usize) -> Result<Vec<Memory>> {
        Ok(self.data.read().await.list_memories(limit))
    }

    async fn platform_config(&self, platform: ChannelId) -> Result<Option<PlatformConfig>> {
        Ok(self.data.read().await.platform_config(platform).cloned())
    }

    async fn list_platform_configs(&self) -> Result<Vec<PlatformConfig>> {
        Ok(self.data.read().await.list_platform_configs())
    }

    async fn upsert_platform_config(&self, config: PlatformConfig) -> Result<PlatformConfig> {
        Ok(self.data.write().await.upsert_platform_config(config))
    }

    async fn toggle_platform(&self, platform: ChannelId) -> Result<PlatformConfig> {
        Ok(self.data.write().await.toggle_platform(platform, Utc::now()))
    }
}

/// File-backed store with JSON persistence.
///
/// All mutations are persisted to disk via atomic writes (write to tmp, then
/// rename). A mutation is applied to a copy of the data and only becomes
/// visible once that copy is on disk, so a failed write leaves both the file
/// and the in-memory view unchanged.
pub struct FileStore {
    path: PathBuf,
    data: RwLock<StoreData>,
}

impl FileStore {
    /// Open a file-backed store.
    ///
    /// If the file at `path` exists, its contents are loaded into memory.
    /// Otherwise the store starts empty and the file is created on the
    /// first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            StoreData::default()
        };

        debug!(
            path = %path.display(),
            users = data.users.len(),
            interactions = data.interactions.len(),
            "Opened file store"
        );

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, data: &StoreData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("tmp");
        let content = serde_json::to_string_pretty(data)?;
        std::fs::write(&tmp_path, content)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Apply `f` to a copy of the data, persist the copy, then publish it.
    async fn commit<T>(&self, f: impl FnOnce(&mut StoreData) -> Result<T>) -> Result<T> {
        let mut data = self.data.write().await;
        let mut next = data.clone();
        let out = f(&mut next)?;
        self.save(&next)?;
        *data = next;
        Ok(out)
    }
}

#[async_trait]
impl Store for FileStore {
    fn kind(&self) -> &'static str {
        "file"
    }

    /// Checks that the backing file (or, before the first write, its
    /// directory) is reachable. Nothing is written.
    async fn ping(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::File::open(&self.path)?;
            return Ok(());
        }

        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut ancestor = Some(dir);
        while let Some(candidate) = ancestor {
            if candidate.exists() {
                let meta = std::fs::metadata(candidate)?;
                if !meta.is_dir() {
                    return Err(StoreError::Io(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        format!("{} is not a directory", candidate.display()),
                    )));
                }
                if meta.permissions().readonly() {
                    return Err(StoreError::Io(std::io::Error::new(
                        std::io::ErrorKind::PermissionDenied,
                        format!("{} is read-only", candidate.display()),
                    )));
                }
                return Ok(());
            }
            ancestor = candidate.parent();
        }
        Ok(())
    }

    async fn find_or_create_user(&self, new: NewUser) -> Result<User> {
        let known = self
            .data
            .read()
            .await
            .find_user(&new.platform_type, &new.platform_id)
            .cloned();
        match known {
            Some(user) => Ok(user),
            None => self.commit(|data| Ok(data.find_or_create_user(new))).await,
        }
    }

    async fn touch_user(&self, user_id: u64) -> Result<User> {
        self.commit(|data| data.touch_user(user_id, Utc::now())).await
    }

    async fn record_interaction(
        &self,
        user_id: u64,
        platform: &str,
        message: &str,
        response: &str,
    ) -> Result<Interaction> {
        self.commit(|data| data.record_interaction(user_id, platform, message, response))
            .await
    }

    async fn query_history(&self, user_id: u64, limit: usize) -> Result<Vec<Interaction>> {
        Ok(self.data.read().await.query_history(user_id, limit))
    }

    async fn get_user(&self, platform_type: &str, platform_id: &str) -> Result<Option<User>> {
        Ok(self
            .data
            .read()
            .await
            .find_user(platform_type, platform_id)
            .cloned())
    }

    async fn record_memory(&self, new: NewMemory) -> Result<Memory> {
        self.commit(|data| Ok(data.record_memory(new))).await
    }

    async fn list_memories(&self, limit: usize) -> Result<Vec<Memory>> {
        Ok(self.data.read().await.list_memories(limit))
    }

    async fn platform_config(&self, platform: ChannelId) -> Result<Option<PlatformConfig>> {
        Ok(self.data.read().await.platform_config(platform).cloned())
    }

    async fn list_platform_configs(&self) -> Result<Vec<PlatformConfig>> {
        Ok(self.data.read().await.list_platform_configs())
    }

    async fn upsert_platform_config(&self, config: PlatformConfig) -> Result<PlatformConfig> {
        self.commit(|data| Ok(data.upsert_platform_config(config))).await
    }

    async fn toggle_platform(&self, platform: ChannelId) -> Result<PlatformConfig> {
        self.commit(|data| Ok(data.toggle_platform(platform, Utc::now())))
            .await
    }
}
