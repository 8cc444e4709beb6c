//! Per-adapter lifecycle state.
//!
//! Every adapter owns one [`Lifecycle`]: the active flag, the last activation
//! time and the channel credentials, all behind a single lock so a reader can
//! never see `active == true` without a `last_sync`.

use crate::error::ChannelError;
use crate::traits::ChannelStatus;
use crate::Result;
use chrono::{DateTime, Utc};
use cipherh_core::config::{
    EmailConfig, FacebookConfig, TelegramConfig, TikTokConfig, ZaloConfig,
};
use cipherh_core::ChannelId;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// Credential material an adapter can be activated with.
pub trait Credentials: DeserializeOwned + Clone + Debug + Send + Sync {
    /// Whether everything the channel needs is present.
    fn is_complete(&self) -> bool;
}

impl Credentials for FacebookConfig {
    fn is_complete(&self) -> bool {
        FacebookConfig::is_complete(self)
    }
}

impl Credentials for TikTokConfig {
    fn is_complete(&self) -> bool {
        TikTokConfig::is_complete(self)
    }
}

impl Credentials for ZaloConfig {
    fn is_complete(&self) -> bool {
        ZaloConfig::is_complete(self)
    }
}

impl Credentials for TelegramConfig {
    fn is_complete(&self) -> bool {
        TelegramConfig::is_complete(self)
    }
}

impl Credentials for EmailConfig {
    fn is_complete(&self) -> bool {
        EmailConfig::is_complete(self)
    }
}

#[derive(Debug)]
struct AdapterState<C> {
    active: bool,
    last_sync: Option<DateTime<Utc>>,
    credentials: C,
}

/// Lifecycle state shared by every adapter implementation.
#[derive(Debug)]
pub struct Lifecycle<C> {
    channel: ChannelId,
    state: RwLock<AdapterState<C>>,
}

impl<C: Credentials> Lifecycle<C> {
    /// Start inactive with the given credentials.
    pub fn new(channel: ChannelId, credentials: C) -> Self {
        Self {
            channel,
            state: RwLock::new(AdapterState {
                active: false,
                last_sync: None,
                credentials,
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn status(&self) -> ChannelStatus {
        let state = self.state.read();
        ChannelStatus {
            channel: self.channel,
            active: state.active,
            last_sync: state.last_sync,
            has_credentials: state.credentials.is_complete(),
        }
    }

    /// Transition to active and stamp `last_sync`.
    ///
    /// A non-empty credentials value replaces the stored credentials. `null`
    /// and `{}` keep them. If the value cannot be read as this channel's
    /// credentials, nothing changes and the error is returned.
    pub fn activate(&self, credentials: Option<&serde_json::Value>) -> Result<ChannelStatus> {
        let replacement = match credentials {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::Object(map)) if map.is_empty() => None,
            Some(value) => Some(serde_json::from_value::<C>(value.clone()).map_err(|e| {
                ChannelError::InvalidCredentials {
                    channel: self.channel,
                    reason: e.to_string(),
                }
            })?),
        };

        let mut state = self.state.write();
        if let Some(credentials) = replacement {
            state.credentials = credentials;
        }
        state.active = true;
        state.last_sync = Some(Utc::now());

        Ok(ChannelStatus {
            channel: self.channel,
            active: true,
            last_sync: state.last_sync,
            has_credentials: state.credentials.is_complete(),
        })
    }

    /// Transition to inactive. `last_sync` is kept.
    pub fn deactivate(&self) -> ChannelStatus {
        let mut state = self.state.write();
        state.active = false;

        ChannelStatus {
            channel: self.channel,
            active: false,
            last_sync: state.last_sync,
            has_credentials: state.credentials.is_complete(),
        }
    }

    /// Whether the stored credentials are complete.
    pub fn is_configured(&self) -> bool {
        self.state.read().credentials.is_complete()
    }

    /// Run `f` against the stored credentials.
    pub fn with_credentials<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        f(&self.state.read().credentials)
    }
}
