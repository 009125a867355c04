//! In-memory implementation of the CredentialStore trait.
//!
//! Same semantics as SQLite but nothing is persisted. Used by tests and when
//! no database path is configured.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use treats_core::{ApiKey, ChannelId};

use crate::error::{Result, StoreError};
use crate::traits::CredentialStore;

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    credentials: RwLock<HashMap<ChannelId, ApiKey>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            credentials: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<ChannelId, ApiKey>>> {
        self.credentials
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<ChannelId, ApiKey>>> {
        self.credentials
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn put(&self, channel_id: &ChannelId, api_key: &ApiKey) -> Result<()> {
        self.write()?.insert(channel_id.clone(), api_key.clone());
        Ok(())
    }

    async fn get(&self, channel_id: &ChannelId) -> Result<Option<ApiKey>> {
        Ok(self.read()?.get(channel_id).cloned())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    async fn channel_ids(&self) -> Result<Vec<ChannelId>> {
        let mut ids: Vec<ChannelId> = self.read()?.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}
