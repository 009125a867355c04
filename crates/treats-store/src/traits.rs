//! CredentialStore trait: the abstract interface for credential persistence.
//!
//! This trait keeps the request handlers storage-agnostic. Implementations
//! include SQLite (primary) and in-memory.

use async_trait::async_trait;
use treats_core::{ApiKey, ChannelCredential, ChannelId};

use crate::error::Result;

/// The CredentialStore trait: async interface for `channelId -> apiKey`.
///
/// All methods are async to support both sync (SQLite) and async backends.
/// For SQLite, we use `spawn_blocking` internally to avoid blocking the runtime.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert or overwrite the key for a channel.
    async fn put(&self, channel_id: &ChannelId, api_key: &ApiKey) -> Result<()>;

    /// Get the key for a channel. `None` if the channel is unknown.
    async fn get(&self, channel_id: &ChannelId) -> Result<Option<ApiKey>>;

    /// Number of stored channels.
    async fn len(&self) -> Result<usize>;

    /// Whether the store holds no channels at all.
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// All stored channel ids, sorted.
    async fn channel_ids(&self) -> Result<Vec<ChannelId>>;
}

/// Extension trait for common store patterns.
pub trait StoreExt: CredentialStore {
    /// Store a batch of credentials, returning how many were written.
    fn import(
        &self,
        credentials: &[ChannelCredential],
    ) -> impl std::future::Future<Output = Result<usize>> + Send;
}

impl<S: CredentialStore + ?Sized> StoreExt for S {
    async fn import(&self, credentials: &[ChannelCredential]) -> Result<usize> {
        for credential in credentials {
            self.put(&credential.channel_id, &credential.api_key).await?;
        }
        Ok(credentials.len())
    }
}
