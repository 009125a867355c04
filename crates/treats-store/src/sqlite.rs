//! SQLite implementation of the CredentialStore trait.
//!
//! This is the primary storage backend. It uses rusqlite with bundled SQLite,
//! wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use treats_core::{ApiKey, ChannelId};

use crate::error::{Result, StoreError};
use crate::migration::{self, now_millis};
use crate::traits::CredentialStore;

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a blocking operation on the connection off the async runtime.
    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
            f(&conn)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

#[async_trait]
impl CredentialStore for SqliteStore {
    async fn put(&self, channel_id: &ChannelId, api_key: &ApiKey) -> Result<()> {
        let channel_id = channel_id.clone();
        let api_key = api_key.clone();

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO channel_credentials (channel_id, api_key, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?3)
                 ON CONFLICT(channel_id) DO UPDATE SET
                     api_key = excluded.api_key,
                     updated_at = excluded.updated_at",
                params![channel_id.as_str(), api_key.expose(), now_millis()],
            )?;
            Ok(())
        })
        .await
    }

    async fn get(&self, channel_id: &ChannelId) -> Result<Option<ApiKey>> {
        let channel_id = channel_id.clone();

        self.with_conn(move |conn| {
            let stored: Option<String> = conn
                .query_row(
                    "SELECT api_key FROM channel_credentials WHERE channel_id = ?1",
                    params![channel_id.as_str()],
                    |row| row.get(0),
                )
                .optional()?;

            stored
                .map(|key| {
                    ApiKey::new(key).ok_or_else(|| {
                        StoreError::InvalidData(format!("empty api key for channel {}", channel_id))
                    })
                })
                .transpose()
        })
        .await
    }

    async fn len(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM channel_credentials", [], |row| {
                    row.get(0)
                })?;
            Ok(count as usize)
        })
        .await
    }

    async fn channel_ids(&self) -> Result<Vec<ChannelId>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT channel_id FROM channel_credentials ORDER BY channel_id")?;

            let ids = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .map(|id| id.map(ChannelId::new))
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(ids)
        })
        .await
    }
}
