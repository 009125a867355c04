//! # Treats Store
//!
//! Storage abstraction for channel credentials. Provides a trait-based
//! interface with SQLite and in-memory implementations.
//!
//! ## Overview
//!
//! Minting on a channel requires the API key the receipts service returned
//! when the channel was created. The [`CredentialStore`] trait keeps that
//! `channelId -> apiKey` mapping, so the request handlers stay storage-agnostic.
//! The primary implementation is [`SqliteStore`], with [`MemoryStore`] for
//! tests and ephemeral deployments.
//!
//! ## Key Types
//!
//! - [`CredentialStore`] - The async trait for all storage operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage
//! - [`parse_channel_data`] - Reads the legacy channel-data seed blob
//!
//! ## Usage
//!
//! ```rust,no_run
//! use treats_core::{ApiKey, ChannelId};
//! use treats_store::{CredentialStore, SqliteStore};
//!
//! async fn example() {
//!     let store = SqliteStore::open("treats.db").unwrap();
//!
//!     let key = ApiKey::new("xyz789").unwrap();
//!     store.put(&ChannelId::from("abc123"), &key).await.unwrap();
//!
//!     let found = store.get(&ChannelId::from("abc123")).await.unwrap();
//!     assert_eq!(found, Some(key));
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Last write wins**: `put` on an existing channel overwrites its key
//! - **Atomic per call**: every `put`/`get` runs under a lock
//! - **No deletion**: credentials live as long as the database

pub mod error;
pub mod memory;
pub mod migration;
pub mod seed;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use seed::parse_channel_data;
pub use sqlite::SqliteStore;
pub use traits::{CredentialStore, StoreExt};
