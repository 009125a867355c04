//! # Treats
//!
//! The ShardDog treat maker: lets an assistant create treat channels and mint
//! treats to NEAR wallets through the ShardDog receipts API.
//!
//! ## Overview
//!
//! - **Channel Creator** ([`TreatMaker::create_channel`]): validates and
//!   normalizes the request, creates the channel upstream with the master key
//!   and records the issued channel key
//! - **Treat Minter** ([`TreatMaker::mint_treat`]): looks up the channel key
//!   and mints to the normalized receiver wallet
//!
//! Components share state only through the [`CredentialStore`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use treats::core::{ApiKey, MintRequest};
//! use treats::receipts::HttpReceiptsApi;
//! use treats::store::SqliteStore;
//! use treats::{TreatMaker, TreatMakerConfig};
//!
//! async fn example() {
//!     let store = SqliteStore::open("treats.db").unwrap();
//!     let receipts = HttpReceiptsApi::new("https://sharddog.ai", Duration::from_secs(30)).unwrap();
//!     let config = TreatMakerConfig::new(ApiKey::new("master-key").unwrap());
//!
//!     let maker = TreatMaker::new(Arc::new(store), Arc::new(receipts), config);
//!
//!     let request = MintRequest {
//!         channel_id: Some("abc123".into()),
//!         receiver_id: Some("bob".into()),
//!         wallet: None,
//!     };
//!     let _tx = maker.mint_treat(&request).await.unwrap();
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `treats::core` - Request types and normalization
//! - `treats::store` - Credential storage and SQLite
//! - `treats::receipts` - Receipts API client

pub mod config;
pub mod error;
pub mod maker;

// Re-export component crates
pub use treats_core as core;
pub use treats_receipts as receipts;
pub use treats_store as store;

// Re-export main types for convenience
pub use config::TreatMakerConfig;
pub use error::{Result, TreatError};
pub use maker::{
    TreatMaker, CHANNEL_CREATION_FAILED, GATEWAY_TIMEOUT, MINTING_FAILED, UPSTREAM_TIMED_OUT,
};

pub use treats_core::{ApiKey, ChannelCreationRequest, ChannelId, MintRequest};
pub use treats_receipts::ReceiptsApi;
pub use treats_store::CredentialStore;
