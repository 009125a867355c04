//! # Treats Core
//!
//! Pure types and request normalization for the ShardDog treat maker.
//!
//! This crate contains no I/O, no storage, no networking. It turns raw tool-call
//! input into validated payloads ready to be forwarded to the receipts API.
//!
//! ## Key Types
//!
//! - [`ChannelId`] - Upstream-assigned channel identifier
//! - [`ApiKey`] - Redacted credential newtype (master or per-channel key)
//! - [`WalletAddress`] - NEAR account with a recognized network suffix
//! - [`ChannelCreationRequest`] / [`ChannelDraft`] - Raw and validated channel input
//! - [`MintRequest`] / [`MintTarget`] - Raw and validated mint input
//!
//! ## Normalization
//!
//! Validation runs in a fixed order and stops at the first failure. See
//! [`validation`] for the channel and mint pipelines and [`reference`] for the
//! JSON reference round-trip.

pub mod error;
pub mod reference;
pub mod request;
pub mod types;
pub mod validation;

pub use error::ValidationError;
pub use reference::{normalize_reference, Reference, DEFAULT_REFERENCE, OBJECT_ARTIFACT};
pub use request::{ChannelCreationRequest, MintRequest};
pub use types::{ApiKey, ChannelCredential, ChannelId, WalletAddress};
pub use validation::{prepare_channel, prepare_mint, sanitize_text, ChannelDraft, MintTarget};
