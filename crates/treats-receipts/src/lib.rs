//! # Treats Receipts
//!
//! Client for the ShardDog receipts API.
//!
//! Two calls are used: channel creation, authenticated with the master key,
//! and minting, authenticated with the key issued for the channel. Both send
//! the key in the `x-api-key` header and exchange JSON bodies.
//!
//! ## Implementations
//!
//! - [`HttpReceiptsApi`]: reqwest client with a bounded timeout
//! - [`memory::RecordingReceiptsApi`]: records calls and replays scripted
//!   responses, for tests
//!
//! ## Errors
//!
//! A non-success status keeps the raw body in a [`Rejection`] so callers can
//! extract the upstream `message` or pass the details through.

pub mod api;
pub mod error;
pub mod http;
pub mod messages;

pub use api::{memory, ReceiptsApi};
pub use error::{ReceiptsError, Rejection, Result};
pub use http::{HttpReceiptsApi, API_KEY_HEADER, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use messages::{issued_credential, CreateChannelBody, MintBody};
