//! # Treats Testkit
//!
//! Testing utilities for the treat maker.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Vectors**: Known normalization cases for wallets, references and text
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A treat maker over in-memory backends
//!
//! ## Vectors
//!
//! ```rust
//! use treats_testkit::vectors::verify_all_vectors;
//!
//! verify_all_vectors().unwrap();
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use treats_testkit::generators::account_name;
//!
//! proptest! {
//!     #[test]
//!     fn gains_suffix(name in account_name()) {
//!         prop_assert!(WalletAddress::for_mint(&name).as_str().ends_with(".near"));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use treats_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::with_default_account("agent");
//! assert_eq!(fixture.maker.config().default_account.as_deref(), Some("agent"));
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{channel_body, channel_request, mint_request, TestFixture, MASTER_KEY};
pub use vectors::{reference_vectors, sanitize_vectors, verify_all_vectors, wallet_vectors};
