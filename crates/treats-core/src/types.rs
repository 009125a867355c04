//! Strong type definitions for the treat maker.
//!
//! Identifiers and credentials are newtypes to prevent mixing them up at
//! compile time. Credentials never print their value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix of NEAR mainnet accounts, appended when a wallet has no suffix.
pub const NEAR_SUFFIX: &str = ".near";

/// Suffix of NEAR testnet accounts. Accepted as-is by the minter only.
pub const TESTNET_SUFFIX: &str = ".testnet";

/// A channel identifier, assigned by the receipts API on channel creation.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChannelId({})", self.0)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for ChannelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An API key for the receipts service.
///
/// Used both for the master key (channel creation) and for per-channel keys
/// (minting). Never empty. `Debug` and `Display` print a fingerprint only;
/// the raw value is reachable through [`ApiKey::expose`].
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key. Returns `None` for an empty string.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        if key.is_empty() {
            None
        } else {
            Some(Self(key))
        }
    }

    /// The raw key, for the `x-api-key` header and for persistence.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// First 8 hex chars of the BLAKE3 hash of the key.
    ///
    /// Safe to log: lets operators tell keys apart without revealing them.
    pub fn fingerprint(&self) -> String {
        let hash = blake3::hash(self.0.as_bytes());
        hex::encode(&hash.as_bytes()[..4])
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(<redacted {}>)", self.fingerprint())
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<redacted {}>", self.fingerprint())
    }
}

/// A NEAR wallet address with a recognized network suffix.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Normalize a wallet for channel creation: append `.near` unless present.
    pub fn for_channel(raw: &str) -> Self {
        if raw.ends_with(NEAR_SUFFIX) {
            Self(raw.to_string())
        } else {
            Self(format!("{raw}{NEAR_SUFFIX}"))
        }
    }

    /// Normalize a mint receiver: append `.near` unless it already ends in
    /// `.near` or `.testnet`.
    pub fn for_mint(raw: &str) -> Self {
        if raw.ends_with(NEAR_SUFFIX) || raw.ends_with(TESTNET_SUFFIX) {
            Self(raw.to_string())
        } else {
            Self(format!("{raw}{NEAR_SUFFIX}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletAddress({})", self.0)
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A channel id paired with the key that authorizes minting on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelCredential {
    pub channel_id: ChannelId,
    pub api_key: ApiKey,
}

impl ChannelCredential {
    pub fn new(channel_id: ChannelId, api_key: ApiKey) -> Self {
        Self {
            channel_id,
            api_key,
        }
    }
}
