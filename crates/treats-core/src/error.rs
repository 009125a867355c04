//! Error types for request validation.

use thiserror::Error;

/// Message for a channel request missing one of its required fields.
pub const MISSING_CHANNEL_FIELDS: &str = "Missing required fields";

/// Message for a mint request without a channel or a target wallet.
pub const MISSING_MINT_FIELDS: &str =
    "Missing required fields. Need channelId and either receiverId or wallet";

/// Validation errors raised before any upstream call is made.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Wallet address required")]
    WalletInputRequired,

    /// `received` echoes the parsed inputs back to the caller when available.
    #[error("{message}")]
    MissingRequiredFields {
        message: &'static str,
        received: Option<serde_json::Value>,
    },

    #[error("Media URL must start with http/https")]
    InvalidMediaUrl,

    #[error("Invalid reference format. Must be valid JSON")]
    InvalidReferenceFormat {
        received: serde_json::Value,
        reason: String,
    },
}

impl ValidationError {
    /// Machine-readable code, for the errors that carry one.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            ValidationError::WalletInputRequired => Some("WALLET_INPUT_REQUIRED"),
            _ => None,
        }
    }

    /// Human-oriented hint, for the errors that carry one.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ValidationError::WalletInputRequired => Some("Please provide your NEAR wallet address"),
            _ => None,
        }
    }

    /// The inputs echoed back with the error, if any.
    pub fn received(&self) -> Option<&serde_json::Value> {
        match self {
            ValidationError::MissingRequiredFields { received, .. } => received.as_ref(),
            ValidationError::InvalidReferenceFormat { received, .. } => Some(received),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_required_carries_code() {
        let err = ValidationError::WalletInputRequired;
        assert_eq!(err.to_string(), "Wallet address required");
        assert_eq!(err.code(), Some("WALLET_INPUT_REQUIRED"));
        assert!(err.hint().is_some());
        assert!(err.received().is_none());
    }

    #[test]
    fn test_missing_fields_uses_message() {
        let err = ValidationError::MissingRequiredFields {
            message: MISSING_MINT_FIELDS,
            received: None,
        };
        assert_eq!(err.to_string(), MISSING_MINT_FIELDS);
        assert_eq!(err.code(), None);
    }
}
