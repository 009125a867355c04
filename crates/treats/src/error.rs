//! Error types for the treat maker.

use serde_json::Value;
use thiserror::Error;
use treats_core::ValidationError;
use treats_store::StoreError;

/// Errors that can occur while creating channels or minting treats.
#[derive(Debug, Error)]
pub enum TreatError {
    /// Input rejected before any upstream call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The credential store holds no channels at all.
    #[error("Channel configuration not found")]
    ChannelConfigurationNotFound,

    /// The channel was never created through this service.
    #[error("Invalid channel ID")]
    InvalidChannelId,

    /// The receipts API failed the request.
    #[error("{message}")]
    Upstream {
        status: u16,
        message: String,
        /// Upstream error body, reported for mint failures only.
        details: Option<Value>,
    },

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Anything else: transport failures, malformed bodies.
    #[error("{0}")]
    Internal(String),
}

impl TreatError {
    /// HTTP status for this error.
    pub fn status(&self) -> u16 {
        match self {
            TreatError::Validation(_)
            | TreatError::ChannelConfigurationNotFound
            | TreatError::InvalidChannelId => 400,
            TreatError::Upstream { status, .. } => *status,
            TreatError::Store(_) | TreatError::Internal(_) => 500,
        }
    }
}

/// Result type for treat maker operations.
pub type Result<T> = std::result::Result<T, TreatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(TreatError::from(ValidationError::InvalidMediaUrl).status(), 400);
        assert_eq!(TreatError::ChannelConfigurationNotFound.status(), 400);
        assert_eq!(TreatError::InvalidChannelId.status(), 400);
        assert_eq!(
            TreatError::Upstream {
                status: 409,
                message: "exists".into(),
                details: None,
            }
            .status(),
            409
        );
        assert_eq!(TreatError::Internal("boom".into()).status(), 500);
        assert_eq!(
            TreatError::Store(StoreError::InvalidData("x".into())).status(),
            500
        );
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err = TreatError::from(ValidationError::InvalidMediaUrl);
        assert_eq!(err.to_string(), "Media URL must start with http/https");
    }
}
