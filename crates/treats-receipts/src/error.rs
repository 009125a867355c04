//! Error types for upstream receipts API calls.

use serde_json::{json, Value};
use thiserror::Error;

/// A non-success response from the receipts API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// HTTP status returned by upstream.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl Rejection {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// The body as JSON, or `{"raw": <body>}` when it does not parse.
    pub fn details(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or_else(|_| json!({ "raw": self.body }))
    }

    /// The upstream `message` field, or `fallback` when there is none.
    pub fn message_or(&self, fallback: &str) -> String {
        serde_json::from_str::<Value>(&self.body)
            .ok()
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map_or_else(|| fallback.to_string(), str::to_string)
    }
}

/// Errors that can occur when calling the receipts API.
#[derive(Debug, Error)]
pub enum ReceiptsError {
    /// Upstream answered with a non-success status.
    #[error("upstream rejected request with status {}", .0.status)]
    Rejected(Rejection),

    /// The request did not complete within the configured timeout.
    #[error("upstream request timed out")]
    Timeout,

    /// Connection, TLS or protocol failure.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),

    /// A success response whose body is not what we expect.
    #[error("unexpected upstream response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ReceiptsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ReceiptsError::Timeout
        } else {
            ReceiptsError::Transport(err)
        }
    }
}

/// Result type for receipts API operations.
pub type Result<T> = std::result::Result<T, ReceiptsError>;
