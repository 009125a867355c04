//! Channel reference normalization.
//!
//! The receipts API stores a channel's `reference` as a JSON string. Callers
//! (usually an AI assistant) send it either as a structured JSON value or as a
//! string that should contain JSON. Both are reduced to one serialized form:
//!
//! - structured values are serialized directly;
//! - strings are parsed and re-serialized, which validates them;
//! - the literal `[object Object]` is replaced with [`DEFAULT_REFERENCE`].
//!
//! Object key order is preserved, so re-normalizing an already normalized
//! reference yields the same string.

use serde_json::Value;

use crate::error::ValidationError;

/// What a JavaScript client sends when it string-concatenates an object.
pub const OBJECT_ARTIFACT: &str = "[object Object]";

/// Substituted for [`OBJECT_ARTIFACT`].
pub const DEFAULT_REFERENCE: &str = r#"{"default":"reference"}"#;

/// An inbound reference value.
#[derive(Debug, Clone, PartialEq)]
pub enum Reference {
    /// A string that should contain JSON.
    Text(String),
    /// Any non-string JSON value (object, array, number, boolean).
    Structured(Value),
}

impl Reference {
    /// Interpret a JSON value from a request body.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => Reference::Text(s),
            other => Reference::Structured(other),
        }
    }

    /// The reference as a JSON value, for echoing it back in errors.
    pub fn to_value(&self) -> Value {
        match self {
            Reference::Text(s) => Value::String(s.clone()),
            Reference::Structured(v) => v.clone(),
        }
    }
}

/// Reduce a reference to its serialized JSON form.
pub fn normalize_reference(reference: &Reference) -> Result<String, ValidationError> {
    match reference {
        Reference::Structured(value) => Ok(value.to_string()),
        Reference::Text(text) if text == OBJECT_ARTIFACT => Ok(DEFAULT_REFERENCE.to_string()),
        Reference::Text(text) => serde_json::from_str::<Value>(text)
            .map(|parsed| parsed.to_string())
            .map_err(|e| ValidationError::InvalidReferenceFormat {
                received: Value::String(text.clone()),
                reason: e.to_string(),
            }),
    }
}
