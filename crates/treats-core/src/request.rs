//! Raw tool-call inputs, before validation.

use std::collections::HashMap;

use serde::de;
use serde_json::{json, Value};

use crate::reference::Reference;

/// Wire names of the channel creation fields.
pub mod fields {
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const MEDIA_URL: &str = "mediaUrl";
    pub const REFERENCE: &str = "reference";
    pub const WALLET: &str = "wallet";
}

/// Channel creation input as received from the caller.
///
/// Every field is optional here; [`crate::prepare_channel`] decides what is
/// required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelCreationRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub media_url: Option<String>,
    pub reference: Option<Reference>,
    pub wallet: Option<String>,
}

impl ChannelCreationRequest {
    /// Merge a JSON body with query string parameters.
    ///
    /// Tool-calling clients are inconsistent about where they put arguments,
    /// so both are accepted. For each field the body value wins when it is
    /// truthy (not null, `false`, `0` or `""`); otherwise a non-empty query
    /// value is used. A body that is not a JSON object contributes nothing.
    pub fn from_sources(body: &Value, query: &HashMap<String, String>) -> Self {
        let from_query = |name: &str| query.get(name).filter(|v| !v.is_empty()).cloned();
        let text = |name: &str| body_value(body, name).map(value_text).or_else(|| from_query(name));

        Self {
            title: text(fields::TITLE),
            description: text(fields::DESCRIPTION),
            media_url: text(fields::MEDIA_URL),
            reference: body_value(body, fields::REFERENCE)
                .cloned()
                .map(Reference::from_value)
                .or_else(|| from_query(fields::REFERENCE).map(Reference::Text)),
            wallet: text(fields::WALLET),
        }
    }

    /// The content fields as the caller sent them, echoed back on errors.
    pub fn received(&self) -> Value {
        json!({
            "title": self.title,
            "description": self.description,
            "mediaUrl": self.media_url,
            "reference": self.reference.as_ref().map(Reference::to_value),
        })
    }
}

/// Mint input as received from the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MintRequest {
    pub channel_id: Option<String>,
    pub receiver_id: Option<String>,
    pub wallet: Option<String>,
}

impl MintRequest {
    /// Parse a JSON request body.
    ///
    /// A body that is valid JSON but not an object carries no fields. Falsy
    /// field values count as absent and numbers use their decimal text. The
    /// body must be JSON and not `null`, and fields must not be `true`, arrays
    /// or objects.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let body: Value = serde_json::from_slice(body)?;
        let fields = match &body {
            Value::Object(fields) => fields,
            Value::Null => return Err(de::Error::custom("mint request body is null")),
            _ => return Ok(Self::default()),
        };

        let field = |name: &str| -> Result<Option<String>, serde_json::Error> {
            match fields.get(name).filter(|v| is_truthy(v)) {
                None => Ok(None),
                Some(Value::String(s)) => Ok(Some(s.clone())),
                Some(Value::Number(n)) => Ok(Some(n.to_string())),
                Some(other) => Err(de::Error::custom(format!(
                    "unsupported value for {name}: {other}"
                ))),
            }
        };

        Ok(Self {
            channel_id: field(mint_fields::CHANNEL_ID)?,
            receiver_id: field(mint_fields::RECEIVER_ID)?,
            wallet: field(mint_fields::WALLET)?,
        })
    }
}

/// Wire names of the mint fields.
pub mod mint_fields {
    pub const CHANNEL_ID: &str = "channelId";
    pub const RECEIVER_ID: &str = "receiverId";
    pub const WALLET: &str = "wallet";
}

/// A body field, if present and truthy.
fn body_value<'a>(body: &'a Value, name: &str) -> Option<&'a Value> {
    body.as_object()?.get(name).filter(|v| is_truthy(v))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text form of a body value. Non-string values use their JSON rendering.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
