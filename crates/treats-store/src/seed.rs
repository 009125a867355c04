//! Channel-data seed blob.
//!
//! Older deployments kept credentials in a JSON environment variable shaped
//! like `{"<channelId>": {"apiKey": "<key>"}}`. At startup the blob is parsed
//! and imported so those channels keep minting.

use serde::Deserialize;
use serde_json::{Map, Value};
use treats_core::{ApiKey, ChannelCredential, ChannelId};

use crate::error::{Result, StoreError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedEntry {
    #[serde(default)]
    api_key: Option<String>,
}

/// Parse a channel-data blob into credentials, sorted by channel id.
///
/// Entries without a non-empty `apiKey` are skipped with a warning. A blob
/// that is not a JSON object is rejected.
pub fn parse_channel_data(blob: &str) -> Result<Vec<ChannelCredential>> {
    let value: Value = serde_json::from_str(blob)?;
    let Value::Object(entries) = value else {
        return Err(StoreError::InvalidData(
            "channel data must be a JSON object keyed by channel id".into(),
        ));
    };

    let mut credentials = collect(entries);
    credentials.sort_by(|a, b| a.channel_id.cmp(&b.channel_id));
    Ok(credentials)
}

fn collect(entries: Map<String, Value>) -> Vec<ChannelCredential> {
    entries
        .into_iter()
        .filter_map(|(channel_id, entry)| {
            let api_key = serde_json::from_value::<SeedEntry>(entry)
                .ok()
                .and_then(|e| e.api_key)
                .and_then(ApiKey::new);

            match api_key {
                Some(api_key) => Some(ChannelCredential::new(ChannelId::new(channel_id), api_key)),
                None => {
                    tracing::warn!(channel_id = %channel_id, "skipping seed entry without apiKey");
                    None
                }
            }
        })
        .collect()
}
