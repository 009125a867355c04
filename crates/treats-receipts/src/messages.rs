//! Wire types for the receipts API.

use serde::Serialize;
use serde_json::Value;
use treats_core::{ApiKey, ChannelCredential, ChannelDraft, ChannelId, WalletAddress};

use crate::error::{ReceiptsError, Result};

/// Body of `POST /api/receipts/create-channel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateChannelBody {
    pub title: String,
    pub description: String,
    /// Media URL.
    pub media: String,
    /// Serialized JSON reference.
    pub reference: String,
    pub wallet: String,
}

impl From<ChannelDraft> for CreateChannelBody {
    fn from(draft: ChannelDraft) -> Self {
        Self {
            title: draft.title,
            description: draft.description,
            media: draft.media_url,
            reference: draft.reference,
            wallet: draft.wallet.into_inner(),
        }
    }
}

/// Body of `POST /api/receipts/mint/<channelId>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintBody {
    pub receiver_id: String,
}

impl MintBody {
    pub fn new(receiver: &WalletAddress) -> Self {
        Self {
            receiver_id: receiver.as_str().to_string(),
        }
    }
}

/// Extract the credential issued by a successful channel creation.
///
/// Both `channelId` and `apiKey` must be non-empty strings.
pub fn issued_credential(body: &Value) -> Result<ChannelCredential> {
    let field = |name: &str| {
        body.get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ReceiptsError::Decode(format!("create-channel response missing {name}")))
    };

    let channel_id = ChannelId::new(field("channelId")?);
    let api_key = ApiKey::new(field("apiKey")?)
        .ok_or_else(|| ReceiptsError::Decode("create-channel response has empty apiKey".into()))?;

    Ok(ChannelCredential::new(channel_id, api_key))
}
