//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use serde_json::{json, Value};
use treats::TreatMaker;
use treats_core::{ApiKey, ChannelCreationRequest, ChannelId, MintRequest, Reference};
use treats_receipts::memory::RecordingReceiptsApi;
use treats_store::{CredentialStore, MemoryStore};

/// Master key used by every fixture.
pub const MASTER_KEY: &str = "master-key";

/// A treat maker over a memory store and a recording receipts API.
pub struct TestFixture {
    pub maker: TreatMaker<MemoryStore, RecordingReceiptsApi>,
}

impl TestFixture {
    /// Create a fixture with no default account.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Create a fixture whose channel requests fall back to `account`.
    pub fn with_default_account(account: &str) -> Self {
        Self::build(Some(account))
    }

    fn build(account: Option<&str>) -> Self {
        let mut config = treats::TreatMakerConfig::new(master_key());
        if let Some(account) = account {
            config = config.with_default_account(account);
        }

        Self {
            maker: TreatMaker::new(
                Arc::new(MemoryStore::new()),
                Arc::new(RecordingReceiptsApi::new()),
                config,
            ),
        }
    }

    pub fn store(&self) -> &MemoryStore {
        self.maker.store()
    }

    pub fn receipts(&self) -> &RecordingReceiptsApi {
        self.maker.receipts()
    }

    /// Register a channel directly in the store.
    pub async fn add_channel(&self, channel_id: &str, api_key: &str) {
        let api_key = ApiKey::new(api_key).expect("fixture keys are non-empty");
        self.store()
            .put(&ChannelId::from(channel_id), &api_key)
            .await
            .unwrap_or_else(|e| panic!("storing {channel_id}: {e}"));
    }

    /// The stored key for a channel, unredacted.
    pub async fn stored_key(&self, channel_id: &str) -> Option<String> {
        self.store()
            .get(&ChannelId::from(channel_id))
            .await
            .unwrap_or_else(|e| panic!("reading {channel_id}: {e}"))
            .map(|key| key.expose().to_string())
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

pub fn master_key() -> ApiKey {
    ApiKey::new(MASTER_KEY).expect("master key is non-empty")
}

/// A channel creation body that passes validation.
pub fn channel_body() -> Value {
    json!({
        "title": "T",
        "description": "D",
        "mediaUrl": "https://x.com/i.png",
        "reference": {"k": "v"},
        "wallet": "alice",
    })
}

/// A channel creation request that passes validation.
pub fn channel_request() -> ChannelCreationRequest {
    ChannelCreationRequest {
        title: Some("T".into()),
        description: Some("D".into()),
        media_url: Some("https://x.com/i.png".into()),
        reference: Some(Reference::Structured(json!({"k": "v"}))),
        wallet: Some("alice".into()),
    }
}

/// A mint request naming a receiver.
pub fn mint_request(channel_id: &str, receiver_id: &str) -> MintRequest {
    MintRequest {
        channel_id: Some(channel_id.into()),
        receiver_id: Some(receiver_id.into()),
        wallet: None,
    }
}
