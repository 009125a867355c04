//! ReceiptsApi trait: the seam between the treat maker and the upstream service.
//!
//! The HTTP client talks to the real service. The in-memory implementation
//! records calls and replays scripted responses for tests.

use async_trait::async_trait;
use serde_json::Value;
use treats_core::{ApiKey, ChannelId};

use crate::error::Result;
use crate::messages::{CreateChannelBody, MintBody};

/// Calls against the ShardDog receipts API.
///
/// On success the upstream JSON body is returned unchanged.
#[async_trait]
pub trait ReceiptsApi: Send + Sync {
    /// Create a channel, authenticated with the master key.
    async fn create_channel(&self, api_key: &ApiKey, body: &CreateChannelBody) -> Result<Value>;

    /// Mint a treat on a channel, authenticated with that channel's key.
    async fn mint(&self, channel_id: &ChannelId, api_key: &ApiKey, body: &MintBody)
        -> Result<Value>;
}

/// In-memory receipts API for testing.
pub mod memory {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;
    use tokio::sync::Mutex;

    use super::*;
    use crate::error::{ReceiptsError, Rejection};

    /// Which upstream endpoint a call went to.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Endpoint {
        CreateChannel,
        Mint(ChannelId),
    }

    /// A call seen by [`RecordingReceiptsApi`].
    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedCall {
        pub endpoint: Endpoint,
        /// The `x-api-key` value, unredacted.
        pub api_key: String,
        pub body: Value,
    }

    /// A canned upstream outcome.
    #[derive(Debug, Clone)]
    pub enum Scripted {
        Success(Value),
        Reject { status: u16, body: String },
        Timeout,
    }

    impl Scripted {
        fn into_result(self) -> Result<Value> {
            match self {
                Scripted::Success(body) => Ok(body),
                Scripted::Reject { status, body } => {
                    Err(ReceiptsError::Rejected(Rejection::new(status, body)))
                }
                Scripted::Timeout => Err(ReceiptsError::Timeout),
            }
        }
    }

    /// Records every call and answers from a script.
    ///
    /// When the script is exhausted, channel creation issues
    /// `{"channelId": "channel-N", "apiKey": "key-N"}` and minting returns
    /// `{"txId": "tx-N"}`, numbering from 1.
    #[derive(Default)]
    pub struct RecordingReceiptsApi {
        calls: Mutex<Vec<RecordedCall>>,
        script: Mutex<VecDeque<Scripted>>,
        counter: AtomicUsize,
    }

    impl RecordingReceiptsApi {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a response for the next call.
        pub async fn push(&self, response: Scripted) {
            self.script.lock().await.push_back(response);
        }

        /// Queue a success response for the next call.
        pub async fn push_success(&self, body: Value) {
            self.push(Scripted::Success(body)).await;
        }

        /// Queue a rejection for the next call.
        pub async fn push_rejection(&self, status: u16, body: impl Into<String>) {
            self.push(Scripted::Reject {
                status,
                body: body.into(),
            })
            .await;
        }

        /// All calls so far, oldest first.
        pub async fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().await.clone()
        }

        async fn answer(
            &self,
            endpoint: Endpoint,
            api_key: &ApiKey,
            body: Value,
        ) -> Result<Value> {
            let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
            let default = match &endpoint {
                Endpoint::CreateChannel => {
                    json!({ "channelId": format!("channel-{n}"), "apiKey": format!("key-{n}") })
                }
                Endpoint::Mint(_) => json!({ "txId": format!("tx-{n}") }),
            };

            self.calls.lock().await.push(RecordedCall {
                endpoint,
                api_key: api_key.expose().to_string(),
                body,
            });

            self.script
                .lock()
                .await
                .pop_front()
                .unwrap_or(Scripted::Success(default))
                .into_result()
        }
    }

    #[async_trait]
    impl ReceiptsApi for RecordingReceiptsApi {
        async fn create_channel(
            &self,
            api_key: &ApiKey,
            body: &CreateChannelBody,
        ) -> Result<Value> {
            let body = serde_json::to_value(body)
                .map_err(|e| ReceiptsError::Decode(e.to_string()))?;
            self.answer(Endpoint::CreateChannel, api_key, body).await
        }

        async fn mint(
            &self,
            channel_id: &ChannelId,
            api_key: &ApiKey,
            body: &MintBody,
        ) -> Result<Value> {
            let body = serde_json::to_value(body)
                .map_err(|e| ReceiptsError::Decode(e.to_string()))?;
            self.answer(Endpoint::Mint(channel_id.clone()), api_key, body)
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::{Endpoint, RecordingReceiptsApi, Scripted};
    use super::*;
    use crate::error::ReceiptsError;
    use serde_json::json;
    use treats_core::WalletAddress;

    fn key(s: &str) -> ApiKey {
        ApiKey::new(s).unwrap()
    }

    fn channel_body() -> CreateChannelBody {
        CreateChannelBody {
            title: "T".into(),
            description: "D".into(),
            media: "https://x/y.png".into(),
            reference: "{}".into(),
            wallet: "alice.near".into(),
        }
    }

    #[tokio::test]
    async fn test_recording_defaults() {
        let api = RecordingReceiptsApi::new();

        let created = api.create_channel(&key("master"), &channel_body()).await.unwrap();
        assert_eq!(created, json!({"channelId": "channel-1", "apiKey": "key-1"}));

        let minted = api
            .mint(
                &ChannelId::from("channel-1"),
                &key("key-1"),
                &MintBody::new(&WalletAddress::for_mint("bob")),
            )
            .await
            .unwrap();
        assert_eq!(minted, json!({"txId": "tx-2"}));

        let calls = api.calls().await;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].endpoint, Endpoint::CreateChannel);
        assert_eq!(calls[0].api_key, "master");
        assert_eq!(calls[0].body["wallet"], "alice.near");
        assert_eq!(calls[1].endpoint, Endpoint::Mint(ChannelId::from("channel-1")));
        assert_eq!(calls[1].api_key, "key-1");
        assert_eq!(calls[1].body, json!({"receiverId": "bob.near"}));
    }

    #[tokio::test]
    async fn test_recording_script_order() {
        let api = RecordingReceiptsApi::new();
        api.push_rejection(409, r#"{"message":"exists"}"#).await;
        api.push(Scripted::Timeout).await;

        let first = api.create_channel(&key("m"), &channel_body()).await;
        match first {
            Err(ReceiptsError::Rejected(rejection)) => {
                assert_eq!(rejection.status, 409);
                assert_eq!(rejection.message_or("fallback"), "exists");
            }
            other => panic!("expected rejection, got {other:?}"),
        }

        let second = api.create_channel(&key("m"), &channel_body()).await;
        assert!(matches!(second, Err(ReceiptsError::Timeout)));

        let third = api.create_channel(&key("m"), &channel_body()).await;
        assert!(third.is_ok());
    }
}
