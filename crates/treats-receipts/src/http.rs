//! reqwest-backed client for the receipts API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use treats_core::{ApiKey, ChannelId};

use crate::api::ReceiptsApi;
use crate::error::{ReceiptsError, Rejection, Result};
use crate::messages::{CreateChannelBody, MintBody};

/// Production receipts API host.
pub const DEFAULT_BASE_URL: &str = "https://sharddog.ai";

/// Upstream request timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the master or channel key.
pub const API_KEY_HEADER: &str = "x-api-key";

const CREATE_CHANNEL_PATH: &str = "/api/receipts/create-channel";
const MINT_PATH: &str = "/api/receipts/mint";

/// HTTP client for the receipts API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpReceiptsApi {
    base_url: String,
    client: Client,
}

impl HttpReceiptsApi {
    /// Build a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn create_channel_url(&self) -> String {
        format!("{}{}", self.base_url, CREATE_CHANNEL_PATH)
    }

    fn mint_url(&self, channel_id: &ChannelId) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            MINT_PATH,
            urlencoding::encode(channel_id.as_str())
        )
    }

    async fn post_json<B: Serialize + Sync>(
        &self,
        url: &str,
        api_key: &ApiKey,
        body: &B,
    ) -> Result<Value> {
        let resp = self
            .client
            .post(url)
            .header(API_KEY_HEADER, api_key.expose())
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            tracing::debug!(url, status = status.as_u16(), "receipts API rejected request");
            return Err(ReceiptsError::Rejected(Rejection::new(status.as_u16(), text)));
        }

        serde_json::from_str(&text).map_err(|e| ReceiptsError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ReceiptsApi for HttpReceiptsApi {
    async fn create_channel(&self, api_key: &ApiKey, body: &CreateChannelBody) -> Result<Value> {
        self.post_json(&self.create_channel_url(), api_key, body)
            .await
    }

    async fn mint(
        &self,
        channel_id: &ChannelId,
        api_key: &ApiKey,
        body: &MintBody,
    ) -> Result<Value> {
        self.post_json(&self.mint_url(channel_id), api_key, body)
            .await
    }
}
