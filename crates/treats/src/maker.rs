//! The treat maker: channel creation and treat minting.
//!
//! Both operations validate their input, call the receipts API and return the
//! upstream body unchanged. Channel creation records the issued key so later
//! mints on that channel can be authorized.

use std::sync::Arc;

use serde_json::Value;
use treats_core::{
    prepare_channel, prepare_mint, ApiKey, ChannelCreationRequest, ChannelId, MintRequest,
};
use treats_receipts::{issued_credential, CreateChannelBody, MintBody, ReceiptsApi, ReceiptsError};
use treats_store::CredentialStore;

use crate::config::TreatMakerConfig;
use crate::error::{Result, TreatError};

/// Reported when a channel rejection carries no upstream message.
pub const CHANNEL_CREATION_FAILED: &str = "Channel creation failed";

/// Reported when a mint rejection carries no upstream message.
pub const MINTING_FAILED: &str = "Minting failed";

/// Reported when the receipts API does not answer in time.
pub const UPSTREAM_TIMED_OUT: &str = "Upstream request timed out";

/// Status reported for an upstream timeout.
pub const GATEWAY_TIMEOUT: u16 = 504;

/// Creates treat channels and mints treats through the receipts API.
pub struct TreatMaker<S: CredentialStore, R: ReceiptsApi> {
    store: Arc<S>,
    receipts: Arc<R>,
    config: TreatMakerConfig,
}

impl<S: CredentialStore, R: ReceiptsApi> TreatMaker<S, R> {
    pub fn new(store: Arc<S>, receipts: Arc<R>, config: TreatMakerConfig) -> Self {
        Self {
            store,
            receipts,
            config,
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the receipts API reference.
    pub fn receipts(&self) -> &R {
        &self.receipts
    }

    pub fn config(&self) -> &TreatMakerConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Channel Creator
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a treat channel.
    ///
    /// On success the issued `channelId -> apiKey` pair is stored and the
    /// upstream body is returned as is.
    pub async fn create_channel(&self, request: &ChannelCreationRequest) -> Result<Value> {
        let draft = prepare_channel(request, self.config.default_account.as_deref())?;
        tracing::debug!(wallet = %draft.wallet, title = %draft.title, "creating channel");

        let body = CreateChannelBody::from(draft);
        let response = self
            .receipts
            .create_channel(&self.config.master_api_key, &body)
            .await
            .map_err(|e| upstream_error(e, CHANNEL_CREATION_FAILED, false))?;

        let credential = issued_credential(&response).map_err(|e| {
            tracing::error!(error = %e, "channel created upstream but response is unusable");
            TreatError::Internal(e.to_string())
        })?;

        self.store
            .put(&credential.channel_id, &credential.api_key)
            .await?;

        tracing::info!(
            channel_id = %credential.channel_id,
            api_key = %credential.api_key.fingerprint(),
            wallet = %body.wallet,
            "channel created"
        );

        Ok(response)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Treat Minter
    // ─────────────────────────────────────────────────────────────────────────

    /// Mint a treat on a channel created earlier.
    ///
    /// The upstream call is authorized with the channel's own key.
    pub async fn mint_treat(&self, request: &MintRequest) -> Result<Value> {
        let target = prepare_mint(request)?;
        let api_key = self.channel_key(&target.channel_id).await?;
        let receiver = target.receiver_wallet();

        tracing::debug!(
            channel_id = %target.channel_id,
            receiver = %receiver,
            api_key = %api_key.fingerprint(),
            "minting treat"
        );

        let response = self
            .receipts
            .mint(&target.channel_id, &api_key, &MintBody::new(&receiver))
            .await
            .map_err(|e| upstream_error(e, MINTING_FAILED, true))?;

        tracing::info!(channel_id = %target.channel_id, receiver = %receiver, "treat minted");

        Ok(response)
    }

    /// Look up the key for a channel.
    ///
    /// An empty store means no channel configuration exists at all, which is
    /// reported separately from an unknown id.
    async fn channel_key(&self, channel_id: &ChannelId) -> Result<ApiKey> {
        if let Some(api_key) = self.store.get(channel_id).await? {
            return Ok(api_key);
        }

        if self.store.is_empty().await? {
            tracing::warn!(channel_id = %channel_id, "mint requested but no channels are configured");
            Err(TreatError::ChannelConfigurationNotFound)
        } else {
            tracing::warn!(channel_id = %channel_id, "mint requested for unknown channel");
            Err(TreatError::InvalidChannelId)
        }
    }
}

impl<S: CredentialStore, R: ReceiptsApi> Clone for TreatMaker<S, R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            receipts: Arc::clone(&self.receipts),
            config: self.config.clone(),
        }
    }
}

/// Map a receipts API failure to a treat maker error.
///
/// Rejections keep the upstream status and message (or `fallback`); the
/// upstream body is attached when `with_details` is set.
fn upstream_error(err: ReceiptsError, fallback: &str, with_details: bool) -> TreatError {
    match err {
        ReceiptsError::Rejected(rejection) => {
            let message = rejection.message_or(fallback);
            tracing::warn!(status = rejection.status, message = %message, "receipts API rejected request");
            TreatError::Upstream {
                status: rejection.status,
                message,
                details: with_details.then(|| rejection.details()),
            }
        }
        ReceiptsError::Timeout => {
            tracing::warn!("receipts API timed out");
            TreatError::Upstream {
                status: GATEWAY_TIMEOUT,
                message: UPSTREAM_TIMED_OUT.to_string(),
                details: None,
            }
        }
        other => {
            tracing::error!(error = %other, "receipts API call failed");
            TreatError::Internal(other.to_string())
        }
    }
}
