//! Route handlers.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use bytes::Bytes;
use serde_json::Value;
use treats::{
    ChannelCreationRequest, CredentialStore, MintRequest, ReceiptsApi, TreatError, TreatMaker,
};

use crate::response::ApiError;

/// Shared state for all routes.
pub struct AppState<S: CredentialStore, R: ReceiptsApi> {
    pub maker: TreatMaker<S, R>,
    /// Rendered once at startup.
    pub manifest: Value,
}

type SharedState<S, R> = State<Arc<AppState<S, R>>>;

/// `POST /tools/create-channel`
///
/// Arguments may come in the JSON body, the query string or both. A body
/// that is not JSON is treated as empty.
pub async fn create_channel<S, R>(
    State(state): SharedState<S, R>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError>
where
    S: CredentialStore,
    R: ReceiptsApi,
{
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let request = ChannelCreationRequest::from_sources(&body, &query);

    Ok(Json(state.maker.create_channel(&request).await?))
}

/// `POST /tools/mint-treat`
pub async fn mint_treat<S, R>(
    State(state): SharedState<S, R>,
    body: Bytes,
) -> Result<Json<Value>, ApiError>
where
    S: CredentialStore,
    R: ReceiptsApi,
{
    let request = MintRequest::from_json(&body)
        .map_err(|e| TreatError::Internal(format!("invalid mint request body: {e}")))?;

    Ok(Json(state.maker.mint_treat(&request).await?))
}

/// `GET /plugin-manifest`
pub async fn plugin_manifest<S, R>(State(state): SharedState<S, R>) -> Json<Value>
where
    S: CredentialStore,
    R: ReceiptsApi,
{
    Json(state.manifest.clone())
}

/// `GET /health`
pub async fn health() -> &'static str {
    "OK"
}
