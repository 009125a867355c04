//! # Treats Server
//!
//! HTTP boundary for the treat maker.
//!
//! | Route | Handler |
//! |-------|---------|
//! | `POST /tools/create-channel` | [`routes::create_channel`] |
//! | `POST /tools/mint-treat` | [`routes::mint_treat`] |
//! | `GET /plugin-manifest` | [`routes::plugin_manifest`] |
//! | `GET /health` | [`routes::health`] |
//!
//! Errors are rendered by [`ApiError`]; configuration comes from the
//! environment through [`ServerConfig`].

pub mod config;
pub mod manifest;
pub mod response;
pub mod routes;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use treats::{CredentialStore, ReceiptsApi};

pub use config::{ConfigError, ServerConfig};
pub use manifest::{plugin_manifest, CREATE_CHANNEL_PATH, MINT_TREAT_PATH};
pub use response::ApiError;
pub use routes::AppState;

/// Build the application router.
pub fn router<S, R>(state: AppState<S, R>) -> Router
where
    S: CredentialStore + 'static,
    R: ReceiptsApi + 'static,
{
    Router::new()
        .route("/health", get(routes::health))
        .route("/plugin-manifest", get(routes::plugin_manifest::<S, R>))
        .route(CREATE_CHANNEL_PATH, post(routes::create_channel::<S, R>))
        .route(MINT_TREAT_PATH, post(routes::mint_treat::<S, R>))
        .with_state(Arc::new(state))
}
