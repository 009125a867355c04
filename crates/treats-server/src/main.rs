use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use treats::receipts::HttpReceiptsApi;
use treats::store::{parse_channel_data, MemoryStore, SqliteStore, StoreExt};
use treats::{CredentialStore, TreatMaker};
use treats_server::{plugin_manifest, router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env().context("loading configuration")?;

    match &config.database_path {
        Some(path) => {
            let store = SqliteStore::open(path)
                .with_context(|| format!("opening credential store at {}", path.display()))?;
            tracing::info!(path = %path.display(), "using SQLite credential store");
            serve(config, store).await
        }
        None => {
            tracing::warn!("no database path configured; channel credentials are kept in memory");
            serve(config, MemoryStore::new()).await
        }
    }
}

async fn serve<S: CredentialStore + 'static>(config: ServerConfig, store: S) -> anyhow::Result<()> {
    if let Some(blob) = &config.channel_data {
        let credentials = parse_channel_data(blob).context("parsing channel data")?;
        let imported = store.import(&credentials).await?;
        tracing::info!(imported, "seeded channel credentials");
    }

    let channels = store.channel_ids().await?;
    tracing::info!(count = channels.len(), ?channels, "credential store ready");

    let receipts = HttpReceiptsApi::new(&config.receipts_url, config.upstream_timeout)
        .context("building receipts API client")?;
    tracing::info!(
        url = receipts.base_url(),
        timeout_secs = config.upstream_timeout.as_secs(),
        "receipts API client ready"
    );

    let maker = TreatMaker::new(Arc::new(store), Arc::new(receipts), config.treat_maker_config());
    let state = AppState {
        maker,
        manifest: plugin_manifest(&config.public_url, config.account_id.as_deref()),
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "treat maker listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
