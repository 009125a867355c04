//! Server configuration from the environment.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use treats::core::ApiKey;
use treats::receipts::DEFAULT_BASE_URL;
use treats::TreatMakerConfig;

pub const MASTER_API_KEY_VAR: &str = "SHARDDOG_MASTER_API_KEY";
pub const ACCOUNT_VAR: &str = "BITTE_KEY";
pub const PLUGIN_CONFIG_VAR: &str = "BITTE_CONFIG";
pub const CHANNEL_DATA_VAR: &str = "SHARDDOG_CHANNEL_DATA";
pub const API_URL_VAR: &str = "SHARDDOG_API_URL";
pub const DATABASE_PATH_VAR: &str = "TREATS_DATABASE_PATH";
pub const BIND_ADDR_VAR: &str = "TREATS_BIND_ADDR";
pub const UPSTREAM_TIMEOUT_VAR: &str = "TREATS_UPSTREAM_TIMEOUT_SECS";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Configuration errors, reported once at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Everything the service needs, loaded once at startup.
#[derive(Clone)]
pub struct ServerConfig {
    pub master_api_key: ApiKey,
    /// Assistant account: the manifest `account-id` and the fallback wallet.
    pub account_id: Option<String>,
    /// Public URL advertised in the manifest.
    pub public_url: String,
    /// Legacy channel-data blob imported at startup.
    pub channel_data: Option<String>,
    pub receipts_url: String,
    /// SQLite file; `None` keeps credentials in memory.
    pub database_path: Option<PathBuf>,
    pub bind_addr: SocketAddr,
    pub upstream_timeout: Duration,
}

// The channel-data blob carries per-channel API keys.
impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("master_api_key", &self.master_api_key)
            .field("account_id", &self.account_id)
            .field("public_url", &self.public_url)
            .field(
                "channel_data",
                &self
                    .channel_data
                    .as_ref()
                    .map(|blob| format!("<redacted {} bytes>", blob.len())),
            )
            .field("receipts_url", &self.receipts_url)
            .field("database_path", &self.database_path)
            .field("bind_addr", &self.bind_addr)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}

impl ServerConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to resolve variables. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let master_api_key = var(MASTER_API_KEY_VAR)
            .and_then(ApiKey::new)
            .ok_or(ConfigError::Missing(MASTER_API_KEY_VAR))?;

        let bind_addr = var(BIND_ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: BIND_ADDR_VAR,
                reason: e.to_string(),
            })?;

        let upstream_timeout = match var(UPSTREAM_TIMEOUT_VAR) {
            Some(secs) => secs
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| ConfigError::Invalid {
                    var: UPSTREAM_TIMEOUT_VAR,
                    reason: format!("expected a positive number of seconds, got {secs:?}"),
                })?,
            None => Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        };

        let account_id = json_field(ACCOUNT_VAR, var(ACCOUNT_VAR), "accountId")?;
        if account_id.is_none() {
            tracing::warn!("{ACCOUNT_VAR} has no accountId; manifest will not name an account");
        }

        let public_url = json_field(PLUGIN_CONFIG_VAR, var(PLUGIN_CONFIG_VAR), "url")?
            .unwrap_or_else(|| format!("http://localhost:{}", bind_addr.port()));

        Ok(Self {
            master_api_key,
            account_id,
            public_url,
            channel_data: var(CHANNEL_DATA_VAR),
            receipts_url: var(API_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            database_path: var(DATABASE_PATH_VAR).map(PathBuf::from),
            bind_addr,
            upstream_timeout,
        })
    }

    /// Settings for the treat maker.
    pub fn treat_maker_config(&self) -> TreatMakerConfig {
        let config = TreatMakerConfig::new(self.master_api_key.clone());
        match &self.account_id {
            Some(account) => config.with_default_account(account.as_str()),
            None => config,
        }
    }
}

/// Read a string field out of a JSON blob variable.
fn json_field(
    var: &'static str,
    blob: Option<String>,
    field: &str,
) -> Result<Option<String>, ConfigError> {
    let Some(blob) = blob else {
        return Ok(None);
    };

    let value: Value = serde_json::from_str(&blob).map_err(|e| ConfigError::Invalid {
        var,
        reason: e.to_string(),
    })?;

    Ok(value
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string))
}
