//! Treat maker configuration.

use treats_core::ApiKey;

/// Settings loaded once at startup.
#[derive(Debug, Clone)]
pub struct TreatMakerConfig {
    /// Key for channel creation. Never used for minting.
    pub master_api_key: ApiKey,
    /// Wallet used when a channel request names none.
    pub default_account: Option<String>,
}

impl TreatMakerConfig {
    pub fn new(master_api_key: ApiKey) -> Self {
        Self {
            master_api_key,
            default_account: None,
        }
    }

    /// Set the fallback wallet. Empty values are ignored.
    pub fn with_default_account(mut self, account: impl Into<String>) -> Self {
        let account = account.into();
        self.default_account = (!account.is_empty()).then_some(account);
        self
    }
}
