use std::{path::Path, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use solana_sdk::commitment_config::CommitmentConfig;
use validator::Validate;

use crate::core::*;
use crate::error::{SdkError, SdkResult};

/// SDK configuration for talking to a cluster and funding the payer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SdkConfig {
    /// RPC endpoint URL
    #[validate(url)]
    pub rpc_url: String,

    /// WebSocket URL for subscriptions
    pub ws_url: Option<String>,

    /// Commitment level confirmations are awaited at
    pub commitment: String,

    /// Payer balance below which a funding grant is requested
    pub min_payer_balance_lamports: u64,

    /// Lamports requested per funding grant
    #[validate(range(min = 1))]
    pub airdrop_lamports: u64,

    /// How long to poll for a confirmation before giving up
    #[validate(range(min = 1, max = 600))]
    pub confirm_timeout_secs: u64,

    /// Delay between signature status polls
    #[validate(range(min = 50, max = 10000))]
    pub poll_interval_ms: u64,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self::devnet()
    }
}

impl SdkConfig {
    pub fn localnet() -> Self {
        Self {
            rpc_url: LOCALNET_RPC_URL.to_string(),
            ws_url: Some(LOCALNET_WS_URL.to_string()),
            ..Self::devnet()
        }
    }

    pub fn devnet() -> Self {
        Self {
            rpc_url: DEVNET_RPC_URL.to_string(),
            ws_url: Some(DEVNET_WS_URL.to_string()),
            commitment: DEFAULT_COMMITMENT.to_string(),
            min_payer_balance_lamports: DEFAULT_MIN_PAYER_BALANCE,
            airdrop_lamports: DEFAULT_AIRDROP_LAMPORTS,
            confirm_timeout_secs: DEFAULT_CONFIRM_TIMEOUT_SECS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    /// Mainnet has no faucet, so the balance guard is disabled.
    pub fn mainnet() -> Self {
        Self {
            rpc_url: MAINNET_RPC_URL.to_string(),
            ws_url: Some(MAINNET_WS_URL.to_string()),
            min_payer_balance_lamports: 0,
            ..Self::devnet()
        }
    }

    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = url.into();
        self
    }

    pub fn with_commitment(mut self, commitment: impl Into<String>) -> Self {
        self.commitment = commitment.into();
        self
    }

    pub fn with_funding(mut self, min_payer_balance_lamports: u64, airdrop_lamports: u64) -> Self {
        self.min_payer_balance_lamports = min_payer_balance_lamports;
        self.airdrop_lamports = airdrop_lamports;
        self
    }

    /// Parse a TOML document; missing keys fall back to devnet defaults
    pub fn from_toml_str(content: &str) -> SdkResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SdkError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Validate field ranges and the commitment name
    pub fn check(&self) -> SdkResult<()> {
        Validate::validate(self)?;
        self.commitment_config()?;
        Ok(())
    }

    pub fn commitment_config(&self) -> SdkResult<CommitmentConfig> {
        CommitmentConfig::from_str(&self.commitment)
            .map_err(|_| SdkError::Config(format!("unknown commitment level: {}", self.commitment)))
    }

    pub fn confirm_timeout(&self) -> Duration {
        Duration::from_secs(self.confirm_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn devnet_defaults_match_funding_policy() {
        let config = SdkConfig::default();
        assert_eq!(config.rpc_url, DEVNET_RPC_URL);
        assert_eq!(config.min_payer_balance_lamports, 500_000_000);
        assert_eq!(config.airdrop_lamports, 1_000_000_000);
        assert!(config.check().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = SdkConfig::from_toml_str(
            r#"
rpc_url = "http://127.0.0.1:8899"
commitment = "finalized"
confirm_timeout_secs = 90
"#,
        )
        .unwrap();

        assert_eq!(config.rpc_url, "http://127.0.0.1:8899");
        assert_eq!(config.confirm_timeout(), Duration::from_secs(90));
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
        assert_eq!(config.commitment_config().unwrap(), CommitmentConfig::finalized());
    }

    #[test]
    fn rejects_bad_commitment() {
        let config = SdkConfig::devnet().with_commitment("eventually");
        assert!(matches!(config.check(), Err(SdkError::Config(_))));
    }

    #[test]
    fn rejects_out_of_range_timeout() {
        let err = SdkConfig::from_toml_str("confirm_timeout_secs = 0").unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
    }

    #[test]
    fn rejects_malformed_url() {
        let config = SdkConfig::devnet().with_rpc_url("not a url");
        assert!(config.check().is_err());
    }
}
