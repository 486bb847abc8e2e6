//! Configuration loading and client construction

mod common;

use std::fs;

use anyhow::Result;
use token_manager_sdk::{SdkConfig, SdkError, TokenClient};

#[test]
fn loads_from_file_with_defaults_filled_in() -> Result<()> {
    let path = std::env::temp_dir().join(format!("token-manager-sdk-{}.toml", std::process::id()));
    fs::write(
        &path,
        r#"
rpc_url = "http://localhost:8899"
min_payer_balance_lamports = 250000000
poll_interval_ms = 100
"#,
    )?;

    let loaded = SdkConfig::from_file(&path);
    fs::remove_file(&path)?;
    let config = loaded?;

    assert_eq!(config.rpc_url, "http://localhost:8899");
    assert_eq!(config.min_payer_balance_lamports, 250_000_000);
    assert_eq!(config.poll_interval_ms, 100);
    assert_eq!(config.airdrop_lamports, 1_000_000_000);
    assert_eq!(config.commitment, "confirmed");
    Ok(())
}

#[test]
fn missing_file_is_a_config_error() {
    let err = SdkConfig::from_file("/nonexistent/token-manager.toml").unwrap_err();
    assert!(matches!(err, SdkError::Config(_)));
}

#[test]
fn poll_interval_out_of_range_is_refused() {
    let err = SdkConfig::from_toml_str("poll_interval_ms = 10").unwrap_err();
    assert!(matches!(err, SdkError::Config(_)));
}

#[test]
fn mainnet_preset_never_requests_grants() {
    let config = SdkConfig::mainnet();
    assert_eq!(config.min_payer_balance_lamports, 0);
    assert!(config.check().is_ok());
}

#[tokio::test]
async fn rpc_client_builds_without_contacting_the_cluster() -> Result<()> {
    common::init_tracing();
    let client = TokenClient::from_config(SdkConfig::localnet())?;
    assert_eq!(client.config().rpc_url, "http://localhost:8899");
    Ok(())
}
