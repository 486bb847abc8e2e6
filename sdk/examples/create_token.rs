//! Create a token on devnet with a throwaway keypair wallet
//!
//! ```text
//! RUST_LOG=info cargo run --example create_token -- DemoCoin DEMO 6
//! ```

use anyhow::Result;
use solana_sdk::signature::{Keypair, Signer};
use token_manager_sdk::{CancellationToken, SdkConfig, TokenClient, WalletSession};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let name = args.next().unwrap_or_else(|| "DemoCoin".to_string());
    let symbol = args.next().unwrap_or_else(|| "DEMO".to_string());
    let decimals = args.next().unwrap_or_else(|| "6".to_string());

    let keypair = Keypair::new();
    println!("Wallet: {}", keypair.pubkey());
    let session = WalletSession::from_keypair(keypair);

    let client = TokenClient::from_config(SdkConfig::devnet())?;
    let cancel = CancellationToken::new();

    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let result = client
        .tokens
        .create_token_result(&session, &name, &symbol, &decimals, &cancel)
        .await;
    println!("{}", result.to_json()?);

    if let Some(mint) = result.mint_address {
        let balance = client
            .balances
            .check_balance(&mint, &session.payer()?.to_string())
            .await?;
        println!("{}", serde_json::to_string_pretty(&balance)?);
    }
    Ok(())
}
