//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;
use token_manager_sdk::{
    testing::{ScriptedWallet, StubLedger, WalletScript},
    SdkConfig, TokenClient, WalletSession,
};
use tracing_subscriber::EnvFilter;

/// Route SDK logs through the test harness; `RUST_LOG` selects the level
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One wallet, one in-memory ledger and a client over it
pub struct Harness {
    pub wallet: Arc<ScriptedWallet>,
    pub ledger: Arc<StubLedger>,
    pub client: TokenClient,
    pub session: WalletSession,
}

impl Harness {
    pub fn new(script: WalletScript, payer_lamports: u64) -> Self {
        Self::with_ledger(script, |ledger, _| ledger, payer_lamports)
    }

    /// Extra seeding on top of the funded payer
    pub fn with_ledger(
        script: WalletScript,
        seed: impl FnOnce(StubLedger, Pubkey) -> StubLedger,
        payer_lamports: u64,
    ) -> Self {
        init_tracing();
        let wallet = Arc::new(ScriptedWallet::new(script));
        let payer = wallet.pubkey();
        let ledger = Arc::new(seed(
            StubLedger::new().with_balance(payer, payer_lamports),
            payer,
        ));
        let client = TokenClient::new(ledger.clone(), SdkConfig::localnet())
            .expect("localnet config is valid");
        let session = WalletSession::new(wallet.clone());
        Self {
            wallet,
            ledger,
            client,
            session,
        }
    }

    pub fn payer(&self) -> Pubkey {
        self.wallet.pubkey()
    }
}
