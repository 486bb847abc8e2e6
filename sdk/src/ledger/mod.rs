//! Ledger connection port
//!
//! Everything the SDK needs from a cluster goes through [`LedgerConnection`].
//! [`RpcLedger`] talks JSON-RPC; `testing::StubLedger` runs in memory.

pub mod rpc;

use async_trait::async_trait;
use solana_sdk::{
    account::Account,
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::TransactionError,
};
use spl_token::{
    solana_program::program_pack::Pack,
    state::{Account as TokenAccount, Mint},
};

use crate::error::{SdkError, SdkResult};

pub use rpc::RpcLedger;

/// Outcome of a signature status lookup
pub type SignatureStatus = Option<Result<(), TransactionError>>;

#[async_trait]
pub trait LedgerConnection: Send + Sync {
    /// Spendable lamports owned by `address`
    async fn get_balance(&self, address: &Pubkey) -> SdkResult<u64>;

    /// Fresh blockhash; short validity window, fetch per transaction
    async fn get_latest_blockhash(&self) -> SdkResult<Hash>;

    /// Ask the faucet to credit `address`; returns the grant's signature
    async fn request_airdrop(&self, address: &Pubkey, lamports: u64) -> SdkResult<Signature>;

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> SdkResult<u64>;

    /// Submit a bincode-serialized signed transaction
    async fn send_transaction(&self, wire_transaction: &[u8]) -> SdkResult<Signature>;

    /// `None` while the signature is not yet visible at `commitment`
    async fn get_signature_status(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> SdkResult<SignatureStatus>;

    async fn get_account(&self, address: &Pubkey) -> SdkResult<Option<Account>>;
}

/// Read and unpack a mint account
pub async fn fetch_mint(ledger: &dyn LedgerConnection, mint: &Pubkey) -> SdkResult<Mint> {
    let account = ledger
        .get_account(mint)
        .await?
        .ok_or_else(|| SdkError::AccountNotFound(format!("Mint {}", mint)))?;

    if account.owner != spl_token::id() {
        return Err(SdkError::AccountNotFound(format!(
            "Mint {}: owned by {}, not the token program",
            mint, account.owner
        )));
    }

    Mint::unpack(&account.data)
        .map_err(|e| SdkError::AccountNotFound(format!("Mint {}: {}", mint, e)))
}

/// Read and unpack a token account; `None` if it does not exist yet
pub async fn fetch_token_account(
    ledger: &dyn LedgerConnection,
    address: &Pubkey,
) -> SdkResult<Option<TokenAccount>> {
    let Some(account) = ledger.get_account(address).await? else {
        return Ok(None);
    };

    if account.owner != spl_token::id() {
        return Err(SdkError::AccountNotFound(format!(
            "Token account {}: owned by {}, not the token program",
            address, account.owner
        )));
    }

    TokenAccount::unpack(&account.data)
        .map(Some)
        .map_err(|e| SdkError::Serialization(format!("Token account {}: {}", address, e)))
}
