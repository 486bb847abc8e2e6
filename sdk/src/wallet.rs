//! Wallet-signing provider and the session handle passed to every operation.
//!
//! A [`WalletSigner`] owns the payer's private key somewhere the SDK cannot
//! see (a browser extension, a hardware device, a keypair file). The SDK only
//! ever asks it for its public key and for a signature over a fully assembled
//! transaction. Signing may suspend for as long as the user takes to approve.

use std::sync::Arc;

use async_trait::async_trait;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use thiserror::Error;

use crate::core::messages;
use crate::error::{SdkError, SdkResult};

/// Errors from wallet signing operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// The user declined the signing prompt
    #[error("user declined: {0}")]
    Rejected(String),

    #[error("wallet is not connected")]
    Disconnected,

    /// The provider failed for reasons unrelated to user choice
    #[error("wallet provider error: {0}")]
    Provider(String),

    /// The returned transaction no longer matches what was submitted
    #[error("wallet altered the transaction message")]
    MessageAltered,

    /// The returned transaction lacks the session's signature
    #[error("wallet returned the transaction without its signature")]
    MissingSignature,
}

#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Connected identity, `None` when no session is active
    fn public_key(&self) -> Option<Pubkey>;

    /// Sign `transaction` as the fee payer and hand it back
    async fn sign_transaction(&self, transaction: Transaction) -> Result<Transaction, WalletError>;
}

/// Explicit wallet session handle
#[derive(Clone)]
pub struct WalletSession {
    signer: Arc<dyn WalletSigner>,
}

impl WalletSession {
    pub fn new(signer: Arc<dyn WalletSigner>) -> Self {
        Self { signer }
    }

    /// Session backed by a local keypair
    pub fn from_keypair(keypair: Keypair) -> Self {
        Self::new(Arc::new(KeypairWallet::new(keypair)))
    }

    pub fn signer(&self) -> &dyn WalletSigner {
        self.signer.as_ref()
    }

    /// The payer address, or a validation error when disconnected
    pub fn payer(&self) -> SdkResult<Pubkey> {
        self.signer
            .public_key()
            .ok_or_else(|| SdkError::Validation(messages::WALLET_NOT_CONNECTED.to_string()))
    }

    pub fn is_connected(&self) -> bool {
        self.signer.public_key().is_some()
    }
}

/// Wallet that signs with an in-process keypair and approves every request
pub struct KeypairWallet {
    keypair: Keypair,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }
}

#[async_trait]
impl WalletSigner for KeypairWallet {
    fn public_key(&self) -> Option<Pubkey> {
        Some(self.keypair.pubkey())
    }

    async fn sign_transaction(
        &self,
        mut transaction: Transaction,
    ) -> Result<Transaction, WalletError> {
        let blockhash = transaction.message.recent_blockhash;
        transaction
            .try_partial_sign(&[&self.keypair], blockhash)
            .map_err(|e| WalletError::Provider(e.to_string()))?;
        Ok(transaction)
    }
}
