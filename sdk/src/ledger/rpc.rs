use std::sync::Arc;

use async_trait::async_trait;
use solana_client::{nonblocking::rpc_client::RpcClient, rpc_config::RpcSendTransactionConfig};
use solana_sdk::{
    account::Account,
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::Transaction,
};
use tracing::debug;

use super::{LedgerConnection, SignatureStatus};
use crate::config::SdkConfig;
use crate::error::{SdkError, SdkResult};

/// JSON-RPC backed ledger connection
pub struct RpcLedger {
    rpc: Arc<RpcClient>,
    commitment: CommitmentConfig,
}

impl RpcLedger {
    pub fn new(rpc: Arc<RpcClient>) -> Self {
        let commitment = rpc.commitment();
        Self { rpc, commitment }
    }

    pub fn from_config(config: &SdkConfig) -> SdkResult<Self> {
        config.check()?;
        let commitment = config.commitment_config()?;
        let rpc = RpcClient::new_with_commitment(config.rpc_url.clone(), commitment);
        Ok(Self {
            rpc: Arc::new(rpc),
            commitment,
        })
    }

    /// Get the RPC client
    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    /// Get the RPC endpoint URL
    pub fn rpc_url(&self) -> String {
        self.rpc.url()
    }
}

#[async_trait]
impl LedgerConnection for RpcLedger {
    async fn get_balance(&self, address: &Pubkey) -> SdkResult<u64> {
        let response = self
            .rpc
            .get_balance_with_commitment(address, self.commitment)
            .await?;
        Ok(response.value)
    }

    async fn get_latest_blockhash(&self) -> SdkResult<Hash> {
        Ok(self.rpc.get_latest_blockhash().await?)
    }

    async fn request_airdrop(&self, address: &Pubkey, lamports: u64) -> SdkResult<Signature> {
        debug!("RPC requestAirdrop: {} lamports to {}", lamports, address);
        Ok(self.rpc.request_airdrop(address, lamports).await?)
    }

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> SdkResult<u64> {
        Ok(self
            .rpc
            .get_minimum_balance_for_rent_exemption(data_len)
            .await?)
    }

    async fn send_transaction(&self, wire_transaction: &[u8]) -> SdkResult<Signature> {
        let transaction: Transaction = bincode::deserialize(wire_transaction)?;
        let config = RpcSendTransactionConfig {
            preflight_commitment: Some(self.commitment.commitment),
            ..RpcSendTransactionConfig::default()
        };

        debug!(
            "RPC sendTransaction: {} bytes, {} signatures",
            wire_transaction.len(),
            transaction.signatures.len()
        );

        self.rpc
            .send_transaction_with_config(&transaction, config)
            .await
            .map_err(|e| SdkError::Broadcast(e.to_string()))
    }

    async fn get_signature_status(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> SdkResult<SignatureStatus> {
        Ok(self
            .rpc
            .get_signature_status_with_commitment(signature, commitment)
            .await?)
    }

    async fn get_account(&self, address: &Pubkey) -> SdkResult<Option<Account>> {
        let response = self
            .rpc
            .get_account_with_commitment(address, self.commitment)
            .await?;
        Ok(response.value)
    }
}
