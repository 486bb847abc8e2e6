//! High-level client
//!
//! [`TokenClient`] bundles one ledger connection and configuration with the
//! services built on it. Each service method takes the caller's
//! [`WalletSession`](crate::wallet::WalletSession) explicitly.

pub mod balance;
pub mod token;
pub mod transfer;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::SdkConfig;
use crate::error::SdkResult;
use crate::ledger::{LedgerConnection, RpcLedger};
use crate::pipeline::PipelineContext;

pub use balance::BalanceService;
pub use token::TokenService;
pub use transfer::TransferService;

/// Handles shared by every service
pub struct ServiceBase {
    ledger: Arc<dyn LedgerConnection>,
    config: SdkConfig,
}

impl ServiceBase {
    pub fn new(ledger: Arc<dyn LedgerConnection>, config: SdkConfig) -> Self {
        Self { ledger, config }
    }

    pub fn ledger(&self) -> &dyn LedgerConnection {
        self.ledger.as_ref()
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub(crate) fn context<'a>(&'a self, cancel: &'a CancellationToken) -> SdkResult<PipelineContext<'a>> {
        PipelineContext::new(self.ledger.as_ref(), &self.config, cancel)
    }
}

/// Main SDK client
pub struct TokenClient {
    base: Arc<ServiceBase>,
    pub tokens: TokenService,
    pub transfers: TransferService,
    pub balances: BalanceService,
}

impl TokenClient {
    /// Client over any ledger connection; the config is checked first
    pub fn new(ledger: Arc<dyn LedgerConnection>, config: SdkConfig) -> SdkResult<Self> {
        config.check()?;
        let base = Arc::new(ServiceBase::new(ledger, config));
        Ok(Self {
            tokens: TokenService::new(base.clone()),
            transfers: TransferService::new(base.clone()),
            balances: BalanceService::new(base.clone()),
            base,
        })
    }

    /// Client talking JSON-RPC to `config.rpc_url`
    pub fn from_config(config: SdkConfig) -> SdkResult<Self> {
        let ledger = RpcLedger::from_config(&config)?;
        Self::new(Arc::new(ledger), config)
    }

    pub fn config(&self) -> &SdkConfig {
        self.base.config()
    }

    pub fn ledger(&self) -> &dyn LedgerConnection {
        self.base.ledger()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;
    use crate::testing::StubLedger;

    #[test]
    fn invalid_config_is_refused_up_front() {
        let config = SdkConfig::localnet().with_commitment("eventually");
        let result = TokenClient::new(Arc::new(StubLedger::new()), config);
        assert!(matches!(result, Err(SdkError::Config(_))));
    }

    #[test]
    fn services_share_one_configuration() {
        let client = TokenClient::new(Arc::new(StubLedger::new()), SdkConfig::localnet()).unwrap();
        assert_eq!(client.config().rpc_url, SdkConfig::localnet().rpc_url);
        assert_eq!(client.tokens.config().confirm_timeout_secs, client.config().confirm_timeout_secs);
    }
}
