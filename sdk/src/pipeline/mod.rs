//! Transaction orchestration pipeline
//!
//! Creating a token is a forward-only sequence of dependent ledger
//! operations:
//!
//! 1. [`balance_guard`] tops the payer up from the faucet when it is low
//! 2. [`provisioner`] generates the mint keypair and its `create_account`
//! 3. [`assembler`] stamps a blockhash, collects the wallet signature, then
//!    the mint keypair's
//! 4. [`confirmation`] broadcasts and polls until the cluster confirms
//! 5. [`mint_init`] runs `InitializeMint2` against the now-funded account
//!
//! Every stage runs under the caller's [`CancellationToken`]. Nothing is
//! retried or rolled back; a failed attempt is discarded together with its
//! mint keypair.

pub mod assembler;
pub mod balance_guard;
pub mod confirmation;
pub mod create_token;
pub mod mint_init;
pub mod provisioner;

use std::{fmt, future::Future};

use solana_sdk::commitment_config::CommitmentConfig;
use tokio_util::sync::CancellationToken;

use crate::config::SdkConfig;
use crate::error::{SdkError, SdkResult};
use crate::ledger::LedgerConnection;

pub use assembler::assemble_and_sign;
pub use balance_guard::{ensure_payer_funded, FundingOutcome};
pub use confirmation::{broadcast, send_and_confirm, wait_for_confirmation};
pub use create_token::{create_token, CreateTokenRequest};
pub use mint_init::{initialize_mint, MintAuthorities};
pub use provisioner::{provision_mint_account, MintAccountPlan};

/// Pipeline stage, used for cancellation and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    BalanceGuard,
    Provisioning,
    Lookup,
    Signing,
    Confirmation,
    MintInitialization,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::BalanceGuard => "balance guard",
            Stage::Provisioning => "mint account provisioning",
            Stage::Lookup => "account lookup",
            Stage::Signing => "transaction signing",
            Stage::Confirmation => "confirmation wait",
            Stage::MintInitialization => "mint initialization",
        };
        f.write_str(name)
    }
}

/// Shared handles for one pipeline invocation
pub struct PipelineContext<'a> {
    pub ledger: &'a dyn LedgerConnection,
    pub config: &'a SdkConfig,
    pub commitment: CommitmentConfig,
    pub cancel: &'a CancellationToken,
}

impl<'a> PipelineContext<'a> {
    pub fn new(
        ledger: &'a dyn LedgerConnection,
        config: &'a SdkConfig,
        cancel: &'a CancellationToken,
    ) -> SdkResult<Self> {
        Ok(Self {
            ledger,
            config,
            commitment: config.commitment_config()?,
            cancel,
        })
    }

    /// Run `fut` unless the token fires first; the future is dropped on cancel.
    pub async fn stage<T, F>(&self, stage: Stage, fut: F) -> SdkResult<T>
    where
        F: Future<Output = SdkResult<T>>,
    {
        if self.cancel.is_cancelled() {
            return Err(SdkError::Cancelled { stage });
        }

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(SdkError::Cancelled { stage }),
            result = fut => result,
        }
    }
}
