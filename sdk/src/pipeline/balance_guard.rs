use solana_sdk::{native_token::lamports_to_sol, pubkey::Pubkey, signature::Signature};
use tracing::{debug, info, warn};

use super::{confirmation::wait_for_confirmation, PipelineContext};
use crate::error::{SdkError, SdkResult};

/// What the guard had to do to leave the payer above threshold
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FundingOutcome {
    /// Balance already met the threshold; no grant requested
    Sufficient { balance: u64 },
    /// Balance was low; one grant was requested and confirmed
    Granted {
        previous_balance: u64,
        lamports: u64,
        signature: Signature,
    },
}

impl FundingOutcome {
    pub fn was_topped_up(&self) -> bool {
        matches!(self, FundingOutcome::Granted { .. })
    }
}

/// Ensure `payer` can cover fees and rent, requesting one faucet grant if not.
///
/// A failed grant request or grant confirmation is reported as
/// [`SdkError::Network`]; cancellation passes through unchanged.
pub async fn ensure_payer_funded(
    ctx: &PipelineContext<'_>,
    payer: &Pubkey,
) -> SdkResult<FundingOutcome> {
    let threshold = ctx.config.min_payer_balance_lamports;
    let balance = ctx.ledger.get_balance(payer).await?;

    if balance >= threshold {
        debug!(
            "Payer {} holds {} SOL, threshold {} SOL",
            payer,
            lamports_to_sol(balance),
            lamports_to_sol(threshold)
        );
        return Ok(FundingOutcome::Sufficient { balance });
    }

    let lamports = ctx.config.airdrop_lamports;
    warn!(
        "Payer {} balance {} SOL below {} SOL, requesting airdrop of {} SOL",
        payer,
        lamports_to_sol(balance),
        lamports_to_sol(threshold),
        lamports_to_sol(lamports)
    );

    let signature = ctx
        .ledger
        .request_airdrop(payer, lamports)
        .await
        .map_err(funding_failure)?;
    wait_for_confirmation(ctx, &signature)
        .await
        .map_err(funding_failure)?;

    info!("Airdrop {} confirmed", signature);

    Ok(FundingOutcome::Granted {
        previous_balance: balance,
        lamports,
        signature,
    })
}

fn funding_failure(err: SdkError) -> SdkError {
    match err {
        SdkError::Network(_) | SdkError::Cancelled { .. } => err,
        other => SdkError::Network(format!("funding grant failed: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SdkConfig;
    use crate::testing::{LedgerCall, StubLedger};
    use solana_sdk::native_token::LAMPORTS_PER_SOL;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn sufficient_balance_skips_the_faucet() {
        let payer = Pubkey::new_unique();
        let ledger = StubLedger::new().with_balance(payer, 2 * LAMPORTS_PER_SOL);
        let config = SdkConfig::localnet();
        let cancel = CancellationToken::new();
        let ctx = PipelineContext::new(&ledger, &config, &cancel).unwrap();

        let outcome = ensure_payer_funded(&ctx, &payer).await.unwrap();

        assert_eq!(outcome, FundingOutcome::Sufficient { balance: 2 * LAMPORTS_PER_SOL });
        assert_eq!(ledger.airdrop_count(), 0);
    }

    #[tokio::test]
    async fn balance_exactly_at_threshold_is_sufficient() {
        let payer = Pubkey::new_unique();
        let ledger = StubLedger::new().with_balance(payer, LAMPORTS_PER_SOL / 2);
        let config = SdkConfig::localnet();
        let cancel = CancellationToken::new();
        let ctx = PipelineContext::new(&ledger, &config, &cancel).unwrap();

        let outcome = ensure_payer_funded(&ctx, &payer).await.unwrap();
        assert!(!outcome.was_topped_up());
    }

    #[tokio::test]
    async fn low_balance_requests_one_grant_and_waits() {
        let payer = Pubkey::new_unique();
        let ledger = StubLedger::new().with_balance(payer, LAMPORTS_PER_SOL / 10);
        let config = SdkConfig::localnet();
        let cancel = CancellationToken::new();
        let ctx = PipelineContext::new(&ledger, &config, &cancel).unwrap();

        let outcome = ensure_payer_funded(&ctx, &payer).await.unwrap();

        let FundingOutcome::Granted { lamports, signature, .. } = outcome else {
            panic!("expected a grant");
        };
        assert_eq!(lamports, LAMPORTS_PER_SOL);
        assert_eq!(
            ledger.calls_matching(|call| matches!(call, LedgerCall::RequestAirdrop { .. })),
            vec![LedgerCall::RequestAirdrop { address: payer, lamports: LAMPORTS_PER_SOL }]
        );
        assert!(ledger
            .calls()
            .contains(&LedgerCall::GetSignatureStatus { signature }));
        assert_eq!(ledger.balance_of(&payer), LAMPORTS_PER_SOL + LAMPORTS_PER_SOL / 10);
    }

    #[tokio::test]
    async fn failed_grant_is_a_network_error() {
        let payer = Pubkey::new_unique();
        let ledger = StubLedger::new().with_balance(payer, 0).failing_airdrops();
        let config = SdkConfig::localnet();
        let cancel = CancellationToken::new();
        let ctx = PipelineContext::new(&ledger, &config, &cancel).unwrap();

        let err = ensure_payer_funded(&ctx, &payer).await.unwrap_err();
        assert!(matches!(err, SdkError::Network(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn unconfirmed_grant_is_a_network_error() {
        let payer = Pubkey::new_unique();
        let ledger = StubLedger::new().with_balance(payer, 0).never_confirming();
        let config = SdkConfig::localnet();
        let cancel = CancellationToken::new();
        let ctx = PipelineContext::new(&ledger, &config, &cancel).unwrap();

        let err = ensure_payer_funded(&ctx, &payer).await.unwrap_err();
        assert!(matches!(err, SdkError::Network(_)));
    }
}
