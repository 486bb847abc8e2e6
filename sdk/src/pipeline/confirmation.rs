use solana_sdk::{signature::Signature, transaction::Transaction};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::PipelineContext;
use crate::error::{SdkError, SdkResult};

/// Serialize and submit a fully signed transaction
pub async fn broadcast(ctx: &PipelineContext<'_>, transaction: &Transaction) -> SdkResult<Signature> {
    let wire = bincode::serialize(transaction)?;
    let signature = ctx.ledger.send_transaction(&wire).await?;
    info!("Broadcast transaction {}", signature);
    Ok(signature)
}

/// Poll until `signature` reaches the configured commitment.
///
/// A transaction that lands with an execution error is
/// [`SdkError::OnChainProgram`]; one still invisible after
/// `confirm_timeout` is [`SdkError::UnknownState`]. Status lookups that fail
/// are retried until the deadline.
pub async fn wait_for_confirmation(ctx: &PipelineContext<'_>, signature: &Signature) -> SdkResult<()> {
    let timeout = ctx.config.confirm_timeout();
    let interval = ctx.config.poll_interval();
    let started = Instant::now();

    loop {
        match ctx.ledger.get_signature_status(signature, ctx.commitment).await {
            Ok(Some(Ok(()))) => {
                debug!(
                    "Transaction {} confirmed at {:?} after {:?}",
                    signature,
                    ctx.commitment.commitment,
                    started.elapsed()
                );
                return Ok(());
            }
            Ok(Some(Err(err))) => {
                return Err(SdkError::OnChainProgram(format!(
                    "transaction {} failed: {}",
                    signature, err
                )));
            }
            Ok(None) => {}
            Err(err) => warn!("Status lookup for {} failed: {}", signature, err),
        }

        let waited = started.elapsed();
        if waited >= timeout {
            return Err(SdkError::UnknownState {
                signature: *signature,
                waited,
            });
        }
        tokio::time::sleep(interval).await;
    }
}

/// Broadcast then wait; returns the confirmed signature
pub async fn send_and_confirm(ctx: &PipelineContext<'_>, transaction: &Transaction) -> SdkResult<Signature> {
    let signature = broadcast(ctx, transaction).await?;
    wait_for_confirmation(ctx, &signature).await?;
    Ok(signature)
}
