use solana_sdk::{
    instruction::Instruction,
    message::Message,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    transaction::Transaction,
};
use tracing::{debug, info};

use super::PipelineContext;
use crate::error::{SdkError, SdkResult};
use crate::wallet::{WalletError, WalletSession};

/// Wrap `instructions` into a transaction paid by `payer` and collect every
/// signature it needs.
///
/// The wallet signs first, since that is the step that prompts the user and
/// may never return. `local_signers` are applied afterwards. Nothing is
/// broadcast here, so a refusal leaves no trace on the ledger.
pub async fn assemble_and_sign(
    ctx: &PipelineContext<'_>,
    session: &WalletSession,
    payer: &Pubkey,
    instructions: &[Instruction],
    local_signers: &[&Keypair],
) -> SdkResult<Transaction> {
    let blockhash = ctx.ledger.get_latest_blockhash().await?;
    let message = Message::new_with_blockhash(instructions, Some(payer), &blockhash);
    debug!(
        "Assembled message with {} instructions, {} required signatures, blockhash {}",
        instructions.len(),
        message.header.num_required_signatures,
        blockhash
    );

    info!("Requesting wallet signature from {}", payer);
    let mut transaction = session
        .signer()
        .sign_transaction(Transaction::new_unsigned(message.clone()))
        .await?;

    if transaction.message != message {
        return Err(WalletError::MessageAltered.into());
    }
    if transaction.signatures.len() != usize::from(message.header.num_required_signatures) {
        return Err(WalletError::MissingSignature.into());
    }
    let payer_signature = transaction.signatures.first().copied().unwrap_or_default();
    if payer_signature == Signature::default()
        || !payer_signature.verify(payer.as_ref(), &transaction.message_data())
    {
        return Err(WalletError::MissingSignature.into());
    }

    if !local_signers.is_empty() {
        transaction
            .try_partial_sign(local_signers, blockhash)
            .map_err(|e| SdkError::Signing(e.to_string()))?;
    }

    if !transaction.is_signed() {
        return Err(SdkError::Signing(format!(
            "transaction still needs {} of {} signatures",
            transaction
                .signatures
                .iter()
                .filter(|sig| **sig == Signature::default())
                .count(),
            transaction.signatures.len()
        )));
    }

    Ok(transaction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SdkConfig;
    use crate::pipeline::provision_mint_account;
    use crate::testing::{ScriptedWallet, StubLedger, WalletScript};
    use solana_sdk::{native_token::LAMPORTS_PER_SOL, signature::Signer};
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn create_account_carries_payer_then_mint_signature() {
        let ledger = StubLedger::new();
        let config = SdkConfig::localnet();
        let cancel = CancellationToken::new();
        let ctx = PipelineContext::new(&ledger, &config, &cancel).unwrap();
        let wallet = Arc::new(ScriptedWallet::new(WalletScript::Approve));
        let payer = wallet.pubkey();
        let session = WalletSession::new(wallet);

        let plan = provision_mint_account(&payer, LAMPORTS_PER_SOL / 100);
        let tx = assemble_and_sign(&ctx, &session, &payer, &[plan.instruction.clone()], &[&plan.keypair])
            .await
            .unwrap();

        assert_eq!(tx.signatures.len(), 2);
        assert_eq!(tx.message.account_keys[0], payer);
        assert_eq!(tx.message.account_keys[1], plan.address());
        assert!(tx.verify().is_ok());
    }

    #[tokio::test]
    async fn missing_local_signer_is_caught_before_broadcast() {
        let ledger = StubLedger::new();
        let config = SdkConfig::localnet();
        let cancel = CancellationToken::new();
        let ctx = PipelineContext::new(&ledger, &config, &cancel).unwrap();
        let wallet = Arc::new(ScriptedWallet::new(WalletScript::Approve));
        let payer = wallet.pubkey();
        let session = WalletSession::new(wallet);

        let plan = provision_mint_account(&payer, 1);
        let err = assemble_and_sign(&ctx, &session, &payer, &[plan.instruction], &[])
            .await
            .unwrap_err();

        assert!(matches!(err, SdkError::Signing(_)));
    }

    #[tokio::test]
    async fn wallet_rejection_maps_to_user_rejected() {
        let ledger = StubLedger::new();
        let config = SdkConfig::localnet();
        let cancel = CancellationToken::new();
        let ctx = PipelineContext::new(&ledger, &config, &cancel).unwrap();
        let wallet = Arc::new(ScriptedWallet::new(WalletScript::Reject));
        let payer = wallet.pubkey();
        let session = WalletSession::new(wallet);

        let plan = provision_mint_account(&payer, 1);
        let err = assemble_and_sign(&ctx, &session, &payer, &[plan.instruction.clone()], &[&plan.keypair])
            .await
            .unwrap_err();

        assert!(matches!(err, SdkError::UserRejected(WalletError::Rejected(_))));
    }

    #[tokio::test]
    async fn tampered_or_unsigned_results_are_refused() {
        for (script, expected) in [
            (WalletScript::Tamper, WalletError::MessageAltered),
            (WalletScript::ReturnUnsigned, WalletError::MissingSignature),
            (WalletScript::Truncate, WalletError::MissingSignature),
        ] {
            let ledger = StubLedger::new();
            let config = SdkConfig::localnet();
            let cancel = CancellationToken::new();
            let ctx = PipelineContext::new(&ledger, &config, &cancel).unwrap();
            let wallet = Arc::new(ScriptedWallet::new(script));
            let payer = wallet.pubkey();
            let session = WalletSession::new(wallet);

            let plan = provision_mint_account(&payer, 1);
            let err = assemble_and_sign(&ctx, &session, &payer, &[plan.instruction.clone()], &[&plan.keypair])
                .await
                .unwrap_err();

            match err {
                SdkError::UserRejected(actual) => assert_eq!(actual, expected),
                other => panic!("expected user rejection, got {other}"),
            }
        }
    }
}
