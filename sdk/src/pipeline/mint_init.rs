use solana_sdk::{pubkey::Pubkey, signature::Signature};
use tracing::info;

use super::{assembler::assemble_and_sign, confirmation::send_and_confirm, PipelineContext};
use crate::error::{SdkError, SdkResult};
use crate::instructions;
use crate::wallet::WalletSession;

/// Authorities written into a new mint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintAuthorities {
    pub mint_authority: Pubkey,
    pub freeze_authority: Option<Pubkey>,
}

impl MintAuthorities {
    /// Payer holds both authorities
    pub fn payer(payer: Pubkey) -> Self {
        Self {
            mint_authority: payer,
            freeze_authority: Some(payer),
        }
    }
}

/// Run `InitializeMint2` against an existing, rent-exempt mint account.
///
/// Failures collapse into [`SdkError::OnChainProgram`], except wallet
/// refusal, cancellation and an unresolved confirmation, which keep their
/// own kinds.
pub async fn initialize_mint(
    ctx: &PipelineContext<'_>,
    session: &WalletSession,
    payer: &Pubkey,
    mint: &Pubkey,
    decimals: u8,
    authorities: &MintAuthorities,
) -> SdkResult<Signature> {
    let result = async {
        let ix = instructions::initialize_mint(
            mint,
            &authorities.mint_authority,
            authorities.freeze_authority.as_ref(),
            decimals,
        )?;
        let transaction = assemble_and_sign(ctx, session, payer, &[ix], &[]).await?;
        send_and_confirm(ctx, &transaction).await
    }
    .await;

    match result {
        Ok(signature) => {
            info!("Mint {} initialized with {} decimals", mint, decimals);
            Ok(signature)
        }
        Err(
            err @ (SdkError::UserRejected(_)
            | SdkError::Cancelled { .. }
            | SdkError::UnknownState { .. }
            | SdkError::OnChainProgram(_)),
        ) => Err(err),
        Err(other) => Err(SdkError::OnChainProgram(format!(
            "mint initialization for {} failed: {}",
            mint, other
        ))),
    }
}
