use tracing::{error, info, instrument, warn};

use super::{
    assemble_and_sign, ensure_payer_funded, initialize_mint, provision_mint_account, send_and_confirm,
    MintAuthorities, PipelineContext, Stage,
};
use crate::error::{SdkError, SdkResult};
use crate::instructions::MINT_SIZE;
use crate::types::{CreatedToken, TokenDescriptor};
use crate::wallet::WalletSession;

/// Everything needed to create one mint
#[derive(Clone, Debug)]
pub struct CreateTokenRequest {
    pub descriptor: TokenDescriptor,
    /// Defaults to the payer for both authorities
    pub authorities: Option<MintAuthorities>,
}

impl CreateTokenRequest {
    pub fn new(descriptor: TokenDescriptor) -> Self {
        Self {
            descriptor,
            authorities: None,
        }
    }

    pub fn with_authorities(mut self, authorities: MintAuthorities) -> Self {
        self.authorities = Some(authorities);
        self
    }
}

/// Create a new SPL mint paid for and signed by `session`.
///
/// Stages run strictly in order: fund the payer, provision the mint
/// account, sign and confirm its creation, then initialize it. The first
/// failure ends the attempt.
#[instrument(
    skip_all,
    fields(name = %request.descriptor.name, symbol = %request.descriptor.symbol, decimals = request.descriptor.decimals)
)]
pub async fn create_token(
    ctx: &PipelineContext<'_>,
    session: &WalletSession,
    request: &CreateTokenRequest,
) -> SdkResult<CreatedToken> {
    request.descriptor.validate()?;
    let payer = session.payer()?;
    info!("Using wallet address: {}", payer);

    let funding = ctx
        .stage(Stage::BalanceGuard, ensure_payer_funded(ctx, &payer))
        .await?;

    let plan = ctx
        .stage(Stage::Provisioning, async {
            let lamports = ctx
                .ledger
                .get_minimum_balance_for_rent_exemption(MINT_SIZE)
                .await?;
            Ok(provision_mint_account(&payer, lamports))
        })
        .await?;
    let mint = plan.address();
    info!("Creating token with mint address: {} ({} lamports)", mint, plan.lamports);

    let transaction = ctx
        .stage(
            Stage::Signing,
            assemble_and_sign(ctx, session, &payer, &[plan.instruction.clone()], &[&plan.keypair]),
        )
        .await?;

    // The mint keypair is only needed for that one signature.
    drop(plan);

    let create_signature = ctx
        .stage(Stage::Confirmation, send_and_confirm(ctx, &transaction))
        .await
        .inspect_err(|err| {
            if let SdkError::Cancelled { .. } = err {
                warn!(
                    "Abandoned confirmation of {}; mint {} may exist on-chain",
                    transaction.signatures[0], mint
                );
            }
        })?;
    info!("Mint account {} created in {}", mint, create_signature);

    let authorities = request
        .authorities
        .unwrap_or_else(|| MintAuthorities::payer(payer));
    let decimals = request.descriptor.decimals;
    let initialize_signature = ctx
        .stage(
            Stage::MintInitialization,
            initialize_mint(ctx, session, &payer, &mint, decimals, &authorities),
        )
        .await
        .inspect_err(|err| error!("Mint {} left uninitialized: {}", mint, err))?;

    info!("Token created successfully: {}", mint);

    Ok(CreatedToken {
        mint,
        decimals,
        funding,
        create_signature,
        initialize_signature,
    })
}
