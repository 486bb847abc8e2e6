use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;
use spl_token::solana_program::program_option::COption;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use super::ServiceBase;
use crate::config::SdkConfig;
use crate::error::{SdkError, SdkResult};
use crate::instructions;
use crate::ledger::fetch_mint;
use crate::pipeline::{
    self, assemble_and_sign, ensure_payer_funded, send_and_confirm, CreateTokenRequest, Stage,
};
use crate::types::{CreatedToken, MintReceipt, Operation, OperationResult, TokenDescriptor};
use crate::utils::{check_positive_amount, format_ui_amount, parse_address, parse_ui_amount};
use crate::wallet::WalletSession;

/// Service for creating mints and minting supply
pub struct TokenService {
    base: Arc<ServiceBase>,
}

impl TokenService {
    pub fn new(base: Arc<ServiceBase>) -> Self {
        Self { base }
    }

    pub fn config(&self) -> &SdkConfig {
        self.base.config()
    }

    /// Run the full create-token pipeline
    pub async fn create_token(
        &self,
        session: &WalletSession,
        request: &CreateTokenRequest,
        cancel: &CancellationToken,
    ) -> SdkResult<CreatedToken> {
        let ctx = self.base.context(cancel)?;
        pipeline::create_token(&ctx, session, request).await
    }

    /// Create a token from raw form fields and collapse the outcome for
    /// display. The wallet is checked before the token details.
    pub async fn create_token_result(
        &self,
        session: &WalletSession,
        name: &str,
        symbol: &str,
        decimals: &str,
        cancel: &CancellationToken,
    ) -> OperationResult {
        let descriptor = match session
            .payer()
            .and_then(|_| TokenDescriptor::parse(name, symbol, decimals))
        {
            Ok(descriptor) => descriptor,
            Err(err) => return OperationResult::failure(Operation::CreateToken, &err),
        };

        let request = CreateTokenRequest::new(descriptor);
        let result = self.create_token(session, &request, cancel).await;
        OperationResult::from_create(&request.descriptor, &result)
    }

    /// Mint `ui_amount` of `mint` to `recipient`, or to the payer when
    /// `None`. The payer must be the mint authority.
    #[instrument(skip_all, fields(mint = %mint, amount = ui_amount))]
    pub async fn mint_tokens(
        &self,
        session: &WalletSession,
        mint: &Pubkey,
        ui_amount: &str,
        recipient: Option<&Pubkey>,
        cancel: &CancellationToken,
    ) -> SdkResult<MintReceipt> {
        let payer = session.payer()?;
        let owner = recipient.copied().unwrap_or(payer);
        check_positive_amount(ui_amount)?;
        let ctx = self.base.context(cancel)?;

        let mint_state = ctx
            .stage(Stage::Lookup, fetch_mint(ctx.ledger, mint))
            .await?;
        if mint_state.mint_authority != COption::Some(payer) {
            return Err(SdkError::Validation(format!(
                "Wallet {} is not the mint authority of {}",
                payer, mint
            )));
        }

        ctx.stage(Stage::BalanceGuard, ensure_payer_funded(&ctx, &payer))
            .await?;

        let decimals = mint_state.decimals;
        let amount = parse_ui_amount(ui_amount, decimals)?;

        let (token_account, create_ix) = instructions::ensure_token_account(&payer, &owner, mint);
        let mint_ix = instructions::mint_to(mint, &token_account, &payer, amount, decimals)?;

        let transaction = ctx
            .stage(
                Stage::Signing,
                assemble_and_sign(&ctx, session, &payer, &[create_ix, mint_ix], &[]),
            )
            .await?;
        let signature = ctx
            .stage(Stage::Confirmation, send_and_confirm(&ctx, &transaction))
            .await?;

        let ui_amount = format_ui_amount(amount, decimals);
        info!("Minted {} of {} to {}", ui_amount, mint, token_account);

        Ok(MintReceipt {
            mint: *mint,
            token_account,
            amount,
            ui_amount,
            signature,
        })
    }

    /// Form-field variant of [`Self::mint_tokens`]; an empty recipient
    /// mints to the payer.
    pub async fn mint_tokens_result(
        &self,
        session: &WalletSession,
        mint: &str,
        ui_amount: &str,
        recipient: &str,
        cancel: &CancellationToken,
    ) -> OperationResult {
        match self
            .mint_from_fields(session, mint, ui_amount, recipient, cancel)
            .await
        {
            Ok(receipt) => OperationResult::tokens_minted(&receipt),
            Err(err) => OperationResult::failure(Operation::MintTokens, &err),
        }
    }

    async fn mint_from_fields(
        &self,
        session: &WalletSession,
        mint: &str,
        ui_amount: &str,
        recipient: &str,
        cancel: &CancellationToken,
    ) -> SdkResult<MintReceipt> {
        session.payer()?;
        let mint = parse_address("Mint address", mint)?;
        let recipient = match recipient.trim() {
            "" => None,
            value => Some(parse_address("Recipient address", value)?),
        };
        self.mint_tokens(session, &mint, ui_amount, recipient.as_ref(), cancel)
            .await
    }
}
