use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use super::ServiceBase;
use crate::core::messages;
use crate::error::{SdkError, SdkResult};
use crate::instructions;
use crate::ledger::{fetch_mint, fetch_token_account};
use crate::pipeline::{assemble_and_sign, ensure_payer_funded, send_and_confirm, Stage};
use crate::types::{Operation, OperationResult, TransferReceipt};
use crate::utils::{check_positive_amount, format_ui_amount, parse_address, parse_ui_amount};
use crate::wallet::WalletSession;

/// Service for moving tokens out of the payer's associated account
pub struct TransferService {
    base: Arc<ServiceBase>,
}

impl TransferService {
    pub fn new(base: Arc<ServiceBase>) -> Self {
        Self { base }
    }

    /// Send `ui_amount` of `mint` from the payer to `recipient`, creating the
    /// recipient's token account if needed.
    #[instrument(skip_all, fields(mint = %mint, recipient = %recipient, amount = ui_amount))]
    pub async fn transfer_tokens(
        &self,
        session: &WalletSession,
        mint: &Pubkey,
        recipient: &Pubkey,
        ui_amount: &str,
        cancel: &CancellationToken,
    ) -> SdkResult<TransferReceipt> {
        let payer = session.payer()?;
        if *recipient == payer {
            return Err(SdkError::Validation(
                "Recipient must be a different wallet".to_string(),
            ));
        }
        if recipient == mint {
            return Err(SdkError::Validation(
                "Recipient cannot be the mint address".to_string(),
            ));
        }
        check_positive_amount(ui_amount)?;

        let ctx = self.base.context(cancel)?;
        ctx.stage(Stage::BalanceGuard, ensure_payer_funded(&ctx, &payer))
            .await?;

        let source = get_associated_token_address(&payer, mint);
        let (decimals, available) = ctx
            .stage(Stage::Lookup, async {
                let mint_state = fetch_mint(ctx.ledger, mint).await?;
                let available = fetch_token_account(ctx.ledger, &source)
                    .await?
                    .map(|account| account.amount)
                    .unwrap_or(0);
                Ok((mint_state.decimals, available))
            })
            .await?;

        let amount = parse_ui_amount(ui_amount, decimals)?;
        if amount > available {
            return Err(SdkError::InsufficientTokenBalance {
                required: amount,
                available,
            });
        }

        let (destination, create_ix) = instructions::ensure_token_account(&payer, recipient, mint);
        let transfer_ix =
            instructions::transfer(&source, mint, &destination, &payer, amount, decimals)?;

        let transaction = ctx
            .stage(
                Stage::Signing,
                assemble_and_sign(&ctx, session, &payer, &[create_ix, transfer_ix], &[]),
            )
            .await?;
        let signature = ctx
            .stage(Stage::Confirmation, send_and_confirm(&ctx, &transaction))
            .await?;

        let ui_amount = format_ui_amount(amount, decimals);
        info!("Transferred {} of {} to {}", ui_amount, mint, recipient);

        Ok(TransferReceipt {
            mint: *mint,
            recipient: *recipient,
            destination,
            amount,
            ui_amount,
            signature,
        })
    }

    /// Form-field variant of [`Self::transfer_tokens`]
    pub async fn transfer_tokens_result(
        &self,
        session: &WalletSession,
        mint: &str,
        recipient: &str,
        ui_amount: &str,
        cancel: &CancellationToken,
    ) -> OperationResult {
        match self
            .transfer_from_fields(session, mint, recipient, ui_amount, cancel)
            .await
        {
            Ok(receipt) => OperationResult::tokens_transferred(&receipt),
            Err(err) => OperationResult::failure(Operation::TransferTokens, &err),
        }
    }

    async fn transfer_from_fields(
        &self,
        session: &WalletSession,
        mint: &str,
        recipient: &str,
        ui_amount: &str,
        cancel: &CancellationToken,
    ) -> SdkResult<TransferReceipt> {
        session.payer()?;
        if [mint, recipient, ui_amount]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(SdkError::Validation(messages::INVALID_TRANSFER_FIELDS.to_string()));
        }
        let mint = parse_address("Mint address", mint)?;
        let recipient = parse_address("Recipient address", recipient)?;
        self.transfer_tokens(session, &mint, &recipient, ui_amount, cancel)
            .await
    }
}
