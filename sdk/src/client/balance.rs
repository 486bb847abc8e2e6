use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address;
use tracing::{debug, instrument};

use super::ServiceBase;
use crate::core::messages;
use crate::error::{SdkError, SdkResult};
use crate::ledger::{fetch_mint, fetch_token_account};
use crate::types::TokenBalance;
use crate::utils::{format_ui_amount, parse_address};

/// Read-only balance queries
pub struct BalanceService {
    base: Arc<ServiceBase>,
}

impl BalanceService {
    pub fn new(base: Arc<ServiceBase>) -> Self {
        Self { base }
    }

    /// Balance of `owner` in `mint`, both given as typed by the user
    pub async fn check_balance(&self, mint: &str, owner: &str) -> SdkResult<TokenBalance> {
        let mint = parse_address("Mint address", mint)?;
        let owner = parse_address("Wallet address", owner)?;
        self.balance_of(&mint, &owner).await
    }

    /// A missing token account reads as zero with an explanatory note
    #[instrument(skip(self))]
    pub async fn balance_of(&self, mint: &Pubkey, owner: &Pubkey) -> SdkResult<TokenBalance> {
        let ledger = self.base.ledger();
        let mint_state = fetch_mint(ledger, mint).await.map_err(|err| match err {
            SdkError::AccountNotFound(detail) => {
                debug!("{}", detail);
                SdkError::AccountNotFound(messages::MINT_NOT_FOUND.to_string())
            }
            other => other,
        })?;

        let token_address = get_associated_token_address(owner, mint);
        let balance = match fetch_token_account(ledger, &token_address).await? {
            Some(account) => TokenBalance {
                token_address: token_address.to_string(),
                raw_amount: account.amount.to_string(),
                amount: format_ui_amount(account.amount, mint_state.decimals),
                decimals: mint_state.decimals,
                message: None,
            },
            None => TokenBalance {
                token_address: token_address.to_string(),
                raw_amount: "0".to_string(),
                amount: "0".to_string(),
                decimals: mint_state.decimals,
                message: Some(messages::NO_TOKEN_ACCOUNT.to_string()),
            },
        };
        Ok(balance)
    }
}
