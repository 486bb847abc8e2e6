//! Type definitions for SDK

use serde::{Deserialize, Serialize};
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use tracing::error;

use crate::core::messages;
use crate::error::{SdkError, SdkResult};
use crate::pipeline::FundingOutcome;

/// User-supplied token details. Only `decimals` reaches the chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDescriptor {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl TokenDescriptor {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> SdkResult<Self> {
        let descriptor = Self {
            name: name.into().trim().to_string(),
            symbol: symbol.into().trim().to_string(),
            decimals,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Build from raw form fields, `decimals` as typed by the user
    pub fn parse(name: &str, symbol: &str, decimals: &str) -> SdkResult<Self> {
        let decimals = decimals
            .trim()
            .parse::<u8>()
            .map_err(|_| SdkError::Validation(messages::INVALID_TOKEN_DETAILS.to_string()))?;
        Self::new(name, symbol, decimals)
    }

    pub fn validate(&self) -> SdkResult<()> {
        if self.name.trim().is_empty() || self.symbol.trim().is_empty() {
            return Err(SdkError::Validation(messages::INVALID_TOKEN_DETAILS.to_string()));
        }
        Ok(())
    }
}

/// A mint that made it through the whole creation pipeline
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatedToken {
    pub mint: Pubkey,
    pub decimals: u8,
    pub funding: FundingOutcome,
    pub create_signature: Signature,
    pub initialize_signature: Signature,
}

/// Confirmed `mint_to_checked`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintReceipt {
    pub mint: Pubkey,
    pub token_account: Pubkey,
    pub amount: u64,
    pub ui_amount: String,
    pub signature: Signature,
}

/// Confirmed `transfer_checked`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferReceipt {
    pub mint: Pubkey,
    pub recipient: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
    pub ui_amount: String,
    pub signature: Signature,
}

/// Token balance of one owner for one mint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub token_address: String,
    pub raw_amount: String,
    pub amount: String,
    pub decimals: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Operations surfaced to the presentation layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    CreateToken,
    MintTokens,
    TransferTokens,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Operation::CreateToken => messages::CREATE_FAILED,
            Operation::MintTokens => messages::MINT_FAILED,
            Operation::TransferTokens => messages::TRANSFER_FAILED,
        }
    }
}

/// Collapsed outcome handed to the presentation layer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mint_address: Option<String>,
}

impl OperationResult {
    pub fn token_created(descriptor: &TokenDescriptor, created: &CreatedToken) -> Self {
        Self {
            success: true,
            message: format!(
                "Token \"{}\" ({}) created successfully!",
                descriptor.name, descriptor.symbol
            ),
            mint_address: Some(created.mint.to_string()),
        }
    }

    pub fn tokens_minted(receipt: &MintReceipt) -> Self {
        Self {
            success: true,
            message: format!("{} tokens minted to {}!", receipt.ui_amount, receipt.token_account),
            mint_address: Some(receipt.mint.to_string()),
        }
    }

    pub fn tokens_transferred(receipt: &TransferReceipt) -> Self {
        Self {
            success: true,
            message: format!("{} tokens transferred to {}!", receipt.ui_amount, receipt.recipient),
            mint_address: Some(receipt.mint.to_string()),
        }
    }

    /// Log the full diagnostic, then collapse it to a generic message.
    /// Validation errors are shown as-is.
    pub fn failure(operation: Operation, err: &SdkError) -> Self {
        error!("{:?} failed: {}", operation, err);
        let message = err
            .user_message()
            .unwrap_or_else(|| operation.failure_message())
            .to_string();
        Self {
            success: false,
            message,
            mint_address: None,
        }
    }

    pub fn from_create(descriptor: &TokenDescriptor, result: &SdkResult<CreatedToken>) -> Self {
        match result {
            Ok(created) => Self::token_created(descriptor, created),
            Err(err) => Self::failure(Operation::CreateToken, err),
        }
    }

    pub fn to_json(&self) -> SdkResult<String> {
        serde_json::to_string(self).map_err(|e| SdkError::Serialization(e.to_string()))
    }
}
