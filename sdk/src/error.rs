//! SDK error types

use std::time::Duration;

use solana_sdk::signature::Signature;
use thiserror::Error;

use crate::pipeline::Stage;
use crate::wallet::WalletError;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Missing or malformed caller input, or no wallet session
    #[error("Validation error: {0}")]
    Validation(String),

    /// RPC call failed, or the funding grant could not be obtained
    #[error("Network error: {0}")]
    Network(String),

    /// Wallet declined or failed to sign
    #[error("Wallet rejected the request: {0}")]
    UserRejected(#[from] WalletError),

    /// The cluster refused the submitted transaction
    #[error("Broadcast rejected: {0}")]
    Broadcast(String),

    /// The transaction executed and the program reported failure
    #[error("On-chain program error: {0}")]
    OnChainProgram(String),

    /// Broadcast succeeded but confirmation never resolved
    #[error("Transaction {signature} not confirmed after {waited:?}; re-query before retrying")]
    UnknownState { signature: Signature, waited: Duration },

    /// The caller cancelled the pipeline
    #[error("Cancelled during {stage}")]
    Cancelled { stage: Stage },

    /// A locally held key could not sign
    #[error("Signing error: {0}")]
    Signing(String),

    /// Account not found
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Source token account holds less than requested
    #[error("Insufficient token balance: required {required}, available {available}")]
    InsufficientTokenBalance { required: u64, available: u64 },

    /// Serialization error
    #[error("Failed to serialize data: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SdkError {
    /// Text safe to show to the end user verbatim, if any
    pub fn user_message(&self) -> Option<&str> {
        match self {
            SdkError::Validation(msg) => Some(msg),
            _ => None,
        }
    }
}

impl From<solana_client::client_error::ClientError> for SdkError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        SdkError::Network(err.to_string())
    }
}

impl From<bincode::Error> for SdkError {
    fn from(err: bincode::Error) -> Self {
        SdkError::Serialization(err.to_string())
    }
}

impl From<spl_token::solana_program::program_error::ProgramError> for SdkError {
    fn from(err: spl_token::solana_program::program_error::ProgramError) -> Self {
        SdkError::Serialization(err.to_string())
    }
}

impl From<validator::ValidationErrors> for SdkError {
    fn from(err: validator::ValidationErrors) -> Self {
        SdkError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for SdkError {
    fn from(err: toml::de::Error) -> Self {
        SdkError::Config(err.to_string())
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
