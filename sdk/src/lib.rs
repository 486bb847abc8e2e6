//! Token Manager SDK
//!
//! Client-side library for creating SPL tokens on a Solana cluster, minting
//! and transferring them, and reading balances. Provides:
//! - A staged create-token pipeline (funding, mint provisioning, signing,
//!   confirmation, mint initialization) under caller-driven cancellation
//! - Mint, transfer and balance services over the same ledger connection
//! - A JSON-RPC ledger adapter and an in-memory one for tests
pub mod client;
pub mod config;
pub mod core;
pub mod error;
pub mod instructions;
pub mod ledger;
pub mod pipeline;
pub mod testing;
pub mod types;
pub mod utils;
pub mod wallet;

pub use client::{BalanceService, TokenClient, TokenService, TransferService};
pub use config::SdkConfig;
pub use error::{SdkError, SdkResult};
pub use ledger::{LedgerConnection, RpcLedger};
pub use pipeline::{create_token, CreateTokenRequest, FundingOutcome, MintAuthorities, Stage};
pub use types::*;
pub use wallet::{KeypairWallet, WalletError, WalletSession, WalletSigner};

pub use tokio_util::sync::CancellationToken;
