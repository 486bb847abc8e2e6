use solana_sdk::native_token::LAMPORTS_PER_SOL;

/// Default cluster endpoints
pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";
pub const DEVNET_WS_URL: &str = "wss://api.devnet.solana.com";
pub const LOCALNET_RPC_URL: &str = "http://localhost:8899";
pub const LOCALNET_WS_URL: &str = "ws://localhost:8900";
pub const MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const MAINNET_WS_URL: &str = "wss://api.mainnet-beta.solana.com";

/// Below this the payer is topped up before any fee-paying work (0.5 SOL)
pub const DEFAULT_MIN_PAYER_BALANCE: u64 = LAMPORTS_PER_SOL / 2;

/// Size of a single funding grant (1 SOL)
pub const DEFAULT_AIRDROP_LAMPORTS: u64 = LAMPORTS_PER_SOL;

pub const DEFAULT_CONFIRM_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
pub const DEFAULT_COMMITMENT: &str = "confirmed";

/// User-facing messages
pub mod messages {
    pub const WALLET_NOT_CONNECTED: &str = "Please connect your wallet first";
    pub const INVALID_TOKEN_DETAILS: &str = "Please enter valid token details";
    pub const INVALID_TRANSFER_FIELDS: &str = "Please fill in all fields correctly";
    pub const CREATE_FAILED: &str = "Failed to create token. See console for details.";
    pub const MINT_FAILED: &str = "Failed to mint tokens. See console for details.";
    pub const TRANSFER_FAILED: &str = "Failed to transfer token. See console for details.";
    pub const MINT_NOT_FOUND: &str = "Error: Invalid mint address or mint not found";
    pub const NO_TOKEN_ACCOUNT: &str =
        "This wallet doesn't have a token account for this mint yet.";
}
