//! Instruction builders for mint creation, minting and transfers

use solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_instruction};
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account_idempotent,
};
use spl_token::{solana_program::program_pack::Pack, state::Mint};

use crate::error::SdkResult;

/// Size of a mint account
pub const MINT_SIZE: usize = Mint::LEN;

/// System `create_account` for a mint owned by the token program
pub fn create_mint_account(payer: &Pubkey, mint: &Pubkey, lamports: u64) -> Instruction {
    system_instruction::create_account(payer, mint, lamports, MINT_SIZE as u64, &spl_token::id())
}

/// `InitializeMint2` against an already-funded mint account
pub fn initialize_mint(
    mint: &Pubkey,
    mint_authority: &Pubkey,
    freeze_authority: Option<&Pubkey>,
    decimals: u8,
) -> SdkResult<Instruction> {
    Ok(spl_token::instruction::initialize_mint2(
        &spl_token::id(),
        mint,
        mint_authority,
        freeze_authority,
        decimals,
    )?)
}

/// Create `owner`'s associated token account if it is missing
pub fn ensure_token_account(payer: &Pubkey, owner: &Pubkey, mint: &Pubkey) -> (Pubkey, Instruction) {
    let address = get_associated_token_address(owner, mint);
    let ix = create_associated_token_account_idempotent(payer, owner, mint, &spl_token::id());
    (address, ix)
}

pub fn mint_to(
    mint: &Pubkey,
    destination: &Pubkey,
    authority: &Pubkey,
    amount: u64,
    decimals: u8,
) -> SdkResult<Instruction> {
    Ok(spl_token::instruction::mint_to_checked(
        &spl_token::id(),
        mint,
        destination,
        authority,
        &[],
        amount,
        decimals,
    )?)
}

pub fn transfer(
    source: &Pubkey,
    mint: &Pubkey,
    destination: &Pubkey,
    owner: &Pubkey,
    amount: u64,
    decimals: u8,
) -> SdkResult<Instruction> {
    Ok(spl_token::instruction::transfer_checked(
        &spl_token::id(),
        source,
        mint,
        destination,
        owner,
        &[],
        amount,
        decimals,
    )?)
}
