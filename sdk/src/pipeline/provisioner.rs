use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};

use crate::instructions;

/// A freshly generated mint identity and the instruction that creates it.
///
/// The keypair lives only as long as one creation attempt; it is needed once
/// more to co-sign the `create_account` transaction.
pub struct MintAccountPlan {
    pub keypair: Keypair,
    pub instruction: Instruction,
    pub lamports: u64,
}

impl MintAccountPlan {
    pub fn address(&self) -> Pubkey {
        self.keypair.pubkey()
    }
}

/// Build the `create_account` for a new mint funded with `rent_exempt_lamports`
pub fn provision_mint_account(payer: &Pubkey, rent_exempt_lamports: u64) -> MintAccountPlan {
    let keypair = Keypair::new();
    let instruction =
        instructions::create_mint_account(payer, &keypair.pubkey(), rent_exempt_lamports);

    MintAccountPlan {
        keypair,
        instruction,
        lamports: rent_exempt_lamports,
    }
}
