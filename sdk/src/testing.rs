//! Testing utilities for the token manager
//!
//! [`StubLedger`] is an in-memory cluster that executes the system, token
//! and associated-token instructions this crate emits. Fees are not charged
//! and an accepted transaction is visible at every commitment immediately.
//! [`ScriptedWallet`] plays back a fixed answer to every signing prompt.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex, MutexGuard,
    },
};

use async_trait::async_trait;
use solana_sdk::{
    account::Account,
    commitment_config::CommitmentConfig,
    hash::Hash,
    instruction::{CompiledInstruction, InstructionError},
    message::Message,
    pubkey::Pubkey,
    rent::Rent,
    signature::{Keypair, Signature, Signer},
    system_instruction::SystemInstruction,
    system_program,
    transaction::{Transaction, TransactionError},
};
use spl_associated_token_account::{
    get_associated_token_address, get_associated_token_address_with_program_id,
};
use spl_token::{
    error::TokenError,
    instruction::TokenInstruction,
    solana_program::{
        program_option::COption,
        program_pack::{IsInitialized, Pack},
    },
    state::{Account as TokenAccount, AccountState, Mint},
};
use tracing::debug;

use crate::error::{SdkError, SdkResult};
use crate::ledger::{LedgerConnection, SignatureStatus};
use crate::wallet::{WalletError, WalletSigner};

// System program error codes
const ACCOUNT_ALREADY_IN_USE: u32 = 0;
const RESULT_WITH_NEGATIVE_LAMPORTS: u32 = 1;

/// One request received by a [`StubLedger`], in arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCall {
    GetBalance { address: Pubkey },
    GetLatestBlockhash,
    RequestAirdrop { address: Pubkey, lamports: u64 },
    GetMinimumBalanceForRentExemption { data_len: usize },
    SendTransaction { signature: Signature },
    GetSignatureStatus { signature: Signature },
    GetAccount { address: Pubkey },
}

#[derive(Default)]
struct LedgerState {
    accounts: HashMap<Pubkey, Account>,
    blockhashes: HashSet<Hash>,
    statuses: HashMap<Signature, Result<(), TransactionError>>,
    calls: Vec<LedgerCall>,
}

/// In-memory [`LedgerConnection`]
#[derive(Default)]
pub struct StubLedger {
    state: Mutex<LedgerState>,
    fail_airdrops: bool,
    never_confirm: bool,
}

impl StubLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a system account holding `lamports`
    pub fn with_balance(self, address: Pubkey, lamports: u64) -> Self {
        self.state()
            .accounts
            .insert(address, Account::new(lamports, 0, &system_program::id()));
        self
    }

    /// Seed an initialized mint with no freeze authority
    pub fn with_mint(self, mint: Pubkey, mint_authority: Pubkey, decimals: u8) -> Self {
        let state = Mint {
            mint_authority: COption::Some(mint_authority),
            supply: 0,
            decimals,
            is_initialized: true,
            freeze_authority: COption::None,
        };
        self.state().accounts.insert(mint, token_owned_account(state));
        self
    }

    /// Seed `owner`'s associated token account for `mint`. The mint must
    /// already be seeded; its supply grows by `amount`.
    pub fn with_token_balance(self, owner: Pubkey, mint: Pubkey, amount: u64) -> Self {
        {
            let mut state = self.state();
            if let Some(account) = state.accounts.get_mut(&mint) {
                if let Ok(mut current) = Mint::unpack(&account.data) {
                    current.supply = current.supply.saturating_add(amount);
                    current.pack_into_slice(&mut account.data);
                }
            }
            let token = TokenAccount {
                mint,
                owner,
                amount,
                delegate: COption::None,
                state: AccountState::Initialized,
                is_native: COption::None,
                delegated_amount: 0,
                close_authority: COption::None,
            };
            state.accounts.insert(
                get_associated_token_address(&owner, &mint),
                token_owned_account(token),
            );
        }
        self
    }

    /// Seed an arbitrary account
    pub fn with_account(self, address: Pubkey, account: Account) -> Self {
        self.state().accounts.insert(address, account);
        self
    }

    /// Airdrop requests fail as if the faucet were down
    pub fn failing_airdrops(mut self) -> Self {
        self.fail_airdrops = true;
        self
    }

    /// Signature lookups never resolve
    pub fn never_confirming(mut self) -> Self {
        self.never_confirm = true;
        self
    }

    /// Issue a blockhash the ledger will accept, without recording a call
    pub fn current_blockhash(&self) -> Hash {
        let hash = Hash::new_unique();
        self.state().blockhashes.insert(hash);
        hash
    }

    pub fn calls(&self) -> Vec<LedgerCall> {
        self.state().calls.clone()
    }

    pub fn calls_matching(&self, pred: impl Fn(&LedgerCall) -> bool) -> Vec<LedgerCall> {
        self.state().calls.iter().filter(|call| pred(call)).cloned().collect()
    }

    pub fn airdrop_count(&self) -> usize {
        self.calls_matching(|call| matches!(call, LedgerCall::RequestAirdrop { .. }))
            .len()
    }

    pub fn balance_of(&self, address: &Pubkey) -> u64 {
        self.state()
            .accounts
            .get(address)
            .map(|account| account.lamports)
            .unwrap_or(0)
    }

    pub fn account(&self, address: &Pubkey) -> Option<Account> {
        self.state().accounts.get(address).cloned()
    }

    /// Unpacked mint, `None` when absent or not yet initialized
    pub fn mint_state(&self, mint: &Pubkey) -> Option<Mint> {
        let account = self.account(mint)?;
        (account.owner == spl_token::id())
            .then(|| Mint::unpack(&account.data).ok())
            .flatten()
    }

    /// Raw amount in `owner`'s associated token account for `mint`
    pub fn token_balance(&self, owner: &Pubkey, mint: &Pubkey) -> Option<u64> {
        let account = self.account(&get_associated_token_address(owner, mint))?;
        TokenAccount::unpack(&account.data).ok().map(|token| token.amount)
    }

    /// Recorded outcome of a processed transaction or airdrop
    pub fn transaction_status(&self, signature: &Signature) -> Option<Result<(), TransactionError>> {
        self.state().statuses.get(signature).cloned()
    }

    fn state(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl LedgerConnection for StubLedger {
    async fn get_balance(&self, address: &Pubkey) -> SdkResult<u64> {
        self.state().calls.push(LedgerCall::GetBalance { address: *address });
        Ok(self.balance_of(address))
    }

    async fn get_latest_blockhash(&self) -> SdkResult<Hash> {
        self.state().calls.push(LedgerCall::GetLatestBlockhash);
        Ok(self.current_blockhash())
    }

    async fn request_airdrop(&self, address: &Pubkey, lamports: u64) -> SdkResult<Signature> {
        let mut state = self.state();
        state.calls.push(LedgerCall::RequestAirdrop {
            address: *address,
            lamports,
        });

        if self.fail_airdrops {
            return Err(SdkError::Network("airdrop request rejected by faucet".to_string()));
        }

        let account = state
            .accounts
            .entry(*address)
            .or_insert_with(|| Account::new(0, 0, &system_program::id()));
        account.lamports = account.lamports.saturating_add(lamports);

        let signature = Keypair::new().sign_message(&lamports.to_le_bytes());
        state.statuses.insert(signature, Ok(()));
        Ok(signature)
    }

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> SdkResult<u64> {
        self.state()
            .calls
            .push(LedgerCall::GetMinimumBalanceForRentExemption { data_len });
        Ok(Rent::default().minimum_balance(data_len))
    }

    async fn send_transaction(&self, wire_transaction: &[u8]) -> SdkResult<Signature> {
        let transaction: Transaction = bincode::deserialize(wire_transaction)
            .map_err(|e| SdkError::Broadcast(format!("failed to decode transaction: {}", e)))?;
        let signature = transaction.signatures.first().copied().unwrap_or_default();

        let mut state = self.state();
        state.calls.push(LedgerCall::SendTransaction { signature });

        let required = transaction.message.header.num_required_signatures as usize;
        if transaction.signatures.len() != required
            || transaction.signatures.iter().any(|sig| *sig == Signature::default())
            || transaction.verify().is_err()
        {
            return Err(SdkError::Broadcast(
                "Transaction signature verification failure".to_string(),
            ));
        }
        if !state.blockhashes.contains(&transaction.message.recent_blockhash) {
            return Err(SdkError::Broadcast("Blockhash not found".to_string()));
        }
        if state.statuses.contains_key(&signature) {
            return Err(SdkError::Broadcast(
                "This transaction has already been processed".to_string(),
            ));
        }

        match execute(&transaction.message, &state.accounts) {
            Ok(accounts) => {
                state.accounts = accounts;
                state.statuses.insert(signature, Ok(()));
            }
            Err(err) => {
                debug!("Stub rejected {}: {}", signature, err);
                state.statuses.insert(signature, Err(err));
            }
        }
        Ok(signature)
    }

    async fn get_signature_status(
        &self,
        signature: &Signature,
        _commitment: CommitmentConfig,
    ) -> SdkResult<SignatureStatus> {
        let mut state = self.state();
        state.calls.push(LedgerCall::GetSignatureStatus {
            signature: *signature,
        });
        if self.never_confirm {
            return Ok(None);
        }
        Ok(state.statuses.get(signature).cloned())
    }

    async fn get_account(&self, address: &Pubkey) -> SdkResult<Option<Account>> {
        let mut state = self.state();
        state.calls.push(LedgerCall::GetAccount { address: *address });
        Ok(state.accounts.get(address).cloned())
    }
}

fn token_owned_account<T: Pack>(state: T) -> Account {
    let mut account = Account::new(
        Rent::default().minimum_balance(T::LEN),
        T::LEN,
        &spl_token::id(),
    );
    state.pack_into_slice(&mut account.data);
    account
}

/// Run every instruction against a copy of `committed`; all or nothing
fn execute(
    message: &Message,
    committed: &HashMap<Pubkey, Account>,
) -> Result<HashMap<Pubkey, Account>, TransactionError> {
    let mut accounts = committed.clone();
    for (index, ix) in message.instructions.iter().enumerate() {
        let ctx = InstructionContext { message, ix };
        ctx.process(&mut accounts)
            .map_err(|err| TransactionError::InstructionError(index as u8, err))?;
    }
    Ok(accounts)
}

struct InstructionContext<'a> {
    message: &'a Message,
    ix: &'a CompiledInstruction,
}

impl InstructionContext<'_> {
    fn process(&self, accounts: &mut HashMap<Pubkey, Account>) -> Result<(), InstructionError> {
        let program_id = self
            .message
            .account_keys
            .get(self.ix.program_id_index as usize)
            .copied()
            .ok_or(InstructionError::NotEnoughAccountKeys)?;

        if program_id == system_program::id() {
            self.process_system(accounts)
        } else if program_id == spl_token::id() {
            self.process_token(accounts)
        } else if program_id == spl_associated_token_account::id() {
            self.process_associated_token(accounts)
        } else {
            Err(InstructionError::IncorrectProgramId)
        }
    }

    fn key(&self, position: usize) -> Result<Pubkey, InstructionError> {
        self.ix
            .accounts
            .get(position)
            .and_then(|index| self.message.account_keys.get(*index as usize))
            .copied()
            .ok_or(InstructionError::NotEnoughAccountKeys)
    }

    fn signer(&self, position: usize) -> Result<Pubkey, InstructionError> {
        let key = self.key(position)?;
        let signed = self
            .ix
            .accounts
            .get(position)
            .is_some_and(|index| self.message.is_signer(*index as usize));
        if !signed {
            return Err(InstructionError::MissingRequiredSignature);
        }
        Ok(key)
    }

    fn process_system(&self, accounts: &mut HashMap<Pubkey, Account>) -> Result<(), InstructionError> {
        let instruction: SystemInstruction = bincode::deserialize(&self.ix.data)
            .map_err(|_| InstructionError::InvalidInstructionData)?;

        match instruction {
            SystemInstruction::CreateAccount {
                lamports,
                space,
                owner,
            } => {
                let from = self.signer(0)?;
                let to = self.signer(1)?;
                let in_use = accounts
                    .get(&to)
                    .is_some_and(|account| account.lamports > 0 || !account.data.is_empty());
                if in_use {
                    return Err(InstructionError::Custom(ACCOUNT_ALREADY_IN_USE));
                }
                debit(accounts, &from, lamports)?;
                accounts.insert(to, Account::new(lamports, space as usize, &owner));
            }
            SystemInstruction::Transfer { lamports } => {
                let from = self.signer(0)?;
                let to = self.key(1)?;
                debit(accounts, &from, lamports)?;
                credit(accounts, &to, lamports);
            }
            _ => return Err(InstructionError::InvalidInstructionData),
        }
        Ok(())
    }

    fn process_token(&self, accounts: &mut HashMap<Pubkey, Account>) -> Result<(), InstructionError> {
        let instruction = TokenInstruction::unpack(&self.ix.data)
            .map_err(|_| InstructionError::InvalidInstructionData)?;

        match instruction {
            TokenInstruction::InitializeMint2 {
                decimals,
                mint_authority,
                freeze_authority,
            } => {
                let address = self.key(0)?;
                let account = accounts
                    .get_mut(&address)
                    .filter(|account| account.owner == spl_token::id())
                    .ok_or(InstructionError::IncorrectProgramId)?;
                if account.data.len() != Mint::LEN {
                    return Err(InstructionError::InvalidAccountData);
                }
                let current = Mint::unpack_unchecked(&account.data)
                    .map_err(|_| InstructionError::InvalidAccountData)?;
                if current.is_initialized {
                    return Err(token_error(TokenError::AlreadyInUse));
                }
                if !Rent::default().is_exempt(account.lamports, account.data.len()) {
                    return Err(token_error(TokenError::NotRentExempt));
                }
                let mint = Mint {
                    mint_authority: COption::Some(mint_authority),
                    supply: 0,
                    decimals,
                    is_initialized: true,
                    freeze_authority,
                };
                mint.pack_into_slice(&mut account.data);
            }
            TokenInstruction::MintToChecked { amount, decimals } => {
                let mint_key = self.key(0)?;
                let destination_key = self.key(1)?;
                let authority = self.signer(2)?;

                let mut mint = load::<Mint>(accounts, &mint_key)?;
                if mint.decimals != decimals {
                    return Err(token_error(TokenError::MintDecimalsMismatch));
                }
                if mint.mint_authority != COption::Some(authority) {
                    return Err(token_error(TokenError::OwnerMismatch));
                }
                let mut destination = load::<TokenAccount>(accounts, &destination_key)?;
                if destination.mint != mint_key {
                    return Err(token_error(TokenError::MintMismatch));
                }

                mint.supply = mint
                    .supply
                    .checked_add(amount)
                    .ok_or_else(|| token_error(TokenError::Overflow))?;
                destination.amount = destination
                    .amount
                    .checked_add(amount)
                    .ok_or_else(|| token_error(TokenError::Overflow))?;
                store(accounts, &mint_key, mint)?;
                store(accounts, &destination_key, destination)?;
            }
            TokenInstruction::TransferChecked { amount, decimals } => {
                let source_key = self.key(0)?;
                let mint_key = self.key(1)?;
                let destination_key = self.key(2)?;
                let owner = self.signer(3)?;

                let mint = load::<Mint>(accounts, &mint_key)?;
                if mint.decimals != decimals {
                    return Err(token_error(TokenError::MintDecimalsMismatch));
                }
                let mut source = load::<TokenAccount>(accounts, &source_key)?;
                let mut destination = load::<TokenAccount>(accounts, &destination_key)?;
                if source.mint != mint_key || destination.mint != mint_key {
                    return Err(token_error(TokenError::MintMismatch));
                }
                if source.owner != owner {
                    return Err(token_error(TokenError::OwnerMismatch));
                }
                if source.amount < amount {
                    return Err(token_error(TokenError::InsufficientFunds));
                }

                if source_key != destination_key {
                    source.amount -= amount;
                    destination.amount = destination
                        .amount
                        .checked_add(amount)
                        .ok_or_else(|| token_error(TokenError::Overflow))?;
                    store(accounts, &source_key, source)?;
                    store(accounts, &destination_key, destination)?;
                }
            }
            _ => return Err(InstructionError::InvalidInstructionData),
        }
        Ok(())
    }

    fn process_associated_token(
        &self,
        accounts: &mut HashMap<Pubkey, Account>,
    ) -> Result<(), InstructionError> {
        let idempotent = match self.ix.data.as_slice() {
            [] | [0] => false,
            [1] => true,
            _ => return Err(InstructionError::InvalidInstructionData),
        };

        let funder = self.signer(0)?;
        let address = self.key(1)?;
        let wallet = self.key(2)?;
        let mint = self.key(3)?;
        let token_program = self.key(5)?;

        if token_program != spl_token::id() {
            return Err(InstructionError::IncorrectProgramId);
        }
        if address != get_associated_token_address_with_program_id(&wallet, &mint, &token_program) {
            return Err(InstructionError::InvalidSeeds);
        }
        load::<Mint>(accounts, &mint)?;

        if let Some(existing) = accounts
            .get(&address)
            .filter(|account| account.owner == spl_token::id())
        {
            let token = TokenAccount::unpack(&existing.data)
                .map_err(|_| InstructionError::InvalidAccountData)?;
            if idempotent && token.owner == wallet && token.mint == mint {
                return Ok(());
            }
            return Err(InstructionError::AccountAlreadyInitialized);
        }

        let lamports = Rent::default().minimum_balance(TokenAccount::LEN);
        debit(accounts, &funder, lamports)?;
        let mut account = Account::new(lamports, TokenAccount::LEN, &spl_token::id());
        TokenAccount {
            mint,
            owner: wallet,
            amount: 0,
            delegate: COption::None,
            state: AccountState::Initialized,
            is_native: COption::None,
            delegated_amount: 0,
            close_authority: COption::None,
        }
        .pack_into_slice(&mut account.data);
        accounts.insert(address, account);
        Ok(())
    }
}

fn token_error(err: TokenError) -> InstructionError {
    InstructionError::Custom(err as u32)
}

fn debit(
    accounts: &mut HashMap<Pubkey, Account>,
    address: &Pubkey,
    lamports: u64,
) -> Result<(), InstructionError> {
    let account = accounts
        .get_mut(address)
        .ok_or(InstructionError::Custom(RESULT_WITH_NEGATIVE_LAMPORTS))?;
    account.lamports = account
        .lamports
        .checked_sub(lamports)
        .ok_or(InstructionError::Custom(RESULT_WITH_NEGATIVE_LAMPORTS))?;
    Ok(())
}

fn credit(accounts: &mut HashMap<Pubkey, Account>, address: &Pubkey, lamports: u64) {
    let account = accounts
        .entry(*address)
        .or_insert_with(|| Account::new(0, 0, &system_program::id()));
    account.lamports = account.lamports.saturating_add(lamports);
}

fn load<T: Pack + IsInitialized>(
    accounts: &HashMap<Pubkey, Account>,
    address: &Pubkey,
) -> Result<T, InstructionError> {
    let account = accounts
        .get(address)
        .ok_or(InstructionError::UninitializedAccount)?;
    if account.owner != spl_token::id() {
        return Err(InstructionError::IncorrectProgramId);
    }
    T::unpack(&account.data).map_err(|_| InstructionError::UninitializedAccount)
}

fn store<T: Pack>(
    accounts: &mut HashMap<Pubkey, Account>,
    address: &Pubkey,
    state: T,
) -> Result<(), InstructionError> {
    let account = accounts
        .get_mut(address)
        .ok_or(InstructionError::UninitializedAccount)?;
    state.pack_into_slice(&mut account.data);
    Ok(())
}

/// Canned wallet behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletScript {
    /// Sign every request
    Approve,
    /// Decline every prompt
    Reject,
    /// Provider breaks before the user sees a prompt
    Fail,
    /// Swap the blockhash, then sign
    Tamper,
    /// Hand the transaction back untouched
    ReturnUnsigned,
    /// Sign, then drop every signature slot after the payer's
    Truncate,
    /// No connected account
    Disconnected,
}

/// [`WalletSigner`] that follows a [`WalletScript`]
pub struct ScriptedWallet {
    keypair: Keypair,
    script: WalletScript,
    sign_requests: AtomicUsize,
}

impl ScriptedWallet {
    pub fn new(script: WalletScript) -> Self {
        Self::with_keypair(Keypair::new(), script)
    }

    pub fn with_keypair(keypair: Keypair, script: WalletScript) -> Self {
        Self {
            keypair,
            script,
            sign_requests: AtomicUsize::new(0),
        }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    /// Number of signing prompts shown so far
    pub fn sign_count(&self) -> usize {
        self.sign_requests.load(Ordering::SeqCst)
    }

    fn sign(&self, transaction: &mut Transaction) -> Result<(), WalletError> {
        let blockhash = transaction.message.recent_blockhash;
        transaction
            .try_partial_sign(&[&self.keypair], blockhash)
            .map_err(|e| WalletError::Provider(e.to_string()))
    }
}

#[async_trait]
impl WalletSigner for ScriptedWallet {
    fn public_key(&self) -> Option<Pubkey> {
        match self.script {
            WalletScript::Disconnected => None,
            _ => Some(self.keypair.pubkey()),
        }
    }

    async fn sign_transaction(
        &self,
        mut transaction: Transaction,
    ) -> Result<Transaction, WalletError> {
        self.sign_requests.fetch_add(1, Ordering::SeqCst);

        match self.script {
            WalletScript::Approve => {
                self.sign(&mut transaction)?;
                Ok(transaction)
            }
            WalletScript::Reject => Err(WalletError::Rejected(
                "User rejected the request.".to_string(),
            )),
            WalletScript::Fail => Err(WalletError::Provider("wallet provider unavailable".to_string())),
            WalletScript::Tamper => {
                transaction.message.recent_blockhash = Hash::new_unique();
                self.sign(&mut transaction)?;
                Ok(transaction)
            }
            WalletScript::ReturnUnsigned => Ok(transaction),
            WalletScript::Truncate => {
                self.sign(&mut transaction)?;
                transaction.signatures.truncate(1);
                Ok(transaction)
            }
            WalletScript::Disconnected => Err(WalletError::Disconnected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions;
    use solana_sdk::{instruction::Instruction, native_token::LAMPORTS_PER_SOL, system_instruction};

    async fn submit(ledger: &StubLedger, payer: &Keypair, ixs: &[Instruction]) -> Signature {
        let blockhash = ledger.current_blockhash();
        let tx = Transaction::new_signed_with_payer(ixs, Some(&payer.pubkey()), &[payer], blockhash);
        let wire = bincode::serialize(&tx).unwrap();
        ledger.send_transaction(&wire).await.unwrap()
    }

    #[tokio::test]
    async fn failed_instruction_rolls_back_the_whole_transaction() {
        let payer = Keypair::new();
        let ledger = StubLedger::new().with_balance(payer.pubkey(), LAMPORTS_PER_SOL);
        let recipient = Pubkey::new_unique();

        let signature = submit(
            &ledger,
            &payer,
            &[
                system_instruction::transfer(&payer.pubkey(), &recipient, 1_000),
                system_instruction::transfer(&payer.pubkey(), &recipient, 2 * LAMPORTS_PER_SOL),
            ],
        )
        .await;

        assert!(matches!(
            ledger.transaction_status(&signature),
            Some(Err(TransactionError::InstructionError(1, _)))
        ));
        assert_eq!(ledger.balance_of(&recipient), 0);
        assert_eq!(ledger.balance_of(&payer.pubkey()), LAMPORTS_PER_SOL);
    }

    #[tokio::test]
    async fn stale_blockhash_is_refused() {
        let payer = Keypair::new();
        let ledger = StubLedger::new().with_balance(payer.pubkey(), LAMPORTS_PER_SOL);
        let ix = system_instruction::transfer(&payer.pubkey(), &Pubkey::new_unique(), 1);
        let tx = Transaction::new_signed_with_payer(&[ix], Some(&payer.pubkey()), &[&payer], Hash::new_unique());

        let err = ledger
            .send_transaction(&bincode::serialize(&tx).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::Broadcast(_)));
    }

    #[test]
    fn seeded_token_balance_is_visible() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let ledger = StubLedger::new()
            .with_mint(mint, Pubkey::new_unique(), 2)
            .with_token_balance(owner, mint, 500);

        assert_eq!(ledger.token_balance(&owner, &mint), Some(500));
        assert_eq!(ledger.mint_state(&mint).unwrap().supply, 500);
    }

    #[tokio::test]
    async fn mint_to_requires_the_mint_authority() {
        let payer = Keypair::new();
        let mint = Pubkey::new_unique();
        let ledger = StubLedger::new()
            .with_balance(payer.pubkey(), LAMPORTS_PER_SOL)
            .with_mint(mint, Pubkey::new_unique(), 0);

        let (account, create) =
            instructions::ensure_token_account(&payer.pubkey(), &payer.pubkey(), &mint);
        let mint_to = instructions::mint_to(&mint, &account, &payer.pubkey(), 10, 0).unwrap();
        let signature = submit(&ledger, &payer, &[create, mint_to]).await;

        assert!(matches!(
            ledger.transaction_status(&signature),
            Some(Err(TransactionError::InstructionError(1, InstructionError::Custom(_))))
        ));
        assert!(ledger.account(&account).is_none());
    }

    #[tokio::test]
    async fn scripted_wallet_counts_prompts() {
        let wallet = ScriptedWallet::new(WalletScript::Reject);
        let payer = wallet.pubkey();
        let ix = system_instruction::transfer(&payer, &Pubkey::new_unique(), 1);
        let tx = Transaction::new_unsigned(Message::new(&[ix], Some(&payer)));

        let result = wallet.sign_transaction(tx).await;

        assert!(matches!(result, Err(WalletError::Rejected(_))));
        assert_eq!(wallet.sign_count(), 1);
    }
}
