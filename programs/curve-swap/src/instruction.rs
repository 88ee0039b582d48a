//! Instruction codec and client-side builders.
//!
//! Wire format is one discriminator byte followed by the borsh-encoded args:
//!   0 = Initialize
//!   1 = Swap
//!   2 = DepositAllTokenTypes
//!   3 = WithdrawAllTokenTypes

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
    system_program,
};

use crate::{curve::CurveConfig, error::SwapError, fees::Fees};

// ── Instruction Discriminators ──────────────────────────────────────────────

pub const IX_INITIALIZE: u8 = 0;
pub const IX_SWAP: u8 = 1;
pub const IX_DEPOSIT_ALL_TOKEN_TYPES: u8 = 2;
pub const IX_WITHDRAW_ALL_TOKEN_TYPES: u8 = 3;

// ── Args ────────────────────────────────────────────────────────────────────

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitializeArgs {
    pub fees: Fees,
    pub curve: CurveConfig,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapArgs {
    pub amount_in: u64,
    pub minimum_amount_out: u64,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositAllTokenTypesArgs {
    pub pool_token_amount: u64,
    pub maximum_token_a_amount: u64,
    pub maximum_token_b_amount: u64,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawAllTokenTypesArgs {
    pub pool_token_amount: u64,
    pub minimum_token_a_amount: u64,
    pub minimum_token_b_amount: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapInstruction {
    Initialize(InitializeArgs),
    Swap(SwapArgs),
    DepositAllTokenTypes(DepositAllTokenTypesArgs),
    WithdrawAllTokenTypes(WithdrawAllTokenTypesArgs),
}

fn decode<T: BorshDeserialize>(rest: &[u8]) -> Result<T, ProgramError> {
    T::try_from_slice(rest).map_err(|_| SwapError::InvalidInstruction.into())
}

impl SwapInstruction {
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        let (&disc, rest) = input
            .split_first()
            .ok_or(SwapError::InvalidInstruction)?;
        Ok(match disc {
            IX_INITIALIZE => Self::Initialize(decode(rest)?),
            IX_SWAP => Self::Swap(decode(rest)?),
            IX_DEPOSIT_ALL_TOKEN_TYPES => Self::DepositAllTokenTypes(decode(rest)?),
            IX_WITHDRAW_ALL_TOKEN_TYPES => Self::WithdrawAllTokenTypes(decode(rest)?),
            _ => return Err(SwapError::InvalidInstruction.into()),
        })
    }

    pub fn pack(&self) -> Result<Vec<u8>, ProgramError> {
        let mut data = Vec::with_capacity(1 + Fees::LEN + CurveConfig::LEN);
        match self {
            Self::Initialize(args) => {
                data.push(IX_INITIALIZE);
                args.serialize(&mut data)?;
            }
            Self::Swap(args) => {
                data.push(IX_SWAP);
                args.serialize(&mut data)?;
            }
            Self::DepositAllTokenTypes(args) => {
                data.push(IX_DEPOSIT_ALL_TOKEN_TYPES);
                args.serialize(&mut data)?;
            }
            Self::WithdrawAllTokenTypes(args) => {
                data.push(IX_WITHDRAW_ALL_TOKEN_TYPES);
                args.serialize(&mut data)?;
            }
        }
        Ok(data)
    }
}

// ── Instruction Builders ────────────────────────────────────────────────────

/// Create a pool over two funded reserves.
///
/// Accounts:
///   0. `[writable]` swap authority (PDA of the pool)
///   1. `[signer, writable]` initializer (payer)
///   2. `[signer, writable]` pool; created here when empty
///   3. `[writable]` pool mint
///   4. `[]` reserve A token account
///   5. `[]` reserve B token account
///   6. `[]` fee account
///   7. `[writable]` pool token destination
///   8. `[]` token program
///   9. `[]` system program
#[allow(clippy::too_many_arguments)]
pub fn initialize(
    program_id: &Pubkey,
    token_program_id: &Pubkey,
    authority: &Pubkey,
    initializer: &Pubkey,
    pool: &Pubkey,
    pool_mint: &Pubkey,
    token_a: &Pubkey,
    token_b: &Pubkey,
    fee_account: &Pubkey,
    destination: &Pubkey,
    fees: Fees,
    curve: CurveConfig,
) -> Result<Instruction, ProgramError> {
    let data = SwapInstruction::Initialize(InitializeArgs { fees, curve }).pack()?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*authority, false),
            AccountMeta::new(*initializer, true),
            AccountMeta::new(*pool, true),
            AccountMeta::new(*pool_mint, false),
            AccountMeta::new_readonly(*token_a, false),
            AccountMeta::new_readonly(*token_b, false),
            AccountMeta::new_readonly(*fee_account, false),
            AccountMeta::new(*destination, false),
            AccountMeta::new_readonly(*token_program_id, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data,
    })
}

/// Trade `amount_in` of the source mint for the other side of the pool.
///
/// Accounts:
///   0. `[]` swap authority
///   1. `[]` pool
///   2. `[signer]` user transfer authority
///   3. `[writable]` source token account
///   4. `[writable]` destination token account
///   5. `[writable]` reserve A
///   6. `[writable]` reserve B
///   7. `[writable]` pool mint
///   8. `[writable]` fee account
///   9. `[]` token program
///   10. `[writable]` host fee account (optional)
#[allow(clippy::too_many_arguments)]
pub fn swap(
    program_id: &Pubkey,
    token_program_id: &Pubkey,
    authority: &Pubkey,
    pool: &Pubkey,
    user_transfer_authority: &Pubkey,
    source: &Pubkey,
    destination: &Pubkey,
    token_a: &Pubkey,
    token_b: &Pubkey,
    pool_mint: &Pubkey,
    fee_account: &Pubkey,
    host_fee_account: Option<&Pubkey>,
    amount_in: u64,
    minimum_amount_out: u64,
) -> Result<Instruction, ProgramError> {
    let data = SwapInstruction::Swap(SwapArgs {
        amount_in,
        minimum_amount_out,
    })
    .pack()?;

    let mut accounts = vec![
        AccountMeta::new_readonly(*authority, false),
        AccountMeta::new_readonly(*pool, false),
        AccountMeta::new_readonly(*user_transfer_authority, true),
        AccountMeta::new(*source, false),
        AccountMeta::new(*destination, false),
        AccountMeta::new(*token_a, false),
        AccountMeta::new(*token_b, false),
        AccountMeta::new(*pool_mint, false),
        AccountMeta::new(*fee_account, false),
        AccountMeta::new_readonly(*token_program_id, false),
    ];
    if let Some(host_fee_account) = host_fee_account {
        accounts.push(AccountMeta::new(*host_fee_account, false));
    }

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data,
    })
}

/// Deposit both tokens in proportion, receiving exactly `pool_token_amount`.
///
/// Accounts:
///   0. `[]` swap authority
///   1. `[]` pool
///   2. `[signer]` user transfer authority
///   3. `[writable]` source A
///   4. `[writable]` source B
///   5. `[writable]` reserve A
///   6. `[writable]` reserve B
///   7. `[writable]` pool mint
///   8. `[writable]` pool token destination
///   9. `[]` token program
#[allow(clippy::too_many_arguments)]
pub fn deposit_all_token_types(
    program_id: &Pubkey,
    token_program_id: &Pubkey,
    authority: &Pubkey,
    pool: &Pubkey,
    user_transfer_authority: &Pubkey,
    source_a: &Pubkey,
    source_b: &Pubkey,
    token_a: &Pubkey,
    token_b: &Pubkey,
    pool_mint: &Pubkey,
    destination: &Pubkey,
    args: DepositAllTokenTypesArgs,
) -> Result<Instruction, ProgramError> {
    let data = SwapInstruction::DepositAllTokenTypes(args).pack()?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*authority, false),
            AccountMeta::new_readonly(*pool, false),
            AccountMeta::new_readonly(*user_transfer_authority, true),
            AccountMeta::new(*source_a, false),
            AccountMeta::new(*source_b, false),
            AccountMeta::new(*token_a, false),
            AccountMeta::new(*token_b, false),
            AccountMeta::new(*pool_mint, false),
            AccountMeta::new(*destination, false),
            AccountMeta::new_readonly(*token_program_id, false),
        ],
        data,
    })
}

/// Redeem pool tokens for a proportional share of both reserves.
///
/// Accounts:
///   0. `[]` swap authority
///   1. `[]` pool
///   2. `[signer]` user transfer authority
///   3. `[writable]` pool mint
///   4. `[writable]` source pool token account
///   5. `[writable]` reserve A
///   6. `[writable]` reserve B
///   7. `[writable]` destination A
///   8. `[writable]` destination B
///   9. `[writable]` fee account
///   10. `[]` token program
#[allow(clippy::too_many_arguments)]
pub fn withdraw_all_token_types(
    program_id: &Pubkey,
    token_program_id: &Pubkey,
    authority: &Pubkey,
    pool: &Pubkey,
    user_transfer_authority: &Pubkey,
    pool_mint: &Pubkey,
    source: &Pubkey,
    token_a: &Pubkey,
    token_b: &Pubkey,
    destination_a: &Pubkey,
    destination_b: &Pubkey,
    fee_account: &Pubkey,
    args: WithdrawAllTokenTypesArgs,
) -> Result<Instruction, ProgramError> {
    let data = SwapInstruction::WithdrawAllTokenTypes(args).pack()?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*authority, false),
            AccountMeta::new_readonly(*pool, false),
            AccountMeta::new_readonly(*user_transfer_authority, true),
            AccountMeta::new(*pool_mint, false),
            AccountMeta::new(*source, false),
            AccountMeta::new(*token_a, false),
            AccountMeta::new(*token_b, false),
            AccountMeta::new(*destination_a, false),
            AccountMeta::new(*destination_b, false),
            AccountMeta::new(*fee_account, false),
            AccountMeta::new_readonly(*token_program_id, false),
        ],
        data,
    })
}
