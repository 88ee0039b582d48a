use borsh::BorshSerialize;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program::{invoke, invoke_signed, set_return_data},
    program_error::ProgramError,
    program_option::COption,
    program_pack::Pack,
    pubkey::Pubkey,
    rent::Rent,
    system_instruction,
    system_program,
    sysvar::Sysvar,
};
use spl_token::state::{Account as TokenAccount, Mint};

use crate::{
    authority::{find_authority, verify_authority},
    curve::{RoundDirection, SwapCurve, TradeDirection},
    error::SwapError,
    instruction::{
        DepositAllTokenTypesArgs, InitializeArgs, SwapArgs, SwapInstruction,
        WithdrawAllTokenTypesArgs,
    },
    state::{PoolState, SwapResult},
};

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    match SwapInstruction::unpack(instruction_data)? {
        SwapInstruction::Initialize(args) => process_initialize(program_id, accounts, args),
        SwapInstruction::Swap(args) => process_swap(program_id, accounts, args),
        SwapInstruction::DepositAllTokenTypes(args) => {
            process_deposit_all_token_types(program_id, accounts, args)
        }
        SwapInstruction::WithdrawAllTokenTypes(args) => {
            process_withdraw_all_token_types(program_id, accounts, args)
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn assert_signer(info: &AccountInfo) -> ProgramResult {
    if !info.is_signer {
        return Err(SwapError::AccountNotSigner.into());
    }
    Ok(())
}

fn assert_writable(info: &AccountInfo) -> ProgramResult {
    if !info.is_writable {
        return Err(SwapError::AccountNotWritable.into());
    }
    Ok(())
}

fn unpack_token_account(info: &AccountInfo, token_program_id: &Pubkey) -> Result<TokenAccount, ProgramError> {
    if info.owner != token_program_id {
        return Err(SwapError::IncorrectTokenProgramId.into());
    }
    TokenAccount::unpack(&info.try_borrow_data()?).map_err(|_| SwapError::ExpectedAccount.into())
}

fn unpack_mint(info: &AccountInfo, token_program_id: &Pubkey) -> Result<Mint, ProgramError> {
    if info.owner != token_program_id {
        return Err(SwapError::IncorrectTokenProgramId.into());
    }
    Mint::unpack(&info.try_borrow_data()?).map_err(|_| SwapError::ExpectedMint.into())
}

/// Load an initialized pool and check the caller passed its derived authority.
fn load_pool(program_id: &Pubkey, pool_info: &AccountInfo, authority_info: &AccountInfo) -> Result<PoolState, ProgramError> {
    if pool_info.owner != program_id {
        return Err(SwapError::NotInitialized.into());
    }
    let pool = PoolState::unpack_initialized(&pool_info.try_borrow_data()?)?;
    verify_authority(program_id, pool_info.key, pool.bump_seed, authority_info.key)?;
    Ok(pool)
}

fn check_reserves(pool: &PoolState, token_a: &AccountInfo, token_b: &AccountInfo) -> ProgramResult {
    if *token_a.key != pool.token_a_account || *token_b.key != pool.token_b_account {
        return Err(SwapError::IncorrectSwapAccount.into());
    }
    Ok(())
}

fn check_pool_mint(pool: &PoolState, pool_mint: &AccountInfo) -> ProgramResult {
    if *pool_mint.key != pool.pool_mint {
        return Err(SwapError::IncorrectPoolMint.into());
    }
    Ok(())
}

fn check_token_program(pool: &PoolState, token_program: &AccountInfo) -> ProgramResult {
    if *token_program.key != pool.token_program_id {
        return Err(SwapError::IncorrectTokenProgramId.into());
    }
    Ok(())
}

/// User-supplied accounts may never be one of the pool reserves.
fn check_not_reserve(pool: &PoolState, user_accounts: &[&AccountInfo]) -> ProgramResult {
    for info in user_accounts {
        if *info.key == pool.token_a_account || *info.key == pool.token_b_account {
            return Err(SwapError::InvalidInput.into());
        }
    }
    Ok(())
}

/// Allocate the pool record on a fresh keypair account that signed the transaction.
fn create_pool_account<'a>(
    payer: &AccountInfo<'a>,
    pool: &AccountInfo<'a>,
    system_program: &AccountInfo<'a>,
    program_id: &Pubkey,
) -> ProgramResult {
    let rent = Rent::get()?;
    let lamports = rent.minimum_balance(PoolState::LEN);

    invoke(
        &system_instruction::create_account(
            payer.key,
            pool.key,
            lamports,
            PoolState::LEN as u64,
            program_id,
        ),
        &[payer.clone(), pool.clone(), system_program.clone()],
    )
}

/// Transfer SPL tokens; signs as the swap authority when seeds are supplied.
fn transfer_tokens<'a>(
    token_program: &AccountInfo<'a>,
    source: &AccountInfo<'a>,
    destination: &AccountInfo<'a>,
    authority: &AccountInfo<'a>,
    amount: u64,
    signer_seeds: &[&[u8]],
) -> ProgramResult {
    let ix = spl_token::instruction::transfer(
        token_program.key,
        source.key,
        destination.key,
        authority.key,
        &[],
        amount,
    )?;
    let account_infos = [
        source.clone(),
        destination.clone(),
        authority.clone(),
        token_program.clone(),
    ];

    if signer_seeds.is_empty() {
        invoke(&ix, &account_infos)
    } else {
        invoke_signed(&ix, &account_infos, &[signer_seeds])
    }
}

fn mint_tokens_signed<'a>(
    token_program: &AccountInfo<'a>,
    mint: &AccountInfo<'a>,
    destination: &AccountInfo<'a>,
    authority: &AccountInfo<'a>,
    amount: u64,
    signer_seeds: &[&[u8]],
) -> ProgramResult {
    let ix = spl_token::instruction::mint_to(
        token_program.key,
        mint.key,
        destination.key,
        authority.key,
        &[],
        amount,
    )?;

    invoke_signed(
        &ix,
        &[
            mint.clone(),
            destination.clone(),
            authority.clone(),
            token_program.clone(),
        ],
        &[signer_seeds],
    )
}

fn burn_tokens<'a>(
    token_program: &AccountInfo<'a>,
    token_account: &AccountInfo<'a>,
    mint: &AccountInfo<'a>,
    owner: &AccountInfo<'a>,
    amount: u64,
) -> ProgramResult {
    let ix = spl_token::instruction::burn(
        token_program.key,
        token_account.key,
        mint.key,
        owner.key,
        &[],
        amount,
    )?;

    invoke(
        &ix,
        &[
            token_account.clone(),
            mint.clone(),
            owner.clone(),
            token_program.clone(),
        ],
    )
}

// ---------------------------------------------------------------------------
// Instruction 0: Initialize
// ---------------------------------------------------------------------------
// Accounts:
//   0. [writable]          swap authority (PDA, seeds: [pool])
//   1. [signer, writable]  initializer
//   2. [writable]          pool (signer when it still has to be created)
//   3. [writable]          pool mint
//   4. []                  reserve A
//   5. []                  reserve B
//   6. []                  fee account
//   7. [writable]          pool token destination
//   8. []                  token program
//   9. []                  system program

fn process_initialize(program_id: &Pubkey, accounts: &[AccountInfo], args: InitializeArgs) -> ProgramResult {
    let iter = &mut accounts.iter();
    let authority_info = next_account_info(iter)?;
    let initializer = next_account_info(iter)?;
    let pool_info = next_account_info(iter)?;
    let pool_mint_info = next_account_info(iter)?;
    let token_a_info = next_account_info(iter)?;
    let token_b_info = next_account_info(iter)?;
    let fee_account_info = next_account_info(iter)?;
    let destination_info = next_account_info(iter)?;
    let token_program = next_account_info(iter)?;
    let system_prog = next_account_info(iter)?;

    assert_signer(initializer)?;
    assert_writable(pool_info)?;
    assert_writable(pool_mint_info)?;
    assert_writable(destination_info)?;

    let needs_allocation = pool_info.data_is_empty();
    if needs_allocation {
        assert_signer(pool_info)?;
    } else {
        if pool_info.owner != program_id {
            return Err(SwapError::InvalidOwner.into());
        }
        if !PoolState::is_unused(&pool_info.try_borrow_data()?) {
            return Err(SwapError::AlreadyInitialized.into());
        }
        if pool_info.data_len() != PoolState::LEN {
            return Err(ProgramError::InvalidAccountData);
        }
    }

    if *token_program.key != spl_token::id() {
        return Err(SwapError::IncorrectTokenProgramId.into());
    }
    if *system_prog.key != system_program::id() {
        return Err(ProgramError::IncorrectProgramId);
    }

    let (authority, bump_seed) = find_authority(program_id, pool_info.key);
    if *authority_info.key != authority {
        return Err(SwapError::InvalidAuthority.into());
    }

    let token_a = unpack_token_account(token_a_info, token_program.key)?;
    let token_b = unpack_token_account(token_b_info, token_program.key)?;
    let fee_account = unpack_token_account(fee_account_info, token_program.key)?;
    let destination = unpack_token_account(destination_info, token_program.key)?;
    let pool_mint = unpack_mint(pool_mint_info, token_program.key)?;

    if token_a.owner != authority || token_b.owner != authority {
        return Err(SwapError::InvalidOwner.into());
    }
    if fee_account.owner == authority || destination.owner == authority {
        return Err(SwapError::InvalidOutputOwner.into());
    }
    if pool_mint.mint_authority != COption::Some(authority) {
        return Err(SwapError::InvalidOwner.into());
    }
    if token_a.mint == token_b.mint {
        return Err(SwapError::RepeatedMint.into());
    }
    if token_a.delegate.is_some() || token_b.delegate.is_some() {
        return Err(SwapError::InvalidDelegate.into());
    }
    if token_a.close_authority.is_some() || token_b.close_authority.is_some() {
        return Err(SwapError::InvalidCloseAuthority.into());
    }
    if pool_mint.supply != 0 {
        return Err(SwapError::InvalidSupply.into());
    }
    if pool_mint.freeze_authority.is_some() {
        return Err(SwapError::InvalidFreezeAuthority.into());
    }
    if fee_account.mint != *pool_mint_info.key || destination.mint != *pool_mint_info.key {
        return Err(SwapError::IncorrectPoolMint.into());
    }

    args.fees.validate()?;
    let curve = SwapCurve::try_from(&args.curve)?;
    let calculator = curve.calculator();
    calculator.validate()?;
    calculator.validate_supply(token_a.amount, token_b.amount)?;
    let initial_supply = calculator.new_pool_supply(token_a.amount, token_b.amount)?;

    if needs_allocation {
        create_pool_account(initializer, pool_info, system_prog, program_id)?;
    }

    let authority_seeds: &[&[u8]] = &[pool_info.key.as_ref(), &[bump_seed]];
    mint_tokens_signed(
        token_program,
        pool_mint_info,
        destination_info,
        authority_info,
        initial_supply,
        authority_seeds,
    )?;

    let pool = PoolState {
        is_initialized: true,
        bump_seed,
        token_program_id: *token_program.key,
        token_a_account: *token_a_info.key,
        token_b_account: *token_b_info.key,
        pool_mint: *pool_mint_info.key,
        token_a_mint: token_a.mint,
        token_b_mint: token_b.mint,
        pool_fee_account: *fee_account_info.key,
        fees: args.fees,
        curve: args.curve,
    };
    pool.serialize(&mut &mut pool_info.try_borrow_mut_data()?[..])?;

    msg!(
        "EVENT:PoolInitialized:{{\"pool\":\"{}\",\"curve_type\":{},\"curve_parameters\":{},\"token_a\":\"{}\",\"token_b\":\"{}\",\"pool_mint\":\"{}\",\"initial_supply\":{}}}",
        pool_info.key,
        args.curve.curve_type,
        args.curve.curve_parameters,
        token_a_info.key,
        token_b_info.key,
        pool_mint_info.key,
        initial_supply,
    );

    Ok(())
}

// ---------------------------------------------------------------------------
// Instruction 1: Swap
// ---------------------------------------------------------------------------
// Accounts:
//   0.  []         swap authority
//   1.  []         pool
//   2.  [signer]   user transfer authority
//   3.  [writable] source
//   4.  [writable] destination
//   5.  [writable] reserve A
//   6.  [writable] reserve B
//   7.  [writable] pool mint
//   8.  [writable] fee account
//   9.  []         token program
//   10. [writable] host fee account (optional)

fn process_swap(program_id: &Pubkey, accounts: &[AccountInfo], args: SwapArgs) -> ProgramResult {
    let iter = &mut accounts.iter();
    let authority_info = next_account_info(iter)?;
    let pool_info = next_account_info(iter)?;
    let user_transfer_authority = next_account_info(iter)?;
    let source_info = next_account_info(iter)?;
    let destination_info = next_account_info(iter)?;
    let token_a_info = next_account_info(iter)?;
    let token_b_info = next_account_info(iter)?;
    let pool_mint_info = next_account_info(iter)?;
    let fee_account_info = next_account_info(iter)?;
    let token_program = next_account_info(iter)?;
    let host_fee_info = next_account_info(iter).ok();

    assert_signer(user_transfer_authority)?;

    let pool = load_pool(program_id, pool_info, authority_info)?;

    if args.amount_in == 0 {
        return Err(SwapError::ZeroAmount.into());
    }

    check_reserves(&pool, token_a_info, token_b_info)?;
    check_pool_mint(&pool, pool_mint_info)?;
    if *fee_account_info.key != pool.pool_fee_account {
        return Err(SwapError::IncorrectFeeAccount.into());
    }
    check_token_program(&pool, token_program)?;
    check_not_reserve(&pool, &[source_info, destination_info])?;

    assert_writable(source_info)?;
    assert_writable(destination_info)?;
    assert_writable(token_a_info)?;
    assert_writable(token_b_info)?;
    assert_writable(pool_mint_info)?;
    assert_writable(fee_account_info)?;

    let source = unpack_token_account(source_info, token_program.key)?;
    let destination = unpack_token_account(destination_info, token_program.key)?;
    let token_a = unpack_token_account(token_a_info, token_program.key)?;
    let token_b = unpack_token_account(token_b_info, token_program.key)?;
    let pool_mint = unpack_mint(pool_mint_info, token_program.key)?;

    let trade_direction = if source.mint == pool.token_a_mint && destination.mint == pool.token_b_mint {
        TradeDirection::AtoB
    } else if source.mint == pool.token_b_mint && destination.mint == pool.token_a_mint {
        TradeDirection::BtoA
    } else {
        msg!(
            "Swap rejected: source mint {} / destination mint {} do not match the pool",
            source.mint,
            destination.mint,
        );
        return Err(SwapError::InvalidMint.into());
    };

    let (reserve_in_info, reserve_out_info, reserve_in, reserve_out) = match trade_direction {
        TradeDirection::AtoB => (token_a_info, token_b_info, token_a.amount, token_b.amount),
        TradeDirection::BtoA => (token_b_info, token_a_info, token_b.amount, token_a.amount),
    };

    let curve = pool.swap_curve()?;
    let quote = curve.swap(args.amount_in, reserve_in, reserve_out, trade_direction, &pool.fees)?;

    if quote.amount_out < args.minimum_amount_out {
        return Err(SwapError::SlippageExceeded.into());
    }
    if quote.amount_out >= reserve_out {
        return Err(SwapError::InsufficientLiquidity.into());
    }
    if quote.amount_out == 0 {
        return Err(SwapError::ZeroAmount.into());
    }

    let new_reserve_in = reserve_in
        .checked_add(args.amount_in)
        .ok_or(SwapError::MathOverflow)?;
    let new_reserve_out = reserve_out
        .checked_sub(quote.amount_out)
        .ok_or(SwapError::MathOverflow)?;
    let (reserve_a, reserve_b) = match trade_direction {
        TradeDirection::AtoB => (new_reserve_in, new_reserve_out),
        TradeDirection::BtoA => (new_reserve_out, new_reserve_in),
    };

    // Owner fee is paid in newly minted pool tokens valued over the post-swap reserves.
    let owner_pool_tokens = if quote.owner_fee > 0 {
        curve.calculator().trading_tokens_to_pool_tokens(
            quote.owner_fee,
            reserve_a,
            reserve_b,
            pool_mint.supply,
            trade_direction,
        )?
    } else {
        0
    };

    let mut host_fee = 0u64;
    let host_fee_account = match host_fee_info {
        Some(host_info) if owner_pool_tokens > 0 => {
            assert_writable(host_info)?;
            let host = unpack_token_account(host_info, token_program.key)?;
            if host.mint != pool.pool_mint {
                return Err(SwapError::IncorrectPoolMint.into());
            }
            host_fee = pool.fees.host_fee(owner_pool_tokens)?;
            Some(host_info)
        }
        _ => None,
    };
    let owner_fee_remainder = owner_pool_tokens
        .checked_sub(host_fee)
        .ok_or(SwapError::MathOverflow)?;

    // All checks passed; move tokens.
    transfer_tokens(
        token_program,
        source_info,
        reserve_in_info,
        user_transfer_authority,
        args.amount_in,
        &[],
    )?;

    let authority_seeds: &[&[u8]] = &[pool_info.key.as_ref(), &[pool.bump_seed]];
    transfer_tokens(
        token_program,
        reserve_out_info,
        destination_info,
        authority_info,
        quote.amount_out,
        authority_seeds,
    )?;

    if let Some(host_info) = host_fee_account {
        if host_fee > 0 {
            mint_tokens_signed(
                token_program,
                pool_mint_info,
                host_info,
                authority_info,
                host_fee,
                authority_seeds,
            )?;
        }
    }
    if owner_fee_remainder > 0 {
        mint_tokens_signed(
            token_program,
            pool_mint_info,
            fee_account_info,
            authority_info,
            owner_fee_remainder,
            authority_seeds,
        )?;
    }

    let result = SwapResult {
        amount_out: quote.amount_out,
        reserve_a,
        reserve_b,
    };
    set_return_data(&borsh::to_vec(&result)?);

    msg!(
        "EVENT:Swap:{{\"pool\":\"{}\",\"a_to_b\":{},\"amount_in\":{},\"amount_out\":{},\"trade_fee\":{},\"owner_fee\":{},\"host_fee\":{},\"reserve_a\":{},\"reserve_b\":{}}}",
        pool_info.key,
        trade_direction == TradeDirection::AtoB,
        args.amount_in,
        quote.amount_out,
        quote.trade_fee,
        owner_fee_remainder,
        host_fee,
        reserve_a,
        reserve_b,
    );

    Ok(())
}

// ---------------------------------------------------------------------------
// Instruction 2: DepositAllTokenTypes
// ---------------------------------------------------------------------------
// Accounts:
//   0. []         swap authority
//   1. []         pool
//   2. [signer]   user transfer authority
//   3. [writable] source A
//   4. [writable] source B
//   5. [writable] reserve A
//   6. [writable] reserve B
//   7. [writable] pool mint
//   8. [writable] pool token destination
//   9. []         token program

fn process_deposit_all_token_types(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    args: DepositAllTokenTypesArgs,
) -> ProgramResult {
    let iter = &mut accounts.iter();
    let authority_info = next_account_info(iter)?;
    let pool_info = next_account_info(iter)?;
    let user_transfer_authority = next_account_info(iter)?;
    let source_a_info = next_account_info(iter)?;
    let source_b_info = next_account_info(iter)?;
    let token_a_info = next_account_info(iter)?;
    let token_b_info = next_account_info(iter)?;
    let pool_mint_info = next_account_info(iter)?;
    let destination_info = next_account_info(iter)?;
    let token_program = next_account_info(iter)?;

    assert_signer(user_transfer_authority)?;

    let pool = load_pool(program_id, pool_info, authority_info)?;
    let curve = pool.swap_curve()?;
    let calculator = curve.calculator();
    if !calculator.allows_deposits() {
        return Err(SwapError::UnsupportedCurveOperation.into());
    }

    check_reserves(&pool, token_a_info, token_b_info)?;
    check_pool_mint(&pool, pool_mint_info)?;
    check_token_program(&pool, token_program)?;
    check_not_reserve(&pool, &[source_a_info, source_b_info, destination_info])?;

    if args.pool_token_amount == 0 {
        return Err(SwapError::ZeroAmount.into());
    }

    assert_writable(source_a_info)?;
    assert_writable(source_b_info)?;
    assert_writable(token_a_info)?;
    assert_writable(token_b_info)?;
    assert_writable(pool_mint_info)?;
    assert_writable(destination_info)?;

    let token_a = unpack_token_account(token_a_info, token_program.key)?;
    let token_b = unpack_token_account(token_b_info, token_program.key)?;
    let pool_mint = unpack_mint(pool_mint_info, token_program.key)?;
    let destination = unpack_token_account(destination_info, token_program.key)?;
    if destination.mint != pool.pool_mint {
        return Err(SwapError::IncorrectPoolMint.into());
    }

    let amounts = calculator.pool_tokens_to_trading_tokens(
        args.pool_token_amount,
        pool_mint.supply,
        token_a.amount,
        token_b.amount,
        RoundDirection::Ceiling,
    )?;
    if amounts.token_a_amount > args.maximum_token_a_amount
        || amounts.token_b_amount > args.maximum_token_b_amount
    {
        return Err(SwapError::SlippageExceeded.into());
    }
    if amounts.token_a_amount == 0 || amounts.token_b_amount == 0 {
        return Err(SwapError::ZeroAmount.into());
    }

    transfer_tokens(
        token_program,
        source_a_info,
        token_a_info,
        user_transfer_authority,
        amounts.token_a_amount,
        &[],
    )?;
    transfer_tokens(
        token_program,
        source_b_info,
        token_b_info,
        user_transfer_authority,
        amounts.token_b_amount,
        &[],
    )?;

    let authority_seeds: &[&[u8]] = &[pool_info.key.as_ref(), &[pool.bump_seed]];
    mint_tokens_signed(
        token_program,
        pool_mint_info,
        destination_info,
        authority_info,
        args.pool_token_amount,
        authority_seeds,
    )?;

    msg!(
        "EVENT:DepositAllTokenTypes:{{\"pool\":\"{}\",\"pool_token_amount\":{},\"token_a_amount\":{},\"token_b_amount\":{}}}",
        pool_info.key,
        args.pool_token_amount,
        amounts.token_a_amount,
        amounts.token_b_amount,
    );

    Ok(())
}

// ---------------------------------------------------------------------------
// Instruction 3: WithdrawAllTokenTypes
// ---------------------------------------------------------------------------
// Accounts:
//   0.  []         swap authority
//   1.  []         pool
//   2.  [signer]   user transfer authority
//   3.  [writable] pool mint
//   4.  [writable] source pool token account
//   5.  [writable] reserve A
//   6.  [writable] reserve B
//   7.  [writable] destination A
//   8.  [writable] destination B
//   9.  [writable] fee account
//   10. []         token program

fn process_withdraw_all_token_types(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    args: WithdrawAllTokenTypesArgs,
) -> ProgramResult {
    let iter = &mut accounts.iter();
    let authority_info = next_account_info(iter)?;
    let pool_info = next_account_info(iter)?;
    let user_transfer_authority = next_account_info(iter)?;
    let pool_mint_info = next_account_info(iter)?;
    let source_info = next_account_info(iter)?;
    let token_a_info = next_account_info(iter)?;
    let token_b_info = next_account_info(iter)?;
    let destination_a_info = next_account_info(iter)?;
    let destination_b_info = next_account_info(iter)?;
    let fee_account_info = next_account_info(iter)?;
    let token_program = next_account_info(iter)?;

    assert_signer(user_transfer_authority)?;

    let pool = load_pool(program_id, pool_info, authority_info)?;

    check_reserves(&pool, token_a_info, token_b_info)?;
    check_pool_mint(&pool, pool_mint_info)?;
    if *fee_account_info.key != pool.pool_fee_account {
        return Err(SwapError::IncorrectFeeAccount.into());
    }
    check_token_program(&pool, token_program)?;
    check_not_reserve(&pool, &[source_info, destination_a_info, destination_b_info])?;

    if args.pool_token_amount == 0 {
        return Err(SwapError::ZeroAmount.into());
    }

    assert_writable(pool_mint_info)?;
    assert_writable(source_info)?;
    assert_writable(token_a_info)?;
    assert_writable(token_b_info)?;
    assert_writable(destination_a_info)?;
    assert_writable(destination_b_info)?;
    assert_writable(fee_account_info)?;

    let token_a = unpack_token_account(token_a_info, token_program.key)?;
    let token_b = unpack_token_account(token_b_info, token_program.key)?;
    let pool_mint = unpack_mint(pool_mint_info, token_program.key)?;

    let withdraw_fee = if source_info.key == fee_account_info.key {
        0
    } else {
        pool.fees.owner_withdraw_fee(args.pool_token_amount)?
    };
    let pool_tokens = args
        .pool_token_amount
        .checked_sub(withdraw_fee)
        .ok_or(SwapError::MathOverflow)?;

    let curve = pool.swap_curve()?;
    let amounts = curve.calculator().pool_tokens_to_trading_tokens(
        pool_tokens,
        pool_mint.supply,
        token_a.amount,
        token_b.amount,
        RoundDirection::Floor,
    )?;
    if amounts.token_a_amount < args.minimum_token_a_amount
        || amounts.token_b_amount < args.minimum_token_b_amount
    {
        return Err(SwapError::SlippageExceeded.into());
    }
    if amounts.token_a_amount == 0 && amounts.token_b_amount == 0 {
        return Err(SwapError::ZeroAmount.into());
    }
    if amounts.token_a_amount >= token_a.amount || amounts.token_b_amount >= token_b.amount {
        return Err(SwapError::InsufficientLiquidity.into());
    }

    if withdraw_fee > 0 {
        transfer_tokens(
            token_program,
            source_info,
            fee_account_info,
            user_transfer_authority,
            withdraw_fee,
            &[],
        )?;
    }
    burn_tokens(
        token_program,
        source_info,
        pool_mint_info,
        user_transfer_authority,
        pool_tokens,
    )?;

    let authority_seeds: &[&[u8]] = &[pool_info.key.as_ref(), &[pool.bump_seed]];
    if amounts.token_a_amount > 0 {
        transfer_tokens(
            token_program,
            token_a_info,
            destination_a_info,
            authority_info,
            amounts.token_a_amount,
            authority_seeds,
        )?;
    }
    if amounts.token_b_amount > 0 {
        transfer_tokens(
            token_program,
            token_b_info,
            destination_b_info,
            authority_info,
            amounts.token_b_amount,
            authority_seeds,
        )?;
    }

    msg!(
        "EVENT:WithdrawAllTokenTypes:{{\"pool\":\"{}\",\"pool_token_amount\":{},\"withdraw_fee\":{},\"token_a_amount\":{},\"token_b_amount\":{}}}",
        pool_info.key,
        args.pool_token_amount,
        withdraw_fee,
        amounts.token_a_amount,
        amounts.token_b_amount,
    );

    Ok(())
}
