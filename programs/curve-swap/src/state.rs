use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

use crate::{
    curve::{CurveConfig, SwapCurve},
    error::SwapError,
    fees::Fees,
};

// ---------------------------------------------------------------------------
// State: PoolState
// ---------------------------------------------------------------------------

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolState {
    pub is_initialized: bool,       // 1
    pub bump_seed: u8,              // 1
    pub token_program_id: Pubkey,   // 32
    pub token_a_account: Pubkey,    // 32
    pub token_b_account: Pubkey,    // 32
    pub pool_mint: Pubkey,          // 32
    pub token_a_mint: Pubkey,       // 32
    pub token_b_mint: Pubkey,       // 32
    pub pool_fee_account: Pubkey,   // 32
    pub fees: Fees,                 // 64
    pub curve: CurveConfig,         // 9
}

impl PoolState {
    pub const LEN: usize = 1 + 1 + 32 * 7 + Fees::LEN + CurveConfig::LEN; // 299

    /// Decode a pool account, rejecting records that were never initialized.
    pub fn unpack_initialized(data: &[u8]) -> Result<Self, ProgramError> {
        let pool = Self::try_from_slice(data).map_err(|_| SwapError::NotInitialized)?;
        if !pool.is_initialized {
            return Err(SwapError::NotInitialized.into());
        }
        Ok(pool)
    }

    /// True for zeroed or foreign data; anything decoding as initialized is in use.
    pub fn is_unused(data: &[u8]) -> bool {
        match Self::try_from_slice(data) {
            Ok(pool) => !pool.is_initialized,
            Err(_) => data.iter().all(|b| *b == 0),
        }
    }

    pub fn swap_curve(&self) -> Result<SwapCurve, SwapError> {
        SwapCurve::try_from(&self.curve)
    }
}

// ---------------------------------------------------------------------------
// Return data: SwapResult
// ---------------------------------------------------------------------------

/// Written with `set_return_data` after a successful swap.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapResult {
    pub amount_out: u64, // 8
    pub reserve_a: u64,  // 8
    pub reserve_b: u64,  // 8
}

impl SwapResult {
    pub const LEN: usize = 8 * 3; // 24
}
