//! Program-derived swap authority.
//!
//! Every pool owns its reserves and pool mint through a PDA seeded with the
//! pool account's own address. The bump found at initialize is stored in the
//! pool record so later instructions re-derive the address without a search.

use solana_program::pubkey::Pubkey;

use crate::error::SwapError;

/// Derive the authority for `pool` and the first bump (searching down from
/// 255) that puts it off the ed25519 curve.
pub fn find_authority(program_id: &Pubkey, pool: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[&pool.to_bytes()], program_id)
}

/// Recompute the authority from a known bump.
pub fn authority_id(program_id: &Pubkey, pool: &Pubkey, bump_seed: u8) -> Result<Pubkey, SwapError> {
    Pubkey::create_program_address(&[&pool.to_bytes(), &[bump_seed]], program_id)
        .map_err(|_| SwapError::InvalidAuthority)
}

/// Reject `claimed` unless it is exactly the authority for `pool` and `bump_seed`.
pub fn verify_authority(
    program_id: &Pubkey,
    pool: &Pubkey,
    bump_seed: u8,
    claimed: &Pubkey,
) -> Result<(), SwapError> {
    if authority_id(program_id, pool, bump_seed)? != *claimed {
        return Err(SwapError::InvalidAuthority);
    }
    Ok(())
}
