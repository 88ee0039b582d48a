// CurveSwap: multi-curve liquidity pool with tiered owner/host fees
// Program ID: CurveSwap1111111111111111111111111111111111

pub mod authority;
pub mod curve;
pub mod error;
pub mod fees;
pub mod instruction;
pub mod processor;
pub mod state;

pub use processor::process_instruction;

solana_program::declare_id!("CurveSwap1111111111111111111111111111111111");

#[cfg(not(feature = "no-entrypoint"))]
solana_program::entrypoint!(process_instruction);
