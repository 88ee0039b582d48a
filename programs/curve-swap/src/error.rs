use num_derive::FromPrimitive;
use solana_program::program_error::ProgramError;

#[derive(Clone, Copy, Debug, Eq, PartialEq, FromPrimitive, thiserror::Error)]
pub enum SwapError {
    #[error("Invalid instruction")]
    InvalidInstruction,
    #[error("Swap account already in use")]
    AlreadyInitialized,
    #[error("Swap account not initialized")]
    NotInitialized,
    #[error("Authority does not match the derived program address")]
    InvalidAuthority,
    #[error("Unknown curve type")]
    InvalidCurveType,
    #[error("Invalid curve parameters")]
    InvalidCurveParameters,
    #[error("Fee numerator exceeds denominator")]
    FeeTooHigh,
    #[error("Fee denominator is zero")]
    DivideByZero,
    #[error("Reserve token account is empty")]
    EmptySupply,
    #[error("Token account mint does not match either reserve")]
    InvalidMint,
    #[error("Arithmetic overflow")]
    MathOverflow,
    #[error("Swap output below minimum amount")]
    SlippageExceeded,
    #[error("Insufficient reserve liquidity")]
    InsufficientLiquidity,
    #[error("Amount must be greater than zero")]
    ZeroAmount,
    #[error("Input account owner is not the program address")]
    InvalidOwner,
    #[error("Output pool account owner cannot be the program address")]
    InvalidOutputOwner,
    #[error("Swap input token accounts have the same mint")]
    RepeatedMint,
    #[error("Token account has a delegate")]
    InvalidDelegate,
    #[error("Token account has a close authority")]
    InvalidCloseAuthority,
    #[error("Pool token mint has a non-zero supply")]
    InvalidSupply,
    #[error("Pool token mint has a freeze authority")]
    InvalidFreezeAuthority,
    #[error("Pool token mint does not match the swap")]
    IncorrectPoolMint,
    #[error("Reserve token account does not match the swap")]
    IncorrectSwapAccount,
    #[error("Fee account does not match the swap")]
    IncorrectFeeAccount,
    #[error("Token program does not match the swap")]
    IncorrectTokenProgramId,
    #[error("User account aliases a pool account")]
    InvalidInput,
    #[error("Operation not supported by this curve")]
    UnsupportedCurveOperation,
    #[error("Account not signer")]
    AccountNotSigner,
    #[error("Account not writable")]
    AccountNotWritable,
    #[error("Deserialized account is not an SPL Token account")]
    ExpectedAccount,
    #[error("Deserialized account is not an SPL Token mint")]
    ExpectedMint,
}

impl From<SwapError> for ProgramError {
    fn from(e: SwapError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    #[test]
    fn test_custom_code_round_trips() {
        let err: ProgramError = SwapError::SlippageExceeded.into();
        match err {
            ProgramError::Custom(code) => {
                assert_eq!(SwapError::from_u32(code), Some(SwapError::SlippageExceeded));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(SwapError::InvalidInstruction as u32, 0);
        assert_eq!(SwapError::AlreadyInitialized as u32, 1);
        assert_eq!(SwapError::ExpectedMint as u32, 30);
        assert_eq!(SwapError::from_u32(31), None);
    }
}
