//! Fee schedule: four numerator/denominator pairs, all math in checked u128.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::error::SwapError;

/// Fees charged by a pool.
///
/// The owner trade fee is taken out of the trade fee, and the host fee out of
/// the owner fee, so none of them can add up to more than the traded amount.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fees {
    pub trade_fee_numerator: u64,          // 8
    pub trade_fee_denominator: u64,        // 8
    pub owner_trade_fee_numerator: u64,    // 8
    pub owner_trade_fee_denominator: u64,  // 8
    pub owner_withdraw_fee_numerator: u64, // 8
    pub owner_withdraw_fee_denominator: u64, // 8
    pub host_fee_numerator: u64,           // 8
    pub host_fee_denominator: u64,         // 8
}

impl Fees {
    pub const LEN: usize = 8 * 8; // 64

    /// Fee retained by the pool (and partially by the owner) on every swap.
    pub fn trading_fee(&self, amount_in: u64) -> Result<u64, SwapError> {
        calculate_fee(amount_in, self.trade_fee_numerator, self.trade_fee_denominator)
    }

    /// Owner share of an already-computed trade fee.
    pub fn owner_trading_fee(&self, trade_fee: u64) -> Result<u64, SwapError> {
        calculate_fee(
            trade_fee,
            self.owner_trade_fee_numerator,
            self.owner_trade_fee_denominator,
        )
    }

    /// Pool tokens kept by the owner when liquidity is withdrawn.
    pub fn owner_withdraw_fee(&self, pool_tokens: u64) -> Result<u64, SwapError> {
        calculate_fee(
            pool_tokens,
            self.owner_withdraw_fee_numerator,
            self.owner_withdraw_fee_denominator,
        )
    }

    /// Host share of the owner fee, in pool tokens.
    pub fn host_fee(&self, owner_fee: u64) -> Result<u64, SwapError> {
        calculate_fee(owner_fee, self.host_fee_numerator, self.host_fee_denominator)
    }

    pub fn validate(&self) -> Result<(), SwapError> {
        validate_fraction(self.trade_fee_numerator, self.trade_fee_denominator)?;
        validate_fraction(self.owner_trade_fee_numerator, self.owner_trade_fee_denominator)?;
        validate_fraction(
            self.owner_withdraw_fee_numerator,
            self.owner_withdraw_fee_denominator,
        )?;
        validate_fraction(self.host_fee_numerator, self.host_fee_denominator)?;
        Ok(())
    }
}

/// `floor(amount * numerator / denominator)`.
pub fn calculate_fee(amount: u64, numerator: u64, denominator: u64) -> Result<u64, SwapError> {
    if denominator == 0 {
        return Err(SwapError::DivideByZero);
    }
    if numerator == 0 || amount == 0 {
        return Ok(0);
    }
    let fee = (amount as u128)
        .checked_mul(numerator as u128)
        .ok_or(SwapError::MathOverflow)?
        .checked_div(denominator as u128)
        .ok_or(SwapError::DivideByZero)?;
    u64::try_from(fee).map_err(|_| SwapError::MathOverflow)
}

fn validate_fraction(numerator: u64, denominator: u64) -> Result<(), SwapError> {
    if denominator == 0 {
        return Err(SwapError::DivideByZero);
    }
    if numerator > denominator {
        return Err(SwapError::FeeTooHigh);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fees() -> Fees {
        Fees {
            trade_fee_numerator: 25,
            trade_fee_denominator: 10_000,
            owner_trade_fee_numerator: 5,
            owner_trade_fee_denominator: 10_000,
            owner_withdraw_fee_numerator: 1,
            owner_withdraw_fee_denominator: 6,
            host_fee_numerator: 20,
            host_fee_denominator: 100,
        }
    }

    #[test]
    fn test_trading_fee_scenario() {
        let fees = sample_fees();
        assert_eq!(fees.trading_fee(10_000).unwrap(), 25);
        // 25 * 5 / 10_000 floors to zero
        assert_eq!(fees.owner_trading_fee(25).unwrap(), 0);
        assert_eq!(fees.host_fee(1_000).unwrap(), 200);
        assert_eq!(fees.owner_withdraw_fee(600).unwrap(), 100);
    }

    #[test]
    fn test_fee_floors() {
        // 999 * 25 / 10_000 = 2.4975
        assert_eq!(calculate_fee(999, 25, 10_000).unwrap(), 2);
        assert_eq!(calculate_fee(1, 1, 2).unwrap(), 0);
        assert_eq!(calculate_fee(0, 1, 2).unwrap(), 0);
        assert_eq!(calculate_fee(100, 0, 1).unwrap(), 0);
    }

    #[test]
    fn test_fee_uses_wide_intermediate() {
        // amount * numerator overflows u64 but the quotient fits
        let fee = calculate_fee(u64::MAX, u64::MAX - 1, u64::MAX).unwrap();
        assert_eq!(fee, u64::MAX - 1);
        assert_eq!(calculate_fee(u64::MAX, 1, 1).unwrap(), u64::MAX);
    }

    #[test]
    fn test_fee_never_exceeds_amount() {
        let fractions = [(0, 1), (1, 3), (2, 3), (25, 10_000), (9_999, 10_000), (7, 7)];
        let amounts = [0u64, 1, 2, 3, 17, 1_000, 123_456_789, u64::MAX / 3, u64::MAX];
        for &(num, den) in fractions.iter() {
            for &amount in amounts.iter() {
                let fee = calculate_fee(amount, num, den).unwrap();
                assert!(fee <= amount);
                // floor: fee * den <= amount * num < (fee + 1) * den
                let exact = amount as u128 * num as u128;
                assert!(fee as u128 * den as u128 <= exact);
                assert!((fee as u128 + 1) * den as u128 > exact);
            }
        }
    }

    #[test]
    fn test_zero_denominator_rejected() {
        assert_eq!(calculate_fee(10, 1, 0), Err(SwapError::DivideByZero));
        let fees = Fees {
            host_fee_denominator: 0,
            ..sample_fees()
        };
        assert_eq!(fees.validate(), Err(SwapError::DivideByZero));
    }

    #[test]
    fn test_fee_above_one_rejected() {
        let fees = Fees {
            owner_trade_fee_numerator: 10_001,
            ..sample_fees()
        };
        assert_eq!(fees.validate(), Err(SwapError::FeeTooHigh));
        assert!(sample_fees().validate().is_ok());
        // a 100% fee is a valid fraction
        let full = Fees {
            trade_fee_numerator: 10_000,
            ..sample_fees()
        };
        assert!(full.validate().is_ok());
    }

    #[test]
    fn test_fees_size() {
        let serialized = borsh::to_vec(&sample_fees()).unwrap();
        assert_eq!(serialized.len(), Fees::LEN);
    }
}
