//! Pricing curves.
//!
//! A pool stores its curve as a raw `CurveConfig` (tag + one u64 parameter).
//! `SwapCurve` is the closed set of curves that tag can select; each variant
//! carries a calculator implementing [`CurveCalculator`].

use borsh::{BorshDeserialize, BorshSerialize};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::{error::SwapError, fees::Fees};

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive)]
pub enum CurveType {
    /// Uniswap-style x * y = k.
    ConstantProduct = 0,
    /// Fixed exchange rate: `curve_parameters` token B per token A.
    ConstantPrice = 1,
    /// Constant product with `curve_parameters` of virtual token B liquidity.
    Offset = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TradeDirection {
    AtoB,
    BtoA,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundDirection {
    Floor,
    Ceiling,
}

/// Curve selection as transmitted at initialize and persisted in the pool.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CurveConfig {
    pub curve_type: u8,        // 1
    pub curve_parameters: u64, // 8
}

impl CurveConfig {
    pub const LEN: usize = 1 + 8; // 9
}

/// Token amounts backing some number of pool tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TradingTokenResult {
    pub token_a_amount: u64,
    pub token_b_amount: u64,
}

/// Fee-inclusive swap computation, before any slippage or liquidity check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapQuote {
    pub amount_in: u64,
    pub trade_fee: u64,
    pub owner_fee: u64,
    pub amount_in_after_fees: u64,
    pub amount_out: u64,
}

pub trait CurveCalculator {
    /// Output for `source_amount` already net of fees.
    fn swap_without_fees(
        &self,
        source_amount: u64,
        swap_source_amount: u64,
        swap_destination_amount: u64,
        trade_direction: TradeDirection,
    ) -> Result<u64, SwapError>;

    /// Quantity a fee-inclusive swap may never decrease.
    fn trading_invariant(&self, swap_token_a_amount: u64, swap_token_b_amount: u64) -> Result<u128, SwapError>;

    /// Pool tokens worth `source_amount` of one side, rounded down.
    fn trading_tokens_to_pool_tokens(
        &self,
        source_amount: u64,
        swap_token_a_amount: u64,
        swap_token_b_amount: u64,
        pool_supply: u64,
        trade_direction: TradeDirection,
    ) -> Result<u64, SwapError>;

    fn validate(&self) -> Result<(), SwapError> {
        Ok(())
    }

    fn validate_supply(&self, token_a_amount: u64, token_b_amount: u64) -> Result<(), SwapError> {
        if token_a_amount == 0 || token_b_amount == 0 {
            return Err(SwapError::EmptySupply);
        }
        Ok(())
    }

    /// Initial share supply: geometric mean of the funded reserves.
    fn new_pool_supply(&self, token_a_amount: u64, token_b_amount: u64) -> Result<u64, SwapError> {
        let product = (token_a_amount as u128)
            .checked_mul(token_b_amount as u128)
            .ok_or(SwapError::MathOverflow)?;
        let supply = u64::try_from(isqrt(product)).map_err(|_| SwapError::MathOverflow)?;
        if supply == 0 {
            return Err(SwapError::EmptySupply);
        }
        Ok(supply)
    }

    fn allows_deposits(&self) -> bool {
        true
    }

    /// Share of each reserve backing `pool_tokens`.
    fn pool_tokens_to_trading_tokens(
        &self,
        pool_tokens: u64,
        pool_supply: u64,
        swap_token_a_amount: u64,
        swap_token_b_amount: u64,
        round_direction: RoundDirection,
    ) -> Result<TradingTokenResult, SwapError> {
        Ok(TradingTokenResult {
            token_a_amount: proportional(pool_tokens, swap_token_a_amount, pool_supply, round_direction)?,
            token_b_amount: proportional(pool_tokens, swap_token_b_amount, pool_supply, round_direction)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Constant product
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConstantProductCurve;

/// `floor(destination * source / (source_reserve + source))`
fn constant_product_swap(
    source_amount: u128,
    swap_source_amount: u128,
    swap_destination_amount: u128,
) -> Result<u64, SwapError> {
    if source_amount == 0 {
        return Ok(0);
    }
    let numerator = swap_destination_amount
        .checked_mul(source_amount)
        .ok_or(SwapError::MathOverflow)?;
    let denominator = swap_source_amount
        .checked_add(source_amount)
        .ok_or(SwapError::MathOverflow)?;
    let amount_out = numerator
        .checked_div(denominator)
        .ok_or(SwapError::MathOverflow)?;
    u64::try_from(amount_out).map_err(|_| SwapError::MathOverflow)
}

/// Linear value of a single-sided amount: `supply * amount / (2 * reserve)`.
/// Never above the exact constant product valuation.
fn constant_product_pool_tokens(
    source_amount: u64,
    swap_source_amount: u128,
    pool_supply: u64,
) -> Result<u64, SwapError> {
    if swap_source_amount == 0 {
        return Err(SwapError::EmptySupply);
    }
    let pool_tokens = (pool_supply as u128)
        .checked_mul(source_amount as u128)
        .ok_or(SwapError::MathOverflow)?
        .checked_div(
            swap_source_amount
                .checked_mul(2)
                .ok_or(SwapError::MathOverflow)?,
        )
        .ok_or(SwapError::MathOverflow)?;
    u64::try_from(pool_tokens).map_err(|_| SwapError::MathOverflow)
}

impl CurveCalculator for ConstantProductCurve {
    fn swap_without_fees(
        &self,
        source_amount: u64,
        swap_source_amount: u64,
        swap_destination_amount: u64,
        _trade_direction: TradeDirection,
    ) -> Result<u64, SwapError> {
        constant_product_swap(
            source_amount as u128,
            swap_source_amount as u128,
            swap_destination_amount as u128,
        )
    }

    fn trading_invariant(&self, swap_token_a_amount: u64, swap_token_b_amount: u64) -> Result<u128, SwapError> {
        (swap_token_a_amount as u128)
            .checked_mul(swap_token_b_amount as u128)
            .ok_or(SwapError::MathOverflow)
    }

    fn trading_tokens_to_pool_tokens(
        &self,
        source_amount: u64,
        swap_token_a_amount: u64,
        swap_token_b_amount: u64,
        pool_supply: u64,
        trade_direction: TradeDirection,
    ) -> Result<u64, SwapError> {
        let swap_source_amount = match trade_direction {
            TradeDirection::AtoB => swap_token_a_amount,
            TradeDirection::BtoA => swap_token_b_amount,
        };
        constant_product_pool_tokens(source_amount, swap_source_amount as u128, pool_supply)
    }
}

// ---------------------------------------------------------------------------
// Constant price
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConstantPriceCurve {
    /// Token B units paid out per token A unit.
    pub token_b_price: u64,
}

impl ConstantPriceCurve {
    /// Pool value expressed in token B.
    fn total_value(&self, swap_token_a_amount: u64, swap_token_b_amount: u64) -> Result<u128, SwapError> {
        (swap_token_a_amount as u128)
            .checked_mul(self.token_b_price as u128)
            .ok_or(SwapError::MathOverflow)?
            .checked_add(swap_token_b_amount as u128)
            .ok_or(SwapError::MathOverflow)
    }
}

impl CurveCalculator for ConstantPriceCurve {
    fn swap_without_fees(
        &self,
        source_amount: u64,
        _swap_source_amount: u64,
        _swap_destination_amount: u64,
        trade_direction: TradeDirection,
    ) -> Result<u64, SwapError> {
        if self.token_b_price == 0 {
            return Err(SwapError::InvalidCurveParameters);
        }
        let amount_out = match trade_direction {
            TradeDirection::AtoB => (source_amount as u128)
                .checked_mul(self.token_b_price as u128)
                .ok_or(SwapError::MathOverflow)?,
            TradeDirection::BtoA => (source_amount as u128)
                .checked_div(self.token_b_price as u128)
                .ok_or(SwapError::MathOverflow)?,
        };
        u64::try_from(amount_out).map_err(|_| SwapError::MathOverflow)
    }

    fn trading_invariant(&self, swap_token_a_amount: u64, swap_token_b_amount: u64) -> Result<u128, SwapError> {
        self.total_value(swap_token_a_amount, swap_token_b_amount)
    }

    fn trading_tokens_to_pool_tokens(
        &self,
        source_amount: u64,
        swap_token_a_amount: u64,
        swap_token_b_amount: u64,
        pool_supply: u64,
        trade_direction: TradeDirection,
    ) -> Result<u64, SwapError> {
        let total_value = self.total_value(swap_token_a_amount, swap_token_b_amount)?;
        if total_value == 0 {
            return Err(SwapError::EmptySupply);
        }
        let source_value = match trade_direction {
            TradeDirection::AtoB => (source_amount as u128)
                .checked_mul(self.token_b_price as u128)
                .ok_or(SwapError::MathOverflow)?,
            TradeDirection::BtoA => source_amount as u128,
        };
        let pool_tokens = (pool_supply as u128)
            .checked_mul(source_value)
            .ok_or(SwapError::MathOverflow)?
            .checked_div(total_value)
            .ok_or(SwapError::MathOverflow)?;
        u64::try_from(pool_tokens).map_err(|_| SwapError::MathOverflow)
    }

    fn validate(&self) -> Result<(), SwapError> {
        if self.token_b_price == 0 {
            return Err(SwapError::InvalidCurveParameters);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OffsetCurve {
    /// Virtual token B added to the real reserve for pricing only.
    pub token_b_offset: u64,
}

impl OffsetCurve {
    fn virtual_b(&self, swap_token_b_amount: u64) -> Result<u128, SwapError> {
        (swap_token_b_amount as u128)
            .checked_add(self.token_b_offset as u128)
            .ok_or(SwapError::MathOverflow)
    }
}

impl CurveCalculator for OffsetCurve {
    fn swap_without_fees(
        &self,
        source_amount: u64,
        swap_source_amount: u64,
        swap_destination_amount: u64,
        trade_direction: TradeDirection,
    ) -> Result<u64, SwapError> {
        let (swap_source_amount, swap_destination_amount) = match trade_direction {
            TradeDirection::AtoB => (
                swap_source_amount as u128,
                self.virtual_b(swap_destination_amount)?,
            ),
            TradeDirection::BtoA => (
                self.virtual_b(swap_source_amount)?,
                swap_destination_amount as u128,
            ),
        };
        constant_product_swap(source_amount as u128, swap_source_amount, swap_destination_amount)
    }

    fn trading_invariant(&self, swap_token_a_amount: u64, swap_token_b_amount: u64) -> Result<u128, SwapError> {
        (swap_token_a_amount as u128)
            .checked_mul(self.virtual_b(swap_token_b_amount)?)
            .ok_or(SwapError::MathOverflow)
    }

    fn trading_tokens_to_pool_tokens(
        &self,
        source_amount: u64,
        swap_token_a_amount: u64,
        swap_token_b_amount: u64,
        pool_supply: u64,
        trade_direction: TradeDirection,
    ) -> Result<u64, SwapError> {
        let swap_source_amount = match trade_direction {
            TradeDirection::AtoB => swap_token_a_amount as u128,
            TradeDirection::BtoA => self.virtual_b(swap_token_b_amount)?,
        };
        constant_product_pool_tokens(source_amount, swap_source_amount, pool_supply)
    }

    fn validate(&self) -> Result<(), SwapError> {
        if self.token_b_offset == 0 {
            return Err(SwapError::InvalidCurveParameters);
        }
        Ok(())
    }

    // A proportional deposit would price the virtual liquidity as real.
    fn allows_deposits(&self) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapCurve {
    ConstantProduct(ConstantProductCurve),
    ConstantPrice(ConstantPriceCurve),
    Offset(OffsetCurve),
}

impl SwapCurve {
    pub fn curve_type(&self) -> CurveType {
        match self {
            SwapCurve::ConstantProduct(_) => CurveType::ConstantProduct,
            SwapCurve::ConstantPrice(_) => CurveType::ConstantPrice,
            SwapCurve::Offset(_) => CurveType::Offset,
        }
    }

    pub fn calculator(&self) -> &dyn CurveCalculator {
        match self {
            SwapCurve::ConstantProduct(curve) => curve,
            SwapCurve::ConstantPrice(curve) => curve,
            SwapCurve::Offset(curve) => curve,
        }
    }

    /// Apply the trade fee, price the remainder, and split out the owner fee.
    pub fn swap(
        &self,
        amount_in: u64,
        swap_source_amount: u64,
        swap_destination_amount: u64,
        trade_direction: TradeDirection,
        fees: &Fees,
    ) -> Result<SwapQuote, SwapError> {
        let trade_fee = fees.trading_fee(amount_in)?;
        let amount_in_after_fees = amount_in
            .checked_sub(trade_fee)
            .ok_or(SwapError::MathOverflow)?;
        let amount_out = self.calculator().swap_without_fees(
            amount_in_after_fees,
            swap_source_amount,
            swap_destination_amount,
            trade_direction,
        )?;
        let owner_fee = fees.owner_trading_fee(trade_fee)?;

        Ok(SwapQuote {
            amount_in,
            trade_fee,
            owner_fee,
            amount_in_after_fees,
            amount_out,
        })
    }
}

impl TryFrom<&CurveConfig> for SwapCurve {
    type Error = SwapError;

    fn try_from(config: &CurveConfig) -> Result<Self, Self::Error> {
        let curve_type = CurveType::from_u8(config.curve_type).ok_or(SwapError::InvalidCurveType)?;
        Ok(match curve_type {
            CurveType::ConstantProduct => SwapCurve::ConstantProduct(ConstantProductCurve),
            CurveType::ConstantPrice => SwapCurve::ConstantPrice(ConstantPriceCurve {
                token_b_price: config.curve_parameters,
            }),
            CurveType::Offset => SwapCurve::Offset(OffsetCurve {
                token_b_offset: config.curve_parameters,
            }),
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Integer square root using Newton's method.
pub fn isqrt(n: u128) -> u128 {
    if n == 0 {
        return 0;
    }
    let mut x = n;
    // ceil(n / 2) without the overflow of (n + 1) / 2
    let mut y = x / 2 + x % 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

fn proportional(
    pool_tokens: u64,
    reserve: u64,
    pool_supply: u64,
    round_direction: RoundDirection,
) -> Result<u64, SwapError> {
    if pool_supply == 0 {
        return Err(SwapError::EmptySupply);
    }
    let numerator = (pool_tokens as u128)
        .checked_mul(reserve as u128)
        .ok_or(SwapError::MathOverflow)?;
    let supply = pool_supply as u128;
    let amount = match round_direction {
        RoundDirection::Floor => numerator / supply,
        RoundDirection::Ceiling => numerator
            .checked_add(supply - 1)
            .ok_or(SwapError::MathOverflow)?
            / supply,
    };
    u64::try_from(amount).map_err(|_| SwapError::MathOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_fees() -> Fees {
        Fees {
            trade_fee_numerator: 0,
            trade_fee_denominator: 1,
            owner_trade_fee_numerator: 0,
            owner_trade_fee_denominator: 1,
            owner_withdraw_fee_numerator: 0,
            owner_withdraw_fee_denominator: 1,
            host_fee_numerator: 0,
            host_fee_denominator: 1,
        }
    }

    fn trade_fees(numerator: u64, denominator: u64) -> Fees {
        Fees {
            trade_fee_numerator: numerator,
            trade_fee_denominator: denominator,
            owner_trade_fee_numerator: 1,
            owner_trade_fee_denominator: 5,
            ..no_fees()
        }
    }

    fn all_curves() -> Vec<SwapCurve> {
        vec![
            SwapCurve::ConstantProduct(ConstantProductCurve),
            SwapCurve::ConstantPrice(ConstantPriceCurve { token_b_price: 3 }),
            SwapCurve::Offset(OffsetCurve {
                token_b_offset: 1_000_000,
            }),
        ]
    }

    /// Reserves after a swap that keeps the whole input in the pool.
    fn apply(
        reserves: (u64, u64),
        direction: TradeDirection,
        amount_in: u64,
        amount_out: u64,
    ) -> (u64, u64) {
        match direction {
            TradeDirection::AtoB => (reserves.0 + amount_in, reserves.1 - amount_out),
            TradeDirection::BtoA => (reserves.0 - amount_out, reserves.1 + amount_in),
        }
    }

    #[test]
    fn test_isqrt() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(2), 1);
        assert_eq!(isqrt(3), 1);
        assert_eq!(isqrt(4), 2);
        assert_eq!(isqrt(10), 3);
        assert_eq!(isqrt(u128::MAX), u64::MAX as u128);
        assert_eq!(isqrt(1_000_000), 1_000);
        assert_eq!(isqrt(100_000_000_000_000), 10_000_000);
        let max = u64::MAX as u128;
        assert_eq!(isqrt(max * max), max);
    }

    #[test]
    fn test_constant_product_scenario() {
        let curve = SwapCurve::ConstantProduct(ConstantProductCurve);
        let quote = curve
            .swap(10_000, 10_000_000, 10_000_000, TradeDirection::AtoB, &trade_fees(25, 10_000))
            .unwrap();
        assert_eq!(quote.trade_fee, 25);
        assert_eq!(quote.amount_in_after_fees, 9_975);
        assert_eq!(quote.amount_out, 9_965);
        assert_eq!(quote.owner_fee, 5);
    }

    #[test]
    fn test_zero_input_yields_zero() {
        for curve in all_curves() {
            for direction in [TradeDirection::AtoB, TradeDirection::BtoA] {
                let out = curve
                    .calculator()
                    .swap_without_fees(0, 1_000, 1_000, direction)
                    .unwrap();
                assert_eq!(out, 0);
            }
        }
    }

    #[test]
    fn test_constant_product_invariant_without_fees() {
        let calculator = ConstantProductCurve;
        let reserves = [1u64, 2, 7, 1_000, 999_983, 10_000_000, u32::MAX as u64, u64::MAX / 2];
        let inputs = [1u64, 3, 1_000, 65_537, 10_000_000, u32::MAX as u64];
        for &reserve_in in reserves.iter() {
            for &reserve_out in reserves.iter() {
                for &amount_in in inputs.iter() {
                    if reserve_in.checked_add(amount_in).is_none() {
                        continue;
                    }
                    let out = calculator
                        .swap_without_fees(amount_in, reserve_in, reserve_out, TradeDirection::AtoB)
                        .unwrap();
                    assert!(out < reserve_out || reserve_out == 0);
                    let before = reserve_in as u128 * reserve_out as u128;
                    let after = (reserve_in as u128 + amount_in as u128) * (reserve_out - out) as u128;
                    assert!(before <= after);
                }
            }
        }
    }

    #[test]
    fn test_invariant_never_decreases_with_fees() {
        let fees = trade_fees(30, 10_000);
        let pools = [(1_000_000u64, 3_000_000u64), (50_000_000, 10_000_000), (7_777, 33_333_333)];
        let inputs = [1u64, 10, 999, 12_345, 500_000];
        for curve in all_curves() {
            let calculator = curve.calculator();
            for &pool in pools.iter() {
                for &amount_in in inputs.iter() {
                    for direction in [TradeDirection::AtoB, TradeDirection::BtoA] {
                        let (reserve_in, reserve_out) = match direction {
                            TradeDirection::AtoB => (pool.0, pool.1),
                            TradeDirection::BtoA => (pool.1, pool.0),
                        };
                        let quote = curve
                            .swap(amount_in, reserve_in, reserve_out, direction, &fees)
                            .unwrap();
                        if quote.amount_out >= reserve_out {
                            continue;
                        }
                        let after = apply(pool, direction, amount_in, quote.amount_out);
                        let before_k = calculator.trading_invariant(pool.0, pool.1).unwrap();
                        let after_k = calculator.trading_invariant(after.0, after.1).unwrap();
                        assert!(after_k >= before_k, "{curve:?} {direction:?} {amount_in}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_constant_price_directions() {
        let curve = ConstantPriceCurve { token_b_price: 4 };
        assert_eq!(
            curve.swap_without_fees(10, 100, 1_000, TradeDirection::AtoB).unwrap(),
            40
        );
        assert_eq!(
            curve.swap_without_fees(10, 1_000, 100, TradeDirection::BtoA).unwrap(),
            2
        );
        // remainder of a B -> A trade stays in the pool
        assert_eq!(
            curve.swap_without_fees(3, 1_000, 100, TradeDirection::BtoA).unwrap(),
            0
        );
    }

    #[test]
    fn test_constant_price_overflow() {
        let curve = ConstantPriceCurve {
            token_b_price: u64::MAX,
        };
        assert_eq!(
            curve.swap_without_fees(2, 1, 1, TradeDirection::AtoB),
            Err(SwapError::MathOverflow)
        );
    }

    #[test]
    fn test_offset_applies_virtual_b() {
        let offset = OffsetCurve {
            token_b_offset: 1_000_000,
        };
        let product = ConstantProductCurve;
        // A -> B prices against B + offset
        assert_eq!(
            offset
                .swap_without_fees(1_000, 1_000_000, 0, TradeDirection::AtoB)
                .unwrap(),
            product
                .swap_without_fees(1_000, 1_000_000, 1_000_000, TradeDirection::AtoB)
                .unwrap()
        );
        // B -> A prices with B + offset as the source reserve
        assert_eq!(
            offset
                .swap_without_fees(1_000, 0, 1_000_000, TradeDirection::BtoA)
                .unwrap(),
            product
                .swap_without_fees(1_000, 1_000_000, 1_000_000, TradeDirection::BtoA)
                .unwrap()
        );
    }

    #[test]
    fn test_validate_parameters() {
        assert!(ConstantProductCurve.validate().is_ok());
        assert_eq!(
            ConstantPriceCurve { token_b_price: 0 }.validate(),
            Err(SwapError::InvalidCurveParameters)
        );
        assert_eq!(
            OffsetCurve { token_b_offset: 0 }.validate(),
            Err(SwapError::InvalidCurveParameters)
        );
        assert_eq!(
            ConstantProductCurve.validate_supply(0, 10),
            Err(SwapError::EmptySupply)
        );
        assert_eq!(
            ConstantProductCurve.validate_supply(10, 0),
            Err(SwapError::EmptySupply)
        );
    }

    #[test]
    fn test_curve_type_tags() {
        let config = |curve_type| CurveConfig {
            curve_type,
            curve_parameters: 5,
        };
        assert_eq!(
            SwapCurve::try_from(&config(0)).unwrap().curve_type(),
            CurveType::ConstantProduct
        );
        assert_eq!(
            SwapCurve::try_from(&config(1)).unwrap(),
            SwapCurve::ConstantPrice(ConstantPriceCurve { token_b_price: 5 })
        );
        assert_eq!(
            SwapCurve::try_from(&config(3)).unwrap(),
            SwapCurve::Offset(OffsetCurve { token_b_offset: 5 })
        );
        for tag in [2u8, 4, 255] {
            assert_eq!(SwapCurve::try_from(&config(tag)), Err(SwapError::InvalidCurveType));
        }
    }

    #[test]
    fn test_new_pool_supply_is_geometric_mean() {
        let curve = ConstantProductCurve;
        assert_eq!(curve.new_pool_supply(10_000_000, 10_000_000).unwrap(), 10_000_000);
        assert_eq!(curve.new_pool_supply(1_000, 4_000).unwrap(), 2_000);
        assert_eq!(curve.new_pool_supply(2, 3).unwrap(), 2);
        assert_eq!(curve.new_pool_supply(1, 2).unwrap(), 1);
        assert_eq!(curve.new_pool_supply(1, 3).unwrap(), 1);
        assert_eq!(curve.new_pool_supply(u64::MAX, u64::MAX).unwrap(), u64::MAX);
    }

    #[test]
    fn test_fee_value_in_pool_tokens() {
        let curve = ConstantProductCurve;
        // 1% of one side is worth 0.5% of the pool
        assert_eq!(
            curve
                .trading_tokens_to_pool_tokens(10_000, 1_000_000, 4_000_000, 2_000_000, TradeDirection::AtoB)
                .unwrap(),
            10_000
        );
        assert_eq!(
            curve
                .trading_tokens_to_pool_tokens(40_000, 1_000_000, 4_000_000, 2_000_000, TradeDirection::BtoA)
                .unwrap(),
            10_000
        );

        let price = ConstantPriceCurve { token_b_price: 2 };
        // pool value = 100 * 2 + 200 = 400 B; 10 A = 20 B = 5%
        assert_eq!(
            price
                .trading_tokens_to_pool_tokens(10, 100, 200, 1_000, TradeDirection::AtoB)
                .unwrap(),
            50
        );
        assert_eq!(
            price
                .trading_tokens_to_pool_tokens(20, 100, 200, 1_000, TradeDirection::BtoA)
                .unwrap(),
            50
        );
    }

    #[test]
    fn test_fee_value_never_exceeds_withdrawable() {
        // Withdrawing the minted pool tokens proportionally must not return
        // more value than the fee that was added.
        let curve = ConstantProductCurve;
        let (a, b, supply) = (5_000_000u64, 9_000_000u64, 6_708_203u64);
        for fee in [1u64, 17, 2_500, 49_999, 1_000_000] {
            let pool_tokens = curve
                .trading_tokens_to_pool_tokens(fee, a, b, supply, TradeDirection::AtoB)
                .unwrap();
            let backing = curve
                .pool_tokens_to_trading_tokens(pool_tokens, supply + pool_tokens, a, b, RoundDirection::Floor)
                .unwrap();
            // value in A units at the pool's spot price
            let value_in_a = backing.token_a_amount as u128
                + backing.token_b_amount as u128 * a as u128 / b as u128;
            assert!(value_in_a <= fee as u128, "fee {fee} valued at {value_in_a}");
        }
    }

    #[test]
    fn test_pool_tokens_to_trading_tokens_rounding() {
        let curve = ConstantProductCurve;
        let floor = curve
            .pool_tokens_to_trading_tokens(1, 3, 10, 20, RoundDirection::Floor)
            .unwrap();
        assert_eq!(floor, TradingTokenResult { token_a_amount: 3, token_b_amount: 6 });
        let ceiling = curve
            .pool_tokens_to_trading_tokens(1, 3, 10, 20, RoundDirection::Ceiling)
            .unwrap();
        assert_eq!(ceiling, TradingTokenResult { token_a_amount: 4, token_b_amount: 7 });
        assert_eq!(
            curve.pool_tokens_to_trading_tokens(1, 0, 10, 20, RoundDirection::Floor),
            Err(SwapError::EmptySupply)
        );
    }

    #[test]
    fn test_deposits_disabled_for_offset() {
        assert!(ConstantProductCurve.allows_deposits());
        assert!(ConstantPriceCurve { token_b_price: 1 }.allows_deposits());
        assert!(!OffsetCurve { token_b_offset: 1 }.allows_deposits());
    }
}
