//! Constant-product pricing and withdrawal share formulas.
//!
//! These functions are the single source of truth for both quoting and
//! execution: the router's `get_amounts_out` and the pool's `swap` call the
//! same [`get_amount_out`], so a quote is bit-identical to the realized
//! output against unchanged reserves.
//!
//! # Swap (token in → token out)
//!
//! 1. `amount_in_with_fee = amount_in × (1 000 000 − fee) / 1 000 000`
//! 2. `amount_out = amount_in_with_fee × reserve_out / (reserve_in + amount_in_with_fee)`
//!
//! Both divisions truncate.  The full `amount_in`, fee included, is added
//! to `reserve_in`, so `reserve0 × reserve1` never decreases.
//!
//! # Withdrawal
//!
//! 1. `fraction = amount × 10^18 / total_liquidity`
//! 2. `out_i = fraction × reserve_i / 10^18`
//!
//! Both divisions truncate, which leaves dust in the pool.  When
//! `amount == total_liquidity` the fraction is exactly `10^18` and the
//! whole reserves are returned.

use alloy_primitives::U256;

use super::CheckedArithmetic;
use crate::domain::{Amount, FeeTier, Liquidity, ReserveShare, Rounding, SwapResult, Token};
use crate::error::{DexError, Result};

/// Fixed-point scale for withdrawal fractions (`10^18`).
pub const WAD: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Prices a swap of `amount_in` against the given reserves.
///
/// # Errors
///
/// - [`DexError::ZeroAmount`] if `amount_in` is zero.
/// - [`DexError::InvalidReserves`] if either reserve is zero.
/// - [`DexError::Overflow`] if an intermediate product exceeds 256 bits.
///
/// # Examples
///
/// ```
/// use hydra_swap::domain::{Amount, FeeTier, Token};
/// use hydra_swap::math::get_amount_out;
///
/// let fee = FeeTier::new(100).expect("valid fee");
/// let result = get_amount_out(
///     Token::Native,
///     Amount::new(1_000),
///     Amount::new(100_000),
///     Amount::new(100_000),
///     fee,
/// )
/// .expect("priced");
/// // 999 after fee, 999 * 100_000 / 100_999 == 989
/// assert_eq!(result.amount_out(), Amount::new(989));
/// ```
pub fn get_amount_out(
    token_in: Token,
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeTier,
) -> Result<SwapResult> {
    if amount_in.is_zero() {
        return Err(DexError::ZeroAmount("amountIn"));
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(DexError::InvalidReserves);
    }

    let amount_in_with_fee = fee.amount_in_with_fee(amount_in)?;
    let numerator = amount_in_with_fee
        .checked_mul(&reserve_out)
        .ok_or(DexError::Overflow("swap numerator overflow"))?;
    let denominator = reserve_in
        .checked_add(&amount_in_with_fee)
        .ok_or(DexError::Overflow("swap denominator overflow"))?;
    let amount_out = numerator.safe_div(&denominator, Rounding::Down)?;

    let withheld = amount_in.safe_sub(&amount_in_with_fee)?;
    SwapResult::new(token_in, amount_in, amount_out, withheld)
}

/// Computes what burning `amount` of `total` liquidity pays from each
/// reserve.
///
/// # Errors
///
/// - [`DexError::DivisionByZero`] if `total` is zero.
/// - [`DexError::Overflow`] if an intermediate product exceeds 256 bits.
pub fn withdrawal_share(
    amount: Liquidity,
    total: Liquidity,
    reserve0: Amount,
    reserve1: Amount,
) -> Result<ReserveShare> {
    let wad = Amount::from_u256(WAD);
    let fraction = amount
        .as_amount()
        .checked_mul(&wad)
        .ok_or(DexError::Overflow("withdrawal fraction overflow"))?
        .safe_div(&total.as_amount(), Rounding::Down)?;

    let scaled = |reserve: Amount| -> Result<Amount> {
        fraction
            .checked_mul(&reserve)
            .ok_or(DexError::Overflow("withdrawal share overflow"))?
            .safe_div(&wad, Rounding::Down)
    };

    Ok(ReserveShare::new(scaled(reserve0)?, scaled(reserve1)?))
}
