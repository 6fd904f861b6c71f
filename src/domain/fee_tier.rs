//! Pool fee expressed in parts per million.

use core::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::{Amount, Rounding};
use crate::error::{DexError, Result};

/// Parts-per-million denominator (1 000 000 = 100%).
pub const PPM_DENOMINATOR: u32 = 1_000_000;

/// A pool's swap fee in parts per million.
///
/// Valid fees lie in the open range `(0, 1_000_000)`.  The fee is taken
/// from the input before pricing and stays in the pool.
///
/// # Examples
///
/// ```
/// use hydra_swap::domain::{Amount, FeeTier};
///
/// let fee = FeeTier::MEDIUM;
/// assert_eq!(fee.ppm(), 3_000);
///
/// // 0.3% of 1_000_000 is withheld
/// let net = fee.amount_in_with_fee(Amount::new(1_000_000)).expect("no overflow");
/// assert_eq!(net, Amount::new(997_000));
///
/// assert!(FeeTier::new(0).is_err());
/// assert!(FeeTier::new(1_000_000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct FeeTier(u32);

impl FeeTier {
    /// 0.01% (100 ppm).
    pub const LOWEST: Self = Self(100);

    /// 0.05% (500 ppm).
    pub const LOW: Self = Self(500);

    /// 0.30% (3 000 ppm).
    pub const MEDIUM: Self = Self(3_000);

    /// 1.00% (10 000 ppm).
    pub const HIGH: Self = Self(10_000);

    /// Creates a fee tier after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidFee`] if `ppm` is zero or at least
    /// 1 000 000.
    pub const fn new(ppm: u32) -> Result<Self> {
        if ppm == 0 {
            return Err(DexError::InvalidFee("fee must be greater than zero"));
        }
        if ppm >= PPM_DENOMINATOR {
            return Err(DexError::InvalidFee("fee must be below 1_000_000 ppm"));
        }
        Ok(Self(ppm))
    }

    /// Returns the fee in parts per million.
    #[must_use]
    pub const fn ppm(&self) -> u32 {
        self.0
    }

    /// Input that remains after the fee is withheld:
    /// `floor(amount × (1 000 000 − fee) / 1 000 000)`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if `amount × (1 000 000 − fee)` does
    /// not fit in 256 bits.
    pub fn amount_in_with_fee(&self, amount: Amount) -> Result<Amount> {
        let keep = Amount::from_u256(U256::from(PPM_DENOMINATOR - self.0));
        amount
            .checked_mul(&keep)
            .ok_or(DexError::Overflow("fee numerator overflow"))?
            .checked_div(&Self::denominator(), Rounding::Down)
            .ok_or(DexError::DivisionByZero)
    }

    /// Portion of `amount` withheld as fee, `amount − amount_in_with_fee`.
    ///
    /// # Errors
    ///
    /// Same as [`amount_in_with_fee`](Self::amount_in_with_fee).
    pub fn fee_on(&self, amount: Amount) -> Result<Amount> {
        let net = self.amount_in_with_fee(amount)?;
        amount
            .checked_sub(&net)
            .ok_or(DexError::Underflow("fee exceeds amount"))
    }

    /// Returns `true` if this fee matches one of the four presets.
    #[must_use]
    pub const fn is_standard(&self) -> bool {
        matches!(self.0, 100 | 500 | 3_000 | 10_000)
    }

    fn denominator() -> Amount {
        Amount::from_u256(U256::from(PPM_DENOMINATOR))
    }
}

impl TryFrom<u32> for FeeTier {
    type Error = DexError;

    fn try_from(ppm: u32) -> Result<Self> {
        Self::new(ppm)
    }
}

impl From<FeeTier> for u32 {
    fn from(fee: FeeTier) -> Self {
        fee.0
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ppm", self.0)
    }
}
