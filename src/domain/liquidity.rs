//! Liquidity units credited to providers.

use core::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::Amount;

/// Liquidity units held by a provider or by the pool as a whole.
///
/// A deposit of `amount0` of token0 credits exactly `amount0` units, so
/// liquidity is denominated in token0 minor units but is a distinct type:
/// it measures a claim on both reserves, not a quantity of one token.
///
/// # Examples
///
/// ```
/// use hydra_swap::domain::Liquidity;
///
/// let a = Liquidity::new(1_000);
/// let b = Liquidity::new(2_000);
/// assert_eq!(a.checked_add(&b), Some(Liquidity::new(3_000)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
#[must_use]
pub struct Liquidity(U256);

impl Liquidity {
    /// No liquidity.
    pub const ZERO: Self = Self(U256::ZERO);

    /// Creates a new `Liquidity` from a `u128`.
    pub fn new(value: u128) -> Self {
        Self(U256::from(value))
    }

    /// Returns the underlying `U256`.
    #[must_use]
    pub const fn get(&self) -> U256 {
        self.0
    }

    /// Returns `true` if the liquidity is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Reinterprets these units as a raw amount for share arithmetic.
    pub const fn as_amount(&self) -> Amount {
        Amount::from_u256(self.0)
    }
}

impl From<Amount> for Liquidity {
    fn from(amount: Amount) -> Self {
        Self(amount.get())
    }
}

impl fmt::Display for Liquidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_default() {
        assert!(Liquidity::ZERO.is_zero());
        assert_eq!(Liquidity::default(), Liquidity::ZERO);
        assert!(!Liquidity::new(1).is_zero());
    }

    #[test]
    fn add_and_sub() {
        let a = Liquidity::new(10);
        let b = Liquidity::new(4);
        assert_eq!(a.checked_add(&b), Some(Liquidity::new(14)));
        assert_eq!(a.checked_sub(&b), Some(Liquidity::new(6)));
        assert_eq!(b.checked_sub(&a), None);
    }

    #[test]
    fn converts_from_deposit_amount() {
        let deposit = Amount::new(1_000);
        let units = Liquidity::from(deposit);
        assert_eq!(units, Liquidity::new(1_000));
        assert_eq!(units.as_amount(), deposit);
    }

    #[test]
    fn display() {
        assert_eq!(Liquidity::new(77).to_string(), "77");
    }
}
