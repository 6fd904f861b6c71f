//! A claim on both reserves of a pool.

use serde::{Deserialize, Serialize};

use super::Amount;

/// Amounts of token0 and token1 owed for some liquidity.
///
/// Returned by withdrawal pricing and by
/// [`Pool::liquidity_provided`](crate::pools::Pool::liquidity_provided).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ReserveShare {
    /// Amount of token0.
    pub amount0: Amount,
    /// Amount of token1.
    pub amount1: Amount,
}

impl ReserveShare {
    /// An empty claim.
    pub const ZERO: Self = Self {
        amount0: Amount::ZERO,
        amount1: Amount::ZERO,
    };

    /// Creates a share from both amounts.
    pub const fn new(amount0: Amount, amount1: Amount) -> Self {
        Self { amount0, amount1 }
    }

    /// Returns `true` if both amounts are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount0.is_zero() && self.amount1.is_zero()
    }
}
