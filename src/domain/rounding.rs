//! Rounding direction for integer division.

use serde::{Deserialize, Serialize};

/// Direction applied when an integer division leaves a remainder.
///
/// Every division on [`Amount`](super::Amount) and
/// [`Liquidity`](super::Liquidity) names its rounding explicitly.  The
/// pricing and withdrawal formulas of the pool always use [`Rounding::Down`],
/// which leaves any remainder inside the pool.
///
/// # Examples
///
/// ```
/// use hydra_swap::domain::Rounding;
///
/// assert!(Rounding::Down.is_down());
/// assert!(!Rounding::Down.is_up());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}
