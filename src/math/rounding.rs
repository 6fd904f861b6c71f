//! 256-bit division with an explicit rounding direction.

use alloy_primitives::U256;

use crate::domain::Rounding;

/// Divides `numerator` by `denominator` using the requested [`Rounding`].
///
/// Returns `None` if `denominator` is zero.  Ceiling division is computed as
/// `floor + (remainder != 0)` so it never overflows, even for `U256::MAX`.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use hydra_swap::domain::Rounding;
/// use hydra_swap::math::div_round;
///
/// let ten = U256::from(10u8);
/// let three = U256::from(3u8);
/// assert_eq!(div_round(ten, three, Rounding::Down), Some(U256::from(3u8)));
/// assert_eq!(div_round(ten, three, Rounding::Up), Some(U256::from(4u8)));
/// ```
#[must_use]
pub fn div_round(numerator: U256, denominator: U256, rounding: Rounding) -> Option<U256> {
    if denominator.is_zero() {
        return None;
    }
    let quotient = numerator / denominator;
    match rounding {
        Rounding::Down => Some(quotient),
        Rounding::Up => {
            if (numerator % denominator).is_zero() {
                Some(quotient)
            } else {
                // quotient < MAX whenever a remainder exists
                Some(quotient + U256::from(1u8))
            }
        }
    }
}
