//! Outcome of a single-pool swap.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Token};
use crate::error::{DexError, Result};

/// What a pool swap consumed and produced.
///
/// # Invariants
///
/// - `amount_in > 0`.
/// - `fee <= amount_in`.
///
/// `amount_out` may be zero: a tiny input into a deep pool can truncate to
/// nothing, and the pool still accepts it.
///
/// # Examples
///
/// ```
/// use hydra_swap::domain::{Amount, SwapResult, Token};
///
/// let result = SwapResult::new(
///     Token::Native,
///     Amount::new(1_000),
///     Amount::new(990),
///     Amount::new(3),
/// );
/// assert!(result.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapResult {
    token_in: Token,
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
}

impl SwapResult {
    /// Creates a new `SwapResult` with validated invariants.
    ///
    /// # Errors
    ///
    /// - [`DexError::ZeroAmount`] if `amount_in` is zero.
    /// - [`DexError::Overflow`] if `fee > amount_in`.
    pub fn new(token_in: Token, amount_in: Amount, amount_out: Amount, fee: Amount) -> Result<Self> {
        if amount_in.is_zero() {
            return Err(DexError::ZeroAmount("amountIn"));
        }
        if fee > amount_in {
            return Err(DexError::Overflow("fee exceeds amount_in"));
        }
        Ok(Self {
            token_in,
            amount_in,
            amount_out,
            fee,
        })
    }

    /// Returns the token sold into the pool.
    #[must_use]
    pub const fn token_in(&self) -> Token {
        self.token_in
    }

    /// Returns the input amount, fee included.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Returns the amount paid out.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Returns the part of the input withheld as fee.
    pub const fn fee(&self) -> Amount {
        self.fee
    }
}

impl fmt::Display for SwapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapResult(in={} {}, out={}, fee={})",
            self.amount_in, self.token_in, self.amount_out, self.fee
        )
    }
}
