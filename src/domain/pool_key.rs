//! Canonical registry key: a sorted pair of distinct tokens plus a fee.

use core::fmt;

use serde::Serialize;

use super::{FeeTier, Token};
use crate::error::{DexError, Result};

/// Order-independent identity of a pool in the factory registry.
///
/// The two tokens are sorted on construction, so `(A, B, fee)` and
/// `(B, A, fee)` produce equal keys.  The key says nothing about the
/// pool's own `token0`/`token1` order, which follows the creation call.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use hydra_swap::domain::{FeeTier, PoolKey, Token};
///
/// let a = Token::Contract(Address::repeat_byte(2));
/// let b = Token::Contract(Address::repeat_byte(1));
///
/// let key = PoolKey::new(a, b, FeeTier::MEDIUM).expect("distinct tokens");
/// assert_eq!(key.first(), b);
/// assert_eq!(key, PoolKey::new(b, a, FeeTier::MEDIUM).expect("distinct tokens"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PoolKey {
    token_a: Token,
    token_b: Token,
    fee: FeeTier,
}

impl PoolKey {
    /// Creates a canonically-ordered key.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::PairIdentical`] if both tokens are equal.  Since
    /// there is a single native variant this also rejects native/native.
    pub fn new(token1: Token, token2: Token, fee: FeeTier) -> Result<Self> {
        if token1 == token2 {
            return Err(DexError::PairIdentical);
        }
        let (token_a, token_b) = if token1 < token2 {
            (token1, token2)
        } else {
            (token2, token1)
        };
        Ok(Self {
            token_a,
            token_b,
            fee,
        })
    }

    /// Returns the lower-ordered token.
    #[must_use]
    pub const fn first(&self) -> Token {
        self.token_a
    }

    /// Returns the higher-ordered token.
    #[must_use]
    pub const fn second(&self) -> Token {
        self.token_b
    }

    /// Returns the fee tier.
    #[must_use]
    pub const fn fee(&self) -> FeeTier {
        self.fee
    }

    /// Returns `true` if `token` is one of the two tokens.
    #[must_use]
    pub fn contains(&self, token: &Token) -> bool {
        self.token_a == *token || self.token_b == *token
    }

    /// Byte encoding hashed into the pool address:
    /// `first (21 bytes) ‖ second (21 bytes) ‖ fee (4 bytes, big-endian)`.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(46);
        out.extend_from_slice(&self.token_a.to_key_bytes());
        out.extend_from_slice(&self.token_b.to_key_bytes());
        out.extend_from_slice(&self.fee.ppm().to_be_bytes());
        out
    }
}

impl fmt::Display for PoolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} @ {}", self.token_a, self.token_b, self.fee)
    }
}
