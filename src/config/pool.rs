//! Configuration for a constant-product pool.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::domain::{FeeTier, PoolKey, Token};
use crate::error::{DexError, Result};

/// Immutable parameters a [`Pool`](crate::pools::Pool) is initialized with.
///
/// `token0`/`token1` keep the order they were given in; the registry key is
/// derived separately by [`key`](Self::key).
///
/// # Validation
///
/// - `token0 != token1`, which also rules out a native/native pair.
/// - Neither side is `Token::Contract(Address::ZERO)`: the zero address
///   stands for the native currency and is never a contract.
/// - The fee range is enforced by [`FeeTier`] itself.
///
/// A config obtained through `serde` is re-checked by
/// [`Pool::initialize`](crate::pools::Pool::initialize) via
/// [`validate`](Self::validate).
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use hydra_swap::config::PoolConfig;
/// use hydra_swap::domain::{FeeTier, Token};
///
/// let usdc = Token::Contract(Address::repeat_byte(0x11));
/// let cfg = PoolConfig::new(Token::Native, usdc, FeeTier::LOW).expect("valid");
/// assert_eq!(cfg.token0(), Token::Native);
///
/// assert!(PoolConfig::new(usdc, usdc, FeeTier::LOW).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolConfig {
    token0: Token,
    token1: Token,
    fee: FeeTier,
}

impl PoolConfig {
    /// Creates a validated `PoolConfig`.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn new(token0: Token, token1: Token, fee: FeeTier) -> Result<Self> {
        let config = Self {
            token0,
            token1,
            fee,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidToken`] if either side is a contract at the zero
    ///   address.
    /// - [`DexError::PairIdentical`] if both tokens are equal.
    pub fn validate(&self) -> Result<()> {
        for token in [self.token0, self.token1] {
            if token == Token::Contract(Address::ZERO) {
                return Err(DexError::InvalidToken(token));
            }
        }
        if self.token0 == self.token1 {
            return Err(DexError::PairIdentical);
        }
        Ok(())
    }

    /// Returns the first token in creation order.
    #[must_use]
    pub const fn token0(&self) -> Token {
        self.token0
    }

    /// Returns the second token in creation order.
    #[must_use]
    pub const fn token1(&self) -> Token {
        self.token1
    }

    /// Returns the fee tier.
    #[must_use]
    pub const fn fee(&self) -> FeeTier {
        self.fee
    }

    /// Returns `true` if one side is the native currency.
    #[must_use]
    pub const fn has_native(&self) -> bool {
        self.token0.is_native() || self.token1.is_native()
    }

    /// Canonical registry key for this pair and fee.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::PairIdentical`] if both tokens are equal.
    pub fn key(&self) -> Result<PoolKey> {
        PoolKey::new(self.token0, self.token1, self.fee)
    }
}
