//! Validated multi-hop paths.

use serde::{Deserialize, Serialize};

use crate::domain::{FeeTier, Token};
use crate::error::{DexError, Result};

/// One step of a [`Route`]: sell `token_in` for `token_out` in the pool
/// with fee `fee`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hop {
    /// Token sold into the pool.
    pub token_in: Token,
    /// Token bought from the pool.
    pub token_out: Token,
    /// Fee tier selecting the pool.
    pub fee: FeeTier,
}

/// A token path with one fee tier per hop.
///
/// `path[i] -> path[i + 1]` goes through the pool for
/// `(path[i], path[i + 1], fees[i])`.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use hydra_swap::domain::{FeeTier, Token};
/// use hydra_swap::error::DexError;
/// use hydra_swap::router::Route;
///
/// let a = Token::Contract(Address::repeat_byte(0x0a));
/// let b = Token::Contract(Address::repeat_byte(0x0b));
///
/// let route = Route::new(vec![a, b, Token::Native], vec![FeeTier::MEDIUM, FeeTier::LOW])
///     .expect("two hops");
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.output(), Token::Native);
///
/// assert!(matches!(
///     Route::new(vec![a], vec![]),
///     Err(DexError::InvalidPath(_))
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Route {
    path: Vec<Token>,
    fees: Vec<FeeTier>,
}

impl Route {
    /// Validates the shape of `path` against `fees`.
    ///
    /// Pool existence is not checked here; that happens when the route is
    /// quoted or executed.
    ///
    /// # Errors
    ///
    /// [`DexError::InvalidPath`] if `path` has fewer than two tokens or
    /// `fees` does not have exactly `path.len() - 1` entries.
    pub fn new(path: Vec<Token>, fees: Vec<FeeTier>) -> Result<Self> {
        if path.len() < 2 {
            return Err(DexError::InvalidPath("path needs at least two tokens"));
        }
        if fees.len() != path.len() - 1 {
            return Err(DexError::InvalidPath("one fee per hop required"));
        }
        Ok(Self { path, fees })
    }

    /// A single-hop route.
    ///
    /// # Errors
    ///
    /// Never fails for two tokens; kept fallible for symmetry with
    /// [`Route::new`].
    pub fn direct(token_in: Token, token_out: Token, fee: FeeTier) -> Result<Self> {
        Self::new(vec![token_in, token_out], vec![fee])
    }

    /// Tokens along the route, input first.
    #[must_use]
    pub fn path(&self) -> &[Token] {
        &self.path
    }

    /// Fee tier of each hop.
    #[must_use]
    pub fn fees(&self) -> &[FeeTier] {
        &self.fees
    }

    /// Number of hops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fees.len()
    }

    /// Always `false`; a valid route has at least one hop.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fees.is_empty()
    }

    /// Token the caller sells.
    #[must_use]
    pub fn input(&self) -> Token {
        self.path[0]
    }

    /// Token the recipient receives.
    #[must_use]
    pub fn output(&self) -> Token {
        self.path[self.path.len() - 1]
    }

    /// The hops in execution order.
    pub fn hops(&self) -> impl ExactSizeIterator<Item = Hop> + '_ {
        self.path
            .windows(2)
            .zip(&self.fees)
            .map(|(pair, &fee)| Hop {
                token_in: pair[0],
                token_out: pair[1],
                fee,
            })
    }
}
