//! Token identity: the chain's native currency or a token contract.

use core::fmt;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// One side of a trading pair.
///
/// A pool pairs two distinct tokens, at most one of which is
/// [`Token::Native`].  Transfers branch on this variant in exactly one
/// place, [`ledger::settle`](crate::ledger::settle).
///
/// The derived ordering places `Native` before every contract and orders
/// contracts by address; [`PoolKey`](super::PoolKey) relies on it for
/// canonical pair ordering.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use hydra_swap::domain::Token;
///
/// let usdc = Token::Contract(Address::repeat_byte(0x11));
/// assert!(!usdc.is_native());
/// assert_eq!(usdc.contract(), Some(Address::repeat_byte(0x11)));
///
/// assert!(Token::Native < usdc);
/// assert_eq!(Token::Native.address(), Address::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Token {
    /// The chain's native currency, settled through attached value.
    Native,
    /// A fungible token contract, settled through transfers and allowances.
    Contract(Address),
}

impl Token {
    /// Returns `true` for the native currency.
    #[must_use]
    pub const fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }

    /// Returns the contract address, or `None` for the native currency.
    #[must_use]
    pub const fn contract(&self) -> Option<Address> {
        match self {
            Self::Native => None,
            Self::Contract(address) => Some(*address),
        }
    }

    /// Returns the on-chain identifier, using the zero address for the
    /// native currency.
    #[must_use]
    pub const fn address(&self) -> Address {
        match self {
            Self::Native => Address::ZERO,
            Self::Contract(address) => *address,
        }
    }

    /// Fixed-width encoding used when hashing pool keys: a tag byte
    /// followed by the 20 address bytes.
    #[must_use]
    pub fn to_key_bytes(&self) -> [u8; 21] {
        let mut out = [0u8; 21];
        if let Self::Contract(address) = self {
            out[0] = 1;
            out[1..].copy_from_slice(address.as_slice());
        }
        out
    }
}

impl From<Address> for Token {
    /// The zero address maps to [`Token::Native`].
    fn from(address: Address) -> Self {
        if address == Address::ZERO {
            Self::Native
        } else {
            Self::Contract(address)
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => f.write_str("native"),
            Self::Contract(address) => write!(f, "{address}"),
        }
    }
}
