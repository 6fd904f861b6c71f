//! Token settlement.
//!
//! [`InMemoryLedger`] is a complete [`TokenLedger`] for tests and
//! simulations.  The [`settle`] helpers move either token kind, and
//! [`atomically`] makes a sequence of movements all-or-nothing.

mod memory;
pub mod settle;

pub use memory::InMemoryLedger;

use crate::traits::TokenLedger;

/// Runs `f` against a copy of `ledger` and commits the copy only if `f`
/// succeeds.
///
/// # Errors
///
/// Returns whatever `f` returns; `ledger` is untouched in that case.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use hydra_swap::domain::{Amount, Token};
/// use hydra_swap::ledger::{InMemoryLedger, atomically};
/// use hydra_swap::traits::TokenLedger;
///
/// let (a, b) = (Address::repeat_byte(1), Address::repeat_byte(2));
/// let mut ledger = InMemoryLedger::new();
/// ledger.mint(Token::Native, a, Amount::new(10)).expect("minted");
///
/// // The second payment fails, so the first one is rolled back as well.
/// let result = atomically(&mut ledger, |l| {
///     l.send_native(a, b, Amount::new(6))?;
///     l.send_native(a, b, Amount::new(6))
/// });
/// assert!(result.is_err());
/// assert_eq!(ledger.balance_of(Token::Native, a), Amount::new(10));
/// ```
pub fn atomically<L, T, E, F>(ledger: &mut L, f: F) -> Result<T, E>
where
    L: TokenLedger,
    F: FnOnce(&mut L) -> Result<T, E>,
{
    let mut scratch = ledger.clone();
    let out = f(&mut scratch)?;
    *ledger = scratch;
    Ok(out)
}
