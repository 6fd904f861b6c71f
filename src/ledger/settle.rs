//! Token movements for both token kinds.
//!
//! This is the one place that branches on [`Token::Native`] versus
//! [`Token::Contract`].  Native inflows model value attached to a call, so
//! they move the caller's native balance directly; contract inflows go
//! through `transfer_from` with the receiving component as spender.

use alloy_primitives::Address;

use crate::domain::{Amount, Token};
use crate::error::{DexError, TokenError};
use crate::traits::TokenLedger;

/// Moves `amount` of `token` from `from` into the custody of `into`.
///
/// For a contract token `into` must hold an allowance from `from`.
/// Zero amounts are a no-op.
///
/// # Errors
///
/// Propagates the ledger's [`TokenError`] unmodified.
pub fn pull<L: TokenLedger>(
    ledger: &mut L,
    token: Token,
    from: Address,
    into: Address,
    amount: Amount,
) -> Result<(), TokenError> {
    if amount.is_zero() {
        return Ok(());
    }
    match token {
        Token::Native => ledger.send_native(from, into, amount),
        Token::Contract(contract) => ledger.transfer_from(contract, into, from, into, amount),
    }
}

/// Pays `amount` of `token` from `from`'s custody to `to`.
///
/// Zero amounts are a no-op.
///
/// # Errors
///
/// Propagates the ledger's [`TokenError`] unmodified.
pub fn pay<L: TokenLedger>(
    ledger: &mut L,
    token: Token,
    from: Address,
    to: Address,
    amount: Amount,
) -> Result<(), TokenError> {
    if amount.is_zero() {
        return Ok(());
    }
    match token {
        Token::Native => ledger.send_native(from, to, amount),
        Token::Contract(contract) => ledger.transfer(contract, from, to, amount),
    }
}

/// Lets `spender` pull `amount` of `token` from `owner`.
///
/// The native currency needs no approval; the spender receives it as
/// attached value instead.
///
/// # Errors
///
/// Propagates the ledger's [`TokenError`] unmodified.
pub fn approve<L: TokenLedger>(
    ledger: &mut L,
    token: Token,
    owner: Address,
    spender: Address,
    amount: Amount,
) -> Result<(), TokenError> {
    match token {
        Token::Native => Ok(()),
        Token::Contract(contract) => ledger.approve(contract, owner, spender, amount),
    }
}

/// Checks that the value attached to a call matches its native leg.
///
/// `native_leg` is the native amount the call moves in, or `None` when no
/// leg is native; in that case the attached value must be zero.
///
/// # Errors
///
/// Returns [`DexError::NativeAmountMismatch`] on any difference.
pub fn expect_value(native_leg: Option<Amount>, attached: Amount) -> Result<(), DexError> {
    let expected = native_leg.unwrap_or_default();
    if expected != attached {
        return Err(DexError::NativeAmountMismatch { expected, attached });
    }
    Ok(())
}
