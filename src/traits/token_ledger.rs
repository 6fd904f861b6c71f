//! Token collaborator interface.
//!
//! [`TokenLedger`] is everything pools and the router need from the outside
//! token world: balances, allowances, transfers and native-currency
//! payments.  The crate ships [`InMemoryLedger`](crate::ledger::InMemoryLedger)
//! for tests and simulations; a chain adapter would implement the same trait.
//!
//! # Atomicity
//!
//! Implementations must be `Clone`.  Multi-step settlement runs against a
//! clone that replaces the original only when every step succeeded (see
//! [`ledger::atomically`](crate::ledger::atomically)), so an implementation
//! does not need its own transaction support.

use alloy_primitives::Address;

use crate::domain::{Amount, Decimals, Token};
use crate::error::TokenError;

/// Balances, allowances and transfers for contract tokens and the native
/// currency.
///
/// Methods taking a contract `Address` operate on fungible token contracts.
/// The native currency has no allowances and moves only through
/// [`send_native`](Self::send_native).
pub trait TokenLedger: Clone {
    /// Balance of `account` in `token`.
    fn balance_of(&self, token: Token, account: Address) -> Amount;

    /// Amount `spender` may move out of `owner`'s balance of `token`.
    fn allowance(&self, token: Address, owner: Address, spender: Address) -> Amount;

    /// Sets `spender`'s allowance over `owner`'s balance of `token`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::UnknownToken`] if the contract is not known.
    fn approve(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<(), TokenError>;

    /// Moves `amount` of `token` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InsufficientBalance`] if `from` holds too little.
    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError>;

    /// Moves `amount` of `token` from `from` to `to` on behalf of `spender`,
    /// consuming allowance.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InsufficientAllowance`] or
    /// [`TokenError::InsufficientBalance`].
    fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError>;

    /// Moves `amount` of the native currency from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InsufficientBalance`] or
    /// [`TokenError::NativeTransferFailed`] if the receiver refuses payment.
    fn send_native(&mut self, from: Address, to: Address, amount: Amount)
    -> Result<(), TokenError>;

    /// Display decimals of `token`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::UnknownToken`] if the contract is not known.
    fn decimals(&self, token: Token) -> Result<Decimals, TokenError>;
}
