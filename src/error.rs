//! Unified error types for the swap core.
//!
//! Every fallible operation on pools, the factory and the router returns
//! [`DexError`].  Failures raised by the external collaborators (token
//! ledger, bridge endpoint) keep their own enums and are wrapped unmodified,
//! so callers can still match on the collaborator's exact failure.

use alloy_primitives::Address;
use thiserror::Error;

use crate::domain::{Amount, Token};

/// Convenience alias used throughout the crate.
pub type Result<T, E = DexError> = core::result::Result<T, E>;

/// Errors surfaced by [`Pool`](crate::pools::Pool),
/// [`SwapFactory`](crate::factory::SwapFactory) and
/// [`SwapRouter`](crate::router::SwapRouter).
///
/// Any error aborts the whole operation: no pool and no balance is left
/// partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DexError {
    /// A component was initialized a second time.
    #[error("already initialized")]
    AlreadyInitialized,

    /// An operation was attempted before initialization.
    #[error("not initialized")]
    NotInitialized,

    /// An amount that must be positive was zero.
    #[error("{0} must be greater than zero")]
    ZeroAmount(&'static str),

    /// The swap recipient is the null address.
    #[error("invalid recipient address")]
    InvalidRecipient,

    /// A router path is shorter than two tokens or its fee list does not
    /// have exactly one entry per hop.
    #[error("invalid path: {0}")]
    InvalidPath(&'static str),

    /// A referenced pool does not exist or has an empty reserve.
    #[error("invalid reserves")]
    InvalidReserves,

    /// The caller tried to withdraw more liquidity than they provided.
    #[error("no liquidity provided by user")]
    NoLiquidityProvided,

    /// The pool holds no liquidity at all.
    #[error("no liquidity available")]
    NoLiquidityAvailable,

    /// The realized output of a routed swap is below the caller's minimum.
    #[error("insufficient output amount: got {amount_out}, minimum {amount_out_min}")]
    InsufficientOutputAmount {
        /// Output the route would have delivered.
        amount_out: Amount,
        /// Minimum requested by the caller.
        amount_out_min: Amount,
    },

    /// Both sides of a pair are the same token.
    #[error("identical tokens in pair")]
    PairIdentical,

    /// A pool already exists for the canonical pair and fee.
    #[error("pool already exists")]
    PoolAlreadyExists,

    /// Fee outside the open range `(0, 1_000_000)` ppm.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// Token decimals outside `0..=18`.
    #[error("decimals must be 0..=18, got {0}")]
    InvalidDecimals(u8),

    /// The token is not one of the pool's two tokens.
    #[error("token {0} is not part of the pool pair")]
    InvalidToken(Token),

    /// Attached native value does not match the native leg of the call.
    #[error("native value mismatch: expected {expected}, attached {attached}")]
    NativeAmountMismatch {
        /// Value the operation requires.
        expected: Amount,
        /// Value the caller attached.
        attached: Amount,
    },

    /// A state-mutating entry point was re-entered while already running.
    #[error("reentrant call")]
    Reentrancy,

    /// The caller is not the owner of the component.
    #[error("caller {0} is not the owner")]
    NotOwner(Address),

    /// The caller is not allowed to invoke this entry point.
    #[error("unauthorized caller {0}")]
    Unauthorized(Address),

    /// A cross-chain payload could not be decoded or is malformed.
    #[error("invalid cross-chain message: {0}")]
    InvalidMessage(String),

    /// Checked arithmetic overflowed.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Checked subtraction went below zero.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero in a pricing or share computation.
    #[error("division by zero")]
    DivisionByZero,

    /// Failure reported by the token ledger.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Failure reported by the bridge endpoint.
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

/// Failures raised by a [`TokenLedger`](crate::traits::TokenLedger).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The sender does not hold enough of the token.
    #[error("insufficient balance of {token} for {account}: needed {needed}, available {available}")]
    InsufficientBalance {
        /// Token being moved.
        token: Token,
        /// Account being debited.
        account: Address,
        /// Amount requested.
        needed: Amount,
        /// Amount held.
        available: Amount,
    },

    /// The spender's allowance is too small.
    #[error("insufficient allowance of {token} from {owner} to {spender}: needed {needed}, allowance {allowance}")]
    InsufficientAllowance {
        /// Token contract.
        token: Address,
        /// Account whose tokens are being spent.
        owner: Address,
        /// Account spending them.
        spender: Address,
        /// Amount requested.
        needed: Amount,
        /// Current allowance.
        allowance: Amount,
    },

    /// The token contract is not known to the ledger.
    #[error("unknown token contract {0}")]
    UnknownToken(Address),

    /// The token contract is already registered.
    #[error("token contract {0} already registered")]
    AlreadyRegistered(Address),

    /// The receiver refused a native-currency payment.
    #[error("native transfer to {0} failed")]
    NativeTransferFailed(Address),

    /// Balances would exceed the representable range.
    #[error("balance overflow")]
    Overflow,
}

/// Failures raised by a [`BridgeEndpoint`](crate::traits::BridgeEndpoint).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// The destination chain is not supported by the endpoint.
    #[error("unsupported destination chain {0}")]
    UnsupportedDestination(u64),

    /// The endpoint refused the message.
    #[error("message rejected: {0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_amount_message_names_the_parameter() {
        let err = DexError::ZeroAmount("amountIn");
        assert_eq!(err.to_string(), "amountIn must be greater than zero");
    }

    #[test]
    fn insufficient_output_message_has_both_amounts() {
        let err = DexError::InsufficientOutputAmount {
            amount_out: Amount::new(5),
            amount_out_min: Amount::new(7),
        };
        assert_eq!(
            err.to_string(),
            "insufficient output amount: got 5, minimum 7"
        );
    }

    #[test]
    fn token_error_converts_transparently() {
        let inner = TokenError::UnknownToken(Address::repeat_byte(3));
        let err: DexError = inner.clone().into();
        assert_eq!(err, DexError::Token(inner.clone()));
        assert_eq!(err.to_string(), inner.to_string());
    }

    #[test]
    fn bridge_error_converts() {
        let err: DexError = BridgeError::UnsupportedDestination(42).into();
        assert!(matches!(
            err,
            DexError::Bridge(BridgeError::UnsupportedDestination(42))
        ));
    }
}
