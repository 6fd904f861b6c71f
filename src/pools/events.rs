//! Events recorded by a pool.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::domain::{Amount, FeeTier, Liquidity, Token};

/// A committed state change of a [`Pool`](super::Pool).
///
/// Events are appended only when an operation succeeds; a reverted call
/// leaves the log exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PoolEvent {
    /// The pool was bound to its pair and fee.
    Initialized {
        /// First token.
        token0: Token,
        /// Second token.
        token1: Token,
        /// Swap fee.
        fee: FeeTier,
    },
    /// A provider deposited both tokens.
    LiquidityAdded {
        /// Depositing account.
        provider: Address,
        /// Token0 deposited.
        amount0: Amount,
        /// Token1 deposited.
        amount1: Amount,
        /// Units credited.
        liquidity: Liquidity,
    },
    /// A provider withdrew a share of both reserves.
    LiquidityRemoved {
        /// Withdrawing account.
        provider: Address,
        /// Units burned.
        liquidity: Liquidity,
        /// Token0 paid out.
        amount0: Amount,
        /// Token1 paid out.
        amount1: Amount,
    },
    /// A swap against the reserves.
    Swap {
        /// Account that paid the input.
        sender: Address,
        /// Account that received the output.
        recipient: Address,
        /// Token sold into the pool.
        token_in: Token,
        /// Input, fee included.
        amount_in: Amount,
        /// Output paid.
        amount_out: Amount,
    },
}
