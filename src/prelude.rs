//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use hydra_swap::prelude::*;
//! ```
//!
//! This re-exports the value types, the three components, the collaborator
//! traits and the error types so that consumers don't need to import from
//! individual submodules.

// Domain types
pub use crate::domain::{
    Amount, CallContext, Decimals, FeeTier, Liquidity, PoolKey, ReserveShare, SwapResult, Token,
};

// Components
pub use crate::factory::SwapFactory;
pub use crate::pools::{Pool, PoolHandle};
pub use crate::router::{Route, SwapInstruction, SwapRouter};

// Collaborators
pub use crate::ledger::InMemoryLedger;
pub use crate::traits::{BridgeEndpoint, ChainSelector, InboundMessage, TokenLedger};

// Configuration
pub use crate::config::PoolConfig;

// Errors
pub use crate::error::{BridgeError, DexError, Result, TokenError};
