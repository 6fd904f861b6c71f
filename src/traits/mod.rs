//! Interfaces to the collaborators the swap core depends on.
//!
//! [`TokenLedger`] abstracts token balances and transfers;
//! [`BridgeEndpoint`] abstracts the cross-chain messaging network used by
//! the router.

mod bridge;
mod token_ledger;

pub use bridge::{BridgeEndpoint, ChainSelector, InboundMessage, MessageId};
pub use token_ledger::TokenLedger;
