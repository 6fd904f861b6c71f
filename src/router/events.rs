use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::domain::{Amount, Token};
use crate::traits::{ChainSelector, MessageId};

/// A committed router action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RouterEvent {
    /// The router was bound to its factory and bridge.
    Initialized {
        owner: Address,
        factory: Address,
        bridge: Address,
    },
    /// A routed swap completed.
    Swapped {
        sender: Address,
        to: Address,
        token_in: Token,
        token_out: Token,
        amount_in: Amount,
        amount_out: Amount,
    },
    /// A swap instruction was handed to the bridge.
    MessageSent {
        id: MessageId,
        destination: ChainSelector,
        receiver: Address,
        sender: Address,
    },
    /// A bridged swap instruction was executed here.
    MessageReceived {
        id: MessageId,
        source: ChainSelector,
        sender: Address,
        to: Address,
        amount_out: Amount,
    },
}
