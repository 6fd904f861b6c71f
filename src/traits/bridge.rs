//! Cross-chain messaging collaborator.

use core::fmt;

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

/// Identifier of a destination chain as understood by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainSelector(pub u64);

impl fmt::Display for ChainSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chain:{}", self.0)
    }
}

/// Identifier the bridge assigns to an accepted message.
pub type MessageId = B256;

/// A message delivered by the bridge to its receiver on this chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Bridge-assigned identifier.
    pub id: MessageId,
    /// Chain the message was sent from.
    pub source: ChainSelector,
    /// Sending contract on the source chain.
    pub sender: Address,
    /// Opaque payload.
    pub payload: Vec<u8>,
}

/// Outbound side of a cross-chain messaging network.
///
/// The relay, fees and finality of the network are outside this crate; the
/// router only needs to know the endpoint's local address (the only caller
/// allowed to deliver inbound messages) and how to hand it a payload.
pub trait BridgeEndpoint {
    /// Address the endpoint delivers inbound messages from.
    fn address(&self) -> Address;

    /// Queues `payload` for `receiver` on `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError`] if the destination is unsupported or the
    /// endpoint rejects the message.
    fn send(
        &mut self,
        destination: ChainSelector,
        receiver: Address,
        payload: Vec<u8>,
    ) -> Result<MessageId, BridgeError>;
}
