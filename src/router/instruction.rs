//! Swap instructions carried across the bridge.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use super::Route;
use crate::domain::{Amount, FeeTier, Token};
use crate::error::{DexError, Result};

/// A routed swap to execute on the destination chain.
///
/// Travels as JSON inside a bridge message.  The destination router
/// sells `amount_in` of `path[0]` out of its own custody, so the input
/// must already be held there when the message arrives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapInstruction {
    /// Amount of `path[0]` to sell.
    pub amount_in: Amount,
    /// Minimum acceptable output; the swap reverts below it.
    pub amount_out_min: Amount,
    /// Tokens along the route, input first.
    pub path: Vec<Token>,
    /// Fee tier of each hop.
    pub fees: Vec<FeeTier>,
    /// Recipient of the final output.
    pub to: Address,
}

impl SwapInstruction {
    /// Builds an instruction for `route`.
    #[must_use]
    pub fn new(amount_in: Amount, amount_out_min: Amount, route: &Route, to: Address) -> Self {
        Self {
            amount_in,
            amount_out_min,
            path: route.path().to_vec(),
            fees: route.fees().to_vec(),
            to,
        }
    }

    /// Rebuilds and validates the route.
    ///
    /// # Errors
    ///
    /// [`DexError::InvalidPath`] for a malformed path.
    pub fn route(&self) -> Result<Route> {
        Route::new(self.path.clone(), self.fees.clone())
    }

    /// Serializes to the bridge payload.
    ///
    /// # Errors
    ///
    /// [`DexError::InvalidMessage`] if serialization fails.
    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| DexError::InvalidMessage(e.to_string()))
    }

    /// Parses a bridge payload.
    ///
    /// # Errors
    ///
    /// [`DexError::InvalidMessage`] if `payload` is not a valid instruction.
    pub fn decode(payload: &[u8]) -> Result<Self> {
        serde_json::from_slice(payload).map_err(|e| DexError::InvalidMessage(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn instruction() -> SwapInstruction {
        let Ok(route) = Route::new(
            vec![Token::Contract(Address::repeat_byte(0x0a)), Token::Native],
            vec![FeeTier::MEDIUM],
        ) else {
            panic!("valid route");
        };
        SwapInstruction::new(
            Amount::new(1_000),
            Amount::new(900),
            &route,
            Address::repeat_byte(0xb0),
        )
    }

    #[test]
    fn payload_decodes_to_same_instruction() {
        let original = instruction();
        let Ok(bytes) = original.encode() else {
            panic!("encode");
        };
        assert_eq!(SwapInstruction::decode(&bytes), Ok(original));
    }

    #[test]
    fn payload_is_readable_json() {
        let Ok(bytes) = instruction().encode() else {
            panic!("encode");
        };
        let Ok(value) = serde_json::from_slice::<serde_json::Value>(&bytes) else {
            panic!("json");
        };
        assert_eq!(value["path"][1], "native");
        assert_eq!(value["fees"][0], 3000);
    }

    #[test]
    fn garbage_is_invalid_message() {
        assert!(matches!(
            SwapInstruction::decode(b"not json"),
            Err(DexError::InvalidMessage(_))
        ));
        // a fee outside the valid range never decodes
        let bad = br#"{"amount_in":"0x1","amount_out_min":"0x0","path":["native"],"fees":[0],"to":"0x0000000000000000000000000000000000000001"}"#;
        assert!(matches!(
            SwapInstruction::decode(bad),
            Err(DexError::InvalidMessage(_))
        ));
    }

    #[test]
    fn malformed_path_decodes_but_fails_route() {
        let mut short = instruction();
        short.path.truncate(1);
        let Ok(bytes) = short.encode() else {
            panic!("encode");
        };
        let Ok(decoded) = SwapInstruction::decode(&bytes) else {
            panic!("decode");
        };
        assert!(matches!(decoded.route(), Err(DexError::InvalidPath(_))));
    }
}
