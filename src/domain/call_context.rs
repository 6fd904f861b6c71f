//! Who is calling and what value is attached.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use super::Amount;

/// The sender of a call and the native value attached to it.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use hydra_swap::domain::{Amount, CallContext};
///
/// let alice = Address::repeat_byte(0xa1);
/// let ctx = CallContext::new(alice).with_value(Amount::new(5));
/// assert_eq!(ctx.sender, alice);
/// assert_eq!(ctx.value, Amount::new(5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallContext {
    /// Account making the call.
    pub sender: Address,
    /// Native currency attached to the call.
    pub value: Amount,
}

impl CallContext {
    /// A call from `sender` with no value attached.
    #[must_use]
    pub const fn new(sender: Address) -> Self {
        Self {
            sender,
            value: Amount::ZERO,
        }
    }

    /// Attaches `value` of the native currency.
    #[must_use]
    pub const fn with_value(self, value: Amount) -> Self {
        Self { value, ..self }
    }
}
