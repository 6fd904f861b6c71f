//! Token decimal places.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::Amount;
use crate::error::{DexError, Result};

/// Maximum allowed decimal places (EVM standard).
const MAX_DECIMALS: u8 = 18;

/// Number of decimal places a token uses to display amounts.
///
/// Valid range is `0..=18`.  Pools never look at decimals; they are only
/// used to convert between human-readable and raw amounts.
///
/// # Examples
///
/// ```
/// use hydra_swap::domain::{Amount, Decimals};
///
/// let d = Decimals::new(6).expect("6 is valid");
/// assert_eq!(d.scale_up(2), Amount::new(2_000_000));
/// assert_eq!(d.format(Amount::new(1_500_000)), "1.5");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Decimals(u8);

impl Decimals {
    /// Zero decimal places.
    pub const ZERO: Self = Self(0);

    /// Eighteen decimal places, used by the native currency.
    pub const MAX: Self = Self(MAX_DECIMALS);

    /// Creates a new `Decimals` value after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidDecimals`] if `value` exceeds 18.
    pub const fn new(value: u8) -> Result<Self> {
        if value > MAX_DECIMALS {
            return Err(DexError::InvalidDecimals(value));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Converts whole units to raw units (`1` with 6 decimals is `1_000_000`).
    ///
    /// Cannot overflow: `u64::MAX × 10^18` fits in 256 bits.
    pub fn scale_up(&self, whole: u64) -> Amount {
        Amount::from_u256(U256::from(whole) * self.factor())
    }

    /// Converts raw units to whole units, truncating the fractional part.
    pub fn scale_down(&self, raw: Amount) -> Amount {
        Amount::from_u256(raw.get() / self.factor())
    }

    /// Renders a raw amount as a decimal string with trailing zeros trimmed.
    #[must_use]
    pub fn format(&self, raw: Amount) -> String {
        let factor = self.factor();
        let whole = raw.get() / factor;
        let frac = raw.get() % factor;
        if frac.is_zero() {
            return whole.to_string();
        }
        let digits = format!("{:0>width$}", frac.to_string(), width = usize::from(self.0));
        format!("{whole}.{}", digits.trim_end_matches('0'))
    }

    fn factor(&self) -> U256 {
        U256::from(10u8).pow(U256::from(self.0))
    }
}

impl TryFrom<u8> for Decimals {
    type Error = DexError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Decimals> for u8 {
    fn from(decimals: Decimals) -> Self {
        decimals.0
    }
}
