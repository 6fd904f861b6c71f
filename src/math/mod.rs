//! Arithmetic for pricing and liquidity accounting.
//!
//! All math is exact 256-bit integer arithmetic: [`CheckedArithmetic`] for
//! overflow-safe operations, [`div_round`] for explicit rounding, and the
//! pricing formulas shared by pools and the router.

mod checked;
mod pricing;
mod rounding;

pub use checked::CheckedArithmetic;
pub use pricing::{WAD, get_amount_out, withdrawal_share};
pub use rounding::div_round;
