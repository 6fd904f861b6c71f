//! Fundamental value types of the swap core.
//!
//! Tokens, raw amounts, liquidity units, fees and pool keys.  Types with a
//! restricted range ([`FeeTier`], [`Decimals`]) validate on construction
//! and on deserialization, so a value that exists is valid.

mod amount;
mod call_context;
mod decimals;
mod fee_tier;
mod liquidity;
mod pool_key;
mod reserve_share;
mod rounding;
mod swap_result;
mod token;

pub use amount::Amount;
pub use call_context::CallContext;
pub use decimals::Decimals;
pub use fee_tier::{FeeTier, PPM_DENOMINATOR};
pub use liquidity::Liquidity;
pub use pool_key::PoolKey;
pub use reserve_share::ReserveShare;
pub use rounding::Rounding;
pub use swap_result::SwapResult;
pub use token::Token;
