//! Constant-product pools and the shared handle used to reach them.
//!
//! A [`Pool`] owns one pair's reserves and liquidity book.  Pools created
//! by the [factory](crate::factory) are wrapped in a [`PoolHandle`], which
//! is what the registry, the router and direct callers hold.
//!
//! | Type | Role |
//! |------|------|
//! | [`Pool`] | Reserves, liquidity accounting, swap execution |
//! | [`PoolHandle`] | Reference-counted, non-reentrant access to a pool |
//! | [`PoolEvent`] | Committed state changes |

mod events;
mod handle;
mod pool;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use events::PoolEvent;
pub use handle::{PoolGuard, PoolHandle};
pub use pool::{Pool, PoolDetails, PoolSnapshot};
