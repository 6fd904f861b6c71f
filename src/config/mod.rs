//! Declarative blueprints for pool construction.
//!
//! [`PoolConfig`] is validated once at construction and is the only input
//! [`Pool::initialize`](crate::pools::Pool::initialize) accepts.

mod pool;

pub use pool::PoolConfig;
