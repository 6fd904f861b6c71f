//! Pool creation and lookup.
//!
//! The [`SwapFactory`] is the registry of every pool in a deployment.  It
//! derives each pool's address deterministically, initializes the pool with
//! the caller's token order, and resolves lookups in either order.
//!
//! # Usage
//!
//! ```rust
//! use alloy_primitives::Address;
//! use hydra_swap::domain::{FeeTier, Token};
//! use hydra_swap::error::DexError;
//! use hydra_swap::factory::SwapFactory;
//!
//! let factory = SwapFactory::new(Address::repeat_byte(0xf0), Address::repeat_byte(0x01));
//! let (a, b) = (
//!     Token::Contract(Address::repeat_byte(0x0a)),
//!     Token::Contract(Address::repeat_byte(0x0b)),
//! );
//!
//! factory.create_pool(a, b, FeeTier::MEDIUM).expect("first creation");
//! assert!(matches!(
//!     factory.create_pool(b, a, FeeTier::MEDIUM),
//!     Err(DexError::PoolAlreadyExists)
//! ));
//! ```

mod swap_factory;

pub use swap_factory::{FactoryEvent, SwapFactory};
