//! # Hydra Swap
//!
//! Constant-product exchange core: liquidity pools over token pairs, a
//! registry that creates them at deterministic addresses, and a router
//! that quotes and executes swaps across several pools at once.
//!
//! All amounts are exact 256-bit integers in minor units.  Every public
//! operation is atomic: it either completes or leaves every pool and every
//! balance exactly as it found them.
//!
//! # Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! hydra-swap = "0.1"
//! ```
//!
//! ## Create a pool, add liquidity and swap
//!
//! ```rust
//! use alloy_primitives::Address;
//! use hydra_swap::domain::{Amount, CallContext, Decimals, FeeTier, Liquidity, Token};
//! use hydra_swap::factory::SwapFactory;
//! use hydra_swap::ledger::InMemoryLedger;
//! use hydra_swap::traits::TokenLedger;
//!
//! let usdc = Address::repeat_byte(0x11);
//! let alice = Address::repeat_byte(0xa1);
//!
//! // 1. A ledger holding alice's balances
//! let mut ledger = InMemoryLedger::new();
//! ledger.register_token(usdc, Decimals::new(6).expect("valid decimals")).expect("new token");
//! ledger.mint(Token::Contract(usdc), alice, Amount::new(2_000_000)).expect("mint");
//! ledger.mint(Token::Native, alice, Amount::new(1_000_000)).expect("mint");
//!
//! // 2. A native/USDC pool at 0.30%
//! let factory = SwapFactory::new(Address::repeat_byte(0xf0), alice);
//! let pool = factory
//!     .create_pool(Token::Native, Token::Contract(usdc), FeeTier::MEDIUM)
//!     .expect("new pair");
//!
//! // 3. Deposit both legs; the native leg is attached as value
//! ledger.approve(usdc, alice, pool.address(), Amount::MAX).expect("approve");
//! let units = pool
//!     .add_liquidity(
//!         &mut ledger,
//!         CallContext::new(alice).with_value(Amount::new(500_000)),
//!         Amount::new(500_000),
//!         Amount::new(1_000_000),
//!     )
//!     .expect("deposit");
//! assert_eq!(units, Liquidity::new(1_500_000));
//!
//! // 4. Sell 10 000 USDC for the native currency
//! let result = pool
//!     .swap(&mut ledger, CallContext::new(alice), Amount::new(10_000), Token::Contract(usdc), alice)
//!     .expect("swap");
//! assert_eq!(result.amount_out(), Amount::new(4_935));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Router    │  quotes and executes multi-hop routes, bridge messages
//! └──────┬──────┘
//!        │ get_pool(a, b, fee)
//!        ▼
//! ┌─────────────┐
//! │   Factory   │  one pool per (pair, fee), deterministic addresses
//! └──────┬──────┘
//!        │ PoolHandle (shared, non-reentrant)
//!        ▼
//! ┌─────────────┐
//! │    Pools    │  reserves, liquidity units, x·y=k pricing
//! └──────┬──────┘
//!        │ settle::pull / settle::pay
//!        ▼
//! ┌─────────────┐
//! │   Ledger    │  TokenLedger: contract tokens and the native currency
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Token`](domain::Token), [`FeeTier`](domain::FeeTier), etc. |
//! | [`config`] | Validated pool blueprint [`PoolConfig`](config::PoolConfig) |
//! | [`math`]   | Checked arithmetic and the pricing and withdrawal formulas |
//! | [`pools`]  | [`Pool`](pools::Pool) and the shared [`PoolHandle`](pools::PoolHandle) |
//! | [`factory`] | [`SwapFactory`](factory::SwapFactory) pool registry |
//! | [`router`] | [`SwapRouter`](router::SwapRouter), [`Route`](router::Route), bridge instructions |
//! | [`traits`] | Collaborators: [`TokenLedger`](traits::TokenLedger), [`BridgeEndpoint`](traits::BridgeEndpoint) |
//! | [`ledger`] | [`InMemoryLedger`](ledger::InMemoryLedger) and token settlement helpers |
//! | [`access`] | Ownership and entry locks |
//! | [`error`]  | [`DexError`](error::DexError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |
//!
//! # Logging
//!
//! The crate emits [`tracing`] events (`info` for committed changes,
//! `debug` for quotes and hops, `warn` for reverted operations) and never
//! installs a subscriber itself.

pub mod access;
pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod router;
pub mod traits;
