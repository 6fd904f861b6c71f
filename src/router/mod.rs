//! Multi-hop routing and cross-chain swap instructions.
//!
//! A [`Route`] is a token path with one fee tier per hop.  The
//! [`SwapRouter`] resolves each hop's pool through the
//! [factory](crate::factory), quotes the path with exactly the pricing the
//! pools execute, and runs routed swaps atomically with a minimum-output
//! check.
//!
//! Cross-chain swaps travel as a [`SwapInstruction`] encoded with
//! `serde_json` and handed to a [`BridgeEndpoint`](crate::traits::BridgeEndpoint);
//! the receiving router executes the instruction out of its own custody.

mod events;
mod instruction;
mod route;
mod swap_router;

pub use events::RouterEvent;
pub use instruction::SwapInstruction;
pub use route::{Hop, Route};
pub use swap_router::SwapRouter;
