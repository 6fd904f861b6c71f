//! Constant-product pool with additive liquidity accounting.
//!
//! A pool holds the reserves of one token pair and prices swaps with
//! `x × y = k`, taking its fee from the input before pricing.  Liquidity is
//! credited additively: depositing `amount0` and `amount1` credits
//! `amount0 + amount1` units regardless of the current reserve ratio, and a
//! withdrawal pays the burned units' pro-rata share of both reserves.
//!
//! # Operation order
//!
//! Every mutating operation validates, applies its effects to the pool
//! state, and only then moves tokens through the ledger.  If any step
//! fails, the pool state, the event log and the ledger are all restored.
//!
//! # Example
//!
//! ```rust
//! use alloy_primitives::Address;
//! use hydra_swap::config::PoolConfig;
//! use hydra_swap::domain::{Amount, CallContext, Decimals, FeeTier, Token};
//! use hydra_swap::ledger::InMemoryLedger;
//! use hydra_swap::pools::Pool;
//! use hydra_swap::traits::TokenLedger;
//!
//! let (tka, tkb) = (Address::repeat_byte(0x0a), Address::repeat_byte(0x0b));
//! let alice = Address::repeat_byte(0xa1);
//! let pool_address = Address::repeat_byte(0xcc);
//!
//! let mut ledger = InMemoryLedger::new();
//! for token in [tka, tkb] {
//!     ledger.register_token(token, Decimals::MAX).expect("registered");
//!     ledger.mint(Token::Contract(token), alice, Amount::new(10_000)).expect("minted");
//!     ledger.approve(token, alice, pool_address, Amount::new(10_000)).expect("approved");
//! }
//!
//! let mut pool = Pool::new(pool_address);
//! let config = PoolConfig::new(Token::Contract(tka), Token::Contract(tkb), FeeTier::MEDIUM)
//!     .expect("valid config");
//! pool.initialize(config).expect("first initialization");
//!
//! let ctx = CallContext::new(alice);
//! pool.add_liquidity(&mut ledger, ctx, Amount::new(5_000), Amount::new(5_000))
//!     .expect("deposited");
//!
//! let result = pool
//!     .swap(&mut ledger, ctx, Amount::new(1_000), Token::Contract(tka), alice)
//!     .expect("swapped");
//! assert_eq!(result.amount_out(), Amount::new(831));
//! ```

use std::collections::BTreeMap;

use alloy_primitives::Address;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::PoolEvent;
use crate::config::PoolConfig;
use crate::domain::{Amount, CallContext, FeeTier, Liquidity, ReserveShare, SwapResult, Token};
use crate::error::{DexError, Result};
use crate::ledger::{atomically, settle};
use crate::math::{CheckedArithmetic, get_amount_out, withdrawal_share};
use crate::traits::TokenLedger;

/// Read-only summary returned by [`Pool::details`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolDetails {
    /// First token in creation order.
    pub token0: Token,
    /// Second token in creation order.
    pub token1: Token,
    /// Swap fee.
    pub fee: FeeTier,
    /// Reserve of token0.
    pub reserve0: Amount,
    /// Reserve of token1.
    pub reserve1: Amount,
}

impl PoolDetails {
    /// Prices a swap against these reserves and moves them exactly as
    /// [`Pool::swap`] would, without touching the pool.
    ///
    /// Chaining calls on the same `PoolDetails` reproduces a route that
    /// passes through one pool more than once.
    ///
    /// # Errors
    ///
    /// - [`DexError::ZeroAmount`] if `amount_in` is zero.
    /// - [`DexError::InvalidToken`] if `token_in` is not in the pair.
    /// - [`DexError::InvalidReserves`] if either reserve is empty.
    pub fn simulate_swap(&mut self, amount_in: Amount, token_in: Token) -> Result<SwapResult> {
        if amount_in.is_zero() {
            return Err(DexError::ZeroAmount("amountIn"));
        }
        let (reserve_in, reserve_out) = if token_in == self.token0 {
            (&mut self.reserve0, &mut self.reserve1)
        } else if token_in == self.token1 {
            (&mut self.reserve1, &mut self.reserve0)
        } else {
            return Err(DexError::InvalidToken(token_in));
        };
        let result = get_amount_out(token_in, amount_in, *reserve_in, *reserve_out, self.fee)?;
        *reserve_in = reserve_in.safe_add(&amount_in)?;
        *reserve_out = reserve_out.safe_sub(&result.amount_out())?;
        Ok(result)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PoolState {
    config: Option<PoolConfig>,
    reserve0: Amount,
    reserve1: Amount,
    total_liquidity: Liquidity,
    liquidity_of: BTreeMap<Address, Liquidity>,
}

/// A saved copy of a pool's state, used to undo a multi-pool operation.
#[derive(Debug, Clone)]
pub struct PoolSnapshot {
    state: PoolState,
    events: usize,
}

/// A single constant-product pool.
///
/// # State
///
/// - `reserve0` / `reserve1`: tokens held, fees included.
/// - `total_liquidity`: units credited minus units burned.
/// - `liquidity_of`: per-provider units; always sums to `total_liquidity`.
///
/// Swaps never change liquidity; only deposits and withdrawals do.
#[derive(Debug, Clone)]
pub struct Pool {
    address: Address,
    state: PoolState,
    events: Vec<PoolEvent>,
}

impl Pool {
    /// Creates an empty, uninitialized pool living at `address`.
    ///
    /// `address` is the pool's custody account in the token ledger.
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self {
            address,
            state: PoolState::default(),
            events: Vec::new(),
        }
    }

    /// Binds the pool to its pair and fee.  Allowed exactly once.
    ///
    /// # Errors
    ///
    /// - [`DexError::AlreadyInitialized`] on a second call.
    /// - [`DexError::PairIdentical`] if the config fails validation.
    pub fn initialize(&mut self, config: PoolConfig) -> Result<()> {
        if self.state.config.is_some() {
            return Err(DexError::AlreadyInitialized);
        }
        config.validate()?;
        self.state.config = Some(config);
        self.events.push(PoolEvent::Initialized {
            token0: config.token0(),
            token1: config.token1(),
            fee: config.fee(),
        });
        info!(
            pool = %self.address,
            token0 = %config.token0(),
            token1 = %config.token1(),
            fee = config.fee().ppm(),
            "pool initialized"
        );
        Ok(())
    }

    // -- Accessors ----------------------------------------------------------

    /// Returns the pool's custody address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns `true` once [`initialize`](Self::initialize) succeeded.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.state.config.is_some()
    }

    /// Returns the pool's configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::NotInitialized`] before initialization.
    pub fn config(&self) -> Result<PoolConfig> {
        self.state.config.ok_or(DexError::NotInitialized)
    }

    /// Returns the reserve of token0.
    pub const fn reserve0(&self) -> Amount {
        self.state.reserve0
    }

    /// Returns the reserve of token1.
    pub const fn reserve1(&self) -> Amount {
        self.state.reserve1
    }

    /// Returns the liquidity units outstanding.
    pub const fn total_liquidity(&self) -> Liquidity {
        self.state.total_liquidity
    }

    /// Returns the units credited to `provider` and not yet withdrawn.
    pub fn liquidity_of(&self, provider: Address) -> Liquidity {
        self.state
            .liquidity_of
            .get(&provider)
            .copied()
            .unwrap_or_default()
    }

    /// Returns the committed event log, oldest first.
    #[must_use]
    pub fn events(&self) -> &[PoolEvent] {
        &self.events
    }

    /// Pair, fee and reserves in one read.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::NotInitialized`] before initialization.
    pub fn details(&self) -> Result<PoolDetails> {
        let config = self.config()?;
        Ok(PoolDetails {
            token0: config.token0(),
            token1: config.token1(),
            fee: config.fee(),
            reserve0: self.state.reserve0,
            reserve1: self.state.reserve1,
        })
    }

    /// What `provider` would receive by withdrawing all of their units now.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::NotInitialized`] before initialization, or an
    /// arithmetic error from the share computation.
    pub fn liquidity_provided(&self, provider: Address) -> Result<ReserveShare> {
        self.config()?;
        let units = self.liquidity_of(provider);
        if units.is_zero() {
            return Ok(ReserveShare::ZERO);
        }
        withdrawal_share(
            units,
            self.state.total_liquidity,
            self.state.reserve0,
            self.state.reserve1,
        )
    }

    /// Prices a swap against the current reserves without executing it.
    ///
    /// Uses the same formula as [`swap`](Self::swap), so the quoted output
    /// equals the executed output while the reserves are unchanged.
    ///
    /// # Errors
    ///
    /// - [`DexError::NotInitialized`] before initialization.
    /// - [`DexError::ZeroAmount`] if `amount_in` is zero.
    /// - [`DexError::InvalidToken`] if `token_in` is not in the pair.
    /// - [`DexError::InvalidReserves`] if either reserve is zero.
    pub fn quote(&self, amount_in: Amount, token_in: Token) -> Result<SwapResult> {
        let config = self.config()?;
        if amount_in.is_zero() {
            return Err(DexError::ZeroAmount("amountIn"));
        }
        let (reserve_in, reserve_out) = self.oriented_reserves(&config, token_in)?;
        let result = get_amount_out(token_in, amount_in, reserve_in, reserve_out, config.fee())?;
        debug!(
            pool = %self.address,
            %token_in,
            %amount_in,
            amount_out = %result.amount_out(),
            "quoted swap"
        );
        Ok(result)
    }

    // -- Mutations ----------------------------------------------------------

    /// Deposits `amount0` of token0 and `amount1` of token1 from the caller.
    ///
    /// Contract legs are pulled with `transfer_from`, so the caller must have
    /// approved the pool.  A native leg must be attached as `ctx.value`,
    /// exactly.  Credits and returns `amount0 + amount1` units.
    ///
    /// # Errors
    ///
    /// - [`DexError::NotInitialized`] before initialization.
    /// - [`DexError::ZeroAmount`] if either amount is zero.
    /// - [`DexError::NativeAmountMismatch`] if `ctx.value` differs from the
    ///   native leg (or is non-zero when there is none).
    /// - [`DexError::Token`] if a transfer fails.
    pub fn add_liquidity<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        ctx: CallContext,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<Liquidity> {
        self.transact("add_liquidity", |pool| {
            let config = pool.config()?;
            if amount0.is_zero() {
                return Err(DexError::ZeroAmount("amount0"));
            }
            if amount1.is_zero() {
                return Err(DexError::ZeroAmount("amount1"));
            }
            let native_leg = if config.token0().is_native() {
                Some(amount0)
            } else if config.token1().is_native() {
                Some(amount1)
            } else {
                None
            };
            settle::expect_value(native_leg, ctx.value)?;

            let minted = Liquidity::from(amount0.safe_add(&amount1)?);
            pool.state.reserve0 = pool.state.reserve0.safe_add(&amount0)?;
            pool.state.reserve1 = pool.state.reserve1.safe_add(&amount1)?;
            pool.state.total_liquidity = pool.state.total_liquidity.safe_add(&minted)?;
            let held = pool.liquidity_of(ctx.sender).safe_add(&minted)?;
            pool.state.liquidity_of.insert(ctx.sender, held);

            let here = pool.address;
            atomically(ledger, |l| {
                settle::pull(l, config.token0(), ctx.sender, here, amount0)?;
                settle::pull(l, config.token1(), ctx.sender, here, amount1)
            })?;

            pool.events.push(PoolEvent::LiquidityAdded {
                provider: ctx.sender,
                amount0,
                amount1,
                liquidity: minted,
            });
            info!(
                pool = %here,
                provider = %ctx.sender,
                %amount0,
                %amount1,
                liquidity = %minted,
                "liquidity added"
            );
            Ok(minted)
        })
    }

    /// Burns `amount` of the caller's units and pays their share of both
    /// reserves to the caller.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - [`DexError::NotInitialized`] before initialization.
    /// - [`DexError::ZeroAmount`] if `amount` is zero.
    /// - [`DexError::NoLiquidityAvailable`] if the pool has no liquidity.
    /// - [`DexError::NoLiquidityProvided`] if `amount` exceeds the caller's
    ///   units.
    ///
    /// Value attached to the call is rejected with
    /// [`DexError::NativeAmountMismatch`]; transfer failures surface as
    /// [`DexError::Token`].
    pub fn remove_liquidity<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        ctx: CallContext,
        amount: Liquidity,
    ) -> Result<ReserveShare> {
        self.transact("remove_liquidity", |pool| {
            let config = pool.config()?;
            if amount.is_zero() {
                return Err(DexError::ZeroAmount("amount"));
            }
            if pool.state.total_liquidity.is_zero() {
                return Err(DexError::NoLiquidityAvailable);
            }
            let held = pool.liquidity_of(ctx.sender);
            if amount > held {
                return Err(DexError::NoLiquidityProvided);
            }
            settle::expect_value(None, ctx.value)?;

            let share = withdrawal_share(
                amount,
                pool.state.total_liquidity,
                pool.state.reserve0,
                pool.state.reserve1,
            )?;

            pool.state.reserve0 = pool.state.reserve0.safe_sub(&share.amount0)?;
            pool.state.reserve1 = pool.state.reserve1.safe_sub(&share.amount1)?;
            pool.state.total_liquidity = pool.state.total_liquidity.safe_sub(&amount)?;
            let left = held.safe_sub(&amount)?;
            if left.is_zero() {
                pool.state.liquidity_of.remove(&ctx.sender);
            } else {
                pool.state.liquidity_of.insert(ctx.sender, left);
            }

            let here = pool.address;
            atomically(ledger, |l| {
                settle::pay(l, config.token0(), here, ctx.sender, share.amount0)?;
                settle::pay(l, config.token1(), here, ctx.sender, share.amount1)
            })?;

            pool.events.push(PoolEvent::LiquidityRemoved {
                provider: ctx.sender,
                liquidity: amount,
                amount0: share.amount0,
                amount1: share.amount1,
            });
            info!(
                pool = %here,
                provider = %ctx.sender,
                liquidity = %amount,
                amount0 = %share.amount0,
                amount1 = %share.amount1,
                "liquidity removed"
            );
            Ok(share)
        })
    }

    /// Sells `amount_in` of `token_in` from the caller and pays the output
    /// of the other token to `to`.
    ///
    /// There is no minimum-output check here; a zero output is accepted.
    /// Slippage protection belongs to the router.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - [`DexError::NotInitialized`] before initialization.
    /// - [`DexError::ZeroAmount`] if `amount_in` is zero.
    /// - [`DexError::InvalidRecipient`] if `to` is the zero address.
    /// - [`DexError::InvalidToken`] if `token_in` is not in the pair.
    /// - [`DexError::InvalidReserves`] if either reserve is zero.
    ///
    /// Then [`DexError::NativeAmountMismatch`] for a wrong attached value,
    /// and [`DexError::Token`] for collaborator failures.
    pub fn swap<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        ctx: CallContext,
        amount_in: Amount,
        token_in: Token,
        to: Address,
    ) -> Result<SwapResult> {
        self.transact("swap", |pool| {
            let config = pool.config()?;
            if amount_in.is_zero() {
                return Err(DexError::ZeroAmount("amountIn"));
            }
            if to == Address::ZERO {
                return Err(DexError::InvalidRecipient);
            }
            let (reserve_in, reserve_out) = pool.oriented_reserves(&config, token_in)?;
            let result =
                get_amount_out(token_in, amount_in, reserve_in, reserve_out, config.fee())?;
            settle::expect_value(token_in.is_native().then_some(amount_in), ctx.value)?;

            let amount_out = result.amount_out();
            let token_out = if token_in == config.token0() {
                pool.state.reserve0 = reserve_in.safe_add(&amount_in)?;
                pool.state.reserve1 = reserve_out.safe_sub(&amount_out)?;
                config.token1()
            } else {
                pool.state.reserve1 = reserve_in.safe_add(&amount_in)?;
                pool.state.reserve0 = reserve_out.safe_sub(&amount_out)?;
                config.token0()
            };

            let here = pool.address;
            atomically(ledger, |l| {
                settle::pull(l, token_in, ctx.sender, here, amount_in)?;
                settle::pay(l, token_out, here, to, amount_out)
            })?;

            pool.events.push(PoolEvent::Swap {
                sender: ctx.sender,
                recipient: to,
                token_in,
                amount_in,
                amount_out,
            });
            info!(
                pool = %here,
                sender = %ctx.sender,
                recipient = %to,
                %token_in,
                %amount_in,
                %amount_out,
                "swap executed"
            );
            Ok(result)
        })
    }

    // -- Snapshots ----------------------------------------------------------

    /// Captures the current state and event-log length.
    #[must_use]
    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            state: self.state.clone(),
            events: self.events.len(),
        }
    }

    /// Rolls back to `snapshot`, discarding events recorded after it.
    pub fn restore(&mut self, snapshot: PoolSnapshot) {
        self.state = snapshot.state;
        self.events.truncate(snapshot.events);
    }

    // -- Internals ----------------------------------------------------------

    fn oriented_reserves(&self, config: &PoolConfig, token_in: Token) -> Result<(Amount, Amount)> {
        if token_in == config.token0() {
            Ok((self.state.reserve0, self.state.reserve1))
        } else if token_in == config.token1() {
            Ok((self.state.reserve1, self.state.reserve0))
        } else {
            Err(DexError::InvalidToken(token_in))
        }
    }

    fn transact<T>(
        &mut self,
        op: &'static str,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let snapshot = self.snapshot();
        let result = f(self);
        if let Err(error) = &result {
            self.restore(snapshot);
            warn!(pool = %self.address, op, %error, "pool operation reverted");
        }
        result
    }
}
