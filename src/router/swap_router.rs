//! Multi-hop quoting and execution over factory pools.

use core::cell::{OnceCell, RefCell};

use alloy_primitives::Address;
use tracing::{debug, info, warn};

use super::{Route, RouterEvent, SwapInstruction};
use crate::access::{EntryLock, Ownership};
use crate::domain::{Amount, CallContext};
use crate::error::{DexError, Result};
use crate::factory::SwapFactory;
use crate::ledger::settle;
use crate::pools::{PoolDetails, PoolHandle, PoolSnapshot};
use crate::traits::{BridgeEndpoint, ChainSelector, InboundMessage, MessageId, TokenLedger};

#[derive(Debug, Clone, Copy)]
struct Binding<'f> {
    factory: &'f SwapFactory,
    bridge: Address,
}

/// Where the input of a routed swap comes from.
#[derive(Debug, Clone, Copy)]
enum Funding {
    /// Pulled from the caller (native input as attached value).
    Caller(CallContext),
    /// Already held by the router, as for bridged instructions.
    Custody,
}

/// Ledger copy plus pool snapshots taken before a routed swap.
struct Checkpoint<L> {
    ledger: L,
    pools: Vec<(PoolHandle, PoolSnapshot)>,
}

impl<L: TokenLedger> Checkpoint<L> {
    fn capture(ledger: &L, pools: &[PoolHandle]) -> Result<Self> {
        let mut saved: Vec<(PoolHandle, PoolSnapshot)> = Vec::with_capacity(pools.len());
        for pool in pools {
            if saved.iter().any(|(seen, _)| seen.ptr_eq(pool)) {
                continue;
            }
            saved.push((pool.clone(), pool.snapshot()?));
        }
        Ok(Self {
            ledger: ledger.clone(),
            pools: saved,
        })
    }

    fn rollback(self, ledger: &mut L) -> Result<()> {
        *ledger = self.ledger;
        for (pool, snapshot) in self.pools {
            pool.restore(snapshot)?;
        }
        Ok(())
    }
}

/// Quotes and executes swaps along a [`Route`] of factory pools.
///
/// The router is created unbound and then [`initialize`](Self::initialize)d
/// once with the factory it resolves pools from and the bridge endpoint
/// allowed to deliver cross-chain instructions.  Every routing operation
/// fails with [`DexError::NotInitialized`] before that.
///
/// The router keeps no balances of its own between calls.  During a
/// routed swap the input and every intermediate output sit in the router's
/// custody (its [`address`](Self::address)); only the last hop pays the
/// recipient.
///
/// # Atomicity
///
/// A routed swap either completes every hop or changes nothing: before the
/// first hop the router records every pool on the route and the ledger, and
/// any failure (including the final slippage check) restores them.
///
/// # Reentrancy
///
/// Executing entry points hold an [`EntryLock`]; a call arriving through a
/// ledger callback fails with [`DexError::Reentrancy`].
///
/// # Example
///
/// ```rust
/// use alloy_primitives::Address;
/// use hydra_swap::domain::{Amount, CallContext, Decimals, FeeTier, Token};
/// use hydra_swap::factory::SwapFactory;
/// use hydra_swap::ledger::InMemoryLedger;
/// use hydra_swap::router::{Route, SwapRouter};
/// use hydra_swap::traits::TokenLedger;
///
/// let (a, b) = (Address::repeat_byte(0x0a), Address::repeat_byte(0x0b));
/// let (lp, trader) = (Address::repeat_byte(0x01), Address::repeat_byte(0x02));
/// let router_at = Address::repeat_byte(0xee);
///
/// let mut ledger = InMemoryLedger::new();
/// for token in [a, b] {
///     ledger.register_token(token, Decimals::MAX).expect("new token");
///     ledger.mint(Token::Contract(token), lp, Amount::new(1_000_000)).expect("mint");
/// }
/// ledger.mint(Token::Contract(a), trader, Amount::new(10_000)).expect("mint");
///
/// let factory = SwapFactory::new(Address::repeat_byte(0xf0), lp);
/// let pool = factory
///     .create_pool(Token::Contract(a), Token::Contract(b), FeeTier::MEDIUM)
///     .expect("new pair");
/// for token in [a, b] {
///     ledger.approve(token, lp, pool.address(), Amount::MAX).expect("approve");
/// }
/// pool.add_liquidity(&mut ledger, CallContext::new(lp), Amount::new(1_000_000), Amount::new(1_000_000))
///     .expect("seed");
///
/// let router = SwapRouter::new(router_at);
/// router.initialize(lp, &factory, Address::repeat_byte(0xb1)).expect("bind");
///
/// let route = Route::direct(Token::Contract(a), Token::Contract(b), FeeTier::MEDIUM).expect("route");
/// let quoted = router.get_amounts_out(Amount::new(10_000), &route).expect("quote");
/// assert_eq!(quoted, vec![Amount::new(10_000), Amount::new(9_871)]);
///
/// ledger.approve(a, trader, router_at, Amount::new(10_000)).expect("approve");
/// let out = router
///     .swap_exact_tokens_for_tokens(
///         &mut ledger,
///         CallContext::new(trader),
///         Amount::new(10_000),
///         Amount::new(9_800),
///         &route,
///         trader,
///     )
///     .expect("swap");
/// assert_eq!(out, quoted[1]);
/// assert_eq!(ledger.balance_of(Token::Contract(b), trader), out);
/// ```
#[derive(Debug)]
pub struct SwapRouter<'f> {
    address: Address,
    binding: OnceCell<Binding<'f>>,
    ownership: OnceCell<Ownership>,
    lock: EntryLock,
    events: RefCell<Vec<RouterEvent>>,
}

impl<'f> SwapRouter<'f> {
    /// Creates an unbound router whose custody account is `address`.
    #[must_use]
    pub const fn new(address: Address) -> Self {
        Self {
            address,
            binding: OnceCell::new(),
            ownership: OnceCell::new(),
            lock: EntryLock::new(),
            events: RefCell::new(Vec::new()),
        }
    }

    /// Router custody account.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Binds the router to `factory` and `bridge`; `caller` becomes the
    /// owner.
    ///
    /// # Errors
    ///
    /// [`DexError::AlreadyInitialized`] on a second call.
    pub fn initialize(&self, caller: Address, factory: &'f SwapFactory, bridge: Address) -> Result<()> {
        if self.binding.get().is_some() {
            warn!(router = %self.address, %caller, "router already initialized");
            return Err(DexError::AlreadyInitialized);
        }
        self.binding
            .set(Binding { factory, bridge })
            .map_err(|_| DexError::AlreadyInitialized)?;
        self.ownership
            .set(Ownership::new(caller))
            .map_err(|_| DexError::AlreadyInitialized)?;
        self.events.borrow_mut().push(RouterEvent::Initialized {
            owner: caller,
            factory: factory.address(),
            bridge,
        });
        info!(router = %self.address, owner = %caller, factory = %factory.address(), %bridge, "router initialized");
        Ok(())
    }

    fn binding(&self) -> Result<Binding<'f>> {
        self.binding.get().copied().ok_or(DexError::NotInitialized)
    }

    fn ownership(&self) -> Result<&Ownership> {
        self.ownership.get().ok_or(DexError::NotInitialized)
    }

    /// Factory the router resolves pools from.
    ///
    /// # Errors
    ///
    /// [`DexError::NotInitialized`] before binding.
    pub fn factory(&self) -> Result<&'f SwapFactory> {
        Ok(self.binding()?.factory)
    }

    /// Address of the bound bridge endpoint.
    ///
    /// # Errors
    ///
    /// [`DexError::NotInitialized`] before binding.
    pub fn bridge(&self) -> Result<Address> {
        Ok(self.binding()?.bridge)
    }

    /// Current owner.
    ///
    /// # Errors
    ///
    /// [`DexError::NotInitialized`] before binding.
    pub fn owner(&self) -> Result<Address> {
        Ok(self.ownership()?.owner())
    }

    /// Hands ownership to `new_owner`.
    ///
    /// # Errors
    ///
    /// - [`DexError::NotInitialized`] before binding.
    /// - [`DexError::NotOwner`] if `caller` is not the owner.
    /// - [`DexError::InvalidRecipient`] if `new_owner` is the zero address.
    pub fn transfer_ownership(&self, caller: Address, new_owner: Address) -> Result<()> {
        self.ownership()?.transfer(caller, new_owner).map(|_| ())
    }

    /// Copy of the router's event log, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<RouterEvent> {
        self.events.borrow().clone()
    }

    /// Amounts along `route` for an input of `amount_in`, computed exactly
    /// as execution would compute them.
    ///
    /// Returns `route.len() + 1` amounts, the first being `amount_in`.
    /// Each hop is priced against reserves already moved by the earlier
    /// hops, so a route that revisits a pool quotes what it executes.
    ///
    /// # Errors
    ///
    /// - [`DexError::NotInitialized`] before binding.
    /// - [`DexError::InvalidReserves`] if a hop's pool does not exist or has
    ///   an empty reserve.
    /// - [`DexError::ZeroAmount`] if the input or an intermediate amount is
    ///   zero.
    pub fn get_amounts_out(&self, amount_in: Amount, route: &Route) -> Result<Vec<Amount>> {
        let factory = self.binding()?.factory;
        let mut amounts = Vec::with_capacity(route.len() + 1);
        amounts.push(amount_in);
        let mut amount = amount_in;
        let mut touched: Vec<(PoolHandle, PoolDetails)> = Vec::with_capacity(route.len());
        for hop in route.hops() {
            let pool = factory
                .get_pool(hop.token_in, hop.token_out, hop.fee)
                .ok_or(DexError::InvalidReserves)?;
            let index = match touched.iter().position(|(seen, _)| seen.ptr_eq(&pool)) {
                Some(index) => index,
                None => {
                    let details = pool.details()?;
                    touched.push((pool, details));
                    touched.len() - 1
                }
            };
            amount = touched[index].1.simulate_swap(amount, hop.token_in)?.amount_out();
            amounts.push(amount);
        }
        debug!(
            input = %route.input(),
            output = %route.output(),
            hops = route.len(),
            %amount_in,
            amount_out = %amount,
            "route quoted"
        );
        Ok(amounts)
    }

    /// Sells exactly `amount_in` of the route's input and delivers at least
    /// `amount_out_min` of its output to `to`.
    ///
    /// The input is pulled from `ctx.sender`, who must have approved the
    /// router; a native input is paid as attached value equal to
    /// `amount_in`.  Each hop feeds its realized output into the next.
    ///
    /// # Errors
    ///
    /// - [`DexError::Reentrancy`] when re-entered.
    /// - [`DexError::NotInitialized`] before binding.
    /// - [`DexError::ZeroAmount`] if `amount_in` is zero.
    /// - [`DexError::InvalidRecipient`] if `to` is the zero address.
    /// - [`DexError::NativeAmountMismatch`] if the attached value differs
    ///   from the native input (or is non-zero for a contract input).
    /// - [`DexError::InvalidReserves`] if a hop's pool is missing or empty.
    /// - [`DexError::InsufficientOutputAmount`] if the output is below
    ///   `amount_out_min`.
    /// - [`DexError::Token`] for ledger failures.
    pub fn swap_exact_tokens_for_tokens<L: TokenLedger>(
        &self,
        ledger: &mut L,
        ctx: CallContext,
        amount_in: Amount,
        amount_out_min: Amount,
        route: &Route,
        to: Address,
    ) -> Result<Amount> {
        let _guard = self.lock.enter()?;
        let result = self
            .binding()
            .and_then(|binding| {
                self.execute(ledger, binding.factory, Funding::Caller(ctx), amount_in, amount_out_min, route, to)
            });

        match result {
            Ok(amount_out) => {
                self.events.borrow_mut().push(RouterEvent::Swapped {
                    sender: ctx.sender,
                    to,
                    token_in: route.input(),
                    token_out: route.output(),
                    amount_in,
                    amount_out,
                });
                info!(
                    router = %self.address,
                    sender = %ctx.sender,
                    %to,
                    token_in = %route.input(),
                    token_out = %route.output(),
                    hops = route.len(),
                    %amount_in,
                    %amount_out,
                    "routed swap"
                );
                Ok(amount_out)
            }
            Err(error) => {
                warn!(router = %self.address, sender = %ctx.sender, %error, "routed swap reverted");
                Err(error)
            }
        }
    }

    /// Serializes `instruction` and hands it to `bridge` for `receiver` on
    /// `destination`.
    ///
    /// Only the shape of the instruction is checked here; pools and
    /// balances are checked by the receiving router.
    ///
    /// # Errors
    ///
    /// - [`DexError::Reentrancy`] when re-entered.
    /// - [`DexError::NotInitialized`] before binding.
    /// - [`DexError::Unauthorized`] if `bridge` is not the bound endpoint.
    /// - [`DexError::InvalidPath`], [`DexError::ZeroAmount`] or
    ///   [`DexError::InvalidRecipient`] for a malformed instruction.
    /// - [`DexError::Bridge`] if the endpoint rejects the message.
    pub fn cross_chain_swap<B: BridgeEndpoint>(
        &self,
        bridge: &mut B,
        caller: Address,
        destination: ChainSelector,
        receiver: Address,
        instruction: &SwapInstruction,
    ) -> Result<MessageId> {
        let _guard = self.lock.enter()?;
        let result = self.send_instruction(bridge, destination, receiver, instruction);
        match result {
            Ok(id) => {
                self.events.borrow_mut().push(RouterEvent::MessageSent {
                    id,
                    destination,
                    receiver,
                    sender: caller,
                });
                info!(router = %self.address, %caller, %destination, %receiver, %id, "swap instruction sent");
                Ok(id)
            }
            Err(error) => {
                warn!(router = %self.address, %caller, %destination, %error, "swap instruction not sent");
                Err(error)
            }
        }
    }

    fn send_instruction<B: BridgeEndpoint>(
        &self,
        bridge: &mut B,
        destination: ChainSelector,
        receiver: Address,
        instruction: &SwapInstruction,
    ) -> Result<MessageId> {
        let binding = self.binding()?;
        if bridge.address() != binding.bridge {
            return Err(DexError::Unauthorized(bridge.address()));
        }
        instruction.route()?;
        if instruction.amount_in.is_zero() {
            return Err(DexError::ZeroAmount("amountIn"));
        }
        if instruction.to == Address::ZERO || receiver == Address::ZERO {
            return Err(DexError::InvalidRecipient);
        }
        let payload = instruction.encode()?;
        Ok(bridge.send(destination, receiver, payload)?)
    }

    /// Executes a bridged [`SwapInstruction`] from router custody.
    ///
    /// Only the bound bridge endpoint may deliver messages.  The input must
    /// already be held by the router; nothing is pulled from anyone.
    ///
    /// # Errors
    ///
    /// - [`DexError::Reentrancy`] when re-entered.
    /// - [`DexError::NotInitialized`] before binding.
    /// - [`DexError::Unauthorized`] if `caller` is not the bridge.
    /// - [`DexError::InvalidMessage`] if the payload does not decode.
    /// - Any error of a routed swap, with nothing changed.
    pub fn ccip_receive<L: TokenLedger>(
        &self,
        ledger: &mut L,
        caller: Address,
        message: &InboundMessage,
    ) -> Result<Amount> {
        let _guard = self.lock.enter()?;
        let result = self.receive_instruction(ledger, caller, message);
        match result {
            Ok((to, amount_out)) => {
                self.events.borrow_mut().push(RouterEvent::MessageReceived {
                    id: message.id,
                    source: message.source,
                    sender: message.sender,
                    to,
                    amount_out,
                });
                info!(
                    router = %self.address,
                    id = %message.id,
                    source = %message.source,
                    %to,
                    %amount_out,
                    "bridged swap executed"
                );
                Ok(amount_out)
            }
            Err(error) => {
                warn!(router = %self.address, id = %message.id, %caller, %error, "bridged swap rejected");
                Err(error)
            }
        }
    }

    fn receive_instruction<L: TokenLedger>(
        &self,
        ledger: &mut L,
        caller: Address,
        message: &InboundMessage,
    ) -> Result<(Address, Amount)> {
        let binding = self.binding()?;
        if caller != binding.bridge {
            return Err(DexError::Unauthorized(caller));
        }
        let instruction = SwapInstruction::decode(&message.payload)?;
        let route = instruction.route()?;
        let amount_out = self.execute(
            ledger,
            binding.factory,
            Funding::Custody,
            instruction.amount_in,
            instruction.amount_out_min,
            &route,
            instruction.to,
        )?;
        Ok((instruction.to, amount_out))
    }

    #[allow(clippy::too_many_arguments)]
    fn execute<L: TokenLedger>(
        &self,
        ledger: &mut L,
        factory: &SwapFactory,
        funding: Funding,
        amount_in: Amount,
        amount_out_min: Amount,
        route: &Route,
        to: Address,
    ) -> Result<Amount> {
        if amount_in.is_zero() {
            return Err(DexError::ZeroAmount("amountIn"));
        }
        if to == Address::ZERO {
            return Err(DexError::InvalidRecipient);
        }
        if let Funding::Caller(ctx) = funding {
            settle::expect_value(route.input().is_native().then_some(amount_in), ctx.value)?;
        }
        let pools = route
            .hops()
            .map(|hop| {
                factory
                    .get_pool(hop.token_in, hop.token_out, hop.fee)
                    .ok_or(DexError::InvalidReserves)
            })
            .collect::<Result<Vec<_>>>()?;

        let checkpoint = Checkpoint::capture(ledger, &pools)?;
        let outcome = self
            .run_hops(ledger, funding, amount_in, route, &pools, to)
            .and_then(|amount_out| {
                if amount_out < amount_out_min {
                    return Err(DexError::InsufficientOutputAmount {
                        amount_out,
                        amount_out_min,
                    });
                }
                Ok(amount_out)
            });
        if outcome.is_err() {
            checkpoint.rollback(ledger)?;
        }
        outcome
    }

    fn run_hops<L: TokenLedger>(
        &self,
        ledger: &mut L,
        funding: Funding,
        amount_in: Amount,
        route: &Route,
        pools: &[PoolHandle],
        to: Address,
    ) -> Result<Amount> {
        let here = self.address;
        if let Funding::Caller(ctx) = funding {
            settle::pull(ledger, route.input(), ctx.sender, here, amount_in)?;
        }

        let last = pools.len() - 1;
        let mut amount = amount_in;
        for (index, (hop, pool)) in route.hops().zip(pools).enumerate() {
            let recipient = if index == last { to } else { here };
            settle::approve(ledger, hop.token_in, here, pool.address(), amount)?;
            let value = if hop.token_in.is_native() {
                amount
            } else {
                Amount::ZERO
            };
            let result = pool.swap(
                ledger,
                CallContext::new(here).with_value(value),
                amount,
                hop.token_in,
                recipient,
            )?;
            debug!(
                hop = index,
                pool = %pool.address(),
                token_in = %hop.token_in,
                token_out = %hop.token_out,
                amount_in = %amount,
                amount_out = %result.amount_out(),
                "hop executed"
            );
            amount = result.amount_out();
        }
        Ok(amount)
    }
}
