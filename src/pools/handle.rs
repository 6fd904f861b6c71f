//! Shared, non-reentrant access to a pool.

use core::cell::{Ref, RefCell, RefMut};
use core::ops::{Deref, DerefMut};
use std::rc::Rc;

use alloy_primitives::Address;

use super::{Pool, PoolDetails, PoolEvent, PoolSnapshot};
use crate::domain::{Amount, CallContext, Liquidity, ReserveShare, SwapResult, Token};
use crate::error::{DexError, Result};
use crate::traits::TokenLedger;

/// A reference-counted handle to a [`Pool`] shared by the factory registry,
/// the router and direct callers.
///
/// Every mutating method acquires a [`PoolGuard`] for its whole duration.
/// A call that reaches the same pool while the guard is held (for example
/// from a token ledger callback) fails with [`DexError::Reentrancy`] instead
/// of observing half-applied state.  Reads fail the same way while a
/// mutation is in flight.
#[derive(Debug, Clone)]
pub struct PoolHandle {
    address: Address,
    inner: Rc<RefCell<Pool>>,
}

/// Exclusive access to a pool; released when dropped.
#[derive(Debug)]
pub struct PoolGuard<'a>(RefMut<'a, Pool>);

impl Deref for PoolGuard<'_> {
    type Target = Pool;

    fn deref(&self) -> &Pool {
        &self.0
    }
}

impl DerefMut for PoolGuard<'_> {
    fn deref_mut(&mut self) -> &mut Pool {
        &mut self.0
    }
}

impl PoolHandle {
    /// Wraps `pool` in a new shared handle.
    #[must_use]
    pub fn new(pool: Pool) -> Self {
        Self {
            address: pool.address(),
            inner: Rc::new(RefCell::new(pool)),
        }
    }

    /// Returns the pool's address without touching the pool.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns `true` if both handles refer to the same pool.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Acquires exclusive access.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Reentrancy`] if the pool is already in use.
    pub fn enter(&self) -> Result<PoolGuard<'_>> {
        self.inner
            .try_borrow_mut()
            .map(PoolGuard)
            .map_err(|_| DexError::Reentrancy)
    }

    /// Acquires shared read access.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Reentrancy`] while a mutation is in progress.
    pub fn view(&self) -> Result<Ref<'_, Pool>> {
        self.inner.try_borrow().map_err(|_| DexError::Reentrancy)
    }

    // -- Guarded mutations --------------------------------------------------

    /// See [`Pool::add_liquidity`].
    ///
    /// # Errors
    ///
    /// [`DexError::Reentrancy`], or any error of [`Pool::add_liquidity`].
    pub fn add_liquidity<L: TokenLedger>(
        &self,
        ledger: &mut L,
        ctx: CallContext,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<Liquidity> {
        self.enter()?.add_liquidity(ledger, ctx, amount0, amount1)
    }

    /// See [`Pool::remove_liquidity`].
    ///
    /// # Errors
    ///
    /// [`DexError::Reentrancy`], or any error of [`Pool::remove_liquidity`].
    pub fn remove_liquidity<L: TokenLedger>(
        &self,
        ledger: &mut L,
        ctx: CallContext,
        amount: Liquidity,
    ) -> Result<ReserveShare> {
        self.enter()?.remove_liquidity(ledger, ctx, amount)
    }

    /// See [`Pool::swap`].
    ///
    /// # Errors
    ///
    /// [`DexError::Reentrancy`], or any error of [`Pool::swap`].
    pub fn swap<L: TokenLedger>(
        &self,
        ledger: &mut L,
        ctx: CallContext,
        amount_in: Amount,
        token_in: Token,
        to: Address,
    ) -> Result<SwapResult> {
        self.enter()?.swap(ledger, ctx, amount_in, token_in, to)
    }

    // -- Reads --------------------------------------------------------------

    /// See [`Pool::details`].
    ///
    /// # Errors
    ///
    /// [`DexError::Reentrancy`] or [`DexError::NotInitialized`].
    pub fn details(&self) -> Result<PoolDetails> {
        self.view()?.details()
    }

    /// See [`Pool::quote`].
    ///
    /// # Errors
    ///
    /// [`DexError::Reentrancy`], or any error of [`Pool::quote`].
    pub fn quote(&self, amount_in: Amount, token_in: Token) -> Result<SwapResult> {
        self.view()?.quote(amount_in, token_in)
    }

    /// See [`Pool::liquidity_provided`].
    ///
    /// # Errors
    ///
    /// [`DexError::Reentrancy`], or any error of [`Pool::liquidity_provided`].
    pub fn liquidity_provided(&self, provider: Address) -> Result<ReserveShare> {
        self.view()?.liquidity_provided(provider)
    }

    /// Units credited to `provider`.
    ///
    /// # Errors
    ///
    /// [`DexError::Reentrancy`] while a mutation is in progress.
    pub fn liquidity_of(&self, provider: Address) -> Result<Liquidity> {
        Ok(self.view()?.liquidity_of(provider))
    }

    /// Copy of the pool's event log.
    ///
    /// # Errors
    ///
    /// [`DexError::Reentrancy`] while a mutation is in progress.
    pub fn events(&self) -> Result<Vec<PoolEvent>> {
        Ok(self.view()?.events().to_vec())
    }

    /// Captures the pool's state for a later [`restore`](Self::restore).
    ///
    /// # Errors
    ///
    /// [`DexError::Reentrancy`] while a mutation is in progress.
    pub fn snapshot(&self) -> Result<PoolSnapshot> {
        Ok(self.view()?.snapshot())
    }

    /// Rolls the pool back to `snapshot`.
    ///
    /// # Errors
    ///
    /// [`DexError::Reentrancy`] if the pool is in use.
    pub fn restore(&self, snapshot: PoolSnapshot) -> Result<()> {
        self.enter()?.restore(snapshot);
        Ok(())
    }
}
