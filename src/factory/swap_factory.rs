//! Pool registry with deterministic pool addresses.

use core::cell::RefCell;
use std::collections::BTreeMap;

use alloy_primitives::{Address, keccak256};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::access::Ownership;
use crate::config::PoolConfig;
use crate::domain::{FeeTier, PoolKey, Token};
use crate::error::{DexError, Result};
use crate::pools::{Pool, PoolHandle};

/// A committed change to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FactoryEvent {
    /// A pool was created and registered.
    PoolCreated {
        /// First token as passed to `create_pool`.
        token_a: Token,
        /// Second token as passed to `create_pool`.
        token_b: Token,
        /// Fee tier of the pool.
        fee: FeeTier,
        /// Address of the new pool.
        pool: Address,
    },
}

/// Registry that creates at most one pool per `(pair, fee)` and resolves
/// pools in either token order.
///
/// There is one factory per deployment, constructed explicitly and passed
/// by reference to the [`SwapRouter`](crate::router::SwapRouter).  Pools
/// are never removed.  Creation is permissionless; the owner can only hand
/// ownership over.
///
/// # Pool addresses
///
/// A pool lives at the last 20 bytes of
/// `keccak256(factory ‖ first ‖ second ‖ fee)` where `first`/`second` is
/// the canonical token order (see [`PoolKey::to_bytes`]).  The address is
/// therefore known before the pool exists and is the same for both
/// argument orders.
///
/// # Example
///
/// ```rust
/// use alloy_primitives::Address;
/// use hydra_swap::domain::{FeeTier, Token};
/// use hydra_swap::factory::SwapFactory;
///
/// let factory = SwapFactory::new(Address::repeat_byte(0xf0), Address::repeat_byte(0x01));
/// let usdc = Token::Contract(Address::repeat_byte(0x11));
///
/// let pool = factory.create_pool(Token::Native, usdc, FeeTier::LOW).expect("new pair");
/// let found = factory.get_pool(usdc, Token::Native, FeeTier::LOW).expect("registered");
/// assert_eq!(found.address(), pool.address());
/// assert!(factory.get_pool(usdc, Token::Native, FeeTier::HIGH).is_none());
/// ```
#[derive(Debug)]
pub struct SwapFactory {
    address: Address,
    ownership: Ownership,
    pools: RefCell<BTreeMap<PoolKey, PoolHandle>>,
    all_pools: RefCell<Vec<PoolHandle>>,
    events: RefCell<Vec<FactoryEvent>>,
}

impl SwapFactory {
    /// Creates an empty registry at `address`, owned by `owner`.
    #[must_use]
    pub fn new(address: Address, owner: Address) -> Self {
        Self {
            address,
            ownership: Ownership::new(owner),
            pools: RefCell::new(BTreeMap::new()),
            all_pools: RefCell::new(Vec::new()),
            events: RefCell::new(Vec::new()),
        }
    }

    /// Returns the factory's own address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the current owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.ownership.owner()
    }

    /// Hands ownership to `new_owner`.
    ///
    /// # Errors
    ///
    /// - [`DexError::NotOwner`] if `caller` is not the owner.
    /// - [`DexError::InvalidRecipient`] if `new_owner` is the zero address.
    pub fn transfer_ownership(&self, caller: Address, new_owner: Address) -> Result<()> {
        self.ownership.transfer(caller, new_owner).map(|_| ())
    }

    /// Deterministic address of the pool for `key`, whether or not it has
    /// been created yet.
    #[must_use]
    pub fn pool_address(&self, key: &PoolKey) -> Address {
        let mut preimage = Vec::with_capacity(20 + 46);
        preimage.extend_from_slice(self.address.as_slice());
        preimage.extend_from_slice(&key.to_bytes());
        Address::from_word(keccak256(&preimage))
    }

    /// Creates, initializes and registers a pool for `(token_a, token_b, fee)`.
    ///
    /// The pool's `token0`/`token1` follow the argument order; the registry
    /// entry is keyed canonically.
    ///
    /// # Errors
    ///
    /// - [`DexError::PairIdentical`] if `token_a == token_b`.
    /// - [`DexError::InvalidToken`] if either side is a contract at the zero
    ///   address.
    /// - [`DexError::PoolAlreadyExists`] if the pair and fee are registered.
    /// - [`DexError::Reentrancy`] if called while the registry is borrowed.
    pub fn create_pool(&self, token_a: Token, token_b: Token, fee: FeeTier) -> Result<PoolHandle> {
        let result = self.try_create_pool(token_a, token_b, fee);
        if let Err(error) = &result {
            warn!(%token_a, %token_b, fee = fee.ppm(), %error, "pool creation rejected");
        }
        result
    }

    fn try_create_pool(&self, token_a: Token, token_b: Token, fee: FeeTier) -> Result<PoolHandle> {
        let config = PoolConfig::new(token_a, token_b, fee)?;
        let key = config.key()?;

        let mut pools = self
            .pools
            .try_borrow_mut()
            .map_err(|_| DexError::Reentrancy)?;
        if pools.contains_key(&key) {
            return Err(DexError::PoolAlreadyExists);
        }

        let address = self.pool_address(&key);
        let mut pool = Pool::new(address);
        pool.initialize(config)?;
        let handle = PoolHandle::new(pool);

        pools.insert(key, handle.clone());
        self.all_pools
            .try_borrow_mut()
            .map_err(|_| DexError::Reentrancy)?
            .push(handle.clone());
        self.events
            .try_borrow_mut()
            .map_err(|_| DexError::Reentrancy)?
            .push(FactoryEvent::PoolCreated {
                token_a,
                token_b,
                fee,
                pool: address,
            });

        info!(
            pool = %address,
            %token_a,
            %token_b,
            fee = fee.ppm(),
            "pool created"
        );
        Ok(handle)
    }

    /// Looks up the pool for `(token_a, token_b, fee)` in either order.
    ///
    /// Never creates a pool.  Returns `None` for an unknown or identical
    /// pair.
    #[must_use]
    pub fn get_pool(&self, token_a: Token, token_b: Token, fee: FeeTier) -> Option<PoolHandle> {
        let key = PoolKey::new(token_a, token_b, fee).ok()?;
        self.pools.try_borrow().ok()?.get(&key).cloned()
    }

    /// All pools in creation order.
    #[must_use]
    pub fn all_pools(&self) -> Vec<PoolHandle> {
        self.all_pools
            .try_borrow()
            .map(|pools| pools.clone())
            .unwrap_or_default()
    }

    /// Number of pools created so far.
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.all_pools.try_borrow().map(|p| p.len()).unwrap_or(0)
    }

    /// Copy of the registry's event log, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<FactoryEvent> {
        self.events
            .try_borrow()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const FACTORY: Address = Address::repeat_byte(0xf0);
    const OWNER: Address = Address::repeat_byte(0x01);

    fn contract(byte: u8) -> Token {
        Token::Contract(Address::repeat_byte(byte))
    }

    fn factory() -> SwapFactory {
        SwapFactory::new(FACTORY, OWNER)
    }

    #[test]
    fn create_registers_under_both_orders() {
        let f = factory();
        let Ok(pool) = f.create_pool(contract(2), contract(1), FeeTier::MEDIUM) else {
            panic!("create");
        };
        let (Some(ab), Some(ba)) = (
            f.get_pool(contract(1), contract(2), FeeTier::MEDIUM),
            f.get_pool(contract(2), contract(1), FeeTier::MEDIUM),
        ) else {
            panic!("registered");
        };
        assert!(ab.ptr_eq(&pool));
        assert!(ba.ptr_eq(&pool));
        assert_eq!(f.pool_count(), 1);
    }

    #[test]
    fn pool_keeps_call_order() {
        let f = factory();
        let Ok(pool) = f.create_pool(contract(9), contract(1), FeeTier::LOW) else {
            panic!("create");
        };
        let Ok(details) = pool.details() else {
            panic!("initialized");
        };
        assert_eq!(details.token0, contract(9));
        assert_eq!(details.token1, contract(1));
        assert_eq!(details.fee, FeeTier::LOW);
    }

    #[test]
    fn duplicate_rejected_in_either_order() {
        let f = factory();
        let Ok(_) = f.create_pool(contract(1), contract(2), FeeTier::MEDIUM) else {
            panic!("create");
        };
        assert!(matches!(
            f.create_pool(contract(1), contract(2), FeeTier::MEDIUM),
            Err(DexError::PoolAlreadyExists)
        ));
        assert!(matches!(
            f.create_pool(contract(2), contract(1), FeeTier::MEDIUM),
            Err(DexError::PoolAlreadyExists)
        ));
        // a different fee is a different pool
        assert!(f.create_pool(contract(2), contract(1), FeeTier::HIGH).is_ok());
        assert_eq!(f.pool_count(), 2);
    }

    #[test]
    fn identical_pair_rejected() {
        let f = factory();
        assert!(matches!(
            f.create_pool(contract(1), contract(1), FeeTier::LOW),
            Err(DexError::PairIdentical)
        ));
        assert!(matches!(
            f.create_pool(Token::Native, Token::Native, FeeTier::LOW),
            Err(DexError::PairIdentical)
        ));
        assert!(f.get_pool(contract(1), contract(1), FeeTier::LOW).is_none());
        assert_eq!(f.pool_count(), 0);
        assert!(f.events().is_empty());
    }

    #[test]
    fn zero_address_contract_rejected() {
        let f = factory();
        let zero = Token::Contract(Address::ZERO);
        assert!(matches!(
            f.create_pool(Token::Native, zero, FeeTier::MEDIUM),
            Err(DexError::InvalidToken(token)) if token == zero
        ));
        assert!(matches!(
            f.create_pool(zero, contract(1), FeeTier::MEDIUM),
            Err(DexError::InvalidToken(_))
        ));
        assert!(f.get_pool(Token::Native, zero, FeeTier::MEDIUM).is_none());
        assert_eq!(f.pool_count(), 0);
        assert!(f.events().is_empty());
    }

    #[test]
    fn lookup_never_creates() {
        let f = factory();
        assert!(f.get_pool(contract(1), contract(2), FeeTier::LOW).is_none());
        assert_eq!(f.pool_count(), 0);
    }

    #[test]
    fn addresses_are_deterministic() {
        let f = factory();
        let Ok(key) = PoolKey::new(contract(1), contract(2), FeeTier::MEDIUM) else {
            panic!("key");
        };
        let predicted = f.pool_address(&key);
        let Ok(pool) = f.create_pool(contract(2), contract(1), FeeTier::MEDIUM) else {
            panic!("create");
        };
        assert_eq!(pool.address(), predicted);

        // another factory deploys the same pair elsewhere
        let other = SwapFactory::new(Address::repeat_byte(0xf1), OWNER);
        assert_ne!(other.pool_address(&key), predicted);

        let Ok(low) = PoolKey::new(contract(1), contract(2), FeeTier::LOW) else {
            panic!("key");
        };
        assert_ne!(f.pool_address(&low), predicted);
    }

    #[test]
    fn pool_created_event() {
        let f = factory();
        let Ok(pool) = f.create_pool(contract(5), Token::Native, FeeTier::HIGH) else {
            panic!("create");
        };
        assert_eq!(
            f.events(),
            vec![FactoryEvent::PoolCreated {
                token_a: contract(5),
                token_b: Token::Native,
                fee: FeeTier::HIGH,
                pool: pool.address(),
            }]
        );
    }

    #[test]
    fn all_pools_in_creation_order() {
        let f = factory();
        let mut created = Vec::new();
        for byte in 2..5 {
            let Ok(pool) = f.create_pool(contract(1), contract(byte), FeeTier::MEDIUM) else {
                panic!("create");
            };
            created.push(pool.address());
        }
        let listed: Vec<Address> = f.all_pools().iter().map(PoolHandle::address).collect();
        assert_eq!(listed, created);
    }

    #[test]
    fn ownership_transfer() {
        let f = factory();
        let stranger = Address::repeat_byte(0x02);
        assert_eq!(
            f.transfer_ownership(stranger, stranger),
            Err(DexError::NotOwner(stranger))
        );
        assert_eq!(f.transfer_ownership(OWNER, stranger), Ok(()));
        assert_eq!(f.owner(), stranger);
    }
}
