//! Ownership records and non-reentrant entry locks.

use core::cell::Cell;

use alloy_primitives::Address;
use tracing::info;

use crate::error::{DexError, Result};

/// Single-owner access control.
///
/// Uses interior mutability so components that are shared by reference
/// (the factory, the router) can hand over ownership through `&self`.
#[derive(Debug, Clone)]
pub struct Ownership {
    owner: Cell<Address>,
}

impl Ownership {
    /// Records `owner` as the initial owner.
    #[must_use]
    pub const fn new(owner: Address) -> Self {
        Self {
            owner: Cell::new(owner),
        }
    }

    /// Returns the current owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner.get()
    }

    /// Fails unless `caller` is the owner.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::NotOwner`] carrying the rejected caller.
    pub fn ensure_owner(&self, caller: Address) -> Result<()> {
        if caller != self.owner.get() {
            return Err(DexError::NotOwner(caller));
        }
        Ok(())
    }

    /// Hands ownership to `new_owner` and returns the previous owner.
    ///
    /// # Errors
    ///
    /// - [`DexError::NotOwner`] if `caller` is not the owner.
    /// - [`DexError::InvalidRecipient`] if `new_owner` is the zero address.
    pub fn transfer(&self, caller: Address, new_owner: Address) -> Result<Address> {
        self.ensure_owner(caller)?;
        if new_owner == Address::ZERO {
            return Err(DexError::InvalidRecipient);
        }
        let previous = self.owner.replace(new_owner);
        info!(%previous, %new_owner, "ownership transferred");
        Ok(previous)
    }
}

/// A flag that rejects nested entry into the component that owns it.
#[derive(Debug, Default)]
pub struct EntryLock {
    entered: Cell<bool>,
}

impl EntryLock {
    /// Creates an unlocked lock.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entered: Cell::new(false),
        }
    }

    /// Acquires the lock for the lifetime of the returned guard.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Reentrancy`] if the lock is already held.
    pub fn enter(&self) -> Result<EntryGuard<'_>> {
        if self.entered.replace(true) {
            return Err(DexError::Reentrancy);
        }
        Ok(EntryGuard { lock: self })
    }

    /// Returns `true` while a guard is alive.
    #[must_use]
    pub fn is_entered(&self) -> bool {
        self.entered.get()
    }
}

/// Releases its [`EntryLock`] when dropped, on every exit path.
#[derive(Debug)]
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct EntryGuard<'a> {
    lock: &'a EntryLock,
}

impl Drop for EntryGuard<'_> {
    fn drop(&mut self) {
        self.lock.entered.set(false);
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const OWNER: Address = Address::repeat_byte(0x0a);
    const OTHER: Address = Address::repeat_byte(0x0b);

    #[test]
    fn only_owner_passes() {
        let ownership = Ownership::new(OWNER);
        assert_eq!(ownership.ensure_owner(OWNER), Ok(()));
        assert_eq!(ownership.ensure_owner(OTHER), Err(DexError::NotOwner(OTHER)));
    }

    #[test]
    fn transfer_hands_over() {
        let ownership = Ownership::new(OWNER);
        assert_eq!(ownership.transfer(OWNER, OTHER), Ok(OWNER));
        assert_eq!(ownership.owner(), OTHER);
        assert_eq!(ownership.transfer(OWNER, OWNER), Err(DexError::NotOwner(OWNER)));
    }

    #[test]
    fn transfer_to_zero_rejected() {
        let ownership = Ownership::new(OWNER);
        assert_eq!(
            ownership.transfer(OWNER, Address::ZERO),
            Err(DexError::InvalidRecipient)
        );
        assert_eq!(ownership.owner(), OWNER);
    }

    #[test]
    fn lock_rejects_nested_entry() {
        let lock = EntryLock::new();
        let Ok(guard) = lock.enter() else {
            panic!("first entry");
        };
        assert!(lock.is_entered());
        assert!(matches!(lock.enter(), Err(DexError::Reentrancy)));
        drop(guard);
        assert!(!lock.is_entered());
        assert!(lock.enter().is_ok());
    }

    #[test]
    fn lock_released_on_error_path() {
        fn failing(lock: &EntryLock) -> Result<()> {
            let _guard = lock.enter()?;
            Err(DexError::ZeroAmount("amount"))
        }
        let lock = EntryLock::new();
        assert!(failing(&lock).is_err());
        assert!(!lock.is_entered());
    }
}
