//! Per-pair reentrancy guard.

use std::cell::Cell;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

use crate::error::AmmError;

/// Serializes state-changing calls on one pair and rejects reentry.
///
/// A call from another thread waits for the in-flight call to finish. A
/// call from the same thread (a token callback reaching back into the
/// pair) finds the flag set and fails with [`AmmError::Locked`].
#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    entered: ReentrantMutex<Cell<bool>>,
}

/// Proof that the guard is held; releases it on drop.
#[derive(Debug)]
#[must_use = "the guard is released as soon as this is dropped"]
pub struct Entered<'a> {
    slot: ReentrantMutexGuard<'a, Cell<bool>>,
}

impl ReentrancyGuard {
    /// Creates an unlocked guard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters the guarded section.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Locked`] if the current thread is already inside.
    pub fn enter(&self) -> Result<Entered<'_>, AmmError> {
        let slot = self.entered.lock();
        if slot.get() {
            return Err(AmmError::Locked);
        }
        slot.set(true);
        Ok(Entered { slot })
    }

    /// Returns `true` while a guarded call is in flight on any thread.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        match self.entered.try_lock() {
            Some(slot) => slot.get(),
            None => true,
        }
    }
}

impl Drop for Entered<'_> {
    fn drop(&mut self) {
        self.slot.set(false);
    }
}
