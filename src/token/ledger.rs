//! Balance and allowance bookkeeping shared by fungible ledgers.
//!
//! Both [`InMemoryToken`](super::InMemoryToken) and a pair's liquidity
//! shares keep the same three tables: total supply, balances per owner,
//! and allowances per `(owner, spender)`. [`Ledger`] owns them and keeps
//! the sum of all balances equal to the total supply.

use std::collections::HashMap;

use alloy_primitives::U256;

use crate::domain::{Address, Amount, Shares};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;

/// A unit a [`Ledger`] can count.
pub trait LedgerUnit: CheckedArithmetic + Copy + Default + Ord {
    /// Allowance value that is never decremented.
    const UNLIMITED: Self;
}

impl LedgerUnit for Amount {
    const UNLIMITED: Self = Amount::MAX;
}

impl LedgerUnit for Shares {
    const UNLIMITED: Self = Shares::new(U256::MAX);
}

/// Total supply, balances, and allowances of one fungible unit.
#[derive(Debug, Clone, Default)]
pub struct Ledger<T> {
    total: T,
    balances: HashMap<Address, T>,
    allowances: HashMap<(Address, Address), T>,
}

impl<T: LedgerUnit> Ledger<T> {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            total: T::default(),
            balances: HashMap::new(),
            allowances: HashMap::new(),
        }
    }

    /// Total supply.
    pub fn total(&self) -> T {
        self.total
    }

    /// Balance of `owner`.
    pub fn balance_of(&self, owner: &Address) -> T {
        self.balances.get(owner).copied().unwrap_or_default()
    }

    /// Allowance of `spender` over `owner`.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> T {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// Iterates over every non-zero balance.
    pub fn balances(&self) -> impl Iterator<Item = (&Address, &T)> {
        self.balances.iter()
    }

    /// Creates `value` units owned by `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the total supply overflows.
    pub fn mint(&mut self, to: Address, value: T) -> Result<(), AmmError> {
        let total = self.total.safe_add(&value)?;
        let balance = self.balance_of(&to).safe_add(&value)?;
        self.total = total;
        self.set_balance(to, balance);
        Ok(())
    }

    /// Destroys `value` units owned by `from`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientLiquidityBalance`] if `from` holds
    /// fewer than `value` units.
    pub fn burn(&mut self, from: Address, value: T) -> Result<(), AmmError> {
        let balance = self.debited(&from, value)?;
        self.total = self.total.safe_sub(&value)?;
        self.set_balance(from, balance);
        Ok(())
    }

    /// Moves `value` units from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientLiquidityBalance`] if `from` holds
    /// fewer than `value` units.
    pub fn transfer(&mut self, from: Address, to: Address, value: T) -> Result<(), AmmError> {
        let from_balance = self.debited(&from, value)?;
        if from == to {
            return Ok(());
        }
        let to_balance = self.balance_of(&to).safe_add(&value)?;
        self.set_balance(from, from_balance);
        self.set_balance(to, to_balance);
        Ok(())
    }

    /// Sets the allowance of `spender` over `owner` to `value`.
    pub fn approve(&mut self, owner: Address, spender: Address, value: T) {
        if value == T::default() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), value);
        }
    }

    /// Consumes `value` of the allowance of `spender` over `owner`.
    /// An [`LedgerUnit::UNLIMITED`] allowance is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientAllowance`] if the allowance is
    /// lower than `value`.
    pub fn spend_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        value: T,
    ) -> Result<(), AmmError> {
        let current = self.allowance(&owner, &spender);
        if current == T::UNLIMITED {
            return Ok(());
        }
        if current < value {
            return Err(AmmError::InsufficientAllowance);
        }
        let remaining = current.safe_sub(&value)?;
        self.approve(owner, spender, remaining);
        Ok(())
    }

    fn debited(&self, owner: &Address, value: T) -> Result<T, AmmError> {
        let balance = self.balance_of(owner);
        if balance < value {
            return Err(AmmError::InsufficientLiquidityBalance);
        }
        balance.safe_sub(&value)
    }

    fn set_balance(&mut self, owner: Address, value: T) {
        if value == T::default() {
            self.balances.remove(&owner);
        } else {
            self.balances.insert(owner, value);
        }
    }
}
