//! The pair's liquidity shares as a fungible token.
//!
//! Share transfers and approvals are state-changing calls and take the
//! pair's reentrancy guard like deposits and swaps do. Transfers to the
//! zero address are refused: that account only ever holds the locked
//! minimum liquidity.

use super::Pair;
use crate::domain::{Address, Amount, Shares};
use crate::error::AmmError;
use crate::token::FungibleToken;

impl Pair {
    /// Liquidity-share token name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.config().lp_name()
    }

    /// Liquidity-share token symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        self.config().lp_symbol()
    }

    /// Liquidity-share token decimals.
    #[must_use]
    pub fn decimals(&self) -> u8 {
        self.config().lp_decimals()
    }

    /// Total share supply, including the locked minimum liquidity.
    pub fn total_supply(&self) -> Shares {
        self.state().read().shares.total()
    }

    /// Shares held by `owner`.
    pub fn balance_of(&self, owner: &Address) -> Shares {
        self.state().read().shares.balance_of(owner)
    }

    /// Shares `spender` may move on behalf of `owner`.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Shares {
        self.state().read().shares.allowance(owner, spender)
    }

    /// Moves `shares` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Locked`] on reentry.
    /// - [`AmmError::ZeroAddress`] if either side is the zero address.
    /// - [`AmmError::InsufficientLiquidityBalance`] if `from` holds fewer
    ///   than `shares`.
    pub fn transfer_shares(
        &self,
        from: Address,
        to: Address,
        shares: Shares,
    ) -> Result<(), AmmError> {
        let _entered = self.enter()?;
        if from.is_zero() || to.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        self.state().write().shares.transfer(from, to, shares)?;
        tracing::debug!(pair = %self.address(), %from, %to, %shares, "shares transferred");
        Ok(())
    }

    /// Sets `spender`'s allowance over `owner`'s shares.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Locked`] on reentry.
    /// - [`AmmError::ZeroAddress`] if either side is the zero address.
    pub fn approve_shares(
        &self,
        owner: Address,
        spender: Address,
        shares: Shares,
    ) -> Result<(), AmmError> {
        let _entered = self.enter()?;
        if owner.is_zero() || spender.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        self.state().write().shares.approve(owner, spender, shares);
        Ok(())
    }

    /// Moves `shares` from `owner` to `to` against `spender`'s allowance.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Locked`] on reentry.
    /// - [`AmmError::ZeroAddress`] if `owner` or `to` is the zero address.
    /// - [`AmmError::InsufficientAllowance`] if the allowance is too low.
    /// - [`AmmError::InsufficientLiquidityBalance`] if `owner` holds fewer
    ///   than `shares`.
    pub fn transfer_shares_from(
        &self,
        spender: Address,
        owner: Address,
        to: Address,
        shares: Shares,
    ) -> Result<(), AmmError> {
        let _entered = self.enter()?;
        if owner.is_zero() || to.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        let mut state = self.state().write();
        if state.shares.allowance(&owner, &spender) < shares {
            return Err(AmmError::InsufficientAllowance);
        }
        if state.shares.balance_of(&owner) < shares {
            return Err(AmmError::InsufficientLiquidityBalance);
        }
        state.shares.spend_allowance(owner, spender, shares)?;
        state.shares.transfer(owner, to, shares)?;
        drop(state);
        tracing::debug!(pair = %self.address(), %spender, %owner, %to, %shares, "shares transferred");
        Ok(())
    }
}

impl FungibleToken for Pair {
    fn address(&self) -> Address {
        Pair::address(self)
    }

    fn balance_of(&self, owner: &Address) -> Amount {
        Pair::balance_of(self, owner).as_amount()
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        Pair::allowance(self, owner, spender).as_amount()
    }

    fn transfer(&self, from: Address, to: Address, amount: Amount) -> bool {
        self.transfer_shares(from, to, Shares::from(amount)).is_ok()
    }

    fn approve(&self, owner: Address, spender: Address, amount: Amount) -> bool {
        self.approve_shares(owner, spender, Shares::from(amount)).is_ok()
    }

    fn transfer_from(
        &self,
        spender: Address,
        owner: Address,
        to: Address,
        amount: Amount,
    ) -> bool {
        self.transfer_shares_from(spender, owner, to, Shares::from(amount))
            .is_ok()
    }
}
