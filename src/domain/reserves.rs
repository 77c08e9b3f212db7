//! Pooled reserves of a pair.

use alloy_primitives::U512;
use serde::{Deserialize, Serialize};

use super::Amount;
use crate::error::AmmError;

/// The recorded balances of `token0` and `token1` held by a pair.
///
/// Reserves only move on state-changing pair calls; they may lag behind
/// the pair's live token balances (a direct transfer into the pair is not
/// a reserve until a swap detects it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Reserves {
    /// Recorded balance of `token0`.
    pub reserve0: Amount,
    /// Recorded balance of `token1`.
    pub reserve1: Amount,
}

impl Reserves {
    /// Creates reserves from two amounts.
    pub const fn new(reserve0: Amount, reserve1: Amount) -> Self {
        Self { reserve0, reserve1 }
    }

    /// Returns `true` if either side is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reserve0.is_zero() || self.reserve1.is_zero()
    }

    /// The constant product `reserve0 × reserve1`, widened to 512 bits so
    /// it can never overflow.
    #[must_use]
    pub fn product(&self) -> U512 {
        U512::from(self.reserve0.get()) * U512::from(self.reserve1.get())
    }

    /// Reserves after adding `amount0` / `amount1`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if either side overflows.
    pub fn credit(&self, amount0: Amount, amount1: Amount) -> Result<Self, AmmError> {
        Ok(Self {
            reserve0: self
                .reserve0
                .checked_add(&amount0)
                .ok_or(AmmError::Overflow("reserve0 overflow on credit"))?,
            reserve1: self
                .reserve1
                .checked_add(&amount1)
                .ok_or(AmmError::Overflow("reserve1 overflow on credit"))?,
        })
    }

    /// Reserves after removing `amount0` / `amount1`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientLiquidity`] if either side would
    /// go negative.
    pub fn debit(&self, amount0: Amount, amount1: Amount) -> Result<Self, AmmError> {
        Ok(Self {
            reserve0: self
                .reserve0
                .checked_sub(&amount0)
                .ok_or(AmmError::InsufficientLiquidity)?,
            reserve1: self
                .reserve1
                .checked_sub(&amount1)
                .ok_or(AmmError::InsufficientLiquidity)?,
        })
    }
}
