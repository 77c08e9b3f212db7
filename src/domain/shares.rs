//! Liquidity-share units.

use core::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::Amount;

/// Units of the liquidity-share token issued by a pair.
///
/// This is distinct from [`Amount`] because it measures proportional
/// ownership of a pool, not a quantity of either pooled token.
///
/// # Examples
///
/// ```
/// use ezswap_core::domain::Shares;
///
/// let a = Shares::from(1_000u64);
/// let b = Shares::from(2_000u64);
/// assert_eq!(a.checked_add(&b), Some(Shares::from(3_000u64)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
#[must_use]
pub struct Shares(U256);

impl Shares {
    /// No shares.
    pub const ZERO: Self = Self(U256::ZERO);

    /// Creates `Shares` from a raw 256-bit value.
    pub const fn new(value: U256) -> Self {
        Self(value)
    }

    /// Returns the underlying 256-bit value.
    #[must_use]
    pub const fn get(&self) -> U256 {
        self.0
    }

    /// Returns `true` if there are no shares.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Reinterprets the share count as a raw token amount, for the
    /// pair's fungible-token surface.
    pub const fn as_amount(&self) -> Amount {
        Amount::new(self.0)
    }
}

impl From<Amount> for Shares {
    fn from(amount: Amount) -> Self {
        Self(amount.get())
    }
}

impl From<U256> for Shares {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<u64> for Shares {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<u128> for Shares {
    fn from(value: u128) -> Self {
        Self(U256::from(value))
    }
}

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
