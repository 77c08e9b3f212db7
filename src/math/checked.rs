//! Checked arithmetic for the domain wrapper types.
//!
//! [`CheckedArithmetic`] turns the `Option`-returning primitives on
//! [`Amount`] and [`Shares`] into [`Result`]s carrying a specific
//! [`AmmError`], so pool code can chain them with `?`. [`mul_div`] is the
//! floor `a × b / d` used by every proportional formula of a pair; the
//! product is taken in 512 bits so it never overflows.
//!
//! # Examples
//!
//! ```
//! use ezswap_core::domain::Amount;
//! use ezswap_core::math::CheckedArithmetic;
//!
//! let a = Amount::from(100u64);
//! let b = Amount::from(200u64);
//! assert_eq!(a.safe_add(&b), Ok(Amount::from(300u64)));
//! assert!(a.safe_sub(&b).is_err());
//! ```

use alloy_primitives::{U256, U512};

use crate::domain::{Amount, Shares};
use crate::error::AmmError;

/// Fallible arithmetic for domain wrapper types.
///
/// # Contract
///
/// - **No panics**: all error conditions produce `Err`.
/// - **No saturation**: errors propagate instead.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds 256 bits.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Overflow("amount subtraction underflow"))
    }
}

impl CheckedArithmetic for Shares {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("share addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Overflow("share subtraction underflow"))
    }
}

/// Computes `floor(a × b / denominator)`.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
/// - [`AmmError::Overflow`] if the quotient does not fit in 256 bits.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, AmmError> {
    if denominator.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    let quotient = (U512::from(a) * U512::from(b)) / U512::from(denominator);
    narrow(quotient).ok_or(AmmError::Overflow("mul_div result exceeds 256 bits"))
}

/// Narrows a 512-bit value to 256 bits, or `None` if the high half is set.
fn narrow(value: U512) -> Option<U256> {
    let limbs = value.as_limbs();
    if limbs[4..].iter().any(|limb| *limb != 0) {
        return None;
    }
    Some(U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]]))
}
