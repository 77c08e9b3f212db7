//! Fee-less constant-product pricing helpers.
//!
//! These are the quotes a client computes before calling
//! [`Pair::swap`](crate::pair::Pair::swap): how much comes out for a given
//! input, and how much must go in for a given output. Both floor.

use crate::domain::Amount;
use crate::error::AmmError;
use crate::math::mul_div;

/// Output for an exact input:
/// `amount_in × reserve_out / (reserve_in + amount_in)`.
///
/// # Errors
///
/// - [`AmmError::ZeroAmount`] if `amount_in` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is empty, or
///   the output rounds to zero or would drain `reserve_out`.
/// - [`AmmError::Overflow`] if `reserve_in + amount_in` overflows.
///
/// # Examples
///
/// ```
/// use ezswap_core::domain::Amount;
/// use ezswap_core::math::get_amount_out;
///
/// let out = get_amount_out(
///     Amount::from(10u64),
///     Amount::from(100u64),
///     Amount::from(200u64),
/// );
/// assert_eq!(out, Ok(Amount::from(18u64)));
/// ```
pub fn get_amount_out(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
) -> Result<Amount, AmmError> {
    if amount_in.is_zero() {
        return Err(AmmError::ZeroAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    let denominator = reserve_in
        .checked_add(&amount_in)
        .ok_or(AmmError::Overflow("quote denominator overflow"))?;
    let out = Amount::new(mul_div(
        amount_in.get(),
        reserve_out.get(),
        denominator.get(),
    )?);
    if out.is_zero() || out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity);
    }
    Ok(out)
}

/// Input required for an exact output:
/// `reserve_in × amount_out / (reserve_out − amount_out)`.
///
/// The result floors, so it can fall one unit short of what the pair's
/// product check accepts; callers sending exactly this amount should be
/// ready to add one.
///
/// # Errors
///
/// - [`AmmError::ZeroAmount`] if `amount_out` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is empty or
///   `amount_out >= reserve_out`.
pub fn get_amount_in(
    amount_out: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
) -> Result<Amount, AmmError> {
    if amount_out.is_zero() {
        return Err(AmmError::ZeroAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity);
    }
    let denominator = reserve_out.saturating_sub(&amount_out);
    Ok(Amount::new(mul_div(
        reserve_in.get(),
        amount_out.get(),
        denominator.get(),
    )?))
}
