//! Integer square root.

use alloy_primitives::U256;

/// Floor of the square root of `n`, via Newton's method.
///
/// Starts from `ceil(n / 2)` and iterates `y = (x + n / x) / 2` until the
/// estimate stops decreasing. No intermediate value exceeds `n`, so the
/// loop cannot overflow for any 256-bit input.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use ezswap_core::math::isqrt;
///
/// assert_eq!(isqrt(U256::from(16u64)), U256::from(4u64));
/// assert_eq!(isqrt(U256::from(17u64)), U256::from(4u64));
/// ```
#[must_use]
pub fn isqrt(n: U256) -> U256 {
    if n.is_zero() {
        return U256::ZERO;
    }
    let one = U256::from(1u8);
    let mut x = n;
    let mut y = (n >> 1) + (n & one);
    while y < x {
        x = y;
        y = (x + n / x) >> 1;
    }
    x
}
