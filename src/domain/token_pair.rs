//! Unordered pair of distinct token identities.

use alloy_primitives::{keccak256, Address, B256};
use serde::{Deserialize, Serialize};

use crate::error::AmmError;

/// A pair of distinct, non-zero token addresses, canonically sorted.
///
/// The canonical ordering guarantees that `token0() < token1()` byte-wise,
/// so `(A, B)` and `(B, A)` build the same value. This makes `TokenPair`
/// the order-independent key of the factory index.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use ezswap_core::domain::TokenPair;
///
/// let a = Address::repeat_byte(1);
/// let b = Address::repeat_byte(2);
///
/// // Order is enforced automatically:
/// let pair = TokenPair::new(b, a).expect("distinct non-zero tokens");
/// assert_eq!(pair.token0(), a);
/// assert_eq!(pair.token1(), b);
/// assert_eq!(pair, TokenPair::new(a, b).expect("distinct non-zero tokens"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenPair {
    token0: Address,
    token1: Address,
}

impl TokenPair {
    /// Creates a new canonically-ordered `TokenPair`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAddress`] if either token is the zero address
    ///   (checked first, so `(0, 0)` reports the zero address).
    /// - [`AmmError::IdenticalAddresses`] if both tokens are equal.
    pub fn new(token_a: Address, token_b: Address) -> Result<Self, AmmError> {
        if token_a.is_zero() || token_b.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        if token_a == token_b {
            return Err(AmmError::IdenticalAddresses);
        }

        let (token0, token1) = if token_a < token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };

        Ok(Self { token0, token1 })
    }

    /// Returns the smaller token address.
    #[must_use]
    pub const fn token0(&self) -> Address {
        self.token0
    }

    /// Returns the larger token address.
    #[must_use]
    pub const fn token1(&self) -> Address {
        self.token1
    }

    /// Returns `true` if `token` is part of this pair.
    #[must_use]
    pub fn contains(&self, token: &Address) -> bool {
        self.token0 == *token || self.token1 == *token
    }

    /// Returns the counterpart of `token` in this pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if `token` is not in the pair.
    pub fn other(&self, token: &Address) -> Result<Address, AmmError> {
        if *token == self.token0 {
            Ok(self.token1)
        } else if *token == self.token1 {
            Ok(self.token0)
        } else {
            Err(AmmError::InvalidToken("token is not part of this pair"))
        }
    }

    /// Deterministic salt for deriving the pair's address:
    /// `keccak256(token0 ‖ token1)`.
    #[must_use]
    pub fn salt(&self) -> B256 {
        let mut packed = [0u8; 40];
        packed[..20].copy_from_slice(self.token0.as_slice());
        packed[20..].copy_from_slice(self.token1.as_slice());
        keccak256(packed)
    }
}
