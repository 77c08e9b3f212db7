//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use ezswap_core::prelude::*;
//! ```

pub use crate::config::{FactoryConfig, PairConfig, MINIMUM_LIQUIDITY};
pub use crate::domain::{
    Address, Amount, FactoryEvent, PairEvent, Reserves, Shares, TokenPair,
};
pub use crate::error::{AmmError, Result};
pub use crate::factory::{pair_address, PairFactory};
pub use crate::math::{get_amount_in, get_amount_out, CheckedArithmetic};
pub use crate::pair::{Pair, PairStatus};
pub use crate::token::{FungibleToken, InMemoryToken, TokenBook, TokenResolver};
