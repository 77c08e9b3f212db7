//! Trading pairs: pooled reserves, liquidity shares, and swaps.
//!
//! A [`Pair`] starts uninitialized, is bound to two tokens exactly once,
//! and from then on accepts deposits, withdrawals, and constant-product
//! swaps. Its liquidity shares are themselves a fungible token (see the
//! share-transfer methods and the [`FungibleToken`](crate::token::FungibleToken)
//! impl).
//!
//! | Type | Role |
//! |------|------|
//! | [`Pair`] | Reserves, share ledger, swap settlement |
//! | [`PairStatus`] | `Uninitialized → Initialized` lifecycle |
//! | [`ReentrancyGuard`] | Rejects reentrant state-changing calls |

mod guard;
mod lp_token;
mod pool;
mod state;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use guard::{Entered, ReentrancyGuard};
pub use pool::Pair;
pub use state::PairStatus;
