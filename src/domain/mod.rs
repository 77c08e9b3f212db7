//! Fundamental domain value types of the exchange core.
//!
//! This module contains the value types that model the EzSwap domain:
//! token identities, token amounts, liquidity shares, canonical token
//! pairs, pooled reserves, and the events pairs and the factory emit.
//! Amounts are 256-bit newtypes with checked arithmetic.

mod amount;
mod event;
mod reserves;
mod shares;
mod token_pair;

pub use alloy_primitives::Address;
pub use amount::Amount;
pub use event::{EventLog, FactoryEvent, PairEvent};
pub use reserves::Reserves;
pub use shares::Shares;
pub use token_pair::TokenPair;
