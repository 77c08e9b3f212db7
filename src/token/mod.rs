//! Fungible tokens as consumed by pairs.
//!
//! Pairs never own token implementations. They hold token addresses and
//! go through a [`TokenResolver`] to reach the [`FungibleToken`] behind
//! each one. [`TokenBook`] is the in-memory resolver and
//! [`InMemoryToken`] the reference token implementation.

mod fungible;
mod in_memory;
pub(crate) mod ledger;
mod resolver;

pub use fungible::FungibleToken;
pub use in_memory::InMemoryToken;
pub use resolver::{TokenBook, TokenResolver};
