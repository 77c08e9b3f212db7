//! Pair creation and lookup.
//!
//! The [`PairFactory`] creates one [`Pair`](crate::pair::Pair) per
//! unordered token pair at a deterministic address, initializes it with
//! canonically ordered tokens, and records it in its [`PairRegistry`].
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use ezswap_core::domain::Address;
//! use ezswap_core::factory::PairFactory;
//! use ezswap_core::token::TokenBook;
//!
//! let factory = PairFactory::with_defaults(Arc::new(TokenBook::new()));
//! let pair = factory
//!     .create_pair(Address::repeat_byte(2), Address::repeat_byte(1))
//!     .expect("new pair");
//! let handle = factory.pair(&pair).expect("indexed");
//! assert_eq!(handle.token0(), Address::repeat_byte(1));
//! ```

mod pair_factory;
mod registry;

pub use pair_factory::{pair_address, PairFactory};
pub use registry::PairRegistry;
