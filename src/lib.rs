//! # EzSwap Core
//!
//! Constant-product exchange core: a factory that creates one trading pair
//! per unordered token pair, pairs that pool two fungible tokens and issue
//! liquidity shares, and the integer math both rely on.
//!
//! Pairs trade on the invariant `reserve0 × reserve1 ≥ k` with no swap fee.
//! All amounts are 256-bit unsigned integers; every division floors.
//!
//! # Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! ezswap-core = "0.1"
//! ```
//!
//! ## Create a pair, add liquidity, and swap
//!
//! ```rust
//! use std::sync::Arc;
//! use ezswap_core::domain::{Address, Amount};
//! use ezswap_core::factory::PairFactory;
//! use ezswap_core::token::{FungibleToken, InMemoryToken, TokenBook};
//!
//! // 1. Register two tokens
//! let book = Arc::new(TokenBook::new());
//! let usdc = Arc::new(InMemoryToken::new(Address::repeat_byte(1), "USD Coin", "USDC", 6));
//! let weth = Arc::new(InMemoryToken::new(Address::repeat_byte(2), "Wrapped Ether", "WETH", 18));
//! book.register(usdc.clone());
//! book.register(weth.clone());
//!
//! // 2. Create the pair through the factory
//! let factory = PairFactory::with_defaults(book);
//! let address = factory.create_pair(weth.address(), usdc.address()).expect("new pair");
//! let pair = factory.pair(&address).expect("indexed");
//!
//! // 3. Seed it
//! let alice = Address::repeat_byte(0xa1);
//! usdc.mint(alice, Amount::from(2_000_000u64)).expect("mint");
//! weth.mint(alice, Amount::from(2_000_000u64)).expect("mint");
//! usdc.approve(alice, address, Amount::MAX);
//! weth.approve(alice, address, Amount::MAX);
//! pair.add_liquidity(alice, Amount::from(1_000_000u64), Amount::from(1_000_000u64))
//!     .expect("first deposit");
//!
//! // 4. Swap: send the input first, then ask for the quoted output
//! let out = pair.quote_out(usdc.address(), Amount::from(10_000u64)).expect("quote");
//! usdc.transfer(alice, address, Amount::from(10_000u64));
//! pair.swap(alice, Amount::ZERO, out, alice).expect("swap");
//! assert_eq!(out, Amount::from(9_900u64));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Consumer   │  create_pair / add_liquidity / swap
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │ PairFactory  │  one pair per unordered token pair, PairRegistry index
//! └──────┬───────┘
//!        │ Arc<Pair>
//!        ▼
//! ┌──────────────┐
//! │     Pair     │  reserves, share ledger, ReentrancyGuard
//! └──────┬───────┘
//!        │ TokenResolver → FungibleToken
//!        ▼
//! ┌──────────────┐
//! │    Tokens    │  InMemoryToken, or any FungibleToken implementation
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`TokenPair`](domain::TokenPair), [`Reserves`](domain::Reserves), events |
//! | [`token`] | [`FungibleToken`](token::FungibleToken) seam, [`TokenBook`](token::TokenBook) resolver, [`InMemoryToken`](token::InMemoryToken) |
//! | [`pair`] | [`Pair`](pair::Pair): liquidity, swaps, and the share token |
//! | [`factory`] | [`PairFactory`](factory::PairFactory) and its [`PairRegistry`](factory::PairRegistry) |
//! | [`config`] | [`FactoryConfig`](config::FactoryConfig) and [`PairConfig`](config::PairConfig) |
//! | [`math`] | Integer square root, `mul_div`, swap quotes |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod math;
pub mod pair;
pub mod prelude;
pub mod token;
