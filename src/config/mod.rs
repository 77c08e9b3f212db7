//! Declarative configuration for factories and pairs.
//!
//! [`FactoryConfig`] is the top-level blueprint: the factory's own address
//! plus the [`PairConfig`] every created pair receives. Both validate on
//! construction and deserialize from TOML with EzSwap defaults for
//! missing keys.

mod factory_config;
mod pair_config;

pub use factory_config::{FactoryConfig, DEFAULT_FACTORY_ADDRESS};
pub use pair_config::{
    PairConfig, DEFAULT_LP_DECIMALS, DEFAULT_LP_NAME, DEFAULT_LP_SYMBOL, MINIMUM_LIQUIDITY,
};
