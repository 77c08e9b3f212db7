//! Factory configuration and its TOML loader.

use alloy_primitives::address;
use serde::{Deserialize, Serialize};

use super::PairConfig;
use crate::domain::Address;
use crate::error::AmmError;

/// Address a factory uses when none is configured.
pub const DEFAULT_FACTORY_ADDRESS: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");

/// Top-level blueprint of a [`PairFactory`](crate::factory::PairFactory).
///
/// The factory address seeds every pair address the factory derives, so
/// two factories with different addresses never collide.
///
/// # Examples
///
/// ```
/// use ezswap_core::config::FactoryConfig;
///
/// let cfg = FactoryConfig::from_toml_str(
///     r#"
///     factory_address = "0x00000000000000000000000000000000000000fa"
///
///     [pair]
///     lp_symbol = "TLP"
///     "#,
/// )
/// .expect("valid configuration");
/// assert_eq!(cfg.pair().lp_symbol(), "TLP");
/// assert_eq!(cfg.pair().lp_name(), "EzSwap LP");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FactoryConfig {
    factory_address: Address,
    pair: PairConfig,
}

impl FactoryConfig {
    /// Creates a validated `FactoryConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the factory address is
    /// zero or the pair configuration is invalid.
    pub fn new(factory_address: Address, pair: PairConfig) -> Result<Self, AmmError> {
        let config = Self {
            factory_address,
            pair,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a TOML document. Missing keys take their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the document does not
    /// parse or fails validation.
    pub fn from_toml_str(input: &str) -> Result<Self, AmmError> {
        let config: Self = toml::from_str(input).map_err(|err| {
            tracing::warn!(error = %err, "rejected factory configuration");
            AmmError::InvalidConfiguration("malformed factory configuration")
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] naming the first
    /// violated invariant.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.factory_address.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "factory_address must not be zero",
            ));
        }
        self.pair.validate()
    }

    /// Address of the factory.
    #[must_use]
    pub const fn factory_address(&self) -> Address {
        self.factory_address
    }

    /// Configuration applied to every created pair.
    #[must_use]
    pub const fn pair(&self) -> &PairConfig {
        &self.pair
    }
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            factory_address: DEFAULT_FACTORY_ADDRESS,
            pair: PairConfig::default(),
        }
    }
}
