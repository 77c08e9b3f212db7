//! Parameters shared by every pair a factory creates.

use serde::{Deserialize, Serialize};

use crate::domain::Shares;
use crate::error::AmmError;

/// Default liquidity-share token name.
pub const DEFAULT_LP_NAME: &str = "EzSwap LP";

/// Default liquidity-share token symbol.
pub const DEFAULT_LP_SYMBOL: &str = "EzSLP";

/// Default liquidity-share token decimals.
pub const DEFAULT_LP_DECIMALS: u8 = 18;

/// Shares permanently locked by the first deposit into a pair.
pub const MINIMUM_LIQUIDITY: u64 = 1_000;

/// Largest decimals value whose unit (`10^decimals`) fits in 256 bits.
const MAX_DECIMALS: u8 = 77;

/// Configuration of a pair's liquidity-share token and its first-deposit
/// lock.
///
/// Deserializes from partial input: missing fields take the EzSwap
/// defaults.
///
/// # Validation
///
/// - Name and symbol must be non-empty.
/// - Decimals must not exceed 77.
/// - The minimum liquidity must be non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PairConfig {
    lp_name: String,
    lp_symbol: String,
    lp_decimals: u8,
    minimum_liquidity: u64,
}

impl PairConfig {
    /// Creates a validated `PairConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if any invariant fails.
    pub fn new(
        lp_name: impl Into<String>,
        lp_symbol: impl Into<String>,
        lp_decimals: u8,
        minimum_liquidity: u64,
    ) -> Result<Self, AmmError> {
        let config = Self {
            lp_name: lp_name.into(),
            lp_symbol: lp_symbol.into(),
            lp_decimals,
            minimum_liquidity,
        };
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
        if self.lp_name.trim().is_empty() {
            return Err(AmmError::InvalidConfiguration("lp_name must not be empty"));
        }
        if self.lp_symbol.trim().is_empty() {
            return Err(AmmError::InvalidConfiguration(
                "lp_symbol must not be empty",
            ));
        }
        if self.lp_decimals > MAX_DECIMALS {
            return Err(AmmError::InvalidConfiguration(
                "lp_decimals must not exceed 77",
            ));
        }
        if self.minimum_liquidity == 0 {
            return Err(AmmError::InvalidConfiguration(
                "minimum_liquidity must be non-zero",
            ));
        }
        Ok(())
    }

    /// Liquidity-share token name.
    #[must_use]
    pub fn lp_name(&self) -> &str {
        &self.lp_name
    }

    /// Liquidity-share token symbol.
    #[must_use]
    pub fn lp_symbol(&self) -> &str {
        &self.lp_symbol
    }

    /// Liquidity-share token decimals.
    #[must_use]
    pub const fn lp_decimals(&self) -> u8 {
        self.lp_decimals
    }

    /// Shares locked to the zero address by the first deposit.
    pub fn minimum_liquidity(&self) -> Shares {
        Shares::from(self.minimum_liquidity)
    }
}

impl Default for PairConfig {
    fn default() -> Self {
        Self {
            lp_name: DEFAULT_LP_NAME.to_owned(),
            lp_symbol: DEFAULT_LP_SYMBOL.to_owned(),
            lp_decimals: DEFAULT_LP_DECIMALS,
            minimum_liquidity: MINIMUM_LIQUIDITY,
        }
    }
}
