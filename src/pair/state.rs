//! Mutable state of a pair.

use serde::{Deserialize, Serialize};

use crate::domain::{Address, Reserves, Shares};
use crate::error::AmmError;
use crate::token::ledger::Ledger;

/// Lifecycle of a pair: created empty, initialized exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PairStatus {
    /// No tokens bound yet; only `initialize` and queries are accepted.
    #[default]
    Uninitialized,
    /// Tokens are bound for the lifetime of the pair.
    Initialized {
        /// First token, as passed to `initialize`.
        token0: Address,
        /// Second token, as passed to `initialize`.
        token1: Address,
    },
}

impl PairStatus {
    /// The bound tokens, or [`AmmError::NotInitialized`].
    pub(crate) fn tokens(self) -> Result<(Address, Address), AmmError> {
        match self {
            Self::Uninitialized => Err(AmmError::NotInitialized),
            Self::Initialized { token0, token1 } => Ok((token0, token1)),
        }
    }
}

/// Everything a pair mutates: status, reserves, and the share ledger.
#[derive(Debug, Default)]
pub(crate) struct PairState {
    pub(crate) status: PairStatus,
    pub(crate) reserves: Reserves,
    pub(crate) shares: Ledger<Shares>,
}

/// Consistent copy of the fields a state-changing call plans against.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Snapshot {
    pub(crate) token0: Address,
    pub(crate) token1: Address,
    pub(crate) reserves: Reserves,
    pub(crate) total_shares: Shares,
}

impl PairState {
    pub(crate) fn snapshot(&self) -> Result<Snapshot, AmmError> {
        let (token0, token1) = self.status.tokens()?;
        Ok(Snapshot {
            token0,
            token1,
            reserves: self.reserves,
            total_shares: self.shares.total(),
        })
    }
}
