//! Events emitted by the factory and by pairs.
//!
//! Field order inside each variant mirrors the emitted event signature
//! exactly, e.g. `Swap(sender, amount0In, amount1In, amount0Out,
//! amount1Out, to)`. Serialized forms keep that order.

use alloy_primitives::Address;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::{Amount, Shares};

/// Events emitted by [`PairFactory`](crate::factory::PairFactory).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum FactoryEvent {
    /// A pair was created; tokens are reported in canonical order.
    PairCreated {
        /// Smaller token address.
        token0: Address,
        /// Larger token address.
        token1: Address,
        /// Address of the new pair.
        pair: Address,
    },
}

/// Events emitted by a [`Pair`](crate::pair::Pair).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum PairEvent {
    /// Liquidity was deposited and shares were issued to `provider`.
    LiquidityAdded {
        /// Depositor receiving the shares.
        provider: Address,
        /// Amount of `token0` pulled from the provider.
        amount0: Amount,
        /// Amount of `token1` pulled from the provider.
        amount1: Amount,
        /// Shares credited to the provider.
        shares_issued: Shares,
    },
    /// Shares were burned and the underlying tokens paid out.
    LiquidityRemoved {
        /// Owner of the burned shares.
        provider: Address,
        /// Amount of `token0` paid out.
        amount0_out: Amount,
        /// Amount of `token1` paid out.
        amount1_out: Amount,
        /// Shares burned.
        shares_burned: Shares,
    },
    /// A swap settled against the pool.
    Swap {
        /// Caller of `swap`.
        sender: Address,
        /// Detected `token0` input.
        amount0_in: Amount,
        /// Detected `token1` input.
        amount1_in: Amount,
        /// `token0` paid to `to`.
        amount0_out: Amount,
        /// `token1` paid to `to`.
        amount1_out: Amount,
        /// Recipient of the outputs.
        to: Address,
    },
}

/// Append-only log of emitted events.
///
/// Readers get snapshots; the log is never held across calls into other
/// components.
#[derive(Debug)]
pub struct EventLog<E> {
    entries: RwLock<Vec<E>>,
}

impl<E: Clone> EventLog<E> {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Appends an event.
    pub fn emit(&self, event: E) {
        self.entries.write().push(event);
    }

    /// Returns a copy of every event emitted so far, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<E> {
        self.entries.read().clone()
    }

    /// Returns the most recent event, if any.
    #[must_use]
    pub fn last(&self) -> Option<E> {
        self.entries.read().last().cloned()
    }

    /// Number of events emitted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if nothing has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<E: Clone> Default for EventLog<E> {
    fn default() -> Self {
        Self::new()
    }
}
