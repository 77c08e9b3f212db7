//! Index of created pairs.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{Address, TokenPair};
use crate::error::AmmError;
use crate::pair::Pair;

/// Every pair a factory created, reachable three ways: by unordered
/// token pair, by creation index, and by pair address.
///
/// The only mutation is [`insert`](Self::insert), which updates all three
/// lookups together. Because [`TokenPair`] is canonically ordered, one
/// index entry answers lookups in both argument orders.
#[derive(Debug, Default)]
pub struct PairRegistry {
    index: HashMap<TokenPair, Address>,
    pairs: Vec<Arc<Pair>>,
    by_address: HashMap<Address, usize>,
}

impl PairRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Address of the pair for `tokens`, if one was created.
    #[must_use]
    pub fn get(&self, tokens: &TokenPair) -> Option<Address> {
        self.index.get(tokens).copied()
    }

    /// Returns `true` if a pair exists for `tokens`.
    #[must_use]
    pub fn contains(&self, tokens: &TokenPair) -> bool {
        self.index.contains_key(tokens)
    }

    /// Number of created pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no pair was created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Address of the `index`-th created pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::IndexOutOfBounds`] if `index >= len()`.
    pub fn address_at(&self, index: usize) -> Result<Address, AmmError> {
        self.pairs
            .get(index)
            .map(|pair| pair.address())
            .ok_or(AmmError::IndexOutOfBounds {
                index,
                length: self.pairs.len(),
            })
    }

    /// The pair living at `address`.
    #[must_use]
    pub fn by_address(&self, address: &Address) -> Option<Arc<Pair>> {
        self.by_address
            .get(address)
            .and_then(|position| self.pairs.get(*position))
            .cloned()
    }

    /// All pairs in creation order.
    #[must_use]
    pub fn pairs(&self) -> &[Arc<Pair>] {
        &self.pairs
    }

    /// Records `pair` as the pair for `tokens`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PairExists`] if `tokens` or the pair's address
    /// is already registered; nothing is changed in that case.
    pub fn insert(&mut self, tokens: TokenPair, pair: Arc<Pair>) -> Result<(), AmmError> {
        let address = pair.address();
        if self.index.contains_key(&tokens) || self.by_address.contains_key(&address) {
            return Err(AmmError::PairExists);
        }
        self.index.insert(tokens, address);
        self.by_address.insert(address, self.pairs.len());
        self.pairs.push(pair);
        Ok(())
    }
}
