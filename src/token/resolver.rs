//! Resolving token addresses to live token handles.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::FungibleToken;
use crate::domain::Address;
use crate::error::AmmError;

/// Maps a token address to the token behind it.
///
/// Pairs store only token addresses and resolve them on every call that
/// moves tokens.
pub trait TokenResolver: Send + Sync {
    /// Returns the token registered at `token`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownToken`] if nothing is registered there.
    fn resolve(&self, token: &Address) -> Result<Arc<dyn FungibleToken>, AmmError>;
}

/// Concurrent in-memory [`TokenResolver`].
///
/// Any [`FungibleToken`] can be registered, including a pair's own
/// liquidity-share token.
#[derive(Default)]
pub struct TokenBook {
    tokens: RwLock<HashMap<Address, Arc<dyn FungibleToken>>>,
}

impl TokenBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `token` under its own address, replacing any previous
    /// entry. Returns the replaced token, if any.
    pub fn register(&self, token: Arc<dyn FungibleToken>) -> Option<Arc<dyn FungibleToken>> {
        let address = token.address();
        tracing::debug!(%address, "token registered");
        self.tokens.write().insert(address, token)
    }

    /// Returns `true` if a token is registered at `token`.
    #[must_use]
    pub fn contains(&self, token: &Address) -> bool {
        self.tokens.read().contains_key(token)
    }

    /// Number of registered tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.read().len()
    }

    /// Returns `true` if no token is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.read().is_empty()
    }
}

impl TokenResolver for TokenBook {
    fn resolve(&self, token: &Address) -> Result<Arc<dyn FungibleToken>, AmmError> {
        self.tokens
            .read()
            .get(token)
            .cloned()
            .ok_or(AmmError::UnknownToken(*token))
    }
}

impl core::fmt::Debug for TokenBook {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let tokens: Vec<Address> = self.tokens.read().keys().copied().collect();
        f.debug_struct("TokenBook").field("tokens", &tokens).finish()
    }
}
