//! Deterministic pair creation.

use std::sync::Arc;

use alloy_primitives::{keccak256, B256};
use parking_lot::RwLock;

use super::PairRegistry;
use crate::config::FactoryConfig;
use crate::domain::{Address, EventLog, FactoryEvent, TokenPair};
use crate::error::AmmError;
use crate::pair::Pair;
use crate::token::TokenResolver;

/// Bytes whose hash stands in for the pair's init code when deriving
/// pair addresses.
const PAIR_INIT_CODE: &[u8] = b"EzSwapPair";

/// Derives the address of the pair for `tokens` created by `factory`:
///
/// ```text
/// keccak256(0xff ‖ factory ‖ keccak256(token0 ‖ token1) ‖ init_code_hash)[12..]
/// ```
///
/// The result depends only on the factory and the unordered token pair.
#[must_use]
pub fn pair_address(factory: Address, tokens: &TokenPair) -> Address {
    let init_code_hash: B256 = keccak256(PAIR_INIT_CODE);
    let mut preimage = [0u8; 85];
    preimage[0] = 0xff;
    preimage[1..21].copy_from_slice(factory.as_slice());
    preimage[21..53].copy_from_slice(tokens.salt().as_slice());
    preimage[53..].copy_from_slice(init_code_hash.as_slice());
    Address::from_word(keccak256(preimage))
}

/// Creates at most one [`Pair`] per unordered token pair and indexes it.
///
/// `create_pair` runs under the registry's write lock, so concurrent
/// creations of the same pair resolve to exactly one success and
/// `PairCreated` events appear in the same order as [`all_pairs`](Self::all_pairs). Lookups
/// take the read lock only.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use ezswap_core::domain::Address;
/// use ezswap_core::error::AmmError;
/// use ezswap_core::factory::PairFactory;
/// use ezswap_core::token::TokenBook;
///
/// let factory = PairFactory::with_defaults(Arc::new(TokenBook::new()));
/// let (a, b) = (Address::repeat_byte(1), Address::repeat_byte(2));
///
/// let pair = factory.create_pair(a, b).expect("new pair");
/// assert_eq!(factory.get_pair(b, a), pair);
/// assert_eq!(factory.all_pairs_length(), 1);
/// assert_eq!(factory.create_pair(b, a), Err(AmmError::PairExists));
/// ```
pub struct PairFactory {
    config: FactoryConfig,
    tokens: Arc<dyn TokenResolver>,
    registry: RwLock<PairRegistry>,
    events: EventLog<FactoryEvent>,
}

impl PairFactory {
    /// Creates a factory from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `config` is invalid.
    pub fn new(config: FactoryConfig, tokens: Arc<dyn TokenResolver>) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            config,
            tokens,
            registry: RwLock::new(PairRegistry::new()),
            events: EventLog::new(),
        })
    }

    /// Creates a factory with the default configuration.
    #[must_use]
    pub fn with_defaults(tokens: Arc<dyn TokenResolver>) -> Self {
        Self {
            config: FactoryConfig::default(),
            tokens,
            registry: RwLock::new(PairRegistry::new()),
            events: EventLog::new(),
        }
    }

    /// Address of the factory.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.config.factory_address()
    }

    /// Configuration the factory runs with.
    #[must_use]
    pub const fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Creates, initializes, and indexes the pair for `{token_a, token_b}`.
    ///
    /// The pair is initialized with its tokens in canonical order and
    /// `PairCreated(token0, token1, pair)` is emitted.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAddress`] if either token is the zero address.
    /// - [`AmmError::IdenticalAddresses`] if both tokens are equal.
    /// - [`AmmError::PairExists`] if the pair exists, in either order.
    pub fn create_pair(&self, token_a: Address, token_b: Address) -> Result<Address, AmmError> {
        let tokens = TokenPair::new(token_a, token_b)?;
        let (token0, token1) = (tokens.token0(), tokens.token1());
        let address = pair_address(self.address(), &tokens);

        {
            let mut registry = self.registry.write();
            if registry.contains(&tokens) {
                return Err(AmmError::PairExists);
            }
            let pair = Arc::new(Pair::new(
                address,
                self.address(),
                self.config.pair().clone(),
                Arc::clone(&self.tokens),
            ));
            pair.initialize(token0, token1)?;
            registry.insert(tokens, pair)?;
            self.events.emit(FactoryEvent::PairCreated {
                token0,
                token1,
                pair: address,
            });
        }

        tracing::info!(factory = %self.address(), %token0, %token1, pair = %address, "pair created");
        Ok(address)
    }

    /// Address of the pair for `{token_a, token_b}` in either order, or the
    /// zero address if there is none.
    #[must_use]
    pub fn get_pair(&self, token_a: Address, token_b: Address) -> Address {
        TokenPair::new(token_a, token_b)
            .ok()
            .and_then(|tokens| self.registry.read().get(&tokens))
            .unwrap_or(Address::ZERO)
    }

    /// Number of pairs created so far.
    #[must_use]
    pub fn all_pairs_length(&self) -> usize {
        self.registry.read().len()
    }

    /// Address of the `index`-th created pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::IndexOutOfBounds`] if `index` is not below
    /// [`all_pairs_length`](Self::all_pairs_length).
    pub fn all_pairs(&self, index: usize) -> Result<Address, AmmError> {
        self.registry.read().address_at(index)
    }

    /// Handle to the pair living at `address`.
    #[must_use]
    pub fn pair(&self, address: &Address) -> Option<Arc<Pair>> {
        self.registry.read().by_address(address)
    }

    /// Handles to every pair, in creation order.
    #[must_use]
    pub fn pairs(&self) -> Vec<Arc<Pair>> {
        self.registry.read().pairs().to_vec()
    }

    /// Every event the factory emitted, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<FactoryEvent> {
        self.events.snapshot()
    }
}

impl core::fmt::Debug for PairFactory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PairFactory")
            .field("address", &self.address())
            .field("pairs", &self.all_pairs_length())
            .finish_non_exhaustive()
    }
}
