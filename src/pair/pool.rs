//! Constant-product pair (`x · y = k`, no fee).
//!
//! A [`Pair`] holds pooled reserves of two tokens and issues liquidity
//! shares against them. State-changing calls follow one pattern:
//!
//! 1. Enter the [`ReentrancyGuard`].
//! 2. Snapshot the state and run every check.
//! 3. Move tokens, without holding the state lock.
//! 4. Commit the new state and record the event.
//!
//! A call that fails before step 4 leaves reserves, supply, and balances
//! as they were. Payouts go out `token0` first. If `token0` refuses,
//! nothing has moved and the call fails cleanly. If `token1` refuses after
//! `token0` was paid, the call settles what was paid (shares burned,
//! reserves debited, event recorded) and then reports the refusal.

use std::sync::Arc;

use parking_lot::RwLock;

use super::guard::{Entered, ReentrancyGuard};
use super::state::{PairState, PairStatus, Snapshot};
use crate::config::PairConfig;
use crate::domain::{Address, Amount, EventLog, PairEvent, Reserves, Shares};
use crate::error::AmmError;
use crate::math::{get_amount_in, get_amount_out, isqrt, mul_div, CheckedArithmetic};
use crate::token::{FungibleToken, TokenResolver};

/// A trading pair and the liquidity-share token over its reserves.
///
/// Shared between threads behind an [`Arc`]; every method takes `&self`.
/// Callers identify themselves with an explicit `caller` address.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use ezswap_core::config::PairConfig;
/// use ezswap_core::domain::{Address, Amount};
/// use ezswap_core::pair::Pair;
/// use ezswap_core::token::{FungibleToken, InMemoryToken, TokenBook};
///
/// let book = Arc::new(TokenBook::new());
/// let (a, b) = (Address::repeat_byte(1), Address::repeat_byte(2));
/// let token_a = Arc::new(InMemoryToken::new(a, "Token A", "TKA", 18));
/// let token_b = Arc::new(InMemoryToken::new(b, "Token B", "TKB", 18));
/// book.register(token_a.clone());
/// book.register(token_b.clone());
///
/// let pair_address = Address::repeat_byte(0xee);
/// let pair = Pair::new(pair_address, Address::ZERO, PairConfig::default(), book);
/// pair.initialize(a, b).expect("fresh pair");
///
/// let alice = Address::repeat_byte(0xa1);
/// token_a.mint(alice, Amount::from(1_000_000u64)).expect("mint");
/// token_b.mint(alice, Amount::from(1_000_000u64)).expect("mint");
/// token_a.approve(alice, pair_address, Amount::MAX);
/// token_b.approve(alice, pair_address, Amount::MAX);
///
/// let shares = pair
///     .add_liquidity(alice, Amount::from(10_000u64), Amount::from(40_000u64))
///     .expect("first deposit");
/// assert_eq!(shares.to_string(), "19000"); // sqrt(4e8) - 1000
/// ```
pub struct Pair {
    address: Address,
    factory: Address,
    config: PairConfig,
    tokens: Arc<dyn TokenResolver>,
    guard: ReentrancyGuard,
    state: RwLock<PairState>,
    events: EventLog<PairEvent>,
}

impl Pair {
    /// Creates an uninitialized pair living at `address`.
    #[must_use]
    pub fn new(
        address: Address,
        factory: Address,
        config: PairConfig,
        tokens: Arc<dyn TokenResolver>,
    ) -> Self {
        Self {
            address,
            factory,
            config,
            tokens,
            guard: ReentrancyGuard::new(),
            state: RwLock::new(PairState::default()),
            events: EventLog::new(),
        }
    }

    /// Binds the pair to its two tokens. Succeeds exactly once.
    ///
    /// Tokens are stored as given; callers are expected to pass them in
    /// canonical order.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Locked`] on reentry.
    /// - [`AmmError::AlreadyInitialized`] on any call after the first
    ///   success.
    /// - [`AmmError::InvalidToken`] if either token is zero or both are
    ///   the same.
    pub fn initialize(&self, token0: Address, token1: Address) -> Result<(), AmmError> {
        let _entered = self.enter()?;
        let mut state = self.state.write();
        if state.status != PairStatus::Uninitialized {
            return Err(AmmError::AlreadyInitialized);
        }
        if token0.is_zero() || token1.is_zero() {
            return Err(AmmError::InvalidToken("pair tokens must be non-zero"));
        }
        if token0 == token1 {
            return Err(AmmError::InvalidToken("pair tokens must differ"));
        }
        state.status = PairStatus::Initialized { token0, token1 };
        tracing::debug!(pair = %self.address, %token0, %token1, "pair initialized");
        Ok(())
    }

    /// Deposits `amount0` of `token0` and `amount1` of `token1` from
    /// `caller` and issues liquidity shares to `caller`.
    ///
    /// The pair pulls both amounts with `transfer_from`, so `caller` must
    /// have approved the pair beforehand.
    ///
    /// - First deposit: `sqrt(amount0 × amount1) − MINIMUM_LIQUIDITY`
    ///   shares; `MINIMUM_LIQUIDITY` shares are locked to the zero
    ///   address.
    /// - Later deposits: `min(amount0 × total / reserve0,
    ///   amount1 × total / reserve1)` shares. Any excess over the current
    ///   ratio is donated to the pool.
    ///
    /// If a token delivers less than requested (fee on transfer), shares
    /// and reserves are computed from what actually arrived.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Locked`] on reentry.
    /// - [`AmmError::NotInitialized`] before `initialize`.
    /// - [`AmmError::ZeroAmount`] if either amount is zero or the deposit
    ///   would issue no shares.
    /// - [`AmmError::UnknownToken`] if a token cannot be resolved.
    /// - [`AmmError::TransferFailed`] if a pull is refused; an already
    ///   completed first pull is refunded.
    /// - [`AmmError::Overflow`] if reserves or supply would overflow.
    pub fn add_liquidity(
        &self,
        caller: Address,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<Shares, AmmError> {
        let _entered = self.enter()?;
        let snapshot = self.state.read().snapshot()?;
        if amount0.is_zero() || amount1.is_zero() {
            return Err(AmmError::ZeroAmount);
        }
        let _preview = self.shares_for_deposit(&snapshot, amount0, amount1)?;
        snapshot.reserves.credit(amount0, amount1)?;

        let (token0, token1) = self.resolve(&snapshot)?;
        self.pull(token0.as_ref(), caller, amount0)?;
        if let Err(err) = self.pull(token1.as_ref(), caller, amount1) {
            self.refund(token0.as_ref(), caller, amount0);
            return Err(err);
        }

        let received0 = self.received(token0.as_ref(), snapshot.reserves.reserve0, amount0);
        let received1 = self.received(token1.as_ref(), snapshot.reserves.reserve1, amount1);
        let (issued, locked) = match self.shares_for_deposit(&snapshot, received0, received1) {
            Ok(minted) => minted,
            Err(err) => {
                self.refund(token0.as_ref(), caller, received0);
                self.refund(token1.as_ref(), caller, received1);
                return Err(err);
            }
        };

        {
            let mut state = self.state.write();
            if !locked.is_zero() {
                state.shares.mint(Address::ZERO, locked)?;
            }
            state.shares.mint(caller, issued)?;
            state.reserves = state.reserves.credit(received0, received1)?;
        }

        tracing::info!(
            pair = %self.address,
            provider = %caller,
            amount0 = %received0,
            amount1 = %received1,
            shares = %issued,
            "liquidity added"
        );
        self.events.emit(PairEvent::LiquidityAdded {
            provider: caller,
            amount0: received0,
            amount1: received1,
            shares_issued: issued,
        });
        Ok(issued)
    }

    /// Burns `shares` owned by `caller` and pays out the proportional part
    /// of both reserves: `reserveX × shares / total` (floor).
    ///
    /// # Errors
    ///
    /// - [`AmmError::Locked`] on reentry.
    /// - [`AmmError::NotInitialized`] before `initialize`.
    /// - [`AmmError::ZeroAmount`] if `shares` is zero.
    /// - [`AmmError::ZeroAddress`] if `caller` is the zero address, which
    ///   holds the locked minimum liquidity.
    /// - [`AmmError::InsufficientLiquidityBalance`] if `caller` holds
    ///   fewer than `shares`.
    /// - [`AmmError::TransferFailed`] if a payout is refused. When the
    ///   `token0` payout was refused nothing changed. When only the
    ///   `token1` payout was refused, `shares` are burned against the
    ///   `token0` actually paid and the refused `token1` stays in the pool.
    pub fn remove_liquidity(
        &self,
        caller: Address,
        shares: Shares,
    ) -> Result<(Amount, Amount), AmmError> {
        let _entered = self.enter()?;
        let (snapshot, balance) = {
            let state = self.state.read();
            (state.snapshot()?, state.shares.balance_of(&caller))
        };
        if shares.is_zero() {
            return Err(AmmError::ZeroAmount);
        }
        if caller.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        if balance < shares {
            return Err(AmmError::InsufficientLiquidityBalance);
        }

        let total = snapshot.total_shares.get();
        let amount0_out = Amount::new(mul_div(
            snapshot.reserves.reserve0.get(),
            shares.get(),
            total,
        )?);
        let amount1_out = Amount::new(mul_div(
            snapshot.reserves.reserve1.get(),
            shares.get(),
            total,
        )?);
        let reserves = snapshot.reserves.debit(amount0_out, amount1_out)?;
        tracing::debug!(
            pair = %self.address,
            %shares,
            total = %snapshot.total_shares,
            %amount0_out,
            %amount1_out,
            "removal computed"
        );

        let (token0, token1) = self.resolve(&snapshot)?;
        if let Err(refusal) =
            self.pay_out(token0.as_ref(), token1.as_ref(), caller, amount0_out, amount1_out)
        {
            if !refusal.paid0.is_zero() {
                let partial = snapshot.reserves.debit(refusal.paid0, Amount::ZERO)?;
                self.commit_removal(caller, shares, partial, refusal.paid0, Amount::ZERO)?;
            }
            return Err(AmmError::TransferFailed {
                token: refusal.token,
            });
        }

        self.commit_removal(caller, shares, reserves, amount0_out, amount1_out)?;
        Ok((amount0_out, amount1_out))
    }

    /// Pays `amount0_out` / `amount1_out` to `to` against input the caller
    /// has already transferred into the pair.
    ///
    /// The input is whatever the pair holds beyond its reserves. The swap
    /// settles only if the product of the post-swap balances is at least
    /// the product of the reserves; afterwards the reserves are set to the
    /// pair's actual balances.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Locked`] on reentry.
    /// - [`AmmError::NotInitialized`] before `initialize`.
    /// - [`AmmError::ZeroAmount`] if both outputs are zero.
    /// - [`AmmError::ZeroAddress`] if `to` is the zero address.
    /// - [`AmmError::InvalidToken`] if `to` is the pair itself or one of
    ///   its tokens.
    /// - [`AmmError::InsufficientLiquidity`] if an output exceeds its
    ///   reserve.
    /// - [`AmmError::InsufficientInputAmount`] if nothing was sent in.
    /// - [`AmmError::KInvariant`] if the product would decrease.
    /// - [`AmmError::TransferFailed`] if a payout is refused. A refused
    ///   `token0` output leaves everything unchanged. A refused `token1`
    ///   output after a paid `token0` output settles the swap with the
    ///   `token0` output alone.
    pub fn swap(
        &self,
        caller: Address,
        amount0_out: Amount,
        amount1_out: Amount,
        to: Address,
    ) -> Result<(), AmmError> {
        let _entered = self.enter()?;
        let snapshot = self.state.read().snapshot()?;
        if amount0_out.is_zero() && amount1_out.is_zero() {
            return Err(AmmError::ZeroAmount);
        }
        if to.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        if to == self.address {
            return Err(AmmError::InvalidToken("swap recipient cannot be the pair"));
        }
        if to == snapshot.token0 || to == snapshot.token1 {
            return Err(AmmError::InvalidToken("swap recipient cannot be a pair token"));
        }
        let Reserves { reserve0, reserve1 } = snapshot.reserves;
        if amount0_out > reserve0 || amount1_out > reserve1 {
            return Err(AmmError::InsufficientLiquidity);
        }

        let (token0, token1) = self.resolve(&snapshot)?;
        let balance0 = token0.balance_of(&self.address);
        let balance1 = token1.balance_of(&self.address);
        let amount0_in = balance0.saturating_sub(&reserve0);
        let amount1_in = balance1.saturating_sub(&reserve1);
        if amount0_in.is_zero() && amount1_in.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }

        let after = Reserves::new(
            balance0.safe_sub(&amount0_out)?,
            balance1.safe_sub(&amount1_out)?,
        );
        if after.product() < snapshot.reserves.product() {
            return Err(AmmError::KInvariant);
        }
        tracing::debug!(
            pair = %self.address,
            %amount0_in,
            %amount1_in,
            %amount0_out,
            %amount1_out,
            "swap input detected"
        );

        let inputs = (amount0_in, amount1_in);
        if let Err(refusal) =
            self.pay_out(token0.as_ref(), token1.as_ref(), to, amount0_out, amount1_out)
        {
            if !refusal.paid0.is_zero() {
                self.sync(token0.as_ref(), token1.as_ref());
                self.record_swap(caller, inputs, (refusal.paid0, Amount::ZERO), to);
            }
            return Err(AmmError::TransferFailed {
                token: refusal.token,
            });
        }

        self.sync(token0.as_ref(), token1.as_ref());
        self.record_swap(caller, inputs, (amount0_out, amount1_out), to);
        Ok(())
    }

    /// Output of selling `amount_in` of `token_in` against the current
    /// reserves, without fee.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotInitialized`] before `initialize`.
    /// - [`AmmError::InvalidToken`] if `token_in` is not in the pair.
    /// - Any error of [`get_amount_out`].
    pub fn quote_out(&self, token_in: Address, amount_in: Amount) -> Result<Amount, AmmError> {
        let (reserve_in, reserve_out) = self.oriented_reserves(token_in)?;
        get_amount_out(amount_in, reserve_in, reserve_out)
    }

    /// Input of `token_in` needed to buy `amount_out` of the other token.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotInitialized`] before `initialize`.
    /// - [`AmmError::InvalidToken`] if `token_in` is not in the pair.
    /// - Any error of [`get_amount_in`].
    pub fn quote_in(&self, token_in: Address, amount_out: Amount) -> Result<Amount, AmmError> {
        let (reserve_in, reserve_out) = self.oriented_reserves(token_in)?;
        get_amount_in(amount_out, reserve_in, reserve_out)
    }

    // -- queries ----------------------------------------------------------

    /// Address of the pair.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Address of the factory that created the pair.
    #[must_use]
    pub const fn factory(&self) -> Address {
        self.factory
    }

    /// Configuration the pair was created with.
    #[must_use]
    pub const fn config(&self) -> &PairConfig {
        &self.config
    }

    /// Lifecycle status.
    #[must_use]
    pub fn status(&self) -> PairStatus {
        self.state.read().status
    }

    /// Returns `true` once `initialize` has succeeded.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.status() != PairStatus::Uninitialized
    }

    /// First token; the zero address before initialization.
    #[must_use]
    pub fn token0(&self) -> Address {
        self.status().tokens().map_or(Address::ZERO, |(token0, _)| token0)
    }

    /// Second token; the zero address before initialization.
    #[must_use]
    pub fn token1(&self) -> Address {
        self.status().tokens().map_or(Address::ZERO, |(_, token1)| token1)
    }

    /// Current recorded reserves.
    #[must_use]
    pub fn get_reserves(&self) -> Reserves {
        self.state.read().reserves
    }

    /// Every event this pair emitted, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<PairEvent> {
        self.events.snapshot()
    }

    /// The most recent event, if any.
    #[must_use]
    pub fn last_event(&self) -> Option<PairEvent> {
        self.events.last()
    }

    // -- internals --------------------------------------------------------

    pub(super) fn enter(&self) -> Result<Entered<'_>, AmmError> {
        self.guard.enter().inspect_err(|_| {
            tracing::warn!(pair = %self.address, "reentrant call rejected");
        })
    }

    pub(super) fn state(&self) -> &RwLock<PairState> {
        &self.state
    }

    fn oriented_reserves(&self, token_in: Address) -> Result<(Amount, Amount), AmmError> {
        let snapshot = self.state.read().snapshot()?;
        let Reserves { reserve0, reserve1 } = snapshot.reserves;
        if token_in == snapshot.token0 {
            Ok((reserve0, reserve1))
        } else if token_in == snapshot.token1 {
            Ok((reserve1, reserve0))
        } else {
            Err(AmmError::InvalidToken("token is not part of this pair"))
        }
    }

    /// Shares issued to the depositor and shares locked, for a deposit of
    /// `amount0` / `amount1` against `snapshot`.
    fn shares_for_deposit(
        &self,
        snapshot: &Snapshot,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<(Shares, Shares), AmmError> {
        if snapshot.total_shares.is_zero() {
            let product = amount0
                .checked_mul(&amount1)
                .ok_or(AmmError::Overflow("deposit product overflow"))?;
            let root = Shares::new(isqrt(product.get()));
            let locked = self.config.minimum_liquidity();
            if root <= locked {
                return Err(AmmError::ZeroAmount);
            }
            let issued = root.safe_sub(&locked)?;
            tracing::debug!(pair = %self.address, %root, %issued, "first deposit shares");
            return Ok((issued, locked));
        }

        let total = snapshot.total_shares.get();
        let shares0 = mul_div(amount0.get(), total, snapshot.reserves.reserve0.get())?;
        let shares1 = mul_div(amount1.get(), total, snapshot.reserves.reserve1.get())?;
        let issued = Shares::new(shares0.min(shares1));
        if issued.is_zero() {
            return Err(AmmError::ZeroAmount);
        }
        let _supply = snapshot.total_shares.safe_add(&issued)?;
        tracing::debug!(
            pair = %self.address,
            shares0 = %shares0,
            shares1 = %shares1,
            %issued,
            "deposit shares"
        );
        Ok((issued, Shares::ZERO))
    }

    fn resolve(
        &self,
        snapshot: &Snapshot,
    ) -> Result<(Arc<dyn FungibleToken>, Arc<dyn FungibleToken>), AmmError> {
        Ok((
            self.tokens.resolve(&snapshot.token0)?,
            self.tokens.resolve(&snapshot.token1)?,
        ))
    }

    fn pull(&self, token: &dyn FungibleToken, from: Address, amount: Amount) -> Result<(), AmmError> {
        if token.transfer_from(self.address, from, self.address, amount) {
            return Ok(());
        }
        let token = token.address();
        tracing::debug!(pair = %self.address, %token, %from, %amount, "deposit pull refused");
        Err(AmmError::TransferFailed { token })
    }

    fn refund(&self, token: &dyn FungibleToken, to: Address, amount: Amount) {
        if amount.is_zero() {
            return;
        }
        let refunded = token.transfer(self.address, to, amount);
        tracing::warn!(
            pair = %self.address,
            token = %token.address(),
            %to,
            %amount,
            refunded,
            "deposit reverted"
        );
    }

    /// What actually arrived from a pull of `requested`, given the reserve
    /// recorded before it.
    fn received(&self, token: &dyn FungibleToken, reserve: Amount, requested: Amount) -> Amount {
        let arrived = token.balance_of(&self.address).saturating_sub(&reserve);
        arrived.min(requested)
    }

    /// Pays `token0` then `token1`. A refusal reports how much `token0`
    /// had already left the pair.
    fn pay_out(
        &self,
        token0: &dyn FungibleToken,
        token1: &dyn FungibleToken,
        to: Address,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<(), Refusal> {
        if !amount0.is_zero() && !token0.transfer(self.address, to, amount0) {
            return Err(self.refused(token0, to, amount0, Amount::ZERO));
        }
        if !amount1.is_zero() && !token1.transfer(self.address, to, amount1) {
            return Err(self.refused(token1, to, amount1, amount0));
        }
        Ok(())
    }

    fn refused(
        &self,
        token: &dyn FungibleToken,
        to: Address,
        amount: Amount,
        paid0: Amount,
    ) -> Refusal {
        let token = token.address();
        tracing::warn!(pair = %self.address, %token, %to, %amount, %paid0, "payout refused");
        Refusal { token, paid0 }
    }

    fn commit_removal(
        &self,
        provider: Address,
        shares: Shares,
        reserves: Reserves,
        amount0_out: Amount,
        amount1_out: Amount,
    ) -> Result<(), AmmError> {
        {
            let mut state = self.state.write();
            state.shares.burn(provider, shares)?;
            state.reserves = reserves;
        }
        tracing::info!(
            pair = %self.address,
            %provider,
            %amount0_out,
            %amount1_out,
            %shares,
            "liquidity removed"
        );
        self.events.emit(PairEvent::LiquidityRemoved {
            provider,
            amount0_out,
            amount1_out,
            shares_burned: shares,
        });
        Ok(())
    }

    fn record_swap(
        &self,
        sender: Address,
        (amount0_in, amount1_in): (Amount, Amount),
        (amount0_out, amount1_out): (Amount, Amount),
        to: Address,
    ) {
        tracing::info!(
            pair = %self.address,
            %sender,
            %amount0_in,
            %amount1_in,
            %amount0_out,
            %amount1_out,
            %to,
            "swap"
        );
        self.events.emit(PairEvent::Swap {
            sender,
            amount0_in,
            amount1_in,
            amount0_out,
            amount1_out,
            to,
        });
    }

    /// Sets the reserves to the pair's live balances.
    fn sync(&self, token0: &dyn FungibleToken, token1: &dyn FungibleToken) {
        let reserves = Reserves::new(
            token0.balance_of(&self.address),
            token1.balance_of(&self.address),
        );
        self.state.write().reserves = reserves;
        tracing::debug!(
            pair = %self.address,
            reserve0 = %reserves.reserve0,
            reserve1 = %reserves.reserve1,
            "reserves synced"
        );
    }
}

/// A payout refused by `token` after `paid0` of `token0` already left
/// the pair.
struct Refusal {
    token: Address,
    paid0: Amount,
}

impl core::fmt::Debug for Pair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.state.read();
        f.debug_struct("Pair")
            .field("address", &self.address)
            .field("factory", &self.factory)
            .field("status", &state.status)
            .field("reserves", &state.reserves)
            .field("total_shares", &state.shares.total())
            .finish_non_exhaustive()
    }
}
