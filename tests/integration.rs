//! Integration tests exercising the full system from factory to pair.
//!
//! These tests verify end-to-end flows through the public API:
//! pair creation and lookup, the liquidity and trading lifecycle,
//! reentrancy protection, non-standard tokens, configuration loading,
//! and concurrent use from several threads.

#![allow(clippy::panic)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::thread;

use alloy_primitives::U256;
use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

use ezswap_core::config::{FactoryConfig, MINIMUM_LIQUIDITY};
use ezswap_core::domain::{Address, Amount, FactoryEvent, PairEvent, Reserves, Shares};
use ezswap_core::error::AmmError;
use ezswap_core::factory::PairFactory;
use ezswap_core::pair::Pair;
use ezswap_core::token::{FungibleToken, InMemoryToken, TokenBook};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const ALICE: u8 = 0xa1;
const BOB: u8 = 0xb0;
const CAROL: u8 = 0xc0;

fn addr(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

fn ether(n: u128) -> Amount {
    Amount::new(U256::from(n) * U256::from(10u64).pow(U256::from(18u64)))
}

fn raw(n: u128) -> Amount {
    Amount::from(n)
}

fn shares(n: u128) -> Shares {
    Shares::from(n)
}

struct World {
    factory: PairFactory,
    book: Arc<TokenBook>,
    token_a: Arc<InMemoryToken>,
    token_b: Arc<InMemoryToken>,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn world() -> World {
    init_tracing();
    let book = Arc::new(TokenBook::new());
    let token_a = Arc::new(InMemoryToken::new(addr(1), "Token A", "TKA", 18));
    let token_b = Arc::new(InMemoryToken::new(addr(2), "Token B", "TKB", 18));
    book.register(token_a.clone());
    book.register(token_b.clone());
    let factory = PairFactory::with_defaults(book.clone());
    World {
        factory,
        book,
        token_a,
        token_b,
    }
}

fn create(factory: &PairFactory, a: Address, b: Address) -> Arc<Pair> {
    let Ok(address) = factory.create_pair(a, b) else {
        panic!("create_pair");
    };
    let Some(pair) = factory.pair(&address) else {
        panic!("pair indexed");
    };
    pair
}

fn fund(token: &dyn FungibleToken, minter: &InMemoryToken, user: Address, pair: Address) {
    let Ok(()) = minter.mint(user, ether(1_000_000)) else {
        panic!("mint");
    };
    assert!(token.approve(user, pair, Amount::MAX));
}

fn funded_pair(world: &World) -> Arc<Pair> {
    let pair = create(&world.factory, world.token_a.address(), world.token_b.address());
    for user in [ALICE, BOB, CAROL] {
        fund(world.token_a.as_ref(), &world.token_a, addr(user), pair.address());
        fund(world.token_b.as_ref(), &world.token_b, addr(user), pair.address());
    }
    pair
}

fn assert_solvent(pair: &Pair, token0: &dyn FungibleToken, token1: &dyn FungibleToken) {
    let reserves = pair.get_reserves();
    assert!(reserves.reserve0 <= token0.balance_of(&pair.address()));
    assert!(reserves.reserve1 <= token1.balance_of(&pair.address()));
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

#[test]
fn factory_creates_one_pair_per_unordered_token_pair() {
    let w = world();
    let (a, b) = (w.token_a.address(), w.token_b.address());

    let Ok(pair) = w.factory.create_pair(b, a) else {
        panic!("create_pair");
    };
    assert_eq!(w.factory.get_pair(a, b), pair);
    assert_eq!(w.factory.get_pair(b, a), pair);
    assert_eq!(w.factory.create_pair(a, b), Err(AmmError::PairExists));
    assert_eq!(w.factory.all_pairs_length(), 1);
    assert_eq!(w.factory.all_pairs(0), Ok(pair));
    assert_eq!(
        w.factory.events(),
        vec![FactoryEvent::PairCreated {
            token0: a,
            token1: b,
            pair,
        }]
    );
}

#[test]
fn created_pairs_are_initialized_and_reject_reinitialization() {
    let w = world();
    let pair = create(&w.factory, w.token_b.address(), w.token_a.address());
    assert!(pair.is_initialized());
    assert_eq!(pair.token0(), w.token_a.address());
    assert_eq!(pair.token1(), w.token_b.address());
    assert_eq!(pair.factory(), w.factory.address());
    assert_eq!(
        pair.initialize(w.token_a.address(), w.token_b.address()),
        Err(AmmError::AlreadyInitialized)
    );
}

#[test]
fn factory_rejects_invalid_token_pairs() {
    let w = world();
    let a = w.token_a.address();
    assert_eq!(w.factory.create_pair(a, a), Err(AmmError::IdenticalAddresses));
    assert_eq!(
        w.factory.create_pair(a, Address::ZERO),
        Err(AmmError::ZeroAddress)
    );
    assert_eq!(w.factory.get_pair(a, addr(9)), Address::ZERO);
    assert_eq!(
        w.factory.all_pairs(0),
        Err(AmmError::IndexOutOfBounds {
            index: 0,
            length: 0
        })
    );
}

#[test]
fn pairs_over_unregistered_tokens_fail_on_first_transfer() {
    let w = world();
    let pair = create(&w.factory, w.token_a.address(), addr(0x77));
    fund(w.token_a.as_ref(), &w.token_a, addr(ALICE), pair.address());
    assert_eq!(
        pair.add_liquidity(addr(ALICE), ether(1), ether(1)),
        Err(AmmError::UnknownToken(addr(0x77)))
    );
    assert_eq!(w.token_a.balance_of(&addr(ALICE)), ether(1_000_000));
}

// ---------------------------------------------------------------------------
// Liquidity and trading lifecycle
// ---------------------------------------------------------------------------

#[test]
fn first_deposit_mints_geometric_mean_minus_locked_liquidity() {
    let w = world();
    let pair = funded_pair(&w);

    let Ok(issued) = pair.add_liquidity(addr(ALICE), ether(100), ether(200)) else {
        panic!("first deposit");
    };
    assert_eq!(issued, shares(141_421_356_237_309_503_880));
    assert_eq!(pair.balance_of(&Address::ZERO), Shares::from(MINIMUM_LIQUIDITY));
    assert_eq!(pair.total_supply(), shares(141_421_356_237_309_504_880));
    assert_eq!(pair.get_reserves(), Reserves::new(ether(100), ether(200)));
    assert_eq!(
        pair.last_event(),
        Some(PairEvent::LiquidityAdded {
            provider: addr(ALICE),
            amount0: ether(100),
            amount1: ether(200),
            shares_issued: issued,
        })
    );
}

#[test]
fn proportional_deposit_and_full_withdrawal() {
    let w = world();
    let pair = funded_pair(&w);
    let Ok(_) = pair.add_liquidity(addr(ALICE), ether(100), ether(200)) else {
        panic!("first deposit");
    };

    let Ok(bob_shares) = pair.add_liquidity(addr(BOB), ether(10), ether(20)) else {
        panic!("second deposit");
    };
    assert_eq!(bob_shares, shares(14_142_135_623_730_950_488));
    assert_eq!(pair.get_reserves(), Reserves::new(ether(110), ether(220)));

    let Ok((out0, out1)) = pair.remove_liquidity(addr(BOB), bob_shares) else {
        panic!("withdrawal");
    };
    assert_eq!((out0, out1), (ether(10), ether(20)));
    assert_eq!(pair.balance_of(&addr(BOB)), Shares::ZERO);
    assert_eq!(w.token_a.balance_of(&addr(BOB)), ether(1_000_000));
    assert_eq!(w.token_b.balance_of(&addr(BOB)), ether(1_000_000));
    assert_eq!(pair.get_reserves(), Reserves::new(ether(100), ether(200)));
}

#[test]
fn unbalanced_deposit_donates_excess_to_pool() {
    let w = world();
    let pair = funded_pair(&w);
    let Ok(_) = pair.add_liquidity(addr(ALICE), ether(100), ether(200)) else {
        panic!("first deposit");
    };
    let Ok(bob_shares) = pair.add_liquidity(addr(BOB), ether(10), ether(100)) else {
        panic!("unbalanced deposit");
    };
    assert_eq!(bob_shares, shares(14_142_135_623_730_950_488));
    assert_eq!(pair.get_reserves(), Reserves::new(ether(110), ether(300)));

    let Ok((out0, out1)) = pair.remove_liquidity(addr(BOB), bob_shares) else {
        panic!("withdrawal");
    };
    assert!(out0 <= ether(10));
    assert!(out1 < ether(100));
}

#[test]
fn swaps_in_both_directions_follow_quotes() {
    let w = world();
    let pair = funded_pair(&w);
    let Ok(_) = pair.add_liquidity(addr(ALICE), ether(100), ether(200)) else {
        panic!("first deposit");
    };
    let before = pair.get_reserves().product();

    // token0 -> token1
    let Ok(out1) = pair.quote_out(w.token_a.address(), ether(1)) else {
        panic!("quote");
    };
    assert_eq!(out1, raw(1_980_198_019_801_980_198));
    assert!(w.token_a.transfer(addr(BOB), pair.address(), ether(1)));
    let Ok(()) = pair.swap(addr(BOB), Amount::ZERO, out1, addr(CAROL)) else {
        panic!("swap 0 -> 1");
    };
    assert_eq!(
        w.token_b.balance_of(&addr(CAROL)),
        ether(1_000_000).checked_add(&out1).unwrap_or(Amount::MAX)
    );
    assert_eq!(
        pair.last_event(),
        Some(PairEvent::Swap {
            sender: addr(BOB),
            amount0_in: ether(1),
            amount1_in: Amount::ZERO,
            amount0_out: Amount::ZERO,
            amount1_out: out1,
            to: addr(CAROL),
        })
    );

    // token1 -> token0
    let Ok(out0) = pair.quote_out(w.token_b.address(), ether(4)) else {
        panic!("quote");
    };
    assert!(w.token_b.transfer(addr(BOB), pair.address(), ether(4)));
    let Ok(()) = pair.swap(addr(BOB), out0, Amount::ZERO, addr(BOB)) else {
        panic!("swap 1 -> 0");
    };

    assert!(pair.get_reserves().product() >= before);
    assert_solvent(&pair, w.token_a.as_ref(), w.token_b.as_ref());
    assert_eq!(pair.events().len(), 3);
}

#[test]
fn exact_output_swap_with_rounded_up_input() {
    let w = world();
    let pair = funded_pair(&w);
    let Ok(_) = pair.add_liquidity(addr(ALICE), ether(100), ether(200)) else {
        panic!("first deposit");
    };
    let Ok(needed) = pair.quote_in(w.token_a.address(), ether(1)) else {
        panic!("quote");
    };
    assert_eq!(needed, raw(502_512_562_814_070_351));
    let Some(input) = needed.checked_add(&raw(1)) else {
        panic!("no overflow");
    };
    assert!(w.token_a.transfer(addr(BOB), pair.address(), input));
    assert_eq!(pair.swap(addr(BOB), Amount::ZERO, ether(1), addr(BOB)), Ok(()));
}

#[test]
fn swap_failures_leave_state_untouched() {
    let w = world();
    let pair = funded_pair(&w);
    let Ok(_) = pair.add_liquidity(addr(ALICE), ether(100), ether(200)) else {
        panic!("first deposit");
    };
    let reserves = pair.get_reserves();
    let events = pair.events().len();

    assert_eq!(
        pair.swap(addr(BOB), Amount::ZERO, ether(1), addr(BOB)),
        Err(AmmError::InsufficientInputAmount)
    );
    assert_eq!(
        pair.swap(addr(BOB), Amount::ZERO, Amount::ZERO, addr(BOB)),
        Err(AmmError::ZeroAmount)
    );
    assert_eq!(
        pair.swap(addr(BOB), ether(101), Amount::ZERO, addr(BOB)),
        Err(AmmError::InsufficientLiquidity)
    );

    assert!(w.token_a.transfer(addr(BOB), pair.address(), ether(1)));
    assert_eq!(
        pair.swap(addr(BOB), Amount::ZERO, ether(2), addr(BOB)),
        Err(AmmError::KInvariant)
    );

    assert_eq!(pair.get_reserves(), reserves);
    assert_eq!(pair.events().len(), events);
    assert_eq!(w.token_b.balance_of(&addr(BOB)), ether(1_000_000));
}

#[test]
fn donation_is_absorbed_by_next_swap() {
    let w = world();
    let pair = funded_pair(&w);
    let Ok(_) = pair.add_liquidity(addr(ALICE), ether(100), ether(100)) else {
        panic!("first deposit");
    };
    assert!(w.token_b.transfer(addr(CAROL), pair.address(), ether(5)));
    assert_eq!(pair.get_reserves(), Reserves::new(ether(100), ether(100)));

    assert!(w.token_a.transfer(addr(BOB), pair.address(), ether(1)));
    let Ok(()) = pair.swap(addr(BOB), Amount::ZERO, raw(1), addr(BOB)) else {
        panic!("swap");
    };
    let reserves = pair.get_reserves();
    assert_eq!(reserves.reserve0, w.token_a.balance_of(&pair.address()));
    assert_eq!(reserves.reserve1, w.token_b.balance_of(&pair.address()));
}

#[test]
fn minimum_liquidity_stays_locked_forever() {
    let w = world();
    let pair = funded_pair(&w);
    let Ok(issued) = pair.add_liquidity(addr(ALICE), raw(1_000_000), raw(1_000_000)) else {
        panic!("first deposit");
    };
    let Ok(_) = pair.remove_liquidity(addr(ALICE), issued) else {
        panic!("withdrawal");
    };
    assert_eq!(pair.total_supply(), Shares::from(MINIMUM_LIQUIDITY));
    assert_eq!(pair.get_reserves(), Reserves::new(raw(1_000), raw(1_000)));
    assert_eq!(
        pair.remove_liquidity(Address::ZERO, Shares::from(MINIMUM_LIQUIDITY)),
        Err(AmmError::ZeroAddress)
    );
}

// ---------------------------------------------------------------------------
// Liquidity shares as a token
// ---------------------------------------------------------------------------

#[test]
fn shares_move_between_holders_and_redeem() {
    let w = world();
    let pair = funded_pair(&w);
    let Ok(issued) = pair.add_liquidity(addr(ALICE), ether(100), ether(100)) else {
        panic!("first deposit");
    };

    assert!(pair.approve(addr(ALICE), addr(BOB), issued.as_amount()));
    assert!(pair.transfer_from(addr(BOB), addr(ALICE), addr(CAROL), issued.as_amount()));
    assert_eq!(pair.balance_of(&addr(ALICE)), Shares::ZERO);
    assert_eq!(pair.allowance(&addr(ALICE), &addr(BOB)), Shares::ZERO);

    let Ok((out0, out1)) = pair.remove_liquidity(addr(CAROL), issued) else {
        panic!("redeem");
    };
    assert!(out0 > Amount::ZERO && out1 > Amount::ZERO);
    assert_eq!(
        pair.remove_liquidity(addr(ALICE), shares(1)),
        Err(AmmError::InsufficientLiquidityBalance)
    );
}

#[test]
fn pair_can_be_registered_as_a_token() {
    let w = world();
    let pair = funded_pair(&w);
    let Ok(issued) = pair.add_liquidity(addr(ALICE), ether(100), ether(100)) else {
        panic!("first deposit");
    };
    w.book.register(pair.clone());

    let lp: Arc<dyn FungibleToken> = pair.clone();
    assert_eq!(lp.address(), pair.address());
    assert_eq!(lp.balance_of(&addr(ALICE)), issued.as_amount());
    assert!(lp.transfer(addr(ALICE), addr(BOB), raw(10)));
    assert_eq!(pair.balance_of(&addr(BOB)), shares(10));
}

// ---------------------------------------------------------------------------
// Reentrancy
// ---------------------------------------------------------------------------

/// Token that calls back into its pair while a deposit pulls from it.
struct ReentrantToken {
    inner: InMemoryToken,
    pair: Mutex<Weak<Pair>>,
    attack: Mutex<Option<Result<Shares, AmmError>>>,
}

impl ReentrantToken {
    fn new(address: Address) -> Self {
        Self {
            inner: InMemoryToken::new(address, "Reentrant", "REE", 18),
            pair: Mutex::new(Weak::new()),
            attack: Mutex::new(None),
        }
    }

    fn target(&self, pair: &Arc<Pair>) {
        *self.pair.lock() = Arc::downgrade(pair);
    }
}

impl FungibleToken for ReentrantToken {
    fn address(&self) -> Address {
        self.inner.address()
    }

    fn balance_of(&self, owner: &Address) -> Amount {
        self.inner.balance_of(owner)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.inner.allowance(owner, spender)
    }

    fn transfer(&self, from: Address, to: Address, amount: Amount) -> bool {
        self.inner.transfer(from, to, amount)
    }

    fn approve(&self, owner: Address, spender: Address, amount: Amount) -> bool {
        self.inner.approve(owner, spender, amount)
    }

    fn transfer_from(&self, spender: Address, owner: Address, to: Address, amount: Amount) -> bool {
        let pair = self.pair.lock().upgrade();
        if let Some(pair) = pair {
            let result = pair.add_liquidity(owner, amount, amount);
            *self.attack.lock() = Some(result);
        }
        self.inner.transfer_from(spender, owner, to, amount)
    }
}

#[test]
fn reentrant_calls_are_rejected() {
    init_tracing();
    let book = Arc::new(TokenBook::new());
    let hostile = Arc::new(ReentrantToken::new(addr(1)));
    let honest = Arc::new(InMemoryToken::new(addr(2), "Honest", "HON", 18));
    book.register(hostile.clone());
    book.register(honest.clone());
    let factory = PairFactory::with_defaults(book);
    let pair = create(&factory, hostile.address(), honest.address());
    hostile.target(&pair);

    fund(hostile.as_ref(), &hostile.inner, addr(ALICE), pair.address());
    fund(honest.as_ref(), &honest, addr(ALICE), pair.address());

    let Ok(_) = pair.add_liquidity(addr(ALICE), ether(10), ether(10)) else {
        panic!("outer deposit");
    };
    assert_eq!(*hostile.attack.lock(), Some(Err(AmmError::Locked)));
    assert_eq!(pair.events().len(), 1);
    assert_eq!(pair.get_reserves(), Reserves::new(ether(10), ether(10)));
}

// ---------------------------------------------------------------------------
// Non-standard tokens
// ---------------------------------------------------------------------------

/// Token whose outgoing `transfer` can be switched off.
struct FreezableToken {
    inner: InMemoryToken,
    frozen: AtomicBool,
}

impl FungibleToken for FreezableToken {
    fn address(&self) -> Address {
        self.inner.address()
    }

    fn balance_of(&self, owner: &Address) -> Amount {
        self.inner.balance_of(owner)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.inner.allowance(owner, spender)
    }

    fn transfer(&self, from: Address, to: Address, amount: Amount) -> bool {
        !self.frozen.load(Ordering::SeqCst) && self.inner.transfer(from, to, amount)
    }

    fn approve(&self, owner: Address, spender: Address, amount: Amount) -> bool {
        self.inner.approve(owner, spender, amount)
    }

    fn transfer_from(&self, spender: Address, owner: Address, to: Address, amount: Amount) -> bool {
        self.inner.transfer_from(spender, owner, to, amount)
    }
}

struct FreezeWorld {
    pair: Arc<Pair>,
    plain: Arc<InMemoryToken>,
    frozen: Arc<FreezableToken>,
}

/// Pair over a plain token and a freezable one, seeded 10e18 / 10e18 by
/// Alice.
fn freeze_world(plain_byte: u8, frozen_byte: u8) -> FreezeWorld {
    init_tracing();
    let book = Arc::new(TokenBook::new());
    let plain = Arc::new(InMemoryToken::new(addr(plain_byte), "Plain", "PLN", 18));
    let frozen = Arc::new(FreezableToken {
        inner: InMemoryToken::new(addr(frozen_byte), "Frozen", "FRZ", 18),
        frozen: AtomicBool::new(false),
    });
    book.register(plain.clone());
    book.register(frozen.clone());
    let factory = PairFactory::with_defaults(book);
    let pair = create(&factory, plain.address(), frozen.address());
    for user in [ALICE, BOB] {
        fund(plain.as_ref(), &plain, addr(user), pair.address());
        fund(frozen.as_ref(), &frozen.inner, addr(user), pair.address());
    }
    let Ok(_) = pair.add_liquidity(addr(ALICE), ether(10), ether(10)) else {
        panic!("deposit");
    };
    FreezeWorld {
        pair,
        plain,
        frozen,
    }
}

#[test]
fn refused_first_payout_changes_nothing() {
    let w = freeze_world(2, 1);
    let issued = w.pair.balance_of(&addr(ALICE));
    let reserves = w.pair.get_reserves();
    w.frozen.frozen.store(true, Ordering::SeqCst);

    for _ in 0..3 {
        assert_eq!(
            w.pair.remove_liquidity(addr(ALICE), issued),
            Err(AmmError::TransferFailed {
                token: w.frozen.address()
            })
        );
    }
    assert_eq!(w.pair.balance_of(&addr(ALICE)), issued);
    assert_eq!(w.pair.get_reserves(), reserves);
    assert_eq!(w.plain.balance_of(&addr(ALICE)), ether(999_990));
    assert_eq!(w.frozen.balance_of(&addr(ALICE)), ether(999_990));
    assert_eq!(w.pair.events().len(), 1);
}

#[test]
fn refused_second_payout_burns_shares_for_what_was_paid() {
    let w = freeze_world(1, 2);
    let issued = w.pair.balance_of(&addr(ALICE));
    w.frozen.frozen.store(true, Ordering::SeqCst);

    assert_eq!(
        w.pair.remove_liquidity(addr(ALICE), issued),
        Err(AmmError::TransferFailed {
            token: w.frozen.address()
        })
    );
    let paid0 = raw(9_999_999_999_999_999_000);
    assert_eq!(w.pair.balance_of(&addr(ALICE)), Shares::ZERO);
    assert_eq!(w.pair.total_supply(), Shares::from(MINIMUM_LIQUIDITY));
    let Some(expected) = ether(999_990).checked_add(&paid0) else {
        panic!("no overflow");
    };
    assert_eq!(w.plain.balance_of(&addr(ALICE)), expected);
    assert_eq!(w.pair.get_reserves(), Reserves::new(raw(1_000), ether(10)));
    assert_solvent(&w.pair, w.plain.as_ref(), w.frozen.as_ref());
    assert_eq!(
        w.pair.last_event(),
        Some(PairEvent::LiquidityRemoved {
            provider: addr(ALICE),
            amount0_out: paid0,
            amount1_out: Amount::ZERO,
            shares_burned: issued,
        })
    );

    // Nothing left to redeem, so the pool cannot be drained by repeating.
    assert_eq!(
        w.pair.remove_liquidity(addr(ALICE), issued),
        Err(AmmError::InsufficientLiquidityBalance)
    );
    assert_eq!(w.pair.get_reserves(), Reserves::new(raw(1_000), ether(10)));
}

#[test]
fn refused_second_swap_output_settles_first_output() {
    let w = freeze_world(1, 2);
    w.frozen.frozen.store(true, Ordering::SeqCst);
    assert!(w.plain.transfer(addr(BOB), w.pair.address(), ether(5)));

    assert_eq!(
        w.pair.swap(addr(BOB), ether(1), ether(1), addr(BOB)),
        Err(AmmError::TransferFailed {
            token: w.frozen.address()
        })
    );
    assert_eq!(w.pair.get_reserves(), Reserves::new(ether(14), ether(10)));
    assert_eq!(w.plain.balance_of(&addr(BOB)), ether(999_996));
    assert_eq!(w.frozen.balance_of(&addr(BOB)), ether(1_000_000));
    assert_eq!(
        w.pair.last_event(),
        Some(PairEvent::Swap {
            sender: addr(BOB),
            amount0_in: ether(5),
            amount1_in: Amount::ZERO,
            amount0_out: ether(1),
            amount1_out: Amount::ZERO,
            to: addr(BOB),
        })
    );
}

#[test]
fn swap_to_zero_address_leaves_pending_input_pending() {
    let w = world();
    let pair = funded_pair(&w);
    let Ok(_) = pair.add_liquidity(addr(ALICE), ether(100), ether(100)) else {
        panic!("first deposit");
    };
    assert!(w.token_a.transfer(addr(BOB), pair.address(), ether(1)));

    assert_eq!(
        pair.swap(addr(BOB), Amount::ZERO, raw(1), Address::ZERO),
        Err(AmmError::ZeroAddress)
    );
    assert_eq!(pair.get_reserves(), Reserves::new(ether(100), ether(100)));
    assert_eq!(pair.events().len(), 1);

    let Ok(()) = pair.swap(addr(BOB), Amount::ZERO, raw(1), addr(BOB)) else {
        panic!("pending input still usable");
    };
}

#[test]
fn fee_on_transfer_deposit_credits_what_arrived() {
    init_tracing();
    let book = Arc::new(TokenBook::new());
    let Ok(taxed) = InMemoryToken::new(addr(1), "Taxed", "TAX", 18).with_transfer_fee(100) else {
        panic!("valid fee");
    };
    let taxed = Arc::new(taxed);
    let plain = Arc::new(InMemoryToken::new(addr(2), "Plain", "PLN", 18));
    book.register(taxed.clone());
    book.register(plain.clone());
    let factory = PairFactory::with_defaults(book);
    let pair = create(&factory, taxed.address(), plain.address());
    fund(taxed.as_ref(), &taxed, addr(ALICE), pair.address());
    fund(plain.as_ref(), &plain, addr(ALICE), pair.address());

    let Ok(issued) = pair.add_liquidity(addr(ALICE), raw(1_000_000), raw(1_000_000)) else {
        panic!("deposit");
    };
    assert_eq!(issued, shares(993_987));
    assert_eq!(pair.get_reserves(), Reserves::new(raw(990_000), raw(1_000_000)));
    assert_solvent(&pair, taxed.as_ref(), plain.as_ref());
    assert_eq!(
        pair.last_event(),
        Some(PairEvent::LiquidityAdded {
            provider: addr(ALICE),
            amount0: raw(990_000),
            amount1: raw(1_000_000),
            shares_issued: issued,
        })
    );
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn factory_from_toml_configures_its_pairs() {
    let toml = r#"
        factory_address = "0x00000000000000000000000000000000000000fa"

        [pair]
        lp_name = "Test LP"
        lp_symbol = "TLP"
        minimum_liquidity = 10
    "#;
    let Ok(config) = FactoryConfig::from_toml_str(toml) else {
        panic!("valid toml");
    };
    let w = world();
    let Ok(factory) = PairFactory::new(config, w.book.clone()) else {
        panic!("valid config");
    };
    assert_eq!(factory.address(), Address::with_last_byte(0xfa));

    let pair = create(&factory, w.token_a.address(), w.token_b.address());
    assert_eq!(pair.name(), "Test LP");
    assert_eq!(pair.symbol(), "TLP");
    assert_eq!(pair.decimals(), 18);
    fund(w.token_a.as_ref(), &w.token_a, addr(ALICE), pair.address());
    fund(w.token_b.as_ref(), &w.token_b, addr(ALICE), pair.address());
    let Ok(issued) = pair.add_liquidity(addr(ALICE), raw(100), raw(100)) else {
        panic!("deposit");
    };
    assert_eq!(issued, shares(90));
}

#[test]
fn malformed_configuration_is_rejected() {
    assert!(matches!(
        FactoryConfig::from_toml_str("factory_address = 7"),
        Err(AmmError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        FactoryConfig::from_toml_str("unknown = true"),
        Err(AmmError::InvalidConfiguration(_))
    ));
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn core_types_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PairFactory>();
    assert_send_sync::<Pair>();
    assert_send_sync::<TokenBook>();
    assert_send_sync::<InMemoryToken>();
}

#[test]
fn concurrent_deposits_conserve_shares() {
    let w = world();
    let pair = funded_pair(&w);
    let Ok(_) = pair.add_liquidity(addr(ALICE), ether(100), ether(100)) else {
        panic!("first deposit");
    };

    let handles: Vec<_> = [BOB, CAROL]
        .into_iter()
        .map(|user| {
            let pair = Arc::clone(&pair);
            thread::spawn(move || {
                for _ in 0..20 {
                    let Ok(_) = pair.add_liquidity(addr(user), ether(1), ether(1)) else {
                        panic!("deposit");
                    };
                }
            })
        })
        .collect();
    for handle in handles {
        let Ok(()) = handle.join() else {
            panic!("thread panicked");
        };
    }

    let held = [Address::ZERO, addr(ALICE), addr(BOB), addr(CAROL)]
        .iter()
        .fold(Shares::ZERO, |sum, owner| {
            sum.checked_add(&pair.balance_of(owner)).unwrap_or(Shares::ZERO)
        });
    assert_eq!(held, pair.total_supply());
    assert_eq!(pair.get_reserves(), Reserves::new(ether(140), ether(140)));
    assert_eq!(pair.events().len(), 41);
}
