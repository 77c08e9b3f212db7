//! Property-based tests for pair invariants under random operation
//! sequences.
//!
//! 1. **Share conservation**: the sum of all share balances equals the
//!    total supply after every operation.
//! 2. **Solvency**: each reserve stays at or below the pair's balance of
//!    that token.
//! 3. **Product growth**: a successful swap never lowers
//!    `reserve0 × reserve1`.
//! 4. **No free lunch**: depositing then withdrawing the same shares never
//!    returns more than was put in.

use std::sync::Arc;

use alloy_primitives::U256;
use proptest::prelude::*;

use super::Pair;
use crate::config::PairConfig;
use crate::domain::{Address, Amount, Shares};
use crate::token::{FungibleToken, InMemoryToken, TokenBook};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const PAIR: u8 = 0xee;
const USERS: [u8; 3] = [0xa1, 0xb0, 0xc0];

struct World {
    pair: Pair,
    token0: Arc<InMemoryToken>,
    token1: Arc<InMemoryToken>,
}

fn addr(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

fn world() -> World {
    let book = Arc::new(TokenBook::new());
    let token0 = Arc::new(InMemoryToken::new(addr(1), "Token0", "TK0", 18));
    let token1 = Arc::new(InMemoryToken::new(addr(2), "Token1", "TK1", 18));
    book.register(token0.clone());
    book.register(token1.clone());
    for user in USERS {
        for token in [&token0, &token1] {
            let Ok(()) = token.mint(addr(user), Amount::from(u128::MAX >> 8)) else {
                panic!("mint");
            };
            token.approve(addr(user), addr(PAIR), Amount::MAX);
        }
    }
    let pair = Pair::new(addr(PAIR), addr(0xfa), PairConfig::default(), book);
    let Ok(()) = pair.initialize(addr(1), addr(2)) else {
        panic!("initialize");
    };
    World {
        pair,
        token0,
        token1,
    }
}

#[derive(Debug, Clone)]
enum Op {
    Add { user: usize, amount0: u64, amount1: u64 },
    Remove { user: usize, percent: u8 },
    Swap { user: usize, zero_for_one: bool, amount_in: u64 },
    Transfer { from: usize, to: usize, percent: u8 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let user = 0..USERS.len();
    prop_oneof![
        (user.clone(), 1u64..=u64::MAX, 1u64..=u64::MAX)
            .prop_map(|(user, amount0, amount1)| Op::Add { user, amount0, amount1 }),
        (user.clone(), 1u8..=100).prop_map(|(user, percent)| Op::Remove { user, percent }),
        (user.clone(), any::<bool>(), 1u64..=u64::MAX).prop_map(
            |(user, zero_for_one, amount_in)| Op::Swap {
                user,
                zero_for_one,
                amount_in
            }
        ),
        (user.clone(), user, 1u8..=100)
            .prop_map(|(from, to, percent)| Op::Transfer { from, to, percent }),
    ]
}

fn percent_of(shares: Shares, percent: u8) -> Shares {
    Shares::new(shares.get() * U256::from(percent) / U256::from(100u8))
}

/// Applies `op`, returning whether it was a swap that succeeded.
fn apply(world: &World, op: &Op) -> bool {
    let pair = &world.pair;
    match *op {
        Op::Add {
            user,
            amount0,
            amount1,
        } => {
            let _ = pair.add_liquidity(
                addr(USERS[user]),
                Amount::from(amount0),
                Amount::from(amount1),
            );
            false
        }
        Op::Remove { user, percent } => {
            let owner = addr(USERS[user]);
            let _ = pair.remove_liquidity(owner, percent_of(pair.balance_of(&owner), percent));
            false
        }
        Op::Swap {
            user,
            zero_for_one,
            amount_in,
        } => {
            let trader = addr(USERS[user]);
            let (token_in, token_in_addr) = if zero_for_one {
                (&world.token0, addr(1))
            } else {
                (&world.token1, addr(2))
            };
            let amount_in = Amount::from(amount_in);
            let Ok(out) = pair.quote_out(token_in_addr, amount_in) else {
                return false;
            };
            if !token_in.transfer(trader, addr(PAIR), amount_in) {
                return false;
            }
            let (out0, out1) = if zero_for_one {
                (Amount::ZERO, out)
            } else {
                (out, Amount::ZERO)
            };
            pair.swap(trader, out0, out1, trader).is_ok()
        }
        Op::Transfer { from, to, percent } => {
            let owner = addr(USERS[from]);
            let shares = percent_of(pair.balance_of(&owner), percent);
            let _ = pair.transfer_shares(owner, addr(USERS[to]), shares);
            false
        }
    }
}

fn share_sum(pair: &Pair) -> Shares {
    let state = pair.state().read();
    state.shares.balances().fold(Shares::ZERO, |acc, (_, balance)| {
        let Some(sum) = acc.checked_add(balance) else {
            panic!("share sum overflow");
        };
        sum
    })
}

// ---------------------------------------------------------------------------
// Properties 1–3: conservation, solvency, product growth
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_invariants_hold_under_random_operations(
        ops in prop::collection::vec(op_strategy(), 1..40),
    ) {
        let world = world();
        for op in &ops {
            let before = world.pair.get_reserves().product();
            let swapped = apply(&world, op);
            let reserves = world.pair.get_reserves();

            prop_assert_eq!(share_sum(&world.pair), world.pair.total_supply(), "after {:?}", op);
            prop_assert!(reserves.reserve0 <= world.token0.balance_of(&addr(PAIR)));
            prop_assert!(reserves.reserve1 <= world.token1.balance_of(&addr(PAIR)));
            if swapped {
                prop_assert!(reserves.product() >= before, "product fell after {:?}", op);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: deposit then withdraw never profits
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_trip_never_profits(
        seed0 in 1_000_000u64..=u64::MAX,
        seed1 in 1_000_000u64..=u64::MAX,
        amount0 in 1u64..=u64::MAX,
        amount1 in 1u64..=u64::MAX,
    ) {
        let world = world();
        let pair = &world.pair;
        let Ok(_) = pair.add_liquidity(addr(USERS[0]), Amount::from(seed0), Amount::from(seed1))
        else {
            return Ok(());
        };
        let Ok(shares) =
            pair.add_liquidity(addr(USERS[1]), Amount::from(amount0), Amount::from(amount1))
        else {
            return Ok(());
        };
        let Ok((out0, out1)) = pair.remove_liquidity(addr(USERS[1]), shares) else {
            panic!("holder can always withdraw fresh shares");
        };
        prop_assert!(out0 <= Amount::from(amount0));
        prop_assert!(out1 <= Amount::from(amount1));
    }
}
