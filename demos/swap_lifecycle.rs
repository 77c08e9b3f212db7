//! EzSwap lifecycle example.
//!
//! Creates a pair through the factory, seeds it, swaps in both directions,
//! and withdraws, printing reserves along the way. Set `RUST_LOG=debug` to
//! see the pair's own tracing output.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=info cargo run --example swap_lifecycle
//! ```

use std::sync::Arc;

use ezswap_core::domain::{Address, Amount};
use ezswap_core::factory::PairFactory;
use ezswap_core::pair::Pair;
use ezswap_core::token::{FungibleToken, InMemoryToken, TokenBook};
use tracing_subscriber::EnvFilter;

fn print_reserves(label: &str, pair: &Pair) {
    let reserves = pair.get_reserves();
    println!(
        "{label:<24} reserve0 = {:>12}  reserve1 = {:>12}  k = {}",
        reserves.reserve0,
        reserves.reserve1,
        reserves.product()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== EzSwap pair lifecycle (x · y = k, no fee) ===\n");

    // ── 1. Register tokens ──────────────────────────────────────────────
    let book = Arc::new(TokenBook::new());
    let usdc = Arc::new(InMemoryToken::new(Address::repeat_byte(1), "USD Coin", "USDC", 6));
    let weth = Arc::new(InMemoryToken::new(Address::repeat_byte(2), "Wrapped Ether", "WETH", 18));
    book.register(usdc.clone());
    book.register(weth.clone());

    // ── 2. Create the pair ──────────────────────────────────────────────
    let factory = PairFactory::with_defaults(book);
    let address = factory.create_pair(weth.address(), usdc.address())?;
    let pair = factory.pair(&address).ok_or("pair not indexed")?;
    println!("Factory:  {}", factory.address());
    println!("Pair:     {address}");
    println!("token0:   {} ({})", pair.token0(), usdc.symbol());
    println!("token1:   {} ({})\n", pair.token1(), weth.symbol());

    // ── 3. Fund traders ─────────────────────────────────────────────────
    let lp = Address::repeat_byte(0xa1);
    let trader = Address::repeat_byte(0xb0);
    for user in [lp, trader] {
        usdc.mint(user, Amount::from(10_000_000u64))?;
        weth.mint(user, Amount::from(10_000_000u64))?;
        usdc.approve(user, address, Amount::MAX);
        weth.approve(user, address, Amount::MAX);
    }

    // ── 4. Seed liquidity ───────────────────────────────────────────────
    let shares = pair.add_liquidity(lp, Amount::from(1_000_000u64), Amount::from(4_000_000u64))?;
    println!("LP received {shares} shares (total supply {})", pair.total_supply());
    print_reserves("after seeding:", &pair);

    // ── 5. Swap USDC -> WETH ────────────────────────────────────────────
    let amount_in = Amount::from(50_000u64);
    let out = pair.quote_out(usdc.address(), amount_in)?;
    usdc.transfer(trader, address, amount_in);
    pair.swap(trader, Amount::ZERO, out, trader)?;
    println!("\nSold {amount_in} USDC for {out} WETH");
    print_reserves("after swap 0 -> 1:", &pair);

    // ── 6. Swap WETH -> USDC for an exact output ────────────────────────
    let wanted = Amount::from(20_000u64);
    let quoted = pair.quote_in(weth.address(), wanted)?;
    let amount_in = quoted.checked_add(&Amount::from(1u64)).ok_or("quote overflow")?;
    weth.transfer(trader, address, amount_in);
    pair.swap(trader, wanted, Amount::ZERO, trader)?;
    println!("\nBought {wanted} USDC for {amount_in} WETH");
    print_reserves("after swap 1 -> 0:", &pair);

    // ── 7. Withdraw ─────────────────────────────────────────────────────
    let (amount0, amount1) = pair.remove_liquidity(lp, shares)?;
    println!("\nLP withdrew {amount0} USDC and {amount1} WETH");
    print_reserves("after withdrawal:", &pair);

    println!("\nEvents emitted by the pair:");
    for event in pair.events() {
        println!("  {event:?}");
    }
    Ok(())
}
