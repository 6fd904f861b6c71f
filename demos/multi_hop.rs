//! Multi-hop routing example.
//!
//! Demonstrates creating pools through the factory, providing liquidity
//! with a native leg, quoting a two-hop route, executing it with a
//! minimum-output guard, and delivering the same swap through a loopback
//! bridge.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=hydra_swap=debug cargo run --example multi_hop
//! ```

use alloy_primitives::{Address, B256};
use hydra_swap::domain::{Amount, CallContext, Decimals, FeeTier, Rounding, Token};
use hydra_swap::error::BridgeError;
use hydra_swap::factory::SwapFactory;
use hydra_swap::ledger::InMemoryLedger;
use hydra_swap::router::{Route, SwapInstruction, SwapRouter};
use hydra_swap::traits::{BridgeEndpoint, ChainSelector, InboundMessage, MessageId, TokenLedger};
use tracing_subscriber::EnvFilter;

/// Delivers every message back to this chain.
struct Loopback {
    address: Address,
    inbox: Vec<InboundMessage>,
}

impl BridgeEndpoint for Loopback {
    fn address(&self) -> Address {
        self.address
    }

    fn send(
        &mut self,
        destination: ChainSelector,
        receiver: Address,
        payload: Vec<u8>,
    ) -> Result<MessageId, BridgeError> {
        let id = B256::left_padding_from(&(self.inbox.len() as u64 + 1).to_be_bytes());
        self.inbox.push(InboundMessage {
            id,
            source: destination,
            sender: receiver,
            payload,
        });
        Ok(id)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Multi-hop routing: USDC -> WETH -> native ===\n");

    // ── 1. Tokens and balances ──────────────────────────────────────────
    let usdc_at = Address::repeat_byte(0x11);
    let weth_at = Address::repeat_byte(0x22);
    let (usdc, weth) = (Token::Contract(usdc_at), Token::Contract(weth_at));

    let lp = Address::repeat_byte(0x01);
    let trader = Address::repeat_byte(0x02);
    let router_at = Address::repeat_byte(0xee);
    let bridge_at = Address::repeat_byte(0xb1);

    let mut ledger = InMemoryLedger::new();
    ledger.register_token(usdc_at, Decimals::new(6)?)?;
    ledger.register_token(weth_at, Decimals::MAX)?;
    let usdc_dec = ledger.decimals(usdc)?;
    let weth_dec = ledger.decimals(weth)?;
    let native_dec = ledger.decimals(Token::Native)?;
    ledger.mint(usdc, lp, usdc_dec.scale_up(10_000_000))?;
    ledger.mint(weth, lp, weth_dec.scale_up(10_000))?;
    ledger.mint(Token::Native, lp, native_dec.scale_up(10_000))?;
    ledger.mint(usdc, trader, usdc_dec.scale_up(50_000))?;

    // ── 2. Pools ────────────────────────────────────────────────────────
    let factory = SwapFactory::new(Address::repeat_byte(0xf0), lp);
    let usdc_weth = factory.create_pool(usdc, weth, FeeTier::MEDIUM)?;
    let weth_native = factory.create_pool(weth, Token::Native, FeeTier::LOW)?;
    println!("USDC/WETH pool:   {}", usdc_weth.address());
    println!("WETH/native pool: {}", weth_native.address());

    for pool in [&usdc_weth, &weth_native] {
        ledger.approve(weth_at, lp, pool.address(), Amount::MAX)?;
    }
    ledger.approve(usdc_at, lp, usdc_weth.address(), Amount::MAX)?;

    // 3 000 000 USDC against 1 000 WETH
    usdc_weth.add_liquidity(
        &mut ledger,
        CallContext::new(lp),
        usdc_dec.scale_up(3_000_000),
        weth_dec.scale_up(1_000),
    )?;
    // 1 000 WETH against 1 000 native, value attached
    let native_leg = native_dec.scale_up(1_000);
    weth_native.add_liquidity(
        &mut ledger,
        CallContext::new(lp).with_value(native_leg),
        weth_dec.scale_up(1_000),
        native_leg,
    )?;

    // ── 3. Quote ────────────────────────────────────────────────────────
    let router = SwapRouter::new(router_at);
    router.initialize(lp, &factory, bridge_at)?;

    let route = Route::new(vec![usdc, weth, Token::Native], vec![FeeTier::MEDIUM, FeeTier::LOW])?;
    let amount_in = usdc_dec.scale_up(10_000);
    let quoted = router.get_amounts_out(amount_in, &route)?;
    println!("\n--- Quote for {} USDC ---", usdc_dec.format(amount_in));
    println!("  WETH after hop 1:   {}", weth_dec.format(quoted[1]));
    println!("  native after hop 2: {}", native_dec.format(quoted[2]));

    // ── 4. Execute with 0.5% slippage tolerance ─────────────────────────
    let Some(min_out) = quoted[2]
        .checked_mul(&Amount::new(995))
        .and_then(|v| v.checked_div(&Amount::new(1_000), Rounding::Down))
    else {
        return Err("minimum output overflowed".into());
    };
    ledger.approve(usdc_at, trader, router_at, amount_in)?;
    let out = router.swap_exact_tokens_for_tokens(
        &mut ledger,
        CallContext::new(trader),
        amount_in,
        min_out,
        &route,
        trader,
    )?;
    println!("\n--- Executed ---");
    println!("  received: {} native (min {})", native_dec.format(out), native_dec.format(min_out));
    let usdc_left = ledger.balance_of(usdc, trader);
    println!(
        "  trader USDC left: {} ({} whole)",
        usdc_dec.format(usdc_left),
        usdc_dec.scale_down(usdc_left)
    );

    // ── 5. A demanding minimum reverts everything ───────────────────────
    let before = usdc_weth.details()?;
    ledger.approve(usdc_at, trader, router_at, amount_in)?;
    let rejected = router.swap_exact_tokens_for_tokens(
        &mut ledger,
        CallContext::new(trader),
        amount_in,
        quoted[2],
        &route,
        trader,
    );
    println!("\n--- Re-running with the stale quote as minimum ---");
    match rejected {
        Ok(v) => println!("  unexpectedly filled: {v}"),
        Err(e) => println!("  rejected: {e}"),
    }
    println!("  reserves unchanged: {}", usdc_weth.details()? == before);

    // ── 6. The same swap delivered through a bridge ─────────────────────
    let mut bridge = Loopback {
        address: bridge_at,
        inbox: Vec::new(),
    };
    let instruction = SwapInstruction::new(amount_in, Amount::ZERO, &route, trader);
    let id = router.cross_chain_swap(&mut bridge, trader, ChainSelector(1), router_at, &instruction)?;
    println!("\n--- Bridged instruction {id} ---");

    ledger.transfer(usdc_at, trader, router_at, amount_in)?;
    for message in bridge.inbox.drain(..) {
        let delivered = router.ccip_receive(&mut ledger, bridge_at, &message)?;
        println!("  delivered {} native to {trader}", native_dec.format(delivered));
    }

    println!("\nRouter events: {}", serde_json::to_string_pretty(&router.events())?);
    Ok(())
}
