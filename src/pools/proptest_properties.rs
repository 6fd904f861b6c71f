//! Property-based tests for pool invariants.
//!
//! 1. **Reserves match custody**: after any sequence of operations the
//!    pool's reserves equal its ledger balances.
//! 2. **Liquidity conservation**: provider units always sum to the total.
//! 3. **Full withdrawal**: a sole provider withdrawing everything receives
//!    exactly the reserves.
//! 4. **Proportional withdrawal**: a partial withdrawal pays exactly
//!    `floor(floor(amount × 10^18 / total) × reserve / 10^18)` on each side,
//!    which never exceeds its exact pro-rata share.
//! 5. **Swap monotonicity**: more input never yields less output, and the
//!    output never exceeds the fee-less constant-product bound.
//! 6. **Invariant growth**: `reserve0 × reserve1` never decreases on a swap.
//! 7. **Swap reversibility**: a round trip A→B→A returns at most the input.

use alloy_primitives::{Address, U256};
use proptest::prelude::*;

use super::Pool;
use crate::config::PoolConfig;
use crate::domain::{Amount, CallContext, Decimals, FeeTier, Liquidity, Token};
use crate::ledger::InMemoryLedger;
use crate::math::{get_amount_out, withdrawal_share};
use crate::traits::TokenLedger;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const TKA: Address = Address::repeat_byte(0x0a);
const TKB: Address = Address::repeat_byte(0x0b);
const POOL: Address = Address::repeat_byte(0xcc);
const USERS: [Address; 3] = [
    Address::repeat_byte(0xa1),
    Address::repeat_byte(0xa2),
    Address::repeat_byte(0xa3),
];

fn tok_a() -> Token {
    Token::Contract(TKA)
}

fn tok_b() -> Token {
    Token::Contract(TKB)
}

fn fee(ppm: u32) -> FeeTier {
    let Ok(f) = FeeTier::new(ppm) else {
        panic!("valid fee");
    };
    f
}

fn ledger() -> InMemoryLedger {
    let mut ledger = InMemoryLedger::new();
    for token in [TKA, TKB] {
        let Ok(()) = ledger.register_token(token, Decimals::MAX) else {
            panic!("register");
        };
        for user in USERS {
            let Ok(()) = ledger.mint(Token::Contract(token), user, Amount::new(u128::MAX >> 8))
            else {
                panic!("mint");
            };
            let Ok(()) = ledger.approve(token, user, POOL, Amount::MAX) else {
                panic!("approve");
            };
        }
    }
    ledger
}

fn seeded_pool(l: &mut InMemoryLedger, r0: u128, r1: u128, ppm: u32) -> Pool {
    let Ok(config) = PoolConfig::new(tok_a(), tok_b(), fee(ppm)) else {
        panic!("valid config");
    };
    let mut pool = Pool::new(POOL);
    let Ok(()) = pool.initialize(config) else {
        panic!("initialize");
    };
    let Ok(_) = pool.add_liquidity(l, CallContext::new(USERS[0]), Amount::new(r0), Amount::new(r1))
    else {
        panic!("seed");
    };
    pool
}

fn product(pool: &Pool) -> U256 {
    pool.reserve0().get() * pool.reserve1().get()
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in range [10_000, 10^24], up to a million 18-decimal units.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=1_000_000_000_000_000_000_000_000u128
}

/// Fees across the whole valid range, biased to the presets.
fn fee_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![
        Just(100u32),
        Just(500u32),
        Just(3_000u32),
        Just(10_000u32),
        1u32..1_000_000u32,
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Add { user: usize, amount0: u128, amount1: u128 },
    Remove { user: usize, permille: u32 },
    Swap { user: usize, zero_for_one: bool, amount_in: u128 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..3, 1u128..1_000_000, 1u128..1_000_000)
            .prop_map(|(user, amount0, amount1)| Op::Add { user, amount0, amount1 }),
        (0usize..3, 1u32..=1_000).prop_map(|(user, permille)| Op::Remove { user, permille }),
        (0usize..3, any::<bool>(), 1u128..500_000).prop_map(|(user, zero_for_one, amount_in)| {
            Op::Swap {
                user,
                zero_for_one,
                amount_in,
            }
        }),
    ]
}

fn apply(pool: &mut Pool, l: &mut InMemoryLedger, op: &Op) {
    match *op {
        Op::Add { user, amount0, amount1 } => {
            let _ = pool.add_liquidity(
                l,
                CallContext::new(USERS[user]),
                Amount::new(amount0),
                Amount::new(amount1),
            );
        }
        Op::Remove { user, permille } => {
            let held = pool.liquidity_of(USERS[user]).get();
            let burn = held * U256::from(permille) / U256::from(1_000u32);
            let _ = pool.remove_liquidity(
                l,
                CallContext::new(USERS[user]),
                Liquidity::from(Amount::from_u256(burn)),
            );
        }
        Op::Swap { user, zero_for_one, amount_in } => {
            let token_in = if zero_for_one { tok_a() } else { tok_b() };
            let _ = pool.swap(
                l,
                CallContext::new(USERS[user]),
                Amount::new(amount_in),
                token_in,
                USERS[user],
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Properties 1-2: Custody and liquidity conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_reserves_match_custody_and_units_balance(
        ops in proptest::collection::vec(op_strategy(), 1..40),
        ppm in fee_strategy(),
    ) {
        let mut l = ledger();
        let mut pool = seeded_pool(&mut l, 1_000_000, 1_000_000, ppm);

        for op in &ops {
            apply(&mut pool, &mut l, op);

            prop_assert_eq!(pool.reserve0(), l.balance_of(tok_a(), POOL));
            prop_assert_eq!(pool.reserve1(), l.balance_of(tok_b(), POOL));

            let mut sum = Liquidity::ZERO;
            for user in USERS {
                let Some(next) = sum.checked_add(&pool.liquidity_of(user)) else {
                    panic!("sum overflow");
                };
                sum = next;
            }
            prop_assert_eq!(sum, pool.total_liquidity());
        }
    }

    #[test]
    fn prop_swaps_never_touch_liquidity(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        amount_in in 1u128..1_000_000_000_000u128,
        zero_for_one in any::<bool>(),
    ) {
        let mut l = ledger();
        let mut pool = seeded_pool(&mut l, r0, r1, 3_000);
        let before = pool.total_liquidity();
        let token_in = if zero_for_one { tok_a() } else { tok_b() };
        let _ = pool.swap(&mut l, CallContext::new(USERS[1]), Amount::new(amount_in), token_in, USERS[1]);
        prop_assert_eq!(pool.total_liquidity(), before);
        prop_assert!(pool.liquidity_of(USERS[1]).is_zero());
    }
}

// ---------------------------------------------------------------------------
// Properties 3-4: Withdrawals
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_full_withdrawal_returns_reserves(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        swap_in in 1u128..1_000_000u128,
    ) {
        let mut l = ledger();
        let mut pool = seeded_pool(&mut l, r0, r1, 3_000);
        let _ = pool.swap(&mut l, CallContext::new(USERS[1]), Amount::new(swap_in), tok_a(), USERS[1]);
        let (res0, res1) = (pool.reserve0(), pool.reserve1());

        let units = pool.liquidity_of(USERS[0]);
        let Ok(out) = pool.remove_liquidity(&mut l, CallContext::new(USERS[0]), units) else {
            panic!("sole provider can withdraw");
        };
        prop_assert_eq!(out.amount0, res0);
        prop_assert_eq!(out.amount1, res1);
        prop_assert!(pool.reserve0().is_zero());
        prop_assert!(pool.reserve1().is_zero());
    }

    #[test]
    fn prop_partial_withdrawal_is_floored_pro_rata(
        total in 1u128..=u128::MAX >> 4,
        permille in 1u32..=1_000,
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
    ) {
        let total_u = U256::from(total);
        let amount_u = total_u * U256::from(permille) / U256::from(1_000u32);
        if amount_u.is_zero() {
            return Ok(());
        }
        let Ok(share) = withdrawal_share(
            Liquidity::from(Amount::from_u256(amount_u)),
            Liquidity::new(total),
            Amount::new(r0),
            Amount::new(r1),
        ) else {
            panic!("share computable");
        };
        let wad = U256::from(10u8).pow(U256::from(18u8));
        let fraction = amount_u * wad / total_u;
        prop_assert_eq!(share.amount0.get(), fraction * U256::from(r0) / wad);
        prop_assert_eq!(share.amount1.get(), fraction * U256::from(r1) / wad);

        // out_i / reserve_i <= amount / total
        prop_assert!(share.amount0.get() * total_u <= amount_u * U256::from(r0));
        prop_assert!(share.amount1.get() * total_u <= amount_u * U256::from(r1));
    }
}

// ---------------------------------------------------------------------------
// Properties 5-7: Swap pricing
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_swap_output_monotonic_and_bounded(
        r_in in reserve_strategy(),
        r_out in reserve_strategy(),
        small in 1u128..1_000_000_000_000_000u128,
        extra in 0u128..1_000_000_000_000_000u128,
        ppm in fee_strategy(),
    ) {
        let large = small + extra;
        let quote = |amount: u128| {
            get_amount_out(tok_a(), Amount::new(amount), Amount::new(r_in), Amount::new(r_out), fee(ppm))
        };
        let (Ok(lo), Ok(hi)) = (quote(small), quote(large)) else {
            panic!("pricing is total for positive reserves");
        };
        prop_assert!(lo.amount_out() <= hi.amount_out());
        prop_assert!(hi.amount_out() < Amount::new(r_out));

        // fee-less bound: amount_in * r_out / (r_in + amount_in)
        let bound = U256::from(large) * U256::from(r_out) / (U256::from(r_in) + U256::from(large));
        prop_assert!(hi.amount_out().get() <= bound);
    }

    #[test]
    fn prop_invariant_never_decreases(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        amount_in in 1u128..1_000_000_000_000_000_000u128,
        zero_for_one in any::<bool>(),
        ppm in fee_strategy(),
    ) {
        let mut l = ledger();
        let mut pool = seeded_pool(&mut l, r0, r1, ppm);
        let k_before = product(&pool);
        let token_in = if zero_for_one { tok_a() } else { tok_b() };
        let Ok(_) = pool.swap(&mut l, CallContext::new(USERS[1]), Amount::new(amount_in), token_in, USERS[1]) else {
            panic!("swap on funded pool");
        };
        prop_assert!(product(&pool) >= k_before);
    }

    #[test]
    fn prop_swap_reversibility(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
    ) {
        let swap_in = (r0 / 1_000).max(1);
        let mut l = ledger();
        let mut pool = seeded_pool(&mut l, r0, r1, 3_000);
        let ctx = CallContext::new(USERS[1]);

        let Ok(ab) = pool.swap(&mut l, ctx, Amount::new(swap_in), tok_a(), USERS[1]) else {
            return Ok(());
        };
        if ab.amount_out().is_zero() {
            return Ok(());
        }
        let Ok(ba) = pool.swap(&mut l, ctx, ab.amount_out(), tok_b(), USERS[1]) else {
            return Ok(());
        };
        prop_assert!(
            ba.amount_out() <= Amount::new(swap_in),
            "round-trip should lose value: final={} > original={}",
            ba.amount_out(), swap_in
        );
    }
}
