//! Lifecycle tests for the market state machine
//!
//! These drive the market, position ledger and registry through the same
//! paths the instruction handlers use, with explicit timestamps instead of
//! the on-chain clock.

use anchor_lang::prelude::*;

use crate::amm::{AmmError, PRICE_SCALE};
use crate::instructions::create_market::{validate_market_params, CreateMarketError};
use crate::state::market::MarketError;
use crate::state::{Market, Position, Registry};

const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
const TENTH_SOL: u64 = LAMPORTS_PER_SOL / 10;
const DAY: i64 = 86_400;
const WEEK: i64 = 7 * DAY;
const NOW: i64 = 1_754_000_000;

fn market(liquidity: u64) -> Market {
    Market {
        id: 0,
        creator: Pubkey::new_unique(),
        question: "Will gold close above $3000 this year?".to_string(),
        category: "commodities".to_string(),
        end_time: NOW + WEEK,
        resolution_time: NOW + WEEK + DAY,
        resolver: Pubkey::new_unique(),
        created_at: NOW,
        yes_reserve: liquidity,
        no_reserve: liquidity,
        total_yes_shares: 0,
        total_no_shares: 0,
        total_pool: liquidity,
        resolved: false,
        outcome: false,
        bump: 255,
    }
}

fn position() -> Position {
    Position {
        market: Pubkey::new_unique(),
        owner: Pubkey::new_unique(),
        yes_shares: 0,
        no_shares: 0,
        claimed: false,
        bump: 255,
    }
}

fn assert_solvent(m: &Market) {
    assert!(m.yes_reserve > 0 && m.no_reserve > 0);
    assert_eq!(m.total_pool - m.yes_reserve, m.total_yes_shares);
    assert_eq!(m.total_pool - m.no_reserve, m.total_no_shares);
}

#[test]
fn fresh_market_quotes_even_odds() {
    let m = market(TENTH_SOL);
    assert_eq!(m.price(true), PRICE_SCALE / 2);
    assert_eq!(m.price(false), PRICE_SCALE / 2);
}

#[test]
fn buying_shifts_both_prices() {
    let mut m = market(TENTH_SOL);
    let mut p = position();
    let yes_before = m.price(true);
    let no_before = m.price(false);
    let k_before = m.yes_reserve as u128 * m.no_reserve as u128;

    m.buy(&mut p, true, TENTH_SOL / 2, 0, NOW).unwrap();

    assert!(m.price(true) < yes_before);
    assert!(m.price(false) > no_before);
    assert!(m.yes_reserve as u128 * m.no_reserve as u128 >= k_before);
    assert_eq!(m.price(true) + m.price(false), PRICE_SCALE);
}

#[test]
fn quotes_match_executed_trades() {
    let mut m = market(TENTH_SOL);
    let mut p = position();
    let quoted = m.quote_buy(true, TENTH_SOL).unwrap();
    let executed = m.buy(&mut p, true, TENTH_SOL, 0, NOW).unwrap();
    assert_eq!(quoted, executed);
    assert_eq!(p.yes_shares, executed);
}

#[test]
fn buy_rejects_zero_and_respects_slippage() {
    let mut m = market(TENTH_SOL);
    let mut p = position();

    assert_eq!(
        m.buy(&mut p, true, 0, 0, NOW).unwrap_err(),
        AmmError::InvalidAmount.into()
    );

    let quote = m.quote_buy(true, TENTH_SOL).unwrap();
    let before = (m.yes_reserve, m.no_reserve, m.total_pool);
    assert_eq!(
        m.buy(&mut p, true, TENTH_SOL, quote + 1, NOW).unwrap_err(),
        MarketError::SlippageExceeded.into()
    );
    assert_eq!((m.yes_reserve, m.no_reserve, m.total_pool), before);
    assert_eq!(p.yes_shares, 0);

    assert_eq!(m.buy(&mut p, true, TENTH_SOL, quote, NOW).unwrap(), quote);
}

#[test]
fn sell_respects_slippage() {
    let mut m = market(TENTH_SOL);
    let mut p = position();
    let shares = m.buy(&mut p, true, TENTH_SOL, 0, NOW).unwrap();

    let before = (m.yes_reserve, m.no_reserve, m.total_pool, p.yes_shares);
    assert_eq!(
        m.sell(&mut p, true, shares, TENTH_SOL + 1, NOW).unwrap_err(),
        MarketError::SlippageExceeded.into()
    );
    assert_eq!(
        (m.yes_reserve, m.no_reserve, m.total_pool, p.yes_shares),
        before
    );

    let payout = m.sell(&mut p, true, shares, 0, NOW).unwrap();
    assert!(payout <= TENTH_SOL);
    assert_eq!(p.yes_shares, 0);
}

#[test]
fn positions_accumulate_per_side() {
    let mut m = market(LAMPORTS_PER_SOL);
    let mut p = position();
    let first = m.buy(&mut p, true, 100_000_000, 0, NOW).unwrap();
    let second = m.buy(&mut p, true, 100_000_000, 0, NOW).unwrap();
    let no_shares = m.buy(&mut p, false, 50_000_000, 0, NOW).unwrap();

    assert_eq!(p.yes_shares, first + second);
    assert_eq!(p.no_shares, no_shares);
    assert_eq!(
        m.sell(&mut p, true, first + second + 1, 0, NOW).unwrap_err(),
        MarketError::InsufficientShares.into()
    );
}

#[test]
fn trading_freezes_at_the_end_time() {
    let mut m = market(TENTH_SOL);
    let mut p = position();
    m.buy(&mut p, true, TENTH_SOL, 0, NOW).unwrap();

    let end = m.end_time;
    assert_eq!(
        m.buy(&mut p, true, TENTH_SOL, 0, end).unwrap_err(),
        MarketError::MarketEnded.into()
    );
    let held = p.yes_shares;
    assert_eq!(
        m.sell(&mut p, true, held, 0, end).unwrap_err(),
        MarketError::MarketEnded.into()
    );
    // the final second before the close still trades
    m.buy(&mut p, true, TENTH_SOL, 0, end - 1).unwrap();
}

#[test]
fn only_the_resolver_may_resolve() {
    let mut m = market(TENTH_SOL);
    let outsider = Pubkey::new_unique();
    assert_eq!(
        m.resolve(&outsider, true, m.resolution_time).unwrap_err(),
        MarketError::OnlyResolver.into()
    );
    assert!(!m.resolved);
}

#[test]
fn resolution_waits_for_the_resolution_time() {
    let mut m = market(TENTH_SOL);
    let resolver = m.resolver;
    assert_eq!(
        m.resolve(&resolver, true, m.end_time).unwrap_err(),
        MarketError::ResolutionTooEarly.into()
    );
    m.resolve(&resolver, true, m.resolution_time).unwrap();
    assert!(m.resolved);
    assert!(m.outcome);
}

#[test]
fn a_market_resolves_exactly_once() {
    let mut m = market(TENTH_SOL);
    let resolver = m.resolver;
    m.resolve(&resolver, false, m.resolution_time).unwrap();
    assert_eq!(
        m.resolve(&resolver, true, m.resolution_time + DAY)
            .unwrap_err(),
        MarketError::MarketAlreadyResolved.into()
    );
    // the first report stands
    assert!(!m.outcome);
}

#[test]
fn claims_gate_on_resolution_and_pay_once() {
    let mut m = market(TENTH_SOL);
    let resolver = m.resolver;
    let mut p = position();
    let shares = m.buy(&mut p, true, TENTH_SOL, 0, NOW).unwrap();

    assert_eq!(
        m.claim(&mut p).unwrap_err(),
        MarketError::MarketNotResolved.into()
    );

    m.resolve(&resolver, true, m.resolution_time).unwrap();
    let pool_before = m.total_pool;
    assert_eq!(m.claim(&mut p).unwrap(), shares);
    assert!(p.claimed);
    assert_eq!(m.total_pool, pool_before - shares);

    assert_eq!(
        m.claim(&mut p).unwrap_err(),
        MarketError::AlreadyClaimed.into()
    );
    // shares stay on the books as history
    assert_eq!(p.yes_shares, shares);
}

#[test]
fn losing_positions_have_no_winnings() {
    let mut m = market(TENTH_SOL);
    let resolver = m.resolver;
    let mut p = position();
    m.buy(&mut p, false, TENTH_SOL, 0, NOW).unwrap();

    m.resolve(&resolver, true, m.resolution_time).unwrap();
    assert_eq!(m.claim(&mut p).unwrap_err(), MarketError::NoWinnings.into());
    assert!(!p.claimed);
}

#[test]
fn gold_market_settles_end_to_end() {
    let mut m = market(TENTH_SOL);
    let resolver = m.resolver;
    let mut alice = position();
    let mut bob = position();

    let alice_shares = m.buy(&mut alice, true, 5 * TENTH_SOL, 0, NOW).unwrap();
    assert_eq!(alice_shares, 583_333_333);
    assert_solvent(&m);

    let bob_shares = m.buy(&mut bob, false, 2 * TENTH_SOL, 0, NOW + DAY).unwrap();
    assert_eq!(bob_shares, 753_846_152);
    assert_eq!(m.total_pool, 8 * TENTH_SOL);
    assert_solvent(&m);

    m.resolve(&resolver, true, m.resolution_time).unwrap();

    let payout = m.claim(&mut alice).unwrap();
    assert_eq!(payout, alice_shares);
    assert_eq!(
        m.claim(&mut bob).unwrap_err(),
        MarketError::NoWinnings.into()
    );

    // after settling every winner the pool still holds the winning reserve
    assert_eq!(m.total_pool, m.yes_reserve);
}

#[test]
fn pool_always_covers_outstanding_shares() {
    let mut m = market(LAMPORTS_PER_SOL);
    let mut p = position();
    let trades: [(bool, u64); 6] = [
        (true, 250_000_000),
        (false, 400_000_000),
        (true, 50_000_000),
        (false, 125_000_000),
        (true, 999_999),
        (false, 77_777_777),
    ];
    for (is_yes, amount) in trades {
        m.buy(&mut p, is_yes, amount, 0, NOW).unwrap();
        assert_solvent(&m);
    }

    let half_yes = p.yes_shares / 2;
    m.sell(&mut p, true, half_yes, 0, NOW).unwrap();
    assert_solvent(&m);

    let half_no = p.no_shares / 2;
    m.sell(&mut p, false, half_no, 0, NOW).unwrap();
    assert_solvent(&m);
}

#[test]
fn creation_parameters_are_validated() {
    let registry = Registry {
        market_count: 0,
        min_liquidity: 10_000_000,
        bump: 255,
    };
    let end = NOW + WEEK;
    let resolution = end + DAY;

    assert_eq!(
        validate_market_params(&registry, NOW, NOW, resolution, TENTH_SOL).unwrap_err(),
        CreateMarketError::InvalidEndTime.into()
    );
    assert_eq!(
        validate_market_params(&registry, NOW, NOW - 100, resolution, TENTH_SOL).unwrap_err(),
        CreateMarketError::InvalidEndTime.into()
    );
    assert_eq!(
        validate_market_params(&registry, NOW, end, end, TENTH_SOL).unwrap_err(),
        CreateMarketError::InvalidResolutionTime.into()
    );
    assert_eq!(
        validate_market_params(&registry, NOW, end, resolution, 1_000_000).unwrap_err(),
        CreateMarketError::InsufficientLiquidity.into()
    );
    validate_market_params(&registry, NOW, end, resolution, TENTH_SOL).unwrap();
}

#[test]
fn market_info_reflects_state() {
    let mut m = market(TENTH_SOL);
    let mut p = position();
    let shares = m.buy(&mut p, true, TENTH_SOL, 0, NOW).unwrap();

    let info = m.info();
    assert_eq!(info.question, m.question);
    assert_eq!(info.category, m.category);
    assert_eq!(info.total_yes_shares, shares);
    assert_eq!(info.total_no_shares, 0);
    assert_eq!(info.total_pool, 2 * TENTH_SOL);
    assert!(!info.resolved);
}
