//! # Fixed-Product Pricing Engine
//!
//! Prices YES/NO shares against a two-sided pool under the constant-product
//! invariant:
//!
//! ```text
//! k = yes_reserve * no_reserve
//! ```
//!
//! ## Buying
//!
//! A buyer pays `amount_in` collateral. The payment backs both sides of the
//! book: the opposite reserve grows by the full payment, the chosen side's
//! reserve would too, but the engine strips out the shares that put the pool
//! back on the curve and hands them to the buyer:
//!
//! ```text
//! other' = other + amount_in
//! side'  = ceil(k / other')
//! shares = side + amount_in - side'
//! ```
//!
//! Because every deposited lamport backs one share on each side, the pool
//! always holds `reserve` more collateral than it owes that side's holders,
//! whatever the trade sequence. That is the solvency invariant.
//!
//! ## Selling
//!
//! A sell is the inverse trade: the shares return to their reserve and the
//! payout is burned out of both sides, landing the reserves back on the
//! curve:
//!
//! ```text
//! (side + shares - payout) * (other - payout) = k
//! ```
//!
//! which is quadratic in `payout`; the engine takes the positive branch.
//!
//! All rounding in this module favors the pool: `k` never decreases across a
//! trade, and buying shares then immediately selling them back can never pay
//! out more than the purchase cost.

use anchor_lang::prelude::*;

/// Errors raised by the pricing engine
#[error_code]
pub enum AmmError {
    #[msg("Trade amount must be greater than zero")]
    InvalidAmount,
    #[msg("Payout would drain the opposite reserve")]
    InsufficientLiquidity,
    #[msg("Arithmetic overflow")]
    Overflow,
}

/// Fixed-point price scale: 1_000_000_000 == 100%
pub const PRICE_SCALE: u64 = 1_000_000_000;

/// Result of pricing a buy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuyQuote {
    /// Shares minted to the buyer
    pub shares_out: u64,
    /// Bought side's reserve after the trade
    pub side_reserve: u64,
    /// Opposite reserve after the trade
    pub other_reserve: u64,
}

/// Result of pricing a sell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SellQuote {
    /// Collateral released to the seller
    pub payout: u64,
    /// Sold side's reserve after the trade
    pub side_reserve: u64,
    /// Opposite reserve after the trade
    pub other_reserve: u64,
}

/// Marginal price of the side holding `side_reserve`, in [`PRICE_SCALE`]
/// units.
///
/// Callers must quote the opposite side as `PRICE_SCALE - spot_price(..)`;
/// the two sides then sum to exactly one unit for any positive reserve pair.
pub fn spot_price(side_reserve: u64, other_reserve: u64) -> u64 {
    let total = side_reserve as u128 + other_reserve as u128;
    if total == 0 {
        return PRICE_SCALE / 2;
    }
    ((side_reserve as u128 * PRICE_SCALE as u128) / total) as u64
}

/// Quote a purchase of the side holding `side_reserve`.
pub fn quote_buy(side_reserve: u64, other_reserve: u64, amount_in: u64) -> Result<BuyQuote> {
    require!(amount_in > 0, AmmError::InvalidAmount);

    let k = (side_reserve as u128)
        .checked_mul(other_reserve as u128)
        .ok_or(AmmError::Overflow)?;

    let new_other = other_reserve
        .checked_add(amount_in)
        .ok_or(AmmError::Overflow)?;
    // ceiling division: the fractional share stays in the pool
    let new_side = div_ceil(k, new_other as u128);

    let shares = (side_reserve as u128 + amount_in as u128)
        .checked_sub(new_side)
        .ok_or(AmmError::Overflow)?;
    let shares_out = u64::try_from(shares).map_err(|_| error!(AmmError::Overflow))?;
    require!(shares_out > 0, AmmError::InvalidAmount);

    Ok(BuyQuote {
        shares_out,
        side_reserve: new_side as u64,
        other_reserve: new_other,
    })
}

/// Quote a sale of `shares_in` shares of the side holding `side_reserve`.
pub fn quote_sell(side_reserve: u64, other_reserve: u64, shares_in: u64) -> Result<SellQuote> {
    require!(shares_in > 0, AmmError::InvalidAmount);

    let k = (side_reserve as u128)
        .checked_mul(other_reserve as u128)
        .ok_or(AmmError::Overflow)?;

    let grown_side = side_reserve as u128 + shares_in as u128;
    let other = other_reserve as u128;

    // positive branch of (grown_side - p)(other - p) = k, rounded down
    let diff = grown_side.abs_diff(other);
    let disc = diff
        .checked_mul(diff)
        .ok_or(AmmError::Overflow)?
        .checked_add(k.checked_mul(4).ok_or(AmmError::Overflow)?)
        .ok_or(AmmError::Overflow)?;
    let payout = (grown_side + other).saturating_sub(sqrt_ceil(disc)) / 2;

    require!(payout > 0, AmmError::InvalidAmount);
    require!(payout < other, AmmError::InsufficientLiquidity);

    let new_side = u64::try_from(grown_side - payout).map_err(|_| error!(AmmError::Overflow))?;
    Ok(SellQuote {
        payout: payout as u64,
        side_reserve: new_side,
        other_reserve: (other - payout) as u64,
    })
}

/// Integer square root using Newton's method
///
/// Computes floor(√x) for any non-negative integer.
pub fn sqrt(x: u128) -> u128 {
    if x == 0 {
        return 0;
    }

    // overflow-free form of the initial guess (x + 1) / 2
    let mut z = (x >> 1) + (x & 1);
    let mut y = x;
    while z < y {
        y = z;
        z = (x / z + z) / 2;
    }

    y
}

fn sqrt_ceil(x: u128) -> u128 {
    let root = sqrt(x);
    if root * root == x {
        root
    } else {
        root + 1
    }
}

fn div_ceil(num: u128, den: u128) -> u128 {
    (num + den - 1) / den
}

// ============================================================================
// TESTS
// ============================================================================
