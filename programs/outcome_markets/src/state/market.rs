//! Market state and lifecycle rules
//!
//! Each market owns one pair of pool reserves and the position ledger keyed
//! under it. The lifecycle runs `Active → Ended → Resolved`, where `Ended`
//! is never stored: a market is active exactly while `now < end_time`, and
//! every operation re-evaluates that guard on entry. `resolved` flips once
//! and `outcome` is never written again afterwards; the account itself is
//! never closed, so a settled market remains a full historical record.
//!
//! Reserves change only through [`Market::buy`] and [`Market::sell`].
//! Resolution and claims touch the flags, the claimed markers and the pool
//! total, never the reserves.

use anchor_lang::prelude::*;

use crate::amm::{self, PRICE_SCALE};
use crate::state::Position;

#[error_code]
pub enum MarketError {
    #[msg("Trading is closed for this market")]
    MarketEnded,
    #[msg("Quoted result is worse than the stated minimum")]
    SlippageExceeded,
    #[msg("Position holds fewer shares than requested")]
    InsufficientShares,
    #[msg("Only the designated resolver can resolve this market")]
    OnlyResolver,
    #[msg("Resolution time has not been reached")]
    ResolutionTooEarly,
    #[msg("Market has already been resolved")]
    MarketAlreadyResolved,
    #[msg("Market has not been resolved")]
    MarketNotResolved,
    #[msg("Winnings have already been claimed")]
    AlreadyClaimed,
    #[msg("No winning shares to claim")]
    NoWinnings,
    #[msg("Arithmetic overflow")]
    Overflow,
}

/// Maximum length of a market question, in bytes
pub const MAX_QUESTION_LEN: usize = 256;

/// Maximum length of a category tag, in bytes
pub const MAX_CATEGORY_LEN: usize = 32;

/// A single binary outcome market
///
/// Seeds: ["market", registry, id.to_le_bytes()]
///
/// The account holds the market's collateral lamports on top of its rent.
#[account]
#[derive(InitSpace)]
pub struct Market {
    /// Index in the registry's append-only list
    pub id: u64,

    /// Account that created and funded the market
    pub creator: Pubkey,

    /// The question being traded
    /// Example: "Will gold close above $3000 by Dec 31?"
    #[max_len(MAX_QUESTION_LEN)]
    pub question: String,

    /// Category tag, also the key of the secondary index
    #[max_len(MAX_CATEGORY_LEN)]
    pub category: String,

    /// Unix timestamp at which trading stops
    pub end_time: i64,

    /// Unix timestamp from which the resolver may report the outcome
    pub resolution_time: i64,

    /// Identity authorized to report the outcome
    pub resolver: Pubkey,

    /// Unix timestamp of creation
    pub created_at: i64,

    /// YES-side pool reserve, in lamports
    pub yes_reserve: u64,

    /// NO-side pool reserve, in lamports
    pub no_reserve: u64,

    /// YES shares held by traders
    pub total_yes_shares: u64,

    /// NO shares held by traders
    pub total_no_shares: u64,

    /// Trade collateral held by the market, in lamports
    pub total_pool: u64,

    /// Whether the outcome has been reported
    pub resolved: bool,

    /// Winning side; meaningful only once `resolved` is set
    pub outcome: bool,

    /// PDA bump seed
    pub bump: u8,
}

impl Market {
    pub const SEED: &'static [u8] = b"market";

    /// Trading is open exactly while the end time lies ahead.
    pub fn is_open(&self, now: i64) -> bool {
        now < self.end_time
    }

    /// Marginal price of one side, in [`PRICE_SCALE`] units.
    ///
    /// NO is quoted as the complement of YES, so the two sides always sum to
    /// exactly one unit.
    pub fn price(&self, is_yes: bool) -> u64 {
        let yes = amm::spot_price(self.yes_reserve, self.no_reserve);
        if is_yes {
            yes
        } else {
            PRICE_SCALE - yes
        }
    }

    /// Shares a buy of `amount_in` would mint, without committing anything.
    pub fn quote_buy(&self, is_yes: bool, amount_in: u64) -> Result<u64> {
        let (side, other) = self.reserves(is_yes);
        Ok(amm::quote_buy(side, other, amount_in)?.shares_out)
    }

    /// Buy shares against the pool and credit them to `position`.
    ///
    /// Returns the shares minted. The caller moves `amount_in` lamports into
    /// the market account after this commits.
    pub fn buy(
        &mut self,
        position: &mut Position,
        is_yes: bool,
        amount_in: u64,
        min_shares_out: u64,
        now: i64,
    ) -> Result<u64> {
        require!(self.is_open(now), MarketError::MarketEnded);

        let (side, other) = self.reserves(is_yes);
        let quote = amm::quote_buy(side, other, amount_in)?;
        require!(
            quote.shares_out >= min_shares_out,
            MarketError::SlippageExceeded
        );

        position.credit(is_yes, quote.shares_out)?;
        self.set_reserves(is_yes, quote.side_reserve, quote.other_reserve);
        self.total_pool = self
            .total_pool
            .checked_add(amount_in)
            .ok_or(MarketError::Overflow)?;
        let total = self.total_shares_mut(is_yes);
        *total = total
            .checked_add(quote.shares_out)
            .ok_or(MarketError::Overflow)?;

        Ok(quote.shares_out)
    }

    /// Sell shares back to the pool.
    ///
    /// Returns the lamport payout. The caller pays it out of the market
    /// account only after this commits.
    pub fn sell(
        &mut self,
        position: &mut Position,
        is_yes: bool,
        shares_in: u64,
        min_payout: u64,
        now: i64,
    ) -> Result<u64> {
        require!(self.is_open(now), MarketError::MarketEnded);
        require!(
            position.balance(is_yes) >= shares_in,
            MarketError::InsufficientShares
        );

        let (side, other) = self.reserves(is_yes);
        let quote = amm::quote_sell(side, other, shares_in)?;
        require!(quote.payout >= min_payout, MarketError::SlippageExceeded);

        position.debit(is_yes, shares_in)?;
        self.set_reserves(is_yes, quote.side_reserve, quote.other_reserve);
        self.total_pool = self
            .total_pool
            .checked_sub(quote.payout)
            .ok_or(MarketError::Overflow)?;
        let total = self.total_shares_mut(is_yes);
        *total = total
            .checked_sub(shares_in)
            .ok_or(MarketError::Overflow)?;

        Ok(quote.payout)
    }

    /// Report the final outcome.
    ///
    /// Callable once, by the stored resolver, at or after the resolution
    /// time. A repeat call is rejected rather than silently ignored.
    pub fn resolve(&mut self, caller: &Pubkey, outcome: bool, now: i64) -> Result<()> {
        require_keys_eq!(*caller, self.resolver, MarketError::OnlyResolver);
        require!(now >= self.resolution_time, MarketError::ResolutionTooEarly);
        require!(!self.resolved, MarketError::MarketAlreadyResolved);

        self.resolved = true;
        self.outcome = outcome;
        Ok(())
    }

    /// Settle a position at one lamport per winning share.
    ///
    /// Returns the payout and marks the position claimed. Shares are left on
    /// the books as history; losing shares pay nothing.
    pub fn claim(&mut self, position: &mut Position) -> Result<u64> {
        require!(self.resolved, MarketError::MarketNotResolved);
        require!(!position.claimed, MarketError::AlreadyClaimed);
        let payout = position.winning_shares(self.outcome);
        require!(payout > 0, MarketError::NoWinnings);

        position.claimed = true;
        self.total_pool = self
            .total_pool
            .checked_sub(payout)
            .ok_or(MarketError::Overflow)?;
        Ok(payout)
    }

    /// Snapshot of everything a market card needs.
    pub fn info(&self) -> MarketInfo {
        MarketInfo {
            question: self.question.clone(),
            category: self.category.clone(),
            end_time: self.end_time,
            resolution_time: self.resolution_time,
            resolver: self.resolver,
            resolved: self.resolved,
            outcome: self.outcome,
            total_yes_shares: self.total_yes_shares,
            total_no_shares: self.total_no_shares,
            total_pool: self.total_pool,
        }
    }

    fn reserves(&self, is_yes: bool) -> (u64, u64) {
        if is_yes {
            (self.yes_reserve, self.no_reserve)
        } else {
            (self.no_reserve, self.yes_reserve)
        }
    }

    fn set_reserves(&mut self, is_yes: bool, side: u64, other: u64) {
        if is_yes {
            self.yes_reserve = side;
            self.no_reserve = other;
        } else {
            self.no_reserve = side;
            self.yes_reserve = other;
        }
    }

    fn total_shares_mut(&mut self, is_yes: bool) -> &mut u64 {
        if is_yes {
            &mut self.total_yes_shares
        } else {
            &mut self.total_no_shares
        }
    }
}

/// Read-model snapshot of a market
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct MarketInfo {
    pub question: String,
    pub category: String,
    pub end_time: i64,
    pub resolution_time: i64,
    pub resolver: Pubkey,
    pub resolved: bool,
    pub outcome: bool,
    pub total_yes_shares: u64,
    pub total_no_shares: u64,
    pub total_pool: u64,
}
