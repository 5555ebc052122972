//! # Outcome Markets
//!
//! Binary prediction markets settled in native SOL.
//!
//! ## Overview
//!
//! Each market prices YES/NO shares against its own fixed-product liquidity
//! pool, freezes at a per-market end time, accepts a single outcome report
//! from its designated resolver, and redeems winning shares one-to-one from
//! the pool.
//!
//! ## How it works
//! - The registry validates creation parameters and indexes markets by
//!   category.
//! - All pricing lives in the [`amm`] module; markets commit quotes
//!   atomically together with the per-trader position ledger.
//! - Payouts always happen after the owning market's state is final.

use anchor_lang::prelude::*;

pub mod amm;
pub mod instructions;
pub mod state;

#[cfg(test)]
mod tests;

pub use amm::*;
pub use instructions::*;

declare_id!("DBVrP3SnVcX8ZQoxyGWwPYiDVQcdPzs1MCeECgoRbTvc");

/// Main outcome-markets program
#[program]
pub mod outcome_markets {
    use super::*;

    /// Set up the registry (once, at deployment)
    pub fn initialize(ctx: Context<Initialize>, min_liquidity: u64) -> Result<()> {
        ctx.accounts.initialize(min_liquidity, &ctx.bumps)
    }

    /// Create and fund a new market (permissionless)
    #[allow(clippy::too_many_arguments)]
    pub fn create_market(
        ctx: Context<CreateMarket>,
        question: String,
        category: String,
        end_time: i64,
        resolution_time: i64,
        resolver: Pubkey,
        initial_liquidity: u64,
    ) -> Result<()> {
        ctx.accounts.create_market(
            question,
            category,
            end_time,
            resolution_time,
            resolver,
            initial_liquidity,
            &ctx.bumps,
        )
    }

    /// Buy YES or NO shares with lamports
    pub fn buy_shares(
        ctx: Context<Trade>,
        is_yes: bool,
        amount_in: u64,
        min_shares_out: u64,
    ) -> Result<u64> {
        ctx.accounts
            .buy_shares(is_yes, amount_in, min_shares_out, &ctx.bumps)
    }

    /// Sell shares back to the pool
    pub fn sell_shares(
        ctx: Context<Trade>,
        is_yes: bool,
        shares_in: u64,
        min_payout: u64,
    ) -> Result<u64> {
        ctx.accounts
            .sell_shares(is_yes, shares_in, min_payout, &ctx.bumps)
    }

    /// Report the final outcome (resolver only, once)
    pub fn resolve(ctx: Context<Resolve>, outcome: bool) -> Result<()> {
        ctx.accounts.resolve(outcome)
    }

    /// Redeem winning shares for lamports
    pub fn claim_winnings(ctx: Context<Claim>) -> Result<u64> {
        ctx.accounts.claim_winnings()
    }

    /// Current price of one side, as a fixed-point fraction of one
    pub fn get_price(ctx: Context<Quote>, is_yes: bool) -> Result<u64> {
        ctx.accounts.get_price(is_yes)
    }

    /// Pure quote: shares a buy of `amount_in` would mint
    pub fn calculate_shares(ctx: Context<Quote>, is_yes: bool, amount_in: u64) -> Result<u64> {
        ctx.accounts.calculate_shares(is_yes, amount_in)
    }
}
