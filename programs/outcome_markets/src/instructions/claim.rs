//! Winnings Settlement
//!
//! After resolution, each winning share redeems for exactly one lamport of
//! collateral. A position settles at most once; losing shares stay recorded
//! but pay nothing.

use anchor_lang::prelude::*;

use crate::state::{Market, Position};

/// Event emitted when winnings are paid out
#[event]
pub struct WinningsClaimed {
    pub market: Pubkey,
    pub claimant: Pubkey,
    pub payout: u64,
}

/// Accounts for claiming winnings
#[derive(Accounts)]
pub struct Claim<'info> {
    /// Trader settling their position
    #[account(mut)]
    pub claimant: Signer<'info>,

    /// Resolved market
    #[account(mut)]
    pub market: Account<'info, Market>,

    /// The claimant's ledger entry
    #[account(
        mut,
        seeds = [Position::SEED, market.key().as_ref(), claimant.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == claimant.key(),
    )]
    pub position: Account<'info, Position>,
}

impl<'info> Claim<'info> {
    pub fn claim_winnings(&mut self) -> Result<u64> {
        let payout = self.market.claim(&mut self.position)?;

        // the claimed flag is set before any lamports leave the pool
        let market_info = self.market.to_account_info();
        let claimant_info = self.claimant.to_account_info();
        **market_info.try_borrow_mut_lamports()? -= payout;
        **claimant_info.try_borrow_mut_lamports()? += payout;

        emit!(WinningsClaimed {
            market: self.market.key(),
            claimant: self.claimant.key(),
            payout,
        });

        Ok(payout)
    }
}
