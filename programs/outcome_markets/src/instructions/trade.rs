//! Share Trading
//!
//! Buys and sells settle against the fixed-product engine. Each handler
//! commits reserves and ledger state in one step; lamports move only once
//! the market's own state is final.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

use crate::state::{Market, Position};

/// Event emitted when shares are bought
#[event]
pub struct SharesPurchased {
    pub market: Pubkey,
    pub buyer: Pubkey,
    pub is_yes: bool,
    pub shares: u64,
    pub cost: u64,
}

/// Event emitted when shares are sold
#[event]
pub struct SharesSold {
    pub market: Pubkey,
    pub seller: Pubkey,
    pub is_yes: bool,
    pub shares: u64,
    pub payout: u64,
}

/// Accounts for trading operations
#[derive(Accounts)]
pub struct Trade<'info> {
    /// Trader
    #[account(mut)]
    pub trader: Signer<'info>,

    /// Market being traded on
    #[account(mut)]
    pub market: Account<'info, Market>,

    /// Trader's ledger entry, created on first touch
    #[account(
        init_if_needed,
        payer = trader,
        space = 8 + Position::INIT_SPACE,
        seeds = [Position::SEED, market.key().as_ref(), trader.key().as_ref()],
        bump,
    )]
    pub position: Account<'info, Position>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Trade<'info> {
    /// Buy YES or NO shares with lamports
    pub fn buy_shares(
        &mut self,
        is_yes: bool,
        amount_in: u64,
        min_shares_out: u64,
        bumps: &TradeBumps,
    ) -> Result<u64> {
        let now = Clock::get()?.unix_timestamp;
        self.touch_position(bumps.position);

        let shares_out = self
            .market
            .buy(&mut self.position, is_yes, amount_in, min_shares_out, now)?;

        transfer(
            CpiContext::new(
                self.system_program.to_account_info(),
                Transfer {
                    from: self.trader.to_account_info(),
                    to: self.market.to_account_info(),
                },
            ),
            amount_in,
        )?;

        emit!(SharesPurchased {
            market: self.market.key(),
            buyer: self.trader.key(),
            is_yes,
            shares: shares_out,
            cost: amount_in,
        });

        Ok(shares_out)
    }

    /// Sell YES or NO shares back to the pool
    pub fn sell_shares(
        &mut self,
        is_yes: bool,
        shares_in: u64,
        min_payout: u64,
        bumps: &TradeBumps,
    ) -> Result<u64> {
        let now = Clock::get()?.unix_timestamp;
        self.touch_position(bumps.position);

        let payout = self
            .market
            .sell(&mut self.position, is_yes, shares_in, min_payout, now)?;

        // ledger and reserves are final before any lamports leave the pool
        let market_info = self.market.to_account_info();
        let trader_info = self.trader.to_account_info();
        **market_info.try_borrow_mut_lamports()? -= payout;
        **trader_info.try_borrow_mut_lamports()? += payout;

        emit!(SharesSold {
            market: self.market.key(),
            seller: self.trader.key(),
            is_yes,
            shares: shares_in,
            payout,
        });

        Ok(payout)
    }

    fn touch_position(&mut self, bump: u8) {
        if self.position.owner == Pubkey::default() {
            self.position.market = self.market.key();
            self.position.owner = self.trader.key();
            self.position.bump = bump;
        }
    }
}
