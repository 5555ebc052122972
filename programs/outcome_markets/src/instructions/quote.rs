//! Read-only quotes
//!
//! Prices here are for display and pre-trade quoting; trades settle by the
//! invariant in the AMM module, never by the quoted spot price.

use anchor_lang::prelude::*;

use crate::state::Market;

/// Accounts for read-only quote instructions
#[derive(Accounts)]
pub struct Quote<'info> {
    pub market: Account<'info, Market>,
}

impl<'info> Quote<'info> {
    /// Current price of one side, in [`crate::amm::PRICE_SCALE`] units
    pub fn get_price(&self, is_yes: bool) -> Result<u64> {
        Ok(self.market.price(is_yes))
    }

    /// Shares a buy of `amount_in` would mint right now
    pub fn calculate_shares(&self, is_yes: bool, amount_in: u64) -> Result<u64> {
        self.market.quote_buy(is_yes, amount_in)
    }
}
