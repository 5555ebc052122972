//! Market Resolution
//!
//! The designated resolver reports the final outcome once the resolution
//! time has passed. The resolver identity is fixed per market at creation;
//! it can be a person, a multisig, or an automated oracle feed.

use anchor_lang::prelude::*;

use crate::state::Market;

/// Event emitted when a market is resolved
#[event]
pub struct MarketResolved {
    pub market: Pubkey,
    pub outcome: bool,
    pub resolver: Pubkey,
    pub timestamp: i64,
}

/// Accounts for market resolution
#[derive(Accounts)]
pub struct Resolve<'info> {
    /// Identity reporting the outcome
    pub resolver: Signer<'info>,

    /// Market to resolve
    #[account(mut)]
    pub market: Account<'info, Market>,
}

impl<'info> Resolve<'info> {
    pub fn resolve(&mut self, outcome: bool) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let caller = self.resolver.key();

        self.market.resolve(&caller, outcome, now)?;

        emit!(MarketResolved {
            market: self.market.key(),
            outcome,
            resolver: caller,
            timestamp: now,
        });

        msg!(
            "Market {} resolved: {}",
            self.market.id,
            if outcome { "YES" } else { "NO" }
        );

        Ok(())
    }
}
