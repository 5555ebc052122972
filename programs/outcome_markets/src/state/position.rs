//! Per-account position ledger

use anchor_lang::prelude::*;

use crate::state::market::MarketError;

/// One trader's YES/NO balances for one market
///
/// Seeds: ["position", market, owner]
///
/// Created implicitly on a trader's first purchase and never deleted, so a
/// settled market keeps its full ledger.
#[account]
#[derive(InitSpace)]
pub struct Position {
    /// Market this entry belongs to
    pub market: Pubkey,

    /// Trader that owns the entry
    pub owner: Pubkey,

    /// YES shares held
    pub yes_shares: u64,

    /// NO shares held
    pub no_shares: u64,

    /// Set once winnings have been paid out; irreversible
    pub claimed: bool,

    /// PDA bump seed
    pub bump: u8,
}

impl Position {
    pub const SEED: &'static [u8] = b"position";

    pub fn balance(&self, is_yes: bool) -> u64 {
        if is_yes {
            self.yes_shares
        } else {
            self.no_shares
        }
    }

    /// Shares that redeem 1:1 under the given outcome.
    pub fn winning_shares(&self, outcome: bool) -> u64 {
        self.balance(outcome)
    }

    pub fn credit(&mut self, is_yes: bool, shares: u64) -> Result<()> {
        let held = self.balance_mut(is_yes);
        *held = held.checked_add(shares).ok_or(MarketError::Overflow)?;
        Ok(())
    }

    pub fn debit(&mut self, is_yes: bool, shares: u64) -> Result<()> {
        let held = self.balance_mut(is_yes);
        *held = held
            .checked_sub(shares)
            .ok_or(MarketError::InsufficientShares)?;
        Ok(())
    }

    fn balance_mut(&mut self, is_yes: bool) -> &mut u64 {
        if is_yes {
            &mut self.yes_shares
        } else {
            &mut self.no_shares
        }
    }
}
