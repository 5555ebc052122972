//! Market registry (factory) state

use anchor_lang::prelude::*;

/// Registry singleton
///
/// Markets are addressed by their index under the registry key, so the
/// counter doubles as an append-only list of every market ever created.
///
/// Seeds: ["registry"]
#[account]
#[derive(InitSpace)]
pub struct Registry {
    /// Number of markets created so far; the next market's id
    pub market_count: u64,

    /// Minimum initial liquidity accepted by market creation, in lamports
    pub min_liquidity: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl Registry {
    pub const SEED: &'static [u8] = b"registry";
}
