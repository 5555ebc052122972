//! Secondary index of markets by category

use anchor_lang::prelude::*;

use crate::state::market::MAX_CATEGORY_LEN;

/// Markets a single category index can hold
pub const MAX_CATEGORY_MARKETS: usize = 128;

/// Append-only list of the markets sharing a category tag
///
/// Seeds: ["category", category_bytes]
#[account]
#[derive(InitSpace)]
pub struct CategoryIndex {
    /// Category tag this index covers
    #[max_len(MAX_CATEGORY_LEN)]
    pub category: String,

    /// Markets created under the tag, oldest first
    #[max_len(MAX_CATEGORY_MARKETS)]
    pub markets: Vec<Pubkey>,

    /// PDA bump seed
    pub bump: u8,
}

impl CategoryIndex {
    pub const SEED: &'static [u8] = b"category";
}
