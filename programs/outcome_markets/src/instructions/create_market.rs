//! Market Creation
//!
//! The registry validates the creation parameters, moves the initial
//! liquidity into the new market account, and seeds both reserves with the
//! full amount. Equal reserves fix the opening quote at 50/50; every later
//! price is a pure function of the reserves.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

use crate::state::{
    CategoryIndex, Market, Registry, MAX_CATEGORY_LEN, MAX_CATEGORY_MARKETS, MAX_QUESTION_LEN,
};

/// Event emitted when a market is created
#[event]
pub struct MarketCreated {
    pub market: Pubkey,
    pub question: String,
    pub category: String,
    pub creator: Pubkey,
    pub end_time: i64,
    pub resolution_time: i64,
    pub resolver: Pubkey,
    pub initial_liquidity: u64,
}

/// Accounts for market creation
#[derive(Accounts)]
#[instruction(question: String, category: String)]
pub struct CreateMarket<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        mut,
        seeds = [Registry::SEED],
        bump = registry.bump,
    )]
    pub registry: Account<'info, Registry>,

    #[account(
        init,
        payer = creator,
        space = 8 + Market::INIT_SPACE,
        seeds = [Market::SEED, registry.key().as_ref(), registry.market_count.to_le_bytes().as_ref()],
        bump,
    )]
    pub market: Account<'info, Market>,

    #[account(
        init_if_needed,
        payer = creator,
        space = 8 + CategoryIndex::INIT_SPACE,
        seeds = [CategoryIndex::SEED, category.as_bytes()],
        bump,
    )]
    pub category_index: Account<'info, CategoryIndex>,

    pub system_program: Program<'info, System>,
}

/// Checks the temporal ordering and liquidity floor for a new market.
pub fn validate_market_params(
    registry: &Registry,
    now: i64,
    end_time: i64,
    resolution_time: i64,
    initial_liquidity: u64,
) -> Result<()> {
    require!(end_time > now, CreateMarketError::InvalidEndTime);
    require!(
        resolution_time > end_time,
        CreateMarketError::InvalidResolutionTime
    );
    require!(
        initial_liquidity >= registry.min_liquidity,
        CreateMarketError::InsufficientLiquidity
    );
    Ok(())
}

impl<'info> CreateMarket<'info> {
    #[allow(clippy::too_many_arguments)]
    pub fn create_market(
        &mut self,
        question: String,
        category: String,
        end_time: i64,
        resolution_time: i64,
        resolver: Pubkey,
        initial_liquidity: u64,
        bumps: &CreateMarketBumps,
    ) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;

        require!(
            question.len() <= MAX_QUESTION_LEN,
            CreateMarketError::QuestionTooLong
        );
        require!(
            category.len() <= MAX_CATEGORY_LEN,
            CreateMarketError::CategoryTooLong
        );
        validate_market_params(&self.registry, now, end_time, resolution_time, initial_liquidity)?;

        transfer(
            CpiContext::new(
                self.system_program.to_account_info(),
                Transfer {
                    from: self.creator.to_account_info(),
                    to: self.market.to_account_info(),
                },
            ),
            initial_liquidity,
        )?;

        let id = self.registry.market_count;
        self.market.set_inner(Market {
            id,
            creator: self.creator.key(),
            question: question.clone(),
            category: category.clone(),
            end_time,
            resolution_time,
            resolver,
            created_at: now,
            yes_reserve: initial_liquidity,
            no_reserve: initial_liquidity,
            total_yes_shares: 0,
            total_no_shares: 0,
            total_pool: initial_liquidity,
            resolved: false,
            outcome: false,
            bump: bumps.market,
        });
        self.registry.market_count += 1;

        let index = &mut self.category_index;
        if index.category.is_empty() {
            index.category = category.clone();
            index.bump = bumps.category_index;
        }
        require!(
            index.markets.len() < MAX_CATEGORY_MARKETS,
            CreateMarketError::CategoryFull
        );
        index.markets.push(self.market.key());

        emit!(MarketCreated {
            market: self.market.key(),
            question,
            category,
            creator: self.creator.key(),
            end_time,
            resolution_time,
            resolver,
            initial_liquidity,
        });

        Ok(())
    }
}

#[error_code]
pub enum CreateMarketError {
    #[msg("End time must be in the future")]
    InvalidEndTime,
    #[msg("Resolution time must come after the end time")]
    InvalidResolutionTime,
    #[msg("Initial liquidity below the registry minimum")]
    InsufficientLiquidity,
    #[msg("Question exceeds maximum length")]
    QuestionTooLong,
    #[msg("Category exceeds maximum length")]
    CategoryTooLong,
    #[msg("Category index is full")]
    CategoryFull,
}
