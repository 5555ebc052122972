//! Registry Initialization
//!
//! Creates the singleton registry that validates market creation and hands
//! out market indexes. This is typically called once during deployment.

use anchor_lang::prelude::*;

use crate::state::Registry;

/// Accounts required for registry initialization
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Account funding the registry
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Registry singleton (created)
    #[account(
        init,
        payer = payer,
        space = 8 + Registry::INIT_SPACE,
        seeds = [Registry::SEED],
        bump,
    )]
    pub registry: Account<'info, Registry>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    pub fn initialize(&mut self, min_liquidity: u64, bumps: &InitializeBumps) -> Result<()> {
        require!(min_liquidity > 0, InitializeError::InvalidMinimumLiquidity);

        self.registry.set_inner(Registry {
            market_count: 0,
            min_liquidity,
            bump: bumps.registry,
        });

        msg!("Registry initialized");
        msg!("Minimum liquidity: {} lamports", min_liquidity);

        Ok(())
    }
}

#[error_code]
pub enum InitializeError {
    #[msg("Minimum liquidity must be greater than zero")]
    InvalidMinimumLiquidity,
}
