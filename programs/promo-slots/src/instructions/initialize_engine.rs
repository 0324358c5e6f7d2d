use anchor_lang::prelude::*;

use crate::errors::EngineError;
use crate::state::EngineConfig;

#[derive(Accounts)]
pub struct InitializeEngine<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = EngineConfig::SIZE,
        seeds = [EngineConfig::SEED],
        bump,
    )]
    pub config: Account<'info, EngineConfig>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializeEngine>,
    homepage_rate_cents: u64,
    category_rate_cents: u64,
    max_duration_days: u16,
) -> Result<()> {
    require!(max_duration_days >= 1, EngineError::InvalidDuration);

    let config = &mut ctx.accounts.config;
    config.admin = ctx.accounts.admin.key();
    config.pending_admin = Pubkey::default();
    config.homepage_rate_cents = homepage_rate_cents;
    config.category_rate_cents = category_rate_cents;
    config.max_duration_days = max_duration_days;
    config.orders_created = 0;
    config.chain_wallets = Vec::new();
    config.bump = ctx.bumps.config;
    Ok(())
}
