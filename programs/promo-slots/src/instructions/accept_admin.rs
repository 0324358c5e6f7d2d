use anchor_lang::prelude::*;

use crate::errors::EngineError;
use crate::state::EngineConfig;

/// Second half of the admin handoff: the designated wallet claims the
/// review authority. Until this lands, the previous admin keeps
/// approving and rejecting orders.
#[derive(Accounts)]
pub struct AcceptAdmin<'info> {
    pub new_admin: Signer<'info>,

    #[account(
        mut,
        seeds = [EngineConfig::SEED],
        bump = config.bump,
        constraint = config.pending_admin == new_admin.key() @ EngineError::Unauthorized,
        constraint = config.pending_admin != Pubkey::default() @ EngineError::Unauthorized,
    )]
    pub config: Account<'info, EngineConfig>,
}

pub fn handler(ctx: Context<AcceptAdmin>) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.admin = config.pending_admin;
    config.pending_admin = Pubkey::default();
    Ok(())
}
