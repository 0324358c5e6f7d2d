use anchor_lang::prelude::*;

use crate::state::EngineConfig;

/// Begin handing the review authority to a new wallet. The engine has a
/// single admin (the payment reviewer); the handoff is two-step so a typo
/// in the new pubkey cannot orphan the review queue.
#[derive(Accounts)]
pub struct TransferAdmin<'info> {
    #[account(
        constraint = admin.key() == config.admin,
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [EngineConfig::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, EngineConfig>,
}

pub fn handler(ctx: Context<TransferAdmin>, new_admin: Pubkey) -> Result<()> {
    ctx.accounts.config.pending_admin = new_admin;
    Ok(())
}
