use anchor_lang::prelude::*;

use crate::errors::EngineError;
use crate::state::{EngineConfig, Placement, SlotPool};

#[derive(Accounts)]
#[instruction(placement: Placement, category_key: String)]
pub struct CreatePool<'info> {
    #[account(
        mut,
        constraint = admin.key() == config.admin @ EngineError::AdminOnly,
    )]
    pub admin: Signer<'info>,

    #[account(
        seeds = [EngineConfig::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, EngineConfig>,

    /// One pool per (placement, category_key). Homepage pools use an
    /// empty category_key.
    #[account(
        init,
        payer = admin,
        space = SlotPool::SIZE,
        seeds = [SlotPool::SEED, &[placement.seed_byte()], category_key.as_bytes()],
        bump,
    )]
    pub pool: Account<'info, SlotPool>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<CreatePool>,
    placement: Placement,
    category_key: String,
    capacity: u16,
) -> Result<()> {
    require!(capacity >= 1, EngineError::InvalidCapacity);
    require!(
        category_key.len() <= SlotPool::MAX_CATEGORY_KEY_LEN,
        EngineError::CategoryKeyTooLong
    );
    match placement {
        Placement::CategoryTop => {
            require!(!category_key.is_empty(), EngineError::CategoryKeyRequired)
        }
        Placement::Homepage => {
            require!(category_key.is_empty(), EngineError::CategoryKeyNotAllowed)
        }
    }

    let pool = &mut ctx.accounts.pool;
    pool.placement = placement;
    pool.capacity = capacity;
    pool.next_entry_id = 0;
    pool.bump = ctx.bumps.pool;
    pool.category_key = category_key;
    pool.entries = Vec::new();
    Ok(())
}
