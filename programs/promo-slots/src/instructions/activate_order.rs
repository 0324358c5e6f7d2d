use anchor_lang::prelude::*;

use crate::errors::EngineError;
use crate::state::{EngineConfig, PromotionOrder, SlotPool};

#[derive(Accounts)]
pub struct ActivateOrder<'info> {
    #[account(
        constraint = admin.key() == config.admin @ EngineError::AdminOnly,
    )]
    pub admin: Signer<'info>,

    #[account(
        seeds = [EngineConfig::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, EngineConfig>,

    #[account(mut)]
    pub order: Account<'info, PromotionOrder>,

    #[account(
        mut,
        seeds = [SlotPool::SEED, &[order.placement.seed_byte()], order.category_key.as_bytes()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, SlotPool>,
}

/// Approved -> Active: the slot goes live now. expires_at is anchored at
/// the activation instant and the held pool entry is re-anchored to the
/// real occupancy window.
pub fn handler(ctx: Context<ActivateOrder>) -> Result<()> {
    let order = &mut ctx.accounts.order;
    let pool = &mut ctx.accounts.pool;

    require!(order.reservation_id != 0, EngineError::ReservationNotFound);

    let now = Clock::get()?.unix_timestamp;
    order.activate(now)?;
    pool.reanchor(order.reservation_id, order.activated_at, order.expires_at)
}
