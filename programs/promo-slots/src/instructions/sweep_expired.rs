use anchor_lang::prelude::*;

use crate::errors::EngineError;
use crate::state::{OrderStatus, PromotionOrder, SlotPool};

#[derive(Accounts)]
pub struct SweepExpired<'info> {
    /// Anyone may crank expiry; the off-chain sweeper runs this on an
    /// interval, and concurrent sweepers are safe.
    pub cranker: Signer<'info>,

    #[account(mut)]
    pub order: Account<'info, PromotionOrder>,

    #[account(
        mut,
        seeds = [SlotPool::SEED, &[order.placement.seed_byte()], order.category_key.as_bytes()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, SlotPool>,
}

/// Active -> Expired once expires_at has passed, freeing the occupancy.
/// A sweep of an already-expired order is a no-op success so duplicate
/// passes (or racing sweeper instances) are harmless.
pub fn handler(ctx: Context<SweepExpired>) -> Result<()> {
    let order = &mut ctx.accounts.order;
    let pool = &mut ctx.accounts.pool;

    if order.status == OrderStatus::Expired {
        return Ok(());
    }
    require!(order.status == OrderStatus::Active, EngineError::InvalidState);

    let now = Clock::get()?.unix_timestamp;
    require!(now >= order.expires_at, EngineError::NotYetExpired);

    order.expire()?;
    pool.release(order.reservation_id);
    Ok(())
}
