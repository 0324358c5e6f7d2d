use anchor_lang::prelude::*;

use crate::errors::EngineError;
use crate::state::{EngineConfig, OrderStatus, PromotionOrder, SlotPool, SECONDS_PER_DAY};

#[derive(Accounts)]
pub struct ApproveOrder<'info> {
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

    /// The pool the order competes for; the seeds tie it to the order's
    /// placement and category so an approval can never reserve elsewhere.
    #[account(
        mut,
        seeds = [SlotPool::SEED, &[order.placement.seed_byte()], order.category_key.as_bytes()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, SlotPool>,
}

/// PaymentSubmitted -> Approved, gated by the admission decision.
///
/// Capacity is evaluated at approval time over [now, now + duration): the
/// order may have sat in review for a while and earlier occupancies may
/// have ended meanwhile. On CapacityExceeded the whole instruction fails
/// and the order is left exactly as it was, so the operator sees "slot
/// unavailable" rather than a silent rejection.
pub fn handler(ctx: Context<ApproveOrder>, expected_version: u64) -> Result<()> {
    let order = &mut ctx.accounts.order;
    let pool = &mut ctx.accounts.pool;

    // Version first: a second admin racing on the same order must see
    // ConcurrentModification, not a state error.
    order.check_version(expected_version)?;
    require!(
        order.status == OrderStatus::PaymentSubmitted,
        EngineError::InvalidState
    );

    let now = Clock::get()?.unix_timestamp;
    let ends_at = now + order.duration_days as i64 * SECONDS_PER_DAY;
    let reservation_id = pool.reserve(order.key(), now, ends_at)?;

    order.approve(ctx.accounts.admin.key(), reservation_id, now)
}
