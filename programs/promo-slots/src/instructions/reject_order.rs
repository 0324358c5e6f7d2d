use anchor_lang::prelude::*;

use crate::errors::EngineError;
use crate::state::{EngineConfig, OrderStatus, PromotionOrder, SlotPool};

#[derive(Accounts)]
pub struct RejectOrder<'info> {
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

    /// Required when the order holds a reservation (pre-activation
    /// rejection of an approved order); unused for payment_submitted
    /// rejections, whose pool may not even exist yet.
    #[account(
        mut,
        seeds = [SlotPool::SEED, &[order.placement.seed_byte()], order.category_key.as_bytes()],
        bump = pool.bump,
    )]
    pub pool: Option<Account<'info, SlotPool>>,
}

/// PaymentSubmitted or pre-activation Approved -> Rejected. Requires a
/// non-empty reason and releases any held reservation so the window is
/// immediately available to others. Post-payment cancellation requests go
/// through this path too; the order account is kept for audit.
pub fn handler(ctx: Context<RejectOrder>, reason: String, expected_version: u64) -> Result<()> {
    let order = &mut ctx.accounts.order;

    order.check_version(expected_version)?;
    require!(
        order.status == OrderStatus::PaymentSubmitted || order.status == OrderStatus::Approved,
        EngineError::InvalidState
    );

    if order.reservation_id != 0 {
        let pool = ctx
            .accounts
            .pool
            .as_mut()
            .ok_or(error!(EngineError::MissingPoolAccount))?;
        pool.release(order.reservation_id);
    }

    let now = Clock::get()?.unix_timestamp;
    order.reject(ctx.accounts.admin.key(), reason, now)
}
