use anchor_lang::prelude::*;

use crate::errors::EngineError;
use crate::state::{OrderStatus, PromotionOrder};

#[derive(Accounts)]
pub struct CloseOrder<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Closable only before money moves (Draft / PaymentPending). Once
    /// payment proof exists the order is permanent; cancellation after
    /// that point is a rejection, keeping the audit trail append-only.
    #[account(
        mut,
        has_one = owner @ EngineError::Unauthorized,
        close = owner,
    )]
    pub order: Account<'info, PromotionOrder>,
}

pub fn handler(ctx: Context<CloseOrder>) -> Result<()> {
    let status = ctx.accounts.order.status;
    require!(
        status == OrderStatus::Draft || status == OrderStatus::PaymentPending,
        EngineError::InvalidState
    );
    Ok(())
}
