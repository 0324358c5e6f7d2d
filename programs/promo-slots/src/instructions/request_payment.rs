use anchor_lang::prelude::*;

use crate::errors::EngineError;
use crate::pricing;
use crate::state::{EngineConfig, PromotionOrder};

#[derive(Accounts)]
pub struct RequestPayment<'info> {
    pub owner: Signer<'info>,

    #[account(
        seeds = [EngineConfig::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, EngineConfig>,

    #[account(
        mut,
        has_one = owner @ EngineError::Unauthorized,
    )]
    pub order: Account<'info, PromotionOrder>,
}

/// Draft -> PaymentPending: price the order and assign the receiving
/// wallet for its chain. Both are written exactly once.
pub fn handler(ctx: Context<RequestPayment>) -> Result<()> {
    let order = &mut ctx.accounts.order;
    let quote = pricing::quote(
        &ctx.accounts.config,
        order.placement,
        order.duration_days,
        order.chain,
    )?;
    order.assign_invoice(quote)
}
