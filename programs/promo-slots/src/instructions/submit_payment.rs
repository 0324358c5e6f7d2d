use anchor_lang::prelude::*;

use crate::errors::EngineError;
use crate::state::PromotionOrder;

#[derive(Accounts)]
pub struct SubmitPayment<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        has_one = owner @ EngineError::Unauthorized,
    )]
    pub order: Account<'info, PromotionOrder>,
}

/// PaymentPending -> PaymentSubmitted: record the proof of payment and
/// put the order in the review queue. Proof is write-once; a replayed
/// submission fails with AlreadySubmitted and changes nothing.
pub fn handler(
    ctx: Context<SubmitPayment>,
    tx_hash: String,
    screenshot_uri: Option<String>,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.order.submit_payment(tx_hash, screenshot_uri, now)
}
