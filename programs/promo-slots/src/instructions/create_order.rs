use anchor_lang::prelude::*;

use crate::errors::EngineError;
use crate::state::{EngineConfig, OrderStatus, PaymentChain, Placement, PromotionOrder};

#[derive(Accounts)]
pub struct CreateOrder<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Provides duration bounds, chain wallets and the order sequence.
    #[account(
        mut,
        seeds = [EngineConfig::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, EngineConfig>,

    #[account(
        init,
        payer = owner,
        space = PromotionOrder::SIZE,
        seeds = [PromotionOrder::SEED, &config.orders_created.to_le_bytes()],
        bump,
    )]
    pub order: Account<'info, PromotionOrder>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<CreateOrder>,
    listing_id: Pubkey,
    placement: Placement,
    category_key: String,
    duration_days: u16,
    chain: PaymentChain,
) -> Result<()> {
    let config = &mut ctx.accounts.config;

    // Bad input is rejected at creation, before any money can move.
    require!(
        duration_days >= 1 && duration_days <= config.max_duration_days,
        EngineError::InvalidDuration
    );
    require!(
        config.wallet_for(chain).is_some(),
        EngineError::UnsupportedChain
    );
    require!(
        category_key.len() <= PromotionOrder::MAX_CATEGORY_KEY_LEN,
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

    let order = &mut ctx.accounts.order;
    order.seq = config.orders_created;
    order.owner = ctx.accounts.owner.key();
    order.listing_id = listing_id;
    order.placement = placement;
    order.duration_days = duration_days;
    order.chain = chain;
    order.status = OrderStatus::Draft;
    order.reservation_id = 0;
    order.version = 0;
    order.price_usd_cents = 0;
    order.created_at = Clock::get()?.unix_timestamp;
    order.submitted_at = 0;
    order.reviewed_at = 0;
    order.activated_at = 0;
    order.expires_at = 0;
    order.reviewed_by = Pubkey::default();
    order.bump = ctx.bumps.order;
    order.category_key = category_key;
    order.wallet_address = String::new();
    order.tx_hash = String::new();
    order.screenshot_uri = String::new();
    order.rejection_reason = String::new();

    config.orders_created += 1;
    Ok(())
}
