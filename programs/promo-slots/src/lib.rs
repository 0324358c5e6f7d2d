use anchor_lang::prelude::*;

pub mod errors;
pub mod instructions;
pub mod pricing;
pub mod state;

use instructions::*;
use state::{PaymentChain, Placement};

declare_id!("8bQ7grrr9M8KFijQHqRm9shh11TKwVWACdmQyptCuk9t");

#[program]
pub mod promo_slots {
    use super::*;

    /// Initialize the global engine config. Called once by the deployer.
    pub fn initialize_engine(
        ctx: Context<InitializeEngine>,
        homepage_rate_cents: u64,
        category_rate_cents: u64,
        max_duration_days: u16,
    ) -> Result<()> {
        instructions::initialize_engine::handler(
            ctx,
            homepage_rate_cents,
            category_rate_cents,
            max_duration_days,
        )
    }

    /// Set or replace the receiving wallet for a payment chain (admin only).
    pub fn set_chain_wallet(
        ctx: Context<SetChainWallet>,
        chain: PaymentChain,
        address: String,
    ) -> Result<()> {
        instructions::set_chain_wallet::handler(ctx, chain, address)
    }

    /// Create a capacity pool for a placement (admin only).
    /// `category_key` must be empty for homepage pools.
    pub fn create_pool(
        ctx: Context<CreatePool>,
        placement: Placement,
        category_key: String,
        capacity: u16,
    ) -> Result<()> {
        instructions::create_pool::handler(ctx, placement, category_key, capacity)
    }

    /// Create a draft promotion order for a listing.
    pub fn create_order(
        ctx: Context<CreateOrder>,
        listing_id: Pubkey,
        placement: Placement,
        category_key: String,
        duration_days: u16,
        chain: PaymentChain,
    ) -> Result<()> {
        instructions::create_order::handler(
            ctx,
            listing_id,
            placement,
            category_key,
            duration_days,
            chain,
        )
    }

    /// Price the order and assign its receiving wallet (owner only).
    pub fn request_payment(ctx: Context<RequestPayment>) -> Result<()> {
        instructions::request_payment::handler(ctx)
    }

    /// Record proof of payment and enter the review queue (owner only).
    pub fn submit_payment(
        ctx: Context<SubmitPayment>,
        tx_hash: String,
        screenshot_uri: Option<String>,
    ) -> Result<()> {
        instructions::submit_payment::handler(ctx, tx_hash, screenshot_uri)
    }

    /// Approve a submitted order, reserving slot capacity (admin only).
    /// Fails with CapacityExceeded when the pool is full for the window.
    pub fn approve_order(ctx: Context<ApproveOrder>, expected_version: u64) -> Result<()> {
        instructions::approve_order::handler(ctx, expected_version)
    }

    /// Reject a submitted or not-yet-active order, releasing any held
    /// reservation (admin only). Requires a non-empty reason.
    pub fn reject_order(
        ctx: Context<RejectOrder>,
        reason: String,
        expected_version: u64,
    ) -> Result<()> {
        instructions::reject_order::handler(ctx, reason, expected_version)
    }

    /// Put an approved order live on its slot (admin only).
    pub fn activate_order(ctx: Context<ActivateOrder>) -> Result<()> {
        instructions::activate_order::handler(ctx)
    }

    /// Expire an active order whose window has passed (permissionless).
    pub fn sweep_expired(ctx: Context<SweepExpired>) -> Result<()> {
        instructions::sweep_expired::handler(ctx)
    }

    /// Close a draft/payment_pending order before money moves (owner only).
    pub fn close_order(ctx: Context<CloseOrder>) -> Result<()> {
        instructions::close_order::handler(ctx)
    }

    /// Start a two-step admin handoff (current admin only).
    pub fn transfer_admin(ctx: Context<TransferAdmin>, new_admin: Pubkey) -> Result<()> {
        instructions::transfer_admin::handler(ctx, new_admin)
    }

    /// Complete a pending admin handoff (pending admin only).
    pub fn accept_admin(ctx: Context<AcceptAdmin>) -> Result<()> {
        instructions::accept_admin::handler(ctx)
    }
}
