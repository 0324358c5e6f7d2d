use anchor_lang::prelude::*;

use crate::errors::EngineError;
use crate::pricing::Quote;
use super::{ChainWallet, PaymentChain, Placement};

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Lifecycle state of a promotion order. Terminal states (`Rejected`,
/// `Expired`) are kept forever for audit; orders are never deleted once
/// payment proof exists.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Draft,
    PaymentPending,
    PaymentSubmitted,
    Approved,
    Rejected,
    Active,
    Expired,
}

impl OrderStatus {
    /// The full transition table. Every mutation of an order goes through
    /// `PromotionOrder::transition`, which consults this.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Draft, PaymentPending)
                | (PaymentPending, PaymentSubmitted)
                | (PaymentSubmitted, Approved)
                | (PaymentSubmitted, Rejected)
                | (Approved, Active)
                | (Approved, Rejected)
                | (Active, Expired)
        )
    }
}

/// One promotion purchase attempt.
/// PDA seeds = [b"order", seq_le_bytes].
///
/// Field order matters: all fixed-width fields come before the strings so
/// that off-chain scanners can memcmp-filter on `status` and read
/// `expires_at` at fixed offsets.
#[account]
pub struct PromotionOrder {
    /// Sequence number taken from EngineConfig.orders_created (PDA seed).
    pub seq: u64,
    /// The wallet that created the order and pays rent.
    pub owner: Pubkey,
    /// The externally-owned listing being promoted. Never mutated here.
    pub listing_id: Pubkey,
    /// Which capacity pool this order competes for.
    pub placement: Placement,
    /// Promotion length in days, 1..=EngineConfig.max_duration_days.
    pub duration_days: u16,
    /// Payment network for the receiving wallet.
    pub chain: PaymentChain,
    pub status: OrderStatus,
    /// SlotPool entry id held by this order (0 = none).
    pub reservation_id: u64,
    /// Optimistic-concurrency counter, incremented by every transition.
    pub version: u64,
    /// Price in USD cents, written once by request_payment.
    pub price_usd_cents: u64,
    pub created_at: i64,
    /// Unix timestamps (UTC), 0 = not yet set. Each written exactly once.
    pub submitted_at: i64,
    pub reviewed_at: i64,
    pub activated_at: i64,
    pub expires_at: i64,
    /// The admin that reviewed the order (Pubkey::default() = unreviewed).
    pub reviewed_by: Pubkey,
    /// Bump seed for this PDA.
    pub bump: u8,
    /// Category pool key; empty for homepage placement.
    pub category_key: String,
    /// Receiving wallet, written once with the price.
    pub wallet_address: String,
    /// Payment proof, written exactly once by submit_payment.
    pub tx_hash: String,
    pub screenshot_uri: String,
    pub rejection_reason: String,
}

impl PromotionOrder {
    pub const SEED: &'static [u8] = b"order";
    pub const MAX_CATEGORY_KEY_LEN: usize = 32;
    pub const MAX_TX_HASH_LEN: usize = 128;
    pub const MAX_SCREENSHOT_URI_LEN: usize = 128;
    pub const MAX_REASON_LEN: usize = 128;

    /// Byte offset of `status` in the serialized account (for memcmp
    /// filters): discriminator(8) + seq(8) + owner(32) + listing_id(32)
    /// + placement(1) + duration_days(2) + chain(1).
    pub const STATUS_OFFSET: usize = 8 + 8 + 32 + 32 + 1 + 2 + 1;
    /// Byte offset of `expires_at`: STATUS_OFFSET + status(1)
    /// + reservation_id(8) + version(8) + price(8) + created_at(8)
    /// + submitted_at(8) + reviewed_at(8) + activated_at(8).
    pub const EXPIRES_AT_OFFSET: usize = Self::STATUS_OFFSET + 1 + 8 * 7;

    // fixed fields through bump = EXPIRES_AT_OFFSET + expires_at(8)
    // + reviewed_by(32) + bump(1), then the five length-prefixed strings
    pub const SIZE: usize = Self::EXPIRES_AT_OFFSET
        + 8
        + 32
        + 1
        + (4 + Self::MAX_CATEGORY_KEY_LEN)
        + (4 + ChainWallet::MAX_ADDRESS_LEN)
        + (4 + Self::MAX_TX_HASH_LEN)
        + (4 + Self::MAX_SCREENSHOT_URI_LEN)
        + (4 + Self::MAX_REASON_LEN);

    /// Move to `next` if the transition table allows it, bumping `version`.
    pub fn transition(&mut self, next: OrderStatus) -> Result<()> {
        require!(
            self.status.can_transition_to(next),
            EngineError::InvalidState
        );
        self.status = next;
        self.version += 1;
        Ok(())
    }

    /// Optimistic-concurrency guard for review operations.
    pub fn check_version(&self, expected: u64) -> Result<()> {
        require!(
            self.version == expected,
            EngineError::ConcurrentModification
        );
        Ok(())
    }

    /// Draft -> PaymentPending. Writes price and receiving wallet exactly
    /// once; both are immutable afterwards.
    pub fn assign_invoice(&mut self, quote: Quote) -> Result<()> {
        require!(self.wallet_address.is_empty(), EngineError::InvalidState);
        self.transition(OrderStatus::PaymentPending)?;
        self.price_usd_cents = quote.price_usd_cents;
        self.wallet_address = quote.wallet_address;
        Ok(())
    }

    /// PaymentPending -> PaymentSubmitted. Proof fields are write-once: a
    /// second submission fails with AlreadySubmitted and leaves the
    /// original hash untouched.
    pub fn submit_payment(
        &mut self,
        tx_hash: String,
        screenshot_uri: Option<String>,
        now: i64,
    ) -> Result<()> {
        require!(self.tx_hash.is_empty(), EngineError::AlreadySubmitted);
        require!(
            self.status == OrderStatus::PaymentPending,
            EngineError::InvalidState
        );
        require!(!tx_hash.is_empty(), EngineError::TxHashRequired);
        require!(
            tx_hash.len() <= Self::MAX_TX_HASH_LEN,
            EngineError::TxHashTooLong
        );
        let screenshot_uri = screenshot_uri.unwrap_or_default();
        require!(
            screenshot_uri.len() <= Self::MAX_SCREENSHOT_URI_LEN,
            EngineError::ScreenshotUriTooLong
        );
        self.transition(OrderStatus::PaymentSubmitted)?;
        self.tx_hash = tx_hash;
        self.screenshot_uri = screenshot_uri;
        self.submitted_at = now;
        Ok(())
    }

    /// PaymentSubmitted -> Approved, recording the granted reservation.
    /// The caller must have obtained `reservation_id` from the pool first.
    pub fn approve(&mut self, reviewer: Pubkey, reservation_id: u64, now: i64) -> Result<()> {
        self.transition(OrderStatus::Approved)?;
        self.reservation_id = reservation_id;
        self.reviewed_at = now;
        self.reviewed_by = reviewer;
        Ok(())
    }

    /// PaymentSubmitted or pre-activation Approved -> Rejected.
    /// Review metadata is only written if this is the first review touch
    /// (a rejection of an approved order keeps the approval timestamp).
    pub fn reject(&mut self, reviewer: Pubkey, reason: String, now: i64) -> Result<()> {
        require!(!reason.is_empty(), EngineError::RejectionReasonRequired);
        require!(
            reason.len() <= Self::MAX_REASON_LEN,
            EngineError::RejectionReasonTooLong
        );
        self.transition(OrderStatus::Rejected)?;
        if self.reviewed_at == 0 {
            self.reviewed_at = now;
            self.reviewed_by = reviewer;
        }
        self.rejection_reason = reason;
        Ok(())
    }

    /// Approved -> Active. Anchors the promotion window at `now`.
    pub fn activate(&mut self, now: i64) -> Result<()> {
        self.transition(OrderStatus::Active)?;
        self.activated_at = now;
        self.expires_at = now + self.duration_days as i64 * SECONDS_PER_DAY;
        Ok(())
    }

    /// Active -> Expired. Time check is the caller's job (sweep handler).
    pub fn expire(&mut self) -> Result<()> {
        self.transition(OrderStatus::Expired)
    }

    /// Public read surface: is this listing currently occupying a slot?
    pub fn is_live(&self, now: i64) -> bool {
        self.status == OrderStatus::Active && now < self.expires_at
    }
}
