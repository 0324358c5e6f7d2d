//! End-to-end lifecycle coverage over the state types: the handler layer
//! is thin account wiring around these methods, so the admission and
//! state-machine properties are exercised here without a test validator.

use anchor_lang::error::{Error, ERROR_CODE_OFFSET};
use anchor_lang::prelude::Pubkey;

use promo_slots::errors::EngineError;
use promo_slots::pricing::{self, Quote};
use promo_slots::state::{
    ChainWallet, EngineConfig, OrderStatus, PaymentChain, Placement, PromotionOrder, SlotPool,
    SECONDS_PER_DAY,
};

const T0: i64 = 1_700_000_000;

fn engine_config() -> EngineConfig {
    EngineConfig {
        admin: Pubkey::new_unique(),
        pending_admin: Pubkey::default(),
        homepage_rate_cents: 500,
        category_rate_cents: 200,
        max_duration_days: 30,
        orders_created: 0,
        chain_wallets: vec![ChainWallet {
            chain: PaymentChain::Tron,
            address: "TQn9Y2khEsLJW1ChVWFMSMeRDow5KcbLSE".to_string(),
        }],
        bump: 255,
    }
}

fn homepage_pool(capacity: u16) -> SlotPool {
    SlotPool {
        placement: Placement::Homepage,
        capacity,
        next_entry_id: 0,
        bump: 255,
        category_key: String::new(),
        entries: Vec::new(),
    }
}

fn draft_order(config: &mut EngineConfig, duration_days: u16) -> PromotionOrder {
    let order = PromotionOrder {
        seq: config.orders_created,
        owner: Pubkey::new_unique(),
        listing_id: Pubkey::new_unique(),
        placement: Placement::Homepage,
        duration_days,
        chain: PaymentChain::Tron,
        status: OrderStatus::Draft,
        reservation_id: 0,
        version: 0,
        price_usd_cents: 0,
        created_at: T0,
        submitted_at: 0,
        reviewed_at: 0,
        activated_at: 0,
        expires_at: 0,
        reviewed_by: Pubkey::default(),
        bump: 255,
        category_key: String::new(),
        wallet_address: String::new(),
        tx_hash: String::new(),
        screenshot_uri: String::new(),
        rejection_reason: String::new(),
    };
    config.orders_created += 1;
    order
}

/// Walk an order to the review queue: invoice + payment proof.
fn submit(config: &EngineConfig, order: &mut PromotionOrder, now: i64) {
    let quote = pricing::quote(config, order.placement, order.duration_days, order.chain).unwrap();
    order.assign_invoice(quote).unwrap();
    order
        .submit_payment(format!("0x{}", order.seq), None, now)
        .unwrap();
}

/// Replicates the approve handler: status gate, version gate, admission,
/// then the state change. Capacity denial leaves the order untouched.
fn approve(
    order: &mut PromotionOrder,
    pool: &mut SlotPool,
    reviewer: Pubkey,
    expected_version: u64,
    now: i64,
) -> Result<(), Error> {
    order.check_version(expected_version)?;
    if order.status != OrderStatus::PaymentSubmitted {
        return Err(EngineError::InvalidState.into());
    }
    let ends_at = now + order.duration_days as i64 * SECONDS_PER_DAY;
    let order_key = Pubkey::new_unique();
    let reservation_id = pool.reserve(order_key, now, ends_at)?;
    order.approve(reviewer, reservation_id, now)
}

/// Replicates the sweep handler on a single order.
fn sweep(order: &mut PromotionOrder, pool: &mut SlotPool, now: i64) -> Result<(), Error> {
    if order.status == OrderStatus::Expired {
        return Ok(());
    }
    if order.status != OrderStatus::Active {
        return Err(EngineError::InvalidState.into());
    }
    if now < order.expires_at {
        return Err(EngineError::NotYetExpired.into());
    }
    order.expire()?;
    pool.release(order.reservation_id);
    Ok(())
}

fn code(err: Error) -> u32 {
    match err {
        Error::AnchorError(e) => e.error_code_number,
        other => panic!("unexpected error kind: {:?}", other),
    }
}

fn assert_err(err: Error, expected: EngineError) {
    assert_eq!(code(err), expected as u32 + ERROR_CODE_OFFSET);
}

#[test]
fn capacity_one_contention_then_expiry_frees_the_slot() {
    let mut config = engine_config();
    let mut pool = homepage_pool(1);
    let reviewer = Pubkey::new_unique();

    let mut a = draft_order(&mut config, 7);
    let mut b = draft_order(&mut config, 7);
    submit(&config, &mut a, T0);
    submit(&config, &mut b, T0 + 60);

    let a_version = a.version;
    approve(&mut a, &mut pool, reviewer, a_version, T0 + 100).unwrap();
    a.activate(T0 + 120).unwrap();
    pool.reanchor(a.reservation_id, a.activated_at, a.expires_at)
        .unwrap();

    // B wants an overlapping window: denied, and B is untouched
    let b_version = b.version;
    let err = approve(&mut b, &mut pool, reviewer, b_version, T0 + 200).unwrap_err();
    assert_err(err, EngineError::CapacityExceeded);
    assert!(b.status == OrderStatus::PaymentSubmitted);
    assert_eq!(b.version, b_version);
    assert_eq!(b.reservation_id, 0);

    // A expires; the sweeper frees the slot
    let after = a.expires_at;
    sweep(&mut a, &mut pool, after).unwrap();
    assert!(a.status == OrderStatus::Expired);

    // now B is admitted for the same window
    let b_version = b.version;
    approve(&mut b, &mut pool, reviewer, b_version, after).unwrap();
    assert!(b.status == OrderStatus::Approved);
}

#[test]
fn price_and_wallet_survive_every_transition() {
    let mut config = engine_config();
    let mut pool = homepage_pool(1);
    let mut o = draft_order(&mut config, 14);

    let quote = pricing::quote(&config, o.placement, o.duration_days, o.chain).unwrap();
    o.assign_invoice(quote).unwrap();
    let price = o.price_usd_cents;
    let wallet = o.wallet_address.clone();
    assert_eq!(price, 500 * 14);

    o.submit_payment("0xdeadbeef".to_string(), None, T0).unwrap();
    let version = o.version;
    approve(&mut o, &mut pool, Pubkey::new_unique(), version, T0 + 10).unwrap();
    o.activate(T0 + 20).unwrap();
    pool.reanchor(o.reservation_id, o.activated_at, o.expires_at)
        .unwrap();
    let expires_at = o.expires_at;
    sweep(&mut o, &mut pool, expires_at).unwrap();

    assert_eq!(o.price_usd_cents, price);
    assert_eq!(o.wallet_address, wallet);
    assert_eq!(o.tx_hash, "0xdeadbeef");
}

#[test]
fn stale_version_approval_mutates_nothing() {
    let mut config = engine_config();
    let mut pool = homepage_pool(3);
    let reviewer = Pubkey::new_unique();
    let mut o = draft_order(&mut config, 7);
    submit(&config, &mut o, T0);

    let v = o.version;
    // first admin wins
    approve(&mut o, &mut pool, reviewer, v, T0 + 10).unwrap();
    // second admin carries the stale version: rejected, no new reservation
    let err = approve(&mut o, &mut pool, reviewer, v, T0 + 11).unwrap_err();
    assert_err(err, EngineError::ConcurrentModification);
    assert_eq!(pool.entries.len(), 1);

    // the stale-version path itself, on a reviewable order
    let mut p = draft_order(&mut config, 7);
    submit(&config, &mut p, T0);
    let stale = p.version + 1;
    let err = approve(&mut p, &mut pool, reviewer, stale, T0 + 10).unwrap_err();
    assert_err(err, EngineError::ConcurrentModification);
    assert!(p.status == OrderStatus::PaymentSubmitted);
    assert_eq!(pool.entries.len(), 1);
}

#[test]
fn pre_activation_rejection_frees_the_window_immediately() {
    let mut config = engine_config();
    let mut pool = homepage_pool(1);
    let reviewer = Pubkey::new_unique();

    let mut a = draft_order(&mut config, 7);
    submit(&config, &mut a, T0);
    let a_version = a.version;
    approve(&mut a, &mut pool, reviewer, a_version, T0 + 10).unwrap();

    // rejected before activation, e.g. a duplicate payment
    pool.release(a.reservation_id);
    a.reject(reviewer, "duplicate payment".to_string(), T0 + 20)
        .unwrap();
    assert!(a.status == OrderStatus::Rejected);
    assert_eq!(a.rejection_reason, "duplicate payment");

    // the window is available to the next order at once
    let mut b = draft_order(&mut config, 7);
    submit(&config, &mut b, T0);
    let b_version = b.version;
    approve(&mut b, &mut pool, reviewer, b_version, T0 + 30).unwrap();
}

#[test]
fn second_payment_submission_fails_and_keeps_the_original_hash() {
    let mut config = engine_config();
    let mut o = draft_order(&mut config, 7);
    let quote = pricing::quote(&config, o.placement, o.duration_days, o.chain).unwrap();
    o.assign_invoice(quote).unwrap();

    o.submit_payment("0xoriginal".to_string(), None, T0).unwrap();
    let err = o
        .submit_payment("0xreplacement".to_string(), None, T0 + 5)
        .unwrap_err();
    assert_err(err, EngineError::AlreadySubmitted);
    assert_eq!(o.tx_hash, "0xoriginal");
    assert_eq!(o.submitted_at, T0);
}

#[test]
fn duplicate_sweep_passes_are_harmless() {
    let mut config = engine_config();
    let mut pool = homepage_pool(1);
    let mut o = draft_order(&mut config, 7);
    submit(&config, &mut o, T0);
    let version = o.version;
    approve(&mut o, &mut pool, Pubkey::new_unique(), version, T0 + 10).unwrap();
    o.activate(T0 + 20).unwrap();
    pool.reanchor(o.reservation_id, o.activated_at, o.expires_at)
        .unwrap();
    let expires_at = o.expires_at;

    // premature sweep refused
    let err = sweep(&mut o, &mut pool, expires_at - 1).unwrap_err();
    assert_err(err, EngineError::NotYetExpired);

    let v = {
        sweep(&mut o, &mut pool, expires_at).unwrap();
        o.version
    };
    // a racing second pass is a no-op, not an error
    sweep(&mut o, &mut pool, expires_at + 60).unwrap();
    assert_eq!(o.version, v);
    assert_eq!(pool.overlap_count(o.activated_at, o.expires_at), 0);
}

#[test]
fn late_activation_cannot_collide_with_a_later_approval() {
    let mut config = engine_config();
    let mut pool = homepage_pool(1);
    let reviewer = Pubkey::new_unique();
    let day = SECONDS_PER_DAY;

    // A approved now for [T0, T0+7d)
    let mut a = draft_order(&mut config, 7);
    submit(&config, &mut a, T0);
    let a_version = a.version;
    approve(&mut a, &mut pool, reviewer, a_version, T0).unwrap();

    // B approved once A's reservation has lapsed, for [T0+7d, T0+14d)
    let mut b = draft_order(&mut config, 7);
    submit(&config, &mut b, T0);
    let b_version = b.version;
    approve(&mut b, &mut pool, reviewer, b_version, T0 + 7 * day).unwrap();

    // A only activates on day 8: its shifted occupancy would overlap B
    a.activate(T0 + 8 * day).unwrap();
    let err = pool
        .reanchor(a.reservation_id, a.activated_at, a.expires_at)
        .unwrap_err();
    assert_err(err, EngineError::CapacityExceeded);

    // capacity 1 is never exceeded at any instant
    for t in (T0..T0 + 15 * day).step_by(day as usize) {
        assert!(pool.overlap_count(t, t + 1) <= pool.capacity as usize);
    }
}

#[test]
fn pool_capacity_never_exceeded_at_any_instant() {
    let mut pool = homepage_pool(2);
    let day = SECONDS_PER_DAY;

    // staggered admitted windows
    pool.reserve(Pubkey::new_unique(), T0, T0 + 7 * day).unwrap();
    pool.reserve(Pubkey::new_unique(), T0 + 3 * day, T0 + 10 * day)
        .unwrap();
    // a third overlapping both is denied
    assert!(pool
        .reserve(Pubkey::new_unique(), T0 + 4 * day, T0 + 5 * day)
        .is_err());
    // but one that only overlaps the second is admitted
    pool.reserve(Pubkey::new_unique(), T0 + 8 * day, T0 + 12 * day)
        .unwrap();

    for t in (T0..T0 + 12 * day).step_by(day as usize / 2) {
        assert!(pool.overlap_count(t, t + 1) <= pool.capacity as usize);
    }
}

#[test]
fn quote_is_deterministic() {
    let config = engine_config();
    let a = pricing::quote(&config, Placement::Homepage, 7, PaymentChain::Tron).unwrap();
    let b = pricing::quote(&config, Placement::Homepage, 7, PaymentChain::Tron).unwrap();
    let Quote {
        price_usd_cents,
        wallet_address,
    } = a;
    assert_eq!(price_usd_cents, b.price_usd_cents);
    assert_eq!(wallet_address, b.wallet_address);
}
