use anchor_lang::prelude::*;

use crate::errors::EngineError;
use crate::state::{EngineConfig, PaymentChain, Placement};

/// Output of the pricing calculator: what the buyer owes and where to pay.
pub struct Quote {
    pub price_usd_cents: u64,
    pub wallet_address: String,
}

/// Deterministic, side-effect-free price computation:
/// (placement, duration_days, chain) -> price in USD cents + receiving wallet.
///
/// Fails with InvalidDuration outside 1..=max_duration_days and
/// UnsupportedChain when no wallet is configured for the chain.
pub fn quote(
    config: &EngineConfig,
    placement: Placement,
    duration_days: u16,
    chain: PaymentChain,
) -> Result<Quote> {
    require!(
        duration_days >= 1 && duration_days <= config.max_duration_days,
        EngineError::InvalidDuration
    );

    let daily_rate_cents = match placement {
        Placement::Homepage => config.homepage_rate_cents,
        Placement::CategoryTop => config.category_rate_cents,
    };

    let price_usd_cents = daily_rate_cents
        .checked_mul(duration_days as u64)
        .ok_or(error!(EngineError::PriceOverflow))?;

    let wallet_address = config
        .wallet_for(chain)
        .ok_or(error!(EngineError::UnsupportedChain))?
        .to_string();

    Ok(Quote {
        price_usd_cents,
        wallet_address,
    })
}
