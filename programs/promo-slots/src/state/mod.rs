use anchor_lang::prelude::*;

pub mod order;
pub mod pool;
pub use order::*;
pub use pool::*;

/// Which advertising position a promotion occupies. Determines the
/// capacity pool (together with `category_key` for `CategoryTop`).
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Homepage,
    CategoryTop,
}

impl Placement {
    /// Single byte used in pool PDA seeds.
    pub fn seed_byte(&self) -> u8 {
        *self as u8
    }
}

/// Payment network the buyer pays on. Purely informational plus selects
/// the receiving wallet; no on-chain verification of the foreign chain.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq)]
pub enum PaymentChain {
    Ethereum,
    Polygon,
    Bsc,
    Tron,
}

/// Receiving wallet for one payment chain. Embedded in EngineConfig.
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct ChainWallet {
    pub chain: PaymentChain,
    /// Chain-native address string (hex or base58, max 64 bytes).
    pub address: String,
}

impl ChainWallet {
    pub const MAX_ADDRESS_LEN: usize = 64;
    // chain(1) + address(4 + MAX_ADDRESS_LEN)
    pub const SIZE: usize = 1 + 4 + Self::MAX_ADDRESS_LEN;
}

/// Global engine configuration. Singleton PDA (seeds = [b"config"]).
///
/// Capacities live on the individual SlotPool accounts; this account holds
/// pricing, duration bounds and the per-chain receiving wallets.
#[account]
pub struct EngineConfig {
    /// The admin who initialized the engine (review authority).
    pub admin: Pubkey,
    /// Pending admin for two-step transfer (Pubkey::default() = none).
    pub pending_admin: Pubkey,
    /// USD cents per promoted day on the homepage.
    pub homepage_rate_cents: u64,
    /// USD cents per promoted day on top of a category page.
    pub category_rate_cents: u64,
    /// Upper bound for PromotionOrder.duration_days (lower bound is 1).
    pub max_duration_days: u16,
    /// Monotonic order counter; next order PDA seed.
    pub orders_created: u64,
    /// Receiving wallets, at most one per chain.
    pub chain_wallets: Vec<ChainWallet>,
    /// Bump seed for the config PDA.
    pub bump: u8,
}

impl EngineConfig {
    pub const SEED: &'static [u8] = b"config";
    pub const MAX_CHAIN_WALLETS: usize = 8;
    // discriminator(8) + admin(32) + pending_admin(32) + homepage_rate(8)
    // + category_rate(8) + max_duration_days(2) + orders_created(8)
    // + chain_wallets(4 + MAX * ChainWallet::SIZE) + bump(1)
    pub const SIZE: usize =
        8 + 32 + 32 + 8 + 8 + 2 + 8 + 4 + Self::MAX_CHAIN_WALLETS * ChainWallet::SIZE + 1;

    /// Receiving wallet for `chain`, if one is configured.
    pub fn wallet_for(&self, chain: PaymentChain) -> Option<&str> {
        self.chain_wallets
            .iter()
            .find(|w| w.chain == chain && !w.address.is_empty())
            .map(|w| w.address.as_str())
    }

    /// Insert or replace the wallet for `chain`.
    pub fn set_wallet(&mut self, chain: PaymentChain, address: String) -> Result<()> {
        if let Some(entry) = self.chain_wallets.iter_mut().find(|w| w.chain == chain) {
            entry.address = address;
            return Ok(());
        }
        require!(
            self.chain_wallets.len() < Self::MAX_CHAIN_WALLETS,
            crate::errors::EngineError::ChainWalletListFull
        );
        self.chain_wallets.push(ChainWallet { chain, address });
        Ok(())
    }
}
