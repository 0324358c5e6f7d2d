use anchor_lang::prelude::*;

use crate::errors::EngineError;
use crate::state::{ChainWallet, EngineConfig, PaymentChain};

#[derive(Accounts)]
pub struct SetChainWallet<'info> {
    #[account(
        constraint = admin.key() == config.admin @ EngineError::AdminOnly,
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [EngineConfig::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, EngineConfig>,
}

pub fn handler(ctx: Context<SetChainWallet>, chain: PaymentChain, address: String) -> Result<()> {
    require!(!address.is_empty(), EngineError::WalletAddressRequired);
    require!(
        address.len() <= ChainWallet::MAX_ADDRESS_LEN,
        EngineError::WalletAddressTooLong
    );

    ctx.accounts.config.set_wallet(chain, address)
}
