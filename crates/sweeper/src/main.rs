//! Expiry crank for the promo-slots engine.
//!
//! Scans the cluster for `Active` promotion orders whose window has
//! passed and sends a `sweep_expired` transaction for each. The on-chain
//! instruction is idempotent, so running several sweeper instances (or
//! re-running after a crash) is safe.

use std::error::Error;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anchor_lang::AccountDeserialize;
use clap::Parser;
use solana_account_decoder::UiAccountEncoding;
use solana_client::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signer},
    transaction::Transaction,
};

use promo_slots::state::{OrderStatus, PromotionOrder, SlotPool};

#[derive(Parser)]
#[command(name = "promo-sweeper")]
#[command(about = "Expiry sweeper for the promo-slots engine")]
struct Cli {
    /// Path to the fee-payer keypair JSON file
    keypair: String,

    /// Solana cluster (localnet, devnet, mainnet-beta, or a custom RPC URL)
    #[arg(long, default_value = "localnet")]
    cluster: String,

    /// Seconds between sweep passes
    #[arg(long, default_value = "60")]
    interval_secs: u64,

    /// Run a single pass and exit
    #[arg(long)]
    once: bool,

    /// Print a JSON summary of each pass to stdout
    #[arg(long)]
    json: bool,

    /// Print progress/debug info to stderr
    #[arg(long)]
    verbose: bool,
}

fn cluster_url(cluster: &str) -> String {
    match cluster {
        "localnet" => "http://127.0.0.1:8899".to_string(),
        "devnet" => "https://api.devnet.solana.com".to_string(),
        "mainnet-beta" => "https://api.mainnet-beta.solana.com".to_string(),
        url => url.to_string(),
    }
}

/// Anchor instruction discriminator: first 8 bytes of SHA-256("global:<name>")
fn sighash(name: &str) -> Vec<u8> {
    let hash = solana_sdk::hash::hash(format!("global:{}", name).as_bytes());
    hash.to_bytes()[..8].to_vec()
}

fn pool_pda(order: &PromotionOrder) -> Pubkey {
    Pubkey::find_program_address(
        &[
            SlotPool::SEED,
            &[order.placement.seed_byte()],
            order.category_key.as_bytes(),
        ],
        &promo_slots::ID,
    )
    .0
}

fn ix_sweep_expired(cranker: &Pubkey, order_addr: &Pubkey, pool_addr: &Pubkey) -> Instruction {
    Instruction::new_with_bytes(
        promo_slots::ID,
        &sighash("sweep_expired"),
        vec![
            AccountMeta::new_readonly(*cranker, true),
            AccountMeta::new(*order_addr, false),
            AccountMeta::new(*pool_addr, false),
        ],
    )
}

/// Fetch every order currently in `Active`, via a memcmp filter on the
/// status byte (fixed offset, see PromotionOrder layout).
fn fetch_active_orders(
    client: &RpcClient,
) -> Result<Vec<(Pubkey, PromotionOrder)>, Box<dyn Error>> {
    let filters = vec![
        RpcFilterType::DataSize(PromotionOrder::SIZE as u64),
        RpcFilterType::Memcmp(Memcmp::new_raw_bytes(
            PromotionOrder::STATUS_OFFSET,
            vec![OrderStatus::Active as u8],
        )),
    ];
    let config = RpcProgramAccountsConfig {
        filters: Some(filters),
        account_config: RpcAccountInfoConfig {
            encoding: Some(UiAccountEncoding::Base64),
            ..RpcAccountInfoConfig::default()
        },
        ..RpcProgramAccountsConfig::default()
    };

    let accounts = client.get_program_accounts_with_config(&promo_slots::ID, config)?;
    let mut orders = Vec::with_capacity(accounts.len());
    for (addr, account) in accounts {
        let order = PromotionOrder::try_deserialize(&mut account.data.as_slice())?;
        orders.push((addr, order));
    }
    Ok(orders)
}

fn sweep_pass(client: &RpcClient, payer: &Keypair, cli: &Cli) -> Result<(), Box<dyn Error>> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64;
    let orders = fetch_active_orders(client)?;

    let mut swept: Vec<String> = Vec::new();
    let mut failed: Vec<String> = Vec::new();

    for (addr, order) in &orders {
        if order.expires_at > now {
            continue;
        }
        let ix = ix_sweep_expired(&payer.pubkey(), addr, &pool_pda(order));
        let blockhash = client.get_latest_blockhash()?;
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&payer.pubkey()),
            &[payer],
            blockhash,
        );
        match client.send_and_confirm_transaction(&tx) {
            Ok(sig) => {
                if cli.verbose {
                    eprintln!("swept order {} (seq {}): {}", addr, order.seq, sig);
                }
                swept.push(addr.to_string());
            }
            // another sweeper may have won the race; keep going
            Err(err) => {
                if cli.verbose {
                    eprintln!("sweep of {} failed: {}", addr, err);
                }
                failed.push(addr.to_string());
            }
        }
    }

    if cli.json {
        println!(
            "{}",
            serde_json::json!({
                "now": now,
                "active_orders": orders.len(),
                "swept": swept,
                "failed": failed,
            })
        );
    } else if cli.verbose {
        eprintln!(
            "pass complete: {} active, {} swept, {} failed",
            orders.len(),
            swept.len(),
            failed.len()
        );
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let payer = read_keypair_file(&cli.keypair)
        .map_err(|e| format!("failed to read keypair {}: {}", cli.keypair, e))?;
    let client = RpcClient::new_with_commitment(
        cluster_url(&cli.cluster),
        CommitmentConfig::confirmed(),
    );

    if cli.verbose {
        eprintln!(
            "sweeping program {} on {} as {}",
            promo_slots::ID,
            cluster_url(&cli.cluster),
            payer.pubkey()
        );
    }

    loop {
        if let Err(err) = sweep_pass(&client, &payer, &cli) {
            // transient RPC failures should not kill the worker
            eprintln!("sweep pass failed: {}", err);
        }
        if cli.once {
            return Ok(());
        }
        std::thread::sleep(Duration::from_secs(cli.interval_secs));
    }
}
