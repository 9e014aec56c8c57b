use clap::Subcommand;
use fitstreak_core::badge::explorer_tx_url;
use fitstreak_core::{Clock, Config, Database, StreakService};
use serde_json::json;

use super::{clock, print_json, resolve_wallet, CmdResult};

#[derive(Subcommand)]
pub enum BadgeAction {
    /// Whether the current milestone badge can be minted
    Status {
        #[arg(long)]
        wallet: Option<String>,
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Record a confirmed mint transaction
    Record {
        /// Milestone (3, 7, 14 or 30)
        milestone: u32,
        /// Transaction hash
        #[arg(long)]
        tx: String,
        #[arg(long)]
        wallet: Option<String>,
    },
    /// Badges minted so far
    List {
        #[arg(long)]
        wallet: Option<String>,
    },
}

pub fn run(action: BadgeAction) -> CmdResult {
    let config = Config::load()?;
    let mut service = StreakService::new(Database::open()?);

    match action {
        BadgeAction::Status { wallet, as_of } => {
            let wallet = resolve_wallet(&config, wallet.as_deref())?;
            let today = clock(as_of.as_deref())?.today();
            let status = service.badge_status(&wallet, today)?;

            let mut out = serde_json::to_value(&status)?;
            if let Some(obj) = out.as_object_mut() {
                obj.insert("mintConfigured".into(), json!(config.chain.is_mint_configured()));
                obj.insert("chainId".into(), json!(config.chain.chain_id_hex()));
                obj.insert("chainName".into(), json!(config.chain.chain_name));
                obj.insert("badgeContract".into(), json!(config.chain.badge_contract));
            }
            print_json(&out)?;
        }
        BadgeAction::Record {
            milestone,
            tx,
            wallet,
        } => {
            let wallet = resolve_wallet(&config, wallet.as_deref())?;
            let mint = service.record_mint(&wallet, milestone, &tx, clock(None)?.now())?;

            let mut out = serde_json::to_value(&mint)?;
            if let Some(obj) = out.as_object_mut() {
                obj.insert(
                    "explorerUrl".into(),
                    json!(explorer_tx_url(&config.chain.explorer_url, &mint.tx_hash)),
                );
            }
            print_json(&out)?;
        }
        BadgeAction::List { wallet } => {
            let wallet = resolve_wallet(&config, wallet.as_deref())?;
            print_json(&service.mints(&wallet)?)?;
        }
    }
    Ok(())
}
