use clap::Subcommand;
use fitstreak_core::{Clock, Config, Database, StreakService};

use super::{clock, print_json, resolve_wallet, CmdResult};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Current streak and eligible milestone
    Show {
        #[arg(long)]
        wallet: Option<String>,
        /// Evaluate as of this UTC date (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Streak with longest run and totals
    Stats {
        #[arg(long)]
        wallet: Option<String>,
        #[arg(long)]
        as_of: Option<String>,
    },
}

pub fn run(action: StreakAction) -> CmdResult {
    let config = Config::load()?;
    let service = StreakService::new(Database::open()?);

    match action {
        StreakAction::Show { wallet, as_of } => {
            let wallet = resolve_wallet(&config, wallet.as_deref())?;
            let today = clock(as_of.as_deref())?.today();
            print_json(&service.compute_streak(&wallet, today)?)?;
        }
        StreakAction::Stats { wallet, as_of } => {
            let wallet = resolve_wallet(&config, wallet.as_deref())?;
            let today = clock(as_of.as_deref())?.today();
            print_json(&service.stats(&wallet, today)?)?;
        }
    }
    Ok(())
}
