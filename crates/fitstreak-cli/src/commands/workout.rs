use clap::Subcommand;
use fitstreak_core::{Clock, Config, Database, StreakService, WorkoutInput};

use super::{clock, print_json, resolve_wallet, CmdResult};

#[derive(Subcommand)]
pub enum WorkoutAction {
    /// Log a workout for today (UTC)
    Log {
        /// Workout type, e.g. "Running"
        #[arg(long = "type")]
        workout_type: String,
        /// Duration in minutes
        #[arg(long)]
        duration: u32,
        #[arg(long)]
        notes: Option<String>,
        /// Wallet address (defaults to the connected wallet)
        #[arg(long)]
        wallet: Option<String>,
    },
    /// List logged workouts, oldest first
    List {
        #[arg(long)]
        wallet: Option<String>,
    },
}

pub fn run(action: WorkoutAction) -> CmdResult {
    let config = Config::load()?;
    let mut service = StreakService::new(Database::open()?);

    match action {
        WorkoutAction::Log {
            workout_type,
            duration,
            notes,
            wallet,
        } => {
            let wallet = resolve_wallet(&config, wallet.as_deref())?;
            let input = WorkoutInput {
                wallet_address: wallet.to_string(),
                workout_type,
                duration_min: duration,
                notes,
            };
            let log = service.log_workout(&input, clock(None)?.now())?;
            print_json(&log)?;
        }
        WorkoutAction::List { wallet } => {
            let wallet = resolve_wallet(&config, wallet.as_deref())?;
            print_json(&service.history(&wallet)?)?;
        }
    }
    Ok(())
}
