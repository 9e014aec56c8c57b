mod config;
pub mod database;
mod memory;
pub mod migrations;
mod traits;

pub use config::{ChainConfig, Config, WalletConfig};
pub use database::Database;
pub use memory::MemoryStore;
pub use traits::{BadgeLedger, WorkoutStore};

use std::path::PathBuf;

/// Returns `~/.config/fitstreak[-dev]/` based on FITSTREAK_ENV.
///
/// Set FITSTREAK_ENV=dev to use the development data directory, or
/// FITSTREAK_DATA_DIR to use an explicit directory instead.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("FITSTREAK_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("FITSTREAK_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("fitstreak-dev")
            } else {
                base_dir.join("fitstreak")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
