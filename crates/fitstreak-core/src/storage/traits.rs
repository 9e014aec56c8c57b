use crate::badge::BadgeMint;
use crate::error::DatabaseError;
use crate::streak::{normalize, LogDate};
use crate::workout::{WalletAddress, WorkoutLog};

/// Append/query access to workout logs, grouped by wallet.
pub trait WorkoutStore {
    fn insert_workout(&mut self, log: &WorkoutLog) -> Result<(), DatabaseError>;

    /// Every workout for `wallet`, oldest first.
    fn workouts_for(&self, wallet: &WalletAddress) -> Result<Vec<WorkoutLog>, DatabaseError>;

    /// Distinct log dates for `wallet`, ascending.
    fn workout_dates(&self, wallet: &WalletAddress) -> Result<Vec<LogDate>, DatabaseError> {
        let logs = self.workouts_for(wallet)?;
        Ok(normalize(logs.iter().map(|log| log.workout_date)).into_vec())
    }
}

/// Local mirror of which milestone badges a wallet has minted.
pub trait BadgeLedger {
    fn has_minted(&self, wallet: &WalletAddress, milestone: u32) -> Result<bool, DatabaseError>;

    fn record_mint(&mut self, mint: &BadgeMint) -> Result<(), DatabaseError>;

    /// Confirmed mints for `wallet`, lowest milestone first.
    fn mints_for(&self, wallet: &WalletAddress) -> Result<Vec<BadgeMint>, DatabaseError>;
}
