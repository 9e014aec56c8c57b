//! In-process store, used by tests and by callers that bring their own persistence.

use crate::badge::BadgeMint;
use crate::error::DatabaseError;
use crate::workout::{WalletAddress, WorkoutLog};

use super::traits::{BadgeLedger, WorkoutStore};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    workouts: Vec<WorkoutLog>,
    mints: Vec<BadgeMint>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WorkoutStore for MemoryStore {
    fn insert_workout(&mut self, log: &WorkoutLog) -> Result<(), DatabaseError> {
        if self.workouts.iter().any(|w| w.id == log.id) {
            return Err(DatabaseError::QueryFailed(format!(
                "duplicate workout id {}",
                log.id
            )));
        }
        self.workouts.push(log.clone());
        Ok(())
    }

    fn workouts_for(&self, wallet: &WalletAddress) -> Result<Vec<WorkoutLog>, DatabaseError> {
        let mut logs: Vec<WorkoutLog> = self
            .workouts
            .iter()
            .filter(|w| &w.wallet_address == wallet)
            .cloned()
            .collect();
        logs.sort_by(|a, b| {
            a.workout_date
                .cmp(&b.workout_date)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(logs)
    }
}

impl BadgeLedger for MemoryStore {
    fn has_minted(&self, wallet: &WalletAddress, milestone: u32) -> Result<bool, DatabaseError> {
        Ok(self
            .mints
            .iter()
            .any(|m| &m.wallet_address == wallet && m.milestone == milestone))
    }

    fn record_mint(&mut self, mint: &BadgeMint) -> Result<(), DatabaseError> {
        if self.has_minted(&mint.wallet_address, mint.milestone)? {
            return Err(DatabaseError::QueryFailed(format!(
                "milestone {} already recorded for {}",
                mint.milestone, mint.wallet_address
            )));
        }
        self.mints.push(mint.clone());
        Ok(())
    }

    fn mints_for(&self, wallet: &WalletAddress) -> Result<Vec<BadgeMint>, DatabaseError> {
        let mut mints: Vec<BadgeMint> = self
            .mints
            .iter()
            .filter(|m| &m.wallet_address == wallet)
            .cloned()
            .collect();
        mints.sort_by_key(|m| m.milestone);
        Ok(mints)
    }
}
