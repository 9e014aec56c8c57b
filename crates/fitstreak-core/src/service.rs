//! The operations exposed to callers (CLI, or an HTTP layer).
//!
//! [`StreakService`] owns a store and composes it with the pure streak
//! engine. Time always comes in as a parameter.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::badge::{is_tx_hash, token_uri, BadgeMint, BadgeStatus};
use crate::error::{Result, ValidationError};
use crate::storage::{BadgeLedger, WorkoutStore};
use crate::streak::{
    evaluate, longest_run, normalize, DateSet, LogDate, StreakResult, STREAK_MILESTONES,
};
use crate::workout::{WalletAddress, WorkoutInput, WorkoutLog};

/// Streak summary for history views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakStats {
    pub streak_days: u32,
    pub eligible_milestone: Option<u32>,
    pub next_milestone: Option<u32>,
    pub longest_run: u32,
    pub total_days: usize,
    pub last_logged: Option<LogDate>,
}

pub struct StreakService<S> {
    store: S,
}

impl<S> StreakService<S>
where
    S: WorkoutStore + BadgeLedger,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate and store a workout submitted at `now`.
    ///
    /// # Errors
    /// Fails on an invalid payload or a storage failure.
    pub fn log_workout(&mut self, input: &WorkoutInput, now: DateTime<Utc>) -> Result<WorkoutLog> {
        let workout = input.validate()?;
        let log = WorkoutLog::new(workout, now);
        self.store.insert_workout(&log)?;
        Ok(log)
    }

    /// Every workout logged by `wallet`, oldest first.
    ///
    /// # Errors
    /// Fails on a storage failure.
    pub fn history(&self, wallet: &WalletAddress) -> Result<Vec<WorkoutLog>> {
        Ok(self.store.workouts_for(wallet)?)
    }

    /// Distinct log dates for `wallet` up to and including `today`.
    ///
    /// Logs made after `today` are not part of the history as seen from it.
    fn history_as_of(&self, wallet: &WalletAddress, today: LogDate) -> Result<DateSet> {
        let dates = self.store.workout_dates(wallet)?;
        Ok(normalize(dates.into_iter().filter(|date| *date <= today)))
    }

    /// Current streak and eligible milestone for `wallet` as of `today`.
    ///
    /// # Errors
    /// Fails on a storage failure.
    pub fn compute_streak(&self, wallet: &WalletAddress, today: LogDate) -> Result<StreakResult> {
        let result = evaluate(&self.history_as_of(wallet, today)?, today);
        tracing::debug!(
            wallet = %wallet,
            today = %today,
            streak_days = result.streak_days,
            eligible_milestone = ?result.eligible_milestone,
            "computed streak"
        );
        Ok(result)
    }

    /// # Errors
    /// Fails on a storage failure.
    pub fn stats(&self, wallet: &WalletAddress, today: LogDate) -> Result<StreakStats> {
        let set = self.history_as_of(wallet, today)?;
        let result = evaluate(&set, today);
        Ok(StreakStats {
            streak_days: result.streak_days,
            eligible_milestone: result.eligible_milestone,
            next_milestone: STREAK_MILESTONES.next_after(result.streak_days),
            longest_run: longest_run(set.as_slice()),
            total_days: set.len(),
            last_logged: set.last(),
        })
    }

    /// Whether `wallet` can mint its current milestone badge.
    ///
    /// # Errors
    /// Fails on a storage failure.
    pub fn badge_status(&self, wallet: &WalletAddress, today: LogDate) -> Result<BadgeStatus> {
        let streak = self.compute_streak(wallet, today)?;
        let already_minted = match streak.eligible_milestone {
            Some(milestone) => self.store.has_minted(wallet, milestone)?,
            None => false,
        };
        Ok(BadgeStatus::new(wallet.clone(), streak, already_minted))
    }

    /// Record a confirmed on-chain mint.
    ///
    /// The milestone must be a badge threshold already reached by the
    /// streak as of `now`, and not minted before.
    ///
    /// # Errors
    /// Fails with a [`ValidationError`] when any of those checks fail,
    /// or on a storage failure.
    pub fn record_mint(
        &mut self,
        wallet: &WalletAddress,
        milestone: u32,
        tx_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<BadgeMint> {
        if !STREAK_MILESTONES.contains(milestone) {
            return Err(ValidationError::UnknownMilestone(milestone).into());
        }

        let tx_hash = tx_hash.trim();
        if !is_tx_hash(tx_hash) {
            return Err(ValidationError::InvalidValue {
                field: "txHash".into(),
                message: "expected 0x followed by 64 hex digits".into(),
            }
            .into());
        }

        let streak = self.compute_streak(wallet, LogDate::from_utc(&now))?;
        if streak.streak_days < milestone {
            return Err(ValidationError::MilestoneLocked {
                milestone,
                streak_days: streak.streak_days,
            }
            .into());
        }

        if self.store.has_minted(wallet, milestone)? {
            return Err(ValidationError::AlreadyMinted(milestone).into());
        }

        let mint = BadgeMint {
            wallet_address: wallet.clone(),
            milestone,
            token_uri: token_uri(milestone),
            tx_hash: tx_hash.to_ascii_lowercase(),
            minted_at: now,
        };
        self.store.record_mint(&mint)?;
        Ok(mint)
    }

    /// # Errors
    /// Fails on a storage failure.
    pub fn mints(&self, wallet: &WalletAddress) -> Result<Vec<BadgeMint>> {
        Ok(self.store.mints_for(wallet)?)
    }
}
