//! Streak computation engine.
//!
//! Three pure stages, composed by [`compute_streak`]:
//!
//! 1. [`normalize`] truncates raw dates/timestamps to UTC calendar days,
//!    dedups and sorts them.
//! 2. [`current_streak`] walks the sorted days and returns the length of
//!    the run that ends today or yesterday.
//! 3. [`MilestoneThresholds::resolve`] maps that length to the highest
//!    badge threshold reached.
//!
//! The evaluation date is always passed in explicitly; nothing here reads
//! the clock.

mod engine;
mod log_date;
mod milestone;

pub use engine::{current_streak, longest_run};
pub use log_date::{normalize, DateSet, LogDate};
pub use milestone::{MilestoneThresholds, STREAK_MILESTONES};

use serde::{Deserialize, Serialize};

/// Current streak and the badge milestone it unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakResult {
    pub streak_days: u32,
    pub eligible_milestone: Option<u32>,
}

/// Normalize `dates`, compute the streak as of `today` and resolve the milestone.
pub fn compute_streak<I, T>(dates: I, today: LogDate) -> StreakResult
where
    I: IntoIterator<Item = T>,
    T: Into<LogDate>,
{
    let set = normalize(dates);
    let result = evaluate(&set, today);
    tracing::debug!(
        distinct_days = set.len(),
        today = %today,
        streak_days = result.streak_days,
        eligible_milestone = ?result.eligible_milestone,
        "computed streak"
    );
    result
}

/// Same as [`compute_streak`] for an already-normalized set.
pub fn evaluate(set: &DateSet, today: LogDate) -> StreakResult {
    let streak_days = current_streak(set.as_slice(), today);
    StreakResult {
        streak_days,
        eligible_milestone: STREAK_MILESTONES.resolve(streak_days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> LogDate {
        LogDate::parse(s).unwrap()
    }

    fn range(from: &str, to: &str) -> Vec<LogDate> {
        let mut out = vec![d(from)];
        while *out.last().unwrap() < d(to) {
            let next = out.last().unwrap().succ().unwrap();
            out.push(next);
        }
        out
    }

    #[test]
    fn scenario_empty_history() {
        let result = compute_streak(Vec::<LogDate>::new(), d("2024-01-10"));
        assert_eq!(
            result,
            StreakResult {
                streak_days: 0,
                eligible_milestone: None
            }
        );
    }

    #[test]
    fn scenario_three_days_hits_first_threshold() {
        let result = compute_streak(range("2024-01-08", "2024-01-10"), d("2024-01-10"));
        assert_eq!(result.streak_days, 3);
        assert_eq!(result.eligible_milestone, Some(3));
    }

    #[test]
    fn scenario_two_days_is_below_first_threshold() {
        let result = compute_streak(range("2024-01-09", "2024-01-10"), d("2024-01-10"));
        assert_eq!(result.streak_days, 2);
        assert_eq!(result.eligible_milestone, None);
    }

    #[test]
    fn scenario_gap_restarts_run() {
        let dates = ["2024-01-01", "2024-01-02", "2024-01-05", "2024-01-06", "2024-01-07"]
            .map(d);
        let result = compute_streak(dates, d("2024-01-07"));
        assert_eq!(result.streak_days, 3);
        assert_eq!(result.eligible_milestone, Some(3));
    }

    #[test]
    fn scenario_week_with_yesterday_grace() {
        let result = compute_streak(range("2024-01-01", "2024-01-07"), d("2024-01-08"));
        assert_eq!(result.streak_days, 7);
        assert_eq!(result.eligible_milestone, Some(7));
    }

    #[test]
    fn scenario_week_broken_by_two_missed_days() {
        let result = compute_streak(range("2024-01-01", "2024-01-07"), d("2024-01-09"));
        assert_eq!(result.streak_days, 0);
        assert_eq!(result.eligible_milestone, None);
    }

    #[test]
    fn unordered_duplicate_timestamps_are_normalized() {
        let inputs = [
            "2024-01-10T22:00:00Z",
            "2024-01-08T07:00:00Z",
            "2024-01-09",
            "2024-01-10T06:00:00Z",
            "2024-01-08",
        ]
        .map(d);
        let result = compute_streak(inputs, d("2024-01-10"));
        assert_eq!(result.streak_days, 3);
    }

    #[test]
    fn result_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(StreakResult {
            streak_days: 7,
            eligible_milestone: None,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "streakDays": 7, "eligibleMilestone": null })
        );
    }
}
