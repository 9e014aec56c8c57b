//! Consecutive-day streak computation.

use super::log_date::LogDate;

/// Length of the run of consecutive days that ends at the latest log.
///
/// `dates` must be sorted ascending with no duplicates (the output of
/// [`normalize`](super::normalize)). The streak is alive only while the
/// latest log is `today` or the day before; otherwise it is 0.
///
/// This is a forward single pass: any gap larger than one day restarts the
/// counter at 1, so only the trailing run is reported.
pub fn current_streak(dates: &[LogDate], today: LogDate) -> u32 {
    let Some(&last) = dates.last() else {
        return 0;
    };

    if last != today && Some(last) != today.pred() {
        return 0;
    }

    let mut streak = 1u32;
    for pair in dates.windows(2) {
        let gap = pair[1].days_since(pair[0]);
        if gap == 1 {
            streak += 1;
        } else if gap > 1 {
            streak = 1;
        }
    }
    streak
}

/// Longest run of consecutive days anywhere in the history.
///
/// Informational only; milestone eligibility always uses [`current_streak`].
pub fn longest_run(dates: &[LogDate]) -> u32 {
    if dates.is_empty() {
        return 0;
    }

    let mut longest = 1u32;
    let mut run = 1u32;
    for pair in dates.windows(2) {
        if pair[1].days_since(pair[0]) == 1 {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 1;
        }
    }
    longest
}
