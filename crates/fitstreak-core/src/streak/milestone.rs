//! Badge milestone thresholds.

/// Ascending list of streak lengths (in days) that unlock a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilestoneThresholds(&'static [u32]);

/// The badge thresholds: 3, 7, 14 and 30 days.
pub const STREAK_MILESTONES: MilestoneThresholds = MilestoneThresholds(&[3, 7, 14, 30]);

impl MilestoneThresholds {
    pub fn as_slice(&self) -> &'static [u32] {
        self.0
    }

    pub fn contains(&self, milestone: u32) -> bool {
        self.0.contains(&milestone)
    }

    /// Highest threshold reached by `streak_days`, if any.
    pub fn resolve(&self, streak_days: u32) -> Option<u32> {
        self.0.iter().rev().copied().find(|&m| streak_days >= m)
    }

    /// The next threshold still ahead of `streak_days`.
    pub fn next_after(&self, streak_days: u32) -> Option<u32> {
        self.0.iter().copied().find(|&m| m > streak_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn nothing_unlocked_below_first_threshold() {
        assert_eq!(STREAK_MILESTONES.resolve(0), None);
        assert_eq!(STREAK_MILESTONES.resolve(2), None);
    }

    #[test]
    fn resolves_highest_reached_threshold() {
        assert_eq!(STREAK_MILESTONES.resolve(3), Some(3));
        assert_eq!(STREAK_MILESTONES.resolve(6), Some(3));
        assert_eq!(STREAK_MILESTONES.resolve(7), Some(7));
        assert_eq!(STREAK_MILESTONES.resolve(13), Some(7));
        assert_eq!(STREAK_MILESTONES.resolve(14), Some(14));
        assert_eq!(STREAK_MILESTONES.resolve(30), Some(30));
        assert_eq!(STREAK_MILESTONES.resolve(365), Some(30));
    }

    #[test]
    fn next_after_points_at_upcoming_threshold() {
        assert_eq!(STREAK_MILESTONES.next_after(0), Some(3));
        assert_eq!(STREAK_MILESTONES.next_after(3), Some(7));
        assert_eq!(STREAK_MILESTONES.next_after(29), Some(30));
        assert_eq!(STREAK_MILESTONES.next_after(30), None);
    }

    #[test]
    fn thresholds_are_ascending_and_positive() {
        let t = STREAK_MILESTONES.as_slice();
        assert!(t.iter().all(|&m| m > 0));
        assert!(t.windows(2).all(|w| w[0] < w[1]));
    }

    proptest! {
        #[test]
        fn resolved_milestone_is_a_threshold_not_above_streak(streak in 0u32..1000) {
            if let Some(m) = STREAK_MILESTONES.resolve(streak) {
                prop_assert!(STREAK_MILESTONES.contains(m));
                prop_assert!(m <= streak);
                prop_assert!(STREAK_MILESTONES.as_slice().iter().all(|&t| t <= m || t > streak));
            } else {
                prop_assert!(streak < 3);
            }
        }

        #[test]
        fn resolve_is_monotonic(a in 0u32..1000, b in 0u32..1000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(STREAK_MILESTONES.resolve(lo) <= STREAK_MILESTONES.resolve(hi));
        }
    }
}
