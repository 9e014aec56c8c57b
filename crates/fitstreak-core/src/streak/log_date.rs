//! Calendar-day identifiers and the date-set normalizer.
//!
//! Every timestamp is truncated to its calendar date in UTC. Two log
//! entries on the same UTC day collapse to the same [`LogDate`].

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A UTC calendar day with no time-of-day and no offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogDate(NaiveDate);

impl LogDate {
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from year/month/day, `None` if the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Truncate a timestamp in any timezone to its UTC calendar date.
    pub fn from_utc<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self(at.with_timezone(&Utc).date_naive())
    }

    /// Parse either `YYYY-MM-DD` or an RFC 3339 timestamp.
    ///
    /// Timestamps are converted to UTC before truncation, so
    /// `2024-01-10T23:30:00-02:00` becomes `2024-01-11`.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidDate`] for anything else.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
            return Ok(Self(date));
        }
        DateTime::parse_from_rfc3339(trimmed)
            .map(|at| Self::from_utc(&at))
            .map_err(|_| ValidationError::InvalidDate(value.to_string()))
    }

    /// The previous calendar day.
    pub fn pred(self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// The next calendar day.
    pub fn succ(self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// Signed number of days from `earlier` to `self`.
    pub fn days_since(self, earlier: LogDate) -> i64 {
        (self.0 - earlier.0).num_days()
    }

    pub fn as_naive(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for LogDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for LogDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for LogDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for LogDate {
    fn from(at: DateTime<Tz>) -> Self {
        Self::from_utc(&at)
    }
}

/// Sorted, deduplicated view over an identity's log dates.
///
/// Built fresh for every computation and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateSet(Vec<LogDate>);

impl DateSet {
    pub fn as_slice(&self) -> &[LogDate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Most recent log date.
    pub fn last(&self) -> Option<LogDate> {
        self.0.last().copied()
    }

    pub fn into_vec(self) -> Vec<LogDate> {
        self.0
    }
}

impl<T: Into<LogDate>> FromIterator<T> for DateSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        normalize(iter)
    }
}

/// Truncate every input to its UTC date, merge duplicates and sort ascending.
pub fn normalize<I, T>(inputs: I) -> DateSet
where
    I: IntoIterator<Item = T>,
    T: Into<LogDate>,
{
    let unique: BTreeSet<LogDate> = inputs.into_iter().map(Into::into).collect();
    DateSet(unique.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn d(s: &str) -> LogDate {
        LogDate::parse(s).unwrap()
    }

    #[test]
    fn parses_date_only() {
        let date = d("2024-01-10");
        assert_eq!(date, LogDate::from_ymd(2024, 1, 10).unwrap());
        assert_eq!(date.to_string(), "2024-01-10");
    }

    #[test]
    fn parses_timestamp_in_utc() {
        assert_eq!(d("2024-01-10T08:15:00Z"), d("2024-01-10"));
        assert_eq!(d("2024-01-10T00:00:00.000Z"), d("2024-01-10"));
    }

    #[test]
    fn offset_timestamp_truncates_after_utc_conversion() {
        // 23:30 at UTC-2 is 01:30 the next day in UTC
        assert_eq!(d("2024-01-10T23:30:00-02:00"), d("2024-01-11"));
        // 01:00 at UTC+9 is still the previous day in UTC
        assert_eq!(d("2024-01-10T01:00:00+09:00"), d("2024-01-09"));
    }

    #[test]
    fn from_utc_uses_utc_calendar_day() {
        let tz = FixedOffset::east_opt(5 * 3600).unwrap();
        let at = tz.with_ymd_and_hms(2024, 3, 1, 2, 0, 0).unwrap();
        assert_eq!(LogDate::from(at), d("2024-02-29"));
    }

    #[test]
    fn rejects_malformed_dates() {
        for bad in ["", "2024-13-01", "2024/01/10", "yesterday", "2024-02-30"] {
            assert!(
                matches!(LogDate::parse(bad), Err(ValidationError::InvalidDate(_))),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn pred_and_days_since_cross_month_and_year() {
        assert_eq!(d("2024-03-01").pred(), Some(d("2024-02-29")));
        assert_eq!(d("2024-01-01").pred(), Some(d("2023-12-31")));
        assert_eq!(d("2024-01-01").days_since(d("2023-12-30")), 2);
        assert_eq!(d("2023-12-30").days_since(d("2024-01-01")), -2);
    }

    #[test]
    fn normalize_dedups_and_sorts() {
        let set = normalize([
            d("2024-01-09"),
            d("2024-01-08"),
            d("2024-01-09"),
            d("2024-01-10"),
        ]);
        assert_eq!(
            set.as_slice(),
            &[d("2024-01-08"), d("2024-01-09"), d("2024-01-10")]
        );
        assert_eq!(set.last(), Some(d("2024-01-10")));
    }

    #[test]
    fn normalize_collapses_same_day_timestamps() {
        let morning = Utc.with_ymd_and_hms(2024, 1, 10, 6, 0, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2024, 1, 10, 21, 45, 0).unwrap();
        let set: DateSet = [morning, evening].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert_eq!(set.last(), Some(d("2024-01-10")));
    }

    #[test]
    fn normalize_empty_input() {
        let set = normalize(Vec::<LogDate>::new());
        assert!(set.is_empty());
        assert_eq!(set.last(), None);
    }

    #[test]
    fn serializes_as_plain_date_string() {
        let json = serde_json::to_string(&d("2024-01-10")).unwrap();
        assert_eq!(json, "\"2024-01-10\"");
        let back: LogDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d("2024-01-10"));
    }
}
