//! Wallet identities and workout log records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::streak::LogDate;

/// An EVM wallet address: `0x` followed by 40 hex digits, kept lowercase.
///
/// Logs are grouped under this key, so two spellings of the same address
/// with different letter case always resolve to the same identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    /// # Errors
    /// Returns [`ValidationError::InvalidWallet`] unless `raw` is `0x` + 40 hex digits.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let valid = trimmed.len() == 42
            && trimmed.starts_with("0x")
            && trimmed[2..].chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(ValidationError::InvalidWallet(raw.to_string()));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `0x1234...abcd` form for display.
    pub fn short(&self) -> String {
        shorten_address(&self.0)
    }
}

/// Abbreviate an address to its first 6 and last 4 characters.
///
/// Strings shorter than 12 characters are returned unchanged.
pub fn shorten_address(address: &str) -> String {
    if address.len() < 12 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for WalletAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WalletAddress> for String {
    fn from(wallet: WalletAddress) -> Self {
        wallet.0
    }
}

/// A workout submission before it is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutInput {
    pub wallet_address: String,
    pub workout_type: String,
    pub duration_min: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A validated workout submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkout {
    pub wallet: WalletAddress,
    pub workout_type: String,
    pub duration_min: u32,
    pub notes: String,
}

impl WorkoutInput {
    /// Check the payload and normalize it for storage.
    ///
    /// # Errors
    /// Fails on an invalid wallet, an empty workout type or a zero duration.
    pub fn validate(&self) -> Result<NewWorkout, ValidationError> {
        let wallet = WalletAddress::parse(&self.wallet_address)?;

        let workout_type = self.workout_type.trim();
        if workout_type.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "workoutType".into(),
                message: "must not be empty".into(),
            });
        }

        if self.duration_min == 0 {
            return Err(ValidationError::InvalidValue {
                field: "durationMin".into(),
                message: "must be greater than zero".into(),
            });
        }

        Ok(NewWorkout {
            wallet,
            workout_type: workout_type.to_string(),
            duration_min: self.duration_min,
            notes: self
                .notes
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
        })
    }
}

/// A stored workout.
///
/// `workout_date` is the UTC calendar day of `created_at`; it is what the
/// streak engine consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLog {
    pub id: String,
    pub wallet_address: WalletAddress,
    pub workout_type: String,
    pub duration_min: u32,
    pub notes: String,
    pub workout_date: LogDate,
    pub created_at: DateTime<Utc>,
}

impl WorkoutLog {
    /// Stamp a validated submission with a fresh id and its log date.
    pub fn new(workout: NewWorkout, created_at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            wallet_address: workout.wallet,
            workout_type: workout.workout_type,
            duration_min: workout.duration_min,
            notes: workout.notes,
            workout_date: LogDate::from_utc(&created_at),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const ADDR: &str = "0xAbCdEf0123456789abcdef0123456789ABCDEF01";

    fn input() -> WorkoutInput {
        WorkoutInput {
            wallet_address: ADDR.into(),
            workout_type: "  Strength ".into(),
            duration_min: 30,
            notes: Some(" felt good \n".into()),
        }
    }

    #[test]
    fn wallet_is_lowercased() {
        let wallet = WalletAddress::parse(ADDR).unwrap();
        assert_eq!(wallet.as_str(), "0xabcdef0123456789abcdef0123456789abcdef01");
        assert_eq!(wallet, WalletAddress::parse(&ADDR.to_lowercase()).unwrap());
    }

    #[test]
    fn wallet_rejects_bad_shapes() {
        for bad in [
            "",
            "0x123",
            "abcdef0123456789abcdef0123456789abcdef0123",
            "0xZZcdef0123456789abcdef0123456789abcdef01",
            "0xabcdef0123456789abcdef0123456789abcdef0123",
        ] {
            assert!(WalletAddress::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn wallet_serde_validates() {
        let ok: WalletAddress = serde_json::from_str(&format!("\"{ADDR}\"")).unwrap();
        assert_eq!(ok.as_str(), ADDR.to_lowercase());
        assert!(serde_json::from_str::<WalletAddress>("\"0xnope\"").is_err());
    }

    #[test]
    fn shorten_keeps_prefix_and_suffix() {
        let wallet = WalletAddress::parse(ADDR).unwrap();
        assert_eq!(wallet.short(), "0xabcd...ef01");
        assert_eq!(shorten_address("0x1234"), "0x1234");
    }

    #[test]
    fn validate_trims_fields() {
        let workout = input().validate().unwrap();
        assert_eq!(workout.workout_type, "Strength");
        assert_eq!(workout.notes, "felt good");
        assert_eq!(workout.duration_min, 30);
    }

    #[test]
    fn validate_defaults_missing_notes() {
        let mut raw = input();
        raw.notes = None;
        assert_eq!(raw.validate().unwrap().notes, "");
    }

    #[test]
    fn validate_rejects_blank_type_and_zero_duration() {
        let mut raw = input();
        raw.workout_type = "   ".into();
        assert!(matches!(
            raw.validate(),
            Err(ValidationError::InvalidValue { field, .. }) if field == "workoutType"
        ));

        let mut raw = input();
        raw.duration_min = 0;
        assert!(matches!(
            raw.validate(),
            Err(ValidationError::InvalidValue { field, .. }) if field == "durationMin"
        ));
    }

    #[test]
    fn workout_date_is_utc_day_of_creation() {
        let at = Utc.with_ymd_and_hms(2024, 1, 10, 23, 59, 59).unwrap();
        let log = WorkoutLog::new(input().validate().unwrap(), at);
        assert_eq!(log.workout_date.to_string(), "2024-01-10");
        assert!(!log.id.is_empty());
    }
}
