//! SQLite-based workout and badge storage.
//!
//! Provides persistent storage for:
//! - Workout logs, grouped by wallet address
//! - Confirmed badge mints, one per (wallet, milestone)

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};

use crate::badge::BadgeMint;
use crate::error::{CoreError, DatabaseError};
use crate::streak::LogDate;
use crate::workout::{WalletAddress, WorkoutLog};

use super::data_dir;
use super::migrations;
use super::traits::{BadgeLedger, WorkoutStore};

/// SQLite database for workout storage.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data_dir>/fitstreak.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created or the
    /// database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("fitstreak.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open (or create) the database file at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened database");
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, DatabaseError> {
        migrations::migrate(&conn).map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }
}

fn conversion_error<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn parse_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| conversion_error(idx, e))
}

fn parse_wallet(idx: usize, raw: &str) -> rusqlite::Result<WalletAddress> {
    WalletAddress::parse(raw).map_err(|e| conversion_error(idx, e))
}

fn row_to_workout(row: &Row<'_>) -> rusqlite::Result<WorkoutLog> {
    let wallet: String = row.get(1)?;
    let workout_date: String = row.get(5)?;
    let created_at: String = row.get(6)?;
    Ok(WorkoutLog {
        id: row.get(0)?,
        wallet_address: parse_wallet(1, &wallet)?,
        workout_type: row.get(2)?,
        duration_min: row.get(3)?,
        notes: row.get(4)?,
        workout_date: LogDate::parse(&workout_date).map_err(|e| conversion_error(5, e))?,
        created_at: parse_timestamp(6, &created_at)?,
    })
}

fn row_to_mint(row: &Row<'_>) -> rusqlite::Result<BadgeMint> {
    let wallet: String = row.get(0)?;
    let minted_at: String = row.get(4)?;
    Ok(BadgeMint {
        wallet_address: parse_wallet(0, &wallet)?,
        milestone: row.get(1)?,
        token_uri: row.get(2)?,
        tx_hash: row.get(3)?,
        minted_at: parse_timestamp(4, &minted_at)?,
    })
}

impl WorkoutStore for Database {
    fn insert_workout(&mut self, log: &WorkoutLog) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO workout_logs
                (id, wallet_address, workout_type, duration_min, notes, workout_date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                log.id,
                log.wallet_address.as_str(),
                log.workout_type,
                log.duration_min,
                log.notes,
                log.workout_date.to_string(),
                log.created_at.to_rfc3339(),
            ],
        )?;
        tracing::info!(
            wallet = %log.wallet_address,
            workout_date = %log.workout_date,
            workout_type = %log.workout_type,
            "recorded workout"
        );
        Ok(())
    }

    fn workouts_for(&self, wallet: &WalletAddress) -> Result<Vec<WorkoutLog>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, wallet_address, workout_type, duration_min, notes, workout_date, created_at
             FROM workout_logs
             WHERE wallet_address = ?1
             ORDER BY workout_date ASC, created_at ASC",
        )?;
        let rows = stmt.query_map(params![wallet.as_str()], row_to_workout)?;
        let mut logs = Vec::new();
        for row in rows {
            logs.push(row.map_err(|e| DatabaseError::CorruptRow {
                table: "workout_logs".into(),
                message: e.to_string(),
            })?);
        }
        Ok(logs)
    }

    fn workout_dates(&self, wallet: &WalletAddress) -> Result<Vec<LogDate>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT workout_date
             FROM workout_logs
             WHERE wallet_address = ?1
             ORDER BY workout_date ASC",
        )?;
        let rows = stmt.query_map(params![wallet.as_str()], |row| row.get::<_, String>(0))?;

        let mut dates = Vec::new();
        for row in rows {
            let raw = row?;
            match LogDate::parse(&raw) {
                Ok(date) => dates.push(date),
                Err(e) => {
                    tracing::warn!(wallet = %wallet, value = %raw, error = %e, "skipping invalid workout_date");
                }
            }
        }
        Ok(dates)
    }
}

impl BadgeLedger for Database {
    fn has_minted(&self, wallet: &WalletAddress, milestone: u32) -> Result<bool, DatabaseError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM badge_mints WHERE wallet_address = ?1 AND milestone = ?2",
            params![wallet.as_str(), milestone],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn record_mint(&mut self, mint: &BadgeMint) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO badge_mints (wallet_address, milestone, token_uri, tx_hash, minted_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                mint.wallet_address.as_str(),
                mint.milestone,
                mint.token_uri,
                mint.tx_hash,
                mint.minted_at.to_rfc3339(),
            ],
        )?;
        tracing::info!(
            wallet = %mint.wallet_address,
            milestone = mint.milestone,
            tx_hash = %mint.tx_hash,
            "recorded badge mint"
        );
        Ok(())
    }

    fn mints_for(&self, wallet: &WalletAddress) -> Result<Vec<BadgeMint>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT wallet_address, milestone, token_uri, tx_hash, minted_at
             FROM badge_mints
             WHERE wallet_address = ?1
             ORDER BY milestone ASC",
        )?;
        let rows = stmt.query_map(params![wallet.as_str()], row_to_mint)?;
        let mut mints = Vec::new();
        for row in rows {
            mints.push(row.map_err(|e| DatabaseError::CorruptRow {
                table: "badge_mints".into(),
                message: e.to_string(),
            })?);
        }
        Ok(mints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badge::token_uri;
    use crate::workout::WorkoutInput;
    use chrono::TimeZone;

    const WALLET: &str = "0x1111111111111111111111111111111111111111";

    fn wallet() -> WalletAddress {
        WalletAddress::parse(WALLET).unwrap()
    }

    fn log_at(y: i32, m: u32, d: u32, h: u32) -> WorkoutLog {
        let input = WorkoutInput {
            wallet_address: WALLET.into(),
            workout_type: "Cardio".into(),
            duration_min: 25,
            notes: None,
        };
        let at = Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap();
        WorkoutLog::new(input.validate().unwrap(), at)
    }

    #[test]
    fn record_and_query() {
        let mut db = Database::open_memory().unwrap();
        let log = log_at(2024, 1, 10, 9);
        db.insert_workout(&log).unwrap();

        let logs = db.workouts_for(&wallet()).unwrap();
        assert_eq!(logs, vec![log]);
    }

    #[test]
    fn workout_dates_are_distinct_and_sorted() {
        let mut db = Database::open_memory().unwrap();
        for log in [
            log_at(2024, 1, 10, 18),
            log_at(2024, 1, 8, 9),
            log_at(2024, 1, 10, 7),
        ] {
            db.insert_workout(&log).unwrap();
        }

        let dates: Vec<String> = db
            .workout_dates(&wallet())
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(dates, vec!["2024-01-08", "2024-01-10"]);
    }

    #[test]
    fn invalid_stored_dates_are_skipped() {
        let db = Database::open_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO workout_logs (id, wallet_address, workout_type, duration_min, workout_date, created_at)
                 VALUES ('bad', ?1, 'Yoga', 10, 'not-a-date', '2024-01-01T00:00:00+00:00')",
                params![WALLET],
            )
            .unwrap();
        assert!(db.workout_dates(&wallet()).unwrap().is_empty());
        assert!(matches!(
            db.workouts_for(&wallet()),
            Err(DatabaseError::CorruptRow { .. })
        ));
    }

    #[test]
    fn other_wallets_are_isolated() {
        let mut db = Database::open_memory().unwrap();
        db.insert_workout(&log_at(2024, 1, 10, 9)).unwrap();
        let other = WalletAddress::parse("0x2222222222222222222222222222222222222222").unwrap();
        assert!(db.workout_dates(&other).unwrap().is_empty());
    }

    #[test]
    fn badge_mints_are_one_per_milestone() {
        let mut db = Database::open_memory().unwrap();
        let mint = BadgeMint {
            wallet_address: wallet(),
            milestone: 3,
            token_uri: token_uri(3),
            tx_hash: format!("0x{}", "ab".repeat(32)),
            minted_at: Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap(),
        };

        assert!(!db.has_minted(&wallet(), 3).unwrap());
        db.record_mint(&mint).unwrap();
        assert!(db.has_minted(&wallet(), 3).unwrap());
        assert!(!db.has_minted(&wallet(), 7).unwrap());
        assert!(db.record_mint(&mint).is_err());
        assert_eq!(db.mints_for(&wallet()).unwrap(), vec![mint]);
    }

    #[test]
    fn reopening_a_file_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fitstreak.db");
        let log = log_at(2024, 1, 10, 9);
        {
            let mut db = Database::open_at(&path).unwrap();
            db.insert_workout(&log).unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.workouts_for(&wallet()).unwrap(), vec![log]);
    }
}
