//! Database schema migrations for fitstreak.
//!
//! Migrations are versioned and applied automatically when opening the database.
//! The `schema_version` table tracks the current migration version.

use rusqlite::{Connection, Result as SqliteResult};

/// Current schema version.
///
/// Increment this when adding new migrations.
pub const SCHEMA_VERSION: i32 = 2;

/// Apply all pending migrations to bring the database to the current schema version.
///
/// # Errors
/// Returns an error if migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }

    Ok(())
}

fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Current schema version, 0 for a fresh database.
pub fn get_schema_version(conn: &Connection) -> SqliteResult<i32> {
    match conn.query_row("SELECT version FROM schema_version", [], |row| {
        row.get::<_, i32>(0)
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e),
    }
}

fn set_schema_version(conn: &Connection, version: i32) -> SqliteResult<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Migration v1: workout log table.
///
/// `workout_date` holds the UTC calendar day (`YYYY-MM-DD`) the workout
/// was submitted on; `created_at` is the full RFC 3339 timestamp.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS workout_logs (
            id             TEXT PRIMARY KEY,
            wallet_address TEXT NOT NULL,
            workout_type   TEXT NOT NULL,
            duration_min   INTEGER NOT NULL CHECK (duration_min > 0),
            notes          TEXT NOT NULL DEFAULT '',
            workout_date   TEXT NOT NULL,
            created_at     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_workout_logs_wallet_date
            ON workout_logs(wallet_address, workout_date);",
    )?;

    set_schema_version(&tx, 1)?;
    tx.commit()
}

/// Migration v2: local record of confirmed badge mints.
///
/// One row per (wallet, milestone), matching the contract's one-time mint rule.
fn migrate_v2(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS badge_mints (
            wallet_address TEXT NOT NULL,
            milestone      INTEGER NOT NULL,
            token_uri      TEXT NOT NULL,
            tx_hash        TEXT NOT NULL,
            minted_at      TEXT NOT NULL,
            PRIMARY KEY (wallet_address, milestone)
        );",
    )?;

    set_schema_version(&tx, 2)?;
    tx.commit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_exists(conn: &Connection, name: &str) -> bool {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get::<_, i32>(0),
        )
        .unwrap()
            > 0
    }

    #[test]
    fn test_migrate_from_scratch() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
        assert!(table_exists(&conn, "workout_logs"));
        assert!(table_exists(&conn, "badge_mints"));
    }

    #[test]
    fn test_migrate_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        migrate(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_incremental_migration_keeps_workouts() {
        let conn = Connection::open_in_memory().unwrap();

        create_schema_version_table(&conn).unwrap();
        migrate_v1(&conn).unwrap();
        conn.execute(
            "INSERT INTO workout_logs (id, wallet_address, workout_type, duration_min, workout_date, created_at)
             VALUES ('w1', '0xabc', 'Yoga', 20, '2024-01-01', '2024-01-01T08:00:00+00:00')",
            [],
        )
        .unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), 1);

        migrate(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), 2);
        let count: i32 = conn
            .query_row("SELECT COUNT(*) FROM workout_logs", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_zero_duration_rejected_by_schema() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        let result = conn.execute(
            "INSERT INTO workout_logs (id, wallet_address, workout_type, duration_min, workout_date, created_at)
             VALUES ('w1', '0xabc', 'Yoga', 0, '2024-01-01', '2024-01-01T08:00:00+00:00')",
            [],
        );
        assert!(result.is_err());
    }
}
