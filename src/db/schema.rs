//! Database schema definitions and initialization.
//!
//! The diary has a single table. Its version is tracked in
//! `PRAGMA user_version` so a file written by a newer build is refused
//! instead of being silently misread.

use super::entries::date_key;
use crate::errors::{AppError, AppResult, DatabaseError};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use tracing::{debug, info};

/// Current schema version.
///
/// Increment this whenever schema changes are made and add the upgrade step
/// to [`create_tables`].
///
/// - 1: `date` stored as ISO text
/// - 2: `date` stored as a day number (`num_days_from_ce`)
pub const SCHEMA_VERSION: i32 = 2;

const CREATE_ENTRIES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS entries (
        date INTEGER PRIMARY KEY NOT NULL,
        content TEXT NOT NULL DEFAULT '',
        updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
"#;

/// Creates the `entries` table if missing, upgrades older files and stamps
/// the schema version.
///
/// Idempotent; safe to call on every open.
///
/// # Errors
///
/// Returns `DatabaseError::UnsupportedSchemaVersion` when the file is newer
/// than this build, or a SQLite error if a DDL statement fails.
pub fn create_tables(conn: &Connection) -> AppResult<()> {
    let db_version = schema_version(conn)?;
    if db_version > SCHEMA_VERSION {
        return Err(DatabaseError::UnsupportedSchemaVersion {
            db_version,
            latest_supported: SCHEMA_VERSION,
        }
        .into());
    }

    debug!("Creating database tables (on-disk version {})", db_version);

    if db_version == 1 {
        migrate_text_dates(conn)?;
    }

    conn.execute_batch(CREATE_ENTRIES_TABLE)
        .map_err(DatabaseError::Sqlite)?;

    if db_version < SCHEMA_VERSION {
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)
            .map_err(DatabaseError::Sqlite)?;
        info!(
            "Database schema migrated from version {} to {}",
            db_version, SCHEMA_VERSION
        );
    }

    Ok(())
}

// Rewrites version 1 text keys as day numbers in one transaction.
fn migrate_text_dates(conn: &Connection) -> AppResult<()> {
    let tx = conn.unchecked_transaction().map_err(DatabaseError::Sqlite)?;

    tx.execute_batch("ALTER TABLE entries RENAME TO entries_v1;")
        .map_err(DatabaseError::Sqlite)?;
    tx.execute_batch(CREATE_ENTRIES_TABLE)
        .map_err(DatabaseError::Sqlite)?;

    let mut select = tx
        .prepare("SELECT date, content, updated_at FROM entries_v1")
        .map_err(DatabaseError::Sqlite)?;
    let rows = select
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;
    drop(select);

    for (raw_date, content, updated_at) in &rows {
        let date = raw_date.parse::<NaiveDate>().map_err(|_| {
            AppError::Date(format!("Unreadable stored date '{}'", raw_date))
        })?;
        tx.execute(
            "INSERT INTO entries (date, content, updated_at) VALUES (?1, ?2, ?3)",
            params![date_key(date), content, updated_at],
        )
        .map_err(DatabaseError::Sqlite)?;
    }

    tx.execute_batch("DROP TABLE entries_v1;")
        .map_err(DatabaseError::Sqlite)?;
    tx.commit().map_err(DatabaseError::Sqlite)?;

    info!("Converted {} entries to day-number keys", rows.len());
    Ok(())
}

/// Reads `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> AppResult<i32> {
    let version = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(DatabaseError::Sqlite)?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[test]
    fn test_create_tables_sets_version() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(schema_version(&conn).unwrap(), 0);

        create_tables(&conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_create_tables_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'entries'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", SCHEMA_VERSION + 1)
            .unwrap();

        match create_tables(&conn) {
            Err(AppError::Database(DatabaseError::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            })) => {
                assert_eq!(db_version, SCHEMA_VERSION + 1);
                assert_eq!(latest_supported, SCHEMA_VERSION);
            }
            other => panic!("Expected UnsupportedSchemaVersion, got {:?}", other),
        }
    }

    #[test]
    fn test_date_is_primary_key() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        conn.execute(
            "INSERT INTO entries (date, content) VALUES (738886, 'a')",
            [],
        )
        .unwrap();
        let duplicate = conn.execute(
            "INSERT INTO entries (date, content) VALUES (738886, 'b')",
            [],
        );
        assert!(duplicate.is_err());
    }

    #[test]
    fn test_version_one_text_keys_are_converted() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE entries (
                date TEXT PRIMARY KEY NOT NULL,
                content TEXT NOT NULL DEFAULT '',
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            INSERT INTO entries (date, content) VALUES ('2024-01-01', 'now');
            INSERT INTO entries (date, content) VALUES ('+10237-09-21', 'far');
            PRAGMA user_version = 1;
            "#,
        )
        .unwrap();

        create_tables(&conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);

        let recent = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let far = NaiveDate::from_ymd_opt(10237, 9, 21).unwrap();
        assert_eq!(
            crate::db::entries::get_entry(&conn, far).unwrap(),
            Some("far".to_string())
        );

        let dates: Vec<_> = crate::db::entries::all_entries(&conn)
            .unwrap()
            .into_iter()
            .map(|e| e.date)
            .collect();
        assert_eq!(dates, vec![recent, far]);
    }
}
