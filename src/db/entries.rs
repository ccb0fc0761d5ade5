//! Entry CRUD operations.
//!
//! Free functions over a `rusqlite::Connection` for reading and writing the
//! `entries` table. A date is stored as its day number counted from
//! 0001-01-01 (`num_days_from_ce`), so SQL ordering and range bounds follow
//! the calendar for every year chrono can represent, including BCE years
//! and years past 9999.

use crate::errors::{AppResult, DatabaseError};
use chrono::{Datelike, NaiveDate};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One diary entry: the text kept for a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub date: NaiveDate,
    pub content: String,
}

/// Listing row; the content itself stays in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySummary {
    pub date: NaiveDate,
    pub word_count: usize,
    /// UTC `YYYY-MM-DD HH:MM:SS` of the last save.
    pub updated_at: String,
}

/// Inclusive bounds for [`list_entries`]. `None` leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Storage key for `date`.
pub(crate) fn date_key(date: NaiveDate) -> i32 {
    date.num_days_from_ce()
}

fn date_from_row(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let key: i32 = row.get(idx)?;
    NaiveDate::from_num_days_from_ce_opt(key)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(idx, i64::from(key)))
}

/// Retrieves the content stored for `date`.
///
/// # Errors
///
/// Returns an error if the database operation fails.
/// Returns `Ok(None)` if no entry exists for the given date.
pub fn get_entry(conn: &Connection, date: NaiveDate) -> AppResult<Option<String>> {
    debug!("Getting entry for date {}", date);

    let result = conn.query_row(
        "SELECT content FROM entries WHERE date = ?1",
        params![date_key(date)],
        |row| row.get::<_, String>(0),
    );

    match result {
        Ok(content) => Ok(Some(content)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(DatabaseError::Sqlite(e).into()),
    }
}

/// Inserts or replaces the entry for `date`.
///
/// A single statement, so the write is committed when this returns
/// (the connection runs in autocommit mode).
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn upsert_entry(conn: &Connection, date: NaiveDate, content: &str) -> AppResult<()> {
    debug!("Upserting entry for date {} ({} bytes)", date, content.len());

    conn.execute(
        r#"
        INSERT INTO entries (date, content, updated_at)
        VALUES (?1, ?2, CURRENT_TIMESTAMP)
        ON CONFLICT(date) DO UPDATE SET
            content = excluded.content,
            updated_at = CURRENT_TIMESTAMP
        "#,
        params![date_key(date), content],
    )
    .map_err(DatabaseError::Sqlite)?;

    Ok(())
}

/// Deletes the entry for `date`.
///
/// Returns `Ok(false)` when there was nothing to delete.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn delete_entry(conn: &Connection, date: NaiveDate) -> AppResult<bool> {
    debug!("Deleting entry for date {}", date);

    let rows_affected = conn
        .execute(
            "DELETE FROM entries WHERE date = ?1",
            params![date_key(date)],
        )
        .map_err(DatabaseError::Sqlite)?;

    Ok(rows_affected > 0)
}

/// Returns the dates whose content contains `needle`.
///
/// Matching is case-sensitive (`instr`, unlike `LIKE`). No ordering is
/// applied; sort the result if a stable order matters. An empty needle
/// matches every entry.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn search_entries(conn: &Connection, needle: &str) -> AppResult<Vec<NaiveDate>> {
    debug!("Searching entries ({} byte needle)", needle.len());

    let mut stmt = conn
        .prepare("SELECT date FROM entries WHERE instr(content, ?1) > 0")
        .map_err(DatabaseError::Sqlite)?;

    let dates = stmt
        .query_map(params![needle], |row| date_from_row(row, 0))
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;

    debug!("Search matched {} entries", dates.len());
    Ok(dates)
}

/// Lists entries in ascending date order, optionally bounded by `range`.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn list_entries(conn: &Connection, range: DateRange) -> AppResult<Vec<EntrySummary>> {
    debug!("Listing entries in {:?}", range);

    let mut stmt = conn
        .prepare(
            r#"
            SELECT date, content, updated_at
            FROM entries
            WHERE (?1 IS NULL OR date >= ?1)
              AND (?2 IS NULL OR date <= ?2)
            ORDER BY date ASC
            "#,
        )
        .map_err(DatabaseError::Sqlite)?;

    let summaries = stmt
        .query_map(
            params![range.from.map(date_key), range.to.map(date_key)],
            |row| {
                let content: String = row.get(1)?;
                Ok(EntrySummary {
                    date: date_from_row(row, 0)?,
                    word_count: content.split_whitespace().count(),
                    updated_at: row.get(2)?,
                })
            },
        )
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;

    Ok(summaries)
}

/// Returns every entry with its content, ordered by date.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn all_entries(conn: &Connection) -> AppResult<Vec<DiaryEntry>> {
    let mut stmt = conn
        .prepare("SELECT date, content FROM entries ORDER BY date ASC")
        .map_err(DatabaseError::Sqlite)?;

    let entries = stmt
        .query_map([], |row| {
            Ok(DiaryEntry {
                date: date_from_row(row, 0)?,
                content: row.get(1)?,
            })
        })
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;

    Ok(entries)
}

/// Number of stored entries.
pub fn count_entries(conn: &Connection) -> AppResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))
        .map_err(DatabaseError::Sqlite)?;
    Ok(count as usize)
}
