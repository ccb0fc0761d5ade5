//! JSON export and import of the whole diary.
//!
//! The format is a JSON array of `{"date": "YYYY-MM-DD", "content": "..."}`
//! objects in ascending date order.

use crate::db::DiaryEntry;
use crate::errors::AppResult;
use crate::store::EntryStore;
use std::io::{Read, Write};
use tracing::info;

/// Writes every entry to `out` as pretty-printed JSON. Returns the count.
///
/// # Errors
///
/// Returns storage, serialization or write errors.
pub fn export_entries<S, W>(store: &S, mut out: W) -> AppResult<usize>
where
    S: EntryStore + ?Sized,
    W: Write,
{
    let entries = store.all()?;
    serde_json::to_writer_pretty(&mut out, &entries)?;
    writeln!(out)?;
    info!("Exported {} entries", entries.len());
    Ok(entries.len())
}

/// Reads a JSON export from `input` and upserts every entry.
///
/// Entries already present for the same date are replaced. The whole
/// payload is parsed before anything is written, so malformed input leaves
/// the diary untouched.
///
/// # Errors
///
/// Returns `AppError::Serialization` for malformed JSON, or storage errors.
pub fn import_entries<S, R>(store: &mut S, input: R) -> AppResult<usize>
where
    S: EntryStore + ?Sized,
    R: Read,
{
    let entries: Vec<DiaryEntry> = serde_json::from_reader(input)?;
    for entry in &entries {
        store.upsert(entry.date, &entry.content)?;
    }
    info!("Imported {} entries", entries.len());
    Ok(entries.len())
}
