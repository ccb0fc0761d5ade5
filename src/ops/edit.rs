//! Reading, writing, editing and deleting single entries.

use crate::editor::Editor;
use crate::errors::{AppResult, DatabaseError};
use crate::store::EntryStore;
use chrono::NaiveDate;
use tracing::{debug, info};

/// What [`edit_entry`] did with the editor's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The text changed and was saved.
    Saved,
    /// The text came back identical; nothing was written.
    Unchanged,
}

fn not_found(date: NaiveDate) -> DatabaseError {
    DatabaseError::NotFound(format!("no entry for {}", date))
}

/// Returns the content for `date`.
///
/// # Errors
///
/// Returns `DatabaseError::NotFound` when the day has no entry.
pub fn read_entry<S: EntryStore + ?Sized>(store: &S, date: NaiveDate) -> AppResult<String> {
    store.get(date)?.ok_or_else(|| not_found(date).into())
}

/// Saves `content` as the entry for `date`, replacing any previous text.
pub fn write_entry<S: EntryStore + ?Sized>(
    store: &mut S,
    date: NaiveDate,
    content: &str,
) -> AppResult<()> {
    store.upsert(date, content)?;
    info!("Entry saved for {}", date);
    Ok(())
}

/// Opens the entry for `date` in `editor` and saves the result.
///
/// A missing entry starts from empty text. Nothing is written when the
/// text comes back unchanged, which also means an untouched new day does
/// not create an empty entry. If the editor fails, the stored entry is left
/// as it was.
///
/// # Errors
///
/// Returns editor errors (launch failure, non-zero exit) and storage errors.
pub fn edit_entry<S, E>(store: &mut S, editor: &E, date: NaiveDate) -> AppResult<EditOutcome>
where
    S: EntryStore + ?Sized,
    E: Editor + ?Sized,
{
    let original = store.get(date)?;
    let initial = original.as_deref().unwrap_or("");

    let edited = editor.edit(initial)?;

    if edited == initial {
        debug!("Entry for {} unchanged after editing", date);
        return Ok(EditOutcome::Unchanged);
    }

    store.upsert(date, &edited)?;
    info!("Entry saved for {} after editing", date);
    Ok(EditOutcome::Saved)
}

/// Deletes the entry for `date`.
///
/// # Errors
///
/// Returns `DatabaseError::NotFound` when there was nothing to delete.
pub fn delete_entry<S: EntryStore + ?Sized>(store: &mut S, date: NaiveDate) -> AppResult<()> {
    if store.delete(date)? {
        info!("Entry deleted for {}", date);
        Ok(())
    } else {
        Err(not_found(date).into())
    }
}
