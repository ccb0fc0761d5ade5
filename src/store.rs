//! The entry store seam.
//!
//! `EntryStore` is the contract the shell and the one-shot operations are
//! written against: a persistent mapping from calendar date to text.
//! [`Database`] is the SQLite-backed implementation.

use crate::db::{entries, Database, DateRange, DiaryEntry, EntrySummary};
use crate::errors::AppResult;
use chrono::NaiveDate;

/// Persistent date -> content mapping with at most one entry per date.
///
/// # Examples
///
/// ```
/// use daybook::db::Database;
/// use daybook::store::EntryStore;
/// use chrono::NaiveDate;
///
/// let mut store = Database::open_in_memory()?;
/// let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
///
/// store.upsert(date, "Hello")?;
/// assert_eq!(store.get(date)?, Some("Hello".to_string()));
/// assert_eq!(store.search("ell")?, vec![date]);
/// assert_eq!(store.count()?, 1);
/// assert!(store.delete(date)?);
/// assert_eq!(store.get(date)?, None);
/// # Ok::<(), daybook::AppError>(())
/// ```
pub trait EntryStore {
    /// Point lookup by exact date.
    fn get(&self, date: NaiveDate) -> AppResult<Option<String>>;

    /// Creates the entry for `date` or replaces its content. Durable on return.
    fn upsert(&mut self, date: NaiveDate, content: &str) -> AppResult<()>;

    /// Removes the entry for `date`; `false` means there was none.
    fn delete(&mut self, date: NaiveDate) -> AppResult<bool>;

    /// Dates whose content contains `needle` (case-sensitive), in no
    /// particular order.
    fn search(&self, needle: &str) -> AppResult<Vec<NaiveDate>>;

    /// Entry summaries in ascending date order.
    fn list(&self, range: DateRange) -> AppResult<Vec<EntrySummary>>;

    /// Every entry with content, in ascending date order.
    fn all(&self) -> AppResult<Vec<DiaryEntry>>;

    /// Number of stored entries.
    fn count(&self) -> AppResult<usize>;
}

impl EntryStore for Database {
    fn get(&self, date: NaiveDate) -> AppResult<Option<String>> {
        entries::get_entry(self.conn(), date)
    }

    fn upsert(&mut self, date: NaiveDate, content: &str) -> AppResult<()> {
        entries::upsert_entry(self.conn(), date, content)
    }

    fn delete(&mut self, date: NaiveDate) -> AppResult<bool> {
        entries::delete_entry(self.conn(), date)
    }

    fn search(&self, needle: &str) -> AppResult<Vec<NaiveDate>> {
        entries::search_entries(self.conn(), needle)
    }

    fn list(&self, range: DateRange) -> AppResult<Vec<EntrySummary>> {
        entries::list_entries(self.conn(), range)
    }

    fn all(&self) -> AppResult<Vec<DiaryEntry>> {
        entries::all_entries(self.conn())
    }

    fn count(&self) -> AppResult<usize> {
        entries::count_entries(self.conn())
    }
}
