//! Substring search and listing over entries.

use crate::constants::DATE_FORMAT_ISO;
use crate::db::{DateRange, EntrySummary};
use crate::errors::AppResult;
use crate::store::EntryStore;
use chrono::NaiveDate;
use tracing::info;

/// Dates whose entry contains `query` (case-sensitive), sorted ascending.
///
/// The store returns matches in no defined order; this is the sorted view
/// both the CLI and the shell print.
pub fn search_entries<S: EntryStore + ?Sized>(store: &S, query: &str) -> AppResult<Vec<NaiveDate>> {
    let mut dates = store.search(query)?;
    dates.sort_unstable();
    info!("Search returned {} entries", dates.len());
    Ok(dates)
}

/// Entry summaries within `range`, ascending by date.
pub fn list_entries<S: EntryStore + ?Sized>(
    store: &S,
    range: DateRange,
) -> AppResult<Vec<EntrySummary>> {
    store.list(range)
}

/// Total number of entries, regardless of any listing range.
pub fn count_entries<S: EntryStore + ?Sized>(store: &S) -> AppResult<usize> {
    store.count()
}

/// One `list` output line: date, word count and last save time.
pub fn format_summary(summary: &EntrySummary) -> String {
    format!(
        "{}  {} words  updated {}",
        summary.date.format(DATE_FORMAT_ISO),
        summary.word_count,
        summary.updated_at
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_search_results_are_sorted() {
        let mut db = Database::open_in_memory().unwrap();
        for d in [9, 3, 27, 14] {
            db.upsert(day(d), "walked the dog").unwrap();
        }
        db.upsert(day(1), "stayed in").unwrap();

        assert_eq!(
            search_entries(&db, "dog").unwrap(),
            vec![day(3), day(9), day(14), day(27)]
        );
    }

    #[test]
    fn test_get_search_delete_flow() {
        let mut db = Database::open_in_memory().unwrap();
        db.upsert(day(1), "Hello").unwrap();

        assert_eq!(db.get(day(1)).unwrap(), Some("Hello".to_string()));
        assert_eq!(search_entries(&db, "ell").unwrap(), vec![day(1)]);
        assert!(db.delete(day(1)).unwrap());
        assert_eq!(db.get(day(1)).unwrap(), None);
        assert!(search_entries(&db, "ell").unwrap().is_empty());
    }

    #[test]
    fn test_list_respects_open_ended_range() {
        let mut db = Database::open_in_memory().unwrap();
        for d in 1..=5 {
            db.upsert(day(d), "x").unwrap();
        }

        let from_third = list_entries(
            &db,
            DateRange {
                from: Some(day(3)),
                to: None,
            },
        )
        .unwrap();
        let dates: Vec<_> = from_third.into_iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![day(3), day(4), day(5)]);
        assert_eq!(count_entries(&db).unwrap(), 5);
    }

    #[test]
    fn test_format_summary_shows_update_time() {
        let summary = EntrySummary {
            date: day(7),
            word_count: 4,
            updated_at: "2024-01-07 21:15:00".to_string(),
        };
        assert_eq!(
            format_summary(&summary),
            "2024-01-07  4 words  updated 2024-01-07 21:15:00"
        );
    }
}
