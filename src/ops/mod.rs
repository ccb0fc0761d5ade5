//! High-level diary operations.
//!
//! User-facing actions shared by the one-shot CLI and the interactive
//! shell. Everything here is written against [`EntryStore`] and
//! [`Editor`](crate::editor::Editor), so it runs the same on an in-memory
//! database in tests.
//!
//! [`EntryStore`]: crate::store::EntryStore

pub mod edit;
pub mod export;
pub mod search;

use crate::config::Config;
use crate::db::{self, Database};
use crate::errors::AppResult;
use crate::lock::DatabaseLock;
use tracing::info;

pub use edit::{delete_entry, edit_entry, read_entry, write_entry, EditOutcome};
pub use export::{export_entries, import_entries};
pub use search::{count_entries, format_summary, list_entries, search_entries};

/// An opened diary: the database plus the lock that makes this process its
/// only writer. Field order drops the connection before the lock.
pub struct Diary {
    pub db: Database,
    _lock: DatabaseLock,
}

impl Diary {
    /// Locks and opens the database named by `config`.
    ///
    /// # Errors
    ///
    /// Returns `LockError::DatabaseBusy` if another process has the diary
    /// open, or any error from [`Database::open`].
    pub fn open(config: &Config) -> AppResult<Self> {
        if let Some(parent) = config.db_path.parent() {
            db::ensure_parent_dir(parent)?;
        }

        let lock = DatabaseLock::acquire(&config.db_path)?;
        let db = Database::open(&config.db_path)?;
        info!("Diary opened");

        Ok(Self { db, _lock: lock })
    }
}
