//! Database operations for diary entries.
//!
//! This module owns the SQLite file that backs the diary. A single
//! connection is opened per process and reused for every operation.
//!
//! # Module Structure
//!
//! - `schema`: Table definition and schema versioning
//! - `entries`: Entry CRUD, search and listing
//!
//! # Example
//!
//! ```no_run
//! use daybook::db::Database;
//! use std::path::Path;
//!
//! let db = Database::open(Path::new("/tmp/diary.db"))?;
//! let conn = db.conn();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod entries;
pub mod schema;

use crate::errors::{AppResult, DatabaseError};
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info};

pub use entries::{DateRange, DiaryEntry, EntrySummary};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the diary database.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens or creates the diary database at `db_path`.
    ///
    /// Missing parent directories are created (owner-only on Unix) and the
    /// schema is applied before the handle is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The parent directory cannot be created
    /// - The database file cannot be opened
    /// - The file carries a newer schema version than this build supports
    pub fn open(db_path: &Path) -> AppResult<Self> {
        debug!("Opening database at: {:?}", db_path);

        if let Some(parent) = db_path.parent() {
            ensure_parent_dir(parent)?;
        }

        let conn = Connection::open(db_path).map_err(|e| {
            error!("Failed to open database: {}", e);
            DatabaseError::Sqlite(e)
        })?;

        let db = Self::bootstrap(conn)?;
        info!("Database opened successfully");
        Ok(db)
    }

    /// Opens a private in-memory database with the schema applied.
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::Sqlite)?;
        Self::bootstrap(conn)
    }

    fn bootstrap(conn: Connection) -> AppResult<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(DatabaseError::Sqlite)?;
        schema::create_tables(&conn)?;
        Ok(Database { conn })
    }

    /// Borrow the underlying connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

/// Creates `dir` (owner-only on Unix) if it does not exist yet.
pub fn ensure_parent_dir(dir: &Path) -> AppResult<()> {
    if dir.as_os_str().is_empty() || dir.exists() {
        return Ok(());
    }

    fs::create_dir_all(dir)?;

    #[cfg(unix)]
    {
        use crate::constants::DEFAULT_DIR_PERMISSIONS;
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(dir, fs::Permissions::from_mode(DEFAULT_DIR_PERMISSIONS))?;
        debug!("Set {:o} permissions on database directory", DEFAULT_DIR_PERMISSIONS);
    }

    Ok(())
}
