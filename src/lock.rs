//! Single-writer lock for the diary database.
//!
//! An advisory exclusive lock on `<db_path>.lock` is taken when the diary is
//! opened and released when the guard drops (or the process exits).

use crate::constants::LOCK_FILE_SUFFIX;
use crate::errors::{AppResult, LockError};
use fs2::FileExt;
use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Held for as long as this process owns the diary.
#[derive(Debug)]
pub struct DatabaseLock {
    file: File,
    path: PathBuf,
}

impl DatabaseLock {
    /// Takes the lock next to `db_path` without blocking.
    ///
    /// # Errors
    ///
    /// Returns `LockError::DatabaseBusy` if another process holds it, or
    /// `LockError::AcquisitionFailed` if the lock file cannot be opened.
    pub fn acquire(db_path: &Path) -> AppResult<Self> {
        let path = lock_path_for(db_path);

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| LockError::AcquisitionFailed {
                path: path.clone(),
                source,
            })?;

        if let Err(e) = file.try_lock_exclusive() {
            if e.kind() == fs2::lock_contended_error().kind() {
                return Err(LockError::DatabaseBusy { path }.into());
            }
            return Err(LockError::AcquisitionFailed { path, source: e }.into());
        }

        debug!("Acquired database lock {:?}", path);
        Ok(Self { file, path })
    }

    /// Location of the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DatabaseLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// `<db_path>.lock`
pub fn lock_path_for(db_path: &Path) -> PathBuf {
    let mut name = OsString::from(db_path.as_os_str());
    name.push(LOCK_FILE_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use tempfile::tempdir;

    #[test]
    fn test_lock_path_appends_suffix() {
        assert_eq!(
            lock_path_for(Path::new("/data/diary.db")),
            PathBuf::from("/data/diary.db.lock")
        );
    }

    #[test]
    fn test_second_acquire_is_busy_until_release() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("diary.db");

        let first = DatabaseLock::acquire(&db_path).unwrap();
        assert!(first.path().exists());

        match DatabaseLock::acquire(&db_path) {
            Err(AppError::Lock(LockError::DatabaseBusy { path })) => {
                assert_eq!(path, lock_path_for(&db_path));
            }
            other => panic!("Expected DatabaseBusy, got {:?}", other),
        }

        drop(first);
        assert!(DatabaseLock::acquire(&db_path).is_ok());
    }

    #[test]
    fn test_missing_directory_is_acquisition_failure() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("missing").join("diary.db");

        assert!(matches!(
            DatabaseLock::acquire(&db_path),
            Err(AppError::Lock(LockError::AcquisitionFailed { .. }))
        ));
    }
}
