//! Error handling utilities for the daybook application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents specific error cases that can occur when interacting with external editors.
///
/// # Examples
///
/// ```
/// use daybook::errors::EditorError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "command not found");
/// let error = EditorError::CommandNotFound {
///     command: "vim".to_string(),
///     source: io_error,
/// };
///
/// assert!(format!("{}", error).contains("not found"));
/// assert!(format!("{}", error).contains("vim"));
/// ```
#[derive(Debug, Error)]
pub enum EditorError {
    /// Error when the specified editor command cannot be found.
    #[error("Editor command '{command}' not found: {source}. Please check that the editor is installed and available in your PATH.")]
    CommandNotFound {
        /// The editor command that was not found
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when permission is denied to execute the editor command.
    #[error("Permission denied when trying to execute editor '{command}': {source}.")]
    PermissionDenied {
        /// The editor command that had permission denied
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor command fails to execute due to other I/O errors.
    #[error("Failed to execute editor '{command}': {source}.")]
    ExecutionFailed {
        /// The editor command that failed to execute
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor exits with a non-zero status code.
    #[error("Editor '{command}' exited with non-zero status code: {status_code}. The entry was left unchanged.")]
    NonZeroExit {
        /// The editor command that exited with a non-zero status
        command: String,
        /// The exit status code
        status_code: i32,
    },
}

/// Errors raised while taking the single-writer lock on the diary database.
///
/// ```
/// use daybook::errors::LockError;
/// use std::path::PathBuf;
///
/// let error = LockError::DatabaseBusy {
///     path: PathBuf::from("/tmp/diary.db.lock"),
/// };
/// assert!(format!("{}", error).contains("another daybook process"));
/// ```
#[derive(Debug, Error)]
pub enum LockError {
    /// The lock is held by another process.
    #[error("The diary is open in another daybook process (lock file: {}). Close it and try again.", .path.display())]
    DatabaseBusy {
        /// The lock file path
        path: PathBuf,
    },

    /// The lock file could not be created or locked for a technical reason.
    #[error("Failed to acquire lock {}: {source}", .path.display())]
    AcquisitionFailed {
        /// The lock file path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents specific error cases that can occur during database operations.
///
/// # Examples
///
/// ```
/// use daybook::errors::DatabaseError;
///
/// let error = DatabaseError::NotFound("no entry for 2024-01-01".to_string());
/// assert!(format!("{}", error).contains("not found"));
/// ```
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLite database error.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Requested entry not found in database.
    #[error("Entry not found: {0}")]
    NotFound(String),

    /// The file was written by a newer daybook.
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        /// Version found in `PRAGMA user_version`
        db_version: i32,
        /// Highest version this build understands
        latest_supported: i32,
    },
}

/// Password gate failures.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The typed password does not match the configured hash.
    #[error("Incorrect password.")]
    InvalidPassword,

    /// Reading the password from the terminal failed.
    #[error("Failed to read password: {0}")]
    Prompt(String),

    /// An empty password was entered.
    #[error("Password cannot be empty.")]
    EmptyPassword,

    /// The two prompts of `hash-password` differ.
    #[error("Passwords do not match.")]
    Mismatch,

    /// The configured hash is not a valid PHC string, or hashing failed.
    #[error("Invalid password hash: {0}")]
    InvalidHash(String),
}

/// Represents all possible errors that can occur in the daybook application.
///
/// This type does not implement `Clone` to avoid losing error context when
/// cloning `std::io::Error` values.
///
/// # Examples
///
/// ```
/// use daybook::errors::AppError;
///
/// let error = AppError::Config("Database path is empty".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Database path is empty");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem or terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unparseable date input or date arithmetic leaving the calendar range.
    #[error("Date error: {0}")]
    Date(String),

    /// Errors when interacting with the text editor.
    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),

    /// Errors related to the process lock.
    #[error("Lock error: {0}")]
    Lock(#[from] LockError),

    /// Errors related to database operations.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Password gate errors.
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Export/import payloads that are not valid JSON for the entry format.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for AppError {
    fn from(value: rusqlite::Error) -> Self {
        AppError::Database(DatabaseError::Sqlite(value))
    }
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// ```
/// use daybook::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Date("bad date".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_app_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

        let app_error: AppError = io_error.into();

        match app_error {
            AppError::Io(inner) => {
                assert_eq!(inner.kind(), io::ErrorKind::NotFound);
            }
            _ => panic!("Expected AppError::Io variant"),
        }
    }

    #[test]
    fn test_app_error_display() {
        let config_error = AppError::Config("Invalid configuration".to_string());
        assert_eq!(
            format!("{}", config_error),
            "Configuration error: Invalid configuration"
        );

        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
        let app_io_error = AppError::Io(io_error);
        assert_eq!(format!("{}", app_io_error), "I/O error: permission denied");

        let date_error = AppError::Date("Invalid date".to_string());
        assert_eq!(format!("{}", date_error), "Date error: Invalid date");

        let auth_error: AppError = AuthError::InvalidPassword.into();
        assert_eq!(
            format!("{}", auth_error),
            "Authentication error: Incorrect password."
        );
    }

    #[test]
    fn test_sqlite_error_wraps_into_database_variant() {
        let app_error: AppError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(
            app_error,
            AppError::Database(DatabaseError::Sqlite(_))
        ));
    }

    #[test]
    fn test_editor_error_preserves_source() {
        use std::error::Error as _;

        let error = EditorError::ExecutionFailed {
            command: "nano".to_string(),
            source: io::Error::new(io::ErrorKind::Other, "boom"),
        };
        assert!(error.source().is_some());
        assert!(format!("{}", error).contains("nano"));
    }

    #[test]
    fn test_unsupported_schema_version_message() {
        let error = DatabaseError::UnsupportedSchemaVersion {
            db_version: 7,
            latest_supported: 1,
        };
        assert_eq!(
            format!("{}", error),
            "database schema version 7 is newer than supported 1"
        );
    }
}
