/*!
# Daybook

Daybook is a single-user diary: at most one free-text entry per calendar
day, kept in a local SQLite file and optionally guarded by a password.

## Core Features

- Read, write, edit and delete the entry for any day
- Move the selected day backwards and forwards
- Case-sensitive substring search across all entries
- Interactive shell as well as one-shot subcommands
- JSON export and import

## Architecture

- `store`: the `EntryStore` trait, the seam between diary logic and storage
- `db`: SQLite implementation of the store
- `ops`: user-facing operations shared by the CLI and the shell
- `shell`: the interactive session
- `calendar`: date parsing and day arithmetic
- `gate`: the startup password check
- `cli`, `config`, `errors`, `logging`: the usual application plumbing

## Usage Example

```rust
use daybook::{Database, DateSpecifier, EntryStore};
use chrono::NaiveDate;

fn main() -> daybook::AppResult<()> {
    let mut db = Database::open_in_memory()?;
    let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let yesterday = DateSpecifier::Yesterday.resolve(today)?;

    db.upsert(yesterday, "Hello")?;
    assert_eq!(db.search("ell")?, vec![yesterday]);
    Ok(())
}
```
*/

/// Date specifiers, parsing and day arithmetic
pub mod calendar;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// SQLite storage
pub mod db;
/// External editor integration
pub mod editor;
/// Error types and utilities for error handling
pub mod errors;
/// Startup password check
pub mod gate;
/// Single-writer process lock
pub mod lock;
/// Tracing subscriber setup
pub mod logging;
/// High-level diary operations
pub mod ops;
/// Interactive shell
pub mod shell;
/// The entry store abstraction
pub mod store;

// Re-export important types for convenience
pub use calendar::DateSpecifier;
pub use cli::CliArgs;
pub use config::Config;
pub use db::Database;
pub use errors::{AppError, AppResult};
pub use store::EntryStore;
