//! Constants used throughout the application.
//!
//! Grouped by concern so that names, defaults and formats are found in one
//! place instead of being repeated as literals.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "daybook";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A calendar diary: one entry per day, kept in SQLite";

// CLI Arguments & Defaults
/// Default command for the editor if not specified otherwise.
pub const DEFAULT_EDITOR_COMMAND: &str = "vim";
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
/// Log level used with `--verbose`.
pub const VERBOSE_LOG_LEVEL: &str = "debug";

// Configuration Keys & Environment Variables
/// Environment variable for the database file location.
pub const ENV_VAR_DAYBOOK_DB: &str = "DAYBOOK_DB";
/// Environment variable for the preferred daybook editor.
pub const ENV_VAR_DAYBOOK_EDITOR: &str = "DAYBOOK_EDITOR";
/// Standard environment variable for the default editor.
pub const ENV_VAR_EDITOR: &str = "EDITOR";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Argon2 PHC string that enables the password gate.
pub const ENV_VAR_PASSWORD_HASH: &str = "DAYBOOK_PASSWORD_HASH";
/// Non-interactive password for tests and scripts.
pub const ENV_VAR_TEST_PASSWORD: &str = "DAYBOOK_TEST_PASSWORD";
/// Tracing filter directives (`EnvFilter` syntax).
pub const ENV_VAR_LOG: &str = "DAYBOOK_LOG";
/// Default database location relative to the home directory.
pub const DEFAULT_DB_SUBPATH: &str = "Documents/daybook/diary.db";

// Validation
/// Characters forbidden in editor commands for security reasons.
pub const EDITOR_FORBIDDEN_CHARS: &[char] =
    &['|', '&', ';', '$', '(', ')', '`', '\\', '<', '>', '\'', '"'];
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// File System Parameters
/// Suffix appended to the database path to form the process lock file.
pub const LOCK_FILE_SUFFIX: &str = ".lock";
/// Suffix for the temp file handed to the editor.
pub const EDITOR_TEMP_SUFFIX: &str = ".txt";
/// Default POSIX permissions for the database directory (owner only).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD). Also the storage format.
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format string for compact date format (YYYYMMDD).
pub const DATE_FORMAT_COMPACT: &str = "%Y%m%d";
/// Human-readable date used in shell output.
pub const DATE_FORMAT_DISPLAY: &str = "%A, %B %d, %Y";

// Logging Configuration
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
