//! Configuration management for the daybook application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults.
//!
//! # Environment Variables
//!
//! - `DAYBOOK_DB`: Path to the diary database (defaults to ~/Documents/daybook/diary.db)
//! - `DAYBOOK_EDITOR`: Editor used by `edit`
//! - `EDITOR`: Fallback editor if DAYBOOK_EDITOR is not set (defaults to "vim")
//! - `DAYBOOK_PASSWORD_HASH`: Argon2 hash enabling the password gate
//! - `HOME`: Used for expanding the default database path

use crate::constants::{
    DEFAULT_DB_SUBPATH, DEFAULT_EDITOR_COMMAND, EDITOR_FORBIDDEN_CHARS, ENV_VAR_DAYBOOK_DB,
    ENV_VAR_DAYBOOK_EDITOR, ENV_VAR_EDITOR, ENV_VAR_HOME, ENV_VAR_PASSWORD_HASH,
    REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Configuration for the daybook application.
///
/// # Examples
///
/// ```
/// use daybook::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     editor: "nano".to_string(),
///     db_path: PathBuf::from("/path/to/diary.db"),
///     password_hash: None,
/// };
/// assert!(config.validate().is_ok());
/// ```
pub struct Config {
    /// Editor command to use for `edit`.
    ///
    /// Precedence: `DAYBOOK_EDITOR`, then `EDITOR`, then "vim".
    pub editor: String,

    /// SQLite file holding the entries.
    pub db_path: PathBuf,

    /// Argon2 PHC string; `None` disables the password gate.
    pub password_hash: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("editor", &REDACTED_PLACEHOLDER)
            .field("db_path", &REDACTED_PLACEHOLDER)
            .field(
                "password_hash",
                &self.password_hash.as_ref().map(|_| REDACTED_PLACEHOLDER),
            )
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            editor: DEFAULT_EDITOR_COMMAND.to_string(),
            db_path: PathBuf::new(),
            password_hash: None,
        }
    }
}

impl Config {
    /// Validates an editor command string for security.
    ///
    /// The command must be non-empty and contain neither spaces nor shell
    /// metacharacters, since it is executed directly.
    fn validate_editor_command(editor_cmd: &str) -> AppResult<&str> {
        if editor_cmd.is_empty() {
            return Err(AppError::Config(
                "Editor command cannot be empty".to_string(),
            ));
        }

        if editor_cmd.contains(' ') {
            return Err(AppError::Config(
                "Editor command cannot contain spaces. Use a wrapper script or shell alias for editors requiring arguments".to_string(),
            ));
        }

        if let Some(ch) = editor_cmd
            .chars()
            .find(|ch| EDITOR_FORBIDDEN_CHARS.contains(ch))
        {
            return Err(AppError::Config(format!(
                "Editor command cannot contain shell metacharacters: '{}'. Use a wrapper script or shell alias instead",
                ch
            )));
        }

        Ok(editor_cmd)
    }

    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The database path is expanded with `shellexpand` so `~` and `$VAR`
    /// references work.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if path expansion fails, the path is empty,
    /// or the editor command fails validation.
    pub fn load() -> AppResult<Self> {
        let editor_raw = env::var(ENV_VAR_DAYBOOK_EDITOR)
            .or_else(|_| env::var(ENV_VAR_EDITOR))
            .unwrap_or_else(|_| DEFAULT_EDITOR_COMMAND.to_string());

        let editor = Config::validate_editor_command(&editor_raw)?;

        let db_path_str = env::var(ENV_VAR_DAYBOOK_DB).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, DEFAULT_DB_SUBPATH)
        });

        let expanded_path = shellexpand::full(&db_path_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;

        let db_path = PathBuf::from(expanded_path.into_owned());

        if db_path.as_os_str().is_empty() {
            return Err(AppError::Config("Database path is empty".to_string()));
        }

        let password_hash = env::var(ENV_VAR_PASSWORD_HASH)
            .ok()
            .map(|hash| hash.trim().to_string())
            .filter(|hash| !hash.is_empty());

        Ok(Config {
            editor: editor.to_string(),
            db_path,
            password_hash,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when the database path is empty or relative,
    /// or the editor is empty.
    pub fn validate(&self) -> AppResult<()> {
        if self.db_path.as_os_str().is_empty() {
            return Err(AppError::Config("Database path is empty".to_string()));
        }

        if self.editor.is_empty() {
            return Err(AppError::Config("Editor command is empty".to_string()));
        }

        if !self.db_path.is_absolute() {
            return Err(AppError::Config(
                "Database path must be an absolute path".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tempfile::tempdir;

    fn clear_env() {
        env::remove_var(ENV_VAR_DAYBOOK_EDITOR);
        env::remove_var(ENV_VAR_EDITOR);
        env::remove_var(ENV_VAR_DAYBOOK_DB);
        env::remove_var(ENV_VAR_PASSWORD_HASH);
    }

    #[test]
    fn test_debug_impl_redacts_sensitive_info() {
        let config = Config {
            editor: "vim".to_string(),
            db_path: PathBuf::from("/home/username/private/diary.db"),
            password_hash: Some("$argon2id$v=19$secret".to_string()),
        };

        let debug_output = format!("{:?}", config);

        assert!(debug_output.contains(REDACTED_PLACEHOLDER));
        assert!(!debug_output.contains("vim"));
        assert!(!debug_output.contains("/home/username/private"));
        assert!(!debug_output.contains("argon2id"));
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.editor, "vim");
        assert!(config.db_path.as_os_str().is_empty());
        assert!(config.password_hash.is_none());
    }

    #[test]
    fn test_validate_editor_command() {
        assert!(Config::validate_editor_command("nano").is_ok());
        assert!(Config::validate_editor_command("").is_err());
        assert!(Config::validate_editor_command("code --wait").is_err());
        assert!(Config::validate_editor_command("vim;rm").is_err());
        assert!(Config::validate_editor_command("$(evil)").is_err());
    }

    #[test]
    #[serial]
    fn test_load_editor_precedence() {
        clear_env();
        let temp_dir = tempdir().unwrap();
        env::set_var(
            ENV_VAR_DAYBOOK_DB,
            temp_dir.path().join("diary.db").to_string_lossy().to_string(),
        );

        env::set_var(ENV_VAR_EDITOR, "nano");
        let config = Config::load().unwrap();
        assert_eq!(config.editor, "nano");

        env::set_var(ENV_VAR_DAYBOOK_EDITOR, "code");
        let config = Config::load().unwrap();
        assert_eq!(config.editor, "code");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_default_db_path_under_home() {
        clear_env();
        let original_home = env::var(ENV_VAR_HOME).ok();
        let temp_dir = tempdir().unwrap();
        let home = temp_dir.path().to_string_lossy().to_string();
        env::set_var(ENV_VAR_HOME, &home);

        let config = Config::load().unwrap();
        assert_eq!(
            config.db_path,
            PathBuf::from(&home).join("Documents/daybook/diary.db")
        );

        match original_home {
            Some(val) => env::set_var(ENV_VAR_HOME, val),
            None => env::remove_var(ENV_VAR_HOME),
        }
    }

    #[test]
    #[serial]
    fn test_load_password_hash_blank_is_disabled() {
        clear_env();
        env::set_var(ENV_VAR_DAYBOOK_DB, "/tmp/daybook-config-test.db");
        env::set_var(ENV_VAR_PASSWORD_HASH, "   ");

        let config = Config::load().unwrap();
        assert!(config.password_hash.is_none());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_rejects_bad_editor() {
        clear_env();
        env::set_var(ENV_VAR_DAYBOOK_DB, "/tmp/daybook-config-test.db");
        env::set_var(ENV_VAR_DAYBOOK_EDITOR, "vim | cat");

        let result = Config::load();
        assert!(matches!(result, Err(AppError::Config(_))));

        clear_env();
    }

    #[test]
    fn test_validate() {
        let valid = Config {
            editor: "vim".to_string(),
            db_path: PathBuf::from("/absolute/diary.db"),
            password_hash: None,
        };
        assert!(valid.validate().is_ok());

        let relative = Config {
            db_path: PathBuf::from("diary.db"),
            ..Config::default()
        };
        assert!(relative.validate().is_err());

        let empty_editor = Config {
            editor: String::new(),
            db_path: PathBuf::from("/absolute/diary.db"),
            password_hash: None,
        };
        match empty_editor.validate() {
            Err(AppError::Config(msg)) => assert!(msg.contains("Editor")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }
}
