//! Editor abstraction for writing entry text.
//!
//! Entries live in the database, so the external editor works on a
//! temporary file: the current text is written out, the editor runs, and
//! the file is read back. The trait keeps the shell testable without
//! spawning processes.

use crate::constants::EDITOR_TEMP_SUFFIX;
use crate::errors::{AppResult, EditorError};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Trait defining the interface for an editor component.
///
/// # Examples
///
/// ```
/// use daybook::editor::Editor;
/// use daybook::errors::AppResult;
///
/// struct Shouting;
///
/// impl Editor for Shouting {
///     fn edit(&self, initial: &str) -> AppResult<String> {
///         Ok(initial.to_uppercase())
///     }
/// }
///
/// assert_eq!(Shouting.edit("hello").unwrap(), "HELLO");
/// ```
pub trait Editor {
    /// Lets the user edit `initial` and returns the resulting text.
    ///
    /// # Errors
    ///
    /// Implementations return an error when editing fails or is aborted; the
    /// caller must then leave the stored entry untouched.
    fn edit(&self, initial: &str) -> AppResult<String>;
}

/// An editor backed by an external command (e.g. "vim", "nano").
///
/// ```no_run
/// use daybook::editor::{Editor, SystemEditor};
///
/// let editor = SystemEditor { editor_cmd: "vim".to_string() };
/// let text = editor.edit("Dear diary,\n").expect("editor failed");
/// ```
pub struct SystemEditor {
    /// The command to launch with the temp file path as its only argument.
    pub editor_cmd: String,
}

impl Editor for SystemEditor {
    fn edit(&self, initial: &str) -> AppResult<String> {
        let mut file = tempfile::Builder::new()
            .prefix("daybook-")
            .suffix(EDITOR_TEMP_SUFFIX)
            .tempfile()?;
        file.write_all(initial.as_bytes())?;
        file.flush()?;

        launch_editor(&self.editor_cmd, file.path())?;

        // Read by path: some editors replace the file instead of writing in place.
        let edited = fs::read_to_string(file.path())?;
        Ok(edited)
    }
}

fn launch_editor(editor: &str, path: &Path) -> AppResult<()> {
    debug!("Launching editor: {}", editor);

    match Command::new(editor).arg(path).status() {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => Err(EditorError::NonZeroExit {
            command: editor.to_string(),
            status_code: status.code().unwrap_or(-1),
        }
        .into()),
        Err(e) => {
            let command = editor.to_string();
            let specific_error = match e.kind() {
                std::io::ErrorKind::NotFound => EditorError::CommandNotFound { command, source: e },
                std::io::ErrorKind::PermissionDenied => {
                    EditorError::PermissionDenied { command, source: e }
                }
                _ => EditorError::ExecutionFailed { command, source: e },
            };
            Err(specific_error.into())
        }
    }
}
