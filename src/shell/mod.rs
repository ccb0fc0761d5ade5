//! Interactive diary shell.
//!
//! A line-oriented session that keeps a selected date and maps each typed
//! command onto an entry-store operation. Command failures are reported and
//! the session continues; only I/O failures on the shell's own streams end
//! it.

use crate::calendar::{shift_day, DateSpecifier};
use crate::constants::{DATE_FORMAT_DISPLAY, DATE_FORMAT_ISO};
use crate::db::DateRange;
use crate::editor::Editor;
use crate::errors::{AppError, AppResult, DatabaseError};
use crate::ops::{self, EditOutcome};
use crate::store::EntryStore;
use chrono::NaiveDate;
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::debug;

const HELP_TEXT: &str = "\
Commands:
  today             select today
  date <when>       select a day (YYYY-MM-DD, YYYYMMDD, yesterday, tomorrow, +N, -N)
  prev [n]          go back n days (default 1)
  next [n]          go forward n days (default 1)
  show              print the selected entry
  save <text>       replace the selected entry with <text> (spaces inside <text> are kept)
  edit              edit the selected entry in your editor
  delete            delete the selected entry
  search <text>     list days whose entry contains <text> (case-sensitive)
  list              list all days with an entry
  help              show this help
  quit              leave the shell";

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Today,
    Date(DateSpecifier),
    Prev(u32),
    Next(u32),
    Show,
    Save(String),
    Edit,
    Delete,
    Search(String),
    List,
    Help,
    Quit,
}

/// Why a line could not be turned into a [`ShellCommand`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("Unknown command '{0}'. Type 'help' for a list of commands.")]
    Unknown(String),

    #[error("{command}: {reason}")]
    BadArgument { command: String, reason: String },
}

impl ShellCommand {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    ///
    /// ```
    /// use daybook::shell::ShellCommand;
    ///
    /// assert_eq!(ShellCommand::parse("prev 3").unwrap(), Some(ShellCommand::Prev(3)));
    /// assert_eq!(
    ///     ShellCommand::parse("save   two  spaces\n").unwrap(),
    ///     Some(ShellCommand::Save("two  spaces".to_string()))
    /// );
    /// assert_eq!(ShellCommand::parse("   ").unwrap(), None);
    /// ```
    pub fn parse(line: &str) -> Result<Option<Self>, ParseCommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim_start()),
            None => (line, ""),
        };
        let keyword = word.to_ascii_lowercase();

        let command = match keyword.as_str() {
            "today" => ShellCommand::Today,
            "date" | "goto" => {
                let spec = rest
                    .parse::<DateSpecifier>()
                    .map_err(|e| bad_argument(&keyword, e))?;
                ShellCommand::Date(spec)
            }
            "prev" => ShellCommand::Prev(parse_count(&keyword, rest)?),
            "next" => ShellCommand::Next(parse_count(&keyword, rest)?),
            "show" => ShellCommand::Show,
            "save" => ShellCommand::Save(rest.to_string()),
            "edit" => ShellCommand::Edit,
            "delete" => ShellCommand::Delete,
            "search" => ShellCommand::Search(rest.to_string()),
            "list" => ShellCommand::List,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            _ => return Err(ParseCommandError::Unknown(word.to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_count(command: &str, rest: &str) -> Result<u32, ParseCommandError> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Ok(1);
    }
    rest.parse::<u32>().map_err(|_| ParseCommandError::BadArgument {
        command: command.to_string(),
        reason: format!("expected a number of days, got '{}'", rest),
    })
}

fn bad_argument(command: &str, error: AppError) -> ParseCommandError {
    let reason = match error {
        AppError::Date(msg) => msg,
        other => other.to_string(),
    };
    ParseCommandError::BadArgument {
        command: command.to_string(),
        reason,
    }
}

/// Whether the loop keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive session state.
pub struct Shell<'a, S: EntryStore + ?Sized, E: Editor + ?Sized> {
    store: &'a mut S,
    editor: &'a E,
    today: NaiveDate,
    selected: NaiveDate,
}

impl<'a, S: EntryStore + ?Sized, E: Editor + ?Sized> Shell<'a, S, E> {
    /// Creates a session with `selected` as the initial day; `today` is what
    /// the `today` command and relative dates resolve against.
    pub fn new(store: &'a mut S, editor: &'a E, today: NaiveDate, selected: NaiveDate) -> Self {
        Self {
            store,
            editor,
            today,
            selected,
        }
    }

    /// The currently selected day.
    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    /// Reads commands from `input` until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Only I/O errors on `input` or `out` are returned.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> AppResult<()> {
        writeln!(out, "daybook shell. Type 'help' for commands.")?;

        loop {
            write!(out, "[{}] > ", self.selected.format(DATE_FORMAT_ISO))?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                break;
            }

            let command = match ShellCommand::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(out, "{}", e)?;
                    continue;
                }
            };
            debug!("Shell command: {}", command_name(&command));

            match self.execute(command, &mut out) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => writeln!(out, "Error: {}", e)?,
            }
        }

        Ok(())
    }

    /// Runs one command, writing its output to `out`.
    pub fn execute<W: Write>(&mut self, command: ShellCommand, out: &mut W) -> AppResult<Flow> {
        match command {
            ShellCommand::Today => self.select(self.today, out)?,
            ShellCommand::Date(spec) => {
                let date = spec.resolve(self.today)?;
                self.select(date, out)?;
            }
            ShellCommand::Prev(days) => {
                let date = shift_day(self.selected, -i64::from(days))?;
                self.select(date, out)?;
            }
            ShellCommand::Next(days) => {
                let date = shift_day(self.selected, i64::from(days))?;
                self.select(date, out)?;
            }
            ShellCommand::Show => match self.store.get(self.selected)? {
                Some(content) => {
                    write!(out, "{}", content)?;
                    if !content.ends_with('\n') {
                        writeln!(out)?;
                    }
                }
                None => writeln!(out, "(no entry for {})", self.display_date())?,
            },
            ShellCommand::Save(text) => {
                ops::write_entry(&mut *self.store, self.selected, &text)?;
                writeln!(out, "Saved entry for {}.", self.iso_date())?;
            }
            ShellCommand::Edit => {
                match ops::edit_entry(&mut *self.store, self.editor, self.selected)? {
                    EditOutcome::Saved => writeln!(out, "Saved entry for {}.", self.iso_date())?,
                    EditOutcome::Unchanged => writeln!(out, "No changes.")?,
                }
            }
            ShellCommand::Delete => match ops::delete_entry(&mut *self.store, self.selected) {
                Ok(()) => writeln!(out, "Deleted entry for {}.", self.iso_date())?,
                Err(AppError::Database(DatabaseError::NotFound(_))) => {
                    writeln!(out, "No entry for {} to delete.", self.iso_date())?
                }
                Err(e) => return Err(e),
            },
            ShellCommand::Search(query) => {
                if query.is_empty() {
                    writeln!(out, "Nothing to search for.")?;
                } else {
                    let dates = ops::search_entries(&*self.store, &query)?;
                    if dates.is_empty() {
                        writeln!(out, "No entries contain \"{}\".", query)?;
                    }
                    for date in dates {
                        writeln!(out, "{}", date.format(DATE_FORMAT_ISO))?;
                    }
                }
            }
            ShellCommand::List => {
                let summaries = ops::list_entries(&*self.store, DateRange::default())?;
                if summaries.is_empty() {
                    writeln!(out, "No entries yet.")?;
                } else {
                    for summary in &summaries {
                        writeln!(out, "{}", ops::format_summary(summary))?;
                    }
                    writeln!(out, "{} entries.", ops::count_entries(&*self.store)?)?;
                }
            }
            ShellCommand::Help => writeln!(out, "{}", HELP_TEXT)?,
            ShellCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn select<W: Write>(&mut self, date: NaiveDate, out: &mut W) -> AppResult<()> {
        self.selected = date;
        let marker = if self.store.get(date)?.is_some() {
            " (has entry)"
        } else {
            ""
        };
        writeln!(out, "{}{}", self.display_date(), marker)?;
        Ok(())
    }

    fn iso_date(&self) -> String {
        self.selected.format(DATE_FORMAT_ISO).to_string()
    }

    fn display_date(&self) -> String {
        self.selected.format(DATE_FORMAT_DISPLAY).to_string()
    }
}

// Logged instead of the command itself so entry text never reaches the log.
fn command_name(command: &ShellCommand) -> &'static str {
    match command {
        ShellCommand::Today => "today",
        ShellCommand::Date(_) => "date",
        ShellCommand::Prev(_) => "prev",
        ShellCommand::Next(_) => "next",
        ShellCommand::Show => "show",
        ShellCommand::Save(_) => "save",
        ShellCommand::Edit => "edit",
        ShellCommand::Delete => "delete",
        ShellCommand::Search(_) => "search",
        ShellCommand::List => "list",
        ShellCommand::Help => "help",
        ShellCommand::Quit => "quit",
    }
}
