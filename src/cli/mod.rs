//! Command-line interface definitions.

use crate::calendar::parse_date;
use crate::constants::{APP_DESCRIPTION, APP_NAME, LOG_FORMAT_JSON, LOG_FORMAT_TEXT};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// A private diary with one entry per day
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION)]
#[command(author, version, long_about = None)]
pub struct CliArgs {
    /// Day to act on: YYYY-MM-DD, YYYYMMDD, today, yesterday, tomorrow, +N or -N
    #[arg(short = 'd', long, global = true)]
    pub date: Option<String>,

    /// Log output format
    #[arg(long, value_name = "FORMAT", default_value = LOG_FORMAT_TEXT,
          value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON], global = true)]
    pub log_format: String,

    /// Print verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the entry for the selected day
    Show,

    /// Replace the entry for the selected day (reads stdin when TEXT is omitted)
    Write {
        /// New entry text
        text: Option<String>,
    },

    /// Edit the entry for the selected day in your editor
    Edit,

    /// Delete the entry for the selected day
    Delete,

    /// List days whose entry contains TEXT (case-sensitive)
    Search {
        /// Text to look for
        query: String,
    },

    /// List days that have an entry
    List {
        /// First day to include
        #[arg(long, value_parser = parse_date_arg)]
        from: Option<NaiveDate>,

        /// Last day to include
        #[arg(long, value_parser = parse_date_arg)]
        to: Option<NaiveDate>,
    },

    /// Write every entry as JSON to FILE or stdout
    Export {
        /// Output file
        file: Option<PathBuf>,
    },

    /// Load entries from a JSON export, replacing days that already exist
    Import {
        /// JSON file produced by `export`
        file: PathBuf,
    },

    /// Prompt for a password and print its hash for DAYBOOK_PASSWORD_HASH
    HashPassword,

    /// Start the interactive shell (the default)
    Shell,
}

fn parse_date_arg(input: &str) -> Result<NaiveDate, String> {
    parse_date(input).map_err(|e| e.to_string())
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        <CliArgs as Parser>::parse()
    }
}
