/*!
# Daybook

Command-line entry point: a calendar diary with one entry per day.

```text
daybook [OPTIONS] [COMMAND]

Commands:
  show           Print the entry for the selected day
  write          Replace the entry for the selected day
  edit           Edit the entry for the selected day in your editor
  delete         Delete the entry for the selected day
  search         List days whose entry contains TEXT
  list           List days that have an entry
  export         Write every entry as JSON
  import         Load entries from a JSON export
  hash-password  Print a password hash for DAYBOOK_PASSWORD_HASH
  shell          Start the interactive shell (the default)

Options:
  -d, --date <DATE>          Day to act on
      --log-format <FORMAT>  Log output format [text, json]
  -v, --verbose              Print verbose output
```

## Configuration

- `DAYBOOK_DB`: database file (defaults to `~/Documents/daybook/diary.db`)
- `DAYBOOK_EDITOR` or `EDITOR`: editor for `edit` (defaults to "vim")
- `DAYBOOK_PASSWORD_HASH`: Argon2 hash that enables the password gate
- `DAYBOOK_LOG`: tracing filter directives
*/

use chrono::{Local, NaiveDate};
use daybook::cli::{CliArgs, Command};
use daybook::config::Config;
use daybook::constants::{DATE_FORMAT_ISO, TRACING_ROOT_SPAN_NAME};
use daybook::db::DateRange;
use daybook::editor::SystemEditor;
use daybook::errors::AppResult;
use daybook::gate::{self, PasswordGate};
use daybook::logging;
use daybook::ops::{self, Diary, EditOutcome};
use daybook::shell::Shell;
use daybook::DateSpecifier;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::process;
use tracing::{debug, error, info, info_span};

fn main() {
    let args = CliArgs::parse();
    logging::init_tracing(&args.log_format, args.verbose);

    let correlation_id = uuid::Uuid::new_v4().to_string();
    let root_span = info_span!(TRACING_ROOT_SPAN_NAME, correlation_id = %correlation_id);
    let _guard = root_span.enter();

    info!("Starting daybook");
    debug!(
        "Log format: {}, verbose: {}, date: {:?}",
        args.log_format, args.verbose, args.date
    );

    if let Err(e) = run(args) {
        error!("Application error: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: CliArgs) -> AppResult<()> {
    let today = Local::now().date_naive();
    let command = args.command.unwrap_or(Command::Shell);

    if command == Command::HashPassword {
        return print_password_hash();
    }

    info!("Loading configuration");
    let config = Config::load()?;
    config.validate()?;

    PasswordGate::new(config.password_hash.clone()).unlock()?;

    let selected = match args.date.as_deref() {
        Some(spec) => spec.parse::<DateSpecifier>()?.resolve(today)?,
        None => today,
    };
    debug!("Selected date: {}", selected);

    let mut diary = Diary::open(&config)?;
    let editor = SystemEditor {
        editor_cmd: config.editor.clone(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Show => {
            let content = ops::read_entry(&diary.db, selected)?;
            write!(out, "{}", content)?;
            if !content.ends_with('\n') {
                writeln!(out)?;
            }
        }
        Command::Write { text } => {
            let content = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            ops::write_entry(&mut diary.db, selected, &content)?;
            writeln!(out, "Saved entry for {}.", iso(selected))?;
        }
        Command::Edit => match ops::edit_entry(&mut diary.db, &editor, selected)? {
            EditOutcome::Saved => writeln!(out, "Saved entry for {}.", iso(selected))?,
            EditOutcome::Unchanged => writeln!(out, "No changes.")?,
        },
        Command::Delete => {
            ops::delete_entry(&mut diary.db, selected)?;
            writeln!(out, "Deleted entry for {}.", iso(selected))?;
        }
        Command::Search { query } => {
            for date in ops::search_entries(&diary.db, &query)? {
                writeln!(out, "{}", iso(date))?;
            }
        }
        Command::List { from, to } => {
            let summaries = ops::list_entries(&diary.db, DateRange { from, to })?;
            for summary in &summaries {
                writeln!(out, "{}", ops::format_summary(summary))?;
            }
            let total = ops::count_entries(&diary.db)?;
            writeln!(out, "Showing {} of {} entries.", summaries.len(), total)?;
        }
        Command::Export { file } => match file {
            Some(path) => {
                let count = export_to_file(&diary, &path)?;
                writeln!(out, "Exported {} entries to {}.", count, path.display())?;
            }
            None => {
                ops::export_entries(&diary.db, &mut out)?;
            }
        },
        Command::Import { file } => {
            let reader = BufReader::new(File::open(&file)?);
            let count = ops::import_entries(&mut diary.db, reader)?;
            writeln!(out, "Imported {} entries.", count)?;
        }
        Command::Shell => {
            let stdin = io::stdin();
            Shell::new(&mut diary.db, &editor, today, selected).run(stdin.lock(), &mut out)?;
        }
        Command::HashPassword => print_password_hash()?,
    }

    info!("Done");
    Ok(())
}

fn print_password_hash() -> AppResult<()> {
    let password = gate::prompt_new_password()?;
    let hash = gate::hash_password(&password)?;
    println!("{}", hash);
    Ok(())
}

fn export_to_file(diary: &Diary, path: &Path) -> AppResult<usize> {
    let mut writer = BufWriter::new(File::create(path)?);
    let count = ops::export_entries(&diary.db, &mut writer)?;
    writer.flush()?;
    Ok(count)
}

fn iso(date: NaiveDate) -> String {
    date.format(DATE_FORMAT_ISO).to_string()
}
