//! Tracing subscriber setup.
//!
//! Logs go to stderr so they never mix with entry text on stdout. The
//! filter comes from `DAYBOOK_LOG` when set, otherwise from `-v`.

use crate::constants::{DEFAULT_LOG_LEVEL, ENV_VAR_LOG, LOG_FORMAT_JSON, VERBOSE_LOG_LEVEL};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Calling it twice is harmless.
pub fn init_tracing(log_format: &str, verbose: bool) {
    let default_level = if verbose {
        VERBOSE_LOG_LEVEL
    } else {
        DEFAULT_LOG_LEVEL
    };
    let filter = EnvFilter::try_from_env(ENV_VAR_LOG)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if log_format == LOG_FORMAT_JSON {
        builder
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        tracing::debug!("Tracing already initialized: {}", e);
    }
}
