use crate::persistence::log_file;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "FOCUS_LOG";

/// Pick the log filter: `FOCUS_LOG` wins, then `--verbose`, then info
fn log_filter(verbose: bool) -> EnvFilter {
    filter_from(std::env::var(LOG_ENV).ok().as_deref(), verbose)
}

fn filter_from(directive: Option<&str>, verbose: bool) -> EnvFilter {
    match directive.map(EnvFilter::try_new) {
        Some(Ok(filter)) => filter,
        _ if verbose => EnvFilter::new("focus=debug"),
        _ => EnvFilter::new("focus=info"),
    }
}

/// Send tracing output to `focus.log` in the data directory.
///
/// The dashboard owns the terminal, so nothing is written to stdout or stderr.
pub fn init_logging(focus_dir: &Path, verbose: bool) -> Result<()> {
    let path = log_file(focus_dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
