//! Logging init: append to a file under the XDG state dir, or fall back to stderr.
//!
//! Segment workers run on named threads (`segment-N`), so thread names are
//! included in every line.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,splitfetch=debug,splitfetch_core=debug";
const LOG_FILE_NAME: &str = "splitfetch.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `~/.local/state/splitfetch/splitfetch.log` (directory created if missing).
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("splitfetch")?;
    let path = xdg_dirs
        .place_state_file(LOG_FILE_NAME)
        .context("creating log directory")?;
    Ok(path)
}

/// Install the file subscriber and return the log path.
/// Returns Err if the file cannot be opened or a subscriber is already set;
/// callers fall back to [`init_logging_stderr`].
pub fn init_logging() -> Result<PathBuf> {
    let path = log_file_path()?;
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(BoxMakeWriter::new(Mutex::new(file)))
        .with_thread_names(true)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    tracing::info!("splitfetch logging initialized at {}", path.display());
    Ok(path)
}

/// Log to stderr only. Never fails; a second call is a no-op.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_thread_names(true)
        .with_ansi(false)
        .try_init();
}
