//! File-backed `tracing` setup.
//!
//! The terminal belongs to the TUI, so log lines go to
//! `<data dir>/coachdesk/coachdesk.log` instead of stdout/stderr.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::DeskError;

const LOG_FILE_NAME: &str = "coachdesk.log";

/// Default location of the log file.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("coachdesk").join(LOG_FILE_NAME))
}

/// Builds the filter from `RUST_LOG`, falling back to `level`.
pub fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open_log_file(path: &Path) -> Result<File, DeskError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| DeskError::Logging(e.to_string()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| DeskError::Logging(format!("{}: {}", path.display(), e)))
}

/// Installs the global subscriber writing to `path`.
pub fn init(path: &Path, level: &str) -> Result<(), DeskError> {
    let file = open_log_file(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| DeskError::Logging(e.to_string()))
}
