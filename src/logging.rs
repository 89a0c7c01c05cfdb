//! Durable log file for request outcomes.
//!
//! The client only emits `tracing` events; nothing is written until a subscriber
//! is installed. [`init_file_logging`] installs one that appends
//! `timestamp LEVEL message` lines to a file.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Subscriber;
use tracing::level_filters::LevelFilter;

/// Log file used when the caller does not pick one.
pub const DEFAULT_LOG_FILE: &str = "sms.log";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Build a subscriber that appends `INFO` and more severe events to `path`.
///
/// The file is created if missing and never truncated. Use this directly with
/// [`tracing::subscriber::set_default`] for scoped logging.
pub fn file_subscriber(
    path: impl AsRef<Path>,
) -> Result<impl Subscriber + Send + Sync + 'static, LoggingError> {
    let file = open_append(path.as_ref())?;
    Ok(tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(LevelFilter::INFO)
        .finish())
}

/// Install [`file_subscriber`] as the process-wide default.
pub fn init_file_logging(path: impl AsRef<Path>) -> Result<(), LoggingError> {
    tracing::subscriber::set_global_default(file_subscriber(path)?)?;
    Ok(())
}

fn open_append(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::Open {
            path: path.to_owned(),
            source,
        })
}
