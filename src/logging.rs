//! File-based structured logging.
//!
//! The terminal belongs to the UI, so `tracing` output goes to
//! `pyre.log` in the configured (or XDG state) directory through a
//! non-blocking writer. Keep the returned guard alive for the whole run or
//! buffered lines are lost.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingSettings, default_state_dir};

pub const LOG_FILE: &str = "pyre.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("no log directory; set logging.directory or HOME")]
    NoDirectory,
    #[error("failed to create log directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

/// Directory `pyre.log` is written to.
pub fn log_directory(settings: &LoggingSettings) -> Option<PathBuf> {
    settings.directory.clone().or_else(default_state_dir)
}

/// `RUST_LOG` when set, otherwise the configured level, otherwise `info`.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init(settings: &LoggingSettings) -> Result<WorkerGuard, LoggingError> {
    let dir = log_directory(settings).ok_or(LoggingError::NoDirectory)?;
    fs::create_dir_all(&dir).map_err(|source| LoggingError::CreateDir {
        path: dir.clone(),
        source,
    })?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&settings.level))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))?;

    Ok(guard)
}
