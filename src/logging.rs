//! File-backed `tracing` setup.
//!
//! The terminal belongs to the UI, so log events go to a file instead of
//! stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogSettings, default_log_path};

/// Environment variable holding an `EnvFilter` directive that overrides `logging.level`.
pub const LOG_ENV: &str = "TAGSMITH_LOG";

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("no log file configured and no home directory to default to")]
    NoLogPath,

    #[error("cannot open log file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("a global subscriber is already installed: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Build the level filter from `TAGSMITH_LOG`, falling back to `settings.level`.
pub fn build_filter(settings: &LogSettings) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(settings.level.trim().to_ascii_lowercase())?),
    }
}

/// Install the global subscriber. Returns the log file path on success.
pub fn init(settings: &LogSettings) -> Result<PathBuf, LoggingError> {
    let path = settings
        .file
        .clone()
        .or_else(default_log_path)
        .ok_or(LoggingError::NoLogPath)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| LoggingError::Open {
            path: path.clone(),
            source,
        })?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| LoggingError::Open {
            path: path.clone(),
            source,
        })?;

    tracing_subscriber::registry()
        .with(build_filter(settings)?)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()?;

    Ok(path)
}
