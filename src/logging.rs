//! File logging for the whole process.
//!
//! The TUI owns stdout/stderr while running, so log records go to a plain
//! file. `VEER_LOG` (an `EnvFilter` directive string) overrides the
//! configured level.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "VEER_LOG";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to open log file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("Failed to install log subscriber: {0}")]
    Install(String),
}

/// Install the global subscriber writing to `log_path`. Returns the path in use.
pub fn init(level: &str, log_path: &Path) -> Result<PathBuf, LoggingError> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(log_path)?;

    let filter = match EnvFilter::try_from_env(LOG_ENV_VAR) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))?;

    tracing::info!(path = %log_path.display(), "logging initialized");
    Ok(log_path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_log_file_and_rejects_second_install() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("veer.log");

        init("debug", &path).unwrap();
        assert!(path.exists());

        let again = init("debug", &path);
        assert!(matches!(again, Err(LoggingError::Install(_))));
    }
}
