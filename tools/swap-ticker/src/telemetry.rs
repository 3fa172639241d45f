//! Logging setup.
//!
//! The UI owns stdout and the alternate screen, so log lines go to a file.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Build the filter from a directive string such as `info` or `swap_ticker=debug`.
pub fn env_filter(directives: &str) -> Result<EnvFilter, TelemetryError> {
    Ok(EnvFilter::try_new(directives)?)
}

/// Install a global `tracing` subscriber appending to `log_file`.
pub fn init(log_file: &Path, directives: &str) -> Result<(), TelemetryError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|source| TelemetryError::LogFile {
            path: log_file.display().to_string(),
            source,
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_accepts_directives() {
        assert!(env_filter("info").is_ok());
        assert!(env_filter("swap_ticker=debug,reqwest=warn").is_ok());
    }

    #[test]
    fn test_env_filter_rejects_garbage() {
        assert!(matches!(
            env_filter("swap_ticker=notalevel"),
            Err(TelemetryError::Filter(_))
        ));
    }

    #[test]
    fn test_init_reports_unwritable_path() {
        let result = init(Path::new("/nonexistent-dir/swap-ticker.log"), "info");
        assert!(matches!(result, Err(TelemetryError::LogFile { .. })));
    }
}
