//! Tracing subscriber setup for processes embedding version-scout

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::LogConfig;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("Invalid log file path: {0:?}")]
    InvalidLogPath(PathBuf),

    #[error("Cannot create log directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot open log file: {0}")]
    Appender(#[from] InitError),

    #[error("Global subscriber already set: {0}")]
    Init(#[from] TryInitError),
}

/// Initialize logging to stderr and, when configured, to a log file.
///
/// `RUST_LOG` overrides the configured level. When a file is configured the
/// returned guard must be held for the lifetime of the process so buffered
/// lines are flushed.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    let (file_layer, guard) = match config.file_path() {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(file_appender(&path)?);
            let layer: Box<dyn Layer<Registry> + Send + Sync> = if config.json {
                fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false)
                    .boxed()
            } else {
                fmt::layer().with_writer(writer).with_ansi(false).boxed()
            };
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()?;

    Ok(guard)
}

fn file_appender(path: &Path) -> Result<RollingFileAppender, LoggingError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| LoggingError::InvalidLogPath(path.to_path_buf()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    std::fs::create_dir_all(dir)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)?;
    Ok(appender)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_appender_rejects_path_without_file_name() {
        let result = file_appender(Path::new("/"));

        assert!(matches!(result, Err(LoggingError::InvalidLogPath(_))));
    }

    #[test]
    fn file_appender_creates_missing_directories() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/logs/scout.log");

        file_appender(&path).unwrap();

        assert!(temp_dir.path().join("nested/logs").is_dir());
    }
}
