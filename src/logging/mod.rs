//! Application logging functionality
//!
//! Installs the tracing subscriber: human-readable output on stderr, plus
//! an optional daily log file under ~/.config/glyphink/logs/

use crate::core::config_file::ConfigFile;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when neither RUST_LOG nor the config file set one
pub const DEFAULT_LOG_LEVEL: &str = "info";

const LOG_FILE_PREFIX: &str = "glyphink.log";

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    ConfigFile::logs_dir()
}

/// Get the path to today's log file
pub fn current_log_file() -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d");
    logs_dir().join(format!("{}.{}", LOG_FILE_PREFIX, date))
}

/// Build the log filter: RUST_LOG wins, then the given level, then the default
pub fn build_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.unwrap_or(DEFAULT_LOG_LEVEL)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Initialize logging
///
/// The returned guard flushes the file writer on drop, so keep it alive
/// until the program exits.
pub fn init(level: Option<&str>, log_to_file: bool) -> anyhow::Result<Option<WorkerGuard>> {
    let (file_layer, guard) = if log_to_file {
        let dir = logs_dir();
        fs::create_dir_all(&dir)?;
        let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer().with_ansi(false).with_writer(writer);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(build_filter(level))
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()?;

    if log_to_file {
        tracing::info!(
            "=== glyphink started at {} ===",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        );
        tracing::info!("Logging to {:?}", current_log_file());
    }

    Ok(guard)
}
