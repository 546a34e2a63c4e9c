//! Logging setup
//!
//! The CLI logs to a daily-rolling file in the state directory so stdout
//! stays reserved for reports.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{Config, LoggingConfig};
use crate::error::{Error, Result};

/// Flushes buffered log lines when dropped; hold it for the life of `main`.
pub struct LoggingGuard {
    _worker: WorkerGuard,
}

/// Install the global subscriber writing to `$XDG_STATE_HOME/habitlens/`.
///
/// `RUST_LOG` wins over `config.level`. At most `config.max_files` rotated
/// files are kept.
pub fn init(config: &LoggingConfig) -> Result<LoggingGuard> {
    let dir = Config::state_dir();
    std::fs::create_dir_all(&dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("habitlens.log")
        .max_log_files(config.max_files.max(1))
        .build(&dir)
        .map_err(|e| Error::Config(format!("cannot open log file in {}: {}", dir.display(), e)))?;
    let (writer, worker) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    tracing::info!(dir = %dir.display(), level = %config.level, "Logging to file");
    Ok(LoggingGuard { _worker: worker })
}

/// Route logs to the test harness output; safe to call from every test.
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Base path of the current log file (rotation appends the date).
pub fn log_file_path() -> PathBuf {
    Config::log_path()
}
