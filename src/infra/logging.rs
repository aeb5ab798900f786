use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::infra::{config::LogConfig, error::AppError};

const LOG_FILE: &str = "vitalk.log";

/// Installs the global subscriber. The TUI owns the terminal, so all
/// output goes to `vitalk.log` through a non-blocking writer; the
/// returned guard flushes it and must live as long as the process.
pub fn init(config: &LogConfig) -> Result<WorkerGuard, AppError> {
    let file = tracing_appender::rolling::never(".", LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => level_filter(&config.level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(AppError::LoggingInit)?;

    Ok(guard)
}

/// Rejects unparseable levels up front so a bad `--log-level` fails the
/// whole bootstrap instead of being silently dropped by the filter.
fn level_filter(level: &str) -> Result<EnvFilter, AppError> {
    EnvFilter::try_new(level).map_err(|_| AppError::InvalidLogLevel {
        level: level.to_owned(),
    })
}
