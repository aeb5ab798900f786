use tracing_appender::non_blocking::WorkerGuard;

use crate::infra::config::AppConfig;

/// What bootstrap hands the rest of the app.
pub struct AppContext {
    pub config: AppConfig,
    /// Flushes the log writer on drop; lives for the whole process.
    _log_guard: WorkerGuard,
}

impl AppContext {
    pub fn new(config: AppConfig, log_guard: WorkerGuard) -> Self {
        Self {
            config,
            _log_guard: log_guard,
        }
    }
}
