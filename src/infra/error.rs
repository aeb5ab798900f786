use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop the app before the shell starts. Everything
/// after bootstrap is handled in place and never unwinds this far.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("could not read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config file {path} is not valid TOML: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("log level {level:?} is not a valid filter directive")]
    InvalidLogLevel { level: String },
    #[error("could not install the log subscriber: {0}")]
    LoggingInit(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}
