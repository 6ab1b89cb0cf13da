//! Structured logging setup using tracing
//!
//! Console output is always enabled; a JSON file layer with rotation can
//! be switched on for deployments that ship logs off the host.

use crate::config::LoggingConfig;
use crate::domain::errors::TekportError;
use crate::domain::Result;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Guard that must be kept alive for the duration of the program
/// to ensure logs are flushed properly
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the logging system based on configuration
///
/// # Arguments
///
/// * `log_level_str` - Log level as a string (trace, debug, info, warn, error)
/// * `config` - Logging configuration
///
/// # Returns
///
/// A [`LoggingGuard`] that must be kept alive for the duration of the program
///
/// # Errors
///
/// Returns a configuration error for unknown log levels or an unwritable
/// log directory.
pub fn init_logging(log_level_str: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let log_level = parse_log_level(log_level_str)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tekport={log_level}")));

    let mut layers = Vec::new();

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_filter(env_filter);

    layers.push(console_layer.boxed());

    let file_guard = if config.local_enabled {
        let rotation = match config.local_rotation.as_str() {
            "hourly" => Rotation::HOURLY,
            _ => Rotation::DAILY,
        };

        std::fs::create_dir_all(&config.local_path).map_err(|e| {
            TekportError::Configuration(format!(
                "Failed to create log directory {}: {e}",
                config.local_path
            ))
        })?;

        let file_appender = RollingFileAppender::new(rotation, &config.local_path, "tekport.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("tekport={log_level}")));
        let file_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(non_blocking)
            .with_filter(file_filter);

        layers.push(file_layer.boxed());
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry().with(layers).init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(TekportError::Configuration(format!(
            "Invalid log level: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
        assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
        assert!(parse_log_level("loud").is_err());
    }
}
