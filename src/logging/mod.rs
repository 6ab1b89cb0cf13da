//! Logging and observability
//!
//! Structured logging for the export pipeline: console output always,
//! optional JSON file output with rotation.
//!
//! # Example
//!
//! ```no_run
//! use tekport::logging::init_logging;
//! use tekport::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Export tick starting");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};
