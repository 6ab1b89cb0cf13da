//! Domain error types
//!
//! This module defines the error hierarchy for tekport. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main tekport error type
///
/// This is the primary error type used throughout the application.
/// Variants map to the failure classes the export tick distinguishes:
/// a lock held by a peer downgrades the tick to a no-op, a configuration
/// error skips the offending config, everything else is fatal to the tick.
#[derive(Debug, Error)]
pub enum TekportError {
    /// Configuration-related errors (invalid settings, missing bucket, bad key material references)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The named lock is currently held by another worker
    #[error("Lock not acquired: {0}")]
    LockNotAcquired(String),

    /// Blob storage put/copy failures
    #[error("Storage error: {0}")]
    Storage(String),

    /// Signing failures
    #[error("Signer error: {0}")]
    Signer(String),

    /// Serialization failures (protobuf, JSON, ZIP, base64)
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Repository/query failures
    #[error("Repository error: {0}")]
    Repository(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl TekportError {
    /// Whether this error is scoped to a single export config.
    ///
    /// Config-scoped errors are logged and the tick moves on to the next
    /// config; anything else aborts the tick (the next tick is the retry).
    pub fn is_config_scoped(&self) -> bool {
        matches!(self, TekportError::Configuration(_))
    }
}

impl From<std::io::Error> for TekportError {
    fn from(err: std::io::Error) -> Self {
        TekportError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TekportError {
    fn from(err: serde_json::Error) -> Self {
        TekportError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for TekportError {
    fn from(err: toml::de::Error) -> Self {
        TekportError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<prost::EncodeError> for TekportError {
    fn from(err: prost::EncodeError) -> Self {
        TekportError::Serialization(format!("protobuf encode error: {err}"))
    }
}

impl From<zip::result::ZipError> for TekportError {
    fn from(err: zip::result::ZipError) -> Self {
        TekportError::Serialization(format!("zip error: {err}"))
    }
}

impl From<base64::DecodeError> for TekportError {
    fn from(err: base64::DecodeError) -> Self {
        TekportError::Serialization(format!("base64 decode error: {err}"))
    }
}
