//! Domain models and types for tekport.
//!
//! This module contains the core domain models and business rules of the
//! export engine:
//!
//! - **Exposure model** ([`Exposure`], [`DiagnosisType`])
//! - **Export configuration** ([`ExportConfig`], [`SignatureInfo`])
//! - **Bookkeeping** ([`ExportFile`], [`ExportFileStatus`])
//! - **Index manifest** ([`IndexFile`], [`IndexFileBatch`])
//! - **Interval arithmetic** ([`interval`])
//! - **Error types** ([`TekportError`]) and the [`Result`] alias

pub mod errors;
pub mod export_config;
pub mod export_file;
pub mod exposure;
pub mod index;
pub mod interval;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::TekportError;
pub use export_config::{ExportConfig, SignatureInfo};
pub use export_file::{ExportFile, ExportFileStatus};
pub use exposure::{DiagnosisType, Exposure};
pub use index::{IndexFile, IndexFileBatch};
pub use result::Result;
