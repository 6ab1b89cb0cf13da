//! Persistence collaborator traits
//!
//! The export engine reads exposures and configs, and appends export file
//! rows, through these seams. Schema and ORM choices live behind them;
//! the in-memory implementations in [`memory`] back tests and the
//! file-seeded standalone deployment.

pub mod memory;

use crate::domain::{DiagnosisType, ExportConfig, ExportFile, Exposure, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use memory::{
    ExposureRecord, MemoryExportConfigRepository, MemoryExportFileRepository,
    MemoryExposureRepository,
};

/// Read access to published exposures
#[async_trait]
pub trait ExposureRepository: Send + Sync {
    /// Returns exposures published in `[from, until)` for the given
    /// diagnosis type and region.
    ///
    /// Ordering is not part of the contract; the marshaller re-sorts by
    /// key bytes before emitting.
    ///
    /// # Errors
    ///
    /// Returns a repository error if the query fails.
    async fn find_for_export(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
        diagnosis_type: DiagnosisType,
        region: &str,
    ) -> Result<Vec<Exposure>>;
}

/// Read access to export configurations
#[async_trait]
pub trait ExportConfigRepository: Send + Sync {
    /// Returns the configs whose schedule makes them due at `now`, in
    /// enumeration order.
    ///
    /// # Errors
    ///
    /// Returns a repository error if the query fails.
    async fn find_due_at(&self, now: DateTime<Utc>) -> Result<Vec<ExportConfig>>;
}

/// Append access to export file bookkeeping rows
#[async_trait]
pub trait ExportFileRepository: Send + Sync {
    /// Records one uploaded object.
    ///
    /// # Errors
    ///
    /// Returns a repository error if the row cannot be stored.
    async fn save(&self, file: ExportFile) -> Result<()>;
}
