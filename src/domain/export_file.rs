//! Export file bookkeeping model
//!
//! One `ExportFile` row is recorded per uploaded object. Rows are created
//! here with status [`ExportFileStatus::ExportFileCreated`]; all later
//! transitions belong to the cleanup path.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an uploaded export object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFileStatus {
    /// Object was uploaded by the export pipeline
    ExportFileCreated,
    /// Cleanup has marked the object for deletion
    ExportFileDeletePending,
    /// Cleanup has deleted the object
    ExportFileDeleted,
}

/// Bookkeeping row for one uploaded object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportFile {
    /// Object name within the bucket
    pub object_name: String,

    /// Bucket the object lives in
    pub bucket_name: String,

    /// Id of the export config that produced the object
    pub config_id: i64,

    /// Region of the producing config
    pub region: String,

    /// Export run timestamp, epoch seconds
    pub timestamp: i64,

    /// Lifecycle status
    pub status: ExportFileStatus,
}

impl ExportFile {
    /// Creates a row for a freshly uploaded object.
    pub fn created(
        object_name: impl Into<String>,
        bucket_name: impl Into<String>,
        config_id: i64,
        region: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            object_name: object_name.into(),
            bucket_name: bucket_name.into(),
            config_id,
            region: region.into(),
            timestamp,
            status: ExportFileStatus::ExportFileCreated,
        }
    }
}
