//! Index manifest models
//!
//! The index file is the public JSON contract mobile clients poll. Field
//! names and casing are consumed by deployed clients and must not change.

use serde::{Deserialize, Serialize};

/// One batch entry in the index: the starting interval and the archive paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexFileBatch {
    /// Rolling-interval number the batch window starts at
    pub interval_number: i64,

    /// Absolute `/{bucket}/{object}` paths, in batch order
    pub files: Vec<String>,
}

impl IndexFileBatch {
    /// Creates a batch entry.
    pub fn new(interval_number: i64, files: Vec<String>) -> Self {
        Self {
            interval_number,
            files,
        }
    }
}

/// The index manifest published once per run per config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexFile {
    /// The large-window batch set
    pub full_big_batch: IndexFileBatch,

    /// The medium-window batch set
    pub full_medium_batch: IndexFileBatch,

    /// One entry per exported day, ascending by start interval
    pub daily_batches: Vec<IndexFileBatch>,
}
