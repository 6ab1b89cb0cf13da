//! Blob storage abstraction
//!
//! The export pipeline writes archives and index manifests through this
//! seam. Objects are immutable from the pipeline's point of view; the only
//! object that is ever rewritten is the stable index alias, via [`Blobstore::copy`].

pub mod filesystem;
pub mod memory;

use crate::domain::Result;
use async_trait::async_trait;

pub use filesystem::FilesystemBlobstore;
pub use memory::MemoryBlobstore;

/// Put/copy interface over a named bucket
///
/// No read API: the core path never reads objects back. Retry policy is
/// backend-defined; the pipeline does not retry, the next tick is the retry.
#[async_trait]
pub trait Blobstore: Send + Sync {
    /// Stores `data` under `object_name` in `bucket`, overwriting any
    /// existing object.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    async fn put(&self, bucket: &str, object_name: &str, data: &[u8]) -> Result<()>;

    /// Atomically replaces `dst` with a copy of `src` within `bucket`.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the source is missing or the replace fails.
    async fn copy(&self, bucket: &str, src: &str, dst: &str) -> Result<()>;
}
