//! Distributed lock abstraction
//!
//! The export tick is serialised across workers by a short-lived named
//! lease. Acquisition succeeds iff no live lease exists; release is fenced
//! by the expiry token handed out at acquisition, so a worker that lost its
//! lease cannot release a successor's.

pub mod memory;

use crate::domain::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

pub use memory::MemoryLockService;

/// Named lease with TTL and fenced release
#[async_trait]
pub trait LockService: Send + Sync {
    /// Acquires the named lock for `ttl`.
    ///
    /// Returns the release timestamp, which doubles as the fencing token
    /// for [`LockService::release`].
    ///
    /// # Errors
    ///
    /// Returns [`TekportError::LockNotAcquired`](crate::domain::TekportError::LockNotAcquired)
    /// if a live lease exists.
    async fn acquire(&self, lock_id: &str, ttl: Duration) -> Result<DateTime<Utc>>;

    /// Releases the named lock if `release_timestamp` matches the stored
    /// lease. Returns `true` iff the lock was released by this call.
    ///
    /// # Errors
    ///
    /// Returns a repository error if the lock row cannot be accessed.
    async fn release(&self, lock_id: &str, release_timestamp: DateTime<Utc>) -> Result<bool>;
}
