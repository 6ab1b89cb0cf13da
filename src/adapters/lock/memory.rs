//! In-process lock service
//!
//! Reference implementation of the lease semantics over a process-local
//! map. A SQL-backed implementation with the same row semantics is the
//! multi-node integration point.

use crate::adapters::lock::LockService;
use crate::domain::errors::TekportError;
use crate::domain::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/// Lock service holding leases in memory
#[derive(Default)]
pub struct MemoryLockService {
    leases: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl MemoryLockService {
    /// Creates a service with no leases.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LockService for MemoryLockService {
    async fn acquire(&self, lock_id: &str, ttl: Duration) -> Result<DateTime<Utc>> {
        let now = Utc::now();
        let mut leases = self.leases.lock().expect("lock mutex poisoned");

        if let Some(expiry) = leases.get(lock_id) {
            if *expiry > now {
                return Err(TekportError::LockNotAcquired(lock_id.to_string()));
            }
            // Expired lease: the row is dead weight and may be replaced.
        }

        let release_timestamp = now + ttl;
        leases.insert(lock_id.to_string(), release_timestamp);
        Ok(release_timestamp)
    }

    async fn release(&self, lock_id: &str, release_timestamp: DateTime<Utc>) -> Result<bool> {
        let mut leases = self.leases.lock().expect("lock mutex poisoned");
        match leases.get(lock_id) {
            Some(expiry) if *expiry == release_timestamp => {
                leases.remove(lock_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_second_acquire_fails_while_held() {
        let lock = MemoryLockService::new();
        let token = lock.acquire("export_files", Duration::minutes(5)).await.unwrap();

        let err = lock.acquire("export_files", Duration::minutes(5)).await.unwrap_err();
        assert!(matches!(err, TekportError::LockNotAcquired(_)));

        assert!(lock.release("export_files", token).await.unwrap());
        assert!(lock.acquire("export_files", Duration::minutes(5)).await.is_ok());
    }

    #[tokio::test]
    async fn test_expired_lease_is_replaced() {
        let lock = MemoryLockService::new();
        // A lease that expired in the past does not block acquisition.
        lock.acquire("export_files", Duration::seconds(-10)).await.unwrap();
        assert!(lock.acquire("export_files", Duration::minutes(5)).await.is_ok());
    }

    #[tokio::test]
    async fn test_release_is_fenced_by_token() {
        let lock = MemoryLockService::new();
        let token = lock.acquire("export_files", Duration::minutes(5)).await.unwrap();

        let stale_token = token - Duration::seconds(1);
        assert!(!lock.release("export_files", stale_token).await.unwrap());
        // The real holder can still release.
        assert!(lock.release("export_files", token).await.unwrap());
    }

    #[tokio::test]
    async fn test_release_unknown_lock_returns_false() {
        let lock = MemoryLockService::new();
        assert!(!lock.release("unknown", Utc::now()).await.unwrap());
    }

    #[tokio::test]
    async fn test_independent_lock_ids() {
        let lock = MemoryLockService::new();
        lock.acquire("export_files", Duration::minutes(5)).await.unwrap();
        assert!(lock.acquire("cleanup", Duration::minutes(5)).await.is_ok());
    }
}
