//! In-memory blob storage
//!
//! Backs tests and dry runs. Objects are held in a process-local map keyed
//! by `(bucket, object_name)`.

use crate::adapters::blobstore::Blobstore;
use crate::domain::errors::TekportError;
use crate::domain::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Blobstore keeping all objects in memory
#[derive(Default)]
pub struct MemoryBlobstore {
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
}

impl MemoryBlobstore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bytes of an object, if present.
    pub fn object(&self, bucket: &str, object_name: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .expect("blobstore mutex poisoned")
            .get(&(bucket.to_string(), object_name.to_string()))
            .cloned()
    }

    /// Returns all object names in a bucket, sorted.
    pub fn object_names(&self, bucket: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .objects
            .lock()
            .expect("blobstore mutex poisoned")
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, name)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Total number of stored objects across all buckets.
    pub fn len(&self) -> usize {
        self.objects.lock().expect("blobstore mutex poisoned").len()
    }

    /// Whether the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Blobstore for MemoryBlobstore {
    async fn put(&self, bucket: &str, object_name: &str, data: &[u8]) -> Result<()> {
        self.objects
            .lock()
            .expect("blobstore mutex poisoned")
            .insert((bucket.to_string(), object_name.to_string()), data.to_vec());
        Ok(())
    }

    async fn copy(&self, bucket: &str, src: &str, dst: &str) -> Result<()> {
        let mut objects = self.objects.lock().expect("blobstore mutex poisoned");
        let data = objects
            .get(&(bucket.to_string(), src.to_string()))
            .cloned()
            .ok_or_else(|| {
                TekportError::Storage(format!("copy source not found: {bucket}/{src}"))
            })?;
        objects.insert((bucket.to_string(), dst.to_string()), data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_copy() {
        let store = MemoryBlobstore::new();
        store.put("b", "one", b"data").await.unwrap();
        assert_eq!(store.object("b", "one").unwrap(), b"data");

        store.copy("b", "one", "two").await.unwrap();
        assert_eq!(store.object("b", "two").unwrap(), b"data");
        assert_eq!(store.object_names("b"), vec!["one".to_string(), "two".to_string()]);
    }

    #[tokio::test]
    async fn test_copy_missing_source() {
        let store = MemoryBlobstore::new();
        assert!(store.copy("b", "nope", "dst").await.is_err());
    }
}
