//! Filesystem-backed blob storage
//!
//! Objects live as files under `{root}/{bucket}/{object_name}`. Suitable
//! for single-node deployments where the bucket directory is served as
//! static content.

use crate::adapters::blobstore::Blobstore;
use crate::domain::errors::TekportError;
use crate::domain::Result;
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

/// Blobstore writing objects to a local directory tree
pub struct FilesystemBlobstore {
    root: PathBuf,
}

impl FilesystemBlobstore {
    /// Creates a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, bucket: &str, object_name: &str) -> Result<PathBuf> {
        let relative = Path::new(bucket).join(object_name);
        // Reject traversal out of the root; object names come from config-derived
        // filename roots and must stay inside the bucket tree.
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir))
        {
            return Err(TekportError::Storage(format!(
                "invalid object path: {}/{}",
                bucket, object_name
            )));
        }
        Ok(self.root.join(relative))
    }

    async fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| TekportError::Storage(format!("object path has no parent: {}", path.display())))?;
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| TekportError::Storage(format!("creating {}: {e}", parent.display())))?;

        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, data)
            .await
            .map_err(|e| TekportError::Storage(format!("writing {}: {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| TekportError::Storage(format!("renaming into {}: {e}", path.display())))?;
        Ok(())
    }
}

#[async_trait]
impl Blobstore for FilesystemBlobstore {
    async fn put(&self, bucket: &str, object_name: &str, data: &[u8]) -> Result<()> {
        let path = self.object_path(bucket, object_name)?;
        self.write_atomic(&path, data).await
    }

    async fn copy(&self, bucket: &str, src: &str, dst: &str) -> Result<()> {
        let src_path = self.object_path(bucket, src)?;
        let dst_path = self.object_path(bucket, dst)?;
        let data = tokio::fs::read(&src_path)
            .await
            .map_err(|e| TekportError::Storage(format!("reading {}: {e}", src_path.display())))?;
        // Temp-file + rename so readers of the alias never observe a partial object.
        self.write_atomic(&dst_path, &data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_and_copy() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilesystemBlobstore::new(dir.path());

        store
            .put("exposures", "AT/1606824000/index.json", b"{\"a\":1}")
            .await
            .unwrap();
        store
            .copy("exposures", "AT/1606824000/index.json", "AT/index.json")
            .await
            .unwrap();

        let copied = std::fs::read(dir.path().join("exposures/AT/index.json")).unwrap();
        assert_eq!(copied, b"{\"a\":1}");
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilesystemBlobstore::new(dir.path());

        store.put("b", "o", b"old").await.unwrap();
        store.put("b", "o", b"new").await.unwrap();

        let data = std::fs::read(dir.path().join("b/o")).unwrap();
        assert_eq!(data, b"new");
    }

    #[tokio::test]
    async fn test_copy_missing_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilesystemBlobstore::new(dir.path());

        let err = store.copy("b", "missing", "dst").await.unwrap_err();
        assert!(matches!(err, TekportError::Storage(_)));
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilesystemBlobstore::new(dir.path());

        let err = store.put("b", "../escape", b"x").await.unwrap_err();
        assert!(matches!(err, TekportError::Storage(_)));
    }
}
