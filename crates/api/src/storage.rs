//! Binary object storage for uploads.
//!
//! Objects live at `<root>/<bucket>/<key>` and are served read-only under
//! the configured public prefix.

use std::path::PathBuf;

use async_trait::async_trait;
use campus_core::error::CoreError;
use campus_core::storage::{is_safe_key, VALID_BUCKETS};
use serde::Serialize;

/// A stored object and its public address.
#[derive(Debug, Clone, Serialize)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    pub url: String,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, bucket: &str, key: &str, bytes: &[u8]) -> Result<StoredObject, CoreError>;

    /// Remove an object. Deleting a missing object is not an error.
    async fn delete(&self, bucket: &str, key: &str) -> Result<(), CoreError>;
}

/// Filesystem-backed store.
pub struct LocalObjectStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.into(),
        }
    }

    fn path_for(&self, bucket: &str, key: &str) -> Result<PathBuf, CoreError> {
        if !VALID_BUCKETS.contains(&bucket) {
            return Err(CoreError::Validation(format!("Unknown bucket '{bucket}'")));
        }
        if !is_safe_key(key) {
            return Err(CoreError::Validation(format!("Invalid object key '{key}'")));
        }
        Ok(self.root.join(bucket).join(key))
    }

    pub fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{bucket}/{key}", self.public_prefix)
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(&self, bucket: &str, key: &str, bytes: &[u8]) -> Result<StoredObject, CoreError> {
        let path = self.path_for(bucket, key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CoreError::Internal(format!("Failed to create bucket dir: {e}")))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to write object: {e}")))?;

        Ok(StoredObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            url: self.public_url(bucket, key),
        })
    }

    async fn delete(&self, bucket: &str, key: &str) -> Result<(), CoreError> {
        let path = self.path_for(bucket, key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::Internal(format!("Failed to delete object: {e}"))),
        }
    }
}
