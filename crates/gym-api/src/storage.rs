//! # Upload Storage
//!
//! Stores uploaded files under the `uploads/` prefix of an object store.
//! Production uses S3 (or any S3-compatible endpoint); development and tests
//! use an in-memory store.

use crate::config::StorageConfig;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::ObjectStore;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

const UPLOAD_PREFIX: &str = "uploads";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    #[error("Storage error: {0}")]
    Storage(#[from] object_store::Error),
}

impl UploadError {
    pub fn status_code(&self) -> u16 {
        match self {
            UploadError::InvalidFileName(_) => 400,
            UploadError::Storage(_) => 500,
        }
    }
}

#[derive(Clone)]
pub struct UploadStore {
    store: Arc<dyn ObjectStore>,
}

impl UploadStore {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// S3 store when a bucket is configured, otherwise in memory.
    ///
    /// Credentials come from the usual `AWS_*` variables.
    pub fn from_config(config: &StorageConfig) -> Result<Self, UploadError> {
        let Some(bucket) = &config.bucket else {
            tracing::warn!("S3_BUCKET not set, uploads are kept in memory");
            return Ok(Self::in_memory());
        };

        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);
        if let Some(region) = &config.region {
            builder = builder.with_region(region);
        }
        if let Some(endpoint) = &config.endpoint {
            builder = builder.with_endpoint(endpoint).with_allow_http(true);
        }

        info!("Uploads go to s3://{}/{}", bucket, UPLOAD_PREFIX);
        Ok(Self::new(Arc::new(builder.build()?)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemory::new()))
    }

    /// Store `data` as `uploads/<file_name>` and return the object key.
    #[instrument(skip(self, data), fields(size = data.len()))]
    pub async fn upload(&self, file_name: &str, data: Bytes) -> Result<String, UploadError> {
        let key = object_key(file_name)?;
        let location = parse_path(&key)?;

        self.store.put(&location, data.into()).await?;
        info!("Stored upload {}", key);
        Ok(key)
    }

    /// Read back a stored object.
    pub async fn get(&self, key: &str) -> Result<Bytes, UploadError> {
        let location = parse_path(key)?;
        Ok(self.store.get(&location).await?.bytes().await?)
    }
}

fn parse_path(key: &str) -> Result<Path, UploadError> {
    Path::parse(key).map_err(|e| UploadError::InvalidFileName(e.to_string()))
}

fn object_key(file_name: &str) -> Result<String, UploadError> {
    let name = file_name.trim();
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(UploadError::InvalidFileName(file_name.to_string()));
    }
    Ok(format!("{UPLOAD_PREFIX}/{name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_stores_under_prefix() {
        let store = UploadStore::in_memory();
        let key = store
            .upload("whey.png", Bytes::from_static(b"png-bytes"))
            .await
            .unwrap();

        assert_eq!(key, "uploads/whey.png");
        assert_eq!(store.get(&key).await.unwrap(), Bytes::from_static(b"png-bytes"));
    }

    #[tokio::test]
    async fn test_upload_overwrites_same_name() {
        let store = UploadStore::in_memory();
        store.upload("a.txt", Bytes::from_static(b"one")).await.unwrap();
        store.upload("a.txt", Bytes::from_static(b"two")).await.unwrap();

        assert_eq!(
            store.get("uploads/a.txt").await.unwrap(),
            Bytes::from_static(b"two")
        );
    }

    #[tokio::test]
    async fn test_rejects_path_segments() {
        let store = UploadStore::in_memory();
        for name in ["", "  ", "../etc/passwd", "dir/file.txt", "dir\\file.txt", ".."] {
            let err = store.upload(name, Bytes::new()).await.unwrap_err();
            assert!(matches!(err, UploadError::InvalidFileName(_)), "{name:?}");
            assert_eq!(err.status_code(), 400);
        }
    }

    #[test]
    fn test_no_bucket_falls_back_to_memory() {
        assert!(UploadStore::from_config(&StorageConfig::default()).is_ok());
    }
}
