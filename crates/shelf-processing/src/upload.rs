//! Photo upload: write a JPEG blob under a fresh key, then resolve its fetch URL.

use shelf_core::constants::{DEFAULT_IMAGE_KEY_PREFIX, IMAGE_CONTENT_TYPE};
use shelf_core::UploadResult;
use shelf_storage::keys::generate_image_key;
use shelf_storage::{Storage, StorageError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to write blob {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: StorageError,
    },

    #[error("Failed to resolve URL of blob {key}: {source}")]
    ResolveUrl {
        key: String,
        #[source]
        source: StorageError,
    },

    #[error("Upload of blob {key} timed out after {}s", .timeout.as_secs_f32())]
    Timeout { key: String, timeout: Duration },

    #[error("Upload task failed: {0}")]
    Task(String),
}

impl UploadError {
    /// Storage key the failed upload was writing to, when known.
    pub fn key(&self) -> Option<&str> {
        match self {
            UploadError::Write { key, .. }
            | UploadError::ResolveUrl { key, .. }
            | UploadError::Timeout { key, .. } => Some(key),
            UploadError::Task(_) => None,
        }
    }
}

/// Uploads photo blobs to a [`Storage`] backend.
#[derive(Clone)]
pub struct BlobUploader {
    storage: Arc<dyn Storage>,
    prefix: String,
    timeout: Option<Duration>,
    discard_late_writes: bool,
}

impl BlobUploader {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            prefix: DEFAULT_IMAGE_KEY_PREFIX.to_string(),
            timeout: None,
            discard_late_writes: false,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Bound each upload (write + URL resolution). `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// When set, a write still running at timeout is left to finish and its blob is then
    /// deleted. Otherwise the write is aborted.
    pub fn discarding_late_writes(mut self, discard: bool) -> Self {
        self.discard_late_writes = discard;
        self
    }

    /// A fresh, unique storage key for the next photo.
    pub fn next_key(&self) -> String {
        generate_image_key(&self.prefix)
    }

    /// Upload `data` under a freshly generated key.
    pub async fn upload(&self, data: Vec<u8>) -> Result<UploadResult, UploadError> {
        self.upload_to(self.next_key(), data).await
    }

    /// Upload `data` under `key`, obtained from [`BlobUploader::next_key`].
    pub async fn upload_to(&self, key: String, data: Vec<u8>) -> Result<UploadResult, UploadError> {
        let Some(timeout) = self.timeout else {
            return self.write_and_resolve(&key, data).await;
        };

        let uploader = self.clone();
        let task_key = key.clone();
        let mut task = tokio::spawn(async move { uploader.write_and_resolve(&task_key, data).await });

        match tokio::time::timeout(timeout, &mut task).await {
            Ok(joined) => joined.unwrap_or_else(|e| Err(UploadError::Task(e.to_string()))),
            Err(_) => {
                tracing::error!(key = %key, timeout_secs = timeout.as_secs(), "Upload timed out");
                if self.discard_late_writes {
                    let uploader = self.clone();
                    let late_key = key.clone();
                    tokio::spawn(async move {
                        let _ = task.await;
                        match uploader.discard(&late_key).await {
                            Ok(()) => tracing::info!(key = %late_key, "Discarded late photo write"),
                            Err(e) => tracing::warn!(
                                key = %late_key,
                                error = %e,
                                "Failed to discard late photo write"
                            ),
                        }
                    });
                } else {
                    task.abort();
                }
                Err(UploadError::Timeout { key, timeout })
            }
        }
    }

    async fn write_and_resolve(&self, key: &str, data: Vec<u8>) -> Result<UploadResult, UploadError> {
        let start = Instant::now();
        let size_bytes = data.len();

        self.storage
            .write(key, data, IMAGE_CONTENT_TYPE)
            .await
            .map_err(|source| UploadError::Write {
                key: key.to_string(),
                source,
            })?;

        let url = self
            .storage
            .resolve_url(key)
            .await
            .map_err(|source| UploadError::ResolveUrl {
                key: key.to_string(),
                source,
            })?;

        tracing::info!(
            key = %key,
            size_bytes,
            duration_ms = start.elapsed().as_millis() as u64,
            backend = %self.storage.backend_type(),
            "Photo uploaded"
        );

        Ok(UploadResult {
            key: key.to_string(),
            url,
        })
    }

    /// Delete a previously uploaded blob.
    pub async fn discard(&self, key: &str) -> Result<(), StorageError> {
        self.storage.delete(key).await
    }
}
