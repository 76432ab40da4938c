use async_trait::async_trait;
use serde_json::Value;
use shelf_db::{DocumentError, DocumentResult, DocumentStore};
use shelf_storage::{Storage, StorageBackend, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

pub const BLOB_BASE_URL: &str = "https://blobs.test";

#[derive(Default)]
struct BlobState {
    blobs: HashMap<String, Vec<u8>>,
    content_types: HashMap<String, String>,
    write_calls: usize,
}

/// In-memory blob store.
#[derive(Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<BlobState>>,
    fail_on_write: Option<usize>,
    failure_delay: Option<Duration>,
    blocking_write: Option<Duration>,
    delay: Option<Duration>,
    slow_above_bytes: Option<(usize, Duration)>,
    fail_resolve: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `n`-th write call (1-based) fails; every other write succeeds.
    pub fn failing_on_write(mut self, n: usize) -> Self {
        self.fail_on_write = Some(n);
        self
    }

    /// The injected write failure is reported only after `delay`.
    pub fn with_failure_delay(mut self, delay: Duration) -> Self {
        self.failure_delay = Some(delay);
        self
    }

    /// Successful writes land from the blocking pool after `delay`, so cancelling the caller
    /// does not stop them.
    pub fn with_blocking_writes(mut self, delay: Duration) -> Self {
        self.blocking_write = Some(delay);
        self
    }

    /// Every write sleeps for `delay` first.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Writes of blobs larger than `bytes` sleep for `delay` first.
    pub fn slow_above(mut self, bytes: usize, delay: Duration) -> Self {
        self.slow_above_bytes = Some((bytes, delay));
        self
    }

    pub fn failing_resolve(mut self) -> Self {
        self.fail_resolve = true;
        self
    }

    pub fn write_calls(&self) -> usize {
        self.state.lock().unwrap().write_calls
    }

    pub fn blob_count(&self) -> usize {
        self.state.lock().unwrap().blobs.len()
    }

    pub fn keys(&self) -> Vec<String> {
        self.state.lock().unwrap().blobs.keys().cloned().collect()
    }

    pub fn blob(&self, key: &str) -> Option<Vec<u8>> {
        self.state.lock().unwrap().blobs.get(key).cloned()
    }

    pub fn content_type(&self, key: &str) -> Option<String> {
        self.state.lock().unwrap().content_types.get(key).cloned()
    }

    pub fn url_of(key: &str) -> String {
        format!("{}/{}", BLOB_BASE_URL, key)
    }

    pub fn key_of(url: &str) -> &str {
        url.trim_start_matches(BLOB_BASE_URL).trim_start_matches('/')
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn write(&self, storage_key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some((bytes, delay)) = self.slow_above_bytes {
            if data.len() > bytes {
                tokio::time::sleep(delay).await;
            }
        }

        let call = {
            let mut state = self.state.lock().unwrap();
            state.write_calls += 1;
            state.write_calls
        };
        if self.fail_on_write == Some(call) {
            if let Some(delay) = self.failure_delay {
                tokio::time::sleep(delay).await;
            }
            return Err(StorageError::UploadFailed("injected write failure".to_string()));
        }

        let state = self.state.clone();
        let key = storage_key.to_string();
        let content_type = content_type.to_string();
        let store = move || {
            let mut state = state.lock().unwrap();
            state.content_types.insert(key.clone(), content_type);
            state.blobs.insert(key, data);
        };
        match self.blocking_write {
            Some(delay) => tokio::task::spawn_blocking(move || {
                std::thread::sleep(delay);
                store();
            })
            .await
            .map_err(|e| StorageError::BackendError(e.to_string())),
            None => {
                store();
                Ok(())
            }
        }
    }

    async fn resolve_url(&self, storage_key: &str) -> StorageResult<String> {
        if self.fail_resolve {
            return Err(StorageError::BackendError("injected resolve failure".to_string()));
        }
        if !self.state.lock().unwrap().blobs.contains_key(storage_key) {
            return Err(StorageError::NotFound(storage_key.to_string()));
        }
        Ok(Self::url_of(storage_key))
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        self.state.lock().unwrap().blobs.remove(storage_key);
        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        Ok(self.state.lock().unwrap().blobs.contains_key(storage_key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

/// A document as inserted: collection, store-assigned id and body.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub collection: String,
    pub id: String,
    pub body: Value,
}

/// In-memory document store.
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: Mutex<Vec<StoredDocument>>,
    fail_inserts: bool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_inserts: true,
            ..Self::default()
        }
    }

    pub fn documents(&self) -> Vec<StoredDocument> {
        self.documents.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: &str, document: Value) -> DocumentResult<String> {
        if self.fail_inserts {
            return Err(DocumentError::Io(std::io::Error::other("injected insert failure")));
        }
        let id = Uuid::new_v4().to_string();
        self.documents.lock().unwrap().push(StoredDocument {
            collection: collection.to_string(),
            id: id.clone(),
            body: document,
        });
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> DocumentResult<Option<Value>> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.collection == collection && d.id == id)
            .map(|d| d.body.clone()))
    }
}
