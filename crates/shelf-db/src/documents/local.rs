use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use super::{validate_collection, DocumentStore};
use crate::error::{DocumentError, DocumentResult};

/// Document store that keeps each document as `<root>/<collection>/<id>.json`.
#[derive(Clone, Debug)]
pub struct LocalDocumentStore {
    root: PathBuf,
}

impl LocalDocumentStore {
    pub async fn new(root: impl Into<PathBuf>) -> DocumentResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await.map_err(|e| {
            DocumentError::Config(format!(
                "Failed to create document directory {}: {}",
                root.display(),
                e
            ))
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, collection: &str, id: &str) -> PathBuf {
        self.root.join(collection).join(format!("{}.json", id))
    }
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn insert(&self, collection: &str, document: Value) -> DocumentResult<String> {
        validate_collection(collection)?;

        let id = Uuid::new_v4().to_string();
        let path = self.document_path(collection, &id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let body = serde_json::to_vec_pretty(&document)?;
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        file.write_all(&body).await?;
        file.sync_all().await?;

        tracing::info!(
            collection = %collection,
            document_id = %id,
            path = %path.display(),
            size_bytes = body.len(),
            "Local document insert successful"
        );

        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> DocumentResult<Option<Value>> {
        validate_collection(collection)?;
        if Uuid::parse_str(id).is_err() {
            return Ok(None);
        }

        let path = self.document_path(collection, id);
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
