//! Document store abstraction and backends.

mod local;
mod postgres;

pub use local::LocalDocumentStore;
pub use postgres::PostgresDocumentStore;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{DocumentError, DocumentResult};

/// Schemaless document store addressed by collection + store-assigned id.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert `document` as a new document of `collection` and return the id the store
    /// assigned to it.
    async fn insert(&self, collection: &str, document: Value) -> DocumentResult<String>;

    /// Fetch a document by the id [`DocumentStore::insert`] returned.
    async fn get(&self, collection: &str, id: &str) -> DocumentResult<Option<Value>>;
}

/// Collection names are used as path segments by the local backend, so they are held to
/// the same rules everywhere.
pub(crate) fn validate_collection(collection: &str) -> DocumentResult<()> {
    if collection.trim().is_empty()
        || collection.contains('/')
        || collection.contains('\\')
        || collection.contains("..")
    {
        return Err(DocumentError::InvalidCollection(collection.to_string()));
    }
    Ok(())
}
