use shelf_core::{Config, DocumentBackend};
use std::sync::Arc;

use crate::documents::{DocumentStore, LocalDocumentStore, PostgresDocumentStore};
use crate::error::{DocumentError, DocumentResult};

/// Create a document store based on configuration.
///
/// The Postgres backend runs the bundled migrations before it is handed out.
pub async fn create_document_store(config: &Config) -> DocumentResult<Arc<dyn DocumentStore>> {
    match config.document_backend {
        DocumentBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| DocumentError::Config("DATABASE_URL not configured".to_string()))?;

            let store = PostgresDocumentStore::connect(url, config.db_max_connections).await?;
            store.migrate().await?;
            Ok(Arc::new(store))
        }
        DocumentBackend::Local => {
            let store = LocalDocumentStore::new(config.local_document_path.clone()).await?;
            Ok(Arc::new(store))
        }
    }
}
