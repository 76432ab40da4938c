use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres};
use std::time::Duration;
use uuid::Uuid;

use super::{validate_collection, DocumentStore};
use crate::error::DocumentResult;

const CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Document store backed by the `documents` table.
#[derive(Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> DocumentResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(CONNECTION_TIMEOUT_SECS))
            .connect(database_url)
            .await?;

        tracing::info!(max_connections, "Connected to document database");
        Ok(Self { pool })
    }

    /// Apply the bundled migrations.
    pub async fn migrate(&self) -> DocumentResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    #[tracing::instrument(skip(self, document), fields(db.table = "documents", db.operation = "insert"))]
    async fn insert(&self, collection: &str, document: Value) -> DocumentResult<String> {
        validate_collection(collection)?;

        let id = sqlx::query_scalar::<Postgres, Uuid>(
            r#"
            INSERT INTO documents (collection, body)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(collection)
        .bind(Json(document))
        .fetch_one(&self.pool)
        .await?;

        Ok(id.to_string())
    }

    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "select"))]
    async fn get(&self, collection: &str, id: &str) -> DocumentResult<Option<Value>> {
        validate_collection(collection)?;

        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let body = sqlx::query_scalar::<Postgres, Json<Value>>(
            "SELECT body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(body.map(|Json(value)| value))
    }
}
