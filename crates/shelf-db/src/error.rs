use thiserror::Error;

/// Document store errors
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid collection name: {0:?}")]
    InvalidCollection(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type DocumentResult<T> = Result<T, DocumentError>;
