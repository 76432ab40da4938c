//! Configuration module
//!
//! Settings for blob storage, the document store and the save pipeline, read from the
//! environment (and a `.env` file when present). Every variable has a default except the
//! credentials a remote backend cannot work without; those are enforced by [`Config::validate`].

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use crate::constants::{
    DEFAULT_DB_MAX_CONNECTIONS, DEFAULT_IMAGE_KEY_PREFIX, DEFAULT_JPEG_QUALITY,
    DEFAULT_PRODUCTS_COLLECTION, DEFAULT_UPLOAD_TIMEOUT_SECS,
};
use crate::policy::{CodecFailurePolicy, OrphanPolicy};
use crate::storage_types::{DocumentBackend, StorageBackend};

const DEFAULT_LOCAL_STORAGE_PATH: &str = "data/blobs";
const DEFAULT_LOCAL_DOCUMENT_PATH: &str = "data/documents";

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    // Blob storage
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub aws_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    /// Public base URL objects are fetched from. Required with the S3 backend.
    pub s3_public_base_url: Option<String>,
    pub local_storage_path: String,
    pub local_storage_base_url: Option<String>,
    // Document store
    pub document_backend: DocumentBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub local_document_path: String,
    pub products_collection: String,
    // Save pipeline
    pub image_key_prefix: String,
    pub jpeg_quality: u8,
    /// `None` disables the per-upload timeout.
    pub upload_timeout: Option<Duration>,
    pub codec_failure_policy: CodecFailurePolicy,
    pub orphan_policy: OrphanPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an explicit set of variables.
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let storage_backend = match var("STORAGE_BACKEND") {
            Some(v) => v.parse()?,
            None => StorageBackend::Local,
        };
        let document_backend = match var("DOCUMENT_BACKEND") {
            Some(v) => v.parse()?,
            None => DocumentBackend::Local,
        };
        let codec_failure_policy = match var("CODEC_FAILURE_POLICY") {
            Some(v) => v.parse()?,
            None => CodecFailurePolicy::default(),
        };
        let orphan_policy = match var("ORPHAN_POLICY") {
            Some(v) => v.parse()?,
            None => OrphanPolicy::default(),
        };

        let jpeg_quality = match var("JPEG_QUALITY") {
            Some(v) => v
                .parse::<u8>()
                .map_err(|e| anyhow::anyhow!("Invalid JPEG_QUALITY {:?}: {}", v, e))?,
            None => DEFAULT_JPEG_QUALITY,
        };

        let upload_timeout_secs = match var("UPLOAD_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .map_err(|e| anyhow::anyhow!("Invalid UPLOAD_TIMEOUT_SECS {:?}: {}", v, e))?,
            None => DEFAULT_UPLOAD_TIMEOUT_SECS,
        };

        let db_max_connections = match var("DB_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .map_err(|e| anyhow::anyhow!("Invalid DB_MAX_CONNECTIONS {:?}: {}", v, e))?,
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        Ok(Config {
            environment,
            storage_backend,
            s3_bucket: var("S3_BUCKET"),
            s3_region: var("S3_REGION"),
            aws_region: var("AWS_REGION"),
            s3_endpoint: var("S3_ENDPOINT"),
            s3_public_base_url: var("S3_PUBLIC_BASE_URL"),
            local_storage_path: var("LOCAL_STORAGE_PATH")
                .unwrap_or_else(|| DEFAULT_LOCAL_STORAGE_PATH.to_string()),
            local_storage_base_url: var("LOCAL_STORAGE_BASE_URL"),
            document_backend,
            database_url: var("DATABASE_URL"),
            db_max_connections,
            local_document_path: var("LOCAL_DOCUMENT_PATH")
                .unwrap_or_else(|| DEFAULT_LOCAL_DOCUMENT_PATH.to_string()),
            products_collection: var("PRODUCTS_COLLECTION")
                .unwrap_or_else(|| DEFAULT_PRODUCTS_COLLECTION.to_string()),
            image_key_prefix: var("IMAGE_KEY_PREFIX")
                .map(|p| p.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_IMAGE_KEY_PREFIX.to_string()),
            jpeg_quality,
            upload_timeout: (upload_timeout_secs > 0)
                .then(|| Duration::from_secs(upload_timeout_secs)),
            codec_failure_policy,
            orphan_policy,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(anyhow::anyhow!(
                "JPEG_QUALITY must be between 1 and 100, got {}",
                self.jpeg_quality
            ));
        }

        if self.image_key_prefix.is_empty()
            || self.image_key_prefix.starts_with('/')
            || self.image_key_prefix.contains("..")
        {
            return Err(anyhow::anyhow!(
                "IMAGE_KEY_PREFIX must be a relative path without '..', got {:?}",
                self.image_key_prefix
            ));
        }

        if self.products_collection.contains('/') {
            return Err(anyhow::anyhow!(
                "PRODUCTS_COLLECTION must not contain '/', got {:?}",
                self.products_collection
            ));
        }

        if self.storage_backend == StorageBackend::S3 {
            if self.s3_bucket.is_none() {
                return Err(anyhow::anyhow!("S3_BUCKET is required when STORAGE_BACKEND=s3"));
            }
            if self.s3_region().is_none() {
                return Err(anyhow::anyhow!(
                    "S3_REGION or AWS_REGION is required when STORAGE_BACKEND=s3"
                ));
            }
            if self.s3_public_base_url.is_none() {
                return Err(anyhow::anyhow!(
                    "S3_PUBLIC_BASE_URL is required when STORAGE_BACKEND=s3"
                ));
            }
        }

        if self.db_max_connections == 0 {
            return Err(anyhow::anyhow!("DB_MAX_CONNECTIONS must be at least 1"));
        }

        if self.document_backend == DocumentBackend::Postgres && self.database_url.is_none() {
            return Err(anyhow::anyhow!(
                "DATABASE_URL is required when DOCUMENT_BACKEND=postgres"
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        matches!(self.environment.to_lowercase().as_str(), "production" | "prod")
    }

    /// S3 region, falling back to the generic AWS region.
    pub fn s3_region(&self) -> Option<&str> {
        self.s3_region.as_deref().or(self.aws_region.as_deref())
    }

    /// Effective settings for display, with credentials masked.
    pub fn describe(&self) -> Vec<(&'static str, String)> {
        let opt = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
        vec![
            ("environment", self.environment.clone()),
            ("storage_backend", self.storage_backend.to_string()),
            ("s3_bucket", opt(&self.s3_bucket)),
            ("s3_region", self.s3_region().unwrap_or("-").to_string()),
            ("s3_endpoint", opt(&self.s3_endpoint)),
            ("s3_public_base_url", opt(&self.s3_public_base_url)),
            ("local_storage_path", self.local_storage_path.clone()),
            ("local_storage_base_url", opt(&self.local_storage_base_url)),
            ("document_backend", self.document_backend.to_string()),
            ("db_max_connections", self.db_max_connections.to_string()),
            (
                "database_url",
                self.database_url
                    .as_deref()
                    .map(mask_credentials)
                    .unwrap_or_else(|| "-".to_string()),
            ),
            ("local_document_path", self.local_document_path.clone()),
            ("products_collection", self.products_collection.clone()),
            ("image_key_prefix", self.image_key_prefix.clone()),
            ("jpeg_quality", self.jpeg_quality.to_string()),
            (
                "upload_timeout_secs",
                self.upload_timeout
                    .map(|d| d.as_secs().to_string())
                    .unwrap_or_else(|| "disabled".to_string()),
            ),
            ("codec_failure_policy", self.codec_failure_policy.to_string()),
            ("orphan_policy", self.orphan_policy.to_string()),
        ]
    }
}

/// Replace the `user:password@` part of a connection URL.
fn mask_credentials(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***@{}", &url[..scheme_end], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}
