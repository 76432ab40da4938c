//! Shared key generation for storage backends.
//!
//! Key format: `{prefix}/{uuid}.jpg`.

use shelf_core::constants::IMAGE_EXTENSION;
use uuid::Uuid;

use crate::{StorageError, StorageResult};

/// Generate a fresh, collision-free key for a product photo under `prefix`.
pub fn generate_image_key(prefix: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        format!("{}.{}", Uuid::new_v4(), IMAGE_EXTENSION)
    } else {
        format!("{}/{}.{}", prefix, Uuid::new_v4(), IMAGE_EXTENSION)
    }
}

/// Reject keys that could escape the storage root or address nothing.
pub fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if storage_key.contains("..") || storage_key.starts_with('/') || storage_key.contains('\\') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}
