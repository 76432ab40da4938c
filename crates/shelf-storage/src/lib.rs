//! Shelf Storage Library
//!
//! Blob storage abstraction for product photos, with S3 and local filesystem backends.
//!
//! # Storage key format
//!
//! Photos are stored under `{prefix}/{uuid}.jpg` (prefix `products/images` by default).
//! Keys must not be empty, contain `..` or start with `/`. Key generation and validation
//! live in the `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use shelf_core::StorageBackend;
pub use traits::{Storage, StorageError, StorageResult};
