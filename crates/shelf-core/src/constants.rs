//! Constants shared across crates.

/// Collection that product documents are inserted into.
pub const DEFAULT_PRODUCTS_COLLECTION: &str = "Products";

/// Prefix under which product photos are written in blob storage.
pub const DEFAULT_IMAGE_KEY_PREFIX: &str = "products/images";

/// Extension of every stored product photo (photos are always re-encoded to JPEG).
pub const IMAGE_EXTENSION: &str = "jpg";

pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// JPEG quality used when re-encoding selected photos.
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 60;

pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
