//! Where selected photos are read from.

use shelf_core::ImageHandle;
use std::path::PathBuf;

use crate::codec::CodecError;

/// Resolves an [`ImageHandle`] to the raw bytes of the picked photo.
///
/// Called from the blocking pool, so implementations may do blocking I/O.
pub trait ImageSource: Send + Sync {
    fn load(&self, handle: &ImageHandle) -> Result<Vec<u8>, CodecError>;
}

/// Reads photos from the local filesystem. Accepts plain paths and `file://` URIs.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageSource;

impl FsImageSource {
    pub fn new() -> Self {
        Self
    }

    fn path_of(handle: &ImageHandle) -> PathBuf {
        let reference = handle.as_str();
        let path = reference
            .strip_prefix("file://localhost")
            .or_else(|| reference.strip_prefix("file://"))
            .unwrap_or(reference);
        PathBuf::from(path)
    }
}

impl ImageSource for FsImageSource {
    fn load(&self, handle: &ImageHandle) -> Result<Vec<u8>, CodecError> {
        let path = Self::path_of(handle);
        std::fs::read(&path).map_err(|e| CodecError::Load {
            handle: handle.clone(),
            reason: e.to_string(),
        })
    }
}
