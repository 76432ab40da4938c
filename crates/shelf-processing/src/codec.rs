//! Photo re-encoding: whatever the user picked becomes a fixed-quality JPEG.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageReader};
use shelf_core::constants::DEFAULT_JPEG_QUALITY;
use shelf_core::ImageHandle;
use std::io::Cursor;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

use crate::source::ImageSource;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Failed to load image {handle}: {reason}")]
    Load { handle: ImageHandle, reason: String },

    #[error("Failed to decode image {handle}: {reason}")]
    Decode { handle: ImageHandle, reason: String },

    #[error("Failed to encode image {handle} as JPEG: {reason}")]
    Encode { handle: ImageHandle, reason: String },

    #[error("Image conversion task failed: {0}")]
    Task(String),
}

/// Loads a selected photo and re-encodes it as JPEG.
#[derive(Clone)]
pub struct ImageCodec {
    source: Arc<dyn ImageSource>,
    quality: u8,
}

impl ImageCodec {
    pub fn new(source: Arc<dyn ImageSource>) -> Self {
        Self {
            source,
            quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// JPEG quality, clamped to 1..=100.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(1, 100);
        self
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Convert one photo, logging and swallowing any failure.
    pub fn encode(&self, handle: &ImageHandle) -> Option<Vec<u8>> {
        match self.try_encode(handle) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::error!(handle = %handle, error = %e, "Image conversion failed");
                None
            }
        }
    }

    /// Convert one photo. Blocking; CPU-bound.
    pub fn try_encode(&self, handle: &ImageHandle) -> Result<Vec<u8>, CodecError> {
        let start = Instant::now();
        let raw = self.source.load(handle)?;
        let original_size = raw.len();

        let img = ImageReader::new(Cursor::new(raw))
            .with_guessed_format()
            .map_err(|e| CodecError::Decode {
                handle: handle.clone(),
                reason: e.to_string(),
            })?
            .decode()
            .map_err(|e| CodecError::Decode {
                handle: handle.clone(),
                reason: e.to_string(),
            })?;

        let bytes = encode_jpeg(&img, self.quality).map_err(|e| CodecError::Encode {
            handle: handle.clone(),
            reason: e.to_string(),
        })?;

        tracing::debug!(
            handle = %handle,
            original_size,
            encoded_size = bytes.len(),
            quality = self.quality,
            duration_ms = start.elapsed().as_millis() as u64,
            "Image converted to JPEG"
        );

        Ok(bytes)
    }

    /// Convert every photo in parallel on the blocking pool.
    ///
    /// The output has one entry per handle, in the same order as `handles`.
    pub async fn encode_all(&self, handles: &[ImageHandle]) -> Vec<Result<Vec<u8>, CodecError>> {
        let tasks = handles.iter().cloned().map(|handle| {
            let codec = self.clone();
            tokio::task::spawn_blocking(move || codec.try_encode(&handle))
        });

        futures::future::join_all(tasks)
            .await
            .into_iter()
            .map(|joined| joined.unwrap_or_else(|e| Err(CodecError::Task(e.to_string()))))
            .collect()
    }
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> image::ImageResult<Vec<u8>> {
    // JPEG has no alpha channel
    let rgb = img.to_rgb8();
    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut out, quality);
    encoder.encode_image(&rgb)?;
    Ok(out)
}
