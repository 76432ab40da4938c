use shelf_core::{ParseError, Product, UploadResult};
use shelf_db::DocumentError;
use thiserror::Error;
use validator::ValidationErrors;

use crate::codec::CodecError;
use crate::upload::UploadError;

/// Why a save attempt failed.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Required product fields are missing: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Image conversion failed: {0}")]
    Codec(#[from] CodecError),

    #[error("None of the {selected} selected images could be converted")]
    NoEncodableImages { selected: usize },

    #[error("Image upload failed: {0}")]
    Upload(#[from] UploadError),

    #[error("Invalid product values: {0}")]
    Parse(#[from] ParseError),

    #[error("Failed to persist product: {0}")]
    Persist(#[from] DocumentError),

    #[error("A save is already in progress")]
    InProgress,
}

/// Outcome of a successful save attempt.
#[derive(Debug, Clone)]
pub struct SavedProduct {
    pub product: Product,
    /// Id the document store assigned, unrelated to `product.id`.
    pub document_id: String,
    pub uploads: Vec<UploadResult>,
    /// Selected photos that could not be converted and were left out.
    pub dropped_images: usize,
}
