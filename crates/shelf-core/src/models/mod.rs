//! Domain models
//!
//! `ProductDraft` is the editable state behind the form; `Product` is the immutable record
//! written to the document store once per successful save attempt.

pub mod color;
pub mod draft;
pub mod product;

pub use color::ArgbColor;
pub use draft::{DraftField, ImageHandle, ProductDraft};
pub use product::{Product, UploadResult};
