//! Shelf Core Library
//!
//! This crate provides the product domain models, the editable form state, validation,
//! record assembly, error types and configuration shared by every Shelf component.
//! It performs no I/O apart from reading configuration from the environment.

pub mod assembler;
pub mod config;
pub mod constants;
pub mod error;
pub mod form;
pub mod models;
pub mod policy;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use assembler::assemble;
pub use config::Config;
pub use error::ParseError;
pub use form::FormState;
pub use models::{ArgbColor, DraftField, ImageHandle, Product, ProductDraft, UploadResult};
pub use policy::{CodecFailurePolicy, OrphanPolicy};
pub use storage_types::{DocumentBackend, StorageBackend};
