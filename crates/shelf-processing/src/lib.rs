//! Shelf processing
//!
//! The product save pipeline: photos are loaded and re-encoded as JPEG ([`codec`]), uploaded
//! concurrently to blob storage ([`upload`]), their URLs assembled into a product record and
//! the record written to the document store ([`save`]). [`form`] drives the pipeline from UI
//! events and [`view`] is the sink for what the UI should show.

pub mod codec;
pub mod form;
pub mod save;
pub mod source;
pub mod upload;
pub mod view;

pub use codec::{CodecError, ImageCodec};
pub use form::{FormEvent, MenuItem, ProductForm};
pub use save::{SaveError, SaveOrchestrator, SaveState, SavedProduct};
pub use source::{FsImageSource, ImageSource};
pub use upload::{BlobUploader, UploadError};
pub use view::{color_summary, image_summary, FormView, Toast};
