//! Test helpers: in-memory stores with fault injection, a recording view and photo fixtures.
//!
//! Run from workspace root: `cargo test -p shelf-processing`.

#![allow(dead_code)]

pub mod fixtures;
pub mod stores;
pub mod view;

use shelf_processing::{BlobUploader, ImageCodec, SaveOrchestrator};
use std::sync::Arc;

use fixtures::MapSource;
use stores::{MemoryDocumentStore, MemoryStorage};
use view::RecordingView;

/// Collaborators of one orchestrator under test.
pub struct TestHarness {
    pub source: Arc<MapSource>,
    pub storage: Arc<MemoryStorage>,
    pub documents: Arc<MemoryDocumentStore>,
    pub view: Arc<RecordingView>,
}

impl TestHarness {
    pub fn new(source: MapSource) -> Self {
        Self::with_stores(source, MemoryStorage::new(), MemoryDocumentStore::new())
    }

    pub fn with_stores(
        source: MapSource,
        storage: MemoryStorage,
        documents: MemoryDocumentStore,
    ) -> Self {
        Self {
            source: Arc::new(source),
            storage: Arc::new(storage),
            documents: Arc::new(documents),
            view: Arc::new(RecordingView::new()),
        }
    }

    pub fn codec(&self) -> ImageCodec {
        ImageCodec::new(self.source.clone())
    }

    pub fn uploader(&self) -> BlobUploader {
        BlobUploader::new(self.storage.clone())
    }

    /// Orchestrator with default settings over this harness.
    pub fn orchestrator(&self) -> SaveOrchestrator {
        SaveOrchestrator::new(
            self.codec(),
            self.uploader(),
            self.documents.clone(),
            self.view.clone(),
        )
    }
}
