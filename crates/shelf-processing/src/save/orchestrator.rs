use shelf_core::constants::DEFAULT_PRODUCTS_COLLECTION;
use shelf_core::validation::FormValidator;
use shelf_core::{
    assemble, CodecFailurePolicy, Config, FormState, ImageHandle, OrphanPolicy, ProductDraft,
    UploadResult,
};
use shelf_db::{DocumentError, DocumentStore};
use shelf_storage::Storage;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tokio::task::JoinSet;

use super::{SaveError, SaveState, SavedProduct};
use crate::codec::ImageCodec;
use crate::source::ImageSource;
use crate::upload::{BlobUploader, UploadError};
use crate::view::{FormView, Toast};

/// Runs save attempts: validate, convert photos, upload them, assemble the record and persist
/// it, then tell the view how it went.
///
/// One attempt at a time; a concurrent call fails with [`SaveError::InProgress`].
pub struct SaveOrchestrator {
    codec: ImageCodec,
    uploader: BlobUploader,
    documents: Arc<dyn DocumentStore>,
    view: Arc<dyn FormView>,
    collection: String,
    codec_failure_policy: CodecFailurePolicy,
    orphan_policy: OrphanPolicy,
    state: watch::Sender<SaveState>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the attempt ends, however it ends.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SaveOrchestrator {
    pub fn new(
        codec: ImageCodec,
        uploader: BlobUploader,
        documents: Arc<dyn DocumentStore>,
        view: Arc<dyn FormView>,
    ) -> Self {
        let (state, _) = watch::channel(SaveState::Idle);
        Self {
            codec,
            uploader,
            documents,
            view,
            collection: DEFAULT_PRODUCTS_COLLECTION.to_string(),
            codec_failure_policy: CodecFailurePolicy::default(),
            orphan_policy: OrphanPolicy::default(),
            state,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Wire an orchestrator with the quality, key prefix, timeout, collection and policies
    /// from `config`.
    pub fn from_config(
        config: &Config,
        source: Arc<dyn ImageSource>,
        storage: Arc<dyn Storage>,
        documents: Arc<dyn DocumentStore>,
        view: Arc<dyn FormView>,
    ) -> Self {
        let codec = ImageCodec::new(source).with_quality(config.jpeg_quality);
        let uploader = BlobUploader::new(storage)
            .with_prefix(config.image_key_prefix.clone())
            .with_timeout(config.upload_timeout);

        Self::new(codec, uploader, documents, view)
            .with_collection(config.products_collection.clone())
            .with_codec_failure_policy(config.codec_failure_policy)
            .with_orphan_policy(config.orphan_policy)
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn with_codec_failure_policy(mut self, policy: CodecFailurePolicy) -> Self {
        self.codec_failure_policy = policy;
        self
    }

    pub fn with_orphan_policy(mut self, policy: OrphanPolicy) -> Self {
        self.orphan_policy = policy;
        self.uploader = self
            .uploader
            .discarding_late_writes(policy == OrphanPolicy::Delete);
        self
    }

    /// Watch the state of the current (or last) attempt.
    pub fn subscribe(&self) -> watch::Receiver<SaveState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SaveState {
        *self.state.borrow()
    }

    /// Run one save attempt over the current contents of `form`.
    ///
    /// `form` is cleared only when the record has been persisted. Photos are uploaded before
    /// price and offer are parsed, so a parse failure can leave uploaded blobs behind unless
    /// [`OrphanPolicy::Delete`] is set.
    pub async fn save(&self, form: &mut FormState) -> Result<SavedProduct, SaveError> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            tracing::warn!("Save requested while another save is in progress");
            return Err(SaveError::InProgress);
        };

        let start = Instant::now();
        self.transition(SaveState::Idle);
        self.transition(SaveState::Validating);

        let draft = form.snapshot();
        if let Err(e) = FormValidator::check(&draft) {
            tracing::warn!(error = %e, "Product form rejected");
            self.transition(SaveState::Failed);
            self.view.notify(Toast::CheckInputs);
            return Err(e.into());
        }

        self.transition(SaveState::Loading);
        self.view.set_loading(true);

        let mut attempted_keys = Vec::new();
        let result = self.run(&draft, &mut attempted_keys).await;

        self.view.set_loading(false);

        match result {
            Ok(saved) => {
                form.clear();
                self.transition(SaveState::Succeeded);
                tracing::info!(
                    product_id = %saved.product.id,
                    document_id = %saved.document_id,
                    images = saved.product.images.len(),
                    dropped_images = saved.dropped_images,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Product saved"
                );
                self.view.notify(Toast::Saved);
                Ok(saved)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Failed to save product"
                );
                if self.orphan_policy == OrphanPolicy::Delete {
                    self.discard_uploads(&attempted_keys).await;
                }
                self.transition(SaveState::Failed);
                self.view.notify(Toast::SaveFailed);
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        draft: &ProductDraft,
        attempted_keys: &mut Vec<String>,
    ) -> Result<SavedProduct, SaveError> {
        self.transition(SaveState::Uploading);
        let (blobs, dropped_images) = self.encode_images(&draft.images).await?;
        let uploads = self.upload_all(blobs, attempted_keys).await?;

        self.transition(SaveState::Assembling);
        let urls: Vec<String> = uploads.iter().map(|u| u.url.clone()).collect();
        let product = assemble(draft, &urls)?;

        self.transition(SaveState::Persisting);
        let document = serde_json::to_value(&product).map_err(DocumentError::from)?;
        let document_id = self.documents.insert(&self.collection, document).await?;

        Ok(SavedProduct {
            product,
            document_id,
            uploads,
            dropped_images,
        })
    }

    /// Convert every selected photo, applying the codec failure policy. Returns the blobs in
    /// selection order and how many photos were dropped.
    async fn encode_images(&self, images: &[ImageHandle]) -> Result<(Vec<Vec<u8>>, usize), SaveError> {
        let mut blobs = Vec::with_capacity(images.len());
        let mut dropped = 0;

        for result in self.codec.encode_all(images).await {
            match result {
                Ok(bytes) => blobs.push(bytes),
                Err(e) => match self.codec_failure_policy {
                    CodecFailurePolicy::Abort => return Err(e.into()),
                    CodecFailurePolicy::Skip => {
                        tracing::error!(error = %e, "Image conversion failed");
                        dropped += 1;
                    }
                },
            }
        }

        if dropped > 0 {
            tracing::warn!(
                selected = images.len(),
                dropped,
                "Leaving unconvertible images out of the product"
            );
        }
        if blobs.is_empty() {
            return Err(SaveError::NoEncodableImages {
                selected: images.len(),
            });
        }

        Ok((blobs, dropped))
    }

    /// Upload all blobs concurrently. Results come back in completion order. On the first
    /// error the remaining uploads are aborted, or awaited under [`OrphanPolicy::Delete`] so
    /// that every write has settled before its key is discarded.
    async fn upload_all(
        &self,
        blobs: Vec<Vec<u8>>,
        attempted_keys: &mut Vec<String>,
    ) -> Result<Vec<UploadResult>, SaveError> {
        let mut tasks = JoinSet::new();
        for blob in blobs {
            let key = self.uploader.next_key();
            attempted_keys.push(key.clone());
            let uploader = self.uploader.clone();
            tasks.spawn(async move { uploader.upload_to(key, blob).await });
        }

        let mut uploads = Vec::with_capacity(attempted_keys.len());
        while let Some(joined) = tasks.join_next().await {
            let outcome = joined.unwrap_or_else(|e| Err(UploadError::Task(e.to_string())));
            match outcome {
                Ok(upload) => uploads.push(upload),
                Err(e) => {
                    match self.orphan_policy {
                        OrphanPolicy::Keep => tasks.abort_all(),
                        OrphanPolicy::Delete => {
                            while tasks.join_next().await.is_some() {}
                        }
                    }
                    return Err(e.into());
                }
            }
        }

        Ok(uploads)
    }

    async fn discard_uploads(&self, keys: &[String]) {
        for key in keys {
            match self.uploader.discard(key).await {
                Ok(()) => tracing::info!(key = %key, "Discarded photo of failed save"),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Failed to discard photo of failed save")
                }
            }
        }
    }

    fn transition(&self, next: SaveState) {
        let previous = self.state.send_replace(next);
        if previous != next {
            tracing::debug!(from = %previous, to = %next, "Save state changed");
        }
    }
}
