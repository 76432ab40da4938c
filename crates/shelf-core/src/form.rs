//! Editable form state.
//!
//! `FormState` is the single writer of the draft. A save attempt reads a snapshot taken when
//! it starts and only calls [`FormState::clear`] once the record has been persisted, so the
//! user can retry a failed save without re-entering anything.

use crate::models::{ArgbColor, DraftField, ImageHandle, ProductDraft};

#[derive(Debug, Clone, Default)]
pub struct FormState {
    draft: ProductDraft,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    /// Copy of the current draft for a save attempt.
    pub fn snapshot(&self) -> ProductDraft {
        self.draft.clone()
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set_field(field, value);
    }

    pub fn add_color(&mut self, color: ArgbColor) {
        self.draft.colors.push(color);
    }

    pub fn add_images<I>(&mut self, handles: I)
    where
        I: IntoIterator<Item = ImageHandle>,
    {
        self.draft.images.extend(handles);
    }

    pub fn colors(&self) -> &[ArgbColor] {
        &self.draft.colors
    }

    pub fn images(&self) -> &[ImageHandle] {
        &self.draft.images
    }

    /// Reset every text field and selection.
    pub fn clear(&mut self) {
        self.draft = ProductDraft::default();
    }
}
