//! Product form controller: applies UI events to the form state and triggers saves.

use shelf_core::{ArgbColor, DraftField, FormState, ImageHandle};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::save::{SaveError, SaveOrchestrator, SavedProduct};
use crate::view::FormView;

/// Toolbar / menu entries of the form screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    SaveProduct,
    Other(String),
}

/// Something the user did on the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    SaveRequested,
    ColorChosen(ArgbColor),
    /// Photos picked in one go. An empty batch means the picker was cancelled.
    ImagesChosen(Vec<ImageHandle>),
    MenuAction(MenuItem),
    FieldEdited(DraftField, String),
}

pub struct ProductForm {
    state: FormState,
    orchestrator: Arc<SaveOrchestrator>,
    view: Arc<dyn FormView>,
}

impl ProductForm {
    pub fn new(orchestrator: Arc<SaveOrchestrator>, view: Arc<dyn FormView>) -> Self {
        Self {
            state: FormState::new(),
            orchestrator,
            view,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Apply one event. Returns the outcome when the event triggered a save.
    pub async fn handle(&mut self, event: FormEvent) -> Option<Result<SavedProduct, SaveError>> {
        match event {
            FormEvent::SaveRequested | FormEvent::MenuAction(MenuItem::SaveProduct) => {
                Some(self.save().await)
            }
            FormEvent::MenuAction(MenuItem::Other(item)) => {
                tracing::debug!(item = %item, "Ignoring menu action");
                None
            }
            FormEvent::ColorChosen(color) => {
                self.state.add_color(color);
                self.view.render_colors(self.state.colors());
                None
            }
            FormEvent::ImagesChosen(handles) => {
                if handles.is_empty() {
                    tracing::debug!("Image selection cancelled");
                    return None;
                }
                self.state.add_images(handles);
                self.view.render_images(self.state.images());
                None
            }
            FormEvent::FieldEdited(field, value) => {
                self.state.set_field(field, value);
                None
            }
        }
    }

    /// Process events one at a time until the sender side is dropped.
    ///
    /// Returns the outcome of the last save, if any was requested.
    pub async fn run(
        &mut self,
        mut events: mpsc::Receiver<FormEvent>,
    ) -> Option<Result<SavedProduct, SaveError>> {
        let mut last = None;
        while let Some(event) = events.recv().await {
            if let Some(outcome) = self.handle(event).await {
                last = Some(outcome);
            }
        }
        last
    }

    async fn save(&mut self) -> Result<SavedProduct, SaveError> {
        let result = self.orchestrator.save(&mut self.state).await;
        if result.is_ok() {
            self.view.render_colors(self.state.colors());
            self.view.render_images(self.state.images());
        }
        result
    }
}
