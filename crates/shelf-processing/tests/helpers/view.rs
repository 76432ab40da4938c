use shelf_core::{ArgbColor, ImageHandle};
use shelf_processing::{FormView, Toast};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Loading(bool),
    Colors(Vec<ArgbColor>),
    Images(usize),
    Toast(Toast),
}

/// Records every instruction it receives.
#[derive(Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Toast(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    pub fn loading_changes(&self) -> Vec<bool> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Loading(l) => Some(l),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl FormView for RecordingView {
    fn set_loading(&self, loading: bool) {
        self.push(ViewEvent::Loading(loading));
    }

    fn render_colors(&self, colors: &[ArgbColor]) {
        self.push(ViewEvent::Colors(colors.to_vec()));
    }

    fn render_images(&self, images: &[ImageHandle]) {
        self.push(ViewEvent::Images(images.len()));
    }

    fn notify(&self, toast: Toast) {
        self.push(ViewEvent::Toast(toast));
    }
}
