//! What the form UI is told to show.

use shelf_core::{ArgbColor, ImageHandle};
use std::fmt::{self, Display, Formatter};

/// Short user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toast {
    CheckInputs,
    Saved,
    SaveFailed,
}

impl Toast {
    pub fn message(self) -> &'static str {
        match self {
            Toast::CheckInputs => "Check your inputs",
            Toast::Saved => "Product saved successfully",
            Toast::SaveFailed => "Failed to save product",
        }
    }
}

impl Display for Toast {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Sink for UI instructions issued by the form and the save pipeline.
pub trait FormView: Send + Sync {
    fn set_loading(&self, loading: bool);

    fn render_colors(&self, colors: &[ArgbColor]);

    fn render_images(&self, images: &[ImageHandle]);

    fn notify(&self, toast: Toast);
}

/// Selected colors as comma separated hex, e.g. `ff112233, ff000000`.
pub fn color_summary(colors: &[ArgbColor]) -> String {
    colors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn image_summary(images: &[ImageHandle]) -> String {
    if images.is_empty() {
        "No images selected".to_string()
    } else {
        format!("Selected images: {}", images.len())
    }
}
