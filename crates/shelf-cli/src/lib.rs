//! Terminal front end for the product form.

use clap::Args;
use shelf_core::{ArgbColor, DraftField, ImageHandle};
use shelf_processing::{color_summary, image_summary, FormEvent, FormView, Toast};
use std::io::Write;
use std::sync::Mutex;

/// Product fields and photos given on the command line.
#[derive(Debug, Clone, Args)]
pub struct SaveArgs {
    /// Product name
    #[arg(long)]
    pub name: Option<String>,
    /// Product category
    #[arg(long)]
    pub category: Option<String>,
    /// Price, e.g. 19.99
    #[arg(long)]
    pub price: Option<String>,
    /// Discount, e.g. 0.25
    #[arg(long = "offer")]
    pub offer_percentage: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Comma separated sizes, e.g. "S, M, L"
    #[arg(long)]
    pub sizes: Option<String>,
    /// Color swatch as 0xAARRGGBB, #RRGGBB, ... (repeatable)
    #[arg(long = "color", value_name = "ARGB")]
    pub colors: Vec<ArgbColor>,
    /// Photo path or file:// URI (repeatable)
    #[arg(long = "image", value_name = "PATH")]
    pub images: Vec<String>,
}

impl SaveArgs {
    /// The form events a user filling in these values and pressing save would produce.
    pub fn into_events(self) -> Vec<FormEvent> {
        let fields = [
            (DraftField::Name, self.name),
            (DraftField::Category, self.category),
            (DraftField::Price, self.price),
            (DraftField::OfferPercentage, self.offer_percentage),
            (DraftField::Description, self.description),
            (DraftField::Sizes, self.sizes),
        ];

        let mut events: Vec<FormEvent> = fields
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| FormEvent::FieldEdited(field, v)))
            .collect();
        events.extend(self.colors.into_iter().map(FormEvent::ColorChosen));
        events.push(FormEvent::ImagesChosen(
            self.images.into_iter().map(ImageHandle::from).collect(),
        ));
        events.push(FormEvent::SaveRequested);
        events
    }
}

/// Writes view instructions as plain text lines.
pub struct TerminalView<W> {
    out: Mutex<W>,
}

impl TerminalView<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn line(&self, text: &str) {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(out, "{}", text) {
            tracing::warn!(error = %e, "Failed to write to terminal");
        }
    }
}

impl<W: Write + Send> FormView for TerminalView<W> {
    fn set_loading(&self, loading: bool) {
        if loading {
            self.line("Saving product...");
        }
    }

    fn render_colors(&self, colors: &[ArgbColor]) {
        self.line(&format!("Selected colors: {}", color_summary(colors)));
    }

    fn render_images(&self, images: &[ImageHandle]) {
        self.line(&image_summary(images));
    }

    fn notify(&self, toast: Toast) {
        self.line(toast.message());
    }
}

/// Initialize tracing for CLI binaries. Logs go to stderr; stdout carries the form output.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
