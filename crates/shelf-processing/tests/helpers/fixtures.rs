use image::{ImageFormat, Rgba, RgbaImage};
use shelf_core::{ArgbColor, DraftField, FormState, ImageHandle};
use shelf_processing::{CodecError, ImageSource};
use std::collections::HashMap;
use std::io::Cursor;

/// Photos served from memory, keyed by handle.
#[derive(Default)]
pub struct MapSource {
    images: HashMap<String, Vec<u8>>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, handle: &str, bytes: Vec<u8>) -> Self {
        self.images.insert(handle.to_string(), bytes);
        self
    }
}

impl ImageSource for MapSource {
    fn load(&self, handle: &ImageHandle) -> Result<Vec<u8>, CodecError> {
        self.images
            .get(handle.as_str())
            .cloned()
            .ok_or_else(|| CodecError::Load {
                handle: handle.clone(),
                reason: "no such photo".to_string(),
            })
    }
}

/// Solid-color PNG.
pub fn png(width: u32, height: u32) -> Vec<u8> {
    encode_png(RgbaImage::from_pixel(width, height, Rgba([20, 120, 200, 255])))
}

/// PNG full of high-frequency detail; re-encodes to a much larger JPEG than [`png`].
pub fn noisy_png(width: u32, height: u32) -> Vec<u8> {
    encode_png(RgbaImage::from_fn(width, height, |x, y| {
        let v = ((x * 7919 + y * 104_729) % 251) as u8;
        Rgba([v, v.wrapping_mul(3), v.wrapping_add(97), 255])
    }))
}

fn encode_png(img: RgbaImage) -> Vec<u8> {
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}

/// Source with two valid photos, `a.png` and `b.png`, and one undecodable `bad.png`.
pub fn default_source() -> MapSource {
    MapSource::new()
        .with("a.png", png(16, 16))
        .with("b.png", png(8, 24))
        .with("bad.png", b"definitely not an image".to_vec())
}

pub const RED: ArgbColor = ArgbColor(0xff11_2233);
pub const TRANSLUCENT: ArgbColor = ArgbColor(0x7f00_ff00);

/// A form that passes validation with the given photos.
pub fn filled_form(images: &[&str]) -> FormState {
    let mut form = FormState::new();
    form.set_field(DraftField::Name, "Shirt");
    form.set_field(DraftField::Category, "Apparel");
    form.set_field(DraftField::Price, "19.99");
    form.set_field(DraftField::Sizes, "S, M, L");
    form.add_color(RED);
    form.add_color(TRANSLUCENT);
    form.add_images(images.iter().map(|h| ImageHandle::from(*h)));
    form
}
