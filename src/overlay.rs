// Body-id mask + floor mask → translucent RGBA overlay drawn over the depth image.

use crate::color::{body_color, FLOOR_COLOR, TRANSPARENT};
use image::RgbaImage;

#[derive(Default)]
pub struct OverlayRenderer {
    buffer: Option<RgbaImage>,
}

impl OverlayRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.buffer.as_ref()
    }

    /// Recolor every pixel: a body id wins over the floor flag.
    /// Returns false (and drops the old overlay) when the masks don't fit the frame.
    pub fn update(&mut self, width: usize, height: usize, body_mask: &[u8], floor_mask: &[u8]) -> bool {
        let len = width * height;
        if body_mask.len() != len || floor_mask.len() != len {
            log::warn!(
                "overlay skipped: masks {}/{} bytes for {}x{}",
                body_mask.len(),
                floor_mask.len(),
                width,
                height
            );
            self.buffer = None;
            return false;
        }

        let (w, h) = (width as u32, height as u32);
        if self.buffer.as_ref().is_some_and(|b| b.dimensions() != (w, h)) {
            self.buffer = None;
        }
        let image = self.buffer.get_or_insert_with(|| RgbaImage::new(w, h));

        for ((pixel, &body_id), &is_floor) in image.pixels_mut().zip(body_mask).zip(floor_mask) {
            *pixel = if body_id != 0 {
                body_color(body_id)
            } else if is_floor != 0 {
                FLOOR_COLOR
            } else {
                TRANSPARENT
            };
        }
        true
    }

    /// Blank the current overlay so a stale body mask is never shown.
    pub fn clear(&mut self) {
        if let Some(image) = self.buffer.as_mut() {
            image.fill(0);
        }
    }
}
