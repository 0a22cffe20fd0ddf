// Depth samples → grayscale RGBA image.

use image::{Rgba, RgbaImage};

/// Owns the grayscale depth image; reallocated only when the stream resolution changes.
#[derive(Default)]
pub struct DepthRenderer {
    buffer: Option<RgbaImage>,
}

impl DepthRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently rendered depth image, if any frame has arrived yet.
    pub fn image(&self) -> Option<&RgbaImage> {
        self.buffer.as_ref()
    }

    fn ensure_size(&mut self, width: u32, height: u32) -> &mut RgbaImage {
        if self.buffer.as_ref().is_some_and(|b| b.dimensions() != (width, height)) {
            self.buffer = None;
        }
        self.buffer.get_or_insert_with(|| RgbaImage::new(width, height))
    }

    /// Convert one frame in place. Gray level is `sample mod 255`, so depths
    /// 255 mm apart share a shade. A malformed frame drops the old image.
    pub fn update(&mut self, width: usize, height: usize, samples: &[i16]) {
        if samples.len() != width * height {
            log::warn!(
                "depth frame skipped: {} samples for {}x{}",
                samples.len(),
                width,
                height
            );
            self.buffer = None;
            return;
        }

        let image = self.ensure_size(width as u32, height as u32);
        for (pixel, &depth) in image.pixels_mut().zip(samples) {
            let value = (depth % 255) as u8;
            *pixel = Rgba([value, value, value, 255]);
        }
    }
}
