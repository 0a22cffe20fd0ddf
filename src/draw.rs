// Window + software drawing utilities.
// What ends up on screen:
// 1) The depth image, stretched to fill the window.
// 2) The body/floor overlay blended over it.
// 3) Skeleton shapes (filled circles and thick-line quads) on top.

use crate::config::WindowConfig;
use crate::controls::{command_for, Command, WindowMode};
use crate::error::Error;
use crate::types::{FrameBuffer, Vec2};
use image::{Rgba, RgbaImage};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
    title: String,
    target_fps: usize,
}

fn open_window(title: &str, width: usize, height: usize, mode: WindowMode, fps: usize) -> Result<Window, Error> {
    let options = match mode {
        WindowMode::Windowed => WindowOptions { resize: true, ..WindowOptions::default() },
        WindowMode::Fullscreen => WindowOptions {
            borderless: true,
            topmost: true,
            ..WindowOptions::default()
        },
    };
    let mut window =
        Window::new(title, width, height, options).map_err(|e| Error::WindowInit(e.to_string()))?;
    window.set_target_fps(fps);
    Ok(window)
}

impl Drawer {
    /// Open the first window at the configured initial size.
    pub fn new(config: &WindowConfig) -> Result<Self, Error> {
        let window = open_window(
            &config.title,
            config.initial_width,
            config.initial_height,
            WindowMode::Windowed,
            config.target_fps,
        )?;
        Ok(Self { window, title: config.title.clone(), target_fps: config.target_fps })
    }

    /// Re-create the window for the new mode. minifb can't restyle a live window.
    pub fn set_mode(&mut self, mode: WindowMode, config: &WindowConfig) -> Result<(), Error> {
        let (width, height) = match mode {
            WindowMode::Windowed => (config.windowed_width, config.windowed_height),
            WindowMode::Fullscreen => (config.fullscreen_width, config.fullscreen_height),
        };
        self.window = open_window(&self.title, width, height, mode, self.target_fps)?;
        Ok(())
    }

    /// Push the pixels for this frame to the screen (also pumps window events).
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Current client-area size; never zero so the canvas stays drawable.
    pub fn size(&self) -> (usize, usize) {
        let (w, h) = self.window.get_size();
        (w.max(1), h.max(1))
    }

    /// Commands for keys that went down since the last `present`.
    pub fn commands(&self) -> Vec<Command> {
        let ctrl = self.window.is_key_down(Key::LeftCtrl) || self.window.is_key_down(Key::RightCtrl);
        self.window
            .get_keys_pressed(KeyRepeat::No)
            .into_iter()
            .filter_map(|key| command_for(key, ctrl))
            .collect()
    }
}

/* ---------- Software drawing: blending, image blit, circles, quads ---------- */

/// Source-over blend of one RGBA color onto a 0x00RRGGBB pixel.
#[inline]
pub fn blend(dst: u32, color: Rgba<u8>) -> u32 {
    let [r, g, b, a] = color.0;
    match a {
        0 => dst,
        255 => (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b),
        _ => {
            let a = u32::from(a);
            let inv = 255 - a;
            let mix = |src: u8, shift: u32| (u32::from(src) * a + ((dst >> shift) & 0xFF) * inv) / 255;
            (mix(r, 16) << 16) | (mix(g, 8) << 8) | mix(b, 0)
        }
    }
}

/// Blend a color onto the pixel at (x,y) if it is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: Rgba<u8>) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = blend(fb.pixels[idx], color);
}

/// Maps image/depth pixel space onto window pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

impl Scale {
    /// Stretch a `width`x`height` source over the whole framebuffer.
    pub fn fit(fb: &FrameBuffer, width: u32, height: u32) -> Self {
        Self {
            x: fb.width as f32 / width.max(1) as f32,
            y: fb.height as f32 / height.max(1) as f32,
        }
    }

    fn apply(self, p: Vec2) -> Vec2 {
        Vec2::new(p.x * self.x, p.y * self.y)
    }
}

/// Nearest-neighbour stretch of `image` over the whole framebuffer, alpha blended.
pub fn blit_scaled(fb: &mut FrameBuffer, image: &RgbaImage) {
    let (iw, ih) = image.dimensions();
    if iw == 0 || ih == 0 {
        return;
    }
    // Source column for every destination column, computed once.
    let cols: Vec<u32> = (0..fb.width)
        .map(|x| ((x as u64 * u64::from(iw)) / fb.width as u64) as u32)
        .collect();
    for y in 0..fb.height {
        let sy = ((y as u64 * u64::from(ih)) / fb.height as u64) as u32;
        let row = &mut fb.pixels[y * fb.width..(y + 1) * fb.width];
        for (dst, &sx) in row.iter_mut().zip(&cols) {
            *dst = blend(*dst, *image.get_pixel(sx, sy));
        }
    }
}

/// Filled circle given in source space; becomes an ellipse under a non-uniform scale.
pub fn fill_circle(fb: &mut FrameBuffer, center: Vec2, radius: f32, color: Rgba<u8>, scale: Scale) {
    if radius <= 0.0 || scale.x <= 0.0 || scale.y <= 0.0 {
        return;
    }
    let c = scale.apply(center);
    let (rx, ry) = (radius * scale.x, radius * scale.y);
    let (x0, x1) = ((c.x - rx).floor() as i32, (c.x + rx).ceil() as i32);
    let (y0, y1) = ((c.y - ry).floor() as i32, (c.y + ry).ceil() as i32);

    // Clip the scan box to the framebuffer before looping.
    let (x0, y0) = (x0.max(0), y0.max(0));
    let (x1, y1) = (x1.min(fb.width as i32 - 1), y1.min(fb.height as i32 - 1));

    for y in y0..=y1 {
        for x in x0..=x1 {
            // Test the pixel center back in source units.
            let dx = (x as f32 + 0.5 - c.x) / scale.x;
            let dy = (y as f32 + 0.5 - c.y) / scale.y;
            if dx * dx + dy * dy <= radius * radius {
                put_pixel(fb, x, y, color);
            }
        }
    }
}

#[inline]
fn cross(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Filled convex quad (either winding) given in source space.
pub fn fill_quad(fb: &mut FrameBuffer, corners: &[Vec2; 4], color: Rgba<u8>, scale: Scale) {
    let pts = corners.map(|p| scale.apply(p));
    let min_x = pts.iter().map(|p| p.x).fold(f32::INFINITY, f32::min).floor() as i32;
    let max_x = pts.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max).ceil() as i32;
    let min_y = pts.iter().map(|p| p.y).fold(f32::INFINITY, f32::min).floor() as i32;
    let max_y = pts.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max).ceil() as i32;

    // Clip the scan box to the framebuffer before looping.
    let (min_x, min_y) = (min_x.max(0), min_y.max(0));
    let (max_x, max_y) = (max_x.min(fb.width as i32 - 1), max_y.min(fb.height as i32 - 1));

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let sides = [0usize, 1, 2, 3].map(|i| cross(pts[i], pts[(i + 1) % 4], p));
            let inside = sides.iter().all(|&s| s >= 0.0) || sides.iter().all(|&s| s <= 0.0);
            if inside {
                put_pixel(fb, x, y, color);
            }
        }
    }
}
