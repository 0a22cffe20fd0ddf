// Turns each frame from the source into what the window shows, and logs joints.

use crate::depth::DepthRenderer;
use crate::draw::{blit_scaled, fill_circle, fill_quad, Scale};
use crate::error::Error;
use crate::logger::FrameLogger;
use crate::overlay::OverlayRenderer;
use crate::skeleton::{joint_scale, Skeleton};
use crate::types::{BodyFrame, Frame, FrameBuffer};
use std::time::Instant;

/// Weight of the newest frame in the smoothed frame duration.
const FPS_FACTOR: f64 = 0.02;

/// Exponentially smoothed frame rate.
#[derive(Default)]
pub struct FpsCounter {
    frame_duration: f64, // seconds
    last: Option<Instant>,
}

impl FpsCounter {
    pub fn tick_at(&mut self, now: Instant) -> Option<f64> {
        let last = self.last.replace(now)?;
        let duration = now.duration_since(last).as_secs_f64();
        self.frame_duration = duration * FPS_FACTOR + self.frame_duration * (1.0 - FPS_FACTOR);
        (self.frame_duration > 0.0).then(|| 1.0 / self.frame_duration)
    }

    pub fn frame_duration(&self) -> f64 {
        self.frame_duration
    }
}

pub struct BodyVisualizer {
    depth: DepthRenderer,
    overlay: OverlayRenderer,
    skeleton: Skeleton,
    logger: FrameLogger,
    fps: FpsCounter,
}

impl BodyVisualizer {
    pub fn new(logger: FrameLogger) -> Self {
        Self {
            depth: DepthRenderer::new(),
            overlay: OverlayRenderer::new(),
            skeleton: Skeleton::new(),
            logger,
            fps: FpsCounter::default(),
        }
    }

    pub fn logger(&self) -> &FrameLogger {
        &self.logger
    }

    #[cfg(test)]
    fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    #[cfg(test)]
    fn depth(&self) -> &DepthRenderer {
        &self.depth
    }

    #[cfg(test)]
    fn overlay(&self) -> &OverlayRenderer {
        &self.overlay
    }

    /// Called once per frame the source delivers.
    pub fn on_frame_ready(&mut self, frame: &Frame) -> Result<(), Error> {
        if let Some(depth) = &frame.depth {
            self.depth.update(depth.width, depth.height, &depth.data);
        }
        self.process_bodies(frame.body.as_ref());
        self.logger.log_frame(frame)?;

        if let Some(fps) = self.fps.tick_at(Instant::now()) {
            log::debug!("FPS: {:3.1} ({:3.4} ms)", fps, self.fps.frame_duration() * 1000.0);
        }
        Ok(())
    }

    fn process_bodies(&mut self, body_frame: Option<&BodyFrame>) {
        self.skeleton.clear();

        let Some(body_frame) = body_frame.filter(|b| b.width != 0 && b.height != 0) else {
            self.overlay.clear();
            return;
        };

        let scale = joint_scale(body_frame.width);
        for body in &body_frame.bodies {
            self.skeleton.add_body(body, scale);
        }

        if let Some(p) = body_frame.floor.floor_plane {
            log::debug!("Floor plane: [{}, {}, {}, {}]", p.a, p.b, p.c, p.d);
        }

        let valid = self.overlay.update(
            body_frame.width,
            body_frame.height,
            &body_frame.body_mask,
            &body_frame.floor.floor_mask,
        );
        if !valid {
            // No overlay to size the shapes against.
            self.skeleton.clear();
        }
    }

    /// Depth image, overlay, then bone shadows, joint shadows, bones, joints.
    pub fn draw_to(&self, fb: &mut FrameBuffer) {
        if let Some(image) = self.depth.image() {
            blit_scaled(fb, image);
        }

        let Some(overlay) = self.overlay.image() else {
            return;
        };
        blit_scaled(fb, overlay);

        let scale = Scale::fit(fb, overlay.width(), overlay.height());
        for bone in &self.skeleton.bone_shadows {
            fill_quad(fb, &bone.corners, bone.color, scale);
        }
        for c in &self.skeleton.circle_shadows {
            fill_circle(fb, c.center, c.radius, c.color, scale);
        }
        for bone in &self.skeleton.bone_lines {
            fill_quad(fb, &bone.corners, bone.color, scale);
        }
        for c in &self.skeleton.circles {
            fill_circle(fb, c.center, c.radius, c.color, scale);
        }
    }
}
