// Appends the pixel position and depth of every tracked joint to a plain-text log.
// The file is opened and closed once per frame; nothing is buffered between frames.

use crate::error::Error;
use crate::types::{DepthFrame, Frame, Joint};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct FrameLogger {
    path: PathBuf,
    frame_number: u64,
}

/// Depth sample under a joint; 0 when there is no depth frame or the joint is off-image.
fn depth_at(depth: Option<&DepthFrame>, joint: &Joint) -> i16 {
    let Some(depth) = depth else { return 0 };
    let pos = joint.depth_position;
    let index = (pos.x + pos.y * depth.width as f32) as i64;
    usize::try_from(index)
        .ok()
        .and_then(|i| depth.data.get(i))
        .copied()
        .unwrap_or(0)
}

impl FrameLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), frame_number: 0 }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Frames seen so far (including ones that had no bodies to log).
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn log_frame(&mut self, frame: &Frame) -> Result<(), Error> {
        self.frame_number += 1;

        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut out = BufWriter::new(file);

        let bodies = frame.body.as_ref().map(|b| b.bodies.as_slice()).unwrap_or_default();
        for body in bodies.iter().filter(|b| b.joints_enabled) {
            writeln!(out, "Frame number: {}", self.frame_number)?;
            writeln!(out, "Body Id: {}", body.id)?;
            for joint in &body.joints {
                let pos = joint.depth_position;
                writeln!(
                    out,
                    "{} position: ({}, {}, {})",
                    joint.joint_type.name(),
                    pos.x,
                    pos.y,
                    depth_at(frame.depth.as_ref(), joint)
                )?;
            }
            writeln!(out)?;
        }

        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Body, BodyFrame, FloorInfo, HandPoses, JointStatus, JointType, Vec2};

    fn body(id: u8, joints_enabled: bool, positions: &[(JointType, f32, f32)]) -> Body {
        let joints = positions
            .iter()
            .map(|&(joint_type, x, y)| Joint {
                joint_type,
                depth_position: Vec2::new(x, y),
                status: JointStatus::Tracked,
            })
            .collect();
        Body { id, joints, hand_poses: HandPoses::default(), joints_enabled }
    }

    fn frame(bodies: Vec<Body>) -> Frame {
        Frame {
            depth: Some(DepthFrame { width: 4, height: 2, data: vec![0, 1, 2, 3, 10, 11, 12, 13] }),
            body: Some(BodyFrame {
                width: 4,
                height: 2,
                bodies,
                body_mask: vec![0; 8],
                floor: FloorInfo::default(),
            }),
        }
    }

    #[test]
    fn writes_one_block_per_enabled_body() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut logger = FrameLogger::new(&path);

        let bodies = vec![
            body(2, true, &[(JointType::Head, 1.0, 0.0), (JointType::Neck, 2.0, 1.0)]),
            body(3, false, &[(JointType::Head, 0.0, 0.0)]),
        ];
        logger.log_frame(&frame(bodies)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "Frame number: 1\nBody Id: 2\nHead position: (1, 0, 1)\nNeck position: (2, 1, 12)\n\n"
        );
    }

    #[test]
    fn appends_and_counts_every_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut logger = FrameLogger::new(&path);

        logger.log_frame(&frame(Vec::new())).unwrap();
        logger.log_frame(&Frame::default()).unwrap();
        logger
            .log_frame(&frame(vec![body(1, true, &[(JointType::LeftFoot, 3.0, 1.0)])]))
            .unwrap();

        assert_eq!(logger.frame_number(), 3);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "Frame number: 3\nBody Id: 1\nLeft Foot position: (3, 1, 13)\n\n");
    }

    #[test]
    fn off_image_joints_log_zero_depth() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut logger = FrameLogger::new(&path);

        let mut f = frame(vec![body(
            1,
            true,
            &[(JointType::Head, -5.0, -5.0), (JointType::RightHand, 2.5, 40.0)],
        )]);
        logger.log_frame(&f).unwrap();
        f.depth = None;
        logger.log_frame(&f).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Head position: (-5, -5, 0)"));
        assert!(text.contains("Right Hand position: (2.5, 40, 0)"));
        assert!(text.contains("Frame number: 2"));
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut logger = FrameLogger::new(dir.path());
        assert!(matches!(logger.log_frame(&Frame::default()), Err(Error::FrameLog(_))));
    }
}
