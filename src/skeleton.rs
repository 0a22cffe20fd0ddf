// Joint markers and bone segments for tracked bodies, as plain shapes in
// depth-image pixel space. `draw.rs` turns them into window pixels.

use crate::types::{Body, HandPose, Joint, JointStatus, JointType, Vec2};
use image::Rgba;

/// Body frames are scaled relative to a 120-pixel-wide stream.
pub const REFERENCE_WIDTH: f32 = 120.0;

pub const JOINT_RADIUS: f32 = 1.0;
pub const SHADOW_RADIUS: f32 = 0.5;
pub const LINE_THICKNESS: f32 = 0.5;
pub const GRIP_SCALE: f32 = 1.5;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const GRAY: Rgba<u8> = Rgba([128, 128, 128, 255]);
const JOINT_COLOR: Rgba<u8> = Rgba([0x00, 0xFF, 0x00, 0xFF]);
const GRIP_COLOR: Rgba<u8> = Rgba([0x00, 0xAA, 0xFF, 0xFF]);

/// Joint pairs joined by a bone, head down through arms, spine and legs.
pub const BONES: [(JointType, JointType); 18] = [
    (JointType::Head, JointType::Neck),
    (JointType::Neck, JointType::ShoulderSpine),
    (JointType::ShoulderSpine, JointType::LeftShoulder),
    (JointType::LeftShoulder, JointType::LeftElbow),
    (JointType::LeftElbow, JointType::LeftWrist),
    (JointType::LeftWrist, JointType::LeftHand),
    (JointType::ShoulderSpine, JointType::RightShoulder),
    (JointType::RightShoulder, JointType::RightElbow),
    (JointType::RightElbow, JointType::RightWrist),
    (JointType::RightWrist, JointType::RightHand),
    (JointType::ShoulderSpine, JointType::MidSpine),
    (JointType::MidSpine, JointType::BaseSpine),
    (JointType::BaseSpine, JointType::LeftHip),
    (JointType::LeftHip, JointType::LeftKnee),
    (JointType::LeftKnee, JointType::LeftFoot),
    (JointType::BaseSpine, JointType::RightHip),
    (JointType::RightHip, JointType::RightKnee),
    (JointType::RightKnee, JointType::RightFoot),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
    pub color: Rgba<u8>,
}

/// A line with width, stored as the quad it covers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThickLine {
    pub corners: [Vec2; 4],
    pub color: Rgba<u8>,
}

impl ThickLine {
    pub fn new(p1: Vec2, p2: Vec2, color: Rgba<u8>, thickness: f32) -> Self {
        let direction = p2 - p1;
        let length = direction.length();
        // Zero-length bone: collapse to a point instead of dividing by zero.
        let normal = if length > 0.0 {
            Vec2::new(-direction.y / length, direction.x / length)
        } else {
            Vec2::default()
        };
        let offset = normal * (thickness / 2.0);

        Self {
            corners: [p1 + offset, p2 + offset, p2 - offset, p1 - offset],
            color,
        }
    }
}

/// Scale factor for a body stream of the given width.
pub fn joint_scale(frame_width: usize) -> f32 {
    frame_width as f32 / REFERENCE_WIDTH
}

fn is_gripping(body: &Body, joint_type: JointType) -> bool {
    match joint_type {
        JointType::LeftHand => body.hand_poses.left_hand == HandPose::Grip,
        JointType::RightHand => body.hand_poses.right_hand == HandPose::Grip,
        _ => false,
    }
}

/// Shapes for every body in the current frame, drawn back to front:
/// bone shadows, joint shadows, bones, joints.
#[derive(Default)]
pub struct Skeleton {
    pub circles: Vec<Circle>,
    pub circle_shadows: Vec<Circle>,
    pub bone_lines: Vec<ThickLine>,
    pub bone_shadows: Vec<ThickLine>,
}

impl Skeleton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.circles.clear();
        self.circle_shadows.clear();
        self.bone_lines.clear();
        self.bone_shadows.clear();
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.circles.is_empty() && self.bone_lines.is_empty()
    }

    pub fn add_body(&mut self, body: &Body, scale: f32) {
        if body.joints.is_empty() {
            return;
        }

        for joint in &body.joints {
            self.add_joint(body, joint, scale);
        }
        for &(a, b) in BONES.iter() {
            self.add_bone(body, a, b, scale);
        }
    }

    fn add_joint(&mut self, body: &Body, joint: &Joint, scale: f32) {
        if joint.status == JointStatus::NotTracked {
            return;
        }

        let mut radius = JOINT_RADIUS * scale;
        let mut color = JOINT_COLOR;
        let mut shadow_color = BLACK;
        if is_gripping(body, joint.joint_type) {
            radius *= GRIP_SCALE;
            color = GRIP_COLOR;
            shadow_color = WHITE;
        }

        let center = joint.depth_position;
        self.circles.push(Circle { center, radius, color });
        self.circle_shadows.push(Circle {
            center,
            radius: radius + SHADOW_RADIUS * scale,
            color: shadow_color,
        });
    }

    fn add_bone(&mut self, body: &Body, a: JointType, b: JointType, scale: f32) {
        let (Some(j1), Some(j2)) = (body.joint(a), body.joint(b)) else {
            return;
        };
        if j1.status == JointStatus::NotTracked || j2.status == JointStatus::NotTracked {
            return;
        }

        let mut color = WHITE;
        let mut thickness = LINE_THICKNESS * scale;
        if j1.status == JointStatus::LowConfidence || j2.status == JointStatus::LowConfidence {
            color = GRAY;
            thickness *= 0.5;
        }

        let (p1, p2) = (j1.depth_position, j2.depth_position);
        self.bone_lines.push(ThickLine::new(p1, p2, color, thickness));
        let shadow_thickness = thickness + SHADOW_RADIUS * scale * 2.0;
        self.bone_shadows.push(ThickLine::new(p1, p2, BLACK, shadow_thickness));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HandPoses;

    fn body_with(status: impl Fn(JointType) -> JointStatus, hand_poses: HandPoses) -> Body {
        let joints = JointType::ALL
            .iter()
            .enumerate()
            .map(|(i, &joint_type)| Joint {
                joint_type,
                depth_position: Vec2::new(10.0 + i as f32, 20.0 + 2.0 * i as f32),
                status: status(joint_type),
            })
            .collect();
        Body { id: 1, joints, hand_poses, joints_enabled: true }
    }

    #[test]
    fn fully_tracked_body_emits_every_shape() {
        let body = body_with(|_| JointStatus::Tracked, HandPoses::default());
        let mut skeleton = Skeleton::new();
        skeleton.add_body(&body, 2.0);

        assert_eq!(skeleton.circles.len(), JointType::COUNT);
        assert_eq!(skeleton.circle_shadows.len(), JointType::COUNT);
        assert_eq!(skeleton.bone_lines.len(), BONES.len());
        assert_eq!(skeleton.bone_shadows.len(), BONES.len());
        assert!(skeleton.bone_lines.iter().all(|l| l.color == WHITE));
        assert!(skeleton.circles.iter().all(|c| c.radius == 2.0));
        assert!(skeleton.circle_shadows.iter().all(|c| c.radius == 3.0));
    }

    #[test]
    fn untracked_endpoints_drop_their_bones() {
        let body = body_with(
            |t| match t {
                JointType::LeftElbow | JointType::Neck => JointStatus::NotTracked,
                _ => JointStatus::Tracked,
            },
            HandPoses::default(),
        );
        let mut skeleton = Skeleton::new();
        skeleton.add_body(&body, 1.0);

        // Head-Neck, Neck-ShoulderSpine, LeftShoulder-LeftElbow, LeftElbow-LeftWrist
        assert_eq!(skeleton.bone_lines.len(), BONES.len() - 4);
        assert_eq!(skeleton.circles.len(), JointType::COUNT - 2);

        let untracked = [body.joint(JointType::LeftElbow).unwrap(), body.joint(JointType::Neck).unwrap()];
        for line in &skeleton.bone_lines {
            for joint in untracked {
                let p = joint.depth_position;
                let touches = line.corners.iter().any(|c| (c.x - p.x).abs() < 0.5 && (c.y - p.y).abs() < 0.5);
                assert!(!touches, "bone touches untracked {:?}", joint.joint_type);
            }
        }
    }

    #[test]
    fn low_confidence_bones_are_thin_and_gray() {
        let body = body_with(
            |t| match t {
                JointType::Head => JointStatus::LowConfidence,
                _ => JointStatus::Tracked,
            },
            HandPoses::default(),
        );
        let mut skeleton = Skeleton::new();
        skeleton.add_body(&body, 2.0);

        let head_bone = skeleton.bone_lines[0];
        assert_eq!(head_bone.color, GRAY);
        let width = (head_bone.corners[0] - head_bone.corners[3]).length();
        assert!((width - LINE_THICKNESS * 2.0 * 0.5).abs() < 1e-5);

        let shadow = skeleton.bone_shadows[0];
        assert_eq!(shadow.color, BLACK);
        let shadow_width = (shadow.corners[0] - shadow.corners[3]).length();
        assert!((shadow_width - (0.5 + SHADOW_RADIUS * 2.0 * 2.0)).abs() < 1e-5);

        assert_eq!(skeleton.bone_lines[1].color, WHITE);
    }

    #[test]
    fn gripping_hand_gets_larger_recolored_marker() {
        let body = body_with(
            |_| JointStatus::Tracked,
            HandPoses { left_hand: HandPose::Grip, right_hand: HandPose::Unknown },
        );
        let scale = 3.0;
        let mut skeleton = Skeleton::new();
        skeleton.add_body(&body, scale);

        let left = JointType::LeftHand as usize;
        let right = JointType::RightHand as usize;
        assert_eq!(skeleton.circles[left].radius, JOINT_RADIUS * scale * 1.5);
        assert_eq!(skeleton.circles[left].color, GRIP_COLOR);
        assert_eq!(skeleton.circle_shadows[left].color, WHITE);
        assert_eq!(skeleton.circles[right].radius, JOINT_RADIUS * scale);
        assert_eq!(skeleton.circle_shadows[right].color, BLACK);
    }

    #[test]
    fn shadows_are_concentric() {
        let body = body_with(|_| JointStatus::Tracked, HandPoses::default());
        let mut skeleton = Skeleton::new();
        skeleton.add_body(&body, 1.0);
        for (c, s) in skeleton.circles.iter().zip(&skeleton.circle_shadows) {
            assert_eq!(c.center, s.center);
            assert!(s.radius > c.radius);
        }
    }

    #[test]
    fn thick_line_offsets_along_normal() {
        let line = ThickLine::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), WHITE, 4.0);
        assert_eq!(
            line.corners,
            [Vec2::new(0.0, 2.0), Vec2::new(10.0, 2.0), Vec2::new(10.0, -2.0), Vec2::new(0.0, -2.0)]
        );

        let point = ThickLine::new(Vec2::new(3.0, 3.0), Vec2::new(3.0, 3.0), WHITE, 4.0);
        assert!(point.corners.iter().all(|c| *c == Vec2::new(3.0, 3.0)));
    }

    #[test]
    fn clear_drops_previous_frame() {
        let body = body_with(|_| JointStatus::Tracked, HandPoses::default());
        let mut skeleton = Skeleton::new();
        skeleton.add_body(&body, 1.0);
        assert!(!skeleton.is_empty());
        skeleton.clear();
        assert!(skeleton.is_empty());
        assert!(skeleton.bone_shadows.is_empty() && skeleton.circle_shadows.is_empty());
    }

    #[test]
    fn scale_is_relative_to_120_pixels() {
        assert_eq!(joint_scale(120), 1.0);
        assert_eq!(joint_scale(480), 4.0);
    }
}
