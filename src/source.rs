// Where frames come from.
// `FrameSource` is the seam a depth-camera SDK binding plugs into; the viewer only
// ever talks to the trait. `SyntheticSource` fakes a camera: a wall, a floor and
// one person swaying and waving, so the whole pipeline runs without hardware.

use crate::error::Error;
use crate::types::{
    Body, BodyFrame, DepthFrame, FloorInfo, Frame, HandPose, HandPoses, Joint, JointStatus,
    JointType, Plane, Vec2,
};

/// Which joints the tracker reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SkeletonProfile {
    #[default]
    Full,
    Basic,
}

impl SkeletonProfile {
    pub fn next(self) -> Self {
        match self {
            SkeletonProfile::Full => SkeletonProfile::Basic,
            SkeletonProfile::Basic => SkeletonProfile::Full,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SkeletonProfile::Full => "full",
            SkeletonProfile::Basic => "basic",
        }
    }

    /// Joints the Basic profile leaves out.
    fn reports(self, joint_type: JointType) -> bool {
        match self {
            SkeletonProfile::Full => true,
            SkeletonProfile::Basic => !matches!(
                joint_type,
                JointType::Neck | JointType::MidSpine | JointType::LeftWrist | JointType::RightWrist
            ),
        }
    }
}

/// Default tracking features for new bodies. Each level includes the ones before it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BodyFeatures {
    Segmentation,
    Joints,
    #[default]
    HandPoses,
}

impl BodyFeatures {
    pub fn next(self) -> Self {
        match self {
            BodyFeatures::Segmentation => BodyFeatures::Joints,
            BodyFeatures::Joints => BodyFeatures::HandPoses,
            BodyFeatures::HandPoses => BodyFeatures::Segmentation,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BodyFeatures::Segmentation => "Seg",
            BodyFeatures::Joints => "Seg+Body",
            BodyFeatures::HandPoses => "Seg+Body+Hand",
        }
    }
}

pub trait FrameSource {
    /// Pump the source once. If a frame is ready, `on_frame` runs before this returns.
    fn update(&mut self, on_frame: &mut dyn FnMut(&Frame) -> Result<(), Error>) -> Result<(), Error>;

    fn registration_enabled(&self) -> bool;
    fn enable_registration(&mut self, enabled: bool);

    fn mirroring_enabled(&self) -> bool;
    fn enable_mirroring(&mut self, enabled: bool);

    fn skeleton_profile(&self) -> SkeletonProfile;
    fn set_skeleton_profile(&mut self, profile: SkeletonProfile);

    fn default_body_features(&self) -> BodyFeatures;
    fn set_default_body_features(&mut self, features: BodyFeatures);
}

/* ------------------------------ synthetic camera ------------------------------ */

const BODY_ID: u8 = 1;
const WALL_MM: f32 = 3500.0;
const BODY_MM: f32 = 2000.0;
const FLOOR_V: f32 = 0.84; // rows below this (normalized) are floor
const LIMB_HALF_WIDTH: f32 = 0.025; // normalized, relative to frame width
const HEAD_RADIUS: f32 = 0.045;

/// Standing pose: (dx from body center, y), both normalized to the frame.
fn rest_pose(joint_type: JointType) -> (f32, f32) {
    match joint_type {
        JointType::Head => (0.0, 0.18),
        JointType::Neck => (0.0, 0.26),
        JointType::ShoulderSpine => (0.0, 0.30),
        JointType::LeftShoulder => (-0.08, 0.31),
        JointType::LeftElbow => (-0.12, 0.43),
        JointType::LeftWrist => (-0.14, 0.52),
        JointType::LeftHand => (-0.15, 0.56),
        JointType::RightShoulder => (0.08, 0.31),
        JointType::RightElbow => (0.12, 0.43),
        JointType::RightWrist => (0.14, 0.52),
        JointType::RightHand => (0.15, 0.56),
        JointType::MidSpine => (0.0, 0.42),
        JointType::BaseSpine => (0.0, 0.54),
        JointType::LeftHip => (-0.05, 0.56),
        JointType::LeftKnee => (-0.06, 0.72),
        JointType::LeftFoot => (-0.07, 0.88),
        JointType::RightHip => (0.05, 0.56),
        JointType::RightKnee => (0.06, 0.72),
        JointType::RightFoot => (0.07, 0.88),
    }
}

/// How far a joint lifts (normalized) when the right arm is fully raised.
fn wave_lift(joint_type: JointType) -> f32 {
    match joint_type {
        JointType::RightElbow => 0.08,
        JointType::RightWrist => 0.22,
        JointType::RightHand => 0.28,
        _ => 0.0,
    }
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len2 = ab.x * ab.x + ab.y * ab.y;
    let t = if len2 > 0.0 {
        (((p.x - a.x) * ab.x + (p.y - a.y) * ab.y) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (p - (a + ab * t)).length()
}

pub struct SyntheticSource {
    width: usize,
    height: usize,
    tick: u64,
    registration: bool,
    mirroring: bool,
    profile: SkeletonProfile,
    features: BodyFeatures,
}

impl SyntheticSource {
    pub fn new(width: usize, height: usize) -> Self {
        log::info!("synthetic depth source {}x{}", width, height);
        Self {
            width,
            height,
            tick: 0,
            registration: false,
            mirroring: false,
            profile: SkeletonProfile::default(),
            features: BodyFeatures::default(),
        }
    }

    /// Pixel shift applied while registration is on.
    fn registration_shift(&self) -> f32 {
        if self.registration { (self.width / 40) as f32 } else { 0.0 }
    }

    fn to_pixels(&self, u: f32, v: f32) -> Vec2 {
        let mut x = u * self.width as f32 + self.registration_shift();
        if self.mirroring {
            x = (self.width as f32 - 1.0) - x;
        }
        Vec2::new(x, v * self.height as f32)
    }

    fn joint_status(&self, joint_type: JointType) -> JointStatus {
        if self.features == BodyFeatures::Segmentation || !self.profile.reports(joint_type) {
            return JointStatus::NotTracked;
        }
        let feet_uncertain = (self.tick / 45) % 3 == 2;
        match joint_type {
            JointType::LeftFoot | JointType::RightFoot if feet_uncertain => JointStatus::LowConfidence,
            _ => JointStatus::Tracked,
        }
    }

    fn pose(&self) -> Body {
        let t = self.tick as f32;
        let center = 0.5 + 0.15 * (t * 0.03).sin();
        let wave = ((t * 0.1).sin() + 1.0) / 2.0;

        let joints = JointType::ALL
            .iter()
            .map(|&joint_type| {
                let (dx, v) = rest_pose(joint_type);
                Joint {
                    joint_type,
                    depth_position: self.to_pixels(center + dx, v - wave * wave_lift(joint_type)),
                    status: self.joint_status(joint_type),
                }
            })
            .collect();

        let hand_poses = if self.features == BodyFeatures::HandPoses {
            let gripping = (self.tick / 60) % 2 == 1;
            HandPoses {
                left_hand: if gripping { HandPose::Grip } else { HandPose::Unknown },
                right_hand: if wave > 0.9 { HandPose::Grip } else { HandPose::Unknown },
            }
        } else {
            HandPoses::default()
        };

        Body {
            id: BODY_ID,
            joints,
            hand_poses,
            joints_enabled: self.features != BodyFeatures::Segmentation,
        }
    }

    /// Render wall, floor and the body silhouette around `body`'s joints.
    pub fn next_frame(&mut self) -> Frame {
        let (w, h) = (self.width, self.height);
        let body = self.pose();

        let limb = LIMB_HALF_WIDTH * w as f32;
        let head_radius = HEAD_RADIUS * w as f32;
        let floor_row = FLOOR_V * h as f32;
        let pos = |t: JointType| body.joints[t as usize].depth_position;
        let segments: Vec<(Vec2, Vec2)> = crate::skeleton::BONES
            .iter()
            .map(|&(a, b)| (pos(a), pos(b)))
            .collect();
        let head = pos(JointType::Head);

        let mut depth = Vec::with_capacity(w * h);
        let mut body_mask = Vec::with_capacity(w * h);
        let mut floor_mask = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let on_body = (p - head).length() <= head_radius
                    || segments.iter().any(|&(a, b)| distance_to_segment(p, a, b) <= limb);
                let on_floor = p.y >= floor_row;

                let mm = if on_body {
                    BODY_MM + 40.0 * ((p.x * 0.3).sin() + (p.y * 0.2).cos())
                } else if on_floor {
                    // Floor comes toward the camera as rows approach the bottom.
                    WALL_MM - 2000.0 * (p.y - floor_row) / (h as f32 - floor_row).max(1.0)
                } else {
                    WALL_MM + 2.0 * p.y
                };
                depth.push(mm as i16);
                body_mask.push(if on_body { BODY_ID } else { 0 });
                floor_mask.push(u8::from(on_floor && !on_body));
            }
        }

        self.tick += 1;
        Frame {
            depth: Some(DepthFrame { width: w, height: h, data: depth }),
            body: Some(BodyFrame {
                width: w,
                height: h,
                bodies: vec![body],
                body_mask,
                floor: FloorInfo {
                    floor_mask,
                    floor_plane: Some(Plane { a: 0.0, b: 1.0, c: 0.0, d: 1000.0 }),
                },
            }),
        }
    }
}

impl FrameSource for SyntheticSource {
    fn update(&mut self, on_frame: &mut dyn FnMut(&Frame) -> Result<(), Error>) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::Source(format!(
                "synthetic source has no pixels ({}x{})",
                self.width, self.height
            )));
        }
        let frame = self.next_frame();
        on_frame(&frame)
    }

    fn registration_enabled(&self) -> bool {
        self.registration
    }

    fn enable_registration(&mut self, enabled: bool) {
        self.registration = enabled;
    }

    fn mirroring_enabled(&self) -> bool {
        self.mirroring
    }

    fn enable_mirroring(&mut self, enabled: bool) {
        self.mirroring = enabled;
    }

    fn skeleton_profile(&self) -> SkeletonProfile {
        self.profile
    }

    fn set_skeleton_profile(&mut self, profile: SkeletonProfile) {
        self.profile = profile;
    }

    fn default_body_features(&self) -> BodyFeatures {
        self.features
    }

    fn set_default_body_features(&mut self, features: BodyFeatures) {
        self.features = features;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_frame(source: &mut SyntheticSource) -> Frame {
        let mut got = None;
        source
            .update(&mut |frame| {
                got = Some(frame.clone());
                Ok(())
            })
            .unwrap();
        got.expect("callback ran")
    }

    #[test]
    fn profile_and_features_cycle() {
        assert_eq!(SkeletonProfile::Full.next(), SkeletonProfile::Basic);
        assert_eq!(SkeletonProfile::Basic.next(), SkeletonProfile::Full);
        assert_eq!(BodyFeatures::Segmentation.next(), BodyFeatures::Joints);
        assert_eq!(BodyFeatures::Joints.next(), BodyFeatures::HandPoses);
        assert_eq!(BodyFeatures::HandPoses.next(), BodyFeatures::Segmentation);
    }

    #[test]
    fn frames_are_consistently_sized() {
        let mut source = SyntheticSource::new(64, 48);
        let frame = one_frame(&mut source);
        let depth = frame.depth.unwrap();
        let body = frame.body.unwrap();
        assert_eq!(depth.data.len(), 64 * 48);
        assert_eq!(body.body_mask.len(), 64 * 48);
        assert_eq!(body.floor.floor_mask.len(), 64 * 48);
        assert_eq!(body.bodies.len(), 1);
        assert_eq!(body.bodies[0].joints.len(), JointType::COUNT);
        assert!(body.body_mask.contains(&BODY_ID));
        assert!(body.floor.floor_mask.contains(&1));
        // Body pixels are never also floor pixels.
        assert!(body.body_mask.iter().zip(&body.floor.floor_mask).all(|(&b, &f)| b == 0 || f == 0));
    }

    #[test]
    fn mirroring_flips_joints() {
        let mut plain = SyntheticSource::new(100, 80);
        let mut mirrored = SyntheticSource::new(100, 80);
        mirrored.enable_mirroring(true);
        let a = one_frame(&mut plain).body.unwrap().bodies[0].joints[0].depth_position;
        let b = one_frame(&mut mirrored).body.unwrap().bodies[0].joints[0].depth_position;
        assert!((a.x + b.x - 99.0).abs() < 1e-3);
        assert_eq!(a.y, b.y);
    }

    #[test]
    fn basic_profile_drops_joints() {
        let mut source = SyntheticSource::new(60, 40);
        source.set_skeleton_profile(SkeletonProfile::Basic);
        let body = one_frame(&mut source).body.unwrap().bodies.remove(0);
        assert_eq!(body.joint(JointType::Neck).unwrap().status, JointStatus::NotTracked);
        assert_eq!(body.joint(JointType::LeftWrist).unwrap().status, JointStatus::NotTracked);
        assert_eq!(body.joint(JointType::Head).unwrap().status, JointStatus::Tracked);
    }

    #[test]
    fn feature_levels_gate_joints_and_hands() {
        let mut source = SyntheticSource::new(60, 40);
        source.set_default_body_features(BodyFeatures::Segmentation);
        let body = one_frame(&mut source).body.unwrap().bodies.remove(0);
        assert!(!body.joints_enabled);
        assert!(body.joints.iter().all(|j| j.status == JointStatus::NotTracked));

        source.set_default_body_features(BodyFeatures::Joints);
        source.tick = 61; // left hand would be gripping with hand poses on
        let body = one_frame(&mut source).body.unwrap().bodies.remove(0);
        assert!(body.joints_enabled);
        assert_eq!(body.hand_poses, HandPoses::default());

        source.set_default_body_features(BodyFeatures::HandPoses);
        source.tick = 61;
        let body = one_frame(&mut source).body.unwrap().bodies.remove(0);
        assert_eq!(body.hand_poses.left_hand, HandPose::Grip);
    }

    #[test]
    fn empty_source_errors() {
        let mut source = SyntheticSource::new(0, 10);
        assert!(matches!(source.update(&mut |_| Ok(())), Err(Error::Source(_))));
    }

    #[test]
    fn callback_errors_propagate() {
        let mut source = SyntheticSource::new(8, 8);
        let result = source.update(&mut |_| Err(Error::Source("boom".into())));
        assert!(result.is_err());
    }
}
