// Core types shared by the frame source, the renderers and the logger.

/// Window-sized pixel buffer handed to minifb every tick.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the window is (pixels)
    pub height: usize,     // how tall the window is (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Match the window size; keeps the allocation when nothing changed.
    pub fn resize(&mut self, width: usize, height: usize) {
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.pixels = vec![0u32; width * height];
        }
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }
}

/// A point in depth-image pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Skeletal landmarks, in the order the tracker reports them.
/// A body's joint list is indexed by `JointType as usize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JointType {
    Head,
    ShoulderSpine,
    LeftShoulder,
    LeftElbow,
    LeftHand,
    RightShoulder,
    RightElbow,
    RightHand,
    MidSpine,
    BaseSpine,
    LeftHip,
    LeftKnee,
    LeftFoot,
    RightHip,
    RightKnee,
    RightFoot,
    LeftWrist,
    RightWrist,
    Neck,
}

impl JointType {
    pub const COUNT: usize = 19;

    pub const ALL: [JointType; JointType::COUNT] = [
        JointType::Head,
        JointType::ShoulderSpine,
        JointType::LeftShoulder,
        JointType::LeftElbow,
        JointType::LeftHand,
        JointType::RightShoulder,
        JointType::RightElbow,
        JointType::RightHand,
        JointType::MidSpine,
        JointType::BaseSpine,
        JointType::LeftHip,
        JointType::LeftKnee,
        JointType::LeftFoot,
        JointType::RightHip,
        JointType::RightKnee,
        JointType::RightFoot,
        JointType::LeftWrist,
        JointType::RightWrist,
        JointType::Neck,
    ];

    /// Human-readable name, as written to the joint log.
    pub fn name(self) -> &'static str {
        match self {
            JointType::Head => "Head",
            JointType::Neck => "Neck",
            JointType::ShoulderSpine => "Spine Top",
            JointType::LeftShoulder => "Left Shoulder",
            JointType::LeftElbow => "Left Elbow",
            JointType::LeftWrist => "Left Wrist",
            JointType::LeftHand => "Left Hand",
            JointType::RightShoulder => "Right Shoulder",
            JointType::RightElbow => "Right Elbow",
            JointType::RightWrist => "Right Wrist",
            JointType::RightHand => "Right Hand",
            JointType::MidSpine => "Spine Middle",
            JointType::BaseSpine => "Spine Base",
            JointType::LeftHip => "Left Hip",
            JointType::LeftKnee => "Left Knee",
            JointType::LeftFoot => "Left Foot",
            JointType::RightHip => "Right Hip",
            JointType::RightKnee => "Right Knee",
            JointType::RightFoot => "Right Foot",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JointStatus {
    NotTracked,
    LowConfidence,
    Tracked,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Joint {
    pub joint_type: JointType,
    pub depth_position: Vec2, // pixel coordinates in the depth image
    pub status: JointStatus,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HandPose {
    #[default]
    Unknown,
    Grip,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HandPoses {
    pub left_hand: HandPose,
    pub right_hand: HandPose,
}

/// One detected person. Lives for one frame.
#[derive(Clone, Debug)]
pub struct Body {
    pub id: u8, // 0 is reserved for "no body" in the body mask
    pub joints: Vec<Joint>,
    pub hand_poses: HandPoses,
    pub joints_enabled: bool,
}

impl Body {
    /// Joint by type; `None` when the tracker sent a short list.
    pub fn joint(&self, joint_type: JointType) -> Option<&Joint> {
        self.joints.get(joint_type as usize)
    }
}

#[derive(Clone, Debug)]
pub struct DepthFrame {
    pub width: usize,
    pub height: usize,
    pub data: Vec<i16>, // row-major, millimeters (0 = invalid)
}

/// Floor plane equation `a*x + b*y + c*z + d = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
}

#[derive(Clone, Debug, Default)]
pub struct FloorInfo {
    pub floor_mask: Vec<u8>, // one byte per pixel, nonzero = floor
    pub floor_plane: Option<Plane>,
}

#[derive(Clone, Debug)]
pub struct BodyFrame {
    pub width: usize,
    pub height: usize,
    pub bodies: Vec<Body>,
    pub body_mask: Vec<u8>, // one byte per pixel, body id or 0
    pub floor: FloorInfo,
}

/// Everything the source delivers for one tick. A missing part is an invalid frame.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub depth: Option<DepthFrame>,
    pub body: Option<BodyFrame>,
}
