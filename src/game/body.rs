//! Skeletal frame data model.
//!
//! A `BodyFrame` is the per-frame input pushed by the host: 25 named joints
//! with camera-space positions and tracking confidence, plus per-hand
//! open/closed state and screen-clipping flags. The core never retains joints
//! across frames except through copies it takes explicitly (shot attempts).

// --- Camera-Space Vectors ----------------------------------------------------

/// Depth values are clamped to this before any divide-by-z so a sensor glitch
/// reporting zero or negative depth cannot invert the projection.
pub const DEPTH_EPSILON: f64 = 0.1;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Same point with z floored to `DEPTH_EPSILON` (never negative/zero
    /// entering projection math).
    pub fn clamped_depth(self) -> Self {
        Self { z: self.z.max(DEPTH_EPSILON), ..self }
    }
}

// --- Joints ------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TrackingState {
    #[default]
    NotTracked,
    Inferred,
    Tracked,
}

impl TrackingState {
    /// Decode the wire value used by the flat-array bridge. Unknown codes map
    /// to `NotTracked` so a garbled frame degrades to "skip", not a panic.
    pub fn from_wire(v: f32) -> Self {
        match v as i32 {
            2 => TrackingState::Tracked,
            1 => TrackingState::Inferred,
            _ => TrackingState::NotTracked,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Joint {
    pub position: Vec3,
    pub tracking: TrackingState,
}

impl Joint {
    pub fn tracked(&self) -> bool {
        self.tracking == TrackingState::Tracked
    }
}

/// The 25 sensor joints, in wire order (index = flat-array slot).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum JointId {
    SpineBase = 0,
    SpineMid = 1,
    Neck = 2,
    Head = 3,
    ShoulderLeft = 4,
    ElbowLeft = 5,
    WristLeft = 6,
    HandLeft = 7,
    ShoulderRight = 8,
    ElbowRight = 9,
    WristRight = 10,
    HandRight = 11,
    HipLeft = 12,
    KneeLeft = 13,
    AnkleLeft = 14,
    FootLeft = 15,
    HipRight = 16,
    KneeRight = 17,
    AnkleRight = 18,
    FootRight = 19,
    SpineShoulder = 20,
    HandTipLeft = 21,
    ThumbLeft = 22,
    HandTipRight = 23,
    ThumbRight = 24,
}

pub const JOINT_COUNT: usize = 25;

// --- Hand State --------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HandState {
    #[default]
    Unknown,
    Open,
    Closed,
    Lasso,
}

impl HandState {
    pub fn from_wire(v: u8) -> Self {
        match v {
            1 => HandState::Open,
            2 => HandState::Closed,
            3 => HandState::Lasso,
            _ => HandState::Unknown,
        }
    }
}

// --- Body Frame --------------------------------------------------------------

/// Clipped-edges bit flags (which screen edges cut the body off).
pub const CLIP_RIGHT: u8 = 0b0001;
pub const CLIP_LEFT: u8 = 0b0010;
pub const CLIP_TOP: u8 = 0b0100;
pub const CLIP_BOTTOM: u8 = 0b1000;

#[derive(Clone, Debug)]
pub struct BodyFrame {
    pub joints: [Joint; JOINT_COUNT],
    pub left_hand: HandState,
    pub right_hand: HandState,
    pub clipped_edges: u8,
    pub is_tracked: bool,
}

impl Default for BodyFrame {
    fn default() -> Self {
        Self {
            joints: [Joint::default(); JOINT_COUNT],
            left_hand: HandState::Unknown,
            right_hand: HandState::Unknown,
            clipped_edges: 0,
            is_tracked: false,
        }
    }
}

impl BodyFrame {
    pub fn joint(&self, id: JointId) -> &Joint {
        &self.joints[id as usize]
    }

    pub fn position(&self, id: JointId) -> Vec3 {
        self.joints[id as usize].position
    }

    /// Directed nudge for a partially clipped body. Side edges take priority
    /// over the vertical ones; a fully in-frame body yields `None`.
    pub fn clip_hint(&self) -> Option<&'static str> {
        if self.clipped_edges == 0 {
            return None;
        }
        Some(if self.clipped_edges & CLIP_RIGHT != 0 {
            "Move to your left"
        } else if self.clipped_edges & CLIP_LEFT != 0 {
            "Move to your right"
        } else {
            "Step back from the sensor"
        })
    }

    /// Decode from the flat f32 layout the JS bridge pushes: 25 joints in wire
    /// order, 4 slots each (x, y, z, tracking). Returns `None` on a
    /// wrong-length slice; the caller warns and drops the frame.
    pub fn from_wire(
        data: &[f32],
        left_hand: u8,
        right_hand: u8,
        clipped_edges: u8,
        is_tracked: bool,
    ) -> Option<Self> {
        if data.len() != JOINT_COUNT * 4 {
            return None;
        }
        let mut joints = [Joint::default(); JOINT_COUNT];
        for (i, j) in joints.iter_mut().enumerate() {
            *j = Joint {
                position: Vec3::new(
                    data[i * 4] as f64,
                    data[i * 4 + 1] as f64,
                    data[i * 4 + 2] as f64,
                ),
                tracking: TrackingState::from_wire(data[i * 4 + 3]),
            };
        }
        Some(Self {
            joints,
            left_hand: HandState::from_wire(left_hand),
            right_hand: HandState::from_wire(right_hand),
            clipped_edges,
            is_tracked,
        })
    }
}

// --- Screen Projection -------------------------------------------------------

/// Pinhole projection of camera-space positions onto canvas pixels. Stands in
/// for the sensor SDK coordinate mapper: a pure function the session owns, so
/// hit-testing works identically in native tests and in the browser.
#[derive(Clone, Copy, Debug)]
pub struct ScreenMap {
    pub width: f64,
    pub height: f64,
    /// Pixels per meter at one meter of depth.
    pub focal: f64,
}

impl ScreenMap {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, focal: 380.0 }
    }

    /// Map a camera-space point to screen pixels. Depth is clamped first so
    /// the divide is always well-defined.
    pub fn project(&self, p: Vec3) -> (f64, f64) {
        let p = p.clamped_depth();
        (
            self.width / 2.0 + p.x * self.focal / p.z,
            self.height / 2.0 - p.y * self.focal / p.z,
        )
    }
}

/// Axis-aligned screen rectangle used for button hit-testing.
#[derive(Clone, Copy, Debug)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }
}
