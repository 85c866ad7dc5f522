//! Motion Archery core crate.
//!
//! Skeletal frames in, draw commands and a score out. The gameplay pipeline
//! (floor calibration, handedness selection, draw/release state machine,
//! trajectory projection, ring scoring, round timer) lives in `game` and is
//! pure Rust; the wasm entry points below plus `game::render` adapt it to a
//! browser host that pushes sensor frames from JS.

use wasm_bindgen::prelude::*;

pub mod game;

use game::body::JointId;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Skeleton bone table (shared by rendering and any future pose logic).
// Joint pairs are (parent, child); bones with an untracked end are skipped
// when drawing, never aborting the frame.
// -----------------------------------------------------------------------------

pub const BONES: &[(JointId, JointId)] = &[
    // Torso
    (JointId::Head, JointId::Neck),
    (JointId::Neck, JointId::SpineShoulder),
    (JointId::SpineShoulder, JointId::SpineMid),
    (JointId::SpineMid, JointId::SpineBase),
    (JointId::SpineShoulder, JointId::ShoulderLeft),
    (JointId::SpineShoulder, JointId::ShoulderRight),
    (JointId::SpineBase, JointId::HipLeft),
    (JointId::SpineBase, JointId::HipRight),
    // Left arm
    (JointId::ShoulderLeft, JointId::ElbowLeft),
    (JointId::ElbowLeft, JointId::WristLeft),
    (JointId::WristLeft, JointId::HandLeft),
    (JointId::HandLeft, JointId::HandTipLeft),
    (JointId::WristLeft, JointId::ThumbLeft),
    // Right arm
    (JointId::ShoulderRight, JointId::ElbowRight),
    (JointId::ElbowRight, JointId::WristRight),
    (JointId::WristRight, JointId::HandRight),
    (JointId::HandRight, JointId::HandTipRight),
    (JointId::WristRight, JointId::ThumbRight),
    // Left leg
    (JointId::HipLeft, JointId::KneeLeft),
    (JointId::KneeLeft, JointId::AnkleLeft),
    (JointId::AnkleLeft, JointId::FootLeft),
    // Right leg
    (JointId::HipRight, JointId::KneeRight),
    (JointId::KneeRight, JointId::AnkleRight),
    (JointId::AnkleRight, JointId::FootRight),
];

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    game::start_archery_mode()
}
