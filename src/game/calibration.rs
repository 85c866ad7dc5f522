//! Floor calibration.
//!
//! Before anything else the player must stand on a fixed floor target. Both
//! feet have to sit inside a ±0.3 m tolerance box around the target on all
//! three axes in the same frame; the head height measured at that moment is
//! latched by the session as the one-time calibration result.

use super::body::Vec3;

pub const FLOOR_CENTER_X: f64 = 0.0;
pub const FLOOR_CENTER_Y: f64 = -1.0;
pub const FLOOR_CENTER_Z: f64 = 2.5;
pub const FLOOR_TOLERANCE: f64 = 0.3;

/// Reserved "not positioned" sentinel for hosts that want the check as a
/// single number instead of the `FloorCheck` enum.
pub const NOT_POSITIONED: f64 = -10.0;

/// Directional text hint shown while the player is off the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloorHint {
    StepLeft,
    StepRight,
    StepForward,
    StepBack,
}

impl FloorHint {
    pub fn text(self) -> &'static str {
        match self {
            FloorHint::StepLeft => "Step to your left",
            FloorHint::StepRight => "Step to your right",
            FloorHint::StepForward => "Step forward",
            FloorHint::StepBack => "Step back",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FloorCheck {
    /// Both feet inside the box; carries the head height to latch.
    Positioned { head_y: f64 },
    /// Off target. `hint` is `None` only when head.x sits exactly on the
    /// target centerline, which yields no directional preference.
    Off { hint: Option<FloorHint> },
}

fn foot_in_box(foot: Vec3) -> bool {
    (foot.x - FLOOR_CENTER_X).abs() <= FLOOR_TOLERANCE
        && (foot.y - FLOOR_CENTER_Y).abs() <= FLOOR_TOLERANCE
        && (foot.z - FLOOR_CENTER_Z).abs() <= FLOOR_TOLERANCE
}

/// Check foot placement against the floor target. Deterministic: the hint
/// is picked from the sign pair of the head's x and z offsets from the
/// target center. A head exactly on the x centerline yields no hint at all,
/// whatever its depth.
pub fn check_floor_position(left_foot: Vec3, right_foot: Vec3, head: Vec3) -> FloorCheck {
    if foot_in_box(left_foot) && foot_in_box(right_foot) {
        return FloorCheck::Positioned { head_y: head.y };
    }
    let dx = head.x - FLOOR_CENTER_X;
    let dz = head.z - FLOOR_CENTER_Z;
    let hint = if dx > 0.0 {
        Some(if dz > 0.0 { FloorHint::StepLeft } else { FloorHint::StepBack })
    } else if dx < 0.0 {
        Some(if dz > 0.0 { FloorHint::StepForward } else { FloorHint::StepRight })
    } else {
        None
    };
    FloorCheck::Off { hint }
}
