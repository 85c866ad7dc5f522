//! Parabolic trajectory projection.
//!
//! Converts an active draw (initial vs current hand position) plus the aiming
//! arm's shoulder/hand pair into a 3D impact point on the target plane. The
//! draw hand pulls the string; the opposite arm aims the bow, so callers pass
//! the shoulder/hand of the arm opposite the selected handedness.

use super::body::Vec3;
use super::scoring::DartBoard;

/// Tuned scale converting draw depth (meters pulled back) to launch speed.
pub const VELOCITY_SCALE: f64 = 47.0;
/// Forward-hand-to-eye-line offset added to the launch height.
pub const EYE_LINE_OFFSET: f64 = 1.0;
pub const GRAVITY: f64 = 9.8;

/// Floor under the draw power before it is used as a divisor. A hand that has
/// barely moved gives denominators near zero otherwise.
pub const MIN_POWER: f64 = 1e-3;
/// Floor under the aim arm's shoulder-to-hand depth difference.
pub const MIN_AIM_DEPTH: f64 = 1e-3;

/// Draw power of an attempt: how far back (in depth) the string hand has been
/// pulled since it closed. Positive only while charging.
pub fn draw_power(initial: Vec3, current: Vec3) -> f64 {
    current.z - initial.z
}

/// Aim angles (vertical alpha, horizontal beta) in radians, from the aiming
/// arm's hand-minus-shoulder displacement against its depth difference.
pub fn aim_angles(aim_shoulder: Vec3, aim_hand: Vec3) -> (f64, f64) {
    let dz = (aim_shoulder.z - aim_hand.z).max(MIN_AIM_DEPTH);
    let alpha = ((aim_hand.y - aim_shoulder.y) / dz).atan();
    let beta = ((aim_hand.x - aim_shoulder.x) / dz).atan();
    (alpha, beta)
}

/// Project the impact point on the target plane, or `None` when the attempt
/// carries no positive draw power (the state machine must not ask for a
/// projection then; the guard keeps the divide safe regardless).
///
/// Standard projectile-range math with two independent angular components
/// sharing one launch speed:
///   x = z tan(beta)
///   y = y0 + z tan(alpha)/cos(beta) - g z^2 / (2 v0^2 cos^2(alpha) cos^2(beta))
pub fn impact_point(
    initial: Vec3,
    current: Vec3,
    aim_shoulder: Vec3,
    aim_hand: Vec3,
    board: &DartBoard,
) -> Option<Vec3> {
    let power = draw_power(initial, current);
    if power <= MIN_POWER {
        return None;
    }
    let (alpha, beta) = aim_angles(aim_shoulder, aim_hand);
    let y0 = initial.y + EYE_LINE_OFFSET;
    let v0 = VELOCITY_SCALE * power;
    let z = board.center.z;

    let x = z * beta.tan();
    let drop = 0.5 * GRAVITY * z * z
        / (v0 * v0 * alpha.cos() * alpha.cos() * beta.cos() * beta.cos());
    let y = y0 + z * alpha.tan() / beta.cos() - drop;
    Some(Vec3::new(x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> DartBoard {
        DartBoard::default()
    }

    #[test]
    fn no_power_yields_no_projection() {
        let p = Vec3::new(0.0, 0.0, 18.0);
        assert!(impact_point(p, p, Vec3::ZERO, Vec3::ZERO, &board()).is_none());
        // Pushing forward (negative power) is not a draw either.
        let fwd = Vec3::new(0.0, 0.0, 17.5);
        assert!(impact_point(p, fwd, Vec3::ZERO, Vec3::ZERO, &board()).is_none());
    }

    #[test]
    fn straight_level_draw_lands_near_center() {
        // One meter of draw on axis with a level aim arm: expect only a
        // small gravity drop from the +1 eye-line launch height.
        let initial = Vec3::new(0.0, 0.0, 18.0);
        let current = Vec3::new(0.0, 0.0, 19.0);
        let shoulder = Vec3::new(0.2, 0.4, 2.4);
        let hand = Vec3::new(0.2, 0.4, 1.8); // same x/y => zero aim angles
        let hit = impact_point(initial, current, shoulder, hand, &board()).unwrap();
        assert!(hit.x.abs() < 1e-9);
        let expected_y = 1.0 - 0.5 * GRAVITY * 400.0 / (47.0 * 47.0);
        assert!((hit.y - expected_y).abs() < 1e-9);
        assert!((hit.z - 20.0).abs() < 1e-9);
        assert_eq!(board().score(hit), 10);
    }

    #[test]
    fn deterministic_for_fixed_inputs() {
        let initial = Vec3::new(0.1, -0.2, 17.6);
        let current = Vec3::new(0.1, -0.1, 18.3);
        let shoulder = Vec3::new(-0.2, 0.35, 2.3);
        let hand = Vec3::new(-0.05, 0.5, 1.7);
        let a = impact_point(initial, current, shoulder, hand, &board()).unwrap();
        let b = impact_point(initial, current, shoulder, hand, &board()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn horizontal_aim_shifts_impact_sideways() {
        let initial = Vec3::new(0.0, 0.0, 18.0);
        let current = Vec3::new(0.0, 0.0, 19.0);
        let shoulder = Vec3::new(0.0, 0.4, 2.4);
        let right = Vec3::new(0.3, 0.4, 1.8);
        let hit = impact_point(initial, current, shoulder, right, &board()).unwrap();
        assert!(hit.x > 0.0);
        let left = Vec3::new(-0.3, 0.4, 1.8);
        let hit = impact_point(initial, current, shoulder, left, &board()).unwrap();
        assert!(hit.x < 0.0);
    }

    #[test]
    fn weak_draw_drops_far_below_a_strong_one() {
        let initial = Vec3::new(0.0, 0.0, 18.0);
        let shoulder = Vec3::new(0.0, 0.4, 2.4);
        let hand = Vec3::new(0.0, 0.4, 1.8);
        let weak =
            impact_point(initial, Vec3::new(0.0, 0.0, 18.2), shoulder, hand, &board()).unwrap();
        let strong =
            impact_point(initial, Vec3::new(0.0, 0.0, 19.0), shoulder, hand, &board()).unwrap();
        assert!(weak.y < strong.y);
    }

    #[test]
    fn aim_arm_with_degenerate_depth_is_guarded() {
        // Hand reported at the same depth as (or behind) the shoulder: the
        // depth floor keeps the angle finite instead of dividing by zero.
        let shoulder = Vec3::new(0.0, 0.4, 2.0);
        let hand = Vec3::new(0.1, 0.5, 2.0);
        let (alpha, beta) = aim_angles(shoulder, hand);
        assert!(alpha.is_finite() && beta.is_finite());
    }
}
