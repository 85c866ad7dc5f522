//! Target board and ring scoring.

use super::body::Vec3;

/// Scoring board: fixed game-relative center and five concentric ring radii,
/// innermost ring worth the most.
#[derive(Clone, Copy, Debug)]
pub struct DartBoard {
    pub center: Vec3,
    pub radii: [f64; 5],
}

impl Default for DartBoard {
    fn default() -> Self {
        Self {
            center: Vec3::new(0.0, 0.0, 20.0),
            radii: [0.5, 1.0, 1.5, 2.0, 2.5],
        }
    }
}

/// Ring scores, paired with `DartBoard::radii` (distance below radii[i]
/// earns SCORES[i]). A complete miss is a deliberate penalty: wide misses
/// cost more than near-misses earn.
pub const RING_SCORES: [i64; 5] = [10, 5, 3, 2, 1];
pub const MISS_SCORE: i64 = -5;

impl DartBoard {
    /// Score an impact point. Distance is planar (x/y only; both points sit
    /// on the target plane), tiers are half-open: a hit at exactly radii[i]
    /// belongs to the next ring out.
    pub fn score(&self, impact: Vec3) -> i64 {
        let dx = impact.x - self.center.x;
        let dy = impact.y - self.center.y;
        let d = (dx * dx + dy * dy).sqrt();
        for (i, &r) in self.radii.iter().enumerate() {
            if d < r {
                return RING_SCORES[i];
            }
        }
        MISS_SCORE
    }
}
