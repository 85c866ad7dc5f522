//! Round timer.
//!
//! Wall-clock countdown: the host passes `performance.now()` milliseconds into
//! every call, nothing here reads a clock or spawns a timer. Remaining time is
//! always recomputed from the stored deadline, so dropped frames and
//! frame-rate swings cannot bend it.

pub const ROUND_DURATION_MS: f64 = 30_000.0;
/// Milliseconds of extra round time bought per point scored.
pub const TIME_BONUS_MS_PER_POINT: f64 = 1000.0 / 3.0;
/// Display seed shown before the countdown is armed. Deliberately distinct
/// from the 30 s round duration.
pub const IDLE_DISPLAY_SECS: f64 = 10.0;

#[derive(Clone, Copy, Debug, Default)]
pub struct RoundTimer {
    deadline_ms: Option<f64>,
}

impl RoundTimer {
    /// Start (or restart) the countdown: deadline = now + 30 s.
    pub fn arm(&mut self, now_ms: f64) {
        self.deadline_ms = Some(now_ms + ROUND_DURATION_MS);
    }

    /// Drop back to the unarmed state (restart semantics re-seed the display).
    pub fn reset(&mut self) {
        self.deadline_ms = None;
    }

    pub fn armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Extend the deadline by the score-time bonus. Negative points (a miss
    /// penalty) shorten the round.
    pub fn extend_for_score(&mut self, points: i64) {
        if let Some(d) = self.deadline_ms.as_mut() {
            *d += points as f64 * TIME_BONUS_MS_PER_POINT;
        }
    }

    /// Seconds left, floating point. May dip below zero for the frame or two
    /// before the round-over branch takes effect. Unarmed timers report the
    /// idle display seed.
    pub fn remaining_secs(&self, now_ms: f64) -> f64 {
        match self.deadline_ms {
            Some(d) => (d - now_ms) / 1000.0,
            None => IDLE_DISPLAY_SECS,
        }
    }

    pub fn expired(&self, now_ms: f64) -> bool {
        self.armed() && self.remaining_secs(now_ms) <= 0.0
    }
}
