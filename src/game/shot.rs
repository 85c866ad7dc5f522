//! Arrow pickup and bow draw/release state machine.
//!
//! One tracker instance lives in the session and is stepped once per frame
//! with the active hand's current state plus the previous frame's closed flag
//! it keeps internally, so arrow-in-hand, hand-closed and attempt-live can
//! never drift into an inconsistent combination.

use super::body::{HandState, Vec3};
use super::scoring::DartBoard;
use super::trajectory::{draw_power, impact_point, MIN_POWER};

/// Hand positions of an active draw: where the hand closed and where it is
/// now. Zero sentinel while no attempt is live.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShotAttempt {
    pub initial: Vec3,
    pub current: Vec3,
}

impl ShotAttempt {
    pub fn begin(hand: Vec3) -> Self {
        Self { initial: hand, current: hand }
    }

    pub fn charging(&self) -> bool {
        draw_power(self.initial, self.current) > MIN_POWER
    }
}

/// What one frame of the state machine produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShotEvent {
    /// No arrow and no pickup gesture this frame.
    Idle,
    /// Pickup gesture satisfied; the player now holds an arrow.
    PickedUp,
    /// Arrow in hand, hand open, no draw active yet.
    Ready,
    /// Open-to-closed edge: the string hand just nocked.
    DrawStarted,
    /// Held closed and pulled backward; live projection available.
    Charging { impact: Vec3, pending: i64 },
    /// Held closed but not pulled back; board rests, no projection.
    Holding,
    /// Closed-to-open edge: shot released. `impact` is `None` for a release
    /// with no draw power (a fumble scoring zero).
    Released { impact: Option<Vec3>, points: i64 },
}

/// Pickup predicate: hand raised to or above the neck and at least as far
/// forward in depth. Pure position test, re-evaluated every frame while there
/// is no arrow; no debounce.
pub fn pickup_gesture(hand: Vec3, neck: Vec3) -> bool {
    hand.z >= neck.z && hand.y >= neck.y
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ShotTracker {
    pub has_arrow: bool,
    /// Previous frame's derived closed flag (edge detection).
    hand_closed: bool,
    pub attempt: ShotAttempt,
}

impl ShotTracker {
    /// Step the machine for one frame. `hand` is the drawing hand's position,
    /// `aim_shoulder`/`aim_hand` the opposite arm used for aiming.
    pub fn update(
        &mut self,
        hand: Vec3,
        hand_state: HandState,
        neck: Vec3,
        aim_shoulder: Vec3,
        aim_hand: Vec3,
        board: &DartBoard,
    ) -> ShotEvent {
        if !self.has_arrow {
            if pickup_gesture(hand, neck) {
                self.has_arrow = true;
                self.hand_closed = false;
                self.attempt = ShotAttempt::default();
                return ShotEvent::PickedUp;
            }
            return ShotEvent::Idle;
        }

        match (hand_state, self.hand_closed) {
            (HandState::Closed, false) => {
                self.attempt = ShotAttempt::begin(hand);
                self.hand_closed = true;
                ShotEvent::DrawStarted
            }
            (HandState::Closed, true) => {
                self.attempt.current = hand;
                // impact_point returns None exactly when the attempt carries
                // no draw power, which is the resting-board case.
                match impact_point(
                    self.attempt.initial,
                    self.attempt.current,
                    aim_shoulder,
                    aim_hand,
                    board,
                ) {
                    Some(impact) => ShotEvent::Charging { impact, pending: board.score(impact) },
                    None => ShotEvent::Holding,
                }
            }
            (HandState::Open, true) => {
                let impact = impact_point(
                    self.attempt.initial,
                    self.attempt.current,
                    aim_shoulder,
                    aim_hand,
                    board,
                );
                let points = impact.map(|p| board.score(p)).unwrap_or(0);
                self.has_arrow = false;
                self.hand_closed = false;
                self.attempt = ShotAttempt::default();
                ShotEvent::Released { impact, points }
            }
            // Unknown / Lasso while drawn: hold the last known draw rather
            // than treating classifier noise as a release.
            _ => {
                if self.hand_closed { ShotEvent::Holding } else { ShotEvent::Ready }
            }
        }
    }

    /// Restart semantics: drop the arrow and any live attempt.
    pub fn reset(&mut self) {
        *self = ShotTracker::default();
    }
}
