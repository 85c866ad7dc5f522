//! Dominant-hand selection.
//!
//! Two fixed screen buttons; hovering one with the matching hand while that
//! hand is closed commits the choice. The commit is sticky until an explicit
//! restart: a spurious closed-hand-in-region frame is a valid, irreversible
//! selection (deliberate simplicity tradeoff, no undo state exists).

use super::body::{HandState, Rect};

pub const LEFT_BUTTON: Rect = Rect::new(90.0, 70.0, 100.0, 50.0);
pub const RIGHT_BUTTON: Rect = Rect::new(450.0, 70.0, 100.0, 50.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Handedness {
    #[default]
    Unselected,
    Left,
    Right,
}

impl Handedness {
    pub fn selected(self) -> bool {
        self != Handedness::Unselected
    }
}

/// Whether a projected hand point arms its button (hover only, no commit).
pub fn armed(button: Rect, hand_screen: (f64, f64)) -> bool {
    button.contains(hand_screen.0, hand_screen.1)
}

/// Evaluate one frame of the selector. Returns the committed choice, or
/// `Unselected` when neither hand is simultaneously inside its region and
/// closed. The left hand can only commit Left, the right only Right.
pub fn select(
    left_screen: (f64, f64),
    left_state: HandState,
    right_screen: (f64, f64),
    right_state: HandState,
) -> Handedness {
    if armed(LEFT_BUTTON, left_screen) && left_state == HandState::Closed {
        Handedness::Left
    } else if armed(RIGHT_BUTTON, right_screen) && right_state == HandState::Closed {
        Handedness::Right
    } else {
        Handedness::Unselected
    }
}
