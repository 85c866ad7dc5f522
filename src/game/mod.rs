//! Archery gameplay core.
//!
//! One `GameSession` value owns all cross-frame state and is stepped by a
//! single `update(frame, now_ms)` call per incoming skeletal frame, returning
//! the draw commands for that frame. The wasm plumbing at the bottom of this
//! file feeds it real sensor frames from JS and replays the commands onto a
//! canvas; native tests feed it synthetic frames directly.

use wasm_bindgen::prelude::*;
use web_sys::window;

pub mod body;
pub mod calibration;
pub mod draw;
pub mod handedness;
pub mod render;
pub mod scoring;
pub mod shot;
pub mod timer;
pub mod trajectory;

use body::{BodyFrame, HandState, JointId, Rect, ScreenMap, Vec3};
use calibration::{check_floor_position, FloorCheck, FLOOR_CENTER_X, FLOOR_CENTER_Y, FLOOR_CENTER_Z};
use draw::DrawCmd;
use handedness::{Handedness, LEFT_BUTTON, RIGHT_BUTTON};
use scoring::DartBoard;
use shot::{ShotEvent, ShotTracker};
use timer::RoundTimer;

// --- Fixed Screen Regions ----------------------------------------------------

pub const CANVAS_WIDTH: f64 = 640.0;
pub const CANVAS_HEIGHT: f64 = 480.0;

/// Restart button shown on the round-over screen.
pub const RESTART_BUTTON: Rect = Rect::new(270.0, 200.0, 100.0, 50.0);

// --- Phase -------------------------------------------------------------------

/// Which sub-pipeline runs this frame. Derived from session state, never
/// stored, so no unintended flag combination is reachable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Calibrating,
    SelectingHand,
    Playing,
    RoundOver,
}

// --- Session -----------------------------------------------------------------

pub struct GameSession {
    total_score: i64,
    pending_score: i64,
    shot: ShotTracker,
    calibrated_head_y: Option<f64>,
    handedness: Handedness,
    timer: RoundTimer,
    board: DartBoard,
    screen: ScreenMap,
    status: String,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            total_score: 0,
            pending_score: 0,
            shot: ShotTracker::default(),
            calibrated_head_y: None,
            handedness: Handedness::Unselected,
            timer: RoundTimer::default(),
            board: DartBoard::default(),
            screen: ScreenMap::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            status: "Stand on the target to start".to_string(),
        }
    }

    // Bound display values for UI consumption (plain getters; any data
    // binding is the host's business).

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn total_score(&self) -> i64 {
        self.total_score
    }

    pub fn pending_score(&self) -> i64 {
        self.pending_score
    }

    pub fn time_remaining(&self, now_ms: f64) -> f64 {
        self.timer.remaining_secs(now_ms)
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    pub fn calibrated(&self) -> bool {
        self.calibrated_head_y.is_some()
    }

    pub fn phase(&self, now_ms: f64) -> Phase {
        if self.calibrated_head_y.is_none() {
            Phase::Calibrating
        } else if !self.handedness.selected() {
            Phase::SelectingHand
        } else if self.timer.expired(now_ms) {
            Phase::RoundOver
        } else {
            Phase::Playing
        }
    }

    /// Process one skeletal frame to completion. Single-threaded and
    /// frame-synchronous: all state transitions, scoring and draw emission
    /// happen here before the next frame is accepted.
    pub fn update(&mut self, frame: &BodyFrame, now_ms: f64) -> Vec<DrawCmd> {
        let mut cmds = Vec::new();

        if !frame.is_tracked {
            // Sensor lost the body: freeze at last state, render status only.
            self.status = "No player in view".to_string();
            cmds.push(DrawCmd::text(self.status.clone(), 200.0, 240.0, 24.0, "#ffd166"));
            return cmds;
        }
        if let Some(hint) = frame.clip_hint() {
            cmds.push(DrawCmd::text(hint, 210.0, 30.0, 18.0, "#ff8866"));
        }

        match self.phase(now_ms) {
            Phase::Calibrating => self.update_calibration(frame, &mut cmds),
            Phase::SelectingHand => self.update_hand_selection(frame, now_ms, &mut cmds),
            Phase::Playing => self.update_play(frame, now_ms, &mut cmds),
            Phase::RoundOver => self.update_round_over(frame, now_ms, &mut cmds),
        }
        cmds
    }

    // --- Calibration phase ---------------------------------------------------

    fn update_calibration(&mut self, frame: &BodyFrame, cmds: &mut Vec<DrawCmd>) {
        let left = frame.joint(JointId::FootLeft);
        let right = frame.joint(JointId::FootRight);
        let head = frame.joint(JointId::Head);
        if !left.tracked() || !right.tracked() || !head.tracked() {
            self.status = "Hold still, finding your feet".to_string();
            cmds.push(DrawCmd::text(self.status.clone(), 180.0, 240.0, 22.0, "#ffd166"));
            return;
        }

        // Floor target marker so the player can see where to stand.
        let target = Vec3::new(FLOOR_CENTER_X, FLOOR_CENTER_Y, FLOOR_CENTER_Z);
        let (tx, ty) = self.screen.project(target);
        cmds.push(DrawCmd::circle("#44cc88", tx, ty, 40.0, false));
        for foot in [left, right] {
            let (fx, fy) = self.screen.project(foot.position);
            cmds.push(DrawCmd::circle("#ffffff", fx, fy, 6.0, true));
        }

        match check_floor_position(left.position, right.position, head.position) {
            FloorCheck::Positioned { head_y } => {
                self.calibrated_head_y = Some(head_y);
                self.status = "In position! Pick your bow hand".to_string();
            }
            FloorCheck::Off { hint } => {
                self.status = match hint {
                    Some(h) => h.text().to_string(),
                    None => "Find the target circle".to_string(),
                };
            }
        }
        cmds.push(DrawCmd::text(self.status.clone(), 180.0, 60.0, 22.0, "#ffd166"));
    }

    // --- Handedness phase ----------------------------------------------------

    fn update_hand_selection(&mut self, frame: &BodyFrame, now_ms: f64, cmds: &mut Vec<DrawCmd>) {
        let left = frame.joint(JointId::HandLeft);
        let right = frame.joint(JointId::HandRight);
        let left_screen = self.screen.project(left.position);
        let right_screen = self.screen.project(right.position);

        cmds.push(DrawCmd::Image {
            handle: "btn-left-hand",
            x: LEFT_BUTTON.x,
            y: LEFT_BUTTON.y,
            w: LEFT_BUTTON.w,
            h: LEFT_BUTTON.h,
        });
        cmds.push(DrawCmd::Image {
            handle: "btn-right-hand",
            x: RIGHT_BUTTON.x,
            y: RIGHT_BUTTON.y,
            w: RIGHT_BUTTON.w,
            h: RIGHT_BUTTON.h,
        });
        for (sx, sy) in [left_screen, right_screen] {
            cmds.push(DrawCmd::circle("#88bbff", sx, sy, 10.0, true));
        }

        // Untracked hands cannot arm a button; test only the tracked ones.
        let left_state = if left.tracked() { frame.left_hand } else { HandState::Unknown };
        let right_state = if right.tracked() { frame.right_hand } else { HandState::Unknown };
        let pick = handedness::select(left_screen, left_state, right_screen, right_state);
        if pick.selected() {
            self.handedness = pick;
            // The round clock starts the moment the choice commits.
            self.timer.arm(now_ms);
            self.status = "Raise a hand above your head to grab an arrow".to_string();
        } else {
            self.status = "Close a fist over a button to choose your bow hand".to_string();
        }
        cmds.push(DrawCmd::text(self.status.clone(), 100.0, 160.0, 20.0, "#ffd166"));
    }

    // --- Play phase ----------------------------------------------------------

    /// Drawing hand and aim arm for the committed handedness. The dominant
    /// hand pulls the string, the opposite arm aims the bow.
    fn active_sides(&self) -> (JointId, JointId, JointId) {
        match self.handedness {
            Handedness::Right => (JointId::HandRight, JointId::ShoulderLeft, JointId::HandLeft),
            // Left and (unreachable here) Unselected mirror to the right arm.
            _ => (JointId::HandLeft, JointId::ShoulderRight, JointId::HandRight),
        }
    }

    fn update_play(&mut self, frame: &BodyFrame, now_ms: f64, cmds: &mut Vec<DrawCmd>) {
        self.emit_skeleton(frame, cmds);
        self.emit_board(cmds);

        let (hand_id, aim_shoulder_id, aim_hand_id) = self.active_sides();
        let hand_joint = frame.joint(hand_id);
        let neck = frame.joint(JointId::Neck);
        let hand_state = match hand_id {
            JointId::HandLeft => frame.left_hand,
            _ => frame.right_hand,
        };

        // Untracked hand or neck mid-frame: the tracker keeps its last known
        // attempt and this frame's gameplay transition is skipped entirely.
        if hand_joint.tracked() && neck.tracked() {
            let ev = self.shot.update(
                hand_joint.position,
                hand_state,
                neck.position,
                frame.position(aim_shoulder_id),
                frame.position(aim_hand_id),
                &self.board,
            );
            self.apply_shot_event(ev, cmds);
        } else {
            self.status = "Tracking lost, hold your pose".to_string();
        }

        self.emit_hud(now_ms, cmds);
    }

    fn apply_shot_event(&mut self, ev: ShotEvent, cmds: &mut Vec<DrawCmd>) {
        match ev {
            ShotEvent::Idle => {
                self.status = "Raise a hand above your head to grab an arrow".to_string();
            }
            ShotEvent::PickedUp | ShotEvent::Ready => {
                self.pending_score = 0;
                self.status = "Arrow nocked. Close your fist and pull back".to_string();
            }
            ShotEvent::DrawStarted | ShotEvent::Holding => {
                self.pending_score = 0;
                self.status = "Pull back to charge, open your hand to loose".to_string();
            }
            ShotEvent::Charging { impact, pending } => {
                self.pending_score = pending;
                self.status = format!("Aiming for {pending}");
                self.emit_charge_marker(impact, cmds);
            }
            ShotEvent::Released { impact, points } => {
                self.total_score += points;
                self.timer.extend_for_score(points);
                self.pending_score = 0;
                self.status = match impact {
                    Some(_) if points > 0 => format!("Hit! +{points}"),
                    Some(_) => format!("Missed the board ({points})"),
                    None => "Fumbled the release".to_string(),
                };
            }
        }
    }

    /// Live projection marker while charging: ring position on the board
    /// plus a size cue that tightens as draw power grows.
    fn emit_charge_marker(&mut self, impact: Vec3, cmds: &mut Vec<DrawCmd>) {
        let (ix, iy) = self.screen.project(impact);
        let power = trajectory::draw_power(self.shot.attempt.initial, self.shot.attempt.current)
            .max(trajectory::MIN_POWER);
        let r = (3.0 / power).clamp(2.0, 24.0);
        cmds.push(DrawCmd::circle("#ff5050", ix, iy, r, false));
        // String line from the aim line down to the drawn hand.
        let (hx, hy) = self.screen.project(self.shot.attempt.current);
        let (nx, ny) = self.screen.project(self.shot.attempt.initial);
        cmds.push(DrawCmd::line("#ddddcc", 2.0, nx, ny, hx, hy));
    }

    fn emit_board(&self, cmds: &mut Vec<DrawCmd>) {
        let (cx, cy) = self.screen.project(self.board.center);
        // Ring pixel size scales with the clamped board depth.
        let z = self.board.center.clamped_depth().z;
        for (i, &r) in self.board.radii.iter().enumerate().rev() {
            let px = r * self.screen.focal / z;
            let color = if i % 2 == 0 { "#cc3333" } else { "#eeeecc" };
            cmds.push(DrawCmd::circle(color, cx, cy, px, true));
        }
    }

    fn emit_skeleton(&self, frame: &BodyFrame, cmds: &mut Vec<DrawCmd>) {
        for &(a, b) in crate::BONES {
            let ja = frame.joint(a);
            let jb = frame.joint(b);
            // A bone with an untracked end is skipped; never aborts the frame.
            if ja.tracking == body::TrackingState::NotTracked
                || jb.tracking == body::TrackingState::NotTracked
            {
                continue;
            }
            let width = if ja.tracked() && jb.tracked() { 3.0 } else { 1.0 };
            let (x1, y1) = self.screen.project(ja.position);
            let (x2, y2) = self.screen.project(jb.position);
            cmds.push(DrawCmd::line("#557799", width, x1, y1, x2, y2));
        }
        for joint in frame.joints.iter() {
            match joint.tracking {
                body::TrackingState::Tracked => {
                    let (x, y) = self.screen.project(joint.position);
                    cmds.push(DrawCmd::circle("#99ccee", x, y, 4.0, true));
                }
                body::TrackingState::Inferred => {
                    let (x, y) = self.screen.project(joint.position);
                    cmds.push(DrawCmd::circle("#556677", x, y, 2.0, false));
                }
                body::TrackingState::NotTracked => {}
            }
        }
    }

    fn emit_hud(&self, now_ms: f64, cmds: &mut Vec<DrawCmd>) {
        cmds.push(DrawCmd::text(self.status.clone(), 16.0, 24.0, 16.0, "#ffd166"));
        cmds.push(DrawCmd::text(
            format!("Score: {}", self.total_score),
            16.0,
            46.0,
            16.0,
            "#ffffff",
        ));
        cmds.push(DrawCmd::text(
            format!("Time: {:.1}", self.time_remaining(now_ms).max(0.0)),
            16.0,
            68.0,
            16.0,
            "#ffffff",
        ));
    }

    // --- Round over ----------------------------------------------------------

    fn update_round_over(&mut self, frame: &BodyFrame, now_ms: f64, cmds: &mut Vec<DrawCmd>) {
        self.status = format!("Time up! Final score {}", self.total_score);
        cmds.push(DrawCmd::text("TIME UP", 250.0, 140.0, 48.0, "#ffffff"));
        cmds.push(DrawCmd::text(
            format!("Score: {}", self.total_score),
            270.0,
            180.0,
            22.0,
            "#ffd166",
        ));
        cmds.push(DrawCmd::Image {
            handle: "btn-restart",
            x: RESTART_BUTTON.x,
            y: RESTART_BUTTON.y,
            w: RESTART_BUTTON.w,
            h: RESTART_BUTTON.h,
        });

        // All gameplay input is ignored except the restart gesture: a closed
        // hand hovering the restart button.
        for (id, state) in [
            (JointId::HandLeft, frame.left_hand),
            (JointId::HandRight, frame.right_hand),
        ] {
            let joint = frame.joint(id);
            if !joint.tracked() {
                continue;
            }
            let (sx, sy) = self.screen.project(joint.position);
            cmds.push(DrawCmd::circle("#88bbff", sx, sy, 10.0, true));
            if state == HandState::Closed && RESTART_BUTTON.contains(sx, sy) {
                self.restart(now_ms);
                return;
            }
        }
    }

    /// Restart: score and arrow state reset, countdown re-armed. Handedness
    /// and floor calibration survive; the same player keeps playing.
    fn restart(&mut self, now_ms: f64) {
        self.total_score = 0;
        self.pending_score = 0;
        self.shot.reset();
        self.timer.reset();
        self.timer.arm(now_ms);
        self.status = "New round! Grab an arrow".to_string();
    }
}

// --- WASM Host Adapter -------------------------------------------------------

// RefCell::new isn't const on this toolchain; plain thread_local is fine since
// wasm is single-threaded.
thread_local! {
    static SESSION: std::cell::RefCell<Option<GameSession>> = std::cell::RefCell::new(None);
}

/// Create (or reuse) the canvas and status overlays and install a fresh
/// session. Frames are then pushed by JS via `push_body_frame`.
#[wasm_bindgen]
pub fn start_archery_mode() -> Result<(), JsValue> {
    use wasm_bindgen::JsCast;

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas: web_sys::HtmlCanvasElement = if let Some(el) = doc.get_element_by_id("ma-canvas") {
        el.dyn_into()?
    } else {
        let c: web_sys::HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id("ma-canvas");
        c.set_width(CANVAS_WIDTH as u32);
        c.set_height(CANVAS_HEIGHT as u32);
        c.set_attribute("style", "position:fixed; left:50%; top:45%; transform:translate(-50%,-50%); box-shadow:0 0 32px 0 rgba(0,0,0,0.18); border-radius:12px; border:2px solid #222; background:#101418; z-index:20;").ok();
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&c)?;
        c
    };
    // Warm up the 2d context once so the first frame does not pay for it.
    let _ = canvas.get_context("2d")?;

    // Status / score overlays (kept in the DOM so text stays crisp).
    for (id, initial) in [("ma-status", "Stand on the target to start"), ("ma-score", "Score: 0")] {
        if doc.get_element_by_id(id).is_none() {
            if let Some(body) = doc.body() {
                let div = doc.create_element("div")?;
                div.set_id(id);
                div.set_text_content(Some(initial));
                div.set_attribute("style", "position:fixed; top:10px; left:12px; font-family:'Fira Code', monospace; font-size:15px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#ffd166; z-index:45;").ok();
                body.append_child(&div)?;
            }
        }
    }

    SESSION.with(|s| s.replace(Some(GameSession::new())));
    Ok(())
}

/// Frame intake from JS: flat f32 array of 25 joints x (x, y, z, tracking),
/// hand states and clipping flags alongside. One call processes one frame to
/// completion; malformed input is dropped at this boundary with a console
/// warning and never reaches game logic.
#[wasm_bindgen]
pub fn push_body_frame(
    data: &[f32],
    left_hand: u8,
    right_hand: u8,
    clipped_edges: u8,
    is_tracked: bool,
) {
    let Some(frame) = BodyFrame::from_wire(data, left_hand, right_hand, clipped_edges, is_tracked)
    else {
        web_sys::console::warn_1(
            &format!(
                "Invalid body frame length: {} (expected {})",
                data.len(),
                body::JOINT_COUNT * 4
            )
            .into(),
        );
        return;
    };

    let now = window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);

    SESSION.with(|cell| {
        if let Some(session) = cell.borrow_mut().as_mut() {
            let cmds = session.update(&frame, now);
            render::replay(&cmds);
            // Keep the DOM overlays in sync each frame.
            if let Some(doc) = window().and_then(|w| w.document()) {
                if let Some(el) = doc.get_element_by_id("ma-status") {
                    el.set_text_content(Some(session.status()));
                }
                if let Some(el) = doc.get_element_by_id("ma-score") {
                    el.set_text_content(Some(&format!(
                        "Score: {}  Time: {:.1}",
                        session.total_score(),
                        session.time_remaining(now).max(0.0)
                    )));
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use body::{Joint, TrackingState, JOINT_COUNT};

    // --- Synthetic frame helpers --------------------------------------------

    fn tracked(p: Vec3) -> Joint {
        Joint { position: p, tracking: TrackingState::Tracked }
    }

    /// Baseline frame: a player standing on the floor target, both hands at
    /// the hips, everything tracked.
    fn base_frame() -> BodyFrame {
        let mut f = BodyFrame {
            joints: [tracked(Vec3::new(0.0, 0.0, 2.5)); JOINT_COUNT],
            left_hand: HandState::Open,
            right_hand: HandState::Open,
            clipped_edges: 0,
            is_tracked: true,
        };
        f.joints[JointId::Head as usize] = tracked(Vec3::new(0.0, 0.7, 2.5));
        f.joints[JointId::Neck as usize] = tracked(Vec3::new(0.0, 0.45, 2.5));
        f.joints[JointId::FootLeft as usize] = tracked(Vec3::new(-0.1, -1.0, 2.5));
        f.joints[JointId::FootRight as usize] = tracked(Vec3::new(0.1, -1.0, 2.5));
        f.joints[JointId::HandLeft as usize] = tracked(Vec3::new(-0.3, -0.4, 2.4));
        f.joints[JointId::HandRight as usize] = tracked(Vec3::new(0.3, -0.4, 2.4));
        f.joints[JointId::ShoulderLeft as usize] = tracked(Vec3::new(-0.2, 0.35, 2.5));
        f.joints[JointId::ShoulderRight as usize] = tracked(Vec3::new(0.2, 0.35, 2.5));
        f
    }

    fn set_joint(f: &mut BodyFrame, id: JointId, p: Vec3) {
        f.joints[id as usize] = tracked(p);
    }

    /// Drive a fresh session through calibration and a right-hand selection.
    fn playing_session(now: f64) -> GameSession {
        let mut s = GameSession::new();
        s.update(&base_frame(), now);
        assert!(s.calibrated());

        let mut pick = base_frame();
        // Right hand hovering the right button: button center back-projected
        // is not needed, just park the hand where it projects inside.
        let hover = hover_point(&s, RIGHT_BUTTON);
        set_joint(&mut pick, JointId::HandRight, hover);
        pick.right_hand = HandState::Closed;
        s.update(&pick, now);
        assert_eq!(s.handedness(), Handedness::Right);
        s
    }

    /// Camera-space point that projects into the middle of a screen rect.
    fn hover_point(s: &GameSession, r: Rect) -> Vec3 {
        let z = 2.0;
        let sx = r.x + r.w / 2.0;
        let sy = r.y + r.h / 2.0;
        Vec3::new(
            (sx - CANVAS_WIDTH / 2.0) * z / s.screen.focal,
            (CANVAS_HEIGHT / 2.0 - sy) * z / s.screen.focal,
            z,
        )
    }

    fn draw_frame(hand: Vec3, state: HandState) -> BodyFrame {
        let mut f = base_frame();
        set_joint(&mut f, JointId::HandRight, hand);
        f.right_hand = state;
        // Level left (aim) arm pointing at the board: zero aim angles.
        set_joint(&mut f, JointId::ShoulderLeft, Vec3::new(0.0, 0.4, 2.4));
        set_joint(&mut f, JointId::HandLeft, Vec3::new(0.0, 0.4, 1.8));
        f
    }

    // --- Phase flow ----------------------------------------------------------

    #[test]
    fn frame_pipeline_walks_through_phases() {
        let mut s = GameSession::new();
        assert_eq!(s.phase(0.0), Phase::Calibrating);

        // Off-target feet keep us calibrating with a hint.
        let mut off = base_frame();
        set_joint(&mut off, JointId::FootLeft, Vec3::new(2.0, -1.0, 2.5));
        set_joint(&mut off, JointId::Head, Vec3::new(2.0, 0.7, 3.0));
        s.update(&off, 0.0);
        assert!(!s.calibrated());
        assert_eq!(s.status(), "Step to your left");

        s.update(&base_frame(), 0.0);
        assert!(s.calibrated());
        assert_eq!(s.phase(0.0), Phase::SelectingHand);
    }

    #[test]
    fn handedness_commit_arms_the_round_clock() {
        let s = playing_session(5_000.0);
        assert_eq!(s.phase(5_000.0), Phase::Playing);
        assert!((s.time_remaining(5_000.0) - 30.0).abs() < 1e-9);
        assert_eq!(s.phase(40_000.0), Phase::RoundOver);
    }

    #[test]
    fn handedness_is_sticky_across_frames() {
        let mut s = playing_session(0.0);
        // A later closed fist over the left button changes nothing.
        let mut f = base_frame();
        let hover = hover_point(&s, LEFT_BUTTON);
        set_joint(&mut f, JointId::HandLeft, hover);
        f.left_hand = HandState::Closed;
        s.update(&f, 100.0);
        assert_eq!(s.handedness(), Handedness::Right);
    }

    // --- End-to-end scenarios ------------------------------------------------

    #[test]
    fn scenario_a_centered_shot_scores_ten_and_buys_time() {
        let mut s = playing_session(0.0);

        // Pickup: right hand above neck and forward.
        let mut pickup = base_frame();
        set_joint(&mut pickup, JointId::HandRight, Vec3::new(0.0, 0.6, 2.6));
        s.update(&pickup, 100.0);
        assert!(s.shot.has_arrow);

        s.update(&draw_frame(Vec3::new(0.0, 0.0, 18.0), HandState::Closed), 200.0);
        s.update(&draw_frame(Vec3::new(0.0, 0.0, 19.0), HandState::Closed), 300.0);
        assert_eq!(s.pending_score(), 10);

        let before = s.time_remaining(400.0);
        s.update(&draw_frame(Vec3::new(0.0, 0.0, 19.0), HandState::Open), 400.0);
        assert_eq!(s.total_score(), 10);
        assert_eq!(s.pending_score(), 0);
        let gained = s.time_remaining(400.0) - before;
        assert!((gained - 10.0 * timer::TIME_BONUS_MS_PER_POINT / 1000.0).abs() < 1e-9);
        assert!(!s.shot.has_arrow);
    }

    #[test]
    fn scenario_b_low_hand_does_not_pick_up() {
        let mut s = playing_session(0.0);
        let mut f = base_frame();
        set_joint(&mut f, JointId::Neck, Vec3::new(0.0, 0.0, 2.0));
        set_joint(&mut f, JointId::HandRight, Vec3::new(0.0, -0.1, 1.0));
        s.update(&f, 50.0);
        assert!(!s.shot.has_arrow);
    }

    #[test]
    fn arrow_in_open_hand_keeps_the_nocked_status() {
        let mut s = playing_session(0.0);
        let mut pickup = base_frame();
        set_joint(&mut pickup, JointId::HandRight, Vec3::new(0.0, 0.6, 2.6));
        s.update(&pickup, 100.0);
        assert!(s.shot.has_arrow);

        // Hand drops back to the hip, still open: the arrow is kept and the
        // status must not fall back to the pickup prompt.
        s.update(&base_frame(), 200.0);
        assert!(s.shot.has_arrow);
        assert_eq!(s.status(), "Arrow nocked. Close your fist and pull back");
    }

    #[test]
    fn scenario_c_timeout_mid_attempt_freezes_score() {
        let mut s = playing_session(0.0);
        let mut pickup = base_frame();
        set_joint(&mut pickup, JointId::HandRight, Vec3::new(0.0, 0.6, 2.6));
        s.update(&pickup, 100.0);
        s.update(&draw_frame(Vec3::new(0.0, 0.0, 18.0), HandState::Closed), 200.0);
        s.update(&draw_frame(Vec3::new(0.0, 0.0, 18.8), HandState::Closed), 300.0);
        let frozen = s.total_score();

        // Clock runs out while still drawing: gameplay branches suppressed,
        // releasing changes nothing.
        let cmds = s.update(&draw_frame(Vec3::new(0.0, 0.0, 19.0), HandState::Open), 60_000.0);
        assert_eq!(s.phase(60_000.0), Phase::RoundOver);
        assert_eq!(s.total_score(), frozen);
        assert!(cmds.iter().any(|c| matches!(
            c,
            DrawCmd::Text { text, .. } if text == "TIME UP"
        )));
    }

    // --- Restart -------------------------------------------------------------

    #[test]
    fn restart_gesture_resets_score_but_keeps_handedness() {
        let mut s = playing_session(0.0);
        s.total_score = 42;

        let mut f = base_frame();
        let hover = hover_point(&s, RESTART_BUTTON);
        set_joint(&mut f, JointId::HandLeft, hover);
        f.left_hand = HandState::Closed;
        s.update(&f, 60_000.0);

        assert_eq!(s.total_score(), 0);
        assert_eq!(s.handedness(), Handedness::Right);
        assert!(s.calibrated());
        assert_eq!(s.phase(60_001.0), Phase::Playing);
        assert!((s.time_remaining(60_000.0) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn open_hands_on_round_over_do_not_restart() {
        let mut s = playing_session(0.0);
        s.total_score = 7;
        let mut f = base_frame();
        let hover = hover_point(&s, RESTART_BUTTON);
        set_joint(&mut f, JointId::HandLeft, hover);
        s.update(&f, 60_000.0);
        assert_eq!(s.total_score(), 7);
        assert_eq!(s.phase(60_001.0), Phase::RoundOver);
    }

    // --- Tracking edge cases -------------------------------------------------

    #[test]
    fn untracked_body_freezes_state() {
        let mut s = playing_session(0.0);
        let mut f = base_frame();
        f.is_tracked = false;
        let cmds = s.update(&f, 1_000.0);
        assert_eq!(s.phase(1_000.0), Phase::Playing);
        assert_eq!(s.status(), "No player in view");
        // Only the status line comes back; no skeleton, no board.
        assert_eq!(cmds.len(), 1);
    }

    #[test]
    fn untracked_hand_mid_draw_holds_the_attempt() {
        let mut s = playing_session(0.0);
        let mut pickup = base_frame();
        set_joint(&mut pickup, JointId::HandRight, Vec3::new(0.0, 0.6, 2.6));
        s.update(&pickup, 100.0);
        s.update(&draw_frame(Vec3::new(0.0, 0.0, 18.0), HandState::Closed), 200.0);
        s.update(&draw_frame(Vec3::new(0.0, 0.0, 18.7), HandState::Closed), 300.0);
        let attempt = s.shot.attempt;

        let mut lost = draw_frame(Vec3::new(9.9, 9.9, 9.9), HandState::Open);
        lost.joints[JointId::HandRight as usize].tracking = TrackingState::NotTracked;
        s.update(&lost, 400.0);
        // No release fired, attempt unchanged, status flags the dropout.
        assert!(s.shot.has_arrow);
        assert_eq!(s.shot.attempt, attempt);
        assert_eq!(s.status(), "Tracking lost, hold your pose");
    }

    #[test]
    fn skeleton_skips_untracked_bones_only() {
        let mut s = playing_session(0.0);
        let mut f = base_frame();
        f.joints[JointId::ElbowLeft as usize].tracking = TrackingState::NotTracked;
        let cmds = s.update(&f, 100.0);
        let lines = cmds.iter().filter(|c| matches!(c, DrawCmd::Line { .. })).count();
        let full = s.update(&base_frame(), 200.0);
        let full_lines = full.iter().filter(|c| matches!(c, DrawCmd::Line { .. })).count();
        // Two bones touch the left elbow.
        assert_eq!(lines + 2, full_lines);
    }
}
