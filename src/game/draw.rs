//! Abstract draw commands.
//!
//! The core never touches a canvas: each frame update returns an ordered list
//! of these primitives and the host replays them (`game::render` for the
//! browser canvas, plain inspection in native tests).

/// One drawing primitive. Colors are CSS color strings so the canvas adapter
/// can pass them straight through.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DrawCmd {
    Ellipse {
        color: String,
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        filled: bool,
    },
    Line {
        color: String,
        width: f64,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        size_px: f64,
        color: String,
    },
    /// Host-resolved image handle (button art etc.) drawn into a rect.
    Image {
        handle: &'static str,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
}

impl DrawCmd {
    pub fn text(text: impl Into<String>, x: f64, y: f64, size_px: f64, color: &str) -> Self {
        DrawCmd::Text { text: text.into(), x, y, size_px, color: color.to_string() }
    }

    pub fn line(color: &str, width: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        DrawCmd::Line { color: color.to_string(), width, x1, y1, x2, y2 }
    }

    pub fn circle(color: &str, cx: f64, cy: f64, r: f64, filled: bool) -> Self {
        DrawCmd::Ellipse { color: color.to_string(), cx, cy, rx: r, ry: r, filled }
    }
}
