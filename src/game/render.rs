//! Canvas replay of draw commands.
//!
//! The browser-side consumer of the per-frame `DrawCmd` list. Nothing here
//! feeds back into game state; native tests inspect the command list instead
//! of rasterizing it.

use wasm_bindgen::JsCast;
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};

use super::draw::DrawCmd;

/// Replay one frame's command list onto the `ma-canvas` element. Silently a
/// no-op outside the browser (no window / no canvas yet).
pub fn replay(cmds: &[DrawCmd]) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    let Some(el) = doc.get_element_by_id("ma-canvas") else {
        return;
    };
    let Ok(canvas) = el.dyn_into::<HtmlCanvasElement>() else {
        return;
    };
    let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
        Ok(Some(c)) => match c.dyn_into() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    ctx.set_fill_style_str("#101418");
    ctx.fill_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);

    for cmd in cmds {
        match cmd {
            DrawCmd::Ellipse { color, cx, cy, rx, ry, filled } => {
                ctx.begin_path();
                ctx.ellipse(*cx, *cy, *rx, *ry, 0.0, 0.0, std::f64::consts::TAU)
                    .ok();
                if *filled {
                    ctx.set_fill_style_str(color);
                    ctx.fill();
                } else {
                    ctx.set_stroke_style_str(color);
                    ctx.set_line_width(2.0);
                    ctx.stroke();
                }
            }
            DrawCmd::Line { color, width, x1, y1, x2, y2 } => {
                ctx.set_stroke_style_str(color);
                ctx.set_line_width(*width);
                line(&ctx, *x1, *y1, *x2, *y2);
            }
            DrawCmd::Text { text, x, y, size_px, color } => {
                ctx.set_font(&format!("{size_px}px 'Fira Code', monospace"));
                ctx.set_fill_style_str(color);
                ctx.fill_text(text, *x, *y).ok();
            }
            DrawCmd::Image { handle, x, y, w, h } => {
                // Button art is host-provided; until an image atlas is wired
                // up, draw a labeled plate so the hit region stays visible.
                ctx.set_fill_style_str("#2a3a4a");
                ctx.fill_rect(*x, *y, *w, *h);
                ctx.set_stroke_style_str("#88bbff");
                ctx.set_line_width(2.0);
                ctx.stroke_rect(*x, *y, *w, *h);
                ctx.set_font("12px 'Fira Code', monospace");
                ctx.set_fill_style_str("#ffffff");
                ctx.fill_text(handle, *x + 6.0, *y + *h / 2.0).ok();
            }
        }
    }
}

fn line(ctx: &CanvasRenderingContext2d, x1: f64, y1: f64, x2: f64, y2: f64) {
    ctx.begin_path();
    ctx.move_to(x1, y1);
    ctx.line_to(x2, y2);
    ctx.stroke();
}
