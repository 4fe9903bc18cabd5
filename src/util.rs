// Shared DOM helpers used by the board and the submit path.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

/// Blocking error surface; both transport failures and backend-reported
/// errors end up here.
pub fn alert(message: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.alert_with_message(message);
    }
}
