use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent};
use yew::prelude::*;

use super::result_overlay::ResultOverlay;
use crate::model::{Background, Point};
use crate::state::Brush;
use crate::util;

#[derive(Properties, PartialEq, Clone)]
pub struct BoardViewProps {
    pub canvas_ref: NodeRef,
    pub color: String,
    pub background: Background,
    pub typeset: Vec<String>,
    pub anchor: Point,
}

fn stroke_segment(ctx: &CanvasRenderingContext2d, brush: &mut Brush, x: f64, y: f64) {
    ctx.set_stroke_style_str(&brush.color);
    ctx.begin_path();
    ctx.move_to(brush.last_x, brush.last_y);
    ctx.line_to(x, y);
    ctx.stroke();
    brush.last_x = x;
    brush.last_y = y;
}

#[function_component(BoardView)]
pub fn board_view(props: &BoardViewProps) -> Html {
    let brush = use_mut_ref(Brush::default);

    // Mirror the active swatch into the cell the event closures read.
    {
        let brush = brush.clone();
        use_effect_with(props.color.clone(), move |color| {
            brush.borrow_mut().color = color.clone();
            || ()
        });
    }

    {
        let canvas_ref = props.canvas_ref.clone();
        let brush = brush.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("no global `window` exists");
            let document = window.document().expect("should have a document on window");
            let canvas: HtmlCanvasElement = canvas_ref
                .cast::<HtmlCanvasElement>()
                .expect("canvas_ref not attached to a canvas element");

            let compute_and_apply_canvas_size = {
                let canvas = canvas.clone();
                let document = document.clone();
                let window = window.clone();
                move || {
                    let nav_height: f64 = document
                        .get_element_by_id("top-bar")
                        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                        .map(|el| el.client_height() as f64)
                        .unwrap_or(0.0);
                    let width = window
                        .inner_width()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(800.0);
                    let height = window
                        .inner_height()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(600.0)
                        - nav_height;
                    canvas.set_width(width.max(0.0) as u32);
                    canvas.set_height(height.max(0.0) as u32);
                    // Resizing resets context state.
                    if let Some(ctx) = util::context_2d(&canvas) {
                        ctx.set_line_cap("round");
                        ctx.set_line_join("round");
                        ctx.set_line_width(3.0);
                    }
                }
            };

            compute_and_apply_canvas_size();

            // Mouse down starts a stroke at the pointer.
            let mousedown_cb = {
                let brush = brush.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    let mut b = brush.borrow_mut();
                    b.drawing = true;
                    b.last_x = e.offset_x() as f64;
                    b.last_y = e.offset_y() as f64;
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("mousedown", mousedown_cb.as_ref().unchecked_ref())
                .unwrap();

            // Mouse move extends the stroke while the button is held.
            let mousemove_cb = {
                let brush = brush.clone();
                let canvas = canvas.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    let mut b = brush.borrow_mut();
                    if !b.drawing {
                        return;
                    }
                    let Some(ctx) = util::context_2d(&canvas) else {
                        return;
                    };
                    stroke_segment(&ctx, &mut b, e.offset_x() as f64, e.offset_y() as f64);
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref())
                .unwrap();

            let mouseup_cb = {
                let brush = brush.clone();
                Closure::wrap(Box::new(move |_e: MouseEvent| {
                    brush.borrow_mut().drawing = false;
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())
                .unwrap();

            // Leaving the canvas ends the stroke; re-entering does not resume it.
            let mouseout_cb = {
                let brush = brush.clone();
                Closure::wrap(Box::new(move |_e: MouseEvent| {
                    brush.borrow_mut().drawing = false;
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("mouseout", mouseout_cb.as_ref().unchecked_ref())
                .unwrap();

            // Single-finger touch drawing.
            let touch_start_cb = {
                let canvas_tc = canvas.clone();
                let brush = brush.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    if e.touches().length() == 1 {
                        if let Some(t0) = e.touches().item(0) {
                            let rect = canvas_tc.get_bounding_client_rect();
                            let mut b = brush.borrow_mut();
                            b.drawing = true;
                            b.last_x = t0.client_x() as f64 - rect.left();
                            b.last_y = t0.client_y() as f64 - rect.top();
                        }
                    }
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("touchstart", touch_start_cb.as_ref().unchecked_ref())
                .ok();

            let touch_move_cb = {
                let canvas_tc = canvas.clone();
                let brush = brush.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    if let Some(t0) = e.touches().item(0) {
                        let mut b = brush.borrow_mut();
                        if b.drawing {
                            if let Some(ctx) = util::context_2d(&canvas_tc) {
                                let rect = canvas_tc.get_bounding_client_rect();
                                let x = t0.client_x() as f64 - rect.left();
                                let y = t0.client_y() as f64 - rect.top();
                                stroke_segment(&ctx, &mut b, x, y);
                            }
                        }
                    }
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("touchmove", touch_move_cb.as_ref().unchecked_ref())
                .ok();

            let touch_end_cb = {
                let brush = brush.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    if e.touches().length() == 0 {
                        brush.borrow_mut().drawing = false;
                    }
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
                .ok();
            canvas
                .add_event_listener_with_callback("touchcancel", touch_end_cb.as_ref().unchecked_ref())
                .ok();

            let resize_cb = {
                let compute_and_apply_canvas_size = compute_and_apply_canvas_size.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    compute_and_apply_canvas_size();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .unwrap();

            let window_clone = window.clone();
            move || {
                let _ = canvas
                    .remove_event_listener_with_callback("mousedown", mousedown_cb.as_ref().unchecked_ref());
                let _ = canvas
                    .remove_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref());
                let _ = canvas
                    .remove_event_listener_with_callback("mouseout", mouseout_cb.as_ref().unchecked_ref());
                let _ = window_clone
                    .remove_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref());
                let _ = canvas
                    .remove_event_listener_with_callback("touchstart", touch_start_cb.as_ref().unchecked_ref());
                let _ = canvas
                    .remove_event_listener_with_callback("touchmove", touch_move_cb.as_ref().unchecked_ref());
                let _ = canvas
                    .remove_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref());
                let _ = canvas
                    .remove_event_listener_with_callback("touchcancel", touch_end_cb.as_ref().unchecked_ref());
                let _ = window_clone
                    .remove_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
                let _keep_alive = (
                    &mousedown_cb,
                    &mousemove_cb,
                    &mouseup_cb,
                    &mouseout_cb,
                    &touch_start_cb,
                    &touch_move_cb,
                    &touch_end_cb,
                    &resize_cb,
                );
            }
        });
    }

    html! {
        <div style="position:relative;">
            <canvas
                ref={props.canvas_ref.clone()}
                id="sketch-canvas"
                style={format!(
                    "display:block; touch-action:none; cursor:crosshair; background:{};",
                    props.background.fill()
                )}
            />
            <ResultOverlay
                typeset={props.typeset.clone()}
                anchor={props.anchor}
                background={props.background}
            />
        </div>
    }
}
