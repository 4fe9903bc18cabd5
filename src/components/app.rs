use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use super::board_view::BoardView;
use super::toolbar::Toolbar;
use crate::model::{GeneratedResult, Point, SessionAction, SessionState};
use crate::state::ink_anchor;
use crate::{config, net, typeset, util};

/// Delay before each recognition entry is revealed on the board. Entries are
/// scheduled independently; no ordering is guaranteed between them.
const RESULT_DELAY_MS: u32 = 1_000;

#[function_component(App)]
pub fn app() -> Html {
    let session = use_reducer(SessionState::default);
    let canvas_ref = use_node_ref();
    let busy = use_state(|| false);

    // Load MathJax once at startup.
    use_effect_with((), |_| {
        typeset::ensure_mathjax_loaded();
        || ()
    });

    // Each revealed result wipes the sketch and re-runs the typesetter.
    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(session.typeset.len(), move |count| {
            if *count > 0 {
                clear_canvas(&canvas_ref);
                Timeout::new(0, typeset::queue_typeset).forget();
            }
            || ()
        });
    }

    let on_select_color = {
        let session = session.clone();
        Callback::from(move |color: String| session.dispatch(SessionAction::SetColor(color)))
    };
    let on_toggle_background = {
        let session = session.clone();
        Callback::from(move |_| session.dispatch(SessionAction::ToggleBackground))
    };
    let on_reset = {
        let session = session.clone();
        let canvas_ref = canvas_ref.clone();
        Callback::from(move |_| {
            clear_canvas(&canvas_ref);
            session.dispatch(SessionAction::Reset);
        })
    };

    let on_run = {
        let session = session.clone();
        let canvas_ref = canvas_ref.clone();
        let busy = busy.clone();
        Callback::from(move |_| {
            if *busy {
                return;
            }
            let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
                return;
            };
            let image = match canvas.to_data_url_with_type("image/png") {
                Ok(url) => url,
                Err(err) => {
                    log::error!("failed to serialize canvas: {err:?}");
                    return;
                }
            };
            busy.set(true);
            let session = session.clone();
            let busy = busy.clone();
            spawn_local(async move {
                let url = config::calculate_url();
                let reply = net::calculate(&url, &image, &session.dict_of_vars).await;
                busy.set(false);
                let entries = match reply {
                    Ok(resp) => match resp.into_entries() {
                        Ok(entries) => entries,
                        Err(message) => {
                            util::alert(&message);
                            return;
                        }
                    },
                    Err(err) => {
                        log::error!("calculate request failed: {err}");
                        util::alert("An error occurred while processing the sketch. Please try again.");
                        return;
                    }
                };
                session.dispatch(SessionAction::ApplyEntries(entries.clone()));
                let Some(anchor) = sketch_anchor(&canvas) else {
                    return;
                };
                session.dispatch(SessionAction::SetAnchor(anchor));
                for entry in entries {
                    let session = session.clone();
                    Timeout::new(RESULT_DELAY_MS, move || {
                        session.dispatch(SessionAction::ShowResult(GeneratedResult {
                            expression: entry.expr,
                            answer: entry.result,
                        }));
                    })
                    .forget();
                }
            });
        })
    };

    html! {
        <div style="width:100vw; height:100vh; overflow:hidden;">
            <Toolbar
                color={session.color.clone()}
                background={session.background}
                busy={*busy}
                last_result={session.result.clone()}
                on_select_color={on_select_color}
                on_toggle_background={on_toggle_background}
                on_reset={on_reset}
                on_run={on_run}
            />
            <BoardView
                canvas_ref={canvas_ref.clone()}
                color={session.color.clone()}
                background={session.background}
                typeset={session.typeset.clone()}
                anchor={session.anchor}
            />
        </div>
    }
}

fn clear_canvas(canvas_ref: &NodeRef) {
    if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
        if let Some(ctx) = util::context_2d(&canvas) {
            ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
        }
    }
}

/// Overlay anchor for the current sketch: midpoint of the ink's bounding
/// box, centre of the canvas when it is blank. `None` means the bitmap was
/// unreadable and the reveal is skipped.
fn sketch_anchor(canvas: &HtmlCanvasElement) -> Option<Point> {
    let Some(ctx) = util::context_2d(canvas) else {
        log::error!("unable to get canvas context");
        return None;
    };
    let (w, h) = (canvas.width(), canvas.height());
    match ctx.get_image_data(0.0, 0.0, w as f64, h as f64) {
        Ok(image) => {
            let pixels = image.data().0;
            Some(ink_anchor(&pixels, w, h))
        }
        Err(err) => {
            log::error!("failed to read canvas pixels: {err:?}");
            None
        }
    }
}
