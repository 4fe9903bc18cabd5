//! MathJax glue: load the library once, then re-typeset on demand.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlScriptElement;

const MATHJAX_SRC: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/mathjax/2.7.9/MathJax.js?config=TeX-MML-AM_CHTML";
const SCRIPT_ID: &str = "mathjax-loader";

/// Injects the MathJax script tag into `<head>`. Subsequent calls are no-ops.
pub fn ensure_mathjax_loaded() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.get_element_by_id(SCRIPT_ID).is_some() {
        return;
    }
    let Ok(element) = document.create_element("script") else {
        log::error!("failed to create MathJax script element");
        return;
    };
    element.set_id(SCRIPT_ID);
    let _ = element.set_attribute("async", "");
    let Ok(script) = element.dyn_into::<HtmlScriptElement>() else {
        return;
    };
    script.set_src(MATHJAX_SRC);
    if let Some(head) = document.head() {
        let _ = head.append_child(&script);
    }
}

/// Asks MathJax to re-typeset the document, via
/// `window.MathJax.Hub.Queue(["Typeset", MathJax.Hub])`. A no-op while the
/// library is still loading.
pub fn queue_typeset() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(mathjax) = js_sys::Reflect::get(&window, &JsValue::from_str("MathJax")) else {
        return;
    };
    if mathjax.is_undefined() || mathjax.is_null() {
        return;
    }
    let Ok(hub) = js_sys::Reflect::get(&mathjax, &JsValue::from_str("Hub")) else {
        return;
    };
    if hub.is_undefined() || hub.is_null() {
        return;
    }
    let Ok(queue) = js_sys::Reflect::get(&hub, &JsValue::from_str("Queue")) else {
        return;
    };
    let Some(queue) = queue.dyn_ref::<js_sys::Function>() else {
        return;
    };
    let job = js_sys::Array::of2(&JsValue::from_str("Typeset"), &hub);
    if let Err(err) = queue.call1(&hub, &job) {
        log::warn!("MathJax typeset call failed: {err:?}");
    }
}
