use yew::prelude::*;

use crate::model::{Background, GeneratedResult};

/// Stroke color swatches; the first two match the board colors so strokes
/// can be "erased" by drawing in the board color.
pub const SWATCHES: [&str; 12] = [
    "#000000", "#ffffff", "#ee3333", "#e64980", "#be4bdb", "#893200", "#228be6", "#3333ee",
    "#40c057", "#00aa00", "#fab005", "#fd7e14",
];

#[derive(Properties, PartialEq, Clone)]
pub struct ToolbarProps {
    pub color: String,
    pub background: Background,
    pub busy: bool,
    pub last_result: Option<GeneratedResult>,
    pub on_select_color: Callback<String>,
    pub on_toggle_background: Callback<()>,
    pub on_reset: Callback<()>,
    pub on_run: Callback<()>,
}

#[function_component(Toolbar)]
pub fn toolbar(props: &ToolbarProps) -> Html {
    let background_cb = {
        let cb = props.on_toggle_background.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let reset_cb = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let run_cb = {
        let cb = props.on_run.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let background_label = match props.background {
        Background::Black => "Light board",
        Background::White => "Dark board",
    };
    html! {<div id="top-bar" style="display:flex; justify-content:space-between; align-items:center; gap:12px; padding:10px 16px; background:#161b22; color:#e6edf3; border-bottom:1px solid #30363d;">
        <div style="font-size:18px; font-weight:600;">{"MathScribe"}</div>
        <div style="display:flex; gap:6px; align-items:center;">
            { for SWATCHES.iter().map(|&swatch| {
                let select_cb = {
                    let on_select = props.on_select_color.clone();
                    Callback::from(move |_| on_select.emit(swatch.to_string()))
                };
                let border = if props.color == swatch {
                    "2px solid #58a6ff"
                } else {
                    "1px solid #30363d"
                };
                html! { <button
                    onclick={select_cb}
                    title={swatch}
                    style={format!("width:22px; height:22px; border-radius:50%; cursor:pointer; background:{}; border:{};", swatch, border)}
                /> }
            }) }
        </div>
        <div style="display:flex; gap:8px; align-items:center;">
            { if let Some(result) = &props.last_result {
                html! { <div style="font-size:11px; opacity:0.7; max-width:220px; overflow:hidden; text-overflow:ellipsis; white-space:nowrap;">
                    { format!("{} = {}", result.expression, result.answer) }
                </div> }
            } else { html!{} } }
            <button onclick={background_cb}>{ background_label }</button>
            <button onclick={reset_cb}>{"Reset"}</button>
            <button onclick={run_cb} disabled={props.busy}>{ if props.busy { "Running..." } else { "Run" } }</button>
        </div>
    </div>}
}
