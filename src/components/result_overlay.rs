use yew::prelude::*;

use crate::model::{Background, Point};

/// Vertical spacing between stacked result lines.
const LINE_STEP_PX: f64 = 34.0;

#[derive(Properties, PartialEq, Clone)]
pub struct ResultOverlayProps {
    pub typeset: Vec<String>,
    pub anchor: Point,
    pub background: Background,
}

/// Typeset recognition results pinned near the sketch they came from. The
/// divs are pointer-inert so drawing keeps working underneath them.
#[function_component(ResultOverlay)]
pub fn result_overlay(props: &ResultOverlayProps) -> Html {
    html! {
        <>
        { for props.typeset.iter().enumerate().map(|(i, latex)| {
            let top = props.anchor.y + i as f64 * LINE_STEP_PX;
            html! {
                <div
                    key={i}
                    style={format!(
                        "position:absolute; left:{}px; top:{}px; color:{}; pointer-events:none; padding:4px 8px; font-size:18px;",
                        props.anchor.x, top, props.background.ink()
                    )}
                >
                    { Html::from_html_unchecked(AttrValue::from(latex.clone())) }
                </div>
            }
        }) }
        </>
    }
}
