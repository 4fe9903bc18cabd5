//! Session state and backend wire types for MathScribe.
//! The whole UI session lives in one reducer so handlers get an explicit
//! state handle instead of ambient globals.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::rc::Rc;
use yew::Reducible;

/// A point in canvas pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Board color, applied as CSS behind the canvas. The bitmap itself stays
/// transparent so the alpha channel only ever carries ink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Background {
    White,
    Black,
}

impl Background {
    pub fn fill(self) -> &'static str {
        match self {
            Background::White => "#ffffff",
            Background::Black => "#0e1116",
        }
    }

    /// Readable foreground on top of `fill`.
    pub fn ink(self) -> &'static str {
        match self {
            Background::White => "#000000",
            Background::Black => "#ffffff",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Background::White => Background::Black,
            Background::Black => Background::White,
        }
    }
}

/// One recognized expression with its evaluated result. `assign` marks
/// entries that define a variable to be carried into later calls.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RecognitionEntry {
    pub expr: String,
    pub result: String,
    #[serde(default)]
    pub assign: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BackendResponse {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub data: Vec<RecognitionEntry>,
}

impl BackendResponse {
    /// Entries to process, or the error message to surface. A reply with
    /// `status == "error"` must not mutate any session state.
    pub fn into_entries(self) -> Result<Vec<RecognitionEntry>, String> {
        if self.status == "error" {
            Err(self.message)
        } else {
            Ok(self.data)
        }
    }
}

/// Body of `POST /calculate`.
#[derive(Debug, Serialize)]
pub struct CalculateRequest<'a> {
    pub image: &'a str,
    pub dict_of_vars: &'a HashMap<String, String>,
}

/// A result chosen for display.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedResult {
    pub expression: String,
    pub answer: String,
}

impl GeneratedResult {
    /// The MathJax line rendered on the board.
    pub fn typeset_line(&self) -> String {
        format!("\\(\\LARGE{{{} = {}}}\\)", self.expression, self.answer)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    /// Active stroke color (one of the toolbar swatches).
    pub color: String,
    pub background: Background,
    /// Variable dictionary accumulated across recognition calls; sent back
    /// to the backend on each call for context.
    pub dict_of_vars: HashMap<String, String>,
    /// Most recent displayed result.
    pub result: Option<GeneratedResult>,
    /// Display list of typeset lines, in reveal order.
    pub typeset: Vec<String>,
    /// Where the overlay is pinned.
    pub anchor: Point,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            color: "#ffffff".to_string(),
            background: Background::Black,
            dict_of_vars: HashMap::new(),
            result: None,
            typeset: Vec::new(),
            anchor: Point { x: 10.0, y: 200.0 },
        }
    }
}

#[derive(Clone, Debug)]
pub enum SessionAction {
    SetColor(String),
    ToggleBackground,
    /// Merge `assign` entries from a successful reply into the dictionary.
    ApplyEntries(Vec<RecognitionEntry>),
    SetAnchor(Point),
    /// Record a result and append its typeset line to the display list.
    ShowResult(GeneratedResult),
    /// Clear dictionary, display list, and result. Idempotent; color and
    /// background survive.
    Reset,
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use SessionAction::*;
        let mut new = (*self).clone();
        match action {
            SetColor(color) => {
                new.color = color;
            }
            ToggleBackground => {
                new.background = new.background.toggled();
            }
            ApplyEntries(entries) => {
                for entry in entries.into_iter().filter(|e| e.assign) {
                    new.dict_of_vars.insert(entry.expr, entry.result);
                }
            }
            SetAnchor(point) => {
                new.anchor = point;
            }
            ShowResult(result) => {
                new.typeset.push(result.typeset_line());
                new.result = Some(result);
            }
            Reset => {
                new.dict_of_vars.clear();
                new.typeset.clear();
                new.result = None;
            }
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce(state: SessionState, action: SessionAction) -> SessionState {
        (*Rc::new(state).reduce(action)).clone()
    }

    fn entry(expr: &str, result: &str, assign: bool) -> RecognitionEntry {
        RecognitionEntry {
            expr: expr.to_string(),
            result: result.to_string(),
            assign,
        }
    }

    #[test]
    fn assign_entry_lands_in_dict() {
        let state = reduce(
            SessionState::default(),
            SessionAction::ApplyEntries(vec![entry("x", "5", true)]),
        );
        assert_eq!(state.dict_of_vars.get("x").map(String::as_str), Some("5"));
    }

    #[test]
    fn plain_entry_leaves_dict_alone() {
        let state = reduce(
            SessionState::default(),
            SessionAction::ApplyEntries(vec![entry("2 + 2", "4", false)]),
        );
        assert!(state.dict_of_vars.is_empty());
    }

    #[test]
    fn later_assignment_overwrites_earlier_one() {
        let mut state = reduce(
            SessionState::default(),
            SessionAction::ApplyEntries(vec![entry("x", "5", true)]),
        );
        state = reduce(state, SessionAction::ApplyEntries(vec![entry("x", "7", true)]));
        assert_eq!(state.dict_of_vars.get("x").map(String::as_str), Some("7"));
        assert_eq!(state.dict_of_vars.len(), 1);
    }

    #[test]
    fn show_result_appends_typeset_line() {
        let result = GeneratedResult {
            expression: "3^2".to_string(),
            answer: "9".to_string(),
        };
        let state = reduce(SessionState::default(), SessionAction::ShowResult(result.clone()));
        assert_eq!(state.typeset, vec!["\\(\\LARGE{3^2 = 9}\\)".to_string()]);
        assert_eq!(state.result, Some(result));
    }

    #[test]
    fn reset_clears_dict_display_and_result() {
        let mut state = reduce(
            SessionState::default(),
            SessionAction::ApplyEntries(vec![entry("x", "5", true)]),
        );
        state = reduce(
            state,
            SessionAction::ShowResult(GeneratedResult {
                expression: "x".to_string(),
                answer: "5".to_string(),
            }),
        );
        state = reduce(state, SessionAction::SetColor("#ee3333".to_string()));
        state = reduce(state, SessionAction::Reset);

        assert!(state.dict_of_vars.is_empty());
        assert!(state.typeset.is_empty());
        assert!(state.result.is_none());
        // Tool selection survives a reset.
        assert_eq!(state.color, "#ee3333");

        // Resetting an already-empty session is a no-op.
        let again = reduce(state.clone(), SessionAction::Reset);
        assert_eq!(again, state);
    }

    #[test]
    fn error_reply_yields_message_and_no_entries() {
        let resp = BackendResponse {
            status: "error".to_string(),
            message: "could not parse expression".to_string(),
            data: vec![entry("x", "5", true)],
        };
        assert_eq!(resp.into_entries(), Err("could not parse expression".to_string()));
    }

    #[test]
    fn success_reply_yields_entries() {
        let resp = BackendResponse {
            status: "success".to_string(),
            message: String::new(),
            data: vec![entry("x", "5", true), entry("2 + 2", "4", false)],
        };
        assert_eq!(resp.into_entries().map(|e| e.len()), Ok(2));
    }

    #[test]
    fn backend_reply_decodes_from_json() {
        let raw = r#"{
            "status": "success",
            "message": "ok",
            "data": [{"expr": "x", "result": "5", "assign": true},
                     {"expr": "x + 1", "result": "6", "assign": false}]
        }"#;
        let resp: BackendResponse = serde_json::from_str(raw).expect("valid reply");
        assert_eq!(resp.status, "success");
        assert_eq!(resp.data.len(), 2);
        assert!(resp.data[0].assign);
        assert_eq!(resp.data[1].result, "6");
    }

    #[test]
    fn reply_without_data_decodes_to_empty_list() {
        let resp: BackendResponse =
            serde_json::from_str(r#"{"status": "error", "message": "bad image"}"#).expect("valid reply");
        assert!(resp.data.is_empty());
    }

    #[test]
    fn request_body_has_image_and_dict_keys() {
        let mut dict = HashMap::new();
        dict.insert("x".to_string(), "5".to_string());
        let body = CalculateRequest {
            image: "data:image/png;base64,AAAA",
            dict_of_vars: &dict,
        };
        let value = serde_json::to_value(&body).expect("serializable");
        assert_eq!(value["image"], "data:image/png;base64,AAAA");
        assert_eq!(value["dict_of_vars"]["x"], "5");
    }
}
