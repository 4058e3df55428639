use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::app::{Result, XhsnoteError};

static INITIAL_STATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<script>window\.__INITIAL_STATE__=(.*?)</script>")
        .expect("initial state pattern is valid")
});

/// The embedded page state, split into the part notes live under and the
/// whole tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedState {
    /// `state.note`, or an empty object when the page has none.
    pub note_section: Value,
    pub full_state: Value,
}

/// Pull `window.__INITIAL_STATE__` out of a note page.
///
/// The page assigns a JavaScript object literal rather than strict JSON, so
/// every bare `undefined` is rewritten to `null` before parsing.
pub fn extract(page: &str) -> Result<ExtractedState> {
    let captures = INITIAL_STATE_RE.captures(page).ok_or_else(|| {
        error!("window.__INITIAL_STATE__ script block not found in page");
        XhsnoteError::StateNotFound
    })?;

    let raw = captures[1].replace("undefined", "null");
    debug!(len = raw.len(), "captured __INITIAL_STATE__ payload");

    let full_state: Value = serde_json::from_str(&raw).map_err(XhsnoteError::StateParse)?;
    let note_section = full_state
        .get("note")
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()));

    Ok(ExtractedState {
        note_section,
        full_state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_replaces_undefined() {
        let page = r#"<html><script>window.__INITIAL_STATE__={"note":{"a":undefined}}</script></html>"#;
        let state = extract(page).unwrap();

        assert_eq!(state.full_state, json!({"note": {"a": null}}));
        assert_eq!(state.note_section, json!({"a": null}));
    }

    #[test]
    fn test_extract_spans_lines_and_stops_at_first_close() {
        let page = "<script>window.__INITIAL_STATE__={\n\"note\":\n{\"k\": 1}\n}</script>\n<script>other()</script>";
        let state = extract(page).unwrap();

        assert_eq!(state.note_section, json!({"k": 1}));
    }

    #[test]
    fn test_extract_missing_marker() {
        let page = "<html><body><script>window.somethingElse={}</script></body></html>";
        assert!(matches!(extract(page), Err(XhsnoteError::StateNotFound)));
    }

    #[test]
    fn test_extract_invalid_json() {
        let page = "<script>window.__INITIAL_STATE__={note: oops}</script>";
        assert!(matches!(extract(page), Err(XhsnoteError::StateParse(_))));
    }

    #[test]
    fn test_extract_without_note_key() {
        let page = r#"<script>window.__INITIAL_STATE__={"user":{}}</script>"#;
        let state = extract(page).unwrap();

        assert_eq!(state.note_section, json!({}));
        assert_eq!(state.full_state, json!({"user": {}}));
    }
}
