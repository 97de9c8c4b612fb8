//! Rendering results for the terminal and for editor integrations.

use serde::Serialize;
use similar::TextDiff;
use tuck_engine::{Edit, Position, TuckError};

#[derive(Debug, Serialize)]
struct LspPosition {
    line: usize,
    character: usize,
}

impl From<Position> for LspPosition {
    /// LSP lines are zero-based where ours are one-based.
    fn from(position: Position) -> Self {
        Self {
            line: position.line.saturating_sub(1),
            character: position.col,
        }
    }
}

#[derive(Debug, Serialize)]
struct LspRange {
    start: LspPosition,
    end: LspPosition,
}

#[derive(Debug, Serialize)]
struct LspTextEdit<'a> {
    range: LspRange,
    #[serde(rename = "newText")]
    new_text: &'a str,
}

#[derive(Debug, Serialize)]
struct EditsDocument<'a> {
    edits: Vec<LspTextEdit<'a>>,
}

/// The edits as a JSON document of language-server-protocol text edits.
pub fn edits_json(edits: &[Edit]) -> serde_json::Result<String> {
    let document = EditsDocument {
        edits: edits
            .iter()
            .map(|edit| LspTextEdit {
                range: LspRange {
                    start: edit.range.start().into(),
                    end: edit.range.end().into(),
                },
                new_text: &edit.new_text,
            })
            .collect(),
    };
    serde_json::to_string(&document)
}

/// The JSON envelope an editor integration reads from stderr on failure.
pub fn error_json(error: &TuckError) -> String {
    serde_json::json!({
        "error": {
            "code": error.code(),
            "message": error.to_string(),
        }
    })
    .to_string()
}

/// A unified diff with `original` and `formatted` headers; empty when the
/// texts are the same.
pub fn unified_diff(original: &str, formatted: &str) -> String {
    TextDiff::from_lines(original, formatted)
        .unified_diff()
        .context_radius(3)
        .missing_newline_hint(false)
        .header("original", "formatted")
        .to_string()
}
