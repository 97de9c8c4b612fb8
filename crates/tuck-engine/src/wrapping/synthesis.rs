//! Rendering a pruned summary into insertions.

use tuck_syntax::{SourceFile, SyntaxNode, first_significant_token};

use super::MutationType;
use crate::{Edit, Position};

/// Turn `summary` into one insertion per distinct position.
///
/// Breaks use the terminator of the line the construct starts on and continue
/// at its indentation, copied verbatim so tab-indented code stays
/// tab-indented; `indent_unit` is added on top for
/// [`MutationType::WrapIndent`] and [`MutationType::Indent`].
pub fn synthesise(
    file: &SourceFile,
    node: &SyntaxNode,
    summary: &[(Position, MutationType)],
    indent_unit: &str,
) -> Vec<Edit> {
    let Some(first) = first_significant_token(node) else {
        return Vec::new();
    };
    let line = file.start(&first).line;
    let indent = file.line_indent(line);
    let newline = file.line_ending(line);

    let mut edits: Vec<Edit> = Vec::new();
    for &(position, mutation) in summary {
        let text = match mutation {
            MutationType::Wrap => format!("{newline}{indent}"),
            MutationType::WrapIndent => format!("{newline}{indent}{indent_unit}"),
            MutationType::Indent => indent_unit.to_string(),
            MutationType::TrailingComma => ",".to_string(),
            MutationType::OpenParen => "(".to_string(),
            MutationType::CloseParen => ")".to_string(),
        };
        match edits.last_mut() {
            Some(edit) if edit.is_insertion() && edit.range.start() == position => {
                edit.new_text.push_str(&text);
            }
            _ => edits.push(Edit::insert(position, text)),
        }
    }
    edits
}
