//! Shifting the interior lines of elements that move.
//!
//! When a construct is already partly wrapped, an element that gets broken
//! onto a new line may itself span several lines. Its first line moves with
//! the inserted break, and the lines after it need one more indent unit to
//! keep their place relative to it.

use std::collections::BTreeSet;

use tuck_syntax::{
    Position, SourceFile, SyntaxKind, SyntaxNode, first_significant_token,
    last_significant_token,
};

use super::{MutationType, WrappingSummary};

/// Add an [`MutationType::Indent`] to each interior line of every element
/// that gains indentation.
pub fn indent_interior_lines(
    file: &SourceFile,
    construct: &SyntaxNode,
    mut summary: WrappingSummary,
) -> WrappingSummary {
    let (Some(first), Some(last)) = (
        first_significant_token(construct),
        last_significant_token(construct),
    ) else {
        return summary;
    };
    let last_line = file.start(&last).line;
    if summary.is_empty() || file.start(&first).line == last_line {
        return summary;
    }

    let mut lines = BTreeSet::new();
    for &(position, mutation) in &summary {
        if !matches!(mutation, MutationType::Indent | MutationType::WrapIndent) {
            continue;
        }
        let Some(end_line) = outermost_starting_at(file, construct, position)
            .and_then(|node| last_significant_token(&node))
            .map(|token| file.start(&token).line)
        else {
            continue;
        };
        lines.extend(position.line + 1..=end_line);

        // comment lines trailing an element travel with it
        if mutation == MutationType::WrapIndent {
            let comments = (end_line + 1..=last_line).take_while(|&line| {
                file.first_token_on_line(line)
                    .is_some_and(|token| token.kind() == SyntaxKind::COMMENT)
            });
            lines.extend(comments);
        }
    }

    for line in lines {
        let Some(token) = file.first_token_on_line(line) else {
            continue;
        };
        let start = file.start(token);
        // inside a multi-line string
        if start.col != file.line_indent(line).chars().count() {
            continue;
        }
        summary.push((start, MutationType::Indent));
    }

    summary.sort_by_key(|(position, _)| *position);
    summary
}

/// The outermost node within `construct` whose code starts at `position`.
///
/// An element wrapped in its own parentheses starts at a `(` that no node
/// begins at; the node inside the parentheses stands in for it.
fn outermost_starting_at(
    file: &SourceFile,
    construct: &SyntaxNode,
    position: Position,
) -> Option<SyntaxNode> {
    let found = construct
        .descendants()
        .skip(1)
        .filter(|node| {
            !matches!(
                node.kind(),
                SyntaxKind::BLOCK | SyntaxKind::ARG_LIST | SyntaxKind::PARAMETERS
            )
        })
        .find(|node| {
            first_significant_token(node).is_some_and(|token| file.start(&token) == position)
        });
    if found.is_some() {
        return found;
    }

    let paren = file
        .token_starting_at(position)
        .filter(|token| token.kind() == SyntaxKind::L_PAREN)?;
    let inner = file.next_significant(file.end(paren))?;
    outermost_starting_at(file, construct, file.start(inner))
}
