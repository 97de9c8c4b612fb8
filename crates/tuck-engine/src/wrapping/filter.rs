//! Dropping planned insertions the source already has.
//!
//! This pass makes wrapping idempotent: on tucked code every line break,
//! indent and trailing comma is already present, so the summary prunes down
//! to nothing.

use tuck_syntax::{Position, SourceFile, SyntaxKind};

use super::{MutationType, WrappingSummary};

/// Remove the entries of `summary` that are already satisfied by the source.
///
/// `node_start` is where the construct's first code token starts. When the
/// construct's own leading break turns out to be present, the construct sits
/// on a line of its own, so its elements wrap without extra indentation.
pub fn prune(file: &SourceFile, node_start: Position, summary: WrappingSummary) -> WrappingSummary {
    let mut pruned = Vec::with_capacity(summary.len());
    let mut previous: Option<(Position, MutationType)> = None;
    let mut demote = false;

    for (index, &(position, mutation)) in summary.iter().enumerate() {
        let shares_position = previous.is_some_and(|(prev_position, _)| prev_position == position);
        let keep = match mutation {
            MutationType::TrailingComma => !has_comma(file, position),
            MutationType::Wrap | MutationType::WrapIndent => {
                shares_position || !file.follows_line_break(position)
            }
            MutationType::Indent => !previous
                .is_some_and(|(prev_position, prev)| prev_position == position && prev.is_wrap()),
            MutationType::OpenParen | MutationType::CloseParen => true,
        };

        if index == 0 && !keep && mutation == MutationType::WrapIndent && position == node_start {
            demote = true;
        }
        if keep {
            pruned.push((position, mutation));
        }
        previous = Some((position, mutation));
    }

    if demote {
        pruned = pruned
            .into_iter()
            .filter(|(_, mutation)| *mutation != MutationType::Indent)
            .map(|(position, mutation)| match mutation {
                MutationType::WrapIndent => (position, MutationType::Wrap),
                other => (position, other),
            })
            .collect();
    }

    pruned
}

fn has_comma(file: &SourceFile, position: Position) -> bool {
    let is_comma = |token: &tuck_syntax::SyntaxToken| token.kind() == SyntaxKind::COMMA;
    file.token_starting_at(position).is_some_and(is_comma)
        || file.prev_significant(position).is_some_and(is_comma)
}
