//! Collapsing a tucked construct back onto one line.
//!
//! Unwrapping walks the same plan the wrapping rules produce, but instead of
//! inserting a break at each point it removes the break that is there.

use std::collections::BTreeSet;

use tuck_syntax::ast::{AstNode, Collection};
use tuck_syntax::{SourceFile, SyntaxKind};

use crate::resolve::{Construct, Target};
use crate::wrapping::{MutationType, rules};
use crate::{Edit, Range, TuckError};

/// Compute the edits that join `target` onto a single line.
///
/// Breaks preceded by a comment are kept, since joining them would comment
/// out the code that follows. Interior lines of multi-line elements are not
/// touched.
pub fn unwrap(file: &SourceFile, target: &Target) -> Result<Vec<Edit>, TuckError> {
    let summary = rules::summarise(file, target);
    let lone_tuple_element = target.construct == Construct::Tuple
        && Collection::cast(target.node.clone())
            .is_some_and(|tuple| tuple.elements().count() == 1);

    let mut edits = Vec::new();
    let mut seen = BTreeSet::new();
    let mut previous = None;

    for &(position, mutation) in &summary {
        let follows_paren = previous == Some((position, MutationType::OpenParen));
        previous = Some((position, mutation));
        if !mutation.is_wrap() || follows_paren || !seen.insert(position) {
            continue;
        }

        let Some(before) = file.token_before(position) else {
            continue;
        };
        let gap_start = file.end(before);
        if before.kind() == SyntaxKind::COMMENT || gap_start.line == position.line {
            continue;
        }

        let closes = file
            .token_starting_at(position)
            .is_some_and(|token| token.kind().is_closing_bracket());
        let edit = if closes {
            let drop_comma = before.kind() == SyntaxKind::COMMA && !lone_tuple_element;
            let start = if drop_comma { file.start(before) } else { gap_start };
            Edit::delete(start, position)?
        } else {
            let joiner = if before.kind().is_opening_bracket() { "" } else { " " };
            Edit::replace(Range::new(gap_start, position)?, joiner)
        };
        edits.push(edit);
    }

    Ok(edits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve;
    use pretty_assertions::assert_eq;
    use tuck_syntax::Position;

    fn unwrap_at(source: &str, line: usize, col: usize) -> String {
        let file = tuck_syntax::parse(source, "demo.py").unwrap();
        let target = resolve(&file, Position::new(line, col)).unwrap();
        let edits = unwrap(&file, &target).unwrap();
        crate::apply_edits(source, &edits)
    }

    #[test]
    fn trailing_comma_goes_with_the_break() {
        let source = "foo(\n    'abcd',\n    1234,\n)\n";
        assert_eq!(unwrap_at(source, 1, 1), "foo('abcd', 1234)\n");
    }

    #[test]
    fn lone_tuple_element_keeps_its_comma() {
        let source = "x = (\n    1,\n)\n";
        assert_eq!(unwrap_at(source, 1, 4), "x = (1,)\n");
    }

    #[test]
    fn comments_hold_their_break() {
        let source = "foo(\n    a,  # first\n    b,\n)\n";
        assert_eq!(unwrap_at(source, 1, 1), "foo(a,  # first\n    b)\n");
    }

    #[test]
    fn single_line_construct_has_nothing_to_do() {
        let file = tuck_syntax::parse("foo(a, b)\n", "demo.py").unwrap();
        let target = resolve(&file, Position::new(1, 1)).unwrap();
        assert_eq!(unwrap(&file, &target).unwrap(), vec![]);
    }
}
