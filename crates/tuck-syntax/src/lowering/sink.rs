//! Sink for building a Rowan green tree from byte ranges of the source.

use rowan::{GreenNode, GreenNodeBuilder};

use crate::syntax_kind::SyntaxKind;

/// Accumulates tokens and nodes into a Rowan tree.
///
/// The sink tracks how much of the source has been emitted. Any gap between
/// the cursor and the next token is lexed into trivia before that token (or
/// before a node starts), so whitespace always lands between nodes rather
/// than at their edges, and the finished tree covers every byte.
pub(crate) struct Sink<'s> {
    builder: GreenNodeBuilder<'static>,
    source: &'s str,
    cursor: usize,
}

impl<'s> Sink<'s> {
    pub(crate) fn new(source: &'s str) -> Self {
        Self {
            builder: GreenNodeBuilder::new(),
            source,
            cursor: 0,
        }
    }

    pub(crate) fn start_node(&mut self, kind: SyntaxKind, at: usize) {
        self.trivia(at);
        self.builder.start_node(kind.into());
    }

    pub(crate) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    /// Emit `source[start..end]` as a single token.
    pub(crate) fn token(&mut self, kind: SyntaxKind, start: usize, end: usize) {
        let end = end.min(self.source.len());
        if end <= self.cursor {
            return;
        }
        self.trivia(start);
        let start = start.max(self.cursor);
        self.builder.token(kind.into(), &self.source[start..end]);
        self.cursor = end;
    }

    /// Flush the remaining source as trivia and close the root node.
    pub(crate) fn finish(mut self) -> GreenNode {
        self.trivia(self.source.len());
        self.builder.finish_node();
        self.builder.finish()
    }

    fn trivia(&mut self, until: usize) {
        let until = until.min(self.source.len());
        while self.cursor < until {
            let rest = &self.source[self.cursor..until];
            let (kind, len) = lex_gap(rest);
            self.builder.token(kind.into(), &rest[..len]);
            self.cursor += len;
        }
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Lex the first token of text that the parser did not claim.
fn lex_gap(rest: &str) -> (SyntaxKind, usize) {
    if rest.starts_with("\r\n") {
        return (SyntaxKind::NEWLINE, 2);
    }
    if rest.starts_with("\\\r\n") {
        return (SyntaxKind::LINE_CONTINUATION, 3);
    }
    if rest.starts_with("\\\n") {
        return (SyntaxKind::LINE_CONTINUATION, 2);
    }
    match rest.chars().next() {
        Some('\n' | '\r') => (SyntaxKind::NEWLINE, 1),
        Some('#') => (
            SyntaxKind::COMMENT,
            rest.find(['\n', '\r']).unwrap_or(rest.len()),
        ),
        Some(c) if is_blank(c) => (
            SyntaxKind::WHITESPACE,
            rest.find(|c| !is_blank(c)).unwrap_or(rest.len()),
        ),
        Some(c) => (SyntaxKind::OPERATOR, c.len_utf8()),
        None => (SyntaxKind::WHITESPACE, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax_kind::SyntaxNode;
    use rstest::rstest;

    #[test]
    fn sink_fills_gaps_with_trivia() {
        let source = "a  b\n";
        let mut sink = Sink::new(source);
        sink.start_node(SyntaxKind::ROOT, 0);
        sink.token(SyntaxKind::IDENT, 0, 1);
        sink.token(SyntaxKind::IDENT, 3, 4);
        let tree = SyntaxNode::new_root(sink.finish());

        assert_eq!(tree.text().to_string(), source);
        let kinds: Vec<_> = tree
            .children_with_tokens()
            .map(|element| element.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::IDENT,
                SyntaxKind::WHITESPACE,
                SyntaxKind::IDENT,
                SyntaxKind::NEWLINE
            ]
        );
    }

    #[test]
    fn nodes_start_after_leading_trivia() {
        let source = "  x";
        let mut sink = Sink::new(source);
        sink.start_node(SyntaxKind::ROOT, 0);
        sink.start_node(SyntaxKind::NAME, 2);
        sink.token(SyntaxKind::IDENT, 2, 3);
        sink.finish_node();
        let tree = SyntaxNode::new_root(sink.finish());

        let name = tree.first_child().unwrap();
        assert_eq!(name.kind(), SyntaxKind::NAME);
        assert_eq!(u32::from(name.text_range().start()), 2);
    }

    #[rstest]
    #[case("\n", SyntaxKind::NEWLINE, 1)]
    #[case("\r\nx", SyntaxKind::NEWLINE, 2)]
    #[case("\\\n  x", SyntaxKind::LINE_CONTINUATION, 2)]
    #[case(" \t x", SyntaxKind::WHITESPACE, 3)]
    #[case("# note\n", SyntaxKind::COMMENT, 6)]
    #[case(";", SyntaxKind::OPERATOR, 1)]
    fn gaps_lex_into_trivia(#[case] gap: &str, #[case] kind: SyntaxKind, #[case] len: usize) {
        assert_eq!(lex_gap(gap), (kind, len));
    }
}
