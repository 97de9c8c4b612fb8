//! A parsed document together with its token stream and line index.

use rowan::TextSize;

use crate::position::{LineIndex, Position};
use crate::syntax_kind::{SyntaxKind, SyntaxNode, SyntaxToken};

/// Which way [`SourceFile::find_token`] scans from its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Tokens starting at or after the anchor, nearest first.
    Forward,
    /// Tokens ending at or before the anchor, nearest first.
    Backward,
}

/// A parsed Python document.
///
/// Holds the syntax tree plus a flat, ordered copy of every token so position
/// based lookups are binary searches rather than tree walks.
#[derive(Debug, Clone)]
pub struct SourceFile {
    root: SyntaxNode,
    tokens: Vec<SyntaxToken>,
    lines: LineIndex,
    text: String,
}

impl SourceFile {
    pub(crate) fn new(root: SyntaxNode, text: String) -> Self {
        let tokens = root
            .descendants_with_tokens()
            .filter_map(|element| element.into_token())
            .collect();
        let lines = LineIndex::new(&text);
        Self {
            root,
            tokens,
            lines,
            text,
        }
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[SyntaxToken] {
        &self.tokens
    }

    pub fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    pub fn position(&self, offset: TextSize) -> Position {
        self.lines.position(&self.text, offset)
    }

    pub fn offset(&self, position: Position) -> TextSize {
        self.lines.offset(&self.text, position)
    }

    pub fn start(&self, token: &SyntaxToken) -> Position {
        self.position(token.text_range().start())
    }

    pub fn end(&self, token: &SyntaxToken) -> Position {
        self.position(token.text_range().end())
    }

    /// The token that begins exactly at `position`.
    pub fn token_starting_at(&self, position: Position) -> Option<&SyntaxToken> {
        let offset = self.offset(position);
        let index = self.first_starting_at_or_after(offset);
        self.tokens
            .get(index)
            .filter(|token| token.text_range().start() == offset)
    }

    /// Scan from `position` in `direction` for the first token matching
    /// `predicate`.
    pub fn find_token(
        &self,
        position: Position,
        direction: Direction,
        mut predicate: impl FnMut(&SyntaxToken) -> bool,
    ) -> Option<&SyntaxToken> {
        let offset = self.offset(position);
        match direction {
            Direction::Forward => {
                let index = self.first_starting_at_or_after(offset);
                self.tokens[index..].iter().find(|token| predicate(token))
            }
            Direction::Backward => {
                let index = self.first_ending_after(offset);
                self.tokens[..index].iter().rev().find(|token| predicate(token))
            }
        }
    }

    /// The nearest code token ending at or before `position`.
    pub fn prev_significant(&self, position: Position) -> Option<&SyntaxToken> {
        self.find_token(position, Direction::Backward, |token| {
            !token.kind().is_insignificant()
        })
    }

    /// The nearest code token starting at or after `position`.
    pub fn next_significant(&self, position: Position) -> Option<&SyntaxToken> {
        self.find_token(position, Direction::Forward, |token| {
            !token.kind().is_insignificant()
        })
    }

    /// The nearest token ending at or before `position` that is not trivia;
    /// unlike [`Self::prev_significant`] this stops at comments.
    pub fn token_before(&self, position: Position) -> Option<&SyntaxToken> {
        self.find_token(position, Direction::Backward, |token| {
            !token.kind().is_trivia()
        })
    }

    /// True when nothing but whitespace separates `position` from the start
    /// of its logical line.
    pub fn follows_line_break(&self, position: Position) -> bool {
        let previous = self.find_token(position, Direction::Backward, |token| {
            token.kind() != SyntaxKind::WHITESPACE
        });
        previous.is_none_or(|token| {
            matches!(
                token.kind(),
                SyntaxKind::NEWLINE | SyntaxKind::LINE_CONTINUATION
            )
        })
    }

    /// The first token, comments included, that starts on a 1-based line.
    pub fn first_token_on_line(&self, line: usize) -> Option<&SyntaxToken> {
        let range = self.lines.line_range(&self.text, line)?;
        let start = TextSize::try_from(range.start).ok()?;
        let end = TextSize::try_from(range.end).ok()?;
        let index = self.first_starting_at_or_after(start);
        self.tokens[index..]
            .iter()
            .take_while(|token| token.text_range().start() < end)
            .find(|token| {
                !matches!(
                    token.kind(),
                    SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE
                )
            })
    }

    /// Leading whitespace of a 1-based line, verbatim.
    pub fn line_indent(&self, line: usize) -> &str {
        let Some(range) = self.lines.line_range(&self.text, line) else {
            return "";
        };
        let content = &self.text[range];
        let len = content.len() - content.trim_start_matches([' ', '\t']).len();
        &content[..len]
    }

    /// Terminator of a 1-based line. A last line without one takes the
    /// document's first terminator, or `"\n"` when there is none.
    pub fn line_ending(&self, line: usize) -> &'static str {
        let own = self
            .lines
            .line_range(&self.text, line)
            .map(|range| &self.text[range])
            .filter(|text| text.ends_with('\n'));
        let terminated = own.or_else(|| self.text.split_inclusive('\n').next());
        if terminated.is_some_and(|text| text.ends_with("\r\n")) {
            "\r\n"
        } else {
            "\n"
        }
    }

    fn first_starting_at_or_after(&self, offset: TextSize) -> usize {
        self.tokens
            .partition_point(|token| token.text_range().start() < offset)
    }

    fn first_ending_after(&self, offset: TextSize) -> usize {
        self.tokens
            .partition_point(|token| token.text_range().end() <= offset)
    }
}

/// First token of a node that carries code.
pub fn first_significant_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| !token.kind().is_insignificant())
}

/// Last token of a node that carries code.
pub fn last_significant_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    let range = node.text_range();
    let mut token = node.last_token()?;
    while token.kind().is_insignificant() {
        token = token.prev_token()?;
        if token.text_range().start() < range.start() {
            return None;
        }
    }
    Some(token)
}
