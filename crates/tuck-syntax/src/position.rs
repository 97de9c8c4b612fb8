//! Line/column positions and the index that maps them to byte offsets.

use std::fmt;

use rowan::TextSize;

/// A location in a document: 1-based line, 0-based column.
///
/// Columns count characters, not bytes, so a position is stable regardless of
/// how the line is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Byte offsets of the start of every line in a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.char_indices()
                .filter(|&(_, c)| c == '\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    /// Number of lines; a trailing line ending opens an (empty) final line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte range of a 1-based line, line ending included.
    pub fn line_range(&self, text: &str, line: usize) -> Option<std::ops::Range<usize>> {
        let start = *self.line_starts.get(line.checked_sub(1)?)?;
        let end = self.line_starts.get(line).copied().unwrap_or(text.len());
        Some(start..end)
    }

    pub fn position(&self, text: &str, offset: TextSize) -> Position {
        let offset = usize::from(offset).min(text.len());
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line - 1];
        let col = text[line_start..offset].chars().count();
        Position::new(line, col)
    }

    /// Byte offset of a position, clamped to the document and to the content
    /// of its line.
    pub fn offset(&self, text: &str, position: Position) -> TextSize {
        let Some(range) = self.line_range(text, position.line.max(1)) else {
            return text_size(text.len());
        };
        let line = &text[range.clone()];
        let content = line.trim_end_matches(['\n', '\r']);
        let within = content
            .char_indices()
            .nth(position.col)
            .map_or(content.len(), |(i, _)| i);
        text_size(range.start + within)
    }
}

pub(crate) fn text_size(offset: usize) -> TextSize {
    TextSize::try_from(offset).unwrap_or(TextSize::from(u32::MAX))
}
