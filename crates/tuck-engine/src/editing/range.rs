use tuck_syntax::Position;

use crate::TuckError;

/// A span between two positions, `start <= end`.
///
/// Ordering compares starts first and then ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Range {
    start: Position,
    end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Result<Self, TuckError> {
        if start > end {
            return Err(TuckError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A zero-width range: an insertion point.
    pub const fn empty(at: Position) -> Self {
        Self { start: at, end: at }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
