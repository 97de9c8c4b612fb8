use tuck_syntax::Position;

use super::Range;
use crate::TuckError;

/// Replace the text in `range` with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edit {
    pub range: Range,
    pub new_text: String,
}

impl Edit {
    pub fn insert(at: Position, new_text: impl Into<String>) -> Self {
        Self::replace(Range::empty(at), new_text)
    }

    pub fn replace(range: Range, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }

    pub fn delete(start: Position, end: Position) -> Result<Self, TuckError> {
        Ok(Self::replace(Range::new(start, end)?, ""))
    }

    pub fn is_insertion(&self) -> bool {
        self.range.is_empty()
    }
}
