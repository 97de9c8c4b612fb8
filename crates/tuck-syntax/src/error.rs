use thiserror::Error;

/// Reasons a document could not be turned into a syntax tree.
#[derive(Debug, Error)]
pub enum SyntaxError {
    /// The document is not valid Python 3.
    #[error("{message} ({source_name}, line {line})")]
    InvalidSyntax {
        message: String,
        source_name: String,
        line: usize,
    },

    #[error("Failed to load the Python grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    #[error("The parser did not produce a tree")]
    NoTree,
}

impl SyntaxError {
    /// 1-based line the error was found on, if it points into the document.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::InvalidSyntax { line, .. } => Some(*line),
            Self::Grammar(_) | Self::NoTree => None,
        }
    }
}
