use tuck_syntax::{Position, SyntaxError, SyntaxKind};

/// Everything that can stop a set of positions from being processed.
///
/// Each variant has a stable machine-readable [`code`](TuckError::code) which
/// editor integrations match on; the display text is for humans.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TuckError {
    #[error("{message}")]
    TargetSyntax { message: String, line: Option<usize> },

    #[error("No AST nodes were found!")]
    NoNodeFound,

    #[error("No suitable node found (stack: {})", stack_names(.stack))]
    NoSuitableNodeFound { stack: Vec<SyntaxKind> },

    #[error("No supported nodes found (stack: {})", stack_names(.stack))]
    NoSupportedNodeFound { stack: Vec<SyntaxKind> },

    #[error(
        "Unable to perform wrapping as the resulting edits contain overlaps. \
         Consider wrapping the positions one at a time instead. "
    )]
    EditsOverlap,

    #[error("Start must be before end ({start} > {end})")]
    InvalidRange { start: Position, end: Position },
}

impl TuckError {
    pub fn code(&self) -> &'static str {
        match self {
            TuckError::TargetSyntax { .. } => "target_syntax_error",
            TuckError::NoNodeFound => "no_node_found",
            TuckError::NoSuitableNodeFound { .. } => "no_suitable_node_found",
            TuckError::NoSupportedNodeFound { .. } => "no_supported_node_found",
            TuckError::EditsOverlap => "edits_overlap",
            TuckError::InvalidRange { .. } => "invalid_range",
        }
    }
}

impl From<SyntaxError> for TuckError {
    fn from(error: SyntaxError) -> Self {
        TuckError::TargetSyntax {
            line: error.line(),
            message: error.to_string(),
        }
    }
}

fn stack_names(stack: &[SyntaxKind]) -> String {
    stack
        .iter()
        .map(|kind| kind.display_name())
        .collect::<Vec<_>>()
        .join(" > ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stacks_render_with_python_names() {
        let error = TuckError::NoSuitableNodeFound {
            stack: vec![SyntaxKind::IF, SyntaxKind::RAISE],
        };
        assert_eq!(
            error.to_string(),
            "No suitable node found (stack: If > Raise)"
        );
        assert_eq!(error.code(), "no_suitable_node_found");
    }

    #[test]
    fn overlap_message_keeps_its_trailing_space() {
        let message = TuckError::EditsOverlap.to_string();
        assert!(message.ends_with("one at a time instead. "));
    }

    #[test]
    fn syntax_errors_keep_their_line() {
        let error = tuck_syntax::parse("invalid code", "demo.py").unwrap_err();
        let error = TuckError::from(error);
        assert_eq!(error.code(), "target_syntax_error");
        assert_eq!(error.to_string(), "invalid syntax (demo.py, line 1)");
        assert!(matches!(error, TuckError::TargetSyntax { line: Some(1), .. }));
    }
}
