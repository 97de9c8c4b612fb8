//! # tuck-syntax
//!
//! A lossless Python syntax tree using [Rowan], built from a [tree-sitter]
//! parse and following the [rust-analyzer] architecture model.
//!
//! [Rowan]: https://docs.rs/rowan
//! [tree-sitter]: https://docs.rs/tree-sitter
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! ## Why two trees?
//!
//! tree-sitter is a robust Python parser and tells us precisely where a
//! document stops being valid, but its tree is shaped by the grammar and
//! skips whitespace. The wrapping engine needs the opposite: every byte
//! (so edits can be computed against the exact source) arranged in the
//! shapes Python's own `ast` module uses (so rules read "the arguments of a
//! call" rather than "the named children of an `argument_list`").
//!
//! ```text
//! Source Text → tree-sitter → Tree → Lowering → Sink → Rowan Tree
//!               (Python grammar)     (ast shapes)      (GreenNodeBuilder)
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! tuck-syntax/
//! ├── lib.rs           # This file - public API and tree shape tests
//! ├── syntax_kind.rs   # SyntaxKind enum (tokens + nodes) and Rowan integration
//! ├── position.rs      # Line/column positions and the line index
//! ├── source_file.rs   # Parsed document with its token stream
//! ├── ast.rs           # Typed views over nodes
//! ├── error.rs         # SyntaxError
//! ├── validation.rs    # Python 3 rules the grammar lets through
//! └── lowering/
//!     ├── mod.rs       # tree-sitter node → Rowan node/token decisions
//!     └── sink.rs      # Builds the green tree, filling gaps with trivia
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use tuck_syntax::{parse, SyntaxKind};
//!
//! let file = parse("foo(a, b)\n", "demo.py").unwrap();
//!
//! // The tree preserves all text
//! assert_eq!(file.root().text().to_string(), "foo(a, b)\n");
//!
//! let statement = file.root().first_child().unwrap();
//! assert_eq!(statement.kind(), SyntaxKind::EXPR_STMT);
//! assert_eq!(statement.first_child().unwrap().kind(), SyntaxKind::CALL);
//! ```

pub mod ast;
mod error;
mod lowering;
mod position;
mod source_file;
pub mod syntax_kind;
mod validation;

pub use error::SyntaxError;
pub use position::{LineIndex, Position};
pub use rowan::{TextRange, TextSize};
pub use source_file::{Direction, SourceFile, first_significant_token, last_significant_token};
pub use syntax_kind::{PythonLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

use tree_sitter::{Node, Parser};

/// Parse Python source into a [`SourceFile`].
///
/// Documents tree-sitter could only parse by error recovery are rejected, as
/// are Python 2 statements and misordered arguments or parameters that the
/// grammar accepts but Python 3 does not. `source_name` is only used in error
/// messages.
pub fn parse(source: &str, source_name: &str) -> Result<SourceFile, SyntaxError> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_python::LANGUAGE.into())?;
    let tree = parser.parse(source, None).ok_or(SyntaxError::NoTree)?;

    let module = tree.root_node();
    if module.has_error() {
        return Err(syntax_error(module, source_name));
    }
    if let Some((culprit, message)) = validation::first_violation(module) {
        return Err(SyntaxError::InvalidSyntax {
            message: message.to_string(),
            source_name: source_name.to_string(),
            line: culprit.start_position().row + 1,
        });
    }

    let green = lowering::lower(module, source);
    Ok(SourceFile::new(SyntaxNode::new_root(green), source.to_owned()))
}

fn syntax_error(module: Node<'_>, source_name: &str) -> SyntaxError {
    let culprit = first_error(module).unwrap_or(module);
    let message = if culprit.is_missing() {
        format!("expected '{}'", culprit.kind())
    } else {
        "invalid syntax".to_string()
    };
    SyntaxError::InvalidSyntax {
        message,
        source_name: source_name.to_string(),
        line: culprit.start_position().row + 1,
    }
}

/// The first `ERROR` or `MISSING` node in document order.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error())
        .find_map(first_error)
}
