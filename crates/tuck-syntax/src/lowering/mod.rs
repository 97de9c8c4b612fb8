//! Lowering of tree-sitter's Python CST into the Rowan tree.
//!
//! tree-sitter gives us a reliable, error-aware parse, but its node shapes
//! follow the grammar: parenthesised expressions are nodes, `a and b and c` is
//! nested, `elif` hangs off the `if` as a sibling clause, and a generator used
//! as the only argument of a call swallows the call's parentheses. The engine
//! wants the shapes of Python's `ast` module instead, so lowering walks the
//! tree-sitter tree once and decides, per node, whether it becomes a Rowan
//! node, a single token, or disappears with its children lifted into the
//! parent.

mod sink;

use tree_sitter::Node;

use crate::syntax_kind::SyntaxKind;
use rowan::GreenNode;
use sink::Sink;

/// Lower a tree-sitter `module` node into a lossless green tree.
pub(crate) fn lower(module: Node<'_>, source: &str) -> GreenNode {
    let mut lowering = Lowering {
        sink: Sink::new(source),
        source,
    };
    lowering.sink.start_node(SyntaxKind::ROOT, 0);
    lowering.children(module);
    lowering.sink.finish()
}

const PARAMETER_LISTS: &[&str] = &["parameters", "lambda_parameters"];

const PARAMETER_KINDS: &[&str] = &[
    "default_parameter",
    "typed_parameter",
    "typed_default_parameter",
    "list_splat_pattern",
    "dictionary_splat_pattern",
    "keyword_separator",
    "positional_separator",
];

struct Lowering<'s> {
    sink: Sink<'s>,
    source: &'s str,
}

impl Lowering<'_> {
    fn children(&mut self, node: Node<'_>) {
        for (child, field) in children_of(node) {
            self.lower(child, node, field);
        }
    }

    fn lower(&mut self, node: Node<'_>, parent: Node<'_>, field: Option<&'static str>) {
        if node.start_byte() == node.end_byte() {
            return;
        }
        if !node.is_named() {
            let kind = punctuation_kind(node.kind());
            return self.leaf(kind, node);
        }

        match node.kind() {
            "comment" => self.leaf(SyntaxKind::COMMENT, node),
            "line_continuation" => self.leaf(SyntaxKind::LINE_CONTINUATION, node),
            "string" if parent.kind() == "concatenated_string" => {
                self.leaf(SyntaxKind::STRING, node)
            }
            "string" => self.wrapped_leaf(SyntaxKind::CONSTANT, SyntaxKind::STRING, node),
            "integer" | "float" => self.wrapped_leaf(SyntaxKind::CONSTANT, SyntaxKind::NUMBER, node),
            "true" | "false" | "none" => {
                self.wrapped_leaf(SyntaxKind::CONSTANT, SyntaxKind::KEYWORD, node)
            }
            "ellipsis" => self.wrapped_leaf(SyntaxKind::CONSTANT, SyntaxKind::OPERATOR, node),
            "identifier" => self.identifier(node, parent, field),
            "expression_statement" => self.expression_statement(node),
            "assignment" if parent.kind() == "assignment" => self.children(node),
            "assignment" if node.child_by_field_name("type").is_some() => {
                self.node(SyntaxKind::ANN_ASSIGN, node)
            }
            "assignment" => self.node(SyntaxKind::ASSIGN, node),
            "boolean_operator" if same_operator(node, parent) => self.children(node),
            "boolean_operator" => self.node(SyntaxKind::BOOL_OP, node),
            "function_definition" => {
                let is_async = children_of(node)
                    .first()
                    .is_some_and(|(child, _)| child.kind() == "async");
                let kind = if is_async {
                    SyntaxKind::ASYNC_FUNCTION_DEF
                } else {
                    SyntaxKind::FUNCTION_DEF
                };
                self.node(kind, node)
            }
            "generator_expression" => {
                let owns_call_parens = parent.kind() == "call" && field == Some("arguments");
                self.generator(node, owns_call_parens)
            }
            "subscript" => self.subscript(node),
            kind if PARAMETER_KINDS.contains(&kind) && PARAMETER_LISTS.contains(&parent.kind()) => {
                self.node(SyntaxKind::PARAM, node)
            }
            "list_splat" | "list_splat_pattern" => self.node(SyntaxKind::STARRED, node),
            "dictionary_splat" | "dictionary_splat_pattern" => {
                self.node(SyntaxKind::DOUBLE_STARRED, node)
            }
            kind => match node_kind(kind) {
                Some(kind) => self.node(kind, node),
                None => self.transparent(node),
            },
        }
    }

    fn leaf(&mut self, kind: SyntaxKind, node: Node<'_>) {
        self.sink.token(kind, node.start_byte(), node.end_byte());
    }

    /// A whole subtree rendered as one token inside a node of its own.
    fn wrapped_leaf(&mut self, node_kind: SyntaxKind, token_kind: SyntaxKind, node: Node<'_>) {
        self.sink.start_node(node_kind, node.start_byte());
        self.leaf(token_kind, node);
        self.sink.finish_node();
    }

    fn node(&mut self, kind: SyntaxKind, node: Node<'_>) {
        self.sink.start_node(kind, node.start_byte());
        self.transparent(node);
        self.sink.finish_node();
    }

    /// Lift the node's children into the current parent. Named leaves without
    /// a kind of their own become tokens classified by their text.
    fn transparent(&mut self, node: Node<'_>) {
        if node.child_count() == 0 {
            let text = &self.source[node.start_byte()..node.end_byte()];
            self.leaf(named_leaf_kind(text), node);
        } else {
            self.children(node);
        }
    }

    fn identifier(&mut self, node: Node<'_>, parent: Node<'_>, field: Option<&'static str>) {
        let parent_kind = parent.kind();
        if PARAMETER_LISTS.contains(&parent_kind) {
            self.wrapped_leaf(SyntaxKind::PARAM, SyntaxKind::IDENT, node);
        } else if PARAMETER_KINDS.contains(&parent_kind)
            || (matches!(field, Some("name" | "attribute")) && parent_kind != "named_expression")
        {
            self.leaf(SyntaxKind::IDENT, node);
        } else {
            self.wrapped_leaf(SyntaxKind::NAME, SyntaxKind::IDENT, node);
        }
    }

    /// Assignments are statements in their own right; bare `a, b` becomes a
    /// tuple expression statement.
    fn expression_statement(&mut self, node: Node<'_>) {
        let children = children_of(node);
        let mut expressions = children
            .iter()
            .filter(|(child, _)| child.is_named() && !child.is_extra());
        let first = expressions.next();
        let single = expressions.next().is_none();

        if single
            && first.is_some_and(|(child, _)| {
                matches!(child.kind(), "assignment" | "augmented_assignment")
            })
        {
            return self.children(node);
        }

        self.sink.start_node(SyntaxKind::EXPR_STMT, node.start_byte());
        let is_tuple = children.iter().any(|(child, _)| child.kind() == ",");
        if is_tuple {
            self.sink.start_node(SyntaxKind::TUPLE, node.start_byte());
        }
        self.children(node);
        if is_tuple {
            self.sink.finish_node();
        }
        self.sink.finish_node();
    }

    /// A generator's parentheses are never part of it. Those of
    /// `foo(x for x in y)` belong to the call, so they are emitted into a
    /// synthesised argument list around the generator.
    fn generator(&mut self, node: Node<'_>, owns_call_parens: bool) {
        if owns_call_parens {
            self.sink.start_node(SyntaxKind::ARG_LIST, node.start_byte());
        }
        let mut started = false;
        for (child, field) in children_of(node) {
            let is_paren = !child.is_named() && matches!(child.kind(), "(" | ")");
            if !is_paren && !started {
                self.sink
                    .start_node(SyntaxKind::GENERATOR_EXP, child.start_byte());
                started = true;
            }
            if is_paren && child.kind() == ")" && started {
                self.sink.finish_node();
                started = false;
            }
            self.lower(child, node, field);
        }
        if started {
            self.sink.finish_node();
        }
        if owns_call_parens {
            self.sink.finish_node();
        }
    }

    /// `x[a, b]` indexes with a tuple, which the grammar leaves implicit.
    fn subscript(&mut self, node: Node<'_>) {
        let children = children_of(node);
        let indices = children
            .iter()
            .filter(|(_, field)| *field == Some("subscript"))
            .count();
        let has_comma = children.iter().any(|(child, _)| child.kind() == ",");
        let is_tuple = indices > 1 || has_comma;

        self.sink.start_node(SyntaxKind::SUBSCRIPT, node.start_byte());
        let mut open = false;
        for (child, field) in children {
            if is_tuple && !open && field == Some("subscript") {
                self.sink.start_node(SyntaxKind::TUPLE, child.start_byte());
                open = true;
            }
            if open && child.kind() == "]" {
                self.sink.finish_node();
                open = false;
            }
            self.lower(child, node, field);
        }
        if open {
            self.sink.finish_node();
        }
        self.sink.finish_node();
    }
}

fn children_of<'t>(node: Node<'t>) -> Vec<(Node<'t>, Option<&'static str>)> {
    let mut cursor = node.walk();
    let mut children = Vec::new();
    if cursor.goto_first_child() {
        loop {
            children.push((cursor.node(), cursor.field_name()));
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }
    children
}

/// A nested chain of the same operator is flattened into its parent, the way
/// Python's `ast.BoolOp` holds every operand of `a and b and c`.
fn same_operator(node: Node<'_>, parent: Node<'_>) -> bool {
    let operator = |n: Node<'_>| n.child_by_field_name("operator").map(|op| op.kind());
    parent.kind() == "boolean_operator" && operator(node).is_some() && operator(node) == operator(parent)
}

fn node_kind(kind: &str) -> Option<SyntaxKind> {
    let kind = match kind {
        "return_statement" => SyntaxKind::RETURN,
        "pass_statement" => SyntaxKind::PASS,
        "raise_statement" => SyntaxKind::RAISE,
        "import_statement" => SyntaxKind::IMPORT,
        "import_from_statement" | "future_import_statement" => SyntaxKind::IMPORT_FROM,
        "global_statement" => SyntaxKind::GLOBAL,
        "nonlocal_statement" => SyntaxKind::NONLOCAL,
        "assert_statement" => SyntaxKind::ASSERT,
        "delete_statement" => SyntaxKind::DELETE,
        "break_statement" => SyntaxKind::BREAK,
        "continue_statement" => SyntaxKind::CONTINUE,
        "augmented_assignment" => SyntaxKind::AUG_ASSIGN,
        "if_statement" | "elif_clause" => SyntaxKind::IF,
        "for_statement" => SyntaxKind::FOR,
        "while_statement" => SyntaxKind::WHILE,
        "with_statement" => SyntaxKind::WITH,
        "try_statement" => SyntaxKind::TRY,
        "except_clause" | "except_group_clause" => SyntaxKind::EXCEPT_HANDLER,
        "match_statement" => SyntaxKind::MATCH,
        "case_clause" => SyntaxKind::MATCH_CASE,
        "class_definition" => SyntaxKind::CLASS_DEF,
        "block" => SyntaxKind::BLOCK,
        "parameters" => SyntaxKind::PARAMETERS,
        "argument_list" => SyntaxKind::ARG_LIST,
        "pair" => SyntaxKind::PAIR,
        "if_clause" => SyntaxKind::COMPREHENSION_IF,
        "type_parameter" => SyntaxKind::TYPE_PARAMS,
        "lambda" => SyntaxKind::LAMBDA,
        "binary_operator" => SyntaxKind::BIN_OP,
        "unary_operator" | "not_operator" => SyntaxKind::UNARY_OP,
        "comparison_operator" => SyntaxKind::COMPARE,
        "conditional_expression" => SyntaxKind::IF_EXP,
        "call" => SyntaxKind::CALL,
        "keyword_argument" => SyntaxKind::KEYWORD_ARG,
        "attribute" => SyntaxKind::ATTRIBUTE,
        "slice" => SyntaxKind::SLICE,
        "concatenated_string" => SyntaxKind::CONSTANT,
        "list" | "list_pattern" => SyntaxKind::LIST,
        "tuple" | "tuple_pattern" | "expression_list" | "pattern_list" => SyntaxKind::TUPLE,
        "set" => SyntaxKind::SET,
        "dictionary" => SyntaxKind::DICT,
        "list_comprehension" => SyntaxKind::LIST_COMP,
        "set_comprehension" => SyntaxKind::SET_COMP,
        "dictionary_comprehension" => SyntaxKind::DICT_COMP,
        "for_in_clause" => SyntaxKind::COMPREHENSION,
        "await" => SyntaxKind::AWAIT,
        "yield" => SyntaxKind::YIELD,
        "named_expression" => SyntaxKind::NAMED_EXPR,
        _ => return None,
    };
    Some(kind)
}

/// Kind of an anonymous grammar token, which tree-sitter names by its text.
fn punctuation_kind(text: &str) -> SyntaxKind {
    match text {
        "(" => SyntaxKind::L_PAREN,
        ")" => SyntaxKind::R_PAREN,
        "[" => SyntaxKind::L_BRACK,
        "]" => SyntaxKind::R_BRACK,
        "{" => SyntaxKind::L_CURLY,
        "}" => SyntaxKind::R_CURLY,
        "," => SyntaxKind::COMMA,
        ":" => SyntaxKind::COLON,
        "." => SyntaxKind::DOT,
        "*" => SyntaxKind::STAR,
        "**" => SyntaxKind::DOUBLE_STAR,
        text if text.starts_with(|c: char| c.is_alphabetic() || c == '_') => SyntaxKind::KEYWORD,
        _ => SyntaxKind::OPERATOR,
    }
}

fn named_leaf_kind(text: &str) -> SyntaxKind {
    match text.chars().next() {
        Some(c) if c.is_alphabetic() || c == '_' => SyntaxKind::IDENT,
        Some(c) if c.is_ascii_digit() => SyntaxKind::NUMBER,
        _ => punctuation_kind(text),
    }
}
