//! SyntaxKind enum for all tokens and nodes in the Python CST.
//!
//! Following the rust-analyzer model, all tokens and nodes share a single enum.
//! Every byte in the source must appear as a token in the tree.
//!
//! Node kinds mirror the shape of Python's own `ast` module rather than the
//! tree-sitter grammar, so the wrapping engine can reason about "a call", "a
//! tuple" or "a function definition" without caring how the grammar spells
//! them.

/// All syntax kinds for the Python CST.
///
/// The `repr(u16)` ensures efficient storage in rowan's green tree.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens ===
    /// Horizontal whitespace (spaces, tabs, form feeds)
    WHITESPACE,
    /// Line ending
    NEWLINE,
    /// Backslash continuation, including the line ending it escapes
    LINE_CONTINUATION,
    /// `# ...` up to (not including) the line ending
    COMMENT,
    /// Identifier that is part of its parent rather than an expression
    IDENT,
    /// Reserved word, including `True`, `False` and `None`
    KEYWORD,
    /// Integer, float or imaginary literal
    NUMBER,
    /// Complete string literal, prefixes and interpolations included
    STRING,
    /// `(`
    L_PAREN,
    /// `)`
    R_PAREN,
    /// `[`
    L_BRACK,
    /// `]`
    R_BRACK,
    /// `{`
    L_CURLY,
    /// `}`
    R_CURLY,
    /// `,`
    COMMA,
    /// `:`
    COLON,
    /// `.`
    DOT,
    /// `*`
    STAR,
    /// `**`
    DOUBLE_STAR,
    /// Any other operator or delimiter (`=`, `->`, `+`, `@`, ...)
    OPERATOR,

    // === Statements ===
    /// Module
    ROOT,
    EXPR_STMT,
    ASSIGN,
    AUG_ASSIGN,
    ANN_ASSIGN,
    RETURN,
    PASS,
    RAISE,
    IMPORT,
    IMPORT_FROM,
    GLOBAL,
    NONLOCAL,
    ASSERT,
    DELETE,
    BREAK,
    CONTINUE,
    /// `if` statement; `elif` clauses nest as further `IF` nodes
    IF,
    FOR,
    WHILE,
    WITH,
    TRY,
    EXCEPT_HANDLER,
    MATCH,
    MATCH_CASE,
    FUNCTION_DEF,
    ASYNC_FUNCTION_DEF,
    CLASS_DEF,

    // === Structural nodes ===
    /// Indented suite of statements
    BLOCK,
    /// `(...)` of a function definition
    PARAMETERS,
    /// `(...)` of a call or class definition
    ARG_LIST,
    /// `key: value` inside a dict display or comprehension
    PAIR,
    /// `if` guard of a comprehension
    COMPREHENSION_IF,

    // === Expressions ===
    /// Single parameter of a function or lambda, including `*` and `/` markers
    PARAM,
    /// `[T, ...]` type parameter list
    TYPE_PARAMS,
    LAMBDA,
    BOOL_OP,
    BIN_OP,
    UNARY_OP,
    COMPARE,
    IF_EXP,
    CALL,
    KEYWORD_ARG,
    STARRED,
    DOUBLE_STARRED,
    ATTRIBUTE,
    SUBSCRIPT,
    SLICE,
    NAME,
    CONSTANT,
    LIST,
    TUPLE,
    SET,
    DICT,
    LIST_COMP,
    SET_COMP,
    DICT_COMP,
    GENERATOR_EXP,
    /// `for ... in ...` clause of a comprehension
    COMPREHENSION,
    AWAIT,
    YIELD,
    NAMED_EXPR,
}

impl SyntaxKind {
    /// Returns true if this kind represents a token.
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::OPERATOR as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns true if this kind is trivia (whitespace, line endings and
    /// continuations).
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::NEWLINE | Self::LINE_CONTINUATION
        )
    }

    /// Trivia and comments: everything that carries no code.
    pub fn is_insignificant(self) -> bool {
        self.is_trivia() || self == Self::COMMENT
    }

    /// Nodes that only group children and never stand for an expression or
    /// statement of their own.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            Self::BLOCK | Self::PARAMETERS | Self::ARG_LIST | Self::PAIR | Self::COMPREHENSION_IF
        )
    }

    pub fn is_opening_bracket(self) -> bool {
        matches!(self, Self::L_PAREN | Self::L_BRACK | Self::L_CURLY)
    }

    pub fn is_closing_bracket(self) -> bool {
        matches!(self, Self::R_PAREN | Self::R_BRACK | Self::R_CURLY)
    }

    /// The name Python's `ast` module uses for the equivalent node, used when
    /// reporting which nodes surround a position.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::ROOT => "Module",
            Self::EXPR_STMT => "Expr",
            Self::ASSIGN => "Assign",
            Self::AUG_ASSIGN => "AugAssign",
            Self::ANN_ASSIGN => "AnnAssign",
            Self::RETURN => "Return",
            Self::PASS => "Pass",
            Self::RAISE => "Raise",
            Self::IMPORT => "Import",
            Self::IMPORT_FROM => "ImportFrom",
            Self::GLOBAL => "Global",
            Self::NONLOCAL => "Nonlocal",
            Self::ASSERT => "Assert",
            Self::DELETE => "Delete",
            Self::BREAK => "Break",
            Self::CONTINUE => "Continue",
            Self::IF => "If",
            Self::FOR => "For",
            Self::WHILE => "While",
            Self::WITH => "With",
            Self::TRY => "Try",
            Self::EXCEPT_HANDLER => "ExceptHandler",
            Self::MATCH => "Match",
            Self::MATCH_CASE => "match_case",
            Self::FUNCTION_DEF => "FunctionDef",
            Self::ASYNC_FUNCTION_DEF => "AsyncFunctionDef",
            Self::CLASS_DEF => "ClassDef",
            Self::BLOCK => "Block",
            Self::PARAMETERS => "arguments",
            Self::ARG_LIST => "ArgList",
            Self::PAIR => "Pair",
            Self::COMPREHENSION_IF => "ComprehensionIf",
            Self::PARAM => "arg",
            Self::TYPE_PARAMS => "TypeParams",
            Self::LAMBDA => "Lambda",
            Self::BOOL_OP => "BoolOp",
            Self::BIN_OP => "BinOp",
            Self::UNARY_OP => "UnaryOp",
            Self::COMPARE => "Compare",
            Self::IF_EXP => "IfExp",
            Self::CALL => "Call",
            Self::KEYWORD_ARG | Self::DOUBLE_STARRED => "keyword",
            Self::STARRED => "Starred",
            Self::ATTRIBUTE => "Attribute",
            Self::SUBSCRIPT => "Subscript",
            Self::SLICE => "Slice",
            Self::NAME => "Name",
            Self::CONSTANT => "Constant",
            Self::LIST => "List",
            Self::TUPLE => "Tuple",
            Self::SET => "Set",
            Self::DICT => "Dict",
            Self::LIST_COMP => "ListComp",
            Self::SET_COMP => "SetComp",
            Self::DICT_COMP => "DictComp",
            Self::GENERATOR_EXP => "GeneratorExp",
            Self::COMPREHENSION => "comprehension",
            Self::AWAIT => "Await",
            Self::YIELD => "Yield",
            Self::NAMED_EXPR => "NamedExpr",
            Self::WHITESPACE => "WHITESPACE",
            Self::NEWLINE => "NEWLINE",
            Self::LINE_CONTINUATION => "LINE_CONTINUATION",
            Self::COMMENT => "COMMENT",
            Self::IDENT => "IDENT",
            Self::KEYWORD => "KEYWORD",
            Self::NUMBER => "NUMBER",
            Self::STRING => "STRING",
            Self::L_PAREN => "(",
            Self::R_PAREN => ")",
            Self::L_BRACK => "[",
            Self::R_BRACK => "]",
            Self::L_CURLY => "{",
            Self::R_CURLY => "}",
            Self::COMMA => ",",
            Self::COLON => ":",
            Self::DOT => ".",
            Self::STAR => "*",
            Self::DOUBLE_STAR => "**",
            Self::OPERATOR => "OPERATOR",
        }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PythonLang {}

impl rowan::Language for PythonLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::NAMED_EXPR as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<PythonLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<PythonLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<PythonLang>;

#[cfg(test)]
mod tests {
    use super::*;
    use rowan::Language;

    #[test]
    fn token_kinds_are_tokens() {
        assert!(SyntaxKind::WHITESPACE.is_token());
        assert!(SyntaxKind::STRING.is_token());
        assert!(SyntaxKind::OPERATOR.is_token());
    }

    #[test]
    fn node_kinds_are_nodes() {
        assert!(SyntaxKind::ROOT.is_node());
        assert!(SyntaxKind::CALL.is_node());
        assert!(SyntaxKind::NAMED_EXPR.is_node());
    }

    #[test]
    fn comments_are_insignificant_but_not_trivia() {
        assert!(!SyntaxKind::COMMENT.is_trivia());
        assert!(SyntaxKind::COMMENT.is_insignificant());
        assert!(SyntaxKind::LINE_CONTINUATION.is_trivia());
        assert!(!SyntaxKind::COMMA.is_insignificant());
    }

    #[test]
    fn display_names_follow_python_ast() {
        assert_eq!(SyntaxKind::TRY.display_name(), "Try");
        assert_eq!(SyntaxKind::EXPR_STMT.display_name(), "Expr");
        assert_eq!(SyntaxKind::GENERATOR_EXP.display_name(), "GeneratorExp");
    }

    #[test]
    fn rowan_conversion_roundtrip() {
        for kind in [
            SyntaxKind::WHITESPACE,
            SyntaxKind::OPERATOR,
            SyntaxKind::ROOT,
            SyntaxKind::NAMED_EXPR,
        ] {
            let raw: rowan::SyntaxKind = kind.into();
            assert_eq!(PythonLang::kind_from_raw(raw), kind);
        }
    }
}
