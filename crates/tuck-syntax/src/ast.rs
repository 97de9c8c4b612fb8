//! Typed views over the untyped syntax tree.
//!
//! Each view wraps a [`SyntaxNode`] of a known kind and exposes the children
//! the wrapping rules care about. Views never own data; casting is free and
//! fails only on a kind mismatch.

use crate::syntax_kind::{SyntaxKind, SyntaxNode, SyntaxToken};

pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;

    fn cast(node: SyntaxNode) -> Option<Self>;

    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident, $($kind:ident)|+) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                matches!(kind, $(SyntaxKind::$kind)|+)
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                Self::can_cast(node.kind()).then(|| Self(node))
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(Call, CALL);
ast_node!(ArgList, ARG_LIST);
ast_node!(
    /// List, set, dict or tuple display.
    Collection,
    LIST | SET | DICT | TUPLE
);
ast_node!(
    /// Any comprehension, generator expressions included.
    Comprehension,
    LIST_COMP | SET_COMP | DICT_COMP | GENERATOR_EXP
);
ast_node!(FunctionDef, FUNCTION_DEF | ASYNC_FUNCTION_DEF);
ast_node!(Parameters, PARAMETERS);
ast_node!(Param, PARAM);
ast_node!(ClassDef, CLASS_DEF);
ast_node!(BoolOp, BOOL_OP);
ast_node!(IfExp, IF_EXP);
ast_node!(If, IF);
ast_node!(Attribute, ATTRIBUTE);

fn child_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| token.kind() == kind)
}

fn last_child_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| token.kind() == kind)
        .last()
}

impl Call {
    pub fn callee(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .find(|child| child.kind() != SyntaxKind::ARG_LIST)
    }

    pub fn arg_list(&self) -> Option<ArgList> {
        self.0.children().find_map(ArgList::cast)
    }
}

impl ArgList {
    pub fn args(&self) -> impl Iterator<Item = SyntaxNode> {
        self.0.children()
    }

    pub fn l_paren(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::L_PAREN)
    }

    pub fn r_paren(&self) -> Option<SyntaxToken> {
        last_child_token(&self.0, SyntaxKind::R_PAREN)
    }

    /// The generator of `foo(x for x in y)` or `foo((x for x in y))`, when it
    /// is the only argument.
    pub fn sole_generator(&self) -> Option<Comprehension> {
        let mut args = self.args();
        let first = args.next()?;
        if args.next().is_some() {
            return None;
        }
        Comprehension::cast(first).filter(|comp| comp.syntax().kind() == SyntaxKind::GENERATOR_EXP)
    }
}

impl Collection {
    pub fn elements(&self) -> impl Iterator<Item = SyntaxNode> {
        self.0.children()
    }

    pub fn opening_bracket(&self) -> Option<SyntaxToken> {
        self.0
            .first_child_or_token()
            .and_then(|element| element.into_token())
            .filter(|token| token.kind().is_opening_bracket())
    }

    pub fn closing_bracket(&self) -> Option<SyntaxToken> {
        self.0
            .last_child_or_token()
            .and_then(|element| element.into_token())
            .filter(|token| token.kind().is_closing_bracket())
    }

    /// True when the collection has brackets of its own; a tuple may not.
    pub fn is_bracketed(&self) -> bool {
        self.opening_bracket().is_some() && self.closing_bracket().is_some()
    }
}

impl Comprehension {
    /// The expression (or `key: value` pair) being collected.
    pub fn element(&self) -> Option<SyntaxNode> {
        self.0.children().next()
    }

    /// `for` clauses and `if` guards, in source order.
    pub fn clauses(&self) -> impl Iterator<Item = SyntaxNode> {
        self.0.children().filter(|child| {
            matches!(
                child.kind(),
                SyntaxKind::COMPREHENSION | SyntaxKind::COMPREHENSION_IF
            )
        })
    }

    pub fn closing_bracket(&self) -> Option<SyntaxToken> {
        self.0
            .last_child_or_token()
            .and_then(|element| element.into_token())
            .filter(|token| token.kind().is_closing_bracket())
    }
}

impl FunctionDef {
    pub fn parameters(&self) -> Option<Parameters> {
        self.0.children().find_map(Parameters::cast)
    }
}

impl Parameters {
    pub fn params(&self) -> impl Iterator<Item = Param> {
        self.0.children().filter_map(Param::cast)
    }

    pub fn r_paren(&self) -> Option<SyntaxToken> {
        last_child_token(&self.0, SyntaxKind::R_PAREN)
    }
}

/// What a parameter slot declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// `x`, `x=1`, `x: int`
    Plain,
    /// `/`
    PositionalMarker,
    /// Bare `*`
    KeywordMarker,
    /// `*args`
    VarPositional,
    /// `**kwargs`
    VarKeyword,
}

impl Param {
    pub fn kind(&self) -> ParamKind {
        let mut tokens = self
            .0
            .descendants_with_tokens()
            .filter_map(|element| element.into_token())
            .filter(|token| !token.kind().is_insignificant());
        let first = tokens.next();
        let has_more = tokens.next().is_some();
        match first {
            Some(token) if token.kind() == SyntaxKind::DOUBLE_STAR => ParamKind::VarKeyword,
            Some(token) if token.kind() == SyntaxKind::STAR && has_more => {
                ParamKind::VarPositional
            }
            Some(token) if token.kind() == SyntaxKind::STAR => ParamKind::KeywordMarker,
            Some(token) if token.text() == "/" => ParamKind::PositionalMarker,
            _ => ParamKind::Plain,
        }
    }
}

impl ClassDef {
    /// The `(bases, keywords)` list, absent for `class Foo:`.
    pub fn arg_list(&self) -> Option<ArgList> {
        self.0.children().find_map(ArgList::cast)
    }
}

impl BoolOp {
    pub fn operands(&self) -> impl Iterator<Item = SyntaxNode> {
        self.0.children()
    }
}

impl IfExp {
    /// The value produced when the test holds.
    pub fn body(&self) -> Option<SyntaxNode> {
        self.0.children().next()
    }

    pub fn if_keyword(&self) -> Option<SyntaxToken> {
        self.keyword("if")
    }

    pub fn else_keyword(&self) -> Option<SyntaxToken> {
        self.keyword("else")
    }

    fn keyword(&self, text: &str) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|token| token.kind() == SyntaxKind::KEYWORD && token.text() == text)
    }
}

impl If {
    pub fn test(&self) -> Option<SyntaxNode> {
        self.0.children().next()
    }
}

impl Attribute {
    /// The object whose attribute is read: `a.b` for `a.b.c`.
    pub fn receiver(&self) -> Option<SyntaxNode> {
        self.0.children().next()
    }
}

ast_node!(
    /// A statement with a header line and an indented body.
    CompoundStatement,
    IF | FOR
        | WHILE
        | WITH
        | TRY
        | EXCEPT_HANDLER
        | MATCH
        | MATCH_CASE
        | FUNCTION_DEF
        | ASYNC_FUNCTION_DEF
        | CLASS_DEF
);

impl CompoundStatement {
    /// The colon closing the header. Colons nested in the header, such as a
    /// lambda's, belong to child nodes and are not considered.
    pub fn header_colon(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::COLON)
    }

    /// Indented bodies, including those of `else` and `finally` clauses.
    pub fn bodies(&self) -> impl Iterator<Item = SyntaxNode> {
        self.0
            .children()
            .filter(|child| child.kind() == SyntaxKind::BLOCK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn find<N: AstNode>(source: &str) -> N {
        let file = parse(source, "test.py").unwrap();
        file.root().descendants().find_map(N::cast).unwrap()
    }

    fn texts(nodes: impl Iterator<Item = SyntaxNode>) -> Vec<String> {
        nodes.map(|node| node.text().to_string()).collect()
    }

    #[test]
    fn call_exposes_callee_and_arguments() {
        let call: Call = find("foo.bar(a, *b, c=1, **d)\n");
        assert_eq!(call.callee().unwrap().text().to_string(), "foo.bar");
        let args = call.arg_list().unwrap();
        assert_eq!(texts(args.args()), vec!["a", "*b", "c=1", "**d"]);
        assert_eq!(args.r_paren().unwrap().text(), ")");
    }

    #[test]
    fn generator_argument_shares_the_call_parens() {
        let call: Call = find("foo(x for x in y)\n");
        let args = call.arg_list().unwrap();
        let generator = args.sole_generator().unwrap();
        assert_eq!(generator.syntax().text().to_string(), "x for x in y");
        assert_eq!(texts(generator.clauses()), vec!["for x in y"]);
        assert_eq!(args.l_paren().unwrap().text(), "(");
    }

    #[test]
    fn parenthesised_generator_leaves_its_parens_outside() {
        let call: Call = find("foo((x for x in y))\n");
        let args = call.arg_list().unwrap();
        let generator = args.sole_generator().unwrap();
        assert_eq!(generator.syntax().text().to_string(), "x for x in y");
        let parens = args
            .syntax()
            .children_with_tokens()
            .filter(|element| element.kind() == SyntaxKind::L_PAREN)
            .count();
        assert_eq!(parens, 2);
    }

    #[test]
    fn generator_with_company_is_not_sole() {
        let call: Call = find("foo(1, (x for x in y))\n");
        assert!(call.arg_list().unwrap().sole_generator().is_none());
    }

    #[test]
    fn dict_elements_are_pairs() {
        let dict: Collection = find("x = {'a': 1, **rest}\n");
        assert_eq!(texts(dict.elements()), vec!["'a': 1", "**rest"]);
        assert!(dict.is_bracketed());
    }

    #[test]
    fn bare_tuple_has_no_brackets() {
        let tuple: Collection = find("x = a, b\n");
        assert_eq!(texts(tuple.elements()), vec!["a", "b"]);
        assert!(!tuple.is_bracketed());
    }

    #[test]
    fn bool_op_chains_are_flat() {
        let bool_op: BoolOp = find("x = a and b and (c or d)\n");
        assert_eq!(texts(bool_op.operands()), vec!["a", "b", "c or d"]);
    }

    #[test]
    fn comprehension_clauses_in_order() {
        let comp: Comprehension = find("[x for x in y if x for z in x]\n");
        assert_eq!(comp.element().unwrap().text().to_string(), "x");
        assert_eq!(
            texts(comp.clauses()),
            vec!["for x in y", "if x", "for z in x"]
        );
    }

    #[rstest]
    #[case("def f(a): pass\n", vec![ParamKind::Plain])]
    #[case("def f(a, /, b): pass\n", vec![ParamKind::Plain, ParamKind::PositionalMarker, ParamKind::Plain])]
    #[case("def f(*, b): pass\n", vec![ParamKind::KeywordMarker, ParamKind::Plain])]
    #[case("def f(*args, **kwargs): pass\n", vec![ParamKind::VarPositional, ParamKind::VarKeyword])]
    #[case("def f(x: int = 1, *args: str): pass\n", vec![ParamKind::Plain, ParamKind::VarPositional])]
    fn parameter_kinds(#[case] source: &str, #[case] expected: Vec<ParamKind>) {
        let def: FunctionDef = find(source);
        let kinds: Vec<_> = def.parameters().unwrap().params().map(|p| p.kind()).collect();
        assert_eq!(kinds, expected);
    }

    #[test]
    fn if_expression_keywords() {
        let if_exp: IfExp = find("x = a if b else c\n");
        assert_eq!(if_exp.body().unwrap().text().to_string(), "a");
        assert_eq!(if_exp.if_keyword().unwrap().text(), "if");
        assert_eq!(if_exp.else_keyword().unwrap().text(), "else");
    }

    #[test]
    fn header_colon_of_compound_statement() {
        let def: CompoundStatement = find("def f(x=lambda: 1) -> int:\n    pass\n");
        let colon = def.header_colon().unwrap();
        // the lambda's colon is nested in the parameters
        assert_eq!(u32::from(colon.text_range().start()), 25);
        assert_eq!(texts(def.bodies()), vec!["pass"]);
    }

    #[test]
    fn else_bodies_belong_to_the_statement() {
        let stmt: CompoundStatement = find("for x in y:\n    a\nelse:\n    b\n");
        assert_eq!(texts(stmt.bodies()), vec!["a", "b"]);
    }

    #[test]
    fn attribute_receiver() {
        let attribute: Attribute = find("a.b.c\n");
        assert_eq!(attribute.receiver().unwrap().text().to_string(), "a.b");
    }

    #[test]
    fn class_without_bases_has_no_arg_list() {
        let class: ClassDef = find("class Foo:\n    pass\n");
        assert!(class.arg_list().is_none());
    }
}
