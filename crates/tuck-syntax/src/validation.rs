//! Python 3 rules the tree-sitter grammar does not enforce.
//!
//! The grammar still knows Python 2 statements and parses argument and
//! parameter lists without caring about their order, so a tree without
//! `ERROR` nodes can still be code the interpreter would refuse.

use tree_sitter::Node;

/// The first construct in document order that Python 3 rejects, with the
/// message to report for it.
pub(crate) fn first_violation(node: Node<'_>) -> Option<(Node<'_>, &'static str)> {
    if let Some(violation) = violation(node) {
        return Some(violation);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_violation)
}

fn violation(node: Node<'_>) -> Option<(Node<'_>, &'static str)> {
    match node.kind() {
        "print_statement" => Some((node, "Missing parentheses in call to 'print'")),
        "exec_statement" => Some((node, "Missing parentheses in call to 'exec'")),
        "for_in_clause" => unparenthesised_iterable(node),
        "argument_list" => misordered_argument(node),
        "parameters" | "lambda_parameters" => misordered_parameter(node),
        _ => None,
    }
}

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

/// `for x in a, b` inside a comprehension. The grammar lets the iterable
/// run on past a comma, which is how `foo(x for x in y, 1)` parses.
fn unparenthesised_iterable(clause: Node<'_>) -> Option<(Node<'_>, &'static str)> {
    let mut cursor = clause.walk();
    let comma = clause
        .children(&mut cursor)
        .find(|child| !child.is_named() && child.kind() == ",")?;
    let in_generator = clause
        .parent()
        .is_some_and(|parent| parent.kind() == "generator_expression");
    let message = if in_generator {
        "Generator expression must be parenthesized"
    } else {
        "invalid syntax"
    };
    Some((comma, message))
}

/// Positional arguments come before keyword arguments, and `*args` before
/// `**kwargs`.
fn misordered_argument(arguments: Node<'_>) -> Option<(Node<'_>, &'static str)> {
    let mut keyword_seen = false;
    let mut double_star_seen = false;
    for argument in named_children(arguments) {
        match argument.kind() {
            "keyword_argument" => keyword_seen = true,
            "dictionary_splat" => double_star_seen = true,
            "list_splat" if double_star_seen => {
                return Some((
                    argument,
                    "iterable argument unpacking follows keyword argument unpacking",
                ));
            }
            "list_splat" => {}
            _ if double_star_seen => {
                return Some((
                    argument,
                    "positional argument follows keyword argument unpacking",
                ));
            }
            _ if keyword_seen => {
                return Some((argument, "positional argument follows keyword argument"));
            }
            _ => {}
        }
    }
    None
}

/// Once a positional parameter has a default, every later one needs one too.
/// Parameters after `*` or `*args` are keyword-only and exempt.
fn misordered_parameter(parameters: Node<'_>) -> Option<(Node<'_>, &'static str)> {
    let mut default_seen = false;
    for parameter in named_children(parameters) {
        match parameter.kind() {
            "default_parameter" | "typed_default_parameter" => default_seen = true,
            "positional_separator" => {}
            "keyword_separator" | "list_splat_pattern" | "dictionary_splat_pattern" => {
                return None;
            }
            "typed_parameter" if is_splat(parameter) => return None,
            _ if default_seen => {
                return Some((
                    parameter,
                    "parameter without a default follows parameter with a default",
                ));
            }
            _ => {}
        }
    }
    None
}

/// `*args: int` and `**kwargs: int` are typed parameters around a splat.
fn is_splat(parameter: Node<'_>) -> bool {
    parameter.named_child(0).is_some_and(|child| {
        matches!(
            child.kind(),
            "list_splat_pattern" | "dictionary_splat_pattern"
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tree_sitter::Parser;

    fn violation_in(source: &str) -> Option<(usize, String)> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .unwrap();
        let tree = parser.parse(source, None).unwrap();
        assert!(!tree.root_node().has_error(), "parse error in {source:?}");
        first_violation(tree.root_node())
            .map(|(node, message)| (node.start_position().row + 1, message.to_string()))
    }

    #[rstest]
    #[case::print_statement("print 'x', y\n", 1, "Missing parentheses in call to 'print'")]
    #[case::generator_beside_another_argument(
        "x = 1\nfoo(x for x in y, 1)\n",
        2,
        "Generator expression must be parenthesized"
    )]
    #[case::positional_after_keyword("foo(a=1, b)\n", 1, "positional argument follows keyword argument")]
    #[case::positional_after_double_star(
        "foo(**a,\n    b)\n",
        2,
        "positional argument follows keyword argument unpacking"
    )]
    #[case::star_after_double_star(
        "foo(**a, *b)\n",
        1,
        "iterable argument unpacking follows keyword argument unpacking"
    )]
    #[case::parameter_after_default(
        "def f(a=1, b):\n    pass\n",
        1,
        "parameter without a default follows parameter with a default"
    )]
    #[case::typed_parameter_after_default(
        "def f(a: int = 1, /, b: int):\n    pass\n",
        1,
        "parameter without a default follows parameter with a default"
    )]
    #[case::lambda_parameter_after_default(
        "f = lambda a=1, b: a\n",
        1,
        "parameter without a default follows parameter with a default"
    )]
    fn python_three_rejects(#[case] source: &str, #[case] line: usize, #[case] message: &str) {
        assert_eq!(violation_in(source), Some((line, message.to_string())));
    }

    #[rstest]
    #[case::print_call("print('x', y)\n")]
    #[case::lone_generator("foo(x for x in y)\n")]
    #[case::parenthesised_generator("foo((x for x in y), 1)\n")]
    #[case::star_after_keyword("foo(a, *b, c=1, *d, **e)\n")]
    #[case::keyword_only_after_default("def f(a, b=1, *args, c, d=2, **kwargs):\n    pass\n")]
    #[case::bare_star("def f(a=1, *, b):\n    pass\n")]
    #[case::typed_star_args("def f(a=1, *args: int, b):\n    pass\n")]
    #[case::comment_between_parameters("def f(\n    a,  # first\n    b=1,\n):\n    pass\n")]
    fn python_three_accepts(#[case] source: &str) {
        assert_eq!(violation_in(source), None);
    }
}
