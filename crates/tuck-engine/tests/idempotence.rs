//! Wrapping tucked output again changes nothing.

mod common;

use common::{dedent, edits};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tuck_engine::{Mode, apply_edits};

/// Each case names where to wrap the source and where to wrap the result,
/// since lines after the first move.
#[rstest]
#[case::call("foo('abcd', 1234, spam='ham')\n", (1, 8), (1, 2))]
#[case::lone_generator_argument("foo(x for x in 'abc')\n", (1, 2), (1, 2))]
#[case::bare_tuple("foo = 'abcd', 1234\n", (1, 8), (2, 6))]
#[case::subscript_tuple("foo['abcd', 1234]\n", (1, 8), (2, 6))]
#[case::comprehension("foo = [a for x in range(42) if x % 3 == 0 for a in str(x)]\n", (1, 15), (1, 6))]
#[case::bool_op("if foo and bar:\n    print()\n", (1, 8), (2, 5))]
#[case::if_expression("x = a if foo and bar else b\n", (1, 7), (2, 4))]
#[case::keyword_only_def("def foo(tokens, *, bar: bytes):\n    pass\n", (1, 8), (1, 5))]
#[case::nested("foo(\"abcd {} {}\".format(\n    'efgh',\n    'ijkl',\n))\n", (4, 1), (6, 0))]
fn wrapping_twice_is_wrapping_once(
    #[case] source: &str,
    #[case] first: (usize, usize),
    #[case] second: (usize, usize),
) {
    let once = apply_edits(source, &edits(Mode::Wrap, &[first], source).unwrap());
    assert_ne!(once, source);

    let again = edits(Mode::Wrap, &[second], &once).unwrap();
    assert_eq!(again, vec![], "rewrapping changed:\n{once}");
}

#[test]
fn unwrap_then_wrap_restores_the_tucked_form() {
    let tucked = dedent(
        r#"
        foo(
            'abcd',
            1234,
            spam='ham',
        )
        "#,
    );
    let flat = apply_edits(&tucked, &edits(Mode::Unwrap, &[(2, 8)], &tucked).unwrap());
    assert_eq!(flat, "foo('abcd', 1234, spam='ham')\n");

    let wrapped = apply_edits(&flat, &edits(Mode::Wrap, &[(1, 8)], &flat).unwrap());
    assert_eq!(wrapped, tucked);
}
