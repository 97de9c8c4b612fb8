//! Wrapping code that is already partly (or fully) laid out by hand.

mod common;

use common::assert_wraps;

#[test]
fn class_def_already_tucked() {
    assert_wraps(
        2,
        8,
        r#"
        class Foo(
            abcd,
            spam='ham',
        ):
            pass
        "#,
        r#"
        class Foo(
            abcd,
            spam='ham',
        ):
            pass
        "#,
    );
}

#[test]
fn function_call_already_tucked() {
    assert_wraps(
        2,
        8,
        r#"
        foo(
            'abcd',
            1234,
            spam='ham',
        )
        "#,
        r#"
        foo(
            'abcd',
            1234,
            spam='ham',
        )
        "#,
    );
}

#[test]
fn function_def_already_tucked() {
    assert_wraps(
        2,
        8,
        r#"
        def foo(
            abcd,
            spam='ham',
        ):
            pass
        "#,
        r#"
        def foo(
            abcd,
            spam='ham',
        ):
            pass
        "#,
    );
}

#[test]
fn function_call_with_internal_trailing_comma() {
    assert_wraps(
        1,
        8,
        r#"
        foo('abcd', 1234, spam='ham',)
        "#,
        r#"
        foo(
            'abcd',
            1234,
            spam='ham',
        )
        "#,
    );
}

#[test]
fn function_def_with_internal_trailing_comma() {
    assert_wraps(
        1,
        8,
        r#"
        def foo(abcd, defg, spam='ham',):
            pass
        "#,
        r#"
        def foo(
            abcd,
            defg,
            spam='ham',
        ):
            pass
        "#,
    );
}

#[test]
fn class_def_with_internal_trailing_comma() {
    assert_wraps(
        1,
        8,
        r#"
        class Foo(abcd, defg, spam='ham',):
            pass
        "#,
        r#"
        class Foo(
            abcd,
            defg,
            spam='ham',
        ):
            pass
        "#,
    );
}

#[test]
fn function_call_with_trailing_comma_and_comment() {
    assert_wraps(
        1,
        8,
        r#"
        foo('abcd', 1234,
            24 * 60 * 60, # 1 day
        )
        "#,
        r#"
        foo(
            'abcd',
            1234,
            24 * 60 * 60, # 1 day
        )
        "#,
    );
}

#[test]
fn function_def_three_line_style() {
    assert_wraps(
        1,
        8,
        r#"
        def foo(
            abcd, defg, spam='ham'
        ):
            pass
        "#,
        r#"
        def foo(
            abcd,
            defg,
            spam='ham',
        ):
            pass
        "#,
    );
}

#[test]
fn function_def_three_line_style_with_comment() {
    assert_wraps(
        1,
        8,
        r#"
        def foo(
            abcd, defg, spam='ham'  # foo
        ):
            pass
        "#,
        r#"
        def foo(
            abcd,
            defg,
            spam='ham',  # foo
        ):
            pass
        "#,
    );
}

#[test]
fn class_def_three_line_style() {
    assert_wraps(
        1,
        8,
        r#"
        class Foo(
            abcd, defg, spam='ham'
        ):
            pass
        "#,
        r#"
        class Foo(
            abcd,
            defg,
            spam='ham',
        ):
            pass
        "#,
    );
}

#[test]
fn class_def_three_line_style_with_comment() {
    assert_wraps(
        1,
        8,
        r#"
        class Foo(
            abcd, defg, spam='ham'  # foo
        ):
            pass
        "#,
        r#"
        class Foo(
            abcd,
            defg,
            spam='ham',  # foo
        ):
            pass
        "#,
    );
}

#[test]
fn function_call_three_line_style() {
    assert_wraps(
        2,
        8,
        r#"
        foo(
            'abcd', 1234, spam='ham'
        )
        "#,
        r#"
        foo(
            'abcd',
            1234,
            spam='ham',
        )
        "#,
    );
}

#[test]
fn function_call_three_line_style_with_trailing_comma() {
    assert_wraps(
        2,
        8,
        r#"
        foo(
            'abcd', 1234, spam='ham',
        )
        "#,
        r#"
        foo(
            'abcd',
            1234,
            spam='ham',
        )
        "#,
    );
}

// The comment after a wrapped element moves with it, even when it was
// already where it belonged.
#[test]
fn function_call_partly_wrapped_with_comment() {
    assert_wraps(
        2,
        8,
        r#"
        foo(
            'abcd', 1234,
            # comment
            spam='ham',
        )
        "#,
        r#"
        foo(
            'abcd',
            1234,
                # comment
            spam='ham',
        )
        "#,
    );
}

#[test]
fn function_call_partly_wrapped_hugging_opening_paren() {
    assert_wraps(
        2,
        8,
        r#"
        foo('abcd',
            spam='ham',
        )
        "#,
        r#"
        foo(
            'abcd',
            spam='ham',
        )
        "#,
    );
}

#[test]
fn function_call_partly_wrapped_hugging_parens() {
    assert_wraps(
        2,
        8,
        r#"
        foo('abcd',
            spam='ham')
        "#,
        r#"
        foo(
            'abcd',
            spam='ham',
        )
        "#,
    );
}

#[test]
fn function_call_partly_wrapped_hugging_trailing_paren() {
    assert_wraps(
        2,
        8,
        r#"
        foo(
            'abcd',
            spam='ham')
        "#,
        r#"
        foo(
            'abcd',
            spam='ham',
        )
        "#,
    );
}

#[test]
fn function_call_partly_wrapped_pep8_style() {
    assert_wraps(
        2,
        8,
        r#"
        foo('abcd', 1234,
            spam='ham', bees='spam')
        "#,
        r#"
        foo(
            'abcd',
            1234,
            spam='ham',
            bees='spam',
        )
        "#,
    );
}

#[test]
fn three_line_boolean_expression() {
    assert_wraps(
        2,
        8,
        r#"
        val = (
            foo and bar
        )
        "#,
        r#"
        val = (
            foo and
            bar
        )
        "#,
    );
}

#[test]
fn commented_three_line_boolean_expression() {
    assert_wraps(
        2,
        8,
        r#"
        val = (
            foo and bar  # bees
        )
        "#,
        r#"
        val = (
            foo and
            bar  # bees
        )
        "#,
    );
}

#[test]
fn three_line_subscript_tuple_is_left_alone() {
    assert_wraps(
        2,
        6,
        r#"
        foo[
            'abcd',
            1234,
        ]
        "#,
        r#"
        foo[
            'abcd',
            1234,
        ]
        "#,
    );
}
