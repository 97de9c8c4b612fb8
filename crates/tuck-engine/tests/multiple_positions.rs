//! Requests carrying more than one position.

mod common;

use common::{assert_wraps_all, transform};
use pretty_assertions::assert_eq;
use tuck_engine::{Mode, TuckError};

#[test]
fn overlap_in_the_same_statement() {
    let error = transform(Mode::Wrap, &[(1, 8), (1, 12)], "\nfoo = {'abcd': 1234}\n").unwrap_err();
    assert_eq!(error, TuckError::EditsOverlap);
}

#[test]
fn overlap_with_a_nested_statement() {
    let error = transform(
        Mode::Wrap,
        &[(1, 10), (1, 25)],
        "\nfoo = {'abcd': bar(ghij=5432)}\n",
    )
    .unwrap_err();
    assert_eq!(error.code(), "edits_overlap");
}

#[test]
fn two_positions_on_one_construct() {
    let error = transform(Mode::Wrap, &[(2, 4), (2, 5)], "\nfoo(\n    a\n)\n").unwrap_err();
    assert_eq!(error, TuckError::EditsOverlap);
}

// Edits are checked for overlap, not for sharing a statement.
#[test]
fn same_line() {
    assert_wraps_all(
        &[(1, 10), (1, 30)],
        r#"
        func({'abcd': 1234}, bar(ghij=5432))
        "#,
        r#"
        func({
            'abcd': 1234,
        }, bar(
            ghij=5432,
        ))
        "#,
    );
}

#[test]
fn same_line_reverse_order() {
    assert_wraps_all(
        &[(1, 30), (1, 10)],
        r#"
        func({'abcd': 1234}, bar(ghij=5432))
        "#,
        r#"
        func({
            'abcd': 1234,
        }, bar(
            ghij=5432,
        ))
        "#,
    );
}

#[test]
fn separate_lines() {
    assert_wraps_all(
        &[(1, 8), (2, 8)],
        r#"
        foo = {'abcd': 1234}
        bar(ghij=5432)
        "#,
        r#"
        foo = {
            'abcd': 1234,
        }
        bar(
            ghij=5432,
        )
        "#,
    );
}

#[test]
fn one_failing_position_fails_the_request() {
    let error = transform(
        Mode::Wrap,
        &[(1, 8), (3, 2)],
        "\nfoo = {'abcd': 1234}\ndef foo():\n    pass\n",
    )
    .unwrap_err();
    assert_eq!(error.code(), "no_suitable_node_found");
}
