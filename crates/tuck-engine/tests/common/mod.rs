#![allow(dead_code)]

use pretty_assertions::assert_eq;
use tuck_engine::{Edit, Mode, Position, TuckError, apply_edits, process};

/// Strip the leading newline and common indentation of a test fixture, so
/// fixtures can be written as indented raw strings.
pub fn dedent(text: &str) -> String {
    let text = text.strip_prefix('\n').unwrap_or(text);
    let margin = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    text.split_inclusive('\n')
        .map(|line| {
            if line.trim().is_empty() {
                if line.ends_with('\n') { "\n" } else { "" }
            } else {
                &line[margin..]
            }
        })
        .collect()
}

pub fn transform(
    mode: Mode,
    positions: &[(usize, usize)],
    source: &str,
) -> Result<String, TuckError> {
    let source = dedent(source);
    let edits = edits(mode, positions, &source)?;
    Ok(apply_edits(&source, &edits))
}

pub fn edits(mode: Mode, positions: &[(usize, usize)], source: &str) -> Result<Vec<Edit>, TuckError> {
    let positions: Vec<Position> = positions
        .iter()
        .map(|&(line, col)| Position::new(line, col))
        .collect();
    process(mode, &positions, source, "demo.py")
}

#[track_caller]
pub fn assert_wraps(line: usize, col: usize, source: &str, expected: &str) {
    assert_wraps_all(&[(line, col)], source, expected);
}

#[track_caller]
pub fn assert_wraps_all(positions: &[(usize, usize)], source: &str, expected: &str) {
    let output = transform(Mode::Wrap, positions, source).unwrap();
    assert_eq!(output, dedent(expected));
}

#[track_caller]
pub fn assert_unwraps(line: usize, col: usize, source: &str, expected: &str) {
    let output = transform(Mode::Unwrap, &[(line, col)], source).unwrap();
    assert_eq!(output, dedent(expected));
}

/// The error for wrapping at one position.
#[track_caller]
pub fn wrap_error(line: usize, col: usize, source: &str) -> TuckError {
    transform(Mode::Wrap, &[(line, col)], source).unwrap_err()
}
