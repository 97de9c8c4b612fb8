use super::Edit;

/// Apply a position-sorted, non-overlapping batch of edits to `text`.
///
/// Edits are applied last to first so that the positions of the remaining
/// ones stay valid. A replacement that starts a new line drops any trailing
/// whitespace left behind on the line it breaks.
pub fn apply_edits(text: &str, edits: &[Edit]) -> String {
    let mut lines: Vec<String> = text.split_inclusive('\n').map(str::to_owned).collect();

    for edit in edits.iter().rev() {
        let start = edit.range.start();
        let end = edit.range.end();
        let start_line = start.line.saturating_sub(1);
        let end_line = end.line.saturating_sub(1);

        // Positions one past the last line address a fresh, empty line.
        while lines.len() <= end_line {
            lines.push(String::new());
        }

        let right = &lines[end_line][byte_index(&lines[end_line], end.col)..];
        let right = right.to_owned();
        let mut left = lines[start_line][..byte_index(&lines[start_line], start.col)].to_owned();

        if edit.new_text.starts_with('\n') {
            left.truncate(left.trim_end().len());
        }

        left.push_str(&edit.new_text);
        left.push_str(&right);
        lines.drain(start_line + 1..=end_line);
        lines[start_line] = left;
    }

    lines.concat()
}

/// Byte offset of a character column, clamped to the line. The line ending
/// counts as part of the line.
fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map_or(line.len(), |(index, _)| index)
}
