use super::{Edit, Range};
use crate::TuckError;

/// True when no group's span reaches into another's.
///
/// Each group is reduced to its convex span, from its earliest start to its
/// latest end. Empty groups are ignored and touching spans are allowed, but
/// two spans starting at the same point overlap even when both are empty:
/// both insertions would land there.
pub fn all_are_disjoint(grouped: &[Vec<Range>]) -> bool {
    let mut spans: Vec<Range> = grouped.iter().filter_map(|ranges| span(ranges)).collect();
    spans.sort();
    spans.windows(2).all(|pair| {
        pair[1].start() >= pair[0].end() && pair[1].start() != pair[0].start()
    })
}

/// Combine the edits for several positions into one batch, ordered by start.
///
/// Fails with [`TuckError::EditsOverlap`] when the batches interleave; applying
/// part of a request is never an option.
pub fn merge_edit_batches(batches: Vec<Vec<Edit>>) -> Result<Vec<Edit>, TuckError> {
    let ranges: Vec<Vec<Range>> = batches
        .iter()
        .map(|edits| edits.iter().map(|edit| edit.range).collect())
        .collect();
    if !all_are_disjoint(&ranges) {
        return Err(TuckError::EditsOverlap);
    }

    let mut edits: Vec<Edit> = batches.into_iter().flatten().collect();
    edits.sort_by_key(|edit| edit.range.start());
    Ok(edits)
}

fn span(ranges: &[Range]) -> Option<Range> {
    let start = ranges.iter().map(Range::start).min()?;
    let end = ranges.iter().map(Range::end).max()?;
    Range::new(start, end).ok()
}
