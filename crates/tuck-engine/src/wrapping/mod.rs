//! Wrapping: turning a construct into its tucked, one-element-per-line form.
//!
//! ## Architecture
//!
//! A wrap is described before it is performed. The rules produce a
//! [`WrappingSummary`], a list of positions paired with the kind of insertion
//! each one needs, and every later pass is a plain summary-to-summary
//! function:
//!
//! ```text
//! Target → rules::summarise → filter::prune → reindent::indent_interior_lines
//!        → filter::prune → synthesis::synthesise → Vec<Edit>
//! ```
//!
//! Keeping the plan separate from the text means the idempotency filter can
//! look at the original token stream and drop insertions that are already
//! present, which is what lets the wrap run on partly wrapped code.

pub mod filter;
pub mod reindent;
pub mod rules;
pub mod synthesis;

use tuck_syntax::{Position, SourceFile, first_significant_token};

use crate::Edit;
use crate::resolve::Target;

/// One kind of insertion at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationType {
    /// Line break, continuing at the construct's indentation.
    Wrap,
    /// Line break, continuing one indent unit deeper.
    WrapIndent,
    /// One indent unit, for a line that is already broken.
    Indent,
    TrailingComma,
    OpenParen,
    CloseParen,
}

impl MutationType {
    /// True for the two line-breaking kinds.
    pub fn is_wrap(self) -> bool {
        matches!(self, MutationType::Wrap | MutationType::WrapIndent)
    }
}

/// Planned insertions, sorted by position. Entries sharing a position render
/// in the order they appear.
pub type WrappingSummary = Vec<(Position, MutationType)>;

/// Compute the edits that tuck `target`.
pub fn wrap(file: &SourceFile, target: &Target, indent_width: usize) -> Vec<Edit> {
    let Some(node_start) = first_significant_token(&target.node).map(|token| file.start(&token))
    else {
        return Vec::new();
    };

    let summary = rules::summarise(file, target);
    let summary = filter::prune(file, node_start, summary);
    let summary = reindent::indent_interior_lines(file, &target.node, summary);
    let summary = filter::prune(file, node_start, summary);

    let indent_unit = " ".repeat(indent_width);
    synthesis::synthesise(file, &target.node, &summary, &indent_unit)
}
