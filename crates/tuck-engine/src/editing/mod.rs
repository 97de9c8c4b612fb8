//! Text edits: the engine's output and the only thing that touches text.
//!
//! Every transform produces a batch of [`Edit`]s against the original
//! document. Batches from several positions are combined by
//! [`merge_edit_batches`], which refuses to interleave edits from different
//! constructs, and [`apply_edits`] turns a merged batch into new text.

mod apply;
mod edit;
mod merge;
mod range;

pub use apply::apply_edits;
pub use edit::Edit;
pub use merge::{all_are_disjoint, merge_edit_batches};
pub use range::Range;
