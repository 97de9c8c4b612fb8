//! # tuck-engine
//!
//! Cursor-driven wrapping of Python constructs. Given positions inside a
//! document, the engine finds the construct around each one and computes the
//! edits that put it into "tucked" form, one element per line:
//!
//! ```text
//! foo('abcd', 1234, spam='ham')      foo(
//!                                ──►     'abcd',
//!                                        1234,
//!                                        spam='ham',
//!                                    )
//! ```
//!
//! [`Mode::Unwrap`] does the reverse.
//!
//! ## Module Structure
//!
//! ```text
//! tuck-engine/
//! ├── lib.rs          # This file - entry points and options
//! ├── error.rs        # TuckError
//! ├── resolve.rs      # Position → target construct
//! ├── unwrapping.rs   # Joining a construct onto one line
//! ├── editing/        # Range, Edit, merging and applying edits
//! └── wrapping/
//!     ├── rules.rs     # Per-construct insertion plans
//!     ├── filter.rs    # Dropping what is already there
//!     ├── reindent.rs  # Shifting interior lines of moved elements
//!     └── synthesis.rs # Plan → edits
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use tuck_engine::{Mode, Position, apply_edits, process};
//!
//! let source = "foo = {'abcd': 1234}\n";
//! let edits = process(Mode::Wrap, &[Position::new(1, 6)], source, "demo.py").unwrap();
//! assert_eq!(apply_edits(source, &edits), "foo = {\n    'abcd': 1234,\n}\n");
//! ```
//!
//! The engine never logs and never touches the file system; callers decide
//! what to do with the edits.

pub mod editing;
mod error;
pub mod resolve;
pub mod unwrapping;
pub mod wrapping;

pub use editing::{Edit, Range, all_are_disjoint, apply_edits, merge_edit_batches};
pub use error::TuckError;
pub use tuck_syntax::Position;

/// Which way to transform the targeted constructs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Wrap,
    Unwrap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub mode: Mode,
    /// Spaces per indent level added by a wrap.
    pub indent_width: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mode: Mode::Wrap,
            indent_width: 4,
        }
    }
}

/// [`process_with`] using the default indent width.
pub fn process(
    mode: Mode,
    positions: &[Position],
    source: &str,
    source_name: &str,
) -> Result<Vec<Edit>, TuckError> {
    let options = Options {
        mode,
        ..Options::default()
    };
    process_with(&options, positions, source, source_name)
}

/// Compute the edits for every position in one batch.
///
/// Any position that cannot be handled fails the whole request, as do
/// positions whose edits would interleave. `source_name` only appears in
/// syntax error messages.
pub fn process_with(
    options: &Options,
    positions: &[Position],
    source: &str,
    source_name: &str,
) -> Result<Vec<Edit>, TuckError> {
    let file = tuck_syntax::parse(source, source_name)?;

    let batches = positions
        .iter()
        .map(|&position| {
            let target = resolve::resolve(&file, position)?;
            match options.mode {
                Mode::Wrap => Ok(wrapping::wrap(&file, &target, options.indent_width)),
                Mode::Unwrap => unwrapping::unwrap(&file, &target),
            }
        })
        .collect::<Result<Vec<_>, TuckError>>()?;

    merge_edit_batches(batches)
}
