#![forbid(unsafe_code)]

//! Bidi reordering from resolved embedding levels.
//!
//! Given text and its per-character levels, this crate splits the text into
//! directional runs, reorders them for display (rules L1 and L2), maps
//! indexes between logical and visual order, and writes the visual string.
//!
//! - [`Paragraph`] owns text and levels; [`Paragraph::line`] borrows a range
//!   of it. Both implement [`Reordering`], which carries every query.
//! - [`segment_and_reorder`], [`reorder_logical`] and [`reorder_visual`]
//!   work on bare level arrays.
//! - [`write_reverse`] reverses a single run with mirroring and
//!   combining-mark handling.
//!
//! # Example
//!
//! ```
//! use fbidi_reorder::{Paragraph, Reordering, WriteOptions};
//!
//! let para = Paragraph::new("ab\u{05D0}\u{05D1}", &[0, 0, 1, 1], 0).unwrap();
//! assert_eq!(para.count_runs().unwrap(), 2);
//! assert_eq!(
//!     para.write_reordered(WriteOptions::empty()).unwrap(),
//!     "ab\u{05D1}\u{05D0}"
//! );
//! ```

mod mapping;
mod model;
mod paragraph;
mod reorder;
mod reordering;
mod run;
mod writer;

pub use mapping::invert_map;
pub use model::{Direction, Level, LevelView, classify_direction, levels_from_bytes, trailing_ws_start};
pub use paragraph::{Line, Paragraph, ParagraphSpan, ReorderOptions};
pub use reorder::{reorder_logical, reorder_visual, segment_and_reorder};
pub use reordering::Reordering;
pub use run::{
    INDEX_ODD_BIT, InsertPoint, InsertRemove, LRM, LogicalRun, MarkFlags, RLM, Run, RunDirection,
    RunList, VisualRun,
};
pub use writer::{WriteOptions, write_reverse, write_reverse_into};

pub use fbidi_core::{BidiError, Result};
