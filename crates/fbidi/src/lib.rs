#![forbid(unsafe_code)]

//! frankenbidi public facade.
//!
//! Re-exports the reordering and shaping crates under one roof and offers
//! a prelude for day-to-day use. With the default `shape` feature,
//! [`shape_visual`] runs the usual display pipeline: reorder a line into
//! visual order, then shape the visual text.
//!
//! # Example
//!
//! ```
//! use fbidi::prelude::*;
//!
//! // Lam + Alef at level 1: reversed for display, then ligated.
//! let para = Paragraph::new("\u{0644}\u{0627}", &[1, 1], 1).unwrap();
//! let shown = fbidi::shape_visual(&para, WriteOptions::empty(), ShapeOptions::default()).unwrap();
//! assert_eq!(shown, "\u{FEFB}");
//! ```

// --- Core re-exports -------------------------------------------------------

pub use fbidi_core::props::{PropsTable, class_of, is_bidi_control, mirror_of};
pub use fbidi_core::{BidiClass, BidiError, JoiningGroup, JoiningType, Result};

// --- Reorder re-exports ----------------------------------------------------

pub use fbidi_reorder::{
    Direction, Level, Line, LogicalRun, MarkFlags, Paragraph, ParagraphSpan, ReorderOptions,
    Reordering, RunDirection, VisualRun, WriteOptions, invert_map, reorder_logical,
    reorder_visual, segment_and_reorder,
};

// --- Shape re-exports ------------------------------------------------------

#[cfg(feature = "shape")]
pub use fbidi_shape::{
    ArabicShaper, DigitMode, DigitType, LamAlefMode, LetterMode, ShapeOptions, TailType,
    TashkeelMode, TextDirection, shape, unshape,
};

/// Reorder `line` for display and shape the visual result.
///
/// The shaping direction is forced to visual LTR since the reordered text
/// is already in display order.
#[cfg(feature = "shape")]
pub fn shape_visual<R: Reordering + ?Sized>(
    line: &R,
    write: WriteOptions,
    options: ShapeOptions,
) -> Result<String> {
    let shaper = ArabicShaper::new(options.with_direction(TextDirection::VisualLtr))?;
    let visual: Vec<char> = line.write_reordered(write)?.chars().collect();
    Ok(shaper.shape_chars(&visual)?.into_iter().collect())
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BidiError, Direction, Level, Paragraph, ReorderOptions, Reordering, Result, RunDirection,
        WriteOptions,
    };

    #[cfg(feature = "shape")]
    pub use crate::{ArabicShaper, LamAlefMode, ShapeOptions};

    pub use crate::{core, reorder};

    #[cfg(feature = "shape")]
    pub use crate::shaping;
}

pub use fbidi_core as core;
pub use fbidi_reorder as reorder;
#[cfg(feature = "shape")]
pub use fbidi_shape as shaping;
