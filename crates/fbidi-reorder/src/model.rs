#![forbid(unsafe_code)]

//! Embedding levels, text direction, and the borrowed view the run engine
//! works on.
//!
//! A [`LevelView`] is the common shape of a paragraph and of a line taken
//! from it: text, per-character classes and levels, the base level, and the
//! start of the trailing whitespace run. Positions at or after
//! `trailing_ws_start` are treated as if they carried the base level of the
//! last paragraph (rule L1) without touching the level array.

use fbidi_core::props::{self, BidiClass};
use fbidi_core::{BidiError, Result};

use crate::run::InsertPoint;
use crate::ReorderOptions;

// ---------------------------------------------------------------------------
// Level
// ---------------------------------------------------------------------------

/// A bidi embedding level. Odd levels are right-to-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
#[repr(transparent)]
pub struct Level(u8);

impl Level {
    pub const LTR: Self = Self(0);
    pub const RTL: Self = Self(1);
    /// Deepest level reachable through explicit embeddings.
    pub const MAX_EXPLICIT: u8 = 125;
    /// Deepest level after implicit resolution.
    pub const MAX_IMPLICIT: u8 = Self::MAX_EXPLICIT + 1;

    /// Validated constructor accepting `0..=126`.
    pub fn new(level: u8) -> Result<Self> {
        if level > Self::MAX_IMPLICIT {
            return Err(BidiError::illegal(format!(
                "embedding level {level} exceeds {}",
                Self::MAX_IMPLICIT
            )));
        }
        Ok(Self(level))
    }

    #[inline]
    pub(crate) const fn from_raw(level: u8) -> Self {
        Self(level)
    }

    #[inline]
    pub const fn number(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_rtl(self) -> bool {
        self.0 & 1 == 1
    }

    #[inline]
    pub const fn is_ltr(self) -> bool {
        !self.is_rtl()
    }

    /// Smallest even level not below `self`.
    #[inline]
    pub const fn to_even(self) -> Self {
        Self((self.0 + 1) & !1)
    }

    /// Smallest odd level not below `self`.
    #[inline]
    pub const fn to_odd(self) -> Self {
        Self(self.0 | 1)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl TryFrom<u8> for Level {
    type Error = BidiError;

    fn try_from(level: u8) -> Result<Self> {
        Self::new(level)
    }
}

/// Convert a raw level slice, rejecting out-of-range values.
pub fn levels_from_bytes(levels: &[u8]) -> Result<Vec<Level>> {
    let mut out = Vec::new();
    out.try_reserve_exact(levels.len())?;
    for &raw in levels {
        out.push(Level::new(raw)?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Overall direction of a paragraph or line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Every level is even; visual order equals logical order.
    Ltr,
    /// Every level is odd; visual order is logical order reversed.
    Rtl,
    /// Levels of both parities.
    Mixed,
}

impl Direction {
    #[inline]
    pub const fn is_mixed(self) -> bool {
        matches!(self, Self::Mixed)
    }
}

// ---------------------------------------------------------------------------
// Trailing whitespace and direction
// ---------------------------------------------------------------------------

/// Start of the trailing whitespace run (rule L1).
///
/// Text ending in a paragraph separator has no trailing run. Otherwise the
/// scan skips whitespace-like classes and then any characters already at
/// the base level, so the trailing run merges with them.
pub fn trailing_ws_start(classes: &[BidiClass], levels: &[Level], para_level: Level) -> usize {
    let len = levels.len();
    if classes.last() == Some(&BidiClass::B) {
        return len;
    }
    let mut start = len;
    while start > 0 && classes.get(start - 1).is_some_and(|&c| props::is_trailing_ws_class(c)) {
        start -= 1;
    }
    merge_base_level_tail(levels, start, para_level)
}

/// Extend a trailing run backward over characters already at `para_level`.
pub(crate) fn merge_base_level_tail(levels: &[Level], mut start: usize, para_level: Level) -> usize {
    while start > 0 && levels[start - 1] == para_level {
        start -= 1;
    }
    start
}

/// Direction of a level array whose tail from `trailing` sits at the base
/// level.
pub fn classify_direction(levels: &[Level], trailing: usize, para_level: Level) -> Direction {
    if trailing == 0 {
        return if para_level.is_rtl() { Direction::Rtl } else { Direction::Ltr };
    }
    let first = levels[0].is_rtl();
    if trailing < levels.len() && para_level.is_rtl() != first {
        return Direction::Mixed;
    }
    if levels[1..trailing].iter().any(|l| l.is_rtl() != first) {
        return Direction::Mixed;
    }
    if first { Direction::Rtl } else { Direction::Ltr }
}

/// Direction, adjusted base level, and trailing start for a level array.
///
/// Uniform arrays collapse to the base level: it is forced to the parity of
/// the direction and the trailing run covers the whole text.
pub(crate) fn resolve_layout(
    classes: &[BidiClass],
    levels: &[Level],
    para_level: Level,
) -> (Direction, Level, usize) {
    let trailing = trailing_ws_start(classes, levels, para_level);
    match classify_direction(levels, trailing, para_level) {
        Direction::Ltr => (Direction::Ltr, para_level.to_even(), 0),
        Direction::Rtl => (Direction::Rtl, para_level.to_odd(), 0),
        Direction::Mixed => (Direction::Mixed, para_level, trailing),
    }
}

// ---------------------------------------------------------------------------
// LevelView
// ---------------------------------------------------------------------------

/// Borrowed state shared by paragraphs and lines.
#[derive(Debug, Clone, Copy)]
pub struct LevelView<'a> {
    pub(crate) text: &'a [char],
    pub(crate) classes: &'a [BidiClass],
    pub(crate) levels: &'a [Level],
    pub(crate) para_level: Level,
    pub(crate) direction: Direction,
    pub(crate) trailing_ws_start: usize,
    pub(crate) trailing_level: Level,
    pub(crate) insert_points: &'a [InsertPoint],
    pub(crate) control_count: usize,
    pub(crate) options: ReorderOptions,
}

impl<'a> LevelView<'a> {
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[inline]
    pub fn text(&self) -> &'a [char] {
        self.text
    }

    #[inline]
    pub fn classes(&self) -> &'a [BidiClass] {
        self.classes
    }

    #[inline]
    pub fn para_level(&self) -> Level {
        self.para_level
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn trailing_ws_start(&self) -> usize {
        self.trailing_ws_start
    }

    /// Level given to the trailing whitespace run: the base level of the
    /// paragraph the text ends in.
    #[inline]
    pub fn trailing_level(&self) -> Level {
        if self.direction == Direction::Mixed {
            self.trailing_level
        } else {
            self.para_level
        }
    }

    #[inline]
    pub(crate) fn has_insert_points(&self) -> bool {
        !self.insert_points.is_empty()
    }

    #[inline]
    pub(crate) fn has_removed_controls(&self) -> bool {
        self.control_count > 0
    }

    pub(crate) fn check_index(&self, index: usize, what: &str) -> Result<()> {
        if index >= self.len() {
            return Err(BidiError::illegal(format!(
                "{what} {index} out of range 0..{}",
                self.len()
            )));
        }
        Ok(())
    }

    /// Level at `index`, counting the trailing run as the base level.
    pub fn level_at(&self, index: usize) -> Result<Level> {
        self.check_index(index, "character index")?;
        if self.direction != Direction::Mixed || index >= self.trailing_ws_start {
            Ok(self.trailing_level())
        } else {
            Ok(self.levels[index])
        }
    }

    /// Full level array with the trailing run at the base level. Borrows
    /// when there is nothing to patch.
    pub fn levels(&self) -> std::borrow::Cow<'a, [Level]> {
        let start = self.trailing_ws_start;
        if start >= self.len() {
            return std::borrow::Cow::Borrowed(self.levels);
        }
        let mut owned = self.levels.to_vec();
        owned[start..].fill(self.trailing_level());
        std::borrow::Cow::Owned(owned)
    }
}
