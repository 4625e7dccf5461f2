#![forbid(unsafe_code)]

//! Runs, run lists, and the mark/control bookkeeping attached to them.

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::model::Level;

/// Left-to-right mark.
pub const LRM: char = '\u{200E}';
/// Right-to-left mark.
pub const RLM: char = '\u{200F}';

bitflags! {
    /// Marks to emit around a run when writing inverse-bidi output.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct MarkFlags: u8 {
        const LRM_BEFORE = 1;
        const LRM_AFTER = 2;
        const RLM_BEFORE = 4;
        const RLM_AFTER = 8;
    }
}

impl MarkFlags {
    #[inline]
    pub const fn has_before(self) -> bool {
        self.intersects(Self::LRM_BEFORE.union(Self::RLM_BEFORE))
    }

    #[inline]
    pub const fn has_after(self) -> bool {
        self.intersects(Self::LRM_AFTER.union(Self::RLM_AFTER))
    }

    /// Mark to write before the run; LRM wins when both are requested.
    pub const fn before_mark(self) -> Option<char> {
        if self.contains(Self::LRM_BEFORE) {
            Some(LRM)
        } else if self.contains(Self::RLM_BEFORE) {
            Some(RLM)
        } else {
            None
        }
    }

    /// Mark to write after the run; LRM wins when both are requested.
    pub const fn after_mark(self) -> Option<char> {
        if self.contains(Self::LRM_AFTER) {
            Some(LRM)
        } else if self.contains(Self::RLM_AFTER) {
            Some(RLM)
        } else {
            None
        }
    }

    /// Number of marks this set produces (0, 1 or 2).
    #[inline]
    pub const fn mark_count(self) -> usize {
        self.has_before() as usize + self.has_after() as usize
    }
}

/// A request to insert a mark next to the character at `pos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InsertPoint {
    pub pos: usize,
    pub flag: MarkFlags,
}

impl InsertPoint {
    pub const fn new(pos: usize, flag: MarkFlags) -> Self {
        Self { pos, flag }
    }
}

/// Per-run record of inserted marks and removed bidi controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InsertRemove {
    pub marks: MarkFlags,
    pub removed_controls: usize,
}

impl InsertRemove {
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.marks.is_empty() && self.removed_controls == 0
    }
}

/// Direction of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunDirection {
    Ltr,
    Rtl,
}

impl RunDirection {
    #[inline]
    pub const fn of(level: Level) -> Self {
        if level.is_rtl() { Self::Rtl } else { Self::Ltr }
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Direction bit of the packed logical start.
pub const INDEX_ODD_BIT: u32 = 1 << 31;

/// A maximal span of characters at one level.
///
/// `visual_limit` is cumulative: the visual index one past this run's last
/// character once all runs are in visual order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    pub(crate) logical_start: usize,
    pub(crate) visual_limit: usize,
    pub(crate) level: Level,
    pub(crate) insert_remove: InsertRemove,
}

impl Run {
    pub(crate) const fn new(logical_start: usize, visual_limit: usize, level: Level) -> Self {
        Self {
            logical_start,
            visual_limit,
            level,
            insert_remove: InsertRemove {
                marks: MarkFlags::empty(),
                removed_controls: 0,
            },
        }
    }

    #[inline]
    pub const fn logical_start(&self) -> usize {
        self.logical_start
    }

    #[inline]
    pub const fn visual_limit(&self) -> usize {
        self.visual_limit
    }

    #[inline]
    pub const fn level(&self) -> Level {
        self.level
    }

    #[inline]
    pub const fn direction(&self) -> RunDirection {
        RunDirection::of(self.level)
    }

    #[inline]
    pub const fn is_rtl(&self) -> bool {
        self.level.is_rtl()
    }

    #[inline]
    pub const fn insert_remove(&self) -> InsertRemove {
        self.insert_remove
    }

    /// Logical start with the direction folded into bit 31.
    #[inline]
    pub const fn packed_logical_start(&self) -> u32 {
        let start = self.logical_start as u32;
        if self.is_rtl() { start | INDEX_ODD_BIT } else { start }
    }

    /// Split a packed logical start into index and direction.
    #[inline]
    pub const fn unpack_logical_start(packed: u32) -> (usize, RunDirection) {
        let dir = if packed & INDEX_ODD_BIT != 0 {
            RunDirection::Rtl
        } else {
            RunDirection::Ltr
        };
        ((packed & !INDEX_ODD_BIT) as usize, dir)
    }
}

/// Public description of the run at a visual position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualRun {
    pub direction: RunDirection,
    pub logical_start: usize,
    pub length: usize,
}

/// The run containing a logical position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LogicalRun {
    /// Visual index of the run.
    pub run_index: usize,
    /// One past the last logical index of the run.
    pub logical_limit: usize,
    pub level: Level,
}

// ---------------------------------------------------------------------------
// RunList
// ---------------------------------------------------------------------------

/// Runs in visual order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunList {
    pub(crate) runs: SmallVec<[Run; 8]>,
}

/// Run counts above which visual lookups switch to binary search.
pub(crate) const LINEAR_SEARCH_MAX_RUNS: usize = 10;

impl RunList {
    pub(crate) fn single(len: usize, level: Level) -> Self {
        let mut runs = SmallVec::new();
        runs.push(Run::new(0, len, level));
        Self { runs }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Run] {
        &self.runs
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Run> {
        self.runs.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Run> {
        self.runs.iter()
    }

    /// Visual index of the first character of run `index`.
    #[inline]
    pub fn visual_start(&self, index: usize) -> usize {
        if index == 0 { 0 } else { self.runs[index - 1].visual_limit }
    }

    /// Number of characters in run `index`.
    #[inline]
    pub fn run_length(&self, index: usize) -> usize {
        self.runs[index].visual_limit - self.visual_start(index)
    }

    /// Total characters covered by all runs.
    pub fn text_length(&self) -> usize {
        self.runs.last().map_or(0, |r| r.visual_limit)
    }

    /// Index of the run containing logical position `pos`.
    pub fn find_logical(&self, pos: usize) -> Option<usize> {
        let mut visual_start = 0;
        for (i, run) in self.runs.iter().enumerate() {
            let len = run.visual_limit - visual_start;
            if pos >= run.logical_start && pos < run.logical_start + len {
                return Some(i);
            }
            visual_start = run.visual_limit;
        }
        None
    }

    /// Index of the run containing visual position `visual`.
    pub fn find_visual(&self, visual: usize) -> Option<usize> {
        let idx = if self.runs.len() <= LINEAR_SEARCH_MAX_RUNS {
            self.runs
                .iter()
                .position(|r| visual < r.visual_limit)
                .unwrap_or(self.runs.len())
        } else {
            self.runs.partition_point(|r| r.visual_limit <= visual)
        };
        (idx < self.runs.len()).then_some(idx)
    }

    /// Total marks the runs will insert.
    pub fn mark_count(&self) -> usize {
        self.runs.iter().map(|r| r.insert_remove.marks.mark_count()).sum()
    }

    /// Total bidi controls the runs will drop.
    pub fn removed_control_count(&self) -> usize {
        self.runs.iter().map(|r| r.insert_remove.removed_controls).sum()
    }
}

impl<'a> IntoIterator for &'a RunList {
    type Item = &'a Run;
    type IntoIter = std::slice::Iter<'a, Run>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.iter()
    }
}
