#![forbid(unsafe_code)]

//! Run segmentation and rule L2.
//!
//! # Design
//!
//! Runs are built in logical order with their lengths stored in
//! `visual_limit`. Reordering then reverses runs, never characters: for
//! each level from the highest down to the lowest odd level, every maximal
//! sequence of runs at or above that level is reversed in place. The
//! trailing whitespace run takes part only in the final whole-line reversal
//! when the lowest level is odd. A last pass turns lengths into cumulative
//! visual limits.
//!
//! # Example
//!
//! ```
//! use fbidi_reorder::{segment_and_reorder, Level};
//!
//! let levels: Vec<Level> = [0, 0, 1, 1, 1, 0, 0]
//!     .iter()
//!     .map(|&l| Level::new(l).unwrap())
//!     .collect();
//! let runs = segment_and_reorder(&levels, Level::LTR).unwrap();
//! let starts: Vec<usize> = runs.iter().map(|r| r.logical_start()).collect();
//! assert_eq!(starts, [0, 2, 5]);
//! assert!(runs.get(1).unwrap().is_rtl());
//! ```

use fbidi_core::{BidiError, Result};
use smallvec::SmallVec;

use crate::model::{self, Direction, Level, LevelView};
use crate::run::{Run, RunList};

/// Build and reorder the runs of a view, then attach marks and removed
/// controls.
pub(crate) fn compute_runs(view: &LevelView<'_>) -> Result<RunList> {
    let mut runs = segment(
        view.levels,
        view.direction,
        view.trailing_ws_start,
        view.trailing_level(),
    )?;

    for point in view.insert_points {
        let Some(idx) = runs.find_logical(point.pos) else {
            debug_assert!(false, "insert point {} outside every run", point.pos);
            return Err(BidiError::InvalidState("insert point outside every run"));
        };
        runs.runs[idx].insert_remove.marks |= point.flag;
    }

    if view.has_removed_controls() {
        for (pos, &c) in view.text.iter().enumerate() {
            if !fbidi_core::props::is_bidi_control(c) {
                continue;
            }
            let Some(idx) = runs.find_logical(pos) else {
                debug_assert!(false, "control {pos} outside every run");
                return Err(BidiError::InvalidState("bidi control outside every run"));
            };
            runs.runs[idx].insert_remove.removed_controls += 1;
        }
    }

    tracing::debug!(
        text_len = view.len(),
        run_count = runs.len(),
        direction = ?view.direction,
        marks = runs.mark_count(),
        removed_controls = runs.removed_control_count(),
        "runs computed"
    );
    Ok(runs)
}

/// Split `levels` into runs and put them in visual order.
pub(crate) fn segment(
    levels: &[Level],
    direction: Direction,
    trailing_ws_start: usize,
    para_level: Level,
) -> Result<RunList> {
    let len = levels.len();
    if len == 0 {
        return Ok(RunList::default());
    }
    if direction != Direction::Mixed {
        return Ok(RunList::single(len, para_level));
    }

    let limit = trailing_ws_start;
    let mut run_count = 0;
    let mut prev = None;
    for &level in &levels[..limit] {
        if prev != Some(level) {
            run_count += 1;
            prev = Some(level);
        }
    }
    if run_count == 1 && limit == len {
        return Ok(RunList::single(len, levels[0]));
    }

    let has_trailing = limit < len;
    if has_trailing {
        run_count += 1;
    }
    let mut runs: SmallVec<[Run; 8]> = SmallVec::new();
    runs.try_reserve_exact(run_count)
        .map_err(|_| BidiError::MemoryAllocation)?;

    let mut min_level = Level::from_raw(Level::MAX_IMPLICIT + 1);
    let mut max_level = Level::LTR;
    let mut i = 0;
    while i < limit {
        let start = i;
        let level = levels[i];
        min_level = min_level.min(level);
        max_level = max_level.max(level);
        i += 1;
        while i < limit && levels[i] == level {
            i += 1;
        }
        runs.push(Run::new(start, i - start, level));
    }
    if has_trailing {
        runs.push(Run::new(limit, len - limit, para_level));
        min_level = min_level.min(para_level);
    }

    reorder_runs(&mut runs, min_level, max_level, has_trailing);

    let mut visual_limit = 0;
    for run in runs.iter_mut() {
        visual_limit += run.visual_limit;
        run.visual_limit = visual_limit;
    }
    tracing::trace!(
        run_count = runs.len(),
        min_level = min_level.number(),
        max_level = max_level.number(),
        "runs reordered"
    );
    Ok(RunList { runs })
}

/// Rule L2 over whole runs.
fn reorder_runs(runs: &mut [Run], min_level: Level, max_level: Level, has_trailing: bool) {
    let (min, max) = (min_level.number(), max_level.number());
    if max <= (min | 1) {
        return;
    }
    // Levels at min stay put unless min is odd; handled by the final pass.
    let lowest = min + 1;
    let partial = if has_trailing { runs.len() - 1 } else { runs.len() };

    let mut level = max;
    while level > lowest {
        level -= 1;
        let mut first = 0;
        while first < partial {
            while first < partial && runs[first].level.number() < level {
                first += 1;
            }
            if first >= partial {
                break;
            }
            let mut limit = first + 1;
            while limit < partial && runs[limit].level.number() >= level {
                limit += 1;
            }
            runs[first..limit].reverse();
            if limit == partial {
                break;
            }
            first = limit + 1;
        }
    }

    if min & 1 == 1 {
        runs.reverse();
    }
}

/// Runs for a bare level array (rules L1 and L2).
///
/// Without character classes the trailing run is the tail of characters
/// already at `base_level`.
pub fn segment_and_reorder(levels: &[Level], base_level: Level) -> Result<RunList> {
    let trailing = model::merge_base_level_tail(levels, levels.len(), base_level);
    let (direction, para_level, trailing) =
        match model::classify_direction(levels, trailing, base_level) {
            Direction::Ltr => (Direction::Ltr, base_level.to_even(), 0),
            Direction::Rtl => (Direction::Rtl, base_level.to_odd(), 0),
            Direction::Mixed => (Direction::Mixed, base_level, trailing),
        };
    segment(levels, direction, trailing, para_level)
}

// ---------------------------------------------------------------------------
// Index maps straight from levels
// ---------------------------------------------------------------------------

/// Min and max level, or `None` when nothing needs reordering.
fn prepare_reorder(levels: &[Level]) -> Option<(u8, u8)> {
    let min = levels.iter().map(|l| l.number()).min()?;
    let max = levels.iter().map(|l| l.number()).max()?;
    if min == max && min & 1 == 0 {
        return None;
    }
    Some((min | 1, max))
}

/// Visit every maximal span of levels at or above each level from `max`
/// down to `min`.
fn for_each_reversal(levels: &[Level], min: u8, max: u8, mut reverse: impl FnMut(usize, usize)) {
    let len = levels.len();
    let mut level = max;
    loop {
        let mut start = 0;
        loop {
            while start < len && levels[start].number() < level {
                start += 1;
            }
            if start >= len {
                break;
            }
            let mut limit = start + 1;
            while limit < len && levels[limit].number() >= level {
                limit += 1;
            }
            reverse(start, limit);
            if limit == len {
                break;
            }
            start = limit + 1;
        }
        if level <= min {
            break;
        }
        level -= 1;
    }
}

/// Logical-to-visual map computed from levels alone.
pub fn reorder_logical(levels: &[Level]) -> Result<Vec<usize>> {
    let mut map: Vec<usize> = Vec::new();
    map.try_reserve_exact(levels.len())?;
    map.extend(0..levels.len());
    if let Some((min, max)) = prepare_reorder(levels) {
        for_each_reversal(levels, min, max, |start, limit| {
            let sum = start + limit - 1;
            for slot in &mut map[start..limit] {
                *slot = sum - *slot;
            }
        });
    }
    Ok(map)
}

/// Visual-to-logical map computed from levels alone.
pub fn reorder_visual(levels: &[Level]) -> Result<Vec<usize>> {
    let mut map: Vec<usize> = Vec::new();
    map.try_reserve_exact(levels.len())?;
    map.extend(0..levels.len());
    if let Some((min, max)) = prepare_reorder(levels) {
        for_each_reversal(levels, min, max, |start, limit| map[start..limit].reverse());
    }
    Ok(map)
}
