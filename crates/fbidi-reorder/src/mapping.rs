#![forbid(unsafe_code)]

//! Logical/visual index mapping over a computed run list.
//!
//! With inserted marks, visual indexes count the marks; a visual index that
//! lands on a mark maps to `None`. With removed controls, visual indexes
//! skip the controls; a logical index naming a control maps to `None`.

use fbidi_core::props::is_bidi_control;
use fbidi_core::{BidiError, Result};

use crate::model::{Direction, LevelView};
use crate::run::RunList;

fn lost_run() -> BidiError {
    debug_assert!(false, "index not covered by any run");
    BidiError::InvalidState("index not covered by any run")
}

/// Length of the reordered output, counting marks and removed controls.
pub(crate) fn result_length(view: &LevelView<'_>, runs: &RunList) -> usize {
    if view.has_insert_points() {
        view.len() + runs.mark_count()
    } else if view.has_removed_controls() {
        view.len() - view.control_count
    } else {
        view.len()
    }
}

pub(crate) fn logical_to_visual(
    view: &LevelView<'_>,
    runs: &RunList,
    logical: usize,
) -> Result<Option<usize>> {
    view.check_index(logical, "logical index")?;
    let len = view.len();
    let visual = match view.direction {
        Direction::Ltr => logical,
        Direction::Rtl => len - logical - 1,
        Direction::Mixed => {
            let mut found = None;
            let mut visual_start = 0;
            for run in runs {
                let run_len = run.visual_limit - visual_start;
                let offset = logical.wrapping_sub(run.logical_start);
                if offset < run_len {
                    found = Some(if run.is_rtl() {
                        visual_start + run_len - offset - 1
                    } else {
                        visual_start + offset
                    });
                    break;
                }
                visual_start = run.visual_limit;
            }
            found.ok_or_else(lost_run)?
        }
    };

    if view.has_insert_points() {
        let mut marks = 0;
        for run in runs {
            let flags = run.insert_remove.marks;
            if flags.has_before() {
                marks += 1;
            }
            if visual < run.visual_limit {
                return Ok(Some(visual + marks));
            }
            if flags.has_after() {
                marks += 1;
            }
        }
        return Err(lost_run());
    }

    if view.has_removed_controls() {
        if is_bidi_control(view.text[logical]) {
            return Ok(None);
        }
        let mut controls = 0;
        let mut visual_start = 0;
        for run in runs {
            let run_len = run.visual_limit - visual_start;
            let removed = run.insert_remove.removed_controls;
            if visual >= run.visual_limit {
                controls += removed;
                visual_start = run.visual_limit;
                continue;
            }
            if removed > 0 {
                // Controls that precede `logical` visually within this run.
                let span = if run.is_rtl() {
                    logical + 1..run.logical_start + run_len
                } else {
                    run.logical_start..logical
                };
                controls += view.text[span].iter().filter(|&&c| is_bidi_control(c)).count();
            }
            return Ok(Some(visual - controls));
        }
        return Err(lost_run());
    }

    Ok(Some(visual))
}

pub(crate) fn visual_to_logical(
    view: &LevelView<'_>,
    runs: &RunList,
    visual: usize,
) -> Result<Option<usize>> {
    let result_len = result_length(view, runs);
    if visual >= result_len {
        return Err(BidiError::illegal(format!(
            "visual index {visual} out of range 0..{result_len}"
        )));
    }
    let plain = !view.has_insert_points() && !view.has_removed_controls();
    if plain {
        match view.direction {
            Direction::Ltr => return Ok(Some(visual)),
            Direction::Rtl => return Ok(Some(view.len() - visual - 1)),
            Direction::Mixed => {}
        }
    }

    let mut visual = visual;
    if view.has_insert_points() {
        let mut marks = 0;
        let mut visual_start = 0;
        let mut resolved = false;
        for run in runs {
            let run_len = run.visual_limit - visual_start;
            let flags = run.insert_remove.marks;
            if flags.has_before() {
                if visual <= visual_start + marks {
                    return Ok(None);
                }
                marks += 1;
            }
            if visual < run.visual_limit + marks {
                visual -= marks;
                resolved = true;
                break;
            }
            if flags.has_after() {
                if visual == visual_start + run_len + marks {
                    return Ok(None);
                }
                marks += 1;
            }
            visual_start = run.visual_limit;
        }
        if !resolved {
            return Err(lost_run());
        }
    } else if view.has_removed_controls() {
        let mut controls = 0;
        let mut visual_start = 0;
        for run in runs {
            let run_len = run.visual_limit - visual_start;
            let removed = run.insert_remove.removed_controls;
            if visual + controls + removed >= run.visual_limit {
                controls += removed;
                visual_start = run.visual_limit;
                continue;
            }
            if removed > 0 {
                let last = run.logical_start + run_len - 1;
                for j in 0..run_len {
                    let k = if run.is_rtl() { last - j } else { run.logical_start + j };
                    if is_bidi_control(view.text[k]) {
                        controls += 1;
                    }
                    if visual + controls == visual_start + j {
                        break;
                    }
                }
            }
            visual += controls;
            break;
        }
    }

    let idx = runs.find_visual(visual).ok_or_else(lost_run)?;
    let run = &runs.as_slice()[idx];
    let logical = if run.is_rtl() {
        run.logical_start + run.visual_limit - visual - 1
    } else {
        run.logical_start + (visual - runs.visual_start(idx))
    };
    Ok(Some(logical))
}

/// For each logical index, its visual index.
pub(crate) fn logical_map(view: &LevelView<'_>, runs: &RunList) -> Result<Vec<Option<usize>>> {
    let len = view.len();
    let mut map: Vec<Option<usize>> = Vec::new();
    map.try_reserve_exact(len)?;
    map.resize(len, None);

    let mut visual_start = 0;
    for run in runs {
        let run_len = run.visual_limit - visual_start;
        for j in 0..run_len {
            let logical = if run.is_rtl() {
                run.logical_start + run_len - 1 - j
            } else {
                run.logical_start + j
            };
            map[logical] = Some(visual_start + j);
        }
        visual_start = run.visual_limit;
    }

    if view.has_insert_points() {
        let mut marks = 0;
        let mut visual_start = 0;
        for run in runs {
            let run_len = run.visual_limit - visual_start;
            let flags = run.insert_remove.marks;
            if flags.has_before() {
                marks += 1;
            }
            if marks > 0 {
                for slot in &mut map[run.logical_start..run.logical_start + run_len] {
                    *slot = slot.map(|v| v + marks);
                }
            }
            if flags.has_after() {
                marks += 1;
            }
            visual_start = run.visual_limit;
        }
    } else if view.has_removed_controls() {
        let mut controls = 0;
        let mut visual_start = 0;
        for run in runs {
            let run_len = run.visual_limit - visual_start;
            let removed = run.insert_remove.removed_controls;
            visual_start = run.visual_limit;
            if controls == 0 && removed == 0 {
                continue;
            }
            let logical_limit = run.logical_start + run_len;
            if removed == 0 {
                for slot in &mut map[run.logical_start..logical_limit] {
                    *slot = slot.map(|v| v - controls);
                }
                continue;
            }
            for j in 0..run_len {
                let k = if run.is_rtl() {
                    logical_limit - j - 1
                } else {
                    run.logical_start + j
                };
                if is_bidi_control(view.text[k]) {
                    controls += 1;
                    map[k] = None;
                } else {
                    map[k] = map[k].map(|v| v - controls);
                }
            }
        }
    }
    Ok(map)
}

/// For each visual index, its logical index (`None` for inserted marks).
pub(crate) fn visual_map(view: &LevelView<'_>, runs: &RunList) -> Result<Vec<Option<usize>>> {
    let mut map: Vec<Option<usize>> = Vec::new();
    map.try_reserve_exact(result_length(view, runs))?;
    let marks = view.has_insert_points();
    let skip_controls = !marks && view.has_removed_controls();

    let mut visual_start = 0;
    for run in runs {
        let run_len = run.visual_limit - visual_start;
        let flags = run.insert_remove.marks;
        if marks && flags.has_before() {
            map.push(None);
        }
        for j in 0..run_len {
            let logical = if run.is_rtl() {
                run.logical_start + run_len - 1 - j
            } else {
                run.logical_start + j
            };
            if skip_controls
                && run.insert_remove.removed_controls > 0
                && is_bidi_control(view.text[logical])
            {
                continue;
            }
            map.push(Some(logical));
        }
        if marks && flags.has_after() {
            map.push(None);
        }
        visual_start = run.visual_limit;
    }
    Ok(map)
}

/// Invert an index map. The result is as long as the largest mapped value
/// plus one; unmapped slots are `None`. When several sources map to the
/// same destination the smallest source index wins.
pub fn invert_map(src: &[Option<usize>]) -> Vec<Option<usize>> {
    let dest_len = src.iter().flatten().max().map_or(0, |&m| m + 1);
    let mut dest = vec![None; dest_len];
    for (i, value) in src.iter().enumerate().rev() {
        if let Some(v) = *value {
            dest[v] = Some(i);
        }
    }
    dest
}
