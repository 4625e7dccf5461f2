#![forbid(unsafe_code)]

//! Space bookkeeping around ligatures and two-cell letters.
//!
//! Forming a LamAlef frees one cell and removing tashkeel frees another;
//! expanding a LamAlef back into Lam + Alef needs one. The placement
//! policies decide where those cells go: dropped or grown (resize), next
//! to the ligature (near), or taken from the run of spaces at either end
//! of the buffer (begin, end).
//!
//! All functions here work on the visual-LTR working buffer.

use fbidi_core::{BidiError, Result};
use tracing::debug;

use crate::link::{
    self, HAMZA_ISOLATED, LAM_CHAR, LAMALEF_PLACEHOLDER, SPACE, TASHKEEL_PLACEHOLDER,
};
use crate::options::{LamAlefMode, ShapeOptions, TailType, TashkeelMode};

/// Leading and trailing space counts. A buffer of only spaces counts them
/// all as leading.
pub(crate) fn count_spaces(buf: &[char]) -> (usize, usize) {
    let left = buf.iter().take_while(|&&c| c == SPACE).count();
    if left == buf.len() {
        return (left, 0);
    }
    let right = buf.iter().rev().take_while(|&&c| c == SPACE).count();
    (left, right)
}

/// Reverse the buffer between its leading and trailing spaces.
pub(crate) fn invert_core(buf: &mut [char]) {
    let (left, right) = count_spaces(buf);
    let limit = buf.len() - right;
    buf[left..limit].reverse();
}

// ---------------------------------------------------------------------------
// Shaping: placeholders
// ---------------------------------------------------------------------------

/// Resolve the placeholders left by ligature forming and tashkeel removal.
pub(crate) fn place_generated_spaces(buf: &mut Vec<char>, opts: &ShapeOptions) {
    let swapped = opts.spaces_swapped();
    let (begin_la, end_la) = if swapped {
        (LamAlefMode::End, LamAlefMode::Begin)
    } else {
        (LamAlefMode::Begin, LamAlefMode::End)
    };
    let (begin_tk, end_tk) = if swapped {
        (TashkeelMode::End, TashkeelMode::Begin)
    } else {
        (TashkeelMode::Begin, TashkeelMode::End)
    };

    let resize_la = opts.lam_alef == LamAlefMode::Resize;
    let resize_tk = opts.tashkeel == TashkeelMode::Resize;
    if resize_la || resize_tk {
        buf.retain(|&c| {
            !((resize_la && c == LAMALEF_PLACEHOLDER) || (resize_tk && c == TASHKEEL_PLACEHOLDER))
        });
    }

    if opts.lam_alef == LamAlefMode::Near {
        for c in buf.iter_mut().filter(|c| **c == LAMALEF_PLACEHOLDER) {
            *c = SPACE;
        }
    }

    let auto = opts.lam_alef == LamAlefMode::Auto;
    let to_begin = (opts.lam_alef == begin_la || (auto && swapped), opts.tashkeel == begin_tk);
    let moved = take_placeholders(buf, to_begin);
    if moved > 0 {
        buf.splice(0..0, std::iter::repeat_n(SPACE, moved));
    }

    let to_end = (opts.lam_alef == end_la || (auto && !swapped), opts.tashkeel == end_tk);
    let moved = take_placeholders(buf, to_end);
    buf.extend(std::iter::repeat_n(SPACE, moved));
}

/// Drop the selected placeholders and return how many went.
fn take_placeholders(buf: &mut Vec<char>, (lam_alef, tashkeel): (bool, bool)) -> usize {
    if !lam_alef && !tashkeel {
        return 0;
    }
    let before = buf.len();
    buf.retain(|&c| {
        !((lam_alef && c == LAMALEF_PLACEHOLDER) || (tashkeel && c == TASHKEEL_PLACEHOLDER))
    });
    before - buf.len()
}

// ---------------------------------------------------------------------------
// Expansion
// ---------------------------------------------------------------------------

/// Which composite characters [`expand_near`] splits.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct NearTargets {
    pub seen: bool,
    pub yeh_hamza: bool,
    pub lam_alef: bool,
}

/// Expand LamAlefs right to left, each consuming one trailing space.
pub(crate) fn expand_at_end(buf: &mut Vec<char>) -> Result<()> {
    let (_, mut right) = count_spaces(buf);
    let mut i = buf.len() - right;
    while i > 0 {
        i -= 1;
        let c = buf[i];
        if !link::is_lam_alef(c) {
            continue;
        }
        if right == 0 {
            return Err(BidiError::NoSpaceAvailable);
        }
        buf.pop();
        buf[i] = link::alef_of_lam_alef(c);
        buf.insert(i + 1, LAM_CHAR);
        right -= 1;
    }
    Ok(())
}

/// Expand LamAlefs right to left, each consuming one leading space.
pub(crate) fn expand_at_begin(buf: &mut Vec<char>) -> Result<()> {
    let (mut left, _) = count_spaces(buf);
    let mut i = buf.len();
    while i > 0 {
        i -= 1;
        let c = buf[i];
        if !link::is_lam_alef(c) {
            continue;
        }
        if left == 0 {
            return Err(BidiError::NoSpaceAvailable);
        }
        // A leading space precedes every LamAlef while `left > 0`.
        buf.remove(0);
        i -= 1;
        buf[i] = link::alef_of_lam_alef(c);
        buf.insert(i + 1, LAM_CHAR);
        left -= 1;
    }
    Ok(())
}

/// Split composite characters using the space right beside them. Returns
/// how many could not be split for want of a space.
pub(crate) fn expand_near(buf: &mut [char], targets: NearTargets, tail: TailType) -> usize {
    let mut misses = 0;
    // A LamAlef opening the buffer has no space before it and stays whole.
    if targets.lam_alef && buf.first().is_some_and(|&c| link::is_lam_alef(c)) {
        misses += 1;
    }
    let mut before: Option<char> = None;
    let mut i = 0;
    while i < buf.len() {
        let c = buf[i];
        let after = buf.get(i + 1).copied();
        if targets.seen && link::is_seen_tail_family(c) {
            if before == Some(SPACE) {
                buf[i - 1] = tail.tail_char();
            } else {
                misses += 1;
            }
        } else if targets.yeh_hamza && link::is_yeh_hamza_form(c) {
            if before == Some(SPACE) {
                buf[i - 1] = HAMZA_ISOLATED;
                buf[i] = link::yeh_for(c);
            } else {
                misses += 1;
            }
        } else if let Some(lig) = after.filter(|&a| targets.lam_alef && link::is_lam_alef(a)) {
            if c == SPACE {
                buf[i] = link::alef_of_lam_alef(lig);
                buf[i + 1] = LAM_CHAR;
                before = Some(lig);
                i += 2;
                continue;
            }
            misses += 1;
        }
        before = Some(c);
        i += 1;
    }
    misses
}

/// Grow every LamAlef into Alef + Lam.
pub(crate) fn expand_resize(buf: &mut Vec<char>) -> Result<()> {
    let extra = buf.iter().filter(|&&c| link::is_lam_alef(c)).count();
    if extra == 0 {
        return Ok(());
    }
    let mut grown = Vec::new();
    grown.try_reserve(buf.len() + extra)?;
    for &c in buf.iter() {
        if link::is_lam_alef(c) {
            grown.push(link::alef_of_lam_alef(c));
            grown.push(LAM_CHAR);
        } else {
            grown.push(c);
        }
    }
    *buf = grown;
    Ok(())
}

type Expansion = fn(&mut Vec<char>) -> Result<()>;

/// Expand LamAlefs after deshaping according to the Lam-Alef policy.
pub(crate) fn expand_lam_alefs(buf: &mut Vec<char>, opts: &ShapeOptions) -> Result<()> {
    let swapped = opts.spaces_swapped();
    match opts.lam_alef {
        LamAlefMode::Resize => expand_resize(buf),
        LamAlefMode::Near => expand_near_strict(buf, opts.tail),
        LamAlefMode::End if swapped => expand_at_begin(buf),
        LamAlefMode::Begin if swapped => expand_at_end(buf),
        LamAlefMode::End => expand_at_end(buf),
        LamAlefMode::Begin => expand_at_begin(buf),
        LamAlefMode::Auto => {
            let (first, second) = if swapped {
                (expand_at_begin as Expansion, expand_at_end as Expansion)
            } else {
                (expand_at_end as Expansion, expand_at_begin as Expansion)
            };
            match first(buf) {
                Err(BidiError::NoSpaceAvailable) => {}
                other => return other,
            }
            debug!(swapped, "lam-alef expansion: first edge exhausted, falling back to other edge");
            match second(buf) {
                Err(BidiError::NoSpaceAvailable) => {}
                other => return other,
            }
            debug!("lam-alef expansion: edges exhausted, falling back to near spaces");
            expand_near_strict(buf, opts.tail)
        }
    }
}

fn expand_near_strict(buf: &mut [char], tail: TailType) -> Result<()> {
    let targets = NearTargets {
        lam_alef: true,
        ..NearTargets::default()
    };
    match expand_near(buf, targets, tail) {
        0 => Ok(()),
        _ => Err(BidiError::NoSpaceAvailable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    const LAM_ALEF: char = '\u{FEFB}';
    const ALEF: char = '\u{0627}';

    fn opts(mode: LamAlefMode) -> ShapeOptions {
        ShapeOptions::default().with_lam_alef(mode)
    }

    #[test]
    fn counts_edge_spaces() {
        assert_eq!(count_spaces(&[' ', 'a', ' ', ' ']), (1, 2));
        assert_eq!(count_spaces(&[' ', ' ']), (2, 0));
        assert_eq!(count_spaces(&[]), (0, 0));
    }

    #[test]
    fn inversion_keeps_edge_spaces() {
        let mut buf = vec![' ', 'a', 'b', 'c', ' '];
        invert_core(&mut buf);
        assert_eq!(buf, [' ', 'c', 'b', 'a', ' ']);
    }

    #[test]
    fn resize_drops_placeholders() {
        let mut buf = vec![LAMALEF_PLACEHOLDER, LAM_ALEF];
        place_generated_spaces(&mut buf, &opts(LamAlefMode::Resize));
        assert_eq!(buf, [LAM_ALEF]);
    }

    #[test]
    fn near_turns_placeholders_into_spaces() {
        let mut buf = vec!['a', LAMALEF_PLACEHOLDER, LAM_ALEF];
        place_generated_spaces(&mut buf, &opts(LamAlefMode::Near));
        assert_eq!(buf, ['a', ' ', LAM_ALEF]);
    }

    #[test]
    fn begin_and_end_move_spaces_to_the_edges() {
        let mut begin = vec!['a', LAMALEF_PLACEHOLDER, LAM_ALEF];
        place_generated_spaces(&mut begin, &opts(LamAlefMode::Begin));
        assert_eq!(begin, [' ', 'a', LAM_ALEF]);

        let mut end = vec!['a', LAMALEF_PLACEHOLDER, LAM_ALEF];
        place_generated_spaces(&mut end, &opts(LamAlefMode::End));
        assert_eq!(end, ['a', LAM_ALEF, ' ']);

        let mut auto = vec!['a', LAMALEF_PLACEHOLDER, LAM_ALEF];
        place_generated_spaces(&mut auto, &opts(LamAlefMode::Auto));
        assert_eq!(auto, ['a', LAM_ALEF, ' ']);
    }

    #[test]
    fn relative_spaces_swap_edges_for_visual_text() {
        let visual = opts(LamAlefMode::Begin)
            .with_direction(crate::options::TextDirection::VisualLtr)
            .with_spaces_relative_to_text(true);
        let mut buf = vec!['a', LAMALEF_PLACEHOLDER, LAM_ALEF];
        place_generated_spaces(&mut buf, &visual);
        assert_eq!(buf, ['a', LAM_ALEF, ' ']);
    }

    #[test]
    fn tashkeel_placeholders_follow_their_own_policy() {
        let o = ShapeOptions::default().with_tashkeel(TashkeelMode::Begin);
        let mut buf = vec!['a', TASHKEEL_PLACEHOLDER, 'b'];
        place_generated_spaces(&mut buf, &o);
        assert_eq!(buf, [' ', 'a', 'b']);
    }

    #[test]
    fn end_expansion_consumes_trailing_spaces() {
        let mut buf = vec![LAM_ALEF, ' '];
        expand_at_end(&mut buf).unwrap();
        assert_eq!(buf, [ALEF, LAM_CHAR]);

        let mut none = vec![LAM_ALEF];
        assert_eq!(expand_at_end(&mut none), Err(BidiError::NoSpaceAvailable));
    }

    #[test]
    fn begin_expansion_consumes_leading_spaces() {
        let mut buf = vec![' ', 'a', LAM_ALEF];
        expand_at_begin(&mut buf).unwrap();
        assert_eq!(buf, ['a', ALEF, LAM_CHAR]);

        let mut two = vec![' ', LAM_ALEF, LAM_ALEF];
        assert_eq!(expand_at_begin(&mut two), Err(BidiError::NoSpaceAvailable));
    }

    #[test]
    fn near_expansion() {
        let mut buf = vec![' ', LAM_ALEF, 'a'];
        let misses = expand_near(&mut buf, NearTargets { lam_alef: true, ..Default::default() }, TailType::default());
        assert_eq!(misses, 0);
        assert_eq!(buf, [ALEF, LAM_CHAR, 'a']);

        let mut first = vec![LAM_ALEF, ' '];
        let misses = expand_near(&mut first, NearTargets { lam_alef: true, ..Default::default() }, TailType::default());
        assert_eq!(misses, 1);
    }

    #[test]
    fn near_leaves_a_leading_ligature_whole() {
        let targets = NearTargets { lam_alef: true, ..Default::default() };
        let mut buf = vec![LAM_ALEF, ' ', LAM_ALEF];
        assert_eq!(expand_near(&mut buf, targets, TailType::default()), 1);
        assert_eq!(buf, [LAM_ALEF, ALEF, LAM_CHAR]);

        let mut alone = vec![LAM_ALEF];
        assert_eq!(expand_near_strict(&mut alone, TailType::default()), Err(BidiError::NoSpaceAvailable));
        assert_eq!(alone, [LAM_ALEF]);
    }

    #[test]
    fn near_two_cell_letters() {
        let targets = NearTargets { seen: true, yeh_hamza: true, lam_alef: false };
        let mut buf = vec![' ', '\u{FEB1}', ' ', '\u{FE8A}'];
        assert_eq!(expand_near(&mut buf, targets, TailType::TailFragment), 0);
        assert_eq!(buf, ['\u{FE73}', '\u{FEB1}', HAMZA_ISOLATED, '\u{FEF0}']);

        let mut tight = vec!['a', '\u{FEB1}'];
        assert_eq!(expand_near(&mut tight, targets, TailType::ZeroWidthSpace), 1);
        assert_eq!(tight, ['a', '\u{FEB1}']);
    }

    #[test]
    fn resize_grows_the_buffer() {
        let mut buf = vec!['a', LAM_ALEF];
        expand_resize(&mut buf).unwrap();
        assert_eq!(buf, ['a', ALEF, LAM_CHAR]);
    }

    #[test]
    fn swapped_policies_use_the_other_edge() {
        let visual = opts(LamAlefMode::End)
            .with_direction(crate::options::TextDirection::VisualLtr)
            .with_spaces_relative_to_text(true);
        let mut buf = vec![' ', LAM_ALEF];
        expand_lam_alefs(&mut buf, &visual).unwrap();
        assert_eq!(buf, [ALEF, LAM_CHAR]);
    }

    #[traced_test]
    #[test]
    fn auto_falls_back_to_the_other_edge() {
        let mut buf = vec![' ', LAM_ALEF];
        expand_lam_alefs(&mut buf, &opts(LamAlefMode::Auto)).unwrap();
        assert_eq!(buf, [ALEF, LAM_CHAR]);
        assert!(logs_contain("falling back to other edge"));
    }

    #[traced_test]
    #[test]
    fn auto_falls_back_to_near_then_fails() {
        let mut buf = vec!['a', ' ', LAM_ALEF, 'b'];
        expand_lam_alefs(&mut buf, &opts(LamAlefMode::Auto)).unwrap();
        assert_eq!(buf, ['a', ALEF, LAM_CHAR, 'b']);
        assert!(logs_contain("falling back to near spaces"));

        let mut stuck = vec![LAM_ALEF];
        assert_eq!(
            expand_lam_alefs(&mut stuck, &opts(LamAlefMode::Auto)),
            Err(BidiError::NoSpaceAvailable)
        );
    }
}
