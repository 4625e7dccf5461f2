#![forbid(unsafe_code)]

//! Writing text in visual order.
//!
//! Every output path drives one routine into a [`CharSink`]. Fixed-size
//! destinations are pre-flighted by running the same routine into a
//! counting sink first, so the reported length always matches what a
//! retry with that capacity writes.
//!
//! # Example
//!
//! ```
//! use fbidi_reorder::{write_reverse, WriteOptions};
//!
//! assert_eq!(write_reverse("a(b)", WriteOptions::DO_MIRRORING), "(b)a");
//! assert_eq!(write_reverse("ab", WriteOptions::empty()), "ba");
//! ```

use bitflags::bitflags;
use fbidi_core::props::{self, is_bidi_control, BidiClass, PropsTable};
use fbidi_core::{BidiError, Result};

use crate::model::LevelView;
use crate::run::{MarkFlags, RunList, LRM, RLM};

bitflags! {
    /// Output options for reordered and reversed text.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct WriteOptions: u16 {
        /// Keep combining marks after their base when reversing.
        const KEEP_BASE_COMBINING = 1;
        /// Replace characters in RTL runs by their mirror glyphs.
        const DO_MIRRORING = 2;
        /// Surround runs with LRM/RLM as inverse bidi requires.
        const INSERT_LRM_FOR_NUMERIC = 4;
        /// Drop bidi control characters.
        const REMOVE_BIDI_CONTROLS = 8;
        /// Produce the whole line in reverse visual order.
        const OUTPUT_REVERSE = 16;
    }
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Destination for written code points.
pub(crate) trait CharSink {
    fn push(&mut self, c: char);
}

impl CharSink for String {
    #[inline]
    fn push(&mut self, c: char) {
        String::push(self, c);
    }
}

/// Counts without storing.
#[derive(Debug, Default)]
struct Counter(usize);

impl CharSink for Counter {
    #[inline]
    fn push(&mut self, _c: char) {
        self.0 += 1;
    }
}

/// Writes into a slice already known to be large enough.
struct SliceSink<'a> {
    dest: &'a mut [char],
    len: usize,
}

impl CharSink for SliceSink<'_> {
    #[inline]
    fn push(&mut self, c: char) {
        if let Some(slot) = self.dest.get_mut(self.len) {
            *slot = c;
        }
        self.len += 1;
    }
}

/// Run `write` into a counter, then into `dest` if it fits.
fn write_bounded(dest: &mut [char], mut write: impl FnMut(&mut dyn CharSink)) -> Result<usize> {
    let mut counter = Counter::default();
    write(&mut counter);
    let required = counter.0;
    if required > dest.len() {
        tracing::debug!(required, capacity = dest.len(), "destination too small");
        return Err(BidiError::BufferOverflow { required });
    }
    let mut sink = SliceSink { dest, len: 0 };
    write(&mut sink);
    debug_assert_eq!(sink.len, required);
    Ok(sink.len)
}

impl CharSink for &mut dyn CharSink {
    #[inline]
    fn push(&mut self, c: char) {
        (**self).push(c);
    }
}

// ---------------------------------------------------------------------------
// Run writers
// ---------------------------------------------------------------------------

fn write_forward(src: &[char], options: WriteOptions, table: &PropsTable, sink: &mut impl CharSink) {
    let mirror = options.contains(WriteOptions::DO_MIRRORING);
    let remove = options.contains(WriteOptions::REMOVE_BIDI_CONTROLS);
    for &c in src {
        if remove && is_bidi_control(c) {
            continue;
        }
        sink.push(if mirror { table.mirror_of(c) } else { c });
    }
}

fn write_reverse_run(
    src: &[char],
    options: WriteOptions,
    table: &PropsTable,
    sink: &mut impl CharSink,
) {
    let keep_combining = options.contains(WriteOptions::KEEP_BASE_COMBINING);
    let mirror = options.contains(WriteOptions::DO_MIRRORING);
    let remove = options.contains(WriteOptions::REMOVE_BIDI_CONTROLS);

    let mut end = src.len();
    while end > 0 {
        let mut start = end - 1;
        if keep_combining {
            while start > 0 && table.is_combining(src[start]) {
                start -= 1;
            }
        }
        let unit = &src[start..end];
        end = start;
        let base = unit[0];
        if remove && is_bidi_control(base) {
            continue;
        }
        sink.push(if mirror { table.mirror_of(base) } else { base });
        for &c in &unit[1..] {
            sink.push(c);
        }
    }
}

/// Reverse `src` as a single RTL run.
pub fn write_reverse(text: &str, options: WriteOptions) -> String {
    let src: Vec<char> = text.chars().collect();
    let table = PropsTable::global();
    let mut out = String::with_capacity(text.len());
    write_reverse_run(&src, options, &table, &mut out);
    out
}

/// Reverse `src` into `dest`, returning the written length.
pub fn write_reverse_into(src: &[char], dest: &mut [char], options: WriteOptions) -> Result<usize> {
    let table = PropsTable::global();
    write_bounded(dest, |mut sink| write_reverse_run(src, options, &table, &mut sink))
}

// ---------------------------------------------------------------------------
// Reordered output
// ---------------------------------------------------------------------------

fn effective_options(view: &LevelView<'_>, mut options: WriteOptions) -> WriteOptions {
    if view.options.insert_marks {
        options.insert(WriteOptions::INSERT_LRM_FOR_NUMERIC);
        options.remove(WriteOptions::REMOVE_BIDI_CONTROLS);
    }
    if view.options.remove_controls {
        options.insert(WriteOptions::REMOVE_BIDI_CONTROLS);
        options.remove(WriteOptions::INSERT_LRM_FOR_NUMERIC);
    }
    if !view.options.inverse && !view.options.insert_marks {
        options.remove(WriteOptions::INSERT_LRM_FOR_NUMERIC);
    }
    options
}

fn write_runs(
    view: &LevelView<'_>,
    runs: &RunList,
    options: WriteOptions,
    table: &PropsTable,
    sink: &mut impl CharSink,
) {
    let text = view.text;
    let classes = view.classes;
    let insert_lrm = options.contains(WriteOptions::INSERT_LRM_FOR_NUMERIC);
    let inverse = view.options.inverse;
    let not_l = |i: usize| classes[i] != BidiClass::L;
    let not_r_al = |i: usize| !props::is_rtl_class(classes[i]);
    let no_mirror = options - WriteOptions::DO_MIRRORING;

    if !options.contains(WriteOptions::OUTPUT_REVERSE) {
        let mut visual_start = 0;
        for run in runs {
            let len = run.visual_limit - visual_start;
            visual_start = run.visual_limit;
            let start = run.logical_start;
            let src = &text[start..start + len];
            let last = start + len - 1;
            if !insert_lrm {
                if run.is_rtl() {
                    write_reverse_run(src, options, table, sink);
                } else {
                    write_forward(src, no_mirror, table, sink);
                }
                continue;
            }

            let mut flags = run.insert_remove.marks;
            if run.is_rtl() {
                if inverse && not_r_al(last) {
                    flags |= MarkFlags::RLM_BEFORE;
                }
                if let Some(mark) = flags.before_mark() {
                    sink.push(mark);
                }
                write_reverse_run(src, options, table, sink);
                if inverse && not_r_al(start) {
                    flags |= MarkFlags::RLM_AFTER;
                }
            } else {
                if inverse && not_l(start) {
                    flags |= MarkFlags::LRM_BEFORE;
                }
                if let Some(mark) = flags.before_mark() {
                    sink.push(mark);
                }
                write_forward(src, no_mirror, table, sink);
                if inverse && not_l(last) {
                    flags |= MarkFlags::LRM_AFTER;
                }
            }
            if let Some(mark) = flags.after_mark() {
                sink.push(mark);
            }
        }
        return;
    }

    for (i, run) in runs.iter().enumerate().rev() {
        let start = run.logical_start;
        let len = runs.run_length(i);
        let src = &text[start..start + len];
        let last = start + len - 1;
        if run.is_rtl() {
            if insert_lrm && not_r_al(start) {
                sink.push(RLM);
            }
            write_forward(src, options, table, sink);
            if insert_lrm && not_r_al(last) {
                sink.push(RLM);
            }
        } else {
            if insert_lrm && not_l(last) {
                sink.push(LRM);
            }
            write_reverse_run(src, no_mirror, table, sink);
            if insert_lrm && not_l(start) {
                sink.push(LRM);
            }
        }
    }
}

pub(crate) fn write_reordered(
    view: &LevelView<'_>,
    runs: &RunList,
    options: WriteOptions,
) -> String {
    let options = effective_options(view, options);
    let table = PropsTable::global();
    let mut out = String::with_capacity(view.len() + runs.mark_count());
    write_runs(view, runs, options, &table, &mut out);
    tracing::debug!(
        text_len = view.len(),
        out_len = out.chars().count(),
        options = ?options,
        "reordered text written"
    );
    out
}

pub(crate) fn write_reordered_into(
    view: &LevelView<'_>,
    runs: &RunList,
    dest: &mut [char],
    options: WriteOptions,
) -> Result<usize> {
    let options = effective_options(view, options);
    let table = PropsTable::global();
    write_bounded(dest, |mut sink| write_runs(view, runs, options, &table, &mut sink))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reverse(s: &str, options: WriteOptions) -> String {
        write_reverse(s, options)
    }

    #[test]
    fn reverse_plain() {
        assert_eq!(reverse("abc", WriteOptions::empty()), "cba");
        assert_eq!(reverse("", WriteOptions::empty()), "");
    }

    #[test]
    fn reverse_keeps_combining_marks_after_base() {
        // a + acute, b
        let out = reverse("a\u{0301}b", WriteOptions::KEEP_BASE_COMBINING);
        assert_eq!(out, "ba\u{0301}");
        let out = reverse("a\u{0301}b", WriteOptions::empty());
        assert_eq!(out, "b\u{0301}a");
    }

    #[test]
    fn reverse_mirrors_only_base() {
        let out = reverse(
            "(\u{0301}x",
            WriteOptions::KEEP_BASE_COMBINING | WriteOptions::DO_MIRRORING,
        );
        assert_eq!(out, "x)\u{0301}");
    }

    #[test]
    fn reverse_removes_controls() {
        let out = reverse("a\u{200F}b", WriteOptions::REMOVE_BIDI_CONTROLS);
        assert_eq!(out, "ba");
    }

    #[test]
    fn reverse_leading_marks_stay_with_run_start() {
        let out = reverse("\u{0301}ab", WriteOptions::KEEP_BASE_COMBINING);
        assert_eq!(out, "ba\u{0301}");
    }

    #[test]
    fn reverse_into_reports_required_length() {
        let src: Vec<char> = "abcd".chars().collect();
        let mut small = ['-'; 2];
        let err = write_reverse_into(&src, &mut small, WriteOptions::empty()).unwrap_err();
        assert_eq!(err, BidiError::BufferOverflow { required: 4 });
        assert_eq!(small, ['-', '-']);
        let mut big = ['-'; 6];
        let n = write_reverse_into(&src, &mut big, WriteOptions::empty()).unwrap();
        assert_eq!(n, 4);
        assert_eq!(&big[..4], &['d', 'c', 'b', 'a']);
    }
}
