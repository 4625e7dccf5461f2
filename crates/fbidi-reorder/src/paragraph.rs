#![forbid(unsafe_code)]

//! Paragraph and line objects.
//!
//! A [`Paragraph`] owns the text, the finalized embedding levels from an
//! upstream resolver, and the per-character directional classes. A
//! [`Line`] is a borrowed window into one paragraph; it recomputes
//! direction and trailing whitespace for its own range but never copies
//! the level array. Both compute their run list on first use and cache it.
//!
//! # Example
//!
//! ```
//! use fbidi_reorder::{Paragraph, Reordering};
//!
//! // "ab CDE fg" with CDE at level 1.
//! let para = Paragraph::new("ab \u{05D0}\u{05D1}\u{05D2} fg", &[0, 0, 0, 1, 1, 1, 0, 0, 0], 0).unwrap();
//! assert_eq!(para.count_runs().unwrap(), 3);
//! assert_eq!(para.logical_to_visual(3).unwrap(), Some(5));
//!
//! let line = para.line(3, 6).unwrap();
//! assert_eq!(line.visual_to_logical(0).unwrap(), Some(2));
//! ```

use std::cell::OnceCell;

use fbidi_core::props::{self, BidiClass};
use fbidi_core::{BidiError, Result};

use crate::model::{self, Direction, Level, LevelView};
use crate::run::{InsertPoint, MarkFlags, RunList};
use crate::Reordering;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Reordering behaviour fixed when the paragraph is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReorderOptions {
    /// Honor insert points and emit LRM/RLM marks when writing.
    pub insert_marks: bool,
    /// Drop bidi controls from mapped indexes and written output.
    pub remove_controls: bool,
    /// The text is visual and the output is logical (inverse bidi).
    pub inverse: bool,
}

impl ReorderOptions {
    #[must_use]
    pub const fn with_insert_marks(mut self, on: bool) -> Self {
        self.insert_marks = on;
        self
    }

    #[must_use]
    pub const fn with_remove_controls(mut self, on: bool) -> Self {
        self.remove_controls = on;
        self
    }

    #[must_use]
    pub const fn with_inverse(mut self, on: bool) -> Self {
        self.inverse = on;
        self
    }
}

/// End of one paragraph inside a multi-paragraph text, with its base level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParagraphSpan {
    pub limit: usize,
    pub level: Level,
}

// ---------------------------------------------------------------------------
// Paragraph
// ---------------------------------------------------------------------------

/// Text with finalized embedding levels.
#[derive(Debug, Clone)]
pub struct Paragraph {
    text: Vec<char>,
    classes: Vec<BidiClass>,
    levels: Vec<Level>,
    spans: Vec<ParagraphSpan>,
    base_level: Level,
    para_level: Level,
    direction: Direction,
    trailing_ws_start: usize,
    trailing_level: Level,
    options: ReorderOptions,
    insert_points: Vec<InsertPoint>,
    control_count: usize,
    runs: OnceCell<RunList>,
}

impl Paragraph {
    /// Build from text, one level per code point, and the base level.
    pub fn new(text: &str, levels: &[u8], para_level: u8) -> Result<Self> {
        Self::from_chars(text.chars().collect(), levels, para_level)
    }

    /// Like [`Paragraph::new`] for text already split into code points.
    pub fn from_chars(text: Vec<char>, levels: &[u8], para_level: u8) -> Result<Self> {
        if levels.len() != text.len() {
            return Err(BidiError::illegal(format!(
                "{} levels for {} code points",
                levels.len(),
                text.len()
            )));
        }
        let base_level = Level::new(para_level)?;
        if para_level > Level::MAX_EXPLICIT {
            return Err(BidiError::illegal(format!(
                "paragraph level {para_level} exceeds {}",
                Level::MAX_EXPLICIT
            )));
        }
        let levels = model::levels_from_bytes(levels)?;
        let classes = text.iter().map(|&c| props::class_of(c)).collect();
        let mut para = Self {
            text,
            classes,
            levels,
            spans: Vec::new(),
            base_level,
            para_level: base_level,
            direction: Direction::Ltr,
            trailing_ws_start: 0,
            trailing_level: base_level,
            options: ReorderOptions::default(),
            insert_points: Vec::new(),
            control_count: 0,
            runs: OnceCell::new(),
        };
        para.refresh()?;
        Ok(para)
    }

    /// Replace the directional classes derived from the text.
    pub fn with_classes(mut self, classes: Vec<BidiClass>) -> Result<Self> {
        if classes.len() != self.text.len() {
            return Err(BidiError::illegal(format!(
                "{} classes for {} code points",
                classes.len(),
                self.text.len()
            )));
        }
        self.classes = classes;
        self.refresh()?;
        Ok(self)
    }

    /// Declare paragraph boundaries. The last span must end at the text
    /// length and limits must increase.
    pub fn with_paragraphs(mut self, spans: Vec<ParagraphSpan>) -> Result<Self> {
        let mut prev = 0;
        for span in &spans {
            if span.limit <= prev || span.limit > self.text.len() {
                return Err(BidiError::illegal(format!(
                    "paragraph limit {} out of order",
                    span.limit
                )));
            }
            prev = span.limit;
        }
        if !spans.is_empty() && prev != self.text.len() {
            return Err(BidiError::illegal("paragraph spans do not cover the text"));
        }
        self.spans = spans;
        self.refresh()?;
        Ok(self)
    }

    #[must_use = "options take effect on the returned paragraph"]
    pub fn with_options(mut self, options: ReorderOptions) -> Self {
        self.options = options;
        self.control_count = count_controls(&self.text, options);
        self.runs = OnceCell::new();
        self
    }

    /// Request a mark next to the character at `pos`.
    pub fn add_insert_point(&mut self, pos: usize, flag: MarkFlags) -> Result<()> {
        if pos >= self.text.len() {
            return Err(BidiError::illegal(format!(
                "insert point {pos} out of range 0..{}",
                self.text.len()
            )));
        }
        self.insert_points.push(InsertPoint::new(pos, flag));
        self.runs = OnceCell::new();
        Ok(())
    }

    pub fn insert_points(&self) -> &[InsertPoint] {
        &self.insert_points
    }

    /// Base level of the paragraph containing `index`.
    pub fn para_level_at(&self, index: usize) -> Level {
        if self.direction != Direction::Mixed || self.spans.len() < 2 {
            return self.para_level;
        }
        let i = self.spans.partition_point(|s| s.limit <= index);
        self.spans.get(i).map_or(self.para_level, |s| s.level)
    }

    fn span_index(&self, index: usize) -> usize {
        self.spans.partition_point(|s| s.limit <= index)
    }

    /// Base level as supplied, before parity adjustment.
    pub fn base_level(&self) -> Level {
        self.base_level
    }

    fn refresh(&mut self) -> Result<()> {
        for (i, (&level, &class)) in self.levels.iter().zip(&self.classes).enumerate() {
            let floor = self.span_level(i);
            if level < floor && !(level == Level::LTR && class == BidiClass::B) {
                return Err(BidiError::illegal(format!(
                    "level {} at {i} below paragraph level {}",
                    level.number(),
                    floor.number()
                )));
            }
        }
        // Trailing whitespace belongs to the last paragraph.
        let tail_level = match self.levels.len() {
            0 => self.base_level,
            len => self.span_level(len - 1),
        };
        let (direction, trailing_level, trailing) =
            model::resolve_layout(&self.classes, &self.levels, tail_level);
        self.direction = direction;
        self.para_level = match direction {
            Direction::Ltr => self.base_level.to_even(),
            Direction::Rtl => self.base_level.to_odd(),
            Direction::Mixed => self.base_level,
        };
        self.trailing_level = trailing_level;
        self.trailing_ws_start = trailing;
        self.control_count = count_controls(&self.text, self.options);
        self.runs = OnceCell::new();
        Ok(())
    }

    fn span_level(&self, index: usize) -> Level {
        self.spans
            .get(self.span_index(index))
            .map_or(self.base_level, |s| s.level)
    }

    /// A line over `start..limit`, which must lie within one paragraph.
    pub fn line(&self, start: usize, limit: usize) -> Result<Line<'_>> {
        if start >= limit || limit > self.text.len() {
            return Err(BidiError::illegal(format!(
                "line range {start}..{limit} invalid for length {}",
                self.text.len()
            )));
        }
        if !self.spans.is_empty() && self.span_index(start) != self.span_index(limit - 1) {
            return Err(BidiError::illegal(format!(
                "line {start}..{limit} crosses a paragraph boundary"
            )));
        }

        let text = &self.text[start..limit];
        let classes = &self.classes[start..limit];
        let levels = &self.levels[start..limit];
        let (direction, para_level, trailing_ws_start) =
            model::resolve_layout(classes, levels, self.span_level(start));
        let control_count = count_controls(text, self.options);
        tracing::debug!(
            start,
            limit,
            direction = ?direction,
            trailing_ws_start,
            "line created"
        );
        Ok(Line {
            parent: self,
            start,
            text,
            classes,
            levels,
            para_level,
            direction,
            trailing_ws_start,
            control_count,
            runs: OnceCell::new(),
        })
    }
}

fn count_controls(text: &[char], options: ReorderOptions) -> usize {
    if !options.remove_controls {
        return 0;
    }
    text.iter().filter(|&&c| props::is_bidi_control(c)).count()
}

impl Reordering for Paragraph {
    fn view(&self) -> LevelView<'_> {
        LevelView {
            text: &self.text,
            classes: &self.classes,
            levels: &self.levels,
            para_level: self.para_level,
            direction: self.direction,
            trailing_ws_start: self.trailing_ws_start,
            trailing_level: self.trailing_level,
            insert_points: if self.options.insert_marks || self.options.inverse {
                &self.insert_points
            } else {
                &[]
            },
            control_count: self.control_count,
            options: self.options,
        }
    }

    fn run_cache(&self) -> &OnceCell<RunList> {
        &self.runs
    }
}

// ---------------------------------------------------------------------------
// Line
// ---------------------------------------------------------------------------

/// A range of one paragraph, indexed from its own start.
#[derive(Debug, Clone)]
pub struct Line<'p> {
    parent: &'p Paragraph,
    start: usize,
    text: &'p [char],
    classes: &'p [BidiClass],
    levels: &'p [Level],
    para_level: Level,
    direction: Direction,
    trailing_ws_start: usize,
    control_count: usize,
    runs: OnceCell<RunList>,
}

impl<'p> Line<'p> {
    pub fn parent(&self) -> &'p Paragraph {
        self.parent
    }

    /// Offset of the line within its paragraph.
    pub fn start(&self) -> usize {
        self.start
    }
}

impl Reordering for Line<'_> {
    fn view(&self) -> LevelView<'_> {
        LevelView {
            text: self.text,
            classes: self.classes,
            levels: self.levels,
            para_level: self.para_level,
            direction: self.direction,
            trailing_ws_start: self.trailing_ws_start,
            trailing_level: self.para_level,
            insert_points: &[],
            control_count: self.control_count,
            options: self.parent.options,
        }
    }

    fn run_cache(&self) -> &OnceCell<RunList> {
        &self.runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn rejects_length_mismatch() {
        let err = Paragraph::new("abc", &[0, 0], 0).unwrap_err();
        assert!(matches!(err, BidiError::IllegalArgument(_)));
    }

    #[test]
    fn rejects_levels_below_base() {
        let err = Paragraph::new("ab", &[1, 0], 1).unwrap_err();
        assert!(matches!(err, BidiError::IllegalArgument(_)));
    }

    #[test]
    fn paragraph_separator_may_sit_at_level_zero() {
        assert!(Paragraph::new("a\u{2029}", &[1, 0], 1).is_ok());
    }

    #[test]
    fn rejects_explicit_level_overflow() {
        assert!(Paragraph::new("a", &[127], 0).is_err());
        assert!(Paragraph::new("a", &[126], 126).is_err());
    }

    #[test]
    fn line_range_validation() {
        let para = Paragraph::new("abcd", &[0; 4], 0).unwrap();
        assert!(para.line(2, 2).is_err());
        assert!(para.line(0, 5).is_err());
        assert!(para.line(1, 3).is_ok());
    }

    #[test]
    fn line_may_not_cross_paragraphs() {
        let para = Paragraph::new("ab\u{2029}cd", &[0; 5], 0)
            .unwrap()
            .with_paragraphs(vec![
                ParagraphSpan { limit: 3, level: Level::LTR },
                ParagraphSpan { limit: 5, level: Level::LTR },
            ])
            .unwrap();
        assert!(para.line(0, 3).is_ok());
        assert!(para.line(3, 5).is_ok());
        assert!(matches!(para.line(1, 4), Err(BidiError::IllegalArgument(_))));
    }

    #[test]
    fn paragraph_spans_must_cover_text() {
        let para = Paragraph::new("abcd", &[0; 4], 0).unwrap();
        let err = para
            .with_paragraphs(vec![ParagraphSpan { limit: 2, level: Level::LTR }])
            .unwrap_err();
        assert!(matches!(err, BidiError::IllegalArgument(_)));
    }

    #[test]
    fn line_recomputes_direction() {
        // "ab CD" with CD at level 1; the line over "CD" is uniformly RTL.
        let para = Paragraph::new("ab \u{05D0}\u{05D1}", &[0, 0, 0, 1, 1], 0).unwrap();
        assert_eq!(para.direction(), Direction::Mixed);
        let line = para.line(3, 5).unwrap();
        assert_eq!(line.direction(), Direction::Rtl);
        assert_eq!(line.para_level(), Level::RTL);
        assert_eq!(line.start(), 3);
    }

    #[test]
    fn insert_point_out_of_range() {
        let mut para = Paragraph::new("ab", &[0, 0], 0).unwrap();
        assert!(para.add_insert_point(2, MarkFlags::LRM_AFTER).is_err());
        assert!(para.add_insert_point(1, MarkFlags::LRM_AFTER).is_ok());
        assert_eq!(para.insert_points().len(), 1);
    }

    #[test]
    fn control_count_follows_options() {
        let para = Paragraph::new("a\u{200E}b", &[0, 0, 0], 0).unwrap();
        assert_eq!(para.result_length().unwrap(), 3);
        let para = para.with_options(ReorderOptions::default().with_remove_controls(true));
        assert_eq!(para.result_length().unwrap(), 2);
    }

    #[test]
    fn para_level_at_uses_spans() {
        let para = Paragraph::new("a\u{2029}\u{05D0}", &[0, 0, 1], 0)
            .unwrap()
            .with_paragraphs(vec![
                ParagraphSpan { limit: 2, level: Level::LTR },
                ParagraphSpan { limit: 3, level: Level::RTL },
            ])
            .unwrap();
        assert_eq!(para.para_level_at(0), Level::LTR);
        assert_eq!(para.para_level_at(2), Level::RTL);
    }

    #[test]
    fn trailing_whitespace_takes_last_paragraph_level() {
        // "ab", separator, then "c" and two spaces in an RTL paragraph.
        let para = Paragraph::new("ab\u{2029}c  ", &[0, 0, 0, 1, 1, 1], 0)
            .unwrap()
            .with_paragraphs(vec![
                ParagraphSpan { limit: 3, level: Level::LTR },
                ParagraphSpan { limit: 6, level: Level::RTL },
            ])
            .unwrap();
        assert_eq!(para.para_level(), Level::LTR);
        for i in 0..6 {
            assert_eq!(para.level_at(i).unwrap(), para.para_level_at(i), "index {i}");
        }
        assert_eq!(para.logical_to_visual(3).unwrap(), Some(5));

        let line = para.line(3, 6).unwrap();
        assert_eq!(
            line.write_reordered(crate::WriteOptions::empty()).unwrap(),
            "  c"
        );
        assert_eq!(
            para.write_reordered(crate::WriteOptions::empty()).unwrap(),
            "ab\u{2029}  c"
        );
    }

    #[test]
    #[traced_test]
    fn line_creation_is_logged() {
        let para = Paragraph::new("ab \u{05D0}", &[0, 0, 0, 1], 0).unwrap();
        let line = para.line(0, 3).unwrap();
        assert_eq!(line.count_runs().unwrap(), 1);
        assert!(logs_contain("line created"));
        assert!(logs_contain("runs computed"));
    }
}
