#![forbid(unsafe_code)]

//! Arabic shaping entry points.
//!
//! # Pipeline
//!
//! ```text
//! input (logical or visual-LTR)
//!     │
//!     ▼
//! aggregate tashkeel (optional)
//!     │
//!     ▼
//! invert core between edge spaces (logical input only)
//!     │
//!     ▼
//! ┌────────────────────────┐
//! │ shape    │ deshape      │  letters::*
//! │ + spaces │ + expansion  │  spaces::*
//! └────────────────────────┘
//!     │
//!     ▼
//! invert back (logical input only)
//!     │
//!     ▼
//! digit substitution
//! ```
//!
//! Every call works on a private copy of the input; the caller's text is
//! never mutated, and [`ArabicShaper::shape_into`] touches its destination
//! only after the full result is known to fit.

use fbidi_core::{BidiError, Result};
use tracing::debug;

use crate::digits;
use crate::letters::{self, TashkeelRule};
use crate::options::{LetterMode, ShapeOptions, TashkeelMode, TextDirection};
use crate::spaces::{self, NearTargets};

/// A validated shaping configuration.
///
/// ```
/// use fbidi_shape::{ArabicShaper, ShapeOptions};
///
/// let shaper = ArabicShaper::new(ShapeOptions::default()).unwrap();
/// assert_eq!(shaper.shape_str("\u{0644}\u{0627}").unwrap(), "\u{FEFB}");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArabicShaper {
    options: ShapeOptions,
}

impl ArabicShaper {
    /// Validate `options` and build a shaper.
    pub fn new(options: ShapeOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Build from an ICU-style option word.
    pub fn from_bits(word: u32) -> Result<Self> {
        Ok(Self {
            options: ShapeOptions::from_bits(word)?,
        })
    }

    #[inline]
    pub fn options(&self) -> &ShapeOptions {
        &self.options
    }

    /// Shape `text`, returning the new sequence.
    ///
    /// Space shortage is handled differently per direction. When shaping,
    /// a two-cell Seen or Yeh-Hamza with no space beside it stays a single
    /// cell and the miss is logged at debug level. When unshaping, a
    /// Lam-Alef that cannot find a space under the selected policy fails
    /// the call with [`BidiError::NoSpaceAvailable`].
    pub fn shape_chars(&self, text: &[char]) -> Result<Vec<char>> {
        let opts = &self.options;
        debug!(
            len = text.len(),
            letters = ?opts.letters,
            lam_alef = ?opts.lam_alef,
            tashkeel = ?opts.tashkeel,
            digits = ?opts.digits,
            direction = ?opts.direction,
            "shaping arabic text"
        );

        let mut buf = Vec::new();
        buf.try_reserve(text.len())?;
        buf.extend_from_slice(text);

        if opts.letters != LetterMode::Noop {
            if opts.aggregate_tashkeel {
                letters::aggregate_tashkeel(&mut buf, opts.direction);
            }
            let logical = opts.direction == TextDirection::Logical;
            if logical {
                spaces::invert_core(&mut buf);
            }
            match opts.letters {
                LetterMode::Shape => {
                    let removing = matches!(
                        opts.tashkeel,
                        TashkeelMode::Begin | TashkeelMode::End | TashkeelMode::Resize
                    );
                    let rule = if removing {
                        TashkeelRule::Remove
                    } else {
                        TashkeelRule::Contextual
                    };
                    self.shape_letters(&mut buf, rule);
                    if opts.tashkeel == TashkeelMode::ReplaceByTatweel {
                        letters::replace_tashkeel_with_tatweel(&mut buf);
                    }
                }
                LetterMode::ShapeTashkeelIsolated => self.shape_letters(&mut buf, TashkeelRule::Isolated),
                LetterMode::Unshape => self.deshape_letters(&mut buf)?,
                LetterMode::Noop => {}
            }
            if logical {
                spaces::invert_core(&mut buf);
            }
        }

        digits::shape_digits(&mut buf, opts.digits, opts.digit_type, opts.direction);
        Ok(buf)
    }

    /// Shape a string.
    pub fn shape_str(&self, text: &str) -> Result<String> {
        let chars: Vec<char> = text.chars().collect();
        Ok(self.shape_chars(&chars)?.into_iter().collect())
    }

    /// Shape `text` into `dest`, returning the number of characters written.
    ///
    /// When `dest` is too short the call fails with
    /// [`BidiError::BufferOverflow`] carrying the full length, and `dest` is
    /// left untouched.
    pub fn shape_into(&self, text: &[char], dest: &mut [char]) -> Result<usize> {
        let shaped = self.shape_chars(text)?;
        if shaped.len() > dest.len() {
            return Err(BidiError::BufferOverflow {
                required: shaped.len(),
            });
        }
        dest[..shaped.len()].copy_from_slice(&shaped);
        Ok(shaped.len())
    }

    fn shape_letters(&self, buf: &mut Vec<char>, rule: TashkeelRule) {
        let opts = &self.options;
        if !opts.preserve_presentation {
            letters::normalize_presentation(buf);
        }
        let found = letters::shape_letters(buf, rule);
        if found.lam_alef || found.tashkeel {
            spaces::place_generated_spaces(buf, opts);
        }
        let targets = NearTargets {
            seen: opts.seen_two_cell,
            yeh_hamza: opts.yeh_hamza_two_cell,
            lam_alef: false,
        };
        if (found.seen || found.yeh_hamza) && (targets.seen || targets.yeh_hamza) {
            let misses = spaces::expand_near(buf, targets, opts.tail);
            if misses > 0 {
                debug!(misses, "two-cell letters left without a neighboring space");
            }
        }
    }

    fn deshape_letters(&self, buf: &mut Vec<char>) -> Result<()> {
        let opts = &self.options;
        let lam_alef = letters::deshape_letters(buf, opts.yeh_hamza_two_cell, opts.seen_two_cell);
        if lam_alef {
            spaces::expand_lam_alefs(buf, opts)?;
        }
        Ok(())
    }
}

/// Shape `text` with `options`.
pub fn shape(text: &str, options: ShapeOptions) -> Result<String> {
    ArabicShaper::new(options)?.shape_str(text)
}

/// Map presentation forms in `text` back to base letters, expanding
/// LamAlef ligatures with the Lam-Alef policy in `options`. The letter mode
/// in `options` is ignored.
pub fn unshape(text: &str, options: ShapeOptions) -> Result<String> {
    ArabicShaper::new(options.with_letters(LetterMode::Unshape))?.shape_str(text)
}
