#![forbid(unsafe_code)]

//! Typed shaping options.
//!
//! Each independent choice is its own enum; [`ShapeOptions::validate`]
//! rejects the combinations the engine cannot honor before any text is
//! touched. [`ShapeOptions::from_bits`] and [`ShapeOptions::to_bits`]
//! convert to and from the packed `u32` layout used by ICU's
//! `u_shapeArabic`, so option words from other systems carry over
//! unchanged.
//!
//! # Example
//!
//! ```
//! use fbidi_shape::{DigitMode, LamAlefMode, ShapeOptions};
//!
//! let opts = ShapeOptions::default()
//!     .with_lam_alef(LamAlefMode::Auto)
//!     .with_digits(DigitMode::EnToAn);
//! assert!(opts.validate().is_ok());
//! assert_eq!(ShapeOptions::from_bits(opts.to_bits()).unwrap(), opts);
//! ```

use fbidi_core::{BidiError, Result};

// ---------------------------------------------------------------------------
// Packed layout
// ---------------------------------------------------------------------------

mod bits {
    pub const LAMALEF_MASK: u32 = 0x1_0003;
    pub const LAMALEF_RESIZE: u32 = 0;
    pub const LAMALEF_NEAR: u32 = 1;
    pub const LAMALEF_END: u32 = 2;
    pub const LAMALEF_BEGIN: u32 = 3;
    pub const LAMALEF_AUTO: u32 = 0x1_0000;

    pub const DIRECTION_MASK: u32 = 4;
    pub const DIRECTION_VISUAL_LTR: u32 = 4;

    pub const LETTERS_MASK: u32 = 0x18;
    pub const LETTERS_SHAPE: u32 = 8;
    pub const LETTERS_UNSHAPE: u32 = 0x10;
    pub const LETTERS_SHAPE_TASHKEEL_ISOLATED: u32 = 0x18;

    pub const DIGITS_MASK: u32 = 0xE0;
    pub const DIGITS_EN2AN: u32 = 0x20;
    pub const DIGITS_AN2EN: u32 = 0x40;
    pub const DIGITS_ALEN2AN_INIT_LR: u32 = 0x60;
    pub const DIGITS_ALEN2AN_INIT_AL: u32 = 0x80;

    pub const DIGIT_TYPE_MASK: u32 = 0x300;
    pub const DIGIT_TYPE_AN_EXTENDED: u32 = 0x100;

    pub const AGGREGATE_TASHKEEL: u32 = 0x4000;
    pub const PRESERVE_PRESENTATION: u32 = 0x8000;

    pub const TASHKEEL_MASK: u32 = 0xE_0000;
    pub const TASHKEEL_BEGIN: u32 = 0x4_0000;
    pub const TASHKEEL_END: u32 = 0x6_0000;
    pub const TASHKEEL_RESIZE: u32 = 0x8_0000;
    pub const TASHKEEL_REPLACE_BY_TATWEEL: u32 = 0xC_0000;

    pub const SEEN_MASK: u32 = 0x70_0000;
    pub const SEEN_TWOCELL_NEAR: u32 = 0x20_0000;

    pub const YEHHAMZA_MASK: u32 = 0x380_0000;
    pub const YEHHAMZA_TWOCELL_NEAR: u32 = 0x100_0000;

    pub const SPACES_RELATIVE_TO_TEXT: u32 = 0x400_0000;

    pub const TAIL_TYPE_MASK: u32 = 0x1800_0000;
    pub const TAIL_NEW_UNICODE: u32 = 0x800_0000;

    pub const KNOWN: u32 = LAMALEF_MASK
        | DIRECTION_MASK
        | LETTERS_MASK
        | DIGITS_MASK
        | DIGIT_TYPE_MASK
        | AGGREGATE_TASHKEEL
        | PRESERVE_PRESENTATION
        | TASHKEEL_MASK
        | SEEN_MASK
        | YEHHAMZA_MASK
        | SPACES_RELATIVE_TO_TEXT
        | TAIL_TYPE_MASK;
}

// ---------------------------------------------------------------------------
// Option enums
// ---------------------------------------------------------------------------

/// What happens to Arabic letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LetterMode {
    /// Leave letters alone; only digits are processed.
    Noop,
    /// Select joining forms and form Lam-Alef ligatures.
    #[default]
    Shape,
    /// Like `Shape`, but tashkeel marks always take their isolated forms.
    ShapeTashkeelIsolated,
    /// Map presentation forms back to base letters.
    Unshape,
}

/// Where the cell freed or needed by a Lam-Alef ligature goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LamAlefMode {
    /// Shrink or grow the text.
    #[default]
    Resize,
    /// Use the space right next to the ligature.
    Near,
    /// Use a space at the end of the buffer.
    End,
    /// Use a space at the beginning of the buffer.
    Begin,
    /// Try end, then beginning, then near.
    Auto,
}

/// Where the cell freed by a removed tashkeel mark goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TashkeelMode {
    /// Keep tashkeel as shaped marks.
    #[default]
    Keep,
    Begin,
    End,
    Resize,
    /// Marks on a tatweel become tatweel; isolated marks become spaces.
    ReplaceByTatweel,
}

/// Digit substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DigitMode {
    #[default]
    Noop,
    /// European digits to Arabic-Indic.
    EnToAn,
    /// Arabic-Indic digits to European.
    AnToEn,
    /// European digits after Arabic letters, starting with an LTR context.
    AlEnToAnInitLr,
    /// European digits after Arabic letters, starting with an Arabic context.
    AlEnToAnInitAl,
}

/// Which Arabic-Indic digit block to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DigitType {
    /// `U+0660..U+0669`.
    #[default]
    ArabicIndic,
    /// `U+06F0..U+06F9`, used for Persian and Urdu.
    EasternArabicIndic,
}

impl DigitType {
    /// Code point of the zero digit.
    #[inline]
    pub const fn zero(self) -> u32 {
        match self {
            Self::ArabicIndic => 0x0660,
            Self::EasternArabicIndic => 0x06F0,
        }
    }
}

/// Order of the text handed to the shaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextDirection {
    #[default]
    Logical,
    VisualLtr,
}

/// Character written for the tail of a two-cell Seen-family letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TailType {
    /// `U+200B`, as legacy code pages map it.
    #[default]
    ZeroWidthSpace,
    /// `U+FE73 ARABIC TAIL FRAGMENT`.
    TailFragment,
}

impl TailType {
    #[inline]
    pub const fn tail_char(self) -> char {
        match self {
            Self::ZeroWidthSpace => '\u{200B}',
            Self::TailFragment => '\u{FE73}',
        }
    }
}

// ---------------------------------------------------------------------------
// ShapeOptions
// ---------------------------------------------------------------------------

/// Complete option set for one shaping call.
///
/// The default shapes letters of logical text, resizing around Lam-Alef
/// ligatures, and leaves digits alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeOptions {
    pub letters: LetterMode,
    pub lam_alef: LamAlefMode,
    pub tashkeel: TashkeelMode,
    pub digits: DigitMode,
    pub digit_type: DigitType,
    pub direction: TextDirection,
    /// Fold Shadda + vowel pairs into one ligature before shaping.
    pub aggregate_tashkeel: bool,
    /// Keep presentation forms already present in the input.
    pub preserve_presentation: bool,
    /// Spread final Seen-family letters over two cells using a following
    /// space.
    pub seen_two_cell: bool,
    /// Split final Yeh-Hamza into Yeh and Hamza using a following space.
    pub yeh_hamza_two_cell: bool,
    /// For visual text, Begin and End refer to the text rather than the
    /// buffer, which swaps them.
    pub spaces_relative_to_text: bool,
    pub tail: TailType,
}

impl ShapeOptions {
    #[must_use]
    pub const fn with_letters(mut self, letters: LetterMode) -> Self {
        self.letters = letters;
        self
    }

    #[must_use]
    pub const fn with_lam_alef(mut self, mode: LamAlefMode) -> Self {
        self.lam_alef = mode;
        self
    }

    #[must_use]
    pub const fn with_tashkeel(mut self, mode: TashkeelMode) -> Self {
        self.tashkeel = mode;
        self
    }

    #[must_use]
    pub const fn with_digits(mut self, digits: DigitMode) -> Self {
        self.digits = digits;
        self
    }

    #[must_use]
    pub const fn with_digit_type(mut self, digit_type: DigitType) -> Self {
        self.digit_type = digit_type;
        self
    }

    #[must_use]
    pub const fn with_direction(mut self, direction: TextDirection) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub const fn with_aggregate_tashkeel(mut self, on: bool) -> Self {
        self.aggregate_tashkeel = on;
        self
    }

    #[must_use]
    pub const fn with_preserve_presentation(mut self, on: bool) -> Self {
        self.preserve_presentation = on;
        self
    }

    #[must_use]
    pub const fn with_seen_two_cell(mut self, on: bool) -> Self {
        self.seen_two_cell = on;
        self
    }

    #[must_use]
    pub const fn with_yeh_hamza_two_cell(mut self, on: bool) -> Self {
        self.yeh_hamza_two_cell = on;
        self
    }

    #[must_use]
    pub const fn with_spaces_relative_to_text(mut self, on: bool) -> Self {
        self.spaces_relative_to_text = on;
        self
    }

    #[must_use]
    pub const fn with_tail(mut self, tail: TailType) -> Self {
        self.tail = tail;
        self
    }

    /// True when Begin and End placement are swapped.
    #[inline]
    pub(crate) const fn spaces_swapped(&self) -> bool {
        matches!(self.direction, TextDirection::VisualLtr) && self.spaces_relative_to_text
    }

    /// Reject combinations the engine cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.tashkeel != TashkeelMode::Keep {
            match self.letters {
                LetterMode::ShapeTashkeelIsolated => {
                    return Err(BidiError::illegal(
                        "tashkeel placement conflicts with isolated tashkeel shaping",
                    ));
                }
                LetterMode::Unshape => {
                    return Err(BidiError::illegal("tashkeel placement has no meaning when unshaping"));
                }
                LetterMode::Noop | LetterMode::Shape => {}
            }
        }
        if self.aggregate_tashkeel {
            if self.lam_alef != LamAlefMode::Resize {
                return Err(BidiError::illegal("tashkeel aggregation requires Lam-Alef resize"));
            }
            if self.letters != LetterMode::ShapeTashkeelIsolated {
                return Err(BidiError::illegal(
                    "tashkeel aggregation requires isolated tashkeel shaping",
                ));
            }
        }
        Ok(())
    }

    /// Decode an ICU-style option word, rejecting reserved values and
    /// invalid combinations.
    pub fn from_bits(word: u32) -> Result<Self> {
        use bits::*;

        let unknown = word & !KNOWN;
        if unknown != 0 {
            return Err(BidiError::illegal(format!("unknown option bits {unknown:#x}")));
        }

        let lam_alef = match word & LAMALEF_MASK {
            LAMALEF_RESIZE => LamAlefMode::Resize,
            LAMALEF_NEAR => LamAlefMode::Near,
            LAMALEF_END => LamAlefMode::End,
            LAMALEF_BEGIN => LamAlefMode::Begin,
            LAMALEF_AUTO => LamAlefMode::Auto,
            other => return Err(reserved("Lam-Alef", other)),
        };
        let letters = match word & LETTERS_MASK {
            LETTERS_SHAPE => LetterMode::Shape,
            LETTERS_UNSHAPE => LetterMode::Unshape,
            LETTERS_SHAPE_TASHKEEL_ISOLATED => LetterMode::ShapeTashkeelIsolated,
            _ => LetterMode::Noop,
        };
        let digits = match word & DIGITS_MASK {
            0 => DigitMode::Noop,
            DIGITS_EN2AN => DigitMode::EnToAn,
            DIGITS_AN2EN => DigitMode::AnToEn,
            DIGITS_ALEN2AN_INIT_LR => DigitMode::AlEnToAnInitLr,
            DIGITS_ALEN2AN_INIT_AL => DigitMode::AlEnToAnInitAl,
            other => return Err(reserved("digit", other)),
        };
        let digit_type = match word & DIGIT_TYPE_MASK {
            0 => DigitType::ArabicIndic,
            DIGIT_TYPE_AN_EXTENDED => DigitType::EasternArabicIndic,
            other => return Err(reserved("digit type", other)),
        };
        let tashkeel = match word & TASHKEEL_MASK {
            0 => TashkeelMode::Keep,
            TASHKEEL_BEGIN => TashkeelMode::Begin,
            TASHKEEL_END => TashkeelMode::End,
            TASHKEEL_RESIZE => TashkeelMode::Resize,
            TASHKEEL_REPLACE_BY_TATWEEL => TashkeelMode::ReplaceByTatweel,
            other => return Err(reserved("tashkeel", other)),
        };
        let seen_two_cell = match word & SEEN_MASK {
            0 => false,
            SEEN_TWOCELL_NEAR => true,
            other => return Err(reserved("Seen", other)),
        };
        let yeh_hamza_two_cell = match word & YEHHAMZA_MASK {
            0 => false,
            YEHHAMZA_TWOCELL_NEAR => true,
            other => return Err(reserved("Yeh-Hamza", other)),
        };
        let tail = match word & TAIL_TYPE_MASK {
            0 => TailType::ZeroWidthSpace,
            TAIL_NEW_UNICODE => TailType::TailFragment,
            other => return Err(reserved("tail type", other)),
        };

        let options = Self {
            letters,
            lam_alef,
            tashkeel,
            digits,
            digit_type,
            direction: if word & DIRECTION_MASK == DIRECTION_VISUAL_LTR {
                TextDirection::VisualLtr
            } else {
                TextDirection::Logical
            },
            aggregate_tashkeel: word & AGGREGATE_TASHKEEL != 0,
            preserve_presentation: word & PRESERVE_PRESENTATION != 0,
            seen_two_cell,
            yeh_hamza_two_cell,
            spaces_relative_to_text: word & SPACES_RELATIVE_TO_TEXT != 0,
            tail,
        };
        options.validate()?;
        Ok(options)
    }

    /// Encode as an ICU-style option word.
    pub const fn to_bits(&self) -> u32 {
        use bits::*;

        let mut word = match self.lam_alef {
            LamAlefMode::Resize => LAMALEF_RESIZE,
            LamAlefMode::Near => LAMALEF_NEAR,
            LamAlefMode::End => LAMALEF_END,
            LamAlefMode::Begin => LAMALEF_BEGIN,
            LamAlefMode::Auto => LAMALEF_AUTO,
        };
        word |= match self.letters {
            LetterMode::Noop => 0,
            LetterMode::Shape => LETTERS_SHAPE,
            LetterMode::ShapeTashkeelIsolated => LETTERS_SHAPE_TASHKEEL_ISOLATED,
            LetterMode::Unshape => LETTERS_UNSHAPE,
        };
        word |= match self.digits {
            DigitMode::Noop => 0,
            DigitMode::EnToAn => DIGITS_EN2AN,
            DigitMode::AnToEn => DIGITS_AN2EN,
            DigitMode::AlEnToAnInitLr => DIGITS_ALEN2AN_INIT_LR,
            DigitMode::AlEnToAnInitAl => DIGITS_ALEN2AN_INIT_AL,
        };
        if let DigitType::EasternArabicIndic = self.digit_type {
            word |= DIGIT_TYPE_AN_EXTENDED;
        }
        word |= match self.tashkeel {
            TashkeelMode::Keep => 0,
            TashkeelMode::Begin => TASHKEEL_BEGIN,
            TashkeelMode::End => TASHKEEL_END,
            TashkeelMode::Resize => TASHKEEL_RESIZE,
            TashkeelMode::ReplaceByTatweel => TASHKEEL_REPLACE_BY_TATWEEL,
        };
        if let TextDirection::VisualLtr = self.direction {
            word |= DIRECTION_VISUAL_LTR;
        }
        if self.aggregate_tashkeel {
            word |= AGGREGATE_TASHKEEL;
        }
        if self.preserve_presentation {
            word |= PRESERVE_PRESENTATION;
        }
        if self.seen_two_cell {
            word |= SEEN_TWOCELL_NEAR;
        }
        if self.yeh_hamza_two_cell {
            word |= YEHHAMZA_TWOCELL_NEAR;
        }
        if self.spaces_relative_to_text {
            word |= SPACES_RELATIVE_TO_TEXT;
        }
        if let TailType::TailFragment = self.tail {
            word |= TAIL_NEW_UNICODE;
        }
        word
    }
}

fn reserved(what: &str, value: u32) -> BidiError {
    BidiError::illegal(format!("reserved {what} option value {value:#x}"))
}
