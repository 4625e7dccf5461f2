#![forbid(unsafe_code)]

//! Arabic contextual shaping for frankenbidi.
//!
//! Selects isolated, initial, medial and final presentation forms for Arabic
//! letters, forms Lam-Alef ligatures, places or removes tashkeel, maps
//! presentation forms back to base letters, and substitutes digits.
//!
//! # Example
//!
//! ```
//! use fbidi_shape::{DigitMode, ShapeOptions, shape, unshape};
//!
//! // Lam + Alef shape to a single ligature and come back intact.
//! let shaped = shape("\u{0644}\u{0627}", ShapeOptions::default()).unwrap();
//! assert_eq!(shaped, "\u{FEFB}");
//! assert_eq!(unshape(&shaped, ShapeOptions::default()).unwrap(), "\u{0644}\u{0627}");
//!
//! let digits = ShapeOptions::default().with_digits(DigitMode::EnToAn);
//! assert_eq!(shape("1", digits).unwrap(), "\u{0661}");
//! ```

mod digits;
mod letters;
mod link;
mod options;
mod shaper;
mod spaces;

pub use link::{LinkInfo, base_of, link_of};
pub use options::{
    DigitMode, DigitType, LamAlefMode, LetterMode, ShapeOptions, TailType, TashkeelMode,
    TextDirection,
};
pub use shaper::{ArabicShaper, shape, unshape};

pub use fbidi_core::{BidiError, Result};
