#![forbid(unsafe_code)]

//! Digit substitution between European and Arabic-Indic digits.

use fbidi_core::BidiClass;
use fbidi_core::props::class_of;

use crate::options::{DigitMode, DigitType, TextDirection};

/// Rewrite digits in place according to `mode`.
///
/// The contextual modes replace a European digit only when the last strong
/// character before it, in reading order, was an Arabic letter (class
/// `AL`). Visual text is read right to left.
pub(crate) fn shape_digits(buf: &mut [char], mode: DigitMode, digit_type: DigitType, direction: TextDirection) {
    let zero = digit_type.zero();
    match mode {
        DigitMode::Noop => {}
        DigitMode::EnToAn => {
            for c in buf.iter_mut() {
                if let Some(d) = c.to_digit(10) {
                    *c = arabic_digit(zero, d, *c);
                }
            }
        }
        DigitMode::AnToEn => {
            for c in buf.iter_mut() {
                let value = (*c as u32).wrapping_sub(zero);
                if value < 10 {
                    *c = arabic_digit(u32::from(b'0'), value, *c);
                }
            }
        }
        DigitMode::AlEnToAnInitLr => contextual(buf, zero, direction, false),
        DigitMode::AlEnToAnInitAl => contextual(buf, zero, direction, true),
    }
}

fn contextual(buf: &mut [char], zero: u32, direction: TextDirection, mut last_strong_al: bool) {
    let mut visit = |c: &mut char| match class_of(*c) {
        BidiClass::L | BidiClass::R => last_strong_al = false,
        BidiClass::AL => last_strong_al = true,
        BidiClass::EN if last_strong_al && c.is_ascii_digit() => {
            let d = *c as u32 - u32::from(b'0');
            *c = arabic_digit(zero, d, *c);
        }
        _ => {}
    };
    match direction {
        TextDirection::Logical => buf.iter_mut().for_each(&mut visit),
        TextDirection::VisualLtr => buf.iter_mut().rev().for_each(&mut visit),
    }
}

#[inline]
fn arabic_digit(zero: u32, value: u32, fallback: char) -> char {
    char::from_u32(zero + value).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(s: &str, mode: DigitMode, ty: DigitType, dir: TextDirection) -> String {
        let mut buf: Vec<char> = s.chars().collect();
        shape_digits(&mut buf, mode, ty, dir);
        buf.into_iter().collect()
    }

    #[test]
    fn european_to_arabic_indic() {
        assert_eq!(
            run("a1 9", DigitMode::EnToAn, DigitType::ArabicIndic, TextDirection::Logical),
            "a\u{0661} \u{0669}"
        );
        assert_eq!(
            run("0", DigitMode::EnToAn, DigitType::EasternArabicIndic, TextDirection::Logical),
            "\u{06F0}"
        );
    }

    #[test]
    fn arabic_indic_to_european() {
        assert_eq!(
            run("\u{0661}\u{0669}\u{06F5}", DigitMode::AnToEn, DigitType::ArabicIndic, TextDirection::Logical),
            "19\u{06F5}"
        );
    }

    #[test]
    fn contextual_follows_last_strong() {
        // Arabic letter, digit, Latin letter, digit.
        let logical = run(
            "\u{0628}1a2",
            DigitMode::AlEnToAnInitLr,
            DigitType::ArabicIndic,
            TextDirection::Logical,
        );
        assert_eq!(logical, "\u{0628}\u{0661}a2");
    }

    #[test]
    fn contextual_initial_state() {
        let lr = run("1", DigitMode::AlEnToAnInitLr, DigitType::ArabicIndic, TextDirection::Logical);
        assert_eq!(lr, "1");
        let al = run("1", DigitMode::AlEnToAnInitAl, DigitType::ArabicIndic, TextDirection::Logical);
        assert_eq!(al, "\u{0661}");
    }

    #[test]
    fn visual_text_is_read_right_to_left() {
        // Visual "2 Beh": the Beh is read first.
        let visual = run(
            "2\u{0628}",
            DigitMode::AlEnToAnInitLr,
            DigitType::ArabicIndic,
            TextDirection::VisualLtr,
        );
        assert_eq!(visual, "\u{0662}\u{0628}");
        let logical = run(
            "2\u{0628}",
            DigitMode::AlEnToAnInitLr,
            DigitType::ArabicIndic,
            TextDirection::Logical,
        );
        assert_eq!(logical, "2\u{0628}");
    }
}
