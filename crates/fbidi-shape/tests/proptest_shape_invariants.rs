//! Property-based invariant tests for Arabic shaping and digit substitution.
//!
//! These tests verify structural invariants that must hold for arbitrary
//! mixes of Arabic letters, Latin letters, digits and spaces:
//!
//! 1. Unshaping a Resize-shaped string restores the input exactly.
//! 2. Resize shrinks the text by exactly one cell per Lam-Alef ligature.
//! 3. Near, Begin and End keep the text length unchanged.
//! 4. Shaped output holds no unshaped joining letter.
//! 5. Tashkeel removal drops every vowel mark except Shadda.
//! 6. European-to-Arabic digits followed by the reverse is the identity.
//! 7. Contextual digits with an Arabic initial state and no strong
//!    characters behave like unconditional substitution.
//! 8. `shape_into` agrees with `shape_chars` and only writes on success.
//! 9. Every valid option set survives an encode/decode of its bit word.
//! 10. Shaping is deterministic.

use fbidi_shape::{
    ArabicShaper, BidiError, DigitMode, DigitType, LamAlefMode, LetterMode, ShapeOptions,
    TailType, TashkeelMode, TextDirection, shape, unshape,
};

use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

/// Letters with presentation forms, including every Alef that ligates
/// with Lam.
const LETTERS: [char; 14] = [
    '\u{0644}', // lam
    '\u{0627}', // alef
    '\u{0623}', // alef with hamza above
    '\u{0625}', // alef with hamza below
    '\u{0622}', // alef with madda
    '\u{0628}', // beh
    '\u{0633}', // seen
    '\u{0645}', // meem
    '\u{064A}', // yeh
    '\u{0648}', // waw
    '\u{0629}', // teh marbuta
    '\u{0639}', // ain
    '\u{062F}', // dal
    '\u{0649}', // alef maksura
];

const TASHKEEL: [char; 8] = [
    '\u{064B}', '\u{064C}', '\u{064D}', '\u{064E}', '\u{064F}', '\u{0650}', '\u{0651}', '\u{0652}',
];

const LAM_ALEF_PLACEHOLDER: char = '\u{FFFF}';
const TASHKEEL_PLACEHOLDER: char = '\u{FFFE}';

fn arb_letter() -> impl Strategy<Value = char> {
    prop::sample::select(LETTERS.to_vec())
}

fn arb_mixed_char() -> impl Strategy<Value = char> {
    prop_oneof![
        6 => arb_letter(),
        2 => Just(' '),
        1 => Just('a'),
        1 => Just('1'),
    ]
}

fn arb_text() -> impl Strategy<Value = Vec<char>> {
    prop::collection::vec(arb_mixed_char(), 0..48)
}

fn arb_voweled_text() -> impl Strategy<Value = Vec<char>> {
    prop::collection::vec(
        prop_oneof![
            5 => arb_letter(),
            3 => prop::sample::select(TASHKEEL.to_vec()),
            1 => Just(' '),
        ],
        0..48,
    )
}

fn arb_digit_text() -> impl Strategy<Value = String> {
    "[0-9a-z ,.]{0,40}"
}

fn arb_digit_type() -> impl Strategy<Value = DigitType> {
    prop_oneof![Just(DigitType::ArabicIndic), Just(DigitType::EasternArabicIndic)]
}

fn arb_options() -> impl Strategy<Value = ShapeOptions> {
    let modes = (
        prop_oneof![
            Just(LetterMode::Noop),
            Just(LetterMode::Shape),
            Just(LetterMode::ShapeTashkeelIsolated),
            Just(LetterMode::Unshape),
        ],
        prop_oneof![
            Just(LamAlefMode::Resize),
            Just(LamAlefMode::Near),
            Just(LamAlefMode::End),
            Just(LamAlefMode::Begin),
            Just(LamAlefMode::Auto),
        ],
        prop_oneof![
            Just(TashkeelMode::Keep),
            Just(TashkeelMode::Begin),
            Just(TashkeelMode::End),
            Just(TashkeelMode::Resize),
            Just(TashkeelMode::ReplaceByTatweel),
        ],
        prop_oneof![
            Just(DigitMode::Noop),
            Just(DigitMode::EnToAn),
            Just(DigitMode::AnToEn),
            Just(DigitMode::AlEnToAnInitLr),
            Just(DigitMode::AlEnToAnInitAl),
        ],
        arb_digit_type(),
        prop_oneof![Just(TextDirection::Logical), Just(TextDirection::VisualLtr)],
        prop_oneof![Just(TailType::ZeroWidthSpace), Just(TailType::TailFragment)],
    );
    let flags = prop::array::uniform5(any::<bool>());
    (modes, flags).prop_map(
        |((letters, lam_alef, tashkeel, digits, digit_type, direction, tail), f)| ShapeOptions {
            letters,
            lam_alef,
            tashkeel,
            digits,
            digit_type,
            direction,
            aggregate_tashkeel: f[0],
            preserve_presentation: f[1],
            seen_two_cell: f[2],
            yeh_hamza_two_cell: f[3],
            spaces_relative_to_text: f[4],
            tail,
        },
    )
}

fn to_string(chars: &[char]) -> String {
    chars.iter().collect()
}

fn is_lam_alef(c: char) -> bool {
    ('\u{FEF5}'..='\u{FEFC}').contains(&c)
}

fn shaper(options: ShapeOptions) -> ArabicShaper {
    ArabicShaper::new(options).unwrap()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Resize round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resize_round_trip_restores_input(text in arb_text()) {
        let input = to_string(&text);
        let shaped = shape(&input, ShapeOptions::default()).unwrap();
        let back = unshape(&shaped, ShapeOptions::default()).unwrap();
        prop_assert_eq!(back, input);
    }

    #[test]
    fn visual_resize_round_trip_restores_input(text in arb_text()) {
        let opts = ShapeOptions::default().with_direction(TextDirection::VisualLtr);
        let input = to_string(&text);
        let shaped = shape(&input, opts).unwrap();
        prop_assert_eq!(unshape(&shaped, opts).unwrap(), input);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2–3. Length accounting
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resize_drops_one_cell_per_ligature(text in arb_text()) {
        let shaped = shaper(ShapeOptions::default()).shape_chars(&text).unwrap();
        let ligatures = shaped.iter().filter(|&&c| is_lam_alef(c)).count();
        prop_assert_eq!(shaped.len() + ligatures, text.len());
    }

    #[test]
    fn space_filling_modes_keep_length(
        text in arb_text(),
        mode in prop_oneof![
            Just(LamAlefMode::Near),
            Just(LamAlefMode::Begin),
            Just(LamAlefMode::End),
        ],
    ) {
        let opts = ShapeOptions::default().with_lam_alef(mode);
        let shaped = shaper(opts).shape_chars(&text).unwrap();
        prop_assert_eq!(shaped.len(), text.len());
        prop_assert!(!shaped.contains(&LAM_ALEF_PLACEHOLDER), "placeholder left in {:?}", shaped);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4–5. Output contents
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn no_base_letter_survives_shaping(text in arb_text()) {
        let shaped = shaper(ShapeOptions::default()).shape_chars(&text).unwrap();
        for &c in &shaped {
            prop_assert!(
                !LETTERS.contains(&c),
                "base letter {:?} left in {:?}",
                c,
                shaped
            );
        }
    }

    #[test]
    fn tashkeel_resize_keeps_only_shadda(text in arb_voweled_text()) {
        let opts = ShapeOptions::default().with_tashkeel(TashkeelMode::Resize);
        let shaped = shaper(opts).shape_chars(&text).unwrap();

        let removed = text
            .iter()
            .filter(|&&c| TASHKEEL.contains(&c) && c != '\u{0651}')
            .count();
        let ligatures = shaped.iter().filter(|&&c| is_lam_alef(c)).count();
        prop_assert_eq!(shaped.len() + removed + ligatures, text.len());
        prop_assert!(!shaped.contains(&TASHKEEL_PLACEHOLDER), "placeholder left in {:?}", shaped);
        for &c in &shaped {
            prop_assert!(!TASHKEEL.contains(&c));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6–7. Digits
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn digit_substitution_is_invertible(text in arb_digit_text(), ty in arb_digit_type()) {
        let base = ShapeOptions::default()
            .with_letters(LetterMode::Noop)
            .with_digit_type(ty);
        let arabic = shape(&text, base.with_digits(DigitMode::EnToAn)).unwrap();
        prop_assert!(!arabic.chars().any(|c| c.is_ascii_digit()));
        let back = shape(&arabic, base.with_digits(DigitMode::AnToEn)).unwrap();
        prop_assert_eq!(back, text);
    }

    #[test]
    fn arabic_initial_state_without_strong_chars(
        text in "[0-9 ,.+-]{0,40}",
        ty in arb_digit_type(),
        dir in prop_oneof![Just(TextDirection::Logical), Just(TextDirection::VisualLtr)],
    ) {
        let base = ShapeOptions::default()
            .with_letters(LetterMode::Noop)
            .with_digit_type(ty)
            .with_direction(dir);
        let contextual = shape(&text, base.with_digits(DigitMode::AlEnToAnInitAl)).unwrap();
        let plain = shape(&text, base.with_digits(DigitMode::EnToAn)).unwrap();
        prop_assert_eq!(contextual, plain);

        let ltr = shape(&text, base.with_digits(DigitMode::AlEnToAnInitLr)).unwrap();
        prop_assert_eq!(ltr, text);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Caller-buffer form
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn shape_into_agrees_with_shape_chars(text in arb_text(), cap in 0usize..56) {
        let shaper = shaper(ShapeOptions::default());
        let expected = shaper.shape_chars(&text).unwrap();
        let mut dest = vec!['#'; cap];

        match shaper.shape_into(&text, &mut dest) {
            Ok(written) => {
                prop_assert_eq!(written, expected.len());
                prop_assert_eq!(&dest[..written], &expected[..]);
                prop_assert!(dest[written..].iter().all(|&c| c == '#'));
            }
            Err(BidiError::BufferOverflow { required }) => {
                prop_assert_eq!(required, expected.len());
                prop_assert!(cap < required);
                prop_assert!(dest.iter().all(|&c| c == '#'));
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 9. Option words
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn valid_options_round_trip_through_bits(opts in arb_options()) {
        match opts.validate() {
            Ok(()) => {
                let decoded = ShapeOptions::from_bits(opts.to_bits()).unwrap();
                prop_assert_eq!(decoded, opts);
            }
            Err(err) => {
                prop_assert!(matches!(err, BidiError::IllegalArgument(_)));
                prop_assert!(ShapeOptions::from_bits(opts.to_bits()).is_err());
                prop_assert!(ArabicShaper::new(opts).is_err());
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 10. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn shaping_is_deterministic(text in arb_voweled_text(), opts in arb_options()) {
        prop_assume!(opts.validate().is_ok());
        let shaper = shaper(opts);
        let first = shaper.shape_chars(&text);
        let second = shaper.shape_chars(&text);
        prop_assert_eq!(first, second);
    }
}
