#![no_main]

use arbitrary::Arbitrary;
use fbidi_shape::{ArabicShaper, BidiError, ShapeOptions, shape, unshape};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    word: u32,
    text: Vec<u16>,
    cap: u8,
}

fuzz_target!(|input: Input| {
    if input.text.len() > 512 {
        return;
    }
    // Bias code units into the Arabic and presentation-form blocks.
    let text: Vec<char> = input
        .text
        .iter()
        .filter_map(|&u| {
            let cp = match u >> 14 {
                0 => 0x0600 + u32::from(u & 0xFF),
                1 => 0xFE70 + u32::from(u & 0x8F),
                2 => 0xFB50 + u32::from(u & 0x1FF),
                _ => u32::from(u & 0x7F),
            };
            char::from_u32(cp)
        })
        .collect();

    // Arbitrary option words either decode to a valid shaper or fail
    // with an argument error; they never panic.
    let shaper = match ArabicShaper::from_bits(input.word) {
        Ok(shaper) => shaper,
        Err(err) => {
            assert!(matches!(err, BidiError::IllegalArgument(_)));
            return;
        }
    };

    let shaped = shaper.shape_chars(&text);
    let mut dest = vec!['\0'; usize::from(input.cap)];
    match (&shaped, shaper.shape_into(&text, &mut dest)) {
        (Ok(full), Ok(n)) => assert_eq!(&dest[..n], &full[..]),
        (Ok(full), Err(BidiError::BufferOverflow { required })) => {
            assert_eq!(required, full.len());
            assert!(dest.iter().all(|&c| c == '\0'));
        }
        (Err(a), Err(b)) => assert_eq!(a, &b),
        (a, b) => panic!("shape_chars {a:?} disagrees with shape_into {b:?}"),
    }

    // Resize shaping of base letters always round-trips.
    let base: String = text.iter().filter(|c| ('\u{0622}'..='\u{064A}').contains(*c)).collect();
    let shaped = shape(&base, ShapeOptions::default()).unwrap();
    assert_eq!(unshape(&shaped, ShapeOptions::default()).unwrap(), base);
});
