#![no_main]

use fbidi_reorder::{Paragraph, Reordering, WriteOptions, invert_map};
use libfuzzer_sys::fuzz_target;

const ALPHABET: [char; 8] = ['a', ' ', '1', '(', '\u{05D0}', '\u{0628}', '\u{0301}', '\u{200F}'];

fuzz_target!(|data: &[u8]| {
    // First byte picks the paragraph level; each following byte is one
    // character (low bits) and its level (high bits).
    let Some((&first, rest)) = data.split_first() else {
        return;
    };
    if rest.len() > 512 {
        return;
    }
    let para_level = first % 2;
    let text: Vec<char> = rest.iter().map(|&b| ALPHABET[usize::from(b & 7)]).collect();
    let levels: Vec<u8> = rest.iter().map(|&b| (b >> 3) % 6).collect();

    let Ok(para) = Paragraph::from_chars(text, &levels, para_level) else {
        return;
    };
    let len = para.len();

    // Runs partition the text.
    let runs = para.count_runs().unwrap();
    let mut covered = vec![false; len];
    for i in 0..runs {
        let run = para.visual_run(i).unwrap();
        for slot in &mut covered[run.logical_start..run.logical_start + run.length] {
            assert!(!*slot, "runs overlap");
            *slot = true;
        }
    }
    assert!(covered.iter().all(|&c| c));

    // Maps are mutual inverses without marks or control removal.
    let visual = para.visual_map().unwrap();
    let logical = para.logical_map().unwrap();
    assert_eq!(visual.len(), len);
    for (v, l) in visual.iter().enumerate() {
        let l = l.expect("every visual slot maps back");
        assert_eq!(logical[l], Some(v));
    }
    assert_eq!(invert_map(&invert_map(&logical)), logical);

    // Writer output length agrees with the reported result length.
    let written = para.write_reordered(WriteOptions::DO_MIRRORING).unwrap();
    assert_eq!(written.chars().count(), para.result_length().unwrap());

    let stripped = para
        .write_reordered(WriteOptions::REMOVE_BIDI_CONTROLS)
        .unwrap();
    assert!(stripped.chars().count() <= len);
});
