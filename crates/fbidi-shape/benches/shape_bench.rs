//! Benchmarks for Arabic shaping, deshaping and digit substitution.
//!
//! Run with: cargo bench -p fbidi-shape --bench shape_bench
//!
//! Workloads:
//! - **Words**: joined Arabic words separated by spaces.
//! - **LamAlef**: every other pair forms a ligature.
//! - **Voweled**: letters carrying tashkeel marks.
//! - **Mixed**: Arabic words interleaved with Latin words and digits.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fbidi_shape::{ArabicShaper, DigitMode, LamAlefMode, LetterMode, ShapeOptions, TashkeelMode};
use std::hint::black_box;

// ── Workload Generators ─────────────────────────────────────────────────

fn cycle(pattern: &[char], size: usize) -> Vec<char> {
    pattern.iter().copied().cycle().take(size).collect()
}

fn words_workload(size: usize) -> Vec<char> {
    cycle(&['\u{0633}', '\u{0644}', '\u{0645}', '\u{0628}', '\u{064A}', ' '], size)
}

fn lam_alef_workload(size: usize) -> Vec<char> {
    cycle(&['\u{0644}', '\u{0627}', '\u{0628}', '\u{0644}', '\u{0623}', ' '], size)
}

fn voweled_workload(size: usize) -> Vec<char> {
    cycle(&['\u{0628}', '\u{064E}', '\u{0645}', '\u{0651}', '\u{0633}', '\u{0650}', ' '], size)
}

fn mixed_workload(size: usize) -> Vec<char> {
    cycle(&['\u{0628}', '\u{0644}', ' ', 'a', 'b', ' ', '1', '2', ' '], size)
}

type Workload = fn(usize) -> Vec<char>;

const WORKLOADS: [(&str, Workload); 4] = [
    ("words", words_workload),
    ("lam_alef", lam_alef_workload),
    ("voweled", voweled_workload),
    ("mixed", mixed_workload),
];

// ── Benchmark Functions ─────────────────────────────────────────────────

fn bench_shape(c: &mut Criterion) {
    let mut group = c.benchmark_group("shape/letters");
    let policies = [
        ("resize", LamAlefMode::Resize),
        ("near", LamAlefMode::Near),
        ("end", LamAlefMode::End),
    ];
    for (name, workload) in WORKLOADS {
        for size in [64, 1024] {
            let text = workload(size);
            for (policy, mode) in policies {
                let shaper = ArabicShaper::new(ShapeOptions::default().with_lam_alef(mode)).unwrap();
                group.bench_with_input(
                    BenchmarkId::new(format!("{name}/{policy}"), size),
                    &size,
                    |b, _| b.iter(|| black_box(shaper.shape_chars(&text).unwrap())),
                );
            }
        }
    }
    group.finish();
}

fn bench_unshape(c: &mut Criterion) {
    let mut group = c.benchmark_group("shape/unshape");
    let shaper = ArabicShaper::new(ShapeOptions::default()).unwrap();
    let deshaper =
        ArabicShaper::new(ShapeOptions::default().with_letters(LetterMode::Unshape)).unwrap();
    for (name, workload) in WORKLOADS {
        let shaped = shaper.shape_chars(&workload(1024)).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| black_box(deshaper.shape_chars(&shaped).unwrap()));
        });
    }
    group.finish();
}

fn bench_tashkeel(c: &mut Criterion) {
    let text = voweled_workload(1024);
    let shaper =
        ArabicShaper::new(ShapeOptions::default().with_tashkeel(TashkeelMode::Resize)).unwrap();
    c.bench_function("shape/tashkeel_resize/voweled_1024", |b| {
        b.iter(|| black_box(shaper.shape_chars(&text).unwrap()));
    });
}

fn bench_digits(c: &mut Criterion) {
    let text = mixed_workload(4096);
    let mut group = c.benchmark_group("shape/digits");
    for (name, mode) in [
        ("en_to_an", DigitMode::EnToAn),
        ("contextual", DigitMode::AlEnToAnInitLr),
    ] {
        let opts = ShapeOptions::default()
            .with_letters(LetterMode::Noop)
            .with_digits(mode);
        let shaper = ArabicShaper::new(opts).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| black_box(shaper.shape_chars(&text).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_shape, bench_unshape, bench_tashkeel, bench_digits);
criterion_main!(benches);
