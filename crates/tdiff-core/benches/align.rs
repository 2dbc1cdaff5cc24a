use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tdiff_core::{align, compare};

fn transcript(lines: usize, typo_every: usize) -> String {
    (0..lines)
        .map(|i| {
            if typo_every > 0 && i % typo_every == 0 {
                format!("speaker {i} said the motion carries unanimosly")
            } else {
                format!("speaker {i} said the motion carries unanimously")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_align(c: &mut Criterion) {
    let left: Vec<String> = (0..200).map(|i| format!("word{}", i % 37)).collect();
    let right: Vec<String> = (0..200).map(|i| format!("word{}", i % 41)).collect();

    c.bench_function("align_words_200", |b| {
        b.iter(|| align(black_box(&left), black_box(&right)))
    });
}

fn bench_compare(c: &mut Criterion) {
    let reference = transcript(500, 0);
    let hypothesis = transcript(500, 7);

    c.bench_function("compare_transcript_500_lines", |b| {
        b.iter(|| compare(black_box(&reference), black_box(&hypothesis)))
    });
}

fn bench_compare_without_shared_lines(c: &mut Criterion) {
    // Every hypothesis line carries a filler word, so the whole text is one gap.
    let reference = transcript(400, 0);
    let hypothesis = reference
        .lines()
        .map(|line| format!("{line} uh"))
        .collect::<Vec<_>>()
        .join("\n");

    c.bench_function("compare_transcript_400_lines_no_exact_match", |b| {
        b.iter(|| compare(black_box(&reference), black_box(&hypothesis)))
    });
}

criterion_group!(
    benches,
    bench_align,
    bench_compare,
    bench_compare_without_shared_lines
);
criterion_main!(benches);
