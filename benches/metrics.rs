//! Benchmarks for the metric functions and batch scoring.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use textmetrics::{damerau_levenshtein_distance, jaro_winkler_distance, score_batch, Scorer};

const PAIRS: &[(&str, &str)] = &[
    ("MARTHA", "MARHTA"),
    ("establishment", "establishing"),
    ("the quick brown fox jumps over", "the quikc brown fox jumsp over"),
    ("caf\u{00e9} cr\u{00e8}me", "cafe creme"),
];

fn bench_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("pair");
    for (a, b) in PAIRS {
        group.bench_with_input(BenchmarkId::new("jaro_winkler", a), &(a, b), |bench, (a, b)| {
            bench.iter(|| jaro_winkler_distance(black_box(a), black_box(b)));
        });
        group.bench_with_input(
            BenchmarkId::new("damerau_levenshtein", a),
            &(a, b),
            |bench, (a, b)| {
                bench.iter(|| damerau_levenshtein_distance(black_box(a), black_box(b)));
            },
        );
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let candidates: Vec<String> = (0..10_000).map(|i| format!("candidate-{i:05}")).collect();
    let scorer = Scorer::default();

    c.bench_function("score_batch_10k", |b| {
        b.iter(|| score_batch(black_box(&candidates), black_box("candidate-04242"), &scorer).ok());
    });
}

criterion_group!(benches, bench_pairs, bench_batch);
criterion_main!(benches);
