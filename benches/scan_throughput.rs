//! Scan throughput benchmarks.
//!
//! Measures automaton scanning, evasion detection, and the full
//! filter_message pipeline across message sizes and vocabulary sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use wordguard::automaton::AutomatonBuilder;
use wordguard::filter::SplitEvasionDetector;

fn vocabulary(size: usize) -> Vec<String> {
    (0..size).map(|i| format!("badword{i}")).collect()
}

fn message(length: usize) -> String {
    let mut text = "a perfectly ordinary chat message with badword7 inside ".repeat(1 + length / 56);
    text.truncate(length);
    text
}

fn bench_automaton_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("automaton_scan");

    for (name, words) in [("16_words", 16), ("256_words", 256), ("4096_words", 4096)] {
        let mut builder = AutomatonBuilder::new();
        for w in vocabulary(words) {
            builder.insert(&w);
        }
        let automaton = builder.build();
        let text = message(2048);

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("scan_2048_chars", name), &text, |b, t| {
            b.iter(|| automaton.scan(black_box(t)))
        });
    }

    group.finish();
}

fn bench_evasion_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("evasion_scan");

    for (name, words) in [("16_words", 16), ("256_words", 256)] {
        let detector = SplitEvasionDetector::compile(&vocabulary(words)).unwrap();
        let text = message(2048);

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("scan_2048_chars", name), &text, |b, t| {
            b.iter(|| detector.scan(black_box(t)))
        });
    }

    group.finish();
}

fn bench_message_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("automaton_message_sizes");

    let mut builder = AutomatonBuilder::new();
    for w in vocabulary(256) {
        builder.insert(&w);
    }
    let automaton = builder.build();

    for (name, length) in [("256_chars", 256), ("2048_chars", 2048), ("16384_chars", 16384)] {
        let text = message(length);
        group.throughput(Throughput::Bytes(length as u64));
        group.bench_with_input(BenchmarkId::new("scan", name), &text, |b, t| {
            b.iter(|| automaton.scan(black_box(t)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_automaton_scan,
    bench_evasion_scan,
    bench_message_sizes
);
criterion_main!(benches);
