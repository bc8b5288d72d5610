//! Parser benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use termbuffer::core::GraphicAttributes;
use termbuffer::parser::{csi, sgr};

fn bench_parse_csi_sequences(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    let sequences = ["[1;31m", "[5;10H", "[2J", "[38;5;208m", "[?25l", "[3;20r"];
    let total: usize = sequences.iter().map(|s| s.len()).sum();
    group.throughput(Throughput::Bytes(total as u64));

    group.bench_function("csi_parse", |b| {
        b.iter(|| {
            for seq in &sequences {
                black_box(csi::parse(black_box(seq)));
            }
        })
    });

    group.finish();
}

fn bench_sgr(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    let codes: Vec<u16> = vec![1, 4, 31, 44, 38, 5, 208, 48, 5, 17, 22, 0, 93, 104];
    let defaults = GraphicAttributes::default();

    group.bench_function("sgr_apply", |b| {
        b.iter(|| {
            let mut attrs = defaults;
            sgr::apply(&mut attrs, &defaults, black_box(&codes));
            black_box(attrs)
        })
    });

    group.finish();
}

fn bench_is_incomplete(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    group.bench_function("is_incomplete", |b| {
        b.iter(|| {
            black_box(csi::is_incomplete(black_box("[12;34;56")));
            black_box(csi::is_incomplete(black_box("[12;34;56m")));
        })
    });

    group.finish();
}

criterion_group!(benches, bench_parse_csi_sequences, bench_sgr, bench_is_incomplete);

criterion_main!(benches);
