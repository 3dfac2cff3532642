//! Benchmarks for emolabel-core time formatting.
//!
//! Run with: cargo bench -p emolabel-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use emolabel_core::{format_clock, format_compact, format_precise, EmotionCatalog, Timecode};

fn bench_formatting(c: &mut Criterion) {
    let seconds = 3723.456;

    c.bench_function("format_clock", |bencher| {
        bencher.iter(|| format_clock(black_box(seconds)));
    });

    c.bench_function("format_compact", |bencher| {
        bencher.iter(|| format_compact(black_box(seconds)));
    });

    c.bench_function("format_precise", |bencher| {
        bencher.iter(|| format_precise(black_box(seconds)));
    });
}

fn bench_parsing(c: &mut Criterion) {
    c.bench_function("timecode_parse", |bencher| {
        bencher.iter(|| black_box("01:02:03.456").parse::<Timecode>());
    });
}

fn bench_catalog_lookup(c: &mut Criterion) {
    let catalog = EmotionCatalog::standard();

    c.bench_function("catalog_label_or_id", |bencher| {
        bencher.iter(|| catalog.label_or_id(black_box("anticipation")).len());
    });
}

criterion_group!(benches, bench_formatting, bench_parsing, bench_catalog_lookup);
criterion_main!(benches);
