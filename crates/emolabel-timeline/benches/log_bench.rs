//! Benchmarks for the event log hot paths.
//!
//! Run with: cargo bench -p emolabel-timeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use emolabel_core::EmotionKey;
use emolabel_timeline::{EventLog, SortKey, TimelineProjector};

fn populated(events: usize) -> EventLog {
    let mut log = EventLog::with_standard_catalog();
    for i in 0..events {
        let key = EmotionKey::ALL[i % EmotionKey::ALL.len()];
        log.record(key.id(), i as f64 * 0.37).unwrap();
    }
    log
}

fn bench_query(c: &mut Criterion) {
    let log = populated(5_000);

    c.bench_function("query_near_5k", |bencher| {
        bencher.iter(|| log.query_near(black_box(900.0), 0.5).len());
    });
}

fn bench_sort(c: &mut Criterion) {
    let log = populated(5_000);

    c.bench_function("sort_time_5k", |bencher| {
        bencher.iter(|| log.sorted(black_box(SortKey::Time)).len());
    });

    c.bench_function("sort_label_5k", |bencher| {
        bencher.iter(|| log.sorted(black_box(SortKey::EmotionLabel)).len());
    });

    c.bench_function("view_search_5k", |bencher| {
        bencher.iter(|| log.view(SortKey::Time, black_box("joy")).len());
    });
}

fn bench_projection(c: &mut Criterion) {
    let log = populated(5_000);

    c.bench_function("markers_5k", |bencher| {
        bencher.iter(|| TimelineProjector::new(&log, black_box(1850.0)).markers().len());
    });
}

criterion_group!(benches, bench_query, bench_sort, bench_projection);
criterion_main!(benches);
