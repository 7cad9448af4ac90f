//! # Queue Benchmark
//!
//! Measures the per-frame cost of the event streams:
//! 1. Push/pop throughput on the external stream
//! 2. Refresh dedup under heavy repeat requests
//! 3. Overflow flush cost

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tessel_core::{BoundedQueue, DualEventQueue, Event, EventKind, EventTypeRegistry};

fn bench_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream_push_pop");

    for count in [100usize, 1_000] {
        let registry = EventTypeRegistry::new();
        let streams = DualEventQueue::new(count);

        group.bench_with_input(BenchmarkId::new("external", count), &count, |b, &count| {
            b.iter(|| {
                for i in 0..count {
                    streams.push(&registry, Event::new(EventKind::BUTTON_PRESS, "btn"));
                    black_box(i);
                }
                while let Some(event) = streams.pop_external() {
                    black_box(event);
                }
            });
        });
    }

    group.finish();
}

fn bench_refresh_dedup(c: &mut Criterion) {
    let registry = EventTypeRegistry::new();
    let streams = DualEventQueue::new(1_000);
    let keys: Vec<String> = (0..16).map(|i| format!("panel_{i}")).collect();

    c.bench_function("refresh_dedup_10k_requests", |b| {
        b.iter(|| {
            for i in 0..10_000 {
                let key = &keys[i % keys.len()];
                black_box(streams.push(&registry, Event::new(EventKind::UPDATE_UI, key.as_str())));
            }
            while let Some(event) = streams.pop_external() {
                black_box(event);
            }
        });
    });
}

fn bench_overflow_flush(c: &mut Criterion) {
    let queue = BoundedQueue::new("bench", 1_000);

    c.bench_function("overflow_flush_1000", |b| {
        b.iter(|| {
            for i in 0..=1_000u32 {
                black_box(queue.push(i));
            }
        });
    });
}

criterion_group!(benches, bench_push_pop, bench_refresh_dedup, bench_overflow_flush);
criterion_main!(benches);
