//! Benchmark for Enumerator pipelines vs hand-written iterator loops.
//!
//! Measures the overhead of the boxed pull chain against the equivalent
//! direct std iterator code, plus the cost profile of flatten and of
//! early-exit terminals.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lazyseq::prelude::*;
use std::hint::black_box;

// =============================================================================
// select + map + drain
// =============================================================================

fn benchmark_select_map_drain(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("select_map_drain");

    for size in [100, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::new("Enumerator", size),
            &size,
            |bencher, &size| {
                let source = Enumerator::from_values(0..size);
                bencher.iter(|| {
                    let drained = source
                        .select(|value, _| matches!(value.as_leaf(), Some(n) if n % 2 == 0))
                        .map(|value, _| value.map_leaf(|n| n * 3))
                        .to_array_values()
                        .unwrap();
                    black_box(drained)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("std iterator", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let drained: Vec<i32> =
                        (0..size).filter(|n| n % 2 == 0).map(|n| n * 3).collect();
                    black_box(drained)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// Early exit via take
// =============================================================================

fn benchmark_take_early_exit(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("take_early_exit");

    for size in [1_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("take(10)", size),
            &size,
            |bencher, &size| {
                let source = Enumerator::from_values(0..size);
                bencher.iter(|| {
                    let taken = source.take(10).to_array_values().unwrap();
                    black_box(taken)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// flatten over nested sequences
// =============================================================================

fn benchmark_flatten(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("flatten");

    for width in [10, 100] {
        group.bench_with_input(
            BenchmarkId::new("two levels", width),
            &width,
            |bencher, &width| {
                let mut outer = Sequence::new();
                for _ in 0..width {
                    let mut inner = Sequence::new();
                    for cell in 0..width {
                        inner.append(leaf(cell));
                    }
                    outer.append(Value::sequence(inner));
                }
                let source = Enumerator::from_sequence(outer);

                bencher.iter(|| {
                    let flat = source.flatten().to_array_values().unwrap();
                    black_box(flat)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_select_map_drain,
    benchmark_take_early_exit,
    benchmark_flatten
);
criterion_main!(benches);
