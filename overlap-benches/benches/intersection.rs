//! Merge-scan benchmarks for `sorted_intersection_count`.
//!
//! Throughput is reported in input elements, so a flat elements-per-second
//! figure across the size sweep shows the scan scales linearly.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use overlap_benches::{
    error::BenchSetupError,
    params::PairBenchParams,
    source::{PairConfig, SortedPair},
};
use overlap_core::sorted_intersection_count;

/// Seed used for all synthetic data generation in this benchmark.
const SEED: u64 = 42;

/// Set lengths for the scaling sweep, each paired with half of it shared.
const SCALING: &[(usize, usize)] = &[
    (64, 32),
    (1_024, 512),
    (16_384, 8_192),
    (262_144, 131_072),
    (1_048_576, 524_288),
];

/// Set length used for the overlap sweep.
const OVERLAP_LEN: usize = 16_384;

/// Shared key counts for the overlap sweep.
const OVERLAP_SHARED: &[usize] = &[0, 1_024, 8_192, 16_384];

fn bench_pair(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    params: PairBenchParams,
) -> Result<(), BenchSetupError> {
    let pair = SortedPair::generate(&PairConfig {
        len: params.len,
        shared: params.shared,
        seed: SEED,
    })?;
    let elements = u64::try_from(pair.left.len() + pair.right.len()).unwrap_or(u64::MAX);
    group.throughput(Throughput::Elements(elements));
    group.bench_with_input(BenchmarkId::from_parameter(params), &pair, |b, pair| {
        b.iter(|| sorted_intersection_count(black_box(&pair.left), black_box(&pair.right)));
    });
    Ok(())
}

fn scaling_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("sorted_intersection_count/scaling");
    for &(len, shared) in SCALING {
        bench_pair(&mut group, PairBenchParams { len, shared })?;
    }
    group.finish();
    Ok(())
}

fn overlap_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("sorted_intersection_count/overlap");
    for &shared in OVERLAP_SHARED {
        bench_pair(
            &mut group,
            PairBenchParams {
                len: OVERLAP_LEN,
                shared,
            },
        )?;
    }
    group.finish();
    Ok(())
}

fn scaling(c: &mut Criterion) {
    if let Err(err) = scaling_impl(c) {
        panic!("scaling benchmark setup failed: {err}");
    }
}

fn overlap(c: &mut Criterion) {
    if let Err(err) = overlap_impl(c) {
        panic!("overlap benchmark setup failed: {err}");
    }
}

criterion_group!(benches, scaling, overlap);
criterion_main!(benches);
