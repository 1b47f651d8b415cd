//! Benchmarks for concentration analysis.
//!
//! Measures the full sort-and-walk over validator sets at the sizes we
//! actually see upstream: a few hundred validators for BFT chains up to
//! tens of thousands of token holders for governance snapshots.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nakameter_analysis::{concentration, AttackFraction};
use nakameter_types::WeightedEntity;

fn synthetic_set(n: usize) -> Vec<WeightedEntity> {
    // Zipf-ish weights: realistic long-tail stake distribution.
    (0..n)
        .map(|i| {
            let weight = 1_000_000_000_000u128 / (i as u128 + 1);
            WeightedEntity::new(format!("validator-{i}"), weight)
        })
        .collect()
}

fn bench_concentration(c: &mut Criterion) {
    let mut group = c.benchmark_group("concentration");

    for &n in &[100usize, 1_000, 10_000, 100_000] {
        let set = synthetic_set(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &set, |b, set| {
            b.iter(|| concentration(black_box(set), AttackFraction::ONE_THIRD))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_concentration);
criterion_main!(benches);
