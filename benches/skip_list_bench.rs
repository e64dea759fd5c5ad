//! Criterion benchmarks for the ranked skip list.

use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput,
};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use kaleido::collections::SkipList;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn random_keys(count: usize, seed: u64) -> Vec<(f64, u64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count as u64).map(|v| (rng.r#gen::<f64>() * 1e6, v)).collect()
}

fn build(keys: &[(f64, u64)]) -> SkipList<u64> {
    let mut list = SkipList::seeded(1);
    for &(score, value) in keys {
        list.insert(score, value);
    }
    list
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for size in SIZES {
        let keys = random_keys(size, 7);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("random", size), &keys, |b, keys| {
            b.iter(|| black_box(build(keys)));
        });
    }
    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    for size in SIZES {
        let keys = random_keys(size, 11);
        let list = build(&keys);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("rank", size), &keys, |b, keys| {
            b.iter(|| {
                for (score, value) in keys {
                    black_box(list.rank(*score, value));
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("element_at_rank", size), &size, |b, &size| {
            b.iter(|| {
                for rank in 1..=size as u64 {
                    black_box(list.element_at_rank(rank));
                }
            });
        });
    }
    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");
    for size in SIZES {
        let keys = random_keys(size, 13);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("insert_delete", size), &keys, |b, keys| {
            b.iter(|| {
                let mut list = build(keys);
                for (score, value) in keys.iter().step_by(2) {
                    list.delete(*score, value);
                }
                black_box(list.len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_rank, bench_churn);
criterion_main!(benches);
