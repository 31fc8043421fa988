//! Criterion benchmarks for `resilience_count`.
//! Focus sizes: n in {0, 10, 50, 100, 200} disks, both index strategies.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p barrier-resilience

use barrier_resilience::{resilience_count, Config, Disk};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::vector;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// `n` disks of a common radius scattered in a band between two borders,
/// dense enough that most runs contain several disjoint bridging chains.
fn random_uniform_chain(n: usize, seed: u64) -> Vec<Disk<i64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let x = rng.gen_range(-20..20);
            let y = rng.gen_range(-200..200);
            Disk::new(vector![x, y], 2)
        })
        .collect()
}

fn bench_resilience_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("resilience_count");
    for &n in &[0usize, 10, 50, 100, 200] {
        group.bench_with_input(BenchmarkId::new("trivial", n), &n, |b, &n| {
            b.iter_batched(
                || random_uniform_chain(n, 1),
                |disks| {
                    let _ = resilience_count(disks, -25, 25, &Config::with_trivial_datastructure()).unwrap();
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("kd_tree", n), &n, |b, &n| {
            b.iter_batched(
                || random_uniform_chain(n, 2),
                |disks| {
                    let _ = resilience_count(disks, -25, 25, &Config::with_kd_tree()).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resilience_count);
criterion_main!(benches);
