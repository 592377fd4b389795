//! Resampling Benchmarks
//!
//! Benchmarks for random over-sampling, the NearMiss versions and the brute
//! force neighbor search they rely on.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use imbrs::neighbors::{KNeighbors, NearestNeighbors};
use imbrs::prelude::*;

/// Create an imbalanced two-class dataset with one minority sample in ten
fn create_imbalanced_dataset(n_samples: usize, n_features: usize) -> (Vec<Vec<f64>>, Vec<i32>) {
    // Simple LCG random generator for reproducibility
    let mut rng_state: u64 = 42;
    let rand_f64 = |state: &mut u64| -> f64 {
        *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (*state >> 33) as f64 / (u32::MAX as f64)
    };

    let mut x = Vec::with_capacity(n_samples);
    let mut y = Vec::with_capacity(n_samples);
    for i in 0..n_samples {
        let label = if i % 10 == 0 { 0 } else { 1 };
        let offset = label as f64 * 0.5;
        x.push(
            (0..n_features)
                .map(|_| rand_f64(&mut rng_state) + offset)
                .collect(),
        );
        y.push(label);
    }
    (x, y)
}

fn bench_random_over_sampler(c: &mut Criterion) {
    let mut group = c.benchmark_group("RandomOverSampler");

    for n_samples in [1_000, 10_000, 100_000] {
        let data = create_imbalanced_dataset(n_samples, 4);
        group.bench_with_input(
            BenchmarkId::new("fit_sample", n_samples),
            &data,
            |b, (x, y)| {
                b.iter(|| {
                    let mut ros = RandomOverSampler::new().with_random_state(0);
                    ros.fit_sample(std::hint::black_box(x), y).unwrap();
                })
            },
        );
    }

    group.finish();
}

fn bench_nearmiss(c: &mut Criterion) {
    let mut group = c.benchmark_group("NearMiss");
    group.sample_size(10); // Reduce sample size for slower benchmarks

    for n_samples in [500, 2_000] {
        let data = create_imbalanced_dataset(n_samples, 4);
        for version in [1, 2, 3] {
            group.bench_with_input(
                BenchmarkId::new(format!("version_{}", version), n_samples),
                &data,
                |b, (x, y)| {
                    b.iter(|| {
                        let mut nm = NearMiss::new().with_version(version);
                        nm.fit_sample(std::hint::black_box(x), y).unwrap();
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_neighbor_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("NearestNeighbors");

    for n_samples in [1_000, 5_000] {
        let (x, _) = create_imbalanced_dataset(n_samples, 8);
        let mut nn = NearestNeighbors::new(3);
        nn.fit(&x).unwrap();
        let query = &x[..100];

        group.bench_with_input(BenchmarkId::new("kneighbors", n_samples), &nn, |b, nn| {
            b.iter(|| {
                nn.kneighbors(std::hint::black_box(query), None).unwrap();
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_random_over_sampler,
    bench_nearmiss,
    bench_neighbor_search
);
criterion_main!(benches);
