//! Sequential vs parallel dispatch for the elementwise kernels and the product.
//!
//! Run with: cargo bench --bench dispatch_bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use matrix2d::{add_with, map_with, multiply_with, Matrix, ParallelConfig};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Duration;

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Matrix<f64> {
    Matrix::from_fn(rows, cols, |_, _| rng.gen::<f64>()).unwrap()
}

fn policies() -> [(&'static str, ParallelConfig); 3] {
    [
        ("sequential", ParallelConfig::sequential()),
        ("parallel", ParallelConfig::parallel()),
        ("heuristic", ParallelConfig::default()),
    ]
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");
    group.sample_size(10);
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for size in [64, 256, 1024, 2048] {
        group.throughput(Throughput::Elements((size * size) as u64));
        let mut rng = StdRng::seed_from_u64(42);
        let a = random_matrix(&mut rng, size, size);
        let b = random_matrix(&mut rng, size, size);

        for (name, config) in policies() {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |bench, _| {
                bench.iter(|| add_with(&config, &a, &b).unwrap())
            });
        }
    }
    group.finish();
}

/// Cheap per-cell work where dispatch overhead dominates on small inputs.
fn bench_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("map");
    group.sample_size(10);
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for size in [32, 90, 91, 512] {
        group.throughput(Throughput::Elements((size * size) as u64));
        let mut rng = StdRng::seed_from_u64(42);
        let a = random_matrix(&mut rng, size, size);

        for (name, config) in policies() {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |bench, _| {
                bench.iter(|| map_with(&config, &a, |x| x * 2.0 + 1.0).unwrap())
            });
        }
    }
    group.finish();
}

fn bench_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply");
    group.sample_size(10);
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));

    for size in [32, 128, 256] {
        group.throughput(Throughput::Elements((size * size * size) as u64));
        let mut rng = StdRng::seed_from_u64(42);
        let a = random_matrix(&mut rng, size, size);
        let b = random_matrix(&mut rng, size, size);

        for (name, config) in policies() {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |bench, _| {
                bench.iter(|| multiply_with(&config, &a, &b).unwrap())
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_add, bench_map, bench_multiply);
criterion_main!(benches);
