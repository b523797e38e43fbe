use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand_distr::Normal;
use unidip::{dip, dip_statistic, unidip, Ecdf, SignificanceTester, UnidipConfig};

/// Two well separated normal modes
fn generate_bimodal_data(size: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let left = Normal::new(-4.0, 1.0).unwrap();
    let right = Normal::new(4.0, 1.0).unwrap();
    (0..size)
        .map(|i| {
            if i % 2 == 0 {
                left.sample(&mut rng)
            } else {
                right.sample(&mut rng)
            }
        })
        .collect()
}

fn bench_dip_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("dip");

    for &size in &[100, 1000, 5000] {
        let ecdf = Ecdf::from_sample(&generate_bimodal_data(size, 42)).unwrap();

        group.bench_with_input(BenchmarkId::new("reduced", size), &ecdf, |b, ecdf| {
            b.iter(|| dip_statistic(black_box(ecdf)))
        });
        group.bench_with_input(BenchmarkId::new("full", size), &ecdf, |b, ecdf| {
            b.iter(|| dip(black_box(ecdf)))
        });
    }

    group.finish();
}

fn bench_bootstrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("bootstrap");
    group.sample_size(10);

    for &size in &[100, 1000] {
        let ecdf = Ecdf::from_sample(&generate_bimodal_data(size, 7)).unwrap();
        let tester = SignificanceTester::new(100);

        group.bench_with_input(BenchmarkId::new("trials_100", size), &ecdf, |b, ecdf| {
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| tester.test(black_box(ecdf), &mut rng))
        });
    }

    group.finish();
}

fn bench_clustering(c: &mut Criterion) {
    let mut group = c.benchmark_group("unidip");
    group.sample_size(10);

    let config = UnidipConfig {
        seed: Some(42),
        ..Default::default()
    };
    for &size in &[300, 1500] {
        let data = generate_bimodal_data(size, 3);
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| unidip(black_box(data), &config))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dip_modes, bench_bootstrap, bench_clustering);
criterion_main!(benches);
