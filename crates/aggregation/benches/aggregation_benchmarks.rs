//! Benchmarks for the aggregation engine.

use aggregation::{exposure, final_positions};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dispersion_common::BoundingBox;
use particle_data::DataFormat;
use test_utils::random_dataset;

fn bench_final_positions(c: &mut Criterion) {
    let bbox = BoundingBox::new(144.6, -38.3, 145.1, -37.8);
    let fmt = DataFormat::default();
    let mut group = c.benchmark_group("final_positions");

    for particles in [100usize, 1_000, 5_000] {
        let set = random_dataset(1, 48, particles, 0.7, &bbox);
        group.bench_with_input(BenchmarkId::from_parameter(particles), &set, |b, set| {
            b.iter(|| final_positions(black_box(set), &fmt, 1.0))
        });
    }
    group.finish();
}

fn bench_exposure(c: &mut Criterion) {
    let bbox = BoundingBox::new(144.6, -38.3, 145.1, -37.8);
    let fmt = DataFormat::default();
    let set = random_dataset(2, 48, 2_000, 0.7, &bbox);

    c.bench_function("exposure_48x2000", |b| {
        b.iter(|| exposure(black_box(&set), &fmt, 1.0))
    });
}

criterion_group!(benches, bench_final_positions, bench_exposure);
criterion_main!(benches);
