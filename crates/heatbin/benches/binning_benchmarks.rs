//! Benchmarks for grid binning.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dispersion_common::BoundingBox;
use heatbin::{HeatBinConfig, HeatBinner};
use test_utils::random_cloud;

fn bench_bin_cell_sizes(c: &mut Criterion) {
    let bounds = BoundingBox::new(144.6, -38.3, 145.1, -37.8);
    let cloud = random_cloud(1, 100_000, &bounds);
    let mut group = c.benchmark_group("bin_100k_points");

    for cell_km in [0.25, 1.0, 5.0] {
        let binner = HeatBinner::new(HeatBinConfig::with_cell_size_km(cell_km)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(cell_km), &cloud, |b, cloud| {
            b.iter(|| binner.bin(black_box(cloud.iter().copied())).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_bin_cell_sizes);
criterion_main!(benches);
