use criterion::{criterion_group, criterion_main, Criterion};
use ndarray::{Array1, Array3};
use pic_reduce::aperture::{aperture_profile, circular_mask};
use pic_reduce::bound::{AxisBound, Region};
use pic_reduce::reduce::{reduce, Reduction};
use pic_reduce::spectrum::merge_bins;
use pic_types::state::{Axis3, Field, Grid};
use std::hint::black_box;

fn volume_64() -> (Field, Grid) {
    let axis = Array1::linspace(-16.0, 16.0, 64);
    let grid = Grid::new(axis.clone(), axis.clone(), Some(axis)).unwrap();
    let values = Array3::from_shape_fn((64, 64, 64), |(i, j, k)| {
        ((i * 64 + j) * 64 + k) as f64 * 1e-4
    });
    (Field::Volume(values), grid)
}

fn bench_axial_sum_64(c: &mut Criterion) {
    let (field, grid) = volume_64();
    let region = Region {
        y: Some(AxisBound::new(-8.0, 8.0).unwrap()),
        z: Some(AxisBound::new(-8.0, 8.0).unwrap()),
        ..Region::default()
    };
    let mode = Reduction::Sum {
        axes: vec![Axis3::Y, Axis3::Z],
    };
    c.bench_function("axial_sum_64x64x64", |b| {
        b.iter(|| black_box(reduce(&field, &grid, &region, &mode).unwrap()))
    });
}

fn bench_middle_slice_64(c: &mut Criterion) {
    let (field, grid) = volume_64();
    let mode = Reduction::Slice {
        axis: Axis3::Z,
        target: None,
    };
    c.bench_function("middle_slice_64x64x64", |b| {
        b.iter(|| black_box(reduce(&field, &grid, &Region::default(), &mode).unwrap()))
    });
}

fn bench_aperture_profile_128(c: &mut Criterion) {
    let y = Array1::linspace(-4.8, 4.8, 96);
    let z = Array1::linspace(-4.8, 4.8, 96);
    let mask = circular_mask(&y, &z, 2.5);
    let values = Array3::from_shape_fn((128, 96, 96), |(i, j, k)| (i + j + k) as f64 * 1e-3);

    c.bench_function("aperture_profile_128x96x96", |b| {
        b.iter(|| black_box(aperture_profile(&values, &mask).unwrap()))
    });
}

fn bench_merge_bins_4000(c: &mut Criterion) {
    let energy = Array1::linspace(0.05, 200.0, 4000);
    let counts = Array1::from_shape_fn(4000, |i| (i as f64 * 0.01).sin().abs() * 1e9);

    c.bench_function("merge_bins_4000_by_5", |b| {
        b.iter(|| black_box(merge_bins(&energy, &counts, 5).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_axial_sum_64,
    bench_middle_slice_64,
    bench_aperture_profile_128,
    bench_merge_bins_4000
);
criterion_main!(benches);
