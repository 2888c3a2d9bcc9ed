// ─────────────────────────────────────────────────────────────────────
// PIC Post — Property-Based Tests (proptest) for pic-reduce
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for pic-reduce using proptest.
//!
//! Covers: axis masking, nearest-coordinate lookup, reduction mode
//! conflicts, summation totals, aperture masks, weighted angular
//! momentum, spectrum rebinning.

use ndarray::{Array1, Array3};
use pic_reduce::aperture::circular_mask;
use pic_reduce::bound::{masked_indices, nearest_index, AxisBound, Region};
use pic_reduce::particles::{angular_momentum_x, ParticleSet, Weight};
use pic_reduce::reduce::{reduce, restrict, Reduced, Reduction};
use pic_reduce::spectrum::merge_bins;
use pic_types::error::PicError;
use pic_types::state::{Axis3, Field, Grid};
use proptest::prelude::*;

fn sorted_axis(len: usize, start: f64, step: f64) -> Array1<f64> {
    Array1::from_shape_fn(len, |i| start + step * i as f64)
}

fn wavy_volume(nx: usize, ny: usize, nz: usize, phase: f64) -> Array3<f64> {
    Array3::from_shape_fn((nx, ny, nz), |(i, j, k)| {
        ((i + 2 * j + 3 * k) as f64 * 0.37 + phase).sin() * 100.0
    })
}

// ── Axis Masking Properties ──────────────────────────────────────────

proptest! {
    /// An absent bound keeps every coordinate of the axis.
    #[test]
    fn absent_bound_keeps_full_extent(
        len in 2usize..40,
        start in -50.0..50.0f64,
        step in 0.05..2.0f64,
    ) {
        let axis = sorted_axis(len, start, step);
        let kept = masked_indices(&axis, None, Axis3::X).unwrap();
        prop_assert_eq!(kept.len(), len);
        prop_assert_eq!(kept[0], 0);
    }

    /// Bounds placed exactly on coordinates keep both endpoints.
    #[test]
    fn bounds_are_inclusive_at_endpoints(
        len in 4usize..40,
        lo_i in 0usize..3,
        span in 1usize..12,
        start in -50.0..50.0f64,
        step in 0.05..2.0f64,
    ) {
        let axis = sorted_axis(len, start, step);
        let hi_i = (lo_i + span).min(len - 1);
        let bound = AxisBound::new(axis[lo_i], axis[hi_i]).unwrap();
        let kept = masked_indices(&axis, Some(bound), Axis3::Y).unwrap();
        prop_assert_eq!(kept.len(), hi_i - lo_i + 1);
        prop_assert_eq!(kept[0], lo_i);
        prop_assert_eq!(*kept.last().unwrap(), hi_i);
    }

    /// A bound entirely beyond the axis is an empty-selection error.
    #[test]
    fn out_of_range_bound_is_empty_selection(
        len in 2usize..40,
        start in -50.0..50.0f64,
        step in 0.05..2.0f64,
        gap in 1.0..20.0f64,
    ) {
        let axis = sorted_axis(len, start, step);
        let beyond = axis[len - 1] + gap;
        let bound = AxisBound::new(beyond, beyond + 1.0).unwrap();
        let err = masked_indices(&axis, Some(bound), Axis3::Z).unwrap_err();
        prop_assert!(matches!(err, PicError::EmptySelection(_)));
    }

    /// The nearest index globally minimises the distance to the target.
    #[test]
    fn nearest_index_minimises_distance(
        len in 1usize..40,
        start in -50.0..50.0f64,
        step in 0.05..2.0f64,
        target in -100.0..100.0f64,
    ) {
        let axis = sorted_axis(len, start, step);
        let idx = nearest_index(&axis, Some(target)).unwrap();
        for k in 0..len {
            prop_assert!(
                (axis[idx] - target).abs() <= (axis[k] - target).abs(),
                "index {} at {} beats chosen {} at {}",
                k, axis[k], idx, axis[idx]
            );
        }
    }

    /// Without a target the middle index is taken.
    #[test]
    fn default_slice_takes_the_middle(
        len in 1usize..40,
        start in -50.0..50.0f64,
        step in 0.05..2.0f64,
    ) {
        let axis = sorted_axis(len, start, step);
        prop_assert_eq!(nearest_index(&axis, None).unwrap(), len / 2);
    }
}

// ── Reduction Properties ─────────────────────────────────────────────

proptest! {
    /// A slice target and a range bound on the same axis always conflict.
    #[test]
    fn slice_and_range_on_same_axis_conflict(
        nx in 2usize..6,
        ny in 2usize..6,
        nz in 2usize..6,
        phase in 0.0..6.28f64,
        target in -10.0..10.0f64,
    ) {
        let grid = Grid::new(
            sorted_axis(nx, 0.0, 1.0),
            sorted_axis(ny, 0.0, 1.0),
            Some(sorted_axis(nz, 0.0, 1.0)),
        ).unwrap();
        let field = Field::Volume(wavy_volume(nx, ny, nz, phase));
        let region = Region {
            x: Some(AxisBound::new(0.0, nx as f64).unwrap()),
            ..Region::default()
        };
        let err = reduce(&field, &grid, &region, &Reduction::Slice {
            axis: Axis3::X,
            target: Some(target),
        }).unwrap_err();
        prop_assert!(matches!(err, PicError::ConflictingParameters(_)));
    }

    /// Summing all axes equals summing a partial reduction's output.
    #[test]
    fn sum_modes_agree_on_the_total(
        nx in 2usize..6,
        ny in 2usize..6,
        nz in 2usize..6,
        phase in 0.0..6.28f64,
        x_lo in 0usize..2,
        y_hi_back in 0usize..2,
    ) {
        let grid = Grid::new(
            sorted_axis(nx, -3.0, 0.5),
            sorted_axis(ny, 2.0, 0.25),
            Some(sorted_axis(nz, 0.0, 1.5)),
        ).unwrap();
        let field = Field::Volume(wavy_volume(nx, ny, nz, phase));
        let y_hi = ny - 1 - y_hi_back.min(ny - 2);
        let region = Region {
            x: Some(AxisBound::new(grid.x[x_lo.min(nx - 1)], grid.x[nx - 1]).unwrap()),
            y: Some(AxisBound::new(grid.y[0], grid.y[y_hi]).unwrap()),
            z: None,
        };

        let total = match reduce(&field, &grid, &region, &Reduction::Sum {
            axes: vec![Axis3::X, Axis3::Y, Axis3::Z],
        }).unwrap() {
            Reduced::Scalar(v) => v,
            other => panic!("Expected a scalar, got {other:?}"),
        };
        let plane_total = match reduce(&field, &grid, &region, &Reduction::Sum {
            axes: vec![Axis3::X],
        }).unwrap() {
            Reduced::Plane { values, .. } => values.sum(),
            other => panic!("Expected a plane, got {other:?}"),
        };
        let (restricted, _) = restrict(&field, &grid, &region).unwrap();
        let direct = restricted.as_volume().unwrap().sum();

        prop_assert!((total - plane_total).abs() < 1e-6);
        prop_assert!((total - direct).abs() < 1e-6);
    }
}

// ── Aperture Properties ──────────────────────────────────────────────

proptest! {
    /// Mask membership is exactly the strict disc test, cell by cell.
    #[test]
    fn circular_mask_matches_the_disc_test(
        ny in 1usize..12,
        nz in 1usize..12,
        y0 in -3.0..0.0f64,
        z0 in -2.0..0.0f64,
        radius in 0.0..4.0f64,
    ) {
        let y = sorted_axis(ny, y0, 0.4);
        let z = sorted_axis(nz, z0, 0.3);
        let mask = circular_mask(&y, &z, radius);
        for j in 0..ny {
            for k in 0..nz {
                let r2 = y[j] * y[j] + z[k] * z[k];
                prop_assert_eq!(mask[[j, k]], r2 < radius * radius);
            }
        }
    }
}

// ── Angular Momentum Properties ──────────────────────────────────────

proptest! {
    /// Weights alternating +w, -w sum to exactly zero, so the mean is
    /// exactly zero no matter what the momenta are.
    #[test]
    fn cancelling_weights_give_exact_zero_mean(
        pairs in 1usize..20,
        magnitude in 0.1..100.0f64,
        phase in 0.0..6.28f64,
    ) {
        let n = pairs * 2;
        let coords = |offset: f64| {
            Array1::from_shape_fn(n, |i| ((i as f64 + offset) * 0.7 + phase).sin() * 5.0)
        };
        let weights = Array1::from_shape_fn(n, |i| {
            if i % 2 == 0 { magnitude } else { -magnitude }
        });
        let set = ParticleSet::new(
            coords(0.0),
            coords(1.0),
            coords(2.0),
            coords(3.0),
            coords(4.0),
            Weight::Per(weights),
        ).unwrap();
        let summary = angular_momentum_x(&set, &Region::default()).unwrap();
        prop_assert_eq!(summary.mean, 0.0);
        prop_assert_eq!(summary.selected, n);
    }

    /// A uniform zero weight zeroes the total and the mean exactly.
    #[test]
    fn zero_uniform_weight_zeroes_everything(
        n in 1usize..40,
        phase in 0.0..6.28f64,
    ) {
        let coords = |offset: f64| {
            Array1::from_shape_fn(n, |i| ((i as f64 + offset) * 0.9 + phase).cos() * 8.0)
        };
        let set = ParticleSet::new(
            coords(0.0),
            coords(1.0),
            coords(2.0),
            coords(3.0),
            coords(4.0),
            Weight::Uniform(0.0),
        ).unwrap();
        let summary = angular_momentum_x(&set, &Region::default()).unwrap();
        prop_assert_eq!(summary.total, 0.0);
        prop_assert_eq!(summary.mean, 0.0);
    }
}

// ── Spectrum Rebinning Properties ────────────────────────────────────

proptest! {
    /// Merging keeps len/step bins and conserves the counts it covers.
    #[test]
    fn merge_conserves_covered_counts(
        len in 2usize..80,
        step in 1usize..8,
        e0 in 0.0..5.0f64,
        de in 0.01..2.0f64,
        phase in 0.0..6.28f64,
    ) {
        prop_assume!(len / step >= 2);
        let energy = sorted_axis(len, e0, de);
        let counts = Array1::from_shape_fn(len, |i| {
            (i as f64 * 0.31 + phase).sin() * 50.0 + 60.0
        });
        let merged = merge_bins(&energy, &counts, step).unwrap();

        let groups = len / step;
        prop_assert_eq!(merged.energy_mev.len(), groups);
        prop_assert_eq!(merged.counts.len(), groups);

        let covered: f64 = counts.iter().take(groups * step).sum();
        prop_assert!((merged.counts.sum() - covered).abs() < 1e-6);
        prop_assert!(merged.bin_width_mev > 0.0);
    }

    /// With a uniform axis the merged width is step times the spacing.
    #[test]
    fn uniform_axis_width_scales_with_step(
        groups in 2usize..12,
        step in 1usize..8,
        de in 0.01..2.0f64,
    ) {
        let len = groups * step;
        let energy = sorted_axis(len, 0.0, de);
        let counts = Array1::from_elem(len, 1.0);
        let merged = merge_bins(&energy, &counts, step).unwrap();
        prop_assert!((merged.bin_width_mev - de * step as f64).abs() < 1e-9);
    }
}
