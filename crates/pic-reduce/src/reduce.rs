// ─────────────────────────────────────────────────────────────────────
// PIC Post — Range Reduction Engine
// ─────────────────────────────────────────────────────────────────────
//! Restriction and rank reduction of gridded fields. Every entry point
//! is a pure function of its inputs; results carry the coordinate
//! subsets they correspond to.

use crate::bound::{masked_indices, nearest_index, Region};
use ndarray::{Array1, Array2, Axis};
use pic_types::error::{PicError, PicResult};
use pic_types::state::{Axis3, Field, Grid};

/// Rank-reduction mode. Exactly one mode per call; supplying both a
/// slice coordinate and a range for the same axis is a conflict.
#[derive(Debug, Clone, PartialEq)]
pub enum Reduction {
    /// Extract the slab nearest to `target` along `axis` (rank - 1).
    /// Without a target the middle of the axis is taken.
    Slice { axis: Axis3, target: Option<f64> },
    /// Sum over the listed axes after restricting every axis to its
    /// optional range (rank - number of summed axes).
    Sum { axes: Vec<Axis3> },
    /// Mean and population variance over the restricted region.
    Stats,
}

/// Slice provenance: the collapsed axis, the index taken and the
/// coordinate actually hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collapse {
    pub axis: Axis3,
    pub index: usize,
    pub coord: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionStats {
    pub mean: f64,
    pub variance: f64,
    pub count: usize,
}

/// Reduction result with the surviving coordinate axes.
#[derive(Debug, Clone)]
pub enum Reduced {
    Plane {
        axes: (Axis3, Axis3),
        coords: (Array1<f64>, Array1<f64>),
        values: Array2<f64>,
        collapse: Option<Collapse>,
    },
    Profile {
        axis: Axis3,
        coord: Array1<f64>,
        values: Array1<f64>,
        collapse: Option<Collapse>,
    },
    Scalar(f64),
    Stats(RegionStats),
}

/// Restrict a field and its grid to the given region. Bounds are
/// inclusive; an absent bound keeps the axis whole; a bound matching
/// no coordinates is an empty-selection error.
pub fn restrict(field: &Field, grid: &Grid, region: &Region) -> PicResult<(Field, Grid)> {
    field.check_grid(grid)?;
    match field {
        Field::Plane(values) => {
            if region.z.is_some() {
                return Err(PicError::DimensionMismatch(
                    "z range supplied for a 2D field".to_string(),
                ));
            }
            let xi = masked_indices(&grid.x, region.x, Axis3::X)?;
            let yi = masked_indices(&grid.y, region.y, Axis3::Y)?;
            let sub = values.select(Axis(0), &xi).select(Axis(1), &yi);
            let grid = Grid::new(
                grid.x.select(Axis(0), &xi),
                grid.y.select(Axis(0), &yi),
                None,
            )?;
            Ok((Field::Plane(sub), grid))
        }
        Field::Volume(values) => {
            let z = grid.require_z()?;
            let xi = masked_indices(&grid.x, region.x, Axis3::X)?;
            let yi = masked_indices(&grid.y, region.y, Axis3::Y)?;
            let zi = masked_indices(z, region.z, Axis3::Z)?;
            let sub = values
                .select(Axis(0), &xi)
                .select(Axis(1), &yi)
                .select(Axis(2), &zi);
            let grid = Grid::new(
                grid.x.select(Axis(0), &xi),
                grid.y.select(Axis(0), &yi),
                Some(z.select(Axis(0), &zi)),
            )?;
            Ok((Field::Volume(sub), grid))
        }
    }
}

/// Reduce a field over its grid: restrict by region, then collapse
/// according to the mode.
pub fn reduce(field: &Field, grid: &Grid, region: &Region, mode: &Reduction) -> PicResult<Reduced> {
    field.check_grid(grid)?;
    match mode {
        Reduction::Slice { axis, target } => reduce_slice(field, grid, region, *axis, *target),
        Reduction::Sum { axes } => reduce_sum(field, grid, region, axes),
        Reduction::Stats => region_stats(field, grid, region).map(Reduced::Stats),
    }
}

fn reduce_slice(
    field: &Field,
    grid: &Grid,
    region: &Region,
    axis: Axis3,
    target: Option<f64>,
) -> PicResult<Reduced> {
    if region.bound(axis).is_some() {
        return Err(PicError::ConflictingParameters(format!(
            "both a slice coordinate and a range were given for the {axis} axis"
        )));
    }
    match field {
        Field::Plane(values) => {
            let kept = match axis {
                Axis3::X => Axis3::Y,
                Axis3::Y => Axis3::X,
                Axis3::Z => {
                    return Err(PicError::DimensionMismatch(
                        "cannot slice a 2D field along z".to_string(),
                    ))
                }
            };
            let coord = grid.axis(axis)?;
            let idx = nearest_index(coord, target)?;
            let collapse = Collapse {
                axis,
                index: idx,
                coord: coord[idx],
            };
            let lane = values.index_axis(Axis(axis.index()), idx).to_owned();
            let kept_axis = grid.axis(kept)?;
            let ki = masked_indices(kept_axis, region.bound(kept), kept)?;
            Ok(Reduced::Profile {
                axis: kept,
                coord: kept_axis.select(Axis(0), &ki),
                values: lane.select(Axis(0), &ki),
                collapse: Some(collapse),
            })
        }
        Field::Volume(values) => {
            let coord = grid.axis(axis)?;
            let idx = nearest_index(coord, target)?;
            let collapse = Collapse {
                axis,
                index: idx,
                coord: coord[idx],
            };
            let (a, b) = match axis {
                Axis3::X => (Axis3::Y, Axis3::Z),
                Axis3::Y => (Axis3::X, Axis3::Z),
                Axis3::Z => (Axis3::X, Axis3::Y),
            };
            let plane = values.index_axis(Axis(axis.index()), idx).to_owned();
            let a_axis = grid.axis(a)?;
            let b_axis = grid.axis(b)?;
            let ai = masked_indices(a_axis, region.bound(a), a)?;
            let bi = masked_indices(b_axis, region.bound(b), b)?;
            Ok(Reduced::Plane {
                axes: (a, b),
                coords: (a_axis.select(Axis(0), &ai), b_axis.select(Axis(0), &bi)),
                values: plane.select(Axis(0), &ai).select(Axis(1), &bi),
                collapse: Some(collapse),
            })
        }
    }
}

fn reduce_sum(field: &Field, grid: &Grid, region: &Region, axes: &[Axis3]) -> PicResult<Reduced> {
    if axes.is_empty() {
        return Err(PicError::ConflictingParameters(
            "summation needs at least one axis".to_string(),
        ));
    }
    for (i, axis) in axes.iter().enumerate() {
        if axes[..i].contains(axis) {
            return Err(PicError::ConflictingParameters(format!(
                "axis {axis} listed twice in summation"
            )));
        }
        if axis.index() >= field.ndim() {
            return Err(PicError::DimensionMismatch(format!(
                "cannot sum a {}D field along {axis}",
                field.ndim()
            )));
        }
    }

    let (sub, sub_grid) = restrict(field, grid, region)?;
    let sum_x = axes.contains(&Axis3::X);
    let sum_y = axes.contains(&Axis3::Y);
    let sum_z = axes.contains(&Axis3::Z);

    match sub {
        Field::Plane(v) => {
            if sum_x && sum_y {
                Ok(Reduced::Scalar(v.sum()))
            } else if sum_x {
                Ok(Reduced::Profile {
                    axis: Axis3::Y,
                    coord: sub_grid.y,
                    values: v.sum_axis(Axis(0)),
                    collapse: None,
                })
            } else {
                Ok(Reduced::Profile {
                    axis: Axis3::X,
                    coord: sub_grid.x,
                    values: v.sum_axis(Axis(1)),
                    collapse: None,
                })
            }
        }
        Field::Volume(v) => {
            let z_coord = sub_grid.require_z()?.clone();
            if sum_x && sum_y && sum_z {
                Ok(Reduced::Scalar(v.sum()))
            } else if sum_y && sum_z {
                Ok(Reduced::Profile {
                    axis: Axis3::X,
                    coord: sub_grid.x,
                    values: v.sum_axis(Axis(2)).sum_axis(Axis(1)),
                    collapse: None,
                })
            } else if sum_x && sum_z {
                Ok(Reduced::Profile {
                    axis: Axis3::Y,
                    coord: sub_grid.y,
                    values: v.sum_axis(Axis(2)).sum_axis(Axis(0)),
                    collapse: None,
                })
            } else if sum_x && sum_y {
                Ok(Reduced::Profile {
                    axis: Axis3::Z,
                    coord: z_coord,
                    values: v.sum_axis(Axis(1)).sum_axis(Axis(0)),
                    collapse: None,
                })
            } else if sum_x {
                Ok(Reduced::Plane {
                    axes: (Axis3::Y, Axis3::Z),
                    coords: (sub_grid.y, z_coord),
                    values: v.sum_axis(Axis(0)),
                    collapse: None,
                })
            } else if sum_y {
                Ok(Reduced::Plane {
                    axes: (Axis3::X, Axis3::Z),
                    coords: (sub_grid.x, z_coord),
                    values: v.sum_axis(Axis(1)),
                    collapse: None,
                })
            } else {
                Ok(Reduced::Plane {
                    axes: (Axis3::X, Axis3::Y),
                    coords: (sub_grid.x, sub_grid.y),
                    values: v.sum_axis(Axis(2)),
                    collapse: None,
                })
            }
        }
    }
}

fn region_stats(field: &Field, grid: &Grid, region: &Region) -> PicResult<RegionStats> {
    let (sub, _) = restrict(field, grid, region)?;
    let (sum, count) = match &sub {
        Field::Plane(v) => (v.sum(), v.len()),
        Field::Volume(v) => (v.sum(), v.len()),
    };
    let mean = sum / count as f64;
    let mut sq_dev = 0.0;
    match &sub {
        Field::Plane(v) => {
            for &value in v.iter() {
                sq_dev += (value - mean) * (value - mean);
            }
        }
        Field::Volume(v) => {
            for &value in v.iter() {
                sq_dev += (value - mean) * (value - mean);
            }
        }
    }
    Ok(RegionStats {
        mean,
        variance: sq_dev / count as f64,
        count,
    })
}
