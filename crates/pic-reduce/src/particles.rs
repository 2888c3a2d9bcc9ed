//! Weighted angular momentum about the x axis for tracked particle
//! subsets, with optional position-window selection.

use crate::bound::Region;
use log::debug;
use ndarray::Array1;
use pic_types::error::{PicError, PicResult};

/// Macro-particle statistical weight: one value for the whole subset,
/// or one value per particle.
#[derive(Debug, Clone)]
pub enum Weight {
    Uniform(f64),
    Per(Array1<f64>),
}

/// Tracked particle subset: positions in microns, momenta in SI.
#[derive(Debug, Clone)]
pub struct ParticleSet {
    pub x: Array1<f64>,
    pub y: Array1<f64>,
    pub z: Array1<f64>,
    pub py: Array1<f64>,
    pub pz: Array1<f64>,
    pub weight: Weight,
}

impl ParticleSet {
    pub fn new(
        x: Array1<f64>,
        y: Array1<f64>,
        z: Array1<f64>,
        py: Array1<f64>,
        pz: Array1<f64>,
        weight: Weight,
    ) -> PicResult<Self> {
        let n = x.len();
        for (name, len) in [
            ("y", y.len()),
            ("z", z.len()),
            ("py", py.len()),
            ("pz", pz.len()),
        ] {
            if len != n {
                return Err(PicError::DimensionMismatch(format!(
                    "particle array '{name}' has {len} entries, 'x' has {n}"
                )));
            }
        }
        if let Weight::Per(w) = &weight {
            if w.len() != n {
                return Err(PicError::DimensionMismatch(format!(
                    "weight array has {} entries, 'x' has {n}",
                    w.len()
                )));
            }
        }
        Ok(ParticleSet {
            x,
            y,
            z,
            py,
            pz,
            weight,
        })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Summary of the weighted Lx distribution over a selection. `min` and
/// `max` are of the weighted per-particle values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LxSummary {
    pub total: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub selected: usize,
}

/// Weighted angular momentum about x over the particles inside
/// `region`: Lx = (y pz - z py) w, summed over the selection. Window
/// bounds are inclusive; an absent bound keeps that axis open. The
/// mean divides the total by the summed weight, or is exactly 0.0 when
/// the weights sum to zero. Selecting no particles is an error.
pub fn angular_momentum_x(set: &ParticleSet, region: &Region) -> PicResult<LxSummary> {
    let mut keep = Vec::new();
    for i in 0..set.len() {
        let inside = region.x.map_or(true, |b| b.contains(set.x[i]))
            && region.y.map_or(true, |b| b.contains(set.y[i]))
            && region.z.map_or(true, |b| b.contains(set.z[i]));
        if inside {
            keep.push(i);
        }
    }
    if keep.is_empty() {
        return Err(PicError::EmptySelection(
            "no particles inside the position window".to_string(),
        ));
    }

    let mut total = 0.0;
    let mut total_weight = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &i in &keep {
        let w = match &set.weight {
            Weight::Uniform(w) => *w,
            Weight::Per(w) => w[i],
        };
        let lx = (set.y[i] * set.pz[i] - set.z[i] * set.py[i]) * w;
        total += lx;
        total_weight += w;
        if lx < min {
            min = lx;
        }
        if lx > max {
            max = lx;
        }
    }

    let (x_lo, x_hi) = extent(&set.x, &keep);
    let (y_lo, y_hi) = extent(&set.y, &keep);
    let (z_lo, z_hi) = extent(&set.z, &keep);
    debug!("selected {} of {} particles", keep.len(), set.len());
    debug!("x extent [{x_lo}, {x_hi}], y extent [{y_lo}, {y_hi}], z extent [{z_lo}, {z_hi}]");

    let mean = if total_weight != 0.0 {
        total / total_weight
    } else {
        0.0
    };
    Ok(LxSummary {
        total,
        mean,
        min,
        max,
        selected: keep.len(),
    })
}

fn extent(values: &Array1<f64>, idx: &[usize]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &i in idx {
        if values[i] < lo {
            lo = values[i];
        }
        if values[i] > hi {
            hi = values[i];
        }
    }
    (lo, hi)
}
