// ─────────────────────────────────────────────────────────────────────
// PIC Post — Axis Bounds
// ─────────────────────────────────────────────────────────────────────
use ndarray::Array1;
use pic_types::error::{PicError, PicResult};
use pic_types::state::Axis3;

/// Inclusive coordinate range along one axis [um].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBound {
    lo: f64,
    hi: f64,
}

impl AxisBound {
    /// Ordered finite pair; both endpoints belong to the range.
    pub fn new(lo: f64, hi: f64) -> PicResult<Self> {
        if !lo.is_finite() || !hi.is_finite() {
            return Err(PicError::ConflictingParameters(format!(
                "range endpoints must be finite, got [{lo}, {hi}]"
            )));
        }
        if lo > hi {
            return Err(PicError::ConflictingParameters(format!(
                "range lower bound {lo} exceeds upper bound {hi}"
            )));
        }
        Ok(AxisBound { lo, hi })
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }
}

impl std::fmt::Display for AxisBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

/// Optional per-axis restriction of the simulation box. An absent
/// bound keeps the full axis extent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Region {
    pub x: Option<AxisBound>,
    pub y: Option<AxisBound>,
    pub z: Option<AxisBound>,
}

impl Region {
    pub fn bound(&self, axis: Axis3) -> Option<AxisBound> {
        match axis {
            Axis3::X => self.x,
            Axis3::Y => self.y,
            Axis3::Z => self.z,
        }
    }
}

/// Indices kept along an axis: every index without a bound, the
/// inclusive subset otherwise. A bound matching nothing is an error,
/// never a silent empty pass-through.
pub fn masked_indices(
    axis: &Array1<f64>,
    bound: Option<AxisBound>,
    id: Axis3,
) -> PicResult<Vec<usize>> {
    let kept: Vec<usize> = match bound {
        None => (0..axis.len()).collect(),
        Some(b) => axis
            .iter()
            .enumerate()
            .filter(|(_, &v)| b.contains(v))
            .map(|(i, _)| i)
            .collect(),
    };
    if kept.is_empty() {
        let detail = match bound {
            Some(b) => format!("no {id} coordinates inside {b}"),
            None => format!("{id} axis is empty"),
        };
        return Err(PicError::EmptySelection(detail));
    }
    Ok(kept)
}

/// Index of the axis point nearest to `target`, lowest index on ties.
/// Without a target the middle of the axis is used.
pub fn nearest_index(axis: &Array1<f64>, target: Option<f64>) -> PicResult<usize> {
    if axis.is_empty() {
        return Err(PicError::EmptySelection("axis is empty".to_string()));
    }
    let target = match target {
        None => return Ok(axis.len() / 2),
        Some(t) => t,
    };
    if !target.is_finite() {
        return Err(PicError::ConflictingParameters(format!(
            "slice coordinate must be finite, got {target}"
        )));
    }
    let mut best_idx = 0usize;
    let mut best_dist = f64::INFINITY;
    for (idx, &v) in axis.iter().enumerate() {
        let dist = (v - target).abs();
        if dist < best_dist {
            best_dist = dist;
            best_idx = idx;
        }
    }
    Ok(best_idx)
}
