//! Axial peak scans over aperture profiles and their CSV table.

use ndarray::Array1;
use pic_reduce::bound::{masked_indices, AxisBound};
use pic_types::error::{PicError, PicResult};
use pic_types::state::Axis3;
use std::io::Write;
use std::path::Path;

/// Peak readings of both profiles inside one axial window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakRow {
    pub x_min: f64,
    pub x_max: f64,
    pub x_peak_density: f64,
    pub density_max: f64,
    pub x_peak_energy_density: f64,
    pub energy_density_max: f64,
}

/// Locate, per window, the maximum of the density and energy-density
/// profiles. Ties take the lowest-x cell. A window containing no grid
/// cells is an error.
pub fn scan_peaks(
    x: &Array1<f64>,
    density: &Array1<f64>,
    energy_density: &Array1<f64>,
    windows: &[AxisBound],
) -> PicResult<Vec<PeakRow>> {
    if density.len() != x.len() || energy_density.len() != x.len() {
        return Err(PicError::DimensionMismatch(format!(
            "profiles of {} and {} values on an axis of {}",
            density.len(),
            energy_density.len(),
            x.len()
        )));
    }
    let mut rows = Vec::with_capacity(windows.len());
    for window in windows {
        let idx = masked_indices(x, Some(*window), Axis3::X)?;
        let (di, dv) = peak(density, &idx);
        let (ei, ev) = peak(energy_density, &idx);
        rows.push(PeakRow {
            x_min: window.lo(),
            x_max: window.hi(),
            x_peak_density: x[di],
            density_max: dv,
            x_peak_energy_density: x[ei],
            energy_density_max: ev,
        });
    }
    Ok(rows)
}

fn peak(values: &Array1<f64>, idx: &[usize]) -> (usize, f64) {
    let mut best = idx[0];
    for &i in &idx[1..] {
        if values[i] > values[best] {
            best = i;
        }
    }
    (best, values[best])
}

/// Write the scan as CSV under the header
/// `x_min,x_max,x_peak_ne,ne_max,x_peak_nE,nE_max`.
pub fn write_peak_csv(path: &Path, rows: &[PeakRow]) -> PicResult<()> {
    let mut out = std::fs::File::create(path)?;
    writeln!(out, "x_min,x_max,x_peak_ne,ne_max,x_peak_nE,nE_max")?;
    for row in rows {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            row.x_min,
            row.x_max,
            row.x_peak_density,
            row.density_max,
            row.x_peak_energy_density,
            row.energy_density_max
        )?;
    }
    Ok(())
}
