// ─────────────────────────────────────────────────────────────────────
// PIC Post — Spectrum Rebinning
// ─────────────────────────────────────────────────────────────────────
//! Rebinning of energy-distribution histograms into coarser bins and
//! the dN/dE density that reporting plots.

use ndarray::Array1;
use pic_types::error::{PicError, PicResult};

/// Spectrum after grouping consecutive bins.
#[derive(Debug, Clone)]
pub struct MergedSpectrum {
    /// Group-mean bin energies, MeV.
    pub energy_mev: Array1<f64>,
    /// Summed counts per merged bin.
    pub counts: Array1<f64>,
    /// Mean spacing of the merged energy axis, MeV.
    pub bin_width_mev: f64,
    /// Counts divided by the one mean width.
    pub density: Array1<f64>,
}

/// Merge `step` consecutive bins: energies average per group, counts
/// add. Bins that do not fill a whole group are dropped from the
/// high-energy end. The bin width is a single scalar, the mean spacing
/// of the merged axis, and dN/dE divides every merged count by that
/// one width. This treats the rebinned axis as uniform even when the
/// raw spacing is not; callers wanting per-bin widths must keep the
/// raw histogram.
pub fn merge_bins(
    energy_mev: &Array1<f64>,
    counts: &Array1<f64>,
    step: usize,
) -> PicResult<MergedSpectrum> {
    if step == 0 {
        return Err(PicError::ConflictingParameters(
            "merge factor must be at least 1".to_string(),
        ));
    }
    if energy_mev.len() != counts.len() {
        return Err(PicError::DimensionMismatch(format!(
            "energy axis has {} bins, counts have {}",
            energy_mev.len(),
            counts.len()
        )));
    }
    for i in 1..energy_mev.len() {
        if !(energy_mev[i] > energy_mev[i - 1]) {
            return Err(PicError::InvalidGrid(format!(
                "energy axis is not strictly increasing at bin {i}: {} then {}",
                energy_mev[i - 1],
                energy_mev[i]
            )));
        }
    }
    let merged = energy_mev.len() / step;
    if merged < 2 {
        return Err(PicError::EmptySelection(format!(
            "merging {} bins by {step} leaves {merged}, need at least 2 for a bin width",
            energy_mev.len()
        )));
    }

    let mut energy = Array1::zeros(merged);
    let mut total = Array1::zeros(merged);
    for g in 0..merged {
        let start = g * step;
        let mut e_sum = 0.0;
        let mut n_sum = 0.0;
        for i in start..start + step {
            e_sum += energy_mev[i];
            n_sum += counts[i];
        }
        energy[g] = e_sum / step as f64;
        total[g] = n_sum;
    }

    let mut spacing_sum = 0.0;
    for g in 1..merged {
        spacing_sum += energy[g] - energy[g - 1];
    }
    let width = spacing_sum / (merged - 1) as f64;
    let density = total.mapv(|n| n / width);

    Ok(MergedSpectrum {
        energy_mev: energy,
        counts: total,
        bin_width_mev: width,
        density,
    })
}
