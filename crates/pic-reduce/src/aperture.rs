// ─────────────────────────────────────────────────────────────────────
// PIC Post — Aperture Masking
// ─────────────────────────────────────────────────────────────────────
//! Circular-aperture reduction: collapse a volume to a profile along x
//! by summing, per x slab, only the cells inside a transverse disc.

use ndarray::{Array1, Array2, Array3};
use pic_types::error::{PicError, PicResult};

/// Boolean disc mask over the transverse (y, z) plane. A cell is
/// inside when y^2 + z^2 < radius^2; cells exactly on the rim are
/// excluded.
pub fn circular_mask(y: &Array1<f64>, z: &Array1<f64>, radius: f64) -> Array2<bool> {
    let r2 = radius * radius;
    Array2::from_shape_fn((y.len(), z.len()), |(j, k)| y[j] * y[j] + z[k] * z[k] < r2)
}

/// Sum each x slab of `values` over the cells picked by `mask`,
/// producing a profile along x. The mask must match the transverse
/// plane of the volume and select at least one cell.
pub fn aperture_profile(values: &Array3<f64>, mask: &Array2<bool>) -> PicResult<Array1<f64>> {
    let (nx, ny, nz) = values.dim();
    if mask.dim() != (ny, nz) {
        return Err(PicError::DimensionMismatch(format!(
            "aperture mask is {:?} but the transverse plane is ({ny}, {nz})",
            mask.dim()
        )));
    }
    if !mask.iter().any(|&inside| inside) {
        return Err(PicError::EmptySelection(
            "aperture mask selects no cells".to_string(),
        ));
    }

    let mut profile = Array1::zeros(nx);
    for (i, slab) in values.outer_iter().enumerate() {
        let mut total = 0.0;
        for j in 0..ny {
            for k in 0..nz {
                if mask[[j, k]] {
                    total += slab[[j, k]];
                }
            }
        }
        profile[i] = total;
    }
    Ok(profile)
}
