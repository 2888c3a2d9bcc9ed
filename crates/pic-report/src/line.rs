// ─────────────────────────────────────────────────────────────────────
// PIC Post — Line Plots
// ─────────────────────────────────────────────────────────────────────
//! Profiles on linear axes and energy spectra on a logarithmic count
//! axis.

use crate::heatmap::render_err;
use crate::style::PlotStyle;
use ndarray::Array1;
use pic_types::error::{PicError, PicResult};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

fn padded(lo: f64, hi: f64) -> (f64, f64) {
    if hi > lo {
        (lo, hi)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

fn check_profile(x: &Array1<f64>, values: &Array1<f64>) -> PicResult<()> {
    if x.len() != values.len() {
        return Err(PicError::DimensionMismatch(format!(
            "profile has {} values on an axis of {}",
            values.len(),
            x.len()
        )));
    }
    if x.is_empty() {
        return Err(PicError::EmptySelection("nothing to draw".to_string()));
    }
    Ok(())
}

fn profile_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    x: &Array1<f64>,
    values: &Array1<f64>,
    style: &PlotStyle,
    title: &str,
    x_label: &str,
    y_label: &str,
) -> PicResult<()> {
    let (x_lo, x_hi) = padded(x[0], x[x.len() - 1]);
    let mut v_lo = f64::INFINITY;
    let mut v_hi = f64::NEG_INFINITY;
    for &v in values.iter() {
        if v < v_lo {
            v_lo = v;
        }
        if v > v_hi {
            v_hi = v;
        }
    }
    let (v_lo, v_hi) = padded(v_lo, v_hi);

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(style.margin)
        .x_label_area_size(40)
        .y_label_area_size(70);
    if !title.is_empty() {
        builder.caption(title, ("sans-serif", style.label_size + 4));
    }
    let mut chart = builder
        .build_cartesian_2d(x_lo..x_hi, v_lo..v_hi)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .label_style(("sans-serif", style.label_size))
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(
            x.iter().zip(values.iter()).map(|(&x, &v)| (x, v)),
            &BLUE,
        ))
        .map_err(render_err)?;
    Ok(())
}

/// Draw one profile over its coordinate axis.
pub fn render_profile(
    path: &Path,
    x: &Array1<f64>,
    values: &Array1<f64>,
    style: &PlotStyle,
    title: &str,
    x_label: &str,
    y_label: &str,
) -> PicResult<()> {
    check_profile(x, values)?;
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    profile_panel(&root, x, values, style, title, x_label, y_label)?;
    root.present().map_err(render_err)?;
    Ok(())
}

/// Two stacked profiles over one shared axis; the axis label sits on
/// the lower panel only.
#[allow(clippy::too_many_arguments)]
pub fn render_profile_pair(
    path: &Path,
    x: &Array1<f64>,
    top: &Array1<f64>,
    top_label: &str,
    bottom: &Array1<f64>,
    bottom_label: &str,
    style: &PlotStyle,
    title: &str,
    x_label: &str,
) -> PicResult<()> {
    check_profile(x, top)?;
    check_profile(x, bottom)?;
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let (upper, lower) = root.split_vertically(style.height / 2);
    profile_panel(&upper, x, top, style, title, "", top_label)?;
    profile_panel(&lower, x, bottom, style, "", x_label, bottom_label)?;
    root.present().map_err(render_err)?;
    Ok(())
}

/// Draw a rebinned spectrum as dN/dE against MeV with a logarithmic
/// count axis. Bins with no counts cannot sit on a log axis and are
/// dropped; explicit ranges clip the drawn bins the same way.
pub fn render_spectrum(
    path: &Path,
    energy_mev: &Array1<f64>,
    density: &Array1<f64>,
    style: &PlotStyle,
    title: &str,
    energy_range: Option<(f64, f64)>,
    density_range: Option<(f64, f64)>,
) -> PicResult<()> {
    if energy_mev.len() != density.len() {
        return Err(PicError::DimensionMismatch(format!(
            "spectrum has {} densities on an axis of {}",
            density.len(),
            energy_mev.len()
        )));
    }
    if energy_mev.is_empty() {
        return Err(PicError::EmptySelection("nothing to draw".to_string()));
    }

    let (e_lo, e_hi) = match energy_range {
        Some((lo, hi)) => {
            if !(lo < hi) {
                return Err(PicError::ConflictingParameters(format!(
                    "energy range [{lo}, {hi}] is not ordered"
                )));
            }
            (lo, hi)
        }
        None => padded(energy_mev[0], energy_mev[energy_mev.len() - 1]),
    };

    let points: Vec<(f64, f64)> = energy_mev
        .iter()
        .zip(density.iter())
        .map(|(&e, &d)| (e, d))
        .filter(|&(e, d)| d > 0.0 && e >= e_lo && e <= e_hi)
        .collect();
    if points.is_empty() {
        return Err(PicError::EmptySelection(
            "no positive counts inside the energy range".to_string(),
        ));
    }

    let (d_lo, d_hi) = match density_range {
        Some((lo, hi)) => {
            if !(0.0 < lo && lo < hi) {
                return Err(PicError::ConflictingParameters(format!(
                    "density range [{lo}, {hi}] must be positive and ordered"
                )));
            }
            (lo, hi)
        }
        None => {
            let mut lo = f64::INFINITY;
            let mut hi = f64::NEG_INFINITY;
            for &(_, d) in &points {
                if d < lo {
                    lo = d;
                }
                if d > hi {
                    hi = d;
                }
            }
            if hi > lo {
                (lo, hi)
            } else {
                (lo / 10.0, hi * 10.0)
            }
        }
    };

    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(style.margin)
        .caption(title, ("sans-serif", style.label_size + 4))
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(e_lo..e_hi, (d_lo..d_hi).log_scale())
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("energy (MeV)")
        .y_desc("dN/dE (1/MeV)")
        .label_style(("sans-serif", style.label_size))
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(points, &BLUE))
        .map_err(render_err)?;
    root.present().map_err(render_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_png(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("picpost_{tag}_{}_{nanos}.png", std::process::id()))
    }

    #[test]
    fn test_profile_writes_a_png() {
        let path = scratch_png("profile");
        let x = Array1::linspace(42.0, 50.0, 40);
        let values = x.mapv(|v| (v - 46.0) * (v - 46.0));
        render_profile(
            &path,
            &x,
            &values,
            &PlotStyle::density(),
            "aperture sum",
            "x (um)",
            "n_e (n_c)",
        )
        .unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_profile_pair_shares_the_axis() {
        let path = scratch_png("pair");
        let x: Array1<f64> = Array1::linspace(42.0, 50.0, 40);
        let top = x.mapv(|v| (v * 0.5).sin().abs());
        let bottom = x.mapv(|v| (v * 0.5).cos().abs() * 1e-13);
        render_profile_pair(
            &path,
            &x,
            &top,
            "n (n_c)",
            &bottom,
            "n E (arb. units)",
            &PlotStyle::density(),
            "aperture scan",
            "x (um)",
        )
        .unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_profile_length_mismatch_is_rejected() {
        let path = scratch_png("profile_bad");
        let x = Array1::linspace(0.0, 1.0, 5);
        let values = Array1::from_elem(4, 1.0);
        let err = render_profile(
            &path,
            &x,
            &values,
            &PlotStyle::density(),
            "bad",
            "x",
            "y",
        )
        .unwrap_err();
        assert!(matches!(err, PicError::DimensionMismatch(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_spectrum_drops_empty_bins_and_renders() {
        let path = scratch_png("spectrum");
        let energy = Array1::linspace(1.0, 80.0, 80);
        let density = Array1::from_shape_fn(80, |i| {
            if i % 7 == 0 {
                0.0
            } else {
                1e9 * (-(i as f64) / 20.0).exp()
            }
        });
        render_spectrum(
            &path,
            &energy,
            &density,
            &PlotStyle::density(),
            "photon spectrum",
            Some((1.0, 100.0)),
            Some((1.0, 1e12)),
        )
        .unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_spectrum_with_no_positive_counts_is_an_error() {
        let path = scratch_png("spectrum_zero");
        let energy = Array1::linspace(1.0, 10.0, 10);
        let density = Array1::from_elem(10, 0.0);
        let err = render_spectrum(
            &path,
            &energy,
            &density,
            &PlotStyle::density(),
            "empty",
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, PicError::EmptySelection(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_inverted_ranges_are_rejected() {
        let path = scratch_png("spectrum_range");
        let energy = Array1::linspace(1.0, 10.0, 10);
        let density = Array1::from_elem(10, 5.0);
        let err = render_spectrum(
            &path,
            &energy,
            &density,
            &PlotStyle::density(),
            "bad range",
            Some((100.0, 1.0)),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, PicError::ConflictingParameters(_)));

        let err = render_spectrum(
            &path,
            &energy,
            &density,
            &PlotStyle::density(),
            "bad range",
            None,
            Some((0.0, 1e12)),
        )
        .unwrap_err();
        assert!(matches!(err, PicError::ConflictingParameters(_)));
        assert!(!path.exists());
    }
}
