// ─────────────────────────────────────────────────────────────────────
// PIC Post — Heatmaps
// ─────────────────────────────────────────────────────────────────────
//! Filled-cell maps of reduced planes, with a colourbar strip on the
//! right keyed to the data range.

use crate::style::PlotStyle;
use ndarray::{Array1, Array2};
use pic_types::error::{PicError, PicResult};
use plotters::prelude::*;
use std::path::Path;

pub(crate) fn render_err<E: std::fmt::Display>(e: E) -> PicError {
    PicError::Render(e.to_string())
}

pub(crate) fn filled(color: RGBColor) -> ShapeStyle {
    ShapeStyle {
        color: color.into(),
        filled: true,
        stroke_width: 0,
    }
}

/// Normalised position of `value` between `lo` and `hi`; the midpoint
/// when the range is flat.
fn unit_pos(value: f64, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        (value - lo) / (hi - lo)
    } else {
        0.5
    }
}

fn spacing(axis: &Array1<f64>) -> f64 {
    if axis.len() > 1 {
        axis[1] - axis[0]
    } else {
        1.0
    }
}

/// Draw a reduced plane as a heatmap. `values` is indexed `[i, j]`
/// with `i` running along `horizontal`. The colour range spans the
/// data; a flat plane renders in the palette midpoint.
#[allow(clippy::too_many_arguments)]
pub fn render_heatmap(
    path: &Path,
    horizontal: &Array1<f64>,
    vertical: &Array1<f64>,
    values: &Array2<f64>,
    style: &PlotStyle,
    title: &str,
    h_label: &str,
    v_label: &str,
) -> PicResult<()> {
    if values.dim() != (horizontal.len(), vertical.len()) {
        return Err(PicError::DimensionMismatch(format!(
            "plane is {:?} but the axes are ({}, {})",
            values.dim(),
            horizontal.len(),
            vertical.len()
        )));
    }
    if horizontal.is_empty() || vertical.is_empty() {
        return Err(PicError::EmptySelection(
            "no cells to draw".to_string(),
        ));
    }

    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in values.iter() {
        if v < lo {
            lo = v;
        }
        if v > hi {
            hi = v;
        }
    }

    let root = BitMapBackend::new(path, (style.width + style.colorbar_width, style.height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let (plot, bar) = root.split_horizontally(style.width);

    let sx = spacing(horizontal);
    let sy = spacing(vertical);
    let mut chart = ChartBuilder::on(&plot)
        .margin(style.margin)
        .caption(title, ("sans-serif", style.label_size + 4))
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(
            horizontal[0] - sx / 2.0..horizontal[horizontal.len() - 1] + sx / 2.0,
            vertical[0] - sy / 2.0..vertical[vertical.len() - 1] + sy / 2.0,
        )
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc(h_label)
        .y_desc(v_label)
        .label_style(("sans-serif", style.label_size))
        .draw()
        .map_err(render_err)?;

    let area = chart.plotting_area();
    for (i, &x) in horizontal.iter().enumerate() {
        for (j, &y) in vertical.iter().enumerate() {
            let color = style.color(unit_pos(values[[i, j]], lo, hi));
            area.draw(&Rectangle::new(
                [(x - sx / 2.0, y - sy / 2.0), (x + sx / 2.0, y + sy / 2.0)],
                filled(color),
            ))
            .map_err(render_err)?;
        }
    }

    draw_colorbar(style, lo, hi, ChartBuilder::on(&bar))?;
    root.present().map_err(render_err)?;
    Ok(())
}

fn draw_colorbar<DB: DrawingBackend>(
    style: &PlotStyle,
    lo: f64,
    hi: f64,
    mut builder: ChartBuilder<DB>,
) -> PicResult<()> {
    // a flat range still needs a drawable span
    let (lo, hi) = if hi > lo { (lo, hi) } else { (lo - 0.5, lo + 0.5) };
    let mut chart = builder
        .margin_top(style.margin)
        .margin_bottom(style.margin)
        .x_label_area_size(0)
        .y_label_area_size(0)
        .right_y_label_area_size(55)
        .build_cartesian_2d(0.0..1.0, lo..hi)
        .map_err(render_err)?
        .set_secondary_coord(0.0..1.0, lo..hi);

    chart
        .configure_secondary_axes()
        .label_style(("sans-serif", style.label_size))
        .draw()
        .map_err(render_err)?;

    let area = chart.plotting_area();
    let step = (hi - lo) / 256.0;
    for band in 0..256 {
        let base = lo + step * band as f64;
        let color = style.color(unit_pos(base + step / 2.0, lo, hi));
        area.draw(&Rectangle::new([(0.0, base), (1.0, base + step)], filled(color)))
            .map_err(render_err)?;
    }
    Ok(())
}
