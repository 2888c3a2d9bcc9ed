// ─────────────────────────────────────────────────────────────────────
// PIC Post — Plot Style
// ─────────────────────────────────────────────────────────────────────
//! Figure styling as a plain value. Presets cover the two palettes the
//! analyses use: a sequential one for densities and spectra, and a
//! diverging one for signed field components.

use colorous::Gradient;
use plotters::style::RGBColor;

#[derive(Clone, Copy)]
pub struct PlotStyle {
    pub gradient: Gradient,
    /// Sample the gradient back to front.
    pub reversed: bool,
    pub width: u32,
    pub height: u32,
    pub colorbar_width: u32,
    pub label_size: u32,
    pub margin: u32,
}

impl PlotStyle {
    /// Sequential white-to-red palette for nonnegative data.
    pub fn density() -> Self {
        PlotStyle {
            gradient: colorous::ORANGE_RED,
            reversed: false,
            ..Self::base()
        }
    }

    /// Diverging palette for signed fields, blue negative to red
    /// positive.
    pub fn diverging() -> Self {
        PlotStyle {
            gradient: colorous::RED_BLUE,
            reversed: true,
            ..Self::base()
        }
    }

    fn base() -> Self {
        PlotStyle {
            gradient: colorous::ORANGE_RED,
            reversed: false,
            width: 860,
            height: 640,
            colorbar_width: 90,
            label_size: 16,
            margin: 10,
        }
    }

    /// Palette colour at a normalised position `t` in [0, 1].
    pub fn color(&self, t: f64) -> RGBColor {
        let t = t.clamp(0.0, 1.0);
        let t = if self.reversed { 1.0 - t } else { t };
        let (r, g, b) = self.gradient.eval_continuous(t).as_tuple();
        RGBColor(r, g, b)
    }
}
