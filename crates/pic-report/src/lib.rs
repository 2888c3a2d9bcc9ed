//! Reporting for reduced PIC data: heatmaps of planes, line plots of
//! profiles and spectra, CSV peak tables. Styling travels as a value
//! with each call rather than process-wide state, so one run can mix
//! palettes without figures bleeding into each other.

pub mod heatmap;
pub mod line;
pub mod peaks;
pub mod style;
