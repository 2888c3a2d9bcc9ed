//! Range reduction for rectilinear PIC fields.
//!
//! One parameterized engine covers the recurring analysis shapes:
//! coordinate-range restriction, single-slice extraction, summation
//! over axes, region statistics, circular-aperture profiles, weighted
//! particle angular momentum and energy-spectrum bin merging.

pub mod aperture;
pub mod bound;
pub mod particles;
pub mod reduce;
pub mod spectrum;
