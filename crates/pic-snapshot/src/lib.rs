//! Reading of EPOCH snapshot archives re-exported as NPZ files.
//!
//! One archive holds one output dump: grid midpoints, gridded variables,
//! tracked-particle subsets and binned energy distributions, all keyed
//! by the dump's block names. Loaders convert to the units the engine
//! works in (microns for positions, critical-density multiples for
//! electron density, MeV for spectral axes) and validate shapes before
//! anything reaches a reduction.

pub mod archive;
pub mod distfn;
pub mod fields;
pub mod particles;
pub mod series;
