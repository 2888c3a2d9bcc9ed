//! Tracked-particle subset loading: positions to microns, momenta as
//! stored, per-particle weights when the dump carries them.

use crate::archive::Snapshot;
use log::debug;
use pic_reduce::particles::{ParticleSet, Weight};
use pic_types::constants::MICRON_M;
use pic_types::error::PicResult;
use pic_types::species::Species;
use pic_types::state::Axis3;

/// Load the tracked subset of a species. Positions convert to microns,
/// momenta stay in SI. A dump without a weight block gets a uniform
/// weight of 1.
pub fn load_particles(snap: &mut Snapshot, species: Species) -> PicResult<ParticleSet> {
    let x = snap
        .array1(&species.position_key(Axis3::X))?
        .mapv(|v| v / MICRON_M);
    let y = snap
        .array1(&species.position_key(Axis3::Y))?
        .mapv(|v| v / MICRON_M);
    let z = snap
        .array1(&species.position_key(Axis3::Z))?
        .mapv(|v| v / MICRON_M);
    let py = snap.array1(&species.momentum_key(Axis3::Y))?;
    let pz = snap.array1(&species.momentum_key(Axis3::Z))?;

    let weight = if snap.contains(&species.weight_key()) {
        Weight::Per(snap.array1(&species.weight_key())?)
    } else {
        debug!("no weight block for {species}, assuming unit weights");
        Weight::Uniform(1.0)
    };
    ParticleSet::new(x, y, z, py, pz, weight)
}
