// ─────────────────────────────────────────────────────────────────────
// PIC Post — Energy Distributions
// ─────────────────────────────────────────────────────────────────────
//! Binned energy-distribution loading. The dump stores the bin-centre
//! axis in joules; rebinning and plotting work in MeV.

use crate::archive::Snapshot;
use ndarray::Array1;
use pic_types::constants::MEV_J;
use pic_types::error::PicResult;
use pic_types::species::{DistChannel, Species};

/// Distribution histogram as dumped: bin-centre energies converted to
/// MeV, counts untouched.
#[derive(Debug, Clone)]
pub struct RawSpectrum {
    pub energy_mev: Array1<f64>,
    pub counts: Array1<f64>,
}

/// Load a species' binned energy distribution for one channel.
/// Spectral invariants (sorted axis, matching lengths) are enforced by
/// the rebinning step, not here.
pub fn load_spectrum(
    snap: &mut Snapshot,
    species: Species,
    channel: DistChannel,
) -> PicResult<RawSpectrum> {
    let energy_mev = snap
        .array1(&species.dist_axis_key(channel))?
        .mapv(|e| e / MEV_J);
    let counts = snap.array1(&species.dist_counts_key(channel))?;
    Ok(RawSpectrum { energy_mev, counts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray_npy::NpzWriter;
    use pic_types::error::PicError;
    use std::fs::File;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_npz(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("picpost_{tag}_{}_{nanos}.npz", std::process::id()))
    }

    #[test]
    fn test_energy_axis_converts_joules_to_mev() {
        let path = scratch_npz("distfn");
        let mut writer = NpzWriter::new(File::create(&path).unwrap());
        writer
            .add_array(
                "Grid_allenergy0_Photon",
                &Array1::from_vec(vec![1.6e-13, 3.2e-13, 4.8e-13]),
            )
            .unwrap();
        writer
            .add_array(
                "dist_fn_allenergy0_Photon",
                &Array1::from_vec(vec![5.0, 7.0, 2.0]),
            )
            .unwrap();
        writer.finish().unwrap();

        let mut snap = Snapshot::open(&path).unwrap();
        let spectrum = load_spectrum(&mut snap, Species::Photon, DistChannel::AllEnergy).unwrap();
        assert!((spectrum.energy_mev[0] - 1.0).abs() < 1e-10);
        assert!((spectrum.energy_mev[2] - 3.0).abs() < 1e-10);
        assert!((spectrum.counts[1] - 7.0).abs() < 1e-12);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_channel_picks_the_block_pair() {
        let path = scratch_npz("channel");
        let mut writer = NpzWriter::new(File::create(&path).unwrap());
        writer
            .add_array("Grid_en_Photon", &Array1::from_vec(vec![1.6e-13, 3.2e-13]))
            .unwrap();
        writer
            .add_array("dist_fn_en_Photon", &Array1::from_vec(vec![4.0, 9.0]))
            .unwrap();
        writer.finish().unwrap();

        let mut snap = Snapshot::open(&path).unwrap();
        let spectrum = load_spectrum(&mut snap, Species::Photon, DistChannel::En).unwrap();
        assert!((spectrum.counts[0] - 4.0).abs() < 1e-12);

        let err = load_spectrum(&mut snap, Species::Photon, DistChannel::AllEnergy).unwrap_err();
        assert!(matches!(err, PicError::MissingVariable { .. }));
        std::fs::remove_file(&path).ok();
    }
}
