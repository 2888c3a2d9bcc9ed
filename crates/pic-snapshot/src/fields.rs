// ─────────────────────────────────────────────────────────────────────
// PIC Post — Gridded Variables
// ─────────────────────────────────────────────────────────────────────
//! Grid and gridded-variable loading with the unit conventions the
//! reductions expect: grid axes in microns, electron density in
//! multiples of the critical density, everything else as stored.

use crate::archive::Snapshot;
use pic_types::constants::{CRITICAL_DENSITY_M3, MICRON_M};
use pic_types::error::PicResult;
use pic_types::species::{FieldComponent, Species};
use pic_types::state::{Field, Grid};

/// Load the cell-midpoint grid, converting metres to microns. A
/// missing z axis marks a 2D run.
pub fn load_grid(snap: &mut Snapshot) -> PicResult<Grid> {
    let x = snap.array1("Grid_Grid_mid_x")?.mapv(|v| v / MICRON_M);
    let y = snap.array1("Grid_Grid_mid_y")?.mapv(|v| v / MICRON_M);
    let z = if snap.contains("Grid_Grid_mid_z") {
        Some(snap.array1("Grid_Grid_mid_z")?.mapv(|v| v / MICRON_M))
    } else {
        None
    };
    Grid::new(x, y, z)
}

/// Load a gridded variable by block name, matching the grid's
/// dimensionality and checking the shape against it.
pub fn load_variable(snap: &mut Snapshot, key: &str, grid: &Grid) -> PicResult<Field> {
    let field = if grid.is_volume() {
        Field::Volume(snap.array3(key)?)
    } else {
        Field::Plane(snap.array2(key)?)
    };
    field.check_grid(grid)?;
    Ok(field)
}

/// Number density of a species in multiples of the critical density.
pub fn load_density(snap: &mut Snapshot, species: Species, grid: &Grid) -> PicResult<Field> {
    let raw = load_variable(snap, &species.density_key(), grid)?;
    Ok(match raw {
        Field::Plane(v) => Field::Plane(v.mapv(|n| n / CRITICAL_DENSITY_M3)),
        Field::Volume(v) => Field::Volume(v.mapv(|n| n / CRITICAL_DENSITY_M3)),
    })
}

/// Cell-averaged particle energy of a species, joules as stored.
pub fn load_energy(snap: &mut Snapshot, species: Species, grid: &Grid) -> PicResult<Field> {
    load_variable(snap, &species.energy_key(), grid)
}

/// One electric or magnetic field component, SI units as stored.
pub fn load_component(
    snap: &mut Snapshot,
    component: FieldComponent,
    grid: &Grid,
) -> PicResult<Field> {
    load_variable(snap, &component.key(), grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2, Array3};
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

    fn micron_axis(values: &[f64]) -> Array1<f64> {
        Array1::from_vec(values.iter().map(|v| v * 1e-6).collect())
    }

    #[test]
    fn test_grid_converts_metres_to_microns() {
        let path = scratch_npz("grid3d");
        let mut writer = NpzWriter::new(File::create(&path).unwrap());
        writer
            .add_array("Grid_Grid_mid_x", &micron_axis(&[0.0, 1.0, 2.0]))
            .unwrap();
        writer
            .add_array("Grid_Grid_mid_y", &micron_axis(&[-1.0, 0.0]))
            .unwrap();
        writer
            .add_array("Grid_Grid_mid_z", &micron_axis(&[-0.5, 0.5]))
            .unwrap();
        writer.finish().unwrap();

        let mut snap = Snapshot::open(&path).unwrap();
        let grid = load_grid(&mut snap).unwrap();
        assert!(grid.is_volume());
        assert!((grid.x[2] - 2.0).abs() < 1e-10);
        assert!((grid.y[0] - (-1.0)).abs() < 1e-10);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_z_axis_means_a_2d_run() {
        let path = scratch_npz("grid2d");
        let mut writer = NpzWriter::new(File::create(&path).unwrap());
        writer
            .add_array("Grid_Grid_mid_x", &micron_axis(&[0.0, 1.0]))
            .unwrap();
        writer
            .add_array("Grid_Grid_mid_y", &micron_axis(&[0.0, 1.0, 2.0]))
            .unwrap();
        writer.finish().unwrap();

        let mut snap = Snapshot::open(&path).unwrap();
        let grid = load_grid(&mut snap).unwrap();
        assert!(!grid.is_volume());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_density_is_normalised_to_critical() {
        let path = scratch_npz("density");
        let mut writer = NpzWriter::new(File::create(&path).unwrap());
        writer
            .add_array("Grid_Grid_mid_x", &micron_axis(&[0.0, 1.0]))
            .unwrap();
        writer
            .add_array("Grid_Grid_mid_y", &micron_axis(&[0.0, 1.0]))
            .unwrap();
        writer
            .add_array(
                "Derived_Number_Density_Electron",
                &Array2::from_elem((2, 2), CRITICAL_DENSITY_M3 * 0.5),
            )
            .unwrap();
        writer.finish().unwrap();

        let mut snap = Snapshot::open(&path).unwrap();
        let grid = load_grid(&mut snap).unwrap();
        let density = load_density(&mut snap, Species::Electron, &grid).unwrap();
        let plane = density.as_plane().unwrap();
        assert!((plane[[0, 0]] - 0.5).abs() < 1e-12);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_energy_keeps_joules() {
        let path = scratch_npz("energy");
        let mut writer = NpzWriter::new(File::create(&path).unwrap());
        writer
            .add_array("Grid_Grid_mid_x", &micron_axis(&[0.0, 1.0]))
            .unwrap();
        writer
            .add_array("Grid_Grid_mid_y", &micron_axis(&[0.0, 1.0]))
            .unwrap();
        writer
            .add_array("Grid_Grid_mid_z", &micron_axis(&[0.0, 1.0]))
            .unwrap();
        writer
            .add_array(
                "Derived_Average_Particle_Energy_Photon",
                &Array3::from_elem((2, 2, 2), 3.2e-13),
            )
            .unwrap();
        writer.finish().unwrap();

        let mut snap = Snapshot::open(&path).unwrap();
        let grid = load_grid(&mut snap).unwrap();
        let energy = load_energy(&mut snap, Species::Photon, &grid).unwrap();
        let volume = energy.as_volume().unwrap();
        assert!((volume[[1, 1, 1]] - 3.2e-13).abs() < 1e-25);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_variable_shape_must_match_the_grid() {
        let path = scratch_npz("shape");
        let mut writer = NpzWriter::new(File::create(&path).unwrap());
        writer
            .add_array("Grid_Grid_mid_x", &micron_axis(&[0.0, 1.0, 2.0]))
            .unwrap();
        writer
            .add_array("Grid_Grid_mid_y", &micron_axis(&[0.0, 1.0]))
            .unwrap();
        writer
            .add_array("Electric_Field_Ex", &Array2::<f64>::zeros((2, 2)))
            .unwrap();
        writer.finish().unwrap();

        let mut snap = Snapshot::open(&path).unwrap();
        let grid = load_grid(&mut snap).unwrap();
        let err = load_component(&mut snap, FieldComponent::Ex, &grid).unwrap_err();
        assert!(matches!(err, PicError::DimensionMismatch(_)));
        std::fs::remove_file(&path).ok();
    }
}
