// ─────────────────────────────────────────────────────────────────────
// PIC Post — State
// ─────────────────────────────────────────────────────────────────────
use crate::error::{PicError, PicResult};
use ndarray::{Array1, Array2, Array3};

/// Spatial axis of the simulation box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis3 {
    X,
    Y,
    Z,
}

impl Axis3 {
    /// Lowercase axis letter as it appears in snapshot variable names.
    pub fn name(&self) -> &'static str {
        match self {
            Axis3::X => "x",
            Axis3::Y => "y",
            Axis3::Z => "z",
        }
    }

    /// Position of this axis in field array shape order (x, y, z).
    pub fn index(&self) -> usize {
        match self {
            Axis3::X => 0,
            Axis3::Y => 1,
            Axis3::Z => 2,
        }
    }
}

impl std::fmt::Display for Axis3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rectilinear cell-midpoint grid in microns. `z` is absent for 2D runs.
#[derive(Debug, Clone)]
pub struct Grid {
    pub x: Array1<f64>,
    pub y: Array1<f64>,
    pub z: Option<Array1<f64>>,
}

impl Grid {
    /// Build a grid from midpoint axes, checking each axis is non-empty
    /// and strictly increasing. Range masking and nearest-coordinate
    /// lookups downstream rely on sorted axes.
    pub fn new(x: Array1<f64>, y: Array1<f64>, z: Option<Array1<f64>>) -> PicResult<Self> {
        check_axis(&x, Axis3::X)?;
        check_axis(&y, Axis3::Y)?;
        if let Some(z) = &z {
            check_axis(z, Axis3::Z)?;
        }
        Ok(Grid { x, y, z })
    }

    pub fn is_volume(&self) -> bool {
        self.z.is_some()
    }

    /// Number of spatial dimensions (2 or 3).
    pub fn ndim(&self) -> usize {
        if self.is_volume() {
            3
        } else {
            2
        }
    }

    /// Coordinate axis by identity. Asking a 2D grid for z is a
    /// dimension mismatch.
    pub fn axis(&self, axis: Axis3) -> PicResult<&Array1<f64>> {
        match axis {
            Axis3::X => Ok(&self.x),
            Axis3::Y => Ok(&self.y),
            Axis3::Z => self.require_z(),
        }
    }

    pub fn require_z(&self) -> PicResult<&Array1<f64>> {
        self.z.as_ref().ok_or_else(|| {
            PicError::DimensionMismatch("z axis requested from a 2D grid".to_string())
        })
    }
}

fn check_axis(axis: &Array1<f64>, id: Axis3) -> PicResult<()> {
    if axis.is_empty() {
        return Err(PicError::InvalidGrid(format!("{id} axis is empty")));
    }
    for i in 1..axis.len() {
        if !(axis[i] > axis[i - 1]) {
            return Err(PicError::InvalidGrid(format!(
                "{id} axis is not strictly increasing at index {i}: {} then {}",
                axis[i - 1],
                axis[i]
            )));
        }
    }
    Ok(())
}

/// Gridded physical field: a 2D plane for 2D runs, a 3D volume for 3D
/// runs. Shape order follows the axes (x, y[, z]).
#[derive(Debug, Clone)]
pub enum Field {
    Plane(Array2<f64>),
    Volume(Array3<f64>),
}

impl Field {
    pub fn ndim(&self) -> usize {
        match self {
            Field::Plane(_) => 2,
            Field::Volume(_) => 3,
        }
    }

    pub fn shape(&self) -> Vec<usize> {
        match self {
            Field::Plane(a) => a.shape().to_vec(),
            Field::Volume(a) => a.shape().to_vec(),
        }
    }

    pub fn as_plane(&self) -> PicResult<&Array2<f64>> {
        match self {
            Field::Plane(a) => Ok(a),
            Field::Volume(_) => Err(PicError::DimensionMismatch(
                "expected a 2D field, found a 3D volume".to_string(),
            )),
        }
    }

    pub fn as_volume(&self) -> PicResult<&Array3<f64>> {
        match self {
            Field::Volume(a) => Ok(a),
            Field::Plane(_) => Err(PicError::DimensionMismatch(
                "expected a 3D field, found a 2D plane".to_string(),
            )),
        }
    }

    /// Check the field shape against the grid axes.
    pub fn check_grid(&self, grid: &Grid) -> PicResult<()> {
        let expected: Vec<usize> = match &grid.z {
            Some(z) => vec![grid.x.len(), grid.y.len(), z.len()],
            None => vec![grid.x.len(), grid.y.len()],
        };
        let actual = self.shape();
        if actual != expected {
            return Err(PicError::DimensionMismatch(format!(
                "field shape {actual:?} does not match grid {expected:?}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2, Array3};

    #[test]
    fn test_grid_accepts_sorted_axes() {
        let grid = Grid::new(
            Array1::linspace(0.0, 9.0, 10),
            Array1::linspace(-4.0, 4.0, 9),
            Some(Array1::linspace(-2.0, 2.0, 5)),
        )
        .unwrap();
        assert!(grid.is_volume());
        assert_eq!(grid.ndim(), 3);
        assert_eq!(grid.axis(Axis3::Z).unwrap().len(), 5);
    }

    #[test]
    fn test_grid_rejects_unsorted_axis() {
        let err = Grid::new(
            Array1::from_vec(vec![0.0, 2.0, 1.0]),
            Array1::linspace(0.0, 1.0, 4),
            None,
        )
        .unwrap_err();
        match err {
            PicError::InvalidGrid(msg) => assert!(msg.contains("strictly increasing")),
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_grid_rejects_empty_axis() {
        let err = Grid::new(
            Array1::from_vec(vec![]),
            Array1::linspace(0.0, 1.0, 4),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, PicError::InvalidGrid(_)));
    }

    #[test]
    fn test_planar_grid_has_no_z() {
        let grid = Grid::new(
            Array1::linspace(0.0, 1.0, 4),
            Array1::linspace(0.0, 1.0, 4),
            None,
        )
        .unwrap();
        assert!(!grid.is_volume());
        assert!(grid.require_z().is_err());
    }

    #[test]
    fn test_field_shape_check() {
        let grid = Grid::new(
            Array1::linspace(0.0, 1.0, 4),
            Array1::linspace(0.0, 1.0, 3),
            Some(Array1::linspace(0.0, 1.0, 2)),
        )
        .unwrap();
        let good = Field::Volume(Array3::zeros((4, 3, 2)));
        assert!(good.check_grid(&grid).is_ok());

        let bad = Field::Volume(Array3::zeros((4, 2, 3)));
        assert!(matches!(
            bad.check_grid(&grid),
            Err(PicError::DimensionMismatch(_))
        ));

        let flat = Field::Plane(Array2::zeros((4, 3)));
        assert!(matches!(
            flat.check_grid(&grid),
            Err(PicError::DimensionMismatch(_))
        ));
    }
}
