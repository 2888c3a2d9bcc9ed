// ─────────────────────────────────────────────────────────────────────
// PIC Post — Snapshot Archives
// ─────────────────────────────────────────────────────────────────────
//! One open NPZ dump and name resolution for its stored variables.
//!
//! Multi-component blocks are stored one entry per component with the
//! component letter suffixed (`Grid_Grid_mid_x`); single-component
//! blocks keep the bare block name (`dist_fn_allenergy0_Photon`).
//! Entries may or may not carry the `.npy` extension depending on the
//! exporter, so lookups accept both.

use ndarray_npy::NpzReader;
use pic_types::error::{PicError, PicResult};
use std::fs::File;
use std::path::{Path, PathBuf};

pub struct Snapshot {
    path: PathBuf,
    npz: NpzReader<File>,
    names: Vec<String>,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("path", &self.path)
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

impl Snapshot {
    /// Open an archive and list its entries.
    pub fn open(path: impl AsRef<Path>) -> PicResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let mut npz = NpzReader::new(file).map_err(|e| {
            PicError::Snapshot(format!("cannot read '{}': {e}", path.display()))
        })?;
        let names = npz.names().map_err(|e| {
            PicError::Snapshot(format!("cannot list '{}': {e}", path.display()))
        })?;
        Ok(Snapshot { path, npz, names })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, key: &str) -> bool {
        self.resolve(key).is_some()
    }

    fn resolve(&self, key: &str) -> Option<String> {
        let with_ext = format!("{key}.npy");
        if self.names.iter().any(|n| *n == with_ext) {
            Some(with_ext)
        } else if self.names.iter().any(|n| n == key) {
            Some(key.to_string())
        } else {
            None
        }
    }

    fn stored_name(&self, key: &str) -> PicResult<String> {
        self.resolve(key).ok_or_else(|| PicError::MissingVariable {
            name: key.to_string(),
            archive: self.path.display().to_string(),
        })
    }

    pub fn array1(&mut self, key: &str) -> PicResult<ndarray::Array1<f64>> {
        let name = self.stored_name(key)?;
        self.npz
            .by_name::<ndarray::OwnedRepr<f64>, ndarray::Ix1>(&name)
            .map_err(|e| self.read_error(key, e))
    }

    pub fn array2(&mut self, key: &str) -> PicResult<ndarray::Array2<f64>> {
        let name = self.stored_name(key)?;
        self.npz
            .by_name::<ndarray::OwnedRepr<f64>, ndarray::Ix2>(&name)
            .map_err(|e| self.read_error(key, e))
    }

    pub fn array3(&mut self, key: &str) -> PicResult<ndarray::Array3<f64>> {
        let name = self.stored_name(key)?;
        self.npz
            .by_name::<ndarray::OwnedRepr<f64>, ndarray::Ix3>(&name)
            .map_err(|e| self.read_error(key, e))
    }

    fn read_error(&self, key: &str, e: ndarray_npy::ReadNpzError) -> PicError {
        PicError::Snapshot(format!(
            "variable '{key}' in '{}': {e}",
            self.path.display()
        ))
    }
}
