// ─────────────────────────────────────────────────────────────────────
// PIC Post — Config
// ─────────────────────────────────────────────────────────────────────
use crate::error::{PicError, PicResult};
use serde::{Deserialize, Serialize};

/// Aperture scan configuration: the circular-mask radius and the x
/// windows searched for density and energy-density peaks. One JSON
/// file per target geometry lives under configs/.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApertureConfig {
    /// Circular aperture radius in the transverse (y, z) plane [um].
    #[serde(default = "default_radius_um")]
    pub radius_um: f64,
    /// Peak search windows along x, each [min, max] in um.
    pub windows: Vec<[f64; 2]>,
    /// Stem for the emitted CSV and plot files.
    #[serde(default = "default_output_stem")]
    pub output_stem: String,
}

fn default_radius_um() -> f64 {
    0.5
}

fn default_output_stem() -> String {
    "aperture".to_string()
}

impl ApertureConfig {
    /// Load and validate a scan configuration from a JSON file.
    pub fn from_file(path: &str) -> PicResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PicResult<()> {
        if !self.radius_um.is_finite() || self.radius_um <= 0.0 {
            return Err(PicError::Config(format!(
                "aperture radius must be finite and > 0, got {}",
                self.radius_um
            )));
        }
        if self.windows.is_empty() {
            return Err(PicError::Config(
                "aperture scan needs at least one x window".to_string(),
            ));
        }
        for (i, w) in self.windows.iter().enumerate() {
            if !w[0].is_finite() || !w[1].is_finite() || w[0] > w[1] {
                return Err(PicError::Config(format!(
                    "window {i} is not an ordered finite pair: [{}, {}]",
                    w[0], w[1]
                )));
            }
        }
        Ok(())
    }
}
