// ─────────────────────────────────────────────────────────────────────
// PIC Post — Species and Variable Keys
// ─────────────────────────────────────────────────────────────────────
//! Snapshot variable vocabulary. Every name read from an archive is
//! built here from a closed set of species, components and channels,
//! so a typo or an unsupported species fails before any lookup.

use crate::error::{PicError, PicResult};
use crate::state::Axis3;
use serde::{Deserialize, Serialize};

/// Particle species tracked by the output blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Species {
    Photon,
    Electron,
}

impl Species {
    pub const ALL: [Species; 2] = [Species::Photon, Species::Electron];

    /// Species name as spelled in snapshot variable names.
    pub fn name(&self) -> &'static str {
        match self {
            Species::Photon => "Photon",
            Species::Electron => "Electron",
        }
    }

    /// Tracked-subset prefix of the per-particle dump blocks.
    pub fn subset(&self) -> &'static str {
        match self {
            Species::Photon => "subset_testp",
            Species::Electron => "subset_teste",
        }
    }

    /// Parse a user-supplied species name, naming the allowed set on
    /// failure.
    pub fn parse(name: &str) -> PicResult<Self> {
        for species in Self::ALL {
            if name.eq_ignore_ascii_case(species.name()) {
                return Ok(species);
            }
        }
        Err(PicError::InvalidSpecies {
            given: name.to_string(),
            allowed: Self::ALL.map(|s| s.name()).join(", "),
        })
    }

    pub fn density_key(&self) -> String {
        format!("Derived_Number_Density_{}", self.name())
    }

    pub fn energy_key(&self) -> String {
        format!("Derived_Average_Particle_Energy_{}", self.name())
    }

    /// Particle position component, stored per axis under the tracked
    /// subset grid block.
    pub fn position_key(&self, axis: Axis3) -> String {
        format!(
            "Grid_Particles_{}_{}_{}",
            self.subset(),
            self.name(),
            axis.name()
        )
    }

    /// Particle momentum component [kg m/s].
    pub fn momentum_key(&self, axis: Axis3) -> String {
        let component = match axis {
            Axis3::X => "Px",
            Axis3::Y => "Py",
            Axis3::Z => "Pz",
        };
        format!("Particles_{}_{}_{}", component, self.subset(), self.name())
    }

    pub fn weight_key(&self) -> String {
        format!("Particles_Weight_{}_{}", self.subset(), self.name())
    }

    /// Energy axis of a distribution-function block [J].
    pub fn dist_axis_key(&self, channel: DistChannel) -> String {
        format!("Grid_{}_{}", channel.name(), self.name())
    }

    /// Binned particle counts of a distribution-function block.
    pub fn dist_counts_key(&self, channel: DistChannel) -> String {
        format!("dist_fn_{}_{}", channel.name(), self.name())
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Electric or magnetic field component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldComponent {
    Ex,
    Ey,
    Ez,
    Bx,
    By,
    Bz,
}

impl FieldComponent {
    pub const ALL: [FieldComponent; 6] = [
        FieldComponent::Ex,
        FieldComponent::Ey,
        FieldComponent::Ez,
        FieldComponent::Bx,
        FieldComponent::By,
        FieldComponent::Bz,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FieldComponent::Ex => "Ex",
            FieldComponent::Ey => "Ey",
            FieldComponent::Ez => "Ez",
            FieldComponent::Bx => "Bx",
            FieldComponent::By => "By",
            FieldComponent::Bz => "Bz",
        }
    }

    pub fn parse(name: &str) -> PicResult<Self> {
        for component in Self::ALL {
            if name.eq_ignore_ascii_case(component.name()) {
                return Ok(component);
            }
        }
        Err(PicError::Config(format!(
            "unknown field component '{name}'; expected one of: Ex, Ey, Ez, Bx, By, Bz"
        )))
    }

    pub fn key(&self) -> String {
        match self {
            FieldComponent::Ex | FieldComponent::Ey | FieldComponent::Ez => {
                format!("Electric_Field_{}", self.name())
            }
            FieldComponent::Bx | FieldComponent::By | FieldComponent::Bz => {
                format!("Magnetic_Field_{}", self.name())
            }
        }
    }
}

impl std::fmt::Display for FieldComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Energy-distribution channel configured in the output deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistChannel {
    /// Cumulative spectrum over the whole box.
    AllEnergy,
    /// Per-dump spectrum of the tracked subset.
    En,
}

impl DistChannel {
    pub fn name(&self) -> &'static str {
        match self {
            DistChannel::AllEnergy => "allenergy0",
            DistChannel::En => "en",
        }
    }

    pub fn parse(name: &str) -> PicResult<Self> {
        match name {
            "allenergy0" => Ok(DistChannel::AllEnergy),
            "en" => Ok(DistChannel::En),
            other => Err(PicError::Config(format!(
                "unknown distribution channel '{other}'; expected 'allenergy0' or 'en'"
            ))),
        }
    }
}
