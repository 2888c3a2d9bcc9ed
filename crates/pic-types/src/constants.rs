// ─────────────────────────────────────────────────────────────────────
// PIC Post — Constants
// ─────────────────────────────────────────────────────────────────────
/// Critical electron density for an 800 nm drive laser (m^-3).
/// Number densities are normalized by this value on load.
pub const CRITICAL_DENSITY_M3: f64 = 0.17419597124e28;

/// Micrometre (m). Grid and particle coordinates are divided by this
/// on load so every spatial quantity downstream is in microns.
pub const MICRON_M: f64 = 1.0e-6;

/// MeV (J), in the 1.6e-13 shorthand used by the simulation decks.
pub const MEV_J: f64 = 1.6e-13;

/// Electron-volt (J), same shorthand.
pub const EV_J: f64 = 1.6e-19;
