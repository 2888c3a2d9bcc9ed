// ─────────────────────────────────────────────────────────────────────
// PIC Post — Shared Types
// ─────────────────────────────────────────────────────────────────────
pub mod config;
pub mod constants;
pub mod error;
pub mod species;
pub mod state;
