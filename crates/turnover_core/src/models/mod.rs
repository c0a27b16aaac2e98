//! Data models for the editorial-interchange engine.
//!
//! - `Shot` — the canonical per-shot record every parser converges on and
//!   every exporter consumes
//! - `ShotEditorialData` — reposition/speed/record data distilled from an
//!   NLE sequence
//! - `CountSheetRow` — per-shot summary for VFX count sheets

mod editorial;
mod shot;

pub use editorial::{CountSheetRow, ShotEditorialData};
pub use shot::Shot;
