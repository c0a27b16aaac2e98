//! FilmScribe types.

use serde::{Deserialize, Serialize};

/// One cut in a FilmScribe sequence.
///
/// Created during parse, mutated exactly once by the locator-matching
/// pass (`vfx_notes` / `vfx_shot_code` / `vfx_description`), then
/// read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmScribeEvent {
    pub event_number: i64,
    /// "Cut", etc.
    pub event_type: String,
    /// Length in frames.
    pub length: i64,

    /// Master (record/sequence) timecodes.
    pub record_in: String,
    pub record_out: String,
    pub record_in_frame: i64,
    pub record_out_frame: i64,

    /// Source clip identity, when the export carries it.
    pub clip_name: Option<String>,
    pub tape_name: Option<String>,
    pub tape_id: Option<String>,
    pub source_in: Option<String>,
    pub source_out: Option<String>,

    pub scene: Option<String>,
    pub take: Option<String>,
    pub camera: Option<String>,
    pub comments: Option<String>,

    /// Texts of every locator that landed inside this event.
    pub vfx_notes: Vec<String>,
    /// Shot code from the first matched VFX-coded locator, e.g. `44_0010`.
    pub vfx_shot_code: Option<String>,
    /// Description part of that first locator.
    pub vfx_description: Option<String>,
}

impl FilmScribeEvent {
    /// Whether the clip name is usable (present and not an "Opt..."
    /// optical placeholder).
    pub fn has_real_clip(&self) -> bool {
        matches!(&self.clip_name, Some(name) if !name.starts_with("Opt"))
    }
}

/// One VFX marker from a `<Comment Type="Locator">` block.
/// Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmScribeLocator {
    pub timecode: String,
    pub frame: i64,
    /// Raw marker text.
    pub text: String,
    pub clip_name: Option<String>,
    pub color: Option<String>,
    /// Source TC from `<Source><Timecode Type="Start TC">`.
    pub source_timecode: Option<String>,
    /// Camera letter derived from the clip-name prefix.
    pub camera: Option<String>,
    /// Scene number as matched from `VFX_<scene>_<sequence>` text.
    pub vfx_scene: Option<String>,
    pub vfx_sequence: Option<String>,
    /// `<scene>_<sequence>`, digits kept as matched.
    pub vfx_shot_code: Option<String>,
    pub vfx_description: Option<String>,
}

impl FilmScribeLocator {
    pub fn has_real_clip(&self) -> bool {
        matches!(&self.clip_name, Some(name) if !name.starts_with("Opt"))
    }
}

/// Parsed FilmScribe document plus matching stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmScribeParseResult {
    pub title: String,
    pub tracks: String,
    pub event_count: usize,
    pub edit_rate: f64,
    pub master_duration: Option<String>,

    pub events: Vec<FilmScribeEvent>,
    pub locators: Vec<FilmScribeLocator>,

    pub events_with_clips: usize,
    /// Events (or, in marker-only exports, locators) that will become shots.
    pub events_with_vfx: usize,
    pub total_vfx_markers: usize,
    pub matched_vfx_markers: usize,

    pub warnings: Vec<String>,
}
