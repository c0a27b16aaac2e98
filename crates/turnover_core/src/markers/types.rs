//! Marker list types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One row of a tab-delimited Avid marker export.
///
/// Immutable once created; consumed by the matching pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerEntry {
    /// Free-text VFX identifier, e.g. `VFX_41_0010`.
    pub id: String,
    /// Timecode text, e.g. `03:00:45:12`.
    pub timecode: String,
    /// Track label, e.g. `V1`.
    pub track: String,
    /// Marker color.
    pub color: String,
    /// Full note text.
    pub note: String,
    /// Timecode converted to an absolute frame count.
    pub frames: i64,
}

/// Result of parsing a marker export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkerParseResult {
    pub markers: Vec<MarkerEntry>,
    /// Line-numbered complaints for rows that were dropped.
    pub warnings: Vec<String>,
}

/// Result of matching markers against shot record ranges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkerMatchResult {
    /// Shot code -> matched notes, newline-joined when a shot collects
    /// several markers.
    pub matches: BTreeMap<String, String>,
    pub matched_count: usize,
    /// Markers whose frame fell inside no shot's record range.
    pub unmatched_markers: Vec<MarkerEntry>,
}
