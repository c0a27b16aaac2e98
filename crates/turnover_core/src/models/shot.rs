//! The canonical per-shot record.

use serde::{Deserialize, Serialize};

/// One normalized editorial event, ready for export or reconciliation.
///
/// Every ingest path (FilmScribe, xmeml, markers) can produce this shape,
/// and every deliverable exporter consumes it. Fields the source format
/// did not carry stay `None`; exporters substitute documented placeholders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Shot {
    /// Caller-assigned identity (used to key synthetic file nodes in FCP
    /// XML output). Empty until assigned upstream.
    pub id: String,
    /// VFX shot code, e.g. `044_0010`.
    pub code: String,
    /// Source clip name, e.g. `A023_A003_1006NV`.
    pub clip_name: Option<String>,
    /// Reel identity for EDL output.
    pub reel_name: Option<String>,
    /// Source (camera media) in point.
    pub source_in: Option<String>,
    /// Source out point.
    pub source_out: Option<String>,
    /// Record (edited timeline) in point.
    pub record_in: Option<String>,
    /// Record out point.
    pub record_out: Option<String>,
    /// Cut length in frames.
    pub duration_frames: Option<i64>,
    pub scene: Option<String>,
    pub take: Option<String>,
    /// Camera letter (A, B, ...) when known.
    pub camera: Option<String>,
    pub camera_roll: Option<String>,
    /// Turnover notes attached to this shot.
    pub notes: Option<String>,
    /// Media path for FCP XML file references.
    pub file_path: Option<String>,
}

impl Shot {
    /// Create a shot with only its code set.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    /// Clip name, falling back to the shot code.
    pub fn clip_or_code(&self) -> &str {
        self.clip_name.as_deref().unwrap_or(&self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_or_code() {
        let mut shot = Shot::new("010_0010");
        assert_eq!(shot.clip_or_code(), "010_0010");
        shot.clip_name = Some("A001_C002".to_string());
        assert_eq!(shot.clip_or_code(), "A001_C002");
    }
}
