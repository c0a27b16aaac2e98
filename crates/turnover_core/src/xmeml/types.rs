//! xmeml clip and sequence records.

use serde::{Deserialize, Serialize};

use crate::cdl::CdlValues;

/// Which NLE wrote the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XmemlFormat {
    Premiere,
    Fcp7,
    Resolve,
    Unknown,
}

impl std::fmt::Display for XmemlFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            XmemlFormat::Premiere => write!(f, "premiere"),
            XmemlFormat::Fcp7 => write!(f, "fcp7"),
            XmemlFormat::Resolve => write!(f, "resolve"),
            XmemlFormat::Unknown => write!(f, "unknown"),
        }
    }
}

/// Basic Motion / Motion effect values. Fields default to the no-op
/// transform so a partially-specified effect still compares cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipTransform {
    /// Percentage, 100 = unscaled.
    pub scale: f64,
    /// Pixels from frame center.
    pub position_x: f64,
    pub position_y: f64,
    /// Degrees.
    pub rotation: f64,
}

impl Default for ClipTransform {
    fn default() -> Self {
        Self {
            scale: 100.0,
            position_x: 0.0,
            position_y: 0.0,
            rotation: 0.0,
        }
    }
}

impl ClipTransform {
    /// Whether any value departs from the no-op transform.
    pub fn is_reposition(&self) -> bool {
        self.scale != 100.0
            || self.position_x != 0.0
            || self.position_y != 0.0
            || self.rotation != 0.0
    }
}

/// Speed / time-remap effect values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipSpeed {
    /// 1.0 = 100%, 0.5 = half speed.
    pub speed_ratio: f64,
    pub reverse: bool,
    /// Variable (keyframed) speed.
    pub time_remapping: bool,
}

impl Default for ClipSpeed {
    fn default() -> Self {
        Self {
            speed_ratio: 1.0,
            reverse: false,
            time_remapping: false,
        }
    }
}

impl ClipSpeed {
    pub fn is_change(&self) -> bool {
        self.speed_ratio != 1.0 || self.reverse || self.time_remapping
    }
}

/// One clipitem from a video track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XmlClip {
    /// `id` attribute, or a synthesized `clip-N` when absent.
    pub id: String,
    /// Clip name as shown in the timeline (often the VFX shot name).
    pub name: String,
    pub source_file_name: Option<String>,
    pub source_file_path: Option<String>,

    /// Cut length in frames.
    pub duration: i64,
    /// Record timeline position (frames).
    pub start: i64,
    pub end: i64,
    /// Source in point (frames).
    pub in_point: i64,
    pub out_point: i64,
    pub source_timecode: Option<String>,
    pub source_timecode_frame: Option<i64>,
    pub fps: f64,

    pub scene: Option<String>,
    pub take: Option<String>,
    pub camera_roll: Option<String>,
    pub reel_name: Option<String>,
    pub label: Option<String>,
    pub description: Option<String>,

    pub transform: Option<ClipTransform>,
    pub has_reposition: bool,

    pub speed: Option<ClipSpeed>,
    pub has_speed_change: bool,

    pub cdl: Option<CdlValues>,
    /// True only when the clip carries a non-identity grade.
    pub has_cdl: bool,
}

/// One sequence and its video clips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XmlSequence {
    pub id: String,
    pub name: String,
    pub duration: i64,
    pub fps: f64,
    pub width: u32,
    pub height: u32,
    pub clips: Vec<XmlClip>,
}

/// Parse output with per-flag aggregate counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XmlParseResult {
    pub format: XmemlFormat,
    /// `version` attribute on the `xmeml` root.
    pub version: Option<String>,
    pub sequences: Vec<XmlSequence>,
    pub total_clips: usize,
    pub clips_with_reposition: usize,
    pub clips_with_speed_change: usize,
    pub clips_with_cdl: usize,
    pub warnings: Vec<String>,
}

impl XmlParseResult {
    pub(crate) fn empty(format: XmemlFormat) -> Self {
        Self {
            format,
            version: None,
            sequences: Vec::new(),
            total_clips: 0,
            clips_with_reposition: 0,
            clips_with_speed_change: 0,
            clips_with_cdl: 0,
            warnings: Vec::new(),
        }
    }

    /// Recompute the aggregate counts from the sequences.
    pub(crate) fn tally(&mut self) {
        self.total_clips = 0;
        self.clips_with_reposition = 0;
        self.clips_with_speed_change = 0;
        self.clips_with_cdl = 0;
        for seq in &self.sequences {
            self.total_clips += seq.clips.len();
            self.clips_with_reposition += seq.clips.iter().filter(|c| c.has_reposition).count();
            self.clips_with_speed_change +=
                seq.clips.iter().filter(|c| c.has_speed_change).count();
            self.clips_with_cdl += seq.clips.iter().filter(|c| c.has_cdl).count();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_default_is_not_reposition() {
        assert!(!ClipTransform::default().is_reposition());
        let mut t = ClipTransform::default();
        t.position_x = -12.0;
        assert!(t.is_reposition());
    }

    #[test]
    fn test_speed_change_detection() {
        assert!(!ClipSpeed::default().is_change());
        let remap = ClipSpeed {
            time_remapping: true,
            ..ClipSpeed::default()
        };
        assert!(remap.is_change());
    }
}
