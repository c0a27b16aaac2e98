//! EDL event and parse-result records.

use serde::{Deserialize, Serialize};

/// Frame Code Mode from the `FCM:` header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Fcm {
    DropFrame,
    NonDropFrame,
    Unknown,
}

impl std::fmt::Display for Fcm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fcm::DropFrame => write!(f, "DROP FRAME"),
            Fcm::NonDropFrame => write!(f, "NON-DROP FRAME"),
            Fcm::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// One EDL event: the numbered line plus any comment lines that follow it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdlEvent {
    pub event_number: i64,
    pub reel_name: String,
    /// `V`, `A`, `A2`, `AA`, `B`, or `AA/V`.
    pub track_type: String,
    /// `C` cut, `D` dissolve, `Wxxx` wipe, `K`/`KB`/`KO` key.
    pub edit_type: String,
    /// Frames, present for dissolves and wipes.
    pub transition_duration: Option<i64>,
    pub source_in: String,
    pub source_out: String,
    pub record_in: String,
    pub record_out: String,
    /// `* FROM CLIP NAME:` comment.
    pub clip_name: Option<String>,
    /// `* SOURCE FILE:` comment.
    pub source_file: Option<String>,
    /// All comment lines, with the leading `*` stripped.
    pub comments: Vec<String>,
    /// Source in/out as frame counts.
    pub frame_start: i64,
    pub frame_end: i64,
    pub duration_frames: i64,
}

impl EdlEvent {
    pub fn is_video(&self) -> bool {
        self.track_type == "V"
    }

    pub fn is_audio(&self) -> bool {
        self.track_type.starts_with('A')
    }
}

/// A line the parser could not classify.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseWarning {
    /// 1-based line number.
    pub line: usize,
    pub message: String,
    /// The offending line verbatim.
    pub raw: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdlParseResult {
    pub title: String,
    pub fcm: Fcm,
    pub events: Vec<EdlEvent>,
    pub warnings: Vec<ParseWarning>,
    pub total_events: usize,
    pub video_event_count: usize,
    pub audio_event_count: usize,
}

impl EdlParseResult {
    /// Only the video-track events, in list order.
    pub fn video_events(&self) -> impl Iterator<Item = &EdlEvent> {
        self.events.iter().filter(|e| e.is_video())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_type_helpers() {
        let mut event = EdlEvent {
            event_number: 1,
            reel_name: "A023".to_string(),
            track_type: "V".to_string(),
            edit_type: "C".to_string(),
            transition_duration: None,
            source_in: String::new(),
            source_out: String::new(),
            record_in: String::new(),
            record_out: String::new(),
            clip_name: None,
            source_file: None,
            comments: Vec::new(),
            frame_start: 0,
            frame_end: 0,
            duration_frames: 0,
        };
        assert!(event.is_video());
        event.track_type = "A2".to_string();
        assert!(event.is_audio());
        assert!(!event.is_video());
    }
}
