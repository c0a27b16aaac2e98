//! CMX 3600 EDL writer.

use crate::config::EngineConfig;
use crate::models::Shot;
use crate::timecode::frames_to_timecode;

/// Options for [`generate_edl`].
#[derive(Debug, Clone)]
pub struct EdlOptions {
    pub title: String,
    pub fps: f64,
    pub drop_frame: bool,
    /// Frames advanced per shot when a shot carries no record timecodes.
    pub record_stride: i64,
    /// Reel for shots with no reel, clip, or code identity.
    pub default_reel: String,
}

impl EdlOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fps: 24.0,
            drop_frame: false,
            record_stride: 100,
            default_reel: "AX".to_string(),
        }
    }

    pub fn from_config(title: impl Into<String>, config: &EngineConfig) -> Self {
        Self {
            title: title.into(),
            fps: config.fps,
            drop_frame: config.drop_frame,
            record_stride: config.record_stride,
            default_reel: config.default_reel.clone(),
        }
    }
}

/// Generate a cuts-only CMX 3600 EDL.
///
/// Each shot becomes one `V C` event. The reel field is the first 8
/// characters of reel name, clip name, or shot code, space-padded;
/// shots without record timecodes are laid out on a synthetic record
/// track advancing `record_stride` frames per event.
pub fn generate_edl(shots: &[Shot], options: &EdlOptions) -> String {
    let fps = options.fps;
    let df = options.drop_frame;
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("TITLE: {}", options.title));
    lines.push(format!(
        "FCM: {}",
        if df { "DROP FRAME" } else { "NON-DROP FRAME" }
    ));
    lines.push(String::new());

    let mut record_position = 0i64;
    for (index, shot) in shots.iter().enumerate() {
        let reel_source = shot
            .reel_name
            .as_deref()
            .or(shot.clip_name.as_deref())
            .unwrap_or_else(|| {
                if shot.code.is_empty() {
                    &options.default_reel
                } else {
                    &shot.code
                }
            });
        let reel = format!("{:<8}", truncate(reel_source, 8));

        let source_in = shot
            .source_in
            .clone()
            .unwrap_or_else(|| frames_to_timecode(0, fps, df));
        let source_out = shot
            .source_out
            .clone()
            .unwrap_or_else(|| frames_to_timecode(options.record_stride, fps, df));
        let record_in = shot
            .record_in
            .clone()
            .unwrap_or_else(|| frames_to_timecode(record_position, fps, df));
        let record_out = shot
            .record_out
            .clone()
            .unwrap_or_else(|| frames_to_timecode(record_position + options.record_stride, fps, df));

        lines.push(format!(
            "{:03}  {} V     C        {} {} {} {}",
            index + 1,
            reel,
            source_in,
            source_out,
            record_in,
            record_out
        ));

        let clip_comment = shot.clip_or_code();
        if !clip_comment.is_empty() {
            lines.push(format!("* FROM CLIP NAME: {}", clip_comment));
        }

        lines.push(String::new());
        record_position += options.record_stride;
    }

    lines.join("\n")
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_event_line() {
        let mut shot = Shot::new("010_0010");
        shot.source_in = Some("01:00:00:00".to_string());
        shot.source_out = Some("01:00:04:00".to_string());
        shot.record_in = Some("10:00:00:00".to_string());
        shot.record_out = Some("10:00:04:00".to_string());

        let edl = generate_edl(&[shot], &EdlOptions::new("TEST"));
        assert!(edl.contains(
            "001  010_0010 V     C        01:00:00:00 01:00:04:00 10:00:00:00 10:00:04:00"
        ));
        assert!(edl.contains("* FROM CLIP NAME: 010_0010"));
    }

    #[test]
    fn test_header() {
        let edl = generate_edl(&[], &EdlOptions::new("R3_VFX_PULL"));
        assert!(edl.starts_with("TITLE: R3_VFX_PULL\nFCM: NON-DROP FRAME\n"));

        let mut options = EdlOptions::new("DF");
        options.drop_frame = true;
        assert!(generate_edl(&[], &options).contains("FCM: DROP FRAME"));
    }

    #[test]
    fn test_reel_padding_and_truncation() {
        let mut shot = Shot::new("044_0010");
        shot.reel_name = Some("A023".to_string());
        let edl = generate_edl(&[shot], &EdlOptions::new("T"));
        assert!(edl.contains("001  A023     V"));

        let mut long = Shot::new("044_0020");
        long.reel_name = Some("A023_A003_1006NV".to_string());
        let edl = generate_edl(&[long], &EdlOptions::new("T"));
        assert!(edl.contains("001  A023_A00 V"));
    }

    #[test]
    fn test_default_reel_for_anonymous_shot() {
        let edl = generate_edl(&[Shot::new("")], &EdlOptions::new("T"));
        assert!(edl.contains("001  AX       V"));
        assert!(!edl.contains("FROM CLIP NAME"));
    }

    #[test]
    fn test_synthetic_record_track_stride() {
        let shots = vec![Shot::new("044_0010"), Shot::new("044_0020")];
        let edl = generate_edl(&shots, &EdlOptions::new("T"));
        // First shot at 0, second advanced by the 100-frame stride.
        assert!(edl.contains("00:00:00:00 00:00:04:04 00:00:00:00 00:00:04:04"));
        assert!(edl.contains("00:00:00:00 00:00:04:04 00:00:04:04 00:00:08:08"));
    }

    #[test]
    fn test_events_round_trip_through_parser() {
        let mut shot = Shot::new("010_0010");
        shot.reel_name = Some("A023".to_string());
        shot.clip_name = Some("A023_A003_1006NV".to_string());
        shot.source_in = Some("10:22:15:00".to_string());
        shot.source_out = Some("10:22:19:00".to_string());
        shot.record_in = Some("01:00:00:00".to_string());
        shot.record_out = Some("01:00:04:00".to_string());

        let edl = generate_edl(&[shot], &EdlOptions::new("T"));
        let parsed = crate::edl::parse_edl(&edl, 24.0);
        assert_eq!(parsed.total_events, 1);
        let event = &parsed.events[0];
        assert_eq!(event.reel_name, "A023");
        assert_eq!(event.clip_name.as_deref(), Some("A023_A003_1006NV"));
        assert_eq!(event.duration_frames, 96);
    }
}
