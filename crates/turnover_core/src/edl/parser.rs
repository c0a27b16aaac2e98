//! CMX 3600 EDL reader.
//!
//! # Format Overview
//!
//! ```text
//! TITLE: R3_VFX_PULL
//! FCM: NON-DROP FRAME
//!
//! 001  A023     V     C        10:22:15:00 10:22:19:00 01:00:00:00 01:00:04:00
//! * FROM CLIP NAME: A023_A003_1006NV
//! 002  B007     V     D    030 11:04:00:00 11:04:02:00 01:00:04:00 01:00:06:00
//! M2   B007     048.0          11:04:00:00
//! ```
//!
//! Event lines carry event number, reel, track, edit type (with an
//! optional transition duration), and four timecodes. `*` comment lines
//! attach to the preceding event; `M2` lines note motion effects.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::timecode::timecode_to_frames;

use super::types::{EdlEvent, EdlParseResult, Fcm, ParseWarning};

static EVENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d{3,6})\s+(\S+)\s+(V|A\d?|AA|B|AA/V)\s+(C|D|W\d{3}|K|KB|KO)\s*(\d{3})?\s+(\d{2}:\d{2}:\d{2}[:;]\d{2})\s+(\d{2}:\d{2}:\d{2}[:;]\d{2})\s+(\d{2}:\d{2}:\d{2}[:;]\d{2})\s+(\d{2}:\d{2}:\d{2}[:;]\d{2})",
    )
    .expect("valid regex")
});

static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^TITLE:\s*(.+)").expect("valid regex"));
static FCM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^FCM:\s*(DROP\s*FRAME|NON[\s-]*DROP\s*FRAME)").expect("valid regex")
});
static CLIP_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\*?\s*FROM CLIP NAME:\s*(.+)").expect("valid regex"));
static SOURCE_FILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\*?\s*SOURCE FILE:\s*(.+)").expect("valid regex"));

/// Parse a CMX 3600 EDL. Malformed lines never abort the parse; lines
/// that fail to classify after events begin become warnings.
pub fn parse_edl(content: &str, fps: f64) -> EdlParseResult {
    let mut title = String::new();
    let mut fcm = Fcm::Unknown;
    let mut events: Vec<EdlEvent> = Vec::new();
    let mut warnings: Vec<ParseWarning> = Vec::new();
    let mut current: Option<EdlEvent> = None;

    for (i, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim_end();
        let line_num = i + 1;

        if line.trim().is_empty() {
            continue;
        }

        if let Some(caps) = TITLE_RE.captures(line) {
            title = caps[1].trim().to_string();
            continue;
        }

        if let Some(caps) = FCM_RE.captures(line) {
            fcm = if caps[1].to_uppercase().contains("NON") {
                Fcm::NonDropFrame
            } else {
                Fcm::DropFrame
            };
            continue;
        }

        if let Some(caps) = EVENT_RE.captures(line) {
            if let Some(event) = current.take() {
                events.push(event);
            }

            let source_in = caps[6].to_string();
            let source_out = caps[7].to_string();
            let frame_start = timecode_to_frames(&source_in, fps);
            let frame_end = timecode_to_frames(&source_out, fps);

            current = Some(EdlEvent {
                event_number: caps[1].parse().unwrap_or(0),
                reel_name: caps[2].to_string(),
                track_type: caps[3].to_string(),
                edit_type: caps[4].to_string(),
                transition_duration: caps.get(5).and_then(|m| m.as_str().parse().ok()),
                source_in,
                source_out,
                record_in: caps[8].to_string(),
                record_out: caps[9].to_string(),
                clip_name: None,
                source_file: None,
                comments: Vec::new(),
                frame_start,
                frame_end,
                duration_frames: frame_end - frame_start,
            });
            continue;
        }

        if line.starts_with('*') || line.starts_with(">>>") {
            if let Some(event) = current.as_mut() {
                if let Some(caps) = CLIP_NAME_RE.captures(line) {
                    event.clip_name = Some(caps[1].trim().to_string());
                }
                if let Some(caps) = SOURCE_FILE_RE.captures(line) {
                    event.source_file = Some(caps[1].trim().to_string());
                }
                event
                    .comments
                    .push(line.trim_start_matches('*').trim().to_string());
            }
            continue;
        }

        // Motion memory (speed change) lines.
        if line.starts_with("M2") && line[2..].starts_with(char::is_whitespace) {
            if let Some(event) = current.as_mut() {
                event.comments.push(format!("Speed: {}", line.trim()));
            }
            continue;
        }

        // Header-area noise is fine; anything unrecognized once events
        // have started is worth flagging.
        if !events.is_empty() || current.is_some() {
            warnings.push(ParseWarning {
                line: line_num,
                message: "Unrecognized line format".to_string(),
                raw: line.to_string(),
            });
        }
    }

    if let Some(event) = current.take() {
        events.push(event);
    }

    if !warnings.is_empty() {
        tracing::warn!(
            "EDL parse flagged {} unrecognized lines in \"{}\"",
            warnings.len(),
            title
        );
    }

    let video_event_count = events.iter().filter(|e| e.is_video()).count();
    let audio_event_count = events.iter().filter(|e| e.is_audio()).count();

    EdlParseResult {
        title,
        fcm,
        total_events: events.len(),
        video_event_count,
        audio_event_count,
        events,
        warnings,
    }
}

/// Suggested shot code for the nth event of a sequence, numbered in
/// tens: `006_0010`, `006_0020`, ...
pub fn suggest_shot_code(sequence_code: &str, index: usize) -> String {
    format!("{}_{:04}", sequence_code, (index + 1) * 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "TITLE: R3_VFX_PULL\n\
FCM: NON-DROP FRAME\n\
\n\
001  A023     V     C        10:22:15:00 10:22:19:00 01:00:00:00 01:00:04:00\n\
* FROM CLIP NAME: A023_A003_1006NV\n\
* SOURCE FILE: A023_A003_1006NV.mov\n\
002  B007     V     D    030 11:04:00:00 11:04:02:00 01:00:04:00 01:00:06:00\n\
M2   B007     048.0          11:04:00:00\n\
003  SND01    A2    C        00:00:10:00 00:00:12:00 01:00:04:00 01:00:06:00\n";

    #[test]
    fn test_header() {
        let result = parse_edl(SAMPLE, 24.0);
        assert_eq!(result.title, "R3_VFX_PULL");
        assert_eq!(result.fcm, Fcm::NonDropFrame);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_events_and_counts() {
        let result = parse_edl(SAMPLE, 24.0);
        assert_eq!(result.total_events, 3);
        assert_eq!(result.video_event_count, 2);
        assert_eq!(result.audio_event_count, 1);
        assert_eq!(result.video_events().count(), 2);

        let first = &result.events[0];
        assert_eq!(first.event_number, 1);
        assert_eq!(first.reel_name, "A023");
        assert_eq!(first.edit_type, "C");
        assert_eq!(first.transition_duration, None);
        assert_eq!(first.source_in, "10:22:15:00");
        assert_eq!(first.record_out, "01:00:04:00");
        assert_eq!(first.duration_frames, 96);
    }

    #[test]
    fn test_comments_attach_to_preceding_event() {
        let result = parse_edl(SAMPLE, 24.0);
        let first = &result.events[0];
        assert_eq!(first.clip_name.as_deref(), Some("A023_A003_1006NV"));
        assert_eq!(first.source_file.as_deref(), Some("A023_A003_1006NV.mov"));
        assert_eq!(first.comments.len(), 2);

        let second = &result.events[1];
        assert_eq!(second.transition_duration, Some(30));
        assert_eq!(second.comments, vec!["Speed: M2   B007     048.0          11:04:00:00"]);
    }

    #[test]
    fn test_drop_frame_timecodes_accepted() {
        let content = "001  A023     V     C        10:22:15;00 10:22:19;00 01:00:00;00 01:00:04;00\n";
        let result = parse_edl(content, 29.97);
        assert_eq!(result.total_events, 1);
        assert_eq!(result.events[0].source_in, "10:22:15;00");
    }

    #[test]
    fn test_unrecognized_line_warns_only_after_events() {
        let noisy = format!("GARBAGE HEADER LINE\n{}\nnot an edl line\n", SAMPLE.trim_end());
        let result = parse_edl(&noisy, 24.0);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].raw, "not an edl line");
        assert_eq!(result.warnings[0].line, 11);
    }

    #[test]
    fn test_suggest_shot_code() {
        assert_eq!(suggest_shot_code("006", 0), "006_0010");
        assert_eq!(suggest_shot_code("006", 11), "006_0120");
    }
}
