//! Tab-delimited marker list parser and marker/shot matching.
//!
//! # Format Overview
//!
//! One marker per line, tab-delimited:
//! ```text
//! VFX_41_0010\t03:00:45:12\tV1\tmagenta\tVFX_41_0010 - Remove rig top left\t1
//! ```
//! Columns: id, timecode, track, color, note, optional count. Some exports
//! lead with a header row naming the columns.

use crate::models::Shot;
use crate::timecode::{is_valid_timecode, timecode_to_frames};

use super::types::{MarkerEntry, MarkerMatchResult, MarkerParseResult};

/// Parse a marker export into entries plus warnings.
///
/// Deliberately permissive: a malformed row is recorded as a line-numbered
/// warning and skipped, never aborting the import. A first line that looks
/// like a header (mentions "timecode" or "marker") is skipped silently.
pub fn parse_marker_file(content: &str, fps: f64) -> MarkerParseResult {
    let mut result = MarkerParseResult::default();

    for (i, raw) in content.trim().split(['\n']).enumerate() {
        let line = raw.trim_end_matches('\r').trim();
        if line.is_empty() {
            continue;
        }

        if i == 0 {
            let lower = line.to_lowercase();
            if lower.contains("timecode") || lower.contains("marker") {
                continue;
            }
        }

        let parts: Vec<&str> = line.split('\t').collect();

        // Need at least id, timecode, track, color, note.
        if parts.len() < 5 {
            result.warnings.push(format!(
                "Line {}: Not enough columns (got {}, need 5+)",
                i + 1,
                parts.len()
            ));
            continue;
        }

        let timecode = parts[1].trim();
        if !is_valid_timecode(timecode) {
            result.warnings.push(format!(
                "Line {}: Invalid timecode format \"{}\"",
                i + 1,
                timecode
            ));
            continue;
        }

        result.markers.push(MarkerEntry {
            id: parts[0].trim().to_string(),
            timecode: timecode.to_string(),
            track: parts[2].trim().to_string(),
            color: parts[3].trim().to_string(),
            note: parts[4].trim().to_string(),
            frames: timecode_to_frames(timecode, fps),
        });
    }

    if !result.warnings.is_empty() {
        tracing::warn!(
            "Marker import dropped {} of {} rows",
            result.warnings.len(),
            result.warnings.len() + result.markers.len()
        );
    }

    result
}

/// Match markers to shots by record-timecode range.
///
/// A marker lands on the first shot (in slice order) whose
/// `[record_in, record_out)` frame interval contains it. Shots without a
/// record-in start at frame 0; shots without a record-out extend to the
/// end of time. Multiple markers on one shot concatenate their notes with
/// newlines.
pub fn match_markers_to_shots(
    markers: &[MarkerEntry],
    shots: &[Shot],
    fps: f64,
) -> MarkerMatchResult {
    struct Range<'a> {
        code: &'a str,
        start: i64,
        end: Option<i64>,
    }

    let ranges: Vec<Range> = shots
        .iter()
        .map(|shot| Range {
            code: &shot.code,
            start: shot
                .record_in
                .as_deref()
                .map(|tc| timecode_to_frames(tc, fps))
                .unwrap_or(0),
            end: shot
                .record_out
                .as_deref()
                .map(|tc| timecode_to_frames(tc, fps)),
        })
        .collect();

    let mut result = MarkerMatchResult::default();

    for marker in markers {
        let frame = if marker.frames != 0 {
            marker.frames
        } else {
            timecode_to_frames(&marker.timecode, fps)
        };

        let hit = ranges
            .iter()
            .find(|r| frame >= r.start && r.end.map(|end| frame < end).unwrap_or(true));

        match hit {
            Some(range) => {
                result
                    .matches
                    .entry(range.code.to_string())
                    .and_modify(|notes| {
                        notes.push('\n');
                        notes.push_str(&marker.note);
                    })
                    .or_insert_with(|| marker.note.clone());
            }
            None => result.unmatched_markers.push(marker.clone()),
        }
    }

    result.matched_count = markers.len() - result.unmatched_markers.len();
    result
}
