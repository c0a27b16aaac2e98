//! Frame-accurate timecode arithmetic.
//!
//! Every interval comparison in the engine reduces to integer frame counts
//! at a fixed frame rate; there is no wall-clock concept anywhere.
//!
//! # Format Overview
//!
//! Timecodes are `HH:MM:SS:FF` quadruples. Drop-frame timecodes use `;` as
//! the frame separator (`HH:MM:SS;FF`) but are converted with non-drop
//! arithmetic throughout the engine, matching the editorial tools this
//! engine interoperates with.
//!
//! # Sentinel Behavior
//!
//! `timecode_to_frames` returns `0` for unparsable input (wrong segment
//! count, non-numeric segment) rather than failing. Callers must treat `0`
//! as "unparsable or zero" and log/skip accordingly; a single bad timecode
//! must never abort a whole import.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Strict textual timecode shape: `HH:MM:SS:FF` or `HH:MM:SS;FF`.
static TIMECODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}:\d{2}:\d{2}[:;]\d{2}$").expect("valid regex"));

/// A parsed timecode quadruple at a given frame rate.
///
/// Invariant: `0 <= frames < round(fps)` for values produced by
/// [`Timecode::from_frames`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timecode {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub frames: i64,
    /// Whether the textual form uses `;` before the frame field.
    pub drop_frame: bool,
}

impl Timecode {
    /// Parse a `HH:MM:SS:FF` / `HH:MM:SS;FF` string.
    ///
    /// Returns `None` for anything that does not match the strict shape.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !TIMECODE_RE.is_match(text) {
            return None;
        }
        let drop_frame = text.contains(';');
        let parts: Vec<i64> = text
            .split([':', ';'])
            .map(|p| p.parse().ok())
            .collect::<Option<Vec<_>>>()?;
        if parts.len() != 4 {
            return None;
        }
        Some(Self {
            hours: parts[0],
            minutes: parts[1],
            seconds: parts[2],
            frames: parts[3],
            drop_frame,
        })
    }

    /// Build a timecode from an absolute frame count.
    pub fn from_frames(frames: i64, fps: f64, drop_frame: bool) -> Self {
        let fpsi = nominal_fps(fps);
        let total_seconds = frames.div_euclid(fpsi);
        Self {
            hours: total_seconds / 3600,
            minutes: (total_seconds % 3600) / 60,
            seconds: total_seconds % 60,
            frames: frames.rem_euclid(fpsi),
            drop_frame,
        }
    }

    /// Absolute frame count at the given frame rate.
    ///
    /// Counts `round(fps)` frames per labeled second, the SMPTE
    /// convention even at NTSC rates, so this exactly inverts
    /// [`Timecode::from_frames`] at every rate.
    pub fn to_frames(&self, fps: f64) -> i64 {
        let seconds = self.hours * 3600 + self.minutes * 60 + self.seconds;
        seconds * nominal_fps(fps) + self.frames
    }
}

impl std::fmt::Display for Timecode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sep = if self.drop_frame { ';' } else { ':' };
        write!(
            f,
            "{:02}:{:02}:{:02}{}{:02}",
            self.hours, self.minutes, self.seconds, sep, self.frames
        )
    }
}

/// Integer frames-per-second used for quotient/remainder math.
fn nominal_fps(fps: f64) -> i64 {
    let rounded = fps.round() as i64;
    rounded.max(1)
}

/// Check a string against the strict `HH:MM:SS[:;]FF` shape.
pub fn is_valid_timecode(text: &str) -> bool {
    TIMECODE_RE.is_match(text)
}

/// Convert a timecode string to an absolute frame count.
///
/// Accepts `:`- or `;`-delimited quadruples. Malformed input yields `0`
/// (sentinel, not a valid timecode). Each labeled second counts
/// `round(fps)` frames, so NTSC rates round-trip through
/// [`frames_to_timecode`] exactly.
pub fn timecode_to_frames(tc: &str, fps: f64) -> i64 {
    let tc = tc.trim();
    if tc.is_empty() {
        return 0;
    }
    let parts: Vec<&str> = tc.split([':', ';']).collect();
    if parts.len() != 4 {
        return 0;
    }
    let mut values = [0i64; 4];
    for (i, part) in parts.iter().enumerate() {
        match part.trim().parse::<i64>() {
            Ok(v) => values[i] = v,
            Err(_) => return 0,
        }
    }
    let [hh, mm, ss, ff] = values;
    (hh * 3600 + mm * 60 + ss) * nominal_fps(fps) + ff
}

/// Format an absolute frame count as a timecode string.
pub fn frames_to_timecode(frames: i64, fps: f64, drop_frame: bool) -> String {
    Timecode::from_frames(frames, fps, drop_frame).to_string()
}

/// Closed-interval containment test on frame counts.
pub fn frame_in_range(frame: i64, start: i64, end: i64) -> bool {
    frame >= start && frame <= end
}
