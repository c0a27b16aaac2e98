//! Editorial data distilled from an NLE sequence, and count-sheet rows.

use serde::{Deserialize, Serialize};

use crate::source_media::SourceMedia;

/// Reposition/speed/record data for one shot, as extracted from an xmeml
/// sequence. All fields optional; the `has_*` flags mean "non-trivial".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShotEditorialData {
    pub source_clip_name: Option<String>,
    pub source_tc_in: Option<String>,
    pub source_tc_out: Option<String>,

    pub has_reposition: bool,
    /// Uniform scale percentage (100 = no scale).
    pub repo_scale: Option<f64>,
    pub repo_scale_x: Option<f64>,
    pub repo_scale_y: Option<f64>,
    /// Pixels from center.
    pub repo_position_x: Option<f64>,
    pub repo_position_y: Option<f64>,
    /// Degrees.
    pub repo_rotation: Option<f64>,

    pub has_speed_change: bool,
    /// 1.0 = 100%, 0.5 = half speed.
    pub speed_ratio: Option<f64>,
    pub speed_reverse: bool,
    /// Variable speed (time remap).
    pub speed_time_remap: bool,

    pub record_tc_in: Option<String>,
    pub record_tc_out: Option<String>,
    pub record_frame_in: Option<i64>,
    pub record_frame_out: Option<i64>,
}

/// One row of a VFX count sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountSheetRow {
    pub shot_code: String,
    pub frame_in: i64,
    pub frame_out: i64,
    pub cut_length: i64,
    /// Cut length plus head/tail handles.
    pub comp_length: i64,
    /// e.g. "8+8".
    pub handles: String,
    pub source_clip: Option<String>,
    pub source_tc: Option<String>,
    pub has_reposition: bool,
    /// e.g. "110% @+20,+15".
    pub repo_summary: Option<String>,
    pub has_speed_change: bool,
    /// e.g. "50% (slow-mo)" or "RETIME (variable)".
    pub speed_summary: Option<String>,
    pub camera: Option<String>,
    pub lens: Option<String>,
    /// e.g. "23A T2".
    pub scene_take: Option<String>,
}

impl CountSheetRow {
    /// Build a count-sheet row from shot framing plus optional editorial
    /// data and linked source media.
    pub fn build(
        shot_code: &str,
        frame_in: i64,
        frame_out: i64,
        handle_head: i64,
        handle_tail: i64,
        editorial: Option<&ShotEditorialData>,
        media: Option<&SourceMedia>,
    ) -> Self {
        let cut_length = frame_out - frame_in;
        let comp_length = cut_length + handle_head + handle_tail;

        let repo_summary = editorial.and_then(repo_summary);
        let speed_summary = editorial.and_then(speed_summary);

        let scene_take = media.and_then(|sm| match (&sm.scene, &sm.take) {
            (Some(scene), Some(take)) => Some(format!("{} T{}", scene, take)),
            (Some(scene), None) => Some(scene.clone()),
            _ => None,
        });

        Self {
            shot_code: shot_code.to_string(),
            frame_in,
            frame_out,
            cut_length,
            comp_length,
            handles: format!("{}+{}", handle_head, handle_tail),
            source_clip: editorial
                .and_then(|e| e.source_clip_name.clone())
                .or_else(|| media.map(|sm| sm.clip_name.clone())),
            source_tc: editorial
                .and_then(|e| e.source_tc_in.clone())
                .or_else(|| media.and_then(|sm| sm.tc_in.clone())),
            has_reposition: editorial.map(|e| e.has_reposition).unwrap_or(false),
            repo_summary,
            has_speed_change: editorial.map(|e| e.has_speed_change).unwrap_or(false),
            speed_summary,
            camera: media.and_then(|sm| sm.camera.clone()),
            lens: media.and_then(|sm| sm.lens.clone()),
            scene_take,
        }
    }
}

/// "110% @+20,+15 rot 3°"; "REPO" when flagged but value-less.
fn repo_summary(ed: &ShotEditorialData) -> Option<String> {
    if !ed.has_reposition {
        return None;
    }
    let mut parts: Vec<String> = Vec::new();
    if let Some(scale) = ed.repo_scale {
        if scale != 100.0 {
            parts.push(format!("{}%", scale));
        }
    }
    let x = ed.repo_position_x.unwrap_or(0.0);
    let y = ed.repo_position_y.unwrap_or(0.0);
    if x != 0.0 || y != 0.0 {
        parts.push(format!(
            "@{}{},{}{}",
            if x >= 0.0 { "+" } else { "" },
            x,
            if y >= 0.0 { "+" } else { "" },
            y
        ));
    }
    if let Some(rotation) = ed.repo_rotation {
        if rotation != 0.0 {
            parts.push(format!("rot {}°", rotation));
        }
    }
    if parts.is_empty() {
        Some("REPO".to_string())
    } else {
        Some(parts.join(" "))
    }
}

/// "50% (slow-mo)", "150% (fast) REV", "RETIME (variable)".
fn speed_summary(ed: &ShotEditorialData) -> Option<String> {
    if !ed.has_speed_change {
        return None;
    }
    if ed.speed_time_remap {
        return Some("RETIME (variable)".to_string());
    }
    match ed.speed_ratio {
        Some(ratio) => {
            let pct = (ratio * 100.0).round() as i64;
            let label = if pct < 100 {
                " (slow-mo)"
            } else if pct > 100 {
                " (fast)"
            } else {
                ""
            };
            let mut summary = format!("{}%{}", pct, label);
            if ed.speed_reverse {
                summary.push_str(" REV");
            }
            Some(summary)
        }
        None => Some("SPEED".to_string()),
    }
}
