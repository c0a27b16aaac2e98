//! FilmScribe → [`Shot`] conversion.

use crate::models::Shot;
use crate::timecode::timecode_to_frames;

use super::types::FilmScribeParseResult;

/// Convert a parsed FilmScribe list into shots.
///
/// Two list styles exist in the wild:
/// 1. Events carry real clip names — one shot per event that also has a
///    matched VFX code.
/// 2. Events carry no clips (or only `Opt*` placeholders) — fall back to
///    the locators themselves, recovering record-out and duration from
///    the enclosing event.
pub fn filmscribe_to_shots(result: &FilmScribeParseResult) -> Vec<Shot> {
    if result.events.iter().any(|e| e.has_real_clip()) {
        return result
            .events
            .iter()
            .filter(|e| e.has_real_clip() && e.vfx_shot_code.is_some())
            .map(|event| {
                let mut shot = Shot::new(event.vfx_shot_code.clone().unwrap_or_default());
                shot.clip_name = event.clip_name.clone();
                shot.camera_roll = event.tape_id.clone().or_else(|| event.tape_name.clone());
                shot.source_in = event.source_in.clone();
                shot.source_out = event.source_out.clone();
                shot.record_in = Some(event.record_in.clone());
                shot.record_out = Some(event.record_out.clone());
                shot.duration_frames = Some(event.length);
                shot.notes = event.vfx_description.clone().or_else(|| {
                    if event.vfx_notes.is_empty() {
                        None
                    } else {
                        Some(event.vfx_notes.join("\n"))
                    }
                });
                shot.scene = event.scene.clone();
                shot.take = event.take.clone();
                shot.camera = event.camera.clone();
                shot
            })
            .collect();
    }

    result
        .locators
        .iter()
        .filter(|l| l.vfx_shot_code.is_some() && l.has_real_clip())
        .map(|locator| {
            let frame = if locator.frame != 0 {
                locator.frame
            } else {
                timecode_to_frames(&locator.timecode, result.edit_rate)
            };
            let enclosing = result
                .events
                .iter()
                .find(|e| frame >= e.record_in_frame && frame <= e.record_out_frame);

            let mut shot = Shot::new(locator.vfx_shot_code.clone().unwrap_or_default());
            shot.clip_name = locator.clip_name.clone();
            shot.source_in = locator.source_timecode.clone();
            shot.record_in = Some(locator.timecode.clone());
            shot.record_out = enclosing.map(|e| e.record_out.clone());
            shot.duration_frames = Some(enclosing.map(|e| e.length).unwrap_or(0));
            shot.notes = locator.vfx_description.clone();
            shot.scene = locator.vfx_scene.clone();
            shot.camera = locator.camera.clone();
            shot
        })
        .collect()
}
