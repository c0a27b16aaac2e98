//! Clip → source media matching.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::xmeml::XmlClip;

use super::types::SourceMedia;

/// Strip the final `.ext` from a file name, if any. A trailing dot is
/// not an extension.
pub(crate) fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) if i + 1 < name.len() => &name[..i],
        _ => name,
    }
}

/// Match a clip name (from XML or EDL) to a source media record.
///
/// Strategies in order: exact clip name, extension-less basename,
/// partial containment either way, then source timecode range. First
/// hit wins.
pub fn match_to_source_media<'a>(
    clip_name: &str,
    source_timecode_frame: Option<i64>,
    media: &'a [SourceMedia],
) -> Option<&'a SourceMedia> {
    if let Some(exact) = media.iter().find(|sm| sm.clip_name == clip_name) {
        return Some(exact);
    }

    let clip_base = strip_extension(clip_name);
    if let Some(base) = media
        .iter()
        .find(|sm| strip_extension(&sm.clip_name) == clip_base)
    {
        return Some(base);
    }

    if let Some(partial) = media.iter().find(|sm| {
        sm.clip_name.contains(clip_base) || clip_base.contains(strip_extension(&sm.clip_name))
    }) {
        return Some(partial);
    }

    if let Some(frame) = source_timecode_frame {
        return media.iter().find(|sm| {
            matches!(
                (sm.tc_in_frames, sm.tc_out_frames),
                (Some(tc_in), Some(tc_out)) if frame >= tc_in && frame <= tc_out
            )
        });
    }

    None
}

/// Match many parsed clips at once, keyed by clip name. The source file
/// name is preferred over the timeline name when present.
pub fn batch_match_to_source_media<'a>(
    clips: &[XmlClip],
    media: &'a [SourceMedia],
) -> BTreeMap<String, Option<&'a SourceMedia>> {
    let mut matches = BTreeMap::new();
    for clip in clips {
        let clip_name = clip.source_file_name.as_deref().unwrap_or(&clip.name);
        let matched = match_to_source_media(clip_name, clip.source_timecode_frame, media);
        matches.insert(clip.name.clone(), matched);
    }
    matches
}

/// Project-level source media overview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMediaSummary {
    pub total_clips: usize,
    pub shoot_dates: Vec<String>,
    pub cameras: Vec<String>,
    pub scenes: Vec<String>,
    pub total_duration: i64,
    pub with_cdl: usize,
}

/// Summarize a set of source media records: distinct shoot dates,
/// cameras (models and IDs), scenes, total frames, grades.
pub fn summarize_source_media(media: &[SourceMedia]) -> SourceMediaSummary {
    let mut shoot_dates = BTreeSet::new();
    let mut cameras = BTreeSet::new();
    let mut scenes = BTreeSet::new();
    let mut total_duration = 0i64;
    let mut with_cdl = 0usize;

    for sm in media {
        if let Some(date) = &sm.shoot_date {
            shoot_dates.insert(date.clone());
        }
        if let Some(camera) = &sm.camera {
            cameras.insert(camera.clone());
        }
        if let Some(camera_id) = &sm.camera_id {
            cameras.insert(camera_id.clone());
        }
        if let Some(scene) = &sm.scene {
            scenes.insert(scene.clone());
        }
        if let Some(frames) = sm.duration_frames {
            total_duration += frames;
        }
        if sm.has_cdl() {
            with_cdl += 1;
        }
    }

    SourceMediaSummary {
        total_clips: media.len(),
        shoot_dates: shoot_dates.into_iter().collect(),
        cameras: cameras.into_iter().collect(),
        scenes: scenes.into_iter().collect(),
        total_duration,
        with_cdl,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media() -> Vec<SourceMedia> {
        let mut a = SourceMedia::new("A023_A003_1006NV.mov");
        a.tc_in_frames = Some(896000);
        a.tc_out_frames = Some(897000);
        a.scene = Some("23A".to_string());
        a.camera = Some("ALEXA 35".to_string());
        a.shoot_date = Some("2025-03-14".to_string());
        a.duration_frames = Some(96);
        a.cdl_slope_r = Some(1.01);

        let mut b = SourceMedia::new("B007_C011_0402AB.mxf");
        b.scene = Some("23B".to_string());
        b.camera = Some("ALEXA 35".to_string());
        b.camera_id = Some("B".to_string());
        b.duration_frames = Some(48);
        vec![a, b]
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("A023_A003_1006NV.mov"), "A023_A003_1006NV");
        assert_eq!(strip_extension("no_extension"), "no_extension");
        assert_eq!(strip_extension("trailing."), "trailing.");
        // Only the last segment comes off.
        assert_eq!(strip_extension("A023_A003.1006NV.mov"), "A023_A003.1006NV");
    }

    #[test]
    fn test_match_strategies_in_order() {
        let media = media();

        // Exact.
        assert_eq!(
            match_to_source_media("A023_A003_1006NV.mov", None, &media)
                .unwrap()
                .clip_name,
            "A023_A003_1006NV.mov"
        );
        // Basename.
        assert_eq!(
            match_to_source_media("A023_A003_1006NV.braw", None, &media)
                .unwrap()
                .clip_name,
            "A023_A003_1006NV.mov"
        );
        // Partial.
        assert_eq!(
            match_to_source_media("B007_C011", None, &media).unwrap().clip_name,
            "B007_C011_0402AB.mxf"
        );
        // Timecode range.
        assert_eq!(
            match_to_source_media("renamed_clip", Some(896500), &media)
                .unwrap()
                .clip_name,
            "A023_A003_1006NV.mov"
        );
        assert!(match_to_source_media("renamed_clip", Some(1), &media).is_none());
        assert!(match_to_source_media("renamed_clip", None, &media).is_none());
    }

    #[test]
    fn test_summarize() {
        let summary = summarize_source_media(&media());
        assert_eq!(summary.total_clips, 2);
        assert_eq!(summary.shoot_dates, vec!["2025-03-14"]);
        assert_eq!(summary.cameras, vec!["ALEXA 35", "B"]);
        assert_eq!(summary.scenes, vec!["23A", "23B"]);
        assert_eq!(summary.total_duration, 144);
        assert_eq!(summary.with_cdl, 1);
    }
}
