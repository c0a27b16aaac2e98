//! FilmScribe XML parser.
//!
//! # Format Overview
//!
//! FilmScribe cut lists wrap an `<AssembleList>` of `<Event>` elements,
//! each with `Master` (record) and `Source` sub-blocks, plus
//! `<Comment Type="Locator">` blocks for timeline markers:
//! ```xml
//! <FilmScribeFile>
//!   <AssembleList>
//!     <Title>REEL03</Title>
//!     <EditRate>24</EditRate>
//!     <Event Num="1" Type="Cut" Length="96">
//!       <Master>
//!         <Start><Timecode Type="TC1">01:00:00:00</Timecode><Frame>86400</Frame></Start>
//!         <End><Timecode Type="TC1">01:00:04:00</Timecode><Frame>86496</Frame></End>
//!       </Master>
//!       <Source>
//!         <ClipName>A023_A003_1006NV</ClipName>
//!         <Custom Name="SCENE">23A</Custom>
//!       </Source>
//!     </Event>
//!     <Comment Type="Locator">
//!       <Master><Timecode Type="TC1">01:00:01:12</Timecode><Frame>86436</Frame></Master>
//!       <Text>VFX_44_0010 - Clean up makeup line</Text>
//!     </Comment>
//!   </AssembleList>
//! </FilmScribeFile>
//! ```
//!
//! Marker text following the `VFX_<scene>_<sequence>` convention yields a
//! derived shot code; locators are then matched to their enclosing event
//! by record-frame containment (closed interval, first match wins).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::timecode::timecode_to_frames;
use crate::xml::{descendant, descendant_text, descendant_text_with_attr};

use super::types::{FilmScribeEvent, FilmScribeLocator, FilmScribeParseResult};

/// `VFX_44_0010 - Description`, `VFX 05_0010 - Description`, and the
/// dashless/en-dash/em-dash variants.
static VFX_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^VFX[_ ]?(\d+)[_ ](\d+)\s*[-\u{2013}\u{2014}]?\s*(.*)").expect("valid regex")
});

/// Camera letter prefix: `A_0111C003`, `A 0111C003`, or `D011C0002`.
static CAMERA_SEP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z])[\s_]").expect("valid regex"));
static CAMERA_DIGIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z])\d").expect("valid regex"));

/// Cheap sniff for FilmScribe documents.
pub fn is_filmscribe_xml(content: &str) -> bool {
    content.contains("<FilmScribeFile") || content.contains("<AssembleList>")
}

/// Parse a FilmScribe document.
///
/// Header fields tolerate absence (Title "Unknown", Tracks "V1",
/// EditRate 24). Data-quality problems are warnings; unparsable XML
/// yields an empty result with one warning.
pub fn parse_filmscribe(content: &str) -> FilmScribeParseResult {
    let mut result = FilmScribeParseResult {
        title: "Unknown".to_string(),
        tracks: "V1".to_string(),
        event_count: 0,
        edit_rate: 24.0,
        master_duration: None,
        events: Vec::new(),
        locators: Vec::new(),
        events_with_clips: 0,
        events_with_vfx: 0,
        total_vfx_markers: 0,
        matched_vfx_markers: 0,
        warnings: Vec::new(),
    };

    let doc = match roxmltree::Document::parse(content) {
        Ok(doc) => doc,
        Err(e) => {
            result.warnings.push(format!("XML parse error: {}", e));
            return result;
        }
    };
    let root = doc.root_element();

    if let Some(title) = descendant_text(root, "Title") {
        result.title = title;
    }
    if let Some(tracks) = descendant_text(root, "Tracks") {
        result.tracks = tracks;
    }
    if let Some(rate) = descendant_text(root, "EditRate").and_then(|t| t.parse::<f64>().ok()) {
        result.edit_rate = rate;
    }
    let declared_events = descendant_text(root, "EventCount")
        .and_then(|t| t.parse::<usize>().ok())
        .unwrap_or(0);
    result.master_duration = descendant(root, "MasterDuration")
        .and_then(|n| descendant_text_with_attr(n, "Timecode", "Type", "TC1"));

    // Events.
    for node in root
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "Event")
    {
        let Some(num) = node.attribute("Num").and_then(|v| v.parse::<i64>().ok()) else {
            continue;
        };
        result.events.push(parse_event(node, num));
    }

    // Locators, wherever they appear in the document.
    for node in root.descendants().filter(|n| {
        n.is_element()
            && n.tag_name().name() == "Comment"
            && n.attribute("Type") == Some("Locator")
    }) {
        if let Some(locator) = parse_locator(node) {
            result.locators.push(locator);
        }
    }

    match_locators_to_events(&mut result);

    result.event_count = result.events.len();
    result.total_vfx_markers = result.locators.len();
    result.events_with_clips = result.events.iter().filter(|e| e.has_real_clip()).count();
    result.events_with_vfx = if result.events_with_clips > 0 {
        result
            .events
            .iter()
            .filter(|e| e.has_real_clip() && e.vfx_shot_code.is_some())
            .count()
    } else {
        result
            .locators
            .iter()
            .filter(|l| l.has_real_clip() && l.vfx_shot_code.is_some())
            .count()
    };

    if declared_events != 0 && result.events.len() != declared_events {
        tracing::warn!(
            "FilmScribe event count mismatch: declared {}, parsed {}",
            declared_events,
            result.events.len()
        );
        result.warnings.push(format!(
            "Expected {} events, found {}",
            declared_events,
            result.events.len()
        ));
    }

    result
}

fn parse_event(node: roxmltree::Node, num: i64) -> FilmScribeEvent {
    let event_type = node.attribute("Type").unwrap_or("").to_string();
    let length = node
        .attribute("Length")
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(0);

    let mut event = FilmScribeEvent {
        event_number: num,
        event_type,
        length,
        record_in: String::new(),
        record_out: String::new(),
        record_in_frame: 0,
        record_out_frame: 0,
        clip_name: None,
        tape_name: None,
        tape_id: None,
        source_in: None,
        source_out: None,
        scene: None,
        take: None,
        camera: None,
        comments: None,
        vfx_notes: Vec::new(),
        vfx_shot_code: None,
        vfx_description: None,
    };

    if let Some(master) = descendant(node, "Master") {
        if let Some(start) = descendant(master, "Start") {
            if let Some(tc) = descendant_text_with_attr(start, "Timecode", "Type", "TC1") {
                event.record_in = tc;
            }
            event.record_in_frame = descendant_text(start, "Frame")
                .and_then(|t| t.parse().ok())
                .unwrap_or(0);
        }
        if let Some(end) = descendant(master, "End") {
            if let Some(tc) = descendant_text_with_attr(end, "Timecode", "Type", "TC1") {
                event.record_out = tc;
            }
            event.record_out_frame = descendant_text(end, "Frame")
                .and_then(|t| t.parse().ok())
                .unwrap_or(0);
        }
    }

    if let Some(source) = descendant(node, "Source") {
        event.clip_name = descendant_text(source, "ClipName");
        event.tape_name = descendant_text(source, "TapeName");
        event.tape_id = custom_field(source, "TapeID");
        event.scene = custom_field(source, "SCENE");
        event.take = custom_field(source, "TAKE");
        event.camera = custom_field(source, "CAMERA");
        event.comments = custom_field(source, "Comments");
        if let Some(start) = descendant(source, "Start") {
            event.source_in = descendant_text_with_attr(start, "Timecode", "Type", "Start TC");
        }
        if let Some(end) = descendant(source, "End") {
            event.source_out = descendant_text_with_attr(end, "Timecode", "Type", "Start TC");
        }
    }

    event
}

/// `<Custom Name="SCENE">23A</Custom>` style metadata.
fn custom_field(node: roxmltree::Node, name: &str) -> Option<String> {
    node.descendants()
        .filter(|n| n.id() != node.id())
        .find(|n| {
            n.is_element() && n.tag_name().name() == "Custom" && n.attribute("Name") == Some(name)
        })
        .and_then(|n| n.text())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Parse one locator comment. Blocks without a `<Text>` element are not
/// markers and are skipped.
fn parse_locator(node: roxmltree::Node) -> Option<FilmScribeLocator> {
    let text_node = descendant(node, "Text")?;
    let text = text_node.text().map(|t| t.trim()).unwrap_or("").to_string();

    let master = descendant(node, "Master");
    let timecode = master
        .and_then(|m| descendant_text_with_attr(m, "Timecode", "Type", "TC1"))
        .unwrap_or_default();
    let frame = master
        .and_then(|m| descendant_text(m, "Frame"))
        .and_then(|t| t.parse().ok())
        .unwrap_or(0);

    let clip_name = descendant_text(node, "ClipName");
    let color = descendant_text(node, "Color");
    let source_timecode = descendant(node, "Source")
        .and_then(|s| descendant_text_with_attr(s, "Timecode", "Type", "Start TC"));

    let camera = clip_name.as_deref().and_then(camera_from_clip);

    let (vfx_scene, vfx_sequence, vfx_shot_code, vfx_description) = match VFX_CODE_RE.captures(&text)
    {
        Some(caps) => {
            let scene = caps[1].to_string();
            let sequence = caps[2].to_string();
            // Digits kept as matched, not re-padded.
            let code = format!("{}_{}", scene, sequence);
            let description = caps
                .get(3)
                .map(|m| m.as_str().trim().to_string())
                .filter(|d| !d.is_empty());
            (Some(scene), Some(sequence), Some(code), description)
        }
        None => (None, None, None, None),
    };

    Some(FilmScribeLocator {
        timecode,
        frame,
        text,
        clip_name,
        color,
        source_timecode,
        camera,
        vfx_scene,
        vfx_sequence,
        vfx_shot_code,
        vfx_description,
    })
}

/// Camera letter from a clip-name prefix, e.g. `A_0111C003` or `D011C0002`.
fn camera_from_clip(clip_name: &str) -> Option<String> {
    CAMERA_SEP_RE
        .captures(clip_name)
        .or_else(|| CAMERA_DIGIT_RE.captures(clip_name))
        .map(|caps| caps[1].to_string())
}

/// Attach each locator's text to the first event whose record-frame range
/// contains it (closed interval, first match in event order). Only the
/// first matched locator populates an event's shot code and description.
fn match_locators_to_events(result: &mut FilmScribeParseResult) {
    let edit_rate = result.edit_rate;
    let mut matched = 0usize;

    for locator in &result.locators {
        let frame = if locator.frame != 0 {
            locator.frame
        } else {
            timecode_to_frames(&locator.timecode, edit_rate)
        };

        for event in result.events.iter_mut() {
            if frame >= event.record_in_frame && frame <= event.record_out_frame {
                event.vfx_notes.push(locator.text.clone());
                if event.vfx_shot_code.is_none() {
                    if let Some(code) = &locator.vfx_shot_code {
                        event.vfx_shot_code = Some(code.clone());
                        event.vfx_description = locator.vfx_description.clone();
                    }
                }
                matched += 1;
                break;
            }
        }
    }

    result.matched_vfx_markers = matched;
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) const REEL_SAMPLE: &str = r#"<?xml version="1.0"?>
<FilmScribeFile>
  <AssembleList>
    <Title>REEL03</Title>
    <Tracks>V1</Tracks>
    <EventCount>2</EventCount>
    <EditRate>24</EditRate>
    <MasterDuration>
      <Timecode Type="TC1">00:01:00:00</Timecode>
    </MasterDuration>
    <Event Num="1" Type="Cut" Length="96">
      <Master>
        <Start><Timecode Type="TC1">01:00:00:00</Timecode><Frame>86400</Frame></Start>
        <End><Timecode Type="TC1">01:00:04:00</Timecode><Frame>86496</Frame></End>
      </Master>
      <Source>
        <ClipName>A023_A003_1006NV</ClipName>
        <TapeName>A023</TapeName>
        <Custom Name="TapeID">A023R2X</Custom>
        <Custom Name="SCENE">23A</Custom>
        <Custom Name="TAKE">2</Custom>
        <Start><Timecode Type="Start TC">10:22:15:00</Timecode></Start>
        <End><Timecode Type="Start TC">10:22:19:00</Timecode></End>
      </Source>
    </Event>
    <Event Num="2" Type="Cut" Length="48">
      <Master>
        <Start><Timecode Type="TC1">01:00:04:00</Timecode><Frame>86496</Frame></Start>
        <End><Timecode Type="TC1">01:00:06:00</Timecode><Frame>86544</Frame></End>
      </Master>
      <Source>
        <ClipName>B007_C011_0402AB</ClipName>
      </Source>
    </Event>
    <Comment Type="Locator">
      <Master><Timecode Type="TC1">01:00:01:12</Timecode><Frame>86436</Frame></Master>
      <Text>VFX_44_0010 - Clean up makeup line</Text>
      <ClipName>A023_A003_1006NV</ClipName>
      <Color>magenta</Color>
      <Source><Timecode Type="Start TC">10:22:16:12</Timecode></Source>
    </Comment>
    <Comment Type="Locator">
      <Master><Timecode Type="TC1">01:00:05:00</Timecode><Frame>86520</Frame></Master>
      <Text>VFX_44_0020 - Sky replacement</Text>
      <ClipName>B007_C011_0402AB</ClipName>
    </Comment>
  </AssembleList>
</FilmScribeFile>"#;

    #[test]
    fn test_sniff() {
        assert!(is_filmscribe_xml(REEL_SAMPLE));
        assert!(!is_filmscribe_xml("<xmeml version=\"5\"/>"));
    }

    #[test]
    fn test_header_fields() {
        let result = parse_filmscribe(REEL_SAMPLE);
        assert_eq!(result.title, "REEL03");
        assert_eq!(result.tracks, "V1");
        assert_eq!(result.edit_rate, 24.0);
        assert_eq!(result.master_duration.as_deref(), Some("00:01:00:00"));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_events() {
        let result = parse_filmscribe(REEL_SAMPLE);
        assert_eq!(result.events.len(), 2);

        let first = &result.events[0];
        assert_eq!(first.event_number, 1);
        assert_eq!(first.event_type, "Cut");
        assert_eq!(first.length, 96);
        assert_eq!(first.record_in, "01:00:00:00");
        assert_eq!(first.record_out_frame, 86496);
        assert_eq!(first.clip_name.as_deref(), Some("A023_A003_1006NV"));
        assert_eq!(first.tape_id.as_deref(), Some("A023R2X"));
        assert_eq!(first.scene.as_deref(), Some("23A"));
        assert_eq!(first.take.as_deref(), Some("2"));
        assert_eq!(first.source_in.as_deref(), Some("10:22:15:00"));
        assert_eq!(first.source_out.as_deref(), Some("10:22:19:00"));
    }

    #[test]
    fn test_locators_and_vfx_codes() {
        let result = parse_filmscribe(REEL_SAMPLE);
        assert_eq!(result.locators.len(), 2);

        let first = &result.locators[0];
        assert_eq!(first.frame, 86436);
        assert_eq!(first.vfx_scene.as_deref(), Some("44"));
        assert_eq!(first.vfx_sequence.as_deref(), Some("0010"));
        assert_eq!(first.vfx_shot_code.as_deref(), Some("44_0010"));
        assert_eq!(
            first.vfx_description.as_deref(),
            Some("Clean up makeup line")
        );
        assert_eq!(first.camera.as_deref(), Some("A"));
        assert_eq!(first.source_timecode.as_deref(), Some("10:22:16:12"));
    }

    #[test]
    fn test_locator_event_matching() {
        let result = parse_filmscribe(REEL_SAMPLE);
        assert_eq!(result.matched_vfx_markers, 2);
        assert_eq!(
            result.events[0].vfx_shot_code.as_deref(),
            Some("44_0010")
        );
        assert_eq!(result.events[1].vfx_shot_code.as_deref(), Some("44_0020"));
        assert_eq!(result.events_with_clips, 2);
        assert_eq!(result.events_with_vfx, 2);
    }

    #[test]
    fn test_first_writer_wins() {
        // Two locators inside one event: notes accumulate, but the shot
        // code comes from the first.
        let content = REEL_SAMPLE.replace("01:00:05:00", "01:00:01:20").replace(
            "<Frame>86520</Frame>",
            "<Frame>86444</Frame>",
        );
        let result = parse_filmscribe(&content);
        let first = &result.events[0];
        assert_eq!(first.vfx_notes.len(), 2);
        assert_eq!(first.vfx_shot_code.as_deref(), Some("44_0010"));
        assert_eq!(
            first.vfx_description.as_deref(),
            Some("Clean up makeup line")
        );
    }

    #[test]
    fn test_boundary_frame_matches_first_event_closed_interval() {
        // Frame 86496 is both event 1's record-out and event 2's
        // record-in; closed intervals + first-match-wins land it on the
        // first event. Encoded here to guard against silent drift.
        let content = REEL_SAMPLE
            .replace("<Frame>86436</Frame>", "<Frame>86496</Frame>")
            .replace("<Frame>86520</Frame>", "<Frame>99999</Frame>");
        let result = parse_filmscribe(&content);
        assert_eq!(result.events[0].vfx_notes.len(), 1);
        assert!(result.events[1].vfx_notes.is_empty());
    }

    #[test]
    fn test_event_count_mismatch_warns() {
        let content = REEL_SAMPLE.replace("<EventCount>2</EventCount>", "<EventCount>5</EventCount>");
        let result = parse_filmscribe(&content);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("Expected 5 events, found 2")));
    }

    #[test]
    fn test_vfx_code_variants() {
        for (text, code) in [
            ("VFX_44_0010 - note", "44_0010"),
            ("VFX 05_0010 - note", "05_0010"),
            ("vfx_7_0020 note", "7_0020"),
            ("VFX_44_0010 \u{2013} en dash", "44_0010"),
        ] {
            let caps = VFX_CODE_RE.captures(text).unwrap_or_else(|| panic!("{}", text));
            assert_eq!(format!("{}_{}", &caps[1], &caps[2]), code);
        }
        assert!(VFX_CODE_RE.captures("note about VFX_44_0010").is_none());
    }

    #[test]
    fn test_camera_from_clip() {
        assert_eq!(camera_from_clip("A_0111C003").as_deref(), Some("A"));
        assert_eq!(camera_from_clip("B 0111C013").as_deref(), Some("B"));
        assert_eq!(camera_from_clip("D011C0002").as_deref(), Some("D"));
        assert_eq!(camera_from_clip("clip.mov"), None);
    }

    #[test]
    fn test_unparsable_xml_is_warning_not_panic() {
        let result = parse_filmscribe("<FilmScribeFile><unclosed");
        assert!(result.events.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("XML parse error"));
    }
}
