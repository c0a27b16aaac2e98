//! xmeml reader.
//!
//! # Format Overview
//!
//! Premiere Pro, FCP7, and Resolve all export the same `<xmeml>` skeleton:
//! ```xml
//! <xmeml version="5">
//!   <sequence id="sequence-1">
//!     <name>R3_VFX_TURNOVER</name>
//!     <rate><timebase>24</timebase><ntsc>TRUE</ntsc></rate>
//!     <media><video><track>
//!       <clipitem id="clipitem-1">
//!         <name>006_050_bg1_v1</name>
//!         <duration>96</duration>
//!         <start>0</start><end>96</end><in>12</in><out>108</out>
//!         <file id="file-1">
//!           <name>A023_A003_1006NV.mov</name>
//!           <pathurl>file:///mnt/dailies/A023_A003_1006NV.mov</pathurl>
//!           <timecode><string>10:22:15:00</string><frame>896760</frame></timecode>
//!         </file>
//!         <filter><effect><name>Basic Motion</name>...</effect></filter>
//!       </clipitem>
//!     </track></video></media>
//!   </sequence>
//! </xmeml>
//! ```
//! The dialects differ in the details: Premiere wraps effect parameter
//! values in keyframe tuples, FCP7 writes bare numbers, and an NTSC rate
//! flag turns an integer timebase into 23.976/29.97.
//!
//! Documents that are not well-formed XML (Premiere truncates large
//! exports occasionally) fall back to a regex pass that recovers clip
//! identity and timing only.

use once_cell::sync::Lazy;
use regex::Regex;
use roxmltree::Node;

use crate::cdl::CdlValues;
use crate::source_media::{strip_extension, SourceMedia};
use crate::xml::{child, child_text, descendant, descendant_text};

use super::types::{
    ClipSpeed, ClipTransform, XmemlFormat, XmlClip, XmlParseResult, XmlSequence,
};

/// Reduced-fidelity clipitem extraction for the fallback path.
static CLIPITEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)<clipitem[^>]*id="([^"]*)".*?<name>([^<]*)</name>.*?<duration>(-?\d+)</duration>.*?<start>(-?\d+)</start>.*?<end>(-?\d+)</end>.*?<in>(-?\d+)</in>.*?<out>(-?\d+)</out>.*?</clipitem>"#,
    )
    .expect("valid regex")
});

static SEQUENCE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<sequence[^>]*>.*?<name>([^<]*)</name>").expect("valid regex"));

/// Cheap sniff for xmeml documents.
pub fn is_xmeml(content: &str) -> bool {
    content.contains("<xmeml")
}

/// Parse xmeml content. Never fails: malformed XML degrades to the
/// regex fallback with a warning.
pub fn parse_xmeml(content: &str) -> XmlParseResult {
    let doc = match roxmltree::Document::parse(content) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!("xmeml did not parse as XML, degrading to regex extraction: {e}");
            let mut result = parse_xmeml_regex(content);
            result
                .warnings
                .insert(0, format!("XML parse error, using regex fallback: {}", e));
            return result;
        }
    };

    let mut result = XmlParseResult::empty(detect_format(content, &doc));
    result.version = doc
        .root_element()
        .attribute("version")
        .map(|v| v.to_string());

    let sequence_nodes: Vec<Node> = doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "sequence")
        .collect();
    for (index, node) in sequence_nodes.into_iter().enumerate() {
        let sequence = parse_sequence(node, index, &mut result.warnings);
        result.sequences.push(sequence);
    }

    result.tally();
    result
}

fn detect_format(content: &str, doc: &roxmltree::Document) -> XmemlFormat {
    if content.contains("PremierePro") || content.contains("Adobe Premiere") {
        XmemlFormat::Premiere
    } else if content.contains("Final Cut Pro") {
        XmemlFormat::Fcp7
    } else if content.contains("DaVinci Resolve") {
        XmemlFormat::Resolve
    } else if doc.root_element().tag_name().name() == "xmeml" {
        // Generic xmeml is the FCP7 dialect.
        XmemlFormat::Fcp7
    } else {
        XmemlFormat::Unknown
    }
}

fn parse_sequence(node: Node, index: usize, warnings: &mut Vec<String>) -> XmlSequence {
    let id = node
        .attribute("id")
        .map(|v| v.to_string())
        .unwrap_or_else(|| format!("sequence-{}", index));
    let name =
        child_text(node, "name").unwrap_or_else(|| format!("Sequence {}", index + 1));
    let duration = child_text(node, "duration")
        .and_then(|t| t.parse().ok())
        .unwrap_or(0);
    let fps = rate_fps(child(node, "rate")).unwrap_or(24.0);

    // media > video > format > samplecharacteristics
    let characteristics = child(node, "media")
        .and_then(|n| child(n, "video"))
        .and_then(|n| child(n, "format"))
        .and_then(|n| child(n, "samplecharacteristics"));
    let width = characteristics
        .and_then(|n| child_text(n, "width"))
        .and_then(|t| t.parse().ok())
        .unwrap_or(1920);
    let height = characteristics
        .and_then(|n| child_text(n, "height"))
        .and_then(|t| t.parse().ok())
        .unwrap_or(1080);

    let mut clips = Vec::new();
    if let Some(video) = child(node, "media").and_then(|n| child(n, "video")) {
        let mut clip_index = 0;
        for track in video
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "track")
        {
            for item in track
                .children()
                .filter(|n| n.is_element() && n.tag_name().name() == "clipitem")
            {
                if let Some(clip) = parse_clipitem(item, clip_index, fps, warnings) {
                    clips.push(clip);
                }
                clip_index += 1;
            }
        }
    }

    XmlSequence {
        id,
        name,
        duration,
        fps,
        width,
        height,
        clips,
    }
}

/// fps from a `<rate>` node: integer timebase, pulled down by 1000/1001
/// when the NTSC flag is set.
fn rate_fps(rate: Option<Node>) -> Option<f64> {
    let rate = rate?;
    let timebase: f64 = child_text(rate, "timebase")?.parse().ok()?;
    let ntsc = child_text(rate, "ntsc")
        .map(|t| t.to_uppercase() == "TRUE")
        .unwrap_or(false);
    Some(if ntsc { timebase * 1000.0 / 1001.0 } else { timebase })
}

fn parse_clipitem(
    node: Node,
    index: usize,
    fps: f64,
    warnings: &mut Vec<String>,
) -> Option<XmlClip> {
    let id = node
        .attribute("id")
        .map(|v| v.to_string())
        .unwrap_or_else(|| format!("clip-{}", index));
    let Some(name) = child_text(node, "name") else {
        warnings.push(format!("Clip {}: missing name, skipping", index));
        return None;
    };

    // Timing fields must come from direct children: nested <file> nodes
    // carry their own duration/rate.
    let direct_int =
        |tag: &str| -> i64 { child_text(node, tag).and_then(|t| t.parse().ok()).unwrap_or(0) };
    let duration = direct_int("duration");
    let start = direct_int("start");
    let end = direct_int("end");
    let in_point = direct_int("in");
    let out_point = direct_int("out");

    let file_node = descendant(node, "file");
    let source_file_name = file_node.and_then(|n| child_text(n, "name"));
    let source_file_path = file_node.and_then(|n| child_text(n, "pathurl"));

    let tc_node = file_node.and_then(|n| descendant(n, "timecode"));
    let source_timecode = tc_node.and_then(|n| child_text(n, "string"));
    let source_timecode_frame = tc_node
        .and_then(|n| child_text(n, "frame"))
        .and_then(|t| t.parse::<i64>().ok())
        .filter(|f| *f != 0);

    let logging = descendant(node, "logginginfo");
    let scene = logging.and_then(|n| child_text(n, "scene"));
    let take = logging.and_then(|n| child_text(n, "shottake"));
    let description = logging.and_then(|n| child_text(n, "description"));

    let camera_roll = descendant(node, "filmdata").and_then(|n| child_text(n, "cameraroll"));
    let reel_name = tc_node
        .and_then(|n| descendant(n, "reel"))
        .and_then(|n| child_text(n, "name"));
    let label = descendant(node, "labels").and_then(|n| child_text(n, "label2"));

    let cdl = descendant(node, "colorinfo").and_then(parse_colorinfo);
    let has_cdl = cdl.as_ref().map(|c| !c.is_identity()).unwrap_or(false);

    let transform = parse_transform_filters(node);
    let has_reposition = transform
        .as_ref()
        .map(ClipTransform::is_reposition)
        .unwrap_or(false);

    let speed = parse_speed_filters(node);
    let has_speed_change = speed.as_ref().map(ClipSpeed::is_change).unwrap_or(false);

    Some(XmlClip {
        id,
        name,
        source_file_name,
        source_file_path,
        duration,
        start,
        end,
        in_point,
        out_point,
        source_timecode,
        source_timecode_frame,
        fps,
        scene,
        take,
        camera_roll,
        reel_name,
        label,
        description,
        transform,
        has_reposition,
        speed,
        has_speed_change,
        cdl,
        has_cdl,
    })
}

fn parse_colorinfo(color_node: Node) -> Option<CdlValues> {
    let sop = descendant_text(color_node, "asc_sop")?;
    let sat = descendant_text(color_node, "asc_sat").and_then(|t| t.parse().ok());
    CdlValues::from_sop_sat(&sop, sat)
}

/// Direct-child `<filter><effect>` nodes of a clipitem.
fn clip_effects<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(|n| n.is_element() && n.tag_name().name() == "filter")
        .filter_map(|f| child(f, "effect"))
}

fn parse_transform_filters(node: Node) -> Option<ClipTransform> {
    for effect in clip_effects(node) {
        let name = child_text(effect, "name").unwrap_or_default().to_lowercase();
        let effect_id = child_text(effect, "effectid")
            .unwrap_or_default()
            .to_lowercase();

        // Premiere: "Basic Motion" / effectid "basic"; FCP7: "Motion".
        if !(name.contains("motion") || effect_id == "basic" || effect_id == "motion") {
            continue;
        }

        let mut transform = ClipTransform::default();
        for param in effect
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == "parameter")
        {
            let param_name = child_text(param, "name").unwrap_or_default().to_lowercase();
            let value = parse_parameter_value(&child_text(param, "value").unwrap_or_default());

            if param_name.contains("scale")
                && !param_name.contains("height")
                && !param_name.contains("width")
            {
                transform.scale = value;
            } else if param_name.contains("position") {
                if param_name.contains('x') || param_name == "position" {
                    transform.position_x = value;
                }
                if param_name.contains('y') {
                    transform.position_y = value;
                }
            } else if param_name.contains("rotation") {
                transform.rotation = value;
            }
        }
        return Some(transform);
    }
    None
}

fn parse_speed_filters(node: Node) -> Option<ClipSpeed> {
    for effect in clip_effects(node) {
        let name = child_text(effect, "name").unwrap_or_default().to_lowercase();
        let effect_id = child_text(effect, "effectid")
            .unwrap_or_default()
            .to_lowercase();

        if !(name.contains("speed")
            || name.contains("time remap")
            || effect_id.contains("speed")
            || effect_id.contains("timeremap"))
        {
            continue;
        }

        let mut speed = ClipSpeed {
            time_remapping: name.contains("remap") || effect_id.contains("remap"),
            ..ClipSpeed::default()
        };
        for param in effect
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == "parameter")
        {
            let param_name = child_text(param, "name").unwrap_or_default().to_lowercase();
            let value = parse_parameter_value(&child_text(param, "value").unwrap_or_default());

            if param_name.contains("speed") || param_name.contains("rate") {
                speed.speed_ratio = value / 100.0;
            } else if param_name.contains("reverse") {
                speed.reverse = value != 0.0;
            }
        }
        return Some(speed);
    }

    // No explicit effect: a clip rate differing from its file rate is a
    // constant conform speed change.
    let clip_fps: Option<i64> = child(node, "rate")
        .and_then(|n| child_text(n, "timebase"))
        .and_then(|t| t.parse().ok());
    let file_fps: Option<i64> = descendant(node, "file")
        .and_then(|n| child(n, "rate"))
        .and_then(|n| child_text(n, "timebase"))
        .and_then(|t| t.parse().ok());
    if let (Some(clip_fps), Some(file_fps)) = (clip_fps, file_fps) {
        if clip_fps != file_fps && clip_fps != 0 {
            return Some(ClipSpeed {
                speed_ratio: file_fps as f64 / clip_fps as f64,
                ..ClipSpeed::default()
            });
        }
    }

    None
}

/// Effect parameter values: FCP7 writes bare numbers, Premiere writes
/// keyframe tuples (`ticks,value,...`) where the payload is the second
/// field.
fn parse_parameter_value(value: &str) -> f64 {
    if value.contains(',') {
        let mut parts = value.split(',');
        let _ticks = parts.next();
        if let Some(second) = parts.next() {
            return second.parse().unwrap_or(0.0);
        }
    }
    value.parse().unwrap_or(0.0)
}

/// Regex pass for documents roxmltree rejects: clip identity and timing
/// only, one synthetic premiere sequence.
fn parse_xmeml_regex(content: &str) -> XmlParseResult {
    let mut clips = Vec::new();
    for caps in CLIPITEM_RE.captures_iter(content) {
        let int = |i: usize| caps[i].parse().unwrap_or(0);
        clips.push(XmlClip {
            id: caps[1].to_string(),
            name: caps[2].to_string(),
            source_file_name: None,
            source_file_path: None,
            duration: int(3),
            start: int(4),
            end: int(5),
            in_point: int(6),
            out_point: int(7),
            source_timecode: None,
            source_timecode_frame: None,
            fps: 24.0,
            scene: None,
            take: None,
            camera_roll: None,
            reel_name: None,
            label: None,
            description: None,
            transform: None,
            has_reposition: false,
            speed: None,
            has_speed_change: false,
            cdl: None,
            has_cdl: false,
        });
    }

    let name = SEQUENCE_NAME_RE
        .captures(content)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| "Unknown Sequence".to_string());

    let mut result = XmlParseResult::empty(XmemlFormat::Premiere);
    result.sequences.push(XmlSequence {
        id: "sequence-1".to_string(),
        name,
        duration: 0,
        fps: 24.0,
        width: 1920,
        height: 1080,
        clips,
    });
    result.tally();
    // Flag counts are unknowable without real XML.
    result.clips_with_reposition = 0;
    result.clips_with_speed_change = 0;
    result.clips_with_cdl = 0;
    result
}

/// Match a clip to imported source media: exact clip name first, then
/// extension-less basename, then source timecode containment.
pub fn match_clip_to_source_media<'a>(
    clip: &XmlClip,
    media: &'a [SourceMedia],
) -> Option<&'a SourceMedia> {
    if let Some(exact) = media.iter().find(|sm| {
        Some(sm.clip_name.as_str()) == clip.source_file_name.as_deref()
            || sm.clip_name == clip.name
    }) {
        return Some(exact);
    }

    let clip_base = strip_extension(clip.source_file_name.as_deref().unwrap_or(&clip.name));
    if let Some(base) = media
        .iter()
        .find(|sm| strip_extension(&sm.clip_name) == clip_base)
    {
        return Some(base);
    }

    if let Some(frame) = clip.source_timecode_frame {
        return media.iter().find(|sm| {
            matches!(
                (sm.tc_in_frames, sm.tc_out_frames),
                (Some(tc_in), Some(tc_out)) if frame >= tc_in && frame <= tc_out
            )
        });
    }

    None
}
