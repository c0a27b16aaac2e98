//! FCP XML (xmeml v5) writer.

use crate::config::EngineConfig;
use crate::models::Shot;
use crate::timecode::timecode_to_frames;
use crate::xml::escape_xml;

/// Sequence-level options for [`generate_fcp_xml`].
#[derive(Debug, Clone)]
pub struct FcpXmlOptions {
    pub title: String,
    pub fps: f64,
    pub width: u32,
    pub height: u32,
}

impl FcpXmlOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fps: 24.0,
            width: 1920,
            height: 1080,
        }
    }

    pub fn from_config(title: impl Into<String>, config: &EngineConfig) -> Self {
        Self {
            title: title.into(),
            fps: config.fps,
            width: config.width,
            height: config.height,
        }
    }
}

/// Fallback cut length when a shot carries no duration or record span.
const DEFAULT_CLIP_FRAMES: i64 = 100;

/// Generate a cuts-only xmeml v5 sequence from shot records.
///
/// One video track, one clipitem per shot in input order, each with a
/// synthetic `file` node keyed by the shot id so NLEs can relink media.
/// Clip duration prefers explicit `duration_frames`, then the record
/// span, then 100 frames.
///
/// Fractional rates are normalized to the xmeml convention: an integer
/// `<timebase>` plus `<ntsc>TRUE</ntsc>`, rather than writing the
/// fractional value into the timebase element.
pub fn generate_fcp_xml(shots: &[Shot], options: &FcpXmlOptions) -> String {
    let fps = options.fps;
    let timebase = fps.round() as i64;
    let ntsc = if fps.fract() != 0.0 { "TRUE" } else { "FALSE" };

    let total_duration: i64 = shots.iter().map(|s| shot_duration(s, fps)).sum();

    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE xmeml>
<xmeml version="5">
  <project>
    <name>{title}</name>
    <children>
      <sequence>
        <name>{title}</name>
        <duration>{total_duration}</duration>
        <rate>
          <timebase>{timebase}</timebase>
          <ntsc>{ntsc}</ntsc>
        </rate>
        <media>
          <video>
            <format>
              <samplecharacteristics>
                <width>{width}</width>
                <height>{height}</height>
                <pixelaspectratio>square</pixelaspectratio>
                <rate>
                  <timebase>{timebase}</timebase>
                  <ntsc>{ntsc}</ntsc>
                </rate>
              </samplecharacteristics>
            </format>
            <track>
"#,
        title = escape_xml(&options.title),
        total_duration = total_duration,
        timebase = timebase,
        ntsc = ntsc,
        width = options.width,
        height = options.height,
    );

    let mut record_start = 0i64;
    for shot in shots {
        let duration = shot.duration_frames.unwrap_or(DEFAULT_CLIP_FRAMES);
        let source_start = shot
            .source_in
            .as_deref()
            .map(|tc| timecode_to_frames(tc, fps))
            .unwrap_or(0);
        let source_end = shot
            .source_out
            .as_deref()
            .map(|tc| timecode_to_frames(tc, fps))
            .unwrap_or(source_start + duration);
        let clip_duration = source_end - source_start;

        xml.push_str(&format!(
            r#"              <clipitem>
                <name>{code}</name>
                <duration>{clip_duration}</duration>
                <start>{start}</start>
                <end>{end}</end>
                <in>{source_start}</in>
                <out>{source_end}</out>
                <masterclipid>{id}</masterclipid>
                <file id="{id}">
                  <name>{clip_name}</name>
                  <pathurl>{path}</pathurl>
                  <rate>
                    <timebase>{timebase}</timebase>
                    <ntsc>{ntsc}</ntsc>
                  </rate>
                  <duration>{clip_duration}</duration>
                  <media>
                    <video>
                      <samplecharacteristics>
                        <width>{width}</width>
                        <height>{height}</height>
                      </samplecharacteristics>
                    </video>
                  </media>
                </file>
              </clipitem>
"#,
            code = escape_xml(&shot.code),
            clip_duration = clip_duration,
            start = record_start,
            end = record_start + clip_duration,
            source_start = source_start,
            source_end = source_end,
            id = escape_xml(&shot.id),
            clip_name = escape_xml(shot.clip_or_code()),
            path = escape_xml(shot.file_path.as_deref().unwrap_or("")),
            timebase = timebase,
            ntsc = ntsc,
            width = options.width,
            height = options.height,
        ));
        record_start += clip_duration;
    }

    xml.push_str(
        r#"            </track>
          </video>
        </media>
      </sequence>
    </children>
  </project>
</xmeml>"#,
    );

    xml
}

fn shot_duration(shot: &Shot, fps: f64) -> i64 {
    if let Some(frames) = shot.duration_frames {
        return frames;
    }
    if let (Some(rec_in), Some(rec_out)) = (shot.record_in.as_deref(), shot.record_out.as_deref())
    {
        return timecode_to_frames(rec_out, fps) - timecode_to_frames(rec_in, fps);
    }
    DEFAULT_CLIP_FRAMES
}
