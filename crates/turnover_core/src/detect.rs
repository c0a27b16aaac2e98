//! Editorial format detection and the auto-dispatching import entry point.
//!
//! Everything else in the crate takes content it already knows the shape
//! of; this module is for the "user dropped a file on us" path. Detection
//! is content sniffing, not extension matching, because editorial exports
//! routinely arrive as `.txt` or `.xml` regardless of what is inside.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ale::{parse_ale, AleParseResult};
use crate::cdl::{is_cdl_xml, parse_cdl_file, CdlParseResult};
use crate::config::EngineConfig;
use crate::edl::{parse_edl, EdlParseResult};
use crate::error::EngineError;
use crate::filmscribe::{is_filmscribe_xml, parse_filmscribe, FilmScribeParseResult};
use crate::markers::{parse_marker_file, MarkerParseResult};
use crate::timecode::is_valid_timecode;
use crate::xmeml::{is_xmeml, parse_xmeml, XmlParseResult};

/// Editorial file formats the engine can ingest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorialFormat {
    FilmScribe,
    Xmeml,
    Cdl,
    Edl,
    Ale,
    MarkerList,
    Unknown,
}

impl std::fmt::Display for EditorialFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EditorialFormat::FilmScribe => "Avid FilmScribe",
            EditorialFormat::Xmeml => "FCP7 XML",
            EditorialFormat::Cdl => "ASC CDL",
            EditorialFormat::Edl => "CMX3600 EDL",
            EditorialFormat::Ale => "Avid Log Exchange",
            EditorialFormat::MarkerList => "Marker list",
            EditorialFormat::Unknown => "Unknown",
        };
        write!(f, "{name}")
    }
}

impl EditorialFormat {
    /// Sniff the format from file content.
    ///
    /// XML dialects are checked before the line-oriented formats, and ALE
    /// before EDL: both are plain text, but an ALE always opens with its
    /// `Heading` section while EDL headers are optional.
    pub fn detect(content: &str) -> Self {
        if is_filmscribe_xml(content) {
            return EditorialFormat::FilmScribe;
        }
        if is_xmeml(content) {
            return EditorialFormat::Xmeml;
        }
        if is_cdl_xml(content) {
            return EditorialFormat::Cdl;
        }
        if looks_like_ale(content) {
            return EditorialFormat::Ale;
        }
        if looks_like_edl(content) {
            return EditorialFormat::Edl;
        }
        if looks_like_marker_list(content) {
            return EditorialFormat::MarkerList;
        }
        EditorialFormat::Unknown
    }
}

fn looks_like_ale(content: &str) -> bool {
    let mut lines = content.lines().map(str::trim).filter(|l| !l.is_empty());
    matches!(lines.next(), Some("Heading")) || content.contains("FIELD_DELIM")
}

fn looks_like_edl(content: &str) -> bool {
    for line in content.lines().take(50) {
        let line = line.trim();
        if line.starts_with("TITLE:") || line.starts_with("FCM:") {
            return true;
        }
        if is_edl_event_line(line) {
            return true;
        }
    }
    false
}

/// Loose shape check for a CMX3600 event line: a numeric event, a reel,
/// a track, an edit type. The full parse happens in the `edl` module.
fn is_edl_event_line(line: &str) -> bool {
    let mut fields = line.split_whitespace();
    let Some(event) = fields.next() else {
        return false;
    };
    if event.len() < 3 || event.len() > 6 || !event.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let Some(_reel) = fields.next() else {
        return false;
    };
    let Some(track) = fields.next() else {
        return false;
    };
    matches!(track, "V" | "A" | "AA" | "B" | "AA/V")
        || (track.len() == 2 && track.starts_with('A') && track.ends_with(|c: char| c.is_ascii_digit()))
}

fn looks_like_marker_list(content: &str) -> bool {
    for (i, raw) in content.lines().enumerate() {
        let line = raw.trim();
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
        return parts.len() >= 5 && is_valid_timecode(parts[1].trim());
    }
    false
}

/// A parsed editorial document, tagged by format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "format", content = "document")]
pub enum ParsedDocument {
    FilmScribe(FilmScribeParseResult),
    Xmeml(XmlParseResult),
    Cdl(CdlParseResult),
    Edl(EdlParseResult),
    Ale(AleParseResult),
    Markers(MarkerParseResult),
}

impl ParsedDocument {
    /// The format this document was parsed as.
    pub fn format(&self) -> EditorialFormat {
        match self {
            ParsedDocument::FilmScribe(_) => EditorialFormat::FilmScribe,
            ParsedDocument::Xmeml(_) => EditorialFormat::Xmeml,
            ParsedDocument::Cdl(_) => EditorialFormat::Cdl,
            ParsedDocument::Edl(_) => EditorialFormat::Edl,
            ParsedDocument::Ale(_) => EditorialFormat::Ale,
            ParsedDocument::Markers(_) => EditorialFormat::MarkerList,
        }
    }
}

/// Detect the format of `content` and parse it with the matching parser.
///
/// This is the one entry point that can fail outright: an unrecognized
/// format returns [`EngineError::UnknownFormat`]. Inside a recognized
/// format, data-quality problems stay warnings as usual.
pub fn parse_editorial(
    content: &str,
    config: &EngineConfig,
) -> Result<ParsedDocument, EngineError> {
    let format = EditorialFormat::detect(content);
    tracing::debug!("Detected editorial format: {format}");

    match format {
        EditorialFormat::FilmScribe => Ok(ParsedDocument::FilmScribe(parse_filmscribe(content))),
        EditorialFormat::Xmeml => Ok(ParsedDocument::Xmeml(parse_xmeml(content))),
        EditorialFormat::Cdl => Ok(ParsedDocument::Cdl(parse_cdl_file(content))),
        EditorialFormat::Edl => Ok(ParsedDocument::Edl(parse_edl(content, config.fps))),
        EditorialFormat::Ale => Ok(ParsedDocument::Ale(parse_ale(content))),
        EditorialFormat::MarkerList => {
            Ok(ParsedDocument::Markers(parse_marker_file(content, config.fps)))
        }
        EditorialFormat::Unknown => Err(EngineError::UnknownFormat),
    }
}

/// Read a file and parse it as whatever editorial format it contains.
pub fn parse_editorial_file(
    path: impl AsRef<Path>,
    config: &EngineConfig,
) -> Result<ParsedDocument, EngineError> {
    let path = path.as_ref();
    let content =
        fs::read_to_string(path).map_err(|e| EngineError::read(path.to_path_buf(), e))?;
    parse_editorial(&content, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_filmscribe() {
        let content = "<FilmScribeFile><AssembleList></AssembleList></FilmScribeFile>";
        assert_eq!(EditorialFormat::detect(content), EditorialFormat::FilmScribe);
    }

    #[test]
    fn test_detect_xmeml() {
        let content = "<?xml version=\"1.0\"?>\n<xmeml version=\"5\"><sequence></sequence></xmeml>";
        assert_eq!(EditorialFormat::detect(content), EditorialFormat::Xmeml);
    }

    #[test]
    fn test_detect_cdl() {
        let content = "<ColorDecisionList><ColorDecision></ColorDecision></ColorDecisionList>";
        assert_eq!(EditorialFormat::detect(content), EditorialFormat::Cdl);
    }

    #[test]
    fn test_detect_ale() {
        let content = "Heading\nFIELD_DELIM\tTABS\n\nColumn\nName\tStart\n\nData\n";
        assert_eq!(EditorialFormat::detect(content), EditorialFormat::Ale);
    }

    #[test]
    fn test_detect_edl_by_header() {
        assert_eq!(
            EditorialFormat::detect("TITLE: REEL_01\nFCM: NON-DROP FRAME\n"),
            EditorialFormat::Edl
        );
    }

    #[test]
    fn test_detect_edl_by_event_line() {
        let content =
            "001  A001C003 V     C        01:00:00:00 01:00:04:00 10:00:00:00 10:00:04:00\n";
        assert_eq!(EditorialFormat::detect(content), EditorialFormat::Edl);
    }

    #[test]
    fn test_detect_marker_list() {
        let content = "VFX_41_0010\t03:00:45:12\tV1\tmagenta\tRemove rig\t1\n";
        assert_eq!(EditorialFormat::detect(content), EditorialFormat::MarkerList);
    }

    #[test]
    fn test_detect_marker_list_with_header() {
        let content = "Marker Name\tTimecode\tTrack\tColor\tComment\n\
VFX_41_0010\t03:00:45:12\tV1\tmagenta\tRemove rig\n";
        assert_eq!(EditorialFormat::detect(content), EditorialFormat::MarkerList);
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(
            EditorialFormat::detect("just some prose, nothing editorial"),
            EditorialFormat::Unknown
        );
    }

    #[test]
    fn test_parse_editorial_dispatch() {
        let config = EngineConfig::default();

        let doc = parse_editorial("TITLE: REEL_01\n", &config).unwrap();
        assert_eq!(doc.format(), EditorialFormat::Edl);

        let doc = parse_editorial(
            "VFX_1_0010\t01:00:00:00\tV1\tred\tnote\n",
            &config,
        )
        .unwrap();
        match doc {
            ParsedDocument::Markers(result) => assert_eq!(result.markers.len(), 1),
            other => panic!("expected markers, got {:?}", other.format()),
        }
    }

    #[test]
    fn test_parse_editorial_unknown_is_error() {
        let config = EngineConfig::default();
        let err = parse_editorial("hello world", &config).unwrap_err();
        assert!(matches!(err, EngineError::UnknownFormat));
    }

    #[test]
    fn test_parse_editorial_file_missing() {
        let config = EngineConfig::default();
        let err = parse_editorial_file("/nonexistent/turnover.edl", &config).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/turnover.edl"));
    }
}
