//! Avid marker export handling.
//!
//! Parses tab-delimited marker lists and matches markers to shots by
//! record-timecode containment.

mod parser;
mod types;

pub use parser::{match_markers_to_shots, parse_marker_file};
pub use types::{MarkerEntry, MarkerMatchResult, MarkerParseResult};
