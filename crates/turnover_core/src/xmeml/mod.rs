//! xmeml (Premiere Pro / FCP7 / Resolve interchange XML) support.
//!
//! The reader recovers per-clip editorial data an online conform cares
//! about: timing, source file references, scene/take logging, reposition
//! and speed effects, and embedded CDL grades. The writer produces a
//! minimal cuts-only xmeml sequence from shot records.

mod parser;
mod types;
mod writer;

pub use parser::{is_xmeml, match_clip_to_source_media, parse_xmeml};
pub use types::{
    ClipSpeed, ClipTransform, XmemlFormat, XmlClip, XmlParseResult, XmlSequence,
};
pub use writer::{generate_fcp_xml, FcpXmlOptions};
