//! Turnover Core - Editorial interchange engine
//!
//! This crate contains all parsing, matching, and export logic with zero
//! UI dependencies. It can be used by a desktop application or a CLI tool.
//!
//! Supported formats: Avid FilmScribe change lists, FCP7/Premiere/Resolve
//! xmeml, CMX3600 EDLs, ASC CDL containers, Avid Log Exchange (ALE) files,
//! and tab-delimited marker exports.

pub mod ale;
pub mod cdl;
pub mod config;
pub mod detect;
pub mod edl;
pub mod error;
pub mod filmscribe;
pub mod logging;
pub mod markers;
pub mod models;
pub mod source_media;
pub mod timecode;
pub mod xmeml;

pub(crate) mod xml;

pub use config::EngineConfig;
pub use detect::{parse_editorial, parse_editorial_file, EditorialFormat, ParsedDocument};
pub use error::EngineError;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
