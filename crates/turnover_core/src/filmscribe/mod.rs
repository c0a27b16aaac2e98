//! Avid FilmScribe XML handling.
//!
//! Extracts cut events and locator comments (VFX markers) from FilmScribe
//! cut lists, matches locators to events by record timecode, and collapses
//! the result into canonical shots.

mod parser;
mod shots;
mod types;

pub use parser::{is_filmscribe_xml, parse_filmscribe};
pub use shots::filmscribe_to_shots;
pub use types::{FilmScribeEvent, FilmScribeLocator, FilmScribeParseResult};
