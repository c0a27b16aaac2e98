//! ASC CDL handling.
//!
//! Parses `.cdl` (ColorDecisionList), `.cc` (ColorCorrection), and `.ccc`
//! (ColorCorrectionCollection) XML into [`CdlValues`], and serializes
//! corrections back out in each of the three container shapes.

mod parser;
mod types;
mod writer;

pub use parser::parse_cdl_file;
pub(crate) use parser::is_cdl_xml;
pub use types::{CdlFormat, CdlParseResult, CdlValues};
pub use writer::{export_cc, export_cdl, export_project_cdl};
