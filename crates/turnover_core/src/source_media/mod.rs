//! Source media: the master record of dailies clips imported from ALEs,
//! which shots and parsed NLE clips link against to inherit camera and
//! color metadata.

mod importer;
mod matcher;
mod types;

pub use importer::{ale_to_source_media, AleImportOptions, SourceMediaImport};
pub use matcher::{
    batch_match_to_source_media, match_to_source_media, summarize_source_media,
    SourceMediaSummary,
};
pub use types::SourceMedia;

pub(crate) use matcher::strip_extension;
