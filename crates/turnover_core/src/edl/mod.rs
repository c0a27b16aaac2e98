//! CMX 3600 EDL support: the cut-list interchange format Avid and
//! Resolve still speak. The parser tolerates malformed lines with
//! line-numbered warnings; the writer produces the cuts-only EDLs a
//! vendor pull request needs.

mod parser;
mod types;
mod writer;

pub use parser::{parse_edl, suggest_shot_code};
pub use types::{EdlEvent, EdlParseResult, Fcm, ParseWarning};
pub use writer::{generate_edl, EdlOptions};
