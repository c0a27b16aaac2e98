//! ALE (Avid Log Exchange) support, covering both simplified
//! database-style exports and full-production camera/DIT logs
//! (Silverstack, Pomfort, ARRI camera cards).

mod parser;
mod types;
mod writer;

pub use parser::{parse_ale, parse_asc_sat, parse_asc_sop};
pub use types::{AleHeading, AleParseResult, AleRecord, AscSop};
pub use writer::{generate_ale, AleOptions, AleRow};
