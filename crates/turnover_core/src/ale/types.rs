//! ALE section records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Heading-section key/values. The well-known keys get fields; the rest
/// (DIT tools add freely) land in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AleHeading {
    pub field_delimiter: String,
    pub video_format: Option<String>,
    pub audio_format: Option<String>,
    pub fps: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl Default for AleHeading {
    fn default() -> Self {
        Self {
            field_delimiter: "TABS".to_string(),
            video_format: None,
            audio_format: None,
            fps: None,
            extra: BTreeMap::new(),
        }
    }
}

/// Slope/offset/power triplets from an `ASC_SOP` column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AscSop {
    pub slope: [f64; 3],
    pub offset: [f64; 3],
    pub power: [f64; 3],
}

/// One Data-section row, keyed by column name. Column vocabularies vary
/// wildly between tools, so the accessors try the common aliases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AleRecord(pub BTreeMap<String, String>);

impl AleRecord {
    /// Non-empty value for a column, if present.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0
            .get(column)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// First non-empty value among several column aliases.
    pub fn first_of(&self, columns: &[&str]) -> Option<&str> {
        columns.iter().find_map(|c| self.get(c))
    }

    pub fn clip_name(&self) -> Option<&str> {
        self.first_of(&[
            "Name",
            "Clip Name",
            "ImageFileName",
            "Video Clip Name Of Source",
        ])
    }

    pub fn is_circled(&self) -> bool {
        let value = self
            .first_of(&["Circled", "Circled Take"])
            .unwrap_or("")
            .to_lowercase();
        matches!(value.as_str(), "y" | "yes" | "circled" | "true")
    }

    /// Scene and take, empty strings when absent.
    pub fn scene_take(&self) -> (String, String) {
        (
            self.get("Scene").unwrap_or("").to_string(),
            self.get("Take").unwrap_or("").to_string(),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AleParseResult {
    pub heading: AleHeading,
    pub columns: Vec<String>,
    pub records: Vec<AleRecord>,
    pub record_count: usize,
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> AleRecord {
        AleRecord(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_clip_name_aliases() {
        assert_eq!(
            record(&[("Name", "A001_C002")]).clip_name(),
            Some("A001_C002")
        );
        assert_eq!(
            record(&[("ImageFileName", "A001_C002.ari")]).clip_name(),
            Some("A001_C002.ari")
        );
        assert_eq!(record(&[("Name", "")]).clip_name(), None);
    }

    #[test]
    fn test_is_circled() {
        assert!(record(&[("Circled", "Y")]).is_circled());
        assert!(record(&[("Circled Take", "yes")]).is_circled());
        assert!(!record(&[("Circled", "N")]).is_circled());
        assert!(!record(&[]).is_circled());
    }
}
