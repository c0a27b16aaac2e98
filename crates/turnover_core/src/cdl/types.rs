//! CDL types.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// `(sR sG sB)(oR oG oB)(pR pG pB)` as found in ASC_SOP metadata
/// columns and xmeml `colorinfo` blocks.
static SOP_STRING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\(\s*([\d.+-]+)\s+([\d.+-]+)\s+([\d.+-]+)\s*\)\s*\(\s*([\d.+-]+)\s+([\d.+-]+)\s+([\d.+-]+)\s*\)\s*\(\s*([\d.+-]+)\s+([\d.+-]+)\s+([\d.+-]+)\s*\)",
    )
    .expect("valid regex")
});

/// One ASC color correction: Slope/Offset/Power per channel plus
/// saturation, with whatever identity the container carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdlValues {
    /// `id` attribute of the ColorCorrection element, often a clip name.
    pub id: String,
    /// `Description` element content.
    pub description: String,
    pub slope_r: f64,
    pub slope_g: f64,
    pub slope_b: f64,
    pub offset_r: f64,
    pub offset_g: f64,
    pub offset_b: f64,
    pub power_r: f64,
    pub power_g: f64,
    pub power_b: f64,
    pub saturation: f64,
}

impl Default for CdlValues {
    fn default() -> Self {
        Self::identity()
    }
}

impl CdlValues {
    /// The no-op grade: slope and power 1.0, offset 0.0, saturation 1.0.
    pub fn identity() -> Self {
        Self {
            id: String::new(),
            description: String::new(),
            slope_r: 1.0,
            slope_g: 1.0,
            slope_b: 1.0,
            offset_r: 0.0,
            offset_g: 0.0,
            offset_b: 0.0,
            power_r: 1.0,
            power_g: 1.0,
            power_b: 1.0,
            saturation: 1.0,
        }
    }

    /// Parse a compact SOP string, with an optional saturation value
    /// (defaults to 1.0). Returns `None` when the string does not carry
    /// all nine values.
    pub fn from_sop_sat(sop: &str, sat: Option<f64>) -> Option<Self> {
        let caps = SOP_STRING_RE.captures(sop)?;
        let num = |i: usize| caps[i].parse::<f64>().ok();
        Some(Self {
            id: String::new(),
            description: String::new(),
            slope_r: num(1)?,
            slope_g: num(2)?,
            slope_b: num(3)?,
            offset_r: num(4)?,
            offset_g: num(5)?,
            offset_b: num(6)?,
            power_r: num(7)?,
            power_g: num(8)?,
            power_b: num(9)?,
            saturation: sat.unwrap_or(1.0),
        })
    }

    /// Whether every value equals the identity grade.
    pub fn is_identity(&self) -> bool {
        self.slope_r == 1.0
            && self.slope_g == 1.0
            && self.slope_b == 1.0
            && self.offset_r == 0.0
            && self.offset_g == 0.0
            && self.offset_b == 0.0
            && self.power_r == 1.0
            && self.power_g == 1.0
            && self.power_b == 1.0
            && self.saturation == 1.0
    }

    /// Best human identifier: description, falling back to id, falling
    /// back to "Unknown".
    pub fn identifier(&self) -> &str {
        if !self.description.is_empty() {
            &self.description
        } else if !self.id.is_empty() {
            &self.id
        } else {
            "Unknown"
        }
    }

    /// Loose association heuristic: case-insensitive substring match in
    /// either direction between the identifier and a clip name.
    pub fn matches_clip(&self, clip_name: &str) -> bool {
        let id = self.identifier().to_lowercase();
        let clip = clip_name.to_lowercase();
        id.contains(&clip) || clip.contains(&id)
    }

    /// Display strings with 4-decimal formatting:
    /// (slope, offset, power, saturation).
    pub fn display_strings(&self) -> (String, String, String, String) {
        let triplet = |r: f64, g: f64, b: f64| format!("{:.4} {:.4} {:.4}", r, g, b);
        (
            triplet(self.slope_r, self.slope_g, self.slope_b),
            triplet(self.offset_r, self.offset_g, self.offset_b),
            triplet(self.power_r, self.power_g, self.power_b),
            format!("{:.4}", self.saturation),
        )
    }
}

/// Detected CDL container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CdlFormat {
    /// `<ColorDecisionList>` root.
    Cdl,
    /// Bare `<ColorCorrection>` root.
    Cc,
    /// `<ColorCorrectionCollection>` root.
    Ccc,
    Unknown,
}

impl std::fmt::Display for CdlFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CdlFormat::Cdl => write!(f, "cdl"),
            CdlFormat::Cc => write!(f, "cc"),
            CdlFormat::Ccc => write!(f, "ccc"),
            CdlFormat::Unknown => write!(f, "unknown"),
        }
    }
}

/// Result of parsing a CDL container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdlParseResult {
    pub cdls: Vec<CdlValues>,
    pub warnings: Vec<String>,
    pub format: CdlFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        assert!(CdlValues::identity().is_identity());
        let mut graded = CdlValues::identity();
        graded.slope_r = 1.1;
        assert!(!graded.is_identity());
    }

    #[test]
    fn test_identifier_fallbacks() {
        let mut cdl = CdlValues::identity();
        assert_eq!(cdl.identifier(), "Unknown");
        cdl.id = "A001".to_string();
        assert_eq!(cdl.identifier(), "A001");
        cdl.description = "Hero grade".to_string();
        assert_eq!(cdl.identifier(), "Hero grade");
    }

    #[test]
    fn test_from_sop_sat() {
        let cdl = CdlValues::from_sop_sat(
            "(1.0120 0.9873 1.0442)(-0.0142 0.0021 -0.0083)(1.0000 1.0000 0.9912)",
            Some(0.93),
        )
        .unwrap();
        assert_eq!(cdl.slope_b, 1.0442);
        assert_eq!(cdl.offset_r, -0.0142);
        assert_eq!(cdl.power_b, 0.9912);
        assert_eq!(cdl.saturation, 0.93);

        let default_sat = CdlValues::from_sop_sat("(1 1 1)(0 0 0)(1 1 1)", None).unwrap();
        assert_eq!(default_sat.saturation, 1.0);
        assert!(default_sat.is_identity());

        assert!(CdlValues::from_sop_sat("(1 1 1)(0 0 0)", None).is_none());
    }

    #[test]
    fn test_matches_clip() {
        let mut cdl = CdlValues::identity();
        cdl.id = "A023_A003_1006NV".to_string();
        assert!(cdl.matches_clip("a023_a003_1006nv.mov"));
        assert!(cdl.matches_clip("A023_A003"));
        assert!(!cdl.matches_clip("B999"));
    }
}
