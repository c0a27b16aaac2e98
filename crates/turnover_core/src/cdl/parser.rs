//! ASC CDL/CC/CCC parser.
//!
//! # Format Overview
//!
//! All three containers carry `ColorCorrection` elements:
//! ```xml
//! <ColorDecisionList xmlns="urn:ASC:CDL:v1.01">
//!   <ColorDecision>
//!     <ColorCorrection id="A023_A003_1006NV">
//!       <SOPNode>
//!         <Slope>1.0000 0.9800 1.0200</Slope>
//!         <Offset>0.0000 0.0000 0.0000</Offset>
//!         <Power>1.0000 1.0000 1.0000</Power>
//!       </SOPNode>
//!       <SatNode><Saturation>0.9500</Saturation></SatNode>
//!     </ColorCorrection>
//!   </ColorDecision>
//! </ColorDecisionList>
//! ```
//! Vendor exports vary in namespace prefixes and node nesting, so
//! extraction matches tag names without namespace and scans descendants
//! rather than fixed paths.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::xml::{child_text, descendant_text};

use super::types::{CdlFormat, CdlParseResult, CdlValues};

static CDL_ROOT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<(?:[a-z]+:)?ColorDecisionList").expect("valid regex"));
static CCC_ROOT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<(?:[a-z]+:)?ColorCorrectionCollection").expect("valid regex"));
static CC_ROOT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<(?:[a-z]+:)?ColorCorrection").expect("valid regex"));

/// Detect container format from raw text, tolerating namespace prefixes.
fn detect_format(content: &str) -> CdlFormat {
    if CDL_ROOT_RE.is_match(content) {
        CdlFormat::Cdl
    } else if CCC_ROOT_RE.is_match(content) {
        CdlFormat::Ccc
    } else if CC_ROOT_RE.is_match(content) {
        CdlFormat::Cc
    } else {
        CdlFormat::Unknown
    }
}

/// Whether content looks like one of the CDL container dialects.
pub(crate) fn is_cdl_xml(content: &str) -> bool {
    detect_format(content) != CdlFormat::Unknown
}

/// Parse a `.cdl` / `.cc` / `.ccc` document.
///
/// Never fails: an unrecognized root, unparsable XML, or a block with a
/// broken SOP triplet each produce a warning, and whatever parsed cleanly
/// is returned.
pub fn parse_cdl_file(content: &str) -> CdlParseResult {
    let mut result = CdlParseResult {
        cdls: Vec::new(),
        warnings: Vec::new(),
        format: detect_format(content),
    };

    if result.format == CdlFormat::Unknown {
        result.warnings.push(
            "Could not detect CDL format - no ColorDecisionList, ColorCorrectionCollection, \
             or ColorCorrection root element found"
                .to_string(),
        );
        return result;
    }

    let doc = match roxmltree::Document::parse(content) {
        Ok(doc) => doc,
        Err(e) => {
            result.warnings.push(format!("XML parse error: {}", e));
            return result;
        }
    };

    let blocks: Vec<_> = doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "ColorCorrection")
        .collect();

    if blocks.is_empty() {
        result
            .warnings
            .push("No ColorCorrection elements found in file".to_string());
        return result;
    }

    for (index, block) in blocks.iter().enumerate() {
        if let Some(cdl) = parse_color_correction(*block, index, &mut result.warnings) {
            result.cdls.push(cdl);
        }
    }

    result
}

/// Parse one ColorCorrection element; `None` drops the block.
fn parse_color_correction(
    block: roxmltree::Node,
    index: usize,
    warnings: &mut Vec<String>,
) -> Option<CdlValues> {
    let id = block.attribute("id").unwrap_or("").to_string();
    let description = child_text(block, "Description")
        .or_else(|| descendant_text(block, "Description"))
        .unwrap_or_default();

    let slope = triplet_of(block, "Slope");
    if slope.is_none() {
        warnings.push(format!("Block {}: Invalid or missing Slope values", index + 1));
    }
    let offset = triplet_of(block, "Offset");
    if offset.is_none() {
        warnings.push(format!("Block {}: Invalid or missing Offset values", index + 1));
    }
    let power = triplet_of(block, "Power");
    if power.is_none() {
        warnings.push(format!("Block {}: Invalid or missing Power values", index + 1));
    }

    let mut saturation = 1.0;
    if let Some(text) = descendant_text(block, "Saturation") {
        match text.trim().parse::<f64>() {
            Ok(value) => saturation = value,
            Err(_) => warnings.push(format!(
                "Block {}: Invalid Saturation value, using default 1.0",
                index + 1
            )),
        }
    }

    let (slope, offset, power) = (slope?, offset?, power?);

    Some(CdlValues {
        id,
        description,
        slope_r: slope[0],
        slope_g: slope[1],
        slope_b: slope[2],
        offset_r: offset[0],
        offset_g: offset[1],
        offset_b: offset[2],
        power_r: power[0],
        power_g: power[1],
        power_b: power[2],
        saturation,
    })
}

/// RGB triplet from the named descendant: exactly three whitespace-
/// separated floats, or `None`.
fn triplet_of(block: roxmltree::Node, name: &str) -> Option<[f64; 3]> {
    let text = descendant_text(block, name)?;
    parse_rgb_triplet(&text)
}

/// Parse "1.0000 0.9800 1.0200" into three floats.
fn parse_rgb_triplet(text: &str) -> Option<[f64; 3]> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() != 3 {
        return None;
    }
    let r = parts[0].parse().ok()?;
    let g = parts[1].parse().ok()?;
    let b = parts[2].parse().ok()?;
    Some([r, g, b])
}
