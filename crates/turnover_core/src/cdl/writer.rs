//! ASC CDL serializers.
//!
//! Three shapes: a single-correction `.cdl` (ColorDecisionList), a bare
//! `.cc` (ColorCorrection), and a project-wide ColorDecisionList holding
//! one correction per shot. Floats are written with exactly six decimal
//! places; identifiers are XML-escaped.

use crate::xml::escape_xml;

use super::types::CdlValues;

const ASC_NAMESPACE: &str = "urn:ASC:CDL:v1.01";

/// Export one correction as a `.cdl` (ColorDecisionList) document.
///
/// `identifier` becomes the ColorCorrection id (typically the shot code).
pub fn export_cdl(identifier: &str, cdl: &CdlValues) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<ColorDecisionList xmlns=\"{}\">\n\
  <ColorDecision>\n\
{}\n\
  </ColorDecision>\n\
</ColorDecisionList>",
        ASC_NAMESPACE,
        correction_block(identifier, cdl, "    ")
    )
}

/// Export one correction as a bare `.cc` (ColorCorrection) document.
pub fn export_cc(identifier: &str, cdl: &CdlValues) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<ColorCorrection xmlns=\"{}\" id=\"{}\">\n\
  <SOPNode>\n\
    <Slope>{}</Slope>\n\
    <Offset>{}</Offset>\n\
    <Power>{}</Power>\n\
  </SOPNode>\n\
  <SatNode>\n\
    <Saturation>{}</Saturation>\n\
  </SatNode>\n\
</ColorCorrection>",
        ASC_NAMESPACE,
        escape_xml(identifier),
        slope_string(cdl),
        offset_string(cdl),
        power_string(cdl),
        fmt6(cdl.saturation)
    )
}

/// Export every correction of a project as a single ColorDecisionList.
///
/// `identifiers` pairs each correction with its shot code; both slices
/// iterate in lockstep.
pub fn export_project_cdl(project_name: &str, corrections: &[(String, CdlValues)]) -> String {
    let blocks: Vec<String> = corrections
        .iter()
        .map(|(identifier, cdl)| correction_block(identifier, cdl, "    "))
        .collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<!-- Project: {} -->\n\
<ColorDecisionList xmlns=\"{}\">\n\
  <ColorDecision>\n\
{}\n\
  </ColorDecision>\n\
</ColorDecisionList>",
        escape_xml(project_name),
        ASC_NAMESPACE,
        blocks.join("\n")
    )
}

/// One indented ColorCorrection block.
fn correction_block(identifier: &str, cdl: &CdlValues, indent: &str) -> String {
    format!(
        "{i}<ColorCorrection id=\"{id}\">\n\
{i}  <SOPNode>\n\
{i}    <Slope>{slope}</Slope>\n\
{i}    <Offset>{offset}</Offset>\n\
{i}    <Power>{power}</Power>\n\
{i}  </SOPNode>\n\
{i}  <SatNode>\n\
{i}    <Saturation>{sat}</Saturation>\n\
{i}  </SatNode>\n\
{i}</ColorCorrection>",
        i = indent,
        id = escape_xml(identifier),
        slope = slope_string(cdl),
        offset = offset_string(cdl),
        power = power_string(cdl),
        sat = fmt6(cdl.saturation)
    )
}

fn slope_string(cdl: &CdlValues) -> String {
    format!(
        "{} {} {}",
        fmt6(cdl.slope_r),
        fmt6(cdl.slope_g),
        fmt6(cdl.slope_b)
    )
}

fn offset_string(cdl: &CdlValues) -> String {
    format!(
        "{} {} {}",
        fmt6(cdl.offset_r),
        fmt6(cdl.offset_g),
        fmt6(cdl.offset_b)
    )
}

fn power_string(cdl: &CdlValues) -> String {
    format!(
        "{} {} {}",
        fmt6(cdl.power_r),
        fmt6(cdl.power_g),
        fmt6(cdl.power_b)
    )
}

/// Six decimal places, always.
fn fmt6(value: f64) -> String {
    format!("{:.6}", value)
}
