//! ALE reader.
//!
//! # Format Overview
//!
//! ```text
//! Heading
//! FIELD_DELIM	TABS
//! VIDEO_FORMAT	1080
//! FPS	24
//!
//! Column
//! Name	Start	End	Scene	Take	ASC_SOP
//!
//! Data
//! A023_A003_1006NV	10:22:15:00	10:22:19:00	23A	2	(1.01 0.99 1.04)(...)(...)
//! ```
//!
//! Three tab-delimited sections. Data rows are keyed by the Column line;
//! short rows fill missing cells with empty strings, long rows warn.

use crate::cdl::CdlValues;

use super::types::{AleHeading, AleParseResult, AleRecord, AscSop};

/// Parse the `(s s s)(o o o)(p p p)` triplet form of an ASC_SOP column.
pub fn parse_asc_sop(sop: &str) -> Option<AscSop> {
    if sop.trim().is_empty() {
        return None;
    }
    let cdl = CdlValues::from_sop_sat(sop, None)?;
    Some(AscSop {
        slope: [cdl.slope_r, cdl.slope_g, cdl.slope_b],
        offset: [cdl.offset_r, cdl.offset_g, cdl.offset_b],
        power: [cdl.power_r, cdl.power_g, cdl.power_b],
    })
}

/// Parse an ASC_SAT column value.
pub fn parse_asc_sat(sat: &str) -> Option<f64> {
    sat.trim().parse().ok()
}

enum Section {
    None,
    Heading,
    Column,
    Data,
}

/// Parse ALE content. Structural problems (rows before columns, ragged
/// rows) are warnings, never errors.
pub fn parse_ale(content: &str) -> AleParseResult {
    let mut warnings: Vec<String> = Vec::new();
    let mut section = Section::None;
    let mut heading = AleHeading::default();
    let mut columns: Vec<String> = Vec::new();
    let mut records: Vec<AleRecord> = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        let line_num = i + 1;

        if trimmed.is_empty() {
            continue;
        }

        match trimmed {
            "Heading" => {
                section = Section::Heading;
                continue;
            }
            "Column" => {
                section = Section::Column;
                continue;
            }
            "Data" => {
                section = Section::Data;
                continue;
            }
            _ => {}
        }

        match section {
            Section::None => {}
            Section::Heading => {
                let (key, value) = match trimmed.split_once('\t') {
                    Some((key, value)) => (key.trim(), value.trim()),
                    None => (trimmed, ""),
                };
                match key.to_uppercase().as_str() {
                    "FIELD_DELIM" => heading.field_delimiter = value.to_string(),
                    "VIDEO_FORMAT" => heading.video_format = Some(value.to_string()),
                    "AUDIO_FORMAT" => heading.audio_format = Some(value.to_string()),
                    "FPS" => heading.fps = Some(value.to_string()),
                    _ => {
                        heading.extra.insert(key.to_string(), value.to_string());
                    }
                }
            }
            Section::Column => {
                columns = line
                    .split('\t')
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                    .collect();
                if columns.is_empty() {
                    warnings.push(format!("Line {}: Empty column definition", line_num));
                }
            }
            Section::Data => {
                if columns.is_empty() {
                    warnings.push(format!("Line {}: Data row before column definition", line_num));
                    continue;
                }
                let values: Vec<&str> = line.split('\t').collect();
                let mut record = AleRecord::default();
                for (c, column) in columns.iter().enumerate() {
                    let value = values.get(c).map(|v| v.trim()).unwrap_or("");
                    record.0.insert(column.clone(), value.to_string());
                }
                if values.len() > columns.len() {
                    warnings.push(format!(
                        "Line {}: Row has {} values but only {} columns",
                        line_num,
                        values.len(),
                        columns.len()
                    ));
                }
                records.push(record);
            }
        }
    }

    if columns.is_empty() {
        warnings.push("No column definition found in ALE file".to_string());
    }

    AleParseResult {
        heading,
        columns,
        record_count: records.len(),
        records,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Heading\n\
FIELD_DELIM\tTABS\n\
VIDEO_FORMAT\t1080\n\
FPS\t23.976\n\
PROJECT\tNIGHTFALL\n\
\n\
Column\n\
Name\tStart\tEnd\tScene\tTake\tCircled\tASC_SOP\tASC_SAT\n\
\n\
Data\n\
A023_A003_1006NV\t10:22:15:00\t10:22:19:00\t23A\t2\tY\t(1.01 0.99 1.04)(-0.01 0.00 -0.01)(1.00 1.00 0.99)\t0.93\n\
B007_C011_0402AB\t11:04:00:00\t11:04:02:00\t23B\t1\t\t\t\n";

    #[test]
    fn test_heading() {
        let result = parse_ale(SAMPLE);
        assert_eq!(result.heading.field_delimiter, "TABS");
        assert_eq!(result.heading.video_format.as_deref(), Some("1080"));
        assert_eq!(result.heading.fps.as_deref(), Some("23.976"));
        assert_eq!(
            result.heading.extra.get("PROJECT").map(String::as_str),
            Some("NIGHTFALL")
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_records() {
        let result = parse_ale(SAMPLE);
        assert_eq!(result.record_count, 2);
        assert_eq!(result.columns.len(), 8);

        let first = &result.records[0];
        assert_eq!(first.clip_name(), Some("A023_A003_1006NV"));
        assert_eq!(first.get("Start"), Some("10:22:15:00"));
        assert!(first.is_circled());
        assert_eq!(first.scene_take(), ("23A".to_string(), "2".to_string()));

        let second = &result.records[1];
        assert!(!second.is_circled());
        assert_eq!(second.get("ASC_SOP"), None);
    }

    #[test]
    fn test_short_row_fills_empty() {
        let content = "Column\nName\tScene\tTake\nData\nA001\n";
        let result = parse_ale(content);
        assert_eq!(result.records[0].get("Scene"), None);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_long_row_warns() {
        let content = "Column\nName\nData\nA001\textra\n";
        let result = parse_ale(content);
        assert_eq!(result.record_count, 1);
        assert!(result.warnings[0].contains("2 values but only 1 columns"));
    }

    #[test]
    fn test_data_before_columns_warns() {
        let content = "Data\nA001\t10:00:00:00\n";
        let result = parse_ale(content);
        assert!(result.records.is_empty());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("Data row before column definition")));
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("No column definition")));
    }

    #[test]
    fn test_parse_asc_sop() {
        let sop = parse_asc_sop("(1.01 0.99 1.04)(-0.01 0.00 -0.01)(1.00 1.00 0.99)").unwrap();
        assert_eq!(sop.slope, [1.01, 0.99, 1.04]);
        assert_eq!(sop.offset, [-0.01, 0.0, -0.01]);
        assert_eq!(sop.power, [1.0, 1.0, 0.99]);
        assert!(parse_asc_sop("").is_none());
        assert!(parse_asc_sop("not a sop").is_none());
    }

    #[test]
    fn test_parse_asc_sat() {
        assert_eq!(parse_asc_sat(" 0.93 "), Some(0.93));
        assert_eq!(parse_asc_sat(""), None);
        assert_eq!(parse_asc_sat("n/a"), None);
    }
}
