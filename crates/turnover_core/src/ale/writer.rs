//! ALE writer.

use crate::config::EngineConfig;
use crate::models::Shot;
use crate::source_media::SourceMedia;

/// Options for [`generate_ale`]. ALE heading values are strings as
/// written, so fps stays textual ("23.976" round-trips exactly).
#[derive(Debug, Clone)]
pub struct AleOptions {
    pub fps: String,
    pub video_format: String,
}

impl Default for AleOptions {
    fn default() -> Self {
        Self {
            fps: "24".to_string(),
            video_format: "1080".to_string(),
        }
    }
}

impl AleOptions {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            fps: format!("{}", config.fps),
            video_format: format!("{}", config.height),
        }
    }
}

/// One output row. Every field maps to one exported column.
#[derive(Debug, Clone, Default)]
pub struct AleRow {
    pub code: String,
    pub clip_name: Option<String>,
    pub source_in: Option<String>,
    pub source_out: Option<String>,
    pub duration: Option<String>,
    pub scene: Option<String>,
    pub take: Option<String>,
    pub camera: Option<String>,
    pub camera_model: Option<String>,
    pub lens: Option<String>,
    pub focal_length: Option<String>,
    pub iso: Option<String>,
    pub shutter: Option<String>,
    pub white_balance: Option<String>,
    pub asc_sop: Option<String>,
    pub asc_sat: Option<String>,
    pub lut: Option<String>,
    pub notes: Option<String>,
}

impl AleRow {
    /// Row from a shot's editorial fields only.
    pub fn from_shot(shot: &Shot) -> Self {
        Self {
            code: shot.code.clone(),
            clip_name: shot.clip_name.clone(),
            source_in: shot.source_in.clone(),
            source_out: shot.source_out.clone(),
            scene: shot.scene.clone(),
            take: shot.take.clone(),
            camera: shot.camera.clone(),
            notes: shot.notes.clone(),
            ..Self::default()
        }
    }

    /// Fill camera and color columns from matched source media.
    pub fn apply_source_media(&mut self, sm: &SourceMedia) {
        self.camera_model = sm.camera.clone();
        self.lens = sm.lens.clone();
        self.focal_length = sm.focal_length.clone();
        self.iso = sm.iso.clone();
        self.shutter = sm.shutter.clone();
        self.white_balance = sm.white_balance.clone();
        self.asc_sop = sm.asc_sop_string();
        self.asc_sat = sm.cdl_saturation.map(|s| format!("{:.4}", s));
        self.lut = sm.lut.clone();
    }
}

/// The fixed export column vocabulary.
const COLUMNS: [&str; 18] = [
    "Name",
    "Clip Name",
    "Start",
    "End",
    "Duration",
    "Scene",
    "Take",
    "Camera",
    "Camera Model",
    "Lens",
    "Focal Length",
    "ISO",
    "Shutter",
    "White Balance",
    "ASC_SOP",
    "ASC_SAT",
    "LUT",
    "Comments",
];

/// Generate ALE content: Heading, the fixed Column list, and one Data
/// row per input. Missing start/end/duration cells get the documented
/// `00:00:00:00` / `00:00:04:00` placeholders.
pub fn generate_ale(rows: &[AleRow], options: &AleOptions) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("Heading".to_string());
    lines.push("FIELD_DELIM\tTABS".to_string());
    lines.push(format!("VIDEO_FORMAT\t{}", options.video_format));
    lines.push(format!("FPS\t{}", options.fps));
    lines.push(String::new());

    lines.push("Column".to_string());
    lines.push(COLUMNS.join("\t"));
    lines.push(String::new());

    lines.push("Data".to_string());
    for row in rows {
        let cells = [
            row.code.clone(),
            row.clip_name
                .clone()
                .unwrap_or_else(|| row.code.clone()),
            row.source_in
                .clone()
                .unwrap_or_else(|| "00:00:00:00".to_string()),
            row.source_out
                .clone()
                .unwrap_or_else(|| "00:00:04:00".to_string()),
            row.duration
                .clone()
                .unwrap_or_else(|| "00:00:04:00".to_string()),
            row.scene.clone().unwrap_or_default(),
            row.take.clone().unwrap_or_default(),
            row.camera.clone().unwrap_or_default(),
            row.camera_model.clone().unwrap_or_default(),
            row.lens.clone().unwrap_or_default(),
            row.focal_length.clone().unwrap_or_default(),
            row.iso.clone().unwrap_or_default(),
            row.shutter.clone().unwrap_or_default(),
            row.white_balance.clone().unwrap_or_default(),
            row.asc_sop.clone().unwrap_or_default(),
            row.asc_sat.clone().unwrap_or_default(),
            row.lut.clone().unwrap_or_default(),
            row.notes.clone().unwrap_or_default(),
        ];
        lines.push(cells.join("\t"));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ale::parse_ale;

    fn sample_row() -> AleRow {
        let mut shot = Shot::new("044_0010");
        shot.clip_name = Some("A023_A003_1006NV".to_string());
        shot.source_in = Some("10:22:15:00".to_string());
        shot.source_out = Some("10:22:19:00".to_string());
        shot.scene = Some("23A".to_string());
        shot.take = Some("2".to_string());
        AleRow::from_shot(&shot)
    }

    #[test]
    fn test_sections_and_columns() {
        let ale = generate_ale(&[sample_row()], &AleOptions::default());
        assert!(ale.starts_with("Heading\nFIELD_DELIM\tTABS\nVIDEO_FORMAT\t1080\nFPS\t24\n"));
        assert!(ale.contains("\nColumn\nName\tClip Name\tStart\t"));
        assert!(ale.contains("\nData\n"));
    }

    #[test]
    fn test_round_trips_through_parser() {
        let ale = generate_ale(&[sample_row()], &AleOptions::default());
        let parsed = parse_ale(&ale);
        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.columns.len(), 18);
        assert_eq!(parsed.record_count, 1);

        let record = &parsed.records[0];
        assert_eq!(record.clip_name(), Some("044_0010"));
        assert_eq!(record.get("Clip Name"), Some("A023_A003_1006NV"));
        assert_eq!(record.get("Start"), Some("10:22:15:00"));
        assert_eq!(record.scene_take(), ("23A".to_string(), "2".to_string()));
    }

    #[test]
    fn test_placeholders_for_missing_timecodes() {
        let row = AleRow {
            code: "044_0020".to_string(),
            ..AleRow::default()
        };
        let ale = generate_ale(&[row], &AleOptions::default());
        assert!(ale.contains("044_0020\t044_0020\t00:00:00:00\t00:00:04:00\t00:00:04:00\t"));
    }

    #[test]
    fn test_source_media_enrichment() {
        let mut sm = SourceMedia::new("A023_A003_1006NV.mov");
        sm.camera = Some("ALEXA 35".to_string());
        sm.lens = Some("Cooke Anam/i 50mm".to_string());
        sm.iso = Some("800".to_string());
        sm.cdl_slope_r = Some(1.01);
        sm.cdl_slope_g = Some(0.99);
        sm.cdl_slope_b = Some(1.04);
        sm.cdl_offset_r = Some(-0.01);
        sm.cdl_offset_g = Some(0.0);
        sm.cdl_offset_b = Some(-0.01);
        sm.cdl_power_r = Some(1.0);
        sm.cdl_power_g = Some(1.0);
        sm.cdl_power_b = Some(0.99);
        sm.cdl_saturation = Some(0.93);

        let mut row = sample_row();
        row.apply_source_media(&sm);
        let ale = generate_ale(&[row], &AleOptions::default());
        assert!(ale.contains("ALEXA 35"));
        assert!(ale.contains("(1.0100 0.9900 1.0400)(-0.0100 0.0000 -0.0100)(1.0000 1.0000 0.9900)"));
        assert!(ale.contains("\t0.9300\t"));
    }
}
