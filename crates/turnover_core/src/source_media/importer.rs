//! ALE → [`SourceMedia`] conversion.
//!
//! ALE column vocabularies differ per tool: Avid bins, Silverstack and
//! Pomfort reports, and ARRI camera cards (`Camera_model`, `Lens_type`,
//! `Date_camera`) all name the same facts differently. Each field maps
//! from an ordered alias list; anything unmapped is preserved in
//! `custom_metadata`.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ale::{parse_ale, parse_asc_sat, parse_asc_sop, AleRecord};
use crate::timecode::timecode_to_frames;

use super::types::SourceMedia;

/// Focal length inside a lens description, e.g. `Cooke Anam/i 50mm` or
/// `Angenieux 25-250mm`.
static FOCAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:-\d+)?)\s*mm").expect("valid regex"));

/// ARRI camera date stamp, `YYYYMMDD`.
static ARRI_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})(\d{2})(\d{2})$").expect("valid regex"));

/// Provenance attached to every imported record.
#[derive(Debug, Clone, Default)]
pub struct AleImportOptions {
    /// Filename of the ALE being imported.
    pub ale_source: String,
    /// Override when the ALE itself carries no shoot date.
    pub shoot_date: Option<String>,
    /// Production day number.
    pub shoot_day: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SourceMediaImport {
    pub records: Vec<SourceMedia>,
    pub warnings: Vec<String>,
}

/// Parse ALE content and convert every row to a [`SourceMedia`] record.
/// Rows with no recognizable clip name are skipped with a warning.
pub fn ale_to_source_media(content: &str, options: &AleImportOptions) -> SourceMediaImport {
    let parsed = parse_ale(content);
    let mut warnings = parsed.warnings.clone();
    let mut records = Vec::new();

    let fps: f64 = parsed
        .heading
        .fps
        .as_deref()
        .and_then(|v| v.parse().ok())
        .unwrap_or(24.0);

    for row in &parsed.records {
        let Some(clip_name) = row.clip_name() else {
            tracing::warn!("ALE row carries no clip name, skipping");
            warnings.push("Skipping record with no clip name".to_string());
            continue;
        };
        records.push(record_from_row(row, clip_name, fps, options));
    }

    SourceMediaImport { records, warnings }
}

fn record_from_row(
    row: &AleRecord,
    clip_name: &str,
    fps: f64,
    options: &AleImportOptions,
) -> SourceMedia {
    let owned = |v: Option<&str>| v.map(|s| s.to_string());

    let sop = row
        .first_of(&["ASC_SOP", "ASC SOP"])
        .and_then(parse_asc_sop);
    let sat = row.first_of(&["ASC_SAT", "ASC SAT"]).and_then(parse_asc_sat);

    let tc_in = owned(row.first_of(&["Start", "Start TC", "SRC Start TC"]));
    let tc_out = owned(row.first_of(&["End", "End TC", "SRC End TC"]));
    let tc_in_frames = tc_in.as_deref().map(|tc| timecode_to_frames(tc, fps));
    let tc_out_frames = tc_out.as_deref().map(|tc| timecode_to_frames(tc, fps));
    let duration_frames = row
        .get("Duration")
        .and_then(|v| v.parse::<i64>().ok())
        .or(match (tc_in_frames, tc_out_frames) {
            (Some(tc_in), Some(tc_out)) => Some(tc_out - tc_in),
            _ => None,
        });

    SourceMedia {
        clip_name: clip_name.to_string(),
        tape: owned(row.first_of(&["Tape", "Reel", "Reel_name"])),
        uuid: owned(row.first_of(&["UUID", "Clip UID", "UMI", "Uuid"])),

        tc_in,
        tc_out,
        tc_in_frames,
        tc_out_frames,
        fps,
        duration_frames,

        file_path: owned(row.first_of(&["Filepath", "Source File Path", "Source File"])),
        file_type: owned(row.first_of(&["File Type", "Filetype"]))
            .or_else(|| extract_extension(clip_name)),
        resolution: build_resolution(row),
        codec: owned(row.first_of(&["Video Codec", "Codec", "Original_video"])),

        camera: owned(row.first_of(&[
            "Camera",
            "Camera Type",
            "Camera Model",
            "Camera_model",
            "Manufacturer",
        ])),
        camera_id: owned(row.first_of(&["Camera ID", "Camera Label", "Cam", "Camera_index"])),
        camera_roll: owned(row.first_of(&["Camera Roll", "Roll", "Reel", "Reel_name"])),
        lens: owned(row.first_of(&["Lens", "Lens Type", "Lens_type"])),
        focal_length: owned(row.first_of(&["Focal Length", "Focal Length (mm)"]))
            .or_else(|| row.get("Lens_type").and_then(focal_from_lens_type)),
        focus_distance: owned(row.first_of(&["Focus Distance", "Focus Dist"])),
        f_stop: owned(row.first_of(&["F-Stop", "Aperture"])),
        t_stop: owned(row.get("T-Stop")),
        iso: owned(row.first_of(&["ISO", "EI", "ASA", "Exposure_index"])),
        shutter: owned(row.first_of(&[
            "Shutter",
            "Shutter Angle",
            "Shutter Speed",
            "Shutter_angle",
        ])),
        sensor_fps: owned(row.first_of(&["Sensor FPS", "Project FPS", "Capture FPS", "Sensor_fps"])),
        white_balance: owned(row.first_of(&["White Balance", "WB", "Color Temp", "White_balance"])),

        scene: owned(row.first_of(&["Scene", "Slate"])),
        take: owned(row.first_of(&["Take", "Tk"])),
        circled: row.is_circled(),
        day_night: owned(row.first_of(&["Day/Night", "D/N"])),
        int_ext: owned(row.first_of(&["Int/Ext", "I/E"])),
        location: owned(row.first_of(&["Location", "Set"])),

        director: owned(row.get("Director")),
        dop: owned(row.first_of(&["DP", "DOP", "Cinematographer"])),

        sound_roll: owned(row.first_of(&["Sound Roll", "Audio Roll"])),
        sound_tc: owned(row.first_of(&["Sound TC", "Audio TC"])),

        colorspace: owned(row.first_of(&["Colorspace", "Color Space", "Gamma"])),
        look: owned(row.first_of(&["Look", "LUT", "Look Info", "Look_name"])),
        lut: owned(row.first_of(&["LUT Name", "Applied LUT", "Lut_file_name"])),

        cdl_slope_r: sop.map(|s| s.slope[0]),
        cdl_slope_g: sop.map(|s| s.slope[1]),
        cdl_slope_b: sop.map(|s| s.slope[2]),
        cdl_offset_r: sop.map(|s| s.offset[0]),
        cdl_offset_g: sop.map(|s| s.offset[1]),
        cdl_offset_b: sop.map(|s| s.offset[2]),
        cdl_power_r: sop.map(|s| s.power[0]),
        cdl_power_g: sop.map(|s| s.power[1]),
        cdl_power_b: sop.map(|s| s.power[2]),
        cdl_saturation: sat,

        shoot_date: options
            .shoot_date
            .clone()
            .or_else(|| owned(row.first_of(&["Shoot Date", "Date"])))
            .or_else(|| row.get("Date_camera").map(format_arri_date)),
        shoot_day: options
            .shoot_day
            .clone()
            .or_else(|| owned(row.first_of(&["Shoot Day", "Day"]))),

        ale_source: Some(options.ale_source.clone()),

        custom_metadata: row
            .0
            .iter()
            .filter(|(key, value)| !KNOWN_COLUMNS.contains(key.as_str()) && !value.trim().is_empty())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
    }
}

fn extract_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() || ext.contains('/') {
        return None;
    }
    Some(ext.to_lowercase())
}

fn build_resolution(row: &AleRecord) -> Option<String> {
    let width = row.first_of(&["Resolution Width", "Image Width", "Width", "Frame_width"]);
    let height = row.first_of(&["Resolution Height", "Image Height", "Height", "Frame_height"]);
    if let (Some(width), Some(height)) = (width, height) {
        return Some(format!("{}x{}", width, height));
    }
    // ARRI cards fold resolution into Original_video, e.g. "ARRIRAW (3164p)".
    row.first_of(&["Original_video", "Resolution", "Format"])
        .map(|v| v.to_string())
}

fn focal_from_lens_type(lens_type: &str) -> Option<String> {
    FOCAL_RE
        .captures(lens_type)
        .map(|caps| caps[1].to_string())
}

/// `YYYYMMDD` → `YYYY-MM-DD`; anything else passes through.
fn format_arri_date(date: &str) -> String {
    match ARRI_DATE_RE.captures(date) {
        Some(caps) => format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]),
        None => date.to_string(),
    }
}

/// Columns already mapped to a [`SourceMedia`] field.
static KNOWN_COLUMNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "Name", "Clip Name", "ImageFileName", "Video Clip Name Of Source",
        "Tape", "Reel", "UUID", "Clip UID", "UMI", "Uuid", "Reel_name",
        "Start", "Start TC", "SRC Start TC", "End", "End TC", "SRC End TC", "Duration",
        "Filepath", "Source File Path", "Source File", "File Type", "Filetype",
        "Resolution Width", "Image Width", "Width", "Resolution Height", "Image Height", "Height",
        "Frame_width", "Frame_height", "Original_video",
        "Resolution", "Format", "Video Codec", "Codec",
        "Camera", "Camera Type", "Camera Model", "Camera ID", "Camera Label", "Cam",
        "Camera_model", "Camera_sn", "Camera_index", "Manufacturer",
        "Camera Roll", "Roll", "Lens", "Lens Type", "Lens_type", "Lens_sn",
        "Focal Length", "Focal Length (mm)", "Focus Distance", "Focus Dist", "Focus_distance_unit",
        "F-Stop", "Aperture", "T-Stop", "ISO", "EI", "ASA", "Exposure_index",
        "Shutter", "Shutter Angle", "Shutter Speed", "Shutter_angle",
        "Sensor FPS", "Project FPS", "Capture FPS", "Sensor_fps", "Project_fps",
        "White Balance", "WB", "Color Temp", "White_balance",
        "Scene", "Slate", "Take", "Tk", "Circled", "Circled Take",
        "Day/Night", "D/N", "Int/Ext", "I/E", "Location", "Set",
        "Director", "DP", "DOP", "Cinematographer", "Operator", "Production", "Company",
        "Sound Roll", "Audio Roll", "Sound TC", "Audio TC",
        "Colorspace", "Color Space", "Gamma", "Look", "LUT", "Look Info", "LUT Name", "Applied LUT",
        "Look_name", "Look_burned_in", "Look_intensity", "Look_user_lut", "Lut_file_name",
        "ASC_SOP", "ASC SOP", "ASC_SAT", "ASC SAT",
        "Shoot Date", "Date", "Shoot Day", "Day", "Date_camera", "Time_camera",
        "Nd_filterdensity", "Texture", "Cc_shift", "Enhanced_sensitivity_mode", "Sup_version",
        "Image_orientation", "Image_sharpness", "Image_detail", "Image_denoising",
        "Storage_sn", "User_info1", "User_info2", "FPS", "Tracks", "Clip",
        "Audio_format", "Audio_sr", "Audio_bit",
    ]
    .into_iter()
    .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Heading\n\
FIELD_DELIM\tTABS\n\
FPS\t24\n\
\n\
Column\n\
Name\tTape\tStart\tEnd\tScene\tTake\tCircled\tCamera_model\tLens_type\tExposure_index\tDate_camera\tASC_SOP\tASC_SAT\tMy Custom Col\n\
\n\
Data\n\
A023_A003_1006NV.mov\tA023\t10:22:15:00\t10:22:19:00\t23A\t2\tY\tALEXA 35\tCooke Anam/i 50mm\t800\t20250314\t(1.01 0.99 1.04)(-0.01 0.00 -0.01)(1.00 1.00 0.99)\t0.93\textra value\n\
\tB024\t\t\t\t\t\t\t\t\t\t\t\t\n";

    fn options() -> AleImportOptions {
        AleImportOptions {
            ale_source: "DAY14_A023.ale".to_string(),
            ..AleImportOptions::default()
        }
    }

    #[test]
    fn test_import_maps_aliases() {
        let import = ale_to_source_media(SAMPLE, &options());
        assert_eq!(import.records.len(), 1);
        // The blank row has no clip name.
        assert!(import
            .warnings
            .iter()
            .any(|w| w.contains("no clip name")));

        let sm = &import.records[0];
        assert_eq!(sm.clip_name, "A023_A003_1006NV.mov");
        assert_eq!(sm.tape.as_deref(), Some("A023"));
        assert_eq!(sm.file_type.as_deref(), Some("mov"));
        assert_eq!(sm.camera.as_deref(), Some("ALEXA 35"));
        assert_eq!(sm.lens.as_deref(), Some("Cooke Anam/i 50mm"));
        // Pulled out of the ARRI lens description.
        assert_eq!(sm.focal_length.as_deref(), Some("50"));
        assert_eq!(sm.iso.as_deref(), Some("800"));
        assert_eq!(sm.shoot_date.as_deref(), Some("2025-03-14"));
        assert!(sm.circled);
        assert_eq!(sm.ale_source.as_deref(), Some("DAY14_A023.ale"));
    }

    #[test]
    fn test_import_timecode_and_duration() {
        let import = ale_to_source_media(SAMPLE, &options());
        let sm = &import.records[0];
        assert_eq!(sm.tc_in.as_deref(), Some("10:22:15:00"));
        assert_eq!(sm.tc_in_frames, Some((10 * 3600 + 22 * 60 + 15) * 24));
        assert_eq!(sm.duration_frames, Some(96));
    }

    #[test]
    fn test_import_cdl() {
        let import = ale_to_source_media(SAMPLE, &options());
        let sm = &import.records[0];
        assert!(sm.has_cdl());
        assert_eq!(sm.cdl_slope_b, Some(1.04));
        assert_eq!(sm.cdl_offset_r, Some(-0.01));
        assert_eq!(sm.cdl_saturation, Some(0.93));
        let cdl = sm.cdl_values().unwrap();
        assert!(!cdl.is_identity());
    }

    #[test]
    fn test_custom_metadata_keeps_unmapped_columns() {
        let import = ale_to_source_media(SAMPLE, &options());
        let sm = &import.records[0];
        assert_eq!(
            sm.custom_metadata.get("My Custom Col").map(String::as_str),
            Some("extra value")
        );
        assert_eq!(sm.custom_metadata.len(), 1);
    }

    #[test]
    fn test_shoot_date_override() {
        let mut opts = options();
        opts.shoot_date = Some("2025-04-01".to_string());
        let import = ale_to_source_media(SAMPLE, &opts);
        assert_eq!(import.records[0].shoot_date.as_deref(), Some("2025-04-01"));
    }

    #[test]
    fn test_helpers() {
        assert_eq!(extract_extension("clip.MXF").as_deref(), Some("mxf"));
        assert_eq!(extract_extension("no_extension"), None);
        assert_eq!(
            focal_from_lens_type("Angenieux 25-250mm").as_deref(),
            Some("25-250")
        );
        assert_eq!(focal_from_lens_type("Unknown"), None);
        assert_eq!(format_arri_date("20250314"), "2025-03-14");
        assert_eq!(format_arri_date("2025-03-14"), "2025-03-14");
    }
}
