//! The source media record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cdl::CdlValues;

/// One dailies clip. Everything an ALE can say about a piece of media,
/// normalized to fixed fields; unmapped columns land in
/// `custom_metadata`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceMedia {
    /// Original clip name, e.g. `A023_A003_1006NV.mov`.
    pub clip_name: String,
    /// Tape/card name.
    pub tape: Option<String>,
    /// Camera-generated UUID if available.
    pub uuid: Option<String>,

    pub tc_in: Option<String>,
    pub tc_out: Option<String>,
    /// Frame numbers for matching.
    pub tc_in_frames: Option<i64>,
    pub tc_out_frames: Option<i64>,
    pub fps: f64,
    pub duration_frames: Option<i64>,

    pub file_path: Option<String>,
    /// mov, mxf, r3d, ...
    pub file_type: Option<String>,
    /// e.g. `3840x2160`.
    pub resolution: Option<String>,
    pub codec: Option<String>,

    /// Camera model.
    pub camera: Option<String>,
    /// A-cam, B-cam, ...
    pub camera_id: Option<String>,
    pub camera_roll: Option<String>,
    pub lens: Option<String>,
    pub focal_length: Option<String>,
    pub focus_distance: Option<String>,
    pub f_stop: Option<String>,
    pub t_stop: Option<String>,
    pub iso: Option<String>,
    /// Shutter angle or speed.
    pub shutter: Option<String>,
    /// Native sensor FPS (overcrank detection).
    pub sensor_fps: Option<String>,
    pub white_balance: Option<String>,

    pub scene: Option<String>,
    pub take: Option<String>,
    pub circled: bool,
    pub day_night: Option<String>,
    pub int_ext: Option<String>,
    pub location: Option<String>,

    pub director: Option<String>,
    pub dop: Option<String>,

    pub sound_roll: Option<String>,
    pub sound_tc: Option<String>,

    pub colorspace: Option<String>,
    pub look: Option<String>,
    pub lut: Option<String>,

    pub cdl_slope_r: Option<f64>,
    pub cdl_slope_g: Option<f64>,
    pub cdl_slope_b: Option<f64>,
    pub cdl_offset_r: Option<f64>,
    pub cdl_offset_g: Option<f64>,
    pub cdl_offset_b: Option<f64>,
    pub cdl_power_r: Option<f64>,
    pub cdl_power_g: Option<f64>,
    pub cdl_power_b: Option<f64>,
    pub cdl_saturation: Option<f64>,

    pub shoot_date: Option<String>,
    /// Production day number.
    pub shoot_day: Option<String>,

    /// Which ALE file this record came from.
    pub ale_source: Option<String>,

    /// ALE columns with no mapped field, non-empty values only.
    pub custom_metadata: BTreeMap<String, String>,
}

impl SourceMedia {
    pub fn new(clip_name: impl Into<String>) -> Self {
        Self {
            clip_name: clip_name.into(),
            fps: 24.0,
            ..Self::default()
        }
    }

    /// Whether the record carries a grade.
    pub fn has_cdl(&self) -> bool {
        self.cdl_slope_r.is_some()
    }

    /// The grade as a [`CdlValues`] record, identified by clip name.
    /// `None` unless all nine SOP values are present.
    pub fn cdl_values(&self) -> Option<CdlValues> {
        Some(CdlValues {
            id: self.clip_name.clone(),
            description: String::new(),
            slope_r: self.cdl_slope_r?,
            slope_g: self.cdl_slope_g?,
            slope_b: self.cdl_slope_b?,
            offset_r: self.cdl_offset_r?,
            offset_g: self.cdl_offset_g?,
            offset_b: self.cdl_offset_b?,
            power_r: self.cdl_power_r?,
            power_g: self.cdl_power_g?,
            power_b: self.cdl_power_b?,
            saturation: self.cdl_saturation.unwrap_or(1.0),
        })
    }

    /// The grade's SOP triplets in the compact textual form ALEs carry.
    pub fn asc_sop_string(&self) -> Option<String> {
        let cdl = self.cdl_values()?;
        Some(format!(
            "({:.4} {:.4} {:.4})({:.4} {:.4} {:.4})({:.4} {:.4} {:.4})",
            cdl.slope_r,
            cdl.slope_g,
            cdl.slope_b,
            cdl.offset_r,
            cdl.offset_g,
            cdl.offset_b,
            cdl.power_r,
            cdl.power_g,
            cdl.power_b,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdl_values_require_full_sop() {
        let mut sm = SourceMedia::new("A001");
        assert!(!sm.has_cdl());
        assert!(sm.cdl_values().is_none());

        sm.cdl_slope_r = Some(1.01);
        assert!(sm.has_cdl());
        // Partial SOP is not a usable grade.
        assert!(sm.cdl_values().is_none());

        sm.cdl_slope_g = Some(1.0);
        sm.cdl_slope_b = Some(1.0);
        sm.cdl_offset_r = Some(0.0);
        sm.cdl_offset_g = Some(0.0);
        sm.cdl_offset_b = Some(0.0);
        sm.cdl_power_r = Some(1.0);
        sm.cdl_power_g = Some(1.0);
        sm.cdl_power_b = Some(1.0);
        let cdl = sm.cdl_values().unwrap();
        assert_eq!(cdl.id, "A001");
        assert_eq!(cdl.saturation, 1.0);
        assert_eq!(
            sm.asc_sop_string().as_deref(),
            Some("(1.0100 1.0000 1.0000)(0.0000 0.0000 0.0000)(1.0000 1.0000 1.0000)")
        );
    }
}
