//! Engine configuration.
//!
//! Every ambient default the exporters and parsers rely on lives here, so
//! each assumption is visible at the call site instead of hard-coded in a
//! format module. Callers that want the stock turnover behavior can pass
//! `EngineConfig::default()`.

use serde::{Deserialize, Serialize};

/// Default frame rate when a format carries none.
pub const DEFAULT_FPS: f64 = 24.0;

/// Reel name used when a shot supplies neither reel nor clip name.
pub const DEFAULT_REEL: &str = "AX";

/// Frames advanced per shot when synthesizing record timecodes.
pub const DEFAULT_RECORD_STRIDE: i64 = 100;

/// Configuration shared by the parsers and exporters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Frame rate used wherever the input does not declare one.
    #[serde(default = "default_fps")]
    pub fps: f64,

    /// Generate `;`-separated timecodes and a DROP FRAME header.
    #[serde(default)]
    pub drop_frame: bool,

    /// Raster width for generated sequences.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Raster height for generated sequences.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Reel name for shots with no reel or clip identity.
    #[serde(default = "default_reel")]
    pub default_reel: String,

    /// Placeholder record advance, in frames, per exported shot that has no
    /// real record timecodes. This is a convention, not a frame-accurate
    /// reconstruction.
    #[serde(default = "default_record_stride")]
    pub record_stride: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            drop_frame: false,
            width: 1920,
            height: 1080,
            default_reel: DEFAULT_REEL.to_string(),
            record_stride: DEFAULT_RECORD_STRIDE,
        }
    }
}

impl EngineConfig {
    /// Config with a specific frame rate, other fields stock.
    pub fn with_fps(fps: f64) -> Self {
        Self {
            fps,
            ..Self::default()
        }
    }
}

fn default_fps() -> f64 {
    DEFAULT_FPS
}

fn default_width() -> u32 {
    1920
}

fn default_height() -> u32 {
    1080
}

fn default_reel() -> String {
    DEFAULT_REEL.to_string()
}

fn default_record_stride() -> i64 {
    DEFAULT_RECORD_STRIDE
}
