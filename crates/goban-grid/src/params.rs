use crate::size::SizeCatalog;
use serde::{Deserialize, Serialize};

/// Parameters for board calibration from line segments.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CalibrationParams {
    /// Max endpoint difference (pixels) along one axis for a segment to count
    /// as axis-aligned.
    pub axis_tolerance_px: f32,

    /// Lines closer than this (pixels) collapse into one grid line.
    pub line_merge_tolerance_px: f32,

    /// Segments within this distance (pixels) of the image border are
    /// treated as frame artifacts and dropped.
    pub border_margin_px: f32,

    /// Canonical board sizes and the fallback size.
    pub size_catalog: SizeCatalog,
}

impl Default for CalibrationParams {
    fn default() -> Self {
        Self {
            axis_tolerance_px: 3.0,
            line_merge_tolerance_px: 10.0,
            border_margin_px: 5.0,
            size_catalog: SizeCatalog::default(),
        }
    }
}
