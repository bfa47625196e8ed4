use serde::{Deserialize, Serialize};

/// Parameters for watershed stone separation.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SeparationParams {
    /// Half-size (pixels) of the square searched around a seed that does not
    /// sit on foreground.
    pub seed_search_radius_px: u32,
    /// Regions whose enclosing circle is larger than this are not stones.
    pub sanity_max_radius_px: f32,
}

impl Default for SeparationParams {
    fn default() -> Self {
        Self {
            seed_search_radius_px: 5,
            sanity_max_radius_px: 20.0,
        }
    }
}
