//! Stone mask preparation: threshold, close gaps, optionally smooth.

use goban_core::{
    box_blur, dilate, erode, otsu_level, threshold, GrayImage, GrayImageView, StoneColor,
    StructuringElement, ThresholdMode,
};
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};

/// Source channel of a stone mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[default]
    Gray,
    Red,
    Blue,
}

/// How to turn one image channel into a mask with stones as foreground.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StoneMaskParams {
    pub channel: Channel,
    /// Fixed threshold level, ignored when `auto_threshold` is set.
    pub threshold: u8,
    /// Pick the level with Otsu's method instead.
    pub auto_threshold: bool,
    pub max_val: u8,
    pub mode: ThresholdMode,
    pub dilate_iter: usize,
    pub erode_iter: usize,
    /// Elliptical kernel size for dilation and erosion.
    pub kernel_size: usize,
    /// Box blur window; 0 or 1 disables it.
    pub blur_size: usize,
}

impl Default for StoneMaskParams {
    fn default() -> Self {
        Self::for_color(StoneColor::Black)
    }
}

impl StoneMaskParams {
    /// Black stones are dark in the red channel, white stones bright in the
    /// blue one.
    pub fn for_color(color: StoneColor) -> Self {
        let (channel, threshold, mode) = match color {
            StoneColor::Black => (Channel::Red, 80, ThresholdMode::BinaryInv),
            StoneColor::White => (Channel::Blue, 160, ThresholdMode::Binary),
        };
        Self {
            channel,
            threshold,
            auto_threshold: false,
            max_val: 255,
            mode,
            dilate_iter: 1,
            erode_iter: 1,
            kernel_size: 3,
            blur_size: 0,
        }
    }
}

/// Partial [`StoneMaskParams`]; missing fields keep a per-color base.
#[derive(Deserialize)]
struct StoneMaskOverrides {
    channel: Option<Channel>,
    threshold: Option<u8>,
    auto_threshold: Option<bool>,
    max_val: Option<u8>,
    mode: Option<ThresholdMode>,
    dilate_iter: Option<usize>,
    erode_iter: Option<usize>,
    kernel_size: Option<usize>,
    blur_size: Option<usize>,
}

impl StoneMaskOverrides {
    fn apply(self, base: StoneMaskParams) -> StoneMaskParams {
        StoneMaskParams {
            channel: self.channel.unwrap_or(base.channel),
            threshold: self.threshold.unwrap_or(base.threshold),
            auto_threshold: self.auto_threshold.unwrap_or(base.auto_threshold),
            max_val: self.max_val.unwrap_or(base.max_val),
            mode: self.mode.unwrap_or(base.mode),
            dilate_iter: self.dilate_iter.unwrap_or(base.dilate_iter),
            erode_iter: self.erode_iter.unwrap_or(base.erode_iter),
            kernel_size: self.kernel_size.unwrap_or(base.kernel_size),
            blur_size: self.blur_size.unwrap_or(base.blur_size),
        }
    }
}

fn mask_over<'de, D: Deserializer<'de>>(
    deserializer: D,
    color: StoneColor,
) -> Result<StoneMaskParams, D::Error> {
    let overrides = StoneMaskOverrides::deserialize(deserializer)?;
    Ok(overrides.apply(StoneMaskParams::for_color(color)))
}

pub(crate) fn black_mask_params<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<StoneMaskParams, D::Error> {
    mask_over(deserializer, StoneColor::Black)
}

pub(crate) fn white_mask_params<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<StoneMaskParams, D::Error> {
    mask_over(deserializer, StoneColor::White)
}

/// Build a binary stone mask from one channel.
pub fn prepare_mask(src: &GrayImageView<'_>, params: &StoneMaskParams) -> GrayImage {
    let level = if params.auto_threshold {
        otsu_level(src)
    } else {
        params.threshold
    };
    let mut mask = threshold(src, level, params.max_val, params.mode);

    let kernel = StructuringElement::ellipse(params.kernel_size);
    if params.dilate_iter > 0 {
        mask = dilate(&mask.view(), &kernel, params.dilate_iter);
    }
    if params.erode_iter > 0 {
        mask = erode(&mask.view(), &kernel, params.erode_iter);
    }
    if params.blur_size > 1 {
        mask = box_blur(&mask.view(), params.blur_size);
    }

    debug!(
        "{:?} mask at level {level}: {} foreground pixels",
        params.channel,
        mask.view().count_foreground()
    );
    mask
}
