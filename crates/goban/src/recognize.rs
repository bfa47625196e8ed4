//! Per-image orchestration: calibration, per-color stone passes, grid
//! inference.

use goban_core::{Circle, GrayImage, StoneCandidate, StoneColor};
use goban_grid::{BoardCalibration, BoardCalibrator, CalibrationError, CalibrationParams};
use goban_stones::{infer_stone_grid, separate_stones, BoardState, InferenceReport, SeparationParams};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::channels::BoardChannels;
use crate::detector::{CircleDetector, LineDetector};
use crate::mask::{prepare_mask, StoneMaskParams};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors that abort recognition of one image.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RecognizeError {
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
    #[error("channel size mismatch (expected {}x{}, got {}x{})", expected.0, expected.1, got.0, got.1)]
    ChannelSizeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
    #[error("invalid recognizer parameters: {reason}")]
    InvalidParams { reason: String },
}

/// Non-fatal findings reported alongside a recognition result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecognitionWarning {
    /// Line counts matched no catalog size; the default size was used.
    SizeAmbiguous {
        horizontal: usize,
        vertical: usize,
        size: u32,
    },
    /// Circle centers with no foreground nearby in the stone mask.
    SeedUnresolved { color: StoneColor, count: usize },
    /// Circles or watershed regions larger than the sanity radius.
    OversizedRegion { color: StoneColor, count: usize },
}

/// Parameters for [`BoardRecognizer`].
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RecognizerParams {
    pub calibration: CalibrationParams,
    pub separation: SeparationParams,
    /// Partial objects keep the black defaults for missing fields.
    #[serde(deserialize_with = "crate::mask::black_mask_params")]
    pub black_mask: StoneMaskParams,
    /// Partial objects keep the white defaults for missing fields.
    #[serde(deserialize_with = "crate::mask::white_mask_params")]
    pub white_mask: StoneMaskParams,
    /// Split touching stones with the watershed; otherwise detected circles
    /// are used as they are.
    pub use_watershed: bool,
    /// Keep intermediate masks in the result.
    pub keep_artifacts: bool,
}

impl Default for RecognizerParams {
    fn default() -> Self {
        Self {
            calibration: CalibrationParams::default(),
            separation: SeparationParams::default(),
            black_mask: StoneMaskParams::for_color(StoneColor::Black),
            white_mask: StoneMaskParams::for_color(StoneColor::White),
            use_watershed: true,
            keep_artifacts: false,
        }
    }
}

impl RecognizerParams {
    pub fn mask(&self, color: StoneColor) -> &StoneMaskParams {
        match color {
            StoneColor::Black => &self.black_mask,
            StoneColor::White => &self.white_mask,
        }
    }

    fn validate(&self) -> Result<(), RecognizeError> {
        let invalid = |reason: &str| -> Result<(), RecognizeError> {
            Err(RecognizeError::InvalidParams {
                reason: reason.to_string(),
            })
        };
        let cal = &self.calibration;
        if !(cal.axis_tolerance_px.is_finite() && cal.axis_tolerance_px > 0.0) {
            return invalid("axis_tolerance_px must be positive");
        }
        if !(cal.line_merge_tolerance_px.is_finite() && cal.line_merge_tolerance_px >= 0.0) {
            return invalid("line_merge_tolerance_px must be non-negative");
        }
        if !(cal.border_margin_px.is_finite() && cal.border_margin_px >= 0.0) {
            return invalid("border_margin_px must be non-negative");
        }
        let sanity = self.separation.sanity_max_radius_px;
        if !(sanity.is_finite() && sanity > 0.0) {
            return invalid("sanity_max_radius_px must be positive");
        }
        if self.separation.seed_search_radius_px as f32 > sanity {
            return invalid("seed_search_radius_px must not exceed sanity_max_radius_px");
        }
        Ok(())
    }
}

/// Intermediate rasters, indexed by [`StoneColor::index`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecognitionArtifacts {
    pub masks: [GrayImage; 2],
    /// Accepted stone disks; `None` when the watershed was not used.
    pub disk_masks: [Option<GrayImage>; 2],
}

/// Everything recognized in one image.
#[derive(Clone, Debug, PartialEq)]
pub struct Recognition {
    pub calibration: BoardCalibration,
    pub state: BoardState,
    pub inference: InferenceReport,
    /// Stone candidates before grid snapping, black first.
    pub candidates: Vec<StoneCandidate>,
    pub warnings: Vec<RecognitionWarning>,
    pub artifacts: Option<RecognitionArtifacts>,
}

struct ColorPass {
    candidates: Vec<StoneCandidate>,
    mask: GrayImage,
    disk_mask: Option<GrayImage>,
    unresolved_seeds: usize,
    oversized: usize,
}

/// Board recognizer over pluggable line and circle detectors.
pub struct BoardRecognizer<L, C> {
    params: RecognizerParams,
    calibrator: BoardCalibrator,
    lines: L,
    circles: C,
}

impl<L: LineDetector, C: CircleDetector> BoardRecognizer<L, C> {
    pub fn new(params: RecognizerParams, lines: L, circles: C) -> Result<Self, RecognizeError> {
        params.validate()?;
        let calibrator = BoardCalibrator::new(params.calibration.clone());
        Ok(Self {
            params,
            calibrator,
            lines,
            circles,
        })
    }

    pub fn params(&self) -> &RecognizerParams {
        &self.params
    }

    /// Calibrate the board, find stones of both colors and place them.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, channels), fields(width = channels.gray.width, height = channels.gray.height))
    )]
    pub fn recognize(&self, channels: &BoardChannels) -> Result<Recognition, RecognizeError> {
        let segments = self.lines.detect_segments(&channels.gray.view());
        let calibration = self.calibrator.calibrate(&segments, channels.bounds())?;

        let mut warnings = Vec::new();
        let estimate = calibration.size_estimate;
        if estimate.is_ambiguous() {
            warnings.push(RecognitionWarning::SizeAmbiguous {
                horizontal: estimate.horizontal_lines,
                vertical: estimate.vertical_lines,
                size: estimate.size,
            });
        }

        let [black, white] = StoneColor::ALL.map(|color| self.color_pass(channels, color));

        for (color, pass) in [(StoneColor::Black, &black), (StoneColor::White, &white)] {
            if pass.unresolved_seeds > 0 {
                warnings.push(RecognitionWarning::SeedUnresolved {
                    color,
                    count: pass.unresolved_seeds,
                });
            }
            if pass.oversized > 0 {
                warnings.push(RecognitionWarning::OversizedRegion {
                    color,
                    count: pass.oversized,
                });
            }
        }

        let candidates: Vec<StoneCandidate> = black
            .candidates
            .iter()
            .chain(white.candidates.iter())
            .copied()
            .collect();
        let inference = infer_stone_grid(&candidates, &calibration.model);

        info!(
            "recognized {}x{} board: {} black, {} white, {} warnings",
            calibration.model.size(),
            calibration.model.size(),
            inference.state.black().len(),
            inference.state.white().len(),
            warnings.len()
        );

        let artifacts = self.params.keep_artifacts.then(|| RecognitionArtifacts {
            masks: [black.mask, white.mask],
            disk_masks: [black.disk_mask, white.disk_mask],
        });

        Ok(Recognition {
            calibration,
            state: inference.state,
            inference: inference.report,
            candidates,
            warnings,
            artifacts,
        })
    }

    fn color_pass(&self, channels: &BoardChannels, color: StoneColor) -> ColorPass {
        let mask_params = self.params.mask(color);
        let mask = prepare_mask(&channels.channel(mask_params.channel).view(), mask_params);

        let sanity = self.params.separation.sanity_max_radius_px;
        let detected = self.circles.detect_circles(&mask.view(), color);
        let total = detected.len();
        let circles: Vec<Circle> = detected
            .into_iter()
            .filter(|c| c.radius.is_finite() && c.radius <= sanity)
            .collect();
        let oversized_circles = total - circles.len();
        if oversized_circles > 0 {
            debug!("{color}: {oversized_circles} circles above sanity radius {sanity}");
        }

        if !self.params.use_watershed {
            return ColorPass {
                candidates: circles
                    .into_iter()
                    .map(|c| StoneCandidate::from_circle(c, color))
                    .collect(),
                mask,
                disk_mask: None,
                unresolved_seeds: 0,
                oversized: oversized_circles,
            };
        }

        let seeds: Vec<_> = circles.iter().map(|c| c.center).collect();
        let sep = separate_stones(&mask.view(), &seeds, color, &self.params.separation);
        ColorPass {
            candidates: sep.stones,
            mask,
            disk_mask: Some(sep.disk_mask),
            unresolved_seeds: sep.dropped_seeds.len(),
            oversized: oversized_circles + sep.oversized_regions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goban_core::{GrayImageView, LineSegment};

    struct NoLines;

    impl LineDetector for NoLines {
        fn detect_segments(&self, _gray: &GrayImageView<'_>) -> Vec<LineSegment> {
            Vec::new()
        }
    }

    struct NoCircles;

    impl CircleDetector for NoCircles {
        fn detect_circles(&self, _mask: &GrayImageView<'_>, _color: StoneColor) -> Vec<Circle> {
            Vec::new()
        }
    }

    #[test]
    fn invalid_params_are_rejected() {
        let mut params = RecognizerParams::default();
        params.separation.sanity_max_radius_px = f32::NAN;
        let err = BoardRecognizer::new(params, NoLines, NoCircles).err();
        assert!(matches!(err, Some(RecognizeError::InvalidParams { .. })));
    }

    #[test]
    fn seed_search_radius_is_bounded_by_sanity_radius() {
        let mut params = RecognizerParams::default();
        params.separation.seed_search_radius_px = 100_000;
        let err = BoardRecognizer::new(params, NoLines, NoCircles).err();
        assert!(matches!(err, Some(RecognizeError::InvalidParams { .. })));

        let mut params = RecognizerParams::default();
        params.separation.seed_search_radius_px = 20;
        assert!(BoardRecognizer::new(params, NoLines, NoCircles).is_ok());
    }

    #[test]
    fn partial_mask_configs_keep_per_color_defaults() {
        let params: RecognizerParams = serde_json::from_str(
            r#"{ "white_mask": { "threshold": 150 }, "black_mask": { "blur_size": 3 } }"#,
        )
        .expect("params");

        let white = &params.white_mask;
        assert_eq!(white.threshold, 150);
        assert_eq!(white.channel, crate::mask::Channel::Blue);
        assert_eq!(white.mode, goban_core::ThresholdMode::Binary);

        let black = &params.black_mask;
        assert_eq!(black.blur_size, 3);
        assert_eq!(black.channel, crate::mask::Channel::Red);
        assert_eq!(black.threshold, 80);

        let defaults: RecognizerParams = serde_json::from_str("{}").expect("defaults");
        assert_eq!(defaults, RecognizerParams::default());
    }

    #[test]
    fn missing_lines_abort_recognition() {
        let recognizer =
            BoardRecognizer::new(RecognizerParams::default(), NoLines, NoCircles).expect("recognizer");
        let channels = BoardChannels::from_gray(GrayImage::new(50, 50));
        assert_eq!(
            recognizer.recognize(&channels),
            Err(RecognizeError::Calibration(CalibrationError::NoAxisAlignedLines))
        );
    }

    #[test]
    fn warnings_serialize_with_kind_tag() {
        let w = RecognitionWarning::SeedUnresolved {
            color: StoneColor::White,
            count: 2,
        };
        let json = serde_json::to_value(&w).expect("json");
        assert_eq!(json["kind"], "seed_unresolved");
        assert_eq!(json["color"], "white");
    }
}
