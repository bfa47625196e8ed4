//! JSON configuration, recorded detections and report helpers.

use std::{
    fs,
    path::{Path, PathBuf},
};

use goban_core::{Circle, GrayImageView, LineSegment, StoneColor};
use goban_grid::{BoardModel, PlacedStone, SizeTier};
use goban_stones::InferenceReport;
use serde::{Deserialize, Serialize};

use crate::detector::{CircleDetector, LineDetector};
use crate::recognize::{Recognition, RecognitionWarning, RecognizeError, RecognizerParams};

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "image")]
    #[error(transparent)]
    Image(#[from] ::image::ImageError),
}

fn read_json<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T, IoError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn write_pretty<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<(), IoError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Configuration for one recognition run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizeConfig {
    pub image_path: String,
    /// JSON file with [`RecordedDetections`].
    pub detections_path: String,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub params: RecognizerParams,
}

impl RecognizeConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        read_json(path)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        write_pretty(self, path)
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("goban_report.json"))
    }
}

/// Line and circle detections captured from an external detector.
///
/// Replays the same detections for every image it is asked about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedDetections {
    #[serde(default)]
    pub segments: Vec<LineSegment>,
    #[serde(default)]
    pub black_circles: Vec<Circle>,
    #[serde(default)]
    pub white_circles: Vec<Circle>,
}

impl RecordedDetections {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        read_json(path)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        write_pretty(self, path)
    }
}

impl LineDetector for RecordedDetections {
    fn detect_segments(&self, _gray: &GrayImageView<'_>) -> Vec<LineSegment> {
        self.segments.clone()
    }
}

impl CircleDetector for RecordedDetections {
    fn detect_circles(&self, _mask: &GrayImageView<'_>, color: StoneColor) -> Vec<Circle> {
        match color {
            StoneColor::Black => self.black_circles.clone(),
            StoneColor::White => self.white_circles.clone(),
        }
    }
}

/// Serializable summary of a recognition run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognitionReport {
    #[serde(default)]
    pub image_path: Option<String>,
    pub board: Option<BoardModel>,
    pub size_tier: Option<SizeTier>,
    pub horizontal_lines: usize,
    pub vertical_lines: usize,
    pub black: Vec<PlacedStone>,
    pub white: Vec<PlacedStone>,
    pub inference: InferenceReport,
    pub warnings: Vec<RecognitionWarning>,
    pub error: Option<String>,
}

impl RecognitionReport {
    pub fn from_result(result: &Result<Recognition, RecognizeError>) -> Self {
        match result {
            Ok(rec) => Self {
                image_path: None,
                board: Some(rec.calibration.model),
                size_tier: Some(rec.calibration.size_estimate.tier),
                horizontal_lines: rec.calibration.horizontal.len(),
                vertical_lines: rec.calibration.vertical.len(),
                black: rec.state.black().values().copied().collect(),
                white: rec.state.white().values().copied().collect(),
                inference: rec.inference,
                warnings: rec.warnings.clone(),
                error: None,
            },
            Err(err) => Self {
                error: Some(err.to_string()),
                ..Self::default()
            },
        }
    }

    pub fn with_image_path(mut self, path: impl Into<String>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        read_json(path)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        write_pretty(self, path)
    }
}

/// Load a photo and split it into recognizer channels.
#[cfg(feature = "image")]
pub fn load_channels(path: impl AsRef<Path>) -> Result<crate::BoardChannels, IoError> {
    let img = ::image::ImageReader::open(path)?.decode()?.to_rgb8();
    Ok(crate::BoardChannels::from_rgb(&img))
}

#[cfg(test)]
mod tests {
    use super::*;
    use goban_grid::CalibrationError;

    #[test]
    fn config_defaults_and_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cfg.json");
        fs::write(
            &path,
            r#"{ "image_path": "board.png", "detections_path": "det.json",
                 "params": { "use_watershed": false } }"#,
        )
        .expect("write");

        let cfg = RecognizeConfig::load_json(&path).expect("config");
        assert!(!cfg.params.use_watershed);
        assert_eq!(cfg.params.separation.seed_search_radius_px, 5);
        assert_eq!(cfg.output_path(), PathBuf::from("goban_report.json"));

        cfg.write_json(&path).expect("write config");
        let back = RecognizeConfig::load_json(&path).expect("reload");
        assert_eq!(back.params, cfg.params);
    }

    #[test]
    fn recorded_detections_replay_per_color() {
        let det = RecordedDetections {
            segments: vec![LineSegment::new(0.0, 10.0, 50.0, 10.0)],
            black_circles: vec![Circle::new(5.0, 5.0, 3.0)],
            white_circles: vec![],
        };
        let img = goban_core::GrayImage::new(4, 4);
        assert_eq!(det.detect_segments(&img.view()).len(), 1);
        assert_eq!(det.detect_circles(&img.view(), StoneColor::Black).len(), 1);
        assert!(det.detect_circles(&img.view(), StoneColor::White).is_empty());

        let json = serde_json::to_string(&det).expect("json");
        let back: RecordedDetections = serde_json::from_str(&json).expect("detections");
        assert_eq!(back, det);
    }

    #[test]
    fn failed_run_reports_error_string() {
        let result: Result<Recognition, RecognizeError> =
            Err(CalibrationError::NoAxisAlignedLines.into());
        let report = RecognitionReport::from_result(&result).with_image_path("x.png");
        assert!(report.board.is_none());
        assert_eq!(report.image_path.as_deref(), Some("x.png"));
        assert!(report.error.as_deref().is_some_and(|e| e.contains("no horizontal")));
    }
}
