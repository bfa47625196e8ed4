//! Board calibration entry point: segments in, [`BoardModel`] out.

use goban_core::{ImageBounds, LineSegment, Orientation};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::edges::board_edges;
use crate::error::CalibrationError;
use crate::lines::{classify_segments, unique_line_positions, GridLineSet};
use crate::model::BoardModel;
use crate::params::CalibrationParams;
use crate::size::{estimate_board_size, SizeEstimate};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Everything learned about the board grid from one set of segments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardCalibration {
    pub model: BoardModel,
    pub size_estimate: SizeEstimate,
    pub horizontal: GridLineSet,
    pub vertical: GridLineSet,
    /// Raw segments received.
    pub num_segments: usize,
    /// Segments kept as horizontal or vertical.
    pub num_axis_aligned: usize,
}

/// Board calibrator from line segments.
#[derive(Clone, Debug, Default)]
pub struct BoardCalibrator {
    params: CalibrationParams,
}

impl BoardCalibrator {
    pub fn new(params: CalibrationParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CalibrationParams {
        &self.params
    }

    /// Run classification, size estimation and edge/spacing computation.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, segments), fields(segments = segments.len(), width = bounds.width, height = bounds.height))
    )]
    pub fn calibrate(
        &self,
        segments: &[LineSegment],
        bounds: ImageBounds,
    ) -> Result<BoardCalibration, CalibrationError> {
        let params = &self.params;
        let lines = classify_segments(segments, bounds, params);
        debug!(
            "classified {} segments: {} horizontal, {} vertical, {} border, {} diagonal",
            segments.len(),
            lines.horizontal.len(),
            lines.vertical.len(),
            lines.discarded_border,
            lines.discarded_diagonal
        );

        let edges = board_edges(lines.axis_aligned()).ok_or(CalibrationError::NoAxisAlignedLines)?;

        let tol = params.line_merge_tolerance_px;
        let horizontal = unique_line_positions(&lines.horizontal, Orientation::Horizontal, tol);
        let vertical = unique_line_positions(&lines.vertical, Orientation::Vertical, tol);
        let size_estimate =
            estimate_board_size(horizontal.len(), vertical.len(), &params.size_catalog);

        let model = BoardModel::new(edges, size_estimate.size)?;
        info!(
            "board edges ({:.1}, {:.1})-({:.1}, {:.1}), lines {}x{}, size {} ({:?}), spacing ({:.2}, {:.2})",
            edges.top_left.x,
            edges.top_left.y,
            edges.bottom_right.x,
            edges.bottom_right.y,
            horizontal.len(),
            vertical.len(),
            model.size(),
            size_estimate.tier,
            model.spacing().x,
            model.spacing().y
        );

        Ok(BoardCalibration {
            model,
            size_estimate,
            horizontal,
            vertical,
            num_segments: segments.len(),
            num_axis_aligned: lines.num_axis_aligned(),
        })
    }
}

/// One-shot calibration with explicit params.
pub fn calibrate_board(
    segments: &[LineSegment],
    bounds: ImageBounds,
    params: &CalibrationParams,
) -> Result<BoardCalibration, CalibrationError> {
    BoardCalibrator::new(params.clone()).calibrate(segments, bounds)
}
