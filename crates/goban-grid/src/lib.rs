//! Board calibration for Go board photos.
//!
//! Given raw line segments from a Hough-style detector, this crate:
//! - splits them into horizontal and vertical families, dropping diagonals
//!   and frame artifacts near the image border ([`classify_segments`]);
//! - collapses near-duplicate lines and counts the unique ones
//!   ([`unique_line_positions`]);
//! - maps the line counts to a board size ([`estimate_board_size`]);
//! - measures the board rectangle and cell spacing ([`board_edges`],
//!   [`board_spacing`]);
//! - exposes the resulting [`BoardModel`] for pixel <-> intersection mapping
//!   and batch snapping of stone candidates ([`snap_candidates`]).
//!
//! [`calibrate_board`] runs the whole chain.

mod calibrate;
mod edges;
mod error;
mod lines;
mod mapper;
mod model;
mod params;
mod size;

pub use calibrate::{calibrate_board, BoardCalibration, BoardCalibrator};
pub use edges::{board_edges, board_spacing};
pub use error::CalibrationError;
pub use lines::{classify_segments, unique_line_positions, ClassifiedLines, GridLineSet};
pub use mapper::{snap_candidates, PlacedStone, SnapResult};
pub use model::{BoardEdges, BoardModel, BoardModelError};
pub use params::CalibrationParams;
pub use size::{estimate_board_size, SizeCatalog, SizeCatalogError, SizeEstimate, SizeTier};
