//! High-level facade for the `goban-*` workspace.
//!
//! This crate provides:
//! - re-exports of the calibration ([`grid`]), stone ([`stones`]) and core
//!   ([`core`]) crates
//! - detector traits ([`LineDetector`], [`CircleDetector`]) through which
//!   external edge/Hough backends plug in
//! - [`BoardRecognizer`], which runs one photo end to end and returns an
//!   immutable [`Recognition`]
//! - JSON config/report helpers in [`io`]
//!
//! ## Quickstart
//!
//! ```no_run
//! use goban::io::{load_channels, RecordedDetections};
//! use goban::{BoardRecognizer, RecognizerParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let channels = load_channels("board.png")?;
//! let detections = RecordedDetections::load_json("board_detections.json")?;
//! let recognizer = BoardRecognizer::new(RecognizerParams::default(), &detections, &detections)?;
//!
//! let rec = recognizer.recognize(&channels)?;
//! println!("{}x{} board, {} stones", rec.calibration.model.size(), rec.calibration.model.size(), rec.state.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `goban::core`: segments, circles, stone candidates, grid positions, rasters.
//! - `goban::grid`: line classification, board size, edges, [`BoardModel`].
//! - `goban::stones`: watershed separation, duplicate resolution, [`BoardState`].

pub use goban_core as core;
pub use goban_grid as grid;
pub use goban_stones as stones;

pub use goban_core::{Circle, GridPosition, LineSegment, StoneCandidate, StoneColor};
pub use goban_grid::{calibrate_board, BoardModel, CalibrationParams, PlacedStone};
pub use goban_stones::{infer_stone_grid, separate_stones, BoardState, SeparationParams};

mod channels;
mod detector;
pub mod io;
mod mask;
mod recognize;

#[cfg(feature = "image")]
pub use channels::gray_view;
pub use channels::BoardChannels;
pub use detector::{CircleDetector, LineDetector};
pub use mask::{prepare_mask, Channel, StoneMaskParams};
pub use recognize::{
    BoardRecognizer, Recognition, RecognitionArtifacts, RecognitionWarning, RecognizeError,
    RecognizerParams,
};
