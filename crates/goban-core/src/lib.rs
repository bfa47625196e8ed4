//! Core types and raster helpers for Go board recognition.
//!
//! This crate is intentionally small. It holds the value types shared by the
//! calibration and stone crates (segments, circles, stone candidates, grid
//! positions), a minimal grayscale raster, and the few raster operations used
//! to prepare stone masks. It does *not* depend on any concrete line or
//! circle detector.

mod image;
mod logger;
mod raster;
mod segment;
mod stone;

pub use image::{GrayImage, GrayImageView, ImageError};
pub use raster::{
    box_blur, dilate, erode, otsu_level, threshold, StructuringElement, ThresholdMode,
};
pub use segment::{ImageBounds, LineSegment, Orientation};
pub use stone::{Circle, GridPosition, StoneCandidate, StoneColor};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_from_str, init_with_level};
