use std::cmp::Ordering;
use std::fmt;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Stone color.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoneColor {
    Black,
    White,
}

impl StoneColor {
    pub const ALL: [StoneColor; 2] = [StoneColor::Black, StoneColor::White];

    /// Stable index (black = 0, white = 1) for per-color arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            StoneColor::Black => 0,
            StoneColor::White => 1,
        }
    }
}

impl fmt::Display for StoneColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoneColor::Black => f.write_str("black"),
            StoneColor::White => f.write_str("white"),
        }
    }
}

/// Circle in image pixel coordinates (as produced by a circle detector).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point2<f32>,
    pub radius: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            center: Point2::new(x, y),
            radius,
        }
    }

    /// True when `p` lies inside or on the circle.
    pub fn contains(&self, p: Point2<f32>) -> bool {
        (p - self.center).norm_squared() <= self.radius * self.radius
    }
}

/// A stone detected in pixel space, before grid snapping.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoneCandidate {
    pub center: Point2<f32>,
    pub radius: f32,
    pub color: StoneColor,
}

impl StoneCandidate {
    pub fn new(x: f32, y: f32, radius: f32, color: StoneColor) -> Self {
        Self {
            center: Point2::new(x, y),
            radius,
            color,
        }
    }

    pub fn from_circle(circle: Circle, color: StoneColor) -> Self {
        Self {
            center: circle.center,
            radius: circle.radius,
            color,
        }
    }
}

/// Board intersection `(column, row)`, 1-based.
///
/// Ordered in scan order: by row, then by column.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub column: i32,
    pub row: i32,
}

impl GridPosition {
    pub fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// True when both coordinates are within `[1, size]`.
    #[inline]
    pub fn is_within(&self, size: u32) -> bool {
        let size = size as i64;
        (1..=size).contains(&(self.column as i64)) && (1..=size).contains(&(self.row as i64))
    }
}

impl Ord for GridPosition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row
            .cmp(&other.row)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for GridPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}
