use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Axis alignment of a line segment.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
    Diagonal,
}

/// Line segment in image pixel coordinates, as reported by a line detector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub p0: Point2<f32>,
    pub p1: Point2<f32>,
}

impl LineSegment {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            p0: Point2::new(x0, y0),
            p1: Point2::new(x1, y1),
        }
    }

    /// Classify the segment with an axis-alignment tolerance in pixels.
    ///
    /// Vertical is tested first: `|dx| < tol` with distinct y ends. Degenerate
    /// (single point) segments are diagonal.
    pub fn orientation(&self, tolerance_px: f32) -> Orientation {
        let dx = (self.p0.x - self.p1.x).abs();
        let dy = (self.p0.y - self.p1.y).abs();
        if dx < tolerance_px && self.p0.y != self.p1.y {
            Orientation::Vertical
        } else if dy < tolerance_px && self.p0.x != self.p1.x {
            Orientation::Horizontal
        } else {
            Orientation::Diagonal
        }
    }

    /// Position along the axis orthogonal to the segment: mean x for vertical
    /// segments, mean y for horizontal ones. `None` for diagonal.
    pub fn axis_position(&self, orientation: Orientation) -> Option<f32> {
        match orientation {
            Orientation::Vertical => Some(0.5 * (self.p0.x + self.p1.x)),
            Orientation::Horizontal => Some(0.5 * (self.p0.y + self.p1.y)),
            Orientation::Diagonal => None,
        }
    }

    pub fn length(&self) -> f32 {
        (self.p1 - self.p0).norm()
    }

    #[inline]
    pub fn endpoints(&self) -> [Point2<f32>; 2] {
        [self.p0, self.p1]
    }
}

/// Size of the source image in pixels.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ImageBounds {
    pub width: u32,
    pub height: u32,
}

impl ImageBounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}
