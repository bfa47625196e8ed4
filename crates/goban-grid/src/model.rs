use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Outer rectangle of the board grid in image pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardEdges {
    pub top_left: Point2<f32>,
    pub bottom_right: Point2<f32>,
}

impl BoardEdges {
    pub fn new(top_left: Point2<f32>, bottom_right: Point2<f32>) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.bottom_right.x - self.top_left.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom_right.y - self.top_left.y
    }

    /// True when `p` lies inside or on the rectangle.
    pub fn contains(&self, p: Point2<f32>) -> bool {
        (self.top_left.x..=self.bottom_right.x).contains(&p.x)
            && (self.top_left.y..=self.bottom_right.y).contains(&p.y)
    }
}

/// Errors raised when building a [`BoardModel`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BoardModelError {
    #[error("board size {size} is below the minimum of 2 lines")]
    SizeTooSmall { size: u32 },
    #[error("board edges are not finite")]
    NonFiniteEdges,
    #[error("board edges are degenerate (width={width}, height={height})")]
    DegenerateEdges { width: f32, height: f32 },
}

#[derive(Deserialize)]
struct BoardModelRepr {
    edges: BoardEdges,
    size: u32,
}

/// Calibrated mapping between image pixels and board intersections.
///
/// `spacing.x = edges.width() / (size - 1)` and likewise for `y`; the model
/// can only be built through [`BoardModel::new`], which derives the spacing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardModelRepr")]
pub struct BoardModel {
    edges: BoardEdges,
    size: u32,
    spacing: Vector2<f32>,
}

impl BoardModel {
    pub fn new(edges: BoardEdges, size: u32) -> Result<Self, BoardModelError> {
        if size < 2 {
            return Err(BoardModelError::SizeTooSmall { size });
        }
        let coords = [
            edges.top_left.x,
            edges.top_left.y,
            edges.bottom_right.x,
            edges.bottom_right.y,
        ];
        if coords.iter().any(|v| !v.is_finite()) {
            return Err(BoardModelError::NonFiniteEdges);
        }
        let (width, height) = (edges.width(), edges.height());
        if width <= 0.0 || height <= 0.0 {
            return Err(BoardModelError::DegenerateEdges { width, height });
        }
        let cells = (size - 1) as f32;
        Ok(Self {
            edges,
            size,
            spacing: Vector2::new(width / cells, height / cells),
        })
    }

    #[inline]
    pub fn edges(&self) -> BoardEdges {
        self.edges
    }

    /// Number of grid lines per axis.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Pixels per cell along x and y.
    #[inline]
    pub fn spacing(&self) -> Vector2<f32> {
        self.spacing
    }
}

impl TryFrom<BoardModelRepr> for BoardModel {
    type Error = BoardModelError;

    fn try_from(repr: BoardModelRepr) -> Result<Self, Self::Error> {
        Self::new(repr.edges, repr.size)
    }
}
