//! Board rectangle and cell spacing from axis-aligned segments.

use goban_core::LineSegment;
use nalgebra::{Point2, Vector2};

use crate::model::BoardEdges;

/// Extreme endpoint coordinates over the given segments.
///
/// Callers pass the classified (not deduplicated) horizontal and vertical
/// segments so that the outer frame is recovered even when it did not
/// survive line merging. Returns `None` when there are no finite endpoints.
pub fn board_edges<'a>(segments: impl IntoIterator<Item = &'a LineSegment>) -> Option<BoardEdges> {
    let mut min = Point2::new(f32::INFINITY, f32::INFINITY);
    let mut max = Point2::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
    let mut any = false;

    for p in segments.into_iter().flat_map(|s| s.endpoints()) {
        if !(p.x.is_finite() && p.y.is_finite()) {
            continue;
        }
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
        any = true;
    }

    any.then(|| BoardEdges::new(min, max))
}

/// Uniform per-cell spacing for a board of `size` lines per axis.
///
/// `size` below 2 yields a zero spacing.
pub fn board_spacing(edges: &BoardEdges, size: u32) -> Vector2<f32> {
    if size < 2 {
        return Vector2::zeros();
    }
    let cells = (size - 1) as f32;
    Vector2::new(edges.width() / cells, edges.height() / cells)
}
