//! Pixel <-> grid mapping and batch snapping of stone candidates.

use std::collections::BTreeMap;

use goban_core::{GridPosition, StoneCandidate, StoneColor};
use log::debug;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::model::BoardModel;

impl BoardModel {
    /// Nearest intersection for a pixel, without range checks.
    ///
    /// `column = round((x - left) / dx) + 1`, rounding half away from zero;
    /// `row` likewise. Non-finite input saturates and should be filtered by
    /// the caller (see [`BoardModel::to_grid_checked`]).
    pub fn to_grid(&self, pixel: Point2<f32>) -> GridPosition {
        let tl = self.edges().top_left;
        let spacing = self.spacing();
        let column = ((pixel.x - tl.x) / spacing.x).round() as i32;
        let row = ((pixel.y - tl.y) / spacing.y).round() as i32;
        GridPosition::new(column.saturating_add(1), row.saturating_add(1))
    }

    /// Nearest intersection, or `None` when it falls outside `[1, size]` or
    /// the pixel is not finite.
    pub fn to_grid_checked(&self, pixel: Point2<f32>) -> Option<GridPosition> {
        if !(pixel.x.is_finite() && pixel.y.is_finite()) {
            return None;
        }
        let pos = self.to_grid(pixel);
        self.contains(pos).then_some(pos)
    }

    /// Exact pixel location of an intersection (no rounding).
    pub fn to_pixel(&self, pos: GridPosition) -> Point2<f32> {
        let tl = self.edges().top_left;
        let spacing = self.spacing();
        Point2::new(
            tl.x + (pos.column - 1) as f32 * spacing.x,
            tl.y + (pos.row - 1) as f32 * spacing.y,
        )
    }

    #[inline]
    pub fn contains(&self, pos: GridPosition) -> bool {
        pos.is_within(self.size())
    }

    /// Clamp a position into `[1, size]` on both axes.
    pub fn clamp(&self, pos: GridPosition) -> GridPosition {
        let max = self.size().min(i32::MAX as u32) as i32;
        GridPosition::new(pos.column.clamp(1, max), pos.row.clamp(1, max))
    }

    /// All intersections in scan order.
    pub fn intersections(&self) -> impl Iterator<Item = GridPosition> {
        let size = self.size().min(i32::MAX as u32) as i32;
        (1..=size).flat_map(move |row| (1..=size).map(move |column| GridPosition::new(column, row)))
    }
}

/// A stone snapped to a board intersection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedStone {
    pub position: GridPosition,
    pub color: StoneColor,
    /// Pixel location of the intersection (`to_pixel(position)`).
    pub center: Point2<f32>,
    pub radius: f32,
}

/// Outcome of snapping one batch of candidates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SnapResult {
    pub stones: BTreeMap<GridPosition, PlacedStone>,
    /// Candidates whose position fell outside the board.
    pub outside_board: usize,
    /// Candidates merged into an already occupied position.
    pub collapsed: usize,
}

/// Snap a batch of same-colored candidates to the grid.
///
/// Candidates outside the board are dropped. When several candidates land
/// on one intersection, the one with the largest radius is kept; on equal
/// radii the earliest in input order wins.
pub fn snap_candidates(candidates: &[StoneCandidate], model: &BoardModel) -> SnapResult {
    let mut out = SnapResult::default();

    for cand in candidates {
        let Some(position) = model.to_grid_checked(cand.center) else {
            debug!(
                "{} candidate at ({:.1}, {:.1}) is outside the board",
                cand.color, cand.center.x, cand.center.y
            );
            out.outside_board += 1;
            continue;
        };
        let placed = PlacedStone {
            position,
            color: cand.color,
            center: model.to_pixel(position),
            radius: cand.radius,
        };
        match out.stones.get_mut(&position) {
            Some(existing) => {
                out.collapsed += 1;
                if placed.radius > existing.radius {
                    *existing = placed;
                }
            }
            None => {
                out.stones.insert(position, placed);
            }
        }
    }

    out
}
