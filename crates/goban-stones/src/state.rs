use std::collections::BTreeMap;

use goban_core::{GridPosition, StoneColor};
use goban_grid::PlacedStone;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::resolve::{resolve_duplicates, ResolvedGrids};

#[derive(Deserialize, Serialize)]
struct BoardStateRepr {
    black: Vec<PlacedStone>,
    white: Vec<PlacedStone>,
}

/// Stones on the board, one grid per color.
///
/// The two grids never share a position; white has priority when built
/// from overlapping input. Serialized as two stone lists.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(from = "BoardStateRepr", into = "BoardStateRepr")]
pub struct BoardState {
    black: BTreeMap<GridPosition, PlacedStone>,
    white: BTreeMap<GridPosition, PlacedStone>,
}

impl BoardState {
    /// Build from per-color grids, dropping black stones on white positions.
    pub fn new(
        black: BTreeMap<GridPosition, PlacedStone>,
        white: BTreeMap<GridPosition, PlacedStone>,
    ) -> Self {
        Self::from_resolved(resolve_duplicates(black, white))
    }

    /// Wrap grids that already went through [`resolve_duplicates`].
    pub(crate) fn from_resolved(resolved: ResolvedGrids) -> Self {
        Self {
            black: resolved.black,
            white: resolved.white,
        }
    }

    #[inline]
    pub fn black(&self) -> &BTreeMap<GridPosition, PlacedStone> {
        &self.black
    }

    #[inline]
    pub fn white(&self) -> &BTreeMap<GridPosition, PlacedStone> {
        &self.white
    }

    pub fn stones(&self, color: StoneColor) -> &BTreeMap<GridPosition, PlacedStone> {
        match color {
            StoneColor::Black => &self.black,
            StoneColor::White => &self.white,
        }
    }

    pub fn len(&self) -> usize {
        self.black.len() + self.white.len()
    }

    pub fn is_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }

    pub fn stone_at(&self, pos: GridPosition) -> Option<&PlacedStone> {
        self.white.get(&pos).or_else(|| self.black.get(&pos))
    }

    /// First stone whose box `center ± radius` contains `p` (bounds
    /// inclusive). Black stones are checked before white ones, each in scan
    /// order.
    pub fn stone_at_pixel(&self, p: Point2<f32>) -> Option<&PlacedStone> {
        self.iter().find(|s| {
            (p.x - s.center.x).abs() <= s.radius && (p.y - s.center.y).abs() <= s.radius
        })
    }

    /// All stones: black first, then white, each in scan order.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedStone> {
        self.black.values().chain(self.white.values())
    }
}

impl From<BoardStateRepr> for BoardState {
    fn from(repr: BoardStateRepr) -> Self {
        let grid = |stones: Vec<PlacedStone>| -> BTreeMap<GridPosition, PlacedStone> {
            stones.into_iter().map(|s| (s.position, s)).collect()
        };
        Self::new(grid(repr.black), grid(repr.white))
    }
}

impl From<BoardState> for BoardStateRepr {
    fn from(state: BoardState) -> Self {
        Self {
            black: state.black.into_values().collect(),
            white: state.white.into_values().collect(),
        }
    }
}
