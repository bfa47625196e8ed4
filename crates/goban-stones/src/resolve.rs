use std::collections::BTreeMap;

use goban_core::GridPosition;
use goban_grid::PlacedStone;
use log::debug;

/// Per-color grids after conflict resolution.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedGrids {
    pub black: BTreeMap<GridPosition, PlacedStone>,
    pub white: BTreeMap<GridPosition, PlacedStone>,
    /// Positions removed from the black grid, in scan order.
    pub removed: Vec<GridPosition>,
}

/// Remove every black stone sitting on a white-occupied intersection.
///
/// White always wins; the white grid is returned unchanged. Applying the
/// function to its own output removes nothing.
pub fn resolve_duplicates(
    mut black: BTreeMap<GridPosition, PlacedStone>,
    white: BTreeMap<GridPosition, PlacedStone>,
) -> ResolvedGrids {
    let mut removed = Vec::new();
    black.retain(|pos, _| {
        let clash = white.contains_key(pos);
        if clash {
            removed.push(*pos);
        }
        !clash
    });
    if !removed.is_empty() {
        debug!("{} black stones overlapped white stones and were removed", removed.len());
    }
    ResolvedGrids {
        black,
        white,
        removed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goban_core::StoneColor;
    use nalgebra::Point2;

    fn grid(color: StoneColor, cells: &[(i32, i32)]) -> BTreeMap<GridPosition, PlacedStone> {
        cells
            .iter()
            .map(|&(c, r)| {
                let position = GridPosition::new(c, r);
                let stone = PlacedStone {
                    position,
                    color,
                    center: Point2::new(c as f32 * 10.0, r as f32 * 10.0),
                    radius: 4.0,
                };
                (position, stone)
            })
            .collect()
    }

    #[test]
    fn white_wins_conflicts() {
        let black = grid(StoneColor::Black, &[(3, 3), (4, 4), (5, 1)]);
        let white = grid(StoneColor::White, &[(4, 4), (1, 1)]);
        let out = resolve_duplicates(black, white.clone());

        assert_eq!(out.removed, vec![GridPosition::new(4, 4)]);
        assert_eq!(out.white, white);
        let keys: Vec<_> = out.black.keys().copied().collect();
        assert_eq!(keys, vec![GridPosition::new(5, 1), GridPosition::new(3, 3)]);
        assert!(out.black.keys().all(|k| !out.white.contains_key(k)));
    }

    #[test]
    fn resolution_is_idempotent() {
        let black = grid(StoneColor::Black, &[(1, 1), (2, 2), (3, 3)]);
        let white = grid(StoneColor::White, &[(2, 2), (3, 3)]);
        let once = resolve_duplicates(black, white);
        let twice = resolve_duplicates(once.black.clone(), once.white.clone());
        assert!(twice.removed.is_empty());
        assert_eq!(twice.black, once.black);
        assert_eq!(twice.white, once.white);
    }
}
