//! Stone grid inference: candidates in, deduplicated [`BoardState`] out.

use goban_core::{StoneCandidate, StoneColor};
use goban_grid::{snap_candidates, BoardModel};
use log::info;
use serde::{Deserialize, Serialize};

use crate::resolve::resolve_duplicates;
use crate::state::BoardState;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Counters from one inference run, indexed by [`StoneColor::index`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceReport {
    /// Candidates that fell outside the board.
    pub outside_board: [usize; 2],
    /// Candidates merged into an occupied intersection of the same color.
    pub collapsed: [usize; 2],
    /// Black stones removed in favor of white ones.
    pub conflicts_resolved: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoneGridInference {
    pub state: BoardState,
    pub report: InferenceReport,
}

/// Snap candidates of both colors to the board and resolve conflicts.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(candidates, model), fields(candidates = candidates.len(), size = model.size()))
)]
pub fn infer_stone_grid(candidates: &[StoneCandidate], model: &BoardModel) -> StoneGridInference {
    let mut report = InferenceReport::default();

    let [black, white] = StoneColor::ALL.map(|color| {
        let batch: Vec<StoneCandidate> = candidates
            .iter()
            .filter(|c| c.color == color)
            .copied()
            .collect();
        let snapped = snap_candidates(&batch, model);
        report.outside_board[color.index()] = snapped.outside_board;
        report.collapsed[color.index()] = snapped.collapsed;
        snapped.stones
    });

    let resolved = resolve_duplicates(black, white);
    report.conflicts_resolved = resolved.removed.len();
    let state = BoardState::from_resolved(resolved);

    info!(
        "stone grid: {} black, {} white ({} conflicts, {}/{} outside board)",
        state.black().len(),
        state.white().len(),
        report.conflicts_resolved,
        report.outside_board[0],
        report.outside_board[1]
    );

    StoneGridInference { state, report }
}
