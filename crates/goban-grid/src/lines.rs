//! Line classification and near-duplicate collapsing.

use goban_core::{ImageBounds, LineSegment, Orientation};
use serde::{Deserialize, Serialize};

use crate::params::CalibrationParams;

/// Segments split by orientation, after dropping border artifacts and
/// diagonals. Segments keep their input order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassifiedLines {
    pub horizontal: Vec<LineSegment>,
    pub vertical: Vec<LineSegment>,
    /// Axis-aligned segments dropped for lying within the border margin.
    pub discarded_border: usize,
    /// Segments dropped as neither horizontal nor vertical.
    pub discarded_diagonal: usize,
}

impl ClassifiedLines {
    /// All horizontal and vertical segments.
    pub fn axis_aligned(&self) -> impl Iterator<Item = &LineSegment> {
        self.horizontal.iter().chain(self.vertical.iter())
    }

    pub fn num_axis_aligned(&self) -> usize {
        self.horizontal.len() + self.vertical.len()
    }
}

/// Unique positions of the grid lines along one axis, ascending.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridLineSet {
    orientation: Orientation,
    positions: Vec<f32>,
}

impl GridLineSet {
    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Line positions: x for vertical lines, y for horizontal ones.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Mean gap between consecutive lines, if there are at least two.
    pub fn mean_gap(&self) -> Option<f32> {
        let (first, last) = (self.positions.first()?, self.positions.last()?);
        (self.positions.len() >= 2).then(|| (last - first) / (self.positions.len() - 1) as f32)
    }
}

fn near_border(position: f32, extent: u32, margin: f32) -> bool {
    position < margin || position > extent as f32 - margin
}

/// Split raw segments into horizontal and vertical families.
///
/// Diagonal segments are dropped. Horizontal segments within
/// `border_margin_px` of the top or bottom edge, and vertical segments
/// within the margin of the left or right edge, are dropped as frame
/// artifacts.
pub fn classify_segments(
    segments: &[LineSegment],
    bounds: ImageBounds,
    params: &CalibrationParams,
) -> ClassifiedLines {
    let mut out = ClassifiedLines::default();
    let margin = params.border_margin_px;

    for seg in segments {
        let orientation = seg.orientation(params.axis_tolerance_px);
        let (family, extent) = match orientation {
            Orientation::Horizontal => (&mut out.horizontal, bounds.height),
            Orientation::Vertical => (&mut out.vertical, bounds.width),
            Orientation::Diagonal => {
                out.discarded_diagonal += 1;
                continue;
            }
        };
        let pos = seg.axis_position(orientation).unwrap_or(f32::NAN);
        if !pos.is_finite() || near_border(pos, extent, margin) {
            out.discarded_border += 1;
            continue;
        }
        family.push(*seg);
    }

    out
}

/// Collapse near-duplicate parallel lines into unique positions.
///
/// Positions are sorted ascending; a position closer than `tolerance_px` to
/// the first position of the current cluster joins that cluster, otherwise it
/// opens a new one. Each cluster is represented by its first position.
/// Segments that do not have `orientation` are ignored.
pub fn unique_line_positions(
    segments: &[LineSegment],
    orientation: Orientation,
    tolerance_px: f32,
) -> GridLineSet {
    let mut raw: Vec<f32> = segments
        .iter()
        .filter_map(|s| s.axis_position(orientation))
        .filter(|p| p.is_finite())
        .collect();
    raw.sort_by(f32::total_cmp);

    let mut positions: Vec<f32> = Vec::with_capacity(raw.len());
    for p in raw {
        match positions.last() {
            Some(&rep) if p - rep < tolerance_px => {}
            _ => positions.push(p),
        }
    }

    GridLineSet {
        orientation,
        positions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> ImageBounds {
        ImageBounds::new(400, 300)
    }

    #[test]
    fn classify_drops_diagonal_and_border_segments() {
        let segments = vec![
            LineSegment::new(20.0, 50.0, 380.0, 51.0),  // horizontal
            LineSegment::new(100.0, 20.0, 101.0, 280.0), // vertical
            LineSegment::new(0.0, 0.0, 200.0, 150.0),    // diagonal
            LineSegment::new(10.0, 2.0, 390.0, 2.0),     // horizontal at top edge
            LineSegment::new(398.0, 10.0, 398.0, 290.0), // vertical at right edge
        ];
        let lines = classify_segments(&segments, bounds(), &CalibrationParams::default());
        assert_eq!(lines.horizontal, vec![segments[0]]);
        assert_eq!(lines.vertical, vec![segments[1]]);
        assert_eq!(lines.discarded_diagonal, 1);
        assert_eq!(lines.discarded_border, 2);
        assert_eq!(lines.num_axis_aligned(), 2);
    }

    #[test]
    fn unique_positions_merge_close_lines_and_sort() {
        let segments = vec![
            LineSegment::new(0.0, 120.0, 300.0, 120.0),
            LineSegment::new(0.0, 20.0, 300.0, 20.0),
            LineSegment::new(0.0, 24.0, 300.0, 24.0),
            LineSegment::new(0.0, 70.0, 300.0, 71.0),
            LineSegment::new(0.0, 28.0, 300.0, 28.0),
        ];
        let set = unique_line_positions(&segments, Orientation::Horizontal, 10.0);
        assert_eq!(set.positions(), &[20.0, 70.5, 120.0]);
        assert_eq!(set.orientation(), Orientation::Horizontal);
        assert_eq!(set.mean_gap(), Some(50.0));
    }

    #[test]
    fn clusters_do_not_chain_beyond_tolerance() {
        // evenly spaced at 6 px: each cluster spans less than the tolerance
        let segments: Vec<_> = (0..6)
            .map(|k| {
                let x = 50.0 + 6.0 * k as f32;
                LineSegment::new(x, 0.0, x, 100.0)
            })
            .collect();
        let set = unique_line_positions(&segments, Orientation::Vertical, 10.0);
        assert_eq!(set.positions(), &[50.0, 62.0, 74.0]);
    }

    #[test]
    fn empty_input_gives_empty_set() {
        let set = unique_line_positions(&[], Orientation::Vertical, 10.0);
        assert!(set.is_empty());
        assert_eq!(set.mean_gap(), None);
    }
}
