//! Seed resolution: turn approximate stone centers into watershed markers.

use goban_core::GrayImageView;
use log::{debug, warn};
use nalgebra::Point2;

use crate::watershed::LabelMap;

/// Offsets of the square `[-r, r]^2`, nearest first.
///
/// Ordered by squared distance, then by row offset, then by column offset,
/// so the search is deterministic.
pub fn spiral_offsets(radius: u32) -> Vec<(i64, i64)> {
    let r = radius as i64;
    let mut offsets: Vec<(i64, i64)> = (-r..=r)
        .flat_map(|dy| (-r..=r).map(move |dx| (dx, dy)))
        .collect();
    offsets.sort_by_key(|&(dx, dy)| (dx * dx + dy * dy, dy, dx));
    offsets
}

/// A seed that found a foreground pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedSeed {
    /// Marker label (`index + 1`).
    pub label: i32,
    pub seed: Point2<f32>,
    /// Labeled pixel `(x, y)`.
    pub pixel: (i64, i64),
}

/// Markers built from a list of seeds.
#[derive(Clone, Debug, PartialEq)]
pub struct SeedResolution {
    pub markers: LabelMap,
    pub resolved: Vec<ResolvedSeed>,
    /// Seeds with no foreground within the search radius.
    pub dropped: Vec<Point2<f32>>,
    /// Seeds whose pixel was already claimed by an earlier seed.
    pub merged: usize,
}

/// Label one foreground pixel per seed.
///
/// Seed `i` gets label `i + 1`. A seed lies on the pixel containing it
/// (coordinates floored). A seed on foreground labels that pixel; otherwise the nearest foreground pixel within `search_radius` is
/// used (see [`spiral_offsets`]). Seeds outside the image or with non-finite
/// coordinates are searched with bounds checks and usually dropped.
pub fn resolve_seeds(
    mask: &GrayImageView<'_>,
    seeds: &[Point2<f32>],
    search_radius: u32,
) -> SeedResolution {
    let offsets = spiral_offsets(search_radius);
    let mut res = SeedResolution {
        markers: LabelMap::new(mask.width, mask.height),
        resolved: Vec::with_capacity(seeds.len()),
        dropped: Vec::new(),
        merged: 0,
    };

    for (i, &seed) in seeds.iter().enumerate() {
        let found = if seed.x.is_finite() && seed.y.is_finite() {
            let (sx, sy) = (seed.x.floor() as i64, seed.y.floor() as i64);
            offsets
                .iter()
                .map(|&(dx, dy)| (sx.saturating_add(dx), sy.saturating_add(dy)))
                .find(|&(x, y)| mask.is_foreground(x, y))
        } else {
            None
        };

        let Some((x, y)) = found else {
            warn!(
                "seed ({:.1}, {:.1}) has no foreground within {search_radius} px, dropped",
                seed.x, seed.y
            );
            res.dropped.push(seed);
            continue;
        };

        if res.markers.get(x, y).is_some_and(|l| l > 0) {
            debug!("seed ({:.1}, {:.1}) shares pixel ({x}, {y}) with an earlier seed", seed.x, seed.y);
            res.merged += 1;
            continue;
        }

        let label = i32::try_from(i + 1).unwrap_or(i32::MAX);
        res.markers.set(x, y, label);
        res.resolved.push(ResolvedSeed {
            label,
            seed,
            pixel: (x, y),
        });
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use goban_core::GrayImage;

    #[test]
    fn offsets_start_at_center_and_grow_outward() {
        let offsets = spiral_offsets(5);
        assert_eq!(offsets.len(), 121);
        assert_eq!(offsets[0], (0, 0));
        assert_eq!(&offsets[1..5], &[(0, -1), (-1, 0), (1, 0), (0, 1)]);
        let d2: Vec<i64> = offsets.iter().map(|(x, y)| x * x + y * y).collect();
        assert!(d2.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn seed_on_foreground_labels_itself() {
        let mut mask = GrayImage::new(50, 50);
        mask.fill_disk(20.0, 20.0, 4.0, 255);
        let res = resolve_seeds(&mask.view(), &[Point2::new(20.2, 19.8)], 5);
        assert_eq!(res.resolved.len(), 1);
        assert_eq!(res.resolved[0].pixel, (20, 19));
        assert_eq!(res.markers.get(20, 19), Some(1));
    }

    #[test]
    fn seed_pixel_is_the_one_containing_it() {
        let mut mask = GrayImage::new(20, 20);
        mask.put(10, 10, 255);
        mask.put(11, 11, 255);
        let res = resolve_seeds(&mask.view(), &[Point2::new(10.9, 10.9)], 5);
        assert_eq!(res.resolved[0].pixel, (10, 10));
        assert_eq!(res.markers.get(11, 11), Some(0));
    }

    #[test]
    fn seed_on_background_moves_to_nearby_foreground() {
        let mut mask = GrayImage::new(200, 200);
        mask.put(98, 97, 255);
        let res = resolve_seeds(&mask.view(), &[Point2::new(100.0, 100.0)], 5);
        assert!(res.dropped.is_empty());
        assert_eq!(res.resolved[0].pixel, (98, 97));
        assert_eq!(res.markers.get(98, 97), Some(1));
        assert_eq!(res.markers.count(1), 1);
    }

    #[test]
    fn seed_without_foreground_in_radius_is_dropped() {
        let mut mask = GrayImage::new(200, 200);
        mask.put(94, 100, 255);
        let seeds = [Point2::new(100.0, 100.0), Point2::new(-40.0, 7.0), Point2::new(f32::NAN, 1.0)];
        let res = resolve_seeds(&mask.view(), &seeds, 5);
        assert!(res.resolved.is_empty());
        assert_eq!(res.dropped.len(), 3);
        assert_eq!(res.markers.max_label(), 0);
    }

    #[test]
    fn labels_follow_seed_index_and_duplicates_merge() {
        let mut mask = GrayImage::new(60, 20);
        mask.fill_disk(10.0, 10.0, 3.0, 255);
        mask.fill_disk(40.0, 10.0, 3.0, 255);
        let seeds = [
            Point2::new(55.0, 2.0), // nothing nearby
            Point2::new(10.0, 10.0),
            Point2::new(40.0, 10.0),
            Point2::new(10.0, 10.0),
        ];
        let res = resolve_seeds(&mask.view(), &seeds, 5);
        let labels: Vec<i32> = res.resolved.iter().map(|s| s.label).collect();
        assert_eq!(labels, vec![2, 3]);
        assert_eq!(res.dropped.len(), 1);
        assert_eq!(res.merged, 1);
    }
}
