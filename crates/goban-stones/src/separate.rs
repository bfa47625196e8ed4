use goban_core::{GrayImage, GrayImageView, StoneCandidate, StoneColor};
use log::{debug, info};
use nalgebra::Point2;

use crate::enclosing::minimal_enclosing_circle;
use crate::params::SeparationParams;
use crate::seeds::resolve_seeds;
use crate::watershed::{watershed, LabelMap};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Stones recovered from one color mask.
#[derive(Clone, Debug, PartialEq)]
pub struct StoneSeparation {
    /// Accepted stones in seed order.
    pub stones: Vec<StoneCandidate>,
    /// Accepted enclosing disks rasterized at 255.
    pub disk_mask: GrayImage,
    /// Watershed output the stones were measured on.
    pub labels: LabelMap,
    pub dropped_seeds: Vec<Point2<f32>>,
    pub oversized_regions: usize,
}

#[derive(Default)]
struct Region {
    pixels: Vec<Point2<f32>>,
    min: (i64, i64),
    max: (i64, i64),
}

impl Region {
    fn push(&mut self, x: i64, y: i64) {
        if self.pixels.is_empty() {
            self.min = (x, y);
            self.max = (x, y);
        } else {
            self.min = (self.min.0.min(x), self.min.1.min(y));
            self.max = (self.max.0.max(x), self.max.1.max(y));
        }
        self.pixels.push(Point2::new(x as f32, y as f32));
    }

    /// Lower bound on the enclosing radius.
    fn half_extent(&self) -> f32 {
        let w = self.max.0 - self.min.0;
        let h = self.max.1 - self.min.1;
        w.max(h) as f32 * 0.5
    }
}

/// Split touching stones in a binary mask and measure each one.
///
/// `seeds` are approximate stone centers, typically circle detections. Each
/// seed grows a watershed region; every region is reduced to its minimal
/// enclosing circle and regions larger than the sanity radius are dropped.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(mask, seeds, params), fields(width = mask.width, height = mask.height, seeds = seeds.len()))
)]
pub fn separate_stones(
    mask: &GrayImageView<'_>,
    seeds: &[Point2<f32>],
    color: StoneColor,
    params: &SeparationParams,
) -> StoneSeparation {
    let seeded = resolve_seeds(mask, seeds, params.seed_search_radius_px);
    let labels = watershed(mask, &seeded.markers);

    let mut regions: Vec<Region> = Vec::new();
    regions.resize_with(seeds.len(), Region::default);
    for (i, &label) in labels.labels.iter().enumerate() {
        if label <= 0 {
            continue;
        }
        if let Some(region) = regions.get_mut(label as usize - 1) {
            region.push((i % labels.width) as i64, (i / labels.width) as i64);
        }
    }

    let mut disk_mask = GrayImage::new(mask.width, mask.height);
    let mut stones = Vec::with_capacity(seeded.resolved.len());
    let mut oversized_regions = 0;
    let sanity = params.sanity_max_radius_px;

    for (idx, region) in regions.iter().enumerate() {
        if region.pixels.is_empty() {
            continue;
        }
        if region.half_extent() > sanity {
            debug!(
                "{color} region {} spans {:.1} px, above sanity radius {sanity}",
                idx + 1,
                region.half_extent()
            );
            oversized_regions += 1;
            continue;
        }
        let Some(circle) = minimal_enclosing_circle(&region.pixels) else {
            continue;
        };
        if circle.radius > sanity {
            debug!(
                "{color} region {} radius {:.1} above sanity radius {sanity}",
                idx + 1,
                circle.radius
            );
            oversized_regions += 1;
            continue;
        }
        disk_mask.fill_disk(circle.center.x, circle.center.y, circle.radius, 255);
        stones.push(StoneCandidate::from_circle(circle, color));
    }

    info!(
        "{color}: {} seeds -> {} stones ({} dropped seeds, {} oversized regions)",
        seeds.len(),
        stones.len(),
        seeded.dropped.len(),
        oversized_regions
    );

    StoneSeparation {
        stones,
        disk_mask,
        labels,
        dropped_seeds: seeded.dropped,
        oversized_regions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> SeparationParams {
        SeparationParams::default()
    }

    #[test]
    fn separates_touching_stones() {
        let mut mask = GrayImage::new(120, 60);
        mask.fill_disk(30.0, 30.0, 12.0, 255);
        mask.fill_disk(53.0, 30.0, 12.0, 255);
        mask.fill_disk(90.0, 30.0, 10.0, 255);
        let seeds = [
            Point2::new(29.0, 31.0),
            Point2::new(54.0, 29.0),
            Point2::new(90.0, 30.0),
        ];

        let sep = separate_stones(&mask.view(), &seeds, StoneColor::Black, &params());

        assert_eq!(sep.stones.len(), 3);
        assert_eq!(sep.oversized_regions, 0);
        assert!(sep.dropped_seeds.is_empty());
        for (stone, seed) in sep.stones.iter().zip(seeds) {
            assert!((stone.center - seed).norm() < 4.0, "{stone:?} vs {seed:?}");
            assert!(stone.radius > 8.0 && stone.radius <= 13.0, "{stone:?}");
            assert_eq!(stone.color, StoneColor::Black);
        }
        assert_relative_eq!(sep.stones[2].radius, 10.0, epsilon = 1e-3);
        assert!(sep.disk_mask.get(90, 30).is_some_and(|v| v == 255));
        assert_eq!(sep.disk_mask.get(5, 5), Some(0));
    }

    #[test]
    fn oversized_region_is_excluded() {
        let mut mask = GrayImage::new(120, 120);
        mask.fill_disk(60.0, 60.0, 25.0, 255);
        let sep = separate_stones(&mask.view(), &[Point2::new(60.0, 60.0)], StoneColor::White, &params());
        assert!(sep.stones.is_empty());
        assert_eq!(sep.oversized_regions, 1);
        assert_eq!(sep.disk_mask.view().count_foreground(), 0);
    }

    #[test]
    fn unresolved_seeds_are_reported() {
        let mut mask = GrayImage::new(200, 200);
        mask.fill_disk(30.0, 30.0, 6.0, 255);
        let seeds = [Point2::new(30.0, 30.0), Point2::new(100.0, 100.0)];
        let sep = separate_stones(&mask.view(), &seeds, StoneColor::White, &params());
        assert_eq!(sep.stones.len(), 1);
        assert_eq!(sep.dropped_seeds, vec![Point2::new(100.0, 100.0)]);
    }

    #[test]
    fn empty_seeds_give_empty_result() {
        let mut mask = GrayImage::new(40, 40);
        mask.fill_disk(20.0, 20.0, 6.0, 255);
        let sep = separate_stones(&mask.view(), &[], StoneColor::Black, &params());
        assert!(sep.stones.is_empty());
        assert_eq!(sep.labels.max_label(), 0);
        assert_eq!(sep.oversized_regions, 0);
    }
}
