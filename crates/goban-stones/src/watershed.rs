//! Marker-controlled watershed over a binary stone mask.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use goban_core::GrayImageView;

/// Per-pixel region labels.
///
/// `0` is unknown/background, `-1` marks a boundary between two regions and
/// `k > 0` is the region grown from marker `k`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelMap {
    pub width: usize,
    pub height: usize,
    pub labels: Vec<i32>,
}

impl LabelMap {
    pub const UNKNOWN: i32 = 0;
    pub const BOUNDARY: i32 = -1;

    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            labels: vec![Self::UNKNOWN; width * height],
        }
    }

    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Option<i32> {
        self.index(x, y).map(|i| self.labels[i])
    }

    /// Set a label; out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: i64, y: i64, label: i32) {
        if let Some(i) = self.index(x, y) {
            self.labels[i] = label;
        }
    }

    /// Largest positive label, or 0.
    pub fn max_label(&self) -> i32 {
        self.labels.iter().copied().max().unwrap_or(0).max(0)
    }

    /// Number of pixels carrying `label`.
    pub fn count(&self, label: i32) -> usize {
        self.labels.iter().filter(|&&l| l == label).count()
    }
}

const NEIGHBORS_4: [(i64, i64); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// Chamfer (3-4) distance from each foreground pixel to the nearest
/// background pixel. Pixels outside the raster count as background.
fn chamfer_distance(mask: &GrayImageView<'_>) -> Vec<u32> {
    let (w, h) = (mask.width, mask.height);
    let mut dist: Vec<u32> = mask
        .data
        .iter()
        .map(|&v| if v > 0 { u32::MAX / 2 } else { 0 })
        .collect();
    let at = |d: &[u32], x: i64, y: i64| -> u32 {
        if x < 0 || y < 0 || x >= w as i64 || y >= h as i64 {
            0
        } else {
            d[y as usize * w + x as usize]
        }
    };

    for y in 0..h as i64 {
        for x in 0..w as i64 {
            let i = y as usize * w + x as usize;
            if dist[i] == 0 {
                continue;
            }
            let best = [
                at(&dist, x - 1, y) + 3,
                at(&dist, x, y - 1) + 3,
                at(&dist, x - 1, y - 1) + 4,
                at(&dist, x + 1, y - 1) + 4,
            ]
            .into_iter()
            .min()
            .unwrap_or(0);
            dist[i] = dist[i].min(best);
        }
    }
    for y in (0..h as i64).rev() {
        for x in (0..w as i64).rev() {
            let i = y as usize * w + x as usize;
            if dist[i] == 0 {
                continue;
            }
            let best = [
                at(&dist, x + 1, y) + 3,
                at(&dist, x, y + 1) + 3,
                at(&dist, x + 1, y + 1) + 4,
                at(&dist, x - 1, y + 1) + 4,
            ]
            .into_iter()
            .min()
            .unwrap_or(0);
            dist[i] = dist[i].min(best);
        }
    }
    dist
}

/// Grow `markers` over the foreground of `mask`.
///
/// Flooding runs in order of increasing elevation, where elevation is the
/// inverted distance to the background, so blobs meet along their necks.
/// Equal elevations are processed first-in first-out. A pixel reached by two
/// different labels becomes [`LabelMap::BOUNDARY`] and stops the flood.
/// Markers on background pixels are ignored; background stays `0`.
///
/// Input buffers are not modified. If `markers` does not match the mask
/// dimensions, an empty label map is returned.
pub fn watershed(mask: &GrayImageView<'_>, markers: &LabelMap) -> LabelMap {
    let (w, h) = (mask.width, mask.height);
    let mut out = LabelMap::new(w, h);
    if markers.width != w || markers.height != h || mask.data.len() != w * h {
        return out;
    }

    let dist = chamfer_distance(mask);
    let peak = dist.iter().copied().max().unwrap_or(0);
    let elevation = |i: usize| peak - dist[i];

    let mut queued = vec![false; w * h];
    for (i, &label) in markers.labels.iter().enumerate() {
        if label > 0 && mask.data[i] > 0 {
            out.labels[i] = label;
            queued[i] = true;
        }
    }

    let mut heap: BinaryHeap<Reverse<(u32, u64, usize)>> = BinaryHeap::new();
    let mut seq: u64 = 0;
    let mut push_neighbors =
        |heap: &mut BinaryHeap<Reverse<(u32, u64, usize)>>, queued: &mut [bool], i: usize| {
            let (x, y) = ((i % w) as i64, (i / w) as i64);
            for (dx, dy) in NEIGHBORS_4 {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= w as i64 || ny >= h as i64 {
                    continue;
                }
                let j = ny as usize * w + nx as usize;
                if queued[j] || mask.data[j] == 0 {
                    continue;
                }
                queued[j] = true;
                heap.push(Reverse((elevation(j), seq, j)));
                seq += 1;
            }
        };

    for i in 0..w * h {
        if out.labels[i] > 0 {
            push_neighbors(&mut heap, &mut queued, i);
        }
    }

    while let Some(Reverse((_, _, i))) = heap.pop() {
        let (x, y) = ((i % w) as i64, (i / w) as i64);
        let mut label = LabelMap::UNKNOWN;
        for (dx, dy) in NEIGHBORS_4 {
            let Some(l) = out.get(x + dx, y + dy) else {
                continue;
            };
            if l <= 0 {
                continue;
            }
            if label == LabelMap::UNKNOWN {
                label = l;
            } else if label != l {
                label = LabelMap::BOUNDARY;
                break;
            }
        }
        out.labels[i] = label;
        if label > 0 {
            push_neighbors(&mut heap, &mut queued, i);
        }
    }

    out
}
