//! Small raster operations used to prepare stone masks.
//!
//! Masks are plain [`GrayImage`]s where any non-zero pixel is foreground.
//! Morphology treats pixels outside the raster as background.

use crate::{GrayImage, GrayImageView};
use serde::{Deserialize, Serialize};

/// Binarization rule for [`threshold`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdMode {
    /// `v > level` becomes `max_val`, everything else 0.
    #[default]
    Binary,
    /// `v > level` becomes 0, everything else `max_val`.
    BinaryInv,
}

/// Fixed-level binarization.
pub fn threshold(src: &GrayImageView<'_>, level: u8, max_val: u8, mode: ThresholdMode) -> GrayImage {
    let data = src
        .data
        .iter()
        .map(|&v| match (mode, v > level) {
            (ThresholdMode::Binary, true) | (ThresholdMode::BinaryInv, false) => max_val,
            _ => 0,
        })
        .collect();
    GrayImage {
        width: src.width,
        height: src.height,
        data,
    }
}

/// Otsu threshold over all pixels of an image.
pub fn otsu_level(src: &GrayImageView<'_>) -> u8 {
    otsu_threshold_from_samples(src.data)
}

/// Compute Otsu threshold from a set of sample intensities.
pub(crate) fn otsu_threshold_from_samples(samples: &[u8]) -> u8 {
    if samples.is_empty() {
        return 127;
    }

    let mut hist = [0u32; 256];
    let (mut min_v, mut max_v) = (255u8, 0u8);
    for &v in samples {
        hist[v as usize] += 1;
        min_v = min_v.min(v);
        max_v = max_v.max(v);
    }
    if min_v == max_v {
        return min_v;
    }
    if hist.iter().filter(|&&h| h > 0).count() <= 2 {
        return ((min_v as u16 + max_v as u16) / 2) as u8;
    }

    let total = samples.len() as f64;
    let sum_total: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &h)| i as f64 * h as f64)
        .sum();

    let mut sum_b = 0f64;
    let mut w_b = 0f64;
    let mut best_var = -1f64;
    let mut best_t = 127u8;

    for (t, &h) in hist.iter().enumerate() {
        w_b += h as f64;
        if w_b < 1.0 {
            continue;
        }
        let w_f = total - w_b;
        if w_f < 1.0 {
            break;
        }

        sum_b += t as f64 * h as f64;
        let m_b = sum_b / w_b;
        let m_f = (sum_total - sum_b) / w_f;

        let var_between = w_b * w_f * (m_b - m_f) * (m_b - m_f);
        if var_between > best_var {
            best_var = var_between;
            best_t = t as u8;
        }
    }

    best_t
}

/// Set of pixel offsets relative to the anchor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructuringElement {
    offsets: Vec<(i64, i64)>,
}

impl StructuringElement {
    /// Filled ellipse inscribed in a `size x size` box, anchored at its center.
    ///
    /// `size == 0` is treated as 1 (a single pixel).
    pub fn ellipse(size: usize) -> Self {
        let size = size.max(1) as i64;
        let anchor = size / 2;
        let r = size as f32 / 2.0;
        let mut offsets = Vec::new();
        for y in 0..size {
            for x in 0..size {
                // pixel centers relative to the box center
                let dx = x as f32 + 0.5 - r;
                let dy = y as f32 + 0.5 - r;
                if dx * dx + dy * dy <= r * r {
                    offsets.push((x - anchor, y - anchor));
                }
            }
        }
        if offsets.is_empty() {
            offsets.push((0, 0));
        }
        Self { offsets }
    }

    /// Full `size x size` square.
    pub fn square(size: usize) -> Self {
        let size = size.max(1) as i64;
        let anchor = size / 2;
        let offsets = (0..size)
            .flat_map(|y| (0..size).map(move |x| (x - anchor, y - anchor)))
            .collect();
        Self { offsets }
    }

    pub fn offsets(&self) -> &[(i64, i64)] {
        &self.offsets
    }
}

fn morph_once(src: &GrayImage, kernel: &StructuringElement, dilate: bool) -> GrayImage {
    let view = src.view();
    let mut out = GrayImage::new(src.width, src.height);
    for y in 0..src.height as i64 {
        for x in 0..src.width as i64 {
            let mut acc = if dilate { 0u8 } else { u8::MAX };
            for &(dx, dy) in kernel.offsets() {
                let v = if dilate {
                    view.get(x - dx, y - dy).unwrap_or(0)
                } else {
                    view.get(x + dx, y + dy).unwrap_or(0)
                };
                acc = if dilate { acc.max(v) } else { acc.min(v) };
            }
            out.data[y as usize * src.width + x as usize] = acc;
        }
    }
    out
}

/// Grayscale dilation (local maximum), repeated `iterations` times.
pub fn dilate(src: &GrayImageView<'_>, kernel: &StructuringElement, iterations: usize) -> GrayImage {
    let mut img = src.to_owned_image();
    for _ in 0..iterations {
        img = morph_once(&img, kernel, true);
    }
    img
}

/// Grayscale erosion (local minimum), repeated `iterations` times.
pub fn erode(src: &GrayImageView<'_>, kernel: &StructuringElement, iterations: usize) -> GrayImage {
    let mut img = src.to_owned_image();
    for _ in 0..iterations {
        img = morph_once(&img, kernel, false);
    }
    img
}

/// Mean filter over a `size x size` window with edge replication.
pub fn box_blur(src: &GrayImageView<'_>, size: usize) -> GrayImage {
    if size <= 1 || src.width == 0 || src.height == 0 {
        return src.to_owned_image();
    }
    let anchor = (size / 2) as i64;
    let w = src.width as i64;
    let h = src.height as i64;
    let area = (size * size) as u32;
    let mut out = GrayImage::new(src.width, src.height);
    for y in 0..h {
        for x in 0..w {
            let mut sum = 0u32;
            for ky in 0..size as i64 {
                let sy = (y + ky - anchor).clamp(0, h - 1);
                for kx in 0..size as i64 {
                    let sx = (x + kx - anchor).clamp(0, w - 1);
                    sum += src.data[(sy * w + sx) as usize] as u32;
                }
            }
            out.data[(y * w + x) as usize] = ((sum + area / 2) / area) as u8;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(width: usize, height: usize, data: Vec<u8>) -> GrayImage {
        GrayImage::from_raw(width, height, data).expect("image")
    }

    #[test]
    fn threshold_binary_and_inverse_are_complementary() {
        let img = image(4, 1, vec![10, 100, 101, 250]);
        let bin = threshold(&img.view(), 100, 255, ThresholdMode::Binary);
        let inv = threshold(&img.view(), 100, 255, ThresholdMode::BinaryInv);
        assert_eq!(bin.data, vec![0, 0, 255, 255]);
        assert_eq!(inv.data, vec![255, 255, 0, 0]);
    }

    #[test]
    fn otsu_splits_bimodal_samples() {
        let mut samples = vec![20u8; 50];
        samples.extend(std::iter::repeat(30u8).take(10));
        samples.extend(std::iter::repeat(200u8).take(50));
        let t = otsu_threshold_from_samples(&samples);
        assert!((30..200).contains(&t), "t = {t}");
    }

    #[test]
    fn ellipse_kernel_is_symmetric_and_contains_anchor() {
        let k = StructuringElement::ellipse(5);
        assert!(k.offsets().contains(&(0, 0)));
        for &(dx, dy) in k.offsets() {
            assert!(k.offsets().contains(&(-dx, -dy)));
        }
        assert!(!k.offsets().contains(&(-2, -2)));
        assert_eq!(StructuringElement::ellipse(1).offsets(), &[(0, 0)]);
    }

    #[test]
    fn dilate_then_erode_restores_a_block() {
        let mut img = GrayImage::new(12, 12);
        for y in 4..8 {
            for x in 4..8 {
                img.put(x, y, 255);
            }
        }
        let k = StructuringElement::square(3);
        let grown = dilate(&img.view(), &k, 1);
        assert_eq!(grown.view().count_foreground(), 36);
        let back = erode(&grown.view(), &k, 1);
        assert_eq!(back, img);
    }

    #[test]
    fn erode_clears_pixels_touching_the_border() {
        let img = image(3, 3, vec![255; 9]);
        let out = erode(&img.view(), &StructuringElement::square(3), 1);
        assert_eq!(out.data, vec![0, 0, 0, 0, 255, 0, 0, 0, 0]);
    }

    #[test]
    fn box_blur_keeps_flat_images_flat() {
        let img = image(5, 4, vec![77; 20]);
        assert_eq!(box_blur(&img.view(), 3), img);
    }
}
