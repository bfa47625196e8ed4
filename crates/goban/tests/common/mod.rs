#![allow(dead_code)]

use goban::core::{Circle, GrayImage, LineSegment};
use goban::io::RecordedDetections;
use goban::{BoardChannels, GridPosition};

pub const ORIGIN: f32 = 40.0;
pub const SPACING: f32 = 30.0;
pub const SIDE: usize = 320;
pub const STONE_RADIUS: f32 = 15.5;

pub const BLACK: [(i32, i32); 3] = [(3, 3), (4, 3), (7, 8)];
pub const WHITE: [(i32, i32); 2] = [(5, 5), (2, 7)];

pub fn pixel(col: i32, row: i32) -> (f32, f32) {
    (
        ORIGIN + SPACING * (col - 1) as f32,
        ORIGIN + SPACING * (row - 1) as f32,
    )
}

pub fn pos(col: i32, row: i32) -> GridPosition {
    GridPosition::new(col, row)
}

/// Grid segments for an `n x n` board, with a duplicate and a diagonal.
pub fn grid_segments(n: i32) -> Vec<LineSegment> {
    let end = ORIGIN + SPACING * (n - 1) as f32;
    let mut segments = Vec::new();
    for k in 0..n {
        let p = ORIGIN + SPACING * k as f32;
        segments.push(LineSegment::new(ORIGIN, p, end, p));
        segments.push(LineSegment::new(p, ORIGIN, p, end));
    }
    segments.push(LineSegment::new(ORIGIN + 10.0, ORIGIN + 3.0, end - 10.0, ORIGIN + 3.0));
    segments.push(LineSegment::new(ORIGIN, ORIGIN, end, end));
    segments
}

/// Red and blue planes of a wooden board with stones drawn in.
pub fn board_planes() -> (GrayImage, GrayImage) {
    let mut red = GrayImage::from_raw(SIDE, SIDE, vec![190; SIDE * SIDE]).expect("red");
    let mut blue = GrayImage::from_raw(SIDE, SIDE, vec![60; SIDE * SIDE]).expect("blue");
    for (c, r) in BLACK {
        let (x, y) = pixel(c, r);
        red.fill_disk(x, y, STONE_RADIUS, 25);
        blue.fill_disk(x, y, STONE_RADIUS, 25);
    }
    for (c, r) in WHITE {
        let (x, y) = pixel(c, r);
        red.fill_disk(x, y, STONE_RADIUS, 235);
        blue.fill_disk(x, y, STONE_RADIUS, 235);
    }
    (red, blue)
}

pub fn board_channels() -> BoardChannels {
    let (red, blue) = board_planes();
    BoardChannels::new(GrayImage::new(SIDE, SIDE), red, blue).expect("channels")
}

/// Hough-like circles: slightly off-center, plus a false black hit on a
/// white stone and an oversized black circle.
pub fn detections() -> RecordedDetections {
    let circle = |(c, r): (i32, i32)| {
        let (x, y) = pixel(c, r);
        Circle::new(x + 1.5, y - 1.0, STONE_RADIUS)
    };
    let mut black_circles: Vec<Circle> = BLACK.iter().copied().map(circle).collect();
    let (wx, wy) = pixel(5, 5);
    black_circles.push(Circle::new(wx, wy, 14.0));
    black_circles.push(Circle::new(200.0, 60.0, 32.0));

    RecordedDetections {
        segments: grid_segments(9),
        black_circles,
        white_circles: WHITE.iter().copied().map(circle).collect(),
    }
}
