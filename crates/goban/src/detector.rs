//! Seams for the external line and circle detectors.
//!
//! Edge detection and Hough transforms are not part of this crate. Any
//! backend that produces segments and circles can drive the recognizer by
//! implementing these traits; [`crate::io::RecordedDetections`] replays
//! detections saved as JSON.

use goban_core::{Circle, GrayImageView, LineSegment, StoneColor};

/// Produces raw line segments from the grayscale board image.
pub trait LineDetector {
    fn detect_segments(&self, gray: &GrayImageView<'_>) -> Vec<LineSegment>;
}

/// Produces stone circles from a prepared single-color mask.
pub trait CircleDetector {
    fn detect_circles(&self, mask: &GrayImageView<'_>, color: StoneColor) -> Vec<Circle>;
}

impl<T: LineDetector + ?Sized> LineDetector for &T {
    fn detect_segments(&self, gray: &GrayImageView<'_>) -> Vec<LineSegment> {
        (**self).detect_segments(gray)
    }
}

impl<T: CircleDetector + ?Sized> CircleDetector for &T {
    fn detect_circles(&self, mask: &GrayImageView<'_>, color: StoneColor) -> Vec<Circle> {
        (**self).detect_circles(mask, color)
    }
}
