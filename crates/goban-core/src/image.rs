/// Borrowed 8-bit grayscale raster (row-major, `len = width * height`).
///
/// Binary masks use the same type: any non-zero pixel is foreground.
#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

/// Owned 8-bit grayscale raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

/// Errors raised when wrapping raw pixel buffers.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ImageError {
    #[error("invalid image buffer length (expected {expected} bytes, got {got})")]
    InvalidBuffer { expected: usize, got: usize },
    #[error("invalid image dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },
}

fn expected_len(width: usize, height: usize) -> Result<usize, ImageError> {
    width
        .checked_mul(height)
        .ok_or(ImageError::InvalidDimensions { width, height })
}

impl<'a> GrayImageView<'a> {
    /// Wrap a raw buffer, checking its length against the dimensions.
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self, ImageError> {
        let expected = expected_len(width, height)?;
        if data.len() != expected {
            return Err(ImageError::InvalidBuffer {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Pixel value, or `None` outside the raster.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Option<u8> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(self.data[y as usize * self.width + x as usize])
    }

    /// True when `(x, y)` is inside the raster and non-zero.
    #[inline]
    pub fn is_foreground(&self, x: i64, y: i64) -> bool {
        self.get(x, y).is_some_and(|v| v > 0)
    }

    /// Number of non-zero pixels.
    pub fn count_foreground(&self) -> usize {
        self.data.iter().filter(|&&v| v > 0).count()
    }

    pub fn to_owned_image(&self) -> GrayImage {
        GrayImage {
            width: self.width,
            height: self.height,
            data: self.data.to_vec(),
        }
    }
}

impl GrayImage {
    /// Zero-filled image.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Take ownership of a raw buffer, checking its length against the dimensions.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        GrayImageView::new(width, height, &data)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Option<u8> {
        self.view().get(x, y)
    }

    /// Write a pixel; out-of-bounds writes are ignored.
    #[inline]
    pub fn put(&mut self, x: i64, y: i64, value: u8) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        self.data[y as usize * self.width + x as usize] = value;
    }

    /// Fill a solid disk (pixel centers within `radius` of `(cx, cy)`).
    pub fn fill_disk(&mut self, cx: f32, cy: f32, radius: f32, value: u8) {
        if !(radius.is_finite() && cx.is_finite() && cy.is_finite()) || radius < 0.0 {
            return;
        }
        let r2 = radius * radius;
        let x0 = (cx - radius).floor() as i64;
        let x1 = (cx + radius).ceil() as i64;
        let y0 = (cy - radius).floor() as i64;
        let y1 = (cy + radius).ceil() as i64;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.put(x, y, value);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_rejects_wrong_buffer_length() {
        let data = [0u8; 5];
        let err = GrayImageView::new(2, 3, &data).unwrap_err();
        assert_eq!(
            err,
            ImageError::InvalidBuffer {
                expected: 6,
                got: 5
            }
        );
    }

    #[test]
    fn out_of_bounds_reads_are_none() {
        let img = GrayImage::new(4, 4);
        assert_eq!(img.get(-1, 0), None);
        assert_eq!(img.get(4, 0), None);
        assert_eq!(img.get(3, 3), Some(0));
    }

    #[test]
    fn fill_disk_marks_center_and_respects_radius() {
        let mut img = GrayImage::new(21, 21);
        img.fill_disk(10.0, 10.0, 3.0, 255);
        assert_eq!(img.get(10, 10), Some(255));
        assert_eq!(img.get(13, 10), Some(255));
        assert_eq!(img.get(14, 10), Some(0));
        assert_eq!(img.get(13, 13), Some(0));
        assert_eq!(img.view().count_foreground(), 29);
    }
}
