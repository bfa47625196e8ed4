use goban_core::{GrayImage, ImageBounds};

use crate::mask::Channel;
use crate::recognize::RecognizeError;

/// Per-channel rasters of one board photo.
///
/// The grayscale channel feeds line detection; the red and blue channels
/// feed black and white stone masks respectively.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardChannels {
    pub gray: GrayImage,
    pub red: GrayImage,
    pub blue: GrayImage,
}

impl BoardChannels {
    pub fn new(gray: GrayImage, red: GrayImage, blue: GrayImage) -> Result<Self, RecognizeError> {
        for other in [&red, &blue] {
            if (other.width, other.height) != (gray.width, gray.height) {
                return Err(RecognizeError::ChannelSizeMismatch {
                    expected: (gray.width, gray.height),
                    got: (other.width, other.height),
                });
            }
        }
        Ok(Self { gray, red, blue })
    }

    /// Use one grayscale raster for every channel.
    pub fn from_gray(gray: GrayImage) -> Self {
        Self {
            red: gray.clone(),
            blue: gray.clone(),
            gray,
        }
    }

    pub fn channel(&self, channel: Channel) -> &GrayImage {
        match channel {
            Channel::Gray => &self.gray,
            Channel::Red => &self.red,
            Channel::Blue => &self.blue,
        }
    }

    pub fn bounds(&self) -> ImageBounds {
        let dim = |v: usize| u32::try_from(v).unwrap_or(u32::MAX);
        ImageBounds::new(dim(self.gray.width), dim(self.gray.height))
    }
}

#[cfg(feature = "image")]
mod rgb {
    use super::BoardChannels;
    use goban_core::GrayImage;

    fn plane(img: &::image::RgbImage, f: impl Fn(&::image::Rgb<u8>) -> u8) -> GrayImage {
        GrayImage {
            width: img.width() as usize,
            height: img.height() as usize,
            data: img.pixels().map(f).collect(),
        }
    }

    impl BoardChannels {
        /// Split an RGB photo into gray, red and blue planes.
        pub fn from_rgb(img: &::image::RgbImage) -> Self {
            let luma = ::image::imageops::grayscale(img);
            Self {
                gray: GrayImage {
                    width: luma.width() as usize,
                    height: luma.height() as usize,
                    data: luma.into_raw(),
                },
                red: plane(img, |p| p.0[0]),
                blue: plane(img, |p| p.0[2]),
            }
        }
    }
}

/// Borrow an `image::GrayImage` as a core view.
#[cfg(feature = "image")]
pub fn gray_view(img: &::image::GrayImage) -> goban_core::GrayImageView<'_> {
    goban_core::GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}
