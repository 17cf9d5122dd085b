//! RGB pixel buffer passed between filter stages.

use crate::error::FilterError;

/// An RGB image flowing through the filter stack.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new buffer with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a buffer filled with a single color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let pixels = rgb
            .iter()
            .copied()
            .cycle()
            .take((width as usize) * (height as usize) * 3)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a buffer from an `image::RgbImage`.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert into an `image::RgbImage` for use with `image::imageops`.
    ///
    /// Returns an error when the buffer length does not match the dimensions.
    pub fn into_rgb_image(self) -> Result<image::RgbImage, FilterError> {
        self.validate()?;
        let (width, height) = (self.width, self.height);
        let expected = self.expected_len();
        let actual = self.pixels.len();
        image::RgbImage::from_raw(width, height, self.pixels).ok_or(
            FilterError::BufferSizeMismatch {
                width,
                height,
                expected,
                actual,
            },
        )
    }

    /// Number of bytes a buffer of these dimensions must hold.
    pub fn expected_len(&self) -> usize {
        (self.width as usize) * (self.height as usize) * 3
    }

    /// Check that the buffer is non-empty and sized for its dimensions.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.width == 0 || self.height == 0 {
            return Err(FilterError::EmptyImage);
        }
        let expected = self.expected_len();
        if self.pixels.len() != expected {
            return Err(FilterError::BufferSizeMismatch {
                width: self.width,
                height: self.height,
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// RGB value at the given pixel coordinate.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = pixel_offset(self.width, x, y);
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    /// Height divided by width, or `None` for an empty buffer.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.width == 0 {
            None
        } else {
            Some(self.height as f64 / self.width as f64)
        }
    }
}

/// Byte offset of pixel (x, y) in a row-major RGB buffer of the given width.
#[inline]
pub(crate) fn pixel_offset(width: u32, x: u32, y: u32) -> usize {
    ((y as usize) * (width as usize) + x as usize) * 3
}
