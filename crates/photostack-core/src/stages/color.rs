//! Brightness, contrast, and saturation adjustment.
//!
//! ## Adjustment Order
//! 1. Brightness (additive)
//! 2. Contrast (around mid-gray)
//! 3. Saturation (around luminance)

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::error::FilterError;
use crate::filter::{Filter, FilterKind};

/// Color adjustment values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorAdjustments {
    /// Brightness offset (-1.0 to 1.0)
    pub brightness: f32,
    /// Contrast factor (0.0 to 2.0, 1.0 = unchanged)
    pub contrast: f32,
    /// Saturation factor (0.0 to 2.0, 1.0 = unchanged)
    pub saturation: f32,
}

impl Default for ColorAdjustments {
    fn default() -> Self {
        Self {
            brightness: 0.0,
            contrast: 1.0,
            saturation: 1.0,
        }
    }
}

impl ColorAdjustments {
    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Clamp every value into its documented range.
    pub fn clamped(self) -> Self {
        Self {
            brightness: self.brightness.clamp(-1.0, 1.0),
            contrast: self.contrast.clamp(0.0, 2.0),
            saturation: self.saturation.clamp(0.0, 2.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorAdjustmentFilter {
    enabled: bool,
    pub adjustments: ColorAdjustments,
}

impl Default for ColorAdjustmentFilter {
    fn default() -> Self {
        Self {
            enabled: true,
            adjustments: ColorAdjustments::default(),
        }
    }
}

impl ColorAdjustmentFilter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Filter for ColorAdjustmentFilter {
    fn name(&self) -> &str {
        "Brightness"
    }

    fn kind(&self) -> FilterKind {
        FilterKind::ColorAdjustment
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn apply(&self, image: &PixelBuffer) -> Result<PixelBuffer, FilterError> {
        image.validate()?;
        let mut output = image.clone();
        let adj = self.adjustments.clamped();
        if adj.is_default() {
            return Ok(output);
        }

        for chunk in output.pixels.chunks_exact_mut(3) {
            let mut r = chunk[0] as f32 / 255.0;
            let mut g = chunk[1] as f32 / 255.0;
            let mut b = chunk[2] as f32 / 255.0;

            (r, g, b) = apply_brightness(r, g, b, adj.brightness);
            (r, g, b) = apply_contrast(r, g, b, adj.contrast);
            (r, g, b) = apply_saturation(r, g, b, adj.saturation);

            chunk[0] = (r.clamp(0.0, 1.0) * 255.0).round() as u8;
            chunk[1] = (g.clamp(0.0, 1.0) * 255.0).round() as u8;
            chunk[2] = (b.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        Ok(output)
    }

    fn clone_box(&self) -> Box<dyn Filter> {
        Box::new(self.clone())
    }
}

#[inline]
fn apply_brightness(r: f32, g: f32, b: f32, brightness: f32) -> (f32, f32, f32) {
    (r + brightness, g + brightness, b + brightness)
}

/// Formula: `output = (input - 0.5) * contrast + 0.5`
#[inline]
fn apply_contrast(r: f32, g: f32, b: f32, contrast: f32) -> (f32, f32, f32) {
    if contrast == 1.0 {
        return (r, g, b);
    }
    (
        (r - 0.5) * contrast + 0.5,
        (g - 0.5) * contrast + 0.5,
        (b - 0.5) * contrast + 0.5,
    )
}

/// Scale each channel's distance from BT.709 luminance.
#[inline]
fn apply_saturation(r: f32, g: f32, b: f32, saturation: f32) -> (f32, f32, f32) {
    if saturation == 1.0 {
        return (r, g, b);
    }
    let gray = 0.2126 * r + 0.7152 * g + 0.0722 * b;
    (
        gray + (r - gray) * saturation,
        gray + (g - gray) * saturation,
        gray + (b - gray) * saturation,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(rgb: [u8; 3], adjustments: ColorAdjustments) -> [u8; 3] {
        let filter = ColorAdjustmentFilter {
            adjustments,
            ..ColorAdjustmentFilter::default()
        };
        let result = filter.apply(&PixelBuffer::filled(1, 1, rgb)).unwrap();
        result.pixel(0, 0)
    }

    #[test]
    fn test_default_is_identity() {
        assert_eq!(apply([12, 128, 240], ColorAdjustments::default()), [12, 128, 240]);
    }

    #[test]
    fn test_brightness_raises_all_channels() {
        let adj = ColorAdjustments {
            brightness: 0.2,
            ..ColorAdjustments::default()
        };
        let out = apply([100, 100, 100], adj);
        assert_eq!(out, [151, 151, 151]);
    }

    #[test]
    fn test_zero_contrast_is_mid_gray() {
        let adj = ColorAdjustments {
            contrast: 0.0,
            ..ColorAdjustments::default()
        };
        assert_eq!(apply([0, 90, 255], adj), [128, 128, 128]);
    }

    #[test]
    fn test_zero_saturation_is_gray() {
        let adj = ColorAdjustments {
            saturation: 0.0,
            ..ColorAdjustments::default()
        };
        let out = apply([200, 50, 10], adj);
        assert_eq!(out[0], out[1]);
        assert_eq!(out[1], out[2]);
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let adj = ColorAdjustments {
            brightness: 5.0,
            ..ColorAdjustments::default()
        };
        assert_eq!(adj.clamped().brightness, 1.0);
        assert_eq!(apply([0, 0, 0], adj), [255, 255, 255]);
    }
}
