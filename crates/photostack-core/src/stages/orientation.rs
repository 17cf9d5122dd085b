//! Orientation and crop stage.
//!
//! The stage turns the image in quarter steps, mirrors it, and then crops
//! it to a normalized rectangle. The crop rectangle is expressed in the
//! oriented image's coordinates, so every orientation gesture also moves
//! the rectangle to keep the same region selected.
//!
//! This stage is the source of truth for the crop rectangle that the stack
//! propagates to its overlays.

use image::imageops;
use kurbo::Rect;
use serde::{Deserialize, Serialize};

use crate::buffer::{pixel_offset, PixelBuffer};
use crate::error::FilterError;
use crate::filter::{Filter, FilterKind};
use crate::geometry::{FlipAxis, Turn, UNIT_RECT};

/// Quarter turns and mirrors applied before cropping.
///
/// Mirrors are applied after the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrientationState {
    /// Clockwise quarter turns (0-3).
    pub quarter_turns: u8,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
}

impl OrientationState {
    /// Compose a canvas turn onto the current orientation.
    pub fn turn(&mut self, turn: Turn) {
        self.quarter_turns = match turn {
            Turn::Right => (self.quarter_turns + 1) % 4,
            Turn::Left => (self.quarter_turns + 3) % 4,
        };
        // Turning a mirrored image equals mirroring the turned image on the other axis
        std::mem::swap(&mut self.flip_horizontal, &mut self.flip_vertical);
    }

    /// Compose a canvas mirror onto the current orientation.
    pub fn flip(&mut self, axis: FlipAxis) {
        match axis {
            FlipAxis::Horizontal => self.flip_horizontal = !self.flip_horizontal,
            FlipAxis::Vertical => self.flip_vertical = !self.flip_vertical,
        }
    }

    /// Whether this orientation swaps width and height.
    pub fn swaps_dimensions(&self) -> bool {
        self.quarter_turns % 2 == 1
    }

    pub fn is_identity(&self) -> bool {
        self.quarter_turns % 4 == 0 && !self.flip_horizontal && !self.flip_vertical
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrientationCropFilter {
    enabled: bool,
    pub orientation: OrientationState,
    /// Visible region of the oriented image, normalized to 0.0-1.0.
    pub crop_rect: Rect,
}

impl Default for OrientationCropFilter {
    fn default() -> Self {
        Self {
            enabled: true,
            orientation: OrientationState::default(),
            crop_rect: UNIT_RECT,
        }
    }
}

impl OrientationCropFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn the image 90 degrees clockwise.
    pub fn rotate_right(&mut self) {
        self.rotate(Turn::Right);
    }

    /// Turn the image 90 degrees counter-clockwise.
    pub fn rotate_left(&mut self) {
        self.rotate(Turn::Left);
    }

    pub fn flip_horizontal(&mut self) {
        self.flip(FlipAxis::Horizontal);
    }

    pub fn flip_vertical(&mut self) {
        self.flip(FlipAxis::Vertical);
    }

    pub fn rotate(&mut self, turn: Turn) {
        self.orientation.turn(turn);
        self.crop_rect = turn.rotate_rect(self.crop_rect);
    }

    pub fn flip(&mut self, axis: FlipAxis) {
        self.orientation.flip(axis);
        self.crop_rect = axis.flip_rect(self.crop_rect);
    }

    fn orient(&self, image: &PixelBuffer) -> Result<PixelBuffer, FilterError> {
        if self.orientation.is_identity() {
            return Ok(image.clone());
        }
        let rgb = image.clone().into_rgb_image()?;
        let mut oriented = match self.orientation.quarter_turns % 4 {
            1 => imageops::rotate90(&rgb),
            2 => imageops::rotate180(&rgb),
            3 => imageops::rotate270(&rgb),
            _ => rgb,
        };
        if self.orientation.flip_horizontal {
            imageops::flip_horizontal_in_place(&mut oriented);
        }
        if self.orientation.flip_vertical {
            imageops::flip_vertical_in_place(&mut oriented);
        }
        Ok(PixelBuffer::from_rgb_image(oriented))
    }
}

impl Filter for OrientationCropFilter {
    fn name(&self) -> &str {
        "Orientation & Crop"
    }

    fn kind(&self) -> FilterKind {
        FilterKind::OrientationCrop
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn apply(&self, image: &PixelBuffer) -> Result<PixelBuffer, FilterError> {
        image.validate()?;
        let rect = self.crop_rect;
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Err(FilterError::EmptyCropRect(format!("{:?}", rect)));
        }
        let oriented = self.orient(image)?;
        Ok(crop_normalized(&oriented, rect))
    }

    fn clone_box(&self) -> Box<dyn Filter> {
        Box::new(self.clone())
    }
}

/// Crop an image to a normalized rectangle.
///
/// Coordinates outside 0.0-1.0 are clamped and the output is at least 1x1.
fn crop_normalized(image: &PixelBuffer, rect: Rect) -> PixelBuffer {
    if rect.x0 <= 0.0 && rect.y0 <= 0.0 && rect.x1 >= 1.0 && rect.y1 >= 1.0 {
        return image.clone();
    }

    let (src_w, src_h) = (image.width as f64, image.height as f64);
    let left = ((rect.x0.clamp(0.0, 1.0) * src_w).round() as u32).min(image.width - 1);
    let top = ((rect.y0.clamp(0.0, 1.0) * src_h).round() as u32).min(image.height - 1);
    let right = ((rect.x1.clamp(0.0, 1.0) * src_w).round() as u32).min(image.width);
    let bottom = ((rect.y1.clamp(0.0, 1.0) * src_h).round() as u32).min(image.height);

    let out_width = right.saturating_sub(left).max(1);
    let out_height = bottom.saturating_sub(top).max(1);

    let row_bytes = (out_width * 3) as usize;
    let mut pixels = Vec::with_capacity(row_bytes * out_height as usize);
    for y in top..top + out_height {
        let start = pixel_offset(image.width, left, y);
        pixels.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    PixelBuffer::new(out_width, out_height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Image where each pixel's value encodes its position.
    fn test_image(width: u32, height: u32) -> PixelBuffer {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| ((y * width + x) % 256) as u8))
            .flat_map(|v| [v, v, v])
            .collect();
        PixelBuffer::new(width, height, pixels)
    }

    #[test]
    fn test_default_is_identity() {
        let image = test_image(10, 6);
        let result = OrientationCropFilter::new().apply(&image).unwrap();
        assert_eq!(result, image);
    }

    #[test]
    fn test_rotate_right_swaps_dimensions() {
        let image = test_image(2, 1);
        let mut filter = OrientationCropFilter::new();
        filter.rotate_right();

        let result = filter.apply(&image).unwrap();
        assert_eq!((result.width, result.height), (1, 2));
        // Left pixel ends up on top after a clockwise turn
        assert_eq!(result.pixel(0, 0), [0, 0, 0]);
        assert_eq!(result.pixel(0, 1), [1, 1, 1]);
    }

    #[test]
    fn test_rotate_left_then_right_restores() {
        let image = test_image(5, 3);
        let mut filter = OrientationCropFilter::new();
        filter.rotate_left();
        filter.rotate_right();
        assert!(filter.orientation.is_identity());
        assert_eq!(filter.apply(&image).unwrap(), image);
    }

    #[test]
    fn test_flip_horizontal() {
        let image = test_image(3, 1);
        let mut filter = OrientationCropFilter::new();
        filter.flip_horizontal();

        let result = filter.apply(&image).unwrap();
        assert_eq!(result.pixel(0, 0), [2, 2, 2]);
        assert_eq!(result.pixel(2, 0), [0, 0, 0]);
    }

    #[test]
    fn test_turn_swaps_flips() {
        let mut state = OrientationState {
            flip_horizontal: true,
            ..OrientationState::default()
        };
        state.turn(Turn::Right);
        assert_eq!(state.quarter_turns, 1);
        assert!(!state.flip_horizontal);
        assert!(state.flip_vertical);
    }

    #[test]
    fn test_flipped_then_turned_matches_pixels() {
        // Mirror then turn, compared against the equivalent turn then mirror
        let image = test_image(4, 3);
        let mut a = OrientationCropFilter::new();
        a.flip_horizontal();
        a.rotate_right();

        let rgb = image.clone().into_rgb_image().unwrap();
        let mut flipped = rgb.clone();
        imageops::flip_horizontal_in_place(&mut flipped);
        let expected = PixelBuffer::from_rgb_image(imageops::rotate90(&flipped));

        assert_eq!(a.apply(&image).unwrap(), expected);
    }

    #[test]
    fn test_crop_center() {
        let image = test_image(10, 10);
        let mut filter = OrientationCropFilter::new();
        filter.crop_rect = Rect::new(0.2, 0.2, 0.8, 0.8);

        let result = filter.apply(&image).unwrap();
        assert_eq!((result.width, result.height), (6, 6));
        // First pixel comes from (2, 2)
        assert_eq!(result.pixels[0], 22);
    }

    #[test]
    fn test_crop_follows_rotation() {
        let mut filter = OrientationCropFilter::new();
        filter.crop_rect = Rect::new(0.0, 0.0, 0.5, 0.25);
        filter.rotate_right();
        // Top-left region moves to the top-right after a clockwise turn
        assert_eq!(filter.crop_rect, Rect::new(0.75, 0.0, 1.0, 0.5));
    }

    #[test]
    fn test_crop_clamps_out_of_bounds() {
        let image = test_image(10, 10);
        let mut filter = OrientationCropFilter::new();
        filter.crop_rect = Rect::new(-0.5, 0.8, 0.5, 1.5);

        let result = filter.apply(&image).unwrap();
        assert_eq!((result.width, result.height), (5, 2));
    }

    #[test]
    fn test_empty_crop_rect_is_error() {
        let image = test_image(4, 4);
        let mut filter = OrientationCropFilter::new();
        filter.crop_rect = Rect::new(0.5, 0.5, 0.5, 0.9);
        assert!(matches!(
            filter.apply(&image),
            Err(FilterError::EmptyCropRect(_))
        ));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
