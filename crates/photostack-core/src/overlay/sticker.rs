//! Sticker overlay: a bitmap placed, turned, and mirrored with the canvas.

use image::RgbaImage;
use kurbo::Point;

use super::composite::composite;
use crate::buffer::PixelBuffer;
use crate::error::FilterError;
use crate::filter::{Capabilities, Filter, FilterKind, OverlayFilter};
use crate::geometry::{FlipAxis, OverlayGeometry, Turn};

/// Default sticker width as a fraction of the image width.
pub const DEFAULT_STICKER_SCALE: f64 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub struct StickerFilter {
    enabled: bool,
    name: String,
    /// Sticker artwork with alpha.
    pub bitmap: Option<RgbaImage>,
    /// Sticker width as a fraction of the uncropped image width.
    pub scale: f64,
    pub geometry: OverlayGeometry,
}

impl StickerFilter {
    pub fn new(name: impl Into<String>, bitmap: RgbaImage, center: Point) -> Self {
        Self {
            enabled: true,
            name: name.into(),
            bitmap: Some(bitmap),
            scale: DEFAULT_STICKER_SCALE,
            geometry: OverlayGeometry::at(center),
        }
    }

    /// A sticker with no artwork attached yet.
    pub fn placeholder(name: impl Into<String>, center: Point) -> Self {
        Self {
            enabled: true,
            name: name.into(),
            bitmap: None,
            scale: DEFAULT_STICKER_SCALE,
            geometry: OverlayGeometry::at(center),
        }
    }

    pub fn rotate_right(&mut self) {
        self.geometry.rotate(Turn::Right);
    }

    pub fn rotate_left(&mut self) {
        self.geometry.rotate(Turn::Left);
    }

    pub fn flip_horizontal(&mut self) {
        self.geometry.flip(FlipAxis::Horizontal);
    }

    pub fn flip_vertical(&mut self) {
        self.geometry.flip(FlipAxis::Vertical);
    }
}

impl Filter for StickerFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> FilterKind {
        FilterKind::Sticker
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn apply(&self, image: &PixelBuffer) -> Result<PixelBuffer, FilterError> {
        image.validate()?;
        Ok(match &self.bitmap {
            Some(bitmap) => composite(image, bitmap, &self.geometry, self.scale),
            None => image.clone(),
        })
    }

    fn clone_box(&self) -> Box<dyn Filter> {
        Box::new(self.clone())
    }
}

impl OverlayFilter for StickerFilter {
    fn capabilities(&self) -> Capabilities {
        Capabilities::STICKER
    }

    fn geometry(&self) -> &OverlayGeometry {
        &self.geometry
    }

    fn geometry_mut(&mut self) -> &mut OverlayGeometry {
        &mut self.geometry
    }

    fn clone_overlay(&self) -> Box<dyn OverlayFilter> {
        Box::new(self.clone())
    }

    fn as_filter(&self) -> &dyn Filter {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_rotate_right_updates_geometry() {
        let mut sticker = StickerFilter::placeholder("star", Point::new(0.3, 0.3));
        sticker.rotate_right();
        assert!((sticker.center().x - 0.7).abs() < 1e-12);
        assert!((sticker.center().y - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_flip_horizontal_mirrors_center() {
        let mut sticker = StickerFilter::placeholder("star", Point::new(0.2, 0.6));
        sticker.flip_horizontal();
        assert!((sticker.center().x - 0.8).abs() < 1e-12);
        sticker.flip_vertical();
        assert!((sticker.center().y - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_placeholder_is_identity() {
        let image = PixelBuffer::filled(6, 6, [7, 8, 9]);
        let sticker = StickerFilter::placeholder("empty", Point::new(0.5, 0.5));
        assert_eq!(sticker.apply(&image).unwrap(), image);
    }

    #[test]
    fn test_apply_draws_bitmap() {
        let image = PixelBuffer::filled(10, 10, [0, 0, 0]);
        let bitmap = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255]));
        let sticker = StickerFilter::new("dot", bitmap, Point::new(0.5, 0.5));
        let result = sticker.apply(&image).unwrap();
        assert_eq!(result.pixel(5, 5), [0, 0, 255]);
        assert_eq!(result.pixel(0, 0), [0, 0, 0]);
    }

    #[test]
    fn test_clone_overlay_is_deep() {
        let bitmap = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255]));
        let mut original = StickerFilter::new("dot", bitmap, Point::new(0.5, 0.5));
        let copy = original.clone_overlay();

        original.rotate_left();
        if let Some(bitmap) = original.bitmap.as_mut() {
            bitmap.put_pixel(0, 0, Rgba([1, 1, 1, 1]));
        }

        assert_eq!(copy.center(), Point::new(0.5, 0.5));
        assert_eq!(copy.transform(), kurbo::Affine::IDENTITY);
    }
}
