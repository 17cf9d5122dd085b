//! Text overlay.
//!
//! Glyph rasterization happens outside this crate: a glyph renderer reads
//! the text, font, color, and `initial_font_size`, and attaches the
//! resulting bitmap. Font sizes are relative to the frame the text is drawn
//! onto, so a quarter turn rescales them by that frame's aspect ratio.

use image::RgbaImage;
use kurbo::Point;

use super::composite::composite;
use crate::buffer::PixelBuffer;
use crate::error::FilterError;
use crate::filter::{Capabilities, Filter, FilterKind, OverlayFilter};
use crate::geometry::OverlayGeometry;

/// Default text width as a fraction of the image width.
pub const DEFAULT_TEXT_SCALE: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct TextFilter {
    enabled: bool,
    pub text: String,
    pub font_name: String,
    /// RGBA text color.
    pub color: [u8; 4],
    /// Font size handed to the glyph renderer.
    pub initial_font_size: f64,
    /// Rendered glyphs, if the renderer has produced them.
    pub glyph: Option<RgbaImage>,
    /// Width and height of the last frame this text was drawn onto.
    pub input_size: Option<(u32, u32)>,
    /// Glyph width as a fraction of the uncropped image width.
    pub scale: f64,
    pub geometry: OverlayGeometry,
}

impl TextFilter {
    pub fn new(text: impl Into<String>, font_name: impl Into<String>, font_size: f64) -> Self {
        Self {
            enabled: true,
            text: text.into(),
            font_name: font_name.into(),
            color: [255, 255, 255, 255],
            initial_font_size: font_size,
            glyph: None,
            input_size: None,
            scale: DEFAULT_TEXT_SCALE,
            geometry: OverlayGeometry::default(),
        }
    }

    pub fn with_center(mut self, center: Point) -> Self {
        self.geometry.center = center;
        self
    }

    pub fn with_glyph(mut self, glyph: RgbaImage) -> Self {
        self.glyph = Some(glyph);
        self
    }

    pub fn with_input_size(mut self, width: u32, height: u32) -> Self {
        self.input_size = Some((width, height));
        self
    }
}

impl Filter for TextFilter {
    fn name(&self) -> &str {
        &self.text
    }

    fn kind(&self) -> FilterKind {
        FilterKind::Text
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn apply(&self, image: &PixelBuffer) -> Result<PixelBuffer, FilterError> {
        image.validate()?;
        Ok(match &self.glyph {
            Some(glyph) => composite(image, glyph, &self.geometry, self.scale),
            None => image.clone(),
        })
    }

    fn clone_box(&self) -> Box<dyn Filter> {
        Box::new(self.clone())
    }
}

impl OverlayFilter for TextFilter {
    fn capabilities(&self) -> Capabilities {
        Capabilities::TEXT
    }

    fn geometry(&self) -> &OverlayGeometry {
        &self.geometry
    }

    fn geometry_mut(&mut self) -> &mut OverlayGeometry {
        &mut self.geometry
    }

    fn set_input_size(&mut self, width: u32, height: u32) {
        self.input_size = Some((width, height));
    }

    fn input_size(&self) -> Option<(u32, u32)> {
        self.input_size
    }

    fn font_size(&self) -> Option<f64> {
        Some(self.initial_font_size)
    }

    fn scale_font_size(&mut self, factor: f64) {
        self.initial_font_size *= factor;
    }

    fn clone_overlay(&self) -> Box<dyn OverlayFilter> {
        Box::new(self.clone())
    }

    fn as_filter(&self) -> &dyn Filter {
        self
    }
}
