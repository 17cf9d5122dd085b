//! Filter stack WASM bindings.
//!
//! Stage parameters cross the boundary as plain objects through
//! serde_wasm_bindgen, using the same field names as the core structs.
//! Overlays are addressed by the numeric id returned when they are added.

use crate::types::JsPixelBuffer;
use image::RgbaImage;
use photostack_core::{
    ColorAdjustments, EffectType, Filter, FixedFilterStack, OverlayFilter, OverlayId, Point, Rect,
    StickerFilter, TextFilter, TiltShiftSettings,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Placement of an overlay, as reported to JavaScript.
#[derive(Debug, Clone, Serialize)]
pub struct JsOverlayState {
    pub name: String,
    pub enabled: bool,
    pub center_x: f64,
    pub center_y: f64,
    /// Rotation of the overlay transform in radians.
    pub angle: f64,
    /// Affine coefficients `[a, b, c, d, e, f]`.
    pub transform: [f64; 6],
    pub font_size: Option<f64>,
}

#[wasm_bindgen]
pub struct JsFilterStack {
    inner: FixedFilterStack,
}

impl Default for JsFilterStack {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsFilterStack {
    /// Create a stack with every stage at its default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: FixedFilterStack::new(),
        }
    }

    pub fn set_enhancement_enabled(&mut self, enabled: bool) {
        self.inner.enhancement.set_enabled(enabled);
    }

    /// Set brightness, contrast and saturation from
    /// `{ brightness, contrast, saturation }`.
    pub fn set_color_adjustments(&mut self, value: JsValue) -> Result<(), JsValue> {
        let adjustments: ColorAdjustments =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner.color_adjustment.adjustments = adjustments;
        Ok(())
    }

    pub fn color_adjustments(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.color_adjustment.adjustments)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Set tilt-shift parameters from a `TiltShiftSettings`-shaped object.
    pub fn set_tilt_shift(&mut self, value: JsValue) -> Result<(), JsValue> {
        let settings: TiltShiftSettings = serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsValue::from_str(&format!("Invalid tilt-shift settings: {}", e)))?;
        self.inner.tilt_shift.settings = settings;
        Ok(())
    }

    /// Select an effect by variant name, e.g. `"Mellow"`.
    pub fn set_effect(&mut self, value: JsValue) -> Result<(), JsValue> {
        let effect: EffectType = serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsValue::from_str(&format!("Invalid effect: {}", e)))?;
        self.inner.effect.set_effect(effect);
        Ok(())
    }

    pub fn set_effect_intensity(&mut self, intensity: f32) {
        self.inner.effect.intensity = intensity;
    }

    /// Set the normalized crop rectangle of the oriented image.
    pub fn set_crop_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.inner.orientation_crop.crop_rect = Rect::new(x0, y0, x1, y1);
    }

    /// Add a sticker from RGBA pixel data; returns its id.
    pub fn add_sticker(
        &mut self,
        name: String,
        width: u32,
        height: u32,
        rgba: Vec<u8>,
        center_x: f64,
        center_y: f64,
    ) -> Result<u64, JsValue> {
        let bitmap = rgba_bitmap(width, height, rgba)
            .ok_or_else(|| JsValue::from_str("Sticker pixel data does not match its size"))?;
        let sticker = StickerFilter::new(name, bitmap, Point::new(center_x, center_y));
        Ok(self.inner.add_overlay(Box::new(sticker)).get())
    }

    /// Add a text overlay; returns its id.
    ///
    /// `glyph_rgba` is the text pre-rendered by the caller at `font_size`.
    #[allow(clippy::too_many_arguments)]
    pub fn add_text(
        &mut self,
        text: String,
        font_name: String,
        font_size: f64,
        center_x: f64,
        center_y: f64,
        glyph_width: u32,
        glyph_height: u32,
        glyph_rgba: Option<Vec<u8>>,
    ) -> Result<u64, JsValue> {
        let mut filter =
            TextFilter::new(text, font_name, font_size).with_center(Point::new(center_x, center_y));
        if let Some(rgba) = glyph_rgba {
            let glyph = rgba_bitmap(glyph_width, glyph_height, rgba)
                .ok_or_else(|| JsValue::from_str("Glyph pixel data does not match its size"))?;
            filter = filter.with_glyph(glyph);
        }
        Ok(self.inner.add_overlay(Box::new(filter)).get())
    }

    /// Remove an overlay. Returns false if the id is unknown.
    pub fn remove_overlay(&mut self, id: u64) -> bool {
        self.inner.remove_overlay(OverlayId::from_raw(id)).is_some()
    }

    /// Current placement of an overlay, or `undefined` if the id is unknown.
    pub fn overlay_state(&self, id: u64) -> Result<JsValue, JsValue> {
        match self.state(id) {
            Some(state) => {
                serde_wasm_bindgen::to_value(&state).map_err(|e| JsValue::from_str(&e.to_string()))
            }
            None => Ok(JsValue::UNDEFINED),
        }
    }

    pub fn rotate_right(&mut self) {
        self.inner.rotate_right();
    }

    pub fn rotate_left(&mut self) {
        self.inner.rotate_left();
    }

    pub fn flip_horizontal(&mut self) {
        self.inner.flip_horizontal();
    }

    pub fn flip_vertical(&mut self) {
        self.inner.flip_vertical();
    }

    /// Independent copy of the stack, e.g. for a background preview render.
    pub fn snapshot(&self) -> JsFilterStack {
        JsFilterStack {
            inner: self.inner.clone(),
        }
    }

    /// Render `image` through every enabled stage.
    pub fn render(&mut self, image: &JsPixelBuffer) -> Result<JsPixelBuffer, JsValue> {
        self.inner
            .render(image.buffer())
            .map(JsPixelBuffer::from_buffer)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Stage names in application order.
    pub fn active_filter_names(&mut self) -> js_sys::Array {
        self.filter_names()
            .into_iter()
            .map(|name| JsValue::from_str(&name))
            .collect()
    }
}

impl JsFilterStack {
    fn filter_names(&mut self) -> Vec<String> {
        self.inner
            .active_filters()
            .iter()
            .map(|filter| filter.name().to_string())
            .collect()
    }

    fn state(&self, id: u64) -> Option<JsOverlayState> {
        let overlay = self.inner.overlay(OverlayId::from_raw(id))?;
        let center = overlay.center();
        Some(JsOverlayState {
            name: overlay.name().to_string(),
            enabled: overlay.enabled(),
            center_x: center.x,
            center_y: center.y,
            angle: overlay.geometry().angle(),
            transform: overlay.transform().as_coeffs(),
            font_size: overlay.font_size(),
        })
    }
}

fn rgba_bitmap(width: u32, height: u32, rgba: Vec<u8>) -> Option<RgbaImage> {
    RgbaImage::from_raw(width, height, rgba)
}
