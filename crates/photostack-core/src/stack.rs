//! The fixed filter stack.
//!
//! Stages run in a fixed order that never changes at runtime:
//!
//! 1. Enhancement
//! 2. Orientation and crop
//! 3. Tilt-shift
//! 4. Effect
//! 5. Brightness (color adjustment)
//! 6. Overlays, in insertion order
//!
//! The orientation stage owns the crop rectangle. Overlays that follow the
//! crop receive a copy of it whenever the stack hands out its stage list or
//! fans a gesture out to them.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::error::FilterError;
use crate::factory::{FilterFactory, InstanceFactory};
use crate::filter::{Capabilities, Filter, OverlayFilter};
use crate::geometry::{FlipAxis, Turn};
use crate::stages::{
    ColorAdjustmentFilter, EffectFilter, EffectType, EnhancementFilter, OrientationCropFilter,
    TiltShiftFilter,
};

/// Handle to an overlay inside a [`FixedFilterStack`].
///
/// Ids are never reused within a stack and survive cloning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OverlayId(u64);

impl OverlayId {
    /// Rebuild an id from its raw value, e.g. one handed to JavaScript.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct FixedFilterStack {
    pub enhancement: EnhancementFilter,
    pub orientation_crop: OrientationCropFilter,
    pub tilt_shift: TiltShiftFilter,
    pub effect: EffectFilter,
    pub color_adjustment: ColorAdjustmentFilter,
    overlays: Vec<(OverlayId, Box<dyn OverlayFilter>)>,
    next_id: u64,
}

impl Default for FixedFilterStack {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedFilterStack {
    /// Stack with stock stages from [`InstanceFactory`].
    pub fn new() -> Self {
        Self::with_factory(&InstanceFactory)
    }

    pub fn with_factory(factory: &dyn FilterFactory) -> Self {
        Self {
            enhancement: factory.enhancement_filter(),
            orientation_crop: factory.orientation_crop_filter(),
            tilt_shift: factory.tilt_shift_filter(),
            effect: factory.effect_filter(EffectType::None),
            color_adjustment: factory.color_adjustment_filter(),
            overlays: Vec::new(),
            next_id: 0,
        }
    }

    /// All stages in application order, with the crop rectangle pushed into
    /// the overlays first.
    ///
    /// Disabled stages are included; use [`Filter::enabled`] to skip them.
    pub fn active_filters(&mut self) -> Vec<&dyn Filter> {
        self.sync_crop_rect();

        let mut filters: Vec<&dyn Filter> = Vec::with_capacity(5 + self.overlays.len());
        filters.push(&self.enhancement);
        filters.push(&self.orientation_crop);
        filters.push(&self.tilt_shift);
        filters.push(&self.effect);
        filters.push(&self.color_adjustment);
        filters.extend(self.overlays.iter().map(|(_, overlay)| overlay.as_filter()));
        filters
    }

    /// Copy the orientation stage's crop rectangle into every overlay that
    /// follows the crop.
    pub fn sync_crop_rect(&mut self) {
        let rect = self.orientation_crop.crop_rect;
        let mut count = 0;
        for overlay in self.overlays_with(|caps| caps.cropped) {
            overlay.set_crop_rect(rect);
            count += 1;
        }
        if count > 0 {
            debug!("Propagated crop rect {rect:?} to {count} overlay(s)");
        }
    }

    /// Append an overlay after every existing one.
    pub fn add_overlay(&mut self, overlay: Box<dyn OverlayFilter>) -> OverlayId {
        let id = OverlayId(self.next_id);
        self.next_id += 1;
        debug!("Adding overlay '{}' as {}", overlay.name(), id.0);
        self.overlays.push((id, overlay));
        id
    }

    /// Remove an overlay, keeping the order of the rest.
    pub fn remove_overlay(&mut self, id: OverlayId) -> Option<Box<dyn OverlayFilter>> {
        let index = self.overlays.iter().position(|(other, _)| *other == id)?;
        let (_, overlay) = self.overlays.remove(index);
        debug!("Removed overlay '{}' ({})", overlay.name(), id.0);
        Some(overlay)
    }

    pub fn overlay(&self, id: OverlayId) -> Option<&dyn OverlayFilter> {
        self.overlays
            .iter()
            .find(|(other, _)| *other == id)
            .map(|(_, overlay)| &**overlay)
    }

    pub fn overlay_mut(&mut self, id: OverlayId) -> Option<&mut dyn OverlayFilter> {
        let (_, overlay) = self.overlays.iter_mut().find(|(other, _)| *other == id)?;
        Some(overlay.as_mut())
    }

    /// Overlays in insertion order.
    pub fn overlays(&self) -> impl Iterator<Item = (OverlayId, &dyn OverlayFilter)> {
        self.overlays
            .iter()
            .map(|(id, overlay)| (*id, &**overlay))
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    pub fn rotate_stickers_right(&mut self) {
        self.rotate_stickers(Turn::Right);
    }

    pub fn rotate_stickers_left(&mut self) {
        self.rotate_stickers(Turn::Left);
    }

    pub fn flip_stickers_horizontal(&mut self) {
        self.flip_stickers(FlipAxis::Horizontal);
    }

    pub fn flip_stickers_vertical(&mut self) {
        self.flip_stickers(FlipAxis::Vertical);
    }

    /// Turn text overlays 90 degrees clockwise with the canvas.
    ///
    /// Font sizes are scaled by the height/width ratio of the frame each
    /// overlay was last drawn onto; overlays never drawn keep their size.
    /// The recorded frame size turns along with the text, so two turns
    /// without a render in between cancel out.
    pub fn rotate_text_right(&mut self) {
        self.rotate_text(Turn::Right);
    }

    pub fn rotate_text_left(&mut self) {
        self.rotate_text(Turn::Left);
    }

    pub fn flip_text_horizontal(&mut self) {
        self.flip_text(FlipAxis::Horizontal);
    }

    pub fn flip_text_vertical(&mut self) {
        self.flip_text(FlipAxis::Vertical);
    }

    /// Turn the whole canvas clockwise: orientation, stickers and text.
    pub fn rotate_right(&mut self) {
        self.rotate(Turn::Right);
    }

    pub fn rotate_left(&mut self) {
        self.rotate(Turn::Left);
    }

    /// Mirror the whole canvas left to right.
    pub fn flip_horizontal(&mut self) {
        self.flip(FlipAxis::Horizontal);
    }

    pub fn flip_vertical(&mut self) {
        self.flip(FlipAxis::Vertical);
    }

    /// Run every enabled stage over `image` in order.
    ///
    /// Each overlay records the size of the frame it is drawn onto before it
    /// is applied.
    pub fn render(&mut self, image: &PixelBuffer) -> Result<PixelBuffer, FilterError> {
        image.validate()?;
        self.sync_crop_rect();

        let stages: [&dyn Filter; 5] = [
            &self.enhancement,
            &self.orientation_crop,
            &self.tilt_shift,
            &self.effect,
            &self.color_adjustment,
        ];
        let mut current = image.clone();
        for stage in stages {
            current = apply_stage(stage, current)?;
        }
        for (_, overlay) in &mut self.overlays {
            overlay.set_input_size(current.width, current.height);
            current = apply_stage(overlay.as_filter(), current)?;
        }
        Ok(current)
    }

    fn rotate(&mut self, turn: Turn) {
        self.orientation_crop.rotate(turn);
        self.rotate_stickers(turn);
        self.rotate_text(turn);
    }

    fn flip(&mut self, axis: FlipAxis) {
        self.orientation_crop.flip(axis);
        self.flip_stickers(axis);
        self.flip_text(axis);
    }

    fn rotate_stickers(&mut self, turn: Turn) {
        self.sync_crop_rect();
        let mut count = 0;
        for overlay in self.overlays_with(|caps| caps.rotatable) {
            overlay.geometry_mut().rotate(turn);
            count += 1;
        }
        debug!("Rotated {count} sticker(s) {turn:?}");
    }

    fn flip_stickers(&mut self, axis: FlipAxis) {
        self.sync_crop_rect();
        let mut count = 0;
        for overlay in self.overlays_with(|caps| caps.flippable) {
            overlay.geometry_mut().flip(axis);
            count += 1;
        }
        debug!("Flipped {count} sticker(s) {axis:?}");
    }

    fn rotate_text(&mut self, turn: Turn) {
        self.sync_crop_rect();
        let mut count = 0;
        for overlay in self.overlays_with(|caps| caps.text) {
            overlay.geometry_mut().rotate(turn);
            if let Some((width, height)) = overlay.input_size() {
                if let Some(ratio) = overlay.input_aspect_ratio() {
                    overlay.scale_font_size(ratio);
                }
                // The next frame arrives turned
                overlay.set_input_size(height, width);
            }
            count += 1;
        }
        debug!("Rotated {count} text overlay(s) {turn:?}");
    }

    fn flip_text(&mut self, axis: FlipAxis) {
        self.sync_crop_rect();
        let mut count = 0;
        for overlay in self.overlays_with(|caps| caps.text) {
            overlay.geometry_mut().flip(axis);
            count += 1;
        }
        debug!("Flipped {count} text overlay(s) {axis:?}");
    }

    fn overlays_with(
        &mut self,
        wants: impl Fn(Capabilities) -> bool,
    ) -> impl Iterator<Item = &mut Box<dyn OverlayFilter>> {
        self.overlays
            .iter_mut()
            .map(|(_, overlay)| overlay)
            .filter(move |overlay| wants(overlay.capabilities()))
    }
}

fn apply_stage(filter: &dyn Filter, image: PixelBuffer) -> Result<PixelBuffer, FilterError> {
    if !filter.enabled() {
        trace!("Skipping disabled stage '{}'", filter.name());
        return Ok(image);
    }
    trace!(
        "Applying '{}' to {}x{}",
        filter.name(),
        image.width,
        image.height
    );
    filter.apply(&image)
}
