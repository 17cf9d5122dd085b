//! Capability contracts for filter stages and overlays.
//!
//! Every step of the stack implements [`Filter`]. Positioned elements
//! layered after the fixed stages additionally implement [`OverlayFilter`],
//! and advertise through [`Capabilities`] which canvas gestures they follow.

use std::fmt;

use kurbo::{Affine, Point, Rect};

use crate::buffer::PixelBuffer;
use crate::error::FilterError;
use crate::geometry::OverlayGeometry;

/// The kind of a stage, used for ordering checks and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Enhancement,
    OrientationCrop,
    TiltShift,
    Effect,
    ColorAdjustment,
    Sticker,
    Text,
}

/// A single named, switchable processing step.
pub trait Filter: fmt::Debug + Send {
    /// Display name of the stage.
    fn name(&self) -> &str;

    /// What kind of stage this is.
    fn kind(&self) -> FilterKind;

    /// Whether the stage should take part in rendering.
    fn enabled(&self) -> bool;

    /// Switch the stage on or off without removing it from the stack.
    fn set_enabled(&mut self, enabled: bool);

    /// Produce the stage output for `image`.
    ///
    /// Stages do not consult [`Filter::enabled`]; skipping disabled stages
    /// is the caller's decision.
    fn apply(&self, image: &PixelBuffer) -> Result<PixelBuffer, FilterError>;

    /// Deep copy of the stage and all of its parameters.
    fn clone_box(&self) -> Box<dyn Filter>;
}

impl Clone for Box<dyn Filter> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Which stack operations apply to an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Follows sticker quarter turns.
    pub rotatable: bool,
    /// Follows sticker mirrors.
    pub flippable: bool,
    /// Follows text turns and mirrors, including font rescaling.
    pub text: bool,
    /// Receives the crop rectangle from the orientation stage.
    pub cropped: bool,
}

impl Capabilities {
    /// An overlay no stack operation touches.
    pub const NONE: Self = Self {
        rotatable: false,
        flippable: false,
        text: false,
        cropped: false,
    };

    /// Capabilities of a sticker.
    pub const STICKER: Self = Self {
        rotatable: true,
        flippable: true,
        text: false,
        cropped: true,
    };

    /// Capabilities of a text label.
    pub const TEXT: Self = Self {
        rotatable: false,
        flippable: false,
        text: true,
        cropped: true,
    };
}

/// A positioned, transformable element layered after the fixed stages.
pub trait OverlayFilter: Filter {
    /// Operations this overlay takes part in.
    fn capabilities(&self) -> Capabilities;

    /// Placement of the overlay.
    fn geometry(&self) -> &OverlayGeometry;

    /// Mutable placement of the overlay.
    fn geometry_mut(&mut self) -> &mut OverlayGeometry;

    /// Record the size of the frame the overlay is drawn onto.
    fn set_input_size(&mut self, _width: u32, _height: u32) {}

    /// Width and height of the last recorded input frame.
    fn input_size(&self) -> Option<(u32, u32)> {
        None
    }

    /// Height over width of the last recorded input frame.
    fn input_aspect_ratio(&self) -> Option<f64> {
        match self.input_size()? {
            (0, _) => None,
            (width, height) => Some(height as f64 / width as f64),
        }
    }

    /// Font size used to render the overlay, for overlays that draw text.
    fn font_size(&self) -> Option<f64> {
        None
    }

    /// Multiply the font size used to render the overlay.
    fn scale_font_size(&mut self, _factor: f64) {}

    /// Deep copy as a boxed overlay.
    fn clone_overlay(&self) -> Box<dyn OverlayFilter>;

    /// View this overlay as a plain stage.
    fn as_filter(&self) -> &dyn Filter;

    fn transform(&self) -> Affine {
        self.geometry().transform
    }

    fn set_transform(&mut self, transform: Affine) {
        self.geometry_mut().transform = transform;
    }

    fn center(&self) -> Point {
        self.geometry().center
    }

    fn set_center(&mut self, center: Point) {
        self.geometry_mut().center = center;
    }

    fn crop_rect(&self) -> Rect {
        self.geometry().crop_rect
    }

    fn set_crop_rect(&mut self, rect: Rect) {
        self.geometry_mut().crop_rect = rect;
    }
}

impl Clone for Box<dyn OverlayFilter> {
    fn clone(&self) -> Self {
        self.clone_overlay()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_presets() {
        assert!(Capabilities::STICKER.rotatable);
        assert!(Capabilities::STICKER.flippable);
        assert!(!Capabilities::STICKER.text);
        assert!(Capabilities::TEXT.text);
        assert!(!Capabilities::TEXT.rotatable);
        assert_eq!(Capabilities::default(), Capabilities::NONE);
    }
}
