//! Photostack Core - fixed filter stack for photo editing
//!
//! This crate holds the ordered stage chain of a photo editor: automatic
//! enhancement, orientation and crop, tilt-shift, stylistic effects, color
//! adjustment, and any number of sticker or text overlays. Canvas gestures
//! (quarter turns, mirrors, crops) are kept consistent across the stages
//! and the overlays that follow them.
//!
//! ```ignore
//! use photostack_core::{FixedFilterStack, PixelBuffer, TextFilter};
//!
//! let mut stack = FixedFilterStack::new();
//! stack.add_overlay(Box::new(TextFilter::new("Hello", "Helvetica", 24.0)));
//! stack.rotate_right();
//! let output = stack.render(&PixelBuffer::filled(64, 48, [128, 128, 128]))?;
//! ```

pub mod buffer;
pub mod curve;
pub mod error;
pub mod factory;
pub mod filter;
pub mod geometry;
pub mod histogram;
pub mod mask;
pub mod overlay;
pub mod stack;
pub mod stages;

pub use buffer::PixelBuffer;
pub use error::FilterError;
pub use factory::{FilterFactory, InstanceFactory};
pub use filter::{Capabilities, Filter, FilterKind, OverlayFilter};
pub use geometry::{FlipAxis, OverlayGeometry, Turn, UNIT_RECT};
pub use overlay::{StickerFilter, TextFilter};
pub use stack::{FixedFilterStack, OverlayId};
pub use stages::{
    ColorAdjustmentFilter, ColorAdjustments, EffectFilter, EffectType, EnhancementFilter,
    OrientationCropFilter, OrientationState, TiltShiftFilter, TiltShiftSettings, TiltShiftType,
};

pub use kurbo::{Affine, Point, Rect};
