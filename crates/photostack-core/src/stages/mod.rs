//! The fixed stages of the filter stack.
//!
//! # Stage Order
//!
//! The stack applies its fixed stages in this order:
//! 1. Enhancement (automatic levels)
//! 2. Orientation & crop
//! 3. Tilt-shift
//! 4. Effect
//! 5. Color adjustment (brightness, contrast, saturation)
//!
//! Overlays follow the fixed stages.

mod color;
mod effect;
mod enhancement;
mod orientation;
mod tilt_shift;

pub use color::{ColorAdjustmentFilter, ColorAdjustments};
pub use effect::{EffectFilter, EffectType};
pub use enhancement::EnhancementFilter;
pub use orientation::{OrientationCropFilter, OrientationState};
pub use tilt_shift::{TiltShiftFilter, TiltShiftSettings, TiltShiftType};
