//! Focus masks for the tilt-shift stage.
//!
//! A focus mask maps a pixel position to a blur weight from 0.0 (sharp,
//! inside the focus region) to 1.0 (fully blurred). Masks are evaluated in
//! pixel space so that circles stay round on non-square images.
//!
//! ## Mask Types
//!
//! - **Band**: sharp within a distance of a line, used by box tilt-shift
//! - **Circle**: sharp within a distance of a point, used by circular tilt-shift
//!
//! The falloff between sharp and blurred uses smootherstep.

mod band;
mod circle;

pub use band::FocusBand;
pub use circle::FocusCircle;

/// Smootherstep interpolation: `6t^5 - 15t^4 + 10t^3`.
///
/// Input is clamped to 0.0-1.0.
#[inline]
pub fn smootherstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Blur weight for a distance from the focus region.
///
/// Zero up to `radius`, rising to one across `feather`.
#[inline]
pub(crate) fn falloff(distance: f64, radius: f64, feather: f64) -> f64 {
    if feather <= f64::EPSILON {
        return if distance > radius { 1.0 } else { 0.0 };
    }
    smootherstep((distance - radius) / feather)
}
