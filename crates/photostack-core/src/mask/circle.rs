//! Circular focus region around a point.

use kurbo::Point;

use super::falloff;

/// Sharp disc around `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusCircle {
    pub center: Point,
    /// Radius of the sharp disc in pixels.
    pub radius: f64,
    /// Width of the transition to full blur in pixels.
    pub feather: f64,
}

impl FocusCircle {
    pub fn new(center: Point, radius: f64, feather: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            feather: feather.max(0.0),
        }
    }

    /// Circle through two points, centered on their midpoint.
    pub fn through(a: Point, b: Point, feather: f64) -> Self {
        Self::new(a.midpoint(b), a.distance(b) / 2.0, feather)
    }

    /// Blur weight at `point` (0.0 = sharp, 1.0 = blurred).
    pub fn evaluate(&self, point: Point) -> f64 {
        falloff(self.center.distance(point), self.radius, self.feather)
    }
}
