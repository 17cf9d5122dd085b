//! Band-shaped focus region around a line.

use kurbo::Point;

use super::falloff;

/// Sharp band around the infinite line through `start` and `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusBand {
    pub start: Point,
    pub end: Point,
    /// Half-width of the sharp band in pixels.
    pub radius: f64,
    /// Width of the transition to full blur in pixels.
    pub feather: f64,
}

impl FocusBand {
    pub fn new(start: Point, end: Point, radius: f64, feather: f64) -> Self {
        Self {
            start,
            end,
            radius: radius.max(0.0),
            feather: feather.max(0.0),
        }
    }

    /// Perpendicular distance from the line.
    ///
    /// Falls back to the distance from `start` when the line is degenerate.
    pub fn distance(&self, point: Point) -> f64 {
        let dir = self.end - self.start;
        let len = dir.hypot();
        let offset = point - self.start;
        if len < f64::EPSILON {
            return offset.hypot();
        }
        dir.cross(offset).abs() / len
    }

    /// Blur weight at `point` (0.0 = sharp, 1.0 = blurred).
    pub fn evaluate(&self, point: Point) -> f64 {
        falloff(self.distance(point), self.radius, self.feather)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal_band() -> FocusBand {
        FocusBand::new(Point::new(0.0, 50.0), Point::new(100.0, 50.0), 10.0, 10.0)
    }

    #[test]
    fn test_on_line_is_sharp() {
        let band = horizontal_band();
        assert_eq!(band.evaluate(Point::new(30.0, 50.0)), 0.0);
        assert_eq!(band.evaluate(Point::new(500.0, 55.0)), 0.0);
    }

    #[test]
    fn test_far_from_line_is_blurred() {
        let band = horizontal_band();
        assert_eq!(band.evaluate(Point::new(30.0, 0.0)), 1.0);
        assert_eq!(band.evaluate(Point::new(30.0, 100.0)), 1.0);
    }

    #[test]
    fn test_transition_midpoint() {
        let band = horizontal_band();
        assert!((band.evaluate(Point::new(0.0, 65.0)) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_diagonal_distance() {
        let band = FocusBand::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0), 0.0, 0.0);
        let d = band.distance(Point::new(10.0, 0.0));
        assert!((d - 50.0f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_line() {
        let band = FocusBand::new(Point::new(5.0, 5.0), Point::new(5.0, 5.0), 0.0, 0.0);
        assert!((band.distance(Point::new(8.0, 9.0)) - 5.0).abs() < 1e-9);
    }
}
