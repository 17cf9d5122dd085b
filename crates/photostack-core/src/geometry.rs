//! Overlay geometry: rotation, flipping, and crop-space bookkeeping.
//!
//! Overlays (stickers, text) carry a 2D affine transform for their own
//! rotation and scale, plus a center point in normalized image space.
//! Whole-canvas gestures are modeled here as quarter turns and mirrors of
//! that state.
//!
//! # Coordinate System
//!
//! - (0.0, 0.0) = top-left corner, (1.0, 1.0) = bottom-right corner
//! - y grows downward, so a positive rotation turns clockwise on screen
//! - Canvas operations pivot around (0.5, 0.5)
//!
//! # Reflection as Double Rotation
//!
//! Overlays only store a rotation, so a mirror is realized by rotating the
//! overlay to the far side of the mirror axis: for an axis at angle `α` and
//! a current angle `θ`, rotating by `2 * (α - θ)` lands on `2α - θ`.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};

/// The full-image crop rectangle.
pub const UNIT_RECT: Rect = Rect {
    x0: 0.0,
    y0: 0.0,
    x1: 1.0,
    y1: 1.0,
};

/// Pivot for canvas rotations and mirrors.
const CANVAS_CENTER: Point = Point { x: 0.5, y: 0.5 };

/// A quarter turn of the whole canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    /// 90 degrees clockwise.
    Right,
    /// 90 degrees counter-clockwise.
    Left,
}

impl Turn {
    /// Rotation angle in radians applied to overlay transforms.
    pub fn angle(self) -> f64 {
        match self {
            Turn::Right => FRAC_PI_2,
            Turn::Left => -FRAC_PI_2,
        }
    }

    /// Move a normalized point along with the canvas.
    ///
    /// The point is shifted into a frame centered on the canvas, its axes are
    /// swapped with one negated, and it is shifted back.
    pub fn rotate_point(self, point: Point) -> Point {
        let offset = point - CANVAS_CENTER;
        let turned = match self {
            Turn::Right => kurbo::Vec2::new(-offset.y, offset.x),
            Turn::Left => kurbo::Vec2::new(offset.y, -offset.x),
        };
        CANVAS_CENTER + turned
    }

    /// Move a normalized rectangle along with the canvas.
    pub fn rotate_rect(self, rect: Rect) -> Rect {
        match self {
            Turn::Right => Rect::new(1.0 - rect.y1, rect.x0, 1.0 - rect.y0, rect.x1),
            Turn::Left => Rect::new(rect.y0, 1.0 - rect.x1, rect.y1, 1.0 - rect.x0),
        }
    }
}

/// A mirror of the whole canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipAxis {
    /// Mirror left to right.
    Horizontal,
    /// Mirror top to bottom.
    Vertical,
}

impl FlipAxis {
    /// The cardinal angle an overlay rotation is reflected about.
    pub fn axis_angle(self) -> f64 {
        match self {
            FlipAxis::Horizontal => PI,
            FlipAxis::Vertical => FRAC_PI_2,
        }
    }

    /// Mirror a normalized point about the canvas center.
    pub fn flip_point(self, point: Point) -> Point {
        match self {
            FlipAxis::Horizontal => Point::new(1.0 - point.x, point.y),
            FlipAxis::Vertical => Point::new(point.x, 1.0 - point.y),
        }
    }

    /// Mirror a normalized rectangle about the canvas center.
    pub fn flip_rect(self, rect: Rect) -> Rect {
        match self {
            FlipAxis::Horizontal => Rect::new(1.0 - rect.x1, rect.y0, 1.0 - rect.x0, rect.y1),
            FlipAxis::Vertical => Rect::new(rect.x0, 1.0 - rect.y1, rect.x1, 1.0 - rect.y0),
        }
    }
}

/// Rotation encoded in an affine transform, in radians within (-π, π].
#[inline]
pub fn rotation_angle(transform: &Affine) -> f64 {
    let [a, b, _, _, _, _] = transform.as_coeffs();
    b.atan2(a)
}

/// Wrap an angle into [0, 2π).
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Placement state shared by every overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayGeometry {
    /// Rotation and scale of the overlay about its own center.
    pub transform: Affine,
    /// Anchor point in normalized, uncropped image space.
    pub center: Point,
    /// Crop rectangle mirrored from the orientation/crop stage.
    pub crop_rect: Rect,
}

impl Default for OverlayGeometry {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            center: CANVAS_CENTER,
            crop_rect: UNIT_RECT,
        }
    }
}

impl OverlayGeometry {
    /// Create geometry at the given center with an identity transform.
    pub fn at(center: Point) -> Self {
        Self {
            center,
            ..Self::default()
        }
    }

    /// Current rotation of the overlay transform in radians.
    pub fn angle(&self) -> f64 {
        rotation_angle(&self.transform)
    }

    /// Turn the overlay together with the canvas.
    pub fn rotate(&mut self, turn: Turn) {
        self.transform = self.transform * Affine::rotate(turn.angle());
        self.center = turn.rotate_point(self.center);
    }

    /// Mirror the overlay together with the canvas.
    pub fn flip(&mut self, axis: FlipAxis) {
        let angle = normalize_angle(self.angle());
        let delta = axis.axis_angle() - angle;
        self.transform = self.transform * Affine::rotate(delta * 2.0);
        self.center = axis.flip_point(self.center);
    }

    /// Overlay center expressed relative to the crop rectangle.
    ///
    /// Returns `None` when the crop rectangle has no area.
    pub fn center_in_crop(&self) -> Option<Point> {
        let crop = self.crop_rect;
        if crop.width() <= 0.0 || crop.height() <= 0.0 {
            return None;
        }
        Some(Point::new(
            (self.center.x - crop.x0) / crop.width(),
            (self.center.y - crop.y0) / crop.height(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn assert_point_eq(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() < TOLERANCE && (actual.y - expected.y).abs() < TOLERANCE,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    fn assert_affine_eq(actual: Affine, expected: Affine) {
        let a = actual.as_coeffs();
        let e = expected.as_coeffs();
        for i in 0..6 {
            assert!(
                (a[i] - e[i]).abs() < TOLERANCE,
                "coefficient {} differs: expected {:?}, got {:?}",
                i,
                e,
                a
            );
        }
    }

    #[test]
    fn test_turn_right_moves_center() {
        let mut geometry = OverlayGeometry::at(Point::new(0.3, 0.3));
        geometry.rotate(Turn::Right);

        assert_point_eq(geometry.center, Point::new(0.7, 0.3));
        assert!((geometry.angle() - FRAC_PI_2).abs() < TOLERANCE);
    }

    #[test]
    fn test_turn_left_moves_center() {
        let mut geometry = OverlayGeometry::at(Point::new(0.3, 0.3));
        geometry.rotate(Turn::Left);

        // offset (-0.2, -0.2) -> (y, -x) = (-0.2, 0.2)
        assert_point_eq(geometry.center, Point::new(0.3, 0.7));
        assert!((geometry.angle() + FRAC_PI_2).abs() < TOLERANCE);
    }

    #[test]
    fn test_turn_right_then_left_is_identity() {
        let start = OverlayGeometry {
            transform: Affine::rotate(0.4) * Affine::scale(1.5),
            center: Point::new(0.12, 0.83),
            crop_rect: UNIT_RECT,
        };
        let mut geometry = start;
        geometry.rotate(Turn::Right);
        geometry.rotate(Turn::Left);

        assert_point_eq(geometry.center, start.center);
        assert_affine_eq(geometry.transform, start.transform);
    }

    #[test]
    fn test_four_turns_round_trip() {
        let start = OverlayGeometry::at(Point::new(0.2, 0.9));
        let mut geometry = start;
        for _ in 0..4 {
            geometry.rotate(Turn::Right);
        }
        assert_point_eq(geometry.center, start.center);
        assert_affine_eq(geometry.transform, start.transform);
    }

    #[test]
    fn test_canvas_center_is_fixed_point() {
        assert_point_eq(Turn::Right.rotate_point(CANVAS_CENTER), CANVAS_CENTER);
        assert_point_eq(Turn::Left.rotate_point(CANVAS_CENTER), CANVAS_CENTER);
    }

    #[test]
    fn test_flip_horizontal_negates_angle() {
        let mut geometry = OverlayGeometry {
            transform: Affine::rotate(0.5),
            center: Point::new(0.25, 0.4),
            crop_rect: UNIT_RECT,
        };
        geometry.flip(FlipAxis::Horizontal);

        assert_point_eq(geometry.center, Point::new(0.75, 0.4));
        assert!((geometry.angle() + 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn test_flip_vertical_reflects_about_quarter_turn() {
        let mut geometry = OverlayGeometry {
            transform: Affine::rotate(0.5),
            center: Point::new(0.25, 0.4),
            crop_rect: UNIT_RECT,
        };
        geometry.flip(FlipAxis::Vertical);

        assert_point_eq(geometry.center, Point::new(0.25, 0.6));
        assert!((geometry.angle() - (PI - 0.5)).abs() < TOLERANCE);
    }

    #[test]
    fn test_flip_identity_transform_horizontal() {
        let mut geometry = OverlayGeometry::default();
        geometry.flip(FlipAxis::Horizontal);
        // angle 0 reflected about π lands on 2π
        assert_affine_eq(geometry.transform, Affine::IDENTITY);
    }

    #[test]
    fn test_flip_preserves_scale() {
        let mut geometry = OverlayGeometry {
            transform: Affine::rotate(1.0) * Affine::scale(2.0),
            ..OverlayGeometry::default()
        };
        geometry.flip(FlipAxis::Vertical);
        assert!((geometry.transform.determinant() - 4.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < TOLERANCE);
        assert!((normalize_angle(5.0 * PI) - PI).abs() < TOLERANCE);
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(-1e-18), 0.0);
        assert!(normalize_angle(TAU) < TOLERANCE);
    }

    #[test]
    fn test_rotation_angle_ignores_uniform_scale() {
        let transform = Affine::scale(3.0) * Affine::rotate(0.7);
        assert!((rotation_angle(&transform) - 0.7).abs() < TOLERANCE);
    }

    #[test]
    fn test_rotate_rect_right() {
        let rect = Rect::new(0.1, 0.2, 0.5, 0.4);
        let turned = Turn::Right.rotate_rect(rect);
        // (x, y) -> (1 - y, x)
        assert!((turned.x0 - 0.6).abs() < TOLERANCE);
        assert!((turned.y0 - 0.1).abs() < TOLERANCE);
        assert!((turned.x1 - 0.8).abs() < TOLERANCE);
        assert!((turned.y1 - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn test_rotate_rect_round_trip() {
        let rect = Rect::new(0.1, 0.2, 0.5, 0.4);
        let back = Turn::Left.rotate_rect(Turn::Right.rotate_rect(rect));
        assert!((back.x0 - rect.x0).abs() < TOLERANCE);
        assert!((back.y0 - rect.y0).abs() < TOLERANCE);
        assert!((back.x1 - rect.x1).abs() < TOLERANCE);
        assert!((back.y1 - rect.y1).abs() < TOLERANCE);
    }

    #[test]
    fn test_flip_rect() {
        let rect = Rect::new(0.1, 0.2, 0.5, 0.4);
        let h = FlipAxis::Horizontal.flip_rect(rect);
        assert!((h.x0 - 0.5).abs() < TOLERANCE);
        assert!((h.x1 - 0.9).abs() < TOLERANCE);
        let v = FlipAxis::Vertical.flip_rect(rect);
        assert!((v.y0 - 0.6).abs() < TOLERANCE);
        assert!((v.y1 - 0.8).abs() < TOLERANCE);
    }

    #[test]
    fn test_center_in_crop() {
        let geometry = OverlayGeometry {
            center: Point::new(0.5, 0.5),
            crop_rect: Rect::new(0.25, 0.0, 0.75, 0.5),
            ..OverlayGeometry::default()
        };
        assert_point_eq(geometry.center_in_crop().unwrap(), Point::new(0.5, 1.0));

        let degenerate = OverlayGeometry {
            crop_rect: Rect::new(0.3, 0.3, 0.3, 0.9),
            ..OverlayGeometry::default()
        };
        assert!(degenerate.center_in_crop().is_none());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
