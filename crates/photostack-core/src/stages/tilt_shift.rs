//! Tilt-shift: keep a band or disc sharp and blur the rest of the frame.

use image::imageops;
use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::error::FilterError;
use crate::filter::{Filter, FilterKind};
use crate::mask::{FocusBand, FocusCircle};

/// Shape of the sharp region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TiltShiftType {
    /// No blur at all.
    #[default]
    Off,
    /// Sharp band along the line through both control points.
    Box,
    /// Sharp disc spanning both control points.
    Circle,
}

/// Tilt-shift parameters. Positions are normalized to 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TiltShiftSettings {
    pub kind: TiltShiftType,
    pub control_point1: Point,
    pub control_point2: Point,
    /// Size of the sharp region as a fraction of the longer image side.
    pub radius: f64,
    /// Gaussian blur sigma as a fraction of the longer image side.
    pub blur: f64,
}

impl Default for TiltShiftSettings {
    fn default() -> Self {
        Self {
            kind: TiltShiftType::Off,
            control_point1: Point::new(0.25, 0.5),
            control_point2: Point::new(0.75, 0.5),
            radius: 0.1,
            blur: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TiltShiftFilter {
    enabled: bool,
    pub settings: TiltShiftSettings,
}

impl Default for TiltShiftFilter {
    fn default() -> Self {
        Self::with_settings(TiltShiftSettings::default())
    }
}

impl TiltShiftFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: TiltShiftSettings) -> Self {
        Self {
            enabled: true,
            settings,
        }
    }

    /// Focus region in pixel space for an image of the given size.
    fn focus_region(&self, width: u32, height: u32) -> FocusRegion {
        let (w, h) = (width as f64, height as f64);
        let to_px = |p: Point| Point::new(p.x * w, p.y * h);
        let p1 = to_px(self.settings.control_point1);
        let p2 = to_px(self.settings.control_point2);
        let radius = self.settings.radius.max(0.0) * w.max(h);

        match self.settings.kind {
            TiltShiftType::Off => FocusRegion::Sharp,
            TiltShiftType::Box => FocusRegion::Band(FocusBand::new(p1, p2, radius, radius)),
            TiltShiftType::Circle => FocusRegion::Circle(FocusCircle::through(p1, p2, radius)),
        }
    }
}

enum FocusRegion {
    Sharp,
    Band(FocusBand),
    Circle(FocusCircle),
}

impl FocusRegion {
    fn blur_weight(&self, point: Point) -> f64 {
        match self {
            FocusRegion::Sharp => 0.0,
            FocusRegion::Band(band) => band.evaluate(point),
            FocusRegion::Circle(circle) => circle.evaluate(point),
        }
    }
}

impl Filter for TiltShiftFilter {
    fn name(&self) -> &str {
        "Tilt Shift"
    }

    fn kind(&self) -> FilterKind {
        FilterKind::TiltShift
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn apply(&self, image: &PixelBuffer) -> Result<PixelBuffer, FilterError> {
        image.validate()?;
        if self.settings.kind == TiltShiftType::Off || self.settings.blur <= 0.0 {
            return Ok(image.clone());
        }

        let sigma = (self.settings.blur * image.width.max(image.height) as f64) as f32;
        let blurred = imageops::blur(&image.clone().into_rgb_image()?, sigma.max(0.1));
        let blurred = blurred.as_raw();
        let region = self.focus_region(image.width, image.height);

        let mut output = image.clone();
        for (idx, chunk) in output.pixels.chunks_exact_mut(3).enumerate() {
            let x = (idx as u32 % image.width) as f64 + 0.5;
            let y = (idx as u32 / image.width) as f64 + 0.5;
            let w = region.blur_weight(Point::new(x, y));
            if w <= 0.0 {
                continue;
            }
            let base = idx * 3;
            for c in 0..3 {
                let sharp = chunk[c] as f64;
                let soft = blurred[base + c] as f64;
                chunk[c] = (sharp * (1.0 - w) + soft * w).round().clamp(0.0, 255.0) as u8;
            }
        }
        Ok(output)
    }

    fn clone_box(&self) -> Box<dyn Filter> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Vertical stripes, one pixel wide, so any blur changes pixel values.
    fn striped(width: u32, height: u32) -> PixelBuffer {
        let pixels = (0..height)
            .flat_map(|_| (0..width).map(|x| if x % 2 == 0 { 0u8 } else { 255u8 }))
            .flat_map(|v| [v, v, v])
            .collect();
        PixelBuffer::new(width, height, pixels)
    }

    #[test]
    fn test_off_is_identity() {
        let image = striped(16, 16);
        let result = TiltShiftFilter::new().apply(&image).unwrap();
        assert_eq!(result, image);
    }

    #[test]
    fn test_box_keeps_band_sharp() {
        let image = striped(40, 40);
        let filter = TiltShiftFilter::with_settings(TiltShiftSettings {
            kind: TiltShiftType::Box,
            control_point1: Point::new(0.0, 0.5),
            control_point2: Point::new(1.0, 0.5),
            radius: 0.1,
            blur: 0.05,
        });

        let result = filter.apply(&image).unwrap();
        // Row 20 sits on the focus line
        for x in 0..40 {
            assert_eq!(result.pixel(x, 20), image.pixel(x, 20));
        }
        // Row 0 is far outside the band
        let changed = (0..40).filter(|&x| result.pixel(x, 0) != image.pixel(x, 0)).count();
        assert!(changed > 30, "only {} pixels blurred", changed);
    }

    #[test]
    fn test_circle_keeps_center_sharp() {
        let image = striped(40, 40);
        let filter = TiltShiftFilter::with_settings(TiltShiftSettings {
            kind: TiltShiftType::Circle,
            control_point1: Point::new(0.3, 0.5),
            control_point2: Point::new(0.7, 0.5),
            radius: 0.05,
            blur: 0.05,
        });

        let result = filter.apply(&image).unwrap();
        assert_eq!(result.pixel(20, 20), image.pixel(20, 20));
        assert_ne!(result.pixel(1, 1), image.pixel(1, 1));
    }

    #[test]
    fn test_settings_roundtrip_through_clone() {
        let mut filter = TiltShiftFilter::new();
        let copy = filter.clone();
        filter.settings.kind = TiltShiftType::Circle;
        assert_eq!(copy.settings.kind, TiltShiftType::Off);
    }
}
