//! Per-channel tone curves backing the stylistic effects.
//!
//! Curves are interpolated with monotonic cubic Hermite splines
//! (Fritsch-Carlson), so a curve whose control points rise never dips
//! between them. Each curve is baked into a 256-entry lookup table.

use serde::{Deserialize, Serialize};

/// Tone curve control point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Input value (0.0 to 1.0)
    pub x: f32,
    /// Output value (0.0 to 1.0)
    pub y: f32,
}

/// Tone curve through control points sorted by x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneCurve {
    pub points: Vec<CurvePoint>,
}

impl Default for ToneCurve {
    fn default() -> Self {
        Self::from_pairs(&[(0.0, 0.0), (1.0, 1.0)])
    }
}

impl ToneCurve {
    /// Build a curve from `(x, y)` pairs sorted by x.
    pub fn from_pairs(pairs: &[(f32, f32)]) -> Self {
        Self {
            points: pairs.iter().map(|&(x, y)| CurvePoint { x, y }).collect(),
        }
    }

    /// Whether the curve is the straight diagonal.
    pub fn is_linear(&self) -> bool {
        match self.points.as_slice() {
            [first, last] => {
                first.x.abs() < f32::EPSILON
                    && first.y.abs() < f32::EPSILON
                    && (last.x - 1.0).abs() < f32::EPSILON
                    && (last.y - 1.0).abs() < f32::EPSILON
            }
            _ => false,
        }
    }

    /// Evaluate the curve at `x`.
    pub fn evaluate(&self, x: f32) -> f32 {
        let tangents = self.tangents();
        self.evaluate_with(&tangents, x)
    }

    /// Bake the curve into a lookup table.
    pub fn to_lut(&self) -> [u8; 256] {
        if self.is_linear() {
            return identity_lut();
        }
        let tangents = self.tangents();
        let mut lut = [0u8; 256];
        for (i, entry) in lut.iter_mut().enumerate() {
            let y = self.evaluate_with(&tangents, i as f32 / 255.0);
            *entry = (y * 255.0).clamp(0.0, 255.0).round() as u8;
        }
        lut
    }

    /// Fritsch-Carlson tangents, one per control point.
    fn tangents(&self) -> Vec<f32> {
        let points = &self.points;
        let n = points.len();
        if n < 2 {
            return vec![0.0; n];
        }

        let secants: Vec<f32> = points
            .windows(2)
            .map(|w| {
                let h = w[1].x - w[0].x;
                if h.abs() < f32::EPSILON {
                    0.0
                } else {
                    (w[1].y - w[0].y) / h
                }
            })
            .collect();

        let mut m = vec![0.0f32; n];
        m[0] = secants[0];
        m[n - 1] = secants[n - 2];
        for i in 1..n - 1 {
            let (d0, d1) = (secants[i - 1], secants[i]);
            if d0.signum() == d1.signum() && d0.abs() > f32::EPSILON && d1.abs() > f32::EPSILON {
                let h0 = points[i].x - points[i - 1].x;
                let h1 = points[i + 1].x - points[i].x;
                let w1 = 2.0 * h1 + h0;
                let w2 = h1 + 2.0 * h0;
                m[i] = (w1 + w2) / (w1 / d0 + w2 / d1);
            }
        }

        // Clamp tangents so each segment stays monotonic
        for (i, &d) in secants.iter().enumerate() {
            if d.abs() < f32::EPSILON {
                m[i] = 0.0;
                m[i + 1] = 0.0;
                continue;
            }
            let limit = 3.0 * d.abs();
            m[i] = m[i].clamp(-limit, limit);
            m[i + 1] = m[i + 1].clamp(-limit, limit);
        }

        m
    }

    fn evaluate_with(&self, tangents: &[f32], x: f32) -> f32 {
        let points = &self.points;
        let n = points.len();
        match n {
            0 => return x,
            1 => return points[0].y,
            _ => {}
        }

        let x = x.clamp(points[0].x, points[n - 1].x);
        let i = points[1..n - 1]
            .iter()
            .take_while(|p| p.x <= x)
            .count();

        let (p0, p1) = (points[i], points[i + 1]);
        let h = p1.x - p0.x;
        if h.abs() < f32::EPSILON {
            return p0.y;
        }

        let t = (x - p0.x) / h;
        let t2 = t * t;
        let t3 = t2 * t;
        let y = (2.0 * t3 - 3.0 * t2 + 1.0) * p0.y
            + (t3 - 2.0 * t2 + t) * h * tangents[i]
            + (-2.0 * t3 + 3.0 * t2) * p1.y
            + (t3 - t2) * h * tangents[i + 1];

        y.clamp(0.0, 1.0)
    }
}

fn identity_lut() -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = i as u8;
    }
    lut
}

/// Lookup tables for the red, green, and blue channels.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelLut {
    pub red: [u8; 256],
    pub green: [u8; 256],
    pub blue: [u8; 256],
}

impl Default for ChannelLut {
    fn default() -> Self {
        Self::identity()
    }
}

impl ChannelLut {
    /// Tables that leave every channel unchanged.
    pub fn identity() -> Self {
        let lut = identity_lut();
        Self {
            red: lut,
            green: lut,
            blue: lut,
        }
    }

    /// Bake one curve per channel.
    pub fn from_curves(red: &ToneCurve, green: &ToneCurve, blue: &ToneCurve) -> Self {
        Self {
            red: red.to_lut(),
            green: green.to_lut(),
            blue: blue.to_lut(),
        }
    }

    /// Bake the same curve into all channels.
    pub fn uniform(curve: &ToneCurve) -> Self {
        let lut = curve.to_lut();
        Self {
            red: lut,
            green: lut,
            blue: lut,
        }
    }

    pub fn is_identity(&self) -> bool {
        let identity = identity_lut();
        self.red == identity && self.green == identity && self.blue == identity
    }

    /// Map a single RGB pixel.
    #[inline]
    pub fn map(&self, rgb: [u8; 3]) -> [u8; 3] {
        [
            self.red[rgb[0] as usize],
            self.green[rgb[1] as usize],
            self.blue[rgb[2] as usize],
        ]
    }
}
