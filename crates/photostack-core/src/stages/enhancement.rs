//! Automatic enhancement by per-channel level stretching.
//!
//! Each channel's darkest and brightest values (ignoring a small clipped
//! fraction at both ends) are stretched to span the full 0-255 range.

use crate::buffer::PixelBuffer;
use crate::error::FilterError;
use crate::filter::{Filter, FilterKind};
use crate::histogram::Histogram;

/// Fraction of pixels ignored at each end of a channel.
pub const DEFAULT_CLIP: f64 = 0.005;

/// Channels whose range is narrower than this are left alone.
const MIN_RANGE: u8 = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct EnhancementFilter {
    enabled: bool,
    /// Fraction of pixels clipped at each end of every channel.
    pub clip: f64,
}

impl Default for EnhancementFilter {
    fn default() -> Self {
        Self {
            enabled: true,
            clip: DEFAULT_CLIP,
        }
    }
}

impl EnhancementFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the per-channel stretch tables for an image.
    fn stretch_tables(&self, image: &PixelBuffer) -> [[u8; 256]; 3] {
        let levels = Histogram::compute(image).levels(self.clip);
        let mut tables = [[0u8; 256]; 3];
        for (table, &(low, high)) in tables.iter_mut().zip(levels.iter()) {
            let range = high.saturating_sub(low);
            for (value, entry) in table.iter_mut().enumerate() {
                *entry = if range < MIN_RANGE {
                    value as u8
                } else {
                    let t = (value as f32 - low as f32) / range as f32;
                    (t * 255.0).clamp(0.0, 255.0).round() as u8
                };
            }
        }
        tables
    }
}

impl Filter for EnhancementFilter {
    fn name(&self) -> &str {
        "Enhancement"
    }

    fn kind(&self) -> FilterKind {
        FilterKind::Enhancement
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn apply(&self, image: &PixelBuffer) -> Result<PixelBuffer, FilterError> {
        image.validate()?;
        let tables = self.stretch_tables(image);
        let mut output = image.clone();
        for chunk in output.pixels.chunks_exact_mut(3) {
            chunk[0] = tables[0][chunk[0] as usize];
            chunk[1] = tables[1][chunk[1] as usize];
            chunk[2] = tables[2][chunk[2] as usize];
        }
        Ok(output)
    }

    fn clone_box(&self) -> Box<dyn Filter> {
        Box::new(self.clone())
    }
}
