//! Per-channel histograms used by automatic enhancement.

use crate::buffer::PixelBuffer;

/// Red, green, and blue histograms of an image.
#[derive(Debug, Clone)]
pub struct Histogram {
    /// Bins per channel in RGB order (256 bins each).
    pub channels: [[u32; 256]; 3],
    /// Number of pixels counted.
    pub total: u64,
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            channels: [[0; 256]; 3],
            total: 0,
        }
    }
}

impl Histogram {
    /// Count every pixel of an RGB buffer in a single pass.
    pub fn compute(image: &PixelBuffer) -> Self {
        let mut hist = Self::default();
        for chunk in image.pixels.chunks_exact(3) {
            hist.channels[0][chunk[0] as usize] += 1;
            hist.channels[1][chunk[1] as usize] += 1;
            hist.channels[2][chunk[2] as usize] += 1;
            hist.total += 1;
        }
        hist
    }

    /// Smallest value at or below which `fraction` of the channel's pixels fall.
    ///
    /// Returns 0 for an empty histogram.
    pub fn percentile(&self, channel: usize, fraction: f64) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let target = (self.total as f64 * fraction.clamp(0.0, 1.0)).ceil().max(1.0) as u64;
        let mut seen = 0u64;
        for (value, &count) in self.channels[channel].iter().enumerate() {
            seen += count as u64;
            if seen >= target {
                return value as u8;
            }
        }
        255
    }

    /// Low and high levels per channel, ignoring `clip` of the pixels at
    /// each end.
    pub fn levels(&self, clip: f64) -> [(u8, u8); 3] {
        let mut levels = [(0u8, 255u8); 3];
        for (channel, level) in levels.iter_mut().enumerate() {
            *level = (
                self.percentile(channel, clip),
                self.percentile(channel, 1.0 - clip),
            );
        }
        levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_histogram() {
        let image = PixelBuffer {
            width: 0,
            height: 0,
            pixels: vec![],
        };
        let hist = Histogram::compute(&image);
        assert_eq!(hist.total, 0);
        assert_eq!(hist.percentile(0, 0.5), 0);
    }

    #[test]
    fn test_channel_counts() {
        let image = PixelBuffer::new(2, 1, vec![255, 0, 0, 0, 255, 0]);
        let hist = Histogram::compute(&image);
        assert_eq!(hist.total, 2);
        assert_eq!(hist.channels[0][255], 1);
        assert_eq!(hist.channels[0][0], 1);
        assert_eq!(hist.channels[1][255], 1);
        assert_eq!(hist.channels[2][0], 2);
    }

    #[test]
    fn test_percentile_of_ramp() {
        let pixels: Vec<u8> = (0..=255u8).flat_map(|v| [v, v, v]).collect();
        let image = PixelBuffer::new(256, 1, pixels);
        let hist = Histogram::compute(&image);

        assert_eq!(hist.percentile(0, 0.0), 0);
        assert_eq!(hist.percentile(0, 1.0), 255);
        assert_eq!(hist.percentile(1, 0.5), 127);
    }

    #[test]
    fn test_levels_of_narrow_range() {
        let pixels: Vec<u8> = (100..=150u8).flat_map(|v| [v, v / 2, 200]).collect();
        let image = PixelBuffer::new(51, 1, pixels);
        let levels = Histogram::compute(&image).levels(0.0);

        assert_eq!(levels[0], (100, 150));
        assert_eq!(levels[1], (50, 75));
        assert_eq!(levels[2], (200, 200));
    }
}
