//! Stylistic effects built from per-channel tone curves.
//!
//! Each effect is a set of red, green, and blue curves followed by a
//! saturation scale. The result is blended with the input by `intensity`.

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::curve::{ChannelLut, ToneCurve};
use crate::error::FilterError;
use crate::filter::{Filter, FilterKind};

/// Available stylistic effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EffectType {
    /// No effect.
    #[default]
    None,
    /// Lifted blacks, soft highlights, slightly warm.
    Mellow,
    /// Gentle S-curve with a touch more color.
    K1,
    /// Punchy contrast with cooled highlights.
    Fixie,
    /// High-contrast black and white.
    Lenin,
    /// Cool, faded tones.
    Blues,
}

impl EffectType {
    pub const ALL: [EffectType; 6] = [
        EffectType::None,
        EffectType::Mellow,
        EffectType::K1,
        EffectType::Fixie,
        EffectType::Lenin,
        EffectType::Blues,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            EffectType::None => "None",
            EffectType::Mellow => "Mellow",
            EffectType::K1 => "K1",
            EffectType::Fixie => "Fixie",
            EffectType::Lenin => "Lenin",
            EffectType::Blues => "Blues",
        }
    }

    /// Red, green, and blue curve control points plus saturation scale.
    fn recipe(self) -> Recipe {
        const LINEAR: &[(f32, f32)] = &[(0.0, 0.0), (1.0, 1.0)];
        match self {
            EffectType::None => Recipe {
                red: LINEAR,
                green: LINEAR,
                blue: LINEAR,
                saturation: 1.0,
            },
            EffectType::Mellow => Recipe {
                red: &[(0.0, 0.1), (0.5, 0.55), (1.0, 0.95)],
                green: &[(0.0, 0.08), (0.5, 0.5), (1.0, 0.92)],
                blue: &[(0.0, 0.1), (0.5, 0.45), (1.0, 0.85)],
                saturation: 0.9,
            },
            EffectType::K1 => Recipe {
                red: &[(0.0, 0.0), (0.25, 0.2), (0.75, 0.82), (1.0, 1.0)],
                green: &[(0.0, 0.0), (0.25, 0.2), (0.75, 0.8), (1.0, 1.0)],
                blue: &[(0.0, 0.0), (0.25, 0.22), (0.75, 0.78), (1.0, 1.0)],
                saturation: 1.1,
            },
            EffectType::Fixie => Recipe {
                red: &[(0.0, 0.0), (0.3, 0.22), (0.7, 0.82), (1.0, 1.0)],
                green: &[(0.0, 0.0), (0.3, 0.22), (0.7, 0.8), (1.0, 1.0)],
                blue: &[(0.0, 0.05), (0.5, 0.5), (1.0, 0.9)],
                saturation: 1.2,
            },
            EffectType::Lenin => Recipe {
                red: &[(0.0, 0.05), (0.4, 0.35), (0.8, 0.85), (1.0, 1.0)],
                green: &[(0.0, 0.05), (0.4, 0.35), (0.8, 0.85), (1.0, 1.0)],
                blue: &[(0.0, 0.05), (0.4, 0.35), (0.8, 0.85), (1.0, 1.0)],
                saturation: 0.0,
            },
            EffectType::Blues => Recipe {
                red: &[(0.0, 0.0), (0.5, 0.45), (1.0, 0.95)],
                green: &[(0.0, 0.02), (0.5, 0.5), (1.0, 0.97)],
                blue: &[(0.0, 0.1), (0.5, 0.6), (1.0, 1.0)],
                saturation: 0.85,
            },
        }
    }
}

struct Recipe {
    red: &'static [(f32, f32)],
    green: &'static [(f32, f32)],
    blue: &'static [(f32, f32)],
    saturation: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EffectFilter {
    enabled: bool,
    effect: EffectType,
    /// Blend between the input (0.0) and the full effect (1.0).
    pub intensity: f32,
    lut: ChannelLut,
    saturation: f32,
}

impl Default for EffectFilter {
    fn default() -> Self {
        Self::new(EffectType::None)
    }
}

impl EffectFilter {
    pub fn new(effect: EffectType) -> Self {
        let mut filter = Self {
            enabled: true,
            effect,
            intensity: 1.0,
            lut: ChannelLut::identity(),
            saturation: 1.0,
        };
        filter.set_effect(effect);
        filter
    }

    pub fn effect(&self) -> EffectType {
        self.effect
    }

    /// Switch to another effect, rebuilding the lookup tables.
    pub fn set_effect(&mut self, effect: EffectType) {
        let recipe = effect.recipe();
        self.effect = effect;
        self.lut = ChannelLut::from_curves(
            &ToneCurve::from_pairs(recipe.red),
            &ToneCurve::from_pairs(recipe.green),
            &ToneCurve::from_pairs(recipe.blue),
        );
        self.saturation = recipe.saturation;
    }

    /// Whether applying the filter leaves pixels unchanged.
    pub fn is_identity(&self) -> bool {
        self.intensity <= 0.0 || (self.lut.is_identity() && self.saturation == 1.0)
    }
}

impl Filter for EffectFilter {
    fn name(&self) -> &str {
        self.effect.display_name()
    }

    fn kind(&self) -> FilterKind {
        FilterKind::Effect
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn apply(&self, image: &PixelBuffer) -> Result<PixelBuffer, FilterError> {
        image.validate()?;
        let mut output = image.clone();
        if self.is_identity() {
            return Ok(output);
        }

        let amount = self.intensity.clamp(0.0, 1.0);
        for chunk in output.pixels.chunks_exact_mut(3) {
            let original = [chunk[0], chunk[1], chunk[2]];
            let mapped = self.lut.map(original);
            let [r, g, b] = mapped.map(|v| v as f32 / 255.0);
            let gray = 0.2126 * r + 0.7152 * g + 0.0722 * b;
            let styled = [r, g, b].map(|v| gray + (v - gray) * self.saturation);

            for c in 0..3 {
                let before = original[c] as f32 / 255.0;
                let after = styled[c].clamp(0.0, 1.0);
                chunk[c] = ((before + (after - before) * amount) * 255.0).round() as u8;
            }
        }
        Ok(output)
    }

    fn clone_box(&self) -> Box<dyn Filter> {
        Box::new(self.clone())
    }
}
