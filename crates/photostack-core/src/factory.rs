//! Construction of default-configured stages.

use crate::filter::Filter;
use crate::stages::{
    ColorAdjustmentFilter, EffectFilter, EffectType, EnhancementFilter, OrientationCropFilter,
    TiltShiftFilter,
};

/// Builds the fixed stages of a [`FixedFilterStack`](crate::FixedFilterStack).
pub trait FilterFactory {
    fn enhancement_filter(&self) -> EnhancementFilter;
    fn orientation_crop_filter(&self) -> OrientationCropFilter;
    fn effect_filter(&self, effect: EffectType) -> EffectFilter;
    fn color_adjustment_filter(&self) -> ColorAdjustmentFilter;
    fn tilt_shift_filter(&self) -> TiltShiftFilter;
}

/// The stock factory.
///
/// Enhancement starts disabled; every other stage starts enabled at its
/// neutral settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstanceFactory;

impl FilterFactory for InstanceFactory {
    fn enhancement_filter(&self) -> EnhancementFilter {
        let mut filter = EnhancementFilter::new();
        filter.set_enabled(false);
        filter
    }

    fn orientation_crop_filter(&self) -> OrientationCropFilter {
        OrientationCropFilter::new()
    }

    fn effect_filter(&self, effect: EffectType) -> EffectFilter {
        EffectFilter::new(effect)
    }

    fn color_adjustment_filter(&self) -> ColorAdjustmentFilter {
        ColorAdjustmentFilter::new()
    }

    fn tilt_shift_filter(&self) -> TiltShiftFilter {
        TiltShiftFilter::new()
    }
}
