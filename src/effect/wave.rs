//! Rolling swell for water-themed presets

use super::{Effect, LayerContext, oscillate};
use crate::{color::Rgb, math8::saturate8};

/// Two superposed waves: (pixel frequency, time rate per ms, amplitude)
const WAVES: [(f64, f64, f32); 2] = [(0.1, 0.003, 0.2), (0.05, 0.002, 0.1)];

/// Modulates blue (fully) and green (half as much) along the strip
///
/// Amplitude grows with ramp progress, so the sea is calm at first light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wave;

impl Wave {
    pub const fn new() -> Self {
        Self
    }
}

impl Effect for Wave {
    fn is_active(&self, ctx: &LayerContext) -> bool {
        ctx.progress > 0.0
    }

    #[allow(clippy::cast_precision_loss)]
    fn apply(&mut self, ctx: &LayerContext, leds: &mut [Rgb]) {
        for (i, led) in leds.iter_mut().enumerate() {
            let swell: f32 = WAVES
                .iter()
                .map(|&(spatial, rate, amplitude)| {
                    oscillate(ctx.now, rate, i as f64 * spatial) * amplitude
                })
                .sum();
            let swell = swell * ctx.progress;

            led.b = saturate8(f32::from(led.b) * (1.0 + swell));
            led.g = saturate8(f32::from(led.g) * (1.0 + swell * 0.5));
        }
    }
}
