//! Radial warmth over the second half of the ramp

use super::{Effect, LayerContext};
use crate::{color::Rgb, math8::saturate8};

const START: f32 = 0.5;

/// How far the edges fall behind the center at full strength
const FALLOFF: f32 = 0.3;

/// Reshapes red and green outward from the middle of the strip
///
/// The center is lifted and the edges are cooled; the spread grows with
/// `(progress - 0.5) * 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WarmthGradient;

impl WarmthGradient {
    pub const fn new() -> Self {
        Self
    }
}

impl Effect for WarmthGradient {
    fn is_active(&self, ctx: &LayerContext) -> bool {
        ctx.progress > START
    }

    #[allow(clippy::cast_precision_loss)]
    fn apply(&mut self, ctx: &LayerContext, leds: &mut [Rgb]) {
        let center = leds.len() / 2;
        let half = (leds.len() / 2).max(1) as f32;
        let strength = (ctx.progress - START) * 2.0;

        for (i, led) in leds.iter_mut().enumerate() {
            let distance = i.abs_diff(center) as f32 / half;
            let warmth = 1.0 - distance * strength * FALLOFF;
            led.r = saturate8(f32::from(led.r) * (0.8 + warmth * 0.4));
            led.g = saturate8(f32::from(led.g) * (0.9 + warmth * 0.2));
        }
    }
}
