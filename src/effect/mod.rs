//! Layered effects drawn over the solid base color during the ramp
//!
//! Every layer is gated by ramp progress, never by wall time alone, so a
//! frame is reproducible from its progress value. Time only drives the
//! phase of the oscillating layers.

mod breathing;
mod sparkle;
mod warmth;
mod wave;

use embassy_time::Instant;

pub use breathing::Breathing;
pub use sparkle::Sparkle;
pub use warmth::WarmthGradient;
pub use wave::Wave;

use crate::color::Rgb;

/// Inputs shared by all layers for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerContext {
    /// Ramp progress in `[0, 1]`
    pub progress: f32,
    /// Monotonic time driving oscillations
    pub now: Instant,
    /// Color the strip was filled with before layering
    pub base: Rgb,
}

pub trait Effect {
    /// Whether the layer contributes to a frame at this progress
    fn is_active(&self, ctx: &LayerContext) -> bool;

    /// Draw the layer over the frame
    fn apply(&mut self, ctx: &LayerContext, leds: &mut [Rgb]);
}

/// Sine of `now * rate + offset`, with time in milliseconds
///
/// The phase is computed in `f64` so it stays smooth after days of uptime.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub(crate) fn oscillate(now: Instant, rate_per_ms: f64, offset: f64) -> f32 {
    libm::sin(now.as_millis() as f64 * rate_per_ms + offset) as f32
}

/// Pixel layers in drawing order
#[derive(Debug, Clone)]
pub struct EffectStack {
    pub sparkle: Sparkle,
    pub warmth: WarmthGradient,
    /// Only drawn for presets that ask for it
    pub wave: Option<Wave>,
}

impl EffectStack {
    pub const fn new(seed: u64) -> Self {
        Self {
            sparkle: Sparkle::new(seed),
            warmth: WarmthGradient::new(),
            wave: None,
        }
    }

    /// Enable or disable the wave layer
    pub fn set_wave(&mut self, enabled: bool) {
        self.wave = enabled.then(Wave::new);
    }

    /// Draw every active layer
    pub fn apply(&mut self, ctx: &LayerContext, leds: &mut [Rgb]) {
        if self.sparkle.is_active(ctx) {
            self.sparkle.apply(ctx, leds);
        }
        if self.warmth.is_active(ctx) {
            self.warmth.apply(ctx, leds);
        }
        if let Some(wave) = &mut self.wave {
            if wave.is_active(ctx) {
                wave.apply(ctx, leds);
            }
        }
    }
}
