use embassy_time::{Duration, Instant};

use crate::color::{BLACK, Rgb, fill_solid};
use crate::effect::{Breathing, EffectStack, LayerContext};
use crate::math8::{ease_in_out, saturate8};
use crate::preset::{ColorPreset, OCEAN};

/// Default seed for the sparkle generator
pub const DEFAULT_SEED: u64 = 0x5eed_da57;

/// Everything needed to play one wake-up sequence
///
/// Built once per triggered alarm and fixed for the sequence's lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    pub preset: &'static ColorPreset,
    /// Length of the ramp phase
    pub total_duration: Duration,
    pub peak_brightness: u8,
}

/// One rendered ramp frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<'a> {
    /// Per-pixel colors, one per LED in the strip
    pub pixels: &'a [Rgb],
    /// Global brightness scalar for the strip
    pub brightness: u8,
    /// Stage blend the pixels were filled with before layering; exactly the
    /// first or last stage color at the ends of the ramp
    pub base: Rgb,
    /// Ramp progress this frame was rendered at
    pub progress: f32,
}

/// Ramp progress as a fraction of `total`, clamped to `[0, 1]`
///
/// A zero-length ramp counts as finished.
#[allow(clippy::cast_precision_loss)]
pub fn progress(elapsed: Duration, total: Duration) -> f32 {
    let total = total.as_millis();
    if total == 0 {
        return 1.0;
    }
    (elapsed.as_millis() as f32 / total as f32).clamp(0.0, 1.0)
}

/// Strip brightness at a point of the ramp
///
/// Eases `progress` toward `peak`, then applies the breathing multiplier.
pub fn ramp_brightness(progress: f32, peak: u8, now: Instant) -> u8 {
    let eased = ease_in_out(progress);
    saturate8(eased * f32::from(peak) * Breathing::multiplier(progress, now))
}

/// Sunrise renderer
///
/// Owns the frame buffer for up to `MAX_LEDS` pixels and turns
/// `(preset, elapsed, duration, brightness)` into full-strip frames.
/// It knows nothing about alarms or calendars.
pub struct Renderer<const MAX_LEDS: usize> {
    frame_buffer: [Rgb; MAX_LEDS],
    led_count: usize,
    layers: EffectStack,
}

impl<const MAX_LEDS: usize> Renderer<MAX_LEDS> {
    /// Renderer for a strip of `led_count` pixels, capped at `MAX_LEDS`
    pub fn new(led_count: usize) -> Self {
        Self::with_seed(led_count, DEFAULT_SEED)
    }

    /// Renderer with an explicit sparkle seed
    pub fn with_seed(led_count: usize, seed: u64) -> Self {
        Self {
            frame_buffer: [BLACK; MAX_LEDS],
            led_count: led_count.min(MAX_LEDS),
            layers: EffectStack::new(seed),
        }
    }

    pub const fn led_count(&self) -> usize {
        self.led_count
    }

    /// Pixels currently held by the active part of the buffer
    pub fn pixels(&self) -> &[Rgb] {
        &self.frame_buffer[..self.led_count]
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.frame_buffer[..self.led_count]
    }

    /// Render one ramp frame
    ///
    /// The strip is filled with the preset's color at the current progress,
    /// then sparkle, warmth and (for the ocean preset) wave layers are drawn
    /// over it. `now` only drives the phase of the breathing and wave
    /// oscillations.
    ///
    /// Layers still apply at the ends of the ramp: at `elapsed >= total_duration`
    /// warmth reshapes the pixels. The unmodified stage color of the frame is
    /// [`Frame::base`], not any entry of [`Frame::pixels`].
    pub fn render_frame(
        &mut self,
        preset: &ColorPreset,
        elapsed: Duration,
        total_duration: Duration,
        peak_brightness: u8,
        now: Instant,
    ) -> Frame<'_> {
        let progress = progress(elapsed, total_duration);
        let base = preset.color_at(progress);
        let brightness = ramp_brightness(progress, peak_brightness, now);

        let ctx = LayerContext {
            progress,
            now,
            base,
        };
        self.layers.set_wave(preset.name() == OCEAN);

        let leds = &mut self.frame_buffer[..self.led_count];
        fill_solid(leds, base);
        self.layers.apply(&ctx, leds);

        Frame {
            pixels: &self.frame_buffer[..self.led_count],
            brightness,
            base,
            progress,
        }
    }

    /// Fill the strip with one color
    pub fn fill(&mut self, color: Rgb) -> &[Rgb] {
        let leds = self.pixels_mut();
        fill_solid(leds, color);
        self.pixels()
    }

    /// Turn every pixel off
    pub fn clear(&mut self) -> &[Rgb] {
        self.fill(BLACK)
    }
}
